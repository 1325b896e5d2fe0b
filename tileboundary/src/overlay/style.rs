//! Drawing attributes for the overlay and the zoom-dependent label size.

use serde::Serialize;

/// Smallest label point size, reached at high zoom.
pub const MIN_LABEL_PT: u8 = 4;

/// Largest label point size, reached at low zoom.
pub const MAX_LABEL_PT: u8 = 16;

/// Base label point size at the reference zoom level 10.
const BASE_LABEL_PT: f64 = 8.0;

/// Shrink factor applied per zoom level above the reference.
const LABEL_SCALE_PER_ZOOM: f64 = 0.8;

/// An RGB color triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
    pub const WHITE: Rgb = Rgb {
        r: 255,
        g: 255,
        b: 255,
    };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }
}

/// How the host should draw boundary lines and labels.
///
/// Label point size is not part of the style; it is derived from zoom by
/// [`label_font_size`] and carried on each rebuilt content.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayStyle {
    /// Boundary line color.
    pub line_color: Rgb,
    /// Boundary line width in millimeters.
    pub line_width_mm: f64,
    /// Label text color.
    pub label_color: Rgb,
    /// Halo color drawn behind label text for contrast.
    pub label_buffer_color: Rgb,
    /// Halo size in millimeters.
    pub label_buffer_mm: f64,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            line_color: Rgb::RED,
            line_width_mm: 0.3,
            label_color: Rgb::BLACK,
            label_buffer_color: Rgb::WHITE,
            label_buffer_mm: 1.0,
        }
    }
}

impl OverlayStyle {
    /// Sets the boundary line color.
    pub fn with_line_color(mut self, color: Rgb) -> Self {
        self.line_color = color;
        self
    }

    /// Sets the boundary line width in millimeters.
    pub fn with_line_width_mm(mut self, width: f64) -> Self {
        self.line_width_mm = width;
        self
    }

    /// Sets the label text color.
    pub fn with_label_color(mut self, color: Rgb) -> Self {
        self.label_color = color;
        self
    }

    /// Sets the label halo color.
    pub fn with_label_buffer_color(mut self, color: Rgb) -> Self {
        self.label_buffer_color = color;
        self
    }

    /// Sets the label halo size in millimeters.
    pub fn with_label_buffer_mm(mut self, buffer: f64) -> Self {
        self.label_buffer_mm = buffer;
        self
    }
}

/// Label point size for a zoom level.
///
/// Base 8pt at zoom 10, shrinking by 0.8 per level of zoom-in and growing
/// by the inverse on zoom-out, truncated and clamped to `[4, 16]`. Monotone
/// non-increasing in zoom: deeper zoom shows more, smaller tiles, so labels
/// shrink to stay out of the way.
pub fn label_font_size(zoom: u8) -> u8 {
    let scaled = BASE_LABEL_PT * LABEL_SCALE_PER_ZOOM.powi(zoom as i32 - 10);
    (scaled.trunc() as i64).clamp(MIN_LABEL_PT as i64, MAX_LABEL_PT as i64) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::MAX_ZOOM;

    #[test]
    fn test_reference_zoom_sizes() {
        assert_eq!(label_font_size(10), 8);
        assert_eq!(label_font_size(9), 10);
        assert_eq!(label_font_size(11), 6);
    }

    #[test]
    fn test_full_size_table() {
        let expected = [
            16, 16, 16, 16, 16, 16, 16, 15, 12, 10, 8, 6, 5, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4,
        ];
        for (zoom, want) in expected.iter().enumerate() {
            assert_eq!(
                label_font_size(zoom as u8),
                *want,
                "Wrong label size at zoom {}",
                zoom
            );
        }
    }

    #[test]
    fn test_size_clamped_and_monotone() {
        let mut last = MAX_LABEL_PT;
        for zoom in 0..=MAX_ZOOM {
            let size = label_font_size(zoom);
            assert!((MIN_LABEL_PT..=MAX_LABEL_PT).contains(&size));
            assert!(
                size <= last,
                "Label size grew from {} to {} at zoom {}",
                last,
                size,
                zoom
            );
            last = size;
        }
    }

    #[test]
    fn test_default_style_matches_drawing_defaults() {
        let style = OverlayStyle::default();
        assert_eq!(style.line_color, Rgb::RED);
        assert_eq!(style.line_width_mm, 0.3);
        assert_eq!(style.label_color, Rgb::BLACK);
        assert_eq!(style.label_buffer_color, Rgb::WHITE);
        assert_eq!(style.label_buffer_mm, 1.0);
    }

    #[test]
    fn test_style_builders() {
        let style = OverlayStyle::default()
            .with_line_color(Rgb::new(0, 128, 255))
            .with_line_width_mm(0.5)
            .with_label_buffer_mm(0.5);
        assert_eq!(style.line_color, Rgb::new(0, 128, 255));
        assert_eq!(style.line_width_mm, 0.5);
        assert_eq!(style.label_buffer_mm, 0.5);
        // Untouched fields keep their defaults
        assert_eq!(style.label_color, Rgb::BLACK);
    }
}
