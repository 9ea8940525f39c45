//! Watermark placement calculations
//!
//! Converts a named anchor position plus page dimensions into the (x, y)
//! origin at which watermark text should be drawn. The text footprint is
//! estimated with a fixed average-glyph-width heuristic rather than real
//! font metrics, so the result is approximate.

use crate::error::{Error, Result};

/// Default margin between the watermark footprint and the page edge,
/// in page coordinate units (points)
pub const DEFAULT_MARGIN: f64 = 20.0;

/// Width and height of a single page in its native coordinate space.
///
/// Origin is at the bottom-left corner with y increasing upward,
/// matching the PDF coordinate convention.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f64,
    pub height: f64,
}

impl PageGeometry {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// US Letter size in points (612 × 792)
    pub fn letter() -> Self {
        Self::new(612.0, 792.0)
    }
}

/// Named relative position on a page used to derive an absolute draw origin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Center,
}

impl Anchor {
    /// Parse an anchor name such as "bottom-right".
    ///
    /// Unrecognized names fall back to `Center`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "top-left" => Anchor::TopLeft,
            "top-right" => Anchor::TopRight,
            "bottom-left" => Anchor::BottomLeft,
            "bottom-right" => Anchor::BottomRight,
            _ => Anchor::Center,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Anchor::TopLeft => "top-left",
            Anchor::TopRight => "top-right",
            Anchor::BottomLeft => "bottom-left",
            Anchor::BottomRight => "bottom-right",
            Anchor::Center => "center",
        }
    }
}

/// Text, styling and anchoring for one watermark
#[derive(Debug, Clone)]
pub struct WatermarkSpec {
    /// Watermark text (must be non-empty)
    pub text: String,
    /// Font size in points (must be positive)
    pub font_size: f64,
    /// Rotation in degrees, passed through to the draw primitive unmodified.
    /// The text is rotated around the draw origin, not its visual center,
    /// so non-zero rotation drifts from the anchor; positioning does not
    /// attempt to correct for this.
    pub rotation_degrees: f64,
    /// Where on the page the text should sit
    pub anchor: Anchor,
    /// Distance from the page edge in page units
    pub margin: f64,
}

impl WatermarkSpec {
    pub fn new(text: impl Into<String>, font_size: f64) -> Self {
        Self {
            text: text.into(),
            font_size,
            rotation_degrees: 0.0,
            anchor: Anchor::Center,
            margin: DEFAULT_MARGIN,
        }
    }
}

/// Draw origin to pass to the text-drawing primitive
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
}

/// Estimate the footprint of `text` at `font_size`.
///
/// Width assumes an average glyph width of half the font size; height is
/// the font size itself. See the module docs for why this is approximate.
pub fn text_extent(text: &str, font_size: f64) -> (f64, f64) {
    (text.chars().count() as f64 * font_size * 0.5, font_size)
}

/// Compute the draw origin that places `spec.text` at `spec.anchor`.
///
/// The returned origin keeps the approximate bounding box of the text
/// inside the page whenever the footprint fits and the margin is smaller
/// than half of each page dimension; larger footprints may extend past
/// the edge.
///
/// Fails with [`Error::InvalidArgument`] on non-positive page dimensions,
/// empty text or a non-positive font size. Pure and deterministic.
pub fn place(geometry: &PageGeometry, spec: &WatermarkSpec) -> Result<Placement> {
    if !(geometry.width > 0.0) || !(geometry.height > 0.0) {
        return Err(Error::InvalidArgument(format!(
            "page dimensions must be positive, got {} x {}",
            geometry.width, geometry.height
        )));
    }
    if spec.text.is_empty() {
        return Err(Error::InvalidArgument(
            "watermark text must not be empty".to_string(),
        ));
    }
    if !(spec.font_size > 0.0) {
        return Err(Error::InvalidArgument(format!(
            "font size must be positive, got {}",
            spec.font_size
        )));
    }
    if spec.margin < 0.0 {
        return Err(Error::InvalidArgument(format!(
            "margin must not be negative, got {}",
            spec.margin
        )));
    }

    let (text_width, text_height) = text_extent(&spec.text, spec.font_size);
    let margin = spec.margin;
    let (width, height) = (geometry.width, geometry.height);

    let (x, y) = match spec.anchor {
        Anchor::TopLeft => (margin, height - margin - text_height),
        Anchor::TopRight => (width - margin - text_width, height - margin - text_height),
        Anchor::BottomLeft => (margin, margin),
        Anchor::BottomRight => (width - margin - text_width, margin),
        Anchor::Center => (
            width / 2.0 - text_width / 2.0,
            height / 2.0 - text_height / 2.0,
        ),
    };

    Ok(Placement { x, y })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(text: &str, font_size: f64, anchor: Anchor) -> WatermarkSpec {
        WatermarkSpec {
            text: text.to_string(),
            font_size,
            rotation_degrees: 0.0,
            anchor,
            margin: DEFAULT_MARGIN,
        }
    }

    #[test]
    fn test_center_formula() {
        let geometry = PageGeometry::new(612.0, 792.0);
        let s = spec("DRAFT", 30.0, Anchor::Center);
        let p = place(&geometry, &s).unwrap();
        // text_width = 5 * 30 * 0.5 = 75, text_height = 30
        assert_eq!(p.x, 612.0 / 2.0 - 75.0 / 2.0);
        assert_eq!(p.y, 792.0 / 2.0 - 30.0 / 2.0);
    }

    #[test]
    fn test_bottom_left_ignores_text_length() {
        let geometry = PageGeometry::letter();
        for text in ["x", "a much longer watermark string"] {
            let p = place(&geometry, &spec(text, 24.0, Anchor::BottomLeft)).unwrap();
            assert_eq!(p.x, DEFAULT_MARGIN);
            assert_eq!(p.y, DEFAULT_MARGIN);
        }
    }

    #[test]
    fn test_top_right_worked_example() {
        // width 200, height 300, "SAMPLE" at 40pt:
        // text_width = 6 * 40 * 0.5 = 120, so x = 200 - 20 - 120 = 60
        // text_height = 40, so y = 300 - 20 - 40 = 240
        let geometry = PageGeometry::new(200.0, 300.0);
        let p = place(&geometry, &spec("SAMPLE", 40.0, Anchor::TopRight)).unwrap();
        assert_eq!(p.x, 60.0);
        assert_eq!(p.y, 240.0);
    }

    #[test]
    fn test_top_left_and_bottom_right() {
        let geometry = PageGeometry::new(200.0, 300.0);
        let tl = place(&geometry, &spec("SAMPLE", 40.0, Anchor::TopLeft)).unwrap();
        assert_eq!(tl.x, 20.0);
        assert_eq!(tl.y, 240.0);
        let br = place(&geometry, &spec("SAMPLE", 40.0, Anchor::BottomRight)).unwrap();
        assert_eq!(br.x, 60.0);
        assert_eq!(br.y, 20.0);
    }

    #[test]
    fn test_unrecognized_anchor_falls_back_to_center() {
        assert_eq!(Anchor::from_name("middle"), Anchor::Center);
        assert_eq!(Anchor::from_name(""), Anchor::Center);
        assert_eq!(Anchor::from_name("TOP-LEFT"), Anchor::TopLeft);
        assert_eq!(Anchor::from_name("bottom-right"), Anchor::BottomRight);
    }

    #[test]
    fn test_anchor_name_round_trips() {
        for anchor in [
            Anchor::TopLeft,
            Anchor::TopRight,
            Anchor::BottomLeft,
            Anchor::BottomRight,
            Anchor::Center,
        ] {
            assert_eq!(Anchor::from_name(anchor.name()), anchor);
        }
    }

    #[test]
    fn test_invalid_geometry_rejected() {
        let s = spec("DRAFT", 30.0, Anchor::Center);
        for geometry in [PageGeometry::new(0.0, 792.0), PageGeometry::new(612.0, -1.0)] {
            let result = place(&geometry, &s);
            assert!(matches!(result, Err(Error::InvalidArgument(_))));
        }
    }

    #[test]
    fn test_empty_text_and_bad_font_size_rejected() {
        let geometry = PageGeometry::letter();
        let empty = spec("", 30.0, Anchor::Center);
        assert!(matches!(
            place(&geometry, &empty),
            Err(Error::InvalidArgument(_))
        ));
        let zero_size = spec("DRAFT", 0.0, Anchor::Center);
        assert!(matches!(
            place(&geometry, &zero_size),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_deterministic() {
        let geometry = PageGeometry::letter();
        let s = spec("CONFIDENTIAL", 48.0, Anchor::TopRight);
        let first = place(&geometry, &s).unwrap();
        for _ in 0..10 {
            assert_eq!(place(&geometry, &s).unwrap(), first);
        }
    }

    #[test]
    fn test_footprint_stays_inside_page_when_it_fits() {
        let geometry = PageGeometry::letter();
        for anchor in [
            Anchor::TopLeft,
            Anchor::TopRight,
            Anchor::BottomLeft,
            Anchor::BottomRight,
            Anchor::Center,
        ] {
            let s = spec("DRAFT", 36.0, anchor);
            let p = place(&geometry, &s).unwrap();
            let (tw, th) = text_extent(&s.text, s.font_size);
            assert!(p.x >= 0.0 && p.x + tw <= geometry.width, "{:?}", anchor);
            assert!(p.y >= 0.0 && p.y + th <= geometry.height, "{:?}", anchor);
        }
    }
}
