//! Decoration shapes detected independently of the text.
//!
//! The extractor reports filled rectangles and strokes found on the page. Some
//! of them are text decorations (highlight, underline, strike-through) that
//! must be attributed to the spans they cover; others belong to tables.

use serde::{Deserialize, Serialize};

use crate::geometry::{Axis, Rect};

/// Packed sRGB value of pure white.
pub const WHITE: u32 = 0xFF_FF_FF;

/// Role of a decoration shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// Not yet attributed to any style
    #[default]
    Undefined,
    /// Filled background behind text
    Highlight,
    /// Thin stroke along the bottom of text
    Underline,
    /// Thin stroke through the middle of text
    Strike,
    /// Table border, never a text style
    Border,
    /// Table cell shading, never a text style
    Shading,
}

impl ShapeKind {
    /// True for kinds that can become a text style.
    pub fn is_text_style(&self) -> bool {
        !matches!(self, ShapeKind::Border | ShapeKind::Shading)
    }
}

/// A decoration shape on the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    /// Bounding box of the shape
    pub bbox: Rect,
    /// Fill or stroke colour as packed sRGB
    #[serde(default)]
    pub color: u32,
    /// Attributed role
    #[serde(default, rename = "type")]
    pub kind: ShapeKind,
    /// Set once the shape has been applied to text in a page pass
    #[serde(default)]
    pub consumed: bool,
}

impl Shape {
    /// Create an undecided shape.
    pub fn new(bbox: Rect, color: u32) -> Self {
        Self {
            bbox,
            color,
            kind: ShapeKind::Undefined,
            consumed: false,
        }
    }

    /// Create a shape with a known kind.
    pub fn with_kind(mut self, kind: ShapeKind) -> Self {
        self.kind = kind;
        self
    }

    /// Shapes still available for style repartition.
    pub fn is_available(&self) -> bool {
        !self.consumed && self.kind.is_text_style()
    }

    /// Infer the style this shape represents relative to a text span.
    ///
    /// Returns `None` when the geometry matches no text style, in which case the
    /// span is left as it is.
    pub fn classify(&self, span_bbox: &Rect, axis: Axis) -> Option<ShapeKind> {
        let h_shape = self.bbox.row_extent(axis);
        let h_span = span_bbox.row_extent(axis);
        if h_span <= 0.0 {
            return None;
        }

        if h_shape >= 0.5 * h_span {
            // white fills are page background, not highlight
            return (self.color != WHITE).then_some(ShapeKind::Highlight);
        }

        let (lo, hi) = self.bbox.row_range(axis);
        let center = (lo + hi) / 2.0;
        let (span_lo, span_hi) = span_bbox.row_range(axis);
        let span_center = (span_lo + span_hi) / 2.0;

        // glyph bottoms face y1 for horizontal text and x1 for bottom-top text
        if (center - span_hi).abs() <= 0.25 * h_span {
            Some(ShapeKind::Underline)
        } else if (center - span_center).abs() <= 0.25 * h_span {
            Some(ShapeKind::Strike)
        } else {
            None
        }
    }
}
