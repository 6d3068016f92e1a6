//! Text lines.

use super::direction::TextDirection;
use super::span::Span;
use crate::geometry::{self, Axis, Rect};
use crate::utils::safe_float_cmp;

/// An ordered sequence of spans sharing one direction and one row.
///
/// The bounding box is always the union of the span boxes and is recomputed
/// on every call.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// Unit writing-direction vector from the extractor
    pub dir: (f32, f32),
    /// Spans in reading order
    pub spans: Vec<Span>,
}

impl Line {
    /// Create a left-to-right line.
    pub fn new(spans: Vec<Span>) -> Self {
        Self {
            dir: (1.0, 0.0),
            spans,
        }
    }

    /// Set the direction vector.
    pub fn with_dir(mut self, dir: (f32, f32)) -> Self {
        self.dir = dir;
        self
    }

    /// Union of span boxes; an empty line has a default box.
    pub fn bbox(&self) -> Rect {
        Rect::union_all(self.spans.iter().map(|s| s.bbox())).unwrap_or_default()
    }

    /// Writing direction.
    pub fn text_direction(&self) -> TextDirection {
        TextDirection::from_dir(self.dir)
    }

    /// Flow axis of this line.
    pub fn axis(&self) -> Axis {
        self.text_direction().axis()
    }

    /// Concatenated span text.
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text()).collect()
    }

    /// True if any span is an inline image.
    pub fn has_image(&self) -> bool {
        self.spans.iter().any(Span::is_image)
    }

    /// Check whether `other` occupies the same row. Lines with different
    /// directions never share a row.
    pub fn in_same_row(&self, other: &Line) -> bool {
        self.text_direction() == other.text_direction()
            && geometry::in_same_row(&self.bbox(), &other.bbox(), self.axis())
    }

    /// Check whether the lines overlap across the text flow (side by side).
    pub fn horizontally_align_with(&self, other: &Line, factor: f32) -> bool {
        geometry::horizontally_aligned(&self.bbox(), &other.bbox(), self.axis(), factor)
    }

    /// Check whether the lines overlap along the text flow (stacked).
    pub fn vertically_align_with(&self, other: &Line, factor: f32) -> bool {
        geometry::vertically_aligned(&self.bbox(), &other.bbox(), self.axis(), factor)
    }

    /// Append the spans of another line and restore reading order.
    pub fn add_spans(&mut self, spans: Vec<Span>) {
        self.spans.extend(spans);
        self.sort_spans();
    }

    /// Order spans along the text flow: left to right, or bottom to top.
    pub fn sort_spans(&mut self) {
        match self.axis() {
            Axis::Horizontal => self
                .spans
                .sort_by(|a, b| safe_float_cmp(a.bbox().x0, b.bbox().x0)),
            Axis::Vertical => self
                .spans
                .sort_by(|a, b| safe_float_cmp(b.bbox().y1, a.bbox().y1)),
        }
    }
}
