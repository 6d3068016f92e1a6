//! Spans: the smallest styled units of a line.
//!
//! A span is either a run of text sharing one font and colour, or an inline
//! image. Text spans can be cut by a decoration shape into sub-spans so that
//! the covered part carries the decoration's style; images are atomic.

use serde::{Deserialize, Serialize};

use super::shape::{Shape, ShapeKind};
use crate::geometry::{Axis, Rect};

/// A single glyph with its box, as reported by the extractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Char {
    /// The character
    pub c: char,
    /// Glyph bounding box
    pub bbox: Rect,
}

/// A decoration style applied to (part of) a text span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpanStyle {
    /// Decoration kind
    #[serde(rename = "type")]
    pub kind: ShapeKind,
    /// Decoration colour as packed sRGB
    pub color: u32,
}

/// A run of text with uniform font properties.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextSpan {
    /// Bounding box of the run
    pub bbox: Rect,
    /// Text content
    pub text: String,
    /// Font name
    pub font: String,
    /// Font size in points
    pub size: f32,
    /// Text colour as packed sRGB
    pub color: u32,
    /// Extractor font flags (bold, italic, ...)
    pub flags: u32,
    /// Per-glyph boxes; may be empty
    pub chars: Vec<Char>,
    /// Decorations attributed to this run
    pub style: Vec<SpanStyle>,
}

/// An inline image, treated as one opaque unit.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImageSpan {
    /// Placement of the image
    pub bbox: Rect,
    /// Encoded image bytes
    pub image: Vec<u8>,
}

/// A span in a line.
#[derive(Debug, Clone, PartialEq)]
pub enum Span {
    /// Styled text run
    Text(TextSpan),
    /// Inline image
    Image(ImageSpan),
}

impl Span {
    /// Bounding box of the span.
    pub fn bbox(&self) -> &Rect {
        match self {
            Span::Text(t) => &t.bbox,
            Span::Image(i) => &i.bbox,
        }
    }

    /// Text content; empty for images.
    pub fn text(&self) -> &str {
        match self {
            Span::Text(t) => &t.text,
            Span::Image(_) => "",
        }
    }

    /// True for inline images.
    pub fn is_image(&self) -> bool {
        matches!(self, Span::Image(_))
    }

    /// Whether a decoration region may cut this span.
    pub fn can_split(&self) -> bool {
        !self.is_image()
    }

    /// Split by a decoration shape. `None` when the span is left untouched.
    pub fn split(&self, shape: &mut Shape, axis: Axis) -> Option<Vec<Span>> {
        match self {
            Span::Text(t) => t
                .split(shape, axis)
                .map(|parts| parts.into_iter().map(Span::Text).collect()),
            Span::Image(_) => None,
        }
    }
}

impl From<TextSpan> for Span {
    fn from(span: TextSpan) -> Self {
        Span::Text(span)
    }
}

impl From<ImageSpan> for Span {
    fn from(span: ImageSpan) -> Self {
        Span::Image(span)
    }
}

/// Maps flow-axis coordinates to reading positions measured from the start of
/// the span: left edge for horizontal text, bottom edge for bottom-top text.
#[derive(Clone, Copy)]
struct ReadingFrame {
    axis: Axis,
    lo: f32,
    hi: f32,
}

impl ReadingFrame {
    fn new(bbox: &Rect, axis: Axis) -> Self {
        let (lo, hi) = bbox.flow_range(axis);
        Self { axis, lo, hi }
    }

    fn length(&self) -> f32 {
        self.hi - self.lo
    }

    fn to_reading(&self, (a, b): (f32, f32)) -> (f32, f32) {
        match self.axis {
            Axis::Horizontal => (a - self.lo, b - self.lo),
            Axis::Vertical => (self.hi - b, self.hi - a),
        }
    }

    fn to_flow(&self, (t0, t1): (f32, f32)) -> (f32, f32) {
        match self.axis {
            Axis::Horizontal => (self.lo + t0, self.lo + t1),
            Axis::Vertical => (self.hi - t1, self.hi - t0),
        }
    }
}

struct Part {
    start: f32,
    end: f32,
    text: String,
    chars: Vec<Char>,
    styled: bool,
}

impl TextSpan {
    /// Create a text span without glyph boxes.
    pub fn new(bbox: Rect, text: impl Into<String>) -> Self {
        Self {
            bbox,
            text: text.into(),
            ..Default::default()
        }
    }

    /// Split this span at the boundaries of a decoration shape.
    ///
    /// Produces up to three sub-spans in reading order: before, inside and
    /// after the shape. Their boxes tile the original box along the text flow.
    /// The inside part gains the shape's style. An undecided shape is
    /// classified against this span first; `None` is returned when the shape
    /// does not overlap the span, matches no text style, or covers no text.
    pub fn split(&self, shape: &mut Shape, axis: Axis) -> Option<Vec<TextSpan>> {
        let intsec = shape.bbox.intersection(&self.bbox)?;

        if shape.kind == ShapeKind::Undefined {
            match shape.classify(&self.bbox, axis) {
                Some(kind) => shape.kind = kind,
                None => {
                    log::trace!("shape at {:?} matches no text style", shape.bbox);
                    return None;
                },
            }
        }

        let frame = ReadingFrame::new(&self.bbox, axis);
        let (t_in0, t_in1) = frame.to_reading(intsec.flow_range(axis));
        let parts = if self.chars.is_empty() {
            self.partition_by_length(&frame, t_in0, t_in1)?
        } else {
            self.partition_by_chars(&frame, t_in0, t_in1)?
        };

        let style = SpanStyle {
            kind: shape.kind,
            color: shape.color,
        };
        let spans = parts
            .into_iter()
            .filter(|p| !p.text.is_empty())
            .map(|p| {
                let (lo, hi) = frame.to_flow((p.start, p.end));
                let mut span = TextSpan {
                    bbox: self.bbox.with_flow_range(axis, lo, hi),
                    text: p.text,
                    chars: p.chars,
                    ..self.clone()
                };
                if p.styled && !span.style.contains(&style) {
                    span.style.push(style);
                }
                span
            })
            .collect();
        Some(spans)
    }

    fn partition_by_chars(&self, frame: &ReadingFrame, t_in0: f32, t_in1: f32) -> Option<Vec<Part>> {
        let length = frame.length();
        let mut regions: [Vec<Char>; 3] = Default::default();
        let mut inside_lo = f32::INFINITY;
        let mut inside_hi = f32::NEG_INFINITY;

        for ch in &self.chars {
            let (c0, c1) = frame.to_reading(ch.bbox.flow_range(frame.axis));
            let center = (c0 + c1) / 2.0;
            let region = if center < t_in0 {
                0
            } else if center <= t_in1 {
                inside_lo = inside_lo.min(c0);
                inside_hi = inside_hi.max(c1);
                1
            } else {
                2
            };
            regions[region].push(ch.clone());
        }

        if regions[1].is_empty() {
            return None;
        }

        let cut0 = if regions[0].is_empty() {
            0.0
        } else {
            inside_lo.max(0.0).min(length)
        };
        let cut1 = if regions[2].is_empty() {
            length
        } else {
            inside_hi.max(cut0).min(length)
        };

        let [before, inside, after] = regions;
        Some(vec![
            Part::from_chars(0.0, cut0, before, false),
            Part::from_chars(cut0, cut1, inside, true),
            Part::from_chars(cut1, length, after, false),
        ])
    }

    fn partition_by_length(&self, frame: &ReadingFrame, t_in0: f32, t_in1: f32) -> Option<Vec<Part>> {
        let length = frame.length();
        let chars: Vec<char> = self.text.chars().collect();
        let n = chars.len();
        if n == 0 || length <= 0.0 {
            return None;
        }

        let index = |t: f32| ((t / length * n as f32).round().max(0.0) as usize).min(n);
        let i0 = index(t_in0);
        let i1 = index(t_in1);
        if i1 <= i0 {
            return None;
        }

        let cut0 = if i0 == 0 { 0.0 } else { t_in0 };
        let cut1 = if i1 == n { length } else { t_in1 };
        let text = |a: usize, b: usize| chars[a..b].iter().collect::<String>();

        Some(vec![
            Part::from_text(0.0, cut0, text(0, i0), false),
            Part::from_text(cut0, cut1, text(i0, i1), true),
            Part::from_text(cut1, length, text(i1, n), false),
        ])
    }
}

impl Part {
    fn from_chars(start: f32, end: f32, chars: Vec<Char>, styled: bool) -> Self {
        Self {
            start,
            end,
            text: chars.iter().map(|c| c.c).collect(),
            chars,
            styled,
        }
    }

    fn from_text(start: f32, end: f32, text: String, styled: bool) -> Self {
        Self {
            start,
            end,
            text,
            chars: Vec::new(),
            styled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars_span(text: &str, x0: f32, y0: f32, w: f32, h: f32) -> TextSpan {
        let chars: Vec<Char> = text
            .chars()
            .enumerate()
            .map(|(i, c)| Char {
                c,
                bbox: Rect::new(x0 + i as f32 * w, y0, x0 + (i + 1) as f32 * w, y0 + h),
            })
            .collect();
        TextSpan {
            bbox: Rect::new(x0, y0, x0 + text.chars().count() as f32 * w, y0 + h),
            text: text.to_string(),
            chars,
            ..Default::default()
        }
    }

    fn highlight(x0: f32, x1: f32) -> Shape {
        Shape::new(Rect::new(x0, 99.0, x1, 113.0), 0xFFFF00)
    }

    #[test]
    fn test_image_never_splits() {
        let image = Span::Image(ImageSpan {
            bbox: Rect::new(0.0, 0.0, 10.0, 10.0),
            image: vec![1, 2, 3],
        });
        assert!(!image.can_split());
        let mut shape = Shape::new(Rect::new(0.0, 0.0, 5.0, 10.0), 0xFF0000);
        assert!(image.split(&mut shape, Axis::Horizontal).is_none());
        assert_eq!(shape.kind, ShapeKind::Undefined);
    }

    #[test]
    fn test_split_by_chars_into_three() {
        let span = chars_span("abcdef", 0.0, 100.0, 10.0, 12.0);
        let mut shape = highlight(19.0, 41.0);
        let parts = span.split(&mut shape, Axis::Horizontal).unwrap();

        assert_eq!(shape.kind, ShapeKind::Highlight);
        let texts: Vec<&str> = parts.iter().map(|p| p.text.as_str()).collect();
        assert_eq!(texts, vec!["ab", "cd", "ef"]);
        assert_eq!(parts[0].bbox, Rect::new(0.0, 100.0, 20.0, 112.0));
        assert_eq!(parts[1].bbox, Rect::new(20.0, 100.0, 40.0, 112.0));
        assert_eq!(parts[2].bbox, Rect::new(40.0, 100.0, 60.0, 112.0));
        assert!(parts[0].style.is_empty());
        assert_eq!(parts[1].style[0].kind, ShapeKind::Highlight);
        assert!(parts[2].style.is_empty());
    }

    #[test]
    fn test_split_covering_whole_span() {
        let span = chars_span("abc", 0.0, 100.0, 10.0, 12.0);
        let mut shape = highlight(-5.0, 50.0);
        let parts = span.split(&mut shape, Axis::Horizontal).unwrap();
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].bbox, span.bbox);
        assert_eq!(parts[0].style.len(), 1);
    }

    #[test]
    fn test_split_by_length() {
        let span = TextSpan::new(Rect::new(0.0, 100.0, 100.0, 112.0), "0123456789");
        let mut shape = highlight(50.0, 120.0);
        let parts = span.split(&mut shape, Axis::Horizontal).unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].text, "01234");
        assert_eq!(parts[1].text, "56789");
        assert_eq!(parts[0].bbox.x1, 50.0);
        assert_eq!(parts[1].bbox.x0, 50.0);
        assert_eq!(parts[1].bbox.x1, 100.0);
    }

    #[test]
    fn test_no_overlap_is_untouched() {
        let span = chars_span("abc", 0.0, 100.0, 10.0, 12.0);
        let mut shape = highlight(200.0, 250.0);
        assert!(span.split(&mut shape, Axis::Horizontal).is_none());
        assert_eq!(shape.kind, ShapeKind::Undefined);
    }

    #[test]
    fn test_unclassified_shape_leaves_span() {
        let span = chars_span("abc", 0.0, 100.0, 10.0, 12.0);
        // thin stroke near the top edge
        let mut shape = Shape::new(Rect::new(0.0, 100.0, 30.0, 100.5), 0);
        assert!(span.split(&mut shape, Axis::Horizontal).is_none());
    }

    #[test]
    fn test_vertical_split_reading_order() {
        // bottom-top text: reading starts at y1
        let span = TextSpan::new(Rect::new(100.0, 0.0, 112.0, 40.0), "abcd");
        let mut shape = Shape::new(Rect::new(99.0, 0.0, 113.0, 20.0), 0x00FF00);
        let parts = span.split(&mut shape, Axis::Vertical).unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].text, "ab");
        assert_eq!(parts[0].bbox, Rect::new(100.0, 20.0, 112.0, 40.0));
        assert_eq!(parts[1].text, "cd");
        assert_eq!(parts[1].bbox, Rect::new(100.0, 0.0, 112.0, 20.0));
        assert_eq!(parts[1].style[0].kind, ShapeKind::Highlight);
    }
}
