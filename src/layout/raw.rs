//! Serialized layout records.
//!
//! The extractor hands over a page as nested JSON records: blocks, lines and
//! spans, each with a bounding box, plus the decoration shapes it found. These
//! records are converted into the layout model after structural validation;
//! [`TextBlock::store`] produces the same records back, with the computed
//! geometry and spacing filled in.

use serde::{Deserialize, Serialize};

use super::line::Line;
use super::lines::Lines;
use super::shape::Shape;
use super::span::{Char, ImageSpan, Span, SpanStyle, TextSpan};
use super::text_block::{TextAlignment, TextBlock};
use crate::error::{Error, Result};
use crate::geometry::Rect;

/// Block type tag for text blocks.
pub const BLOCK_TEXT: u8 = 0;
/// Block type tag for standalone image blocks.
pub const BLOCK_IMAGE: u8 = 1;

/// Decoration shape record; shapes are stored as they are modelled.
pub type RawShape = Shape;

/// A page of extracted layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPage {
    /// Page or column box used as the alignment container
    pub bbox: Rect,
    /// Blocks in extraction order
    #[serde(default)]
    pub blocks: Vec<RawBlock>,
    /// Decoration shapes found on the page
    #[serde(default)]
    pub shapes: Vec<RawShape>,
}

/// A block record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawBlock {
    /// Block type tag
    #[serde(default, rename = "type")]
    pub kind: u8,
    /// Computed bounding box; ignored on input
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<Rect>,
    /// Lines of the block
    #[serde(default)]
    pub lines: Vec<RawLine>,
    /// Inferred alignment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<TextAlignment>,
    /// Leading indent
    #[serde(default)]
    pub left_space: f32,
    /// Trailing indent
    #[serde(default)]
    pub right_space: f32,
    /// Space before the block
    #[serde(default)]
    pub before_space: f32,
    /// Space after the block
    #[serde(default)]
    pub after_space: f32,
    /// Line height
    #[serde(default)]
    pub line_space: f32,
}

/// A line record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawLine {
    /// Writing-direction unit vector
    #[serde(default = "default_dir")]
    pub dir: (f32, f32),
    /// Computed bounding box; ignored on input
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<Rect>,
    /// Spans of the line
    #[serde(default)]
    pub spans: Vec<RawSpan>,
}

fn default_dir() -> (f32, f32) {
    (1.0, 0.0)
}

/// A span record: an inline image, or a text run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawSpan {
    /// Inline image, recognized by its `image` field
    Image {
        /// Placement
        bbox: Rect,
        /// Encoded image bytes
        image: Vec<u8>,
    },
    /// Text run
    Text(RawTextSpan),
}

/// A text span record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawTextSpan {
    /// Bounding box
    pub bbox: Rect,
    /// Text; derived from `chars` when absent
    #[serde(default)]
    pub text: String,
    /// Font name
    #[serde(default)]
    pub font: String,
    /// Font size
    #[serde(default)]
    pub size: f32,
    /// Text colour (packed sRGB)
    #[serde(default)]
    pub color: u32,
    /// Font flags
    #[serde(default)]
    pub flags: u32,
    /// Per-glyph boxes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub chars: Vec<Char>,
    /// Attributed decorations
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub style: Vec<SpanStyle>,
}

fn check_bbox(bbox: &Rect, what: &str) -> Result<()> {
    if bbox.is_valid() {
        Ok(())
    } else {
        Err(Error::InvalidLayout(format!(
            "{} has invalid bbox [{}, {}, {}, {}]",
            what, bbox.x0, bbox.y0, bbox.x1, bbox.y1
        )))
    }
}

impl TryFrom<RawSpan> for Span {
    type Error = Error;

    fn try_from(raw: RawSpan) -> Result<Self> {
        match raw {
            RawSpan::Image { bbox, image } => {
                check_bbox(&bbox, "image span")?;
                Ok(Span::Image(ImageSpan { bbox, image }))
            },
            RawSpan::Text(t) => {
                check_bbox(&t.bbox, "text span")?;
                for ch in &t.chars {
                    check_bbox(&ch.bbox, "char")?;
                }
                let text = if t.text.is_empty() {
                    t.chars.iter().map(|c| c.c).collect()
                } else {
                    t.text
                };
                Ok(Span::Text(TextSpan {
                    bbox: t.bbox,
                    text,
                    font: t.font,
                    size: t.size,
                    color: t.color,
                    flags: t.flags,
                    chars: t.chars,
                    style: t.style,
                }))
            },
        }
    }
}

impl TryFrom<RawLine> for Line {
    type Error = Error;

    fn try_from(raw: RawLine) -> Result<Self> {
        if raw.spans.is_empty() {
            return Err(Error::InvalidLayout("line without spans".to_string()));
        }
        if !raw.dir.0.is_finite() || !raw.dir.1.is_finite() {
            return Err(Error::InvalidLayout(format!("line has invalid dir {:?}", raw.dir)));
        }
        let spans = raw
            .spans
            .into_iter()
            .map(Span::try_from)
            .collect::<Result<Vec<_>>>()?;
        Ok(Line::new(spans).with_dir(raw.dir))
    }
}

impl TryFrom<RawBlock> for TextBlock {
    type Error = Error;

    fn try_from(raw: RawBlock) -> Result<Self> {
        if raw.kind != BLOCK_TEXT {
            return Err(Error::InvalidLayout(format!("block type {} is not text", raw.kind)));
        }
        if raw.lines.is_empty() {
            return Err(Error::InvalidLayout("block without lines".to_string()));
        }
        let lines = raw
            .lines
            .into_iter()
            .map(Line::try_from)
            .collect::<Result<Vec<_>>>()?;
        Ok(TextBlock {
            lines: Lines::new(lines),
            alignment: raw.alignment.unwrap_or_default(),
            left_space: raw.left_space,
            right_space: raw.right_space,
            before_space: raw.before_space,
            after_space: raw.after_space,
            line_space: raw.line_space,
        })
    }
}

impl From<&Span> for RawSpan {
    fn from(span: &Span) -> Self {
        match span {
            Span::Image(i) => RawSpan::Image {
                bbox: i.bbox,
                image: i.image.clone(),
            },
            Span::Text(t) => RawSpan::Text(RawTextSpan {
                bbox: t.bbox,
                text: t.text.clone(),
                font: t.font.clone(),
                size: t.size,
                color: t.color,
                flags: t.flags,
                chars: t.chars.clone(),
                style: t.style.clone(),
            }),
        }
    }
}

impl From<&Line> for RawLine {
    fn from(line: &Line) -> Self {
        Self {
            dir: line.dir,
            bbox: Some(line.bbox()),
            spans: line.spans.iter().map(RawSpan::from).collect(),
        }
    }
}

impl TextBlock {
    /// Serialize the block, computed bbox and spacing included.
    pub fn store(&self) -> RawBlock {
        RawBlock {
            kind: BLOCK_TEXT,
            bbox: Some(self.bbox()),
            lines: self.lines.iter().map(RawLine::from).collect(),
            alignment: Some(self.alignment),
            left_space: self.left_space,
            right_space: self.right_space,
            before_space: self.before_space,
            after_space: self.after_space,
            line_space: self.line_space,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"{
        "bbox": [0, 0, 600, 800],
        "blocks": [{
            "bbox": [1, 2, 3, 4],
            "lines": [{
                "dir": [1, 0],
                "spans": [
                    {"bbox": [10, 10, 60, 22], "text": "Hello", "font": "Arial", "size": 11, "flags": 16},
                    {"bbox": [62, 10, 80, 22], "image": [137, 80, 78, 71]}
                ]
            }]
        }],
        "shapes": [{"bbox": [10, 21, 60, 22], "color": 0}]
    }"#;

    #[test]
    fn test_parse_page() {
        let page: RawPage = serde_json::from_str(PAGE).unwrap();
        assert_eq!(page.blocks.len(), 1);
        assert_eq!(page.shapes.len(), 1);
        let spans = &page.blocks[0].lines[0].spans;
        assert!(matches!(spans[0], RawSpan::Text(_)));
        assert!(matches!(spans[1], RawSpan::Image { .. }));
    }

    #[test]
    fn test_block_bbox_is_recomputed() {
        let page: RawPage = serde_json::from_str(PAGE).unwrap();
        let block = TextBlock::try_from(page.blocks[0].clone()).unwrap();
        assert_eq!(block.bbox(), Rect::new(10.0, 10.0, 80.0, 22.0));
        assert_eq!(block.store().bbox, Some(Rect::new(10.0, 10.0, 80.0, 22.0)));
    }

    #[test]
    fn test_text_from_chars() {
        let raw: RawSpan = serde_json::from_str(
            r#"{"bbox": [0, 0, 20, 10], "chars": [
                {"c": "o", "bbox": [0, 0, 10, 10]},
                {"c": "k", "bbox": [10, 0, 20, 10]}
            ]}"#,
        )
        .unwrap();
        let span = Span::try_from(raw).unwrap();
        assert_eq!(span.text(), "ok");
    }

    #[test]
    fn test_rejects_empty_block_and_line() {
        let empty = RawBlock::default();
        assert!(matches!(TextBlock::try_from(empty), Err(Error::InvalidLayout(_))));

        let line = RawLine {
            dir: (1.0, 0.0),
            bbox: None,
            spans: Vec::new(),
        };
        assert!(matches!(Line::try_from(line), Err(Error::InvalidLayout(_))));
    }

    #[test]
    fn test_rejects_inverted_bbox() {
        let raw = RawSpan::Text(RawTextSpan {
            bbox: Rect::new(10.0, 0.0, 0.0, 10.0),
            text: "x".into(),
            ..Default::default()
        });
        let err = Span::try_from(raw).unwrap_err();
        assert!(err.to_string().contains("invalid bbox"));
    }

    #[test]
    fn test_rejects_image_block() {
        let raw = RawBlock {
            kind: BLOCK_IMAGE,
            ..Default::default()
        };
        assert!(TextBlock::try_from(raw).is_err());
    }

    #[test]
    fn test_store_keeps_spacing() {
        let page: RawPage = serde_json::from_str(PAGE).unwrap();
        let mut block = TextBlock::try_from(page.blocks[0].clone()).unwrap();
        block.before_space = 4.0;
        block.alignment = TextAlignment::Right;
        block.right_space = 8.0;
        let stored = block.store();
        assert_eq!(stored.before_space, 4.0);
        assert_eq!(stored.alignment, Some(TextAlignment::Right));
        assert_eq!(stored.lines[0].bbox, Some(Rect::new(10.0, 10.0, 80.0, 22.0)));

        let restored = TextBlock::try_from(stored).unwrap();
        assert_eq!(restored, block);
    }
}
