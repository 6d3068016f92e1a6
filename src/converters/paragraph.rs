//! Flow-document paragraph model.
//!
//! [`Paragraph`] is the crate's own rendering of a reconstructed block. A
//! document writer that builds its paragraphs in place (a DOCX body, an HTML
//! tree) implements [`ParagraphBuilder`] instead and receives the same calls.

use serde::{Deserialize, Serialize};

use super::styles::{ParagraphAlignment, TextStyle};
use crate::geometry::Rect;
use crate::layout::span::{ImageSpan, SpanStyle, TextSpan};
use crate::layout::text_block::TextAlignment;

/// Paragraph-level formatting, in points.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParagraphFormat {
    /// Horizontal alignment
    pub alignment: ParagraphAlignment,
    /// Indent from the leading edge; set for left-aligned paragraphs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_indent: Option<f32>,
    /// Indent from the trailing edge; set for right-aligned paragraphs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right_indent: Option<f32>,
    /// Space before the paragraph
    pub space_before: f32,
    /// Space after the paragraph
    pub space_after: f32,
    /// Exact line height
    pub line_spacing: f32,
}

/// A styled text run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    /// Text content
    pub text: String,
    /// Font name
    #[serde(default)]
    pub font: String,
    /// Font size in points
    #[serde(default)]
    pub size: f32,
    /// Text colour (packed sRGB)
    #[serde(default)]
    pub color: u32,
    /// Extractor font flags
    #[serde(default)]
    pub flags: u32,
    /// Decorations (highlight, underline, strike)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub style: Vec<SpanStyle>,
}

impl TextRun {
    /// Character formatting of this run.
    pub fn text_style(&self) -> TextStyle {
        TextStyle::from(self)
    }
}

impl From<&TextSpan> for TextRun {
    fn from(span: &TextSpan) -> Self {
        Self {
            text: span.text.clone(),
            font: span.font.clone(),
            size: span.size,
            color: span.color,
            flags: span.flags,
            style: span.style.clone(),
        }
    }
}

/// An image placed inline with the text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InlineImage {
    /// Placement on the source page; width and height give the display size
    pub bbox: Rect,
    /// Encoded image bytes
    pub image: Vec<u8>,
}

impl From<&ImageSpan> for InlineImage {
    fn from(span: &ImageSpan) -> Self {
        Self {
            bbox: span.bbox,
            image: span.image.clone(),
        }
    }
}

/// Content of a paragraph, in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ParagraphItem {
    /// Text run
    Run(TextRun),
    /// Inline image
    Image(InlineImage),
    /// Explicit line break
    LineBreak,
}

/// Receiver of paragraph assembly calls.
///
/// `set_format` is called once, before any content.
pub trait ParagraphBuilder {
    /// Set paragraph-level formatting.
    fn set_format(&mut self, format: ParagraphFormat);

    /// Append a text run.
    fn add_run(&mut self, run: TextRun);

    /// Append an inline image.
    fn add_image(&mut self, image: InlineImage);

    /// Append an explicit line break.
    fn add_line_break(&mut self);
}

/// A reconstructed paragraph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Paragraph-level formatting
    #[serde(flatten)]
    pub format: ParagraphFormat,
    /// Runs, images and breaks
    pub items: Vec<ParagraphItem>,
}

impl Paragraph {
    /// Plain text, line breaks rendered as `\n`.
    pub fn text(&self) -> String {
        let mut text = String::new();
        for item in &self.items {
            match item {
                ParagraphItem::Run(run) => text.push_str(&run.text),
                ParagraphItem::LineBreak => text.push('\n'),
                ParagraphItem::Image(_) => {},
            }
        }
        text
    }

    /// Text runs only.
    pub fn runs(&self) -> impl Iterator<Item = &TextRun> {
        self.items.iter().filter_map(|item| match item {
            ParagraphItem::Run(run) => Some(run),
            _ => None,
        })
    }
}

impl ParagraphBuilder for Paragraph {
    fn set_format(&mut self, format: ParagraphFormat) {
        self.format = format;
    }

    fn add_run(&mut self, run: TextRun) {
        self.items.push(ParagraphItem::Run(run));
    }

    fn add_image(&mut self, image: InlineImage) {
        self.items.push(ParagraphItem::Image(image));
    }

    fn add_line_break(&mut self) {
        self.items.push(ParagraphItem::LineBreak);
    }
}

impl From<TextAlignment> for ParagraphAlignment {
    fn from(alignment: TextAlignment) -> Self {
        match alignment {
            TextAlignment::Left => ParagraphAlignment::Left,
            TextAlignment::Center => ParagraphAlignment::Center,
            TextAlignment::Right => ParagraphAlignment::Right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_collects_items() {
        let mut paragraph = Paragraph::default();
        paragraph.add_run(TextRun {
            text: "first".into(),
            ..Default::default()
        });
        paragraph.add_line_break();
        paragraph.add_image(InlineImage::default());
        paragraph.add_run(TextRun {
            text: "second".into(),
            ..Default::default()
        });
        assert_eq!(paragraph.text(), "first\nsecond");
        assert_eq!(paragraph.runs().count(), 2);
    }

    #[test]
    fn test_serialized_shape() {
        let paragraph = Paragraph {
            format: ParagraphFormat {
                alignment: ParagraphAlignment::Right,
                right_indent: Some(12.5),
                line_spacing: 14.0,
                ..Default::default()
            },
            items: vec![ParagraphItem::LineBreak],
        };
        let value = serde_json::to_value(&paragraph).unwrap();
        assert_eq!(value["alignment"], "right");
        assert_eq!(value["right_indent"], 12.5);
        assert!(value.get("left_indent").is_none());
        assert_eq!(value["items"][0]["type"], "line_break");
    }

    #[test]
    fn test_run_from_span() {
        let span = TextSpan {
            font: "Arial".into(),
            size: 9.0,
            flags: 16,
            ..TextSpan::new(Rect::new(0.0, 0.0, 10.0, 10.0), "bold")
        };
        let run = TextRun::from(&span);
        assert_eq!(run.text, "bold");
        assert!(run.text_style().bold);
    }
}
