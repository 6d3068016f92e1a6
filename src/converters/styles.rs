//! Run and paragraph style mapping.
//!
//! Maps span attributes reported by the extractor (font flags, packed colours,
//! decoration styles) to the character formatting a word processor expects.

use serde::{Deserialize, Serialize};

use super::paragraph::TextRun;
use crate::layout::shape::ShapeKind;

/// Font flag: superscript.
pub const FLAG_SUPERSCRIPT: u32 = 1;
/// Font flag: italic.
pub const FLAG_ITALIC: u32 = 1 << 1;
/// Font flag: serifed glyphs.
pub const FLAG_SERIF: u32 = 1 << 2;
/// Font flag: monospaced glyphs.
pub const FLAG_MONOSPACE: u32 = 1 << 3;
/// Font flag: bold.
pub const FLAG_BOLD: u32 = 1 << 4;

/// Paragraph alignment options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParagraphAlignment {
    /// Flush with the leading edge
    #[default]
    Left,
    /// Centred between the edges
    Center,
    /// Flush with the trailing edge
    Right,
}

/// Character formatting of one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextStyle {
    /// Font name
    pub font_name: Option<String>,
    /// Font size in points
    pub font_size: Option<f32>,
    /// Bold
    pub bold: bool,
    /// Italic
    pub italic: bool,
    /// Superscript
    pub superscript: bool,
    /// Underline
    pub underline: bool,
    /// Strikethrough
    pub strikethrough: bool,
    /// Highlight colour (packed sRGB)
    pub highlight: Option<u32>,
    /// Text colour (packed sRGB)
    pub color: u32,
}

impl TextStyle {
    /// Text colour as `RRGGBB`.
    pub fn color_hex(&self) -> String {
        color_hex(self.color)
    }

    /// Font size in half-points, the unit word processors store sizes in.
    pub fn half_points(&self) -> Option<u32> {
        self.font_size.map(points_to_half_points)
    }
}

impl From<&TextRun> for TextStyle {
    fn from(run: &TextRun) -> Self {
        let mut style = TextStyle {
            font_name: (!run.font.is_empty()).then(|| run.font.clone()),
            font_size: (run.size > 0.0).then_some(run.size),
            bold: run.flags & FLAG_BOLD != 0,
            italic: run.flags & FLAG_ITALIC != 0,
            superscript: run.flags & FLAG_SUPERSCRIPT != 0,
            color: run.color,
            ..Default::default()
        };
        for decoration in &run.style {
            match decoration.kind {
                ShapeKind::Highlight => style.highlight = Some(decoration.color),
                ShapeKind::Underline => style.underline = true,
                ShapeKind::Strike => style.strikethrough = true,
                _ => {},
            }
        }
        style
    }
}

/// Format a packed sRGB value as `RRGGBB`.
pub fn color_hex(color: u32) -> String {
    format!("{:06X}", color & 0xFF_FF_FF)
}

/// Convert points to half-points, rounding to the nearest unit.
pub fn points_to_half_points(points: f32) -> u32 {
    (points * 2.0).round().max(0.0) as u32
}
