//! Layout reconstruction of text blocks.
//!
//! This module turns raw extracted geometry into paragraph-ready blocks:
//! - Span splitting by decoration shapes (highlight, underline, strike)
//! - Line merging and discrete-block splitting
//! - Alignment and line/paragraph spacing inference
//! - Page-level pass with shape consumption

pub mod direction;
pub mod line;
pub mod lines;
pub mod page;
pub mod raw;
pub mod shape;
pub mod span;
pub mod text_block;

// Re-export main types
pub use direction::TextDirection;
pub use line::Line;
pub use lines::Lines;
pub use page::PageLayout;
pub use raw::{RawBlock, RawLine, RawPage, RawShape, RawSpan, RawTextSpan};
pub use shape::{Shape, ShapeKind};
pub use span::{Char, ImageSpan, Span, SpanStyle, TextSpan};
pub use text_block::{TextAlignment, TextBlock};
