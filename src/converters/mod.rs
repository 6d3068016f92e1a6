//! Output converters for reconstructed layout.
//!
//! - **Paragraph**: flow-document paragraphs with runs, inline images and
//!   explicit line breaks
//! - **Styles**: character formatting derived from span attributes

pub mod paragraph;
pub mod styles;

// Re-export main types
pub use paragraph::{
    InlineImage, Paragraph, ParagraphBuilder, ParagraphFormat, ParagraphItem, TextRun,
};
pub use styles::{ParagraphAlignment, TextStyle};
