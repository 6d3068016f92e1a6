//! # PDF Reflow
//!
//! Reconstructs flow-document paragraphs from the fixed geometry of a PDF page.
//!
//! A PDF page places every glyph at an absolute position; there is no notion of
//! paragraph, alignment or line spacing. Given the blocks, lines and spans an
//! extractor reports (each with a bounding box) plus the decoration shapes found
//! on the page, this crate:
//!
//! - **Groups lines**: merges fragments of one row, splits discrete blocks
//! - **Infers formatting**: alignment, indents, paragraph and line spacing
//! - **Attributes decorations**: highlight, underline and strike-through shapes
//!   become run styles on exactly the text they cover
//! - **Assembles paragraphs**: runs, inline images and explicit line breaks
//!
//! ## Quick Start
//!
//! ```
//! use pdf_reflow::{PageLayout, ParagraphAlignment, ReflowConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let json = r#"{
//!     "bbox": [0, 0, 600, 800],
//!     "blocks": [{"lines": [
//!         {"spans": [{"bbox": [72, 100, 500, 112], "text": "Wrapped paragraph text"}]},
//!         {"spans": [{"bbox": [72, 114, 300, 126], "text": "continues here."}]}
//!     ]}]
//! }"#;
//!
//! let cfg = ReflowConfig::default();
//! let mut page = PageLayout::from_json(json)?;
//! page.parse(&cfg);
//!
//! let paragraphs = page.make_paragraphs(&cfg);
//! assert_eq!(paragraphs.len(), 1);
//! assert_eq!(paragraphs[0].format.alignment, ParagraphAlignment::Left);
//! assert_eq!(paragraphs[0].format.left_indent, Some(72.0));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

// Error handling
pub mod error;

// Configuration
pub mod config;

// Layout reconstruction
pub mod geometry;
pub mod layout;

// Paragraph output
pub mod converters;

// Re-exports
pub use config::ReflowConfig;
pub use converters::{Paragraph, ParagraphAlignment, ParagraphBuilder, ParagraphItem, TextRun};
pub use error::{Error, Result};
pub use layout::{PageLayout, TextBlock};

// Internal utilities
pub(crate) mod utils {
    //! Internal utility functions for the library.

    use std::cmp::Ordering;

    /// Compare two floats, ordering NaN after every number.
    ///
    /// Sorting by layout coordinates never panics on degenerate input.
    #[inline]
    pub fn safe_float_cmp(a: f32, b: f32) -> Ordering {
        match (a.is_nan(), b.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        }
    }

}

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
