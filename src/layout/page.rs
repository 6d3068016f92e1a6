//! Page-level reconstruction pass.
//!
//! Runs the block operations over a whole page in a fixed order and owns the
//! state they share: the page box used as alignment container, and the shape
//! list whose entries are consumed once applied.

use std::collections::BTreeSet;

use super::raw::{RawPage, BLOCK_TEXT};
use super::text_block::TextBlock;
use crate::config::ReflowConfig;
use crate::converters::Paragraph;
use crate::error::{Error, Result};
use crate::geometry::Rect;
use crate::layout::shape::Shape;

/// Text blocks and decoration shapes of one page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageLayout {
    /// Page or column box
    pub bbox: Rect,
    /// Blocks in reading order
    pub blocks: Vec<TextBlock>,
    /// Decoration shapes
    pub shapes: Vec<Shape>,
}

impl PageLayout {
    /// Create a page from already built blocks.
    pub fn new(bbox: Rect, blocks: Vec<TextBlock>, shapes: Vec<Shape>) -> Self {
        Self {
            bbox,
            blocks,
            shapes,
        }
    }

    /// Build a page from extractor records.
    ///
    /// Standalone image blocks are skipped, and so is a text block that fails
    /// validation: it is logged and the rest of the page is kept. An invalid
    /// page or shape box fails the whole page.
    pub fn from_raw(raw: RawPage) -> Result<Self> {
        if !raw.bbox.is_valid() {
            return Err(Error::InvalidLayout(format!("page has invalid bbox {:?}", raw.bbox)));
        }

        let mut blocks = Vec::with_capacity(raw.blocks.len());
        for (index, block) in raw.blocks.into_iter().enumerate() {
            if block.kind != BLOCK_TEXT {
                log::debug!("skipping non-text block {} (type {})", index, block.kind);
                continue;
            }
            match TextBlock::try_from(block) {
                Ok(block) => blocks.push(block),
                Err(e) => log::warn!("skipping block {}: {}", index, e),
            }
        }

        for shape in &raw.shapes {
            if !shape.bbox.is_valid() {
                return Err(Error::InvalidLayout(format!(
                    "shape has invalid bbox {:?}",
                    shape.bbox
                )));
            }
        }

        Ok(Self::new(raw.bbox, blocks, raw.shapes))
    }

    /// Build a page from extractor JSON.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_reflow::{PageLayout, ReflowConfig};
    ///
    /// let json = r#"{
    ///     "bbox": [0, 0, 600, 800],
    ///     "blocks": [{"lines": [{"spans": [{"bbox": [50, 100, 200, 112], "text": "Hello"}]}]}]
    /// }"#;
    /// let mut page = PageLayout::from_json(json).unwrap();
    /// let cfg = ReflowConfig::default();
    /// page.parse(&cfg);
    /// let paragraphs = page.make_paragraphs(&cfg);
    /// assert_eq!(paragraphs[0].text(), "Hello");
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawPage = serde_json::from_str(json)?;
        Self::from_raw(raw)
    }

    /// Run the reconstruction pass: split discrete blocks, merge lines,
    /// vertical spacing, alignment, line spacing, then style repartition.
    pub fn parse(&mut self, cfg: &ReflowConfig) {
        let count = self.blocks.len();
        self.blocks = std::mem::take(&mut self.blocks)
            .into_iter()
            .flat_map(|block| block.split(cfg))
            .collect();
        if self.blocks.len() != count {
            log::debug!("page split {} blocks into {}", count, self.blocks.len());
        }

        for block in &mut self.blocks {
            block.join();
        }

        self.parse_vertical_spacing();

        for block in &mut self.blocks {
            block.parse_alignment(&self.bbox, cfg);
            block.parse_line_spacing();
        }

        self.parse_text_format(cfg);
    }

    /// Space before each block, measured from the previous block's bottom
    /// (or the page top for the first block).
    fn parse_vertical_spacing(&mut self) {
        let mut ref_pos = self.bbox.y0;
        for block in &mut self.blocks {
            let bbox = block.bbox();
            // a block overflowing the page bottom gives back the overflow
            let space = bbox.y0 - ref_pos - (bbox.y1 - self.bbox.y1).max(0.0);
            block.before_space = space.max(0.0);
            ref_pos = bbox.y1;
        }
        if let Some(last) = self.blocks.last_mut() {
            last.after_space = 0.0;
        }
    }

    fn parse_text_format(&mut self, cfg: &ReflowConfig) {
        let mut applied = BTreeSet::new();
        for block in &mut self.blocks {
            applied.extend(block.apply_shapes(&mut self.shapes, cfg));
        }

        for &index in &applied {
            self.shapes[index].consumed = true;
        }

        let unattributed = self
            .shapes
            .iter()
            .filter(|s| !s.consumed && s.kind.is_text_style())
            .count();
        if unattributed > 0 {
            log::debug!("{} shapes not attributed to any text", unattributed);
        }
    }

    /// Assemble one paragraph per block.
    pub fn make_paragraphs(&self, cfg: &ReflowConfig) -> Vec<Paragraph> {
        self.blocks.iter().map(|b| b.to_paragraph(cfg)).collect()
    }

    /// Serialize the page with its computed block geometry.
    pub fn store(&self) -> RawPage {
        RawPage {
            bbox: self.bbox,
            blocks: self.blocks.iter().map(TextBlock::store).collect(),
            shapes: self.shapes.clone(),
        }
    }

    /// Plain text of all blocks, separated by blank lines.
    pub fn text(&self) -> String {
        self.blocks
            .iter()
            .map(TextBlock::text)
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
