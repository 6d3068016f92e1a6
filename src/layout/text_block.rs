//! Text block reconstruction.
//!
//! A [`TextBlock`] is a candidate paragraph: an ordered group of lines whose
//! alignment, spacing and line breaks are inferred from geometry alone, since
//! the fixed-layout source carries no paragraph markup.

use super::direction::TextDirection;
use super::line::Line;
use super::lines::Lines;
use super::shape::Shape;
use super::span::Span;
use crate::config::ReflowConfig;
use crate::converters::{InlineImage, Paragraph, ParagraphBuilder, ParagraphFormat, TextRun};
use crate::geometry::{Axis, Rect};
use serde::{Deserialize, Serialize};

/// Horizontal alignment of a paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlignment {
    /// Left-aligned, indented by `left_space`
    #[default]
    Left,
    /// Centred
    Center,
    /// Right-aligned, indented by `right_space`
    Right,
}

/// A text block (candidate paragraph).
///
/// The bounding box is derived from the lines on every call, so it never goes
/// stale after merging, splitting or style repartition.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextBlock {
    /// Lines in row order
    pub lines: Lines,
    /// Inferred alignment
    pub alignment: TextAlignment,
    /// Indent from the container's leading edge; meaningful for `Left` only
    pub left_space: f32,
    /// Indent from the container's trailing edge; meaningful for `Right` only
    pub right_space: f32,
    /// Space before the paragraph
    pub before_space: f32,
    /// Space after the paragraph
    pub after_space: f32,
    /// Uniform line height
    pub line_space: f32,
}

impl TextBlock {
    /// Create a block from lines in row order.
    pub fn new(lines: Vec<Line>) -> Self {
        Self {
            lines: Lines::new(lines),
            ..Default::default()
        }
    }

    /// Union of the line boxes.
    pub fn bbox(&self) -> Rect {
        self.lines.bbox().unwrap_or_default()
    }

    /// Text content, lines joined with `\n`.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(Line::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Dominant text direction of the contained lines.
    pub fn text_direction(&self) -> TextDirection {
        TextDirection::combine(self.lines.iter().map(Line::text_direction))
    }

    /// True for bottom-to-top text.
    pub fn is_vertical_text(&self) -> bool {
        self.text_direction().is_vertical()
    }

    fn axis(&self) -> Axis {
        self.text_direction().axis()
    }

    /// Append a line.
    pub fn add(&mut self, line: Line) {
        self.lines.push(line);
    }

    /// Merge contained lines that share a row.
    pub fn join(&mut self) {
        self.lines.merge();
    }

    /// Split a discrete block into one block per line group.
    ///
    /// The block is consumed. A block that is not discrete comes back as the
    /// only element.
    pub fn split(self, cfg: &ReflowConfig) -> Vec<TextBlock> {
        if !self.contains_discrete_lines(cfg) {
            return vec![self];
        }

        let groups = self.lines.split(cfg.row_overlap_factor);
        log::debug!("splitting discrete block into {} blocks", groups.len());
        groups
            .into_iter()
            .map(|lines| TextBlock {
                lines,
                ..Default::default()
            })
            .collect()
    }

    /// Check whether the lines are discrete fragments rather than one
    /// continuous paragraph.
    ///
    /// Wrapped paragraph lines are continuous along the flow; independently
    /// placed fragments (table-like captions) leave large gaps.
    pub fn contains_discrete_lines(&self, cfg: &ReflowConfig) -> bool {
        if self.lines.len() <= 1 {
            return false;
        }
        if self.lines.has_image_spans() {
            return true;
        }
        if self.is_vertical_text() {
            return true;
        }

        let axis = self.axis();
        let mut count = 0;
        for pair in self.lines.windows(2) {
            let (line, next) = (&pair[0], &pair[1]);
            if !line.horizontally_align_with(next, cfg.row_overlap_factor) {
                continue;
            }
            // overlapping across the flow but not one row
            if !line.in_same_row(next) {
                return true;
            }
            let end = line.bbox().flow_range(axis).1;
            let start = next.bbox().flow_range(axis).0;
            if (end - start).abs() > cfg.discrete_distance {
                count += 1;
            }
        }
        count >= cfg.discrete_threshold
    }

    /// Infer alignment relative to the enclosing page or column box.
    pub fn parse_alignment(&mut self, container: &Rect, cfg: &ReflowConfig) {
        if self.lines.is_empty() {
            return;
        }

        // vertical text runs against the y axis: leading edge is y1
        let vertical = self.is_vertical_text();
        let edges = |r: &Rect| if vertical { (r.y1, r.y0) } else { (r.x0, r.x1) };
        let f = if vertical { -1.0 } else { 1.0 };

        let (b0, b1) = edges(&self.bbox());
        let (c0, c1) = edges(container);
        let d_left = (b0 - c0) * f;
        let d_right = (c1 - b1) * f;
        let d_center = (d_left - d_right) / 2.0;

        let line_edges: Vec<(f32, f32)> = self.lines.iter().map(|l| edges(&l.bbox())).collect();
        let left_aligned = spread(line_edges.iter().map(|e| e.0)) <= cfg.dm;
        let right_aligned = spread(line_edges.iter().map(|e| e.1)) <= cfg.dm;
        let center_aligned = spread(line_edges.iter().map(|e| (e.0 + e.1) / 2.0)) <= cfg.dm;

        self.left_space = 0.0;
        self.right_space = 0.0;

        if left_aligned && !right_aligned {
            self.set_left(d_left);
        } else if right_aligned && !left_aligned {
            self.set_right(d_right);
        } else if center_aligned && !left_aligned && !right_aligned {
            self.alignment = TextAlignment::Center;
        } else if d_center.abs() < cfg.dm {
            self.alignment = TextAlignment::Center;
        } else if d_left.abs() <= d_right.abs() {
            self.set_left(d_left);
        } else {
            self.set_right(d_right);
        }
        log::trace!(
            "alignment {:?} (d_left={:.1}, d_right={:.1})",
            self.alignment,
            d_left,
            d_right
        );
    }

    fn set_left(&mut self, space: f32) {
        self.alignment = TextAlignment::Left;
        self.left_space = space;
    }

    fn set_right(&mut self, space: f32) {
        self.alignment = TextAlignment::Right;
        self.right_space = space;
    }

    /// Derive a uniform line height and adjust the space before the block.
    ///
    /// The source places rows at absolute positions (line, space, line, ...),
    /// while the flow output renders every row, the first included, as
    /// space-then-line. The first row's position is corrected through
    /// `before_space`.
    pub fn parse_line_spacing(&mut self) {
        let Some(first) = self.lines.first() else {
            return;
        };
        let axis = self.axis();
        let count = self.lines.row_count();
        let first_line_height = first.bbox().row_extent(axis);
        let block_height = self.bbox().row_extent(axis);

        self.line_space = if count > 1 {
            (block_height - first_line_height) / (count - 1) as f32
        } else {
            block_height
        };

        self.before_space += first_line_height - self.line_space;

        if self.before_space < 0.0 {
            self.line_space += self.before_space / count as f32;
            self.before_space = 0.0;
        }
    }

    /// Split text spans by decoration shapes, so covered parts carry the
    /// decoration's style. Returns true if any span was split.
    pub fn parse_text_format(&mut self, shapes: &mut [Shape], cfg: &ReflowConfig) -> bool {
        !self.apply_shapes(shapes, cfg).is_empty()
    }

    /// Same as [`parse_text_format`](Self::parse_text_format), returning the
    /// indices of the shapes that were applied to this block.
    pub fn apply_shapes(&mut self, shapes: &mut [Shape], cfg: &ReflowConfig) -> Vec<usize> {
        let mut applied = Vec::new();
        if self.lines.is_empty() {
            return applied;
        }
        let order = self.lines.row_order();

        for (index, shape) in shapes.iter_mut().enumerate() {
            if !shape.is_available() || !self.bbox().intersects(&shape.bbox) {
                continue;
            }

            let mut used = false;
            for &i in &order {
                let line = &mut self.lines[i];
                let axis = line.axis();
                let line_bbox = line.bbox();

                if !shape.bbox.intersects(&line_bbox.expand(cfg.line_margin)) {
                    // rows further on lie strictly beyond this shape
                    if shape.bbox.row_range(axis).1 < line_bbox.row_range(axis).0 {
                        break;
                    }
                    continue;
                }

                let mut split_spans = Vec::with_capacity(line.spans.len());
                for span in line.spans.drain(..) {
                    if !span.can_split() {
                        split_spans.push(span);
                        continue;
                    }
                    match span.split(shape, axis) {
                        Some(parts) => {
                            used = true;
                            split_spans.extend(parts);
                        },
                        None => split_spans.push(span),
                    }
                }
                line.spans = split_spans;
            }

            if used {
                applied.push(index);
            } else {
                log::trace!("shape {} left unattributed by block", index);
            }
        }
        applied
    }

    /// Emit the block as a paragraph into `builder`.
    ///
    /// Every line ends with an explicit break, except the last line and a line
    /// followed by another in the same row; the output's own reflow would
    /// otherwise not reproduce the source line geometry.
    pub fn make_paragraph<B: ParagraphBuilder + ?Sized>(&self, builder: &mut B, cfg: &ReflowConfig) {
        let mut format = ParagraphFormat {
            alignment: self.alignment.into(),
            left_indent: None,
            right_indent: None,
            space_before: cfg.round(self.before_space).max(0.0),
            space_after: cfg.round(self.after_space).max(0.0),
            line_spacing: cfg.round(self.line_space),
        };
        match self.alignment {
            TextAlignment::Left => format.left_indent = Some(cfg.round(self.left_space)),
            TextAlignment::Right => format.right_indent = Some(cfg.round(self.right_space)),
            TextAlignment::Center => {},
        }
        builder.set_format(format);

        for (i, line) in self.lines.iter().enumerate() {
            for span in &line.spans {
                match span {
                    Span::Text(text) => builder.add_run(TextRun::from(text)),
                    Span::Image(image) => builder.add_image(InlineImage::from(image)),
                }
            }

            let line_break = match self.lines.get(i + 1) {
                None => false,
                Some(next) => !line.in_same_row(next),
            };
            if line_break {
                builder.add_line_break();
            }
        }
    }

    /// Assemble the block into a standalone [`Paragraph`].
    pub fn to_paragraph(&self, cfg: &ReflowConfig) -> Paragraph {
        let mut paragraph = Paragraph::default();
        self.make_paragraph(&mut paragraph, cfg);
        paragraph
    }
}

fn spread(values: impl Iterator<Item = f32>) -> f32 {
    let (lo, hi) = values.fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    hi - lo
}
