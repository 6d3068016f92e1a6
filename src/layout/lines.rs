//! Ordered line container of a text block.
//!
//! Owns the two structural transformations of a block's lines: horizontal
//! merge of wrapped fragments that belong to one row, and the partition of a
//! flat line sequence into clusters that must become separate blocks.

use std::ops::{Deref, DerefMut};

use super::line::Line;
use crate::geometry::Rect;
use crate::utils::safe_float_cmp;

/// Lines of one text block, in row order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Lines {
    lines: Vec<Line>,
}

impl Lines {
    /// Create a container from lines already in row order.
    pub fn new(lines: Vec<Line>) -> Self {
        Self { lines }
    }

    /// Consume the container.
    pub fn into_vec(self) -> Vec<Line> {
        self.lines
    }

    /// Union of line boxes, `None` when empty.
    pub fn bbox(&self) -> Option<Rect> {
        let boxes: Vec<Rect> = self.lines.iter().map(Line::bbox).collect();
        Rect::union_all(&boxes)
    }

    /// True if any line holds an inline image.
    pub fn has_image_spans(&self) -> bool {
        self.lines.iter().any(Line::has_image)
    }

    /// Number of logical rows: a line starts a new row unless it shares the
    /// row of its predecessor.
    pub fn row_count(&self) -> usize {
        let mut count = 0;
        let mut previous: Option<&Line> = None;
        for line in &self.lines {
            if !previous.is_some_and(|p| line.in_same_row(p)) {
                count += 1;
            }
            previous = Some(line);
        }
        count
    }

    /// Line indices ordered by their leading edge across the text flow.
    ///
    /// The stored order is left alone; callers that rely on rows being sorted
    /// scan through this view instead.
    pub fn row_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.lines.len()).collect();
        let keys: Vec<f32> = self
            .lines
            .iter()
            .map(|l| l.bbox().row_range(l.axis()).0)
            .collect();
        // stable sort keeps stored order for equal keys
        order.sort_by(|&a, &b| safe_float_cmp(keys[a], keys[b]));
        order
    }

    /// Merge adjacent lines that share a row into one logical line.
    ///
    /// Spans are concatenated in reading order. Applying `merge` to its own
    /// output changes nothing.
    pub fn merge(&mut self) {
        let mut merged: Vec<Line> = Vec::with_capacity(self.lines.len());
        for line in self.lines.drain(..) {
            match merged.last_mut() {
                Some(last) if last.in_same_row(&line) => last.add_spans(line.spans),
                _ => merged.push(line),
            }
        }
        self.lines = merged;
    }

    /// Partition lines into clusters that belong to different blocks.
    ///
    /// Two lines join one cluster when they are stacked along the flow and not
    /// side by side in one row; clusters are the connected components of that
    /// relation, so interleaved columns (left, right, left, right) come back as
    /// one cluster per column. Image lines always stand alone and no cluster
    /// reaches across one.
    ///
    /// Clusters are ordered by their first line and keep the stored order
    /// inside; every line lands in exactly one cluster.
    pub fn split(self, row_overlap_factor: f32) -> Vec<Lines> {
        let count = self.lines.len();
        let mut parent: Vec<usize> = (0..count).collect();

        let mut segment_start = 0;
        for j in 0..count {
            if self.lines[j].has_image() {
                segment_start = j + 1;
                continue;
            }
            for i in segment_start..j {
                if is_stacked(&self.lines[i], &self.lines[j], row_overlap_factor) {
                    join_clusters(&mut parent, i, j);
                }
            }
        }

        // roots are the smallest index of their cluster
        let mut slots: Vec<Option<usize>> = vec![None; count];
        let mut groups: Vec<Vec<Line>> = Vec::new();
        for (i, line) in self.lines.into_iter().enumerate() {
            let root = cluster_root(&mut parent, i);
            let slot = *slots[root].get_or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
            groups[slot].push(line);
        }
        groups.into_iter().map(Lines::new).collect()
    }
}

fn is_stacked(a: &Line, b: &Line, row_overlap_factor: f32) -> bool {
    a.vertically_align_with(b, 0.0) && !a.horizontally_align_with(b, row_overlap_factor)
}

fn cluster_root(parent: &mut [usize], mut i: usize) -> usize {
    while parent[i] != i {
        parent[i] = parent[parent[i]];
        i = parent[i];
    }
    i
}

fn join_clusters(parent: &mut [usize], a: usize, b: usize) {
    let (ra, rb) = (cluster_root(parent, a), cluster_root(parent, b));
    if ra != rb {
        parent[ra.max(rb)] = ra.min(rb);
    }
}

impl Deref for Lines {
    type Target = Vec<Line>;

    fn deref(&self) -> &Self::Target {
        &self.lines
    }
}

impl DerefMut for Lines {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.lines
    }
}

impl From<Vec<Line>> for Lines {
    fn from(lines: Vec<Line>) -> Self {
        Self::new(lines)
    }
}

impl IntoIterator for Lines {
    type Item = Line;
    type IntoIter = std::vec::IntoIter<Line>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.into_iter()
    }
}

impl<'a> IntoIterator for &'a Lines {
    type Item = &'a Line;
    type IntoIter = std::slice::Iter<'a, Line>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::span::{ImageSpan, Span, TextSpan};

    fn line(x0: f32, y0: f32, x1: f32, y1: f32, s: &str) -> Line {
        Line::new(vec![Span::Text(TextSpan::new(Rect::new(x0, y0, x1, y1), s))])
    }

    #[test]
    fn test_row_count() {
        let lines = Lines::new(vec![
            line(0.0, 0.0, 50.0, 10.0, "a"),
            line(60.0, 0.0, 90.0, 10.0, "b"),
            line(0.0, 12.0, 80.0, 22.0, "c"),
        ]);
        assert_eq!(lines.row_count(), 2);
        assert_eq!(Lines::default().row_count(), 0);
    }

    #[test]
    fn test_merge_same_row() {
        let mut lines = Lines::new(vec![
            line(0.0, 0.0, 50.0, 10.0, "left "),
            line(60.0, 0.0, 90.0, 10.0, "right"),
            line(0.0, 12.0, 80.0, 22.0, "next"),
        ]);
        lines.merge();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text(), "left right");
        assert_eq!(lines[0].bbox(), Rect::new(0.0, 0.0, 90.0, 10.0));
        assert_eq!(lines[1].text(), "next");
    }

    #[test]
    fn test_merge_is_idempotent() {
        let mut lines = Lines::new(vec![
            line(0.0, 0.0, 50.0, 10.0, "a"),
            line(60.0, 1.0, 90.0, 11.0, "b"),
            line(95.0, 0.5, 120.0, 10.5, "c"),
            line(0.0, 14.0, 80.0, 24.0, "d"),
        ]);
        lines.merge();
        let once = lines.clone();
        lines.merge();
        assert_eq!(lines, once);
    }

    #[test]
    fn test_split_side_by_side_fragments() {
        let lines = Lines::new(vec![
            line(0.0, 0.0, 50.0, 10.0, "A1"),
            line(200.0, 0.0, 250.0, 10.0, "B1"),
            line(0.0, 12.0, 50.0, 22.0, "A2"),
        ]);
        let groups = lines.split(0.0);
        let texts: Vec<Vec<String>> = groups
            .iter()
            .map(|g| g.iter().map(Line::text).collect())
            .collect();
        assert_eq!(texts, vec![vec!["A1", "A2"], vec!["B1"]]);
    }

    #[test]
    fn test_split_interleaved_columns() {
        let lines = Lines::new(vec![
            line(50.0, 100.0, 250.0, 112.0, "L1"),
            line(320.0, 100.0, 520.0, 112.0, "R1"),
            line(50.0, 114.0, 200.0, 126.0, "L2"),
            line(320.0, 114.0, 480.0, 126.0, "R2"),
        ]);
        let groups = lines.split(0.0);
        let texts: Vec<Vec<String>> = groups
            .iter()
            .map(|g| g.iter().map(Line::text).collect())
            .collect();
        assert_eq!(texts, vec![vec!["L1", "L2"], vec!["R1", "R2"]]);
    }

    #[test]
    fn test_split_chains_through_shared_line() {
        // a and c do not overlap each other, both overlap b
        let lines = Lines::new(vec![
            line(0.0, 0.0, 40.0, 10.0, "a"),
            line(30.0, 12.0, 90.0, 22.0, "b"),
            line(80.0, 24.0, 120.0, 34.0, "c"),
        ]);
        let groups = lines.split(0.0);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].len(), 3);
    }

    #[test]
    fn test_split_keeps_stacked_rows() {
        let lines = Lines::new(vec![
            line(0.0, 0.0, 100.0, 10.0, "one"),
            line(0.0, 12.0, 90.0, 22.0, "two"),
            line(0.0, 24.0, 40.0, 34.0, "three"),
        ]);
        let groups = lines.split(0.0);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].len(), 3);
    }

    #[test]
    fn test_split_isolates_image_line() {
        let image = Line::new(vec![Span::Image(ImageSpan {
            bbox: Rect::new(0.0, 12.0, 50.0, 60.0),
            image: Vec::new(),
        })]);
        let lines = Lines::new(vec![
            line(0.0, 0.0, 100.0, 10.0, "caption"),
            image,
            line(0.0, 62.0, 100.0, 72.0, "after"),
        ]);
        // caption and after are stacked, but not across the image
        let groups = lines.split(0.0);
        let sizes: Vec<usize> = groups.iter().map(|g| g.len()).collect();
        assert_eq!(sizes, vec![1, 1, 1]);
    }

    #[test]
    fn test_row_order_view() {
        let lines = Lines::new(vec![
            line(0.0, 24.0, 40.0, 34.0, "c"),
            line(0.0, 0.0, 100.0, 10.0, "a"),
            line(0.0, 12.0, 90.0, 22.0, "b"),
        ]);
        assert_eq!(lines.row_order(), vec![1, 2, 0]);
        assert_eq!(lines[0].text(), "c");
    }
}
