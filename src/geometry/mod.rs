//! Geometric primitives for layout reconstruction.
//!
//! Rectangles use corner form `(x0, y0, x1, y1)` in page coordinates, origin
//! top-left with y growing downward. The row predicates are free functions over
//! two rectangles so they can be reused for lines, spans and blocks alike.

use serde::{Deserialize, Serialize};

/// Orientation of the text flow.
///
/// Horizontal text flows along x and stacks rows along y; vertical text flows
/// along y and stacks rows along x.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Text flows along the x axis
    Horizontal,
    /// Text flows along the y axis
    Vertical,
}

/// An axis-aligned rectangle in page space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct Rect {
    /// Left edge
    pub x0: f32,
    /// Top edge
    pub y0: f32,
    /// Right edge
    pub x1: f32,
    /// Bottom edge
    pub y1: f32,
}

impl From<[f32; 4]> for Rect {
    fn from(v: [f32; 4]) -> Self {
        Rect::new(v[0], v[1], v[2], v[3])
    }
}

impl From<Rect> for [f32; 4] {
    fn from(r: Rect) -> Self {
        [r.x0, r.y0, r.x1, r.y1]
    }
}

impl Rect {
    /// Create a rectangle from its corners.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_reflow::geometry::Rect;
    ///
    /// let rect = Rect::new(10.0, 20.0, 110.0, 70.0);
    /// assert_eq!(rect.width(), 100.0);
    /// assert_eq!(rect.height(), 50.0);
    /// ```
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Width of the rectangle.
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    /// Height of the rectangle.
    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// True when the rectangle encloses no area.
    pub fn is_empty(&self) -> bool {
        self.x0 >= self.x1 || self.y0 >= self.y1
    }

    /// True when all corners are finite and ordered.
    pub fn is_valid(&self) -> bool {
        [self.x0, self.y0, self.x1, self.y1]
            .iter()
            .all(|v| v.is_finite())
            && self.x0 <= self.x1
            && self.y0 <= self.y1
    }

    /// Check if this rectangle overlaps another with positive area.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_reflow::geometry::Rect;
    ///
    /// let r1 = Rect::new(0.0, 0.0, 100.0, 100.0);
    /// let r2 = Rect::new(50.0, 50.0, 150.0, 150.0);
    /// let r3 = Rect::new(100.0, 0.0, 200.0, 100.0);
    ///
    /// assert!(r1.intersects(&r2));
    /// assert!(!r1.intersects(&r3)); // touching edges only
    /// ```
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x0 < other.x1 && self.x1 > other.x0 && self.y0 < other.y1 && self.y1 > other.y0
    }

    /// Overlapping region of two rectangles, `None` when they do not overlap.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        if !self.intersects(other) {
            return None;
        }
        Some(Rect::new(
            self.x0.max(other.x0),
            self.y0.max(other.y0),
            self.x1.min(other.x1),
            self.y1.min(other.y1),
        ))
    }

    /// Smallest rectangle containing both.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_reflow::geometry::Rect;
    ///
    /// let union = Rect::new(0.0, 0.0, 50.0, 50.0).union(&Rect::new(25.0, 25.0, 75.0, 75.0));
    /// assert_eq!(union, Rect::new(0.0, 0.0, 75.0, 75.0));
    /// ```
    pub fn union(&self, other: &Rect) -> Rect {
        Rect::new(
            self.x0.min(other.x0),
            self.y0.min(other.y0),
            self.x1.max(other.x1),
            self.y1.max(other.y1),
        )
    }

    /// Union of a sequence of rectangles, `None` for an empty sequence.
    pub fn union_all<'a, I>(rects: I) -> Option<Rect>
    where
        I: IntoIterator<Item = &'a Rect>,
    {
        rects
            .into_iter()
            .fold(None, |acc: Option<Rect>, r| Some(acc.map_or(*r, |a| a.union(r))))
    }

    /// Check if `other` lies entirely within this rectangle (edges inclusive).
    pub fn contains(&self, other: &Rect) -> bool {
        other.x0 >= self.x0 && other.x1 <= self.x1 && other.y0 >= self.y0 && other.y1 <= self.y1
    }

    /// Grow the rectangle by `margin` on every side.
    pub fn expand(&self, margin: f32) -> Rect {
        Rect::new(
            self.x0 - margin,
            self.y0 - margin,
            self.x1 + margin,
            self.y1 + margin,
        )
    }

    /// Interval covered along the text flow.
    pub fn flow_range(&self, axis: Axis) -> (f32, f32) {
        match axis {
            Axis::Horizontal => (self.x0, self.x1),
            Axis::Vertical => (self.y0, self.y1),
        }
    }

    /// Interval covered across the text flow, i.e. the axis rows stack on.
    pub fn row_range(&self, axis: Axis) -> (f32, f32) {
        match axis {
            Axis::Horizontal => (self.y0, self.y1),
            Axis::Vertical => (self.x0, self.x1),
        }
    }

    /// Extent across the text flow (the line height for horizontal text).
    pub fn row_extent(&self, axis: Axis) -> f32 {
        let (lo, hi) = self.row_range(axis);
        hi - lo
    }

    /// Replace the flow-axis interval, keeping the row interval.
    pub fn with_flow_range(&self, axis: Axis, lo: f32, hi: f32) -> Rect {
        match axis {
            Axis::Horizontal => Rect::new(lo, self.y0, hi, self.y1),
            Axis::Vertical => Rect::new(self.x0, lo, self.x1, hi),
        }
    }
}

fn midpoint((lo, hi): (f32, f32)) -> f32 {
    (lo + hi) / 2.0
}

fn overlap_exceeds((a0, a1): (f32, f32), (b0, b1): (f32, f32), factor: f32) -> bool {
    let l1 = a1 - a0;
    let l2 = b1 - b0;
    let l = a1.max(b1) - a0.min(b0);
    l1 + l2 - l > factor * l1.min(l2)
}

/// Check whether two rectangles occupy the same row.
///
/// Each rectangle's centre across the text flow must fall inside the other's
/// row interval. The relation is symmetric.
///
/// # Examples
///
/// ```
/// use pdf_reflow::geometry::{in_same_row, Axis, Rect};
///
/// let a = Rect::new(0.0, 100.0, 50.0, 112.0);
/// let b = Rect::new(80.0, 102.0, 150.0, 113.0);
/// let c = Rect::new(0.0, 110.0, 50.0, 122.0);
///
/// assert!(in_same_row(&a, &b, Axis::Horizontal));
/// assert!(!in_same_row(&a, &c, Axis::Horizontal));
/// ```
pub fn in_same_row(a: &Rect, b: &Rect, axis: Axis) -> bool {
    let ra = a.row_range(axis);
    let rb = b.row_range(axis);
    let ca = midpoint(ra);
    let cb = midpoint(rb);
    ca >= rb.0 && ca <= rb.1 && cb >= ra.0 && cb <= ra.1
}

/// Check whether two rectangles overlap across the text flow by more than
/// `factor` of the smaller extent, i.e. they sit side by side.
pub fn horizontally_aligned(a: &Rect, b: &Rect, axis: Axis, factor: f32) -> bool {
    overlap_exceeds(a.row_range(axis), b.row_range(axis), factor)
}

/// Check whether two rectangles overlap along the text flow by more than
/// `factor` of the smaller extent, i.e. one is stacked over the other.
pub fn vertically_aligned(a: &Rect, b: &Rect, axis: Axis, factor: f32) -> bool {
    overlap_exceeds(a.flow_range(axis), b.flow_range(axis), factor)
}
