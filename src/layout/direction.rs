//! Text direction of lines and blocks.

use crate::geometry::Axis;

/// Writing direction of a line, derived from the extractor's `dir` vector.
///
/// Only two directions are modelled: normal left-to-right text and text rotated
/// to run bottom-to-top. Anything else is `Ignore`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextDirection {
    /// `dir = (1, 0)`
    #[default]
    LeftRight,
    /// `dir = (0, -1)`
    BottomTop,
    /// Mixed or undetermined direction
    Ignore,
}

impl TextDirection {
    /// Classify a unit direction vector.
    pub fn from_dir(dir: (f32, f32)) -> Self {
        if dir.0 == 1.0 {
            TextDirection::LeftRight
        } else if dir.1 == -1.0 {
            TextDirection::BottomTop
        } else {
            TextDirection::Ignore
        }
    }

    /// Collapse the directions of several lines into a block direction.
    ///
    /// `Ignore` wins over everything; a single shared direction is kept; mixed
    /// directions fall back to `LeftRight`.
    pub fn combine<I: IntoIterator<Item = TextDirection>>(directions: I) -> Self {
        let mut seen: Option<TextDirection> = None;
        let mut mixed = false;
        for d in directions {
            if d == TextDirection::Ignore {
                return TextDirection::Ignore;
            }
            match seen {
                None => seen = Some(d),
                Some(s) if s != d => mixed = true,
                _ => {},
            }
        }
        if mixed {
            TextDirection::LeftRight
        } else {
            seen.unwrap_or_default()
        }
    }

    /// True for text running bottom-to-top.
    pub fn is_vertical(&self) -> bool {
        *self == TextDirection::BottomTop
    }

    /// Flow axis. `Ignore` is laid out as horizontal text.
    pub fn axis(&self) -> Axis {
        if self.is_vertical() {
            Axis::Vertical
        } else {
            Axis::Horizontal
        }
    }
}
