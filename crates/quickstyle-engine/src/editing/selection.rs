use crate::editing::BlockKey;

/// A position inside a block: block key plus char offset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Point {
    pub key: BlockKey,
    pub offset: usize,
}

impl Point {
    pub fn new(key: BlockKey, offset: usize) -> Self {
        Self { key, offset }
    }
}

/// Anchor/focus selection. A collapsed selection is a caret.
///
/// Only [`DocumentState::with_selection`] can install a selection on a
/// document, and it checks both points against the blocks they reference.
///
/// [`DocumentState::with_selection`]: crate::editing::DocumentState::with_selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub anchor: Point,
    pub focus: Point,
}

impl Selection {
    pub fn new(anchor: Point, focus: Point) -> Self {
        Self { anchor, focus }
    }

    pub fn collapsed(key: BlockKey, offset: usize) -> Self {
        let point = Point::new(key, offset);
        Self {
            anchor: point.clone(),
            focus: point,
        }
    }

    /// Range within one block, in char offsets
    pub fn within(key: BlockKey, start: usize, end: usize) -> Self {
        Self {
            anchor: Point::new(key.clone(), start),
            focus: Point::new(key, end),
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Selection refers to unknown block {key}")]
    UnknownBlock { key: BlockKey },
    #[error("Offset {offset} is past the end of block {key} (length {len})")]
    OffsetOutOfBounds {
        key: BlockKey,
        offset: usize,
        len: usize,
    },
}
