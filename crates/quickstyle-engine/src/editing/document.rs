use std::collections::HashSet;
use std::ops::Range;
use std::sync::Arc;

use serde_json::Map;

use crate::editing::{
    Block, BlockKey, BlockType, CursorMove, InlineStyle, Point, Selection, SelectionError,
    StyleSet,
};

/// Immutable, versioned rich-text document.
///
/// A `DocumentState` holds an ordered list of blocks, a selection and an
/// optional inline style override. Every transform returns a new state and
/// leaves `self` untouched; blocks that a transform does not edit are shared
/// between the old and new state.
///
/// ## Invariants
///
/// - There is always at least one block.
/// - Block keys are unique.
/// - Both selection points name a block in the document and lie within its
///   text. [`DocumentState::with_selection`] is the only way to install an
///   arbitrary selection and it enforces this; transforms only produce
///   selections that satisfy it.
///
/// ## Versioning
///
/// `version` increases by one for every transform that changes content or
/// styles. Pure cursor movement keeps the version.
///
/// ```rust
/// use quickstyle_engine::editing::{DocumentState, InlineStyle};
///
/// let doc = DocumentState::empty()
///     .toggle_inline_style(&InlineStyle::Bold)
///     .insert_text("hi");
///
/// assert_eq!(doc.plain_text(), "hi");
/// assert!(doc.current_inline_style().contains(&InlineStyle::Bold));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentState {
    blocks: Vec<Arc<Block>>,
    selection: Selection,
    /// Styles the next insertion uses, set by toggles on a collapsed selection
    inline_style_override: Option<StyleSet>,
    version: u64,
}

impl Default for DocumentState {
    fn default() -> Self {
        Self::empty()
    }
}

impl DocumentState {
    /// A document with one empty paragraph and the caret at its start
    pub fn empty() -> Self {
        Self::from_blocks(Vec::new())
    }

    /// Build a document from blocks, caret at the start of the first block.
    ///
    /// An empty list gives an empty document. Blocks whose key repeats an
    /// earlier block's key get a fresh key.
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        let mut blocks = blocks;
        if blocks.is_empty() {
            blocks.push(Block::empty());
        }

        let mut seen = HashSet::new();
        let blocks: Vec<Arc<Block>> = blocks
            .into_iter()
            .map(|block| {
                if seen.insert(block.key().clone()) {
                    Arc::new(block)
                } else {
                    let rekeyed = block.rekeyed(BlockKey::generate());
                    seen.insert(rekeyed.key().clone());
                    Arc::new(rekeyed)
                }
            })
            .collect();

        let selection = Selection::collapsed(blocks[0].key().clone(), 0);
        Self {
            blocks,
            selection,
            inline_style_override: None,
            version: 0,
        }
    }

    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter().map(|block| block.as_ref())
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn block(&self, key: &BlockKey) -> Option<&Block> {
        self.blocks
            .iter()
            .find(|block| block.key() == key)
            .map(|block| block.as_ref())
    }

    pub fn block_index(&self, key: &BlockKey) -> Option<usize> {
        self.blocks.iter().position(|block| block.key() == key)
    }

    /// True when both states hold the very same allocation for block `key`
    pub fn shares_block(&self, other: &DocumentState, key: &BlockKey) -> bool {
        let mine = self.blocks.iter().find(|block| block.key() == key);
        let theirs = other.blocks.iter().find(|block| block.key() == key);
        match (mine, theirs) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn inline_style_override(&self) -> Option<&StyleSet> {
        self.inline_style_override.as_ref()
    }

    /// All block texts joined by newlines
    pub fn plain_text(&self) -> String {
        self.blocks()
            .map(|block| block.text())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Install a selection after checking it against the document.
    ///
    /// Moving the selection drops any pending inline style override.
    pub fn with_selection(&self, selection: Selection) -> Result<Self, SelectionError> {
        self.check_point(&selection.anchor)?;
        self.check_point(&selection.focus)?;

        let inline_style_override = if selection == self.selection {
            self.inline_style_override.clone()
        } else {
            None
        };

        Ok(Self {
            blocks: self.blocks.clone(),
            selection,
            inline_style_override,
            version: self.version,
        })
    }

    fn check_point(&self, point: &Point) -> Result<(), SelectionError> {
        let block = self
            .block(&point.key)
            .ok_or_else(|| SelectionError::UnknownBlock {
                key: point.key.clone(),
            })?;
        if point.offset > block.len() {
            return Err(SelectionError::OffsetOutOfBounds {
                key: point.key.clone(),
                offset: point.offset,
                len: block.len(),
            });
        }
        Ok(())
    }

    /// Earlier of anchor/focus in document order
    pub fn selection_start(&self) -> &Point {
        self.ordered_points().0
    }

    /// Later of anchor/focus in document order
    pub fn selection_end(&self) -> &Point {
        self.ordered_points().1
    }

    fn ordered_points(&self) -> (&Point, &Point) {
        let anchor = &self.selection.anchor;
        let focus = &self.selection.focus;
        let anchor_pos = (self.index_of(&anchor.key), anchor.offset);
        let focus_pos = (self.index_of(&focus.key), focus.offset);
        if anchor_pos <= focus_pos {
            (anchor, focus)
        } else {
            (focus, anchor)
        }
    }

    // Selection keys always resolve, see the type-level invariants.
    fn index_of(&self, key: &BlockKey) -> usize {
        self.block_index(key).unwrap_or(0)
    }

    fn start_index(&self) -> usize {
        self.index_of(&self.selection_start().key)
    }

    /// The block holding the start of the selection
    pub fn current_block(&self) -> &Block {
        &self.blocks[self.start_index()]
    }

    /// Text of the current block from its start up to the selection start
    pub fn text_before_cursor(&self) -> &str {
        self.current_block().text_until(self.selection_start().offset)
    }

    /// Inline styles that apply at the selection.
    ///
    /// For a caret this is the pending override if there is one, otherwise
    /// the style of the char before the caret (or the first char when the
    /// caret is at block start). For a range it is the style of the first
    /// selected char, or of the start block's last char when the range starts
    /// at the end of that block. Empty blocks inherit the last styled char of
    /// the nearest non-empty block above.
    pub fn current_inline_style(&self) -> StyleSet {
        let collapsed = self.selection.is_collapsed();
        if collapsed && let Some(style) = &self.inline_style_override {
            return style.clone();
        }

        let start = self.selection_start();
        let index = self.index_of(&start.key);
        let block = &self.blocks[index];
        let from_block = if start.offset > 0 && (collapsed || start.offset >= block.len()) {
            block.style_at(start.offset - 1)
        } else {
            block.style_at(start.offset)
        };

        from_block
            .cloned()
            .unwrap_or_else(|| self.style_above(index))
    }

    fn style_above(&self, index: usize) -> StyleSet {
        self.blocks[..index]
            .iter()
            .rev()
            .find(|block| !block.is_empty())
            .and_then(|block| block.styles().last().cloned())
            .unwrap_or_default()
    }

    fn splice(
        &self,
        range: Range<usize>,
        replacement: Vec<Block>,
        selection: Selection,
        inline_style_override: Option<StyleSet>,
    ) -> Self {
        let mut blocks = self.blocks.clone();
        blocks.splice(range, replacement.into_iter().map(Arc::new));
        Self {
            blocks,
            selection,
            inline_style_override,
            version: self.version + 1,
        }
    }

    /// Delete a char range of the current block.
    ///
    /// The range is clamped to the block. The caret lands at the range start.
    pub fn delete_range(&self, range: Range<usize>) -> Self {
        let index = self.start_index();
        let block = &self.blocks[index];
        let end = range.end.min(block.len());
        let start = range.start.min(end);

        let next = block.delete_chars(start..end);
        let caret = Selection::collapsed(block.key().clone(), start);
        self.splice(index..index + 1, vec![next], caret, None)
    }

    /// Remove the selected content, merging blocks when it spans several
    pub fn delete_selection(&self) -> Self {
        if self.selection.is_collapsed() {
            return self.clone();
        }

        let (start, end) = self.ordered_points();
        let first = self.index_of(&start.key);
        let last = self.index_of(&end.key);

        let merged = if first == last {
            self.blocks[first].delete_chars(start.offset..end.offset)
        } else {
            let head = self.blocks[first].delete_chars(start.offset..usize::MAX);
            let tail = self.blocks[last].delete_chars(0..end.offset);
            head.join(&tail)
        };

        let caret = Selection::collapsed(start.key.clone(), start.offset);
        self.splice(first..last + 1, vec![merged], caret, None)
    }

    /// Type text at the selection, replacing any selected content.
    ///
    /// Inserted chars take [`current_inline_style`](Self::current_inline_style).
    /// Newlines split the block.
    pub fn insert_text(&self, text: &str) -> Self {
        let style = self.current_inline_style();
        let mut state = self.delete_selection();

        for (i, line) in text.split('\n').enumerate() {
            if i > 0 {
                state = state.split_block();
            }
            if !line.is_empty() {
                state = state.insert_run(line, &style);
            }
        }

        state
    }

    fn insert_run(&self, text: &str, style: &StyleSet) -> Self {
        let index = self.start_index();
        let block = &self.blocks[index];
        let offset = self.selection.focus.offset;

        let next = block.insert_chars(offset, text, style);
        let caret = Selection::collapsed(block.key().clone(), offset + text.chars().count());
        self.splice(index..index + 1, vec![next], caret, None)
    }

    /// Split the current block at the caret; the caret moves to the new block
    pub fn split_block(&self) -> Self {
        let state = self.delete_selection();
        let index = state.start_index();
        let offset = state.selection.focus.offset;

        let (head, tail) = state.blocks[index].split_at(offset, BlockKey::generate());
        let tail = tail.with_data(Map::new());
        let caret = Selection::collapsed(tail.key().clone(), 0);
        state.splice(index..index + 1, vec![head, tail], caret, None)
    }

    /// Symmetric inline style toggle.
    ///
    /// On a caret this only changes the pending override. On a range the
    /// style is removed from the range when the range starts styled, and
    /// added otherwise.
    pub fn toggle_inline_style(&self, style: &InlineStyle) -> Self {
        let mut current = self.current_inline_style();
        let active = current.contains(style);

        if self.selection.is_collapsed() {
            if active {
                current.remove(style);
            } else {
                current.insert(style.clone());
            }
            return Self {
                blocks: self.blocks.clone(),
                selection: self.selection.clone(),
                inline_style_override: Some(current),
                version: self.version + 1,
            };
        }

        let (start, end) = self.ordered_points();
        let first = self.index_of(&start.key);
        let last = self.index_of(&end.key);

        let replacement = (first..=last)
            .map(|i| {
                let block = &self.blocks[i];
                let from = if i == first { start.offset } else { 0 };
                let to = if i == last { end.offset } else { block.len() };
                let mut next = Block::clone(block);
                next.set_style_in(from..to, style, !active);
                next
            })
            .collect();

        self.splice(first..last + 1, replacement, self.selection.clone(), None)
    }

    /// Set the type of every selected block. Blocks already of that type are
    /// left as they are; if none changes the same state is returned.
    pub fn set_block_type(&self, kind: BlockType) -> Self {
        let (start, end) = self.ordered_points();
        let first = self.index_of(&start.key);
        let last = self.index_of(&end.key);

        if self.blocks[first..=last]
            .iter()
            .all(|block| block.kind() == kind)
        {
            return self.clone();
        }

        let mut blocks = self.blocks.clone();
        for slot in &mut blocks[first..=last] {
            if slot.kind() != kind {
                *slot = Arc::new(slot.with_kind(kind));
            }
        }

        Self {
            blocks,
            selection: self.selection.clone(),
            inline_style_override: self.inline_style_override.clone(),
            version: self.version + 1,
        }
    }

    /// Set `kind`, or reset to unstyled when the current block already has it
    pub fn toggle_block_type(&self, kind: BlockType) -> Self {
        if self.current_block().kind() == kind {
            self.set_block_type(BlockType::Unstyled)
        } else {
            self.set_block_type(kind)
        }
    }

    /// Move the caret, collapsing any selection
    pub fn move_cursor(&self, movement: CursorMove) -> Self {
        let focus = &self.selection.focus;
        let index = self.index_of(&focus.key);
        let block = &self.blocks[index];
        let previous = index.checked_sub(1).map(|i| &self.blocks[i]);
        let next = self.blocks.get(index + 1);

        let (target, offset) = match movement {
            CursorMove::Left if focus.offset > 0 => (block, focus.offset - 1),
            CursorMove::Left => match previous {
                Some(prev) => (prev, prev.len()),
                None => (block, 0),
            },
            CursorMove::Right if focus.offset < block.len() => (block, focus.offset + 1),
            CursorMove::Right => match next {
                Some(next) => (next, 0),
                None => (block, block.len()),
            },
            CursorMove::Up => match previous {
                Some(prev) => (prev, focus.offset.min(prev.len())),
                None => (block, 0),
            },
            CursorMove::Down => match next {
                Some(next) => (next, focus.offset.min(next.len())),
                None => (block, block.len()),
            },
            CursorMove::LineStart => (block, 0),
            CursorMove::LineEnd => (block, block.len()),
        };

        Self {
            blocks: self.blocks.clone(),
            selection: Selection::collapsed(target.key().clone(), offset),
            inline_style_override: None,
            version: self.version,
        }
    }

    /// Delete backwards from the caret.
    ///
    /// At the start of a styled block the block type is reset first; at the
    /// start of an unstyled block the block joins the one above.
    pub fn backspace(&self) -> Self {
        if !self.selection.is_collapsed() {
            return self.delete_selection();
        }

        let caret = &self.selection.focus;
        if caret.offset > 0 {
            return self.delete_range(caret.offset - 1..caret.offset);
        }

        let index = self.index_of(&caret.key);
        let block = &self.blocks[index];
        if block.kind() != BlockType::Unstyled {
            return self.set_block_type(BlockType::Unstyled);
        }
        if index == 0 {
            return self.clone();
        }

        let above = &self.blocks[index - 1];
        let joined = above.join(block);
        let caret = Selection::collapsed(above.key().clone(), above.len());
        self.splice(index - 1..index + 1, vec![joined], caret, None)
    }

    /// Delete forwards from the caret, joining the next block at block end
    pub fn delete_forward(&self) -> Self {
        if !self.selection.is_collapsed() {
            return self.delete_selection();
        }

        let caret = &self.selection.focus;
        let index = self.index_of(&caret.key);
        let block = &self.blocks[index];
        if caret.offset < block.len() {
            return self.delete_range(caret.offset..caret.offset + 1);
        }

        match self.blocks.get(index + 1) {
            Some(below) => {
                let joined = block.join(below);
                let caret = self.selection.clone();
                self.splice(index..index + 2, vec![joined], caret, None)
            }
            None => self.clone(),
        }
    }
}
