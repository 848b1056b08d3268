use std::fmt;
use std::ops::Range;

use serde_json::{Map, Value};
use uuid::Uuid;

use crate::editing::{BlockType, InlineStyle, StyleSet};

/// Stable identity of a block.
///
/// Keys survive edits to other blocks, so a held selection stays valid until
/// its own block is edited.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockKey(String);

impl BlockKey {
    /// Generate a fresh random key
    pub fn generate() -> Self {
        let id = Uuid::new_v4().simple().to_string();
        Self(id[..8].to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for BlockKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl From<String> for BlockKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl fmt::Display for BlockKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One line of document structure: type tag, text and per-character styles.
///
/// Blocks are values. Every edit builds a new block; [`DocumentState`] shares
/// untouched blocks between versions.
///
/// [`DocumentState`]: crate::editing::DocumentState
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    key: BlockKey,
    kind: BlockType,
    text: String,
    /// One entry per char of `text`
    styles: Vec<StyleSet>,
    depth: u8,
    data: Map<String, Value>,
}

impl Block {
    /// Create an unstyled-text block with a fresh key
    pub fn new(kind: BlockType, text: impl Into<String>) -> Self {
        Self::with_key(BlockKey::generate(), kind, text)
    }

    pub fn with_key(key: BlockKey, kind: BlockType, text: impl Into<String>) -> Self {
        let text = text.into();
        let styles = vec![StyleSet::new(); text.chars().count()];
        Self {
            key,
            kind,
            text,
            styles,
            depth: 0,
            data: Map::new(),
        }
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::new(BlockType::Unstyled, text)
    }

    pub fn empty() -> Self {
        Self::paragraph("")
    }

    pub fn with_depth(mut self, depth: u8) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_data(mut self, data: Map<String, Value>) -> Self {
        self.data = data;
        self
    }

    /// Add `style` to every char in `range` (char offsets, clamped to the block)
    pub fn with_style(mut self, range: Range<usize>, style: InlineStyle) -> Self {
        self.set_style_in(range, &style, true);
        self
    }

    pub fn key(&self) -> &BlockKey {
        &self.key
    }

    pub fn kind(&self) -> BlockType {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    /// Length in chars
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Per-character style sets, one per char
    pub fn styles(&self) -> &[StyleSet] {
        &self.styles
    }

    /// Styles of the char at `offset`, if any
    pub fn style_at(&self, offset: usize) -> Option<&StyleSet> {
        self.styles.get(offset)
    }

    /// Text from block start up to the char offset (clamped)
    pub fn text_until(&self, offset: usize) -> &str {
        &self.text[..self.byte_offset(offset)]
    }

    fn byte_offset(&self, char_offset: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_offset)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }

    pub(crate) fn rekeyed(&self, key: BlockKey) -> Self {
        Self {
            key,
            ..self.clone()
        }
    }

    pub(crate) fn with_kind(&self, kind: BlockType) -> Self {
        Self {
            kind,
            ..self.clone()
        }
    }

    pub(crate) fn delete_chars(&self, range: Range<usize>) -> Self {
        let start = range.start.min(self.len());
        let end = range.end.min(self.len()).max(start);
        let (byte_start, byte_end) = (self.byte_offset(start), self.byte_offset(end));

        let mut next = self.clone();
        next.text.replace_range(byte_start..byte_end, "");
        next.styles.drain(start..end);
        next
    }

    pub(crate) fn insert_chars(&self, offset: usize, text: &str, style: &StyleSet) -> Self {
        let offset = offset.min(self.len());
        let byte = self.byte_offset(offset);

        let mut next = self.clone();
        next.text.insert_str(byte, text);
        let inserted = std::iter::repeat_n(style.clone(), text.chars().count());
        next.styles.splice(offset..offset, inserted);
        next
    }

    /// Split into (head, tail). The tail gets `tail_key` and keeps this block's type.
    pub(crate) fn split_at(&self, offset: usize, tail_key: BlockKey) -> (Self, Self) {
        let offset = offset.min(self.len());
        let byte = self.byte_offset(offset);

        let head = Self {
            text: self.text[..byte].to_string(),
            styles: self.styles[..offset].to_vec(),
            ..self.clone()
        };
        let tail = Self {
            key: tail_key,
            text: self.text[byte..].to_string(),
            styles: self.styles[offset..].to_vec(),
            ..self.clone()
        };
        (head, tail)
    }

    /// Append `other`'s text and styles, keeping this block's key and type
    pub(crate) fn join(&self, other: &Block) -> Self {
        let mut next = self.clone();
        next.text.push_str(&other.text);
        next.styles.extend(other.styles.iter().cloned());
        next
    }

    pub(crate) fn set_style_in(&mut self, range: Range<usize>, style: &InlineStyle, on: bool) {
        let end = range.end.min(self.len());
        let start = range.start.min(end);
        for set in &mut self.styles[start..end] {
            if on {
                set.insert(style.clone());
            } else {
                set.remove(style);
            }
        }
    }
}
