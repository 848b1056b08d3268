use std::collections::BTreeSet;
use std::fmt;

/// Character-level style tag.
///
/// The built-in names match the persisted format. Any other name survives a
/// save/load cycle as [`InlineStyle::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum InlineStyle {
    Bold,
    Italic,
    Underline,
    Code,
    Strikethrough,
    RedColor,
    Custom(CustomStyle),
}

/// Name of a style with no built-in meaning.
///
/// Only [`InlineStyle::from_name`] builds one, so it never holds a built-in
/// name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CustomStyle(String);

impl CustomStyle {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl InlineStyle {
    pub fn as_str(&self) -> &str {
        match self {
            InlineStyle::Bold => "BOLD",
            InlineStyle::Italic => "ITALIC",
            InlineStyle::Underline => "UNDERLINE",
            InlineStyle::Code => "CODE",
            InlineStyle::Strikethrough => "STRIKETHROUGH",
            InlineStyle::RedColor => "REDCOLOR",
            InlineStyle::Custom(custom) => custom.as_str(),
        }
    }

    /// Parse a persisted style name. Never fails: unknown names become `Custom`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "BOLD" => InlineStyle::Bold,
            "ITALIC" => InlineStyle::Italic,
            "UNDERLINE" => InlineStyle::Underline,
            "CODE" => InlineStyle::Code,
            "STRIKETHROUGH" => InlineStyle::Strikethrough,
            "REDCOLOR" => InlineStyle::RedColor,
            other => InlineStyle::Custom(CustomStyle(other.to_string())),
        }
    }
}

impl fmt::Display for InlineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Set of inline styles active on one character (or at the cursor)
pub type StyleSet = BTreeSet<InlineStyle>;

/// Block type tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlockType {
    /// Plain paragraph
    #[default]
    Unstyled,
    HeaderOne,
    HeaderTwo,
    HeaderThree,
    HeaderFour,
    HeaderFive,
    HeaderSix,
    Blockquote,
    UnorderedListItem,
    OrderedListItem,
    CodeBlock,
    Atomic,
}

impl BlockType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::Unstyled => "unstyled",
            BlockType::HeaderOne => "header-one",
            BlockType::HeaderTwo => "header-two",
            BlockType::HeaderThree => "header-three",
            BlockType::HeaderFour => "header-four",
            BlockType::HeaderFive => "header-five",
            BlockType::HeaderSix => "header-six",
            BlockType::Blockquote => "blockquote",
            BlockType::UnorderedListItem => "unordered-list-item",
            BlockType::OrderedListItem => "ordered-list-item",
            BlockType::CodeBlock => "code-block",
            BlockType::Atomic => "atomic",
        }
    }

    /// Parse a persisted type tag. `paragraph` is accepted as an alias of `unstyled`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let kind = match tag {
            "unstyled" | "paragraph" => BlockType::Unstyled,
            "header-one" => BlockType::HeaderOne,
            "header-two" => BlockType::HeaderTwo,
            "header-three" => BlockType::HeaderThree,
            "header-four" => BlockType::HeaderFour,
            "header-five" => BlockType::HeaderFive,
            "header-six" => BlockType::HeaderSix,
            "blockquote" => BlockType::Blockquote,
            "unordered-list-item" => BlockType::UnorderedListItem,
            "ordered-list-item" => BlockType::OrderedListItem,
            "code-block" => BlockType::CodeBlock,
            "atomic" => BlockType::Atomic,
            _ => return None,
        };
        Some(kind)
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
