//! How styles and block types are shown by a host.
//!
//! These maps are pure data. A host turns a [`Presentation`] into whatever
//! its surface understands (terminal attributes, CSS, ...).

use crate::editing::{BlockType, InlineStyle, StyleSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
}

/// Visual attributes for one inline style, or a merged set of them
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Presentation {
    pub color: Option<Color>,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    pub monospace: bool,
}

impl Presentation {
    /// Later attributes win for color; flags are OR-ed
    pub fn merge(self, other: Presentation) -> Presentation {
        Presentation {
            color: other.color.or(self.color),
            bold: self.bold || other.bold,
            italic: self.italic || other.italic,
            underline: self.underline || other.underline,
            strikethrough: self.strikethrough || other.strikethrough,
            monospace: self.monospace || other.monospace,
        }
    }
}

pub fn style_presentation(style: &InlineStyle) -> Presentation {
    let plain = Presentation::default();
    match style {
        InlineStyle::Bold => Presentation { bold: true, ..plain },
        InlineStyle::Italic => Presentation {
            italic: true,
            ..plain
        },
        InlineStyle::Underline => Presentation {
            underline: true,
            ..plain
        },
        InlineStyle::Strikethrough => Presentation {
            strikethrough: true,
            ..plain
        },
        InlineStyle::Code => Presentation {
            monospace: true,
            ..plain
        },
        InlineStyle::RedColor => Presentation {
            color: Some(Color::Red),
            ..plain
        },
        InlineStyle::Custom(_) => plain,
    }
}

/// Combined presentation of every style active on a char
pub fn presentation_for(styles: &StyleSet) -> Presentation {
    styles
        .iter()
        .map(style_presentation)
        .fold(Presentation::default(), Presentation::merge)
}

/// Class name a host attaches to blocks that need distinct styling
pub fn block_class(kind: &BlockType) -> Option<&'static str> {
    match kind {
        BlockType::HeaderOne => Some("header-one"),
        BlockType::HeaderTwo => Some("header-two"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_red_color_is_red() {
        let p = style_presentation(&InlineStyle::RedColor);
        assert_eq!(p.color, Some(Color::Red));
        assert!(!p.bold);
    }

    #[rstest]
    #[case(InlineStyle::Bold, Presentation { bold: true, ..Default::default() })]
    #[case(InlineStyle::Underline, Presentation { underline: true, ..Default::default() })]
    #[case(InlineStyle::Code, Presentation { monospace: true, ..Default::default() })]
    #[case(InlineStyle::from_name("HIGHLIGHT"), Presentation::default())]
    fn test_style_presentation(#[case] style: InlineStyle, #[case] expected: Presentation) {
        assert_eq!(style_presentation(&style), expected);
    }

    #[test]
    fn test_presentation_for_merges_styles() {
        let styles: StyleSet = [InlineStyle::Bold, InlineStyle::RedColor].into();
        let p = presentation_for(&styles);
        assert!(p.bold);
        assert_eq!(p.color, Some(Color::Red));
        assert_eq!(presentation_for(&StyleSet::new()), Presentation::default());
    }

    #[rstest]
    #[case(BlockType::HeaderOne, Some("header-one"))]
    #[case(BlockType::HeaderTwo, Some("header-two"))]
    #[case(BlockType::HeaderThree, None)]
    #[case(BlockType::Unstyled, None)]
    #[case(BlockType::Blockquote, None)]
    fn test_block_class(#[case] kind: BlockType, #[case] expected: Option<&str>) {
        assert_eq!(block_class(&kind), expected);
    }
}
