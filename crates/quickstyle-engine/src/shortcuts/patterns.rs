use std::sync::LazyLock;

use regex::Regex;

use crate::editing::{BlockType, InlineStyle};

/// What a trigger applies once it fires
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleTarget {
    Block(BlockType),
    Inline(InlineStyle),
}

#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    #[error("Invalid trigger pattern {pattern:?}: {source}")]
    InvalidRegex {
        pattern: String,
        source: regex::Error,
    },
}

/// A matcher over the text before the cursor plus the style it applies.
///
/// The matcher is anchored at both ends: it only fires when it matches the
/// whole text between block start and cursor.
#[derive(Debug, Clone)]
pub struct TriggerPattern {
    matcher: Regex,
    target: StyleTarget,
}

impl TriggerPattern {
    pub fn new(pattern: &str, target: StyleTarget) -> Result<Self, PatternError> {
        let matcher = Regex::new(&format!("^(?:{pattern})$")).map_err(|source| {
            PatternError::InvalidRegex {
                pattern: pattern.to_string(),
                source,
            }
        })?;
        Ok(Self { matcher, target })
    }

    /// Trigger on exactly `literal`
    pub fn literal(literal: &str, target: StyleTarget) -> Self {
        let matcher = Regex::new(&format!("^{}$", regex::escape(literal)))
            .expect("escaped literal is a valid regex");
        Self { matcher, target }
    }

    pub fn target(&self) -> &StyleTarget {
        &self.target
    }

    /// Length in chars of the match, when the whole prefix matches
    fn matched_len(&self, prefix: &str) -> Option<usize> {
        self.matcher
            .find(prefix)
            .map(|found| found.as_str().chars().count())
    }
}

/// Applying `applied` clears `cleared`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleExclusion {
    pub applied: InlineStyle,
    pub cleared: InlineStyle,
}

/// A fired trigger
#[derive(Debug, Clone, Copy)]
pub struct PatternMatch<'a> {
    pub pattern: &'a TriggerPattern,
    /// Chars of trigger text before the cursor
    pub matched_len: usize,
}

/// Ordered trigger rules plus style exclusions. First match wins.
#[derive(Debug, Clone, Default)]
pub struct PatternTable {
    patterns: Vec<TriggerPattern>,
    exclusions: Vec<StyleExclusion>,
}

static STANDARD: LazyLock<PatternTable> = LazyLock::new(|| {
    PatternTable::new()
        .with_pattern(TriggerPattern::literal("#", StyleTarget::Block(BlockType::HeaderOne)))
        .with_pattern(TriggerPattern::literal("*", StyleTarget::Inline(InlineStyle::Bold)))
        .with_pattern(TriggerPattern::literal("**", StyleTarget::Inline(InlineStyle::RedColor)))
        .with_pattern(TriggerPattern::literal("***", StyleTarget::Inline(InlineStyle::Underline)))
        .with_exclusion(InlineStyle::RedColor, InlineStyle::Underline)
});

impl PatternTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in shortcuts: `#` heading, `*` bold, `**` red, `***` underline
    pub fn standard() -> &'static PatternTable {
        &STANDARD
    }

    pub fn with_pattern(mut self, pattern: TriggerPattern) -> Self {
        self.push(pattern);
        self
    }

    pub fn push(&mut self, pattern: TriggerPattern) {
        self.patterns.push(pattern);
    }

    pub fn with_exclusion(mut self, applied: InlineStyle, cleared: InlineStyle) -> Self {
        self.exclusions.push(StyleExclusion { applied, cleared });
        self
    }

    /// First pattern, in declared order, that matches the whole prefix
    pub fn find_match(&self, prefix: &str) -> Option<PatternMatch<'_>> {
        self.patterns.iter().find_map(|pattern| {
            pattern
                .matched_len(prefix)
                .map(|matched_len| PatternMatch {
                    pattern,
                    matched_len,
                })
        })
    }

    /// Styles cleared when `style` is applied
    pub fn exclusions_for(&self, style: &InlineStyle) -> Vec<&InlineStyle> {
        self.exclusions
            .iter()
            .filter(|exclusion| &exclusion.applied == style)
            .map(|exclusion| &exclusion.cleared)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("#", StyleTarget::Block(BlockType::HeaderOne), 1)]
    #[case("*", StyleTarget::Inline(InlineStyle::Bold), 1)]
    #[case("**", StyleTarget::Inline(InlineStyle::RedColor), 2)]
    #[case("***", StyleTarget::Inline(InlineStyle::Underline), 3)]
    fn test_standard_table(#[case] prefix: &str, #[case] target: StyleTarget, #[case] len: usize) {
        let found = PatternTable::standard().find_match(prefix).unwrap();
        assert_eq!(found.pattern.target(), &target);
        assert_eq!(found.matched_len, len);
    }

    #[rstest]
    #[case("")]
    #[case("****")]
    #[case("a*")]
    #[case("*a")]
    #[case("##")]
    #[case(" #")]
    fn test_only_whole_prefix_matches(#[case] prefix: &str) {
        assert!(PatternTable::standard().find_match(prefix).is_none());
    }

    #[test]
    fn test_first_match_wins_for_overlapping_patterns() {
        let table = PatternTable::new()
            .with_pattern(
                TriggerPattern::new(r"-+", StyleTarget::Inline(InlineStyle::Strikethrough))
                    .unwrap(),
            )
            .with_pattern(TriggerPattern::literal(
                "--",
                StyleTarget::Block(BlockType::Blockquote),
            ));

        let found = table.find_match("--").unwrap();
        assert_eq!(
            found.pattern.target(),
            &StyleTarget::Inline(InlineStyle::Strikethrough)
        );
        assert_eq!(found.matched_len, 2);
    }

    #[test]
    fn test_regex_alternation_is_anchored_as_a_whole() {
        let pattern =
            TriggerPattern::new("a|bb", StyleTarget::Inline(InlineStyle::Italic)).unwrap();
        let table = PatternTable::new().with_pattern(pattern);

        assert!(table.find_match("a").is_some());
        assert!(table.find_match("bb").is_some());
        assert!(table.find_match("abb").is_none());
    }

    #[test]
    fn test_matched_len_counts_chars() {
        let table = PatternTable::new()
            .with_pattern(TriggerPattern::literal("→", StyleTarget::Inline(InlineStyle::Code)));
        assert_eq!(table.find_match("→").unwrap().matched_len, 1);
    }

    #[test]
    fn test_invalid_regex_is_reported() {
        let result = TriggerPattern::new("(", StyleTarget::Inline(InlineStyle::Bold));
        assert!(matches!(result, Err(PatternError::InvalidRegex { .. })));
    }

    #[test]
    fn test_exclusions_are_directional() {
        let table = PatternTable::standard();
        assert_eq!(
            table.exclusions_for(&InlineStyle::RedColor),
            vec![&InlineStyle::Underline]
        );
        assert!(table.exclusions_for(&InlineStyle::Underline).is_empty());
    }
}
