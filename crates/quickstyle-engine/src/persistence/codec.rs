use std::collections::{BTreeMap, HashSet};

use serde_json::Map;

use crate::editing::{Block, BlockKey, BlockType, DocumentState, InlineStyle, StyleSet};
use crate::io::StorageError;
use crate::persistence::{RawBlock, RawDocument, RawInlineStyleRange};

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("No stored document under {slot:?}")]
    Missing { slot: String },
    #[error("Stored document is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("Stored document has no blocks")]
    NoBlocks,
    #[error("Duplicate block key {key:?}")]
    DuplicateKey { key: String },
    #[error("Block {key:?} has unknown type {kind:?}")]
    UnknownBlockType { key: String, kind: String },
    #[error("Style {style} at {offset}+{length} is outside block {key:?} of length {len}")]
    StyleRangeOutOfBounds {
        key: String,
        style: String,
        offset: usize,
        length: usize,
        len: usize,
    },
    #[error("Failed to read stored document: {0}")]
    Storage(#[from] StorageError),
}

/// Snapshot a document into the stored format
pub fn encode(state: &DocumentState) -> RawDocument {
    RawDocument {
        blocks: state.blocks().map(encode_block).collect(),
        entity_map: Map::new(),
    }
}

fn encode_block(block: &Block) -> RawBlock {
    RawBlock {
        key: block.key().to_string(),
        text: block.text().to_string(),
        kind: block.kind().as_str().to_string(),
        depth: block.depth(),
        inline_style_ranges: style_ranges(block.styles()),
        entity_ranges: Vec::new(),
        data: block.data().clone(),
    }
}

/// Maximal runs per style, ordered by offset then style name
fn style_ranges(styles: &[StyleSet]) -> Vec<RawInlineStyleRange> {
    let mut ranges = Vec::new();
    let mut open: BTreeMap<&InlineStyle, usize> = BTreeMap::new();

    let close = |style: &InlineStyle, start: usize, end: usize| RawInlineStyleRange {
        offset: start,
        length: end - start,
        style: style.as_str().to_string(),
    };

    for (i, set) in styles.iter().enumerate() {
        open.retain(|style, start| {
            let still_open = set.contains(*style);
            if !still_open {
                ranges.push(close(*style, *start, i));
            }
            still_open
        });
        for style in set {
            open.entry(style).or_insert(i);
        }
    }
    for (style, start) in open {
        ranges.push(close(style, start, styles.len()));
    }

    ranges.sort_by(|a, b| (a.offset, &a.style).cmp(&(b.offset, &b.style)));
    ranges
}

/// Rebuild a document from the stored format.
///
/// The caret starts at the beginning of the first block. Entity ranges are
/// not modelled and are dropped.
pub fn decode(raw: RawDocument) -> Result<DocumentState, DecodeError> {
    if raw.blocks.is_empty() {
        return Err(DecodeError::NoBlocks);
    }

    let mut seen = HashSet::new();
    let blocks = raw
        .blocks
        .into_iter()
        .map(|block| decode_block(block, &mut seen))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(DocumentState::from_blocks(blocks))
}

fn decode_block(raw: RawBlock, seen: &mut HashSet<String>) -> Result<Block, DecodeError> {
    if !seen.insert(raw.key.clone()) {
        return Err(DecodeError::DuplicateKey { key: raw.key });
    }

    let kind = BlockType::from_tag(&raw.kind).ok_or_else(|| DecodeError::UnknownBlockType {
        key: raw.key.clone(),
        kind: raw.kind.clone(),
    })?;

    if !raw.entity_ranges.is_empty() {
        log::debug!(
            "dropping {} entity ranges from block {}",
            raw.entity_ranges.len(),
            raw.key
        );
    }

    let mut block = Block::with_key(BlockKey::from(raw.key.as_str()), kind, raw.text)
        .with_depth(raw.depth)
        .with_data(raw.data);

    for range in raw.inline_style_ranges {
        let end = range.offset.saturating_add(range.length);
        if end > block.len() {
            return Err(DecodeError::StyleRangeOutOfBounds {
                key: raw.key,
                style: range.style,
                offset: range.offset,
                length: range.length,
                len: block.len(),
            });
        }
        block = block.with_style(range.offset..end, InlineStyle::from_name(&range.style));
    }

    Ok(block)
}

pub fn to_json(state: &DocumentState) -> serde_json::Result<String> {
    serde_json::to_string(&encode(state))
}

pub fn from_json(json: &str) -> Result<DocumentState, DecodeError> {
    let raw: RawDocument = serde_json::from_str(json)?;
    decode(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn raw_block(key: &str, text: &str, kind: &str) -> RawBlock {
        RawBlock {
            key: key.to_string(),
            text: text.to_string(),
            kind: kind.to_string(),
            depth: 0,
            inline_style_ranges: Vec::new(),
            entity_ranges: Vec::new(),
            data: Map::new(),
        }
    }

    #[test]
    fn test_style_ranges_are_maximal_runs() {
        let block = Block::paragraph("abcdef")
            .with_style(0..4, InlineStyle::Bold)
            .with_style(2..6, InlineStyle::Underline);

        let ranges = style_ranges(block.styles());

        assert_eq!(
            ranges,
            vec![
                RawInlineStyleRange {
                    offset: 0,
                    length: 4,
                    style: "BOLD".to_string()
                },
                RawInlineStyleRange {
                    offset: 2,
                    length: 4,
                    style: "UNDERLINE".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_split_runs_encode_separately() {
        let block = Block::paragraph("a b c")
            .with_style(0..1, InlineStyle::Italic)
            .with_style(4..5, InlineStyle::Italic);

        let ranges = style_ranges(block.styles());

        let spans: Vec<_> = ranges.iter().map(|r| (r.offset, r.length)).collect();
        assert_eq!(spans, vec![(0, 1), (4, 1)]);
    }

    #[test]
    fn test_decode_rejects_empty_document() {
        let raw = RawDocument {
            blocks: Vec::new(),
            entity_map: Map::new(),
        };
        assert!(matches!(decode(raw), Err(DecodeError::NoBlocks)));
    }

    #[test]
    fn test_decode_rejects_duplicate_keys() {
        let raw = RawDocument {
            blocks: vec![
                raw_block("k", "one", "unstyled"),
                raw_block("k", "two", "unstyled"),
            ],
            entity_map: Map::new(),
        };
        assert!(matches!(
            decode(raw),
            Err(DecodeError::DuplicateKey { key }) if key == "k"
        ));
    }

    #[test]
    fn test_decode_rejects_unknown_type() {
        let raw = RawDocument {
            blocks: vec![raw_block("k", "x", "header-nine")],
            entity_map: Map::new(),
        };
        assert!(matches!(
            decode(raw),
            Err(DecodeError::UnknownBlockType { kind, .. }) if kind == "header-nine"
        ));
    }

    #[test]
    fn test_decode_rejects_style_past_end() {
        let mut block = raw_block("k", "abc", "unstyled");
        block.inline_style_ranges.push(RawInlineStyleRange {
            offset: 2,
            length: 5,
            style: "BOLD".to_string(),
        });
        let raw = RawDocument {
            blocks: vec![block],
            entity_map: Map::new(),
        };

        assert!(matches!(
            decode(raw),
            Err(DecodeError::StyleRangeOutOfBounds { len: 3, .. })
        ));
    }

    #[test]
    fn test_decode_accepts_paragraph_alias_and_defaults() {
        let json = r#"{"blocks":[{"key":"p1","text":"plain","type":"paragraph"}]}"#;
        let doc = from_json(json).unwrap();

        let block = doc.current_block();
        assert_eq!(block.kind(), BlockType::Unstyled);
        assert_eq!(block.key().as_str(), "p1");
        assert_eq!(block.depth(), 0);
        assert!(block.styles().iter().all(|s| s.is_empty()));
    }

    #[test]
    fn test_from_json_reports_malformed_input() {
        assert!(matches!(
            from_json("{not json"),
            Err(DecodeError::Malformed(_))
        ));
        assert!(matches!(
            from_json(r#"{"entityMap":{}}"#),
            Err(DecodeError::Malformed(_))
        ));
    }
}
