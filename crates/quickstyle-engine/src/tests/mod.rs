use tempfile::TempDir;

use crate::editing::{Block, BlockType, DocumentState, InlineStyle};

pub fn create_test_store_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

/// Heading, mixed-style paragraph, nested list item and an empty line
pub fn sample_document() -> DocumentState {
    let mut data = serde_json::Map::new();
    data.insert("align".to_string(), serde_json::json!("center"));

    DocumentState::from_blocks(vec![
        Block::new(BlockType::HeaderOne, "Title"),
        Block::paragraph("bold then red")
            .with_style(0..4, InlineStyle::Bold)
            .with_style(10..13, InlineStyle::RedColor)
            .with_style(2..12, InlineStyle::Underline),
        Block::new(BlockType::UnorderedListItem, "naïve 🦀 item")
            .with_depth(1)
            .with_data(data)
            .with_style(6..7, InlineStyle::from_name("HIGHLIGHT")),
        Block::empty(),
    ])
}
