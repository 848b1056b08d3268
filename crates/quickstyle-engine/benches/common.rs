// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
use quickstyle_engine::{Block, BlockType, DocumentState, InlineStyle};

#[allow(dead_code)]
pub fn generate_document(blocks: usize) -> DocumentState {
    let blocks = (0..blocks)
        .map(|i| match i % 4 {
            0 => Block::new(BlockType::HeaderOne, format!("Section {i}")),
            1 => Block::paragraph("Paragraph with some bold and red content.")
                .with_style(20..24, InlineStyle::Bold)
                .with_style(29..32, InlineStyle::RedColor),
            2 => Block::new(BlockType::UnorderedListItem, "Bullet point")
                .with_style(0..6, InlineStyle::Underline),
            _ => Block::empty(),
        })
        .collect();
    DocumentState::from_blocks(blocks)
}
