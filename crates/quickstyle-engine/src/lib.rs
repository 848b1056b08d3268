pub mod editing;
pub mod io;
pub mod persistence;
pub mod presentation;
pub mod shortcuts;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use editing::{block::*, commands::*, document::*, selection::*, styles::*};
pub use io::*;
pub use persistence::{DecodeError, decode, encode, from_json, to_json};
pub use presentation::{Color, Presentation, block_class, presentation_for, style_presentation};
pub use shortcuts::{BeforeInsert, ShortcutEngine, StyleTarget};
