/*!
 * # Editing Core Module
 *
 * The document model every other part of the engine works on.
 *
 * ## Architecture Overview
 *
 * ### 1. Immutable, versioned state
 * - A [`DocumentState`] is a value: blocks, selection and pending inline
 *   style override
 * - Every edit is a pure transform returning a new state
 * - Untouched blocks are shared between versions (`Arc<Block>`)
 *
 * ### 2. Stable block identity
 * - Blocks are addressed by [`BlockKey`], never by index
 * - A selection stays valid while edits happen elsewhere in the document
 *
 * ### 3. Character-level styles
 * - Each char carries a [`StyleSet`] of [`InlineStyle`]s
 * - Toggling on a caret records an override used by the next insertion
 *
 * ### 4. Commands
 * - [`KeyCommand`] names the edits a host binds to keys
 * - [`handle_key_command`] applies one and reports whether anything changed
 *
 * ## Module Structure
 *
 * - **`styles`**: `InlineStyle`, `StyleSet`, `BlockType`
 * - **`block`**: `Block` and `BlockKey`
 * - **`selection`**: `Point`, `Selection`, `SelectionError`
 * - **`document`**: `DocumentState` and its transforms
 * - **`commands`**: `KeyCommand`, `CursorMove`, `handle_key_command`
 *
 * ## Usage Pattern
 *
 * ```rust
 * use quickstyle_engine::editing::*;
 *
 * let doc = DocumentState::empty().insert_text("Title");
 * let doc = doc.set_block_type(BlockType::HeaderOne);
 * let doc = handle_key_command(&doc, KeyCommand::SplitBlock).unwrap();
 *
 * assert_eq!(doc.block_count(), 2);
 * ```
 */

pub mod block;
pub mod commands;
pub mod document;
pub mod selection;
pub mod styles;

pub use block::{Block, BlockKey};
pub use commands::{CursorMove, KeyCommand, handle_key_command};
pub use document::DocumentState;
pub use selection::{Point, Selection, SelectionError};
pub use styles::{BlockType, CustomStyle, InlineStyle, StyleSet};
