use crate::editing::{BlockType, DocumentState, InlineStyle};

/// Caret movements understood by [`DocumentState::move_cursor`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMove {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
}

/// Named editing commands a host maps its key bindings onto
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Bold,
    Italic,
    Underline,
    Code,
    Strikethrough,
    Backspace,
    Delete,
    SplitBlock,
    /// Toggle a block type on the current block
    BlockType(BlockType),
}

/// Apply a key command.
///
/// Returns `None` when the command does not change the document, so the
/// host can fall back to its own handling.
pub fn handle_key_command(state: &DocumentState, cmd: KeyCommand) -> Option<DocumentState> {
    let next = match cmd {
        KeyCommand::Bold => state.toggle_inline_style(&InlineStyle::Bold),
        KeyCommand::Italic => state.toggle_inline_style(&InlineStyle::Italic),
        KeyCommand::Underline => state.toggle_inline_style(&InlineStyle::Underline),
        KeyCommand::Code => state.toggle_inline_style(&InlineStyle::Code),
        KeyCommand::Strikethrough => state.toggle_inline_style(&InlineStyle::Strikethrough),
        KeyCommand::Backspace => state.backspace(),
        KeyCommand::Delete => state.delete_forward(),
        KeyCommand::SplitBlock => state.split_block(),
        KeyCommand::BlockType(kind) => state.toggle_block_type(kind),
    };

    (next != *state).then_some(next)
}
