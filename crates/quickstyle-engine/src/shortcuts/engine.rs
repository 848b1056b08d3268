use crate::editing::{DocumentState, InlineStyle};
use crate::shortcuts::{PatternTable, StyleTarget};

/// Outcome of offering an insertion to the engine
#[must_use]
#[derive(Debug, Clone, PartialEq)]
pub enum BeforeInsert {
    /// A shortcut fired; the host should adopt this state and drop the input
    Handled(DocumentState),
    /// Insert the input as ordinary text
    NotHandled,
}

impl BeforeInsert {
    pub fn is_handled(&self) -> bool {
        matches!(self, BeforeInsert::Handled(_))
    }
}

/// Turns trigger text followed by a space into formatting.
///
/// The engine holds no document state: the host passes the current state in
/// and adopts whatever comes back.
#[derive(Debug, Clone, Copy)]
pub struct ShortcutEngine<'t> {
    table: &'t PatternTable,
}

impl Default for ShortcutEngine<'static> {
    fn default() -> Self {
        Self::new(PatternTable::standard())
    }
}

impl<'t> ShortcutEngine<'t> {
    pub fn new(table: &'t PatternTable) -> Self {
        Self { table }
    }

    /// Called before `input` is inserted at the selection.
    ///
    /// Only a single space can fire a shortcut. The text from block start to
    /// the selection start is matched against the table; on a match the
    /// trigger text is removed and its style applied.
    pub fn on_before_insert(&self, input: &str, state: &DocumentState) -> BeforeInsert {
        if input != " " {
            return BeforeInsert::NotHandled;
        }

        let prefix = state.text_before_cursor();
        let Some(found) = self.table.find_match(prefix) else {
            return BeforeInsert::NotHandled;
        };

        log::debug!(
            "shortcut {:?} fired on {:?} in block {}",
            found.pattern.target(),
            prefix,
            state.current_block().key()
        );

        BeforeInsert::Handled(self.apply_style(state, found.matched_len, found.pattern.target()))
    }

    /// Delete `trigger_len` chars before the cursor, then apply `target`
    pub fn apply_style(
        &self,
        state: &DocumentState,
        trigger_len: usize,
        target: &StyleTarget,
    ) -> DocumentState {
        let cursor = state.selection_start().offset;
        let start = cursor.saturating_sub(trigger_len);
        let trimmed = state.delete_range(start..cursor);

        match target {
            StyleTarget::Block(kind) => trimmed.set_block_type(*kind),
            StyleTarget::Inline(style) => {
                let cleared = self
                    .table
                    .exclusions_for(style)
                    .into_iter()
                    .fold(trimmed, |doc, excluded| ensure_off(&doc, excluded));
                ensure_on(&cleared, style)
            }
        }
    }
}

/// Leave `style` active at the caret whatever its prior state
fn ensure_on(state: &DocumentState, style: &InlineStyle) -> DocumentState {
    if state.current_inline_style().contains(style) {
        state.toggle_inline_style(style).toggle_inline_style(style)
    } else {
        state.toggle_inline_style(style)
    }
}

fn ensure_off(state: &DocumentState, style: &InlineStyle) -> DocumentState {
    if state.current_inline_style().contains(style) {
        state.toggle_inline_style(style)
    } else {
        state.clone()
    }
}
