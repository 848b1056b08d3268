use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use quickstyle_engine::{
    BeforeInsert, CursorMove, DocumentState, FileStore, KeyCommand, ShortcutEngine,
    handle_key_command, io,
};

pub const SAVED_MESSAGE: &str = "Content saved!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Quit,
}

/// Editor session: the current document plus where it is saved
pub struct App {
    state: DocumentState,
    store: FileStore,
    slot: String,
    engine: ShortcutEngine<'static>,
    status: Option<String>,
}

impl App {
    /// Open the document in `slot`, or start empty if it can't be loaded
    pub fn new(store: FileStore, slot: impl Into<String>) -> Self {
        let slot = slot.into();
        let state = io::load_or_empty(&store, &slot);
        log::info!(
            "opened {:?} from {} with {} blocks",
            slot,
            store.root().display(),
            state.block_count()
        );

        Self {
            state,
            store,
            slot,
            engine: ShortcutEngine::default(),
            status: None,
        }
    }

    pub fn state(&self) -> &DocumentState {
        &self.state
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Outcome {
        self.status = None;

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('q') => return Outcome::Quit,
                KeyCode::Char('s') => self.save(),
                KeyCode::Char('b') => self.command(KeyCommand::Bold),
                KeyCode::Char('i') => self.command(KeyCommand::Italic),
                KeyCode::Char('u') => self.command(KeyCommand::Underline),
                _ => {}
            }
            return Outcome::Continue;
        }

        match key.code {
            KeyCode::Esc => return Outcome::Quit,
            KeyCode::Char(c) => self.type_char(c),
            KeyCode::Enter => self.command(KeyCommand::SplitBlock),
            KeyCode::Backspace => self.command(KeyCommand::Backspace),
            KeyCode::Delete => self.command(KeyCommand::Delete),
            KeyCode::Left => self.move_cursor(CursorMove::Left),
            KeyCode::Right => self.move_cursor(CursorMove::Right),
            KeyCode::Up => self.move_cursor(CursorMove::Up),
            KeyCode::Down => self.move_cursor(CursorMove::Down),
            KeyCode::Home => self.move_cursor(CursorMove::LineStart),
            KeyCode::End => self.move_cursor(CursorMove::LineEnd),
            _ => {}
        }
        Outcome::Continue
    }

    fn type_char(&mut self, c: char) {
        let input = c.to_string();
        self.state = match self.engine.on_before_insert(&input, &self.state) {
            BeforeInsert::Handled(next) => next,
            BeforeInsert::NotHandled => self.state.insert_text(&input),
        };
    }

    fn command(&mut self, cmd: KeyCommand) {
        if let Some(next) = handle_key_command(&self.state, cmd) {
            self.state = next;
        }
    }

    fn move_cursor(&mut self, movement: CursorMove) {
        self.state = self.state.move_cursor(movement);
    }

    pub fn save(&mut self) {
        match io::save(&mut self.store, &self.slot, &self.state) {
            Ok(()) => self.status = Some(SAVED_MESSAGE.to_string()),
            Err(e) => {
                log::error!("Failed to save document: {e}");
                self.status = Some(format!("Save failed: {e}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use quickstyle_engine::{BlockType, DEFAULT_SLOT, InlineStyle, KeyValueStore};
    use tempfile::TempDir;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            assert_eq!(app.handle_key(key(KeyCode::Char(c))), Outcome::Continue);
        }
    }

    #[test]
    fn test_typing_runs_shortcuts() {
        let dir = TempDir::new().unwrap();
        let mut app = App::new(FileStore::new(dir.path()), DEFAULT_SLOT);

        type_str(&mut app, "# Notes");
        app.handle_key(key(KeyCode::Enter));
        type_str(&mut app, "* key");

        let blocks: Vec<_> = app.state().blocks().collect();
        assert_eq!(blocks[0].kind(), BlockType::HeaderOne);
        assert_eq!(blocks[0].text(), "Notes");
        assert_eq!(blocks[1].text(), "key");
        assert!(
            blocks[1]
                .styles()
                .iter()
                .all(|s| s.contains(&InlineStyle::Bold))
        );
    }

    #[test]
    fn test_ctrl_s_saves_and_reopens() {
        let dir = TempDir::new().unwrap();
        let mut app = App::new(FileStore::new(dir.path()), DEFAULT_SLOT);
        type_str(&mut app, "hello");

        app.handle_key(ctrl('s'));
        assert_eq!(app.status(), Some(SAVED_MESSAGE));

        app.handle_key(key(KeyCode::Left));
        assert_eq!(app.status(), None);

        let reopened = App::new(FileStore::new(dir.path()), DEFAULT_SLOT);
        assert_eq!(reopened.state().plain_text(), "hello");
    }

    #[test]
    fn test_corrupt_saved_content_opens_empty() {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::new(dir.path());
        store.set(DEFAULT_SLOT, "not json").unwrap();

        let app = App::new(store, DEFAULT_SLOT);

        assert_eq!(app.state().plain_text(), "");
    }

    #[test]
    fn test_ctrl_b_toggles_bold_for_next_char() {
        let dir = TempDir::new().unwrap();
        let mut app = App::new(FileStore::new(dir.path()), DEFAULT_SLOT);

        app.handle_key(ctrl('b'));
        type_str(&mut app, "x");

        assert!(app.state().current_block().styles()[0].contains(&InlineStyle::Bold));
    }

    #[test]
    fn test_editing_keys() {
        let dir = TempDir::new().unwrap();
        let mut app = App::new(FileStore::new(dir.path()), DEFAULT_SLOT);

        type_str(&mut app, "abc");
        app.handle_key(key(KeyCode::Backspace));
        app.handle_key(key(KeyCode::Home));
        app.handle_key(key(KeyCode::Delete));

        assert_eq!(app.state().plain_text(), "b");
    }

    #[test]
    fn test_quit_keys() {
        let dir = TempDir::new().unwrap();
        let mut app = App::new(FileStore::new(dir.path()), DEFAULT_SLOT);

        assert_eq!(app.handle_key(key(KeyCode::Esc)), Outcome::Quit);
        assert_eq!(app.handle_key(ctrl('q')), Outcome::Quit);
    }
}
