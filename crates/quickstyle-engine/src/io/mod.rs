use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::editing::DocumentState;
use crate::persistence::{DecodeError, from_json, to_json};

/// Storage slot the editor saves its document under
pub const DEFAULT_SLOT: &str = "editorContent";

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),
}

#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("Failed to encode document: {0}")]
    Encode(#[from] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Narrow get/set seam over a local key-value store
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-process store, mostly for tests
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One `<key>.json` file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        if !path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&path)
            .map(Some)
            .map_err(|source| StorageError::Io { path, source })
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;

        let dir_error = |source| StorageError::Io {
            path: self.root.clone(),
            source,
        };

        // Create the storage directory on first save
        fs::create_dir_all(&self.root).map_err(dir_error)?;

        // Stage beside the target, then rename over it
        let mut staged = NamedTempFile::new_in(&self.root).map_err(dir_error)?;
        staged
            .write_all(value.as_bytes())
            .and_then(|()| staged.as_file().sync_all())
            .map_err(dir_error)?;
        staged
            .persist(&path)
            .map_err(|e| StorageError::Io { path, source: e.error })?;
        Ok(())
    }
}

/// Encode `state` and write it to `slot`. A later save overwrites an earlier one.
pub fn save<S: KeyValueStore + ?Sized>(
    store: &mut S,
    slot: &str,
    state: &DocumentState,
) -> Result<(), PersistError> {
    let json = to_json(state)?;
    store.set(slot, &json)?;
    log::info!("saved {} blocks to {slot:?}", state.block_count());
    Ok(())
}

/// Read and decode the document in `slot`
pub fn load<S: KeyValueStore + ?Sized>(store: &S, slot: &str) -> Result<DocumentState, DecodeError> {
    let json = store.get(slot)?.ok_or_else(|| DecodeError::Missing {
        slot: slot.to_string(),
    })?;
    from_json(&json)
}

/// Startup load: any failure yields an empty document
pub fn load_or_empty<S: KeyValueStore + ?Sized>(store: &S, slot: &str) -> DocumentState {
    match load(store, slot) {
        Ok(state) => state,
        Err(DecodeError::Missing { .. }) => {
            log::info!("no saved document under {slot:?}, starting empty");
            DocumentState::empty()
        }
        Err(e) => {
            log::warn!("Failed to load document from {slot:?}: {e}");
            DocumentState::empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::InlineStyle;
    use crate::tests::{create_test_store_dir, sample_document};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_memory_store_get_set() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("a").unwrap(), None);

        store.set("a", "1").unwrap();
        store.set("a", "2").unwrap();

        assert_eq!(store.get("a").unwrap(), Some("2".to_string()));
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = create_test_store_dir();
        let nested = dir.path().join("nested");

        let mut store = FileStore::new(&nested);
        store.set(DEFAULT_SLOT, "{}").unwrap();

        let reopened = FileStore::new(&nested);
        assert_eq!(reopened.get(DEFAULT_SLOT).unwrap(), Some("{}".to_string()));
        assert!(nested.join("editorContent.json").exists());
    }

    #[test]
    fn test_file_store_overwrite_leaves_only_the_record() {
        let dir = create_test_store_dir();
        let mut store = FileStore::new(dir.path());

        store.set(DEFAULT_SLOT, "old").unwrap();
        store.set(DEFAULT_SLOT, "new").unwrap();

        assert_eq!(store.get(DEFAULT_SLOT).unwrap(), Some("new".to_string()));
        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["editorContent.json".to_string()]);
    }

    #[test]
    fn test_file_store_rejects_path_like_keys() {
        let dir = create_test_store_dir();
        let mut store = FileStore::new(dir.path());

        assert!(matches!(
            store.set("../escape", "x"),
            Err(StorageError::InvalidKey(_))
        ));
        assert!(matches!(store.get(""), Err(StorageError::InvalidKey(_))));
    }

    #[test]
    fn test_save_then_load_restores_document() {
        let mut store = MemoryStore::new();
        let doc = sample_document();

        save(&mut store, DEFAULT_SLOT, &doc).unwrap();
        let loaded = load(&store, DEFAULT_SLOT).unwrap();

        assert_eq!(
            loaded.blocks().collect::<Vec<_>>(),
            doc.blocks().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_load_missing_slot_is_distinct_error() {
        let store = MemoryStore::new();
        assert!(matches!(
            load(&store, DEFAULT_SLOT),
            Err(DecodeError::Missing { slot }) if slot == DEFAULT_SLOT
        ));
    }

    #[test]
    fn test_load_or_empty_falls_back_on_corrupt_record() {
        let mut store = MemoryStore::new();
        store.set(DEFAULT_SLOT, "{\"blocks\": [").unwrap();

        let doc = load_or_empty(&store, DEFAULT_SLOT);

        assert_eq!(doc.block_count(), 1);
        assert_eq!(doc.plain_text(), "");
    }

    #[test]
    fn test_load_or_empty_falls_back_on_missing_record() {
        let store = MemoryStore::new();
        let doc = load_or_empty(&store, DEFAULT_SLOT);
        assert_eq!(doc.plain_text(), "");
    }

    #[test]
    fn test_last_save_wins() {
        let mut store = MemoryStore::new();
        save(&mut store, DEFAULT_SLOT, &sample_document()).unwrap();
        let second = DocumentState::empty()
            .toggle_inline_style(&InlineStyle::Code)
            .insert_text("newer");
        save(&mut store, DEFAULT_SLOT, &second).unwrap();

        let loaded = load(&store, DEFAULT_SLOT).unwrap();
        assert_eq!(loaded.plain_text(), "newer");
        assert!(
            loaded
                .current_block()
                .styles()
                .iter()
                .all(|s| s.contains(&InlineStyle::Code))
        );
    }
}
