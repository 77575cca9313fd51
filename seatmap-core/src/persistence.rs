//! Persistence adapter: keeps the selection across restarts
//!
//! The selection is stored as a JSON array of seat identifiers under one fixed
//! key. An empty selection removes the key instead of storing `[]`.

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, warn};

use crate::error::PersistenceError;
use crate::venue::SeatId;

/// Storage key holding the selected seat identifiers
pub const SELECTION_KEY: &str = "selectedSeats";

/// Durable string key/value storage
pub trait KeyValueStorage {
    /// `Ok(None)` when the key is absent
    fn get(&self, key: &str) -> io::Result<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> io::Result<()>;

    /// Removing an absent key is not an error
    fn remove(&mut self, key: &str) -> io::Result<()>;
}

/// One `<key>.json` file per key under a directory
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Platform data directory, e.g. `~/.local/share/seatmap`
    pub fn default_dir() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("seatmap"))
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        // write-then-rename so a crash never leaves a half-written file
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)
    }

    fn remove(&mut self, key: &str) -> io::Result<()> {
        match std::fs::remove_file(self.path_for(key)) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}

/// In-memory storage. Clones share contents, so a second adapter built from a
/// clone sees what the first one wrote (like a page reload).
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(key)
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> io::Result<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }
}

/// Reads and writes the selection through a [`KeyValueStorage`]
#[derive(Debug, Clone)]
pub struct SelectionPersistence<S> {
    storage: S,
    key: String,
}

impl<S: KeyValueStorage> SelectionPersistence<S> {
    /// Adapter using [`SELECTION_KEY`]
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, SELECTION_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Overwrite the stored selection with `ids`
    pub fn save(&mut self, ids: &[SeatId]) -> Result<(), PersistenceError> {
        let json = serde_json::to_string(ids)?;
        self.storage
            .set(&self.key, &json)
            .map_err(PersistenceError::Write)?;
        debug!(key = %self.key, count = ids.len(), "Selection saved");
        Ok(())
    }

    /// Remove the stored entry entirely
    pub fn clear(&mut self) -> Result<(), PersistenceError> {
        self.storage
            .remove(&self.key)
            .map_err(PersistenceError::Write)?;
        debug!(key = %self.key, "Stored selection removed");
        Ok(())
    }

    /// Save `ids`, or remove the entry when `ids` is empty
    pub fn sync(&mut self, ids: &[SeatId]) -> Result<(), PersistenceError> {
        if ids.is_empty() {
            self.clear()
        } else {
            self.save(ids)
        }
    }

    /// Previously saved identifiers, or an error describing why they could
    /// not be read
    pub fn try_load(&self) -> Result<Vec<SeatId>, PersistenceError> {
        match self.storage.get(&self.key).map_err(PersistenceError::Read)? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }

    /// Previously saved identifiers. Unreadable or corrupt storage is logged
    /// and treated as "nothing saved".
    pub fn load(&self) -> Vec<SeatId> {
        self.try_load().unwrap_or_else(|err| {
            warn!(key = %self.key, error = %err, "Ignoring stored selection");
            Vec::new()
        })
    }
}
