//! # Persistence
//!
//! Two channels:
//! - the durable store, written on every document change under one key and
//!   read once at startup
//! - the project file, downloaded on save and parsed on load
//!
//! Malformed stored data never blocks startup; it is logged and replaced by
//! the built-in default.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use flyer_document::FlyerDocument;
use tracing::{debug, info, warn};

use crate::config::EditorConfig;
use crate::errors::EditorError;
use crate::host::{Download, PROJECT_FILE_NAME};

pub const PROJECT_MIME: &str = "application/json";

/// Key/value text storage that survives restarts
pub trait DurableStore {
    fn get(&self, key: &str) -> io::Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> io::Result<()>;
    fn remove(&mut self, key: &str) -> io::Result<()>;
}

/// In-process store
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one entry (does not count as a write)
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut store = Self::default();
        store.entries.insert(key.into(), value.into());
        store
    }

    /// Number of `set` calls so far
    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn peek(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl DurableStore for MemoryStore {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.writes += 1;
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> io::Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per key
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    pub fn open(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn entry_path(&self, key: &str) -> io::Result<PathBuf> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid store key `{}`", key),
            ));
        }
        Ok(self.root.join(format!("{}.json", key)))
    }
}

impl DurableStore for DirectoryStore {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        match fs::read_to_string(self.entry_path(key)?) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        let target = self.entry_path(key)?;
        let staging = target.with_extension("json.tmp");
        fs::write(&staging, value)?;
        fs::rename(&staging, &target)
    }

    fn remove(&mut self, key: &str) -> io::Result<()> {
        match fs::remove_file(self.entry_path(key)?) {
            Err(err) if err.kind() != io::ErrorKind::NotFound => Err(err),
            _ => Ok(()),
        }
    }
}

/// Store key for the auto-save channel; the project file always downloads
/// as [`PROJECT_FILE_NAME`]
#[derive(Debug, Clone)]
pub struct Persistence {
    storage_key: String,
}

impl Persistence {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            storage_key: config.storage_key.clone(),
        }
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// Startup document: the stored one when it parses, the default otherwise
    pub fn restore<S: DurableStore + ?Sized>(&self, store: &S) -> FlyerDocument {
        let stored = match store.get(&self.storage_key) {
            Ok(Some(stored)) => stored,
            Ok(None) => {
                debug!(key = %self.storage_key, "nothing stored, using default flyer");
                return FlyerDocument::default();
            }
            Err(err) => {
                warn!(key = %self.storage_key, error = %err, "could not read durable store, using default flyer");
                return FlyerDocument::default();
            }
        };

        match FlyerDocument::from_json(&stored) {
            Ok(doc) => {
                info!(key = %self.storage_key, "restored flyer from durable store");
                doc
            }
            Err(err) => {
                warn!(key = %self.storage_key, error = %err, "stored flyer is malformed, using default flyer");
                FlyerDocument::default()
            }
        }
    }

    /// Write the document under the store key. A failed write is logged and
    /// reported as `false`; the in-memory document stays authoritative.
    pub fn autosave<S: DurableStore + ?Sized>(&self, store: &mut S, doc: &FlyerDocument) -> bool {
        let json = match doc.to_json() {
            Ok(json) => json,
            Err(err) => {
                warn!(error = %err, "could not serialize flyer for auto-save");
                return false;
            }
        };

        match store.set(&self.storage_key, &json) {
            Ok(()) => true,
            Err(err) => {
                warn!(key = %self.storage_key, error = %err, "auto-save failed");
                false
            }
        }
    }

    pub fn clear<S: DurableStore + ?Sized>(&self, store: &mut S) {
        if let Err(err) = store.remove(&self.storage_key) {
            warn!(key = %self.storage_key, error = %err, "could not clear durable store");
        }
    }

    /// Pretty-printed project file
    pub fn project_download(&self, doc: &FlyerDocument) -> Result<Download, EditorError> {
        Ok(Download {
            file_name: PROJECT_FILE_NAME.to_string(),
            mime: PROJECT_MIME,
            bytes: doc.to_json_pretty()?.into_bytes(),
        })
    }

    pub fn parse_project(bytes: &[u8]) -> Result<FlyerDocument, EditorError> {
        FlyerDocument::from_slice(bytes).map_err(EditorError::InvalidProjectFile)
    }
}
