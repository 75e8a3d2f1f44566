//! Persistence port for filter history.
//!
//! History is saved as one JSON document under [`HISTORY_KEY`] in a
//! [`KeyValueStore`]. Stores only move bytes; encoding lives here so the history
//! logic can be exercised against [`MemoryStore`] without touching disk.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::JoinHandle;

use serde::{Deserialize, Serialize};

use super::entry::HistoryEntry;
use crate::error::{Result, SuggestError};

pub const HISTORY_KEY: &str = "filter_history";

const FORMAT_VERSION: u32 = 1;

/// Minimal key-value persistence used for history
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;
    fn set(&self, key: &str, value: &[u8]) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        (**self).set(key, value)
    }
}

#[derive(Serialize)]
struct StoredHistoryRef<'a> {
    version: u32,
    entries: &'a [HistoryEntry],
}

#[derive(Deserialize)]
struct StoredHistory {
    version: u32,
    #[serde(default)]
    entries: Vec<HistoryEntry>,
}

pub fn encode(entries: &[HistoryEntry]) -> Result<Vec<u8>> {
    let stored = StoredHistoryRef {
        version: FORMAT_VERSION,
        entries,
    };
    serde_json::to_vec(&stored).map_err(|e| SuggestError::Encode(e.to_string()))
}

pub fn decode(bytes: &[u8]) -> Result<Vec<HistoryEntry>> {
    let stored: StoredHistory = serde_json::from_slice(bytes)?;
    if stored.version != FORMAT_VERSION {
        return Err(SuggestError::Decode(format!(
            "unsupported history version {}",
            stored.version
        )));
    }
    Ok(stored.entries)
}

/// Drop repeated filters, keeping the first (most recent) occurrence.
pub fn deduplicate(entries: Vec<HistoryEntry>) -> Vec<HistoryEntry> {
    let mut seen = HashSet::new();
    entries
        .into_iter()
        .filter(|entry| seen.insert(entry.filter.clone()))
        .collect()
}

pub fn trim_to_max(mut entries: Vec<HistoryEntry>, max_entries: usize) -> Vec<HistoryEntry> {
    entries.truncate(max_entries);
    entries
}

/// Stores each key as `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        match fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        // Write then rename so a crash never leaves a half-written file behind
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, value)?;
        fs::rename(&tmp_path, &path)?;
        Ok(())
    }
}

/// In-process store, mainly for tests and ephemeral sessions
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: &[u8]) -> Self {
        let store = Self::new();
        store
            .values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_vec());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.insert(key.to_string(), value.to_vec());
        Ok(())
    }
}

enum WriteCommand {
    Set { key: String, value: Vec<u8> },
    Flush(Sender<()>),
}

/// Moves writes of another store onto a worker thread.
///
/// `set` returns as soon as the write is queued. Failed writes are logged by the
/// worker. `get` waits for queued writes first, so reads observe earlier writes.
/// Dropping the store drains the queue and joins the worker.
pub struct BackgroundStore {
    inner: Arc<dyn KeyValueStore>,
    tx: Option<Sender<WriteCommand>>,
    worker: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for BackgroundStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackgroundStore").finish_non_exhaustive()
    }
}

impl BackgroundStore {
    pub fn new<S: KeyValueStore + 'static>(inner: S) -> Self {
        let inner: Arc<dyn KeyValueStore> = Arc::new(inner);
        let (tx, rx) = mpsc::channel::<WriteCommand>();
        let worker_store = Arc::clone(&inner);

        let worker = std::thread::spawn(move || {
            while let Ok(command) = rx.recv() {
                match command {
                    WriteCommand::Set { key, value } => {
                        if let Err(e) = worker_store.set(&key, &value) {
                            log::warn!("Background write of '{}' failed: {}", key, e);
                        }
                    }
                    WriteCommand::Flush(ack) => {
                        let _ = ack.send(());
                    }
                }
            }
            log::debug!("History writer thread shutting down");
        });

        Self {
            inner,
            tx: Some(tx),
            worker: Some(worker),
        }
    }

    /// Block until every queued write has been handed to the inner store.
    pub fn flush(&self) {
        let Some(tx) = &self.tx else {
            return;
        };
        let (ack_tx, ack_rx) = mpsc::channel();
        if tx.send(WriteCommand::Flush(ack_tx)).is_ok() {
            let _ = ack_rx.recv();
        }
    }
}

impl KeyValueStore for BackgroundStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.flush();
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let command = WriteCommand::Set {
            key: key.to_string(),
            value: value.to_vec(),
        };
        if let Some(tx) = &self.tx
            && tx.send(command).is_ok()
        {
            return Ok(());
        }
        // Worker is gone, write on the caller's thread instead
        self.inner.set(key, value)
    }
}

impl Drop for BackgroundStore {
    fn drop(&mut self) {
        drop(self.tx.take());
        if let Some(worker) = self.worker.take()
            && worker.join().is_err()
        {
            log::warn!("History writer thread panicked");
        }
    }
}

#[cfg(test)]
#[path = "storage_tests.rs"]
mod storage_tests;
