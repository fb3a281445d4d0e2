//! Persistence of the single daily-state document.
//!
//! Callers load the whole document, change it in memory and save it back in
//! full. There is no locking: two requests that load before either saves
//! will lose one of the two updates. The service runs as a single process
//! with a single writer file, and bot traffic is human paced.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard},
};

use anyhow::Context;
use tracing::warn;

use crate::models::daily::DailyState;

/// Owner of the persisted representation.
pub trait DailyStore: Send + Sync {
    /// `Ok(None)` when nothing has been stored yet.
    fn load(&self) -> anyhow::Result<Option<DailyState>>;

    fn save(&self, state: &DailyState) -> anyhow::Result<()>;
}

/// Load the document, treating an absent or unreadable store as "no data yet".
pub fn read_state(store: &dyn DailyStore) -> DailyState {
    match store.load() {
        Ok(Some(state)) => state,
        Ok(None) => DailyState::default(),
        Err(e) => {
            warn!("Daily store unreadable, using defaults: {:#}", e);
            DailyState::default()
        }
    }
}

/// JSON file on disk, rewritten in full on every save.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DailyStore for FileStore {
    fn load(&self) -> anyhow::Result<Option<DailyState>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("reading {}", self.path.display()))
            }
        };
        let state = serde_json::from_str(&raw)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        Ok(Some(state))
    }

    fn save(&self, state: &DailyState) -> anyhow::Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("creating {}", dir.display()))?;
        }
        let json = serde_json::to_string_pretty(state)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).with_context(|| format!("writing {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("replacing {}", self.path.display()))?;
        Ok(())
    }
}

/// Keeps the serialized document in memory. Used by tests.
#[derive(Default)]
pub struct MemoryStore {
    raw: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: &DailyState) -> anyhow::Result<Self> {
        let store = Self::new();
        store.save(state)?;
        Ok(store)
    }

    /// Serialized form exactly as last saved.
    pub fn raw(&self) -> anyhow::Result<Option<String>> {
        Ok(self.slot()?.clone())
    }

    fn slot(&self) -> anyhow::Result<MutexGuard<'_, Option<String>>> {
        self.raw
            .lock()
            .map_err(|_| anyhow::anyhow!("memory store poisoned"))
    }
}

impl DailyStore for MemoryStore {
    fn load(&self) -> anyhow::Result<Option<DailyState>> {
        match self.raw()? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    fn save(&self, state: &DailyState) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(state)?;
        *self.slot()? = Some(json);
        Ok(())
    }
}
