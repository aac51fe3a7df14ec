//! Event persistence.
//!
//! The engine only ever reads a snapshot; writes come from the catalog.
//! The JSON file layout is a pretty-printed array of events, UTF-8 with
//! non-ASCII text kept as-is.

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::error::{Error, Result};
use crate::model::Event;

/// Supplies and stores the full, ordered event collection.
///
/// `load_events` returns a consistent snapshot; callers never see a
/// partially written collection.
pub trait EventStore: Send + Sync {
    fn load_events(&self) -> Result<Vec<Event>>;
    fn save_events(&self, events: &[Event]) -> Result<()>;
}

// ---------------------------------------------------------------------------
// JSON file
// ---------------------------------------------------------------------------

/// Store backed by a single JSON file.
///
/// A missing file reads as an empty collection. Saves write a sibling temp
/// file and rename it over the original.
pub struct JsonFileStore {
    path: PathBuf,
    lock: RwLock<()>,
}

impl JsonFileStore {
    pub fn open(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: RwLock::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "events.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl EventStore for JsonFileStore {
    fn load_events(&self) -> Result<Vec<Event>> {
        let _guard = self
            .lock
            .read()
            .map_err(|_| Error::Other("event store lock poisoned".into()))?;

        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "event file missing, using empty collection");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        Ok(serde_json::from_str(&content)?)
    }

    fn save_events(&self, events: &[Event]) -> Result<()> {
        let _guard = self
            .lock
            .write()
            .map_err(|_| Error::Other("event store lock poisoned".into()))?;

        let json = serde_json::to_string_pretty(events)?;
        let tmp = self.temp_path();
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;

        tracing::debug!(path = %self.path.display(), count = events.len(), "events saved");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// In memory
// ---------------------------------------------------------------------------

/// Store kept in process memory (for testing).
#[derive(Default)]
pub struct InMemoryStore {
    events: RwLock<Vec<Event>>,
}

impl InMemoryStore {
    pub fn new(events: Vec<Event>) -> Self {
        Self {
            events: RwLock::new(events),
        }
    }
}

impl EventStore for InMemoryStore {
    fn load_events(&self) -> Result<Vec<Event>> {
        self.events
            .read()
            .map(|events| events.clone())
            .map_err(|_| Error::Other("event store lock poisoned".into()))
    }

    fn save_events(&self, events: &[Event]) -> Result<()> {
        let mut guard = self
            .events
            .write()
            .map_err(|_| Error::Other("event store lock poisoned".into()))?;
        *guard = events.to_vec();
        Ok(())
    }
}
