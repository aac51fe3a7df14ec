//! Event catalog: the CRUD operations behind the admin surface and CLI.
//!
//! Every mutation is a load-modify-save cycle over the whole collection.
//! Cycles are serialized so concurrent edits are not lost. Names are not
//! unique; update and remove act on the first event with the given name.

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use opentelemetry::KeyValue;
use tracing::info;

use crate::engine::activity::DATE_FORMAT;
use crate::error::{Error, Result};
use crate::model::Event;
use crate::storage::EventStore;
use crate::telemetry::metrics;

/// CRUD facade over an [`EventStore`].
pub struct Catalog {
    store: Arc<dyn EventStore>,
    write: Mutex<()>,
}

impl Catalog {
    pub fn new(store: Arc<dyn EventStore>) -> Self {
        Self {
            store,
            write: Mutex::new(()),
        }
    }

    /// The underlying store, for read-only consumers such as the chat listener.
    pub fn store(&self) -> Arc<dyn EventStore> {
        Arc::clone(&self.store)
    }

    /// All events in collection order.
    pub fn list(&self) -> Result<Vec<Event>> {
        self.store.load_events()
    }

    /// Append a new event.
    pub fn add(&self, event: Event) -> Result<()> {
        validate(&event)?;
        self.modify("add", |events| {
            info!(name = %event.name, "event added");
            events.push(event);
            Ok(())
        })
    }

    /// Replace the first event named `name`.
    pub fn update(&self, name: &str, event: Event) -> Result<()> {
        validate(&event)?;
        self.modify("update", |events| {
            let slot = events
                .iter_mut()
                .find(|e| e.name == name)
                .ok_or_else(|| Error::NotFound(name.to_string()))?;
            info!(from = %name, to = %event.name, "event updated");
            *slot = event;
            Ok(())
        })
    }

    /// Remove the first event named `name` and return it.
    pub fn remove(&self, name: &str) -> Result<Event> {
        let mut removed = None;
        self.modify("remove", |events| {
            let index = events
                .iter()
                .position(|e| e.name == name)
                .ok_or_else(|| Error::NotFound(name.to_string()))?;
            removed = Some(events.remove(index));
            info!(name = %name, "event removed");
            Ok(())
        })?;
        removed.ok_or_else(|| Error::NotFound(name.to_string()))
    }

    fn modify<F>(&self, operation: &'static str, f: F) -> Result<()>
    where
        F: FnOnce(&mut Vec<Event>) -> Result<()>,
    {
        let _guard = self
            .write
            .lock()
            .map_err(|_| Error::Other("catalog lock poisoned".into()))?;

        let mut events = self.store.load_events()?;
        f(&mut events)?;
        self.store.save_events(&events)?;

        metrics::catalog_operations().add(1, &[KeyValue::new("operation", operation)]);
        Ok(())
    }
}

/// Reject events the engine could not evaluate.
pub fn validate(event: &Event) -> Result<()> {
    if event.name.trim().is_empty() {
        return Err(Error::Invalid("name must not be empty".into()));
    }
    for (field, value) in [("start", &event.start), ("end", &event.end)] {
        NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|e| {
            Error::Invalid(format!("{field} must be YYYY-MM-DD, got {value:?}: {e}"))
        })?;
    }
    Ok(())
}
