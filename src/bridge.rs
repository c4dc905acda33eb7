//! Sync bridge between the calendar app and persistent storage
//!
//! Two independent flows:
//! - Load: read every day once at startup into a [`Snapshot`]
//! - Save: write one day's state whenever the app asks, fire-and-forget

use crate::day::{DayId, SaveRequest, Snapshot};
use crate::error::BridgeError;
use crate::persistence::{self, KeyValueStore};

/// Owns the store and maps calendar days onto its keys
#[derive(Debug)]
pub struct SyncBridge<S> {
    store: S,
}

impl<S: KeyValueStore> SyncBridge<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Read and decode every day
    ///
    /// A day that fails to read or decode is absent; the rest still load.
    pub fn load_snapshot(&self) -> Snapshot {
        let mut snapshot = Snapshot::empty();
        for day in DayId::all() {
            let key = day.key();
            let state = match self.store.get(&key) {
                Ok(text) => persistence::decode(text.as_deref()),
                Err(e) => {
                    log::warn!("Skipping day {}: {}", day, e);
                    None
                }
            };
            snapshot.insert(day, state);
        }
        log::info!(
            "Loaded {} of {} saved days",
            snapshot.present_count(),
            DayId::COUNT
        );
        snapshot
    }

    /// Encode and persist one day's state
    pub fn save(&mut self, request: &SaveRequest) -> Result<(), BridgeError> {
        let text = persistence::encode(&request.model);
        self.store.set(&request.day.key(), &text)?;
        log::debug!("Day {} saved ({} bytes)", request.day, text.len());
        Ok(())
    }

    /// Fire-and-forget save: failures are logged, never returned
    pub fn handle_save(&mut self, request: &SaveRequest) {
        if let Err(e) = self.save(request) {
            log::error!("Failed to save day {}: {}", request.day, e);
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
