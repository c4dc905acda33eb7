//! Message boundary between the calendar app and its host
//!
//! The app talks to the host through one-way messages: it sends
//! [`Inbound`] requests and receives a single [`Outbound::StateSnapshot`]
//! after it signals readiness.

use serde::Deserialize;

use crate::activator::{Activation, WidgetActivator};
use crate::bridge::SyncBridge;
use crate::day::{SaveRequest, Snapshot};
use crate::persistence::KeyValueStore;

/// Requests from the app
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Inbound {
    /// Persist one day's state
    Save(SaveRequest),
    /// Initialize the comment widget
    InitWidget,
}

/// Messages to the app
#[derive(Debug, Clone, PartialEq)]
pub enum Outbound {
    StateSnapshot(Snapshot),
}

/// Sync bridge plus comment widget activator
#[derive(Debug)]
pub struct Host<S, F> {
    bridge: SyncBridge<S>,
    comments: WidgetActivator<F>,
    snapshot_sent: bool,
}

impl<S: KeyValueStore, F: FnMut(&str)> Host<S, F> {
    pub fn new(store: S, comments: WidgetActivator<F>) -> Self {
        Self {
            bridge: SyncBridge::new(store),
            comments,
            snapshot_sent: false,
        }
    }

    /// Build the startup snapshot
    ///
    /// `Some` on the first call only; the snapshot is delivered once per host.
    pub fn start(&mut self) -> Option<Outbound> {
        if self.snapshot_sent {
            log::warn!("Snapshot already delivered, ignoring repeat start");
            return None;
        }
        self.snapshot_sent = true;
        Some(Outbound::StateSnapshot(self.bridge.load_snapshot()))
    }

    /// Build the snapshot and hand it to a one-shot port
    ///
    /// Returns false (and drops the port) if it was already delivered.
    pub fn start_with(&mut self, port: impl FnOnce(Outbound)) -> bool {
        match self.start() {
            Some(msg) => {
                port(msg);
                true
            }
            None => false,
        }
    }

    /// Handle one request from the app
    pub fn dispatch(&mut self, msg: Inbound) {
        match msg {
            Inbound::Save(request) => self.bridge.handle_save(&request),
            Inbound::InitWidget => {
                if self.comments.request_activation() == Activation::Deferred {
                    log::info!("Comments requested before widget script loaded");
                }
            }
        }
    }

    /// Parse and handle a JSON-encoded request
    ///
    /// Unparseable requests are logged and dropped.
    pub fn dispatch_json(&mut self, json: &str) {
        match serde_json::from_str::<Inbound>(json) {
            Ok(msg) => self.dispatch(msg),
            Err(e) => log::error!("Dropping malformed request: {}", e),
        }
    }

    /// The comment widget script finished loading
    pub fn widget_loaded(&mut self) {
        self.comments.load_completed();
    }

    pub fn has_started(&self) -> bool {
        self.snapshot_sent
    }

    pub fn bridge(&self) -> &SyncBridge<S> {
        &self.bridge
    }

    pub fn comments(&self) -> &WidgetActivator<F> {
        &self.comments
    }

    /// Tear down, returning the store (used to simulate a restart)
    pub fn into_store(self) -> S {
        self.bridge.into_store()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::day::{DayId, DayState};
    use crate::persistence::MemoryStore;
    use serde_json::json;
    use std::cell::Cell;
    use std::rc::Rc;

    type Counter = Rc<Cell<u32>>;

    fn host(store: MemoryStore) -> (Host<MemoryStore, impl FnMut(&str)>, Counter) {
        let count: Counter = Rc::new(Cell::new(0));
        let seen = count.clone();
        let activator = WidgetActivator::new("5701926784073728-proj", move |id: &str| {
            assert_eq!(id, "5701926784073728-proj");
            seen.set(seen.get() + 1);
        });
        (Host::new(store, activator), count)
    }

    fn snapshot_of(msg: Option<Outbound>) -> Snapshot {
        match msg {
            Some(Outbound::StateSnapshot(s)) => s,
            None => panic!("expected a snapshot"),
        }
    }

    #[test]
    fn test_snapshot_delivered_once() {
        let (mut host, _) = host(MemoryStore::new());
        assert!(!host.has_started());
        let snapshot = snapshot_of(host.start());
        assert_eq!(snapshot.len(), 24);
        assert!(host.start().is_none());

        let mut delivered = 0;
        assert!(!host.start_with(|_| delivered += 1));
        assert_eq!(delivered, 0);
    }

    #[test]
    fn test_start_with_port() {
        let (mut host, _) = host(MemoryStore::new());
        let mut received = None;
        assert!(host.start_with(|msg| received = Some(msg)));
        assert!(matches!(received, Some(Outbound::StateSnapshot(_))));
    }

    #[test]
    fn test_save_then_restart() {
        let x = json!({"grid": [[1, 2], [3, 4]], "solved": true});

        let (mut first, _) = host(MemoryStore::new());
        snapshot_of(first.start());
        first.dispatch(Inbound::Save(SaveRequest::new(DayId::new(3).unwrap(), x.clone())));
        let store = first.into_store();

        let (mut second, _) = host(store);
        let snapshot = snapshot_of(second.start());
        assert_eq!(snapshot.len(), 24);
        assert_eq!(snapshot.present_count(), 1);
        for day in DayId::all() {
            if day.get() == 3 {
                assert_eq!(snapshot.get(day), Some(&DayState(x.clone())));
            } else {
                assert!(snapshot.get(day).is_none(), "day {} should be absent", day);
            }
        }
    }

    #[test]
    fn test_init_widget_coalesces_until_loaded() {
        let (mut host, count) = host(MemoryStore::new());
        for _ in 0..3 {
            host.dispatch(Inbound::InitWidget);
        }
        assert_eq!(count.get(), 0);
        host.widget_loaded();
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_init_widget_after_load() {
        let (mut host, count) = host(MemoryStore::new());
        host.widget_loaded();
        assert_eq!(count.get(), 0);
        host.dispatch(Inbound::InitWidget);
        assert_eq!(count.get(), 1);
        assert!(host.comments().is_loaded());
    }

    #[test]
    fn test_dispatch_json() {
        let (mut host, count) = host(MemoryStore::new());
        host.dispatch_json(r#"{"type": "save", "day": 9, "model": [9]}"#);
        host.dispatch_json(r#"{"type": "save", "day": 99, "model": [99]}"#);
        host.dispatch_json(r#"{"type": "init_widget"}"#);
        host.dispatch_json("garbage");

        assert_eq!(host.bridge().store().raw("day9"), Some("[9]"));
        assert_eq!(host.bridge().store().len(), 1);
        assert_eq!(count.get(), 0);
        assert_eq!(host.comments().activation_count(), 0);
    }

    #[test]
    fn test_saves_work_before_start() {
        let (mut host, _) = host(MemoryStore::new());
        host.dispatch(Inbound::Save(SaveRequest::new(DayId::LAST, json!("late"))));
        let snapshot = snapshot_of(host.start());
        assert_eq!(snapshot.get(DayId::LAST), Some(&DayState(json!("late"))));
    }
}
