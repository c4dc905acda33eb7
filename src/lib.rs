//! Calendar Bridge - browser host for an advent puzzle calendar
//!
//! Core modules:
//! - `day`: Day ids, opaque day state, startup snapshot
//! - `persistence`: Key-value store adapter and day state codec
//! - `bridge`: Load-once / save-on-demand sync with storage
//! - `activator`: Deferred third-party widget activation
//! - `host`: Message boundary tying the above together
//! - `platform`: LocalStorage, script tags, and the JS entry point (wasm32)
//! - `config`: Host configuration

pub mod activator;
pub mod bridge;
pub mod config;
pub mod day;
pub mod error;
pub mod host;
pub mod persistence;
pub mod platform;

pub use activator::{Activation, WidgetActivator, WidgetState};
pub use bridge::SyncBridge;
pub use config::BridgeConfig;
pub use day::{DayId, DayState, SaveRequest, Snapshot};
pub use error::{BridgeError, CodecError, ConfigError, StoreError};
pub use host::{Host, Inbound, Outbound};
pub use persistence::{KeyValueStore, MemoryStore};
