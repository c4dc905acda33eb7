//! Day state persistence
//!
//! Features:
//! - Synchronous key-value store abstraction (LocalStorage on web, in-memory elsewhere)
//! - Plain JSON day state codec, compatible with existing browser saves
//! - Soft decode: corrupt entries read back as "never played"

pub mod codec;
pub mod store;

pub use codec::{decode, encode, try_decode};
pub use store::{KeyValueStore, MemoryStore};
