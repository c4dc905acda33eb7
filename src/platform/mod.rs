//! Browser platform layer
//!
//! Handles the browser side of the host:
//! - Storage (LocalStorage)
//! - Third-party script tags and deferred widget init
//! - The JavaScript-facing bridge object
//!
//! Native builds use `persistence::MemoryStore` and skip this module.

#[cfg(target_arch = "wasm32")]
pub mod scripts;
#[cfg(target_arch = "wasm32")]
pub mod storage;
#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(target_arch = "wasm32")]
pub use storage::LocalStore;
#[cfg(target_arch = "wasm32")]
pub use web::WebBridge;
