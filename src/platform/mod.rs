//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (headless interval timer)
//! - Storage (LocalStorage on web)

#[cfg(target_arch = "wasm32")]
pub mod storage;
pub mod time;

#[cfg(target_arch = "wasm32")]
pub use storage::LocalStore;
pub use time::IntervalTimer;
