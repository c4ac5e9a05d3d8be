//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (local clock, trusted server time on web)
//! - Storage (LocalStorage on web, files on native)

pub mod storage;
pub mod time;

pub use storage::{MemoryStorage, Storage};
pub use time::{parse_http_date, resolve_date_key, today};

#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorage;
#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStorage;
