//! Deterministic daily round generation
//!
//! Everything here is a pure function of the date key and the catalog:
//! - Date key is the civil day in the configured timezone
//! - Seeded RNG only (PCG32 keyed by the date string)
//! - Explicit Fisher-Yates shuffles, no sort-based randomness

pub mod date_key;
pub mod generator;
pub mod rng;

pub use date_key::{DateKey, date_key_for};
pub use generator::{DailyGameData, DailyGenerator};
pub use rng::DailyRng;
