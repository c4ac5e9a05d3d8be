//! Blind Globe - A daily geography guessing game
//!
//! Core modules:
//! - `daily`: Deterministic daily round generation (date key, seeded RNG, city selection)
//! - `session`: Round/score/hint state machine and scoring
//! - `game`: Session + stats lifecycle across days, snapshot for the renderer
//! - `catalog`: The validated city catalog
//! - `persistence`: Save/load of the client-local game blob
//! - `platform`: Clock and trusted-time check
//! - `settings`: Timezone and trust-source configuration

pub mod catalog;
pub mod daily;
pub mod error;
pub mod game;
pub mod persistence;
pub mod platform;
pub mod session;
pub mod settings;
pub mod share;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use catalog::{Catalog, City, Difficulty};
pub use daily::{DailyGameData, DailyGenerator, DateKey};
pub use error::{ConfigError, InvalidTransition, PersistenceError, TimeSourceError};
pub use game::{DailyGame, GameSnapshot};
pub use session::{GamePhase, GameSession, Guess, PlayerStats, RoundResult, ScoreBand};
pub use settings::{Settings, TrustSource};

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    /// Rounds per daily game (easy, medium, hard)
    pub const ROUNDS_PER_GAME: u8 = 3;

    /// Mean Earth radius used for great-circle distance (km)
    pub const EARTH_RADIUS_KM: f64 = 6371.0;

    /// Best possible raw score for a single round
    pub const MAX_ROUND_SCORE: i32 = 5000;
    /// Guesses closer than this score the maximum
    pub const PERFECT_RADIUS_KM: f64 = 50.0;
    /// Distance over which the score falls linearly from max to zero
    pub const SCORE_FALLOFF_KM: f64 = 5000.0;

    /// Highest hint tier
    pub const MAX_HINT_LEVEL: u8 = 2;
    /// Penalty for the first hint (country name)
    pub const HINT_PENALTY_COUNTRY: i32 = 500;
    /// Additional penalty for the second hint (outlines)
    pub const HINT_PENALTY_OUTLINES: i32 = 2000;
}

/// Great-circle distance in kilometers between two lat/lng points (haversine)
pub fn haversine_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    consts::EARTH_RADIUS_KM * c
}

/// Convert lat/lng (degrees) to a point on a globe of the given radius.
///
/// Y is up; longitude 0 faces +X after the 180° offset the globe texture uses.
#[inline]
pub fn lat_lng_to_vector(lat: f32, lng: f32, radius: f32) -> Vec3 {
    let phi = (90.0 - lat).to_radians();
    let theta = (lng + 180.0).to_radians();
    let x = -(phi.sin() * theta.cos());
    let z = phi.sin() * theta.sin();
    let y = phi.cos();
    Vec3::new(x, y, z) * radius
}
