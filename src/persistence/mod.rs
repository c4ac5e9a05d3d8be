//! Save/load of the client-local game blob
//!
//! Features:
//! - Versioned JSON blob under one storage key
//! - Session and lifetime stats saved together after every transition
//! - Corrupt, missing or out-of-range saves load as a fresh install

use serde::{Deserialize, Serialize};

use crate::error::PersistenceError;
use crate::platform::Storage;
use crate::session::{GameSession, PlayerStats};

/// Storage key for the game blob
pub const STORAGE_KEY: &str = "blind-globe-storage";

/// Current blob format
pub const SAVE_VERSION: u32 = 1;

/// Everything that survives a reload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedGame {
    pub version: u32,
    #[serde(flatten)]
    pub session: GameSession,
    #[serde(flatten)]
    pub stats: PlayerStats,
}

impl Default for SavedGame {
    fn default() -> Self {
        Self {
            version: SAVE_VERSION,
            session: GameSession::default(),
            stats: PlayerStats::default(),
        }
    }
}

impl SavedGame {
    pub fn new(session: GameSession, stats: PlayerStats) -> Self {
        Self {
            version: SAVE_VERSION,
            session,
            stats,
        }
    }

    /// Parse a blob, rejecting other versions and out-of-range fields
    pub fn from_json(json: &str) -> Option<Self> {
        let saved: SavedGame = match serde_json::from_str(json) {
            Ok(saved) => saved,
            Err(e) => {
                log::warn!("Corrupt save ({}), starting fresh", e);
                return None;
            }
        };
        if saved.version != SAVE_VERSION {
            log::warn!("Save version {} unsupported, starting fresh", saved.version);
            return None;
        }
        if !saved.session.is_consistent() {
            log::warn!("Save has out-of-range fields, starting fresh");
            return None;
        }
        Some(saved)
    }

    pub fn to_json(&self) -> Result<String, PersistenceError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Load the saved game, or fresh-install defaults
pub fn load(storage: &impl Storage) -> SavedGame {
    match storage.get_item(STORAGE_KEY) {
        Some(json) => SavedGame::from_json(&json).unwrap_or_default(),
        None => {
            log::info!("No saved game found, starting fresh");
            SavedGame::default()
        }
    }
}

/// Write the game blob
pub fn save(
    storage: &mut impl Storage,
    session: &GameSession,
    stats: &PlayerStats,
) -> Result<(), PersistenceError> {
    let json = SavedGame::new(session.clone(), stats.clone()).to_json()?;
    storage.set_item(STORAGE_KEY, &json)?;
    log::debug!("Game saved ({} bytes)", json.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::daily::{DailyGenerator, DateKey};
    use crate::platform::MemoryStorage;
    use crate::session::GamePhase;

    fn revealed_game() -> (GameSession, PlayerStats) {
        let generator = DailyGenerator::new(Catalog::builtin().unwrap());
        let mut stats = PlayerStats::new();
        let mut session = GameSession::default();
        session.initialize(&mut stats, &DateKey::parse("2024-01-01").unwrap(), &generator);
        session.start_game().unwrap();
        session.use_hint().unwrap();
        session.set_temp_guess(10.0, 20.0).unwrap();
        session.confirm_guess().unwrap();
        (session, stats)
    }

    #[test]
    fn test_missing_blob_is_fresh_install() {
        let storage = MemoryStorage::new();
        assert_eq!(load(&storage), SavedGame::default());
    }

    #[test]
    fn test_corrupt_blob_is_fresh_install() {
        let mut storage = MemoryStorage::new();
        storage.set_item(STORAGE_KEY, "{not json").unwrap();
        assert_eq!(load(&storage), SavedGame::default());

        storage
            .set_item(STORAGE_KEY, r#"{"version":1,"gameState":"sleeping"}"#)
            .unwrap();
        assert_eq!(load(&storage), SavedGame::default());
    }

    #[test]
    fn test_out_of_range_round_rejected() {
        let mut storage = MemoryStorage::new();
        storage
            .set_item(STORAGE_KEY, r#"{"version":1,"round":9}"#)
            .unwrap();
        assert_eq!(load(&storage), SavedGame::default());
    }

    #[test]
    fn test_other_version_rejected() {
        let mut storage = MemoryStorage::new();
        storage.set_item(STORAGE_KEY, r#"{"version":99}"#).unwrap();
        assert_eq!(load(&storage), SavedGame::default());
    }

    #[test]
    fn test_save_then_load() {
        let (session, stats) = revealed_game();
        let mut storage = MemoryStorage::new();
        save(&mut storage, &session, &stats).unwrap();

        let loaded = load(&storage);
        assert_eq!(loaded.session, session);
        assert_eq!(loaded.stats, stats);
        assert_eq!(loaded.session.phase(), GamePhase::Revealed);
    }

    #[test]
    fn test_blob_field_names() {
        let (session, stats) = revealed_game();
        let json = SavedGame::new(session, stats).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        for field in [
            "round",
            "totalScore",
            "gameState",
            "targetCities",
            "referenceCities",
            "gamesPlayed",
            "highScore",
            "totalLifetimeScore",
            "lastPlayedDate",
        ] {
            assert!(value.get(field).is_some(), "missing {field}");
        }
        assert_eq!(value["gameState"], "revealed");
        assert_eq!(value["lastPlayedDate"], "2024-01-01");
        assert!(value.get("tempGuess").is_none());
    }

    #[test]
    fn test_stats_only_blob_loads() {
        let mut storage = MemoryStorage::new();
        storage
            .set_item(
                STORAGE_KEY,
                r#"{"version":1,"gamesPlayed":4,"highScore":12000,"totalLifetimeScore":30000,"lastPlayedDate":"2024-01-01"}"#,
            )
            .unwrap();
        let loaded = load(&storage);
        assert_eq!(loaded.stats.games_played, 4);
        assert_eq!(loaded.session.phase(), GamePhase::Start);
        assert!(loaded.session.daily().target_cities.is_empty());
    }
}
