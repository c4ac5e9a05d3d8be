//! Daily game: session + lifetime stats + generator
//!
//! The single mutable record the UI reads after each action. Owns the
//! generator so a new day can be entered without outside help.

use serde::Serialize;

use crate::catalog::City;
use crate::consts::ROUNDS_PER_GAME;
use crate::daily::{DailyGenerator, DateKey};
use crate::error::{InvalidTransition, PersistenceError};
use crate::persistence::{self, SavedGame};
use crate::platform::Storage;
use crate::session::{GamePhase, GameSession, Guess, PlayerStats, RoundResult};
use crate::share;

/// Read-only view for the rendering layer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub date: Option<DateKey>,
    pub round: u8,
    pub total_rounds: u8,
    pub game_state: GamePhase,
    pub total_score: i32,
    pub round_score: i32,
    pub temp_guess: Option<Guess>,
    pub guess: Option<Guess>,
    pub hint_level: u8,
    pub hint_country: Option<String>,
    pub reveals_outlines: bool,
    pub last_distance_km: Option<u32>,
    pub target: Option<City>,
    pub reference: Option<City>,
    pub games_played: u32,
    pub high_score: i32,
    pub average_score: i64,
    pub is_new_high_score: bool,
}

#[derive(Debug, Clone)]
pub struct DailyGame {
    generator: DailyGenerator,
    session: GameSession,
    stats: PlayerStats,
}

impl DailyGame {
    /// Fresh install
    pub fn new(generator: DailyGenerator) -> Self {
        Self::from_saved(generator, SavedGame::default())
    }

    pub fn from_saved(generator: DailyGenerator, saved: SavedGame) -> Self {
        Self {
            generator,
            session: saved.session,
            stats: saved.stats,
        }
    }

    /// Restore from storage (fresh install if missing or corrupt)
    pub fn load(generator: DailyGenerator, storage: &impl Storage) -> Self {
        Self::from_saved(generator, persistence::load(storage))
    }

    pub fn save(&self, storage: &mut impl Storage) -> Result<(), PersistenceError> {
        persistence::save(storage, &self.session, &self.stats)
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn stats(&self) -> &PlayerStats {
        &self.stats
    }

    /// Enter `today`; true when a new day reset the session
    pub fn initialize(&mut self, today: &DateKey) -> bool {
        self.session.initialize(&mut self.stats, today, &self.generator)
    }

    pub fn start_game(&mut self) -> Result<(), InvalidTransition> {
        self.session.start_game()
    }

    pub fn set_temp_guess(&mut self, lat: f64, lng: f64) -> Result<(), InvalidTransition> {
        self.session.set_temp_guess(lat, lng)
    }

    pub fn use_hint(&mut self) -> Result<u8, InvalidTransition> {
        self.session.use_hint()
    }

    pub fn confirm_guess(&mut self) -> Result<RoundResult, InvalidTransition> {
        self.session.confirm_guess()
    }

    pub fn next_round(&mut self) -> Result<GamePhase, InvalidTransition> {
        self.session.next_round(&mut self.stats)
    }

    pub fn reset_game(&mut self) {
        self.session.reset_game();
    }

    /// Text for the share button, once today's game is finished
    pub fn share_text(&self) -> Option<String> {
        if self.session.phase() != GamePhase::Finished {
            return None;
        }
        let date = self.stats.last_played_date.as_ref()?;
        Some(share::share_text(self.session.total_score(), date))
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let session = &self.session;
        let finished = session.phase() == GamePhase::Finished;
        GameSnapshot {
            date: self.stats.last_played_date.clone(),
            round: session.round(),
            total_rounds: ROUNDS_PER_GAME,
            game_state: session.phase(),
            total_score: session.total_score(),
            round_score: session.round_score(),
            temp_guess: session.temp_guess(),
            guess: session.guess(),
            hint_level: session.hint_level(),
            hint_country: session.hint_country().map(str::to_string),
            reveals_outlines: session.reveals_outlines(),
            last_distance_km: session.last_distance_km(),
            target: session.current_target().cloned(),
            reference: session.current_reference().cloned(),
            games_played: self.stats.games_played,
            high_score: self.stats.high_score,
            average_score: self.stats.average_score(),
            is_new_high_score: finished && self.stats.is_new_high_score(session.total_score()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::platform::MemoryStorage;

    fn generator() -> DailyGenerator {
        DailyGenerator::new(Catalog::builtin().unwrap())
    }

    fn key(s: &str) -> DateKey {
        DateKey::parse(s).unwrap()
    }

    fn play_day(game: &mut DailyGame, day: &str) {
        game.initialize(&key(day));
        game.start_game().unwrap();
        for _ in 0..3 {
            let target = game.session().current_target().unwrap().clone();
            game.set_temp_guess(target.lat, target.lng).unwrap();
            game.confirm_guess().unwrap();
            game.next_round().unwrap();
        }
    }

    #[test]
    fn test_finished_day_survives_reload() {
        let mut storage = MemoryStorage::new();
        let mut game = DailyGame::new(generator());
        play_day(&mut game, "2024-01-01");
        game.save(&mut storage).unwrap();

        let mut reloaded = DailyGame::load(generator(), &storage);
        assert!(!reloaded.initialize(&key("2024-01-01")));
        assert_eq!(reloaded.session().phase(), GamePhase::Finished);
        assert_eq!(reloaded.start_game(), Err(InvalidTransition::AlreadyFinished));
        assert_eq!(reloaded.stats().games_played, 1);
    }

    #[test]
    fn test_next_day_playable_again() {
        let mut game = DailyGame::new(generator());
        play_day(&mut game, "2024-01-01");
        play_day(&mut game, "2024-01-02");
        assert_eq!(game.stats().games_played, 2);
        assert_eq!(game.stats().total_lifetime_score, 30000);
        assert!(game.snapshot().is_new_high_score);
    }

    #[test]
    fn test_share_text_only_when_finished() {
        let mut game = DailyGame::new(generator());
        game.initialize(&key("2024-01-01"));
        assert_eq!(game.share_text(), None);
        play_day(&mut game, "2024-01-01");
        let text = game.share_text().unwrap();
        assert!(text.contains("2024-01-01"));
        assert!(text.contains("15000"));
    }

    #[test]
    fn test_snapshot_reflects_hints() {
        let mut game = DailyGame::new(generator());
        game.initialize(&key("2024-01-01"));
        game.start_game().unwrap();
        let snap = game.snapshot();
        assert_eq!(snap.game_state, GamePhase::Playing);
        assert_eq!(snap.hint_country, None);
        assert!(snap.target.is_some() && snap.reference.is_some());
        assert_ne!(snap.target, snap.reference);

        game.use_hint().unwrap();
        let snap = game.snapshot();
        let country = snap.target.as_ref().map(|c| c.country.clone());
        assert!(country.is_some());
        assert_eq!(snap.hint_country, country);
        assert!(!snap.reveals_outlines);
    }

    #[test]
    fn test_snapshot_serializes_camel_case() {
        let mut game = DailyGame::new(generator());
        game.initialize(&key("2024-01-01"));
        let json = serde_json::to_value(game.snapshot()).unwrap();
        assert_eq!(json["gameState"], "start");
        assert_eq!(json["totalRounds"], 3);
        assert_eq!(json["date"], "2024-01-01");
    }
}
