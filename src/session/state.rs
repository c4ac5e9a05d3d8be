//! Daily game session state machine
//!
//! `Start -> Playing -> Revealed -> Playing ... -> Finished`. Every transition
//! checks its preconditions before touching any field, so a rejected action
//! leaves the session exactly as it was.

use serde::{Deserialize, Serialize};

use super::scoring::{Guess, RoundResult, score_guess};
use super::stats::PlayerStats;
use crate::catalog::City;
use crate::consts::{MAX_HINT_LEVEL, ROUNDS_PER_GAME};
use crate::daily::{DailyGameData, DailyGenerator, DateKey};
use crate::error::InvalidTransition;

/// Current phase of the daily game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GamePhase {
    /// Intro screen, before the first round
    #[default]
    Start,
    /// Waiting for the player to place and confirm a pin
    Playing,
    /// Showing the round result
    Revealed,
    /// All rounds done for today
    Finished,
}

/// Round, score and hint state for one day's game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameSession {
    round: u8,
    total_score: i32,
    /// Raw guess score of the last confirmed round (before penalties)
    round_score: i32,
    #[serde(rename = "gameState")]
    phase: GamePhase,
    /// Pin placed but not yet confirmed
    #[serde(skip)]
    temp_guess: Option<Guess>,
    guess: Option<Guess>,
    hint_level: u8,
    last_distance_km: Option<u32>,
    #[serde(flatten)]
    daily: DailyGameData,
}

impl Default for GameSession {
    fn default() -> Self {
        Self {
            round: 1,
            total_score: 0,
            round_score: 0,
            phase: GamePhase::Start,
            temp_guess: None,
            guess: None,
            hint_level: 0,
            last_distance_km: None,
            daily: DailyGameData::default(),
        }
    }
}

impl GameSession {
    /// Fresh session at the start screen for the given cities
    pub fn new(daily: DailyGameData) -> Self {
        Self {
            daily,
            ..Self::default()
        }
    }

    pub fn round(&self) -> u8 {
        self.round
    }

    pub fn total_score(&self) -> i32 {
        self.total_score
    }

    pub fn round_score(&self) -> i32 {
        self.round_score
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn temp_guess(&self) -> Option<Guess> {
        self.temp_guess
    }

    pub fn guess(&self) -> Option<Guess> {
        self.guess
    }

    pub fn hint_level(&self) -> u8 {
        self.hint_level
    }

    pub fn last_distance_km(&self) -> Option<u32> {
        self.last_distance_km
    }

    pub fn daily(&self) -> &DailyGameData {
        &self.daily
    }

    pub fn current_target(&self) -> Option<&City> {
        self.daily.target(self.round)
    }

    pub fn current_reference(&self) -> Option<&City> {
        self.daily.reference(self.round)
    }

    /// Target's country, once the first hint is used
    pub fn hint_country(&self) -> Option<&str> {
        if self.hint_level >= 1 {
            self.current_target().map(|c| c.country.as_str())
        } else {
            None
        }
    }

    /// Whether the second hint (geographic outlines) is active
    pub fn reveals_outlines(&self) -> bool {
        self.hint_level >= MAX_HINT_LEVEL
    }

    /// Enter `today`. A new day regenerates the cities and resets the session;
    /// the same day leaves progress untouched. Returns true on a new-day reset.
    pub fn initialize(
        &mut self,
        stats: &mut PlayerStats,
        today: &DateKey,
        generator: &DailyGenerator,
    ) -> bool {
        if !stats.played_on(today) {
            log::info!(
                "New day {} (last played {:?}), resetting session",
                today,
                stats.last_played_date.as_ref().map(DateKey::as_str)
            );
            *self = Self::new(generator.generate(today));
            stats.last_played_date = Some(today.clone());
            return true;
        }

        // Same day, but the saved cities were lost: regenerate, keep progress
        if !self.daily.is_complete() {
            log::warn!("Daily data missing for {}, regenerating", today);
            self.daily = generator.generate(today);
        }
        false
    }

    /// Begin round 1. A finished day cannot be replayed.
    pub fn start_game(&mut self) -> Result<(), InvalidTransition> {
        if self.phase == GamePhase::Finished {
            return Err(InvalidTransition::AlreadyFinished);
        }
        self.clear_progress();
        self.phase = GamePhase::Playing;
        Ok(())
    }

    /// Place (or move) the pending pin. Coordinates must be finite and on the
    /// globe: lat in [-90, 90], lng in [-180, 180].
    pub fn set_temp_guess(&mut self, lat: f64, lng: f64) -> Result<(), InvalidTransition> {
        if self.phase != GamePhase::Playing {
            return Err(InvalidTransition::NotPlaying);
        }
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
            return Err(InvalidTransition::OffGlobe(lat, lng));
        }
        self.temp_guess = Some(Guess::new(lat, lng));
        Ok(())
    }

    /// Unlock the next hint tier for the pending round. Returns the new level.
    pub fn use_hint(&mut self) -> Result<u8, InvalidTransition> {
        // The penalty is charged at confirm time, so later hints would go unpaid
        if self.phase != GamePhase::Playing {
            return Err(InvalidTransition::NotPlaying);
        }
        if self.hint_level >= MAX_HINT_LEVEL {
            return Err(InvalidTransition::HintsExhausted);
        }
        self.hint_level += 1;
        Ok(self.hint_level)
    }

    /// Lock in the pending pin and score it against this round's target
    pub fn confirm_guess(&mut self) -> Result<RoundResult, InvalidTransition> {
        let guess = self.temp_guess.ok_or(InvalidTransition::NoPendingGuess)?;
        let target = self
            .current_target()
            .ok_or(InvalidTransition::MissingRound(self.round))?;

        let result = score_guess(target, guess, self.hint_level);

        self.guess = Some(guess);
        self.temp_guess = None;
        self.phase = GamePhase::Revealed;
        self.round_score = result.raw_score;
        self.total_score += result.net_score;
        self.last_distance_km = Some(result.distance_km.round() as u32);
        Ok(result)
    }

    /// Leave the result screen: next round, or finish and record stats
    pub fn next_round(&mut self, stats: &mut PlayerStats) -> Result<GamePhase, InvalidTransition> {
        if self.phase != GamePhase::Revealed {
            return Err(InvalidTransition::NotRevealed);
        }

        if self.round < ROUNDS_PER_GAME {
            self.round += 1;
            self.phase = GamePhase::Playing;
            self.guess = None;
            self.temp_guess = None;
            self.round_score = 0;
            self.hint_level = 0;
            self.last_distance_km = None;
        } else {
            self.phase = GamePhase::Finished;
            self.last_distance_km = None;
            stats.record_game(self.total_score);
        }
        Ok(self.phase)
    }

    /// Force back to the start screen. Keeps today's cities and stats.
    pub fn reset_game(&mut self) {
        self.clear_progress();
        self.phase = GamePhase::Start;
    }

    /// Field ranges hold (used to reject tampered or corrupt saves)
    pub(crate) fn is_consistent(&self) -> bool {
        (1..=ROUNDS_PER_GAME).contains(&self.round) && self.hint_level <= MAX_HINT_LEVEL
    }

    fn clear_progress(&mut self) {
        self.round = 1;
        self.total_score = 0;
        self.round_score = 0;
        self.temp_guess = None;
        self.guess = None;
        self.hint_level = 0;
        self.last_distance_km = None;
    }
}
