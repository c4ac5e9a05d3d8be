//! Lifetime player statistics
//!
//! Survives across daily sessions. Updated exactly once per finished game.

use serde::{Deserialize, Serialize};

use crate::daily::DateKey;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlayerStats {
    pub games_played: u32,
    pub high_score: i32,
    pub total_lifetime_score: i64,
    /// Day of the current session; `None` on a fresh install
    pub last_played_date: Option<DateKey>,
}

impl PlayerStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a finished game's total into the stats
    pub fn record_game(&mut self, total_score: i32) {
        self.games_played += 1;
        self.high_score = self.high_score.max(total_score);
        self.total_lifetime_score += i64::from(total_score);
        log::info!(
            "Game finished: score {} (played {}, best {})",
            total_score,
            self.games_played,
            self.high_score
        );
    }

    /// Rounded mean score per game (0 before the first game)
    pub fn average_score(&self) -> i64 {
        if self.games_played == 0 {
            return 0;
        }
        (self.total_lifetime_score as f64 / f64::from(self.games_played)).round() as i64
    }

    /// Whether a just-recorded `total_score` is a new best.
    ///
    /// The first game never counts as a new high score.
    pub fn is_new_high_score(&self, total_score: i32) -> bool {
        total_score >= self.high_score && self.games_played > 1
    }

    /// Whether the stored session belongs to `today`
    pub fn played_on(&self, today: &DateKey) -> bool {
        self.last_played_date.as_ref() == Some(today)
    }
}
