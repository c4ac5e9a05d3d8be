//! Game session: round lifecycle, scoring and lifetime stats
//!
//! Pure state transitions with no rendering or platform dependencies.
//! Rejected actions return `InvalidTransition` and never mutate state.

pub mod scoring;
pub mod state;
pub mod stats;

pub use scoring::{Guess, RoundResult, ScoreBand, hint_penalty, raw_guess_score, score_guess};
pub use state::{GamePhase, GameSession};
pub use stats::PlayerStats;
