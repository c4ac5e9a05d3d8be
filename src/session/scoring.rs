//! Distance scoring and hint penalties

use serde::{Deserialize, Serialize};

use crate::catalog::City;
use crate::consts::*;

/// A pin placed on the globe
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Guess {
    pub lat: f64,
    pub lng: f64,
}

impl Guess {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Feedback tier for a round's raw score (drives the result effect color)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreBand {
    /// Above 4000
    Great,
    /// Above 2000
    Good,
    Poor,
}

impl ScoreBand {
    pub fn from_score(score: i32) -> Self {
        if score > 4000 {
            ScoreBand::Great
        } else if score > 2000 {
            ScoreBand::Good
        } else {
            ScoreBand::Poor
        }
    }
}

/// Outcome of a confirmed guess
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoundResult {
    pub distance_km: f64,
    /// Score from distance alone
    pub raw_score: i32,
    /// Total hint penalty
    pub penalty: i32,
    /// `raw_score - penalty`, may be negative
    pub net_score: i32,
    pub band: ScoreBand,
}

/// Raw score for a guess `distance_km` away from the target.
///
/// Flat maximum inside the perfect radius, then linear falloff reaching zero
/// at `PERFECT_RADIUS_KM + SCORE_FALLOFF_KM`.
pub fn raw_guess_score(distance_km: f64) -> i32 {
    if distance_km < PERFECT_RADIUS_KM {
        return MAX_ROUND_SCORE;
    }
    let fraction = 1.0 - (distance_km - PERFECT_RADIUS_KM) / SCORE_FALLOFF_KM;
    let score = (f64::from(MAX_ROUND_SCORE) * fraction).round();
    // Saturating cast; NaN becomes 0
    (score as i32).max(0)
}

/// Cumulative penalty for the hints used this round
pub fn hint_penalty(hint_level: u8) -> i32 {
    let mut penalty = 0;
    if hint_level >= 1 {
        penalty += HINT_PENALTY_COUNTRY;
    }
    if hint_level >= 2 {
        penalty += HINT_PENALTY_OUTLINES;
    }
    penalty
}

/// Score a guess against a target
pub fn score_guess(target: &City, guess: Guess, hint_level: u8) -> RoundResult {
    let distance_km = target.distance_km(guess.lat, guess.lng);
    let raw_score = raw_guess_score(distance_km);
    let penalty = hint_penalty(hint_level);
    RoundResult {
        distance_km,
        raw_score,
        penalty,
        net_score: raw_score - penalty,
        band: ScoreBand::from_score(raw_score),
    }
}
