//! Calendar-day keys
//!
//! The daily key is the only entropy source for a day's game, so two instants
//! share a key iff they fall on the same civil day in the configured zone.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const KEY_FORMAT: &str = "%Y-%m-%d";

/// A civil calendar day, formatted `YYYY-MM-DD`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateKey(String);

impl DateKey {
    /// Parse a `YYYY-MM-DD` string (zero-padded, a real calendar date)
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let date = NaiveDate::parse_from_str(s, KEY_FORMAT)
            .map_err(|_| ConfigError::MalformedDateKey(s.to_string()))?;
        let key = Self::from_date(date);
        // Reject unpadded forms like 2024-1-2 so each day has exactly one key
        if key.0 != s {
            return Err(ConfigError::MalformedDateKey(s.to_string()));
        }
        Ok(key)
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.format(KEY_FORMAT).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 64-bit RNG seed (FNV-1a over the key bytes)
    pub fn seed(&self) -> u64 {
        const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
        const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;
        self.0.bytes().fold(FNV_OFFSET, |hash, byte| {
            (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
        })
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Project an instant onto the civil calendar of `tz`
pub fn date_key_for(now: DateTime<Utc>, tz: Tz) -> DateKey {
    DateKey::from_date(now.with_timezone(&tz).date_naive())
}
