//! Game settings
//!
//! Which timezone defines "today" and whether to trust the server clock.
//! Read from LocalStorage on web (separate from the game blob); read from
//! environment variables on native.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Where the current instant comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TrustSource {
    /// Local device clock only
    Local,
    /// Server `Date` header, falling back to the local clock on any failure
    #[default]
    RemoteWithFallback,
}

impl TrustSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrustSource::Local => "local",
            TrustSource::RemoteWithFallback => "remote",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "local" => Some(TrustSource::Local),
            "remote" | "remote-with-fallback" | "server" => Some(TrustSource::RemoteWithFallback),
            _ => None,
        }
    }
}

/// Daily-key configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// IANA timezone whose midnight starts a new daily game
    pub timezone: String,
    pub trust_source: TrustSource,
    /// Upper bound on the trusted-time request
    pub time_check_timeout_ms: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timezone: "America/Denver".to_string(),
            trust_source: TrustSource::RemoteWithFallback,
            time_check_timeout_ms: 3000,
        }
    }
}

impl Settings {
    /// Resolve the configured timezone
    pub fn tz(&self) -> Result<Tz, ConfigError> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| ConfigError::UnknownTimezone(self.timezone.clone()))
    }

    /// Apply overrides from a variable lookup (`BLIND_GLOBE_*`).
    /// Unparseable values are ignored with a warning.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(tz) = lookup("BLIND_GLOBE_TZ") {
            self.timezone = tz;
        }
        if let Some(source) = lookup("BLIND_GLOBE_TRUST_SOURCE") {
            match TrustSource::from_str(&source) {
                Some(source) => self.trust_source = source,
                None => log::warn!("Ignoring unknown trust source {:?}", source),
            }
        }
        if let Some(timeout) = lookup("BLIND_GLOBE_TIME_TIMEOUT_MS") {
            match timeout.parse() {
                Ok(ms) => self.time_check_timeout_ms = ms,
                Err(_) => log::warn!("Ignoring invalid timeout {:?}", timeout),
            }
        }
        self
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "blind-globe-settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Load settings from the process environment (native)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default().with_overrides(|name| std::env::var(name).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_timezone_resolves() {
        assert_eq!(Settings::default().tz().unwrap(), chrono_tz::America::Denver);
    }

    #[test]
    fn test_unknown_timezone() {
        let settings = Settings {
            timezone: "Mars/Olympus_Mons".to_string(),
            ..Settings::default()
        };
        assert_eq!(
            settings.tz().unwrap_err(),
            ConfigError::UnknownTimezone("Mars/Olympus_Mons".to_string())
        );
    }

    #[test]
    fn test_trust_source_round_trip() {
        for source in [TrustSource::Local, TrustSource::RemoteWithFallback] {
            assert_eq!(TrustSource::from_str(source.as_str()), Some(source));
        }
        assert_eq!(TrustSource::from_str("LOCAL"), Some(TrustSource::Local));
        assert_eq!(TrustSource::from_str("ntp"), None);
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("BLIND_GLOBE_TZ", "Europe/London"),
            ("BLIND_GLOBE_TRUST_SOURCE", "local"),
            ("BLIND_GLOBE_TIME_TIMEOUT_MS", "not a number"),
        ]
        .into_iter()
        .collect();
        let settings =
            Settings::default().with_overrides(|name| vars.get(name).map(|v| v.to_string()));
        assert_eq!(settings.timezone, "Europe/London");
        assert_eq!(settings.trust_source, TrustSource::Local);
        assert_eq!(settings.time_check_timeout_ms, 3000);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"timezone":"Asia/Tokyo"}"#).unwrap();
        assert_eq!(settings.timezone, "Asia/Tokyo");
        assert_eq!(settings.trust_source, TrustSource::RemoteWithFallback);
    }
}
