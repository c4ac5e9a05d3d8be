//! Clock and trusted-time check
//!
//! The daily key normally comes from the server's `Date` header so a wrong
//! device clock can't pick another day's cities. Any failure falls back to the
//! local clock; the game is never blocked on the network.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::daily::{DateKey, date_key_for};
use crate::error::{ConfigError, TimeSourceError};
use crate::settings::{Settings, TrustSource};

/// Parse an HTTP `Date` header (IMF-fixdate, e.g. `Tue, 15 Nov 1994 08:12:31 GMT`)
pub fn parse_http_date(value: &str) -> Result<DateTime<Utc>, TimeSourceError> {
    DateTime::parse_from_rfc2822(value.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| TimeSourceError::MalformedDate(value.to_string()))
}

/// Pick the daily key from the trusted instant, or the local clock if the
/// trusted lookup failed.
pub fn resolve_date_key(
    tz: Tz,
    local_now: DateTime<Utc>,
    trusted: Result<DateTime<Utc>, TimeSourceError>,
) -> DateKey {
    match trusted {
        Ok(server_now) => date_key_for(server_now, tz),
        Err(err) => {
            log::warn!("Failed to fetch server time, falling back to local time: {}", err);
            date_key_for(local_now, tz)
        }
    }
}

/// Fetch the server's idea of "now" with a HEAD request to the current page
#[cfg(target_arch = "wasm32")]
pub async fn fetch_server_time(timeout_ms: u32) -> Result<DateTime<Utc>, TimeSourceError> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;

    let window = web_sys::window().ok_or(TimeSourceError::Unsupported)?;
    let url = window
        .location()
        .href()
        .map_err(|e| TimeSourceError::Network(format!("{:?}", e)))?;

    let init = web_sys::RequestInit::new();
    init.set_method("HEAD");
    init.set_cache(web_sys::RequestCache::NoStore);
    let signal = web_sys::AbortSignal::timeout_with_u32(timeout_ms);
    init.set_signal(Some(&signal));

    let response = JsFuture::from(window.fetch_with_str_and_init(&url, &init))
        .await
        .map_err(|e| TimeSourceError::Network(format!("{:?}", e)))?;
    let response: web_sys::Response = response
        .dyn_into()
        .map_err(|_| TimeSourceError::Network("fetch did not return a Response".to_string()))?;

    if !response.ok() {
        return Err(TimeSourceError::Status(response.status()));
    }

    let header = response
        .headers()
        .get("Date")
        .map_err(|e| TimeSourceError::Network(format!("{:?}", e)))?
        .ok_or(TimeSourceError::MissingDateHeader)?;
    parse_http_date(&header)
}

/// Today's daily key per `settings` (web: may consult the server)
#[cfg(target_arch = "wasm32")]
pub async fn today(settings: &Settings) -> Result<DateKey, ConfigError> {
    let tz = settings.tz()?;
    let trusted = match settings.trust_source {
        TrustSource::Local => return Ok(date_key_for(Utc::now(), tz)),
        TrustSource::RemoteWithFallback => fetch_server_time(settings.time_check_timeout_ms).await,
    };
    Ok(resolve_date_key(tz, Utc::now(), trusted))
}

/// Today's daily key per `settings` (native: local clock only)
#[cfg(not(target_arch = "wasm32"))]
pub fn today(settings: &Settings) -> Result<DateKey, ConfigError> {
    let tz = settings.tz()?;
    let trusted = match settings.trust_source {
        TrustSource::Local => return Ok(date_key_for(Utc::now(), tz)),
        TrustSource::RemoteWithFallback => Err(TimeSourceError::Unsupported),
    };
    Ok(resolve_date_key(tz, Utc::now(), trusted))
}
