//! Browser bindings for the rendering layer
//!
//! The globe/UI calls the transition methods on `WebGame` and re-reads
//! `snapshot()` afterwards. Every applied transition is saved to LocalStorage
//! (best effort); rejected ones are logged and otherwise ignored.

use wasm_bindgen::prelude::*;

use crate::catalog::Catalog;
use crate::daily::DailyGenerator;
use crate::error::InvalidTransition;
use crate::game::DailyGame;
use crate::platform::{self, LocalStorage};
use crate::settings::Settings;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Blind Globe starting...");
}

/// Load settings, resolve today's key (server time with fallback) and restore
/// or start today's game.
#[wasm_bindgen]
pub async fn load_game() -> Result<WebGame, JsValue> {
    let settings = Settings::load();
    let catalog = Catalog::builtin().map_err(|e| JsValue::from_str(&e.to_string()))?;
    let today = platform::today(&settings)
        .await
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let storage = LocalStorage::open();
    let mut game = DailyGame::load(DailyGenerator::new(catalog), &storage);
    game.initialize(&today);

    let mut web = WebGame { game, storage };
    web.persist();
    Ok(web)
}

/// Game handle owned by the page
#[wasm_bindgen]
pub struct WebGame {
    game: DailyGame,
    storage: LocalStorage,
}

#[wasm_bindgen]
impl WebGame {
    pub fn start_game(&mut self) {
        let result = self.game.start_game();
        self.after("start_game", result);
    }

    pub fn set_temp_guess(&mut self, lat: f64, lng: f64) {
        // Not persisted: the pending pin is ephemeral
        if let Err(e) = self.game.set_temp_guess(lat, lng) {
            log::debug!("set_temp_guess ignored: {}", e);
        }
    }

    pub fn use_hint(&mut self) {
        let result = self.game.use_hint().map(|_| ());
        self.after("use_hint", result);
    }

    pub fn confirm_guess(&mut self) {
        let result = self.game.confirm_guess().map(|r| {
            log::info!(
                "Round {}: {:.0} km, score {} (net {})",
                self.game.session().round(),
                r.distance_km,
                r.raw_score,
                r.net_score
            );
        });
        self.after("confirm_guess", result);
    }

    pub fn next_round(&mut self) {
        let result = self.game.next_round().map(|_| ());
        self.after("next_round", result);
    }

    pub fn reset_game(&mut self) {
        self.game.reset_game();
        self.persist();
    }

    /// Current state as JSON (`GameSnapshot`)
    pub fn snapshot(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.game.snapshot()).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Share text, or undefined before the day is finished
    pub fn share_text(&self) -> Option<String> {
        self.game.share_text()
    }

    /// 3D position on a globe of `radius` for a lat/lng (camera/pin placement)
    pub fn globe_position(lat: f32, lng: f32, radius: f32) -> Vec<f32> {
        crate::lat_lng_to_vector(lat, lng, radius).to_array().to_vec()
    }
}

impl WebGame {
    fn after(&mut self, action: &str, result: Result<(), InvalidTransition>) {
        match result {
            Ok(()) => self.persist(),
            Err(e) => log::debug!("{} ignored: {}", action, e),
        }
    }

    fn persist(&mut self) {
        if let Err(e) = self.game.save(&mut self.storage) {
            log::warn!("Failed to save game: {}", e);
        }
    }
}
