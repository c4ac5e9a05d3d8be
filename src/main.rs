//! Blind Globe entry point
//!
//! On web the game is driven from JS through `blind_globe::web`. Natively this
//! is a terminal version of today's game for playtesting the daily cities.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::error::Error;
    use std::io::{self, BufRead, Write};

    use blind_globe::daily::DailyGenerator;
    use blind_globe::platform::{self, FileStorage};
    use blind_globe::{Catalog, DailyGame, DateKey, GamePhase, Settings};

    const HELP: &str = "commands: start | <lat>,<lng> | hint | next | reset | share | state | quit";

    pub fn run() -> Result<(), Box<dyn Error>> {
        let settings = Settings::load();
        let today = match std::env::args().nth(1) {
            Some(arg) => DateKey::parse(&arg)?,
            None => platform::today(&settings)?,
        };
        let data_dir =
            std::env::var("BLIND_GLOBE_DATA_DIR").unwrap_or_else(|_| ".blind-globe".to_string());

        let mut storage = FileStorage::new(data_dir);
        let generator = DailyGenerator::new(Catalog::builtin()?);
        let mut game = DailyGame::load(generator, &storage);
        if game.initialize(&today) {
            log::info!("New daily game for {}", today);
        }
        game.save(&mut storage)?;

        println!("Blind Globe - {} ({})", today, settings.timezone);
        println!("{HELP}");
        describe(&game);

        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = line?;
            let command = line.trim();
            let changed = match command {
                "" => false,
                "quit" | "exit" => break,
                "start" => report(game.start_game()),
                "hint" => report(game.use_hint().map(|_| ())),
                "next" => report(game.next_round().map(|_| ())),
                "reset" => {
                    game.reset_game();
                    true
                }
                "share" => {
                    match game.share_text() {
                        Some(text) => println!("{text}"),
                        None => println!("Finish today's game first."),
                    }
                    false
                }
                "state" => {
                    println!("{}", serde_json::to_string_pretty(&game.snapshot())?);
                    false
                }
                guess => match parse_guess(guess) {
                    Some((lat, lng)) => {
                        report(game.set_temp_guess(lat, lng)) && confirm(&mut game)
                    }
                    None => {
                        println!("{HELP}");
                        false
                    }
                },
            };

            if changed {
                if let Err(e) = game.save(&mut storage) {
                    log::warn!("Failed to save game: {}", e);
                }
                describe(&game);
            }
            io::stdout().flush()?;
        }
        Ok(())
    }

    fn parse_guess(input: &str) -> Option<(f64, f64)> {
        let (lat, lng) = input.split_once(',')?;
        Some((lat.trim().parse().ok()?, lng.trim().parse().ok()?))
    }

    fn confirm(game: &mut DailyGame) -> bool {
        match game.confirm_guess() {
            Ok(result) => {
                println!(
                    "{:.0} km away: {} points, -{} hints = {}",
                    result.distance_km, result.raw_score, result.penalty, result.net_score
                );
                true
            }
            Err(e) => {
                println!("({e})");
                false
            }
        }
    }

    fn report<E: std::fmt::Display>(result: Result<(), E>) -> bool {
        match result {
            Ok(()) => true,
            Err(e) => {
                println!("({e})");
                false
            }
        }
    }

    fn describe(game: &DailyGame) {
        let snap = game.snapshot();
        match snap.game_state {
            GamePhase::Start => {
                println!(
                    "Played {} | Best {} | Avg {}. Type `start` to play.",
                    snap.games_played, snap.high_score, snap.average_score
                );
            }
            GamePhase::Playing => {
                let reference = snap.reference.as_ref().map_or("?", |c| c.name.as_str());
                let target = snap.target.as_ref().map_or("?", |c| c.name.as_str());
                println!(
                    "Round {}/{} | Score {} | From {}, find {}",
                    snap.round, snap.total_rounds, snap.total_score, reference, target
                );
                if let Some(country) = &snap.hint_country {
                    println!("Hint: it's in {country}");
                }
            }
            GamePhase::Revealed => {
                if let Some(target) = &snap.target {
                    println!(
                        "{} was at {:.2}, {:.2}. Type `next`.",
                        target.name, target.lat, target.lng
                    );
                }
            }
            GamePhase::Finished => {
                if snap.is_new_high_score {
                    println!("New high score!");
                }
                println!(
                    "Final score {} | Played {} | Best {} | Avg {}. Come back tomorrow!",
                    snap.total_score, snap.games_played, snap.high_score, snap.average_score
                );
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Blind Globe (native) starting...");

    if let Err(e) = native::run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is blind_globe::web::wasm_start, this is just to satisfy the compiler
}
