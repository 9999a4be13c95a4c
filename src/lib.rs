//! Tap Party core crate.
//!
//! Up to four players mash their mapped button during a short countdown; every
//! tap launches a burst of fireworks and the best round is kept as the high
//! score. Game rules (`party`), the particle engine (`fireworks`) and the HUD
//! layout are plain Rust and testable on the host; `app` wires them to the
//! browser canvas and input.

use wasm_bindgen::prelude::*;

mod app;
pub mod clock;
pub mod config;
pub mod error;
pub mod fireworks;
pub mod hud;
pub mod input;
pub mod logging;
pub mod party;
pub mod vec2;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    // Only fails if a logger is already installed, which is fine.
    logging::init(log::LevelFilter::Info).ok();
}

// -----------------------------------------------------------------------------
// JS entrypoints
// -----------------------------------------------------------------------------

#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    app::start(config::GameConfig::default()).map_err(Into::into)
}

/// Start with a JSON `GameConfig`; missing fields take their defaults.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_game_with_config(json: &str) -> Result<(), JsValue> {
    let cfg = config::GameConfig::from_json(json)?;
    app::start(cfg).map_err(Into::into)
}

/// Launch an extra burst from page script. Returns the particles spawned.
#[wasm_bindgen]
pub fn launch_fireworks(x: f64, y: f64, count: i32) -> Result<u32, JsValue> {
    let spawned = app::launch(x, y, i64::from(count))?;
    Ok(spawned as u32)
}
