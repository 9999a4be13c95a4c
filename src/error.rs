//! Error types shared by the engine, the party game and the browser layer.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Invalid configuration values. Raised by `validate()` on the config structs
/// and by a spawn that carries a bad burst config.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("gravity must be finite and non-negative, got {0}")]
    Gravity(f64),
    #[error("alpha decrement must be finite and positive, got {0}")]
    AlphaDecrement(f64),
    #[error("particle radius must be finite and positive, got {0}")]
    Radius(f64),
    #[error("speed must be finite and positive, got {0}")]
    Speed(f64),
    #[error("speed range [{min}, {max}) is empty or not finite")]
    SpeedRange { min: f64, max: f64 },
    #[error("lifespan range [{min}, {max}) must be non-empty and start above zero")]
    LifespanRange { min: u32, max: u32 },
    #[error("{what} must be within 0..=100 percent, got {value}")]
    Percentage { what: &'static str, value: f64 },
    #[error("expected 1..=4 players, got {0}")]
    PlayerCount(usize),
    #[error("round length must be at least one second")]
    RoundLength,
    #[error("frame step must be finite and positive, got {0}")]
    FrameStep(f64),
    #[error("burst of {0} particles exceeds the limit of {max}", max = crate::fireworks::MAX_BURST_PARTICLES)]
    ParticleCount(usize),
}

/// Rejected burst spawn. Existing particles are never touched when this is
/// returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpawnError {
    #[error("burst origin ({x}, {y}) is not finite")]
    NonFiniteOrigin { x: f64, y: f64 },
    #[error("burst particle count {0} is negative")]
    NegativeCount(i64),
    #[error("burst particle count {0} exceeds the limit of {max}", max = crate::fireworks::MAX_BURST_PARTICLES)]
    TooMany(i64),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// High score persistence failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("failed to write `{key}`: {reason}")]
    Write { key: String, reason: String },
}

/// Browser bootstrap and wasm boundary errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("no window")]
    NoWindow,
    #[error("no document")]
    NoDocument,
    #[error("element `{0}` is not a canvas")]
    NotCanvas(String),
    #[error("no 2d context on canvas `{0}`")]
    NoContext(String),
    #[error("game is not running")]
    NotRunning,
    #[error("javascript error: {0}")]
    Js(String),
    #[error(transparent)]
    Spawn(#[from] SpawnError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[cfg(feature = "serde_json")]
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<JsValue> for AppError {
    fn from(value: JsValue) -> Self {
        AppError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<AppError> for JsValue {
    fn from(err: AppError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
