//! Game-level configuration. All fields have defaults matching the classic
//! four-player, ten-second round.

use crate::error::ConfigError;
use crate::fireworks::FireworksConfig;
use crate::input::Button;

pub const MAX_PLAYERS: usize = 4;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerConfig {
    pub name: String,
    pub button: Button,
}

impl PlayerConfig {
    pub fn new(name: impl Into<String>, button: Button) -> Self {
        Self { name: name.into(), button }
    }
}

/// Whose taps a high score is measured against.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HighScoreMode {
    /// Total taps of all players against one stored record.
    #[default]
    Shared,
    /// Each player's taps against their own record.
    PerPlayer,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    pub round_secs: u32,
    pub start_button: Button,
    pub high_score_key: String,
    pub high_score_mode: HighScoreMode,
    pub players: Vec<PlayerConfig>,
    pub tap_fireworks: FireworksConfig,
    pub celebration: FireworksConfig,
    /// Fixed logic step in milliseconds.
    pub frame_ms: f64,
    pub canvas_id: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            round_secs: 10,
            start_button: Button::South,
            high_score_key: "highScore".to_owned(),
            high_score_mode: HighScoreMode::Shared,
            players: vec![
                PlayerConfig::new("😀", Button::North),
                PlayerConfig::new("😂", Button::East),
                PlayerConfig::new("😎", Button::South),
                PlayerConfig::new("😍", Button::West),
            ],
            tap_fireworks: FireworksConfig::default(),
            celebration: FireworksConfig::festive(),
            frame_ms: 1000.0 / 60.0,
            canvas_id: "game-canvas".to_owned(),
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.players.is_empty() || self.players.len() > MAX_PLAYERS {
            return Err(ConfigError::PlayerCount(self.players.len()));
        }
        if self.round_secs == 0 {
            return Err(ConfigError::RoundLength);
        }
        if !(self.frame_ms.is_finite() && self.frame_ms > 0.0) {
            return Err(ConfigError::FrameStep(self.frame_ms));
        }
        self.tap_fireworks.validate()?;
        self.celebration.validate()
    }

    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self, crate::error::AppError> {
        let cfg: GameConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }
}
