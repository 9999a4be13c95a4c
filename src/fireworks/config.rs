use rand::Rng;

use super::MAX_BURST_PARTICLES;
use super::color::ColorPolicy;
use crate::error::ConfigError;

/// Initial particle speed in pixels per frame.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpeedPolicy {
    Fixed(f64),
    /// Uniform in [min, max).
    Uniform { min: f64, max: f64 },
}

impl SpeedPolicy {
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match *self {
            SpeedPolicy::Fixed(speed) => speed,
            SpeedPolicy::Uniform { min, max } => rng.gen_range(min..max),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            SpeedPolicy::Fixed(speed) if !(speed.is_finite() && speed > 0.0) => {
                Err(ConfigError::Speed(speed))
            }
            SpeedPolicy::Uniform { min, max }
                if !(min.is_finite() && max.is_finite() && min >= 0.0 && min < max) =>
            {
                Err(ConfigError::SpeedRange { min, max })
            }
            _ => Ok(()),
        }
    }
}

/// Frame countdown range for the optional lifespan, [min, max).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LifespanRange {
    pub min: u32,
    pub max: u32,
}

impl LifespanRange {
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        rng.gen_range(self.min..self.max)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min == 0 || self.min >= self.max {
            return Err(ConfigError::LifespanRange { min: self.min, max: self.max });
        }
        Ok(())
    }
}

/// Everything one burst needs: how many particles, their color and speed
/// policy, and the per-frame physics they carry for their whole life.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FireworksConfig {
    pub particle_count: usize,
    pub color: ColorPolicy,
    pub speed: SpeedPolicy,
    /// Added to vy every frame.
    pub gravity: f64,
    /// Subtracted from alpha every frame.
    pub alpha_decrement: f64,
    pub radius: f64,
    /// `None` means particles live until their alpha runs out.
    pub lifespan: Option<LifespanRange>,
}

impl Default for FireworksConfig {
    /// The white tap burst: 30 particles at speed 5 that fade out in 50 frames.
    fn default() -> Self {
        Self {
            particle_count: 30,
            color: ColorPolicy::default(),
            speed: SpeedPolicy::Fixed(5.0),
            gravity: 0.1,
            alpha_decrement: 0.02,
            radius: 2.0,
            lifespan: None,
        }
    }
}

impl FireworksConfig {
    /// Colorful, longer lived burst with a random hue per burst and a tracked
    /// lifespan.
    pub fn festive() -> Self {
        Self {
            particle_count: 100,
            color: ColorPolicy::RandomHue { saturation: 100.0, lightness: 50.0 },
            speed: SpeedPolicy::Uniform { min: 2.0, max: 5.0 },
            gravity: 0.05,
            alpha_decrement: 0.01,
            radius: 2.0,
            lifespan: Some(LifespanRange { min: 50, max: 100 }),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.particle_count > MAX_BURST_PARTICLES {
            return Err(ConfigError::ParticleCount(self.particle_count));
        }
        if !(self.gravity.is_finite() && self.gravity >= 0.0) {
            return Err(ConfigError::Gravity(self.gravity));
        }
        if !(self.alpha_decrement.is_finite() && self.alpha_decrement > 0.0) {
            return Err(ConfigError::AlphaDecrement(self.alpha_decrement));
        }
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(ConfigError::Radius(self.radius));
        }
        self.speed.validate()?;
        self.color.validate()?;
        if let Some(lifespan) = &self.lifespan {
            lifespan.validate()?;
        }
        Ok(())
    }
}
