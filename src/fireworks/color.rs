use std::fmt;

use rand::Rng;

use crate::error::ConfigError;

/// Renderer-defined particle color. `Display` yields a CSS color string that
/// the canvas accepts as a fill style.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Color {
    /// Any CSS color literal ("white", "#ff0", "rgb(..)").
    Css(String),
    /// Hue in degrees, saturation and lightness in percent.
    Hsl { hue: f64, saturation: f64, lightness: f64 },
}

impl Color {
    pub fn css(value: impl Into<String>) -> Self {
        Color::Css(value.into())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Css(s) => f.write_str(s),
            Color::Hsl { hue, saturation, lightness } => {
                write!(f, "hsl({hue:.1}, {saturation}%, {lightness}%)")
            }
        }
    }
}

/// How a burst picks its color. The color is chosen once per burst, never per
/// particle.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ColorPolicy {
    Fixed(Color),
    /// Hue uniform in [0, 360).
    RandomHue { saturation: f64, lightness: f64 },
}

impl Default for ColorPolicy {
    fn default() -> Self {
        ColorPolicy::Fixed(Color::css("white"))
    }
}

impl ColorPolicy {
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Color {
        match self {
            ColorPolicy::Fixed(c) => c.clone(),
            ColorPolicy::RandomHue { saturation, lightness } => Color::Hsl {
                hue: rng.gen_range(0.0..360.0),
                saturation: *saturation,
                lightness: *lightness,
            },
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let ColorPolicy::RandomHue { saturation, lightness } = self {
            percentage("saturation", *saturation)?;
            percentage("lightness", *lightness)?;
        }
        Ok(())
    }
}

fn percentage(what: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=100.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Percentage { what, value })
    }
}
