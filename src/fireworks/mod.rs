//! Particle burst engine behind the tap fireworks.
//!
//! A burst is a one-shot spawn of N particles from a single origin. Particles
//! live in one shared live set which the host advances once per fixed frame
//! and renders once per animation frame. Each particle fades by a constant
//! alpha step, falls under a constant gravity and optionally counts down a
//! frame lifespan; it is culled as soon as either runs out.
//!
//! ```
//! use rand::SeedableRng;
//! use tap_party::fireworks::{FireworksConfig, FireworksEngine};
//! use tap_party::vec2::Vec2;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let mut engine = FireworksEngine::new();
//! engine.spawn_burst(Vec2::new(100.0, 100.0), &FireworksConfig::default(), &mut rng).unwrap();
//! assert_eq!(engine.len(), 30);
//! for _ in 0..50 {
//!     engine.advance();
//! }
//! assert!(engine.is_empty());
//! ```

mod color;
mod config;
mod surface;

pub use color::{Color, ColorPolicy};
pub use config::{FireworksConfig, LifespanRange, SpeedPolicy};
pub use surface::DrawSurface;

use std::f64::consts::TAU;

use rand::Rng;

use crate::error::SpawnError;
use crate::vec2::Vec2;

/// Largest burst a single spawn accepts.
pub const MAX_BURST_PARTICLES: usize = 10_000;

/// One fading point. Only the engine creates, moves or removes particles.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub gravity: f64,
    pub alpha: f64,
    pub alpha_decrement: f64,
    pub color: Color,
    pub radius: f64,
    /// Frames left when lifespan tracking is on.
    pub remaining_life: Option<u32>,
}

impl Particle {
    fn step(&mut self) {
        self.position += self.velocity;
        self.velocity.y += self.gravity;
        self.alpha -= self.alpha_decrement;
        if let Some(life) = self.remaining_life.as_mut() {
            *life = life.saturating_sub(1);
        }
    }

    pub fn is_expired(&self) -> bool {
        self.alpha <= 0.0 || self.remaining_life == Some(0)
    }
}

/// Owns the live particle set.
#[derive(Debug, Default)]
pub struct FireworksEngine {
    particles: Vec<Particle>,
}

impl FireworksEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn `config.particle_count` particles at `origin`. The burst color is
    /// drawn once; angle, speed and lifespan are drawn per particle in that
    /// order. Returns the number of particles added.
    pub fn spawn_burst<R: Rng + ?Sized>(
        &mut self,
        origin: Vec2,
        config: &FireworksConfig,
        rng: &mut R,
    ) -> Result<usize, SpawnError> {
        if !origin.is_finite() {
            return Err(SpawnError::NonFiniteOrigin { x: origin.x, y: origin.y });
        }
        config.validate()?;
        if config.particle_count == 0 {
            return Ok(0);
        }

        let color = config.color.pick(rng);
        self.particles.reserve(config.particle_count);
        for _ in 0..config.particle_count {
            let angle = rng.gen_range(0.0..TAU);
            let speed = config.speed.sample(rng);
            let remaining_life = config.lifespan.map(|range| range.sample(rng));
            self.particles.push(Particle {
                position: origin,
                velocity: Vec2::from_polar(angle, speed),
                gravity: config.gravity,
                alpha: 1.0,
                alpha_decrement: config.alpha_decrement,
                color: color.clone(),
                radius: config.radius,
                remaining_life,
            });
        }
        log::trace!(
            "burst of {} at ({:.1}, {:.1}), {} live",
            config.particle_count,
            origin.x,
            origin.y,
            self.particles.len()
        );
        Ok(config.particle_count)
    }

    /// Move every particle one frame, then cull the expired ones. Returns how
    /// many were culled.
    pub fn advance(&mut self) -> usize {
        if self.particles.is_empty() {
            return 0;
        }
        for p in &mut self.particles {
            p.step();
        }
        let before = self.particles.len();
        self.particles.retain(|p| !p.is_expired());
        before - self.particles.len()
    }

    /// Draw every live particle. Does not touch particle state.
    pub fn render<S: DrawSurface + ?Sized>(&self, surface: &mut S) {
        for p in &self.particles {
            surface.save();
            surface.set_global_alpha(p.alpha);
            surface.set_fill_color(&p.color);
            surface.fill_circle(p.position, p.radius);
            surface.restore();
        }
    }

    /// Live particles in insertion order.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

/// Convert a host-supplied signed count, rejecting negatives and counts above
/// [`MAX_BURST_PARTICLES`].
pub fn particle_count(count: i64) -> Result<usize, SpawnError> {
    let n = usize::try_from(count).map_err(|_| SpawnError::NegativeCount(count))?;
    if n > MAX_BURST_PARTICLES {
        return Err(SpawnError::TooMany(count));
    }
    Ok(n)
}
