//! The meteor canvas effect.
//!
//! A glowing half-circle head with a gradient tail rides a braille-dot
//! canvas while a swarm of spark particles climbs away on endlessly
//! repeating tweens. Meteors built with collision enabled run a shrink,
//! pause and re-arm sequence when the flight hosting them ends.

mod color;
mod draw;
mod effect;
mod gradient;
mod particle;
mod tween;

pub use color::hsl_to_rgb;
pub use draw::MeteorShape;
pub use effect::MeteorEffect;
pub use gradient::{Gradient, GradientStop};
pub use particle::{Particle, ParticleState};
pub use tween::{Easing, Motion, Tween};
