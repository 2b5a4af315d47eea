//! Spark particles trailing the meteor head.

use crate::tween::Motion;

/// Lifecycle of a spark across a collision sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleState {
    /// Animating normally.
    Alive,
    /// Marked to die at its next motion cycle boundary.
    Dying,
    /// Motion cancelled, drawn fully transparent.
    Dead,
}

/// A single spark.
#[derive(Debug, Clone)]
pub struct Particle {
    /// Horizontal position in dots.
    pub x: f32,
    /// Vertical position in dots.
    pub y: f32,
    /// Diameter in dots.
    pub size: f32,
    /// Lifecycle state.
    pub state: ParticleState,
    /// Handle to the repeating motion; `None` once cancelled.
    pub motion: Option<Motion>,
}

impl Particle {
    /// Create a spark at a position, not yet in motion.
    pub fn new(x: f32, y: f32, size: f32) -> Self {
        Self {
            x,
            y,
            size,
            state: ParticleState::Alive,
            motion: None,
        }
    }

    /// Whether the spark is drawn transparent.
    pub fn is_dead(&self) -> bool {
        self.state == ParticleState::Dead
    }
}
