//! Meteor effect state and the collision sequence.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use yuseong_core::{DotScale, MeteorOptions};

use crate::gradient::Gradient;
use crate::particle::{Particle, ParticleState};
use crate::tween::{Easing, Motion, Tween};

/// Bounds for the number of sparks rolled at construction.
const MIN_PARTICLES: usize = 20;
const MAX_PARTICLES: usize = 100;

/// Smallest spark diameter in cells.
const MIN_SPARK_SIZE: f32 = 1.0;
/// Spark diameter cap as a multiple of the head width.
const SPARK_SIZE_FACTOR: f32 = 1.25;
/// Snap increment for rolled spark diameters, in cells.
const SPARK_SIZE_SNAP: f32 = 0.5;

/// Motion delay roll range in seconds; negative values start ahead.
const DELAY_RANGE: (f32, f32) = (-5.0, 0.0);
/// Motion duration roll range in seconds.
const DURATION_RANGE: (f32, f32) = (0.1, 5.0);
/// Longest pause between motion cycles, in seconds.
const MAX_REPEAT_DELAY: f32 = 1.0;

/// Seconds the head and tail take to shrink away after a collision.
const SHRINK_SECS: f32 = 0.5;
/// Seconds after the shrink before the sparks are re-armed.
const RECOVERY_DELAY_SECS: f32 = 2.0;

/// Progress of the collision sequence.
#[derive(Debug, Clone)]
enum CollisionPhase {
    /// No sequence running.
    Normal,
    /// Head and tail shrinking to nothing.
    Shrinking { length: Tween, width: Tween },
    /// Waiting out the delay before the sparks return.
    Recovering { remaining: f32 },
}

/// A meteor: glowing head, gradient tail, and a swarm of sparks on an
/// endlessly repeating climb toward the top of the canvas.
#[derive(Debug)]
pub struct MeteorEffect {
    /// Construction options; `length` and `width` stay live.
    options: MeteorOptions,
    /// Pane width in cells.
    cols: u16,
    /// Pane height in cells.
    rows: u16,
    /// Dot resolution of the drawing surface.
    scale: DotScale,
    /// Surface size in dots.
    surface: (u16, u16),
    /// Collision latch, true only during the collision window.
    collided: bool,
    /// Fill for the head and tail.
    gradient: Gradient,
    /// Fill for the sparks.
    spark_gradient: Gradient,
    /// The spark swarm; created once, re-armed in place.
    particles: Vec<Particle>,
    /// Collision sequence progress.
    phase: CollisionPhase,
    /// Source of all randomness in the effect.
    rng: StdRng,
}

impl MeteorEffect {
    /// Create an effect for a pane of the given cell size.
    pub fn new(options: MeteorOptions, cols: u16, rows: u16, scale: DotScale) -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        Self::seeded(options, cols, rows, scale, seed)
    }

    /// Create an effect with a fixed random seed.
    pub fn seeded(
        options: MeteorOptions,
        cols: u16,
        rows: u16,
        scale: DotScale,
        seed: u64,
    ) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let count = rng.gen_range(MIN_PARTICLES..=MAX_PARTICLES);
        let surface = scale.surface(cols, rows);
        let mut effect = Self {
            options,
            cols,
            rows,
            scale,
            surface,
            collided: false,
            gradient: Gradient::meteor(),
            spark_gradient: Gradient::spark(),
            particles: Vec::with_capacity(count),
            phase: CollisionPhase::Normal,
            rng,
        };
        effect.gen_particles(count);
        effect.set_particles_motion();
        effect
    }

    /// Advance the effect clock by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }
        self.update_collision(dt);
        self.update_particles(dt);
    }

    /// Flight-end signal from the pane hosting this meteor.
    ///
    /// Ignored unless the effect was built with `collision` enabled.
    /// Opens the collision window: the head and tail shrink away over
    /// half a second, sparks die at their own cycle boundaries, and the
    /// swarm is re-armed two seconds after the shrink completes.
    pub fn on_animation_end(&mut self) {
        if !self.options.collision {
            return;
        }
        self.collided = true;
        for particle in &mut self.particles {
            if particle.state == ParticleState::Alive {
                particle.state = ParticleState::Dying;
            }
        }
        self.phase = CollisionPhase::Shrinking {
            length: Tween::new(self.options.length, 0.0, SHRINK_SECS, Easing::QuadOut),
            width: Tween::new(self.options.width, 0.0, SHRINK_SECS, Easing::QuadOut),
        };
    }

    /// Adopt a new pane size, rebuilding the surface and re-arming the
    /// swarm. A no-op when the size is unchanged.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        if cols == self.cols && rows == self.rows {
            return;
        }
        self.cols = cols;
        self.rows = rows;
        self.surface = self.scale.surface(cols, rows);
        self.set_particles_motion();
    }

    /// Arm (or re-arm) every spark's repeating motion.
    ///
    /// Sparks return to the canvas center and come back to life; a size
    /// that decayed to zero is re-rolled. Destinations are rolled once
    /// here, never per cycle.
    pub fn set_particles_motion(&mut self) {
        let (cx, cy) = self.center();
        let w = self.surface.0 as f32;
        for i in 0..self.particles.len() {
            let target_x = snap(self.rng.gen_range(w * 0.25..=w * 0.75), 1.0);
            let delay = self.rng.gen_range(DELAY_RANGE.0..DELAY_RANGE.1);
            let duration = self.rng.gen_range(DURATION_RANGE.0..=DURATION_RANGE.1);
            let repeat_delay = self.rng.gen_range(0.0..MAX_REPEAT_DELAY);
            let regen = if self.particles[i].size == 0.0 {
                Some(self.roll_spark_size())
            } else {
                None
            };

            let particle = &mut self.particles[i];
            particle.x = cx;
            particle.y = cy;
            particle.state = ParticleState::Alive;
            if let Some(size) = regen {
                particle.size = size;
            }
            particle.motion = Some(Motion::new(
                (cx, cy, particle.size),
                (target_x, 0.0, 0.0),
                delay,
                duration,
                repeat_delay,
                Easing::QuartOut,
            ));
        }
    }

    /// Head radius in dots, tracking the live width.
    pub fn head_radius(&self) -> f32 {
        self.options.width / 2.0 * self.scale.size_factor()
    }

    /// Tail length in dots, tracking the live length.
    pub fn tail_length(&self) -> f32 {
        self.options.length * self.scale.size_factor()
    }

    /// Surface size in dots.
    pub fn surface_size(&self) -> (u16, u16) {
        self.surface
    }

    /// Construction options carrying the live length and width.
    pub fn options(&self) -> &MeteorOptions {
        &self.options
    }

    /// Whether the collision window is open.
    pub fn collided(&self) -> bool {
        self.collided
    }

    /// The spark swarm.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub(crate) fn gradient(&self) -> &Gradient {
        &self.gradient
    }

    pub(crate) fn spark_gradient(&self) -> &Gradient {
        &self.spark_gradient
    }

    /// Canvas center in dots.
    fn center(&self) -> (f32, f32) {
        (self.surface.0 as f32 / 2.0, self.surface.1 as f32 / 2.0)
    }

    /// Fill the swarm with sparks at the canvas center.
    fn gen_particles(&mut self, count: usize) {
        let (cx, cy) = self.center();
        for _ in 0..count {
            let size = self.roll_spark_size();
            self.particles.push(Particle::new(cx, cy, size));
        }
    }

    /// Roll a spark diameter in dots: a snapped cell value between the
    /// minimum and 1.25 times the head width, scaled to dot resolution.
    fn roll_spark_size(&mut self) -> f32 {
        let hi = (self.options.width * SPARK_SIZE_FACTOR).max(MIN_SPARK_SIZE);
        let cells = snap(self.rng.gen_range(MIN_SPARK_SIZE..=hi), SPARK_SIZE_SNAP).min(hi);
        cells * self.scale.size_factor()
    }

    fn update_collision(&mut self, dt: f32) {
        let phase = std::mem::replace(&mut self.phase, CollisionPhase::Normal);
        self.phase = match phase {
            CollisionPhase::Normal => CollisionPhase::Normal,
            CollisionPhase::Shrinking {
                mut length,
                mut width,
            } => {
                length.advance(dt);
                width.advance(dt);
                self.options.length = length.value();
                self.options.width = width.value();
                if !length.finished() {
                    CollisionPhase::Shrinking { length, width }
                } else {
                    // Spill the overshoot into the delay so the whole
                    // window lasts exactly shrink + recovery seconds
                    let remaining = RECOVERY_DELAY_SECS - length.overshoot();
                    if remaining > 0.0 {
                        CollisionPhase::Recovering { remaining }
                    } else {
                        self.recover();
                        CollisionPhase::Normal
                    }
                }
            }
            CollisionPhase::Recovering { mut remaining } => {
                remaining -= dt;
                if remaining > 0.0 {
                    CollisionPhase::Recovering { remaining }
                } else {
                    self.recover();
                    CollisionPhase::Normal
                }
            }
        };
    }

    /// Close the collision window: drop the latch and re-arm the sparks.
    fn recover(&mut self) {
        self.collided = false;
        self.set_particles_motion();
    }

    fn update_particles(&mut self, dt: f32) {
        for particle in &mut self.particles {
            if particle.state == ParticleState::Dead {
                continue;
            }
            let Some(motion) = particle.motion.as_mut() else {
                continue;
            };
            let before = motion.iteration();
            motion.advance(dt);
            let crossed = motion.iteration() > before;
            let (x, y, size) = motion.sample();
            particle.x = x;
            particle.y = y;
            particle.size = size;
            if particle.state == ParticleState::Dying && crossed {
                particle.state = ParticleState::Dead;
                particle.motion = None;
            }
        }
    }
}

/// Snap a value to the nearest multiple of an increment.
fn snap(value: f32, increment: f32) -> f32 {
    (value / increment).round() * increment
}

#[cfg(test)]
mod tests {
    use ratatui::buffer::Buffer;
    use ratatui::layout::Rect;
    use ratatui::style::Color;
    use ratatui::symbols::Marker;
    use ratatui::widgets::Widget;
    use ratatui::widgets::canvas::Canvas;

    use super::*;
    use crate::draw::MeteorShape;

    fn make_effect(seed: u64) -> MeteorEffect {
        MeteorEffect::seeded(MeteorOptions::default(), 30, 12, DotScale::BRAILLE, seed)
    }

    #[test]
    fn test_particle_count_in_range() {
        for seed in 0..40 {
            let effect = make_effect(seed);
            let n = effect.particles().len();
            assert!(
                (MIN_PARTICLES..=MAX_PARTICLES).contains(&n),
                "seed {seed} rolled {n} sparks"
            );
        }
    }

    #[test]
    fn test_spark_sizes_within_bounds() {
        let effect = make_effect(7);
        let cap = effect.options().width * SPARK_SIZE_FACTOR * DotScale::BRAILLE.size_factor();
        for particle in effect.particles() {
            assert!(particle.size > 0.0);
            assert!(particle.size <= cap + 1e-3);
        }
    }

    #[test]
    fn test_head_radius_tracks_width() {
        let mut effect = make_effect(3);
        assert_eq!(
            effect.head_radius(),
            effect.options().width / 2.0 * DotScale::BRAILLE.size_factor()
        );

        effect.on_animation_end();
        effect.update(0.25);
        let width = effect.options().width;
        assert!(width > 0.0 && width < 2.0, "width mid-shrink was {width}");
        assert_eq!(
            effect.head_radius(),
            width / 2.0 * DotScale::BRAILLE.size_factor()
        );
    }

    #[test]
    fn test_collision_window_lasts_exactly_two_and_a_half_seconds() {
        let mut effect = make_effect(11);
        assert!(!effect.collided());
        effect.on_animation_end();
        assert!(effect.collided());

        for _ in 0..24 {
            effect.update(0.1);
        }
        assert!(effect.collided(), "window closed before 2.5s");

        effect.update(0.1);
        assert!(!effect.collided(), "window still open at 2.5s");
        // The meteor body never comes back; only the sparks do
        assert_eq!(effect.options().length, 0.0);
        assert_eq!(effect.options().width, 0.0);
        assert!(
            effect
                .particles()
                .iter()
                .all(|p| p.state == ParticleState::Alive)
        );
    }

    #[test]
    fn test_one_large_step_completes_the_sequence() {
        let mut effect = make_effect(13);
        effect.on_animation_end();
        effect.update(2.5);
        assert!(!effect.collided());
        assert_eq!(effect.options().width, 0.0);
    }

    #[test]
    fn test_collision_disabled_ignores_the_signal() {
        let options = MeteorOptions {
            collision: false,
            ..MeteorOptions::default()
        };
        let mut effect = MeteorEffect::seeded(options, 30, 12, DotScale::BRAILLE, 5);
        let length = effect.options().length;

        effect.on_animation_end();
        effect.update(1.0);

        assert!(!effect.collided());
        assert_eq!(effect.options().length, length);
        assert!(
            effect
                .particles()
                .iter()
                .all(|p| p.state == ParticleState::Alive)
        );
    }

    #[test]
    fn test_sparks_die_staggered_during_the_window() {
        let mut saw_partial = false;
        let mut total_dead = 0usize;
        for seed in 0..5 {
            let mut effect = make_effect(seed * 101 + 17);
            effect.on_animation_end();
            for _ in 0..24 {
                effect.update(0.1);
                let dead = effect.particles().iter().filter(|p| p.is_dead()).count();
                if dead > 0 && dead < effect.particles().len() {
                    saw_partial = true;
                }
            }
            total_dead += effect.particles().iter().filter(|p| p.is_dead()).count();
        }
        assert!(total_dead > 0, "no spark died inside any collision window");
        assert!(saw_partial, "spark deaths were never staggered");
    }

    #[test]
    fn test_rearm_regenerates_only_decayed_sizes() {
        let mut effect = make_effect(9);
        let cap = effect.options.width * SPARK_SIZE_FACTOR * effect.scale.size_factor();
        effect.particles[0].size = 0.0;
        let kept = effect.particles[1].size;

        effect.set_particles_motion();

        assert!(effect.particles[0].size > 0.0);
        assert!(effect.particles[0].size <= cap + 1e-3);
        assert_eq!(effect.particles[1].size, kept);
    }

    #[test]
    fn test_destinations_fixed_at_arm_time() {
        let mut effect = make_effect(2);
        let targets: Vec<(f32, f32, f32)> = effect
            .particles()
            .iter()
            .map(|p| p.motion.as_ref().unwrap().destination())
            .collect();

        let w = effect.surface_size().0 as f32;
        for (x, y, size) in &targets {
            assert!(*x >= w * 0.25 - 0.5 && *x <= w * 0.75 + 0.5);
            assert_eq!(*y, 0.0);
            assert_eq!(*size, 0.0);
        }

        for _ in 0..50 {
            effect.update(0.137);
        }
        for (particle, target) in effect.particles().iter().zip(&targets) {
            assert_eq!(particle.motion.as_ref().unwrap().destination(), *target);
        }
    }

    #[test]
    fn test_resize_recenters_the_swarm() {
        let mut effect = make_effect(4);
        effect.update(3.0);
        effect.resize(40, 20);

        assert_eq!(effect.surface_size(), (80, 80));
        for particle in effect.particles() {
            assert_eq!((particle.x, particle.y), (40.0, 40.0));
        }
    }

    #[test]
    fn test_dead_sparks_render_nothing() {
        let mut effect = make_effect(6);
        effect.options.length = 0.0;
        effect.options.width = 0.0;
        for particle in &mut effect.particles {
            particle.state = ParticleState::Dead;
            particle.motion = None;
        }

        let area = Rect::new(0, 0, 30, 12);
        let mut buf = Buffer::empty(area);
        let (w, h) = effect.surface_size();
        Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([0.0, f64::from(w)])
            .y_bounds([0.0, f64::from(h)])
            .paint(|ctx| ctx.draw(&MeteorShape::new(&effect)))
            .render(area, &mut buf);

        for y in 0..area.height {
            for x in 0..area.width {
                let fg = buf.cell((x, y)).unwrap().style().fg;
                assert!(
                    fg.is_none() || fg == Some(Color::Reset),
                    "cell ({x},{y}) was painted"
                );
            }
        }
    }
}
