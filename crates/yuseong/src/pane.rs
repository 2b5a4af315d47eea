//! Meteor panes and the scripted flight that carries them down a lane.

use rand::Rng;
use ratatui::layout::Rect;
use yuseong_config::MeteorConfig;
use yuseong_core::{DotScale, MeteorOptions};
use yuseong_effect::{Easing, MeteorEffect, Tween};

/// Flight duration jitter, so lanes fall out of step.
const FLIGHT_JITTER: f32 = 0.2;
/// Pane width used until the first layout pass reveals the lane size.
const NOMINAL_COLS: u16 = 30;

/// Top-to-bottom progress of a pane along its lane.
#[derive(Debug)]
pub struct FlightPath {
    tween: Tween,
}

impl FlightPath {
    pub fn new(secs: f32) -> Self {
        Self {
            tween: Tween::new(0.0, 1.0, secs, Easing::Linear),
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.tween.advance(dt);
    }

    /// Progress in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        self.tween.value()
    }

    pub fn finished(&self) -> bool {
        self.tween.finished()
    }
}

/// One meteor and the flight that moves its pane.
#[derive(Debug)]
pub struct MeteorPane {
    /// The meteor rendered inside this pane.
    pub effect: MeteorEffect,
    /// Pane height in cells.
    canvas_rows: u16,
    pub(crate) flight: FlightPath,
    end_sent: bool,
}

impl MeteorPane {
    /// Roll a fresh meteor and flight from the configured ranges.
    pub fn new(meteor: &MeteorConfig, rng: &mut impl Rng) -> Self {
        let options = MeteorOptions {
            collision: meteor.collision,
            length: rng.gen_range(meteor.length_range[0]..=meteor.length_range[1]),
            width: rng.gen_range(meteor.width_range[0]..=meteor.width_range[1]),
        };
        let jitter = rng.gen_range(1.0 - FLIGHT_JITTER..=1.0 + FLIGHT_JITTER);
        Self {
            effect: MeteorEffect::new(options, NOMINAL_COLS, meteor.canvas_rows, DotScale::BRAILLE),
            canvas_rows: meteor.canvas_rows,
            flight: FlightPath::new(meteor.flight_secs * jitter),
            end_sent: false,
        }
    }

    /// Advance the flight and the effect. The flight's completion is the
    /// collision signal, fired exactly once.
    pub fn update(&mut self, dt: f32) {
        self.flight.advance(dt);
        if self.flight.finished() && !self.end_sent {
            self.end_sent = true;
            self.effect.on_animation_end();
        }
        self.effect.update(dt);
    }

    /// Where the pane currently sits inside its lane.
    pub fn rect(&self, lane: Rect) -> Rect {
        let rows = self.canvas_rows.min(lane.height);
        let travel = lane.height.saturating_sub(rows);
        let offset = (self.flight.progress() * f32::from(travel)).round() as u16;
        Rect::new(lane.x, lane.y + offset, lane.width, rows)
    }
}
