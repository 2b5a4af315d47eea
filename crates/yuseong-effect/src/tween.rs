//! Time-based value animation.

/// Easing curves for animated values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Easing {
    /// Constant rate.
    #[default]
    Linear,
    /// Quadratic ease-out.
    QuadOut,
    /// Quartic ease-out, a hard launch into a long coast.
    QuartOut,
}

impl Easing {
    /// Apply the curve to a progress value in 0.0-1.0.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadOut => 1.0 - (1.0 - t).powi(2),
            Easing::QuartOut => 1.0 - (1.0 - t).powi(4),
        }
    }
}

/// Linear interpolation between two values.
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

/// One value animated from a start to an end over a duration.
#[derive(Debug, Clone)]
pub struct Tween {
    from: f32,
    to: f32,
    duration: f32,
    easing: Easing,
    elapsed: f32,
}

impl Tween {
    /// Create a tween; a non-positive duration completes immediately.
    pub fn new(from: f32, to: f32, duration: f32, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration: duration.max(0.0),
            easing,
            elapsed: 0.0,
        }
    }

    /// Advance the tween clock by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.elapsed += dt.max(0.0);
    }

    /// Current value.
    pub fn value(&self) -> f32 {
        if self.duration <= 0.0 {
            return self.to;
        }
        let progress = (self.elapsed / self.duration).clamp(0.0, 1.0);
        lerp(self.from, self.to, self.easing.apply(progress))
    }

    /// Whether the clock has reached the end.
    pub fn finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Time advanced past the end.
    pub fn overshoot(&self) -> f32 {
        (self.elapsed - self.duration).max(0.0)
    }
}

/// An indefinitely repeating tween driving one particle's flight.
///
/// Destinations are fixed when the motion is armed. Each cycle runs the
/// eased flight over `duration`, holds the end values for `repeat_delay`,
/// then snaps back to the start. A negative `delay` starts the clock
/// ahead, so a freshly armed swarm appears mid-flight.
#[derive(Debug, Clone)]
pub struct Motion {
    from: (f32, f32, f32),
    to: (f32, f32, f32),
    delay: f32,
    duration: f32,
    repeat_delay: f32,
    easing: Easing,
    clock: f32,
}

impl Motion {
    /// Arm a motion over `(x, y, size)` triples.
    pub fn new(
        from: (f32, f32, f32),
        to: (f32, f32, f32),
        delay: f32,
        duration: f32,
        repeat_delay: f32,
        easing: Easing,
    ) -> Self {
        Self {
            from,
            to,
            delay,
            duration: duration.max(1e-3),
            repeat_delay: repeat_delay.max(0.0),
            easing,
            clock: 0.0,
        }
    }

    /// Advance the motion clock by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.clock += dt.max(0.0);
    }

    /// Completed cycles at the current clock.
    pub fn iteration(&self) -> u32 {
        let t = self.local_time();
        if t <= 0.0 {
            return 0;
        }
        (t / self.cycle()) as u32
    }

    /// Current interpolated `(x, y, size)`.
    pub fn sample(&self) -> (f32, f32, f32) {
        let t = self.local_time();
        if t <= 0.0 {
            return self.from;
        }
        let phase = t % self.cycle();
        let progress = (phase / self.duration).min(1.0);
        let eased = self.easing.apply(progress);
        (
            lerp(self.from.0, self.to.0, eased),
            lerp(self.from.1, self.to.1, eased),
            lerp(self.from.2, self.to.2, eased),
        )
    }

    /// Destination rolled when the motion was armed.
    pub fn destination(&self) -> (f32, f32, f32) {
        self.to
    }

    /// Flight time, with the delay applied.
    fn local_time(&self) -> f32 {
        self.clock - self.delay
    }

    fn cycle(&self) -> f32 {
        self.duration + self.repeat_delay
    }
}
