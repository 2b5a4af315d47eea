//! Animation speed control.

/// Global animation speed applied to the frame clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AnimationSpeed {
    /// Half speed.
    Slow,
    /// Real time.
    #[default]
    Normal,
    /// Double speed.
    Fast,
}

impl AnimationSpeed {
    /// Multiplier applied to the frame delta time.
    pub fn multiplier(&self) -> f32 {
        match self {
            AnimationSpeed::Slow => 0.5,
            AnimationSpeed::Normal => 1.0,
            AnimationSpeed::Fast => 2.0,
        }
    }

    /// Cycle to the next speed setting.
    pub fn next(&self) -> Self {
        match self {
            AnimationSpeed::Slow => AnimationSpeed::Normal,
            AnimationSpeed::Normal => AnimationSpeed::Fast,
            AnimationSpeed::Fast => AnimationSpeed::Slow,
        }
    }

    /// Parse a config name, case-insensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "slow" => Some(AnimationSpeed::Slow),
            "normal" => Some(AnimationSpeed::Normal),
            "fast" => Some(AnimationSpeed::Fast),
            _ => None,
        }
    }

    /// Display label for the status line.
    pub fn label(&self) -> &'static str {
        match self {
            AnimationSpeed::Slow => "slow",
            AnimationSpeed::Normal => "normal",
            AnimationSpeed::Fast => "fast",
        }
    }
}
