//! Configuration loading.
//!
//! Settings live in a TOML file under the platform config directory. A
//! missing file yields the defaults; a malformed one is a startup error.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config read error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Animation speed name: "slow", "normal" or "fast".
    pub speed: String,
    /// Meteor lane settings.
    pub meteor: MeteorConfig,
    /// Pointer overlay settings.
    pub cursor: CursorConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            speed: "normal".to_string(),
            meteor: MeteorConfig::default(),
            cursor: CursorConfig::default(),
        }
    }
}

/// Meteor lane settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MeteorConfig {
    /// Number of meteor lanes across the terminal.
    pub count: u16,
    /// Tail length roll range in cells, `[min, max]`.
    pub length_range: [f32; 2],
    /// Head width roll range in cells, `[min, max]`.
    pub width_range: [f32; 2],
    /// Seconds a meteor takes to cross its lane.
    pub flight_secs: f32,
    /// Height of each meteor canvas in rows.
    pub canvas_rows: u16,
    /// Whether a meteor runs the collision sequence when its flight ends.
    pub collision: bool,
}

impl Default for MeteorConfig {
    fn default() -> Self {
        Self {
            count: 2,
            length_range: [8.0, 14.0],
            width_range: [1.5, 2.5],
            flight_secs: 6.0,
            canvas_rows: 14,
            collision: true,
        }
    }
}

/// Pointer overlay settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CursorConfig {
    /// Whether a glyph is drawn at the pointer position.
    pub enabled: bool,
    /// Glyph drawn at the pointer position.
    pub glyph: String,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            glyph: "✛".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the platform config directory.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&text)?;
        Ok(config)
    }

    /// Platform config file path, if a home directory exists.
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "yuseong").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Clamp out-of-range values to usable bounds.
    pub fn sanitize(mut self) -> Self {
        self.meteor.count = self.meteor.count.clamp(1, 4);
        self.meteor.canvas_rows = self.meteor.canvas_rows.clamp(4, 60);
        self.meteor.flight_secs = self.meteor.flight_secs.clamp(1.0, 120.0);
        self.meteor.length_range = sorted_range(self.meteor.length_range, 1.0);
        self.meteor.width_range = sorted_range(self.meteor.width_range, 0.5);
        self
    }
}

/// Order a `[min, max]` range and raise both ends to a floor value.
fn sorted_range(range: [f32; 2], floor: f32) -> [f32; 2] {
    let lo = range[0].max(floor);
    let hi = range[1].max(floor);
    if lo <= hi { [lo, hi] } else { [hi, lo] }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.speed, "normal");
        assert_eq!(config.meteor.count, 2);
        assert_eq!(config.meteor.canvas_rows, 14);
        assert!(config.meteor.collision);
        assert!(config.cursor.enabled);
        assert_eq!(config.cursor.glyph, "✛");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [meteor]
            count = 3
            collision = false
            "#,
        )
        .unwrap();
        assert_eq!(config.meteor.count, 3);
        assert!(!config.meteor.collision);
        // Untouched keys fall back to defaults
        assert_eq!(config.meteor.length_range, [8.0, 14.0]);
        assert_eq!(config.speed, "normal");
        assert!(config.cursor.enabled);
    }

    #[test]
    fn test_full_toml() {
        let config: Config = toml::from_str(
            r#"
            speed = "fast"

            [meteor]
            count = 1
            length_range = [10.0, 12.0]
            width_range = [2.0, 2.0]
            flight_secs = 4.0
            canvas_rows = 10
            collision = true

            [cursor]
            enabled = false
            glyph = "+"
            "#,
        )
        .unwrap();
        assert_eq!(config.speed, "fast");
        assert_eq!(config.meteor.width_range, [2.0, 2.0]);
        assert_eq!(config.meteor.flight_secs, 4.0);
        assert!(!config.cursor.enabled);
        assert_eq!(config.cursor.glyph, "+");
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        let result: Result<Config, _> = toml::from_str("meteor = 3");
        assert!(result.is_err());
    }

    #[test]
    fn test_sanitize_clamps() {
        let mut config = Config::default();
        config.meteor.count = 9;
        config.meteor.canvas_rows = 1;
        config.meteor.flight_secs = 0.0;
        config.meteor.length_range = [20.0, 5.0];
        let config = config.sanitize();
        assert_eq!(config.meteor.count, 4);
        assert_eq!(config.meteor.canvas_rows, 4);
        assert_eq!(config.meteor.flight_secs, 1.0);
        assert_eq!(config.meteor.length_range, [5.0, 20.0]);
    }

    #[test]
    fn test_load_from_missing_file_is_io_error() {
        let result = Config::load_from(Path::new("/nonexistent/yuseong.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
