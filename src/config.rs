use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::theme::Theme;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub display: DisplayConfig,
    pub interaction: InteractionConfig,
    pub animation: AnimationConfig,
    pub tutor: TutorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    pub theme: Theme,
    /// Angle shown on startup, in degrees.
    pub initial_angle_deg: f64,
    pub show_reference: bool,
    pub show_symmetry: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InteractionConfig {
    /// Snap dragged angles onto the 15° grid.
    pub snap: bool,
    /// Half-width of the snap window around each grid entry, in degrees.
    pub snap_threshold_deg: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnimationConfig {
    /// Start with the animation running.
    pub autoplay: bool,
    /// Angular speed in radians per second.
    pub speed: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TutorConfig {
    /// Model name sent to the Gemini API.
    pub model: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            theme: Theme::Dark,
            initial_angle_deg: 45.0,
            show_reference: false,
            show_symmetry: false,
        }
    }
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            snap: true,
            snap_threshold_deg: 5.0,
        }
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            autoplay: false,
            speed: 1.0,
        }
    }
}

impl Default for TutorConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.0-flash".to_string(),
        }
    }
}

/// Runtime toggles owned by the UI loop. Seeded from [`Config`] and mutated
/// only by explicit user actions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    pub snap: bool,
    pub animate: bool,
    pub speed: f64,
    pub show_symmetry: bool,
    pub show_reference: bool,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Get the default XDG config path (~/.config/circlet/config.toml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("circlet").join("config.toml"))
    }

    /// Load config from the default XDG path if it exists.
    /// Returns None if the file doesn't exist, logs a warning on parse errors.
    pub fn load_from_default_path() -> Option<Self> {
        let path = Self::default_path()?;
        if path.exists() {
            match Self::load(&path) {
                Ok(config) => Some(config),
                Err(e) => {
                    tracing::warn!(
                        "Failed to parse config at {}: {}. Using defaults.",
                        path.display(),
                        e
                    );
                    None
                }
            }
        } else {
            None
        }
    }

    /// Initialize a default config file at the XDG path, returns the path.
    pub fn init_default_config() -> Result<PathBuf> {
        let path = Self::default_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let template = Self::generate_config_template();
        std::fs::write(&path, template)?;

        Ok(path)
    }

    /// Generate a commented TOML config template
    pub fn generate_config_template() -> String {
        r#"# Circlet Configuration
# This file is auto-generated. Edit as needed.

[display]
# Color theme: "dark" or "light"
theme = "dark"
# Angle shown on startup, in degrees
initial_angle_deg = 45.0
# Draw the reference-angle arc
show_reference = false
# Mark the three symmetry points (-cos,sin), (-cos,-sin), (cos,-sin)
show_symmetry = false

[interaction]
# Snap dragged angles to the 15-degree grid
snap = true
# Snap window half-width around each grid entry, in degrees
snap_threshold_deg = 5.0

[animation]
# Start with the animation running
autoplay = false
# Angular speed in radians per second
speed = 1.0

[tutor]
# Model name for the math tutor (requires GEMINI_API_KEY in the environment)
model = "gemini-2.0-flash"
"#
        .to_string()
    }

    /// Merge CLI arguments into config (CLI takes priority)
    pub fn merge_args(&mut self, args: &crate::Args) {
        if let Some(theme) = args.theme {
            self.display.theme = theme;
        }
        if let Some(deg) = args.angle_deg {
            self.display.initial_angle_deg = deg;
        }
        if args.show_reference {
            self.display.show_reference = true;
        }
        if args.show_symmetry {
            self.display.show_symmetry = true;
        }
        if args.no_snap {
            self.interaction.snap = false;
        }
        if let Some(threshold) = args.snap_threshold {
            self.interaction.snap_threshold_deg = threshold.max(0.0);
        }
        if args.play {
            self.animation.autoplay = true;
        }
        if let Some(speed) = args.speed {
            self.animation.speed = speed.max(0.01);
        }
        if let Some(ref model) = args.model {
            self.tutor.model = model.clone();
        }
    }

    pub fn initial_settings(&self) -> Settings {
        Settings {
            snap: self.interaction.snap,
            animate: self.animation.autoplay,
            speed: self.animation.speed,
            show_symmetry: self.display.show_symmetry,
            show_reference: self.display.show_reference,
        }
    }

    pub fn snap_threshold_radians(&self) -> f64 {
        let threshold = self.interaction.snap_threshold_deg;
        if threshold.is_finite() && threshold > 0.0 {
            threshold.to_radians()
        } else {
            crate::angle::snap::DEFAULT_THRESHOLD
        }
    }

    /// Write the current settings back into the config file, preserving
    /// comments and unknown keys. The current angle and play state are
    /// session state and are never written.
    pub fn save_settings(&self, settings: &Settings, theme: Theme) -> Result<PathBuf> {
        let path = Self::default_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = std::fs::read_to_string(&path)
            .unwrap_or_else(|_| Self::generate_config_template());
        let mut doc: toml_edit::DocumentMut = content.parse()?;

        if doc.get("display").is_none() {
            doc["display"] = toml_edit::table();
        }
        doc["display"]["theme"] = toml_edit::value(theme.name());
        doc["display"]["show_reference"] = toml_edit::value(settings.show_reference);
        doc["display"]["show_symmetry"] = toml_edit::value(settings.show_symmetry);

        if doc.get("interaction").is_none() {
            doc["interaction"] = toml_edit::table();
        }
        doc["interaction"]["snap"] = toml_edit::value(settings.snap);

        if doc.get("animation").is_none() {
            doc["animation"] = toml_edit::table();
        }
        doc["animation"]["speed"] = toml_edit::value(settings.speed);

        std::fs::write(&path, doc.to_string())?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_round_trips_to_defaults() {
        let template = Config::generate_config_template();
        let parsed: Config = toml::from_str(&template).unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn empty_file_is_all_defaults() {
        let parsed: Config = toml::from_str("").unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let parsed: Config = toml::from_str("[interaction]\nsnap = false\n").unwrap();
        assert!(!parsed.interaction.snap);
        assert_eq!(parsed.animation.speed, 1.0);
        assert_eq!(parsed.display.theme, Theme::Dark);
    }

    #[test]
    fn cli_flags_override_the_file() {
        use clap::Parser;
        let args = crate::Args::parse_from([
            "circlet",
            "--no-snap",
            "--play",
            "--speed",
            "2.5",
            "--theme",
            "light",
            "--angle-deg",
            "30",
        ]);
        let mut config = Config::default();
        config.merge_args(&args);
        assert!(!config.interaction.snap);
        assert!(config.animation.autoplay);
        assert_eq!(config.animation.speed, 2.5);
        assert_eq!(config.display.theme, Theme::Light);
        assert_eq!(config.display.initial_angle_deg, 30.0);
    }

    #[test]
    fn initial_settings_mirror_the_config() {
        let mut config = Config::default();
        config.animation.autoplay = true;
        config.display.show_symmetry = true;
        let settings = config.initial_settings();
        assert!(settings.animate);
        assert!(settings.show_symmetry);
        assert!(settings.snap);
    }

    #[test]
    fn snap_threshold_converts_to_radians() {
        let config = Config::default();
        let expected = crate::angle::snap::DEFAULT_THRESHOLD;
        assert!((config.snap_threshold_radians() - expected).abs() < 1e-12);
    }

    #[test]
    fn degenerate_snap_threshold_falls_back_to_the_default() {
        let mut config = Config::default();
        config.interaction.snap_threshold_deg = 0.0;
        assert_eq!(
            config.snap_threshold_radians(),
            crate::angle::snap::DEFAULT_THRESHOLD
        );
    }
}
