//! Configuration file support for keyshow.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/keyshow/config.toml`. Settings include animation timing,
//! window placement, label styling, frame pacing, and label aliases.
//!
//! If no config file exists, defaults matching the built-in behaviour are used.

pub mod enums;
pub mod types;

// Re-export commonly used types at module level
pub use enums::KeyboardMode;
pub use types::{
    AnimationConfig, InputConfig, LabelsConfig, PerformanceConfig, PlacementConfig, StyleConfig,
};

use anyhow::{Context, Result};
use log::{debug, info, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// # Example TOML
/// ```toml
/// [animation]
/// appear_ms = 100
/// fade_delay_ms = 1000
/// fade_ms = 1000
///
/// [placement]
/// percent_from_bottom = 0.2
///
/// [style]
/// font_family = "Sans"
/// font_size = 50.0
/// border_thickness = 6.0
///
/// [performance]
/// target_fps = 60
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Pop-in and fade timing
    #[serde(default)]
    pub animation: AnimationConfig,

    /// Overlay window placement on the desktop
    #[serde(default)]
    pub placement: PlacementConfig,

    /// Font, padding, border, and colors
    #[serde(default)]
    pub style: StyleConfig,

    /// Frame pacing and buffering
    #[serde(default)]
    pub performance: PerformanceConfig,

    /// Keyboard focus behaviour
    #[serde(default)]
    pub input: InputConfig,

    /// Label alias overrides
    #[serde(default)]
    pub labels: LabelsConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning is
    /// logged. Durations that divide animation progress never drop below 1 ms.
    fn validate_and_clamp(&mut self) {
        clamp_u64("animation.appear_ms", &mut self.animation.appear_ms, 1, 2_000);
        clamp_f64("animation.pop_scale", &mut self.animation.pop_scale, 0.0, 1.0);
        clamp_u64(
            "animation.fade_delay_ms",
            &mut self.animation.fade_delay_ms,
            0,
            60_000,
        );
        clamp_u64("animation.fade_ms", &mut self.animation.fade_ms, 1, 60_000);

        clamp_f64(
            "placement.percent_from_bottom",
            &mut self.placement.percent_from_bottom,
            0.0,
            1.0,
        );
        if !(100..=8192).contains(&self.placement.max_width) {
            warn!(
                "Invalid placement.max_width {}, clamping to 100-8192 range",
                self.placement.max_width
            );
            self.placement.max_width = self.placement.max_width.clamp(100, 8192);
        }
        if !(50..=4096).contains(&self.placement.max_height) {
            warn!(
                "Invalid placement.max_height {}, clamping to 50-4096 range",
                self.placement.max_height
            );
            self.placement.max_height = self.placement.max_height.clamp(50, 4096);
        }

        clamp_f64("style.font_size", &mut self.style.font_size, 8.0, 200.0);
        clamp_f64("style.padding_x", &mut self.style.padding_x, 0.0, 200.0);
        clamp_f64("style.padding_y", &mut self.style.padding_y, 0.0, 200.0);
        clamp_f64(
            "style.border_thickness",
            &mut self.style.border_thickness,
            0.0,
            50.0,
        );
        for (name, color) in [
            ("style.panel_color", &mut self.style.panel_color),
            ("style.text_color", &mut self.style.text_color),
        ] {
            for (i, component) in color.iter_mut().enumerate() {
                if !(0.0..=1.0).contains(&*component) {
                    warn!(
                        "Invalid {}[{}] = {:.3}, clamping to 0.0-1.0",
                        name, i, component
                    );
                    *component = component.clamp(0.0, 1.0);
                }
            }
        }

        // Validate font weight is reasonable
        let valid_weight = matches!(
            self.style.font_weight.to_lowercase().as_str(),
            "normal" | "bold" | "light" | "ultralight" | "heavy" | "ultrabold"
        ) || self
            .style
            .font_weight
            .parse::<u32>()
            .is_ok_and(|w| (100..=900).contains(&w));

        if !valid_weight {
            warn!(
                "Invalid font_weight '{}', falling back to 'bold'",
                self.style.font_weight
            );
            self.style.font_weight = "bold".to_string();
        }

        if !matches!(
            self.style.font_style.to_lowercase().as_str(),
            "normal" | "italic" | "oblique"
        ) {
            warn!(
                "Invalid font_style '{}', falling back to 'normal'",
                self.style.font_style
            );
            self.style.font_style = "normal".to_string();
        }

        if !(1..=240).contains(&self.performance.target_fps) {
            warn!(
                "Invalid target_fps {}, clamping to 1-240 range",
                self.performance.target_fps
            );
            self.performance.target_fps = self.performance.target_fps.clamp(1, 240);
        }

        if !(2..=4).contains(&self.performance.buffer_count) {
            warn!(
                "Invalid buffer_count {}, clamping to 2-4 range",
                self.performance.buffer_count
            );
            self.performance.buffer_count = self.performance.buffer_count.clamp(2, 4);
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/keyshow/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("keyshow");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from `config_path`, or returns defaults if it does not exist.
    ///
    /// All loaded values are validated and clamped to acceptable ranges.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or contains
    /// invalid TOML.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Serializes the configuration as pretty TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// Writes the default configuration to `config_path`.
    ///
    /// # Errors
    /// Returns an error if a config file already exists at the target path or
    /// the file cannot be written.
    pub fn create_default_file(config_path: &Path) -> Result<()> {
        if config_path.exists() {
            return Err(anyhow::anyhow!(
                "Config file already exists at {}",
                config_path.display()
            ));
        }

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        fs::write(config_path, Self::default().to_toml()?)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        info!("Created default config at {}", config_path.display());
        Ok(())
    }

    /// JSON schema describing the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}

fn clamp_u64(name: &str, value: &mut u64, min: u64, max: u64) {
    if !(min..=max).contains(&*value) {
        warn!("Invalid {} {}, clamping to {}-{} range", name, value, min, max);
        *value = (*value).clamp(min, max);
    }
}

fn clamp_f64(name: &str, value: &mut f64, min: f64, max: f64) {
    if !(min..=max).contains(&*value) {
        warn!(
            "Invalid {} {:.2}, clamping to {:.1}-{:.1} range",
            name, value, min, max
        );
        // NaN fails the range check above and is replaced by the lower bound
        *value = if value.is_nan() {
            min
        } else {
            value.clamp(min, max)
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_builtin_behaviour() {
        let config = Config::default();
        let timing = config.animation.timing();
        assert_eq!(timing.appear, Duration::from_millis(100));
        assert_eq!(timing.fade_delay, Duration::from_millis(1000));
        assert_eq!(timing.fade, Duration::from_millis(1000));
        assert_eq!(config.placement.percent_from_bottom, 0.2);
        assert_eq!(config.style.padding_x, 20.0);
        assert_eq!(config.style.padding_y, 10.0);
        assert_eq!(config.style.border_thickness, 6.0);
        assert_eq!(config.performance.target_fps, 60);
        assert_eq!(config.input.keyboard_interactivity, KeyboardMode::None);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let config = Config::load_from(&temp.path().join("absent.toml")).unwrap();
        assert_eq!(config.animation.fade_ms, 1000);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            r#"
[animation]
fade_ms = 500

[input]
keyboard_interactivity = "on-demand"

[labels.aliases]
Space = "Пробел"
"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.animation.fade_ms, 500);
        assert_eq!(config.animation.appear_ms, 100);
        assert_eq!(config.input.keyboard_interactivity, KeyboardMode::OnDemand);
        assert_eq!(config.labels.aliases.get("Space").unwrap(), "Пробел");
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let mut config = Config::default();
        config.animation.appear_ms = 0;
        config.animation.fade_ms = 0;
        config.animation.pop_scale = 3.0;
        config.placement.percent_from_bottom = -0.5;
        config.style.font_size = 1.0;
        config.style.panel_color = [1.5, 0.5, -1.0, 2.0];
        config.style.font_weight = "chunky".into();
        config.performance.target_fps = 0;
        config.performance.buffer_count = 9;

        config.validate_and_clamp();

        assert_eq!(config.animation.appear_ms, 1);
        assert_eq!(config.animation.fade_ms, 1);
        assert_eq!(config.animation.pop_scale, 1.0);
        assert_eq!(config.placement.percent_from_bottom, 0.0);
        assert_eq!(config.style.font_size, 8.0);
        assert_eq!(config.style.panel_color, [1.0, 0.5, 0.0, 1.0]);
        assert_eq!(config.style.font_weight, "bold");
        assert_eq!(config.performance.target_fps, 1);
        assert_eq!(config.performance.buffer_count, 4);
    }

    #[test]
    fn invalid_toml_reports_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "[animation\nfade_ms = ").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }

    #[test]
    fn create_default_file_round_trips_and_refuses_overwrite() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("config.toml");

        Config::create_default_file(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.style.font_family, "Sans");

        assert!(Config::create_default_file(&path).is_err());
    }

    #[test]
    fn schema_lists_sections() {
        let schema = serde_json::to_string(&Config::json_schema()).unwrap();
        for section in ["animation", "placement", "style", "performance", "labels"] {
            assert!(schema.contains(section), "schema missing {section}");
        }
    }
}
