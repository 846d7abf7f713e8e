//! User configuration file handling
//!
//! Manages settings from ~/.config/glyph-xray/settings.json

use crate::core::cli::CliArgs;
use crate::export::{Color, Palette};
use crate::geometry::RibbonCap;
use crate::masters::{GeneratorOptions, LayerOptions};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

/// The units-per-em sources are rescaled to before processing
pub const DEFAULT_UNITS_PER_EM: f64 = 8192.0;

/// User configuration from ~/.config/glyph-xray/settings.json
///
/// These settings override built-in defaults but are overridden by CLI arguments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    pub outline_color: Option<Color>,
    pub line_color: Option<Color>,
    pub point_color: Option<Color>,
    pub background_color: Option<Color>,
    pub target_units_per_em: Option<f64>,
    pub use_components: Option<bool>,
    pub ribbon_cap: Option<RibbonCap>,
}

impl ConfigFile {
    /// Get the path to the glyph-xray config directory
    pub fn config_dir() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")));
        config_dir.join("glyph-xray")
    }

    /// Get the path to the user config file
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("settings.json")
    }

    /// Load configuration from the user config file
    pub fn load() -> Option<Self> {
        let path = Self::config_path();
        if !path.exists() {
            return None;
        }
        Self::load_from(&path)
    }

    fn load_from(path: &std::path::Path) -> Option<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    debug!("Loaded user settings from {:?}", path);
                    Some(config)
                }
                Err(e) => {
                    warn!("Failed to parse settings.json: {}", e);
                    None
                }
            },
            Err(e) => {
                warn!("Failed to read settings.json: {}", e);
                None
            }
        }
    }

    /// Save configuration to `path`, creating its directory
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))?;
        debug!("Saved settings to {:?}", path);
        Ok(())
    }

    /// Settings file holding every built-in default
    pub fn defaults() -> Self {
        let palette = Palette::default();
        Self {
            outline_color: Some(palette.outline),
            line_color: Some(palette.ribbon),
            point_color: Some(palette.point),
            background_color: Some(palette.background),
            target_units_per_em: Some(DEFAULT_UNITS_PER_EM),
            use_components: Some(true),
            ribbon_cap: Some(RibbonCap::default()),
        }
    }

    /// Initialize the user configuration directory
    ///
    /// This creates:
    /// 1. The ~/.config/glyph-xray directory and its logs/ directory
    /// 2. A settings.json file with default values, unless one exists
    pub fn initialize_config_directory() -> Result<()> {
        let config_dir = Self::config_dir();
        fs::create_dir_all(&config_dir)?;
        println!("Created config directory: {:?}", config_dir);

        let logs_dir = config_dir.join("logs");
        fs::create_dir_all(&logs_dir)?;
        println!("Created logs directory: {:?}", logs_dir);

        let settings_path = Self::config_path();
        if !settings_path.exists() {
            Self::defaults().save_to(&settings_path)?;
            println!("Created settings file: {:?}", settings_path);
        } else {
            println!("Settings file already exists: {:?}", settings_path);
        }

        println!("\nConfiguration initialized successfully!");
        println!("You can now:");
        println!("  - Edit settings at: {:?}", settings_path);
        println!("  - View application logs in: {:?}", logs_dir);
        Ok(())
    }
}

/// Resolved options for one run
#[derive(Debug, Clone, PartialEq)]
pub struct XRayOptions {
    pub generator: GeneratorOptions,
    pub palette: Palette,
    pub target_units_per_em: f64,
}

impl Default for XRayOptions {
    fn default() -> Self {
        Self {
            generator: GeneratorOptions::default(),
            palette: Palette::default(),
            target_units_per_em: DEFAULT_UNITS_PER_EM,
        }
    }
}

impl XRayOptions {
    /// Merge CLI arguments over the settings file over built-in defaults
    ///
    /// Priority order:
    /// 1. CLI argument
    /// 2. Config file setting (~/.config/glyph-xray/settings.json)
    /// 3. Built-in default
    pub fn resolve(cli_args: &CliArgs, config: Option<&ConfigFile>) -> Result<Self> {
        let config = config.cloned().unwrap_or_default();
        let defaults = Palette::default();

        let color = |option: &str, cli: &Option<String>, file: Option<Color>, default: Color| {
            match cli {
                Some(value) => value
                    .parse::<Color>()
                    .with_context(|| format!("Invalid --{option}")),
                None => Ok(file.unwrap_or(default)),
            }
        };
        let palette = Palette {
            outline: color("outline-color", &cli_args.outline_color, config.outline_color, defaults.outline)?,
            ribbon: color("line-color", &cli_args.line_color, config.line_color, defaults.ribbon)?,
            point: color("point-color", &cli_args.point_color, config.point_color, defaults.point)?,
            background: color(
                "background-color",
                &cli_args.background_color,
                config.background_color,
                defaults.background,
            )?,
        };

        let target_units_per_em = config.target_units_per_em.unwrap_or(DEFAULT_UNITS_PER_EM);
        if !(target_units_per_em.is_finite() && target_units_per_em > 0.0) {
            anyhow::bail!("target_units_per_em must be positive, got {target_units_per_em}");
        }

        let layers = LayerOptions {
            use_components: !cli_args.no_components && config.use_components.unwrap_or(true),
            ribbon_cap: config.ribbon_cap.unwrap_or_default(),
        };
        let generator = GeneratorOptions {
            layers,
            ..GeneratorOptions::default()
        };
        generator.axes.validate()?;

        Ok(Self {
            generator,
            palette,
            target_units_per_em,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_settings() {
        let options = XRayOptions::resolve(&CliArgs::default(), None).unwrap();
        assert_eq!(options, XRayOptions::default());
    }

    #[test]
    fn cli_beats_settings_beats_defaults() {
        let config = ConfigFile {
            point_color: Some(Color::rgba(1, 2, 3, 255)),
            outline_color: Some(Color::rgba(9, 9, 9, 255)),
            target_units_per_em: Some(4096.0),
            ribbon_cap: Some(RibbonCap::Square),
            ..ConfigFile::default()
        };
        let args = CliArgs {
            outline_color: Some("#102030".to_string()),
            no_components: true,
            ..CliArgs::default()
        };
        let options = XRayOptions::resolve(&args, Some(&config)).unwrap();

        assert_eq!(options.palette.outline, Color::rgba(0x10, 0x20, 0x30, 255));
        assert_eq!(options.palette.point, Color::rgba(1, 2, 3, 255));
        assert_eq!(options.palette.ribbon, Palette::default().ribbon);
        assert_eq!(options.target_units_per_em, 4096.0);
        assert!(!options.generator.layers.use_components);
        assert_eq!(options.generator.layers.ribbon_cap, RibbonCap::Square);
    }

    #[test]
    fn bad_units_per_em_is_rejected() {
        let config = ConfigFile {
            target_units_per_em: Some(0.0),
            ..ConfigFile::default()
        };
        assert!(XRayOptions::resolve(&CliArgs::default(), Some(&config)).is_err());
    }

    #[test]
    fn settings_file_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/settings.json");
        ConfigFile::defaults().save_to(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("\"outline_color\": \"#0000FFFF\""));
        assert!(contents.contains("\"ribbon_cap\": \"butt\""));
        assert_eq!(ConfigFile::load_from(&path), Some(ConfigFile::defaults()));
    }
}
