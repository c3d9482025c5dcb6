use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::color::RgbColor;
use crate::shared::constants;
use crate::utils::logger;

/// Tunables for color extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    pub dominant_stride: u32,
    pub background_stride: u32,
    pub dark_threshold: f64,
    pub white_threshold: u8,
    pub darken_factor: f64,
    pub contrast_threshold: f64,
    pub dark_text: RgbColor,
    pub light_text: RgbColor,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            dominant_stride: constants::DEFAULT_DOMINANT_STRIDE,
            background_stride: constants::DEFAULT_BACKGROUND_STRIDE,
            dark_threshold: constants::DEFAULT_DARK_THRESHOLD,
            white_threshold: constants::DEFAULT_WHITE_THRESHOLD,
            darken_factor: constants::DEFAULT_DARKEN_FACTOR,
            contrast_threshold: constants::DEFAULT_CONTRAST_THRESHOLD,
            dark_text: RgbColor::from_tuple(constants::DARK_TEXT),
            light_text: RgbColor::from_tuple(constants::LIGHT_TEXT),
        }
    }
}

impl ExtractorConfig {
    /// `<config dir>/barhue/barhue.config`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(constants::APP_NAME).join(constants::CONFIG_FILE))
    }

    /// Loads the explicit file if given, otherwise the default file when it exists.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("invalid config {}", path.display()))
    }

    /// Parses `key = value` lines over the defaults. `#` starts a comment.
    pub fn parse(content: &str) -> Result<Self> {
        let mut config = Self::default();

        for (idx, line) in content.lines().enumerate() {
            let lineno = idx + 1;
            let trimmed = line.split('#').next().unwrap_or("").trim();
            if trimmed.is_empty() {
                continue;
            }

            let Some((key, value)) = trimmed.split_once('=') else {
                bail!("line {}: expected `key = value`, got `{}`", lineno, trimmed);
            };
            let (key, value) = (key.trim(), value.trim());

            match key {
                "dominant-stride" => config.dominant_stride = parse_stride(key, value, lineno)?,
                "background-stride" => {
                    config.background_stride = parse_stride(key, value, lineno)?
                }
                "dark-threshold" => config.dark_threshold = parse_level(key, value, lineno)?,
                "white-threshold" => {
                    config.white_threshold = value.parse::<u8>().with_context(|| {
                        format!("line {}: {} must be 0-255, got `{}`", lineno, key, value)
                    })?
                }
                "darken-factor" => {
                    let factor = parse_float(key, value, lineno)?;
                    if !(0.0..=1.0).contains(&factor) {
                        bail!("line {}: {} must be within 0.0-1.0, got {}", lineno, key, factor);
                    }
                    config.darken_factor = factor;
                }
                "contrast-threshold" => {
                    config.contrast_threshold = parse_level(key, value, lineno)?
                }
                other => logger::warn(&format!("ignoring unknown config key `{}` on line {}", other, lineno)),
            }
        }

        Ok(config)
    }

    /// Applies command line overrides on top of the loaded values.
    pub fn with_overrides(
        mut self,
        dominant_stride: Option<u32>,
        background_stride: Option<u32>,
        darken_factor: Option<f64>,
    ) -> Result<Self> {
        if let Some(stride) = dominant_stride {
            if stride == 0 {
                bail!("--dominant-stride must be at least 1");
            }
            self.dominant_stride = stride;
        }
        if let Some(stride) = background_stride {
            if stride == 0 {
                bail!("--background-stride must be at least 1");
            }
            self.background_stride = stride;
        }
        if let Some(factor) = darken_factor {
            if !(0.0..=1.0).contains(&factor) {
                bail!("--darken-factor must be within 0.0-1.0, got {}", factor);
            }
            self.darken_factor = factor;
        }
        Ok(self)
    }
}

fn parse_float(key: &str, value: &str, lineno: usize) -> Result<f64> {
    value
        .parse::<f64>()
        .with_context(|| format!("line {}: {} must be a number, got `{}`", lineno, key, value))
}

fn parse_level(key: &str, value: &str, lineno: usize) -> Result<f64> {
    let level = parse_float(key, value, lineno)?;
    if !(0.0..=255.0).contains(&level) {
        bail!("line {}: {} must be within 0-255, got {}", lineno, key, level);
    }
    Ok(level)
}

fn parse_stride(key: &str, value: &str, lineno: usize) -> Result<u32> {
    let stride = value
        .parse::<u32>()
        .with_context(|| format!("line {}: {} must be a positive integer, got `{}`", lineno, key, value))?;
    if stride == 0 {
        bail!("line {}: {} must be at least 1", lineno, key);
    }
    Ok(stride)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_overrides_defaults() {
        let config = ExtractorConfig::parse(
            "# bar theming\n\
             dominant-stride = 3\n\
             \n\
             white-threshold=230   # looser\n\
             darken-factor = 0.5\n\
             contrast-threshold = 128.5\n",
        )
        .unwrap();

        assert_eq!(config.dominant_stride, 3);
        assert_eq!(config.background_stride, constants::DEFAULT_BACKGROUND_STRIDE);
        assert_eq!(config.white_threshold, 230);
        assert_eq!(config.darken_factor, 0.5);
        assert_eq!(config.contrast_threshold, 128.5);
        assert_eq!(config.dark_threshold, constants::DEFAULT_DARK_THRESHOLD);
    }

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(ExtractorConfig::parse("").unwrap(), ExtractorConfig::default());
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let config = ExtractorConfig::parse("font-size = 2.5\ndark-threshold = 80").unwrap();
        assert_eq!(config.dark_threshold, 80.0);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        for bad in [
            "dominant-stride = 0",
            "background-stride = -2",
            "darken-factor = 1.5",
            "white-threshold = 300",
            "dark-threshold = lots",
            "contrast-threshold = 256",
            "just some words",
        ] {
            assert!(ExtractorConfig::parse(bad).is_err(), "accepted `{}`", bad);
        }
    }

    #[test]
    fn test_error_names_line() {
        let err = ExtractorConfig::parse("dominant-stride = 4\ndarken-factor = 9").unwrap_err();
        assert!(format!("{:#}", err).contains("line 2"));
    }

    #[test]
    fn test_from_file_and_overrides() {
        let dir = std::env::temp_dir().join("barhue_test_config");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(constants::CONFIG_FILE);
        fs::write(&path, "background-stride = 4\n").unwrap();

        let config = ExtractorConfig::load(Some(&path))
            .unwrap()
            .with_overrides(Some(2), None, Some(0.6))
            .unwrap();
        assert_eq!(config.dominant_stride, 2);
        assert_eq!(config.background_stride, 4);
        assert_eq!(config.darken_factor, 0.6);

        assert!(ExtractorConfig::default().with_overrides(Some(0), None, None).is_err());
        assert!(ExtractorConfig::load(Some(&dir.join("missing.config"))).is_err());
    }
}
