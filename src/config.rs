//! Configuration management for clarity
//!
//! Provides loading, saving, and validation of the analysis, input, and
//! report settings. A config file is optional; every field has a default.

use crate::errors::ClarityError;
use crate::focus::kernels::validate_kernel_size;
use crate::focus::DEFAULT_TENG_KERNEL_SIZE;
use crate::plane::Channel;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClarityConfig {
    pub analysis: AnalysisConfig,
    pub input: InputConfig,
    pub report: ReportConfig,
}

/// Focus measure tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Sobel aperture for Tenengrad (odd, 1-31)
    pub teng_kernel_size: usize,
    /// Colour component projected onto the measured plane
    pub channel: Channel,
}

/// Which directory entries are analyzed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Directory scanned when none is given on the command line
    pub directory: PathBuf,
    /// Lowercase extensions to keep; empty keeps every entry
    pub extensions: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

/// Report rendering options
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub format: ReportFormat,
    /// Decimal places for scores; `None` prints six significant digits
    pub precision: Option<usize>,
    /// Group the final report by image instead of lock-step rank rows
    pub grouped: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            teng_kernel_size: DEFAULT_TENG_KERNEL_SIZE,
            channel: Channel::default(),
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("../dataset/"),
            extensions: Vec::new(),
        }
    }
}

impl InputConfig {
    /// Whether `path` passes the extension filter
    pub fn accepts(&self, path: &Path) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                self.extensions
                    .iter()
                    .any(|wanted| wanted.eq_ignore_ascii_case(ext))
            })
            .unwrap_or(false)
    }
}

impl ClarityConfig {
    /// Load configuration from TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ClarityError> {
        let path = path.as_ref();

        if !path.exists() {
            log::info!("Config file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|e| {
            ClarityError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config: ClarityConfig = toml::from_str(&contents).map_err(|e| {
            ClarityError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        config.validate()?;
        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ClarityError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ClarityError::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ClarityError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, toml_string)
            .map_err(|e| ClarityError::Config(format!("Failed to write config file: {}", e)))?;

        log::info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ClarityError> {
        validate_kernel_size(self.analysis.teng_kernel_size).map_err(|e| {
            ClarityError::Config(format!("analysis.teng_kernel_size: {}", e))
        })?;

        if let Some(bad) = self
            .input
            .extensions
            .iter()
            .find(|ext| ext.is_empty() || ext.starts_with('.'))
        {
            return Err(ClarityError::Config(format!(
                "input.extensions: {:?} must be a bare extension like \"png\"",
                bad
            )));
        }

        if matches!(self.report.precision, Some(p) if p > 17) {
            return Err(ClarityError::Config(
                "report.precision must be at most 17".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = ClarityConfig::default();
        assert_eq!(config.analysis.teng_kernel_size, 3);
        assert_eq!(config.analysis.channel, Channel::Blue);
        assert_eq!(config.input.directory, PathBuf::from("../dataset/"));
        assert_eq!(config.report.format, ReportFormat::Text);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut bad_kernel = ClarityConfig::default();
        bad_kernel.analysis.teng_kernel_size = 4;
        assert!(bad_kernel.validate().is_err());

        let mut bad_ext = ClarityConfig::default();
        bad_ext.input.extensions = vec![".png".to_string()];
        assert!(bad_ext.validate().is_err());

        let mut bad_precision = ClarityConfig::default();
        bad_precision.report.precision = Some(40);
        assert!(bad_precision.validate().is_err());
    }

    #[test]
    fn test_config_save_and_load() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("nested").join("clarity.toml");

        let mut config = ClarityConfig::default();
        config.analysis.channel = Channel::Luma;
        config.analysis.teng_kernel_size = 5;
        config.report.precision = Some(4);
        assert!(config.save_to_file(&config_path).is_ok());

        let loaded = ClarityConfig::load_from_file(&config_path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_config_toml_format() {
        let config = ClarityConfig::default();
        let toml_string = toml::to_string_pretty(&config).unwrap();

        assert!(toml_string.contains("[analysis]"));
        assert!(toml_string.contains("[input]"));
        assert!(toml_string.contains("[report]"));
        assert!(toml_string.contains("teng_kernel_size"));
        assert!(toml_string.contains("channel = \"blue\""));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("clarity.toml");
        fs::write(&config_path, "[analysis]\nchannel = \"green\"\n").unwrap();

        let loaded = ClarityConfig::load_from_file(&config_path).unwrap();
        assert_eq!(loaded.analysis.channel, Channel::Green);
        assert_eq!(loaded.analysis.teng_kernel_size, 3);
        assert!(loaded.input.extensions.is_empty());
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("clarity.toml");
        fs::write(&config_path, "[analysis]\nteng_kernel_size = 2\n").unwrap();

        let err = ClarityConfig::load_from_file(&config_path).unwrap_err();
        assert!(err.to_string().contains("teng_kernel_size"));
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = ClarityConfig::load_from_file("nonexistent_clarity.toml");
        assert_eq!(result.unwrap(), ClarityConfig::default());
    }

    #[test]
    fn test_extension_filter() {
        let mut input = InputConfig::default();
        assert!(input.accepts(Path::new("notes.txt")));

        input.extensions = vec!["png".to_string(), "jpg".to_string()];
        assert!(input.accepts(Path::new("a/b.PNG")));
        assert!(input.accepts(Path::new("c.jpg")));
        assert!(!input.accepts(Path::new("notes.txt")));
        assert!(!input.accepts(Path::new("no_extension")));
    }
}
