use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How an empty comparison string (blank leading/trailing lines, empty
/// removal sequence) is treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptySequencePolicy {
    /// Empty candidates never match and never seed a cluster; empty removal sequences are a no-op.
    #[default]
    Skip,
    /// Reaching the threshold model with an empty string aborts the run.
    Fail,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CutterSettings {
    /// Maximum number of lines considered for header/footer detection.
    pub max_lines: usize,
    /// Minimum proportion of documents a sequence must appear in.
    pub repeat_threshold: f64,
    /// Maximum number of character differences allowed for a fuzzy match.
    pub max_differences: usize,
    pub empty_sequences: EmptySequencePolicy,
    /// Write document dumps before and after the run.
    pub debug_mode: bool,
    pub dump_dir: PathBuf,
}

impl Default for CutterSettings {
    fn default() -> Self {
        Self {
            max_lines: 10,
            repeat_threshold: 0.5,
            max_differences: 3,
            empty_sequences: EmptySequencePolicy::Skip,
            debug_mode: false,
            dump_dir: PathBuf::from("tmp"),
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read settings: {0}")]
    Read(String),
    #[error("Failed to parse settings: {0}")]
    Parse(String),
    #[error("Invalid settings: {0}")]
    Invalid(String),
}

impl CutterSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !self.repeat_threshold.is_finite() || !(0.0..=1.0).contains(&self.repeat_threshold) {
            return Err(SettingsError::Invalid("Repeat threshold must be between 0 and 1".into()));
        }
        if self.max_lines == 0 {
            return Err(SettingsError::Invalid("max_lines must be at least 1".into()));
        }
        Ok(())
    }
}

/// Read settings from a YAML file; missing fields take their defaults.
pub fn load_settings(path: &Path) -> Result<CutterSettings, SettingsError> {
    let raw = std::fs::read_to_string(path).map_err(|e| SettingsError::Read(e.to_string()))?;
    let settings = parse_settings(&raw)?;
    settings.validate()?;
    Ok(settings)
}

pub fn parse_settings(raw: &str) -> Result<CutterSettings, SettingsError> {
    // An empty document deserializes to unit, not a mapping.
    if raw.trim().is_empty() {
        return Ok(CutterSettings::default());
    }
    serde_yaml::from_str(raw).map_err(|e| SettingsError::Parse(e.to_string()))
}
