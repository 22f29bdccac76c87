use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::session::quiz::validate_names;
use crate::session::timer::{MAX_MINUTES, MIN_MINUTES};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_minutes")]
    pub default_minutes: u32,
    #[serde(default = "default_sections")]
    pub default_sections: Vec<String>,
    #[serde(default = "default_transcript_dir")]
    pub transcript_dir: String,
    #[serde(default = "default_session_dir")]
    pub session_dir: String,
}

fn default_theme() -> String {
    "terminal-default".to_string()
}
fn default_minutes() -> u32 {
    30
}
fn default_sections() -> Vec<String> {
    vec![
        "Section 1".to_string(),
        "Section 2".to_string(),
        "Section 3".to_string(),
    ]
}
fn default_transcript_dir() -> String {
    ".".to_string()
}
fn default_session_dir() -> String {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("quizdeck")
        .join("sessions")
        .to_string_lossy()
        .to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            default_minutes: default_minutes(),
            default_sections: default_sections(),
            transcript_dir: default_transcript_dir(),
            session_dir: default_session_dir(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    /// A missing file yields the defaults; a present one must parse.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content =
            fs::read_to_string(path).with_context(|| format!("failed to read {path:?}"))?;
        let mut config: Config =
            toml::from_str(&content).with_context(|| format!("invalid config {path:?}"))?;
        config.validate();
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)
            .with_context(|| format!("failed to write {path:?}"))?;
        info!(path = %path.display(), "configuration saved");
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("quizdeck")
            .join("config.toml")
    }

    pub fn default_seconds(&self) -> u32 {
        self.default_minutes * 60
    }

    /// Clamp out-of-range values and fall back to the default section list
    /// when the configured one is unusable.
    pub fn validate(&mut self) {
        self.default_minutes = self.default_minutes.clamp(MIN_MINUTES, MAX_MINUTES);
        for name in &mut self.default_sections {
            *name = name.trim().to_string();
        }
        if validate_names(&self.default_sections).is_err() {
            self.default_sections = default_sections();
        }
        if self.transcript_dir.trim().is_empty() {
            self.transcript_dir = default_transcript_dir();
        }
        if self.session_dir.trim().is_empty() {
            self.session_dir = default_session_dir();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serde_defaults_from_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.default_minutes, 30);
        assert_eq!(config.default_sections.len(), 3);
        assert_eq!(config.transcript_dir, ".");
        assert!(config.session_dir.contains("sessions"));
    }

    #[test]
    fn test_config_serde_partial_file() {
        let toml_str = r#"
theme = "paper"
default_minutes = 90
default_sections = ["Verbal", "Quant"]
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.theme, "paper");
        assert_eq!(config.default_minutes, 90);
        assert_eq!(config.default_sections, vec!["Verbal", "Quant"]);
        assert_eq!(config.transcript_dir, ".");
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(config.default_minutes, deserialized.default_minutes);
        assert_eq!(config.default_sections, deserialized.default_sections);
        assert_eq!(config.session_dir, deserialized.session_dir);
    }

    #[test]
    fn test_validate_clamps_minutes() {
        let mut config = Config::default();
        config.default_minutes = 0;
        config.validate();
        assert_eq!(config.default_minutes, 1);

        config.default_minutes = 600;
        config.validate();
        assert_eq!(config.default_minutes, 180);
        assert_eq!(config.default_seconds(), 10800);
    }

    #[test]
    fn test_validate_restores_unusable_sections() {
        let mut config = Config::default();
        config.default_sections = vec!["A".to_string(), " A ".to_string()];
        config.validate();
        assert_eq!(config.default_sections, default_sections());

        config.default_sections = Vec::new();
        config.validate();
        assert_eq!(config.default_sections, default_sections());
    }

    #[test]
    fn test_validate_trims_section_names() {
        let mut config = Config::default();
        config.default_sections = vec![" Reading ".to_string(), "Writing".to_string()];
        config.validate();
        assert_eq!(config.default_sections, vec!["Reading", "Writing"]);
    }

    #[test]
    fn save_to_then_load_from_keeps_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        assert_eq!(Config::load_from(&path).unwrap().default_minutes, 30);

        let mut config = Config::default();
        config.default_minutes = 45;
        config.default_sections = vec!["Listening".to_string()];
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.default_minutes, 45);
        assert_eq!(loaded.default_sections, vec!["Listening"]);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "default_minutes = \"soon\"").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
