//! Project configuration for StitchByte.
//!
//! Settings live in `stitchbyte.toml` at the project root:
//!
//! ```toml
//! [widget]
//! phone_number = "+1 555 123 4567"
//! brand_name = "Acme Tailoring"
//! brand_color = "#128C7E"
//! position = "bottom-left"
//! welcome_message = "Hi there!\nHow can we help?"
//! open_by_default = true
//!
//! [template]
//! category = "UTILITY"
//! language = "en_US"
//! ```
//!
//! Values are layered file → environment → CLI. The environment can set
//! `STITCHBYTE_PHONE` and `STITCHBYTE_LANGUAGE`; CLI flags are applied by the
//! commands on top of [`StitchbyteConfig::widget`].

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::debug;

use crate::errors::ConfigError;
use crate::template::Category;
use crate::widget::WidgetConfig;

/// File name looked up in the project directory.
pub const CONFIG_FILE: &str = "stitchbyte.toml";

pub const PHONE_ENV: &str = "STITCHBYTE_PHONE";
pub const LANGUAGE_ENV: &str = "STITCHBYTE_LANGUAGE";

static LANGUAGE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z]{2,3}(_[A-Z]{2})?$").unwrap());

/// Defaults applied to template drafts that leave them blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateDefaults {
    #[serde(default)]
    pub category: Category,
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String {
    "en_US".to_string()
}

impl Default for TemplateDefaults {
    fn default() -> Self {
        Self {
            category: Category::default(),
            language: default_language(),
        }
    }
}

/// The complete stitchbyte.toml structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StitchbyteToml {
    #[serde(default)]
    pub widget: WidgetConfig,
    #[serde(default)]
    pub template: TemplateDefaults,
}

impl StitchbyteToml {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&content).map_err(|source| ConfigError::ParseFailed {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load `path` if it exists, otherwise return defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Save configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|source| ConfigError::WriteFailed {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Describe settings that are missing or will not render as written.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings: Vec<String> = self
            .widget
            .warnings()
            .into_iter()
            .map(|w| format!("widget.{}", w))
            .collect();

        if !LANGUAGE_REGEX.is_match(&self.template.language) {
            warnings.push(format!(
                "template.language '{}' should look like 'en' or 'en_US'",
                self.template.language
            ));
        }

        warnings
    }
}

/// Configuration with environment overrides applied.
#[derive(Debug, Clone)]
pub struct StitchbyteConfig {
    pub project_dir: PathBuf,
    pub config_path: PathBuf,
    /// Whether `config_path` existed when loaded
    pub from_file: bool,
    pub toml: StitchbyteToml,
}

impl StitchbyteConfig {
    /// Load configuration for `project_dir`, reading `config_path` when given
    /// and `<project_dir>/stitchbyte.toml` otherwise.
    pub fn new(project_dir: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        Self::with_env(project_dir, config_path, |key| std::env::var(key).ok())
    }

    /// Same as [`StitchbyteConfig::new`] with an explicit environment lookup.
    pub fn with_env(
        project_dir: PathBuf,
        config_path: Option<PathBuf>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let config_path = config_path.unwrap_or_else(|| project_dir.join(CONFIG_FILE));
        let from_file = config_path.exists();
        let mut toml = StitchbyteToml::load_or_default(&config_path)?;

        if let Some(phone) = env(PHONE_ENV).filter(|v| !v.trim().is_empty()) {
            debug!("phone number taken from {}", PHONE_ENV);
            toml.widget.phone_number = phone;
        }
        if let Some(language) = env(LANGUAGE_ENV).filter(|v| !v.trim().is_empty()) {
            debug!("template language taken from {}", LANGUAGE_ENV);
            toml.template.language = language;
        }

        Ok(Self {
            project_dir,
            config_path,
            from_file,
            toml,
        })
    }

    /// Widget settings (file → env). Commands apply CLI flags on a clone.
    pub fn widget(&self) -> &WidgetConfig {
        &self.toml.widget
    }

    pub fn template_defaults(&self) -> &TemplateDefaults {
        &self.toml.template
    }

    /// Validate configuration and return warnings.
    pub fn validate(&self) -> Vec<String> {
        self.toml.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::Position;
    use tempfile::tempdir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_parse_full_config() {
        let toml = StitchbyteToml::parse(
            r##"
[widget]
phone_number = "+1 555 123 4567"
brand_name = "Acme"
brand_color = "#128C7E"
position = "bottom-left"
open_by_default = true

[template]
category = "UTILITY"
language = "pt_BR"
"##,
        )
        .unwrap();

        assert_eq!(toml.widget.brand_name, "Acme");
        assert_eq!(toml.widget.position, Position::BottomLeft);
        assert!(toml.widget.open_by_default);
        assert_eq!(toml.template.category, Category::Utility);
        assert_eq!(toml.template.language, "pt_BR");
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let toml = StitchbyteToml::parse("").unwrap();
        assert_eq!(toml, StitchbyteToml::default());
        assert_eq!(toml.template.language, "en_US");
    }

    #[test]
    fn test_parse_rejects_unknown_position() {
        let result = StitchbyteToml::parse("[widget]\nposition = \"top-left\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);

        let mut toml = StitchbyteToml::default();
        toml.widget.phone_number = "15551234567".to_string();
        toml.widget.welcome_message = "Line one\nLine \"two\"".to_string();
        toml.save(&path).unwrap();

        let loaded = StitchbyteToml::load(&path).unwrap();
        assert_eq!(loaded, toml);
    }

    #[test]
    fn test_load_reports_parse_error_with_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[widget\n").unwrap();

        let err = StitchbyteToml::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseFailed { .. }));
        assert!(err.to_string().contains(CONFIG_FILE));
    }

    #[test]
    fn test_validate_default_warns_about_phone() {
        let warnings = StitchbyteToml::default().validate();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("widget.phone_number"));
    }

    #[test]
    fn test_validate_language_format() {
        let mut toml = StitchbyteToml::default();
        toml.widget.phone_number = "15551234567".to_string();
        toml.template.language = "english".to_string();
        let warnings = toml.validate();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("template.language"));
    }

    #[test]
    fn test_config_without_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let config = StitchbyteConfig::with_env(dir.path().to_path_buf(), None, no_env).unwrap();
        assert!(!config.from_file);
        assert_eq!(config.config_path, dir.path().join(CONFIG_FILE));
        assert_eq!(config.widget(), &WidgetConfig::default());
    }

    #[test]
    fn test_env_overrides_file() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "[widget]\nphone_number = \"111\"\n\n[template]\nlanguage = \"en_US\"\n",
        )
        .unwrap();

        let config = StitchbyteConfig::with_env(dir.path().to_path_buf(), None, |key| match key {
            PHONE_ENV => Some("+44 20 7946 0958".to_string()),
            LANGUAGE_ENV => Some("en_GB".to_string()),
            _ => None,
        })
        .unwrap();

        assert!(config.from_file);
        assert_eq!(config.widget().phone_number, "+44 20 7946 0958");
        assert_eq!(config.template_defaults().language, "en_GB");
    }

    #[test]
    fn test_blank_env_is_ignored() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "[widget]\nphone_number = \"15551234567\"\n",
        )
        .unwrap();

        let config = StitchbyteConfig::with_env(dir.path().to_path_buf(), None, |key| {
            (key == PHONE_ENV).then(|| "  ".to_string())
        })
        .unwrap();
        assert_eq!(config.widget().phone_number, "15551234567");
    }

    #[test]
    fn test_explicit_config_path() {
        let dir = tempdir().unwrap();
        let custom = dir.path().join("site.toml");
        std::fs::write(&custom, "[widget]\nbrand_name = \"Custom\"\n").unwrap();

        let config =
            StitchbyteConfig::with_env(dir.path().to_path_buf(), Some(custom.clone()), no_env)
                .unwrap();
        assert_eq!(config.config_path, custom);
        assert_eq!(config.widget().brand_name, "Custom");
    }
}
