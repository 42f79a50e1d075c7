//! Table of contents configuration management.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Main configuration structure for tocspy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Navigation panel settings.
    #[serde(default)]
    pub toc: NavSettings,

    /// Active-section tracking settings.
    #[serde(default)]
    pub tracker: TrackerSettings,

    /// Markdown heading extraction settings.
    #[serde(default)]
    pub markdown: MarkdownSettings,
}

/// Navigation panel settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavSettings {
    /// Label of the panel toggle.
    #[serde(default = "default_title")]
    pub title: String,

    /// Accessible name of the `<nav>` landmark.
    #[serde(default = "default_aria_label")]
    pub aria_label: String,
}

/// Active-section tracking settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerSettings {
    /// Visibility region, in CSS margin syntax relative to the viewport.
    ///
    /// The default shrinks the region to the top fifth of the viewport, so a
    /// heading becomes active once it scrolls close to the top.
    #[serde(default = "default_root_margin")]
    pub root_margin: String,

    /// Fraction of a heading that must be inside the region to count.
    #[serde(default)]
    pub threshold: f64,

    /// Clear the active heading once no heading is inside the region.
    #[serde(default)]
    pub clear_when_hidden: bool,
}

/// Markdown heading extraction settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkdownSettings {
    /// Shallowest heading level listed in the table of contents.
    #[serde(default = "default_min_level")]
    pub min_level: u8,

    /// Deepest heading level listed in the table of contents.
    #[serde(default = "default_max_level")]
    pub max_level: u8,
}

// Default value functions
fn default_title() -> String {
    "On this page".to_string()
}

fn default_aria_label() -> String {
    "Table of contents".to_string()
}

fn default_root_margin() -> String {
    "0% 0% -80% 0%".to_string()
}

fn default_min_level() -> u8 {
    2
}

fn default_max_level() -> u8 {
    3
}

impl Default for NavSettings {
    fn default() -> Self {
        Self {
            title: default_title(),
            aria_label: default_aria_label(),
        }
    }
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            root_margin: default_root_margin(),
            threshold: 0.0,
            clear_when_hidden: false,
        }
    }
}

impl Default for MarkdownSettings {
    fn default() -> Self {
        Self {
            min_level: default_min_level(),
            max_level: default_max_level(),
        }
    }
}

impl MarkdownSettings {
    /// Whether a heading of `level` belongs in the table of contents.
    pub fn includes(&self, level: u8) -> bool {
        (self.min_level..=self.max_level).contains(&level)
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            CoreError::config_with_source(
                format!("Failed to parse config file: {}", path.display()),
                e,
            )
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is absent.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(?path, "No configuration file, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration using the config crate, with `TOCSPY__*` overrides.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(config::Environment::with_prefix("TOCSPY").separator("__"))
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        let md = &self.markdown;
        if md.min_level == 0 || md.max_level > 6 {
            return Err(CoreError::config(
                "markdown heading levels must be between 1 and 6",
            ));
        }

        if md.min_level > md.max_level {
            return Err(CoreError::config(
                "markdown.min_level cannot exceed markdown.max_level",
            ));
        }

        if !(0.0..=1.0).contains(&self.tracker.threshold) {
            return Err(CoreError::config(
                "tracker.threshold must be between 0.0 and 1.0",
            ));
        }

        if self.tracker.root_margin.trim().is_empty() {
            return Err(CoreError::config("tracker.root_margin cannot be empty"));
        }

        if self.toc.title.is_empty() {
            tracing::warn!("toc.title is empty, the panel toggle will have no label");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn create_test_config() -> String {
        r#"
[toc]
title = "Contents"
aria_label = "Article outline"

[tracker]
root_margin = "-64px 0px -70% 0px"
threshold = 0.5
clear_when_hidden = true

[markdown]
min_level = 1
max_level = 4
"#
        .to_string()
    }

    #[test]
    fn test_load_config() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("tocspy.toml");
        let mut file = std::fs::File::create(&config_path).expect("create file");
        file.write_all(create_test_config().as_bytes())
            .expect("write");

        let config = Config::load(&config_path).expect("load config");

        assert_eq!(config.toc.title, "Contents");
        assert_eq!(config.toc.aria_label, "Article outline");
        assert_eq!(config.tracker.root_margin, "-64px 0px -70% 0px");
        assert_eq!(config.tracker.threshold, 0.5);
        assert!(config.tracker.clear_when_hidden);
        assert_eq!(config.markdown.min_level, 1);
        assert_eq!(config.markdown.max_level, 4);
    }

    #[test]
    fn test_config_defaults() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("tocspy.toml");
        std::fs::write(&config_path, "[toc]\ntitle = \"On this page\"\n").expect("write");

        let config = Config::load(&config_path).expect("load config");

        assert_eq!(config, Config::default());
        assert_eq!(config.tracker.root_margin, "0% 0% -80% 0%");
        assert_eq!(config.tracker.threshold, 0.0);
        assert!(!config.tracker.clear_when_hidden);
        assert_eq!(config.markdown.min_level, 2);
        assert_eq!(config.markdown.max_level, 3);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = Config::load_or_default(Path::new("/nonexistent/tocspy.toml"))
            .expect("defaults");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_not_found() {
        let result = Config::load(Path::new("/nonexistent/tocspy.toml"));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not found"));
    }

    #[test]
    fn test_config_validation_level_order() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("tocspy.toml");
        std::fs::write(&config_path, "[markdown]\nmin_level = 4\nmax_level = 2\n")
            .expect("write");

        let result = Config::load(&config_path);
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("cannot exceed")
        );
    }

    #[test]
    fn test_config_validation_threshold() {
        let mut config = Config::default();
        config.tracker.threshold = 1.5;
        assert!(config.validate().is_err());

        config.tracker.threshold = 1.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_empty_root_margin() {
        let mut config = Config::default();
        config.tracker.root_margin = "  ".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("root_margin"));
    }

    #[test]
    fn test_load_with_env_without_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config = Config::load_with_env(&dir.path().join("absent.toml")).expect("load");
        assert_eq!(config.markdown, MarkdownSettings::default());
    }

    #[test]
    fn test_markdown_settings_includes() {
        let md = MarkdownSettings::default();
        assert!(!md.includes(1));
        assert!(md.includes(2));
        assert!(md.includes(3));
        assert!(!md.includes(4));
    }
}
