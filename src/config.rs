//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.journal-lens.toml` files.

use crate::cli::OutputFormat;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the configuration file looked up in the current directory.
pub const CONFIG_FILE_NAME: &str = ".journal-lens.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Backend API settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Which deployment of the backend to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    /// Backend running on this machine
    #[default]
    Local,
    /// The hosted production backend
    Hosted,
}

/// Backend API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Deployment target used when `base_url` is not set.
    #[serde(default)]
    pub target: Target,

    /// Base URL of the local development backend.
    #[serde(default = "default_local_url")]
    pub local_url: String,

    /// Base URL of the hosted backend.
    #[serde(default = "default_hosted_url")]
    pub hosted_url: String,

    /// Explicit base URL; overrides `target` when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            target: Target::default(),
            local_url: default_local_url(),
            hosted_url: default_hosted_url(),
            base_url: None,
        }
    }
}

impl ApiConfig {
    /// The single effective base URL.
    pub fn base_url(&self) -> &str {
        match (&self.base_url, self.target) {
            (Some(url), _) => url,
            (None, Target::Local) => &self.local_url,
            (None, Target::Hosted) => &self.hosted_url,
        }
    }
}

fn default_local_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_hosted_url() -> String {
    "https://ai-journal-backend-production.up.railway.app".to_string()
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Format for one-shot results.
    #[serde(default)]
    pub format: OutputFormat,

    /// Show model, word count and themes on result cards.
    #[serde(default = "default_true")]
    pub show_metadata: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            show_metadata: true,
        }
    }
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        Self::load_from_dir(Path::new("."))
    }

    /// Try to load configuration from `dir`.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings, but only
    /// when they were given explicitly.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(target) = args.target {
            self.api.target = target;
        }
        if let Some(ref url) = args.api_url {
            self.api.base_url = Some(url.clone());
        }
        if let Some(format) = args.format {
            self.output.format = format;
        }
        if args.no_metadata {
            self.output.show_metadata = false;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::tests::make_args;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api.target, Target::Local);
        assert_eq!(config.api.base_url(), "http://localhost:8000");
        assert_eq!(config.output.format, OutputFormat::Text);
        assert!(config.output.show_metadata);
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[api]
target = "hosted"

[output]
format = "json"
show_metadata = false
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.api.target, Target::Hosted);
        assert_eq!(
            config.api.base_url(),
            "https://ai-journal-backend-production.up.railway.app"
        );
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(!config.output.show_metadata);
    }

    #[test]
    fn test_explicit_base_url_wins() {
        let config: Config = toml::from_str(
            r#"
[api]
target = "hosted"
base_url = "http://10.0.0.5:9000"
"#,
        )
        .unwrap();
        assert_eq!(config.api.base_url(), "http://10.0.0.5:9000");
    }

    #[test]
    fn test_merge_with_args() {
        let mut config = Config::default();
        let mut args = make_args();
        config.merge_with_args(&args);
        assert_eq!(config.api.base_url(), "http://localhost:8000");

        args.target = Some(Target::Hosted);
        args.format = Some(OutputFormat::Json);
        config.merge_with_args(&args);
        assert_eq!(config.api.target, Target::Hosted);
        assert_eq!(config.output.format, OutputFormat::Json);

        args.api_url = Some("http://127.0.0.1:8080".to_string());
        config.merge_with_args(&args);
        assert_eq!(config.api.base_url(), "http://127.0.0.1:8080");
    }

    #[test]
    fn test_load_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load_from_dir(dir.path()).unwrap().is_none());

        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[api]\nlocal_url = \"http://localhost:9999\"\n",
        )
        .unwrap();
        let config = Config::load_from_dir(dir.path()).unwrap().unwrap();
        assert_eq!(config.api.base_url(), "http://localhost:9999");

        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "[api\n").unwrap();
        assert!(Config::load_from_dir(dir.path()).is_err());
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(toml_str.contains("[api]"));
        assert!(toml_str.contains("[output]"));
        assert!(toml_str.contains("target = \"local\""));
        assert!(toml_str.contains("hosted_url = \"https://ai-journal-backend-production.up.railway.app\""));
        assert!(toml_str.contains("format = \"text\""));
        assert!(toml_str.contains("show_metadata = true"));
        assert!(!toml_str.contains("base_url"));
        assert!(!toml_str.contains('#'));

        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.api.base_url(), "http://localhost:8000");
    }
}
