use anyhow::{Context, Result};
use confyg::{env, Confygery};
use serde::Deserialize;
use songpage_core::Escaping;
use std::path::PathBuf;

/// What to do when `<slug>.html` already exists in the output directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverwritePolicy {
    /// Replace the existing page (a warning is logged).
    #[default]
    Overwrite,
    /// Fail without touching the existing page.
    Refuse,
}

/// Git settings for the optional publish step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GitConfig {
    /// Remote to push to. Plain `git push` when unset.
    #[serde(default)]
    pub remote: Option<String>,

    /// Branch to push. Only used together with `remote`.
    #[serde(default)]
    pub branch: Option<String>,
}

/// Configuration for songpage.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (SONGPAGE_* prefix)
/// 3. Config file (~/.config/songpage/config.toml)
/// 4. Built-in defaults (lowest priority)
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Directory generated pages are written to.
    ///
    /// Can be set via:
    /// - CLI: --output-dir /path/to/site
    /// - ENV: SONGPAGE_OUTPUT_DIR
    /// - Config: output_dir = "/path/to/site"
    /// - Default: current directory
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Behaviour when the page file already exists.
    #[serde(default)]
    pub overwrite: OverwritePolicy,

    /// Escape HTML-significant characters in user text (default: true).
    #[serde(default = "default_escape_html")]
    pub escape_html: bool,

    #[serde(default)]
    pub git: GitConfig,

    #[serde(default)]
    pub logging: twyg::Opts,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            overwrite: OverwritePolicy::default(),
            escape_html: default_escape_html(),
            git: GitConfig::default(),
            logging: twyg::Opts::default(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Searches for config file at: ~/.config/songpage/config.toml
    /// Reads environment variables with SONGPAGE_ prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        let config_path = config_file_path();

        let mut builder = Confygery::new()
            .context("Failed to create config builder")?;

        if config_path.exists() {
            let path_str = config_path.to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder.add_file(path_str)
                .context("Failed to load config file")?;
        }

        let env_opts = env::Options::with_top_level("songpage");
        builder.add_env(env_opts)
            .context("Failed to load environment variables")?;

        let config: Self = builder.build()
            .context("Failed to build configuration")?;

        Ok(config)
    }

    /// Load configuration with a custom output directory.
    ///
    /// This is used when the --output-dir CLI flag is provided.
    pub fn load_with_output_dir(output_dir: PathBuf) -> Result<Self> {
        let mut config = Self::load()?;
        config.output_dir = output_dir;
        Ok(config)
    }

    pub fn escaping(&self) -> Escaping {
        if self.escape_html {
            Escaping::Html
        } else {
            Escaping::Preserve
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_escape_html() -> bool {
    true
}

/// Get the config file path.
///
/// Returns:
/// - Linux: ~/.config/songpage/config.toml
/// - macOS: ~/Library/Application Support/songpage/config.toml
/// - Windows: %APPDATA%\songpage\config.toml
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("songpage")
        .join("config.toml")
}

/// Get the example config file content.
pub fn example_config() -> &'static str {
    r#"# Songpage Configuration File
#
# Configuration is loaded from multiple sources with the following priority:
# 1. CLI arguments (highest priority)
# 2. Environment variables (SONGPAGE_* prefix)
# 3. This config file
# 4. Built-in defaults (lowest priority)

# Directory generated song pages are written to
#
# Can also be set via:
# - CLI: songpage --output-dir ~/site prompt
# - Environment: SONGPAGE_OUTPUT_DIR=~/site
#
# Default: the current directory
#output_dir = "/path/to/site"

# What to do when a page with the same name already exists:
# "overwrite" replaces it, "refuse" stops with an error
overwrite = "overwrite"

# Escape <, >, &, and quotes in titles, descriptions and annotations.
# Set to false to allow inline HTML in descriptions.
escape_html = true

[git]
# Remote and branch used by the publish step. When unset, plain `git push`
# is run in the output directory.
#remote = "origin"
#branch = "main"
"#
}

/// Create default config file if it doesn't exist.
///
/// Returns true if a new file was created, false if it already existed.
pub fn ensure_config_file() -> Result<bool> {
    let config_path = config_file_path();

    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .context("Failed to create config directory")?;
    }

    std::fs::write(&config_path, example_config())
        .context("Failed to write config file")?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.output_dir, PathBuf::from("."));
        assert_eq!(config.overwrite, OverwritePolicy::Overwrite);
        assert_eq!(config.escaping(), Escaping::Html);
        assert!(config.git.remote.is_none());
    }

    #[test]
    fn test_config_load() {
        // Should not fail even if config file doesn't exist
        let result = Config::load();
        assert!(result.is_ok());
    }

    #[test]
    fn test_config_with_custom_output_dir() {
        let custom_dir = PathBuf::from("/tmp/songs");
        let config = Config::load_with_output_dir(custom_dir.clone());
        assert!(config.is_ok());
        assert_eq!(config.unwrap().output_dir, custom_dir);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
overwrite = "refuse"
escape_html = false

[git]
remote = "origin"
"#,
        )
        .unwrap();
        assert_eq!(config.output_dir, PathBuf::from("."));
        assert_eq!(config.overwrite, OverwritePolicy::Refuse);
        assert_eq!(config.escaping(), Escaping::Preserve);
        assert_eq!(config.git.remote.as_deref(), Some("origin"));
        assert!(config.git.branch.is_none());
    }

    #[test]
    fn test_unknown_overwrite_policy_rejected() {
        let result: std::result::Result<Config, _> = toml::from_str(r#"overwrite = "sometimes""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_example_config_parses() {
        let config: Config = toml::from_str(example_config()).unwrap();
        assert_eq!(config.overwrite, OverwritePolicy::Overwrite);
        assert!(config.escape_html);
        assert!(config.git.remote.is_none());
    }
}
