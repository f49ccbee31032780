//! Configuration management for the Rukkor client.
//!
//! Loads configuration from ${RUKKOR_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Returns the default config template with comments.
///
/// This is embedded from default_config.toml at compile time.
/// To update, edit default_config.toml directly.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

/// Merges user config values into the default template.
///
/// This ensures new comments/sections from the template are always present,
/// while preserving user's customized values.
fn merge_with_template(user_config: &str) -> Result<String> {
    use toml_edit::DocumentMut;

    // Parse the template as the base
    let mut doc: DocumentMut = default_config_template()
        .parse()
        .context("Failed to parse default config template")?;

    // Parse user's existing config
    let user_doc: DocumentMut = user_config.parse().context("Failed to parse user config")?;

    // Overlay user values onto template
    merge_items(doc.as_table_mut(), user_doc.as_table());

    Ok(doc.to_string())
}

/// Recursively merges items from source table into target table.
fn merge_items(target: &mut toml_edit::Table, source: &toml_edit::Table) {
    use toml_edit::Item;

    for (key, value) in source.iter() {
        match value {
            Item::Value(v) => {
                target[key] = Item::Value(v.clone());
            }
            Item::Table(src_table) => {
                if let Some(Item::Table(target_table)) = target.get_mut(key) {
                    merge_items(target_table, src_table);
                } else {
                    target[key] = Item::Table(src_table.clone());
                }
            }
            Item::ArrayOfTables(src_arr) => {
                target[key] = Item::ArrayOfTables(src_arr.clone());
            }
            Item::None => {}
        }
    }
}

pub mod paths {
    //! Path resolution for Rukkor configuration and data directories.
    //!
    //! RUKKOR_HOME resolution order:
    //! 1. RUKKOR_HOME environment variable (if set)
    //! 2. ~/.config/rukkor (default)

    use std::path::PathBuf;

    /// Returns the Rukkor home directory.
    ///
    /// Checks RUKKOR_HOME env var first, falls back to ~/.config/rukkor
    pub fn rukkor_home() -> PathBuf {
        if let Ok(home) = std::env::var("RUKKOR_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("rukkor"))
            .expect("Could not determine home directory")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        rukkor_home().join("config.toml")
    }

    /// Returns the path to the session.json file (stored bearer token).
    pub fn session_path() -> PathBuf {
        rukkor_home().join("session.json")
    }

    /// Returns the directory log files are written to.
    pub fn log_dir() -> PathBuf {
        rukkor_home().join("logs")
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the Rukkor backend service.
    pub api_base_url: String,

    /// Path segment the auth endpoints are mounted under.
    pub auth_slug: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: Self::DEFAULT_API_BASE_URL.to_string(),
            auth_slug: Self::DEFAULT_AUTH_SLUG.to_string(),
        }
    }
}

impl Config {
    const DEFAULT_API_BASE_URL: &str = "https://api.rukkor.app";
    const DEFAULT_AUTH_SLUG: &str = "auth";

    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Returns the base URL the auth endpoints live under.
    ///
    /// Joins `api_base_url` and `auth_slug`, tolerating stray slashes in
    /// either value.
    pub fn auth_base_url(&self) -> String {
        let base = self.api_base_url.trim_end_matches('/');
        let slug = self.auth_slug.trim_matches('/');
        if slug.is_empty() {
            base.to_string()
        } else {
            format!("{base}/{slug}")
        }
    }

    /// Saves only the api_base_url field to the config file.
    ///
    /// Creates the file if it doesn't exist.
    /// Preserves existing fields and comments using toml_edit.
    pub fn save_api_base_url(url: &str) -> Result<()> {
        Self::save_api_base_url_to(&paths::config_path(), url)
    }

    /// Saves only the api_base_url field to a specific config file path.
    ///
    /// Creates the file with default template if it doesn't exist.
    /// If file exists, merges user values into the latest template.
    pub fn save_api_base_url_to(path: &Path, url: &str) -> Result<()> {
        use toml_edit::{DocumentMut, value};

        // Start from template, merge user values if file exists
        let contents = if path.exists() {
            let user_config = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            merge_with_template(&user_config)?
        } else {
            default_config_template().to_string()
        };

        let mut doc: DocumentMut = contents
            .parse()
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        doc["api_base_url"] = value(url);

        Self::write_config(path, &doc.to_string())
    }

    /// Creates a default config file at the given path.
    /// Returns an error if the file already exists.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.api_base_url, Config::DEFAULT_API_BASE_URL);
        assert_eq!(config.auth_slug, Config::DEFAULT_AUTH_SLUG);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "api_base_url = \"http://localhost:9000\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.api_base_url, "http://localhost:9000");
        assert_eq!(config.auth_slug, "auth");
    }

    #[test]
    fn auth_base_url_joins_without_double_slashes() {
        let config = Config {
            api_base_url: "http://localhost:9000/".to_string(),
            auth_slug: "/auth/".to_string(),
        };
        assert_eq!(config.auth_base_url(), "http://localhost:9000/auth");

        let bare = Config {
            api_base_url: "http://localhost:9000".to_string(),
            auth_slug: String::new(),
        };
        assert_eq!(bare.auth_base_url(), "http://localhost:9000");
    }

    #[test]
    fn save_api_base_url_preserves_existing_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "auth_slug = \"accounts\"\n").unwrap();

        Config::save_api_base_url_to(&path, "http://staging.rukkor.app").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.api_base_url, "http://staging.rukkor.app");
        assert_eq!(config.auth_slug, "accounts");
    }

    #[test]
    fn init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        Config::init(&path).unwrap();
        assert!(path.exists());
        assert!(Config::init(&path).is_err());
    }
}
