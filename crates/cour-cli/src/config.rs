use anyhow::{Context, Result};
use confyg::{env, Confygery};
use serde::Deserialize;
use std::path::PathBuf;

/// Settings layered as `--db` over `COUR_*` variables over the config
/// file over defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_db_path")]
    pub database_path: PathBuf,

    /// Passed straight to twyg.
    #[serde(default)]
    pub logging: twyg::Opts,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: default_db_path(),
            logging: twyg::Opts::default(),
        }
    }
}

impl Config {
    /// A missing config file is not an error; a malformed one is.
    pub fn load() -> Result<Self> {
        let mut builder = Confygery::new().context("Failed to create config builder")?;

        let path = config_file_path();
        if path.exists() {
            let path = path
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder.add_file(path).context("Failed to load config file")?;
        }
        builder
            .add_env(env::Options::with_top_level("cour"))
            .context("Failed to read COUR_* variables")?;

        builder.build().context("Failed to build configuration")
    }

    pub fn load_with_db_path(db_path: PathBuf) -> Result<Self> {
        let mut config = Self::load()?;
        config.database_path = db_path;
        Ok(config)
    }
}

fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cour")
        .join("cour.db")
}

/// `config.toml` under the platform config directory.
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cour")
        .join("config.toml")
}

/// Keys accepted by `cour config get` and `cour config set`.
pub const KNOWN_KEYS: &[&str] = &["database_path", "logging.level", "logging.coloured"];

pub fn example_config() -> &'static str {
    r#"# Cour Configuration File
# Overridden by COUR_* environment variables and by --db.

# Works, episode air dates, subscriptions and watch history.
# Defaults to cour/cour.db under the platform data directory.
#database_path = "/path/to/custom/cour.db"

[logging]
coloured = true
level = "info"
"#
}

/// Writes the example config unless a file exists. `true` if one was created.
pub fn ensure_config_file() -> Result<bool> {
    let config_path = config_file_path();

    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    std::fs::write(&config_path, example_config()).context("Failed to write config file")?;
    log::info!("Created config file {}", config_path.display());

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.database_path.as_os_str().is_empty());
        assert!(config.database_path.ends_with("cour/cour.db"));
    }

    #[test]
    fn test_config_load() {
        let result = Config::load();
        assert!(result.is_ok());
    }

    #[test]
    fn test_config_with_custom_db_path() {
        let custom_path = PathBuf::from("/tmp/cour-test.db");
        let config = Config::load_with_db_path(custom_path.clone()).unwrap();
        assert_eq!(config.database_path, custom_path);
    }

    #[test]
    fn test_example_config_is_valid_toml() {
        let doc = example_config()
            .parse::<toml_edit::DocumentMut>()
            .unwrap();
        assert!(doc.get("logging").is_some());
        assert!(doc.get("database_path").is_none());
    }

    #[test]
    fn test_config_file_path_in_cour_dir() {
        assert!(config_file_path().ends_with("cour/config.toml"));
    }
}
