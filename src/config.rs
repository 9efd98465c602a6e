use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Settings for one documentation run, usually read from `autodoc.toml`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Repository name; a leading command path segment equal to it is
    /// dropped and it names the output directory.
    pub repo_name: String,
    /// Owner used when filtering links to the same GitHub repository.
    pub repo_owner: Option<String>,
    /// Grammar key, see [`crate::grammar::for_language`].
    pub language: String,
    pub output_root: PathBuf,
    pub strip_badges: bool,
    pub strip_html: bool,
    pub capture_content: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            repo_name: String::new(),
            repo_owner: None,
            language: "cli".to_string(),
            output_root: PathBuf::from("autodocs"),
            strip_badges: true,
            strip_html: true,
            capture_content: false,
        }
    }
}

impl Config {
    pub const FILE_NAME: &'static str = "autodoc.toml";

    /// Load a config file. A missing file is not an error.
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config = toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
            config_path: config_path.to_path_buf(),
            source,
        })?;

        Ok(Some(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        let loaded = Config::load_from_path(dir.path().join(Config::FILE_NAME)).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(Config::FILE_NAME);
        std::fs::write(&path, "repo_name = \"vorpal\"\nlanguage = \"javascript\"\n").unwrap();

        let config = Config::load_from_path(&path).unwrap().unwrap();
        assert_eq!(
            config,
            Config {
                repo_name: "vorpal".into(),
                language: "javascript".into(),
                ..Config::default()
            }
        );
    }

    #[test]
    fn invalid_toml_reports_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(Config::FILE_NAME);
        std::fs::write(&path, "repo_name = [").unwrap();

        let err = Config::load_from_path(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
        assert!(err.to_string().contains(Config::FILE_NAME));
    }
}
