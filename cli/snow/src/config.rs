//! Configuration for the `snow` CLI.
//!
//! The compiler's own contract (`INFILE`/`OUTFILE`/`-d`/`-v`) never reads
//! this file — it only supplies *defaults* for flags the operator would
//! otherwise have to repeat on every invocation: whether `--debug` is on by
//! default, and where a relative `OUTFILE` lands when one isn't given.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

pub const CONFIG_FILE_NAME: &str = "snow.toml";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    /// Default for `--debug` when the flag isn't passed on the command line.
    #[serde(default)]
    pub debug: bool,

    /// Directory a relative `OUTFILE` is resolved against. `None` means the
    /// current directory.
    #[serde(default)]
    pub output_dir: Option<String>,
}

impl Config {
    /// Search current dir, then `~/.config/snow/`, then the OS config dir,
    /// for `snow.toml`. Returns the default configuration if none is found.
    pub fn load() -> Result<Self> {
        match Self::find_config_file() {
            Some(path) => Self::load_from_path(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolve `outfile` against `output_dir` when it is relative and a
    /// directory was configured; an absolute path, or no configured
    /// directory, passes through unchanged.
    pub fn resolve_output(&self, outfile: &Path) -> PathBuf {
        match &self.output_dir {
            Some(dir) if outfile.is_relative() => Path::new(dir).join(outfile),
            _ => outfile.to_path_buf(),
        }
    }

    fn check_current_dir_config() -> Option<PathBuf> {
        let path = PathBuf::from(CONFIG_FILE_NAME);
        path.exists().then_some(path)
    }

    fn check_home_config() -> Option<PathBuf> {
        dirs::home_dir()
            .map(|dir| dir.join(".config").join("snow").join(CONFIG_FILE_NAME))
            .filter(|path| path.exists())
    }

    fn check_system_config() -> Option<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("snow").join(CONFIG_FILE_NAME))
            .filter(|path| path.exists())
    }

    fn find_config_file() -> Option<PathBuf> {
        Self::check_current_dir_config()
            .or_else(Self::check_home_config)
            .or_else(Self::check_system_config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_has_no_forced_debug_or_output_dir() {
        let config = Config::default();
        assert!(!config.debug);
        assert_eq!(config.output_dir, None);
    }

    #[test]
    fn load_and_save_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("snow.toml");
        std::fs::write(&path, "debug = true\noutput_dir = \"out\"\n").unwrap();

        let config = Config::load_from_path(&path).unwrap();
        assert!(config.debug);
        assert_eq!(config.output_dir.as_deref(), Some("out"));
    }

    #[test]
    fn load_from_missing_path_is_an_error() {
        let err = Config::load_from_path(Path::new("/nonexistent/snow.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn resolve_output_only_rewrites_relative_paths_when_configured() {
        let config = Config {
            debug: false,
            output_dir: Some("build".to_string()),
        };
        assert_eq!(
            config.resolve_output(Path::new("stem.rs")),
            PathBuf::from("build/stem.rs")
        );
        assert_eq!(
            config.resolve_output(Path::new("/abs/stem.rs")),
            PathBuf::from("/abs/stem.rs")
        );

        let unconfigured = Config::default();
        assert_eq!(
            unconfigured.resolve_output(Path::new("stem.rs")),
            PathBuf::from("stem.rs")
        );
    }
}
