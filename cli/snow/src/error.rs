//! Error types for the `snow` CLI boundary.
//!
//! Library crates downstream (`snowc-drv` and below) use typed `thiserror`
//! enums; this crate adds one more for its own concern (config discovery and
//! parsing), and `main` composes everything with `anyhow` at the process
//! boundary: typed errors inside, `anyhow` at `main`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read configuration {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;
