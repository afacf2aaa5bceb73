//! # Configuration
//!
//! Process-level configuration is managed by [`confique`], which layers
//! environment variables over a TOML file over compiled defaults. Store
//! preferences (cache bound, theme, language) are not here: they live in the
//! storage backend, see [`crate::settings`].
//!
//! ## Resolution Order
//!
//! 1. **Explicit override**: the CLI `--data` flag (data directory only).
//! 2. **Environment variables**: `CLIPSTASH_DATA_DIR`, `CLIPSTASH_LOG`.
//! 3. **Config file**: `clipstash.toml` in the OS config directory
//!    (via the `directories` crate).
//! 4. **Compiled defaults**: `#[config(default = ...)]`, and the OS data
//!    directory for storage.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `data_dir` | OS data dir | Where the store files live |
//! | `log_level` | `warn` | Log filter used when `RUST_LOG` is unset |

use crate::error::{ClipError, Result};
use confique::Config;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "clipstash.toml";

#[derive(Config, Debug, Clone, PartialEq, Eq)]
pub struct ClipstashConfig {
    /// Directory holding the store files.
    #[config(env = "CLIPSTASH_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Log filter (e.g. "info", "clipstashapp=debug") used when RUST_LOG is unset.
    #[config(env = "CLIPSTASH_LOG", default = "warn")]
    pub log_level: String,
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "clipstash", "clipstash")
}

impl ClipstashConfig {
    /// Load from the environment and, if given, a TOML file.
    /// A file that does not exist contributes nothing.
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder().env();
        if let Some(path) = config_file {
            builder = builder.file(path);
        }
        builder.load().map_err(|e| ClipError::Config(e.to_string()))
    }

    /// `clipstash.toml` in the OS config directory.
    pub fn default_config_file() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Pick the data directory: explicit override, then configured value,
    /// then the OS data directory.
    pub fn resolve_data_dir(&self, override_dir: Option<PathBuf>) -> Result<PathBuf> {
        if let Some(dir) = override_dir.or_else(|| self.data_dir.clone()) {
            return Ok(dir);
        }
        project_dirs()
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| ClipError::Config("could not determine a data directory".to_string()))
    }
}
