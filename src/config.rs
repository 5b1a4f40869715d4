use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::errors::OmpsweepError;

/// Name of the project-local config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "ompsweep.toml";

/// Optional defaults loaded from TOML. Every key may be overridden on the
/// command line.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub env_var: Option<String>,
    pub interpreter: Option<String>,
    pub repeat: Option<usize>,
    pub thread_list: Option<String>,
    pub min_threads: Option<u32>,
    pub max_threads: Option<u32>,
    pub step_threads: Option<u32>,
    pub plot: Option<bool>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, OmpsweepError> {
        let content = std::fs::read_to_string(path).map_err(|e| OmpsweepError::Config {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;
        Self::parse(&content, path)
    }

    fn parse(content: &str, path: &Path) -> Result<Self, OmpsweepError> {
        toml::from_str(content).map_err(|e| OmpsweepError::Config {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })
    }

    /// Find the config to use.
    ///
    /// Looks for `ompsweep.toml` in `cwd`, then `ompsweep/config.toml` under
    /// the user config directory. Returns `Ok(None)` when neither exists; a
    /// file that exists but fails to parse is an error.
    pub fn discover(
        cwd: &Path,
        user_config_dir: Option<&Path>,
    ) -> Result<Option<(PathBuf, Self)>, OmpsweepError> {
        let mut candidates = vec![cwd.join(LOCAL_CONFIG_FILE)];
        if let Some(dir) = user_config_dir {
            candidates.push(dir.join("ompsweep").join("config.toml"));
        }

        for path in candidates {
            if path.is_file() {
                debug!(path = %path.display(), "loading config");
                let config = Self::load(&path)?;
                return Ok(Some((path, config)));
            }
        }
        Ok(None)
    }
}
