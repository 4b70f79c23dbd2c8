//! `playdeck.yaml` configuration.
//!
//! # Lookup order
//!
//! ```text
//! <project>/playdeck.yaml        (project-local, wins when present)
//! ~/.playdeck/config.yaml        (user-wide fallback)
//! built-in defaults              (neither file exists)
//! ```
//!
//! # API pattern
//!
//! - `load_at(project, home)`: explicit home; used in tests with `TempDir`
//! - `load(project)`: derives home from `dirs::home_dir()`, delegates to `load_at`

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::DEFAULT_DEPENDENCY_DIRS;

/// File name of the project-local configuration.
pub const CONFIG_FILE: &str = "playdeck.yaml";

/// External programs used by the build tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Toolchain {
    pub xcodebuild: PathBuf,
    pub xcrun: PathBuf,
}

impl Default for Toolchain {
    fn default() -> Self {
        Toolchain {
            xcodebuild: PathBuf::from("xcodebuild"),
            xcrun: PathBuf::from("xcrun"),
        }
    }
}

/// Settings shared by every pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Upper bound on playgrounds compiled at the same time.
    pub jobs: usize,
    /// Reuse an existing workspace build when one is available.
    pub cached: bool,
    /// Build directory, relative to the project root unless absolute.
    pub build_dir: PathBuf,
    /// Directory names that disqualify a workspace from discovery.
    pub dependency_dirs: Vec<String>,
    pub toolchain: Toolchain,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            jobs: 1,
            cached: false,
            build_dir: PathBuf::from(".playdeck"),
            dependency_dirs: DEFAULT_DEPENDENCY_DIRS
                .iter()
                .map(|d| (*d).to_owned())
                .collect(),
            toolchain: Toolchain::default(),
        }
    }
}

impl Config {
    /// `jobs`, never below one.
    pub fn jobs(&self) -> usize {
        self.jobs.max(1)
    }

    /// `build_dir` resolved against `project`.
    pub fn build_dir_for(&self, project: &Path) -> PathBuf {
        if self.build_dir.is_absolute() {
            self.build_dir.clone()
        } else {
            project.join(&self.build_dir)
        }
    }
}

/// `<home>/.playdeck/config.yaml`: pure, no I/O.
pub fn user_config_path_at(home: &Path) -> PathBuf {
    home.join(".playdeck").join("config.yaml")
}

/// Load the configuration for `project`, falling back to the user-wide file
/// under `home` and then to [`Config::default`].
///
/// Returns `ConfigError::Parse` (with path + line context) if a file exists
/// but is malformed.
pub fn load_at(project: &Path, home: Option<&Path>) -> Result<Config, ConfigError> {
    let local = project.join(CONFIG_FILE);
    if local.is_file() {
        return read(&local);
    }
    if let Some(home) = home {
        let user = user_config_path_at(home);
        if user.is_file() {
            return read(&user);
        }
    }
    Ok(Config::default())
}

/// `load_at` convenience wrapper.
pub fn load(project: &Path) -> Result<Config, ConfigError> {
    load_at(project, dirs::home_dir().as_deref())
}

fn read(path: &Path) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    if contents.trim().is_empty() {
        return Ok(Config::default());
    }
    serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}
