//! Configuration file locations.

use crate::ConfigError;
use directories::ProjectDirs;
use std::fmt;
use std::path::{Path, PathBuf};

/// Project config file name, tracked in git.
pub const PROJECT_FILE: &str = "pipewise.toml";

/// Local override file name, kept out of git.
pub const LOCAL_FILE: &str = "pipewise.local.toml";

/// A configuration file layer. Later layers override earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Layer {
    /// `config.toml` in the platform config directory.
    User,
    /// [`PROJECT_FILE`] in the project directory.
    Project,
    /// [`LOCAL_FILE`] in the project directory.
    Local,
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layer::User => write!(f, "user"),
            Layer::Project => write!(f, "project"),
            Layer::Local => write!(f, "local"),
        }
    }
}

/// Resolves configuration file paths for one project directory.
pub struct Paths {
    project_dirs: Option<ProjectDirs>,
}

impl Paths {
    pub fn new() -> Self {
        Self {
            project_dirs: ProjectDirs::from("dev", "Pipewise", "pipewise"),
        }
    }

    /// `config.toml` under the platform config directory for pipewise.
    pub fn user_config_file(&self) -> Result<PathBuf, ConfigError> {
        self.project_dirs
            .as_ref()
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .ok_or_else(|| {
                ConfigError::XdgError("no config directory for this platform".to_string())
            })
    }

    /// Candidate files for `project_dir`, lowest precedence first.
    ///
    /// The user layer is left out when `include_user` is false or the
    /// platform has no config directory. Files are not checked for existence.
    pub fn layered_files(&self, project_dir: &Path, include_user: bool) -> Vec<(Layer, PathBuf)> {
        let user = include_user
            .then(|| self.user_config_file().ok())
            .flatten()
            .map(|path| (Layer::User, path));

        user.into_iter()
            .chain([
                (Layer::Project, project_dir.join(PROJECT_FILE)),
                (Layer::Local, project_dir.join(LOCAL_FILE)),
            ])
            .collect()
    }
}

impl Default for Paths {
    fn default() -> Self {
        Self::new()
    }
}
