//! Merges configuration sources into a validated [`PipewiseConfig`].
//!
//! Precedence, lowest first: built-in defaults, the file [`Layer`]s from
//! [`Paths::layered_files`], then `PIPEWISE_SECTION__KEY` variables.

use crate::paths::Layer;
use crate::{Paths, PipewiseConfig};
use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use std::env;
use std::path::{Path, PathBuf};

/// Builder over the sources [`load`](Self::load) merges.
pub struct ConfigLoader {
    project_dir: PathBuf,
    env_prefix: String,
    env_vars: Option<config::Map<String, String>>,
    user_config: bool,
}

impl ConfigLoader {
    /// Loader for the current directory, reading `PIPEWISE_*` variables.
    pub fn new() -> Self {
        Self {
            project_dir: env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            env_prefix: "PIPEWISE".to_string(),
            env_vars: None,
            user_config: true,
        }
    }

    pub fn with_project_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.project_dir = dir.as_ref().to_path_buf();
        self
    }

    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Reads variables from `vars` instead of the process environment.
    pub fn with_env_vars(mut self, vars: config::Map<String, String>) -> Self {
        self.env_vars = Some(vars);
        self
    }

    /// Leaves out the [`Layer::User`] file.
    pub fn without_user_config(mut self) -> Self {
        self.user_config = false;
        self
    }

    /// Files that exist for this loader, lowest precedence first.
    pub fn present_files(&self) -> Vec<(Layer, PathBuf)> {
        Paths::new()
            .layered_files(&self.project_dir, self.user_config)
            .into_iter()
            .filter(|(_, path)| path.is_file())
            .collect()
    }

    pub fn load(self) -> Result<PipewiseConfig> {
        let mut builder =
            Config::builder().add_source(Config::try_from(&PipewiseConfig::default())?);

        for (_, path) in self.present_files() {
            builder = builder.add_source(File::from(path.as_path()).format(FileFormat::Toml));
        }

        // keys such as parallel_threshold contain `_`, so sections split on `__`
        builder = builder.add_source(
            Environment::with_prefix(&self.env_prefix)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(self.env_vars),
        );

        let merged: PipewiseConfig = builder
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")?;
        merged.validate().context("Configuration failed validation")?;
        Ok(merged)
    }

    /// [`load`](Self::load), falling back to defaults on any error.
    pub fn load_or_default(self) -> PipewiseConfig {
        self.load().unwrap_or_default()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
