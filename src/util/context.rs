//! Global context for all operations.
//!
//! Provides centralized access to the working directory, the global
//! configuration location and workspace discovery.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::workspace::{find_workspace_root, ManifestError};
use crate::util::config::{global_config_dir, load_config, project_config_path, Config};

/// Global context containing configuration and paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Home directory for global data (~/.nwdi-checkstyle/)
    home: PathBuf,
}

impl GlobalContext {
    /// Create a new GlobalContext with defaults.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;

        let home = global_config_dir().unwrap_or_else(|| PathBuf::from(".nwdi-checkstyle"));

        Ok(GlobalContext { cwd, home })
    }

    /// Create a GlobalContext with a specific working directory.
    pub fn with_cwd(cwd: PathBuf) -> Result<Self> {
        let mut ctx = Self::new()?;
        ctx.cwd = cwd;
        Ok(ctx)
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Get the home directory (~/.nwdi-checkstyle/).
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Get the global configuration file path.
    pub fn config_path(&self) -> PathBuf {
        self.home.join("config.toml")
    }

    /// Find the workspace root (directory containing `components.toml`),
    /// searching upward from the working directory.
    pub fn find_workspace_root(&self) -> Result<PathBuf, ManifestError> {
        find_workspace_root(&self.cwd)
    }

    /// Load the merged global and project configuration for a workspace.
    pub fn load_config(&self, workspace_root: &Path) -> Config {
        load_config(&self.config_path(), &project_config_path(workspace_root))
    }
}
