//! Command implementations

pub mod build;
pub mod check;
pub mod completions;
pub mod generate;
pub mod paths;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::GlobalOptions;
use nwdi_checkstyle::core::Workspace;
use nwdi_checkstyle::util::{Config, GlobalContext};

/// Load the workspace named by `--workspace`, or the one around the
/// current directory, with its merged configuration.
pub fn load_workspace(global_opts: &GlobalOptions) -> Result<(Workspace, Config)> {
    let ctx = GlobalContext::new()?;

    let root = match &global_opts.workspace {
        Some(root) => absolute(ctx.cwd(), root),
        None => ctx.find_workspace_root()?,
    };

    let ws = Workspace::load(&root)?;
    let config = ctx.load_config(ws.root());
    Ok((ws, config))
}

/// Apply a `--config` override, relative to the current directory.
pub fn override_checkstyle_config(config: &mut Config, path: Option<&Path>) -> Result<()> {
    if let Some(path) = path {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        config.checkstyle.config = Some(absolute(&cwd, path));
    }
    Ok(())
}

fn absolute(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}
