//! Implementation of `nwdi-checkstyle build`: generate, then hand the
//! workspace build file to Ant.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use thiserror::Error;

use crate::core::Workspace;
use crate::ops::generate::{generate, GenerateOptions, GenerationReport};
use crate::util::config::{AntConfig, GenerateConfig};
use crate::util::fs::ant_path;
use crate::util::process::{find_ant, ProcessBuilder};
use crate::util::shell::{format_duration, Shell, Status};

/// Property naming the directory of the Checkstyle jars.
pub const CHECKSTYLE_DIR_PROPERTY: &str = "checkstyle.dir";

#[derive(Debug, Error)]
pub enum RunError {
    #[error("Apache Ant not found in ANT_HOME or PATH")]
    AntNotFound,
}

/// Runs a target of a build file.
pub trait BuildRunner {
    /// Returns whether the target succeeded.
    fn run(&self, build_file: &Path, target: &str, properties: &BTreeMap<String, String>)
        -> Result<bool>;
}

/// Runs build files with Apache Ant.
#[derive(Debug, Clone)]
pub struct AntRunner {
    program: PathBuf,
}

impl AntRunner {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        AntRunner {
            program: program.into(),
        }
    }

    /// Use the configured program, else find `ant` through `ANT_HOME` or PATH.
    pub fn from_config(config: &AntConfig) -> Result<Self> {
        match &config.program {
            Some(program) => Ok(AntRunner::new(program)),
            None => find_ant()
                .map(AntRunner::new)
                .ok_or_else(|| RunError::AntNotFound.into()),
        }
    }

    /// `ant -f <file> -Dkey=value... <target>`
    pub fn command(
        &self,
        build_file: &Path,
        target: &str,
        properties: &BTreeMap<String, String>,
    ) -> ProcessBuilder {
        let mut cmd = ProcessBuilder::new(&self.program)
            .arg("-f")
            .arg(build_file);
        for (key, value) in properties {
            cmd = cmd.arg(format!("-D{}={}", key, value));
        }
        let cmd = cmd.arg(target);

        match build_file.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => cmd.cwd(dir),
            _ => cmd,
        }
    }
}

impl BuildRunner for AntRunner {
    fn run(
        &self,
        build_file: &Path,
        target: &str,
        properties: &BTreeMap<String, String>,
    ) -> Result<bool> {
        let cmd = self.command(build_file, target, properties);
        tracing::debug!("Running {}", cmd.display_command());
        let status = cmd.status()?;
        Ok(status.success())
    }
}

/// Properties passed to every Ant run: `checkstyle.dir` plus configured ones.
pub fn ant_properties(config: &AntConfig) -> BTreeMap<String, String> {
    let mut properties = config.properties.clone();
    if let Some(dir) = &config.checkstyle_dir {
        properties.insert(CHECKSTYLE_DIR_PROPERTY.to_string(), ant_path(dir));
    }
    properties
}

/// Options for `build`.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub generate: GenerateOptions,
    pub properties: BTreeMap<String, String>,
}

/// Outcome of `build`.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub generation: GenerationReport,
    pub success: bool,
}

/// Generate the build files, then run the workspace build file's default
/// target.
pub fn run_checkstyle(
    ws: &Workspace,
    config: &GenerateConfig,
    opts: &RunOptions,
    runner: &dyn BuildRunner,
    shell: &Arc<Shell>,
) -> Result<RunReport> {
    let generation = generate(ws, config, &opts.generate, shell)?;
    let dispatcher = generation
        .dispatcher
        .clone()
        .context("generation produced no workspace build file")?;

    shell.status(
        Status::Running,
        format!("{} ({})", dispatcher.default_target, dispatcher.build_file.display()),
    );
    let start = Instant::now();
    let success = runner
        .run(&dispatcher.build_file, &dispatcher.default_target, &opts.properties)
        .with_context(|| format!("failed to run {}", dispatcher.build_file.display()))?;

    if success {
        shell.status(
            Status::Finished,
            format!(
                "checkstyle analysis of {} ({})",
                ws.root().display(),
                format_duration(start.elapsed())
            ),
        );
    } else {
        shell.error(format!("target `{}` failed", dispatcher.default_target));
    }

    Ok(RunReport {
        generation,
        success,
    })
}
