//! `nwdi-checkstyle generate` command

use anyhow::{bail, Result};

use crate::cli::GenerateArgs;
use crate::commands::{load_workspace, override_checkstyle_config};
use crate::GlobalOptions;
use nwdi_checkstyle::ops::{generate, GenerateOptions, GenerationReport};
use nwdi_checkstyle::util::diagnostic::suggestions;
use nwdi_checkstyle::util::{Shell, Status};

pub fn execute(args: GenerateArgs, global_opts: &GlobalOptions) -> Result<()> {
    let shell = &global_opts.shell;
    let (ws, mut config) = load_workspace(global_opts)?;
    override_checkstyle_config(&mut config, args.config.as_deref())?;
    let generate_config = config.generate_config(ws.root())?;

    let opts = GenerateOptions {
        mode: args.mode,
        components: args.components,
    };

    let report = generate(&ws, &generate_config, &opts, shell)?;
    summarize(shell, &report)
}

/// Print the outcome of a generation pass; fails if any component failed.
pub fn summarize(shell: &Shell, report: &GenerationReport) -> Result<()> {
    if !report.skipped.is_empty() {
        shell.note(format!(
            "{} component(s) without Java sources skipped",
            report.skipped.len()
        ));
    }
    if !report.unresolved.is_empty() {
        shell.warn(format!(
            "{} reference(s) left off the classpath: {}",
            report.unresolved.len(),
            report.unresolved.join(", ")
        ));
        shell.note(suggestions::UNRESOLVED_REFERENCE);
    }
    if report.has_failures() {
        bail!(
            "failed to generate build files for {} component(s)",
            report.failed.len()
        );
    }
    if let Some(dispatcher) = &report.dispatcher {
        shell.status(
            Status::Finished,
            format!(
                "run `ant -f {} {}` to analyse the workspace",
                dispatcher.build_file.display(),
                dispatcher.default_target
            ),
        );
    }
    Ok(())
}
