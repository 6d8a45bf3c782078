//! `nwdi-checkstyle check` command

use anyhow::{bail, Result};

use crate::cli::CheckArgs;
use crate::commands::{load_workspace, override_checkstyle_config};
use crate::GlobalOptions;
use nwdi_checkstyle::builder::CommandAnalyzer;
use nwdi_checkstyle::ops::{check, CheckOptions};
use nwdi_checkstyle::util::Status;

pub fn execute(args: CheckArgs, global_opts: &GlobalOptions) -> Result<()> {
    let shell = &global_opts.shell;
    let (ws, mut config) = load_workspace(global_opts)?;
    override_checkstyle_config(&mut config, args.config.as_deref())?;
    if let Some(jar) = args.jar {
        config.analysis.jar = Some(jar);
    }
    let generate_config = config.generate_config(ws.root())?;

    let analyzer = CommandAnalyzer::from_config(
        config.analysis.java.as_deref(),
        config.analysis.jar.as_deref(),
    )?;

    let opts = CheckOptions {
        components: args.components,
    };
    let report = check(&ws, &generate_config, &opts, &analyzer, shell)?;

    if !report.failed.is_empty() {
        bail!("checkstyle failed on {} component(s)", report.failed.len());
    }
    shell.status(
        Status::Finished,
        format!(
            "{} file(s) in {} component(s) analysed",
            report.file_count(),
            report.analyzed.len()
        ),
    );
    Ok(())
}
