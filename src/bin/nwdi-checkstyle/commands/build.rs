//! `nwdi-checkstyle build` command

use anyhow::{bail, Result};

use crate::cli::BuildArgs;
use crate::commands::generate::summarize;
use crate::commands::{load_workspace, override_checkstyle_config};
use crate::GlobalOptions;
use nwdi_checkstyle::ops::{ant_properties, run_checkstyle, AntRunner, GenerateOptions, RunOptions};

pub fn execute(args: BuildArgs, global_opts: &GlobalOptions) -> Result<()> {
    let shell = &global_opts.shell;
    let (ws, mut config) = load_workspace(global_opts)?;
    override_checkstyle_config(&mut config, args.generate.config.as_deref())?;
    if let Some(dir) = args.checkstyle_dir {
        config.ant.checkstyle_dir = Some(dir);
    }
    let generate_config = config.generate_config(ws.root())?;

    let runner = AntRunner::from_config(&config.ant)?;
    let mut properties = ant_properties(&config.ant);
    properties.extend(args.properties);

    let opts = RunOptions {
        generate: GenerateOptions {
            mode: args.generate.mode,
            components: args.generate.components,
        },
        properties,
    };

    let report = run_checkstyle(&ws, &generate_config, &opts, &runner, shell)?;
    summarize(shell, &report.generation)?;

    if !report.success {
        bail!("checkstyle analysis failed");
    }
    Ok(())
}
