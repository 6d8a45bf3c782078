//! `nwdi-checkstyle paths` command

use anyhow::Result;

use crate::cli::PathsArgs;
use crate::commands::load_workspace;
use crate::GlobalOptions;
use nwdi_checkstyle::ops::component_paths;

pub fn execute(args: PathsArgs, global_opts: &GlobalOptions) -> Result<()> {
    let shell = &global_opts.shell;
    let (ws, _) = load_workspace(global_opts)?;
    let report = component_paths(&ws, &args.components)?;

    if shell.is_json() {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for component in &report.components {
        println!("{}", component.component);
        println!("  base: {}", component.base.display());
        for path in &component.source_paths {
            println!("  source: {}", path.display());
        }
        for entry in &component.classpath {
            println!("  classpath: {} {}", entry.id, entry.location.display());
        }
    }

    for key in &report.unresolved {
        shell.warn(format!("unresolved reference {}", key));
    }
    Ok(())
}
