//! nwdi-checkstyle CLI - Checkstyle analysis for NWDI development components

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use nwdi_checkstyle::util::diagnostic::{emit, Diagnostic};
use nwdi_checkstyle::util::Shell;

mod cli;
mod commands;

use cli::{Cli, Commands};

/// Options shared by every command.
pub struct GlobalOptions {
    pub shell: Arc<Shell>,
    /// Workspace root given with `--workspace`
    pub workspace: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    let shell = Arc::new(Shell::from_flags(
        cli.quiet,
        cli.verbose,
        cli.color,
        cli.message_format.is_json(),
    ));

    if let Err(e) = run(cli, Arc::clone(&shell)) {
        emit(&Diagnostic::from_error(&e), shell.use_color());
        std::process::exit(1);
    }
}

fn run(cli: Cli, shell: Arc<Shell>) -> Result<()> {
    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("nwdi_checkstyle=debug")
    } else if cli.quiet || shell.is_json() {
        EnvFilter::new("nwdi_checkstyle=error")
    } else {
        EnvFilter::new("nwdi_checkstyle=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let global_opts = GlobalOptions {
        shell,
        workspace: cli.workspace,
    };

    match cli.command {
        Commands::Generate(args) => commands::generate::execute(args, &global_opts),
        Commands::Build(args) => commands::build::execute(args, &global_opts),
        Commands::Check(args) => commands::check::execute(args, &global_opts),
        Commands::Paths(args) => commands::paths::execute(args, &global_opts),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
