//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use nwdi_checkstyle::core::ComponentId;
use nwdi_checkstyle::util::shell::ColorChoice;
use nwdi_checkstyle::RenderMode;

/// nwdi-checkstyle - Checkstyle analysis for NWDI development components
#[derive(Parser)]
#[command(name = "nwdi-checkstyle")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print errors only
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Coloring: auto, always, never
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Output format for messages
    #[arg(long, global = true, value_enum, default_value_t = MessageFormat::Human)]
    pub message_format: MessageFormat,

    /// Workspace root (defaults to the nearest directory with a components.toml)
    #[arg(short, long, global = true)]
    pub workspace: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MessageFormat {
    Human,
    Json,
}

impl MessageFormat {
    pub fn is_json(self) -> bool {
        self == MessageFormat::Json
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate checkstyle build files for the workspace
    Generate(GenerateArgs),

    /// Generate build files and run them with Ant
    Build(BuildArgs),

    /// Run checkstyle directly, without Ant
    Check(CheckArgs),

    /// Show the source folders and classpath of each component
    Paths(PathsArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Build file layout (overrides `checkstyle.mode`)
    #[arg(long, value_parser = parse_mode)]
    pub mode: Option<RenderMode>,

    /// Checkstyle configuration file (overrides `checkstyle.config`)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Only these components (`vendor/name`, repeatable)
    #[arg(short, long = "component", value_name = "VENDOR/NAME")]
    pub components: Vec<ComponentId>,
}

#[derive(Args)]
pub struct BuildArgs {
    #[command(flatten)]
    pub generate: GenerateArgs,

    /// Directory holding the checkstyle jars (overrides `ant.checkstyle-dir`)
    #[arg(long)]
    pub checkstyle_dir: Option<PathBuf>,

    /// Extra Ant property (`key=value`, repeatable)
    #[arg(short = 'D', value_name = "KEY=VALUE", value_parser = parse_property)]
    pub properties: Vec<(String, String)>,
}

#[derive(Args)]
pub struct CheckArgs {
    /// Only these components (`vendor/name`, repeatable)
    #[arg(short, long = "component", value_name = "VENDOR/NAME")]
    pub components: Vec<ComponentId>,

    /// Checkstyle configuration file (overrides `checkstyle.config`)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Checkstyle jar (overrides `analysis.jar`)
    #[arg(long)]
    pub jar: Option<PathBuf>,
}

#[derive(Args)]
pub struct PathsArgs {
    /// Only these components (`vendor/name`, repeatable)
    #[arg(short, long = "component", value_name = "VENDOR/NAME")]
    pub components: Vec<ComponentId>,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}

fn parse_mode(s: &str) -> Result<RenderMode, String> {
    s.parse()
}

fn parse_property(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("invalid property `{}`; expected `key=value`", s)),
    }
}
