//! CLI entry and dispatch.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use codeblock_core::color_mode::{self, ColorMode};
use codeblock_core::config::{self, Config};
use codeblock_core::logging;

mod commands;

#[derive(Parser)]
#[command(name = "codeblock")]
#[command(version)]
#[command(about = "View a highlighted code block with a copy-to-clipboard button")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    source: SourceArgs,
}

/// Where the code comes from and how to present it.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// File to display (reads stdin when omitted or "-")
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Language tag for highlighting (default: from the file extension, else "hcl")
    #[arg(short, long)]
    pub language: Option<String>,

    /// Filename shown in the header (default: the file's name, else "main.tf")
    #[arg(short, long)]
    pub filename: Option<String>,

    /// Force light or dark mode (default: config, then terminal detection)
    #[arg(long, value_enum, env = "CODEBLOCK_MODE")]
    pub mode: Option<ModeArg>,
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeArg {
    Light,
    Dark,
}

impl From<ModeArg> for ColorMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Light => ColorMode::Light,
            ModeArg::Dark => ColorMode::Dark,
        }
    }
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorChoice {
    /// Color when stdout is a terminal
    #[default]
    Auto,
    Always,
    Never,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Open the interactive viewer (default)
    View {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Print the highlighted block to stdout
    Print {
        #[command(flatten)]
        source: SourceArgs,

        /// When to emit ANSI colors
        #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
        color: ColorChoice,
    },
    /// List available highlight themes
    Themes,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

impl Cli {
    /// Only the rendering commands write logs.
    fn renders(&self) -> bool {
        matches!(
            self.command,
            None | Some(Commands::View { .. } | Commands::Print { .. })
        )
    }
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = if cli.renders() {
        match logging::init(&config::paths::logs_dir()) {
            Ok(guard) => Some(guard),
            Err(err) => {
                eprintln!("Warning: logging disabled: {err:#}");
                None
            }
        }
    } else {
        None
    };

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;
    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let Cli { command, source } = cli;

    let Some(command) = command else {
        let config = Config::load().context("load config")?;
        return commands::view::run(&source, &config).await;
    };

    match command {
        Commands::View { source } => {
            let config = Config::load().context("load config")?;
            commands::view::run(&source, &config).await
        }
        Commands::Print { source, color } => {
            let config = Config::load().context("load config")?;
            commands::print::run(&source, &config, color)
        }
        Commands::Themes => {
            commands::themes::list();
            Ok(())
        }
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },
    }
}

/// Resolves the ambient color mode for this run.
pub(crate) fn resolve_mode(source: &SourceArgs, config: &Config) -> ColorMode {
    color_mode::resolve_color_mode(
        source.mode.map(ColorMode::from),
        config.color_mode,
        ColorMode::detect(),
    )
}
