//! pcbplace — command-line front end for the component autoplacer.
//!
//! Provides `pcbplace place` to run the placer on a JSON board file,
//! `pcbplace info` to inspect a board and the grid it would get, and
//! `pcbplace init` to write a default `autoplace.toml`.

#![warn(missing_docs)]

mod info;
mod init;
mod place;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use pcbplace_config::AutoplaceConfig;
use tracing_subscriber::EnvFilter;

/// pcbplace — grid-based PCB component autoplacer.
#[derive(Parser, Debug)]
#[command(name = "pcbplace", version, about = "PCB component autoplacer")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Control colored output.
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to a custom `autoplace.toml` configuration file.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Place footprints on a board.
    Place(PlaceArgs),
    /// Print board and grid statistics.
    Info(InfoArgs),
    /// Write a default `autoplace.toml`.
    Init {
        /// Directory to write into. Defaults to the current directory.
        dir: Option<String>,
    },
}

/// Arguments for the `pcbplace place` subcommand.
#[derive(Parser, Debug)]
pub struct PlaceArgs {
    /// Board file (JSON).
    pub board: String,

    /// Where to write the placed board. Defaults to overwriting the input.
    #[arg(short, long)]
    pub output: Option<String>,

    /// Grid cell size (e.g., "0.5mm", "25mil").
    #[arg(long)]
    pub grid: Option<String>,

    /// Also place footprints lying outside the board.
    #[arg(long)]
    pub off_board: bool,

    /// Reference designators to place (default: every pending footprint).
    #[arg(long, num_args = 1..)]
    pub select: Vec<String>,

    /// Run the exact free-area test after the grid test.
    #[arg(long)]
    pub polygon_check: bool,

    /// Output format for diagnostics and results.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Arguments for the `pcbplace info` subcommand.
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Board file (JSON).
    pub board: String,

    /// Grid cell size to size the routing matrix with.
    #[arg(long)]
    pub grid: Option<String>,
}

/// Controls whether colored output is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Detect from terminal capabilities.
    Auto,
    /// Always produce colored output.
    Always,
    /// Never produce colored output.
    Never,
}

/// Diagnostic output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable terminal output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose/debug information.
    pub verbose: bool,
    /// Whether to use colored output.
    pub color: bool,
    /// Optional path to a custom config file.
    pub config: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let color = match cli.color {
        ColorChoice::Auto => std::env::var("TERM").is_ok() && std::env::var("NO_COLOR").is_err(),
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    };

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        color,
        config: cli.config,
    };
    init_tracing(&global);

    let result = match cli.command {
        Command::Place(ref args) => place::run(args, &global),
        Command::Info(ref args) => info::run(args, &global),
        Command::Init { dir } => init::run(dir),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

/// Installs the stderr log subscriber.
///
/// `--verbose` and `--quiet` win over `RUST_LOG`.
fn init_tracing(global: &GlobalArgs) {
    let filter = if global.verbose {
        EnvFilter::new("debug")
    } else if global.quiet {
        EnvFilter::new("error")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(global.color)
        .with_target(false)
        .try_init();
}

/// Loads the configuration: `--config` if given, else `autoplace.toml` next
/// to the board file, else defaults.
pub(crate) fn resolve_config(
    global: &GlobalArgs,
    board_path: &Path,
) -> Result<AutoplaceConfig, pcbplace_config::ConfigError> {
    match &global.config {
        Some(path) => pcbplace_config::load_config_file(Path::new(path)),
        None => {
            let dir = board_path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
            pcbplace_config::load_config_or_default(&dir)
        }
    }
}
