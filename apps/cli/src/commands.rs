//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Report, Result};
use indicatif::{ProgressBar, ProgressStyle};
use playlistextractor_core::{ProgressReporter, RunConfig, RunResult, extract_file, render_json};
use playlistextractor_shared::{
    AppConfig, PlaylistExtractorError, init_config, init_config_at, load_config, load_config_from,
};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// playlistextractor: collect saved playlist pages into one JSON file.
#[derive(Parser)]
#[command(
    name = "playlistextractor",
    version,
    about = "Extract playlist metadata from saved HTML pages into all_playlists.json.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (defaults to ~/.playlistextractor/playlistextractor.toml).
    #[arg(long, global = true, env = "PLAYLISTEXTRACTOR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand; `extract` when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Extract every saved page under a directory into one JSON file.
    Extract {
        /// Directory to search (defaults to the current directory).
        #[arg(long)]
        root: Option<PathBuf>,

        /// Output file (defaults to <root>/all_playlists.json).
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Extract a single page and print its record.
    Inspect {
        /// Saved playlist page.
        file: PathBuf,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Write a default config file.
    Init,
    /// Print the effective configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing
// ---------------------------------------------------------------------------

/// Initialize the tracing subscriber based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "playlistextractor=info",
        1 => "playlistextractor=debug",
        _ => "playlistextractor=trace",
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();
    match cli.command {
        None => cmd_extract(config_path, None, None),
        Some(Command::Extract { root, out }) => cmd_extract(config_path, root, out),
        Some(Command::Inspect { file }) => cmd_inspect(config_path, &file),
        Some(Command::Config { action }) => match action {
            ConfigAction::Init => cmd_config_init(config_path),
            ConfigAction::Show => cmd_config_show(config_path),
        },
    }
}

/// Process exit status for a failed run.
pub(crate) fn exit_code(report: &Report) -> u8 {
    report
        .downcast_ref::<PlaylistExtractorError>()
        .map_or(1, PlaylistExtractorError::exit_code)
}

fn load(config_path: Option<&Path>) -> Result<AppConfig> {
    let config = match config_path {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };
    Ok(config)
}

fn cmd_extract(
    config_path: Option<&Path>,
    root: Option<PathBuf>,
    out: Option<PathBuf>,
) -> Result<()> {
    let config = load(config_path)?;
    let root = match root {
        Some(root) => root,
        None => std::env::current_dir().map_err(|e| PlaylistExtractorError::io(".", e))?,
    };

    let run_config = RunConfig::from_app(&config, root, out);
    info!(
        root = %run_config.root.display(),
        output = %run_config.output.display(),
        "starting extraction"
    );

    let progress = CliProgress::new();
    let result = playlistextractor_core::run(&run_config, &progress);
    progress.spinner.finish_and_clear();
    let result = result?;

    println!(
        "The file {} was created ({} playlists, {} items)",
        result.output.display(),
        result.playlist_count,
        result.item_count
    );
    Ok(())
}

fn cmd_inspect(config_path: Option<&Path>, file: &Path) -> Result<()> {
    let config = load(config_path)?;
    let record = extract_file(file, &config.extract.origin)?;
    println!("{}", render_json(&record, config.output.indent.max(1))?);
    Ok(())
}

fn cmd_config_init(config_path: Option<&Path>) -> Result<()> {
    let path = match config_path {
        Some(path) => init_config_at(path)?,
        None => init_config()?,
    };
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(config_path: Option<&Path>) -> Result<()> {
    let config = load(config_path)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]);
        spinner.set_style(style);
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn discovered(&self, total: usize) {
        self.spinner.set_message(format!("Found {total} playlists"));
    }

    fn document_started(&self, path: &Path, current: usize, total: usize) {
        self.spinner
            .set_message(format!("Reading [{current}/{total}] {}", path.display()));
    }

    fn done(&self, _result: &RunResult) {
        self.spinner.finish_and_clear();
    }
}
