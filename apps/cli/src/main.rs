//! playlistextractor CLI: turns saved playlist pages into one JSON file.
//!
//! Walks the working directory for `.html` pages, extracts each playlist's
//! title, byline, description, and items, and writes `all_playlists.json`.

mod commands;

use std::process::ExitCode;

use clap::Parser;

use commands::Cli;

fn main() -> ExitCode {
    if let Err(err) = color_eyre::install() {
        eprintln!("failed to install error reporter: {err}");
        return ExitCode::FAILURE;
    }

    let cli = Cli::parse();
    commands::init_tracing(&cli);

    match commands::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(report) => {
            eprintln!("Error: {report:?}");
            ExitCode::from(commands::exit_code(&report))
        }
    }
}
