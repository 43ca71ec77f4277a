//! Haulroute CLI: lay out, render and summarize freight trip routes
//!
//! ## Usage
//!
//! ```bash
//! haulroute layout trip.json                  # Waypoints and edges
//! haulroute render trip.json --frames 60 -o frame.svg
//! haulroute render trip.json --loading        # Placeholder frame
//! haulroute summary trip.json --format json   # Totals and leg cards
//! haulroute theme --toggle                    # Flip the stored theme
//! ```

use clap::Parser;
use haulroute_cli::{
    handlers::{execute_config, execute_layout, execute_render, execute_summary, execute_theme},
    init_logging, Cli, CliConfig, CliResult, ColorChoice, Commands, FileConfig, Verbosity,
};
use std::process::ExitCode;
use tracing::debug;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = build_config(&cli)?;
    init_logging(config.verbosity);
    debug!(?config, "effective configuration");

    match cli.command {
        Commands::Layout(args) => execute_layout(&config, &args),
        Commands::Render(args) => execute_render(&config, &args),
        Commands::Summary(args) => execute_summary(&config, &args),
        Commands::Theme(args) => execute_theme(&config, &args).map(|_| ()),
        Commands::Config(args) => execute_config(&config, &args),
    }
}

fn build_config(cli: &Cli) -> CliResult<CliConfig> {
    let mut config = CliConfig::new();
    if let Some(path) = &cli.config {
        config = config.merge_file(FileConfig::load(path)?);
    }

    let verbosity = Verbosity::from_flags(cli.quiet, cli.verbose);
    let color: ColorChoice = cli.color.clone().into();
    Ok(config.with_verbosity(verbosity).with_color(color))
}
