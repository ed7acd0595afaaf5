//! Styleport command-line entry point.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.verbose);

    match args.command {
        Commands::Convert {
            input,
            output,
            config,
            components,
            no_variants,
            utilities,
        } => commands::run_convert(&input, output, config, components, no_variants, utilities),
        Commands::Analyze {
            css_file,
            config,
            json,
        } => commands::run_analyze(&css_file, config, json),
        Commands::Validate { css_file } => commands::run_validate(&css_file),
        Commands::Preview {
            css,
            components,
            no_variants,
        } => commands::run_preview(&css, components, no_variants),
    }
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();
}
