//! iconsmith - Generate every platform app icon from one source image.

mod catalog;
mod cli;
mod config;
mod icon;
mod logger;

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::IconConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    match &cli.command {
        Commands::Init { dry } => {
            let cwd = std::env::current_dir().context("Failed to get current working directory")?;
            cli::init::new_project(&cwd, &cli.config, *dry)
        }
        Commands::Generate { args } => {
            let config = IconConfig::load(&cli)?;
            cli::generate::generate(&config, args.dry)
        }
        Commands::Matte {
            input,
            output,
            threshold,
        } => cli::matte::matte_file(input, output, *threshold),
        Commands::Place { args } => cli::place::place_file(args),
        Commands::Pack { args } => cli::pack::pack_file(args),
    }
}
