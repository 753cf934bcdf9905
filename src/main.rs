//! assetpress - build-time asset publisher.

use std::io;

use anyhow::Result;
use assetpress::cli::{self, Cli, Commands};
use assetpress::config::Manifest;
use assetpress::logger;
use clap::{ColorChoice, Parser};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let manifest = Manifest::load(&cli.config)?;

    match &cli.command {
        Commands::Build { categories } => {
            cli::build::build_categories(&manifest, categories, &mut io::stdout().lock())
        }
        Commands::Reset => cli::reset::reset(&manifest),
        Commands::Salt { key } => {
            println!("{}", cli::salt::bundle_dir(&manifest, key)?);
            Ok(())
        }
    }
}
