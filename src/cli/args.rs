//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Build-time asset publisher
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Manifest path (default: assetpress.toml, searched upward)
    #[arg(short = 'C', long, global = true, default_value = crate::config::MANIFEST_NAME, value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Publish categories and print their markup to stdout
    #[command(visible_alias = "b")]
    Build {
        /// Categories to process (default: all, in manifest order)
        categories: Vec<String>,
    },

    /// Move the build baseline to now and drop cached markup
    #[command(visible_alias = "r")]
    Reset,

    /// Print the output directory of a bundle
    Salt {
        /// Bundle key
        key: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_with_categories() {
        let cli = Cli::parse_from(["assetpress", "build", "top", "bottom"]);
        match cli.command {
            Commands::Build { categories } => assert_eq!(categories, ["top", "bottom"]),
            other => panic!("unexpected command: {other:?}"),
        }
        assert_eq!(cli.config, PathBuf::from("assetpress.toml"));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["assetpress", "reset", "-v", "-C", "site/assets.toml"]);
        assert!(cli.verbose);
        assert_eq!(cli.config, PathBuf::from("site/assets.toml"));
        assert!(matches!(cli.command, Commands::Reset));
    }

    #[test]
    fn test_version_flag_is_separate() {
        use clap::CommandFactory;
        Cli::command().debug_assert();

        let err = Cli::try_parse_from(["assetpress", "-V"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);

        let cli = Cli::parse_from(["assetpress", "--verbose", "build"]);
        assert!(cli.verbose);
    }

    #[test]
    fn test_salt_requires_key() {
        assert!(Cli::try_parse_from(["assetpress", "salt"]).is_err());
    }
}
