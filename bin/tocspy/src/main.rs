//! tocspy CLI
//!
//! Inspect, render and validate article tables of contents.
//!
//! This is the binary entry point. The library functionality is in `lib.rs`.

use clap::Parser;
use color_eyre::eyre::Result;
use tocspy_core::Config;

/// Command-line interface for tocspy.
#[derive(Parser)]
#[command(
    name = "tocspy",
    version,
    about = "Table of contents extraction and rendering for Markdown articles"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "tocspy.toml")]
    config: std::path::PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// Print the heading tree of an article
    Extract {
        /// Markdown article or JSON heading tree
        file: std::path::PathBuf,
        /// Print the flattened tracking order instead of the tree
        #[arg(long)]
        flat: bool,
    },
    /// Print static navigation HTML for an article
    Render {
        /// Markdown article or JSON heading tree
        file: std::path::PathBuf,
        /// Heading id to mark as the active section
        #[arg(long)]
        active: Option<String>,
    },
    /// Validate the headings of Markdown articles
    Check {
        /// File or directory to check
        #[arg(default_value = "content")]
        path: std::path::PathBuf,
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    tocspy::init_tracing(cli.verbose);

    let config = Config::load_or_default(&cli.config)?;

    match cli.command {
        Commands::Extract { file, flat } => {
            tocspy::cmd::extract::run(&file, flat, &config)?;
        }
        Commands::Render { file, active } => {
            tocspy::cmd::render::run(&file, active.as_deref(), &config)?;
        }
        Commands::Check { path, strict } => {
            tocspy::cmd::check::run(&path, strict, &config)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn test_cli_extract_command_parsing() {
        let args = ["tocspy", "extract", "post.md", "--flat"];
        let cli = Cli::parse_from(args);

        assert_eq!(cli.config, std::path::PathBuf::from("tocspy.toml"));
        assert_eq!(cli.verbose, 0);

        match cli.command {
            Commands::Extract { file, flat } => {
                assert_eq!(file, std::path::PathBuf::from("post.md"));
                assert!(flat);
            }
            _ => panic!("Expected Extract command"),
        }
    }

    #[test]
    fn test_cli_render_command_parsing() {
        let args = ["tocspy", "render", "toc.json", "--active", "install"];
        let cli = Cli::parse_from(args);

        match cli.command {
            Commands::Render { file, active } => {
                assert_eq!(file, std::path::PathBuf::from("toc.json"));
                assert_eq!(active.as_deref(), Some("install"));
            }
            _ => panic!("Expected Render command"),
        }
    }

    #[test]
    fn test_cli_check_defaults() {
        let args = ["tocspy", "check"];
        let cli = Cli::parse_from(args);

        match cli.command {
            Commands::Check { path, strict } => {
                assert_eq!(path, std::path::PathBuf::from("content"));
                assert!(!strict);
            }
            _ => panic!("Expected Check command"),
        }
    }

    #[test]
    fn test_cli_verbosity_flags() {
        let args = ["tocspy", "-vvv", "check", "--strict"];
        let cli = Cli::parse_from(args);
        assert_eq!(cli.verbose, 3);
    }

    #[test]
    fn test_cli_custom_config_path() {
        let args = ["tocspy", "--config", "site.toml", "extract", "a.md"];
        let cli = Cli::parse_from(args);
        assert_eq!(cli.config, std::path::PathBuf::from("site.toml"));
    }
}
