//! ngxforge - programmatic nginx configuration builder
//!
//! This is the main entry point for the ngxforge CLI.

use anyhow::Context;
use clap::{Parser, Subcommand};
use ngxforge_core::config::SettingsLoader;
use ngxforge_core::helpers::simple_configuration;
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// ngxforge - build nginx configs from blueprints
#[derive(Parser)]
#[command(name = "ngxforge")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a blueprint to nginx config text
    Render {
        /// Path to the blueprint (.toml or .json)
        #[arg(default_value = "ngxforge.toml")]
        blueprint: PathBuf,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Settings file (.toml or .json) overriding the blueprint's settings
        #[arg(short, long)]
        settings: Option<PathBuf>,
    },

    /// Print a small complete configuration
    Simple {
        /// Port the example server listens on
        #[arg(long, default_value_t = 80)]
        port: u16,
    },

    /// Validate a blueprint
    Validate {
        /// Path to the blueprint (.toml or .json)
        #[arg(default_value = "ngxforge.toml")]
        blueprint: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so rendered config on stdout stays clean
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if cli.verbose { "debug" } else { "warn" }));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Render {
            blueprint,
            output,
            settings,
        } => {
            let text = render_blueprint(&blueprint, settings.as_deref())?;
            match output {
                Some(path) => {
                    std::fs::write(&path, text.trim_start())
                        .with_context(|| format!("writing {}", path.display()))?;
                    tracing::info!("Wrote {}", path.display());
                }
                None => println!("{}", text.trim_start()),
            }
        }

        Commands::Simple { port } => {
            println!("{}", simple_configuration(port).to_string().trim_start());
        }

        Commands::Validate { blueprint } => {
            tracing::info!("Validating blueprint: {}", blueprint.display());
            match ngxforge_config::compile_file(&blueprint) {
                Ok(_) => println!("Blueprint '{}' is valid", blueprint.display()),
                Err(e) => {
                    eprintln!("Blueprint error: {e}");
                    std::process::exit(1);
                }
            }
        }

        Commands::Version => {
            println!("ngxforge v{}", ngxforge_core::VERSION);
        }
    }

    Ok(())
}

fn render_blueprint(path: &Path, settings: Option<&Path>) -> anyhow::Result<String> {
    let mut blueprint = ngxforge_config::load_file(path)
        .with_context(|| format!("loading {}", path.display()))?;
    if let Some(settings) = settings {
        blueprint.settings = SettingsLoader::load(settings)
            .with_context(|| format!("loading settings {}", settings.display()))?;
    }
    let builder = ngxforge_config::compile_blueprint(&blueprint)
        .with_context(|| format!("compiling {}", path.display()))?;
    Ok(builder.render())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn render_subcommand_defaults() {
        let cli = Cli::try_parse_from(["ngxforge", "render"]).unwrap();
        match cli.command {
            Commands::Render {
                blueprint,
                output,
                settings,
            } => {
                assert_eq!(blueprint, PathBuf::from("ngxforge.toml"));
                assert!(output.is_none());
                assert!(settings.is_none());
            }
            _ => panic!("expected render"),
        }
    }
}
