//! Makai Directory Manager - Main entrypoint.
//!
//! This is the main entry point for the Makai Directory Manager
//! application. It initializes the logging system, loads configuration,
//! and starts the interactive session.

use clap::{Parser, Subcommand};
use makai_dirman_lib::config;
use makai_dirman_lib::error::{set_error_reporter, MakaiError, MakaiResult, TracingErrorReporter};
use makai_dirman_lib::repl::Repl;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use tracing::info;

/// Command line arguments for the Makai Directory Manager.
#[derive(Parser, Debug)]
#[clap(name = "Makai Directory Manager", version, author, about)]
struct Args {
    /// Path to configuration file
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,

    /// Command to execute
    #[clap(subcommand)]
    command: Option<Command>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Start the interactive session
    Start,

    /// Validate the configuration file
    Validate,

    /// Generate a default configuration file
    GenConfig {
        /// Path to output configuration file
        #[clap(short, long, value_parser)]
        output: PathBuf,
    },
}

/// Initialize the logging system.
fn init_logging() -> MakaiResult<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_line_number(true)
        .with_file(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| MakaiError::Custom(format!("Failed to set global tracing subscriber: {e}")))
}

/// Main entry point for the application.
fn main() -> MakaiResult<()> {
    // Initialize logging early to capture any startup errors
    init_logging()?;

    // Set up error reporter
    set_error_reporter(Arc::new(TracingErrorReporter));

    // Parse command-line arguments
    let args = <Args as clap::Parser>::parse();

    // Load configuration
    let env_prefix = "MAKAI";
    let config_loader = config::ConfigLoader::new(args.config.as_deref(), env_prefix);

    match args.command.unwrap_or(Command::Start) {
        Command::Start => {
            info!("Starting Makai Directory Manager");

            // Load and validate configuration
            let config = match config_loader.load() {
                Ok(config) => config,
                Err(e) => {
                    tracing::error!("Configuration error: {}", e);
                    process::exit(1);
                }
            };

            // Initialize global configuration
            config::init_global_config(config);
            let config = config::get_global_config().get().clone();
            info!(
                "Session configured with prompt: {:?}, history limit: {}",
                config.repl.prompt, config.repl.history_limit
            );

            let mut repl = Repl::new(config);
            let stdin = std::io::stdin();
            let mut input = stdin.lock();
            let stdout = std::io::stdout();
            let mut output = stdout.lock();
            repl.run(&mut input, &mut output)
        }
        Command::Validate => {
            info!("Validating configuration");
            match config_loader.load() {
                Ok(_) => {
                    info!("Configuration validated successfully");
                    Ok(())
                }
                Err(e) => {
                    tracing::error!("Configuration validation error: {}", e);
                    process::exit(1);
                }
            }
        }
        Command::GenConfig { output } => {
            info!("Generating default configuration");
            let default_config = config::MakaiConfig::default();

            // Create parent directories if they don't exist
            if let Some(parent) = output.parent() {
                std::fs::create_dir_all(parent).map_err(MakaiError::Io)?;
            }

            // Serialize to TOML, or JSON when asked for by extension
            let rendered = match output.extension().and_then(|ext| ext.to_str()) {
                Some("json") => serde_json::to_string_pretty(&default_config).map_err(|e| {
                    MakaiError::Custom(format!("Failed to serialize config: {e}"))
                })?,
                _ => toml::to_string_pretty(&default_config)
                    .map_err(|e| MakaiError::Custom(format!("Failed to serialize config: {e}")))?,
            };

            // Write to file
            std::fs::write(&output, rendered).map_err(MakaiError::Io)?;

            info!("Default configuration written to {:?}", output);
            Ok(())
        }
    }
}
