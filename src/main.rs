//! ticket-desk - Interactive support ticket desk
//!
//! This is the main entry point for the ticket-desk CLI application.
//! It parses command-line arguments, loads configuration and hands control
//! to the menu shell.

use clap::Parser;
use std::io::{self, IsTerminal};
use std::process;
use ticket_desk::cli::handlers::load_into;
use ticket_desk::cli::{Cli, LinePrompter, OutputFormatter, Shell, TerminalPrompter};
use ticket_desk::config::Config;
use ticket_desk::error::{Result, TicketDeskError};
use ticket_desk::storage::TicketStore;
use tracing_subscriber::EnvFilter;

/// Main entry point for the ticket-desk CLI
///
/// Parses command-line arguments and runs the interactive session.
/// Handles errors gracefully and provides helpful error messages to users.
fn main() {
    let cli = Cli::parse();

    let formatter = OutputFormatter::new(cli.json, cli.no_color);

    if let Err(e) = run(cli, &formatter) {
        handle_error(&e, &formatter);
        process::exit(1);
    }
}

/// Run the application with the parsed arguments
///
/// # Errors
///
/// Returns configuration errors, a failed `--load`, or a prompt failure that
/// ends the session.
fn run(cli: Cli, formatter: &OutputFormatter) -> Result<()> {
    if cli.verbose {
        init_logging("debug");
    }

    let config = Config::load_or_default(cli.config.as_deref())?;
    if !cli.verbose {
        if let Some(level) = config.log_level.as_deref() {
            init_logging(level);
        }
    }

    let mut store = TicketStore::new();
    let startup_file = cli.load.clone().or_else(|| {
        (config.autoload && config.default_file.exists()).then(|| config.default_file.clone())
    });
    if let Some(path) = startup_file {
        load_into(&mut store, &path, formatter)?;
    }

    if io::stdin().is_terminal() && io::stdout().is_terminal() {
        Shell::new(TerminalPrompter::new(), &config, formatter)
            .with_store(store)
            .run()
    } else {
        Shell::new(LinePrompter::stdio(), &config, formatter)
            .with_store(store)
            .run()
    }
}

fn init_logging(filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(io::stderr)
        .init();
}

/// Handle errors and display them to the user
///
/// Shows the main message, any suggestions, and the full error in verbose
/// mode.
fn handle_error(error: &TicketDeskError, formatter: &OutputFormatter) {
    formatter.error(&error.user_message());

    let suggestions = error.suggestions();
    if !suggestions.is_empty() {
        formatter.info("\nSuggestions:");
        for suggestion in &suggestions {
            formatter.info(&format!("  • {suggestion}"));
        }
    }

    if formatter.is_json() {
        let payload = serde_json::json!({
            "status": "error",
            "error": error.to_string(),
            "suggestions": suggestions,
            "recoverable": error.is_recoverable(),
            "is_config_error": error.is_config_error(),
        });
        if let Err(e) = formatter.json(&payload) {
            tracing::warn!(error = %e, "Failed to print error as JSON");
        }
    }

    if tracing::enabled!(tracing::Level::DEBUG) {
        eprintln!("\nDebug information:");
        eprintln!("{error:?}");
    }
}
