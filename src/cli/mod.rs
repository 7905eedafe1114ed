//! Command-line interface: argument parsing and the interactive shell

pub mod handlers;
pub mod normalize;
pub mod output;
pub mod prompt;
pub mod shell;

pub use output::OutputFormatter;
pub use prompt::{LinePrompter, Prompter, TerminalPrompter};
pub use shell::{MenuAction, Shell};

use clap::Parser;
use std::path::PathBuf;

/// Interactive support ticket desk with CSV persistence
#[derive(Parser, Debug)]
#[command(name = "ticket-desk", version, about, long_about = None)]
pub struct Cli {
    /// Load tickets from this CSV file before showing the menu
    #[arg(long, value_name = "PATH")]
    pub load: Option<PathBuf>,

    /// Configuration file (defaults to the per-user location)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Print listings and load reports as JSON
    #[arg(long)]
    pub json: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}
