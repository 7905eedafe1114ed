//! Output formatting for the console shell

use crate::error::{Result, TicketDeskError};
use colored::Colorize;
use serde::Serialize;

/// Prints shell messages, optionally colored, and JSON payloads
#[derive(Debug, Clone)]
pub struct OutputFormatter {
    json: bool,
}

impl OutputFormatter {
    /// Create a formatter; `no_color` disables ANSI colors process-wide
    pub fn new(json: bool, no_color: bool) -> Self {
        if no_color {
            colored::control::set_override(false);
        }
        Self { json }
    }

    pub const fn is_json(&self) -> bool {
        self.json
    }

    pub fn success(&self, message: &str) {
        println!("{}", message.green());
    }

    pub fn info(&self, message: &str) {
        println!("{message}");
    }

    pub fn heading(&self, message: &str) {
        println!("{}", message.bold());
    }

    pub fn warning(&self, message: &str) {
        println!("{}", message.yellow());
    }

    /// Errors go to stderr so they never interleave with piped results
    pub fn error(&self, message: &str) {
        eprintln!("{}", message.red());
    }

    /// Print `value` as pretty JSON
    pub fn json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        let rendered = serde_json::to_string_pretty(value).map_err(|e| {
            TicketDeskError::SerializationError(format!("Failed to serialize to JSON: {e}"))
        })?;
        println!("{rendered}");
        Ok(())
    }
}
