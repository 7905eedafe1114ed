//! Menu handlers for saving and loading the CSV file

use crate::cli::output::OutputFormatter;
use crate::cli::prompt::Prompter;
use crate::config::Config;
use crate::error::{Result, TicketDeskError};
use crate::storage::{LoadReport, TicketStore};
use std::path::{Path, PathBuf};

fn ask_path<P: Prompter>(prompter: &mut P, prompt: &str, config: &Config) -> Result<PathBuf> {
    let default = config.default_file.to_string_lossy();
    let answer = prompter.input(prompt, Some(default.as_ref()))?.unwrap_or_default();
    Ok(PathBuf::from(answer.trim()))
}

pub fn handle_save<P: Prompter>(
    store: &TicketStore,
    prompter: &mut P,
    config: &Config,
    formatter: &OutputFormatter,
) -> Result<()> {
    let path = ask_path(prompter, "Enter path to save CSV", config)?;

    match store.save(&path) {
        Ok(()) => {
            let shown = std::fs::canonicalize(&path).unwrap_or(path);
            formatter.success(&format!("Saved to {}", shown.display()));
        },
        Err(e) => formatter.error(&format!("Save failed: {}", e.user_message())),
    }
    Ok(())
}

pub fn handle_load<P: Prompter>(
    store: &mut TicketStore,
    prompter: &mut P,
    config: &Config,
    formatter: &OutputFormatter,
) -> Result<()> {
    let path = ask_path(prompter, "Enter path to load CSV", config)?;

    match load_into(store, &path, formatter) {
        Ok(()) => {},
        Err(e @ (TicketDeskError::FileNotFound { .. } | TicketDeskError::EmptyFile { .. })) => {
            formatter.error(&e.user_message());
        },
        Err(e) => formatter.error(&format!("Load failed: {}", e.user_message())),
    }
    Ok(())
}

/// Load `path` into `store` and print the report
pub fn load_into(store: &mut TicketStore, path: &Path, formatter: &OutputFormatter) -> Result<()> {
    let report = store.load(path)?;
    print_load_report(&report, formatter)
}

/// Print every skipped row followed by the loaded/skipped totals
pub fn print_load_report(report: &LoadReport, formatter: &OutputFormatter) -> Result<()> {
    if formatter.is_json() {
        return formatter.json(&report.to_json());
    }

    for row in &report.skipped {
        formatter.warning(&row.to_string());
    }
    formatter.info(&report.to_string());
    Ok(())
}
