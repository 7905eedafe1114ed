//! Menu handlers that edit or inspect the ticket collection

use crate::cli::normalize::normalize_choice;
use crate::cli::output::OutputFormatter;
use crate::cli::prompt::Prompter;
use crate::core::Ticket;
use crate::error::Result;
use crate::storage::{TicketRepository, TicketStore};

fn ask<P: Prompter>(prompter: &mut P, prompt: &str) -> Result<String> {
    Ok(prompter.input(prompt, None)?.unwrap_or_default())
}

/// Prompt for the four ticket fields and add the ticket
pub fn handle_add<P: Prompter>(
    store: &mut TicketStore,
    prompter: &mut P,
    formatter: &OutputFormatter,
) -> Result<()> {
    let id = ask(prompter, "Enter Ticket ID (e.g., T1001)")?;
    let description = ask(prompter, "Enter Description")?;
    let priority = normalize_choice(&ask(prompter, "Enter Priority (Low/Medium/High)")?);
    let status = normalize_choice(&ask(prompter, "Enter Status (Open/In Progress/Closed)")?);

    let ticket = Ticket::new(&id, &description, &priority, &status)?;
    store.add(ticket)?;

    formatter.success("Ticket added.");
    Ok(())
}

pub fn handle_remove<P: Prompter>(
    store: &mut TicketStore,
    prompter: &mut P,
    formatter: &OutputFormatter,
) -> Result<()> {
    let id = ask(prompter, "Enter Ticket ID to remove")?;

    if store.remove(&id) {
        formatter.success("Ticket removed.");
    } else {
        formatter.warning("Ticket not found.");
    }
    Ok(())
}

pub fn handle_list(store: &TicketStore, formatter: &OutputFormatter) -> Result<()> {
    if formatter.is_json() {
        return formatter.json(store.all());
    }

    if store.is_empty() {
        formatter.info("No tickets found.");
        return Ok(());
    }

    formatter.heading("\n--- Ticket List ---");
    for summary in store.list_all() {
        formatter.info(&summary);
    }
    Ok(())
}

/// Close (`close = true`) or reopen the ticket the user names
pub fn handle_status_change<P: Prompter>(
    store: &mut TicketStore,
    prompter: &mut P,
    formatter: &OutputFormatter,
    close: bool,
) -> Result<()> {
    let id = ask(prompter, "Enter Ticket ID")?;

    let changed = if close {
        store.close(&id)
    } else {
        store.reopen(&id)
    };

    match (changed, close) {
        (false, _) => formatter.warning("Ticket not found."),
        (true, true) => formatter.success("Ticket closed."),
        (true, false) => formatter.success("Ticket reopened."),
    }
    Ok(())
}

pub fn handle_open_count(store: &TicketStore, formatter: &OutputFormatter) -> Result<()> {
    let count = store.open_count();
    if formatter.is_json() {
        return formatter.json(&serde_json::json!({ "open": count }));
    }
    formatter.info(&format!("Open tickets: {count}"));
    Ok(())
}
