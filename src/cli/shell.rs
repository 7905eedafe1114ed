//! The menu loop
//!
//! Reads a menu choice, runs the matching handler and reports any error
//! without leaving the loop. Only prompt failures end the session early.

use crate::cli::handlers;
use crate::cli::output::OutputFormatter;
use crate::cli::prompt::Prompter;
use crate::config::Config;
use crate::error::Result;
use crate::storage::TicketStore;

/// Entries of the main menu, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Add,
    Remove,
    List,
    Close,
    Reopen,
    Save,
    Load,
    OpenCount,
    Exit,
}

impl MenuAction {
    pub const ALL: [Self; 9] = [
        Self::Add,
        Self::Remove,
        Self::List,
        Self::Close,
        Self::Reopen,
        Self::Save,
        Self::Load,
        Self::OpenCount,
        Self::Exit,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Add => "Add Ticket",
            Self::Remove => "Remove Ticket",
            Self::List => "Display All Tickets",
            Self::Close => "Close Ticket",
            Self::Reopen => "Reopen Ticket",
            Self::Save => "Save Tickets to File",
            Self::Load => "Load Tickets from File",
            Self::OpenCount => "Show Open Ticket Count",
            Self::Exit => "Exit",
        }
    }

    /// Resolve a 1-based menu number
    pub fn from_choice(choice: &str) -> Option<Self> {
        let index = choice.trim().parse::<usize>().ok()?;
        Self::ALL.get(index.checked_sub(1)?).copied()
    }
}

/// Interactive session over a ticket store
pub struct Shell<'a, P> {
    prompter: P,
    store: TicketStore,
    config: &'a Config,
    formatter: &'a OutputFormatter,
}

impl<'a, P: Prompter> Shell<'a, P> {
    pub fn new(prompter: P, config: &'a Config, formatter: &'a OutputFormatter) -> Self {
        Self {
            prompter,
            store: TicketStore::new(),
            config,
            formatter,
        }
    }

    /// Start the session with an existing collection
    #[must_use]
    pub fn with_store(mut self, store: TicketStore) -> Self {
        self.store = store;
        self
    }

    pub const fn store(&self) -> &TicketStore {
        &self.store
    }

    /// Run until the user exits or input ends
    pub fn run(&mut self) -> Result<()> {
        self.formatter.heading("=== IT Support Ticket Manager ===");
        let labels = MenuAction::ALL.map(MenuAction::label);

        while let Some(choice) = self.prompter.menu("Menu", &labels)? {
            let Some(action) = MenuAction::from_choice(&choice) else {
                self.formatter.warning("Invalid option.");
                continue;
            };

            if action == MenuAction::Exit {
                break;
            }

            if let Err(e) = self.dispatch(action) {
                if !e.is_recoverable() {
                    return Err(e);
                }
                tracing::debug!(?action, error = ?e, "Menu action failed");
                self.formatter.error(&format!("Error: {}", e.user_message()));
            }
        }

        self.formatter.info("Goodbye!");
        Ok(())
    }

    fn dispatch(&mut self, action: MenuAction) -> Result<()> {
        let formatter = self.formatter;
        match action {
            MenuAction::Add => handlers::handle_add(&mut self.store, &mut self.prompter, formatter),
            MenuAction::Remove => {
                handlers::handle_remove(&mut self.store, &mut self.prompter, formatter)
            },
            MenuAction::List => handlers::handle_list(&self.store, formatter),
            MenuAction::Close => {
                handlers::handle_status_change(&mut self.store, &mut self.prompter, formatter, true)
            },
            MenuAction::Reopen => handlers::handle_status_change(
                &mut self.store,
                &mut self.prompter,
                formatter,
                false,
            ),
            MenuAction::Save => {
                handlers::handle_save(&self.store, &mut self.prompter, self.config, formatter)
            },
            MenuAction::Load => {
                handlers::handle_load(&mut self.store, &mut self.prompter, self.config, formatter)
            },
            MenuAction::OpenCount => handlers::handle_open_count(&self.store, formatter),
            MenuAction::Exit => Ok(()),
        }
    }
}
