//! ticket-desk - An interactive support ticket desk
//!
//! This crate keeps a small, ordered collection of support tickets in memory
//! and persists it to a CSV file:
//! - Validated tickets with fixed priority and status vocabularies
//! - Case-insensitive ticket ids, unique within the collection
//! - Tolerant loading that skips and reports bad rows instead of failing
//! - A menu-driven console shell on top of the core operations

// Allow missing error documentation for internal implementations
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::fn_params_excessive_bools)]
#![allow(clippy::indexing_slicing)]

//! # Loading
//!
//! A load never partially replaces the collection. Rows are decoded into a
//! fresh store, and only when the whole file has been read is it swapped in.
//! Missing or empty files fail the load and leave the current tickets as
//! they were.
//!
//! # Example
//!
//! ```rust,no_run
//! use ticket_desk::core::Ticket;
//! use ticket_desk::storage::{TicketRepository, TicketStore};
//!
//! let mut store = TicketStore::new();
//! store.add(Ticket::new("T1001", "Printer jammed", "High", "Open")?)?;
//! store.save("tickets.csv")?;
//!
//! let report = store.load("tickets.csv")?;
//! println!("{report}");
//! # Ok::<(), ticket_desk::TicketDeskError>(())
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod storage;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types
pub use error::{Result, TicketDeskError};
