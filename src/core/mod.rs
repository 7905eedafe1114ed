//! Core domain types: tickets and their fixed field vocabularies

mod builders;
mod ticket;

pub use builders::TicketBuilder;
pub use ticket::{Priority, Status, Ticket, TicketId};
