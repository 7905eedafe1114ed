//! Ticket storage: the in-memory collection and its CSV persistence

pub mod csv_codec;
mod repository;
mod store;

pub use csv_codec::{LoadReport, SkippedRow};
pub use repository::TicketRepository;
pub use store::TicketStore;
