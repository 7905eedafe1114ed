//! Handlers behind each menu entry

mod persistence;
mod tickets;

pub use persistence::{handle_load, handle_save, load_into, print_load_report};
pub use tickets::{handle_add, handle_list, handle_open_count, handle_remove, handle_status_change};
