use crate::core::Ticket;
use crate::error::Result;

/// Repository trait for ticket collection operations
///
/// Lookups take raw id strings and compare them ignoring case. Missing
/// tickets are reported through `bool` and `Option` results rather than
/// errors.
pub trait TicketRepository {
    /// Appends a ticket, rejecting an id that is already present
    fn add(&mut self, ticket: Ticket) -> Result<()>;

    /// Removes the first ticket with a matching id
    fn remove(&mut self, id: &str) -> bool;

    /// Finds a ticket by id
    fn find(&self, id: &str) -> Option<&Ticket>;

    /// Finds a ticket by id for modification
    fn find_mut(&mut self, id: &str) -> Option<&mut Ticket>;

    /// All tickets in insertion order
    fn all(&self) -> &[Ticket];

    /// Counts tickets matching a predicate
    fn count<F>(&self, predicate: F) -> usize
    where
        F: Fn(&Ticket) -> bool,
    {
        self.all().iter().filter(|t| predicate(t)).count()
    }

    /// Checks if a ticket exists by id
    fn exists(&self, id: &str) -> bool {
        self.find(id).is_some()
    }
}
