use super::csv_codec::{self, LoadReport, SkippedRow};
use super::repository::TicketRepository;
use crate::core::Ticket;
use crate::error::{Result, TicketDeskError};
use std::fs::{self, File};
use std::io::ErrorKind;
use std::path::Path;

/// In-memory, insertion-ordered ticket collection
///
/// The store owns every ticket and guarantees that no two share an id
/// (compared ignoring case). It can be written to and replaced from a CSV
/// file; see [`csv_codec`] for the format.
#[derive(Debug, Clone, Default)]
pub struct TicketStore {
    tickets: Vec<Ticket>,
}

impl TicketStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ticket> {
        self.tickets.iter()
    }

    /// Summaries of every ticket, in insertion order
    pub fn list_all(&self) -> Vec<String> {
        self.tickets.iter().map(Ticket::summary).collect()
    }

    /// Number of tickets that are not closed
    pub fn open_count(&self) -> usize {
        self.count(Ticket::is_open)
    }

    /// Close the ticket with `id`; `false` if there is none
    pub fn close(&mut self, id: &str) -> bool {
        let Some(ticket) = self.find_mut(id) else {
            return false;
        };
        ticket.close();
        true
    }

    /// Reopen the ticket with `id`; `false` if there is none
    pub fn reopen(&mut self, id: &str) -> bool {
        let Some(ticket) = self.find_mut(id) else {
            return false;
        };
        ticket.reopen();
        true
    }

    /// Write every ticket to `path`, replacing the file
    ///
    /// Missing parent directories are created.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let file = File::create(path)?;
        csv_codec::write_tickets(file, &self.tickets)?;

        tracing::info!(path = %path.display(), count = self.tickets.len(), "Saved tickets");
        Ok(())
    }

    /// Replace the collection with the tickets stored at `path`
    ///
    /// Rows that cannot be used (wrong column count, bad timestamp, invalid
    /// field, id already loaded) are skipped and listed in the report. The
    /// current collection is only replaced once the whole file has been
    /// read, so a hard failure leaves it untouched.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<LoadReport> {
        let path = path.as_ref();
        let content = fs::read(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => TicketDeskError::FileNotFound {
                path: path.to_path_buf(),
            },
            _ => TicketDeskError::Io(e),
        })?;

        let body = csv_codec::split_header(&content).ok_or_else(|| TicketDeskError::EmptyFile {
            path: path.to_path_buf(),
        })?;

        let mut loaded = Self::new();
        let mut report = LoadReport::default();

        for row in csv_codec::parse_rows(body) {
            match row.ticket.and_then(|ticket| loaded.add(ticket)) {
                Ok(()) => report.loaded += 1,
                Err(error) => {
                    tracing::warn!(line = row.line, reason = %error, "Skipped row");
                    report.skipped.push(SkippedRow {
                        line: row.line,
                        error,
                    });
                },
            }
        }

        *self = loaded;

        tracing::info!(
            path = %path.display(),
            loaded = report.loaded,
            skipped = report.skipped_count(),
            "Loaded tickets"
        );
        Ok(report)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.tickets.iter().position(|t| t.id().matches(id))
    }
}

impl TicketRepository for TicketStore {
    fn add(&mut self, ticket: Ticket) -> Result<()> {
        if self.exists(ticket.id().as_str()) {
            return Err(TicketDeskError::DuplicateTicket {
                id: ticket.id().to_string(),
            });
        }

        tracing::debug!(id = %ticket.id(), "Adding ticket");
        self.tickets.push(ticket);
        Ok(())
    }

    fn remove(&mut self, id: &str) -> bool {
        match self.position(id) {
            Some(index) => {
                let removed = self.tickets.remove(index);
                tracing::debug!(id = %removed.id(), "Removed ticket");
                true
            },
            None => false,
        }
    }

    fn find(&self, id: &str) -> Option<&Ticket> {
        self.position(id).map(|index| &self.tickets[index])
    }

    fn find_mut(&mut self, id: &str) -> Option<&mut Ticket> {
        self.position(id).map(|index| &mut self.tickets[index])
    }

    fn all(&self) -> &[Ticket] {
        &self.tickets
    }
}
