use super::ticket::parse_description;
use super::{Priority, Status, Ticket, TicketId};
use crate::error::{Result, TicketDeskError};
use chrono::{DateTime, Utc};

/// Builder for creating Ticket instances from typed values
///
/// Priority and status fall back to their defaults; id and description are
/// required and validated by `build`.
#[derive(Default)]
pub struct TicketBuilder {
    id: Option<String>,
    description: Option<String>,
    priority: Option<Priority>,
    status: Option<Status>,
    created_at: Option<DateTime<Utc>>,
}

impl TicketBuilder {
    /// Create a new ticket builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the ticket id
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the description
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the priority
    #[must_use]
    pub const fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Set the status
    #[must_use]
    pub const fn status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    /// Set `created_at` timestamp
    #[must_use]
    pub const fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Build the ticket, validating id and description
    pub fn build(self) -> Result<Ticket> {
        let id = TicketId::parse(self.id.as_deref().unwrap_or_default())?;
        let description = self
            .description
            .as_deref()
            .ok_or_else(|| TicketDeskError::validation("description", "Description cannot be empty."))
            .and_then(parse_description)?;

        Ok(Ticket {
            id,
            description,
            priority: self.priority.unwrap_or_default(),
            status: self.status.unwrap_or_default(),
            created_at: self.created_at.unwrap_or_else(Utc::now),
        })
    }
}
