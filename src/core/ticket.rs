use crate::error::{Result, TicketDeskError};
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Identifier of a ticket
///
/// Ids are stored trimmed and compared ignoring case, so `T1001` and
/// `t1001` name the same ticket.
#[derive(Debug, Clone, Eq)]
pub struct TicketId(String);

impl TicketId {
    /// Parse an id, rejecting blank input
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TicketDeskError::validation("id", "ID cannot be empty."));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The id as it was entered
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive comparison against a raw id string
    pub fn matches(&self, other: &str) -> bool {
        self.0
            .chars()
            .flat_map(char::to_lowercase)
            .eq(other.trim().chars().flat_map(char::to_lowercase))
    }
}

impl PartialEq for TicketId {
    fn eq(&self, other: &Self) -> bool {
        self.matches(&other.0)
    }
}

impl PartialEq<str> for TicketId {
    fn eq(&self, other: &str) -> bool {
        self.matches(other)
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for TicketId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// Ticket priority levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Priority {
    #[default]
    Low,
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl FromStr for Priority {
    type Err = TicketDeskError;

    /// Accepts only the exact canonical names after trimming
    fn from_str(s: &str) -> Result<Self> {
        let value = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == value)
            .ok_or_else(|| {
                TicketDeskError::validation(
                    "priority",
                    format!("Priority must be one of: {}", allowed(&Self::ALL.map(Self::as_str))),
                )
            })
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ticket status values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Status {
    #[default]
    Open,
    #[serde(rename = "In Progress")]
    InProgress,
    Closed,
}

impl Status {
    pub const ALL: [Self; 3] = [Self::Open, Self::InProgress, Self::Closed];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::InProgress => "In Progress",
            Self::Closed => "Closed",
        }
    }
}

impl FromStr for Status {
    type Err = TicketDeskError;

    fn from_str(s: &str) -> Result<Self> {
        let value = s.trim();
        Self::ALL
            .into_iter()
            .find(|st| st.as_str() == value)
            .ok_or_else(|| {
                TicketDeskError::validation(
                    "status",
                    format!("Status must be one of: {}", allowed(&Self::ALL.map(Self::as_str))),
                )
            })
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn allowed(values: &[&str]) -> String {
    values.join(", ")
}

/// A single support ticket
///
/// A `Ticket` only exists once every field has been validated; use
/// [`Ticket::new`] for raw input or [`crate::core::TicketBuilder`] for typed
/// values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ticket {
    pub(crate) id: TicketId,
    pub(crate) description: String,
    pub(crate) priority: Priority,
    pub(crate) status: Status,
    pub(crate) created_at: DateTime<Utc>,
}

impl Ticket {
    /// Create a ticket from raw field values, stamped with the current time
    pub fn new(id: &str, description: &str, priority: &str, status: &str) -> Result<Self> {
        let id = TicketId::parse(id)?;
        let description = parse_description(description)?;
        let priority = priority.parse()?;
        let status = status.parse()?;

        Ok(Self {
            id,
            description,
            priority,
            status,
            created_at: Utc::now(),
        })
    }

    pub const fn id(&self) -> &TicketId {
        &self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub const fn priority(&self) -> Priority {
        self.priority
    }

    pub const fn status(&self) -> Status {
        self.status
    }

    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Whether the ticket still needs attention (anything but Closed)
    pub fn is_open(&self) -> bool {
        self.status != Status::Closed
    }

    /// Mark the ticket as closed
    pub fn close(&mut self) {
        self.status = Status::Closed;
    }

    /// Mark the ticket as open again
    ///
    /// Always lands on `Open`, even if the ticket was in progress before it
    /// was closed.
    pub fn reopen(&mut self) {
        self.status = Status::Open;
    }

    /// One-line rendering used by the ticket list
    pub fn summary(&self) -> String {
        format!(
            "[{}] ({}) - \"{}\" | Status: {} | Created: {}",
            self.id,
            self.priority,
            self.description,
            self.status,
            self.created_at.format("%Y-%m-%d")
        )
    }
}

pub(crate) fn parse_description(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TicketDeskError::validation(
            "description",
            "Description cannot be empty.",
        ));
    }
    Ok(trimmed.to_string())
}
