//! Error types for ticket-desk
//!
//! All fallible operations in the crate return [`Result`], whose error type
//! distinguishes field-level problems (validation, duplicates), row-level
//! problems found while loading a file, and hard failures such as a missing
//! or empty file.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias used throughout the crate
pub type Result<T> = std::result::Result<T, TicketDeskError>;

/// Main error type for ticket-desk
#[derive(Debug, Error)]
pub enum TicketDeskError {
    /// A ticket field failed validation
    #[error("{message}")]
    Validation {
        /// Name of the offending field
        field: &'static str,
        /// Human readable reason
        message: String,
    },

    /// A ticket with the same id (ignoring case) already exists
    #[error("A ticket with id '{id}' already exists.")]
    DuplicateTicket { id: String },

    /// A stored row could not be turned into a ticket
    #[error("{reason}")]
    MalformedRow { reason: String },

    /// The file to load does not exist
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// The file to load has no header line
    #[error("File is empty: {}", path.display())]
    EmptyFile { path: PathBuf },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Prompt error: {0}")]
    Dialog(#[from] dialoguer::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl TicketDeskError {
    /// Create a validation error for `field`
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Create a malformed-row error
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedRow {
            reason: reason.into(),
        }
    }

    /// Message suitable for showing to the user
    pub fn user_message(&self) -> String {
        match self {
            Self::FileNotFound { .. } => "File not found.".to_string(),
            Self::EmptyFile { .. } => format!("Invalid file format: {self}"),
            Self::Io(e) => format!("File operation failed: {e}"),
            _ => self.to_string(),
        }
    }

    /// Hints that may help the user recover from this error
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Validation { field, .. } if *field == "priority" => {
                vec!["Use one of: Low, Medium, High".to_string()]
            },
            Self::Validation { field, .. } if *field == "status" => {
                vec!["Use one of: Open, In Progress, Closed".to_string()]
            },
            Self::DuplicateTicket { .. } => {
                vec!["Choose a different ticket id; ids are compared ignoring case".to_string()]
            },
            Self::FileNotFound { .. } => vec![
                "Check the path and try again".to_string(),
                "Save the current tickets first to create the file".to_string(),
            ],
            Self::EmptyFile { .. } => vec![
                "The file must start with the header line Id,Description,Priority,Status,DateCreated"
                    .to_string(),
            ],
            Self::Config(_) => vec!["Check the configuration file syntax".to_string()],
            _ => Vec::new(),
        }
    }

    /// Whether the interactive session can carry on after this error
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Config(_) | Self::Dialog(_))
    }

    /// Whether this error describes a single row rather than the whole file
    pub const fn is_row_level(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. } | Self::DuplicateTicket { .. } | Self::MalformedRow { .. }
        )
    }

    /// Whether this error originated from configuration loading
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}
