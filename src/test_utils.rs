//! Test utilities for ticket-desk
//!
//! This module provides common test fixtures and utilities to reduce
//! duplication in test code across the codebase.

#![cfg(test)]

use crate::core::{Priority, Status, Ticket, TicketBuilder};
use crate::storage::{TicketRepository, TicketStore};
use std::path::PathBuf;
use tempfile::TempDir;

/// Temporary directory for save/load tests
pub struct TestWorkspace {
    pub temp_dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Path of `name` inside the workspace (not created)
    pub fn path(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    /// Write `content` to `name` and return its path
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, content).expect("Failed to write test file");
        path
    }
}

/// Create a test ticket with a generated description
pub fn create_test_ticket(id: &str, priority: Priority, status: Status) -> Ticket {
    TicketBuilder::new()
        .id(id)
        .description(format!("Description for {id}"))
        .priority(priority)
        .status(status)
        .build()
        .expect("Failed to build test ticket")
}

/// Test data builder for complex scenarios
pub struct TestDataBuilder {
    tickets: Vec<Ticket>,
}

impl TestDataBuilder {
    pub fn new() -> Self {
        Self {
            tickets: Vec::new(),
        }
    }

    /// Add a ticket with specific properties
    pub fn with_ticket(mut self, id: &str, priority: Priority, status: Status) -> Self {
        self.tickets.push(create_test_ticket(id, priority, status));
        self
    }

    /// Add multiple tickets with the same status
    pub fn with_tickets_in_status(mut self, status: Status, count: usize) -> Self {
        for i in 1..=count {
            self.tickets.push(create_test_ticket(
                &format!("{status}-{i}"),
                Priority::Medium,
                status,
            ));
        }
        self
    }

    /// Build and return the tickets
    pub fn build(self) -> Vec<Ticket> {
        self.tickets
    }

    /// Build a store holding the tickets in the order they were added
    pub fn build_store(self) -> TicketStore {
        let mut store = TicketStore::new();
        for ticket in self.tickets {
            store.add(ticket).expect("Failed to add ticket");
        }
        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_write() {
        let workspace = TestWorkspace::new();
        let path = workspace.write("a.csv", "x");
        assert!(path.exists());
        assert!(!workspace.path("b.csv").exists());
    }

    #[test]
    fn test_data_builder() {
        let tickets = TestDataBuilder::new()
            .with_ticket("BUG-1", Priority::High, Status::Open)
            .with_tickets_in_status(Status::InProgress, 2)
            .build();

        assert_eq!(tickets.len(), 3);
        assert_eq!(tickets[0].id().as_str(), "BUG-1");
        assert_eq!(tickets[1].status(), Status::InProgress);
        assert_eq!(tickets[2].id().as_str(), "In Progress-2");
    }

    #[test]
    fn test_build_store() {
        let store = TestDataBuilder::new()
            .with_tickets_in_status(Status::Closed, 3)
            .build_store();
        assert_eq!(store.len(), 3);
        assert_eq!(store.open_count(), 0);
    }
}
