//! Ticket and SLA policy records as read from the ticket store.
//!
//! Timestamps stay as raw strings here: the SLA evaluator parses them
//! leniently so a malformed value degrades to "signal absent" instead of
//! failing the whole listing.

use serde::{Deserialize, Serialize};

use crate::types::DbId;

// ---------------------------------------------------------------------------
// Ticket status
// ---------------------------------------------------------------------------

/// Lifecycle state of a ticket. `Closed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Open,
    InProgress,
    Closed,
}

impl TicketStatus {
    /// String representation for display, logging, and database storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in_progress",
            Self::Closed => "closed",
        }
    }

    /// Parse a stored status string (case-insensitive, surrounding
    /// whitespace ignored).
    ///
    /// Unknown values map to `Open` and stay subject to SLA evaluation.
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "closed" => Self::Closed,
            "in_progress" => Self::InProgress,
            _ => Self::Open,
        }
    }

    /// Whether no further SLA tracking applies.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Closed)
    }
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Ticket
// ---------------------------------------------------------------------------

/// The subset of a ticket row the SLA rules look at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: DbId,
    pub status: TicketStatus,
    /// Free-form priority label (`Low`, `Medium`, `High`, `Critical`, ...).
    pub priority: Option<String>,
    pub created_at: Option<String>,
    pub due_at: Option<String>,
}

// ---------------------------------------------------------------------------
// SLA policy
// ---------------------------------------------------------------------------

/// Maximum resolution time for one priority level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlaPolicy {
    pub priority: String,
    pub resolution_time_hours: f64,
}
