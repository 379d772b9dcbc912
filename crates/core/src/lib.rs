//! Ticket SLA and asset audit-log rules for assetdesk.
//!
//! Everything in this crate is pure domain logic with zero internal deps so
//! it can be shared by the database adapter, background workers and any
//! future API layer. The only side-effecting piece is the audit log writer
//! in [`log_sink`], which talks to storage through the [`AssetLogSink`]
//! trait.

pub mod asset_diff;
pub mod asset_history;
pub mod asset_log;
pub mod error;
pub mod log_sink;
pub mod sla;
pub mod ticket;
pub mod types;

pub use asset_diff::{diff, FieldDiff};
pub use asset_history::{classify, describe, timeline, ActorResolver, HistoryItem, TimelineEntry};
pub use asset_log::{entries_from_diffs, AssetLog, AssetLogAction, AssetLogEntry};
pub use error::CoreError;
pub use log_sink::{AssetLogSink, AuditLogWriter, MemoryLogSink};
pub use sla::{build_resolution_hours_map, is_breached, ResolutionHours};
pub use ticket::{SlaPolicy, Ticket, TicketStatus};
