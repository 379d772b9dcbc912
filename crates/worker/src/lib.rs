//! Background jobs for assetdesk.
//!
//! - [`config`] — worker configuration loaded from the environment.
//! - [`history`] — rendered asset history for the `history` command.
//! - [`sla_sweep`] — periodic SLA breach sweep over unresolved tickets.

pub mod config;
pub mod history;
pub mod sla_sweep;
