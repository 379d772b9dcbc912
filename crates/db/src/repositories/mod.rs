//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod asset_log_repo;
pub mod sla_policy_repo;
pub mod ticket_repo;

pub use asset_log_repo::AssetLogRepo;
pub use sla_policy_repo::SlaPolicyRepo;
pub use ticket_repo::TicketRepo;
