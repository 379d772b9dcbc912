//! Row types for the tables this crate touches.
//!
//! Each row converts into its `assetdesk_core` counterpart.

pub mod asset_log;
pub mod sla_policy;
pub mod ticket;
