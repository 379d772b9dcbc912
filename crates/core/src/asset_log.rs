//! Asset audit-log entries and their construction from field diffs.
//!
//! The asset log is an append-only trail: one entry per field-level or
//! lifecycle change, created once and never updated or deleted. Values are
//! stored as text only.

use serde::{Deserialize, Serialize};

use crate::asset_diff::FieldDiff;
use crate::types::{DbId, Timestamp};

/// Field sentinel for actions that apply to the whole record.
pub const WHOLE_RECORD_FIELD: &str = "*";

/// Snapshot field holding the asset's lifecycle status.
pub const STATUS_FIELD: &str = "status";

/// Snapshot field holding the assignee's user id.
pub const ASSIGNEE_FIELD: &str = "assigned_to";

// ---------------------------------------------------------------------------
// Action kinds
// ---------------------------------------------------------------------------

/// What kind of change an asset log entry records.
///
/// Unknown action strings read back from storage are kept verbatim in
/// `Other` so they render through the generic history branch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AssetLogAction {
    Create,
    Update,
    Assign,
    Unassign,
    StatusChange,
    CustomFieldUpdate,
    Other(String),
}

impl AssetLogAction {
    /// String representation for display, logging, and database storage.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Assign => "assign",
            Self::Unassign => "unassign",
            Self::StatusChange => "status_change",
            Self::CustomFieldUpdate => "custom_field_update",
            Self::Other(raw) => raw,
        }
    }

    /// Parse a stored action string. Never fails.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "create" => Self::Create,
            "update" => Self::Update,
            "assign" => Self::Assign,
            "unassign" => Self::Unassign,
            "status_change" => Self::StatusChange,
            "custom_field_update" => Self::CustomFieldUpdate,
            other => Self::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for AssetLogAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for AssetLogAction {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<AssetLogAction> for String {
    fn from(action: AssetLogAction) -> Self {
        match action {
            AssetLogAction::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Entries
// ---------------------------------------------------------------------------

/// Payload of one asset log entry (everything except server-assigned
/// columns).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetLogEntry {
    pub asset_id: DbId,
    pub action: AssetLogAction,
    /// Changed field, or [`WHOLE_RECORD_FIELD`] for whole-record actions.
    pub field: Option<String>,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    /// Acting user id; `None` means the change was made by the system.
    pub performed_by: Option<String>,
}

/// A persisted asset log row. Immutable once created (no `updated_at`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetLog {
    pub id: DbId,
    #[serde(flatten)]
    pub entry: AssetLogEntry,
    pub created_at: Timestamp,
}

impl AssetLogEntry {
    /// Entry recording the creation of an asset.
    pub fn created(asset_id: DbId, performed_by: Option<String>) -> Self {
        Self {
            asset_id,
            action: AssetLogAction::Create,
            field: Some(WHOLE_RECORD_FIELD.to_string()),
            old_value: None,
            new_value: None,
            performed_by,
        }
    }

    /// Entry recording an edit to a user-defined custom field.
    pub fn custom_field(
        asset_id: DbId,
        field: &str,
        old_value: Option<String>,
        new_value: Option<String>,
        performed_by: Option<String>,
    ) -> Self {
        Self {
            asset_id,
            action: AssetLogAction::CustomFieldUpdate,
            field: Some(field.to_string()),
            old_value,
            new_value,
            performed_by,
        }
    }

    /// Entry for one tracked-field diff.
    ///
    /// `status` edits become `status_change`, `assigned_to` edits become
    /// `assign` or `unassign` depending on whether a new assignee is set,
    /// everything else is a plain `update`.
    pub fn from_diff(asset_id: DbId, diff: &FieldDiff, performed_by: Option<String>) -> Self {
        let action = match diff.field.as_str() {
            STATUS_FIELD => AssetLogAction::StatusChange,
            ASSIGNEE_FIELD if diff.new_value.is_some() => AssetLogAction::Assign,
            ASSIGNEE_FIELD => AssetLogAction::Unassign,
            _ => AssetLogAction::Update,
        };
        Self {
            asset_id,
            action,
            field: Some(diff.field.clone()),
            old_value: diff.old_value.clone(),
            new_value: diff.new_value.clone(),
            performed_by,
        }
    }
}

/// Map every diff of one asset mutation to a log entry, preserving order.
pub fn entries_from_diffs(
    asset_id: DbId,
    diffs: &[FieldDiff],
    performed_by: Option<&str>,
) -> Vec<AssetLogEntry> {
    diffs
        .iter()
        .map(|d| AssetLogEntry::from_diff(asset_id, d, performed_by.map(String::from)))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
