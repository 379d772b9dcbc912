//! Human-readable rendering of asset log rows for history timelines.
//!
//! Rendering is pure and total: every optional field may be missing and an
//! unrecognized action falls back to a generic sentence. Raw user ids are
//! never shown; an actor that cannot be resolved is rendered as `User`.

use std::collections::HashMap;

use serde::Serialize;

use crate::asset_log::{AssetLog, AssetLogAction, AssetLogEntry, WHOLE_RECORD_FIELD};
use crate::types::{DbId, Timestamp};

/// Placeholder for a missing old/new value.
pub const MISSING_VALUE: &str = "\u{2014}";

/// Actor label when `performed_by` is unset.
pub const SYSTEM_ACTOR: &str = "System";

/// Actor label when `performed_by` is set but cannot be resolved.
pub const UNKNOWN_ACTOR: &str = "User";

/// Assignee label when the target user cannot be resolved.
pub const UNKNOWN_ASSIGNEE: &str = "a user";

// ---------------------------------------------------------------------------
// Actor resolution
// ---------------------------------------------------------------------------

/// Resolves a user id to a display name.
pub trait ActorResolver {
    fn display_name(&self, user_id: &str) -> Option<String>;
}

impl ActorResolver for HashMap<String, String> {
    fn display_name(&self, user_id: &str) -> Option<String> {
        self.get(user_id).cloned()
    }
}

impl<F> ActorResolver for F
where
    F: Fn(&str) -> Option<String>,
{
    fn display_name(&self, user_id: &str) -> Option<String> {
        self(user_id)
    }
}

fn actor_name(entry: &AssetLogEntry, resolver: Option<&dyn ActorResolver>) -> String {
    match entry.performed_by.as_deref().filter(|id| !id.is_empty()) {
        None => SYSTEM_ACTOR.to_string(),
        Some(id) => resolver
            .and_then(|r| r.display_name(id))
            .unwrap_or_else(|| UNKNOWN_ACTOR.to_string()),
    }
}

fn assignee_name(entry: &AssetLogEntry, resolver: Option<&dyn ActorResolver>) -> String {
    entry
        .new_value
        .as_deref()
        .and_then(|id| resolver.and_then(|r| r.display_name(id)))
        .unwrap_or_else(|| UNKNOWN_ASSIGNEE.to_string())
}

fn value_or_placeholder(value: Option<&str>) -> &str {
    value.unwrap_or(MISSING_VALUE)
}

/// Field label; absent or whole-record fields read as "the asset".
fn field_label(entry: &AssetLogEntry) -> &str {
    match entry.field.as_deref() {
        Some(f) if !f.is_empty() && f != WHOLE_RECORD_FIELD => f,
        _ => "the asset",
    }
}

// ---------------------------------------------------------------------------
// describe
// ---------------------------------------------------------------------------

/// Render one log entry as a sentence, e.g.
/// `System changed status from "Open" to "Closed"`.
pub fn describe(entry: &AssetLogEntry, resolver: Option<&dyn ActorResolver>) -> String {
    let actor = actor_name(entry, resolver);
    let old = value_or_placeholder(entry.old_value.as_deref());
    let new = value_or_placeholder(entry.new_value.as_deref());

    match &entry.action {
        AssetLogAction::Create => format!("{actor} created the asset"),
        AssetLogAction::Assign => {
            let target = assignee_name(entry, resolver);
            format!("{actor} assigned the asset to {target}")
        }
        AssetLogAction::Unassign => format!("{actor} unassigned the asset"),
        AssetLogAction::StatusChange => {
            format!("{actor} changed status from \"{old}\" to \"{new}\"")
        }
        AssetLogAction::Update => {
            let field = field_label(entry);
            format!("{actor} updated {field}: \"{old}\" \u{2192} \"{new}\"")
        }
        AssetLogAction::CustomFieldUpdate => {
            let field = field_label(entry);
            format!("{actor} updated {field}")
        }
        AssetLogAction::Other(_) => format!("{actor} updated the asset"),
    }
}

// ---------------------------------------------------------------------------
// classify
// ---------------------------------------------------------------------------

/// Title/description pair for a compact history list item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryItem {
    pub title: String,
    pub description: Option<String>,
}

impl HistoryItem {
    fn new(title: impl Into<String>, description: Option<String>) -> Self {
        Self {
            title: title.into(),
            description,
        }
    }
}

/// Classify one log entry into a history item.
pub fn classify(entry: &AssetLogEntry) -> HistoryItem {
    let old = value_or_placeholder(entry.old_value.as_deref());
    let new = value_or_placeholder(entry.new_value.as_deref());
    let transition = format!("\"{old}\" \u{2192} \"{new}\"");

    match &entry.action {
        AssetLogAction::Create => HistoryItem::new("Asset created", None),
        AssetLogAction::Assign => HistoryItem::new(
            "Assigned",
            Some(format!("Assigned to {UNKNOWN_ASSIGNEE}")),
        ),
        AssetLogAction::Unassign => HistoryItem::new("Unassigned", None),
        AssetLogAction::StatusChange => HistoryItem::new("Status changed", Some(transition)),
        AssetLogAction::Update => {
            HistoryItem::new(format!("{} updated", field_label(entry)), Some(transition))
        }
        AssetLogAction::CustomFieldUpdate => HistoryItem::new(
            "Custom field updated",
            Some(field_label(entry).to_string()),
        ),
        AssetLogAction::Other(_) => HistoryItem::new("Asset updated", None),
    }
}

// ---------------------------------------------------------------------------
// Timeline
// ---------------------------------------------------------------------------

/// One persisted log row rendered for an asset's history timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineEntry {
    pub log_id: DbId,
    pub at: Timestamp,
    pub sentence: String,
    pub item: HistoryItem,
}

/// Render persisted rows in the order given.
pub fn timeline(logs: &[AssetLog], resolver: Option<&dyn ActorResolver>) -> Vec<TimelineEntry> {
    logs.iter()
        .map(|log| TimelineEntry {
            log_id: log.id,
            at: log.created_at,
            sentence: describe(&log.entry, resolver),
            item: classify(&log.entry),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
