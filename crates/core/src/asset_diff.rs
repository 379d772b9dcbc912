//! Field-level change detection between two asset snapshots.
//!
//! Only fields on an explicit allow-list are compared. Values are compared
//! by their textual form, matching how they are stored in the asset log, so
//! a type change that stringifies identically (`1` vs `"1"`) is not a change.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Largest integer an f64 holds exactly (2^53 - 1).
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// A flat key/value snapshot of an asset record.
pub type Snapshot = Map<String, Value>;

/// Asset fields whose edits are recorded in the asset history.
pub const DEFAULT_TRACKED_FIELDS: &[&str] = &[
    "name",
    "asset_tag",
    "serial_number",
    "category",
    "status",
    "location",
    "assigned_to",
    "purchase_date",
    "warranty_expiry",
    "notes",
];

/// A single tracked field whose textual value differs between snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDiff {
    pub field: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
}

/// Textual form of a snapshot value as stored in the asset log.
///
/// Missing and `null` become `None`. Strings are taken verbatim, booleans use
/// their display form, numbers go through [`number_text`], arrays and objects
/// their compact JSON.
pub fn stringify_value(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(number_text(n)),
        other => Some(other.to_string()),
    }
}

/// Textual form of a number. Whole floats in the exactly-representable
/// integer range drop their fraction, so `1200.0` reads as `1200`.
pub fn number_text(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() <= MAX_SAFE_INTEGER => {
            (f as i64).to_string()
        }
        _ => n.to_string(),
    }
}

/// Compare `before` and `after` on `tracked_fields`, in that order.
pub fn diff<S: AsRef<str>>(
    before: &Snapshot,
    after: &Snapshot,
    tracked_fields: &[S],
) -> Vec<FieldDiff> {
    tracked_fields
        .iter()
        .filter_map(|field| {
            let field = field.as_ref();
            let old_value = stringify_value(before.get(field));
            let new_value = stringify_value(after.get(field));
            (old_value != new_value).then(|| FieldDiff {
                field: field.to_string(),
                old_value,
                new_value,
            })
        })
        .collect()
}
