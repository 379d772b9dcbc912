//! SLA breach evaluation for tickets.
//!
//! A ticket breaches its SLA when it is not closed and either its explicit
//! `due_at` has passed, or (without a due date) the resolution time its
//! priority allows has elapsed since `created_at`. An explicit due date
//! always takes precedence over the policy.
//!
//! Every input maps to a boolean: malformed timestamps and unknown
//! priorities degrade to "signal absent", never to an error.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::ticket::{SlaPolicy, Ticket};
use crate::types::Timestamp;

/// Milliseconds in one hour.
const MS_PER_HOUR: f64 = 3_600_000.0;

// ---------------------------------------------------------------------------
// Resolution-hours map
// ---------------------------------------------------------------------------

/// Effective resolution time per normalized priority.
///
/// Only finite, strictly positive hour values are ever stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolutionHours {
    by_priority: HashMap<String, f64>,
}

impl ResolutionHours {
    /// Look up the allowed resolution hours for a raw priority label.
    pub fn hours_for(&self, priority: &str) -> Option<f64> {
        self.by_priority.get(&normalize_priority(priority)).copied()
    }

    pub fn len(&self) -> usize {
        self.by_priority.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_priority.is_empty()
    }
}

/// Normalize a priority label for policy lookup (trim + lowercase).
pub fn normalize_priority(priority: &str) -> String {
    priority.trim().to_lowercase()
}

/// Build the effective priority -> hours map from policy rows.
///
/// Rows with an empty priority or a non-finite / non-positive hour value are
/// skipped. When two rows normalize to the same key the later one wins.
pub fn build_resolution_hours_map<'a, I>(policies: I) -> ResolutionHours
where
    I: IntoIterator<Item = &'a SlaPolicy>,
{
    let mut by_priority = HashMap::new();
    for policy in policies {
        let key = normalize_priority(&policy.priority);
        if key.is_empty() {
            continue;
        }
        let hours = policy.resolution_time_hours;
        if !hours.is_finite() || hours <= 0.0 {
            continue;
        }
        by_priority.insert(key, hours);
    }
    ResolutionHours { by_priority }
}

// ---------------------------------------------------------------------------
// Timestamp parsing
// ---------------------------------------------------------------------------

/// Parse a stored timestamp string, returning `None` when it is unusable.
///
/// Accepts RFC 3339, Postgres text output (`2024-01-31 09:15:00.123+00`),
/// offset-less date-times (taken as UTC) and bare dates (midnight UTC).
pub fn parse_timestamp(raw: &str) -> Option<Timestamp> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%d %H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M:%S%.f%#z"] {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn parse_optional(raw: Option<&str>) -> Option<Timestamp> {
    raw.and_then(parse_timestamp)
}

// ---------------------------------------------------------------------------
// Breach evaluation
// ---------------------------------------------------------------------------

/// The instant after which the ticket counts as breached, if any rule
/// applies.
///
/// Closed tickets have no deadline. A parseable `due_at` is authoritative;
/// otherwise the deadline is `created_at` plus the policy hours for the
/// ticket's priority.
pub fn breach_deadline(ticket: &Ticket, hours: &ResolutionHours) -> Option<Timestamp> {
    if ticket.status.is_terminal() {
        return None;
    }
    if let Some(due) = parse_optional(ticket.due_at.as_deref()) {
        return Some(due);
    }
    let created = parse_optional(ticket.created_at.as_deref())?;
    let allowed = policy_hours(ticket, hours)?;
    let offset = chrono::Duration::try_milliseconds((allowed * MS_PER_HOUR) as i64)?;
    created.checked_add_signed(offset)
}

/// Whether `ticket` is in breach of its SLA at `now`.
pub fn is_breached(ticket: &Ticket, hours: &ResolutionHours, now: Timestamp) -> bool {
    if ticket.status.is_terminal() {
        return false;
    }

    if let Some(due) = parse_optional(ticket.due_at.as_deref()) {
        return due < now;
    }

    let Some(created) = parse_optional(ticket.created_at.as_deref()) else {
        return false;
    };
    let Some(allowed) = policy_hours(ticket, hours) else {
        return false;
    };

    // Compared in float milliseconds so fractional-hour policies are exact.
    let deadline_ms = created.timestamp_millis() as f64 + allowed * MS_PER_HOUR;
    now.timestamp_millis() as f64 > deadline_ms
}

/// [`is_breached`] evaluated against the current time.
pub fn is_breached_now(ticket: &Ticket, hours: &ResolutionHours) -> bool {
    is_breached(ticket, hours, Utc::now())
}

fn policy_hours(ticket: &Ticket, hours: &ResolutionHours) -> Option<f64> {
    let priority = ticket.priority.as_deref()?;
    if priority.trim().is_empty() {
        return None;
    }
    hours.hours_for(priority)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;
    use crate::ticket::TicketStatus;

    fn t0() -> Timestamp {
        Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap()
    }

    fn policy(priority: &str, hours: f64) -> SlaPolicy {
        SlaPolicy {
            priority: priority.to_string(),
            resolution_time_hours: hours,
        }
    }

    fn high_policy() -> ResolutionHours {
        build_resolution_hours_map(&[policy("High", 4.0)])
    }

    fn ticket(
        status: TicketStatus,
        priority: Option<&str>,
        created_at: Option<&str>,
        due_at: Option<&str>,
    ) -> Ticket {
        Ticket {
            id: 1,
            status,
            priority: priority.map(String::from),
            created_at: created_at.map(String::from),
            due_at: due_at.map(String::from),
        }
    }

    fn rfc(ts: Timestamp) -> String {
        ts.to_rfc3339()
    }

    // -----------------------------------------------------------------------
    // build_resolution_hours_map
    // -----------------------------------------------------------------------

    #[test]
    fn map_normalizes_priority() {
        let map = build_resolution_hours_map(&[policy(" High ", 4.0)]);
        assert_eq!(map.hours_for("high"), Some(4.0));
        assert_eq!(map.hours_for("HIGH"), Some(4.0));
    }

    #[test]
    fn map_last_duplicate_wins() {
        let map = build_resolution_hours_map(&[policy(" High ", 4.0), policy("high", 8.0)]);
        assert_eq!(map.len(), 1);
        assert_eq!(map.hours_for("High"), Some(8.0));
    }

    #[test]
    fn map_skips_non_positive_hours() {
        let map = build_resolution_hours_map(&[policy("low", 0.0), policy("medium", -2.0)]);
        assert!(map.is_empty());
    }

    #[test]
    fn map_skips_non_finite_hours() {
        let map = build_resolution_hours_map(&[
            policy("low", f64::NAN),
            policy("medium", f64::INFINITY),
            policy("high", 2.5),
        ]);
        assert_eq!(map.len(), 1);
        assert_eq!(map.hours_for("high"), Some(2.5));
    }

    #[test]
    fn map_skips_empty_priority() {
        let map = build_resolution_hours_map(&[policy("   ", 4.0)]);
        assert!(map.is_empty());
    }

    #[test]
    fn invalid_duplicate_does_not_override_valid_entry() {
        let map = build_resolution_hours_map(&[policy("high", 4.0), policy("High", 0.0)]);
        assert_eq!(map.hours_for("high"), Some(4.0));
    }

    // -----------------------------------------------------------------------
    // parse_timestamp
    // -----------------------------------------------------------------------

    #[test]
    fn parses_rfc3339() {
        assert_eq!(parse_timestamp("2024-03-01T08:00:00Z"), Some(t0()));
        assert_eq!(parse_timestamp("2024-03-01T10:00:00+02:00"), Some(t0()));
    }

    #[test]
    fn parses_postgres_text_output() {
        assert_eq!(parse_timestamp("2024-03-01 08:00:00+00"), Some(t0()));
        assert_eq!(
            parse_timestamp("2024-03-01 08:00:00.250+00"),
            Some(t0() + Duration::milliseconds(250))
        );
    }

    #[test]
    fn parses_naive_as_utc() {
        assert_eq!(parse_timestamp("2024-03-01T08:00:00"), Some(t0()));
        assert_eq!(parse_timestamp("2024-03-01 08:00:00"), Some(t0()));
    }

    #[test]
    fn parses_bare_date_as_midnight() {
        assert_eq!(
            parse_timestamp("2024-03-01"),
            Some(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_timestamp("not a date"), None);
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("2024-13-45"), None);
    }

    // -----------------------------------------------------------------------
    // is_breached
    // -----------------------------------------------------------------------

    #[test]
    fn closed_ticket_never_breached() {
        let past = rfc(t0() - Duration::days(30));
        let t = ticket(TicketStatus::Closed, Some("High"), Some(&past), Some(&past));
        assert!(!is_breached(&t, &high_policy(), t0()));
    }

    #[test]
    fn past_due_at_is_breached_without_policy() {
        let due = rfc(t0() - Duration::hours(1));
        let t = ticket(TicketStatus::Open, Some("Unmapped"), None, Some(&due));
        assert!(is_breached(&t, &ResolutionHours::default(), t0()));
    }

    #[test]
    fn in_progress_with_past_due_at_is_breached() {
        let due = rfc(t0() - Duration::minutes(1));
        let t = ticket(TicketStatus::InProgress, None, None, Some(&due));
        assert!(is_breached(&t, &high_policy(), t0()));
    }

    #[test]
    fn future_due_at_wins_over_elapsed_policy() {
        let created = rfc(t0() - Duration::hours(10));
        let due = rfc(t0() + Duration::hours(1));
        let t = ticket(TicketStatus::Open, Some("High"), Some(&created), Some(&due));
        assert!(!is_breached(&t, &high_policy(), t0()));
    }

    #[test]
    fn due_at_equal_to_now_is_not_breached() {
        let due = rfc(t0());
        let t = ticket(TicketStatus::Open, None, None, Some(&due));
        assert!(!is_breached(&t, &high_policy(), t0()));
    }

    #[test]
    fn malformed_due_at_falls_through_to_policy() {
        let created = rfc(t0() - Duration::hours(5));
        let t = ticket(TicketStatus::Open, Some("High"), Some(&created), Some("soon"));
        assert!(is_breached(&t, &high_policy(), t0()));
    }

    #[test]
    fn policy_breach_after_created_plus_hours() {
        let created = rfc(t0());
        let t = ticket(TicketStatus::Open, Some("High"), Some(&created), None);
        let hours = high_policy();
        assert!(is_breached(&t, &hours, t0() + Duration::hours(5)));
        assert!(!is_breached(&t, &hours, t0() + Duration::hours(3)));
    }

    #[test]
    fn policy_boundary_is_strict() {
        let created = rfc(t0());
        let t = ticket(TicketStatus::Open, Some("High"), Some(&created), None);
        let hours = high_policy();
        assert!(!is_breached(&t, &hours, t0() + Duration::hours(4)));
        assert!(is_breached(
            &t,
            &hours,
            t0() + Duration::hours(4) + Duration::milliseconds(1)
        ));
    }

    #[test]
    fn fractional_policy_hours() {
        let map = build_resolution_hours_map(&[policy("critical", 0.5)]);
        let created = rfc(t0());
        let t = ticket(TicketStatus::Open, Some("Critical"), Some(&created), None);
        assert!(!is_breached(&t, &map, t0() + Duration::minutes(29)));
        assert!(is_breached(&t, &map, t0() + Duration::minutes(31)));
    }

    #[test]
    fn priority_lookup_is_normalized() {
        let created = rfc(t0());
        let t = ticket(TicketStatus::Open, Some("  HIGH "), Some(&created), None);
        assert!(is_breached(&t, &high_policy(), t0() + Duration::hours(5)));
    }

    #[test]
    fn unmapped_priority_never_breached() {
        let created = rfc(t0() - Duration::days(365));
        let t = ticket(TicketStatus::Open, Some("Low"), Some(&created), None);
        assert!(!is_breached(&t, &high_policy(), t0()));
    }

    #[test]
    fn missing_priority_never_breached() {
        let created = rfc(t0() - Duration::days(365));
        let t = ticket(TicketStatus::Open, None, Some(&created), None);
        assert!(!is_breached(&t, &high_policy(), t0()));
        let blank = ticket(TicketStatus::Open, Some("  "), Some(&created), None);
        assert!(!is_breached(&blank, &high_policy(), t0()));
    }

    #[test]
    fn missing_or_malformed_created_at_never_breached() {
        let t = ticket(TicketStatus::Open, Some("High"), None, None);
        assert!(!is_breached(&t, &high_policy(), t0()));
        let bad = ticket(TicketStatus::Open, Some("High"), Some("yesterday"), None);
        assert!(!is_breached(&bad, &high_policy(), t0()));
    }

    #[test]
    fn is_breached_now_uses_current_time() {
        let t = ticket(TicketStatus::Open, None, None, Some("2000-01-01T00:00:00Z"));
        assert!(is_breached_now(&t, &ResolutionHours::default()));
    }

    // -----------------------------------------------------------------------
    // breach_deadline
    // -----------------------------------------------------------------------

    #[test]
    fn deadline_prefers_due_at() {
        let due_ts = t0() + Duration::hours(2);
        let t = ticket(TicketStatus::Open, Some("High"), Some(&rfc(t0())), Some(&rfc(due_ts)));
        assert_eq!(breach_deadline(&t, &high_policy()), Some(due_ts));
    }

    #[test]
    fn deadline_from_policy() {
        let t = ticket(TicketStatus::Open, Some("high"), Some(&rfc(t0())), None);
        assert_eq!(
            breach_deadline(&t, &high_policy()),
            Some(t0() + Duration::hours(4))
        );
    }

    #[test]
    fn closed_ticket_has_no_deadline() {
        let t = ticket(TicketStatus::Closed, Some("high"), Some(&rfc(t0())), None);
        assert_eq!(breach_deadline(&t, &high_policy()), None);
    }
}
