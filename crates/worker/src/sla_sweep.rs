//! Periodic SLA breach sweep.
//!
//! On every tick the job loads the SLA policies and all unresolved tickets,
//! evaluates each ticket with [`assetdesk_core::sla`] and reports breaches
//! through `tracing`. Query failures are logged and the loop keeps running.

use std::time::Duration;

use assetdesk_core::sla::{breach_deadline, build_resolution_hours_map, is_breached, ResolutionHours};
use assetdesk_core::ticket::{SlaPolicy, Ticket};
use assetdesk_core::types::{DbId, Timestamp};
use assetdesk_db::repositories::{SlaPolicyRepo, TicketRepo};
use assetdesk_db::DbPool;
use chrono::Utc;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

/// A ticket found in breach during a sweep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreachedTicket {
    pub ticket_id: DbId,
    /// The deadline that was missed, when one could be determined.
    pub deadline: Option<Timestamp>,
}

/// Outcome of evaluating one batch of tickets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SweepSummary {
    pub evaluated: usize,
    pub breached: Vec<BreachedTicket>,
}

/// Evaluate every ticket against `hours` at `now`.
pub fn summarize(tickets: &[Ticket], hours: &ResolutionHours, now: Timestamp) -> SweepSummary {
    let breached = tickets
        .iter()
        .filter(|t| is_breached(t, hours, now))
        .map(|t| BreachedTicket {
            ticket_id: t.id,
            deadline: breach_deadline(t, hours),
        })
        .collect();

    SweepSummary {
        evaluated: tickets.len(),
        breached,
    }
}

/// Load policies and unresolved tickets, then summarize them.
pub async fn sweep_once(pool: &DbPool, now: Timestamp) -> Result<SweepSummary, sqlx::Error> {
    let policies: Vec<SlaPolicy> = SlaPolicyRepo::list(pool)
        .await?
        .into_iter()
        .map(SlaPolicy::from)
        .collect();
    let hours = build_resolution_hours_map(&policies);
    if hours.is_empty() {
        tracing::warn!(
            rows = policies.len(),
            "SLA sweep: no usable policies, only due dates apply"
        );
    } else {
        tracing::debug!(rows = policies.len(), priorities = hours.len(), "SLA policies loaded");
    }

    let tickets: Vec<Ticket> = TicketRepo::list_unresolved(pool)
        .await?
        .into_iter()
        .map(Ticket::from)
        .collect();

    Ok(summarize(&tickets, &hours, now))
}

/// Run the sweep loop until `cancel` is triggered.
pub async fn run(pool: DbPool, interval: Duration, cancel: CancellationToken) {
    tracing::info!(interval_secs = interval.as_secs(), "SLA sweep job started");

    let mut ticker = tokio::time::interval(interval);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("SLA sweep job stopping");
                break;
            }
            _ = ticker.tick() => {
                match sweep_once(&pool, Utc::now()).await {
                    Ok(summary) => report(&summary),
                    Err(e) => {
                        tracing::error!(error = %e, "SLA sweep: query failed");
                    }
                }
            }
        }
    }
}

fn report(summary: &SweepSummary) {
    for ticket in &summary.breached {
        tracing::warn!(
            ticket_id = ticket.ticket_id,
            deadline = ?ticket.deadline,
            "SLA breached"
        );
    }

    if summary.breached.is_empty() {
        tracing::debug!(evaluated = summary.evaluated, "SLA sweep: no breaches");
    } else {
        tracing::info!(
            evaluated = summary.evaluated,
            breached = summary.breached.len(),
            "SLA sweep: breaches found"
        );
    }
}
