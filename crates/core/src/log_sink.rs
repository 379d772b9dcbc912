//! Best-effort persistence of asset log entries.
//!
//! Audit logging is advisory, not transactional: an asset mutation has
//! already succeeded by the time its log entries are written, so a failed
//! insert is reported through `tracing` and a failure counter but never
//! surfaces to the caller. There is no retry and no ordering guarantee
//! between concurrently issued batches.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::asset_log::AssetLogEntry;
use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Sink contract
// ---------------------------------------------------------------------------

/// Append-only store for asset log entries.
#[async_trait]
pub trait AssetLogSink: Send + Sync {
    /// Insert all `entries` as one batch.
    async fn insert_logs(&self, entries: &[AssetLogEntry]) -> Result<(), CoreError>;
}

// ---------------------------------------------------------------------------
// Writer
// ---------------------------------------------------------------------------

/// Wraps a sink so that every write is best-effort.
///
/// Cloning is cheap; clones share the sink and the failure counter.
pub struct AuditLogWriter<S: ?Sized> {
    sink: Arc<S>,
    failed_batches: Arc<AtomicU64>,
}

impl<S: ?Sized> Clone for AuditLogWriter<S> {
    fn clone(&self) -> Self {
        Self {
            sink: Arc::clone(&self.sink),
            failed_batches: Arc::clone(&self.failed_batches),
        }
    }
}

impl<S> AuditLogWriter<S>
where
    S: AssetLogSink + ?Sized + 'static,
{
    pub fn new(sink: Arc<S>) -> Self {
        Self {
            sink,
            failed_batches: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Write one batch, swallowing any failure.
    ///
    /// Returns `true` when the batch was persisted (or was empty).
    pub async fn record(&self, entries: &[AssetLogEntry]) -> bool {
        if entries.is_empty() {
            return true;
        }

        match self.sink.insert_logs(entries).await {
            Ok(()) => {
                tracing::debug!(
                    count = entries.len(),
                    asset_id = entries[0].asset_id,
                    "Asset log batch persisted"
                );
                true
            }
            Err(e) => {
                let failed_total = self.failed_batches.fetch_add(1, Ordering::Relaxed) + 1;
                tracing::error!(
                    error = %e,
                    count = entries.len(),
                    asset_id = entries[0].asset_id,
                    failed_total,
                    "Failed to persist asset log batch"
                );
                false
            }
        }
    }

    /// Write one batch in the background without awaiting it.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn spawn_record(&self, entries: Vec<AssetLogEntry>) -> JoinHandle<bool> {
        let writer = self.clone();
        tokio::spawn(async move { writer.record(&entries).await })
    }

    /// Number of batches that failed to persist since this writer was
    /// created.
    pub fn failed_batches(&self) -> u64 {
        self.failed_batches.load(Ordering::Relaxed)
    }
}

// ---------------------------------------------------------------------------
// In-memory sink
// ---------------------------------------------------------------------------

/// Sink that keeps entries in memory. Used in tests and local tooling.
#[derive(Default)]
pub struct MemoryLogSink {
    entries: Mutex<Vec<AssetLogEntry>>,
    fail_with: Mutex<Option<String>>,
}

impl MemoryLogSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent insert fail with `message`.
    pub async fn fail_with(&self, message: &str) {
        *self.fail_with.lock().await = Some(message.to_string());
    }

    /// Snapshot of everything inserted so far, in insertion order.
    pub async fn entries(&self) -> Vec<AssetLogEntry> {
        self.entries.lock().await.clone()
    }
}

#[async_trait]
impl AssetLogSink for MemoryLogSink {
    async fn insert_logs(&self, entries: &[AssetLogEntry]) -> Result<(), CoreError> {
        if let Some(message) = self.fail_with.lock().await.clone() {
            return Err(CoreError::Persistence(message));
        }
        self.entries.lock().await.extend_from_slice(entries);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
