#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The audit log store rejected or failed a write.
    #[error("Persistence failed: {0}")]
    Persistence(String),
}
