use thiserror::Error;

/// Faults that cross the store boundary.
///
/// Validation and dedup outcomes never appear here; those are ordinary
/// return values of the services that detect them. A `StoreError` fails
/// only the request that triggered it.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Catalog storage unavailable: {0}")]
    Unavailable(String),

    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

impl StoreError {
    pub fn unavailable(err: impl std::fmt::Display) -> Self {
        Self::Unavailable(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
