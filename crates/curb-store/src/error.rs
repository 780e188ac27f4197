use thiserror::Error;

/// Errors from store operations.
///
/// `StaleState` is how a lost race surfaces: a conditional transition
/// found the entity in a state other than the expected one. Ledgers map
/// it to their own transition error; it is never retried silently.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The referenced entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// A uniqueness constraint would be violated.
    #[error("unique constraint violated: {constraint}")]
    UniqueViolation { constraint: &'static str },

    /// A conditional transition found the entity in an unexpected state.
    #[error("{entity} state is stale: expected {expected}, found {actual}")]
    StaleState {
        entity: &'static str,
        expected: String,
        actual: String,
    },

    /// The backend is unavailable (poisoned lock, connection loss).
    /// Propagated as-is: the caller cannot know whether a write landed.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
