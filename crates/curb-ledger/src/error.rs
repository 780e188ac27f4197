use curb_store::StoreError;
use curb_types::TypeError;
use thiserror::Error;

/// Errors produced by ledger operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// Malformed input; the caller's fault, never retried automatically.
    #[error(transparent)]
    InvalidInput(#[from] TypeError),

    /// The requested lifecycle move is not permitted from the entity's
    /// current state. Also the outcome of a lost race: the state moved
    /// under the caller, who must re-fetch and decide.
    #[error("invalid transition: {0}")]
    InvalidTransition(String),

    /// The collector id does not reference an actor with the collector
    /// role.
    #[error("unknown collector: {0}")]
    UnknownCollector(String),

    /// Feedback requires the request to have been collected.
    #[error("request has not been collected")]
    RequestNotCollected,

    /// The request already has feedback.
    #[error("feedback already exists for request {0}")]
    DuplicateFeedback(String),

    /// The category is referenced by existing requests and cannot be
    /// removed.
    #[error("category is referenced by existing requests")]
    CategoryInUse,

    /// The referenced entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// The persistence store failed; propagated as-is, since the ledger
    /// cannot know whether the write landed.
    #[error("store error: {0}")]
    Store(StoreError),
}

impl From<StoreError> for LedgerError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, id } => LedgerError::NotFound { entity, id },
            StoreError::StaleState {
                entity,
                expected,
                actual,
            } => LedgerError::InvalidTransition(format!(
                "{entity} is {actual}, expected {expected}"
            )),
            other => LedgerError::Store(other),
        }
    }
}
