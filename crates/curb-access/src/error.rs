use curb_store::StoreError;
use curb_types::TypeError;
use thiserror::Error;

/// Errors produced by access-control operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AccessError {
    /// The handle is already registered.
    #[error("handle already registered")]
    DuplicateHandle,

    /// The contact email is already registered.
    #[error("contact already registered")]
    DuplicateContact,

    /// A field failed its format rule.
    #[error(transparent)]
    InvalidInput(#[from] TypeError),

    /// Authentication failed. Deliberately generic: the same value is
    /// returned for an unknown handle and a wrong secret.
    #[error("authentication failed")]
    AuthFailure,

    /// The referenced actor does not exist.
    #[error("actor not found: {0}")]
    NotFound(String),

    /// The credential vault could not produce a hash.
    #[error("credential hashing unavailable: {0}")]
    Crypto(String),

    /// The persistence store failed; propagated as-is.
    #[error("store error: {0}")]
    Store(StoreError),
}

impl From<StoreError> for AccessError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UniqueViolation {
                constraint: "actor.handle",
            } => AccessError::DuplicateHandle,
            StoreError::UniqueViolation {
                constraint: "actor.contact_email",
            } => AccessError::DuplicateContact,
            StoreError::NotFound { id, .. } => AccessError::NotFound(id),
            other => AccessError::Store(other),
        }
    }
}
