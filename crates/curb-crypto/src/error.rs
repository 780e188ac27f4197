use thiserror::Error;

/// Errors from credential operations.
///
/// Verification never errors: any malformed or mismatching stored value
/// is an authentication failure (`false`), not a fault.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// The platform's secure random source is unavailable.
    #[error("secure random source unavailable: {0}")]
    CryptoUnavailable(String),
}
