//! Access control for Curbline.
//!
//! Authenticates actors against the credential vault and resolves which
//! ledger operations each role may perform. Authentication failures are
//! reported generically: callers cannot distinguish an unknown handle
//! from a wrong secret, which prevents handle enumeration.

pub mod control;
pub mod error;
pub mod permission;

pub use control::{AccessControl, Registration};
pub use error::AccessError;
pub use permission::{is_allowed, permissions, Capability};
