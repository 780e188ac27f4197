//! Core workflow ledgers for Curbline.
//!
//! This crate is the heart of the system. It provides:
//! - `RequestLedger`: pickup request submission and queries
//! - `AssignmentLedger`: the assign/advance/complete state machine whose
//!   status changes cascade into the owning request
//! - `FeedbackLedger`: append-only post-collection feedback, gated on the
//!   request having been collected
//! - `ReferenceCatalog`: waste-category reference data
//!
//! Each ledger is constructed over an injected [`curb_store`] boundary;
//! nothing here knows about a concrete backend. All operations return a
//! value or one specific [`LedgerError`], never a panic or a partial
//! cascade.

pub mod assignment;
pub mod catalog;
pub mod error;
pub mod feedback;
pub mod request;

pub use assignment::AssignmentLedger;
pub use catalog::ReferenceCatalog;
pub use error::LedgerError;
pub use feedback::FeedbackLedger;
pub use request::RequestLedger;
