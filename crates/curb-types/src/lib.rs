//! Foundation types for Curbline.
//!
//! This crate provides the identifiers, role and status enumerations,
//! entity structs, and field validation rules shared by every other
//! Curbline crate. It has no behavior of its own beyond validation and
//! status-transition predicates.

pub mod actor;
pub mod assignment;
pub mod category;
pub mod error;
pub mod feedback;
pub mod id;
pub mod request;
pub mod role;
pub mod status;
pub mod validation;

pub use actor::{Actor, HashedSecret};
pub use assignment::Assignment;
pub use category::WasteCategory;
pub use error::TypeError;
pub use feedback::Feedback;
pub use id::{ActorId, AssignmentId, CategoryId, FeedbackId, RequestId};
pub use request::PickupRequest;
pub use role::Role;
pub use status::{AssignmentStatus, RequestStatus};
