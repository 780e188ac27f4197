//! Role-based permission resolution for the ledgers.
//!
//! Static capability tables; the mapping is policy, not data, so it lives
//! in code where a change shows up in review.

use curb_types::Role;

/// An operation a role may perform against the ledgers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Submit and cancel own pickup requests.
    SubmitRequest,
    /// View own requests and their progress.
    ViewOwnRequests,
    /// Submit post-collection feedback on own requests.
    SubmitFeedback,
    /// View every request in the system.
    ViewAllRequests,
    /// Bind pending requests to collectors.
    AssignCollector,
    /// Manage the waste-category catalog.
    ManageCatalog,
    /// View feedback and aggregate ratings.
    ViewFeedback,
    /// View assignments bound to oneself.
    ViewOwnAssignments,
    /// Move an assignment from assigned to in-progress.
    AdvanceAssignment,
    /// Complete an assignment.
    CompleteAssignment,
}

const REQUESTER: &[Capability] = &[
    Capability::SubmitRequest,
    Capability::ViewOwnRequests,
    Capability::SubmitFeedback,
];

const DISPATCHER: &[Capability] = &[
    Capability::ViewAllRequests,
    Capability::AssignCollector,
    Capability::ManageCatalog,
    Capability::ViewFeedback,
];

const COLLECTOR: &[Capability] = &[
    Capability::ViewOwnAssignments,
    Capability::AdvanceAssignment,
    Capability::CompleteAssignment,
];

/// The capabilities granted to a role.
pub fn permissions(role: Role) -> &'static [Capability] {
    match role {
        Role::Requester => REQUESTER,
        Role::Dispatcher => DISPATCHER,
        Role::Collector => COLLECTOR,
    }
}

/// Whether `role` holds `capability`.
pub fn is_allowed(role: Role, capability: Capability) -> bool {
    permissions(role).contains(&capability)
}
