//! Lifecycle statuses for requests and assignments.
//!
//! `RequestStatus` is a derived value: it is always `Pending` while no
//! active assignment exists, and otherwise mirrors the status of the
//! request's single active assignment. `AssignmentStatus` is the value
//! that actually moves, and it only moves forward.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle status of a pickup request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestStatus {
    /// Submitted, no collector bound yet.
    Pending,
    /// An active assignment exists in state `Assigned`.
    Assigned,
    /// The active assignment is in state `InProgress`.
    InProgress,
    /// The assignment completed; the request is closed for everything
    /// except feedback.
    Collected,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Assigned => "assigned",
            RequestStatus::InProgress => "in-progress",
            RequestStatus::Collected => "collected",
        }
    }

    /// Whether this request can still be bound to a collector.
    pub fn is_assignable(&self) -> bool {
        matches!(self, RequestStatus::Pending)
    }

    /// Terminal state: the only remaining action is feedback.
    pub fn is_collected(&self) -> bool {
        matches!(self, RequestStatus::Collected)
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Progress status of an assignment. Monotone: never regresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssignmentStatus {
    Assigned,
    InProgress,
    Completed,
}

impl AssignmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignmentStatus::Assigned => "assigned",
            AssignmentStatus::InProgress => "in-progress",
            AssignmentStatus::Completed => "completed",
        }
    }

    /// Whether the state machine permits moving from `self` to `next`.
    ///
    /// Allowed edges: Assigned→InProgress, Assigned→Completed (direct
    /// completion), InProgress→Completed. Completed is terminal.
    pub fn can_transition_to(&self, next: AssignmentStatus) -> bool {
        matches!(
            (self, next),
            (AssignmentStatus::Assigned, AssignmentStatus::InProgress)
                | (AssignmentStatus::Assigned, AssignmentStatus::Completed)
                | (AssignmentStatus::InProgress, AssignmentStatus::Completed)
        )
    }

    /// Terminal state check.
    pub fn is_terminal(&self) -> bool {
        matches!(self, AssignmentStatus::Completed)
    }

    /// The request status this assignment state cascades into.
    pub fn cascades_to(&self) -> RequestStatus {
        match self {
            AssignmentStatus::Assigned => RequestStatus::Assigned,
            AssignmentStatus::InProgress => RequestStatus::InProgress,
            AssignmentStatus::Completed => RequestStatus::Collected,
        }
    }
}

impl fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
