use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{ActorId, AssignmentId, RequestId};
use crate::status::AssignmentStatus;

/// The binding of a request to a collector.
///
/// At most one non-terminal assignment exists per request; its status is
/// monotone and every status change cascades into the owning request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: AssignmentId,
    pub request_id: RequestId,
    pub collector_id: ActorId,
    pub status: AssignmentStatus,
    pub assigned_at: DateTime<Utc>,
}

impl Assignment {
    /// A new binding, starting in `Assigned`.
    pub fn new(request_id: RequestId, collector_id: ActorId) -> Self {
        Self {
            id: AssignmentId::new(),
            request_id,
            collector_id,
            status: AssignmentStatus::Assigned,
            assigned_at: Utc::now(),
        }
    }

    /// Whether this assignment still drives its request's status.
    pub fn is_active(&self) -> bool {
        !self.status.is_terminal()
    }
}
