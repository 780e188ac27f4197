use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{ActorId, FeedbackId, RequestId};

/// Post-collection rating and comment, tied 1:1 to a request.
///
/// Append-only: once created there is no update or delete in the core
/// contract.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub id: FeedbackId,
    pub requester_id: ActorId,
    pub request_id: RequestId,
    /// Whole stars, 1 through 5.
    pub rating: u8,
    pub comments: String,
    pub submitted_at: DateTime<Utc>,
}

impl Feedback {
    pub fn new(
        requester_id: ActorId,
        request_id: RequestId,
        rating: u8,
        comments: impl Into<String>,
    ) -> Self {
        Self {
            id: FeedbackId::new(),
            requester_id,
            request_id,
            rating,
            comments: comments.into(),
            submitted_at: Utc::now(),
        }
    }
}
