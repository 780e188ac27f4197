use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{ActorId, CategoryId, RequestId};
use crate::status::RequestStatus;

/// A waste-pickup request.
///
/// `status` is derived state: it is `Pending` while no active assignment
/// exists and otherwise mirrors the active assignment's status. Only the
/// store's assignment transitions write it; nothing else may.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PickupRequest {
    pub id: RequestId,
    pub requester_id: ActorId,
    pub category_id: CategoryId,
    pub quantity_kg: f64,
    pub address: String,
    pub status: RequestStatus,
    /// The date the requester asked for collection.
    pub requested_date: NaiveDate,
    /// Set once, when the assignment completes.
    pub pickup_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl PickupRequest {
    /// A freshly submitted request: `Pending`, no pickup date yet.
    pub fn new(
        requester_id: ActorId,
        category_id: CategoryId,
        quantity_kg: f64,
        address: impl Into<String>,
        requested_date: NaiveDate,
    ) -> Self {
        Self {
            id: RequestId::new(),
            requester_id,
            category_id,
            quantity_kg,
            address: address.into(),
            status: RequestStatus::Pending,
            requested_date,
            pickup_date: None,
            created_at: Utc::now(),
        }
    }
}
