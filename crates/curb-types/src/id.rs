//! Typed entity identifiers.
//!
//! Every entity gets its own UUID v7 newtype so ids cannot be mixed up
//! across entity boundaries. V7 ids are time-ordered, which keeps
//! insertion order recoverable without a separate sequence column.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! entity_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(uuid::Uuid);

        impl $name {
            /// Generate a new time-ordered id (UUID v7).
            pub fn new() -> Self {
                Self(uuid::Uuid::now_v7())
            }

            /// Create from an existing UUID.
            pub fn from_uuid(uuid: uuid::Uuid) -> Self {
                Self(uuid)
            }

            /// The underlying UUID.
            pub fn as_uuid(&self) -> &uuid::Uuid {
                &self.0
            }

            /// Short representation (first 8 characters of the UUID).
            pub fn short_id(&self) -> String {
                self.0.to_string()[..8].to_string()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.short_id())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Identifier for an [`crate::Actor`].
    ActorId
);
entity_id!(
    /// Identifier for a [`crate::WasteCategory`].
    CategoryId
);
entity_id!(
    /// Identifier for a [`crate::PickupRequest`].
    RequestId
);
entity_id!(
    /// Identifier for an [`crate::Assignment`].
    AssignmentId
);
entity_id!(
    /// Identifier for a [`crate::Feedback`] record.
    FeedbackId
);
