use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// The three actor roles in the coordination workflow.
///
/// A role is fixed at registration and never changes afterwards. Kept as
/// a closed enum so an unknown role is rejected at the boundary instead
/// of surfacing later as a silently empty dashboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Submits pickup requests and post-collection feedback.
    Requester,
    /// Binds pending requests to collectors and manages the catalog.
    Dispatcher,
    /// Works assignments: advances and completes them.
    Collector,
}

impl Role {
    /// All roles, for iteration in listings.
    pub const ALL: [Role; 3] = [Role::Requester, Role::Dispatcher, Role::Collector];

    /// Canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Requester => "requester",
            Role::Dispatcher => "dispatcher",
            Role::Collector => "collector",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "requester" => Ok(Role::Requester),
            "dispatcher" => Ok(Role::Dispatcher),
            "collector" => Ok(Role::Collector),
            other => Err(TypeError::UnknownVariant {
                kind: "role",
                value: other.to_string(),
            }),
        }
    }
}
