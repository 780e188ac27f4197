use serde::{Deserialize, Serialize};

use crate::id::CategoryId;

/// A waste category: reference data, rarely mutated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WasteCategory {
    pub id: CategoryId,
    pub name: String,
    pub description: String,
}

impl WasteCategory {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: CategoryId::new(),
            name: name.into(),
            description: description.into(),
        }
    }
}
