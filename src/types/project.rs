//! Project domain type

use serde::{Deserialize, Serialize};

/// A project as handed to prompt composition.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
}

impl Project {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
            description: None,
        }
    }
}
