//! Resource (team member / material) domain type

use serde::{Deserialize, Serialize};

/// A resource available for assignment — a team member or a material
/// resource (hardware, licenses, environments).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Resource {
    pub name: String,
    /// Role for human resources (e.g. "Backend developer").
    pub role: Option<String>,
    /// Experience level for human resources (e.g. "Senior").
    pub experience: Option<String>,
    pub availability: Option<String>,
    pub technologies: Vec<String>,
    /// Kind label for material resources (e.g. "Servidor").
    pub resource_type: Option<String>,
    pub is_human: bool,
    pub is_available: bool,
}

impl Resource {
    /// Convenience constructor for an available human resource.
    pub fn human(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_human: true,
            is_available: true,
            ..Self::default()
        }
    }

    /// Convenience constructor for an available material resource.
    pub fn material(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_human: false,
            is_available: true,
            ..Self::default()
        }
    }
}
