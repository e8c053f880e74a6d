use serde::{Deserialize, Serialize};

/// Structured bug report distilled from a support conversation.
///
/// Every field defaults to empty so partially-filled model output still
/// deserializes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BugTrail {
    pub title: String,
    pub summary: String,
    pub environment: Vec<String>,
    pub preconditions: Vec<String>,
    pub steps: Vec<String>,
    pub expected: String,
    pub actual: String,
    pub impact: String,
    pub evidence: Vec<String>,
    pub tags: Vec<String>,
}

impl BugTrail {
    /// True when no field carries any content.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self == &Self::default()
    }
}
