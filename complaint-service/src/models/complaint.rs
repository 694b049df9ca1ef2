use serde::{Deserialize, Serialize};

/// A complaint filed by a single user. Only `resolved` ever changes after
/// creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Complaint {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub rating: i64,
    pub resolved: bool,
}

impl Complaint {
    pub fn new(id: String, title: String, summary: String, rating: i64) -> Self {
        Self {
            id,
            title,
            summary,
            rating,
            resolved: false,
        }
    }

    pub fn resolve(&mut self) {
        self.resolved = true;
    }
}
