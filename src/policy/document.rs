use serde::{Deserialize, Serialize};

/// One localized hazardous goods policy, as authored on disk and as returned
/// to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyDocument {
    /// Jurisdiction the policy belongs to (e.g. "US").
    pub code: String,
    pub alert: String,
    pub title: String,
    pub body: Vec<String>,
}
