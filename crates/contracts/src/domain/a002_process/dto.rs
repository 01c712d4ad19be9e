use serde::{Deserialize, Serialize};

/// Production process (`GET /processes`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessDto {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub steps: u32,
    /// "active" / "draft" / "archived"
    pub status: String,
    #[serde(default)]
    pub created_at: Option<String>,
}
