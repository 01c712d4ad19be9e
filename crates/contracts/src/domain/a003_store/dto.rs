use serde::{Deserialize, Serialize};

/// Store master record (`GET /stores`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreDto {
    #[serde(rename = "_id")]
    pub id: String,
    pub store_id: String,
    pub store_name: String,
    pub city: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub contact_number: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}
