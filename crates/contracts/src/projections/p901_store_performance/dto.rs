use serde::{Deserialize, Serialize};

/// Per-store sales totals (`GET /all-stores-performance`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorePerformanceDto {
    #[serde(rename = "_id")]
    pub store_id: String,
    #[serde(rename = "storeName", default)]
    pub store_name: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(rename = "totalNSV", default)]
    pub total_nsv: f64,
    #[serde(rename = "totalGSV", default)]
    pub total_gsv: f64,
    #[serde(rename = "totalOrders", default)]
    pub total_orders: f64,
    #[serde(rename = "totalQuantity", default)]
    pub total_quantity: f64,
}
