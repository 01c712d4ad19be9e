use serde::{Deserialize, Serialize};

/// Per-city sales totals (`GET /all-cities-performance`), one row per city.
/// The city name doubles as the row id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityPerformanceDto {
    #[serde(rename = "_id")]
    pub city: String,
    #[serde(rename = "totalNSV", default)]
    pub total_nsv: f64,
    #[serde(rename = "totalGSV", default)]
    pub total_gsv: f64,
    #[serde(rename = "totalOrders", default)]
    pub total_orders: f64,
    #[serde(rename = "totalQuantity", default)]
    pub total_quantity: f64,
    #[serde(rename = "storeCount", default)]
    pub store_count: u32,
}
