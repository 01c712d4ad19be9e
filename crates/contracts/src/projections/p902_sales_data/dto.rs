use serde::{Deserialize, Serialize};

/// One sales line (`GET /all-sales-data`, `GET /sales`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecordDto {
    #[serde(rename = "_id")]
    pub id: String,
    /// ISO date, `YYYY-MM-DD`
    pub date: String,
    #[serde(rename = "storeName", default)]
    pub store_name: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(rename = "skuCode")]
    pub sku_code: String,
    #[serde(rename = "productName", default)]
    pub product_name: Option<String>,
    pub quantity: f64,
    #[serde(rename = "GSV", default)]
    pub gsv: f64,
    #[serde(rename = "NSV", default)]
    pub nsv: f64,
    #[serde(default)]
    pub discount: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sale_record_from_backend_json() {
        let json = r#"{
            "_id": "s-1",
            "date": "2024-03-01",
            "storeName": "Andheri West",
            "skuCode": "SKU-9",
            "quantity": 3,
            "GSV": 1200.5,
            "NSV": 1000
        }"#;
        let sale: SaleRecordDto = serde_json::from_str(json).unwrap();
        assert_eq!(sale.id, "s-1");
        assert_eq!(sale.store_name.as_deref(), Some("Andheri West"));
        assert_eq!(sale.city, None);
        assert_eq!(sale.nsv, 1000.0);
        assert_eq!(sale.discount, None);
    }
}
