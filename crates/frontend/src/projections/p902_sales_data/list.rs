use std::borrow::Cow;

use contracts::projections::p902_sales_data::dto::SaleRecordDto;

use crate::shared::export::ColumnSpec;
use crate::shared::list::aggregate::AggregateSpec;
use crate::shared::list::field::{FieldValue, TableRecord};
use crate::shared::list::filter::{FieldConstraint, FilterSpec, RangeInput};
use crate::shared::list::sort::SortSpec;

pub const EXPORT_NAME: &str = "all-sales-data";

impl TableRecord for SaleRecordDto {
    const SEARCH_FIELDS: &'static [&'static str] = &["storeName", "city", "skuCode", "productName"];

    fn record_id(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.id)
    }

    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "_id" => FieldValue::text(&self.id),
            "date" => FieldValue::text(&self.date),
            "storeName" => FieldValue::opt_text(self.store_name.as_deref()),
            "city" => FieldValue::opt_text(self.city.as_deref()),
            "skuCode" => FieldValue::text(&self.sku_code),
            "productName" => FieldValue::opt_text(self.product_name.as_deref()),
            "quantity" => FieldValue::number(self.quantity),
            "GSV" => FieldValue::number(self.gsv),
            "NSV" => FieldValue::number(self.nsv),
            "discount" => FieldValue::opt_number(self.discount),
            _ => FieldValue::Null,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalesFilterForm {
    pub search: String,
    pub city: String,
    pub sku: String,
    pub nsv: RangeInput,
    pub quantity: RangeInput,
}

impl SalesFilterForm {
    pub fn to_spec(&self) -> FilterSpec {
        FilterSpec::new()
            .with_search(self.search.clone())
            .with(FieldConstraint::contains("city", self.city.clone()))
            .with(FieldConstraint::contains("skuCode", self.sku.clone()))
            .with(self.nsv.to_constraint("NSV"))
            .with(self.quantity.to_constraint("quantity"))
    }
}

/// ISO dates sort correctly as text.
pub fn default_sort() -> SortSpec {
    SortSpec::desc("date")
}

pub fn summary_spec() -> AggregateSpec {
    AggregateSpec::new()
        .count("lines")
        .sum("quantity", "quantity")
        .sum("GSV", "GSV")
        .sum("NSV", "NSV")
        .sum("discount", "discount")
        .ratio("avgLineNSV", "NSV", "lines")
        .ratio("avgUnitPrice", "NSV", "quantity")
}

pub fn csv_columns() -> ColumnSpec {
    ColumnSpec::new()
        .auto("Date", "date")
        .auto("Store", "storeName")
        .auto("City", "city")
        .text("SKU", "skuCode")
        .auto("Product", "productName")
        .integer("Quantity", "quantity")
        .money("GSV", "GSV")
        .money("NSV", "NSV")
        .money("Discount", "discount")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::export::{export_csv_on, CsvOptions};
    use crate::shared::list::aggregate::summarize;
    use crate::shared::list::server::build_query;
    use crate::shared::list::{filter, sort};
    use chrono::NaiveDate;

    fn sale(id: &str, date: &str, city: Option<&str>, sku: &str, qty: f64, nsv: f64) -> SaleRecordDto {
        SaleRecordDto {
            id: id.to_string(),
            date: date.to_string(),
            store_name: Some(format!("Store {}", id)),
            city: city.map(str::to_string),
            sku_code: sku.to_string(),
            product_name: None,
            quantity: qty,
            gsv: nsv * 1.1,
            nsv,
            discount: None,
        }
    }

    fn sales() -> Vec<SaleRecordDto> {
        vec![
            sale("1", "2024-03-02", Some("Pune"), "SKU-1", 2.0, 200.0),
            sale("2", "2024-03-01", Some("Mumbai"), "SKU-2", 1.0, 50.0),
            sale("3", "2024-03-03", None, "sku-10", 5.0, 1000.0),
        ]
    }

    #[test]
    fn test_latest_first() {
        let sorted = sort::sort(&sales(), &default_sort());
        let ids: Vec<_> = sorted.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "1", "2"]);
    }

    #[test]
    fn test_sku_contains_and_range() {
        let form = SalesFilterForm {
            sku: "sku-1".into(),
            nsv: RangeInput {
                min: "100".into(),
                max: "abc".into(),
            },
            ..Default::default()
        };
        let ids: Vec<_> = filter::apply(&sales(), &form.to_spec())
            .iter()
            .map(|s| s.id.clone())
            .collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_summary_ratios() {
        let stats = summarize(&sales(), &summary_spec());
        assert_eq!(stats.get("lines"), 3.0);
        assert_eq!(stats.get("NSV"), 1250.0);
        assert_eq!(stats.get("discount"), 0.0);
        assert_eq!(stats.get("avgUnitPrice"), 1250.0 / 8.0);
    }

    #[test]
    fn test_server_query_from_form() {
        let form = SalesFilterForm {
            city: "Pune".into(),
            nsv: RangeInput {
                min: String::new(),
                max: "500".into(),
            },
            ..Default::default()
        };
        let query = build_query(&form.to_spec(), 2, 50);
        assert_eq!(query.filters.get("city").map(String::as_str), Some("Pune"));
        assert_eq!(query.filters.get("NSV_max").map(String::as_str), Some("500"));
        assert!(!query.filters.contains_key("skuCode"));
    }

    #[test]
    fn test_fractional_quantity_exports_in_full() {
        let rows = vec![sale("4", "2024-03-03", None, "A", 2.5, 10.0)];
        let export = export_csv_on(
            &rows,
            &csv_columns(),
            EXPORT_NAME,
            NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            CsvOptions::default(),
        )
        .unwrap();
        let line = export.content.lines().nth(1).unwrap();
        assert_eq!(line, "\"2024-03-03\",\"Store 4\",,\"A\",,2.5,11.00,10.00,");
    }

    #[test]
    fn test_missing_cells_export_empty() {
        let rows = vec![sale("3", "2024-03-03", None, "007", 5.0, 1000.0)];
        let export = export_csv_on(
            &rows,
            &csv_columns(),
            EXPORT_NAME,
            NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            CsvOptions::default(),
        )
        .unwrap();
        let line = export.content.lines().nth(1).unwrap();
        assert_eq!(line, "\"2024-03-03\",\"Store 3\",,\"007\",,5,1100.00,1000.00,");
    }
}
