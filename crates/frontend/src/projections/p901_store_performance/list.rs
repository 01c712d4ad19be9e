use std::borrow::Cow;

use contracts::projections::p901_store_performance::dto::StorePerformanceDto;

use crate::shared::export::ColumnSpec;
use crate::shared::list::aggregate::{safe_ratio, AggregateSpec};
use crate::shared::list::field::{FieldValue, TableRecord};
use crate::shared::list::filter::{FieldConstraint, FilterSpec, RangeInput};
use crate::shared::list::sort::SortSpec;

pub const EXPORT_NAME: &str = "all-stores-performance";

impl TableRecord for StorePerformanceDto {
    const SEARCH_FIELDS: &'static [&'static str] = &["_id", "storeName", "city"];

    fn record_id(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.store_id)
    }

    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "_id" | "storeId" => FieldValue::text(&self.store_id),
            "storeName" => FieldValue::opt_text(self.store_name.as_deref()),
            "city" => FieldValue::opt_text(self.city.as_deref()),
            "totalNSV" => FieldValue::number(self.total_nsv),
            "totalGSV" => FieldValue::number(self.total_gsv),
            "totalOrders" => FieldValue::number(self.total_orders),
            "totalQuantity" => FieldValue::number(self.total_quantity),
            "avgOrderValue" => FieldValue::number(safe_ratio(self.total_nsv, self.total_orders)),
            _ => FieldValue::Null,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreFilterForm {
    pub search: String,
    /// Exact city, empty for all cities
    pub city: String,
    pub nsv: RangeInput,
    pub orders: RangeInput,
}

impl StoreFilterForm {
    pub fn to_spec(&self) -> FilterSpec {
        let mut spec = FilterSpec::new()
            .with_search(self.search.clone())
            .with(self.nsv.to_constraint("totalNSV"))
            .with(self.orders.to_constraint("totalOrders"));
        if !self.city.trim().is_empty() {
            spec = spec.with(FieldConstraint::equals("city", self.city.trim().to_string()));
        }
        spec
    }
}

pub fn default_sort() -> SortSpec {
    SortSpec::desc("totalNSV")
}

pub fn summary_spec() -> AggregateSpec {
    AggregateSpec::new()
        .count("stores")
        .sum("totalNSV", "totalNSV")
        .sum("totalGSV", "totalGSV")
        .sum("totalOrders", "totalOrders")
        .mean("meanNSV", "totalNSV")
        .max("bestNSV", "totalNSV")
        .ratio("avgOrderValue", "totalNSV", "totalOrders")
}

pub fn csv_columns() -> ColumnSpec {
    ColumnSpec::new()
        .text("Store ID", "_id")
        .auto("Store Name", "storeName")
        .auto("City", "city")
        .money("Total NSV", "totalNSV")
        .money("Total GSV", "totalGSV")
        .integer("Total Orders", "totalOrders")
        .integer("Total Quantity", "totalQuantity")
        .money("Avg Order Value", "avgOrderValue")
}
