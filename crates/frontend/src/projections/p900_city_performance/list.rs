//! City performance table: one row per city with sales totals.

use std::borrow::Cow;

use contracts::projections::p900_city_performance::dto::CityPerformanceDto;

use crate::shared::export::ColumnSpec;
use crate::shared::list::aggregate::{safe_ratio, AggregateSpec};
use crate::shared::list::field::{FieldValue, TableRecord};
use crate::shared::list::filter::{FilterSpec, RangeInput};
use crate::shared::list::sort::SortSpec;

pub const EXPORT_NAME: &str = "all-cities-performance";

impl TableRecord for CityPerformanceDto {
    const SEARCH_FIELDS: &'static [&'static str] = &["_id"];

    fn record_id(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.city)
    }

    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "_id" | "city" => FieldValue::text(&self.city),
            "totalNSV" => FieldValue::number(self.total_nsv),
            "totalGSV" => FieldValue::number(self.total_gsv),
            "totalOrders" => FieldValue::number(self.total_orders),
            "totalQuantity" => FieldValue::number(self.total_quantity),
            "storeCount" => FieldValue::number(self.store_count as f64),
            "avgOrderValue" => FieldValue::number(safe_ratio(self.total_nsv, self.total_orders)),
            _ => FieldValue::Null,
        }
    }
}

/// Filter panel inputs, kept as typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CityFilterForm {
    pub search: String,
    pub nsv: RangeInput,
    pub orders: RangeInput,
    pub quantity: RangeInput,
}

impl CityFilterForm {
    pub fn to_spec(&self) -> FilterSpec {
        FilterSpec::new()
            .with_search(self.search.clone())
            .with(self.nsv.to_constraint("totalNSV"))
            .with(self.orders.to_constraint("totalOrders"))
            .with(self.quantity.to_constraint("totalQuantity"))
    }
}

pub fn default_sort() -> SortSpec {
    SortSpec::desc("totalNSV")
}

pub fn summary_spec() -> AggregateSpec {
    AggregateSpec::new()
        .count("cities")
        .sum("totalNSV", "totalNSV")
        .sum("totalGSV", "totalGSV")
        .sum("totalOrders", "totalOrders")
        .sum("totalQuantity", "totalQuantity")
        .sum("storeCount", "storeCount")
        .ratio("avgOrderValue", "totalNSV", "totalOrders")
}

pub fn csv_columns() -> ColumnSpec {
    ColumnSpec::new()
        .auto("City", "_id")
        .money("Total NSV", "totalNSV")
        .money("Total GSV", "totalGSV")
        .integer("Total Orders", "totalOrders")
        .integer("Total Quantity", "totalQuantity")
        .integer("Stores", "storeCount")
        .money("Avg Order Value", "avgOrderValue")
}
