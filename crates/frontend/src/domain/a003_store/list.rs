use std::borrow::Cow;

use contracts::domain::a003_store::dto::StoreDto;

use crate::shared::export::ColumnSpec;
use crate::shared::list::field::{FieldValue, TableRecord};
use crate::shared::list::filter::{FieldConstraint, FilterSpec};

pub const EXPORT_NAME: &str = "stores";

impl TableRecord for StoreDto {
    const SEARCH_FIELDS: &'static [&'static str] = &["storeId", "storeName", "city", "address"];

    fn record_id(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.id)
    }

    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "_id" => FieldValue::text(&self.id),
            "storeId" => FieldValue::text(&self.store_id),
            "storeName" => FieldValue::text(&self.store_name),
            "city" => FieldValue::text(&self.city),
            "address" => FieldValue::opt_text(self.address.as_deref()),
            "contactNumber" => FieldValue::opt_text(self.contact_number.as_deref()),
            "isActive" => FieldValue::Bool(self.is_active),
            _ => FieldValue::Null,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreFilterForm {
    pub search: String,
    pub city: String,
    /// `None` shows active and inactive stores
    pub active: Option<bool>,
}

impl StoreFilterForm {
    pub fn to_spec(&self) -> FilterSpec {
        let mut spec = FilterSpec::new()
            .with_search(self.search.clone())
            .with(FieldConstraint::contains("city", self.city.clone()));
        if let Some(active) = self.active {
            spec = spec.with(FieldConstraint::equals("isActive", active));
        }
        spec
    }
}

pub fn csv_columns() -> ColumnSpec {
    ColumnSpec::new()
        .text("Store ID", "storeId")
        .auto("Store Name", "storeName")
        .auto("City", "city")
        .auto("Address", "address")
        .text("Contact", "contactNumber")
        .auto("Active", "isActive")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::export::{export_csv_on, CsvOptions};
    use crate::shared::list::filter;
    use chrono::NaiveDate;

    fn store(id: &str, city: &str, active: bool) -> StoreDto {
        StoreDto {
            id: id.into(),
            store_id: format!("ST-{}", id),
            store_name: format!("Store {}", id),
            city: city.into(),
            address: None,
            contact_number: Some("0201234567".into()),
            is_active: active,
        }
    }

    #[test]
    fn test_active_and_city_filters() {
        let rows = vec![store("1", "Pune", true), store("2", "Pune", false), store("3", "Mumbai", true)];
        let form = StoreFilterForm {
            city: "pun".into(),
            active: Some(true),
            ..Default::default()
        };
        let filtered = filter::apply(&rows, &form.to_spec());
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "1");
    }

    #[test]
    fn test_contact_keeps_leading_zero() {
        let rows = vec![store("1", "Pune", false)];
        let export = export_csv_on(
            &rows,
            &csv_columns(),
            EXPORT_NAME,
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            CsvOptions::default(),
        )
        .unwrap();
        assert_eq!(
            export.content.lines().nth(1),
            Some("\"ST-1\",\"Store 1\",\"Pune\",,\"0201234567\",false")
        );
    }
}
