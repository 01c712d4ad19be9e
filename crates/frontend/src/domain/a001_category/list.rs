use std::borrow::Cow;

use contracts::domain::a001_category::dto::CategoryDto;

use crate::shared::export::ColumnSpec;
use crate::shared::list::field::{FieldValue, TableRecord};
use crate::shared::list::filter::{FilterSpec, RangeInput};

pub const EXPORT_NAME: &str = "categories";

impl TableRecord for CategoryDto {
    const SEARCH_FIELDS: &'static [&'static str] = &["name", "description"];

    fn record_id(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.id)
    }

    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "_id" => FieldValue::text(&self.id),
            "name" => FieldValue::text(&self.name),
            "description" => FieldValue::opt_text(self.description.as_deref()),
            "itemCount" => FieldValue::number(self.item_count as f64),
            "createdAt" => FieldValue::opt_text(self.created_at.as_deref()),
            _ => FieldValue::Null,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryFilterForm {
    pub search: String,
    pub items: RangeInput,
}

impl CategoryFilterForm {
    pub fn to_spec(&self) -> FilterSpec {
        FilterSpec::new()
            .with_search(self.search.clone())
            .with(self.items.to_constraint("itemCount"))
    }
}

pub fn csv_columns() -> ColumnSpec {
    ColumnSpec::new()
        .auto("Name", "name")
        .auto("Description", "description")
        .integer("Items", "itemCount")
        .auto("Created", "createdAt")
}
