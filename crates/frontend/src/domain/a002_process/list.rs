use std::borrow::Cow;

use contracts::domain::a002_process::dto::ProcessDto;

use crate::shared::export::ColumnSpec;
use crate::shared::list::field::{FieldValue, TableRecord};
use crate::shared::list::filter::{FieldConstraint, FilterSpec};

pub const EXPORT_NAME: &str = "processes";

/// Values of the status dropdown; empty means any status.
pub const STATUSES: [&str; 3] = ["active", "draft", "archived"];

impl TableRecord for ProcessDto {
    const SEARCH_FIELDS: &'static [&'static str] = &["name", "category"];

    fn record_id(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.id)
    }

    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "_id" => FieldValue::text(&self.id),
            "name" => FieldValue::text(&self.name),
            "category" => FieldValue::opt_text(self.category.as_deref()),
            "steps" => FieldValue::number(self.steps as f64),
            "status" => FieldValue::text(&self.status),
            "createdAt" => FieldValue::opt_text(self.created_at.as_deref()),
            _ => FieldValue::Null,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessFilterForm {
    pub search: String,
    pub status: String,
}

impl ProcessFilterForm {
    pub fn to_spec(&self) -> FilterSpec {
        let spec = FilterSpec::new().with_search(self.search.clone());
        match STATUSES.iter().find(|s| s.eq_ignore_ascii_case(self.status.trim())) {
            Some(status) => spec.with(FieldConstraint::equals("status", *status)),
            None => spec,
        }
    }
}

pub fn csv_columns() -> ColumnSpec {
    ColumnSpec::new()
        .auto("Name", "name")
        .auto("Category", "category")
        .integer("Steps", "steps")
        .auto("Status", "status")
        .auto("Created", "createdAt")
}
