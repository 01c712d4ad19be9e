//! Field access over heterogeneous list rows.
//!
//! Every list page works with its own row type. The engine never indexes into
//! rows directly: it asks the row for a named field through [`TableRecord`] and
//! gets back a [`FieldValue`].

use serde_json::{Map, Value};
use std::borrow::Cow;

/// A single cell value as seen by filter, sort, aggregate and export.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    Null,
    Bool(bool),
    Number(f64),
    Text(Cow<'a, str>),
}

impl<'a> FieldValue<'a> {
    pub fn text(value: &'a str) -> Self {
        FieldValue::Text(Cow::Borrowed(value))
    }

    pub fn opt_text(value: Option<&'a str>) -> Self {
        value.map_or(FieldValue::Null, FieldValue::text)
    }

    pub fn number(value: f64) -> Self {
        FieldValue::Number(value)
    }

    pub fn opt_number(value: Option<f64>) -> Self {
        value.map_or(FieldValue::Null, FieldValue::Number)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Numeric view of the value. Text is coerced when it holds a finite number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(s) => parse_number(s),
            FieldValue::Null | FieldValue::Bool(_) => None,
        }
    }

    /// Trimmed, lowercased text of a `Text` value. Source rows are never touched.
    pub fn folded(&self) -> Option<String> {
        match self {
            FieldValue::Text(s) => Some(fold(s)),
            _ => None,
        }
    }

    /// Text rendering used by substring matching. `Null` has none.
    pub fn display_text(&self) -> Option<Cow<'_, str>> {
        match self {
            FieldValue::Null => None,
            FieldValue::Bool(b) => Some(Cow::Owned(b.to_string())),
            FieldValue::Number(n) => Some(Cow::Owned(n.to_string())),
            FieldValue::Text(s) => Some(Cow::Borrowed(s.as_ref())),
        }
    }

    /// Case-insensitive substring test against an already folded needle.
    pub fn contains_folded(&self, needle: &str) -> bool {
        self.display_text()
            .map(|text| text.to_lowercase().contains(needle))
            .unwrap_or(false)
    }

    pub fn into_owned(self) -> FieldValue<'static> {
        match self {
            FieldValue::Null => FieldValue::Null,
            FieldValue::Bool(b) => FieldValue::Bool(b),
            FieldValue::Number(n) => FieldValue::Number(n),
            FieldValue::Text(s) => FieldValue::Text(Cow::Owned(s.into_owned())),
        }
    }
}

impl From<bool> for FieldValue<'static> {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<f64> for FieldValue<'static> {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<String> for FieldValue<'static> {
    fn from(value: String) -> Self {
        FieldValue::Text(Cow::Owned(value))
    }
}

impl<'a> From<&'a str> for FieldValue<'a> {
    fn from(value: &'a str) -> Self {
        FieldValue::text(value)
    }
}

/// Normalization applied to text at comparison time.
pub fn fold(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Lenient number parsing for user input and text cells.
///
/// Blank, unparsable and non-finite input yields `None`.
pub fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// A row the list engine can work with.
pub trait TableRecord {
    /// Fields consulted by the free-text search box.
    const SEARCH_FIELDS: &'static [&'static str] = &[];

    /// Identifier used by selection and bulk actions.
    fn record_id(&self) -> Cow<'_, str>;

    /// Named field lookup. Unknown names return [`FieldValue::Null`].
    fn field(&self, name: &str) -> FieldValue<'_>;

    /// `needle` is already trimmed and lowercased and never empty.
    fn matches_search(&self, needle: &str) -> bool {
        Self::SEARCH_FIELDS
            .iter()
            .any(|name| matches!(self.field(name), FieldValue::Text(ref s) if s.to_lowercase().contains(needle)))
    }
}

impl<T: TableRecord + ?Sized> TableRecord for &T {
    const SEARCH_FIELDS: &'static [&'static str] = T::SEARCH_FIELDS;

    fn record_id(&self) -> Cow<'_, str> {
        (**self).record_id()
    }

    fn field(&self, name: &str) -> FieldValue<'_> {
        (**self).field(name)
    }

    fn matches_search(&self, needle: &str) -> bool {
        (**self).matches_search(needle)
    }
}

/// Schema-less JSON rows, as returned by the "fetch everything" endpoints.
///
/// The id is taken from `_id`, falling back to `id`. Search scans every
/// string-valued field, `_id` included; pages that want fewer list them with
/// [`FilterSpec::with_search_fields`](super::filter::FilterSpec::with_search_fields).
impl TableRecord for Map<String, Value> {
    fn record_id(&self) -> Cow<'_, str> {
        match self.get("_id").or_else(|| self.get("id")) {
            Some(Value::String(s)) => Cow::Borrowed(s.as_str()),
            Some(Value::Number(n)) => Cow::Owned(n.to_string()),
            _ => Cow::Borrowed(""),
        }
    }

    fn field(&self, name: &str) -> FieldValue<'_> {
        match self.get(name) {
            None | Some(Value::Null) => FieldValue::Null,
            Some(Value::Bool(b)) => FieldValue::Bool(*b),
            Some(Value::Number(n)) => n.as_f64().map_or(FieldValue::Null, FieldValue::Number),
            Some(Value::String(s)) => FieldValue::text(s),
            // nested values are not addressable by name
            Some(Value::Array(_)) | Some(Value::Object(_)) => FieldValue::Null,
        }
    }

    fn matches_search(&self, needle: &str) -> bool {
        self.values().any(|value| match value {
            Value::String(s) => s.to_lowercase().contains(needle),
            _ => false,
        })
    }
}

/// Field accessor entry point. Never fails: missing fields read as `Null`.
pub fn get<'r, R: TableRecord + ?Sized>(record: &'r R, name: &str) -> FieldValue<'r> {
    record.field(name)
}
