//! Composite row filtering: free-text search AND a conjunction of field constraints.

use super::field::{fold, parse_number, FieldValue, TableRecord};
use serde::{Deserialize, Serialize};

/// One per-field condition.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldConstraint {
    /// Inclusive numeric range. Unset bounds never exclude anything.
    Range {
        field: String,
        min: Option<f64>,
        max: Option<f64>,
    },
    /// Exact match; text compares case-insensitively.
    Equals {
        field: String,
        value: FieldValue<'static>,
    },
    /// Case-insensitive substring.
    Contains { field: String, text: String },
}

impl FieldConstraint {
    /// Range built from what the user typed into the min/max boxes.
    /// Malformed bounds are treated as absent.
    pub fn range_input(field: impl Into<String>, min: &str, max: &str) -> Self {
        FieldConstraint::Range {
            field: field.into(),
            min: parse_number(min),
            max: parse_number(max),
        }
    }

    pub fn equals(field: impl Into<String>, value: impl Into<FieldValue<'static>>) -> Self {
        FieldConstraint::Equals {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn contains(field: impl Into<String>, text: impl Into<String>) -> Self {
        FieldConstraint::Contains {
            field: field.into(),
            text: text.into(),
        }
    }

    pub fn field(&self) -> &str {
        match self {
            FieldConstraint::Range { field, .. }
            | FieldConstraint::Equals { field, .. }
            | FieldConstraint::Contains { field, .. } => field,
        }
    }

    /// A constraint that can't exclude anything (no bounds, empty needle).
    pub fn is_inert(&self) -> bool {
        match self {
            FieldConstraint::Range { min, max, .. } => min.is_none() && max.is_none(),
            FieldConstraint::Equals { .. } => false,
            FieldConstraint::Contains { text, .. } => text.trim().is_empty(),
        }
    }

    pub fn matches<R: TableRecord + ?Sized>(&self, record: &R) -> bool {
        match self {
            FieldConstraint::Range { field, min, max } => {
                if min.is_none() && max.is_none() {
                    return true;
                }
                let Some(value) = record.field(field).as_number() else {
                    return false;
                };
                min.map_or(true, |min| value >= min) && max.map_or(true, |max| value <= max)
            }
            FieldConstraint::Equals { field, value } => values_equal(&record.field(field), value),
            FieldConstraint::Contains { field, text } => {
                let needle = fold(text);
                needle.is_empty() || record.field(field).contains_folded(&needle)
            }
        }
    }
}

fn values_equal(actual: &FieldValue<'_>, expected: &FieldValue<'_>) -> bool {
    match (actual, expected) {
        (FieldValue::Text(a), FieldValue::Text(b)) => fold(a) == fold(b),
        (FieldValue::Number(a), FieldValue::Number(b)) => a == b,
        (FieldValue::Bool(a), FieldValue::Bool(b)) => a == b,
        (FieldValue::Null, FieldValue::Null) => true,
        _ => false,
    }
}

/// Search term plus constraints, as held by a list page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSpec {
    pub search: Option<String>,
    pub constraints: Vec<FieldConstraint>,
    /// Fields the search box scans. Empty means the row type's
    /// [`TableRecord::SEARCH_FIELDS`] (every text field for JSON rows).
    pub search_fields: Vec<String>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_search_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with(mut self, constraint: FieldConstraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Folded search term, `None` when blank.
    pub fn search_term(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(fold)
            .filter(|term| !term.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.search_term().is_none() && self.constraints.iter().all(FieldConstraint::is_inert)
    }

    pub fn matches<R: TableRecord + ?Sized>(&self, record: &R) -> bool {
        let search_ok = match self.search_term() {
            Some(term) => self.search_matches(record, &term),
            None => true,
        };
        search_ok && self.constraints.iter().all(|c| c.matches(record))
    }

    /// `term` is already folded.
    fn search_matches<R: TableRecord + ?Sized>(&self, record: &R, term: &str) -> bool {
        if self.search_fields.is_empty() {
            return record.matches_search(term);
        }
        self.search_fields.iter().any(|name| {
            matches!(record.field(name), FieldValue::Text(ref s) if s.to_lowercase().contains(term))
        })
    }

    /// Query parameters for resources filtered on the server.
    ///
    /// Ranges become `<field>_min` / `<field>_max`; inert constraints are skipped.
    pub fn to_query_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            params.push(("search".to_string(), search.to_string()));
        }
        for constraint in &self.constraints {
            match constraint {
                FieldConstraint::Range { field, min, max } => {
                    if let Some(min) = min {
                        params.push((format!("{}_min", field), min.to_string()));
                    }
                    if let Some(max) = max {
                        params.push((format!("{}_max", field), max.to_string()));
                    }
                }
                FieldConstraint::Equals { field, value } => {
                    if let Some(text) = value.display_text() {
                        params.push((field.clone(), text.into_owned()));
                    }
                }
                FieldConstraint::Contains { field, text } => {
                    if !text.trim().is_empty() {
                        params.push((field.clone(), text.trim().to_string()));
                    }
                }
            }
        }
        params
    }
}

/// Raw text of a min/max filter form, kept as typed so the inputs can be re-rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeInput {
    pub min: String,
    pub max: String,
}

impl RangeInput {
    pub fn to_constraint(&self, field: &str) -> FieldConstraint {
        FieldConstraint::range_input(field, &self.min, &self.max)
    }
}

/// Rows matching `spec`, in input order. The input is left untouched.
pub fn apply<R: TableRecord + Clone>(records: &[R], spec: &FilterSpec) -> Vec<R> {
    if spec.is_empty() {
        return records.to_vec();
    }
    // fold the term once instead of per row
    let term = spec.search_term();
    records
        .iter()
        .filter(|record| term.as_deref().map_or(true, |t| spec.search_matches(*record, t)))
        .filter(|record| spec.constraints.iter().all(|c| c.matches(*record)))
        .cloned()
        .collect()
}
