//! Single-key sorting with a stable, direction-independent comparator.

use super::field::{fold, FieldValue, TableRecord};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    /// Column header glyph
    pub fn indicator(self) -> &'static str {
        match self {
            SortDirection::Asc => " ▲",
            SortDirection::Desc => " ▼",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }

    /// Header click: same field flips the direction, another field starts ascending.
    pub fn toggle(current: Option<&SortSpec>, field: &str) -> SortSpec {
        match current {
            Some(spec) if spec.field == field => SortSpec {
                field: spec.field.clone(),
                direction: spec.direction.flipped(),
            },
            _ => SortSpec::asc(field),
        }
    }

    /// Indicator for a column header: the direction for the active column, a neutral mark otherwise.
    pub fn indicator_for(current: Option<&SortSpec>, field: &str) -> &'static str {
        match current {
            Some(spec) if spec.field == field => spec.direction.indicator(),
            _ => " ⇅",
        }
    }
}

/// Precomputed comparison key of one row.
#[derive(Debug, Clone, PartialEq)]
enum SortKey {
    Number(f64),
    Text(String),
    Bool,
    Missing,
}

impl SortKey {
    fn of(value: FieldValue<'_>) -> Self {
        match value {
            FieldValue::Null => SortKey::Missing,
            FieldValue::Number(n) if n.is_nan() => SortKey::Missing,
            FieldValue::Number(n) => SortKey::Number(n),
            FieldValue::Text(s) => SortKey::Text(fold(&s)),
            FieldValue::Bool(_) => SortKey::Bool,
        }
    }

    /// Rank of values of different kinds, so mixed columns still get a total order.
    fn kind_rank(&self) -> u8 {
        match self {
            SortKey::Number(_) => 0,
            SortKey::Text(_) => 1,
            SortKey::Bool => 2,
            SortKey::Missing => 3,
        }
    }
}

/// Ascending order of two present values. Texts compare folded, numbers
/// numerically, bools are all equal.
fn compare_present(a: &SortKey, b: &SortKey) -> Ordering {
    match (a, b) {
        (SortKey::Number(x), SortKey::Number(y)) => x.total_cmp(y),
        (SortKey::Text(x), SortKey::Text(y)) => x.cmp(y),
        _ => a.kind_rank().cmp(&b.kind_rank()),
    }
}

/// Three-way comparison for one direction. Missing values go last either way.
fn compare_keys(a: &SortKey, b: &SortKey, direction: SortDirection) -> Ordering {
    match (a, b) {
        (SortKey::Missing, SortKey::Missing) => Ordering::Equal,
        (SortKey::Missing, _) => Ordering::Greater,
        (_, SortKey::Missing) => Ordering::Less,
        _ => direction.apply(compare_present(a, b)),
    }
}

/// Compare two field values the way [`sort`] does.
pub fn compare_values(a: FieldValue<'_>, b: FieldValue<'_>, direction: SortDirection) -> Ordering {
    compare_keys(&SortKey::of(a), &SortKey::of(b), direction)
}

/// Positions of `records` in sorted order.
///
/// Each row is tagged with its original index, which breaks ties, so equal
/// keys keep their input order.
pub fn sorted_indices<R: TableRecord>(records: &[R], spec: &SortSpec) -> Vec<usize> {
    let mut keyed: Vec<(SortKey, usize)> = records
        .iter()
        .enumerate()
        .map(|(index, record)| (SortKey::of(record.field(&spec.field)), index))
        .collect();

    keyed.sort_by(|(ka, ia), (kb, ib)| {
        compare_keys(ka, kb, spec.direction).then_with(|| ia.cmp(ib))
    });

    keyed.into_iter().map(|(_, index)| index).collect()
}

/// New vector sorted by `spec`; the input is not reordered.
pub fn sort<R: TableRecord + Clone>(records: &[R], spec: &SortSpec) -> Vec<R> {
    sorted_indices(records, spec)
        .into_iter()
        .map(|index| records[index].clone())
        .collect()
}
