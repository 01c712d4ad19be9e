//! Summary figures shown above a list (totals, averages, ratios).
//!
//! Always computed over the filtered rows, never the current page only.

use super::field::TableRecord;

#[derive(Debug, Clone, PartialEq)]
pub enum Measure {
    /// Sum of the numeric values of a field; non-numeric cells count as 0.
    Sum(String),
    /// Number of rows.
    Count,
    /// Mean over rows with a numeric value.
    Mean(String),
    Min(String),
    Max(String),
}

/// `numerator / denominator` over two aggregates declared earlier in the same `AggregateSpec`.
#[derive(Debug, Clone, PartialEq)]
pub struct Ratio {
    pub name: String,
    pub numerator: String,
    pub denominator: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateSpec {
    measures: Vec<(String, Measure)>,
    ratios: Vec<Ratio>,
}

impl AggregateSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sum(mut self, name: &str, field: &str) -> Self {
        self.measures.push((name.to_string(), Measure::Sum(field.to_string())));
        self
    }

    pub fn count(mut self, name: &str) -> Self {
        self.measures.push((name.to_string(), Measure::Count));
        self
    }

    pub fn mean(mut self, name: &str, field: &str) -> Self {
        self.measures.push((name.to_string(), Measure::Mean(field.to_string())));
        self
    }

    pub fn min(mut self, name: &str, field: &str) -> Self {
        self.measures.push((name.to_string(), Measure::Min(field.to_string())));
        self
    }

    pub fn max(mut self, name: &str, field: &str) -> Self {
        self.measures.push((name.to_string(), Measure::Max(field.to_string())));
        self
    }

    pub fn ratio(mut self, name: &str, numerator: &str, denominator: &str) -> Self {
        self.ratios.push(Ratio {
            name: name.to_string(),
            numerator: numerator.to_string(),
            denominator: denominator.to_string(),
        });
        self
    }
}

/// Named results in declaration order (measures first, then ratios).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryStats {
    values: Vec<(String, f64)>,
}

impl SummaryStats {
    /// Value of an aggregate; 0 when the name is unknown.
    pub fn get(&self, name: &str) -> f64 {
        self.try_get(name).unwrap_or(0.0)
    }

    pub fn try_get(&self, name: &str) -> Option<f64> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| *value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(name, value)| (name.as_str(), *value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn insert(&mut self, name: &str, value: f64) {
        match self.values.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = value,
            None => self.values.push((name.to_string(), value)),
        }
    }
}

/// Division that never yields NaN or infinity: a zero (or non-finite) result is 0.
pub fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        return 0.0;
    }
    let value = numerator / denominator;
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

fn numbers<'a, R: TableRecord + 'a>(records: &'a [R], field: &'a str) -> impl Iterator<Item = f64> + 'a {
    records.iter().filter_map(move |r| r.field(field).as_number())
}

fn evaluate<R: TableRecord>(records: &[R], measure: &Measure) -> f64 {
    match measure {
        Measure::Sum(field) => numbers(records, field).sum(),
        Measure::Count => records.len() as f64,
        Measure::Mean(field) => {
            let (total, count) = numbers(records, field).fold((0.0, 0usize), |(t, c), n| (t + n, c + 1));
            safe_ratio(total, count as f64)
        }
        Measure::Min(field) => numbers(records, field).reduce(f64::min).unwrap_or(0.0),
        Measure::Max(field) => numbers(records, field).reduce(f64::max).unwrap_or(0.0),
    }
}

/// Reduce the filtered rows into the figures described by `spec`.
pub fn summarize<R: TableRecord>(records: &[R], spec: &AggregateSpec) -> SummaryStats {
    let mut stats = SummaryStats::default();
    for (name, measure) in &spec.measures {
        stats.insert(name, evaluate(records, measure));
    }
    for ratio in &spec.ratios {
        let value = safe_ratio(stats.get(&ratio.numerator), stats.get(&ratio.denominator));
        stats.insert(&ratio.name, value);
    }
    stats
}
