use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::model::{Row, Table};

// ---------------------------------------------------------------------------
// Filter criteria: independently optional constraints
// ---------------------------------------------------------------------------

/// Inclusive fare interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FareRange {
    pub min: f64,
    pub max: f64,
}

impl FareRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, fare: f64) -> bool {
        self.min <= fare && fare <= self.max
    }
}

/// User-selected constraints. Unset fields impose no constraint; set fields
/// combine with logical AND.
///
/// `survived` is an `Option` so that `Some(0)` (non-survivors only) stays
/// distinct from `None` (no filter). An empty `pclass` set means no filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub sex: Option<String>,
    pub survived: Option<i64>,
    pub pclass: BTreeSet<i64>,
    pub fare_range: Option<FareRange>,
}

impl FilterCriteria {
    pub fn with_sex(mut self, sex: impl Into<String>) -> Self {
        self.sex = Some(sex.into());
        self
    }

    pub fn with_survived(mut self, survived: i64) -> Self {
        self.survived = Some(survived);
        self
    }

    pub fn with_pclass(mut self, classes: impl IntoIterator<Item = i64>) -> Self {
        self.pclass = classes.into_iter().collect();
        self
    }

    pub fn with_fare_range(mut self, min: f64, max: f64) -> Self {
        self.fare_range = Some(FareRange::new(min, max));
        self
    }

    /// Whether no field is set.
    pub fn is_unconstrained(&self) -> bool {
        self.predicates().is_empty()
    }

    /// One predicate per set field.
    pub fn predicates(&self) -> Vec<Predicate> {
        let mut preds = Vec::new();
        if let Some(sex) = &self.sex {
            preds.push(Predicate::Sex(sex.clone()));
        }
        if let Some(survived) = self.survived {
            preds.push(Predicate::Survived(survived));
        }
        if !self.pclass.is_empty() {
            preds.push(Predicate::Pclass(self.pclass.clone()));
        }
        if let Some(range) = self.fare_range {
            preds.push(Predicate::FareRange(range));
        }
        preds
    }

    /// Whether `row` satisfies every set field.
    pub fn matches(&self, row: &Row) -> bool {
        self.predicates().iter().all(|p| p.matches(row))
    }
}

// ---------------------------------------------------------------------------
// Row-level predicates
// ---------------------------------------------------------------------------

/// A single row-level constraint. A row whose cell for the constrained
/// column is missing never passes.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Sex(String),
    Survived(i64),
    Pclass(BTreeSet<i64>),
    FareRange(FareRange),
}

impl Predicate {
    pub fn matches(&self, row: &Row) -> bool {
        match self {
            Predicate::Sex(sex) => row.sex() == Some(sex.as_str()),
            Predicate::Survived(s) => row.survived() == Some(*s),
            Predicate::Pclass(classes) => row.pclass().is_some_and(|c| classes.contains(&c)),
            Predicate::FareRange(range) => row.fare().is_some_and(|f| range.contains(f)),
        }
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Return indices of rows that pass every predicate, in row order.
pub fn matching_indices(table: &Table, predicates: &[Predicate]) -> Vec<usize> {
    table
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| predicates.iter().all(|p| p.matches(row)))
        .map(|(i, _)| i)
        .collect()
}

/// Return indices of rows that pass all set criteria.
pub fn filtered_indices(table: &Table, criteria: &FilterCriteria) -> Vec<usize> {
    matching_indices(table, &criteria.predicates())
}

/// Apply an explicit list of predicates; their order does not affect the
/// result.
pub fn filter_with(table: &Table, predicates: &[Predicate]) -> Table {
    table.select(&matching_indices(table, predicates))
}

/// Narrow `table` to the rows matching `criteria`. The input is untouched and
/// an empty result is a normal outcome.
pub fn filter(table: &Table, criteria: &FilterCriteria) -> Table {
    filter_with(table, &criteria.predicates())
}
