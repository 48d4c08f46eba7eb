use std::collections::BTreeMap;

use serde::Serialize;

use super::model::{columns, Table, Value};
use crate::error::{ExplorerError, Result};

// ---------------------------------------------------------------------------
// Summary of a (filtered) table
// ---------------------------------------------------------------------------

/// Descriptive aggregates of a table snapshot. Averages are `None` when no
/// value is present to average, never zero or NaN.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatisticsSummary {
    pub total_count: usize,
    pub average_fare: Option<f64>,
    pub average_age: Option<f64>,
}

/// Arithmetic mean of the present values; `None` when there are none.
pub fn mean<'a>(values: impl IntoIterator<Item = &'a Value>) -> Option<f64> {
    let (sum, n) = values
        .into_iter()
        .filter_map(Value::as_f64)
        .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

/// Row count plus mean fare and mean age.
pub fn summarize(table: &Table) -> StatisticsSummary {
    StatisticsSummary {
        total_count: table.len(),
        average_fare: mean(table.column_values(columns::FARE)),
        average_age: mean(table.column_values(columns::AGE)),
    }
}

// ---------------------------------------------------------------------------
// Survival breakdown by group
// ---------------------------------------------------------------------------

/// Survival counts for one distinct value of the grouping column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSurvival {
    pub group: Value,
    pub total: usize,
    pub survived: usize,
    pub survival_rate: f64,
}

/// Partition rows by `column` and count survivors per group, ordered by
/// group value ascending. Rows with a missing group value are left out.
pub fn group_survival(table: &Table, column: &str) -> Result<Vec<GroupSurvival>> {
    if !table.has_column(column) {
        return Err(ExplorerError::InvalidColumn(column.to_string()));
    }

    let mut groups: BTreeMap<&Value, (usize, usize)> = BTreeMap::new();
    for row in &table.rows {
        let key = row.get(column);
        if key.is_missing() {
            continue;
        }
        let entry = groups.entry(key).or_default();
        entry.0 += 1;
        if row.survived() == Some(1) {
            entry.1 += 1;
        }
    }

    Ok(groups
        .into_iter()
        .map(|(group, (total, survived))| GroupSurvival {
            group: group.clone(),
            total,
            survived,
            survival_rate: survived as f64 / total as f64,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Row;

    fn table(rows: Vec<Row>) -> Table {
        Table::from_rows(
            ["Survived", "Pclass", "Sex", "Age", "Fare"]
                .map(String::from)
                .to_vec(),
            rows,
        )
    }

    fn passenger(sex: &str, survived: i64, pclass: i64, age: f64, fare: f64) -> Row {
        Row::new()
            .with("Sex", sex)
            .with("Survived", survived)
            .with("Pclass", pclass)
            .with("Age", age)
            .with("Fare", fare)
    }

    #[test]
    fn test_summarize_empty_has_no_averages() {
        let s = summarize(&table(Vec::new()));
        assert_eq!(s.total_count, 0);
        assert_eq!(s.average_fare, None);
        assert_eq!(s.average_age, None);
    }

    #[test]
    fn test_summarize_means() {
        let s = summarize(&table(vec![
            passenger("male", 1, 1, 20.0, 10.0),
            passenger("female", 0, 2, 30.0, 20.0),
        ]));
        assert_eq!(s.total_count, 2);
        assert_eq!(s.average_fare, Some(15.0));
        assert_eq!(s.average_age, Some(25.0));
    }

    #[test]
    fn test_group_by_sex_sorted_alphabetically() {
        let t = table(vec![
            passenger("male", 1, 1, 22.0, 7.0),
            passenger("male", 0, 3, 25.0, 8.0),
            passenger("female", 1, 1, 31.0, 70.0),
            passenger("female", 0, 3, 26.0, 9.0),
        ]);
        let groups = group_survival(&t, "Sex").unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].group, Value::from("female"));
        assert_eq!(groups[1].group, Value::from("male"));
        for g in &groups {
            assert_eq!(g.total, 2);
            assert_eq!(g.survived, 1);
            assert_eq!(g.survival_rate, 0.5);
        }
    }

    #[test]
    fn test_group_by_class_numeric_order() {
        let t = table(vec![
            passenger("male", 0, 3, 22.0, 7.0),
            passenger("male", 1, 1, 25.0, 8.0),
            passenger("female", 1, 3, 31.0, 70.0),
        ]);
        let groups = group_survival(&t, "Pclass").unwrap();
        let keys: Vec<_> = groups.iter().map(|g| g.group.clone()).collect();
        assert_eq!(keys, vec![Value::Integer(1), Value::Integer(3)]);
        assert_eq!(groups[1].survival_rate, 0.5);
    }

    #[test]
    fn test_group_by_mixed_number_types() {
        let rows = vec![
            Row::new().with("Age", 28i64).with("Survived", 1i64),
            Row::new().with("Age", 0.5).with("Survived", 1i64),
            Row::new().with("Age", 28.0).with("Survived", 0i64),
        ];
        let groups = group_survival(&table(rows), "Age").unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].group, Value::Float(0.5));
        assert_eq!(groups[1].group, Value::Integer(28));
        assert_eq!((groups[1].total, groups[1].survived), (2, 1));
    }

    #[test]
    fn test_group_by_unknown_column() {
        let err = group_survival(&table(Vec::new()), "InvalidColumn").unwrap_err();
        assert!(matches!(err, ExplorerError::InvalidColumn(ref c) if c == "InvalidColumn"));
        assert_eq!(err.to_string(), "column 'InvalidColumn' not found in data");
    }

    #[test]
    fn test_summary_serializes_null_averages() {
        let json = serde_json::to_value(summarize(&table(Vec::new()))).unwrap();
        assert_eq!(json["total_count"], 0);
        assert!(json["average_fare"].is_null());
    }
}
