use super::model::{columns, Table, Value};
use crate::error::{ExplorerError, Result};

/// Median of the given values: middle element for an odd count, mean of the
/// two middle elements for an even count. `None` when there are no values.
pub fn median(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let mut vals: Vec<f64> = values.into_iter().filter(|v| !v.is_nan()).collect();
    if vals.is_empty() {
        return None;
    }
    vals.sort_by(f64::total_cmp);
    let n = vals.len();
    Some(if n % 2 == 0 {
        (vals[n / 2 - 1] + vals[n / 2]) / 2.0
    } else {
        vals[n / 2]
    })
}

/// Replace every missing cell of `column` with the median of its present
/// values. The fill value is computed once over the whole column.
///
/// Fails with [`ExplorerError::InvalidColumn`] if the table lacks the column
/// and with [`ExplorerError::AllValuesMissing`] if the table has rows but no
/// present value to take a median of.
pub fn fill_missing_with_median(table: &Table, column: &str) -> Result<Table> {
    if !table.has_column(column) {
        return Err(ExplorerError::InvalidColumn(column.to_string()));
    }

    let n_missing = table.column_values(column).filter(|v| v.is_missing()).count();
    if n_missing == 0 {
        return Ok(table.clone());
    }

    let fill = median(table.column_values(column).filter_map(Value::as_f64)).ok_or_else(|| {
        ExplorerError::AllValuesMissing {
            column: column.to_string(),
        }
    })?;

    log::info!("Filling {n_missing} missing '{column}' values with median {fill}");

    let rows = table
        .rows
        .iter()
        .map(|row| {
            let mut row = row.clone();
            if row.get(column).is_missing() {
                row.cells.insert(column.to_string(), Value::Float(fill));
            }
            row
        })
        .collect();

    Ok(Table::from_rows(table.column_names.clone(), rows))
}

/// Normalise a freshly loaded table: fill missing ages with the age median.
///
/// A table without an `Age` column passes through unchanged.
pub fn preprocess(table: &Table) -> Result<Table> {
    if !table.has_column(columns::AGE) {
        log::warn!("No '{}' column, skipping age imputation", columns::AGE);
        return Ok(table.clone());
    }
    fill_missing_with_median(table, columns::AGE)
}
