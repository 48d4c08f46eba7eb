use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{
    Array, AsArray, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array,
    StringArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{Row, Table, Value};
use crate::error::{ExplorerError, Result};

/// Cell texts read as missing in CSV input.
const MISSING_MARKERS: &[&str] = &["", "NA", "N/A", "NaN", "nan", "null", "NULL"];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a passenger table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row followed by one passenger per line
/// * `.json`    – `[{ "PassengerId": 1, "Sex": "male", ... }, ...]`
/// * `.parquet` – one column per field (strings, ints, floats, bools)
///
/// Fails with [`ExplorerError::NotFound`] when `path` does not exist.
pub fn load_file(path: &Path) -> Result<Table> {
    if !path.exists() {
        return Err(ExplorerError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(ExplorerError::UnsupportedFormat(format!(".{other}"))),
    };

    log::info!(
        "Loaded {} rows with columns {:?} from {}",
        table.len(),
        table.column_names,
        path.display()
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Table> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers: Vec<String> = reader.headers()?.iter().map(String::from).collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let mut row = Row::new();
        for (col_name, field) in headers.iter().zip(record.iter()) {
            row.cells.insert(col_name.clone(), guess_value(field));
        }
        rows.push(row);
    }

    widen_mixed_numeric_columns(&mut rows);
    Ok(Table::from_rows(headers, rows))
}

/// A column holding any float cell stores all its numeric cells as floats,
/// so per-cell type guessing never splits one column into two number types.
fn widen_mixed_numeric_columns(rows: &mut [Row]) {
    let float_columns: BTreeSet<String> = rows
        .iter()
        .flat_map(|row| row.cells.iter())
        .filter(|(_, v)| matches!(v, Value::Float(_)))
        .map(|(col, _)| col.clone())
        .collect();

    for row in rows.iter_mut() {
        for (col, cell) in row.cells.iter_mut() {
            if let Value::Integer(i) = *cell {
                if float_columns.contains(col) {
                    *cell = Value::Float(i as f64);
                }
            }
        }
    }
}

/// Infer a cell type from its text: integer, then float, then string.
pub fn guess_value(s: &str) -> Value {
    let s = s.trim();
    if MISSING_MARKERS.contains(&s) {
        return Value::Missing;
    }
    if let Ok(i) = s.parse::<i64>() {
        return Value::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return Value::Float(f);
    }
    Value::String(s.to_string())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "PassengerId": 1, "Survived": 0, "Pclass": 3, "Sex": "male", "Age": 22.0, "Fare": 7.25 },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Table> {
    let text = std::fs::read_to_string(path).map_err(|e| ExplorerError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let root: JsonValue = serde_json::from_str(&text)?;

    let records = root
        .as_array()
        .ok_or_else(|| ExplorerError::Malformed("expected top-level JSON array".into()))?;

    let mut column_names: Vec<String> = Vec::new();
    let mut rows = Vec::with_capacity(records.len());

    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .ok_or_else(|| ExplorerError::Malformed(format!("row {i} is not a JSON object")))?;

        let mut row = Row::new();
        for (key, val) in obj {
            if !column_names.contains(key) {
                column_names.push(key.clone());
            }
            row.cells.insert(key.clone(), json_to_value(val));
        }
        rows.push(row);
    }

    widen_mixed_numeric_columns(&mut rows);
    Ok(Table::from_rows(column_names, rows))
}

fn json_to_value(val: &JsonValue) -> Value {
    match val {
        JsonValue::Null => Value::Missing,
        JsonValue::String(s) => Value::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Integer(i)
            } else if let Some(f) = n.as_f64() {
                Value::Float(f)
            } else {
                Value::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => Value::Integer(i64::from(*b)),
        other => Value::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one flat column per field.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Table> {
    let file = std::fs::File::open(path).map_err(|e| ExplorerError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let column_names: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build()?;

    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result?;
        let schema = batch.schema();

        for row_idx in 0..batch.num_rows() {
            let mut row = Row::new();
            for (col_idx, field) in schema.fields().iter().enumerate() {
                let value = extract_value(batch.column(col_idx), row_idx);
                row.cells.insert(field.name().clone(), value);
            }
            rows.push(row);
        }
    }

    Ok(Table::from_rows(column_names, rows))
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_value(col: &Arc<dyn Array>, row: usize) -> Value {
    if col.is_null(row) {
        return Value::Missing;
    }
    let any = col.as_any();
    match col.data_type() {
        DataType::Utf8 => any
            .downcast_ref::<StringArray>()
            .map(|s| Value::String(s.value(row).to_string()))
            .unwrap_or(Value::Missing),
        DataType::LargeUtf8 => Value::String(col.as_string::<i64>().value(row).to_string()),
        DataType::Int32 => any
            .downcast_ref::<Int32Array>()
            .map(|a| Value::Integer(i64::from(a.value(row))))
            .unwrap_or(Value::Missing),
        DataType::Int64 => any
            .downcast_ref::<Int64Array>()
            .map(|a| Value::Integer(a.value(row)))
            .unwrap_or(Value::Missing),
        DataType::Float32 => any
            .downcast_ref::<Float32Array>()
            .map(|a| float_value(f64::from(a.value(row))))
            .unwrap_or(Value::Missing),
        DataType::Float64 => any
            .downcast_ref::<Float64Array>()
            .map(|a| float_value(a.value(row)))
            .unwrap_or(Value::Missing),
        DataType::Boolean => any
            .downcast_ref::<BooleanArray>()
            .map(|a| Value::Integer(i64::from(a.value(row))))
            .unwrap_or(Value::Missing),
        other => {
            log::debug!("Unsupported parquet column type {other:?}, treating as missing");
            Value::Missing
        }
    }
}

/// Pandas writes missing floats as NaN rather than null.
fn float_value(v: f64) -> Value {
    if v.is_nan() {
        Value::Missing
    } else {
        Value::Float(v)
    }
}
