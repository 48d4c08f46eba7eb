use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// ---------------------------------------------------------------------------
// Conventional column names of the passenger dataset
// ---------------------------------------------------------------------------

pub mod columns {
    pub const PASSENGER_ID: &str = "PassengerId";
    pub const SURVIVED: &str = "Survived";
    pub const PCLASS: &str = "Pclass";
    pub const SEX: &str = "Sex";
    pub const AGE: &str = "Age";
    pub const FARE: &str = "Fare";
}

// ---------------------------------------------------------------------------
// Value – a single cell
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value. Absent data is an explicit `Missing`,
/// never a sentinel number or empty string.
///
/// Integers and floats compare and hash by numeric value, so `Integer(28)`
/// and `Float(28.0)` are the same key.
#[derive(Debug, Clone)]
pub enum Value {
    Integer(i64),
    Float(f64),
    String(String),
    Missing,
}

// -- Manual Eq/Ord so Value can key BTreeMap / BTreeSet --

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    /// Missing < numbers < strings.
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use Value::*;
        fn rank(v: &Value) -> u8 {
            match v {
                Missing => 0,
                Integer(_) | Float(_) => 1,
                String(_) => 2,
            }
        }
        match (self, other) {
            (Integer(a), Integer(b)) => a.cmp(b),
            (String(a), String(b)) => a.cmp(b),
            _ => match (self.numeric_key(), other.numeric_key()) {
                (Some(a), Some(b)) => a.total_cmp(&b),
                _ => rank(self).cmp(&rank(other)),
            },
        }
    }
}

impl std::hash::Hash for Value {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        match self {
            Value::Missing => 0u8.hash(state),
            Value::Integer(_) | Value::Float(_) => {
                1u8.hash(state);
                self.numeric_key().map(f64::to_bits).hash(state);
            }
            Value::String(s) => {
                2u8.hash(state);
                s.hash(state);
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::String(s) => write!(f, "{s}"),
            Value::Missing => write!(f, "–"),
        }
    }
}

impl serde::Serialize for Value {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::Integer(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::String(s) => serializer.serialize_str(s),
            Value::Missing => serializer.serialize_none(),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Missing)
    }
}

impl Value {
    /// Numeric view of the cell; integers widen to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Integer view of the cell. Floats with no fractional part are accepted
    /// since JSON and Parquet writers often widen integer columns.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            Value::Float(v) if v.fract() == 0.0 => Some(*v as i64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    /// Ordering key of a numeric cell; -0.0 folds onto 0.0.
    fn numeric_key(&self) -> Option<f64> {
        let v = self.as_f64()?;
        Some(if v == 0.0 { 0.0 } else { v })
    }
}

// ---------------------------------------------------------------------------
// Row – one passenger record
// ---------------------------------------------------------------------------

/// One passenger record: column name → value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    pub cells: BTreeMap<String, Value>,
}

static MISSING: Value = Value::Missing;

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy for fixtures.
    pub fn with(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.cells.insert(column.to_string(), value.into());
        self
    }

    /// Cell for `column`; columns the row lacks read as `Missing`.
    pub fn get(&self, column: &str) -> &Value {
        self.cells.get(column).unwrap_or(&MISSING)
    }

    pub fn passenger_id(&self) -> Option<i64> {
        self.get(columns::PASSENGER_ID).as_i64()
    }

    pub fn survived(&self) -> Option<i64> {
        self.get(columns::SURVIVED).as_i64()
    }

    pub fn pclass(&self) -> Option<i64> {
        self.get(columns::PCLASS).as_i64()
    }

    pub fn sex(&self) -> Option<&str> {
        self.get(columns::SEX).as_str()
    }

    pub fn age(&self) -> Option<f64> {
        self.get(columns::AGE).as_f64()
    }

    pub fn fare(&self) -> Option<f64> {
        self.get(columns::FARE).as_f64()
    }
}

// ---------------------------------------------------------------------------
// Table – the complete loaded dataset
// ---------------------------------------------------------------------------

/// An ordered set of rows with pre-computed column indices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    /// All rows, in source order.
    pub rows: Vec<Row>,
    /// Column names in source order.
    pub column_names: Vec<String>,
    /// For each column the sorted set of distinct present values.
    pub unique_values: BTreeMap<String, BTreeSet<Value>>,
}

impl Table {
    /// Build column indices from the given rows. Columns named in
    /// `column_names` keep their order; any extra column found in a row is
    /// appended in sorted order.
    pub fn from_rows(column_names: Vec<String>, rows: Vec<Row>) -> Self {
        let mut column_names = column_names;
        let mut extra: BTreeSet<String> = BTreeSet::new();
        let mut unique_values: BTreeMap<String, BTreeSet<Value>> = column_names
            .iter()
            .map(|c| (c.clone(), BTreeSet::new()))
            .collect();

        for row in &rows {
            for (col, val) in &row.cells {
                if !unique_values.contains_key(col) {
                    extra.insert(col.clone());
                }
                let set = unique_values.entry(col.clone()).or_default();
                if !val.is_missing() {
                    set.insert(val.clone());
                }
            }
        }
        column_names.extend(extra);

        Table {
            rows,
            column_names,
            unique_values,
        }
    }

    /// An empty table with the same columns.
    pub fn empty_like(&self) -> Self {
        Table::from_rows(self.column_names.clone(), Vec::new())
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.column_names.iter().any(|c| c == column)
    }

    /// Iterate one column's cells in row order.
    pub fn column_values<'a>(&'a self, column: &'a str) -> impl Iterator<Item = &'a Value> + 'a {
        self.rows.iter().map(move |r| r.get(column))
    }

    /// Distinct present values of a column, sorted.
    pub fn unique_values(&self, column: &str) -> Option<&BTreeSet<Value>> {
        self.unique_values.get(column)
    }

    /// Min and max over the present numeric cells of a column.
    pub fn numeric_range(&self, column: &str) -> Option<(f64, f64)> {
        self.column_values(column)
            .filter_map(Value::as_f64)
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// New table holding the rows at `indices`; `self` is left untouched.
    pub fn select(&self, indices: &[usize]) -> Self {
        let rows = indices
            .iter()
            .filter_map(|&i| self.rows.get(i).cloned())
            .collect();
        Table::from_rows(self.column_names.clone(), rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::from_rows(
            vec!["Sex".into(), "Fare".into()],
            vec![
                Row::new().with("Sex", "male").with("Fare", 7.25),
                Row::new().with("Sex", "female").with("Fare", Value::Missing),
                Row::new().with("Sex", "female").with("Fare", 71.5),
            ],
        )
    }

    #[test]
    fn test_value_order_puts_missing_first() {
        let mut vals = vec![
            Value::from("b"),
            Value::Float(2.5),
            Value::Missing,
            Value::Integer(3),
            Value::from("a"),
        ];
        vals.sort();
        assert_eq!(
            vals,
            vec![
                Value::Missing,
                Value::Float(2.5),
                Value::Integer(3),
                Value::from("a"),
                Value::from("b"),
            ]
        );
    }

    #[test]
    fn test_integer_and_float_are_one_key() {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        fn hash_of(v: &Value) -> u64 {
            let mut h = DefaultHasher::new();
            v.hash(&mut h);
            h.finish()
        }

        assert_eq!(Value::Integer(28), Value::Float(28.0));
        assert_eq!(hash_of(&Value::Integer(28)), hash_of(&Value::Float(28.0)));
        assert!(Value::Float(0.5) < Value::Integer(28));
        assert_eq!(Value::Float(0.0), Value::Float(-0.0));
        assert_eq!(hash_of(&Value::Float(0.0)), hash_of(&Value::Float(-0.0)));
        assert_eq!(Value::Float(f64::NAN), Value::Float(f64::NAN));

        let set: BTreeSet<Value> = [Value::Integer(13), Value::Float(13.0), Value::Float(7.25)]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_as_i64_accepts_whole_floats_only() {
        assert_eq!(Value::Float(1.0).as_i64(), Some(1));
        assert_eq!(Value::Float(1.5).as_i64(), None);
        assert_eq!(Value::from("1").as_i64(), None);
    }

    #[test]
    fn test_unique_values_skip_missing() {
        let t = sample();
        let fares = t.unique_values("Fare").unwrap();
        assert_eq!(fares.len(), 2);
        assert!(!fares.contains(&Value::Missing));
        let sexes: Vec<_> = t.unique_values("Sex").unwrap().iter().cloned().collect();
        assert_eq!(sexes, vec![Value::from("female"), Value::from("male")]);
    }

    #[test]
    fn test_numeric_range() {
        assert_eq!(sample().numeric_range("Fare"), Some((7.25, 71.5)));
        assert_eq!(sample().numeric_range("Age"), None);
    }

    #[test]
    fn test_select_leaves_source_intact() {
        let t = sample();
        let sub = t.select(&[2, 0]);
        assert_eq!(sub.len(), 2);
        assert_eq!(sub.rows[0].fare(), Some(71.5));
        assert_eq!(t.len(), 3);
        assert_eq!(sub.column_names, t.column_names);
    }

    #[test]
    fn test_absent_column_reads_missing() {
        let row = Row::new().with("Sex", "male");
        assert!(row.get("Age").is_missing());
        assert_eq!(row.age(), None);
    }
}
