use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// CellValue – a single cell of an untrusted input table
// ---------------------------------------------------------------------------

/// A dynamically-typed table cell. Delimited input carries no type
/// information, so each field is guessed on load the way a dataframe
/// library would infer dtypes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Integer(i64),
    Float(f64),
    Text(String),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Interpret the cell as an `f64` sample, if it is numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Whether the cell is numeric or missing (the cells a numeric column
    /// may contain).
    pub fn is_numeric_or_null(&self) -> bool {
        matches!(
            self,
            CellValue::Integer(_) | CellValue::Float(_) | CellValue::Null
        )
    }
}

// ---------------------------------------------------------------------------
// Column – one named column of a raw table
// ---------------------------------------------------------------------------

/// A named column with its cells in row order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub values: Vec<CellValue>,
}

impl Column {
    pub fn new(name: impl Into<String>) -> Self {
        Column {
            name: name.into(),
            values: Vec::new(),
        }
    }

    /// A column counts as numeric when every cell is numeric or missing
    /// and at least one actual number is present.
    pub fn is_numeric(&self) -> bool {
        self.values.iter().all(CellValue::is_numeric_or_null)
            && self.values.iter().any(|v| v.as_f64().is_some())
    }
}

// ---------------------------------------------------------------------------
// RawTable – the complete parsed input table
// ---------------------------------------------------------------------------

/// An ordered sequence of named columns, all of equal length. Column names
/// and row count are caller-supplied and untrusted; resolution against
/// semantic roles happens in [`crate::data::resolver`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawTable {
    pub columns: Vec<Column>,
}

impl RawTable {
    /// Build a table from pre-assembled columns.
    pub fn from_columns(columns: Vec<Column>) -> Self {
        debug_assert!(
            columns
                .windows(2)
                .all(|w| w[0].values.len() == w[1].values.len()),
            "all columns in a table must have equal length"
        );
        RawTable { columns }
    }

    /// Number of rows (all columns have equal length).
    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, |c| c.values.len())
    }

    pub fn is_empty(&self) -> bool {
        self.n_rows() == 0
    }

    /// Look up a column by exact name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Serialize as an ordered sequence of row mappings
    /// (`[{col: value, ...}, ...]`), the wire shape of every table result.
    pub fn to_records(&self) -> Vec<serde_json::Map<String, serde_json::Value>> {
        (0..self.n_rows())
            .map(|row| {
                self.columns
                    .iter()
                    .map(|col| {
                        let val = serde_json::to_value(&col.values[row])
                            .unwrap_or(serde_json::Value::Null);
                        (col.name.clone(), val)
                    })
                    .collect()
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Series cleaning
// ---------------------------------------------------------------------------

/// Clean a pair of columns into aligned numeric series. A row whose value
/// is non-numeric or missing in either column is dropped from both at the
/// same index, so the two series stay row-wise aligned.
pub fn clean_pair(x: &Column, y: &Column) -> (Vec<f64>, Vec<f64>) {
    x.values
        .iter()
        .zip(&y.values)
        .filter_map(|(a, b)| Some((a.as_f64()?, b.as_f64()?)))
        .unzip()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(name: &str, values: Vec<CellValue>) -> Column {
        Column {
            name: name.to_string(),
            values,
        }
    }

    #[test]
    fn numeric_column_accepts_missing_cells() {
        let col = column(
            "x",
            vec![CellValue::Float(1.0), CellValue::Null, CellValue::Integer(3)],
        );
        assert!(col.is_numeric());
    }

    #[test]
    fn text_cell_disqualifies_numeric_column() {
        let col = column(
            "x",
            vec![CellValue::Float(1.0), CellValue::Text("n/a".into())],
        );
        assert!(!col.is_numeric());
    }

    #[test]
    fn all_null_column_is_not_numeric() {
        let col = column("x", vec![CellValue::Null, CellValue::Null]);
        assert!(!col.is_numeric());
    }

    #[test]
    fn cleaning_drops_rows_pairwise() {
        let x = column(
            "x",
            vec![
                CellValue::Float(1.0),
                CellValue::Text("bad".into()),
                CellValue::Float(3.0),
                CellValue::Float(4.0),
            ],
        );
        let y = column(
            "y",
            vec![
                CellValue::Float(10.0),
                CellValue::Float(20.0),
                CellValue::Null,
                CellValue::Integer(40),
            ],
        );
        let (xs, ys) = clean_pair(&x, &y);
        assert_eq!(xs, vec![1.0, 4.0]);
        assert_eq!(ys, vec![10.0, 40.0]);
    }

    #[test]
    fn records_preserve_row_order() {
        let table = RawTable::from_columns(vec![
            column("a", vec![CellValue::Integer(1), CellValue::Integer(2)]),
            column("b", vec![CellValue::Text("x".into()), CellValue::Null]),
        ]);
        let records = table.to_records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["a"], serde_json::json!(1));
        assert_eq!(records[1]["b"], serde_json::Value::Null);
    }
}
