use crate::data::model::{CellValue, Column, RawTable};
use crate::error::Result;

// ---------------------------------------------------------------------------
// Delimited text -> RawTable
// ---------------------------------------------------------------------------

/// Parse a byte stream of comma-delimited text into a [`RawTable`].
///
/// The header row is optional: when every field of the first row parses as
/// a number the table is treated as headerless, synthetic column names
/// (`column_1`, ...) are assigned and the row is kept as data. Header names
/// are trimmed of surrounding whitespace.
///
/// Rows with differing field counts are a parse error (the equal-length
/// column invariant is enforced here, at the boundary).
pub fn parse_table(bytes: &[u8]) -> Result<RawTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(bytes);

    let mut rows: Vec<csv::StringRecord> = Vec::new();
    for record in reader.records() {
        rows.push(record?);
    }

    if rows.is_empty() {
        return Ok(RawTable::from_columns(Vec::new()));
    }

    let first_is_data = rows[0]
        .iter()
        .all(|field| field.trim().parse::<f64>().is_ok());

    let (names, data_rows): (Vec<String>, &[csv::StringRecord]) = if first_is_data {
        let names = (1..=rows[0].len()).map(|i| format!("column_{i}")).collect();
        (names, &rows[..])
    } else {
        let names = rows[0].iter().map(|h| h.trim().to_string()).collect();
        (names, &rows[1..])
    };

    let mut columns: Vec<Column> = names.into_iter().map(Column::new).collect();
    for row in data_rows {
        for (idx, field) in row.iter().enumerate() {
            columns[idx].values.push(guess_cell(field));
        }
    }

    log::debug!(
        "parsed table: {} columns x {} rows (headerless: {first_is_data})",
        columns.len(),
        data_rows.len()
    );

    Ok(RawTable::from_columns(columns))
}

/// Infer the type of a single field, dataframe-style.
fn guess_cell(s: &str) -> CellValue {
    let s = s.trim();
    if s.is_empty() {
        return CellValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return CellValue::Float(f);
    }
    CellValue::Text(s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_row_becomes_column_names() {
        let table = parse_table(b"Pos,Iobs\n10.0,100\n10.1,105\n").unwrap();
        assert_eq!(table.columns.len(), 2);
        assert_eq!(table.columns[0].name, "Pos");
        assert_eq!(table.columns[1].name, "Iobs");
        assert_eq!(table.n_rows(), 2);
        assert_eq!(table.columns[1].values[0], CellValue::Integer(100));
    }

    #[test]
    fn numeric_first_row_is_kept_as_data() {
        let table = parse_table(b"4000.0,0.12\n3999.0,0.14\n").unwrap();
        assert_eq!(table.columns[0].name, "column_1");
        assert_eq!(table.n_rows(), 2);
        assert_eq!(table.columns[0].values[0], CellValue::Float(4000.0));
    }

    #[test]
    fn header_names_are_trimmed() {
        let table = parse_table(b" Adsorption Capacity (mmol/g) ,other\n1.0,2.0\n").unwrap();
        assert_eq!(table.columns[0].name, "Adsorption Capacity (mmol/g)");
    }

    #[test]
    fn missing_fields_become_null() {
        let table = parse_table(b"a,b\n1,\n,2\n").unwrap();
        assert_eq!(table.columns[1].values[0], CellValue::Null);
        assert_eq!(table.columns[0].values[1], CellValue::Null);
    }

    #[test]
    fn ragged_rows_are_a_parse_error() {
        assert!(parse_table(b"a,b\n1,2,3\n").is_err());
    }

    #[test]
    fn empty_input_yields_empty_table() {
        let table = parse_table(b"").unwrap();
        assert!(table.is_empty());
    }
}
