use serde::{Deserialize, Serialize};

use crate::data::loader;
use crate::data::model::{CellValue, RawTable};
use crate::data::resolver::{self, ADSORPTION_CAPACITY, DESORPTION_ENERGY};
use crate::error::Result;

// ---------------------------------------------------------------------------
// Result record
// ---------------------------------------------------------------------------

/// The two resolved TGA columns, values verbatim: no cleaning, no numeric
/// analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TgaExtraction {
    pub adsorption_capacity: Vec<CellValue>,
    pub desorption_energy: Vec<CellValue>,
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// Run the TGA extractor over a raw byte stream of delimited text.
pub fn extract_bytes(bytes: &[u8]) -> Result<TgaExtraction> {
    extract(&loader::parse_table(bytes)?)
}

/// Extract the adsorption-capacity and desorption-energy columns from a
/// TGA table.
///
/// Each role resolves with a two-tier keyword match: a column whose name
/// contains *all* of the role's keywords wins outright; failing that, the
/// first column containing *any* keyword is taken.
pub fn extract(table: &RawTable) -> Result<TgaExtraction> {
    let adsorption = resolver::resolve_tiered(table, &ADSORPTION_CAPACITY)?;
    let desorption = resolver::resolve_tiered(table, &DESORPTION_ENERGY)?;

    log::debug!(
        "TGA: adsorption '{}', desorption '{}', {} rows",
        adsorption.name,
        desorption.name,
        table.n_rows()
    );

    Ok(TgaExtraction {
        adsorption_capacity: adsorption.values.clone(),
        desorption_energy: desorption.values.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Column;

    #[test]
    fn full_headers_resolve_via_tier_one() {
        let table = RawTable::from_columns(vec![
            Column {
                name: "Adsorption Capacity (mmol/g)".to_string(),
                values: vec![CellValue::Float(1.2), CellValue::Float(1.4)],
            },
            Column {
                name: "Desorption Energy Consumption (kJ/mol)".to_string(),
                values: vec![CellValue::Float(45.0), CellValue::Float(47.5)],
            },
        ]);
        let result = extract(&table).unwrap();
        assert_eq!(result.adsorption_capacity.len(), 2);
        assert_eq!(result.desorption_energy[1], CellValue::Float(47.5));
    }

    #[test]
    fn values_are_returned_verbatim() {
        // Text and missing cells pass through untouched.
        let table = RawTable::from_columns(vec![
            Column {
                name: "adsorption".to_string(),
                values: vec![CellValue::Text("n/a".into()), CellValue::Null],
            },
            Column {
                name: "desorption".to_string(),
                values: vec![CellValue::Float(45.0), CellValue::Integer(47)],
            },
        ]);
        let result = extract(&table).unwrap();
        assert_eq!(result.adsorption_capacity[0], CellValue::Text("n/a".into()));
        assert_eq!(result.adsorption_capacity[1], CellValue::Null);
    }

    #[test]
    fn missing_role_names_the_keywords() {
        let table = RawTable::from_columns(vec![Column {
            name: "temperature".to_string(),
            values: vec![CellValue::Float(300.0)],
        }]);
        let err = extract(&table).unwrap_err();
        assert!(err.to_string().contains("adsorption capacity"));
        assert!(err.to_string().contains("mmol"));
    }
}
