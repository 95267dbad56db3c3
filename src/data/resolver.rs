use crate::data::model::{Column, RawTable};
use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Role – static keyword configuration
// ---------------------------------------------------------------------------

/// A semantic role a caller wants to locate in an untrusted table, with the
/// header keywords that identify it. Keywords are stored lowercase and
/// matched as case-insensitive substrings of the column name.
#[derive(Debug, Clone, Copy)]
pub struct Role {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
}

/// Diffraction angle column of an XRD trace.
pub const POSITION: Role = Role {
    name: "position",
    keywords: &["pos", "2θ"],
};

/// Observed intensity column of an XRD trace.
pub const INTENSITY: Role = Role {
    name: "intensity",
    keywords: &["iobs", "intensity"],
};

/// Adsorption capacity column of a TGA table.
pub const ADSORPTION_CAPACITY: Role = Role {
    name: "adsorption capacity",
    keywords: &["adsorption", "capacity", "mmol", "g"],
};

/// Desorption energy consumption column of a TGA table.
pub const DESORPTION_ENERGY: Role = Role {
    name: "desorption energy",
    keywords: &["desorption", "energy", "consumption", "kj", "mol"],
};

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Resolve a role by keyword match: the first column (in original order)
/// whose name contains any of the role's keywords wins. No scoring across
/// multiple matches.
pub fn resolve<'t>(table: &'t RawTable, role: &Role) -> Result<&'t Column> {
    table
        .columns
        .iter()
        .find(|col| {
            let name = col.name.to_lowercase();
            role.keywords.iter().any(|kw| name.contains(kw))
        })
        .ok_or_else(|| Error::schema(role.name, role.keywords))
}

/// Resolve a role that requires an exactly-named column.
pub fn resolve_exact<'t>(table: &'t RawTable, role: &str, name: &str) -> Result<&'t Column> {
    table
        .column(name)
        .ok_or_else(|| Error::schema_exact(role, name))
}

/// Two-tier keyword match: tier 1 requires *all* of the role's keywords to
/// appear in the column name, tier 2 falls back to *any*. The first column
/// satisfying the active tier wins. Column names are trimmed before
/// matching.
pub fn resolve_tiered<'t>(table: &'t RawTable, role: &Role) -> Result<&'t Column> {
    let matches = |col: &Column, all: bool| {
        let name = col.name.trim().to_lowercase();
        if all {
            role.keywords.iter().all(|kw| name.contains(kw))
        } else {
            role.keywords.iter().any(|kw| name.contains(kw))
        }
    };

    table
        .columns
        .iter()
        .find(|col| matches(col, true))
        .or_else(|| table.columns.iter().find(|col| matches(col, false)))
        .ok_or_else(|| Error::schema(role.name, role.keywords))
}

/// Positional numeric fallback: ignore names entirely and select the first
/// two numeric columns in column order. The first becomes the independent
/// variable, the second the dependent one.
pub fn numeric_pair(table: &RawTable) -> Result<(&Column, &Column)> {
    let mut numeric = table.columns.iter().filter(|c| c.is_numeric());
    match (numeric.next(), numeric.next()) {
        (Some(x), Some(y)) => Ok((x, y)),
        _ => Err(Error::Schema {
            role: "numeric data".to_string(),
            keywords: "at least two numeric columns".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CellValue;

    fn table(cols: &[(&str, Vec<CellValue>)]) -> RawTable {
        RawTable::from_columns(
            cols.iter()
                .map(|(name, values)| Column {
                    name: name.to_string(),
                    values: values.clone(),
                })
                .collect(),
        )
    }

    fn nums(vals: &[f64]) -> Vec<CellValue> {
        vals.iter().map(|&v| CellValue::Float(v)).collect()
    }

    #[test]
    fn first_matching_column_wins() {
        let t = table(&[
            ("Pos [°2θ]", nums(&[1.0])),
            ("Pos (fitted)", nums(&[2.0])),
            ("Iobs", nums(&[3.0])),
        ]);
        assert_eq!(resolve(&t, &POSITION).unwrap().name, "Pos [°2θ]");
    }

    #[test]
    fn keyword_match_is_case_insensitive() {
        let t = table(&[("INTENSITY (counts)", nums(&[1.0]))]);
        assert_eq!(resolve(&t, &INTENSITY).unwrap().name, "INTENSITY (counts)");
    }

    #[test]
    fn missing_role_is_a_schema_error() {
        let t = table(&[("temperature", nums(&[1.0]))]);
        let err = resolve(&t, &POSITION).unwrap_err();
        assert!(err.to_string().contains("position"));
        assert!(err.to_string().contains("pos"));
    }

    #[test]
    fn tier_one_requires_all_keywords() {
        let t = table(&[
            ("mmol data", nums(&[1.0])),
            ("Adsorption Capacity (mmol/g)", nums(&[2.0])),
        ]);
        // The complete-header column wins even though a looser match comes
        // earlier in column order.
        let col = resolve_tiered(&t, &ADSORPTION_CAPACITY).unwrap();
        assert_eq!(col.name, "Adsorption Capacity (mmol/g)");
    }

    #[test]
    fn tier_two_falls_back_to_any_keyword() {
        let t = table(&[("other", nums(&[1.0])), ("mmol data", nums(&[2.0]))]);
        let col = resolve_tiered(&t, &ADSORPTION_CAPACITY).unwrap();
        assert_eq!(col.name, "mmol data");
    }

    #[test]
    fn numeric_pair_skips_text_columns() {
        let t = table(&[
            ("label", vec![CellValue::Text("a".into())]),
            ("wn", nums(&[4000.0])),
            ("abs", nums(&[0.2])),
        ]);
        let (x, y) = numeric_pair(&t).unwrap();
        assert_eq!(x.name, "wn");
        assert_eq!(y.name, "abs");
    }

    #[test]
    fn single_numeric_column_is_a_schema_error() {
        let t = table(&[("wn", nums(&[4000.0]))]);
        assert!(matches!(
            numeric_pair(&t),
            Err(Error::Schema { .. })
        ));
    }
}
