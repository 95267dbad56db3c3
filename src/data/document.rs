//! Table and value extraction from unstructured report text.
//!
//! Characterization reports arrive as plain text (page text concatenated in
//! page order). Extraction is a prioritized list of strategies, each a pure
//! function of the text, tried in order until one succeeds.

use regex::Regex;

use crate::data::model::{CellValue, Column, RawTable};
use crate::error::{Error, Result};

/// What a report text yielded: either an isotherm table to run the full
/// calculation on, or a surface-area value stated directly (no table).
#[derive(Debug, Clone)]
pub enum DocumentData {
    Table(RawTable),
    SurfaceArea(f64),
}

/// Pattern locating a directly-stated surface area.
const SURFACE_AREA_PATTERN: &str = r"BET Surface Area: (\d+\.\d+) m²/g";

/// Known table-header phrasings, in priority order. Each captures a block
/// of two-column numeric rows following the header line.
const TABLE_PATTERNS: &[(&str, &str)] = &[
    (
        "p/p0-va header",
        r"P/P0\s+Va\s+.*\n((?:\s*-?\d+\.\d+\s+-?\d+\.\d+\n)+)",
    ),
    (
        "relative-pressure header",
        r"Rel\.\s+Pressure\s+Quantity\s+Adsorbed\n((?:\s*-?\d+\.\d+\s+-?\d+\.\d+\n)+)",
    ),
    (
        "lowercase header",
        r"p/p0\s+v\n((?:\s*-?\d+\.\d+\s+-?\d+\.\d+\n)+)",
    ),
];

/// Extract BET data from report text.
///
/// Strategy order: a directly-stated surface area first (terminal, no
/// table), then each known table phrasing. If nothing matches, the text
/// holds no recognizable data.
pub fn extract_bet_data(text: &str) -> Result<DocumentData> {
    let area_re = Regex::new(SURFACE_AREA_PATTERN).expect("static pattern");
    if let Some(caps) = area_re.captures(text) {
        let area: f64 = caps[1]
            .parse()
            .map_err(|_| Error::DataNotFound("unreadable surface area value".to_string()))?;
        log::debug!("found directly-stated surface area: {area} m²/g");
        return Ok(DocumentData::SurfaceArea(area));
    }

    for (label, pattern) in TABLE_PATTERNS {
        let re = Regex::new(pattern).expect("static pattern");
        if let Some(caps) = re.captures(text) {
            log::debug!("table block matched via {label} strategy");
            return parse_table_block(caps[1].trim()).map(DocumentData::Table);
        }
    }

    Err(Error::DataNotFound(
        "no BET surface area or data table found in the document text".to_string(),
    ))
}

/// Parse a captured block of whitespace-separated numeric rows into a
/// two-column table (`P/P0`, `Va`).
fn parse_table_block(block: &str) -> Result<RawTable> {
    let mut ppo = Column::new("P/P0");
    let mut va = Column::new("Va");

    for line in block.lines() {
        let mut fields = line.split_whitespace();
        let (a, b) = match (fields.next(), fields.next()) {
            (Some(a), Some(b)) => (a, b),
            _ => {
                return Err(Error::DataNotFound(format!(
                    "malformed table row in matched block: '{line}'"
                )))
            }
        };
        ppo.values.push(parse_cell(a, line)?);
        va.values.push(parse_cell(b, line)?);
    }

    Ok(RawTable::from_columns(vec![ppo, va]))
}

fn parse_cell(field: &str, line: &str) -> Result<CellValue> {
    field
        .parse::<f64>()
        .map(CellValue::Float)
        .map_err(|_| Error::DataNotFound(format!("non-numeric value in table row: '{line}'")))
}
