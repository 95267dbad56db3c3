use serde::{Deserialize, Serialize};

use crate::analysis::Peak;
use crate::data::loader;
use crate::data::model::{clean_pair, RawTable};
use crate::data::resolver;
use crate::error::Result;

/// Peaks reported per spectrum.
const MAX_PEAKS: usize = 5;

/// How many standard deviations above the mean a peak must rise.
const SIGMA_THRESHOLD: f64 = 2.0;

// ---------------------------------------------------------------------------
// Result records
// ---------------------------------------------------------------------------

/// One cleaned sample of an IR spectrum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IrPoint {
    pub wavenumber: f64,
    pub absorbance: f64,
}

/// Full cleaned spectrum plus the ranked peak list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IrExtraction {
    pub points: Vec<IrPoint>,
    pub peaks: Vec<Peak>,
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// Run the IR extractor over a raw byte stream of delimited text.
pub fn extract_bytes(bytes: &[u8]) -> Result<IrExtraction> {
    extract(&loader::parse_table(bytes)?)
}

/// Extract peaks from an IR spectrum table.
///
/// Column names are ignored: the first two numeric columns (in column
/// order) become wavenumber and absorbance. A sample is a peak iff its
/// absorbance exceeds mean + 2·stdev of the whole series and it is a
/// strict local maximum (the value was increasing into it and decreases
/// after it). The peak list is ranked by absorbance, descending, top 5.
pub fn extract(table: &RawTable) -> Result<IrExtraction> {
    let (x_col, y_col) = resolver::numeric_pair(table)?;
    let (wavenumbers, absorbances) = clean_pair(x_col, y_col);

    let threshold = mean(&absorbances) + SIGMA_THRESHOLD * stdev(&absorbances);

    let n = absorbances.len();
    let mut peaks: Vec<Peak> = (1..n.saturating_sub(1))
        .filter(|&i| {
            absorbances[i] > threshold
                && absorbances[i] > absorbances[i - 1]
                && absorbances[i] > absorbances[i + 1]
        })
        .map(|i| Peak {
            x: wavenumbers[i],
            y: absorbances[i],
        })
        .collect();
    peaks.sort_by(|a, b| b.y.total_cmp(&a.y));
    peaks.truncate(MAX_PEAKS);

    log::debug!("IR: {} samples, {} peaks above {threshold:.4}", n, peaks.len());

    let points = wavenumbers
        .into_iter()
        .zip(absorbances)
        .map(|(wavenumber, absorbance)| IrPoint {
            wavenumber,
            absorbance,
        })
        .collect();

    Ok(IrExtraction { points, peaks })
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation.
fn stdev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let var = values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64;
    var.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CellValue, Column};

    fn ir_table(xs: &[f64], ys: &[f64]) -> RawTable {
        RawTable::from_columns(vec![
            Column {
                name: "column_1".to_string(),
                values: xs.iter().map(|&v| CellValue::Float(v)).collect(),
            },
            Column {
                name: "column_2".to_string(),
                values: ys.iter().map(|&v| CellValue::Float(v)).collect(),
            },
        ])
    }

    #[test]
    fn statistics_match_population_formulas() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((mean(&values) - 5.0).abs() < 1e-12);
        assert!((stdev(&values) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn only_outlier_maxima_qualify() {
        // Mostly-flat baseline with two local maxima: a tall spike and a
        // small bump that stays under mean + 2·stdev.
        let mut ys = vec![0.1; 40];
        ys[10] = 5.0; // spike
        ys[25] = 0.3; // bump below threshold
        let xs: Vec<f64> = (0..40).map(|i| 4000.0 - i as f64).collect();

        let result = extract(&ir_table(&xs, &ys)).unwrap();
        assert_eq!(result.peaks.len(), 1);
        assert_eq!(result.peaks[0].x, 3990.0);
        assert_eq!(result.peaks[0].y, 5.0);
    }

    #[test]
    fn plateau_samples_are_not_peaks() {
        // Two equal high samples: neither strictly exceeds the other.
        let mut ys = vec![0.1; 30];
        ys[10] = 5.0;
        ys[11] = 5.0;
        let xs: Vec<f64> = (0..30).map(|i| i as f64).collect();

        let result = extract(&ir_table(&xs, &ys)).unwrap();
        assert!(result.peaks.is_empty());
    }

    #[test]
    fn text_only_table_is_schema_error() {
        let table = RawTable::from_columns(vec![Column {
            name: "notes".to_string(),
            values: vec![CellValue::Text("hello".into())],
        }]);
        assert!(extract(&table).is_err());
    }
}
