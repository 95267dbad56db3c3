use serde::{Deserialize, Serialize};

use crate::analysis::Peak;
use crate::data::loader;
use crate::data::model::{clean_pair, RawTable};
use crate::data::resolver::{self, INTENSITY, POSITION};
use crate::error::Result;

/// Smoothing window of the centered moving average.
const SMOOTHING_WINDOW: usize = 5;

/// Peaks reported per diffractogram.
const MAX_PEAKS: usize = 10;

// ---------------------------------------------------------------------------
// Result records
// ---------------------------------------------------------------------------

/// One cleaned sample of a diffractogram, with its smoothed intensity and
/// peak flag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct XrdPoint {
    pub position: f64,
    pub intensity: f64,
    pub smoothed: f64,
    pub is_peak: bool,
}

/// Full cleaned+smoothed trace plus the ranked peak list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct XrdExtraction {
    pub points: Vec<XrdPoint>,
    pub peaks: Vec<Peak>,
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// Run the XRD extractor over a raw byte stream of delimited text.
pub fn extract_bytes(bytes: &[u8]) -> Result<XrdExtraction> {
    extract(&loader::parse_table(bytes)?)
}

/// Extract peaks from an XRD diffractogram table.
///
/// Position and intensity columns are resolved by keyword
/// ({"pos", "2θ"} / {"iobs", "intensity"}), the pair is cleaned, intensity
/// is smoothed with a centered window-5 moving average, and interior
/// samples whose smoothed value strictly exceeds both smoothed neighbours
/// are marked as peaks. The peak list is ranked by raw intensity,
/// descending, and truncated to the top 10.
pub fn extract(table: &RawTable) -> Result<XrdExtraction> {
    let pos_col = resolver::resolve(table, &POSITION)?;
    let int_col = resolver::resolve(table, &INTENSITY)?;
    let (positions, intensities) = clean_pair(pos_col, int_col);

    let smoothed = moving_average(&intensities);

    let n = positions.len();
    let mut points: Vec<XrdPoint> = (0..n)
        .map(|i| XrdPoint {
            position: positions[i],
            intensity: intensities[i],
            smoothed: smoothed[i],
            is_peak: false,
        })
        .collect();

    for i in 1..n.saturating_sub(1) {
        if smoothed[i] > smoothed[i - 1] && smoothed[i] > smoothed[i + 1] {
            points[i].is_peak = true;
        }
    }

    let mut peaks: Vec<Peak> = points
        .iter()
        .filter(|p| p.is_peak)
        .map(|p| Peak {
            x: p.position,
            y: p.intensity,
        })
        .collect();
    peaks.sort_by(|a, b| b.y.total_cmp(&a.y));
    peaks.truncate(MAX_PEAKS);

    log::debug!("XRD: {} samples, {} peaks", n, peaks.len());

    Ok(XrdExtraction { points, peaks })
}

/// Centered moving average with a fixed window. Samples lacking a full
/// window on either side take the value 0.0; under-populated windows are
/// never averaged asymmetrically.
fn moving_average(values: &[f64]) -> Vec<f64> {
    let half = SMOOTHING_WINDOW / 2;
    let n = values.len();

    (0..n)
        .map(|i| {
            if i < half || i + half >= n {
                0.0
            } else {
                values[i - half..=i + half].iter().sum::<f64>() / SMOOTHING_WINDOW as f64
            }
        })
        .collect()
}
