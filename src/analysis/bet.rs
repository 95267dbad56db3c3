use serde::{Deserialize, Serialize};

use crate::analysis::regression;
use crate::data::document::{self, DocumentData};
use crate::data::loader;
use crate::data::model::{clean_pair, RawTable};
use crate::data::resolver;
use crate::error::{Error, Result};

/// Pressure-ratio window over which the BET transform is approximately
/// linear.
const LINEAR_REGION: (f64, f64) = (0.05, 0.35);

/// Avogadro's number, mol⁻¹.
const AVOGADRO: f64 = 6.022e23;

/// Molecular cross-section of adsorbed nitrogen, Å².
const N2_CROSS_SECTION: f64 = 16.2;

/// Molar volume of an ideal gas at STP, cm³/mol.
const MOLAR_VOLUME_STP: f64 = 22414.0;

/// Å² per m².
const SQ_ANGSTROM_PER_SQ_METER: f64 = 1e18;

/// cm² per m².
const SQ_CM_PER_SQ_METER: f64 = 1e4;

// ---------------------------------------------------------------------------
// Result records
// ---------------------------------------------------------------------------

/// One cleaned isotherm row with its BET transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BetPoint {
    pub ppo: f64,
    pub va: f64,
    pub bet_plot: f64,
}

/// Fitted BET line and the quantities derived from it. Immutable once
/// created.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BetFit {
    pub slope: f64,
    pub intercept: f64,
    /// Monolayer capacity, cm³/g.
    pub vm: f64,
    /// BET constant.
    pub c: f64,
    /// Specific surface area, m²/g.
    pub surface_area: f64,
}

/// A surface-area extraction has two legitimate terminal shapes: a full
/// isotherm table with its fit, or a bare value recovered directly from
/// report text with no accompanying table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum BetExtraction {
    Measured { fit: BetFit, points: Vec<BetPoint> },
    Reported { surface_area: f64 },
}

impl BetExtraction {
    /// The surface area, whichever way it was obtained.
    pub fn surface_area(&self) -> f64 {
        match self {
            BetExtraction::Measured { fit, .. } => fit.surface_area,
            BetExtraction::Reported { surface_area } => *surface_area,
        }
    }
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// Run the BET extractor over a raw byte stream of delimited text.
pub fn extract_bytes(bytes: &[u8]) -> Result<BetExtraction> {
    extract(&loader::parse_table(bytes)?)
}

/// Extract surface area from report text (page text concatenated in page
/// order). A directly-stated value short-circuits; otherwise a table block
/// is located and fed through the tabular path.
pub fn extract_from_text(text: &str) -> Result<BetExtraction> {
    match document::extract_bet_data(text)? {
        DocumentData::SurfaceArea(surface_area) => Ok(BetExtraction::Reported { surface_area }),
        DocumentData::Table(table) => extract(&table),
    }
}

/// Extract surface area from an isotherm table.
///
/// The table must carry columns literally named `P/P0` and `Va`. Every
/// cleaned row is transformed to `1 / (Va·(1/ppo − 1))`; the linear region
/// (0.05 ≤ p/p0 ≤ 0.35, at least two rows) is fitted by least squares and
/// the surface area derived from the fitted line.
pub fn extract(table: &RawTable) -> Result<BetExtraction> {
    let ppo_col = resolver::resolve_exact(table, "pressure ratio", "P/P0")?;
    let va_col = resolver::resolve_exact(table, "adsorbed volume", "Va")?;
    let (ppos, vas) = clean_pair(ppo_col, va_col);

    let points = ppos
        .iter()
        .zip(&vas)
        .map(|(&ppo, &va)| {
            Ok(BetPoint {
                ppo,
                va,
                bet_plot: bet_transform(ppo, va)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let (lo, hi) = LINEAR_REGION;
    let region: Vec<&BetPoint> = points
        .iter()
        .filter(|p| p.ppo >= lo && p.ppo <= hi)
        .collect();
    if region.len() < 2 {
        return Err(Error::InsufficientData(format!(
            "{} rows in the linear region ({lo}-{hi} p/p0); at least 2 required for regression",
            region.len()
        )));
    }

    let xs: Vec<f64> = region.iter().map(|p| p.ppo).collect();
    let ys: Vec<f64> = region.iter().map(|p| p.bet_plot).collect();
    let line = regression::fit(&xs, &ys)?;

    let fit = derive(line.slope, line.intercept)?;
    log::debug!(
        "BET: {} rows, {} in linear region, surface area {:.2} m²/g",
        points.len(),
        region.len(),
        fit.surface_area
    );

    Ok(BetExtraction::Measured { fit, points })
}

/// The per-row BET transform. A pressure ratio of 0 or 1 or an adsorbed
/// volume of 0 makes the transform undefined; such rows are an error, never
/// coerced.
fn bet_transform(ppo: f64, va: f64) -> Result<f64> {
    if ppo == 0.0 {
        return Err(Error::Computation(
            "pressure ratio of 0 makes the BET transform undefined".to_string(),
        ));
    }
    let denom = va * (1.0 / ppo - 1.0);
    if denom == 0.0 {
        return Err(Error::Computation(format!(
            "BET transform denominator is zero at p/p0 = {ppo}, Va = {va}"
        )));
    }
    let bet = 1.0 / denom;
    if !bet.is_finite() {
        return Err(Error::Computation(format!(
            "non-finite BET transform at p/p0 = {ppo}, Va = {va}"
        )));
    }
    Ok(bet)
}

/// Derive monolayer capacity, BET constant and surface area from the
/// fitted line.
fn derive(slope: f64, intercept: f64) -> Result<BetFit> {
    if slope + intercept == 0.0 {
        return Err(Error::Computation(
            "slope + intercept is zero; monolayer capacity undefined".to_string(),
        ));
    }
    if intercept == 0.0 {
        return Err(Error::Computation(
            "zero intercept; BET constant undefined".to_string(),
        ));
    }

    let vm = 1.0 / (slope + intercept);
    let c = slope / intercept + 1.0;
    let surface_area =
        vm * AVOGADRO * N2_CROSS_SECTION / MOLAR_VOLUME_STP / SQ_ANGSTROM_PER_SQ_METER
            * SQ_CM_PER_SQ_METER;

    Ok(BetFit {
        slope,
        intercept,
        vm,
        c,
        surface_area,
    })
}
