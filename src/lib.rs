//! matscope: feature extraction for materials-characterization data.
//!
//! Four independent extractors share a common shape (raw tabular/text
//! input → cleaned series → detected features):
//!
//! * [`analysis::xrd`] for diffractograms: smoothing + local-maximum peaks
//! * [`analysis::ir`] for spectra: statistically significant maxima
//! * [`analysis::bet`] for adsorption isotherms: linear fit → surface area
//! * [`analysis::tga`] for adsorption/desorption tables: column recovery
//!
//! plus the leaf modules they build on: [`data::resolver`] (keyword-based
//! column disambiguation) and [`analysis::regression`] (ordinary least
//! squares). The orchestration pieces, [`suggest`] (the external summary
//! generator) and [`history`] (append-only analysis history), sit outside
//! the extractors and never feed back into them.

pub mod analysis;
pub mod data;
pub mod error;
pub mod history;
pub mod suggest;

pub use analysis::{DataKind, Peak};
pub use data::model::{CellValue, Column, RawTable};
pub use error::{Error, Result};
