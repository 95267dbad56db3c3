/// Analysis layer: the four extractors and the shared regression.
///
/// Architecture:
/// ```text
///             ┌──────────┐
///             │ RawTable  │  (or report text, BET only)
///             └──────────┘
///        ┌───────┬┴──────┬────────┐
///        ▼       ▼       ▼        ▼
///    ┌──────┐ ┌─────┐ ┌─────┐ ┌─────┐
///    │ xrd   │ │ ir  │ │ bet │ │ tga │
///    └──────┘ └─────┘ └──┬──┘ └─────┘
///        │       │       ▼        │
///        │       │  ┌──────────┐  │
///        │       │  │regression│  │
///        │       │  └──────────┘  │
///        ▼       ▼       ▼        ▼
///     cleaned series + detected features
/// ```
///
/// Every extractor call is a pure, synchronous computation over an
/// in-memory table: no shared state between calls, safe to run
/// concurrently, order-independent.
pub mod bet;
pub mod ir;
pub mod regression;
pub mod tga;
pub mod xrd;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Shared feature record
// ---------------------------------------------------------------------------

/// A detected local maximum, in the units of its source series.
/// Derived per request, never persisted by the extractors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Peak {
    pub x: f64,
    pub y: f64,
}

// ---------------------------------------------------------------------------
// Data kind
// ---------------------------------------------------------------------------

/// The characterization technique a dataset belongs to; selects the
/// extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataKind {
    Xrd,
    Ir,
    Bet,
    Tga,
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DataKind::Xrd => "xrd",
            DataKind::Ir => "ir",
            DataKind::Bet => "bet",
            DataKind::Tga => "tga",
        };
        write!(f, "{s}")
    }
}

impl FromStr for DataKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "xrd" => Ok(DataKind::Xrd),
            "ir" => Ok(DataKind::Ir),
            "bet" => Ok(DataKind::Bet),
            "tga" => Ok(DataKind::Tga),
            other => Err(format!("unknown data kind '{other}' (expected xrd, ir, bet or tga)")),
        }
    }
}
