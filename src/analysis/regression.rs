use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Ordinary least squares
// ---------------------------------------------------------------------------

/// Result of a least-squares line fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

/// Fit `y = slope·x + intercept` over paired samples using the closed-form
/// normal equations. Deterministic.
///
/// Fails with [`Error::DegenerateInput`] when fewer than two samples are
/// given or all x-values are identical (zero variance, undefined slope).
pub fn fit(xs: &[f64], ys: &[f64]) -> Result<LinearFit> {
    debug_assert_eq!(xs.len(), ys.len(), "fit requires paired samples");

    let n = xs.len();
    if n < 2 {
        return Err(Error::DegenerateInput(format!(
            "at least 2 paired samples required, got {n}"
        )));
    }

    let x_mean = xs.iter().sum::<f64>() / n as f64;
    let y_mean = ys.iter().sum::<f64>() / n as f64;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for (&x, &y) in xs.iter().zip(ys) {
        sxx += (x - x_mean) * (x - x_mean);
        sxy += (x - x_mean) * (y - y_mean);
    }

    if sxx == 0.0 {
        return Err(Error::DegenerateInput(
            "all x-values are identical (zero variance)".to_string(),
        ));
    }

    let slope = sxy / sxx;
    Ok(LinearFit {
        slope,
        intercept: y_mean - slope * x_mean,
    })
}
