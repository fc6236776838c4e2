use crate::config::CorrelationMethod;
use anyhow::{anyhow, bail, Result};
use statrs::distribution::{ContinuousCDF, StudentsT};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Correlation {
    pub r: f64,
    /// Two-tailed.
    pub p: f64,
}

/// Pearson correlation coefficient with a two-tailed p-value from Student's t
/// on `n - 2` degrees of freedom.
pub fn pearson(x: &[f64], y: &[f64]) -> Result<Correlation> {
    if x.len() != y.len() {
        bail!("Pearson inputs differ in length: {} vs {}", x.len(), y.len());
    }
    if x.len() < 2 {
        bail!("Pearson needs at least 2 observations, got {}", x.len());
    }

    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;

    for (xi, yi) in x.iter().zip(y.iter()) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        warn!("Constant input, correlation is undefined");
        return Ok(Correlation { r: f64::NAN, p: f64::NAN });
    }

    let r = (cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0);

    if x.len() == 2 {
        return Ok(Correlation { r, p: 1.0 });
    }
    if r.abs() == 1.0 {
        return Ok(Correlation { r, p: 0.0 });
    }

    let df = n - 2.0;
    let t = r * (df / (1.0 - r * r)).sqrt();
    let dist = StudentsT::new(0.0, 1.0, df)
        .map_err(|e| anyhow!("Failed to build t distribution: {:?}", e))?;
    let p = (2.0 * dist.cdf(-t.abs())).min(1.0);

    Ok(Correlation { r, p })
}

/// Pearson on `ln(x + epsilon)` against `y`.
pub fn log_pearson(x: &[f64], y: &[f64], epsilon: f64) -> Result<Correlation> {
    let log_x: Vec<f64> = x.iter().map(|v| (v + epsilon).ln()).collect();
    pearson(&log_x, y)
}

pub fn correlate(method: CorrelationMethod, x: &[f64], y: &[f64], epsilon: f64) -> Result<Correlation> {
    match method {
        CorrelationMethod::Linear => pearson(x, y),
        CorrelationMethod::Log => log_pearson(x, y, epsilon),
    }
}
