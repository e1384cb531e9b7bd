//! # Return Statistics
//!
//! $$
//! \Sigma_{ij} = \frac{1}{T-1} \sum_t (r_{i,t} - \bar r_i)(r_{j,t} - \bar r_j)
//! $$
//!
//! Preprocessing from close-price series to the mean vector and sample
//! covariance matrix consumed by the optimizer. Simple (percent-change) and
//! log-difference conventions are both supported; the optimizer is agnostic to
//! which one produced the statistics as long as mean and covariance share it.
//! Full-precision arithmetic throughout, no intermediate rounding.

use ndarray::Array1;
use ndarray::Array2;

use crate::error::PortfolioError;
use crate::types::Statistics;

/// Convert close prices to simple percent-change returns.
pub fn simple_returns_series(closes: &[f64]) -> Vec<f64> {
  closes
    .windows(2)
    .filter(|pair| pair[0] != 0.0)
    .map(|pair| pair[1] / pair[0] - 1.0)
    .collect()
}

/// Convert close prices to log-difference returns.
pub fn log_returns_series(closes: &[f64]) -> Vec<f64> {
  closes
    .windows(2)
    .filter(|pair| pair[0] > 0.0 && pair[1] > 0.0)
    .map(|pair| (pair[1] / pair[0]).ln())
    .collect()
}

/// Trim multiple return series to their common tail length.
pub fn align_return_series(all_returns: &[Vec<f64>]) -> Vec<Vec<f64>> {
  let min_len = all_returns.iter().map(|r| r.len()).min().unwrap_or(0);

  all_returns
    .iter()
    .map(|r| r[r.len() - min_len..].to_vec())
    .collect()
}

/// Estimate per-period mean returns and the sample covariance matrix from
/// aligned return series, one series per asset in universe order.
///
/// Uses the unbiased (T−1) covariance estimator. Series must share one length
/// of at least two observations.
pub fn statistics_from_returns(aligned_returns: &[Vec<f64>]) -> Result<Statistics, PortfolioError> {
  let n = aligned_returns.len();
  if n == 0 {
    return Err(PortfolioError::EmptyUniverse);
  }

  let len = aligned_returns[0].len();
  for series in aligned_returns {
    if series.len() != len {
      return Err(PortfolioError::ShapeMismatch {
        context: "aligned return series lengths",
        expected: len,
        actual: series.len(),
      });
    }
  }
  if len < 2 {
    return Err(PortfolioError::ShortSeries {
      required: 2,
      actual: len,
    });
  }

  let means: Vec<f64> = aligned_returns
    .iter()
    .map(|series| series.iter().sum::<f64>() / len as f64)
    .collect();

  let mut cov = Array2::zeros((n, n));
  for i in 0..n {
    for j in i..n {
      let mut acc = 0.0;
      for t in 0..len {
        acc += (aligned_returns[i][t] - means[i]) * (aligned_returns[j][t] - means[j]);
      }
      let c = acc / (len - 1) as f64;
      cov[[i, j]] = c;
      cov[[j, i]] = c;
    }
  }

  Statistics::new(Array1::from_vec(means), cov)
}
