//! # Objective Functions
//!
//! $$
//! -\frac{R_p - r_f}{\sigma_p} \qquad \text{and} \qquad \sigma_p
//! $$
//!
//! Minimization targets built on the performance evaluator: the negative
//! Sharpe ratio for tangency-portfolio search and raw annualized volatility
//! for minimum-variance and per-target frontier solves.

use ndarray::Array1;

use crate::performance::portfolio_performance;
use crate::types::Statistics;

/// Negative Sharpe ratio of a portfolio.
///
/// Division by zero volatility (a degenerate zero-variance portfolio) is a
/// fault condition the caller guards against via bounds and constraints; it is
/// not handled here and propagates as an infinity or NaN.
pub fn negative_sharpe(
  weights: &Array1<f64>,
  stats: &Statistics,
  risk_free_rate: f64,
  periods_per_year: f64,
) -> f64 {
  let perf = portfolio_performance(weights, stats, periods_per_year);
  -(perf.annual_return - risk_free_rate) / perf.annual_volatility
}

/// Annualized portfolio volatility alone.
pub fn annual_volatility(
  weights: &Array1<f64>,
  stats: &Statistics,
  periods_per_year: f64,
) -> f64 {
  portfolio_performance(weights, stats, periods_per_year).annual_volatility
}
