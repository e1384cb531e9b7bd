//! # Performance Evaluator
//!
//! $$
//! R_p = f \cdot \mu^\top \mathbf{w}, \qquad
//! \sigma_p = \sqrt{f} \cdot \sqrt{\mathbf{w}^\top \Sigma \mathbf{w}}
//! $$
//!
//! Annualized return and volatility of a weight vector, with `f` trading
//! periods per year.

use ndarray::Array1;

use crate::types::PortfolioPerformance;
use crate::types::Statistics;

/// Evaluate annualized expected return and volatility of a portfolio.
///
/// Pure function: no validation and no side effects. The weight vector must
/// match the statistics dimension. A negative radicand from ill-conditioned
/// covariance input propagates as NaN rather than being clamped; that is an
/// input-data error, not a condition this function corrects.
pub fn portfolio_performance(
  weights: &Array1<f64>,
  stats: &Statistics,
  periods_per_year: f64,
) -> PortfolioPerformance {
  let annual_return = periods_per_year * stats.mean_returns().dot(weights);
  let variance = weights.dot(&stats.cov_matrix().dot(weights));
  let annual_volatility = periods_per_year.sqrt() * variance.sqrt();

  PortfolioPerformance {
    annual_return,
    annual_volatility,
  }
}
