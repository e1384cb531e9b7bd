//! # Result Aggregator
//!
//! Packages a frontier analysis for presentation: per-asset allocations scaled
//! to whole percent, returns and volatilities in percent with two decimal
//! places, and the frontier curve in the same units. Pure transformation, no
//! I/O.
//!
//! All rounding is half away from zero (`f64::round`), applied consistently
//! to allocations and to the two-decimal percent figures.

use crate::error::PortfolioError;
use crate::types::AssetUniverse;
use crate::types::FrontierAnalysis;
use crate::types::PortfolioSolution;

/// Whole-percent allocation for one asset.
#[derive(Clone, Debug, PartialEq)]
pub struct AssetAllocation {
  /// Asset identifier, in universe order.
  pub asset: String,
  /// Allocation in percent, rounded to the nearest whole number.
  pub percent: f64,
}

/// Reportable summary of one optimized portfolio.
#[derive(Clone, Debug)]
pub struct AllocationReport {
  /// Annualized return in percent, two decimal places.
  pub annual_return_pct: f64,
  /// Annualized volatility in percent, two decimal places.
  pub annual_volatility_pct: f64,
  /// Whole-percent allocation per asset.
  pub allocation: Vec<AssetAllocation>,
  /// Whether the underlying solve converged.
  pub converged: bool,
}

/// One frontier point in percent units.
#[derive(Clone, Copy, Debug)]
pub struct FrontierPointReport {
  /// Target return in percent, two decimal places.
  pub target_return_pct: f64,
  /// Minimal volatility in percent, two decimal places.
  pub volatility_pct: f64,
  /// Whether the per-target solve converged.
  pub converged: bool,
}

/// Full report: both anchor portfolios plus the frontier curve.
#[derive(Clone, Debug)]
pub struct PortfolioReport {
  /// Maximum Sharpe ratio portfolio.
  pub max_sharpe: AllocationReport,
  /// Minimum volatility portfolio.
  pub min_volatility: AllocationReport,
  /// Frontier points in grid order.
  pub frontier: Vec<FrontierPointReport>,
}

/// Fraction to percent with two decimal places.
fn percent2(fraction: f64) -> f64 {
  (fraction * 10_000.0).round() / 100.0
}

fn allocation_report(
  universe: &AssetUniverse,
  solution: &PortfolioSolution,
) -> Result<AllocationReport, PortfolioError> {
  if solution.weights.len() != universe.len() {
    return Err(PortfolioError::ShapeMismatch {
      context: "portfolio weights vs asset universe",
      expected: universe.len(),
      actual: solution.weights.len(),
    });
  }

  let allocation = universe
    .symbols()
    .iter()
    .zip(solution.weights.iter())
    .map(|(asset, &weight)| AssetAllocation {
      asset: asset.clone(),
      percent: (weight * 100.0).round(),
    })
    .collect();

  Ok(AllocationReport {
    annual_return_pct: percent2(solution.performance.annual_return),
    annual_volatility_pct: percent2(solution.performance.annual_volatility),
    allocation,
    converged: solution.converged,
  })
}

/// Package a frontier analysis into percent-rounded reporting structures.
pub fn build_report(
  universe: &AssetUniverse,
  analysis: &FrontierAnalysis,
) -> Result<PortfolioReport, PortfolioError> {
  let max_sharpe = allocation_report(universe, &analysis.max_sharpe)?;
  let min_volatility = allocation_report(universe, &analysis.min_volatility)?;

  let frontier = analysis
    .frontier
    .points
    .iter()
    .map(|point| FrontierPointReport {
      target_return_pct: percent2(point.target_return),
      volatility_pct: percent2(point.volatility),
      converged: point.converged,
    })
    .collect();

  Ok(PortfolioReport {
    max_sharpe,
    min_volatility,
    frontier,
  })
}
