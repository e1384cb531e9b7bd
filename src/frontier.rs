//! # Frontier Builder
//!
//! $$
//! \sigma^\*(r) = \min_{\mathbf{w}} \ \sigma_p(\mathbf{w})
//! \quad \text{s.t.} \quad R_p(\mathbf{w}) = r
//! $$
//!
//! Traces the efficient frontier: solves the max-Sharpe and minimum-volatility
//! anchor portfolios, then sweeps a linearly spaced target-return grid between
//! their returns, minimizing volatility at each target. Grid points are
//! independent solves and run in parallel; a non-converged point is recorded
//! as such and does not abort the rest of the sweep.

use ndarray::Array1;
use rayon::prelude::*;
use tracing::warn;

use crate::error::PortfolioError;
use crate::performance::portfolio_performance;
use crate::solver::efficient_return;
use crate::solver::max_sharpe_ratio;
use crate::solver::minimize_variance;
use crate::types::EfficientFrontier;
use crate::types::FrontierAnalysis;
use crate::types::FrontierPoint;
use crate::types::OptimizationResult;
use crate::types::PortfolioConfig;
use crate::types::PortfolioSolution;
use crate::types::Statistics;

fn into_solution(
  result: OptimizationResult,
  stats: &Statistics,
  periods_per_year: f64,
) -> PortfolioSolution {
  let performance = portfolio_performance(&result.weights, stats, periods_per_year);

  PortfolioSolution {
    weights: result.weights,
    performance,
    converged: result.success,
    message: result.message,
  }
}

/// Linearly spaced targets from `low` to `high`, inclusive of both endpoints.
///
/// Collapses to a single point when the endpoints coincide (degenerate
/// single-asset or perfectly correlated universe).
fn target_grid(low: f64, high: f64, points: usize) -> Vec<f64> {
  if points <= 1 || (high - low).abs() < 1e-12 {
    return vec![low];
  }

  Array1::linspace(low, high, points).to_vec()
}

/// Compute the max-Sharpe portfolio, the min-volatility portfolio and the
/// efficient frontier between their returns.
///
/// Issues `frontier_grid_size + 2` independent constrained solves. Frontier
/// points keep grid construction order, ascending by target return; they are
/// never re-sorted.
pub fn efficient_frontier(
  stats: &Statistics,
  config: &PortfolioConfig,
) -> Result<FrontierAnalysis, PortfolioError> {
  let periods_per_year = config.periods_per_year;

  let max_sharpe = into_solution(max_sharpe_ratio(stats, config)?, stats, periods_per_year);
  let min_volatility = into_solution(minimize_variance(stats, config)?, stats, periods_per_year);

  let targets = target_grid(
    min_volatility.performance.annual_return,
    max_sharpe.performance.annual_return,
    config.frontier_grid_size,
  );

  let points = targets
    .par_iter()
    .map(|&target_return| {
      let result = efficient_return(stats, config, target_return)?;
      if !result.success {
        warn!(
          target_return,
          message = %result.message,
          "frontier point did not converge"
        );
      }
      let achieved = portfolio_performance(&result.weights, stats, periods_per_year);

      Ok(FrontierPoint {
        target_return,
        volatility: achieved.annual_volatility,
        converged: result.success,
      })
    })
    .collect::<Result<Vec<_>, PortfolioError>>()?;

  Ok(FrontierAnalysis {
    max_sharpe,
    min_volatility,
    frontier: EfficientFrontier { points },
  })
}
