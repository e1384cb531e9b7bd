//! # Portfolio Types
//!
//! $$
//! \mathbf{w} \in \mathbb{R}^N, \quad \mathbf{1}^\top \mathbf{w} = 1
//! $$
//!
//! Shared containers for asset universes, return statistics, solver
//! configuration and optimization outcomes. Every vector and matrix is indexed
//! by asset-universe order, which is significant and preserved end-to-end.

use std::collections::HashSet;

use ndarray::Array1;
use ndarray::Array2;

use crate::error::PortfolioError;

/// Ordered collection of distinct asset identifiers.
///
/// The position of an identifier indexes the corresponding entry of every
/// weight vector, mean vector and covariance row produced by this crate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetUniverse {
  symbols: Vec<String>,
}

impl AssetUniverse {
  /// Build a universe from ordered identifiers, rejecting duplicates.
  pub fn new<I, S>(symbols: I) -> Result<Self, PortfolioError>
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    let symbols: Vec<String> = symbols.into_iter().map(Into::into).collect();
    if symbols.is_empty() {
      return Err(PortfolioError::EmptyUniverse);
    }

    let mut seen = HashSet::new();
    for symbol in &symbols {
      if !seen.insert(symbol.as_str()) {
        return Err(PortfolioError::DuplicateAsset(symbol.clone()));
      }
    }

    Ok(Self { symbols })
  }

  /// Number of assets.
  pub fn len(&self) -> usize {
    self.symbols.len()
  }

  /// Whether the universe holds no assets. Never true for a constructed value.
  pub fn is_empty(&self) -> bool {
    self.symbols.is_empty()
  }

  /// Ordered identifiers.
  pub fn symbols(&self) -> &[String] {
    &self.symbols
  }

  /// Index of an identifier, if present.
  pub fn position(&self, symbol: &str) -> Option<usize> {
    self.symbols.iter().position(|s| s == symbol)
  }
}

/// Per-period return statistics: mean vector and covariance matrix.
///
/// The covariance matrix is assumed symmetric positive semi-definite; it is
/// derived from sample data by the caller and not re-checked here. Shapes are
/// validated once at construction and immutable afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct Statistics {
  mean_returns: Array1<f64>,
  cov_matrix: Array2<f64>,
}

impl Statistics {
  /// Bundle a mean-return vector with its covariance matrix.
  pub fn new(mean_returns: Array1<f64>, cov_matrix: Array2<f64>) -> Result<Self, PortfolioError> {
    if cov_matrix.nrows() != cov_matrix.ncols() {
      return Err(PortfolioError::ShapeMismatch {
        context: "covariance matrix rows vs columns",
        expected: cov_matrix.nrows(),
        actual: cov_matrix.ncols(),
      });
    }
    if mean_returns.len() != cov_matrix.nrows() {
      return Err(PortfolioError::ShapeMismatch {
        context: "mean vector vs covariance dimension",
        expected: mean_returns.len(),
        actual: cov_matrix.nrows(),
      });
    }

    Ok(Self {
      mean_returns,
      cov_matrix,
    })
  }

  /// Number of assets covered by these statistics.
  pub fn num_assets(&self) -> usize {
    self.mean_returns.len()
  }

  /// Per-period expected returns, in asset-universe order.
  pub fn mean_returns(&self) -> &Array1<f64> {
    &self.mean_returns
  }

  /// Per-period return covariance matrix, in asset-universe order.
  pub fn cov_matrix(&self) -> &Array2<f64> {
    &self.cov_matrix
  }
}

/// Runtime configuration shared by all optimization entry points.
#[derive(Clone, Copy, Debug)]
pub struct PortfolioConfig {
  /// Risk-free rate used in Sharpe computations, annualized.
  pub risk_free_rate: f64,
  /// Identical box bound applied to every asset weight.
  pub weight_bounds: (f64, f64),
  /// Number of target returns on the efficient frontier grid.
  pub frontier_grid_size: usize,
  /// Trading periods per year used for annualization.
  pub periods_per_year: f64,
}

impl Default for PortfolioConfig {
  fn default() -> Self {
    Self {
      risk_free_rate: 0.0,
      weight_bounds: (0.0, 1.0),
      frontier_grid_size: 20,
      periods_per_year: 252.0,
    }
  }
}

/// Annualized portfolio performance derived from weights and statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PortfolioPerformance {
  /// Annualized expected return.
  pub annual_return: f64,
  /// Annualized standard deviation of returns.
  pub annual_volatility: f64,
}

/// Outcome of one constrained minimization.
#[derive(Clone, Debug)]
pub struct OptimizationResult {
  /// Final weights, projected onto the feasible set.
  pub weights: Array1<f64>,
  /// Objective value at the final weights, penalty terms excluded.
  pub objective: f64,
  /// Whether the solver converged and the objective is finite.
  pub success: bool,
  /// Solver-reported termination message.
  pub message: String,
}

/// A solved portfolio together with its annualized performance.
#[derive(Clone, Debug)]
pub struct PortfolioSolution {
  /// Final weights, in asset-universe order.
  pub weights: Array1<f64>,
  /// Annualized performance at those weights.
  pub performance: PortfolioPerformance,
  /// Whether the underlying solve converged.
  pub converged: bool,
  /// Solver-reported termination message.
  pub message: String,
}

/// One point on the efficient frontier.
#[derive(Clone, Copy, Debug)]
pub struct FrontierPoint {
  /// Annualized target return fixed for this solve.
  pub target_return: f64,
  /// Minimal annualized volatility achieved at the target.
  pub volatility: f64,
  /// Whether the per-target solve converged.
  pub converged: bool,
}

/// Efficient frontier in ascending target-return (grid) order.
#[derive(Clone, Debug, Default)]
pub struct EfficientFrontier {
  /// Frontier points, one per grid target, never re-sorted.
  pub points: Vec<FrontierPoint>,
}

/// Full frontier analysis: the two anchor portfolios plus the traced curve.
#[derive(Clone, Debug)]
pub struct FrontierAnalysis {
  /// Maximum Sharpe ratio portfolio.
  pub max_sharpe: PortfolioSolution,
  /// Minimum volatility portfolio.
  pub min_volatility: PortfolioSolution,
  /// Traced efficient frontier.
  pub frontier: EfficientFrontier,
}

#[cfg(test)]
mod tests {
  use ndarray::arr1;
  use ndarray::arr2;

  use super::*;

  #[test]
  fn universe_preserves_order() {
    let universe = AssetUniverse::new(["AAPL", "GOOG", "NVDA"]).unwrap();

    assert_eq!(universe.len(), 3);
    assert_eq!(universe.position("GOOG"), Some(1));
    assert_eq!(universe.symbols()[2], "NVDA");
  }

  #[test]
  fn universe_rejects_duplicates() {
    let err = AssetUniverse::new(["AAPL", "GOOG", "AAPL"]).unwrap_err();
    assert_eq!(err, PortfolioError::DuplicateAsset("AAPL".to_string()));
  }

  #[test]
  fn universe_rejects_empty() {
    let err = AssetUniverse::new(Vec::<String>::new()).unwrap_err();
    assert_eq!(err, PortfolioError::EmptyUniverse);
  }

  #[test]
  fn statistics_reject_non_square_covariance() {
    let err = Statistics::new(arr1(&[0.001, 0.002]), arr2(&[[0.1, 0.0]])).unwrap_err();
    assert!(matches!(err, PortfolioError::ShapeMismatch { .. }));
  }

  #[test]
  fn statistics_reject_mean_covariance_mismatch() {
    let err = Statistics::new(arr1(&[0.001]), arr2(&[[0.1, 0.0], [0.0, 0.2]])).unwrap_err();
    assert!(matches!(
      err,
      PortfolioError::ShapeMismatch {
        context: "mean vector vs covariance dimension",
        ..
      }
    ));
  }

  #[test]
  fn config_defaults_match_long_only_daily_convention() {
    let config = PortfolioConfig::default();

    assert_eq!(config.risk_free_rate, 0.0);
    assert_eq!(config.weight_bounds, (0.0, 1.0));
    assert_eq!(config.frontier_grid_size, 20);
    assert_eq!(config.periods_per_year, 252.0);
  }
}
