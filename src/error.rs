//! # Errors
//!
//! Typed failure taxonomy for portfolio construction.
//!
//! Shape and feasibility problems are fatal and reported before any solver
//! call. Numeric faults (negative radicand, zero volatility) propagate as NaN
//! and are tagged on the optimization result instead of being raised here.

use thiserror::Error;

/// Errors produced while validating inputs or preparing a solve.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PortfolioError {
  /// The asset universe contains no assets.
  #[error("asset universe is empty")]
  EmptyUniverse,

  /// The same identifier appears twice in the asset universe.
  #[error("duplicate asset identifier `{0}`")]
  DuplicateAsset(String),

  /// Vector/matrix dimensions disagree.
  #[error("dimension mismatch in {context}: expected {expected}, got {actual}")]
  ShapeMismatch {
    context: &'static str,
    expected: usize,
    actual: usize,
  },

  /// The box bounds cannot contain a fully invested portfolio.
  #[error("weight bounds [{lower}, {upper}] cannot sum to 1 over {assets} assets")]
  InfeasibleBounds {
    lower: f64,
    upper: f64,
    assets: usize,
  },

  /// Too few observations to estimate statistics.
  #[error("return series too short: need at least {required} observations, got {actual}")]
  ShortSeries { required: usize, actual: usize },
}
