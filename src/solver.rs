//! # Constrained Solver Adapter
//!
//! $$
//! \min_{\mathbf{w}} \ \mathcal{L}(\mathbf{w})
//! \quad \text{s.t.} \quad \mathbf{1}^\top \mathbf{w} = 1,\ \
//! l \le w_i \le u
//! $$
//!
//! One parametrized constrained minimization shared by the max-Sharpe,
//! minimum-variance and per-target frontier solves. Iterates stay feasible by
//! projecting every candidate onto the full-investment box before evaluation;
//! the optional return-target equality is enforced with a quadratic penalty.

use argmin::core::CostFunction;
use argmin::core::Executor;
use argmin::core::TerminationReason;
use argmin::core::TerminationStatus;
use argmin::solver::neldermead::NelderMead;
use ndarray::Array1;
use tracing::debug;

use crate::error::PortfolioError;
use crate::objective::annual_volatility;
use crate::objective::negative_sharpe;
use crate::types::OptimizationResult;
use crate::types::PortfolioConfig;
use crate::types::Statistics;

const SD_TOLERANCE: f64 = 1e-10;
const MAX_ITERS: u64 = 10_000;
const RETURN_TARGET_PENALTY: f64 = 1e4;

/// Check that `sum(w) = 1` is reachable inside the box bounds.
pub(crate) fn check_bounds(
  n_assets: usize,
  (lower, upper): (f64, f64),
) -> Result<(), PortfolioError> {
  let feasible = lower <= upper
    && n_assets as f64 * lower <= 1.0 + 1e-9
    && n_assets as f64 * upper >= 1.0 - 1e-9;

  if feasible {
    Ok(())
  } else {
    Err(PortfolioError::InfeasibleBounds {
      lower,
      upper,
      assets: n_assets,
    })
  }
}

/// Project weights onto `{ sum(w) = 1, lower <= w_i <= upper }`.
///
/// Clamps into the box, then redistributes the deficit (or excess)
/// proportionally to each asset's remaining headroom (or removable slack).
/// Feasible bounds guarantee the redistribution fits in a single pass.
pub(crate) fn project_onto_constraints(weights: &mut [f64], (lower, upper): (f64, f64)) {
  for w in weights.iter_mut() {
    *w = w.max(lower).min(upper);
  }

  let sum: f64 = weights.iter().sum();
  if (sum - 1.0).abs() < 1e-12 {
    return;
  }

  if sum < 1.0 {
    let deficit = 1.0 - sum;
    let headroom: Vec<f64> = weights.iter().map(|w| upper - w).collect();
    let total: f64 = headroom.iter().sum();
    if total > 1e-12 {
      for (w, room) in weights.iter_mut().zip(&headroom) {
        *w += deficit * room / total;
      }
    }
  } else {
    let excess = sum - 1.0;
    let slack: Vec<f64> = weights.iter().map(|w| w - lower).collect();
    let total: f64 = slack.iter().sum();
    if total > 1e-12 {
      for (w, s) in weights.iter_mut().zip(&slack) {
        *w -= excess * s / total;
      }
    }
  }
}

struct ReturnTarget<'a> {
  mean_returns: &'a Array1<f64>,
  periods_per_year: f64,
  target: f64,
}

struct ConstrainedCost<'a, F> {
  objective: &'a F,
  bounds: (f64, f64),
  return_target: Option<ReturnTarget<'a>>,
}

impl<F> CostFunction for ConstrainedCost<'_, F>
where
  F: Fn(&Array1<f64>) -> f64,
{
  type Param = Vec<f64>;
  type Output = f64;

  fn cost(&self, x: &Self::Param) -> Result<Self::Output, argmin::core::Error> {
    let mut projected = x.clone();
    project_onto_constraints(&mut projected, self.bounds);
    let w = Array1::from_vec(projected);

    let mut value = (self.objective)(&w);
    if let Some(pin) = &self.return_target {
      let annual_return = pin.periods_per_year * pin.mean_returns.dot(&w);
      value += RETURN_TARGET_PENALTY * (annual_return - pin.target).powi(2);
    }

    Ok(value)
  }
}

/// Minimize an objective over fully invested, box-bounded weight vectors.
///
/// The starting point is always the equal-weight vector. One deterministic
/// attempt per call: a non-converged run is still returned with
/// `success = false` and the solver's last iterate, never retried. When
/// `return_target` is set, the annualized portfolio return is additionally
/// pinned to the target.
pub fn minimize<F>(
  objective: F,
  stats: &Statistics,
  config: &PortfolioConfig,
  return_target: Option<f64>,
) -> Result<OptimizationResult, PortfolioError>
where
  F: Fn(&Array1<f64>) -> f64,
{
  let n = stats.num_assets();
  if n == 0 {
    return Err(PortfolioError::EmptyUniverse);
  }
  check_bounds(n, config.weight_bounds)?;

  let x0 = vec![1.0 / n as f64; n];
  let mut simplex = Vec::with_capacity(n + 1);
  simplex.push(x0.clone());
  for i in 0..n {
    let mut point = x0.clone();
    point[i] += 1.0;
    simplex.push(point);
  }

  let cost = ConstrainedCost {
    objective: &objective,
    bounds: config.weight_bounds,
    return_target: return_target.map(|target| ReturnTarget {
      mean_returns: stats.mean_returns(),
      periods_per_year: config.periods_per_year,
      target,
    }),
  };

  let run = NelderMead::new(simplex)
    .with_sd_tolerance(SD_TOLERANCE)
    .and_then(|solver| {
      Executor::new(cost, solver)
        .configure(|state| state.max_iters(MAX_ITERS))
        .run()
    });

  let result = match run {
    Ok(res) => {
      let mut raw = res.state.best_param.clone().unwrap_or(x0);
      project_onto_constraints(&mut raw, config.weight_bounds);
      let weights = Array1::from_vec(raw);
      let objective_value = objective(&weights);

      let (converged, message) = match &res.state.termination_status {
        TerminationStatus::Terminated(reason) => match reason {
          TerminationReason::SolverConverged | TerminationReason::TargetCostReached => {
            (true, reason.to_string())
          }
          other => (false, other.to_string()),
        },
        TerminationStatus::NotTerminated => (false, "solver did not terminate".to_string()),
      };

      debug!(
        iterations = res.state.iter,
        objective = objective_value,
        converged,
        "constrained minimization finished"
      );

      OptimizationResult {
        weights,
        objective: objective_value,
        success: converged && objective_value.is_finite(),
        message,
      }
    }
    Err(err) => {
      let mut raw = x0;
      project_onto_constraints(&mut raw, config.weight_bounds);

      OptimizationResult {
        weights: Array1::from_vec(raw),
        objective: f64::NAN,
        success: false,
        message: err.to_string(),
      }
    }
  };

  Ok(result)
}

/// Maximize the Sharpe ratio by minimizing its negative.
pub fn max_sharpe_ratio(
  stats: &Statistics,
  config: &PortfolioConfig,
) -> Result<OptimizationResult, PortfolioError> {
  let risk_free_rate = config.risk_free_rate;
  let periods_per_year = config.periods_per_year;

  minimize(
    |w| negative_sharpe(w, stats, risk_free_rate, periods_per_year),
    stats,
    config,
    None,
  )
}

/// Find the minimum-volatility fully invested portfolio.
pub fn minimize_variance(
  stats: &Statistics,
  config: &PortfolioConfig,
) -> Result<OptimizationResult, PortfolioError> {
  let periods_per_year = config.periods_per_year;

  minimize(
    |w| annual_volatility(w, stats, periods_per_year),
    stats,
    config,
    None,
  )
}

/// Minimize volatility with the annualized portfolio return pinned to a target.
pub fn efficient_return(
  stats: &Statistics,
  config: &PortfolioConfig,
  target_return: f64,
) -> Result<OptimizationResult, PortfolioError> {
  let periods_per_year = config.periods_per_year;

  minimize(
    |w| annual_volatility(w, stats, periods_per_year),
    stats,
    config,
    Some(target_return),
  )
}

#[cfg(test)]
mod tests {
  use approx::assert_abs_diff_eq;
  use ndarray::arr1;
  use ndarray::arr2;

  use super::*;
  use crate::performance::portfolio_performance;

  fn three_asset_stats() -> Statistics {
    Statistics::new(
      arr1(&[0.001, 0.0008, 0.0012]),
      arr2(&[
        [0.0004, 0.0, 0.0],
        [0.0, 0.0001, 0.0],
        [0.0, 0.0, 0.0009],
      ]),
    )
    .unwrap()
  }

  fn assert_feasible(weights: &Array1<f64>, (lower, upper): (f64, f64)) {
    let sum: f64 = weights.iter().sum();
    assert_abs_diff_eq!(sum, 1.0, epsilon = 1e-6);
    for &w in weights.iter() {
      assert!(w >= lower - 1e-9 && w <= upper + 1e-9, "weight {w} out of bounds");
    }
  }

  #[test]
  fn projection_restores_full_investment() {
    let mut w = vec![0.2, 0.2, 0.2];
    project_onto_constraints(&mut w, (0.0, 1.0));

    assert_abs_diff_eq!(w.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
    assert!(w.iter().all(|&v| (0.0..=1.0).contains(&v)));
  }

  #[test]
  fn projection_respects_tight_upper_bound() {
    let mut w = vec![0.9, 0.05, 0.05];
    project_onto_constraints(&mut w, (0.0, 0.5));

    assert_abs_diff_eq!(w.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
    assert!(w.iter().all(|&v| v <= 0.5 + 1e-12));
  }

  #[test]
  fn infeasible_bounds_are_rejected_before_solving() {
    let stats = three_asset_stats();
    let config = PortfolioConfig {
      weight_bounds: (0.0, 0.2),
      ..PortfolioConfig::default()
    };

    let err = minimize_variance(&stats, &config).unwrap_err();
    assert!(matches!(err, PortfolioError::InfeasibleBounds { .. }));
  }

  #[test]
  fn min_variance_favors_lowest_variance_asset() {
    let stats = three_asset_stats();
    let config = PortfolioConfig::default();

    let result = minimize_variance(&stats, &config).unwrap();

    assert!(result.success, "solver did not converge: {}", result.message);
    assert_feasible(&result.weights, config.weight_bounds);
    // Closed form for a diagonal covariance: w_i proportional to 1/var_i.
    assert_abs_diff_eq!(result.weights[0], 0.1837, epsilon = 0.02);
    assert_abs_diff_eq!(result.weights[1], 0.7347, epsilon = 0.02);
    assert_abs_diff_eq!(result.weights[2], 0.0816, epsilon = 0.02);
  }

  #[test]
  fn max_sharpe_favors_best_return_to_risk() {
    let stats = three_asset_stats();
    let config = PortfolioConfig::default();

    let result = max_sharpe_ratio(&stats, &config).unwrap();

    assert!(result.success, "solver did not converge: {}", result.message);
    assert_feasible(&result.weights, config.weight_bounds);
    // Tangency portfolio for a diagonal covariance: w_i proportional to mu_i/var_i.
    assert_abs_diff_eq!(result.weights[0], 0.2113, epsilon = 0.02);
    assert_abs_diff_eq!(result.weights[1], 0.6761, epsilon = 0.02);
    assert_abs_diff_eq!(result.weights[2], 0.1127, epsilon = 0.02);
  }

  #[test]
  fn single_asset_allocates_everything() {
    let stats = Statistics::new(arr1(&[0.001]), arr2(&[[0.0004]])).unwrap();
    let config = PortfolioConfig::default();

    let max_sharpe = max_sharpe_ratio(&stats, &config).unwrap();
    let min_vol = minimize_variance(&stats, &config).unwrap();

    assert_abs_diff_eq!(max_sharpe.weights[0], 1.0, epsilon = 1e-9);
    assert_abs_diff_eq!(min_vol.weights[0], 1.0, epsilon = 1e-9);
  }

  #[test]
  fn negative_correlation_beats_individual_volatility() {
    let stats = Statistics::new(
      arr1(&[0.001, 0.001]),
      arr2(&[[0.0004, -0.0004], [-0.0004, 0.0004]]),
    )
    .unwrap();
    let config = PortfolioConfig::default();

    let result = minimize_variance(&stats, &config).unwrap();
    let perf = portfolio_performance(&result.weights, &stats, 252.0);

    let single_asset_vol = (252.0_f64 * 0.0004).sqrt();
    assert!(perf.annual_volatility < single_asset_vol);
  }

  #[test]
  fn return_target_is_honored() {
    let stats = three_asset_stats();
    let config = PortfolioConfig::default();

    let min_vol = minimize_variance(&stats, &config).unwrap();
    let max_sharpe = max_sharpe_ratio(&stats, &config).unwrap();
    let low = portfolio_performance(&min_vol.weights, &stats, 252.0).annual_return;
    let high = portfolio_performance(&max_sharpe.weights, &stats, 252.0).annual_return;
    let target = 0.5 * (low + high);

    let result = efficient_return(&stats, &config, target).unwrap();
    let achieved = portfolio_performance(&result.weights, &stats, 252.0).annual_return;

    assert_feasible(&result.weights, config.weight_bounds);
    assert_abs_diff_eq!(achieved, target, epsilon = 1e-3);
  }

  #[test]
  fn solves_are_reproducible() {
    let stats = three_asset_stats();
    let config = PortfolioConfig::default();

    let first = minimize_variance(&stats, &config).unwrap();
    let second = minimize_variance(&stats, &config).unwrap();

    assert_eq!(first.weights, second.weights);
    assert_eq!(first.objective, second.objective);
  }
}
