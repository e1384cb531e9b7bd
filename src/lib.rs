//! # markowitz-rs
//!
//! $$
//! \mathbf{w}^\* = \arg\max_{\mathbf{w}} \frac{\mathbb{E}[R_p] - r_f}{\sigma_p}
//! \quad \text{s.t.} \quad \mathbf{1}^\top \mathbf{w} = 1
//! $$
//!
//! Single-period mean-variance portfolio optimization: annualized performance
//! evaluation, max-Sharpe and minimum-volatility allocation under box bounds
//! and full investment, efficient-frontier tracing over a target-return grid,
//! and percent-rounded reporting for presentation layers. The crate consumes
//! a mean-return vector and covariance matrix supplied by the caller and
//! performs no I/O.

pub mod error;
pub mod frontier;
pub mod objective;
pub mod performance;
pub mod report;
pub mod solver;
pub mod stats;
pub mod types;

pub use error::PortfolioError;
pub use frontier::efficient_frontier;
pub use objective::annual_volatility;
pub use objective::negative_sharpe;
pub use performance::portfolio_performance;
pub use report::AllocationReport;
pub use report::AssetAllocation;
pub use report::FrontierPointReport;
pub use report::PortfolioReport;
pub use report::build_report;
pub use solver::efficient_return;
pub use solver::max_sharpe_ratio;
pub use solver::minimize;
pub use solver::minimize_variance;
pub use stats::align_return_series;
pub use stats::log_returns_series;
pub use stats::simple_returns_series;
pub use stats::statistics_from_returns;
pub use types::AssetUniverse;
pub use types::EfficientFrontier;
pub use types::FrontierAnalysis;
pub use types::FrontierPoint;
pub use types::OptimizationResult;
pub use types::PortfolioConfig;
pub use types::PortfolioPerformance;
pub use types::PortfolioSolution;
pub use types::Statistics;
