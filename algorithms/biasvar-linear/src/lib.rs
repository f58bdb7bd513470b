//!
//! `biasvar-linear` fits linear models by minimizing a regularized least squares cost and uses
//! them to diagnose bias and variance.
//!
//! ## The Big Picture
//!
//! `biasvar-linear` is a crate in the `biasvar` workspace, a toolkit for fitting regularized
//! regression models and diagnosing their bias and variance.
//!
//! ## Current state
//!
//! `biasvar-linear` currently provides:
//! - The regularized least squares cost and its gradient
//! - Regularized linear regression, solved with L-BFGS from `argmin`
//! - Learning curves over growing training set prefixes
//! - A sweep over the regularization strength with selection on a validation set
//!
//! ## Examples
//!
//! The whole analysis of the water level dataset lives in the `examples/` directory. To run, use:
//!
//! ```bash
//! $ RUST_LOG=debug cargo run --example water_level
//! ```

mod algorithm;
mod argmin_param;
mod cost;
mod error;
mod float;
mod hyperparams;
mod learning_curve;
mod validation;

pub use algorithm::*;
pub use cost::{add_intercept, cost_and_gradient, regularized_cost, regularized_gradient};
pub use error::*;
pub use float::Float;
pub use hyperparams::*;
pub use learning_curve::*;
pub use validation::*;
