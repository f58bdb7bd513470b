//! `biasvar` is a small toolkit for fitting regularized regression models and diagnosing
//! them with learning and validation curves.
//!
//! ## The Big Picture
//!
//! This crate holds the shared vocabulary (floats, datasets, hyperparameter checking, the
//! `Fit`/`Predict`/`Transformer` traits and regression metrics), while the algorithms live in
//! their own crates:
//!
//! * `biasvar-linear`: regularized linear regression fitted with `argmin`, learning curves and
//! regularization sweeps
//! * `biasvar-preprocessing`: polynomial feature expansion and standard normalization
//! * `biasvar-datasets`: the bundled water-level dataset
//!
//! ## Example
//!
//! There is a walk through the whole bias/variance workflow in
//! `algorithms/biasvar-linear/examples/`. To run it, use:
//!
//! ```bash
//! $ RUST_LOG=info cargo run -p biasvar-linear --example water_level
//! ```

pub mod dataset;
pub mod error;
mod metrics_regression;
mod param_guard;
pub mod prelude;
pub mod traits;

pub use dataset::{Dataset, DatasetBase, DatasetView, Float};
pub use error::Error;
pub use param_guard::ParamGuard;

/// Common metrics functions for regression
pub mod metrics {
    pub use crate::metrics_regression::Regression;
}
