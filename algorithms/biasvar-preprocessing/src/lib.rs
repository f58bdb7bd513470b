//! # Preprocessing
//! ## The Big Picture
//!
//! `biasvar-preprocessing` is a crate in the `biasvar` workspace, a toolkit for fitting
//! regularized regression models and diagnosing their bias and variance.
//!
//! ## Current state
//! `biasvar-preprocessing` provides a pure Rust implementation of:
//! * Polynomial feature expansion: `PolynomialFeatures`
//! * Standard scaling with statistics learned from training data: `LinearScaler`
//! * The composition of both, fitted on training records: `PolynomialPipeline`
//!
//! Constant features cannot be standardized and are reported as
//! [`PreprocessingError::ZeroVariance`] instead of producing non-finite values.

pub mod error;
pub mod linear_scaling;
mod pipeline;
mod polynomial;

pub use error::{PreprocessingError, Result};
pub use linear_scaling::{normalize, FittedLinearScaler, LinearScaler};
pub use pipeline::{PolynomialPipeline, PolynomialPipelineParams, PolynomialPipelineValidParams};
pub use polynomial::{map_polynomial, PolynomialFeatures, PolynomialFeaturesValidParams};
