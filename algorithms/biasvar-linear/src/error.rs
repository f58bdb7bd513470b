//! An error when fitting or scoring a regularized linear model
use crate::float::Float;
use thiserror::Error;

pub type Result<T, F> = std::result::Result<T, LinearError<F>>;

/// An error when fitting or scoring a regularized linear model
#[derive(Error, Debug)]
pub enum LinearError<F: Float> {
    /// Errors encountered when using argmin's solver
    #[error("argmin {0}")]
    Argmin(#[from] argmin::core::Error),
    #[error(transparent)]
    BaseCrate(#[from] biasvar::Error),
    #[error("At least one sample needed")]
    NotEnoughSamples,
    #[error("Design matrix has {0} rows but there are {1} targets")]
    MismatchedShapes(usize, usize),
    #[error("Design matrix has {0} columns but {1} parameters were given")]
    MismatchedParams(usize, usize),
    #[error("Penalty should be positive and finite, but is {0}")]
    InvalidPenalty(F),
    #[error("At least one solver iteration is needed")]
    InvalidMaxIterations,
    #[error("Gradient tolerance should be positive and finite, but is {0}")]
    InvalidGradientTolerance(F),
    #[error("Expected {0} initial parameters, got {1}")]
    InvalidInitialParams(usize, usize),
    #[error("At least one penalty candidate needed")]
    EmptyPenaltyGrid,
    #[error("The solver did not produce any parameters")]
    NoSolution,
}
