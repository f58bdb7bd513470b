//! Error definitions for preprocessing
use thiserror::Error;
pub type Result<T> = std::result::Result<T, PreprocessingError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PreprocessingError {
    #[error("not enough samples")]
    NotEnoughSamples,
    #[error("feature {0} has zero variance and cannot be normalized")]
    ZeroVariance(usize),
    #[error("polynomial degree must be at least 1, got {0}")]
    InvalidDegree(usize),
    #[error("delta degrees of freedom must be positive and finite, got {0}")]
    InvalidDdof(f32),
    #[error("expected {0} features, got {1}")]
    MismatchedFeatures(usize, usize),
    #[error(transparent)]
    BaseCrate(#[from] biasvar::Error),
}
