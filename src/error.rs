//! Error types in biasvar
//!

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Not enough samples")]
    NotEnoughSamples,
    #[error("Expected records and targets to have the same number of rows, got {0} != {1}")]
    MismatchedShapes(usize, usize),
}
