//! Datasets
//!
//! This module implements the dataset struct and various helper traits to extend its
//! functionality.
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, NdFloat};
use num_traits::{AsPrimitive, FromPrimitive, NumAssignOps, NumCast, Signed};

use std::fmt;
use std::iter::Sum;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

mod impl_dataset;
mod impl_records;
mod impl_targets;

/// Floating point numbers
///
/// This trait bound multiplexes to the most common assumption of floating point number and
/// implement them for 32bit and 64bit floating points. They are used in records of a dataset and,
/// for regression task, in the targets as well.
pub trait Float:
    NdFloat
    + FromPrimitive
    + num_traits::Float
    + PartialOrd
    + Sync
    + Send
    + Default
    + fmt::Display
    + fmt::Debug
    + Signed
    + Sum
    + NumAssignOps
    + AsPrimitive<usize>
    + num_traits::MulAdd<Output = Self>
    + approx::AbsDiffEq<Epsilon = Self>
{
    fn cast<T: NumCast>(x: T) -> Self {
        NumCast::from(x).unwrap()
    }
}

impl Float for f32 {}

impl Float for f64 {}

/// DatasetBase
///
/// This is the fundamental structure of a dataset. It contains a number of records about the data
/// and may contain targets and feature names. In order to keep the type complexity low the
/// dataset base is only generic over the records and targets and introduces a trait bound on the
/// records. `feature_names` are always assumed to be owned and copied when views are created.
///
/// # Fields
///
/// * `records`: a two-dimensional matrix with dimensionality (nsamples, nfeatures). Records never
/// contain the intercept column, models add it themselves
/// * `targets`: a one-dimensional array with dimensionality (nsamples)
/// * `feature_names`: optional descriptive feature names with dimensionality (nfeatures)
///
/// # Trait bounds
///
/// * `R: Records`: generic over owned matrices and views
/// * `T`: generic over any `ndarray` vector which can be used as targets. The `AsSingleTargets`
/// trait bound is omitted here to avoid some repetition in implementation
/// `src/dataset/impl_dataset.rs`
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetBase<R, T>
where
    R: Records,
{
    pub records: R,
    pub targets: T,

    feature_names: Vec<String>,
}

/// Dataset
///
/// The most commonly used typed of dataset. It contains a number of records stored as an `Array2`
/// and a single continuous target per record stored as an `Array1`.
pub type Dataset<F> = DatasetBase<Array2<F>, Array1<F>>;

/// DatasetView
///
/// A read only view of a Dataset
pub type DatasetView<'a, F> = DatasetBase<ArrayView2<'a, F>, ArrayView1<'a, F>>;

/// Record trait
pub trait Records: Sized {
    type Elem;

    fn nsamples(&self) -> usize;
    fn nfeatures(&self) -> usize;
}

/// Return a view on a single target variable
pub trait AsSingleTargets {
    type Elem;

    /// Returns a view on targets as one-dimensional array
    fn as_single_targets(&self) -> ArrayView1<'_, Self::Elem>;
}
