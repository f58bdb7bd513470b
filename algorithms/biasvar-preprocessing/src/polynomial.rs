//! Polynomial feature expansion
//!
//! Maps every feature `x` to the basis `x, x^2, ..., x^p`. The intercept column is not part of
//! the expansion, linear models add it themselves.

use crate::error::{PreprocessingError, Result};
use biasvar::dataset::DatasetBase;
use biasvar::traits::Transformer;
use biasvar::{Float, ParamGuard};
use ndarray::{Array2, ArrayBase, Data, Ix2};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// Expands every column of `x` into `degree` consecutive columns holding its powers
///
/// Column `j * degree + (k - 1)` of the output is column `j` of the input raised to the power `k`,
/// for `k` in `1..=degree`. For `degree = 1` the output equals the input.
pub fn map_polynomial<F: Float, D: Data<Elem = F>>(
    x: &ArrayBase<D, Ix2>,
    degree: usize,
) -> Array2<F> {
    let mut mapped = Array2::zeros((x.nrows(), x.ncols() * degree));

    for (j, column) in x.columns().into_iter().enumerate() {
        let mut power = column.to_owned();
        for k in 0..degree {
            mapped.column_mut(j * degree + k).assign(&power);
            power *= &column;
        }
    }

    mapped
}

/// A verified polynomial expansion
///
/// See [`PolynomialFeatures`] for more information.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PolynomialFeaturesValidParams {
    degree: usize,
}

impl PolynomialFeaturesValidParams {
    pub fn degree(&self) -> usize {
        self.degree
    }
}

/// Polynomial feature expansion of a given maximal degree
///
/// ### Example
///
/// ```rust
/// use biasvar::traits::Transformer;
/// use biasvar_preprocessing::PolynomialFeatures;
/// use ndarray::{array, Array2};
///
/// let x = array![[2.], [-3.]];
/// let mapped: Array2<f64> = PolynomialFeatures::new(3).transform(&x).unwrap();
/// assert_eq!(mapped, array![[2., 4., 8.], [-3., 9., -27.]]);
/// ```
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PolynomialFeatures(PolynomialFeaturesValidParams);

impl PolynomialFeatures {
    /// Expansion up to `degree`, which has to be at least one
    pub fn new(degree: usize) -> Self {
        PolynomialFeatures(PolynomialFeaturesValidParams { degree })
    }
}

impl ParamGuard for PolynomialFeatures {
    type Checked = PolynomialFeaturesValidParams;
    type Error = PreprocessingError;

    fn check_ref(&self) -> Result<&Self::Checked> {
        if self.0.degree == 0 {
            Err(PreprocessingError::InvalidDegree(self.0.degree))
        } else {
            Ok(&self.0)
        }
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}

impl<'a, F: Float, D: Data<Elem = F>> Transformer<&'a ArrayBase<D, Ix2>, Array2<F>>
    for PolynomialFeaturesValidParams
{
    fn transform(&self, x: &'a ArrayBase<D, Ix2>) -> Array2<F> {
        map_polynomial(x, self.degree)
    }
}

impl<F: Float, D: Data<Elem = F>, T>
    Transformer<DatasetBase<ArrayBase<D, Ix2>, T>, DatasetBase<Array2<F>, T>>
    for PolynomialFeaturesValidParams
{
    /// Substitutes the records of the dataset with their polynomial expansion
    fn transform(&self, x: DatasetBase<ArrayBase<D, Ix2>, T>) -> DatasetBase<Array2<F>, T> {
        let mapped = map_polynomial(x.records(), self.degree);
        x.with_records(mapped)
    }
}
