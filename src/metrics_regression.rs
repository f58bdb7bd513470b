//! Common metrics for regression
//!
//! This module implements common comparison metrices for continuous variables.

use ndarray::{ArrayBase, Data, Ix1};

use crate::error::{Error, Result};
use crate::Float;

/// Regression metrices trait
pub trait Regression<F, C> {
    /// Mean squared error between two continuous variables
    fn mean_squared_error(&self, compare_to: C) -> Result<F>;
    /// R squared coefficient, is the proportion of the variance in the dependent variable that is
    /// predictable from the independent variable.
    ///
    /// To evaluate the accuracy of a prediction, use
    /// ```ignore
    /// prediction.r2(&ground_truth)
    /// ```
    fn r2(&self, compare_to: C) -> Result<F>;
}

impl<'a, F: Float, D: Data<Elem = F>, D2: Data<Elem = F>> Regression<F, &'a ArrayBase<D2, Ix1>>
    for ArrayBase<D, Ix1>
{
    fn mean_squared_error(&self, compare_to: &'a ArrayBase<D2, Ix1>) -> Result<F> {
        check_lengths(self, compare_to)?;

        (self - compare_to)
            .mapv(|x| x * x)
            .mean()
            .ok_or(Error::NotEnoughSamples)
    }

    // r2 = 1 - sum((pred_i - y_i)^2)/sum((mean_y - y_i)^2)
    // if the mean is of `compare_to`, then the denominator
    // should compare `compare_to` and the mean, and not self and the mean
    fn r2(&self, compare_to: &'a ArrayBase<D2, Ix1>) -> Result<F> {
        check_lengths(self, compare_to)?;

        let mean = compare_to.mean().ok_or(Error::NotEnoughSamples)?;

        Ok(F::one()
            - (self - compare_to).mapv(|x| x * x).sum()
                / (compare_to.mapv(|x| (x - mean) * (x - mean)).sum() + F::cast(1e-10)))
    }
}

fn check_lengths<F, D: Data<Elem = F>, D2: Data<Elem = F>>(
    a: &ArrayBase<D, Ix1>,
    b: &ArrayBase<D2, Ix1>,
) -> Result<()> {
    if a.len() != b.len() {
        return Err(Error::MismatchedShapes(a.len(), b.len()));
    }
    if a.is_empty() {
        return Err(Error::NotEnoughSamples);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::Regression;
    use crate::Error;
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Array1};

    #[test]
    fn test_same() {
        let a: Array1<f32> = Array1::ones(100);

        assert_abs_diff_eq!(a.mean_squared_error(&a).unwrap(), 0.0f32);
        assert_abs_diff_eq!(a.r2(&a).unwrap(), 1.0f32);
    }

    #[test]
    fn test_mean_squared_error() {
        let a = array![0.0, 0.1, 0.2, 0.3, 0.4];
        let b = array![0.1, 0.2, 0.3, 0.4, 0.5];

        assert_abs_diff_eq!(a.mean_squared_error(&b).unwrap(), 0.01, epsilon = 1e-5);
    }

    #[test]
    fn test_r2() {
        let a = array![0.0, 0.1, 0.2, 0.3, 0.4];
        let b = array![0.1, 0.2, 0.3, 0.4, 0.5];

        // 1 - 0.05 / 0.1
        assert_abs_diff_eq!(a.r2(&b).unwrap(), 0.5, epsilon = 1e-5);
    }

    #[test]
    fn test_mismatched_lengths() {
        let a = array![0.0, 0.1];
        let b = array![0.1, 0.2, 0.3];

        assert_eq!(a.mean_squared_error(&b), Err(Error::MismatchedShapes(2, 3)));
    }
}
