//! Selection of the regularization strength on a validation set

use crate::error::{LinearError, Result};
use crate::float::Float;
use crate::hyperparams::{RegularizedLinearRegressionParams, RegularizedLinearRegressionValidParams};
use biasvar::dataset::{AsSingleTargets, DatasetBase};
use biasvar::traits::Fit;
use biasvar::ParamGuard;
use log::{debug, info};
use ndarray::{Array1, ArrayBase, Data, Ix2};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// Penalty candidates tried when no other grid is given
pub const DEFAULT_LAMBDAS: [f64; 10] = [0., 0.001, 0.003, 0.01, 0.03, 0.1, 0.3, 1., 3., 10.];

/// [`DEFAULT_LAMBDAS`] in the float type of the model
pub fn default_lambdas<F: Float>() -> Vec<F> {
    DEFAULT_LAMBDAS.iter().map(|&lambda| F::cast(lambda)).collect()
}

/// Training and validation error per penalty candidate
///
/// Both errors are computed with `λ = 0`, the candidate only enters the fit.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationCurve<F> {
    pub lambdas: Array1<F>,
    pub train_errors: Array1<F>,
    pub validation_errors: Array1<F>,
    best: usize,
    params: RegularizedLinearRegressionValidParams<F>,
}

/// Errors of the selected model on the test set
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TestEvaluation<F> {
    /// The penalty the model was fitted with
    pub lambda: F,
    /// Unregularized cost on the test set
    pub test_error: F,
    /// Cost on the test set including the penalty of the fitted parameters
    pub regularized_test_error: F,
}

impl<F: Float> ValidationCurve<F> {
    /// Position of the selected candidate in [`lambdas`](Self::lambdas)
    pub fn best_index(&self) -> usize {
        self.best
    }

    /// The candidate with the smallest validation error
    pub fn best_lambda(&self) -> F {
        self.lambdas[self.best]
    }

    pub fn best_validation_error(&self) -> F {
        self.validation_errors[self.best]
    }

    /// Iterates over `(λ, train error, validation error)`
    pub fn iter(&self) -> impl Iterator<Item = (F, F, F)> + '_ {
        self.lambdas
            .iter()
            .zip(self.train_errors.iter())
            .zip(self.validation_errors.iter())
            .map(|((&lambda, &train), &valid)| (lambda, train, valid))
    }

    /// Refits with the selected penalty on the training set and scores once on the test set
    pub fn evaluate<D1, T1, D2, T2>(
        &self,
        train: &DatasetBase<ArrayBase<D1, Ix2>, T1>,
        test: &DatasetBase<ArrayBase<D2, Ix2>, T2>,
    ) -> Result<TestEvaluation<F>, F>
    where
        D1: Data<Elem = F>,
        T1: AsSingleTargets<Elem = F>,
        D2: Data<Elem = F>,
        T2: AsSingleTargets<Elem = F>,
    {
        let lambda = self.best_lambda();
        let model = self.params.with_lambda(lambda)?.fit(train)?;

        Ok(TestEvaluation {
            lambda,
            test_error: model.cost(test, F::zero())?,
            regularized_test_error: model.cost(test, lambda)?,
        })
    }
}

/// Index of the first minimum, ignoring NaN
fn first_minimum<F: Float>(errors: &Array1<F>) -> Option<usize> {
    errors
        .iter()
        .enumerate()
        .filter(|(_, err)| !err.is_nan())
        .fold(None, |best: Option<(usize, F)>, (idx, &err)| match best {
            Some((_, min)) if min <= err => best,
            _ => Some((idx, err)),
        })
        .map(|(idx, _)| idx)
}

impl<F: Float> RegularizedLinearRegressionValidParams<F> {
    /// Fits one model per penalty candidate on the full training set and scores it on both sets
    ///
    /// The candidate with the smallest validation error is selected, the first one on ties. All
    /// other hyper-parameters are taken from `self`.
    pub fn validation_curve<D1, T1, D2, T2>(
        &self,
        lambdas: &[F],
        train: &DatasetBase<ArrayBase<D1, Ix2>, T1>,
        valid: &DatasetBase<ArrayBase<D2, Ix2>, T2>,
    ) -> Result<ValidationCurve<F>, F>
    where
        D1: Data<Elem = F>,
        T1: AsSingleTargets<Elem = F>,
        D2: Data<Elem = F>,
        T2: AsSingleTargets<Elem = F>,
    {
        if lambdas.is_empty() {
            return Err(LinearError::EmptyPenaltyGrid);
        }

        let candidates = lambdas
            .iter()
            .map(|&lambda| self.with_lambda(lambda))
            .collect::<Result<Vec<_>, F>>()?;

        let mut train_errors = Vec::with_capacity(lambdas.len());
        let mut validation_errors = Vec::with_capacity(lambdas.len());
        for params in &candidates {
            let model = params.fit(train)?;
            let train_error = model.cost(train, F::zero())?;
            let validation_error = model.cost(valid, F::zero())?;
            debug!(
                "lambda {}: train {}, validation {}",
                params.lambda(),
                train_error,
                validation_error
            );

            train_errors.push(train_error);
            validation_errors.push(validation_error);
        }

        let validation_errors = Array1::from(validation_errors);
        let best = first_minimum(&validation_errors).ok_or(LinearError::NoSolution)?;
        info!(
            "selected lambda {} with validation error {}",
            lambdas[best], validation_errors[best]
        );

        Ok(ValidationCurve {
            lambdas: Array1::from(lambdas.to_vec()),
            train_errors: Array1::from(train_errors),
            validation_errors,
            best,
            params: self.clone(),
        })
    }
}

impl<F: Float> RegularizedLinearRegressionParams<F> {
    /// Checks the hyper-parameters and sweeps the penalty, see
    /// [`RegularizedLinearRegressionValidParams::validation_curve`]
    pub fn validation_curve<D1, T1, D2, T2>(
        &self,
        lambdas: &[F],
        train: &DatasetBase<ArrayBase<D1, Ix2>, T1>,
        valid: &DatasetBase<ArrayBase<D2, Ix2>, T2>,
    ) -> Result<ValidationCurve<F>, F>
    where
        D1: Data<Elem = F>,
        T1: AsSingleTargets<Elem = F>,
        D2: Data<Elem = F>,
        T2: AsSingleTargets<Elem = F>,
    {
        self.check_ref()?.validation_curve(lambdas, train, valid)
    }
}

#[cfg(test)]
mod tests {
    use super::{default_lambdas, first_minimum, DEFAULT_LAMBDAS};
    use crate::{LinearError, RegularizedLinearRegression};
    use approx::assert_abs_diff_eq;
    use biasvar::traits::Fit;
    use biasvar::Dataset;
    use biasvar_preprocessing::PolynomialPipeline;
    use ndarray::{array, Array1};

    #[test]
    fn first_minimum_wins_ties() {
        assert_eq!(first_minimum(&array![3., 1., 2., 1.]), Some(1));
        assert_eq!(first_minimum(&array![f64::NAN, 2., 2.]), Some(1));
        assert_eq!(first_minimum(&array![0.5]), Some(0));
        assert_eq!(first_minimum(&Array1::<f64>::zeros(0)), None);
    }

    #[test]
    fn sweep_on_polynomial_water_level() {
        let data = biasvar_datasets::water_level().unwrap();
        let pipeline = PolynomialPipeline::params(8).fit(&data.train).unwrap();
        let train = pipeline.transform_dataset(data.train).unwrap();
        let valid = pipeline.transform_dataset(data.validation).unwrap();
        let test = pipeline.transform_dataset(data.test).unwrap();

        let curve = RegularizedLinearRegression::params()
            .validation_curve(&DEFAULT_LAMBDAS, &train, &valid)
            .unwrap();

        assert_eq!(curve.lambdas, Array1::from(DEFAULT_LAMBDAS.to_vec()));
        assert_eq!(curve.train_errors.len(), DEFAULT_LAMBDAS.len());
        assert_eq!(curve.validation_errors.len(), DEFAULT_LAMBDAS.len());

        let best = curve.best_index();
        assert_eq!(curve.best_lambda(), DEFAULT_LAMBDAS[best]);
        for (_, _, valid_error) in curve.iter() {
            assert!(curve.best_validation_error() <= valid_error);
        }
        for (_, _, valid_error) in curve.iter().take(best) {
            assert!(curve.best_validation_error() < valid_error);
        }

        // the strongest penalty underfits the training set
        let (_, strong_train, _) = curve.iter().last().unwrap();
        let (_, weak_train, _) = curve.iter().next().unwrap();
        assert!(weak_train < strong_train);

        let evaluation = curve.evaluate(&train, &test).unwrap();
        assert_eq!(evaluation.lambda, curve.best_lambda());
        assert!(evaluation.test_error > 0.);
        assert!(evaluation.regularized_test_error >= evaluation.test_error);
    }

    #[test]
    fn evaluation_without_penalty_matches_plain_fit() {
        let train = Dataset::new(array![[0.], [1.], [2.], [3.]], array![1., 2.9, 5.2, 7.]);
        let test = Dataset::new(array![[4.], [5.]], array![9., 11.]);

        let curve = RegularizedLinearRegression::params()
            .validation_curve(&[0.], &train, &train)
            .unwrap();
        let evaluation = curve.evaluate(&train, &test).unwrap();

        let model = RegularizedLinearRegression::params().fit(&train).unwrap();
        let expected = model.cost(&test, 0.).unwrap();
        assert_abs_diff_eq!(evaluation.test_error, expected, epsilon = 1e-9);
        assert_abs_diff_eq!(
            evaluation.regularized_test_error,
            evaluation.test_error,
            epsilon = 1e-12
        );
    }

    #[test]
    fn default_grid_in_single_precision() {
        let lambdas = default_lambdas::<f32>();
        assert_eq!(lambdas.len(), DEFAULT_LAMBDAS.len());
        assert_abs_diff_eq!(lambdas[1], 0.001f32);
        assert_abs_diff_eq!(lambdas[9], 10f32);

        let train = Dataset::new(
            array![[0f32], [1.], [2.], [3.]],
            array![1f32, 3., 5., 7.],
        );
        let curve = RegularizedLinearRegression::params()
            .validation_curve(&lambdas, &train, &train)
            .unwrap();

        assert_eq!(curve.lambdas, Array1::from(lambdas));
        let (_, weak_train, _) = curve.iter().next().unwrap();
        let (_, strong_train, _) = curve.iter().last().unwrap();
        assert!(weak_train < strong_train);
    }

    #[test]
    fn invalid_grids() {
        let train = Dataset::new(array![[0.], [1.]], array![0., 1.]);

        assert!(matches!(
            RegularizedLinearRegression::params().validation_curve(&[], &train, &train),
            Err(LinearError::EmptyPenaltyGrid)
        ));
        assert!(matches!(
            RegularizedLinearRegression::params().validation_curve(&[1., -1.], &train, &train),
            Err(LinearError::InvalidPenalty(_))
        ));
    }
}
