//! Linear regression with a ridge penalty on the non-intercept parameters

use crate::argmin_param::ArgminParam;
use crate::cost::{add_intercept, check_inputs, penalized_cost, penalized_gradient};
use crate::error::{LinearError, Result};
use crate::float::Float;
use crate::hyperparams::RegularizedLinearRegressionValidParams;

use argmin::core::{CostFunction, Executor, Gradient, State};
use argmin::solver::linesearch::MoreThuenteLineSearch;
use argmin::solver::quasinewton::LBFGS;
use biasvar::dataset::{AsSingleTargets, DatasetBase};
use biasvar::traits::{Fit, Predict};
use log::debug;
use ndarray::{s, Array1, ArrayBase, ArrayView1, ArrayView2, Data, Ix2};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

impl<F: Float, D: Data<Elem = F>, T: AsSingleTargets<Elem = F>>
    Fit<ArrayBase<D, Ix2>, T, LinearError<F>> for RegularizedLinearRegressionValidParams<F>
{
    type Object = RegularizedLinearRegression<F>;

    /// Minimizes the regularized least squares cost on the dataset
    ///
    /// Returns an error if records and targets disagree in length, the dataset is empty, the
    /// initial parameters have the wrong length or the solver fails.
    fn fit(&self, dataset: &DatasetBase<ArrayBase<D, Ix2>, T>) -> Result<Self::Object, F> {
        dataset.check_shapes()?;

        let (x, y) = (dataset.records(), dataset.targets().as_single_targets());
        let design = if self.fit_intercept() {
            add_intercept(x)
        } else {
            x.to_owned()
        };

        let init = match self.initial_params() {
            Some(init) if init.len() != design.ncols() => {
                return Err(LinearError::InvalidInitialParams(
                    design.ncols(),
                    init.len(),
                ))
            }
            Some(init) => init.clone(),
            None => Array1::zeros(design.ncols()),
        };

        let problem = RegularizedLeastSquares {
            x: design.view(),
            y,
            lambda: self.lambda(),
            offset: usize::from(self.fit_intercept()),
        };

        // L-BFGS keeps the last 7 position and gradient updates
        let solver = LBFGS::new(MoreThuenteLineSearch::new(), 7)
            .with_tolerance_grad(self.gradient_tolerance())?;

        let mut result = Executor::new(problem, solver)
            .configure(|state| {
                state
                    .param(ArgminParam(init))
                    .max_iters(self.max_iterations())
            })
            .run()?;

        debug!(
            "fitted {} samples with lambda {} in {} iterations, cost {}",
            design.nrows(),
            self.lambda(),
            result.state.get_iter(),
            result.state.get_best_cost()
        );

        let params = result
            .state
            .take_best_param()
            .ok_or(LinearError::NoSolution)?;

        Ok(RegularizedLinearRegression {
            params: params.0,
            fit_intercept: self.fit_intercept(),
        })
    }
}

struct RegularizedLeastSquares<'a, F: Float> {
    x: ArrayView2<'a, F>,
    y: ArrayView1<'a, F>,
    lambda: F,
    offset: usize,
}

impl<'a, F: Float> CostFunction for RegularizedLeastSquares<'a, F> {
    type Param = ArgminParam<F>;
    type Output = F;

    fn cost(&self, p: &Self::Param) -> std::result::Result<Self::Output, argmin::core::Error> {
        Ok(penalized_cost(
            p.as_array().view(),
            self.x,
            self.y,
            self.lambda,
            self.offset,
        ))
    }
}

impl<'a, F: Float> Gradient for RegularizedLeastSquares<'a, F> {
    type Param = ArgminParam<F>;
    type Gradient = ArgminParam<F>;

    fn gradient(&self, p: &Self::Param) -> std::result::Result<Self::Param, argmin::core::Error> {
        Ok(ArgminParam(penalized_gradient(
            p.as_array().view(),
            self.x,
            self.y,
            self.lambda,
            self.offset,
        )))
    }
}

/// A fitted regularized linear model
///
/// The hypothesis is `h(x) = θ₀ + θ₁ x₁ + ... + θₙ xₙ`, where `θ₀` is only present when the model
/// was fitted with an intercept.
///
/// ### Example
///
/// ```rust
/// use biasvar::traits::{Fit, Predict};
/// use biasvar_linear::RegularizedLinearRegression;
///
/// let data = biasvar_datasets::water_level().unwrap();
/// let model = RegularizedLinearRegression::params().fit(&data.train).unwrap();
///
/// let predictions = model.predict(data.validation.records());
/// let error = model.cost(&data.validation, 0.).unwrap();
/// assert_eq!(predictions.len(), 21);
/// assert!(error > 0.);
/// ```
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct RegularizedLinearRegression<F> {
    params: Array1<F>,
    fit_intercept: bool,
}

impl<F: Float> RegularizedLinearRegression<F> {
    /// All fitted parameters `θ`, the intercept first when one was fitted
    pub fn theta(&self) -> &Array1<F> {
        &self.params
    }

    /// The intercept `θ₀`, zero for models fitted without one
    pub fn intercept(&self) -> F {
        if self.fit_intercept {
            self.params[0]
        } else {
            F::zero()
        }
    }

    /// The parameters multiplying the features
    pub fn coefficients(&self) -> ArrayView1<'_, F> {
        self.params.slice(s![usize::from(self.fit_intercept)..])
    }

    /// Regularized cost of the fitted parameters on a dataset
    ///
    /// Errors are usually reported with `lambda = 0`, independently of the penalty used for
    /// fitting.
    pub fn cost<D: Data<Elem = F>, T: AsSingleTargets<Elem = F>>(
        &self,
        dataset: &DatasetBase<ArrayBase<D, Ix2>, T>,
        lambda: F,
    ) -> Result<F, F> {
        let (x, y) = (dataset.records(), dataset.targets().as_single_targets());
        let design = if self.fit_intercept {
            add_intercept(x)
        } else {
            x.to_owned()
        };
        check_inputs(self.params.len(), &design, y.len(), lambda)?;

        Ok(penalized_cost(
            self.params.view(),
            design.view(),
            y,
            lambda,
            usize::from(self.fit_intercept),
        ))
    }
}

impl<'a, F: Float, D: Data<Elem = F>> Predict<&'a ArrayBase<D, Ix2>, Array1<F>>
    for RegularizedLinearRegression<F>
{
    /// Evaluates the hypothesis on every record
    ///
    /// Panics if the number of features differs from the one seen during fitting.
    fn predict(&self, x: &'a ArrayBase<D, Ix2>) -> Array1<F> {
        let coefficients = self.coefficients();
        assert_eq!(
            x.ncols(),
            coefficients.len(),
            "Number of features must match the number of fitted coefficients."
        );

        x.dot(&coefficients) + self.intercept()
    }
}

impl<'a, F: Float, D: Data<Elem = F>, T> Predict<&'a DatasetBase<ArrayBase<D, Ix2>, T>, Array1<F>>
    for RegularizedLinearRegression<F>
{
    fn predict(&self, dataset: &'a DatasetBase<ArrayBase<D, Ix2>, T>) -> Array1<F> {
        self.predict(dataset.records())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hyperparams::RegularizedLinearRegressionParams;
    use approx::assert_abs_diff_eq;
    use biasvar::metrics::Regression;
    use biasvar::{Dataset, ParamGuard};
    use ndarray::array;

    #[test]
    fn autotraits() {
        fn has_autotraits<T: Send + Sync + Sized + Unpin>() {}
        has_autotraits::<RegularizedLinearRegression<f64>>();
        has_autotraits::<RegularizedLinearRegressionValidParams<f64>>();
        has_autotraits::<RegularizedLinearRegressionParams<f64>>();
        has_autotraits::<LinearError<f64>>();
    }

    #[test]
    fn recovers_exact_line() {
        let dataset = Dataset::new(array![[0.], [1.], [2.], [3.]], array![1., 3., 5., 7.]);
        let model = RegularizedLinearRegression::params().fit(&dataset).unwrap();

        assert_abs_diff_eq!(model.intercept(), 1., epsilon = 1e-4);
        assert_abs_diff_eq!(model.coefficients(), array![2.], epsilon = 1e-4);
        assert_abs_diff_eq!(
            model.predict(&array![[4.], [-1.]]),
            array![9., -1.],
            epsilon = 1e-3
        );
        assert_abs_diff_eq!(
            model.predict(&dataset).r2(dataset.targets()).unwrap(),
            1.,
            epsilon = 1e-6
        );
    }

    #[test]
    fn without_intercept_every_parameter_is_penalized() {
        let dataset = Dataset::new(array![[1.], [2.], [3.]], array![2., 4., 6.]);
        let model = RegularizedLinearRegression::params()
            .fit_intercept(false)
            .lambda(1.)
            .fit(&dataset)
            .unwrap();

        // minimizer of Σ(2x - θx)² + θ², with Σx² = 14
        assert_eq!(model.theta().len(), 1);
        assert_eq!(model.intercept(), 0.);
        assert_abs_diff_eq!(model.theta()[0], 28. / 15., epsilon = 1e-4);
    }

    #[test]
    fn water_level_linear_fit() {
        let data = biasvar_datasets::water_level().unwrap();
        let model = RegularizedLinearRegression::params()
            .lambda(0.)
            .fit(&data.train)
            .unwrap();

        assert_abs_diff_eq!(
            model.theta(),
            &array![13.08790351, 0.36777923],
            epsilon = 1e-3
        );
        assert_abs_diff_eq!(
            model.cost(&data.train, 0.).unwrap(),
            22.373906,
            epsilon = 1e-3
        );
        assert_abs_diff_eq!(
            model.cost(&data.validation, 0.).unwrap(),
            29.433818,
            epsilon = 1e-3
        );
    }

    #[test]
    fn unregularized_cost_is_half_the_mean_squared_error() {
        let data = biasvar_datasets::water_level().unwrap();
        let model = RegularizedLinearRegression::params()
            .fit(&data.train)
            .unwrap();

        let mse = model
            .predict(&data.validation)
            .mean_squared_error(data.validation.targets())
            .unwrap();
        assert_abs_diff_eq!(
            model.cost(&data.validation, 0.).unwrap(),
            mse / 2.,
            epsilon = 1e-9
        );
    }

    #[test]
    fn penalty_shrinks_coefficients() {
        let data = biasvar_datasets::water_level().unwrap();
        let params = RegularizedLinearRegression::params().check_unwrap();

        let plain = params.fit(&data.train).unwrap();
        let ridge = params.with_lambda(100.).unwrap().fit(&data.train).unwrap();

        assert!(ridge.coefficients()[0].abs() < plain.coefficients()[0].abs());
    }

    #[test]
    fn starts_from_initial_params() {
        let dataset = Dataset::new(array![[0.], [1.], [2.]], array![1., 3., 5.]);
        let model = RegularizedLinearRegression::params()
            .initial_params(array![1., 2.])
            .fit(&dataset)
            .unwrap();

        assert_abs_diff_eq!(model.theta(), &array![1., 2.], epsilon = 1e-6);

        let wrong_length = RegularizedLinearRegression::params()
            .initial_params(array![0., 0., 0.])
            .fit(&dataset);
        assert!(matches!(
            wrong_length,
            Err(LinearError::InvalidInitialParams(2, 3))
        ));
    }

    #[test]
    fn shape_errors() {
        let mismatched = Dataset::new(array![[0.], [1.]], array![1., 2., 3.]);
        assert!(matches!(
            RegularizedLinearRegression::params().fit(&mismatched),
            Err(LinearError::BaseCrate(biasvar::Error::MismatchedShapes(
                2, 3
            )))
        ));

        let empty = Dataset::new(ndarray::Array2::zeros((0, 1)), Array1::zeros(0));
        assert!(matches!(
            RegularizedLinearRegression::<f64>::params().fit(&empty),
            Err(LinearError::BaseCrate(biasvar::Error::NotEnoughSamples))
        ));

        let model = RegularizedLinearRegression::params()
            .fit(&Dataset::new(array![[0.], [1.]], array![1., 2.]))
            .unwrap();
        let wider = Dataset::new(array![[0., 1.]], array![1.]);
        assert!(matches!(
            model.cost(&wider, 0.),
            Err(LinearError::MismatchedParams(3, 2))
        ));
    }
}
