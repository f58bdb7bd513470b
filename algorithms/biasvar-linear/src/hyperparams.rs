use crate::{float::Float, LinearError, RegularizedLinearRegression};
use biasvar::ParamGuard;
use ndarray::Array1;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// A verified hyper-parameter set ready for the estimation of a regularized linear model
///
/// See [`RegularizedLinearRegressionParams`] for more information.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct RegularizedLinearRegressionValidParams<F> {
    pub(crate) lambda: F,
    pub(crate) max_iterations: u64,
    pub(crate) gradient_tolerance: F,
    pub(crate) initial_params: Option<Array1<F>>,
    pub(crate) fit_intercept: bool,
}

impl<F: Float> RegularizedLinearRegressionValidParams<F> {
    pub fn lambda(&self) -> F {
        self.lambda
    }

    pub fn max_iterations(&self) -> u64 {
        self.max_iterations
    }

    pub fn gradient_tolerance(&self) -> F {
        self.gradient_tolerance
    }

    pub fn initial_params(&self) -> Option<&Array1<F>> {
        self.initial_params.as_ref()
    }

    pub fn fit_intercept(&self) -> bool {
        self.fit_intercept
    }

    /// Same parameters with a different, checked, penalty
    pub(crate) fn with_lambda(&self, lambda: F) -> Result<Self, LinearError<F>> {
        RegularizedLinearRegressionParams(self.clone())
            .lambda(lambda)
            .check()
    }
}

/// Hyper-parameters of a linear model fitted by minimizing the regularized least squares cost
///
/// The cost is minimized with L-BFGS and a More-Thuente line search. The intercept is never part
/// of the penalty.
///
/// ### Example
///
/// ```rust
/// use biasvar::traits::Fit;
/// use biasvar::Dataset;
/// use biasvar_linear::RegularizedLinearRegression;
/// use ndarray::array;
///
/// let dataset = Dataset::new(array![[0.], [1.], [2.], [3.]], array![1., 3., 5., 7.]);
/// let model: RegularizedLinearRegression<f64> = RegularizedLinearRegression::params()
///     .lambda(0.)
///     .fit(&dataset)
///     .unwrap();
///
/// assert!((model.intercept() - 1.).abs() < 1e-4);
/// ```
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct RegularizedLinearRegressionParams<F>(RegularizedLinearRegressionValidParams<F>);

impl<F: Float> Default for RegularizedLinearRegressionParams<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float> RegularizedLinearRegression<F> {
    pub fn params() -> RegularizedLinearRegressionParams<F> {
        RegularizedLinearRegressionParams::new()
    }
}

impl<F: Float> RegularizedLinearRegressionParams<F> {
    /// Unregularized fit with an intercept, at most 200 solver iterations and a gradient
    /// tolerance of `1e-9`
    pub fn new() -> Self {
        Self(RegularizedLinearRegressionValidParams {
            lambda: F::zero(),
            max_iterations: 200,
            gradient_tolerance: F::cast(1e-9),
            initial_params: None,
            fit_intercept: true,
        })
    }

    /// Strength of the penalty on the non-intercept parameters, `λ = 0` disables it
    pub fn lambda(mut self, lambda: F) -> Self {
        self.0.lambda = lambda;
        self
    }

    /// Maximum number of iterations for the L-BFGS solver
    ///
    /// The best parameters found are accepted once the budget is exhausted.
    pub fn max_iterations(mut self, max_iterations: u64) -> Self {
        self.0.max_iterations = max_iterations;
        self
    }

    /// Stopping criterion on the norm of the gradient
    pub fn gradient_tolerance(mut self, gradient_tolerance: F) -> Self {
        self.0.gradient_tolerance = gradient_tolerance;
        self
    }

    /// Starting point of the solver, including the intercept when one is fitted
    ///
    /// Defaults to all zeros.
    pub fn initial_params(mut self, initial_params: Array1<F>) -> Self {
        self.0.initial_params = Some(initial_params);
        self
    }

    /// Specifies whether a column of ones is prepended to the records
    pub fn fit_intercept(mut self, fit_intercept: bool) -> Self {
        self.0.fit_intercept = fit_intercept;
        self
    }
}

impl<F: Float> ParamGuard for RegularizedLinearRegressionParams<F> {
    type Checked = RegularizedLinearRegressionValidParams<F>;
    type Error = LinearError<F>;

    fn check_ref(&self) -> Result<&Self::Checked, Self::Error> {
        if !self.0.lambda.is_finite() || self.0.lambda.is_negative() {
            Err(LinearError::InvalidPenalty(self.0.lambda))
        } else if self.0.max_iterations == 0 {
            Err(LinearError::InvalidMaxIterations)
        } else if !self.0.gradient_tolerance.is_finite() || self.0.gradient_tolerance <= F::zero()
        {
            Err(LinearError::InvalidGradientTolerance(
                self.0.gradient_tolerance,
            ))
        } else {
            Ok(&self.0)
        }
    }

    fn check(self) -> Result<Self::Checked, Self::Error> {
        self.check_ref()?;
        Ok(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let params = RegularizedLinearRegression::<f64>::params().check().unwrap();

        assert_eq!(params.lambda(), 0.);
        assert_eq!(params.max_iterations(), 200);
        assert_eq!(params.gradient_tolerance(), 1e-9);
        assert!(params.initial_params().is_none());
        assert!(params.fit_intercept());
    }

    #[test]
    fn invalid_params() {
        let params = RegularizedLinearRegression::<f64>::params;

        assert!(matches!(
            params().lambda(-1.).check(),
            Err(LinearError::InvalidPenalty(_))
        ));
        assert!(matches!(
            params().lambda(f64::INFINITY).check(),
            Err(LinearError::InvalidPenalty(_))
        ));
        assert!(matches!(
            params().max_iterations(0).check(),
            Err(LinearError::InvalidMaxIterations)
        ));
        assert!(matches!(
            params().gradient_tolerance(0.).check(),
            Err(LinearError::InvalidGradientTolerance(_))
        ));
    }

    #[test]
    fn with_lambda_is_checked() {
        let params = RegularizedLinearRegression::<f64>::params()
            .max_iterations(50)
            .check()
            .unwrap();

        let penalized = params.with_lambda(3.).unwrap();
        assert_eq!(penalized.lambda(), 3.);
        assert_eq!(penalized.max_iterations(), 50);
        assert!(matches!(
            params.with_lambda(-0.5),
            Err(LinearError::InvalidPenalty(_))
        ));
    }
}
