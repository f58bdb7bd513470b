//! Regularized least squares cost and gradient
//!
//! For a design matrix `X` with `m` rows, targets `y` and parameters `θ` the cost is
//!
//! ```text
//! J(θ) = 1/(2m) Σ (Xθ - y)² + λ/(2m) Σ_{j≥1} θ_j²
//! ```
//!
//! and its gradient is `1/m Xᵀ(Xθ - y) + λ/m θ_reg`, where `θ_reg` is `θ` with the intercept
//! entry zeroed. The first column of `X` is expected to be the intercept column, see
//! [`add_intercept`].

use crate::error::{LinearError, Result};
use crate::float::Float;
use ndarray::{s, Array1, Array2, ArrayBase, ArrayView1, ArrayView2, Data, Ix1, Ix2};

/// Prepends a column of ones to the records
pub fn add_intercept<F: Float, D: Data<Elem = F>>(x: &ArrayBase<D, Ix2>) -> Array2<F> {
    let mut design = Array2::ones((x.nrows(), x.ncols() + 1));
    design.slice_mut(s![.., 1..]).assign(x);

    design
}

/// Regularized cost of `theta` on the design matrix `x` and targets `y`
///
/// ### Example
///
/// ```rust
/// use biasvar_linear::{add_intercept, regularized_cost};
/// use ndarray::array;
///
/// let x = add_intercept(&array![[1.], [2.]]);
/// let cost = regularized_cost(&array![0., 1.], &x, &array![1., 2.], 0.).unwrap();
/// assert_eq!(cost, 0.);
/// ```
pub fn regularized_cost<F, D1, D2, D3>(
    theta: &ArrayBase<D1, Ix1>,
    x: &ArrayBase<D2, Ix2>,
    y: &ArrayBase<D3, Ix1>,
    lambda: F,
) -> Result<F, F>
where
    F: Float,
    D1: Data<Elem = F>,
    D2: Data<Elem = F>,
    D3: Data<Elem = F>,
{
    check_inputs(theta.len(), x, y.len(), lambda)?;
    Ok(penalized_cost(theta.view(), x.view(), y.view(), lambda, 1))
}

/// Gradient of [`regularized_cost`] with respect to `theta`
pub fn regularized_gradient<F, D1, D2, D3>(
    theta: &ArrayBase<D1, Ix1>,
    x: &ArrayBase<D2, Ix2>,
    y: &ArrayBase<D3, Ix1>,
    lambda: F,
) -> Result<Array1<F>, F>
where
    F: Float,
    D1: Data<Elem = F>,
    D2: Data<Elem = F>,
    D3: Data<Elem = F>,
{
    check_inputs(theta.len(), x, y.len(), lambda)?;
    Ok(penalized_gradient(theta.view(), x.view(), y.view(), lambda, 1))
}

/// Cost and gradient in one pass over the residuals
pub fn cost_and_gradient<F, D1, D2, D3>(
    theta: &ArrayBase<D1, Ix1>,
    x: &ArrayBase<D2, Ix2>,
    y: &ArrayBase<D3, Ix1>,
    lambda: F,
) -> Result<(F, Array1<F>), F>
where
    F: Float,
    D1: Data<Elem = F>,
    D2: Data<Elem = F>,
    D3: Data<Elem = F>,
{
    check_inputs(theta.len(), x, y.len(), lambda)?;

    let (theta, x) = (theta.view(), x.view());
    let m = F::cast(x.nrows());
    let residual = x.dot(&theta) - y;
    let penalty = penalty(theta, 1);

    let cost = (residual.dot(&residual) + lambda * penalty) / (m + m);
    let gradient = scaled_gradient(theta, x, &residual, lambda, 1, m);

    Ok((cost, gradient))
}

pub(crate) fn check_inputs<F: Float, D: Data<Elem = F>>(
    nparams: usize,
    x: &ArrayBase<D, Ix2>,
    ntargets: usize,
    lambda: F,
) -> Result<(), F> {
    if x.nrows() != ntargets {
        Err(LinearError::MismatchedShapes(x.nrows(), ntargets))
    } else if x.nrows() == 0 {
        Err(LinearError::NotEnoughSamples)
    } else if x.ncols() != nparams {
        Err(LinearError::MismatchedParams(x.ncols(), nparams))
    } else if !lambda.is_finite() || lambda.is_negative() {
        Err(LinearError::InvalidPenalty(lambda))
    } else {
        Ok(())
    }
}

/// Squared norm of the penalized parameters, skipping the first `offset` entries
fn penalty<F: Float>(theta: ArrayView1<F>, offset: usize) -> F {
    let penalized = theta.slice(s![offset.min(theta.len())..]);
    penalized.dot(&penalized)
}

fn scaled_gradient<F: Float>(
    theta: ArrayView1<F>,
    x: ArrayView2<F>,
    residual: &Array1<F>,
    lambda: F,
    offset: usize,
    m: F,
) -> Array1<F> {
    let offset = offset.min(theta.len());
    let mut gradient = x.t().dot(residual);
    gradient
        .slice_mut(s![offset..])
        .scaled_add(lambda, &theta.slice(s![offset..]));

    gradient / m
}

/// Cost without input validation, the first `offset` parameters are not penalized
pub(crate) fn penalized_cost<F: Float>(
    theta: ArrayView1<F>,
    x: ArrayView2<F>,
    y: ArrayView1<F>,
    lambda: F,
    offset: usize,
) -> F {
    let m = F::cast(x.nrows());
    let residual = x.dot(&theta) - y;

    (residual.dot(&residual) + lambda * penalty(theta, offset)) / (m + m)
}

/// Gradient without input validation, the first `offset` parameters are not penalized
pub(crate) fn penalized_gradient<F: Float>(
    theta: ArrayView1<F>,
    x: ArrayView2<F>,
    y: ArrayView1<F>,
    lambda: F,
    offset: usize,
) -> Array1<F> {
    let m = F::cast(x.nrows());
    let residual = x.dot(&theta) - y;

    scaled_gradient(theta, x, &residual, lambda, offset, m)
}
