//! Newtype around the parameter vector handed to argmin
//!
//! argmin-math only implements its vector traits for `Array1<f32>` and `Array1<f64>`. Wrapping the
//! array lets the solver code stay generic over [`Float`] without repeating those bounds at every
//! call site.

use crate::float::Float;
use argmin_math::{
    ArgminAdd, ArgminDot, ArgminL1Norm, ArgminL2Norm, ArgminMinMax, ArgminMul, ArgminSignum,
    ArgminSub, ArgminZeroLike,
};
use ndarray::{Array1, Zip};
#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub struct ArgminParam<F>(pub Array1<F>);

impl<F> ArgminParam<F> {
    #[inline]
    pub fn as_array(&self) -> &Array1<F> {
        &self.0
    }
}

impl<F: Float> ArgminSub<F, ArgminParam<F>> for ArgminParam<F> {
    fn sub(&self, other: &F) -> ArgminParam<F> {
        ArgminParam(&self.0 - *other)
    }
}

impl<F: Float> ArgminSub<ArgminParam<F>, ArgminParam<F>> for ArgminParam<F> {
    fn sub(&self, other: &ArgminParam<F>) -> ArgminParam<F> {
        ArgminParam(&self.0 - &other.0)
    }
}

impl<F: Float> ArgminAdd<F, ArgminParam<F>> for ArgminParam<F> {
    fn add(&self, other: &F) -> ArgminParam<F> {
        ArgminParam(&self.0 + *other)
    }
}

impl<F: Float> ArgminAdd<ArgminParam<F>, ArgminParam<F>> for ArgminParam<F> {
    fn add(&self, other: &ArgminParam<F>) -> ArgminParam<F> {
        ArgminParam(&self.0 + &other.0)
    }
}

impl<F: Float> ArgminDot<ArgminParam<F>, F> for ArgminParam<F> {
    fn dot(&self, other: &ArgminParam<F>) -> F {
        self.0.dot(&other.0)
    }
}

impl<F: Float> ArgminL1Norm<F> for ArgminParam<F> {
    fn l1_norm(&self) -> F {
        self.0
            .fold(F::zero(), |acc, &v| acc + num_traits::Float::abs(v))
    }
}

impl<F: Float> ArgminL2Norm<F> for ArgminParam<F> {
    fn l2_norm(&self) -> F {
        num_traits::Float::sqrt(self.0.dot(&self.0))
    }
}

impl<F: Float> ArgminMul<F, ArgminParam<F>> for ArgminParam<F> {
    fn mul(&self, other: &F) -> ArgminParam<F> {
        ArgminParam(&self.0 * *other)
    }
}

impl<F: Float> ArgminMul<ArgminParam<F>, ArgminParam<F>> for ArgminParam<F> {
    fn mul(&self, other: &ArgminParam<F>) -> ArgminParam<F> {
        ArgminParam(&self.0 * &other.0)
    }
}

impl<F: Float> ArgminSignum for ArgminParam<F> {
    fn signum(self) -> ArgminParam<F> {
        ArgminParam(self.0.mapv_into(num_traits::Float::signum))
    }
}

impl<F: Float> ArgminZeroLike for ArgminParam<F> {
    fn zero_like(&self) -> ArgminParam<F> {
        ArgminParam(Array1::zeros(self.0.len()))
    }
}

impl<F: Float> ArgminMinMax for ArgminParam<F> {
    fn min(x: &Self, y: &Self) -> ArgminParam<F> {
        assert_eq!(x.0.len(), y.0.len());
        ArgminParam(Zip::from(&x.0).and(&y.0).map_collect(|&a, &b| if a < b { a } else { b }))
    }

    fn max(x: &Self, y: &Self) -> ArgminParam<F> {
        assert_eq!(x.0.len(), y.0.len());
        ArgminParam(Zip::from(&x.0).and(&y.0).map_collect(|&a, &b| if a > b { a } else { b }))
    }
}

#[cfg(test)]
mod tests {
    use super::ArgminParam;
    use approx::assert_abs_diff_eq;
    use argmin_math::{ArgminL1Norm, ArgminL2Norm, ArgminMinMax, ArgminSignum};
    use ndarray::array;

    #[test]
    fn norms_and_signum() {
        let p = ArgminParam(array![3., -4., 0.]);

        assert_abs_diff_eq!(p.l1_norm(), 7.);
        assert_abs_diff_eq!(p.l2_norm(), 5.);
        assert_eq!(p.signum().0, array![1., -1., 1.]);
    }

    #[test]
    fn elementwise_min_max() {
        let a = ArgminParam(array![1., 5.]);
        let b = ArgminParam(array![2., -1.]);

        assert_eq!(<ArgminParam<f64> as ArgminMinMax>::min(&a, &b).0, array![1., -1.]);
        assert_eq!(<ArgminParam<f64> as ArgminMinMax>::max(&a, &b).0, array![2., 5.]);
    }
}
