//! Learning curves
//!
//! A learning curve refits the model on growing prefixes of the training set and records the
//! unregularized error on that prefix and on the whole validation set. A high error on both sides
//! points to high bias, a large gap between them to high variance.

use crate::error::Result;
use crate::float::Float;
use crate::hyperparams::{RegularizedLinearRegressionParams, RegularizedLinearRegressionValidParams};
use biasvar::dataset::{AsSingleTargets, DatasetBase};
use biasvar::traits::Fit;
use biasvar::ParamGuard;
use log::debug;
use ndarray::{Array1, ArrayBase, Data, Ix2};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// Training and validation error per training set size
///
/// Entry `i` belongs to a model fitted on the first `sizes[i]` training samples.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct LearningCurve<F> {
    pub sizes: Vec<usize>,
    pub train_errors: Array1<F>,
    pub validation_errors: Array1<F>,
}

impl<F: Float> LearningCurve<F> {
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Iterates over `(size, train error, validation error)`
    pub fn iter(&self) -> impl Iterator<Item = (usize, F, F)> + '_ {
        self.sizes
            .iter()
            .zip(self.train_errors.iter())
            .zip(self.validation_errors.iter())
            .map(|((&size, &train), &valid)| (size, train, valid))
    }
}

impl<F: Float> RegularizedLinearRegressionValidParams<F> {
    /// Fits on the first `i` training samples for every `i` from one to the size of the training
    /// set
    ///
    /// Models are fitted with the configured penalty and scored with `λ = 0`. Prefixes with fewer
    /// samples than parameters are underdetermined; the solver still starts from the initial
    /// parameters and the training error of these fits is close to zero.
    pub fn learning_curve<D1, T1, D2, T2>(
        &self,
        train: &DatasetBase<ArrayBase<D1, Ix2>, T1>,
        valid: &DatasetBase<ArrayBase<D2, Ix2>, T2>,
    ) -> Result<LearningCurve<F>, F>
    where
        D1: Data<Elem = F>,
        T1: AsSingleTargets<Elem = F>,
        D2: Data<Elem = F>,
        T2: AsSingleTargets<Elem = F>,
    {
        train.check_shapes()?;
        valid.check_shapes()?;

        let nsamples = train.records().nrows();
        let mut sizes = Vec::with_capacity(nsamples);
        let mut train_errors = Vec::with_capacity(nsamples);
        let mut validation_errors = Vec::with_capacity(nsamples);

        for size in 1..=nsamples {
            let subset = train.head(size);
            let model = self.fit(&subset)?;

            let train_error = model.cost(&subset, F::zero())?;
            let validation_error = model.cost(valid, F::zero())?;
            debug!(
                "learning curve with {} samples: train {}, validation {}",
                size, train_error, validation_error
            );

            sizes.push(size);
            train_errors.push(train_error);
            validation_errors.push(validation_error);
        }

        Ok(LearningCurve {
            sizes,
            train_errors: Array1::from(train_errors),
            validation_errors: Array1::from(validation_errors),
        })
    }
}

impl<F: Float> RegularizedLinearRegressionParams<F> {
    /// Checks the hyper-parameters and computes a learning curve, see
    /// [`RegularizedLinearRegressionValidParams::learning_curve`]
    pub fn learning_curve<D1, T1, D2, T2>(
        &self,
        train: &DatasetBase<ArrayBase<D1, Ix2>, T1>,
        valid: &DatasetBase<ArrayBase<D2, Ix2>, T2>,
    ) -> Result<LearningCurve<F>, F>
    where
        D1: Data<Elem = F>,
        T1: AsSingleTargets<Elem = F>,
        D2: Data<Elem = F>,
        T2: AsSingleTargets<Elem = F>,
    {
        self.check_ref()?.learning_curve(train, valid)
    }
}
