//! Standard scaling of features

use crate::error::{PreprocessingError, Result};
use approx::abs_diff_eq;
use biasvar::dataset::{DatasetBase, Records};
use biasvar::traits::Fit;
use biasvar::{Float, ParamGuard};
use ndarray::{Array1, Array2, ArrayBase, Axis, Data, Ix2, Zip};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// Linear Scaler: learns the per-feature mean and standard deviation of a dataset, producing a
/// [fitted linear scaler](FittedLinearScaler) that can be used to scale different datasets using
/// the same parameters.
///
/// Validation and test data must be scaled with the statistics of the training data, never with
/// their own.
///
/// ### Example
///
/// ```rust
/// use biasvar::traits::Fit;
/// use biasvar::Dataset;
/// use biasvar_preprocessing::linear_scaling::LinearScaler;
/// use ndarray::array;
///
/// let train = Dataset::new(array![[1.], [2.], [3.]], array![0., 0., 0.]);
/// // Learn scaling parameters
/// let scaler = LinearScaler::standard().fit(&train).unwrap();
/// // scale new records according to parameters
/// let scaled = scaler.transform(&array![[2.], [4.]]).unwrap();
/// assert_eq!(scaled[(0, 0)], 0.);
/// ```
pub struct LinearScaler;

impl LinearScaler {
    /// Initializes a Standard scaler using the population standard deviation (`ddof = 0`)
    pub fn standard<F: Float>() -> LinearScalerParams<F> {
        LinearScalerParams(LinearScalerValidParams { ddof: F::zero() })
    }
}

/// A verified hyper-parameter set for the standard scaler
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct LinearScalerValidParams<F> {
    ddof: F,
}

impl<F: Float> LinearScalerValidParams<F> {
    pub fn ddof(&self) -> F {
        self.ddof
    }
}

/// Hyper-parameters of the standard scaler, see [`LinearScaler::standard`]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct LinearScalerParams<F>(LinearScalerValidParams<F>);

impl<F: Float> LinearScalerParams<F> {
    /// Delta degrees of freedom of the standard deviation
    ///
    /// The divisor is `nsamples - ddof`. Defaults to `0`, use `1` for the sample standard
    /// deviation.
    pub fn ddof(mut self, ddof: F) -> Self {
        self.0.ddof = ddof;
        self
    }
}

impl<F: Float> ParamGuard for LinearScalerParams<F> {
    type Checked = LinearScalerValidParams<F>;
    type Error = PreprocessingError;

    fn check_ref(&self) -> Result<&Self::Checked> {
        if !self.0.ddof.is_finite() || self.0.ddof.is_negative() {
            Err(PreprocessingError::InvalidDdof(
                self.0.ddof.to_f32().unwrap_or(f32::NAN),
            ))
        } else {
            Ok(&self.0)
        }
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}

impl<F: Float, D: Data<Elem = F>, T> Fit<ArrayBase<D, Ix2>, T, PreprocessingError>
    for LinearScalerValidParams<F>
{
    type Object = FittedLinearScaler<F>;

    /// Fits the per-feature statistics of the input records. Will return an error if the dataset
    /// does not contain enough samples or if a feature is constant.
    fn fit(&self, x: &DatasetBase<ArrayBase<D, Ix2>, T>) -> Result<Self::Object> {
        FittedLinearScaler::standard(x.records(), self.ddof)
    }
}

/// The result of fitting a [linear scaler](LinearScaler).
/// Scales datasets with the parameters learned during fitting.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct FittedLinearScaler<F> {
    means: Array1<F>,
    std_devs: Array1<F>,
}

impl<F: Float> FittedLinearScaler<F> {
    pub(crate) fn standard<D: Data<Elem = F>>(
        records: &ArrayBase<D, Ix2>,
        ddof: F,
    ) -> Result<Self> {
        if records.nsamples() == 0 || F::cast(records.nsamples()) <= ddof {
            return Err(PreprocessingError::NotEnoughSamples);
        }
        let means = records
            .mean_axis(Axis(0))
            .ok_or(PreprocessingError::NotEnoughSamples)?;
        let std_devs = records.std_axis(Axis(0), ddof);

        if let Some(column) = std_devs.iter().position(|s| abs_diff_eq!(*s, F::zero())) {
            return Err(PreprocessingError::ZeroVariance(column));
        }

        Ok(Self { means, std_devs })
    }

    /// Array of size `n_features` with the mean subtracted from each feature
    pub fn means(&self) -> &Array1<F> {
        &self.means
    }

    /// Array of size `n_features` with the standard deviation each feature is divided by
    pub fn std_devs(&self) -> &Array1<F> {
        &self.std_devs
    }

    /// Number of features the scaler was fitted on
    pub fn nfeatures(&self) -> usize {
        self.means.len()
    }

    /// Scales an array of size (nsamples, nfeatures) according to the scaler's means and standard
    /// deviations. The stored statistics are never updated by this call.
    pub fn transform<D: Data<Elem = F>>(&self, x: &ArrayBase<D, Ix2>) -> Result<Array2<F>> {
        if x.nfeatures() != self.nfeatures() {
            return Err(PreprocessingError::MismatchedFeatures(
                self.nfeatures(),
                x.nfeatures(),
            ));
        }

        let mut x = x.to_owned();
        Zip::from(x.columns_mut())
            .and(&self.means)
            .and(&self.std_devs)
            .for_each(|mut col, &mean, &std| col.mapv_inplace(|el| (el - mean) / std));

        Ok(x)
    }

    /// Substitutes the records of the dataset with their scaled version
    pub fn transform_dataset<D: Data<Elem = F>, T>(
        &self,
        x: DatasetBase<ArrayBase<D, Ix2>, T>,
    ) -> Result<DatasetBase<Array2<F>, T>> {
        let transformed_records = self.transform(x.records())?;
        Ok(x.with_records(transformed_records))
    }
}

/// Normalizes every column of `x` to zero mean and unit population standard deviation
///
/// Returns the normalized matrix together with the fitted statistics, which must be reused for
/// any further data.
pub fn normalize<F: Float, D: Data<Elem = F>>(
    x: &ArrayBase<D, Ix2>,
) -> Result<(Array2<F>, FittedLinearScaler<F>)> {
    let scaler = FittedLinearScaler::standard(x, F::zero())?;
    let normalized = scaler.transform(x)?;

    Ok((normalized, scaler))
}

#[cfg(test)]
mod tests {
    use super::{normalize, FittedLinearScaler, LinearScaler, LinearScalerValidParams};
    use crate::error::PreprocessingError;
    use approx::assert_abs_diff_eq;
    use biasvar::traits::Fit;
    use biasvar::{Dataset, DatasetBase};
    use ndarray::{array, Array2, Axis};

    #[test]
    fn autotraits() {
        fn has_autotraits<T: Send + Sync + Sized + Unpin>() {}
        has_autotraits::<FittedLinearScaler<f64>>();
        has_autotraits::<LinearScalerValidParams<f64>>();
    }

    #[test]
    fn test_standard_scaler() {
        let dataset: Dataset<f64> = DatasetBase::new(
            array![[1., -1., 2.], [2., 0., 0.], [0., 1., -1.]],
            array![0., 0., 0.],
        );
        let scaler = LinearScaler::standard().fit(&dataset).unwrap();
        assert_abs_diff_eq!(*scaler.means(), array![1., 0., 1. / 3.]);
        assert_abs_diff_eq!(*scaler.std_devs(), array![0.81, 0.81, 1.24], epsilon = 1e-2);

        let transformed = scaler.transform_dataset(dataset).unwrap();
        let means = transformed.records().mean_axis(Axis(0)).unwrap();
        let std_devs = transformed.records().std_axis(Axis(0), 0.);
        assert_abs_diff_eq!(means, array![0., 0., 0.]);
        assert_abs_diff_eq!(std_devs, array![1., 1., 1.]);
    }

    #[test]
    fn test_sample_std_ddof() {
        let dataset: Dataset<f64> = DatasetBase::new(array![[1.], [2.], [3.]], array![0., 0., 0.]);
        let scaler = LinearScaler::standard().ddof(1.).fit(&dataset).unwrap();
        assert_abs_diff_eq!(*scaler.std_devs(), array![1.]);

        let too_few: Dataset<f64> = DatasetBase::new(array![[1.]], array![0.]);
        assert_eq!(
            LinearScaler::standard().ddof(1.).fit(&too_few),
            Err(PreprocessingError::NotEnoughSamples)
        );
        assert!(matches!(
            LinearScaler::standard().ddof(-1.).fit(&dataset),
            Err(PreprocessingError::InvalidDdof(_))
        ));
    }

    #[test]
    fn normalize_round_trip() {
        let x = array![[1., 10.], [2., 30.], [4., 20.], [5., 60.]];
        let (normalized, scaler) = normalize(&x).unwrap();

        let manual = (&x - &scaler.means().clone().insert_axis(Axis(0)))
            / &scaler.std_devs().clone().insert_axis(Axis(0));
        assert_abs_diff_eq!(normalized, manual, epsilon = 1e-12);
    }

    #[test]
    fn unseen_data_reuses_training_statistics() {
        let train = array![[1.], [2.], [3.], [4.]];
        let (_, scaler) = normalize(&train).unwrap();
        let (means, std_devs) = (scaler.means().clone(), scaler.std_devs().clone());

        let unseen = array![[100.], [200.]];
        let scaled = scaler.transform(&unseen).unwrap();

        assert_eq!(scaler.means(), &means);
        assert_eq!(scaler.std_devs(), &std_devs);
        assert_abs_diff_eq!(scaled[(0, 0)], (100. - 2.5) / 1.25f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn zero_variance_is_an_error() {
        let x = array![[1., 3.], [2., 3.], [3., 3.]];
        assert_eq!(
            normalize(&x).unwrap_err(),
            PreprocessingError::ZeroVariance(1)
        );
    }

    #[test]
    fn empty_and_mismatched_inputs() {
        let empty = Array2::<f64>::zeros((0, 2));
        assert_eq!(
            normalize(&empty).unwrap_err(),
            PreprocessingError::NotEnoughSamples
        );

        let (_, scaler) = normalize(&array![[1., 2.], [3., 5.]]).unwrap();
        assert_eq!(
            scaler.transform(&array![[1.]]).unwrap_err(),
            PreprocessingError::MismatchedFeatures(2, 1)
        );
    }
}
