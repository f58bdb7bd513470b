//! Polynomial expansion followed by standard scaling
//!
//! The statistics of the scaling step are learned once from the training records and then
//! applied unchanged to validation, test or plotting data.

use crate::error::{PreprocessingError, Result};
use crate::linear_scaling::{FittedLinearScaler, LinearScaler};
use crate::polynomial::{map_polynomial, PolynomialFeatures};
use biasvar::dataset::DatasetBase;
use biasvar::traits::Fit;
use biasvar::{Float, ParamGuard};
use ndarray::{Array2, ArrayBase, Data, Ix2};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// A verified hyper-parameter set of the polynomial pipeline
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct PolynomialPipelineValidParams<F> {
    degree: usize,
    ddof: F,
}

impl<F: Float> PolynomialPipelineValidParams<F> {
    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn ddof(&self) -> F {
        self.ddof
    }
}

#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct PolynomialPipelineParams<F>(PolynomialPipelineValidParams<F>);

impl<F: Float> PolynomialPipelineParams<F> {
    /// Delta degrees of freedom of the scaling step, defaults to `0`
    pub fn ddof(mut self, ddof: F) -> Self {
        self.0.ddof = ddof;
        self
    }
}

impl<F: Float> ParamGuard for PolynomialPipelineParams<F> {
    type Checked = PolynomialPipelineValidParams<F>;
    type Error = PreprocessingError;

    fn check_ref(&self) -> Result<&Self::Checked> {
        PolynomialFeatures::new(self.0.degree).check_ref()?;
        LinearScaler::standard().ddof(self.0.ddof).check_ref()?;

        Ok(&self.0)
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}

impl<F: Float, D: Data<Elem = F>, T> Fit<ArrayBase<D, Ix2>, T, PreprocessingError>
    for PolynomialPipelineValidParams<F>
{
    type Object = PolynomialPipeline<F>;

    /// Expands the training records and learns the scaling statistics of the expansion
    fn fit(&self, dataset: &DatasetBase<ArrayBase<D, Ix2>, T>) -> Result<Self::Object> {
        let mapped = map_polynomial(dataset.records(), self.degree);
        let scaler = FittedLinearScaler::standard(&mapped, self.ddof)?;

        Ok(PolynomialPipeline {
            degree: self.degree,
            scaler,
        })
    }
}

/// Polynomial expansion and standard scaling fitted on training records
///
/// ### Example
///
/// ```rust
/// use biasvar::traits::Fit;
/// use biasvar::Dataset;
/// use biasvar_preprocessing::PolynomialPipeline;
/// use ndarray::array;
///
/// let train = Dataset::new(array![[1.], [2.], [3.]], array![1., 4., 9.]);
/// let pipeline = PolynomialPipeline::params(2).fit(&train).unwrap();
///
/// let train = pipeline.transform_dataset(train).unwrap();
/// let grid = pipeline.transform(&array![[0.], [1.5], [4.]]).unwrap();
/// assert_eq!(grid.ncols(), 2);
/// ```
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct PolynomialPipeline<F> {
    degree: usize,
    scaler: FittedLinearScaler<F>,
}

impl<F: Float> PolynomialPipeline<F> {
    /// Pipeline expanding up to `degree` with population standard deviation scaling
    pub fn params(degree: usize) -> PolynomialPipelineParams<F> {
        PolynomialPipelineParams(PolynomialPipelineValidParams {
            degree,
            ddof: F::zero(),
        })
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    /// The scaling statistics learned from the expanded training records
    pub fn scaler(&self) -> &FittedLinearScaler<F> {
        &self.scaler
    }

    /// Expands and scales records with the training statistics
    pub fn transform<D: Data<Elem = F>>(&self, x: &ArrayBase<D, Ix2>) -> Result<Array2<F>> {
        self.scaler.transform(&map_polynomial(x, self.degree))
    }

    /// Substitutes the records of the dataset with their expanded and scaled version
    pub fn transform_dataset<D: Data<Elem = F>, T>(
        &self,
        x: DatasetBase<ArrayBase<D, Ix2>, T>,
    ) -> Result<DatasetBase<Array2<F>, T>> {
        let transformed = self.transform(x.records())?;
        Ok(x.with_records(transformed))
    }
}

#[cfg(test)]
mod tests {
    use super::PolynomialPipeline;
    use crate::error::PreprocessingError;
    use crate::linear_scaling::normalize;
    use crate::polynomial::map_polynomial;
    use approx::assert_abs_diff_eq;
    use biasvar::traits::Fit;
    use biasvar::{Dataset, DatasetBase};
    use ndarray::array;

    #[test]
    fn matches_manual_map_then_normalize() {
        let train: Dataset<f64> =
            DatasetBase::new(array![[-2.], [-1.], [0.5], [1.], [3.]], array![0., 0., 0., 0., 0.]);
        let pipeline = PolynomialPipeline::params(3).fit(&train).unwrap();

        let (expected, scaler) = normalize(&map_polynomial(train.records(), 3)).unwrap();
        assert_eq!(pipeline.scaler(), &scaler);

        let transformed = pipeline.transform(train.records()).unwrap();
        assert_abs_diff_eq!(transformed, expected, epsilon = 1e-12);
    }

    #[test]
    fn validation_data_uses_training_statistics() {
        let train: Dataset<f64> = DatasetBase::new(array![[1.], [2.], [3.]], array![0., 0., 0.]);
        let valid: Dataset<f64> = DatasetBase::new(array![[10.], [20.]], array![1., 2.]);
        let pipeline = PolynomialPipeline::params(2).fit(&train).unwrap();
        let before = pipeline.scaler().clone();

        let valid = pipeline.transform_dataset(valid).unwrap();

        let means = pipeline.scaler().means();
        let std_devs = pipeline.scaler().std_devs();
        assert_eq!(pipeline.scaler(), &before);
        assert_abs_diff_eq!(
            valid.records()[(1, 1)],
            (400. - means[1]) / std_devs[1],
            epsilon = 1e-12
        );
        assert_eq!(valid.targets(), &array![1., 2.]);
    }

    #[test]
    fn water_level_degree_eight() {
        let data = biasvar_datasets::water_level().unwrap();
        let pipeline = PolynomialPipeline::params(8).fit(&data.train).unwrap();
        let train = pipeline.transform_dataset(data.train).unwrap();

        assert_eq!(train.records().dim(), (12, 8));
        assert_abs_diff_eq!(
            train.records().row(0),
            array![
                -0.378244, -0.788662, 0.190329, -0.737591, 0.320252, -0.617152, 0.359835,
                -0.531091
            ],
            epsilon = 1e-6
        );
    }

    #[test]
    fn invalid_degree_and_constant_feature() {
        let train: Dataset<f64> = DatasetBase::new(array![[1.], [2.]], array![0., 0.]);
        assert_eq!(
            PolynomialPipeline::params(0).fit(&train).unwrap_err(),
            PreprocessingError::InvalidDegree(0)
        );

        let constant: Dataset<f64> = DatasetBase::new(array![[2.], [2.]], array![0., 0.]);
        assert_eq!(
            PolynomialPipeline::params(2).fit(&constant).unwrap_err(),
            PreprocessingError::ZeroVariance(0)
        );
    }
}
