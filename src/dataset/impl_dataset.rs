use super::{AsSingleTargets, DatasetBase, DatasetView, Float, Records};
use crate::error::{Error, Result};
use ndarray::{s, ArrayBase, Data, Ix2};

/// Implementation without constraints on records and targets
///
/// This implementation block provides methods for the creation and mutation of datasets. This
/// includes substituting the records, return the records etc.
impl<R: Records, T> DatasetBase<R, T> {
    /// Create a new dataset from records and targets
    ///
    /// # Example
    ///
    /// ```ignore
    /// let dataset = Dataset::new(records, targets);
    /// ```
    pub fn new(records: R, targets: T) -> DatasetBase<R, T> {
        DatasetBase {
            records,
            targets,
            feature_names: Vec::new(),
        }
    }

    /// Returns reference to targets
    pub fn targets(&self) -> &T {
        &self.targets
    }

    /// Returns reference to records
    pub fn records(&self) -> &R {
        &self.records
    }

    /// Returns feature names
    ///
    /// A feature name gives a human-readable string describing the purpose of a single feature.
    /// This allow the reader to understand its purpose while analysing results, for example
    /// correlation analysis or feature importance.
    pub fn feature_names(&self) -> Vec<String> {
        if !self.feature_names.is_empty() {
            self.feature_names.clone()
        } else {
            (0..self.records.nfeatures())
                .map(|idx| format!("feature-{}", idx))
                .collect()
        }
    }

    /// Updates the records of a dataset
    ///
    /// This function overwrites the records in a dataset. Feature names are dropped, as the new
    /// records may describe different features.
    pub fn with_records<T2: Records>(self, records: T2) -> DatasetBase<T2, T> {
        DatasetBase {
            records,
            targets: self.targets,
            feature_names: Vec::new(),
        }
    }

    /// Set feature names
    pub fn with_feature_names<I: Into<String>>(mut self, names: Vec<I>) -> DatasetBase<R, T> {
        let feature_names = names.into_iter().map(|x| x.into()).collect();

        self.feature_names = feature_names;

        self
    }
}

impl<F: Float, D: Data<Elem = F>, T: AsSingleTargets<Elem = F>> DatasetBase<ArrayBase<D, Ix2>, T> {
    /// Checks that every record has exactly one target
    ///
    /// Returns `Error::NotEnoughSamples` for an empty dataset and `Error::MismatchedShapes` if
    /// the number of records and the number of targets disagree.
    pub fn check_shapes(&self) -> Result<()> {
        let (nrecords, ntargets) = (self.records.nrows(), self.targets.as_single_targets().len());

        if nrecords != ntargets {
            Err(Error::MismatchedShapes(nrecords, ntargets))
        } else if nrecords == 0 {
            Err(Error::NotEnoughSamples)
        } else {
            Ok(())
        }
    }

    /// Creates a view of the first `n` samples
    ///
    /// The prefix keeps the original sample order. If `n` is larger than the number of samples
    /// the whole dataset is returned.
    pub fn head(&self, n: usize) -> DatasetView<'_, F> {
        let n = n.min(self.records.nrows());

        DatasetBase {
            records: self.records.slice(s![..n, ..]),
            targets: self.targets.as_single_targets().slice_move(s![..n]),
            feature_names: self.feature_names.clone(),
        }
    }
}
