use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use biasvar::Dataset;
use csv::ReaderBuilder;
use flate2::read::GzDecoder;
use ndarray::{Array1, Array2};
use serde::Deserialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DatasetError>;

/// An error when reading a dataset
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("no samples found for the {0} split")]
    MissingSplit(Split),
    #[error(transparent)]
    Shape(#[from] ndarray::ShapeError),
}

/// The part of the data a row belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    Train,
    Validation,
    Test,
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Split::Train => write!(f, "train"),
            Split::Validation => write!(f, "validation"),
            Split::Test => write!(f, "test"),
        }
    }
}

#[derive(Debug, Deserialize)]
struct Row {
    split: Split,
    x: f64,
    y: f64,
}

/// Change in water level of a reservoir against the water flowing out of the dam
///
/// A single feature regression problem split into a training, a validation and a test set. Every
/// split keeps the row order of the source file.
#[derive(Debug, Clone, PartialEq)]
pub struct WaterLevel {
    pub train: Dataset<f64>,
    pub validation: Dataset<f64>,
    pub test: Dataset<f64>,
}

impl WaterLevel {
    /// Parses CSV with the header `split,x,y`
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .delimiter(b',')
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut splits: [(Vec<f64>, Vec<f64>); 3] = Default::default();
        for row in reader.deserialize() {
            let row: Row = row?;
            let (xs, ys) = &mut splits[row.split as usize];
            xs.push(row.x);
            ys.push(row.y);
        }

        let [train, validation, test] = splits;

        Ok(WaterLevel {
            train: split_dataset(Split::Train, train)?,
            validation: split_dataset(Split::Validation, validation)?,
            test: split_dataset(Split::Test, test)?,
        })
    }

    /// Parses gzipped CSV with the header `split,x,y`
    pub fn from_gz_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader(GzDecoder::new(reader))
    }
}

fn split_dataset(split: Split, (xs, ys): (Vec<f64>, Vec<f64>)) -> Result<Dataset<f64>> {
    if xs.is_empty() {
        return Err(DatasetError::MissingSplit(split));
    }

    let records = Array2::from_shape_vec((xs.len(), 1), xs)?;
    let targets = Array1::from(ys);

    Ok(Dataset::new(records, targets).with_feature_names(vec!["change in water level"]))
}

/// Read a water level file from disk
///
/// Files ending in `.gz` are decompressed on the fly, everything else is read as plain CSV.
pub fn water_level_from_path<P: AsRef<Path>>(path: P) -> Result<WaterLevel> {
    let path = path.as_ref();
    let file = File::open(path)?;

    if path.extension().map_or(false, |ext| ext == "gz") {
        WaterLevel::from_gz_reader(file)
    } else {
        WaterLevel::from_reader(file)
    }
}

#[cfg(feature = "water_level")]
/// Read in the bundled water level dataset
///
/// 12 training, 21 validation and 21 test samples.
pub fn water_level() -> Result<WaterLevel> {
    let data = include_bytes!("../data/water_level.csv.gz");
    WaterLevel::from_gz_reader(&data[..])
}
