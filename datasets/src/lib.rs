//! `biasvar-datasets` provides the datasets used by the `biasvar` examples and tests.
//!
//! ## The Big Picture
//!
//! `biasvar-datasets` is a crate in the `biasvar` workspace, a toolkit for fitting regularized
//! regression models and diagnosing their bias and variance.
//!
//! ## Current State
//!
//! Currently the following datasets are provided:
//!
//! * `["water_level"]` : change in water level of a reservoir against the water flowing out of
//! a dam, split into training, validation and test sets
//!
//! along with methods to easily load them. Each split is returned as a
//! [`biasvar::Dataset`] with one record column and continuous targets.
//!
//! ## Using a dataset
//!
//! The water level data is enabled by default. Load it in your example or tests as
//! ```ignore
//! let biasvar_datasets::WaterLevel { train, validation, test } =
//!     biasvar_datasets::water_level()?;
//! ```
//! Files in the same `split,x,y` CSV layout can be read with
//! [`water_level_from_path`].

mod dataset;

#[cfg(feature = "water_level")]
pub use dataset::water_level;
pub use dataset::{water_level_from_path, DatasetError, Result, Split, WaterLevel};
