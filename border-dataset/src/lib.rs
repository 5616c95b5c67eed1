#![warn(missing_docs)]
//! Declarative descriptors for offline reinforcement learning datasets.
//!
//! A dataset is identified by a name and comes in one or more configs, each released
//! in one or more versions. A descriptor, an implementation of [`DatasetBuilder`],
//! pairs identifying metadata (description, homepage, citation, versions) with the
//! [`FeatureSpec`] of each example. [`DatasetBuilder::describe`] resolves a
//! `(config, version)` pair into a [`DatasetInfo`].
//!
//! Descriptors are collected in a [`Catalog`] and looked up by references like
//! `d4rl_antmaze/umaze-v0:1.1.0`. Episodes materialized by a data loading framework
//! can be checked against the schema with [`Episode::validate`].
//!
//! # Example
//!
//! ```
//! use border_dataset::{
//!     BuilderConfig, Catalog, DatasetBuilder, DType, FeatureSpec, Version, VersionInfo,
//! };
//!
//! struct Toy;
//!
//! impl DatasetBuilder for Toy {
//!     fn name(&self) -> &str { "toy" }
//!     fn description(&self) -> &str { "Toy dataset." }
//!     fn homepage(&self) -> &str { "https://example.org" }
//!     fn citation(&self) -> &str { "" }
//!     fn configs(&self) -> Vec<BuilderConfig> {
//!         vec![BuilderConfig::new("default", "Default config.")]
//!     }
//!     fn versions(&self) -> Vec<VersionInfo> {
//!         vec![VersionInfo::new(Version::new(1, 0, 0), "Initial release.")]
//!     }
//!     fn default_version(&self) -> Version { Version::new(1, 0, 0) }
//!     fn features(&self) -> FeatureSpec {
//!         FeatureSpec::dict([("x", FeatureSpec::tensor([4], DType::Float32))])
//!     }
//! }
//!
//! let mut catalog = Catalog::new();
//! catalog.register(Toy).unwrap();
//! let info = catalog.describe_str("toy").unwrap();
//! assert_eq!(info.full_name(), "toy/default/1.0.0");
//! assert!(catalog.describe_str("toy/other").unwrap_err().is_not_found());
//! ```
mod builder;
mod catalog;
pub mod config;
pub mod episode;
pub mod error;
mod features;
mod info;
mod version;

pub use builder::{BuilderConfig, DatasetBuilder};
pub use catalog::{Catalog, DatasetRef};
pub use config::{CatalogConfig, OutputFormat};
pub use episode::{Episode, StepRecord, TransitionBatch};
pub use error::{DatasetError, Result};
pub use features::{DType, FeatureLeaf, FeatureSpec};
pub use info::{DatasetInfo, SplitInfo, DATASET_INFO_FILENAME};
pub use version::{Version, VersionInfo};
