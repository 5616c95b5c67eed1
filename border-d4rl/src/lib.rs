//! Descriptors of the [D4RL](https://github.com/rail-berkeley/d4rl) datasets.
//!
//! The datasets are described in the RLDS layout: each example is an episode with a
//! `steps` sequence, and each step holds an action, an observation, a reward, a
//! discount, boundary flags and environment specific `infos`.
//!
//! # Example
//!
//! ```
//! # use anyhow::Result;
//! use border_d4rl::d4rl::antmaze::{DIM_ACT, DIM_OBS};
//!
//! fn main() -> Result<()> {
//!     let catalog = border_d4rl::catalog()?;
//!
//!     // Default config and version
//!     let info = catalog.describe_str("d4rl_antmaze")?;
//!     assert_eq!(info.full_name(), "d4rl_antmaze/umaze-v0/1.1.0");
//!
//!     let obs = info.features.get("steps/observation").unwrap();
//!     assert_eq!(obs.shape(), Some(&[DIM_OBS][..]));
//!     let act = info.features.get("steps/action").unwrap();
//!     assert_eq!(act.shape(), Some(&[DIM_ACT][..]));
//!
//!     // Unknown configs are reported as not found
//!     let err = catalog
//!         .describe_str("d4rl_antmaze/does-not-exist:1.0.0")
//!         .unwrap_err();
//!     assert!(err.is_not_found());
//!
//!     Ok(())
//! }
//! ```
pub mod d4rl;
use border_dataset::{Catalog, Result};

/// Registers all D4RL descriptors in `catalog`.
///
/// Fails with [`DatasetError::DuplicateDataset`](border_dataset::DatasetError::DuplicateDataset)
/// if a D4RL dataset is already registered.
pub fn register(catalog: &mut Catalog) -> Result<()> {
    catalog.register(d4rl::antmaze::D4rlAntMaze::default())?;
    log::info!("Registered D4RL datasets: {}", d4rl::antmaze::NAME);
    Ok(())
}

/// Returns a catalog with all D4RL descriptors.
pub fn catalog() -> Result<Catalog> {
    let mut catalog = Catalog::new();
    register(&mut catalog)?;
    Ok(catalog)
}
