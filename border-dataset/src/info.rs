//! Descriptive record of a dataset variant.
use crate::{
    error::{DatasetError, Result},
    FeatureSpec, Version,
};
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

/// File name of a saved [`DatasetInfo`].
pub const DATASET_INFO_FILENAME: &str = "dataset_info.json";

/// A named partition of a dataset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitInfo {
    /// Name of the split, e.g. `train`.
    pub name: String,

    /// The number of examples.
    pub num_examples: u64,

    /// The number of shards.
    pub num_shards: u64,
}

/// Metadata and feature schema of a `(dataset, config, version)` triple.
///
/// This is what [`DatasetBuilder::describe`](crate::DatasetBuilder::describe) returns.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DatasetInfo {
    /// Name of the dataset, e.g. `d4rl_antmaze`.
    pub name: String,

    /// Name of the config, e.g. `umaze-v0`.
    pub config: String,

    /// Version of the dataset.
    pub version: Version,

    /// Description of the dataset.
    pub description: String,

    /// Description of the config.
    pub config_description: String,

    /// Homepage of the dataset.
    pub homepage: String,

    /// BibTeX citation.
    pub citation: String,

    /// Schema of each example.
    pub features: FeatureSpec,

    /// Published splits. May be empty.
    pub splits: Vec<SplitInfo>,

    /// Release note of [`Self::version`].
    pub release_notes: String,

    /// Where the source data of the config comes from.
    pub download_url: Option<String>,

    /// `true` if [`Self::config`] is the default config of the dataset.
    pub is_default_config: bool,

    /// `true` if [`Self::version`] is the default version of the dataset.
    pub is_default_version: bool,

    /// `(input, target)` feature names for supervised use, if any.
    pub supervised_keys: Option<(String, String)>,
}

impl DatasetInfo {
    /// Returns `name/config/version`.
    pub fn full_name(&self) -> String {
        format!("{}/{}/{}", self.name, self.config, self.version)
    }

    /// Names of the published splits.
    pub fn split_names(&self) -> Vec<&str> {
        self.splits.iter().map(|s| s.name.as_str()).collect()
    }

    /// Serializes into pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserializes from JSON.
    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Serializes into YAML.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Deserializes from YAML.
    pub fn from_yaml(s: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Directory of this record below `data_dir`, i.e. `data_dir/name/config/version`.
    pub fn dir(&self, data_dir: impl AsRef<Path>) -> PathBuf {
        data_dir
            .as_ref()
            .join(&self.name)
            .join(&self.config)
            .join(self.version.to_string())
    }

    /// Saves as `data_dir/name/config/version/dataset_info.json` and returns the path.
    pub fn save(&self, data_dir: impl AsRef<Path>) -> Result<PathBuf> {
        let dir = self.dir(data_dir);
        fs::create_dir_all(&dir).map_err(|e| DatasetError::io(&dir, e))?;
        let path = dir.join(DATASET_INFO_FILENAME);
        let file = File::create(&path).map_err(|e| DatasetError::io(&path, e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush().map_err(|e| DatasetError::io(&path, e))?;
        log::debug!("Saved {} to {:?}", self.full_name(), path);
        Ok(path)
    }

    /// Loads a record saved with [`DatasetInfo::save`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| DatasetError::io(path, e))?;
        let rdr = BufReader::new(file);
        Ok(serde_json::from_reader(rdr)?)
    }
}
