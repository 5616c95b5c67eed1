//! Configuration of a catalog front end.
use crate::{
    error::{DatasetError, Result},
    DatasetInfo,
};
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    fs::File,
    io::{BufReader, Write},
    path::{Path, PathBuf},
    str::FromStr,
};

/// Name of the directory below the home directory where records are exported by default.
pub const DEFAULT_DATA_DIR: &str = "tensorflow_datasets";

/// Text format of rendered records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    Json,

    /// YAML.
    Yaml,
}

impl OutputFormat {
    /// Renders a record.
    pub fn render(&self, info: &DatasetInfo) -> Result<String> {
        match self {
            Self::Json => info.to_json(),
            Self::Yaml => info.to_yaml(),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str("json"),
            Self::Yaml => f.write_str("yaml"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = DatasetError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(DatasetError::InvalidFormat(s.to_string())),
        }
    }
}

/// Configuration of a catalog front end.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct CatalogConfig {
    /// Root directory of exported records.
    pub data_dir: PathBuf,

    /// Format of rendered records.
    pub format: OutputFormat,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        let data_dir = match dirs::home_dir() {
            Some(home) => home.join(DEFAULT_DATA_DIR),
            None => PathBuf::from(".").join(DEFAULT_DATA_DIR),
        };
        Self {
            data_dir,
            format: OutputFormat::Json,
        }
    }
}

impl CatalogConfig {
    /// Sets the root directory of exported records.
    pub fn data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    /// Sets the format of rendered records.
    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Constructs [`CatalogConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| DatasetError::io(path, e))?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`CatalogConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut file = File::create(path).map_err(|e| DatasetError::io(path, e))?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())
            .map_err(|e| DatasetError::io(path, e))?;
        Ok(())
    }
}
