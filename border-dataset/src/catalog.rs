//! Registry of dataset descriptors looked up by name.
use crate::{
    error::{DatasetError, Result},
    DatasetBuilder, DatasetInfo, Version,
};
use log::{debug, info};
use std::{collections::BTreeMap, fmt, str::FromStr};

/// Reference to a dataset, written `name[/config][:version]`.
///
/// ```
/// use border_dataset::{DatasetRef, Version};
///
/// let r: DatasetRef = "d4rl_antmaze/umaze-v0:1.0.0".parse().unwrap();
/// assert_eq!(r.name, "d4rl_antmaze");
/// assert_eq!(r.config.as_deref(), Some("umaze-v0"));
/// assert_eq!(r.version, Some(Version::new(1, 0, 0)));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatasetRef {
    /// Name of the dataset.
    pub name: String,

    /// Config, `None` for the default config.
    pub config: Option<String>,

    /// Version, `None` for the default version.
    pub version: Option<Version>,
}

impl DatasetRef {
    /// Constructs a reference to the default config and version of a dataset.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            config: None,
            version: None,
        }
    }

    /// Sets the config.
    pub fn config(mut self, config: impl Into<String>) -> Self {
        self.config = Some(config.into());
        self
    }

    /// Sets the version.
    pub fn version(mut self, version: Version) -> Self {
        self.version = Some(version);
        self
    }
}

impl FromStr for DatasetRef {
    type Err = DatasetError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || DatasetError::InvalidName(s.to_string());

        let (path, version) = match s.split_once(':') {
            Some((path, version)) => (path, Some(version.parse::<Version>()?)),
            None => (s, None),
        };
        let mut parts = path.split('/');
        let name = parts.next().filter(|n| !n.is_empty()).ok_or_else(invalid)?;
        let config = match parts.next() {
            Some(c) if c.is_empty() => return Err(invalid()),
            Some(c) => Some(c.to_string()),
            None => None,
        };
        if parts.next().is_some() {
            return Err(invalid());
        }

        Ok(Self {
            name: name.to_string(),
            config,
            version,
        })
    }
}

impl fmt::Display for DatasetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(config) = &self.config {
            write!(f, "/{}", config)?;
        }
        if let Some(version) = &self.version {
            write!(f, ":{}", version)?;
        }
        Ok(())
    }
}

/// Registry of dataset descriptors.
#[derive(Default)]
pub struct Catalog {
    builders: BTreeMap<String, Box<dyn DatasetBuilder + Send + Sync>>,
}

impl Catalog {
    /// Constructs an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a dataset. Fails if the name is already taken.
    pub fn register<B>(&mut self, builder: B) -> Result<()>
    where
        B: DatasetBuilder + Send + Sync + 'static,
    {
        let name = builder.name().to_string();
        if self.builders.contains_key(&name) {
            return Err(DatasetError::DuplicateDataset(name));
        }
        info!(
            "Registered {} ({} configs, {} versions)",
            name,
            builder.configs().len(),
            builder.versions().len()
        );
        self.builders.insert(name, Box::new(builder));
        Ok(())
    }

    /// Returns the descriptor of a dataset.
    pub fn builder(&self, name: &str) -> Result<&(dyn DatasetBuilder + Send + Sync)> {
        self.builders
            .get(name)
            .map(|b| b.as_ref())
            .ok_or_else(|| DatasetError::DatasetNotFound(name.to_string()))
    }

    /// Names of registered datasets in sorted order.
    pub fn list(&self) -> Vec<&str> {
        self.builders.keys().map(|k| k.as_str()).collect()
    }

    /// Every `name/config/version` known to the catalog.
    pub fn list_full_names(&self) -> Vec<String> {
        let mut names = vec![];
        for builder in self.builders.values() {
            let versions = builder.versions();
            for config in builder.configs() {
                for v in versions.iter() {
                    names.push(format!("{}/{}/{}", builder.name(), config.name, v.version));
                }
            }
        }
        names
    }

    /// Resolves a reference, falling back to the default config and version.
    pub fn describe(&self, dataset: &DatasetRef) -> Result<DatasetInfo> {
        let builder = self.builder(&dataset.name)?;
        let config = match &dataset.config {
            Some(c) => c.clone(),
            None => builder.default_config_name().ok_or_else(|| {
                DatasetError::ConfigNotFound {
                    dataset: dataset.name.clone(),
                    config: "<default>".to_string(),
                    known: String::new(),
                }
            })?,
        };
        debug!("Resolve {} to config {}", dataset, config);
        builder.describe(&config, dataset.version.as_ref())
    }

    /// Parses `name[/config][:version]` and resolves it.
    pub fn describe_str(&self, dataset: &str) -> Result<DatasetInfo> {
        self.describe(&dataset.parse()?)
    }
}

impl fmt::Debug for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Catalog")
            .field("datasets", &self.list())
            .finish()
    }
}
