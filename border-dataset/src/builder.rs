//! Interface of dataset descriptors.
use crate::{
    error::{DatasetError, Result},
    DatasetInfo, FeatureSpec, SplitInfo, Version, VersionInfo,
};
use serde::{Deserialize, Serialize};

/// A named variant of a dataset.
///
/// All configs of a dataset share the feature schema unless the builder overrides
/// [`DatasetBuilder::features_for`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuilderConfig {
    /// Name of the config, e.g. `umaze-v0`.
    pub name: String,

    /// Description of the config.
    pub description: String,

    /// Where the source data of the config comes from.
    pub download_url: Option<String>,
}

impl BuilderConfig {
    /// Constructs a [`BuilderConfig`].
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            download_url: None,
        }
    }

    /// Sets the URL of the source data.
    pub fn download_url(mut self, url: impl Into<String>) -> Self {
        self.download_url = Some(url.into());
        self
    }
}

/// A read-only descriptor of a dataset with one or more configs and versions.
///
/// Implementors provide static metadata. [`DatasetBuilder::describe`] resolves a
/// `(config, version)` pair into a [`DatasetInfo`] without any side effect.
pub trait DatasetBuilder {
    /// Name of the dataset.
    fn name(&self) -> &str;

    /// Description of the dataset.
    fn description(&self) -> &str;

    /// Homepage of the dataset.
    fn homepage(&self) -> &str;

    /// BibTeX citation.
    fn citation(&self) -> &str;

    /// Configs in declaration order.
    fn configs(&self) -> Vec<BuilderConfig>;

    /// Released versions.
    fn versions(&self) -> Vec<VersionInfo>;

    /// Version used when none is requested.
    fn default_version(&self) -> Version;

    /// Feature schema shared by all configs and versions.
    fn features(&self) -> FeatureSpec;

    /// Name of the config used when none is requested. Defaults to the first config.
    fn default_config_name(&self) -> Option<String> {
        self.configs().first().map(|c| c.name.clone())
    }

    /// Feature schema of a specific config and version. Defaults to [`Self::features`].
    fn features_for(&self, _config: &BuilderConfig, _version: &Version) -> FeatureSpec {
        self.features()
    }

    /// Published splits. Defaults to none.
    fn splits(&self, _config: &BuilderConfig, _version: &Version) -> Vec<SplitInfo> {
        vec![]
    }

    /// `(input, target)` feature names for supervised use. Defaults to none.
    fn supervised_keys(&self) -> Option<(String, String)> {
        None
    }

    /// Looks up a config by name.
    fn config(&self, name: &str) -> Result<BuilderConfig> {
        let configs = self.configs();
        match configs.iter().find(|c| c.name == name) {
            Some(c) => Ok(c.clone()),
            None => Err(DatasetError::ConfigNotFound {
                dataset: self.name().to_string(),
                config: name.to_string(),
                known: configs
                    .iter()
                    .map(|c| c.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            }),
        }
    }

    /// Looks up a version, resolving `None` to [`Self::default_version`].
    fn version(&self, version: Option<&Version>) -> Result<VersionInfo> {
        let version = version.copied().unwrap_or_else(|| self.default_version());
        let versions = self.versions();
        match versions.iter().find(|v| v.version == version) {
            Some(v) => Ok(v.clone()),
            None => Err(DatasetError::VersionNotFound {
                dataset: self.name().to_string(),
                version: version.to_string(),
                known: versions
                    .iter()
                    .map(|v| v.version.to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
            }),
        }
    }

    /// Returns the record of a config and version.
    ///
    /// `version = None` means the default version. Fails with
    /// [`DatasetError::ConfigNotFound`] or [`DatasetError::VersionNotFound`]
    /// if either is unknown.
    fn describe(&self, config: &str, version: Option<&Version>) -> Result<DatasetInfo> {
        let config = self.config(config)?;
        let version = self.version(version)?;
        let default_config = self.default_config_name();

        Ok(DatasetInfo {
            name: self.name().to_string(),
            features: self.features_for(&config, &version.version),
            splits: self.splits(&config, &version.version),
            is_default_config: default_config.as_deref() == Some(config.name.as_str()),
            is_default_version: version.version == self.default_version(),
            config: config.name,
            config_description: config.description,
            download_url: config.download_url,
            version: version.version,
            release_notes: version.release_notes,
            description: self.description().to_string(),
            homepage: self.homepage().to_string(),
            citation: self.citation().to_string(),
            supervised_keys: self.supervised_keys(),
        })
    }

    /// Returns the record of the default config and version.
    fn describe_default(&self) -> Result<DatasetInfo> {
        match self.default_config_name() {
            Some(config) => self.describe(&config, None),
            None => Err(DatasetError::ConfigNotFound {
                dataset: self.name().to_string(),
                config: "<default>".to_string(),
                known: String::new(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DType;

    struct Toy;

    impl DatasetBuilder for Toy {
        fn name(&self) -> &str {
            "toy"
        }

        fn description(&self) -> &str {
            "Toy dataset."
        }

        fn homepage(&self) -> &str {
            "https://example.org"
        }

        fn citation(&self) -> &str {
            "@misc{toy}"
        }

        fn configs(&self) -> Vec<BuilderConfig> {
            vec![
                BuilderConfig::new("a", "Config a."),
                BuilderConfig::new("b", "Config b.").download_url("https://example.org/b"),
            ]
        }

        fn versions(&self) -> Vec<VersionInfo> {
            vec![
                VersionInfo::new(Version::new(0, 1, 0), "First."),
                VersionInfo::new(Version::new(0, 2, 0), "Second."),
            ]
        }

        fn default_version(&self) -> Version {
            Version::new(0, 1, 0)
        }

        fn features(&self) -> FeatureSpec {
            FeatureSpec::dict([("x", FeatureSpec::scalar(DType::Int64))])
        }
    }

    #[test]
    fn test_describe_default_version() {
        let info = Toy.describe("b", None).unwrap();
        assert_eq!(info.full_name(), "toy/b/0.1.0");
        assert_eq!(info.release_notes, "First.");
        assert_eq!(info.download_url.as_deref(), Some("https://example.org/b"));
        assert!(!info.is_default_config);
        assert!(info.is_default_version);
    }

    #[test]
    fn test_describe_default() {
        let info = Toy.describe_default().unwrap();
        assert_eq!(info.config, "a");
        assert!(info.is_default_config);
    }

    #[test]
    fn test_describe_not_found() {
        let err = Toy.describe("c", None).unwrap_err();
        assert!(err.is_not_found());
        assert!(matches!(err, DatasetError::ConfigNotFound { ref known, .. } if known == "a, b"));

        let err = Toy.describe("a", Some(&Version::new(9, 0, 0))).unwrap_err();
        assert!(matches!(err, DatasetError::VersionNotFound { .. }));
    }
}
