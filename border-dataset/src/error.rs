//! Errors in the library.
use std::path::PathBuf;
use thiserror::Error;

/// Errors in the library.
#[derive(Error, Debug)]
pub enum DatasetError {
    /// No dataset is registered under the name.
    #[error("Dataset not found: {0}")]
    DatasetNotFound(String),

    /// The dataset has no config with the name.
    #[error("Config not found: {config} (dataset {dataset}, known configs: {known})")]
    ConfigNotFound {
        /// Name of the dataset.
        dataset: String,
        /// Requested config.
        config: String,
        /// Comma separated list of known configs.
        known: String,
    },

    /// The dataset has no version with the tag.
    #[error("Version not found: {version} (dataset {dataset}, known versions: {known})")]
    VersionNotFound {
        /// Name of the dataset.
        dataset: String,
        /// Requested version.
        version: String,
        /// Comma separated list of known versions.
        known: String,
    },

    /// A dataset with the same name has already been registered.
    #[error("Dataset already registered: {0}")]
    DuplicateDataset(String),

    /// Version string is not of the form `MAJOR.MINOR.PATCH`.
    #[error("Invalid version: {0}")]
    InvalidVersion(String),

    /// Dataset reference could not be parsed.
    #[error("Invalid dataset name: {0}")]
    InvalidName(String),

    /// Unknown output format.
    #[error("Invalid output format: {0}")]
    InvalidFormat(String),

    /// A value does not have the shape or type declared in the feature schema.
    #[error("Schema mismatch at {path}: expected {expected}, got {actual}")]
    SchemaMismatch {
        /// Path of the feature, e.g. `steps/infos/goal`.
        path: String,
        /// Description of the declared feature.
        expected: String,
        /// Description of the given value.
        actual: String,
    },

    /// Episode boundary flags are inconsistent.
    #[error("Episode boundary violated at step {index}: {reason}")]
    BoundaryViolation {
        /// Index of the offending step.
        index: usize,
        /// What went wrong.
        reason: String,
    },

    /// Failed to read or write a file.
    #[error("I/O error on {path:?}: {source}")]
    Io {
        /// File that was accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// JSON (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML (de)serialization failed.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl DatasetError {
    /// Returns `true` if the error means that a dataset, config or version does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::DatasetNotFound(_) | Self::ConfigNotFound { .. } | Self::VersionNotFound { .. }
        )
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type of the library.
pub type Result<T> = std::result::Result<T, DatasetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_kind() {
        assert!(DatasetError::DatasetNotFound("x".into()).is_not_found());
        assert!(DatasetError::ConfigNotFound {
            dataset: "d".into(),
            config: "c".into(),
            known: "a, b".into(),
        }
        .is_not_found());
        assert!(DatasetError::VersionNotFound {
            dataset: "d".into(),
            version: "9.9.9".into(),
            known: "1.0.0".into(),
        }
        .is_not_found());
        assert!(!DatasetError::InvalidVersion("1.x".into()).is_not_found());
        assert!(!DatasetError::DuplicateDataset("d".into()).is_not_found());
    }

    #[test]
    fn test_message() {
        let err = DatasetError::ConfigNotFound {
            dataset: "d4rl_antmaze".into(),
            config: "does-not-exist".into(),
            known: "umaze-v0".into(),
        };
        assert_eq!(
            err.to_string(),
            "Config not found: does-not-exist (dataset d4rl_antmaze, known configs: umaze-v0)"
        );
    }
}
