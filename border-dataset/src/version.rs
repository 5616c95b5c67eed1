//! Semantic version tags of datasets.
use crate::error::{DatasetError, Result};
use serde::{Deserialize, Serialize};
use std::{convert::TryFrom, fmt, str::FromStr};

/// Version of a dataset, `MAJOR.MINOR.PATCH`.
///
/// Versions are totally ordered by `(major, minor, patch)` and serialized as strings.
///
/// ```
/// use border_dataset::Version;
///
/// let v: Version = "1.1.0".parse().unwrap();
/// assert_eq!(v, Version::new(1, 1, 0));
/// assert!(v > Version::new(1, 0, 0));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version {
    /// Major version.
    pub major: u32,

    /// Minor version.
    pub minor: u32,

    /// Patch version.
    pub patch: u32,
}

impl Version {
    /// Constructs a [`Version`].
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for Version {
    type Err = DatasetError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || DatasetError::InvalidVersion(s.to_string());
        let parts = s
            .split('.')
            .map(|p| {
                // `u32::from_str` accepts a leading `+`
                if p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(invalid());
                }
                p.parse::<u32>().map_err(|_| invalid())
            })
            .collect::<Result<Vec<_>>>()?;

        match parts.as_slice() {
            [major, minor, patch] => Ok(Self::new(*major, *minor, *patch)),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for Version {
    type Error = DatasetError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Version> for String {
    fn from(v: Version) -> Self {
        v.to_string()
    }
}

/// A released version together with its release note.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInfo {
    /// Version tag.
    pub version: Version,

    /// What changed in this version.
    pub release_notes: String,
}

impl VersionInfo {
    /// Constructs a [`VersionInfo`].
    pub fn new(version: Version, release_notes: impl Into<String>) -> Self {
        Self {
            version,
            release_notes: release_notes.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("1.0.0".parse::<Version>().unwrap(), Version::new(1, 0, 0));
        assert_eq!("10.2.33".parse::<Version>().unwrap(), Version::new(10, 2, 33));
    }

    #[test]
    fn test_parse_invalid() {
        for s in ["", "1", "1.0", "1.0.0.0", "1.x.0", "-1.0.0", "+1.0.0", "1..0", " 1.0.0"] {
            let err = s.parse::<Version>().unwrap_err();
            assert!(matches!(err, DatasetError::InvalidVersion(_)), "{}", s);
        }
    }

    #[test]
    fn test_order() {
        let mut vs = vec![
            Version::new(1, 1, 0),
            Version::new(0, 9, 9),
            Version::new(1, 0, 10),
        ];
        vs.sort();
        assert_eq!(
            vs,
            vec![
                Version::new(0, 9, 9),
                Version::new(1, 0, 10),
                Version::new(1, 1, 0)
            ]
        );
    }

    #[test]
    fn test_serde_as_string() {
        let v = Version::new(1, 1, 0);
        assert_eq!(serde_json::to_string(&v).unwrap(), "\"1.1.0\"");
        let w: Version = serde_json::from_str("\"1.1.0\"").unwrap();
        assert_eq!(v, w);
        assert!(serde_json::from_str::<Version>("\"1.1\"").is_err());
    }
}
