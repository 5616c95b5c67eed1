//! Feature schema of dataset examples.
//!
//! A schema is a tree of [`FeatureSpec`]. Leaves are fixed-shape tensors, inner nodes are
//! records ([`FeatureSpec::Dict`]) or variable-length, order-preserving sequences
//! ([`FeatureSpec::Sequence`]). An RLDS-style episode is a record with a `steps` sequence.
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt};

/// Element type of a tensor feature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DType {
    /// 32-bit float.
    Float32,
    /// 64-bit float.
    Float64,
    /// 32-bit signed integer.
    Int32,
    /// 64-bit signed integer.
    Int64,
    /// Boolean.
    Bool,
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Bool => "bool",
        };
        f.write_str(s)
    }
}

/// Declared shape and type of a feature.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureSpec {
    /// Fixed-shape tensor. An empty shape denotes a scalar.
    Tensor {
        /// Shape of the tensor.
        shape: Vec<usize>,
        /// Element type.
        dtype: DType,
    },

    /// Nested record. Keys are kept sorted.
    Dict(BTreeMap<String, FeatureSpec>),

    /// Variable-length sequence of the inner feature. Order is significant.
    Sequence(Box<FeatureSpec>),
}

/// A tensor feature with its full path in the schema.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeatureLeaf {
    /// `/`-separated path, e.g. `steps/infos/goal`.
    pub path: String,

    /// Shape of the tensor.
    pub shape: Vec<usize>,

    /// Element type.
    pub dtype: DType,
}

impl FeatureSpec {
    /// Scalar feature.
    pub fn scalar(dtype: DType) -> Self {
        Self::Tensor {
            shape: vec![],
            dtype,
        }
    }

    /// Tensor feature with the given shape.
    pub fn tensor(shape: impl Into<Vec<usize>>, dtype: DType) -> Self {
        Self::Tensor {
            shape: shape.into(),
            dtype,
        }
    }

    /// Record feature.
    pub fn dict<K, I>(items: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, FeatureSpec)>,
    {
        Self::Dict(items.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Sequence feature.
    pub fn sequence(inner: FeatureSpec) -> Self {
        Self::Sequence(Box::new(inner))
    }

    /// Looks up a nested feature by a `/`-separated path.
    ///
    /// Sequences are transparent, so `steps/observation` addresses the `observation`
    /// field of each element of the `steps` sequence. An empty path returns `self`.
    pub fn get(&self, path: &str) -> Option<&FeatureSpec> {
        let mut node = self;
        for key in path.split('/').filter(|k| !k.is_empty()) {
            while let Self::Sequence(inner) = node {
                node = inner;
            }
            node = match node {
                Self::Dict(items) => items.get(key)?,
                _ => return None,
            };
        }
        Some(node)
    }

    /// Shape of a tensor feature, `None` for records and sequences.
    pub fn shape(&self) -> Option<&[usize]> {
        match self {
            Self::Tensor { shape, .. } => Some(shape),
            _ => None,
        }
    }

    /// Element type of a tensor feature, `None` for records and sequences.
    pub fn dtype(&self) -> Option<DType> {
        match self {
            Self::Tensor { dtype, .. } => Some(*dtype),
            _ => None,
        }
    }

    /// Number of elements of a tensor feature, 1 for scalars.
    pub fn num_elements(&self) -> Option<usize> {
        self.shape().map(|s| s.iter().product())
    }

    /// Flattens the schema into tensor leaves in path order.
    pub fn leaves(&self) -> Vec<FeatureLeaf> {
        let mut leaves = vec![];
        self.collect_leaves("", &mut leaves);
        leaves
    }

    fn collect_leaves(&self, prefix: &str, leaves: &mut Vec<FeatureLeaf>) {
        match self {
            Self::Tensor { shape, dtype } => leaves.push(FeatureLeaf {
                path: prefix.to_string(),
                shape: shape.clone(),
                dtype: *dtype,
            }),
            Self::Dict(items) => {
                for (key, spec) in items.iter() {
                    let path = if prefix.is_empty() {
                        key.clone()
                    } else {
                        format!("{}/{}", prefix, key)
                    };
                    spec.collect_leaves(&path, leaves);
                }
            }
            Self::Sequence(inner) => inner.collect_leaves(prefix, leaves),
        }
    }

    fn fmt_indent(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        match self {
            Self::Tensor { shape, dtype } if shape.is_empty() => write!(f, "{}", dtype),
            Self::Tensor { shape, dtype } => {
                write!(f, "Tensor(shape={}, dtype={})", fmt_shape(shape), dtype)
            }
            Self::Dict(items) => {
                writeln!(f, "FeaturesDict({{")?;
                fmt_items(f, items, depth + 1)?;
                write!(f, "{}}})", indent(depth))
            }
            Self::Sequence(inner) => match inner.as_ref() {
                Self::Dict(items) => {
                    writeln!(f, "Dataset({{")?;
                    fmt_items(f, items, depth + 1)?;
                    write!(f, "{}}})", indent(depth))
                }
                other => {
                    write!(f, "Sequence(")?;
                    other.fmt_indent(f, depth)?;
                    write!(f, ")")
                }
            },
        }
    }
}

fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn fmt_shape(shape: &[usize]) -> String {
    match shape {
        [n] => format!("({},)", n),
        _ => format!(
            "({})",
            shape
                .iter()
                .map(|n| n.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}

fn fmt_items(
    f: &mut fmt::Formatter<'_>,
    items: &BTreeMap<String, FeatureSpec>,
    depth: usize,
) -> fmt::Result {
    for (key, spec) in items.iter() {
        write!(f, "{}'{}': ", indent(depth), key)?;
        spec.fmt_indent(f, depth)?;
        writeln!(f, ",")?;
    }
    Ok(())
}

impl fmt::Display for FeatureSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_indent(f, 0)
    }
}
