//! Episodes and steps materialized from a dataset, checked against its schema.
//!
//! An [`Episode`] is an ordered sequence of [`StepRecord`]s. Order is time order and is
//! preserved by every operation here. [`Episode::validate`] checks that an episode
//! conforms to the feature schema of the dataset, including the boundary flags, and
//! [`Episode::to_transitions`] flattens it into `(o_t, a_t, o_t+1, r_t)` tuples.
use crate::{
    error::{DatasetError, Result},
    FeatureSpec,
};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Key of the step sequence in an episode schema.
pub const STEPS: &str = "steps";

/// One timestep of an episode.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    /// Action taken at this step.
    pub action: Array1<f32>,

    /// Discount.
    pub discount: f32,

    /// Additional information, e.g. `goal`, `qpos` and `qvel`.
    pub infos: BTreeMap<String, Array1<f32>>,

    /// `true` for the first step of an episode.
    pub is_first: bool,

    /// `true` for the last step of an episode.
    pub is_last: bool,

    /// `true` if the episode ended in a terminal state.
    pub is_terminal: bool,

    /// Observation at this step.
    pub observation: Array1<f32>,

    /// Reward received after taking [`Self::action`].
    pub reward: f32,
}

/// Batch of transitions flattened from an episode.
///
/// Row `i` holds the transition from step `i` to step `i + 1`.
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionBatch {
    /// Observations, `[n, dim_obs]`.
    pub obs: Array2<f32>,

    /// Actions, `[n, dim_act]`.
    pub act: Array2<f32>,

    /// Next observations, `[n, dim_obs]`.
    pub next_obs: Array2<f32>,

    /// Rewards.
    pub reward: Vec<f32>,

    /// 1 if the next observation is terminal.
    pub is_terminated: Vec<i8>,

    /// 1 if the episode was cut off without reaching a terminal state.
    pub is_truncated: Vec<i8>,
}

impl TransitionBatch {
    /// The number of transitions.
    pub fn len(&self) -> usize {
        self.reward.len()
    }

    /// `true` if the batch has no transition.
    pub fn is_empty(&self) -> bool {
        self.reward.is_empty()
    }
}

/// An ordered sequence of steps.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    /// Steps in time order.
    pub steps: Vec<StepRecord>,
}

impl From<Vec<StepRecord>> for Episode {
    fn from(steps: Vec<StepRecord>) -> Self {
        Self { steps }
    }
}

impl Episode {
    /// Appends a step.
    pub fn push(&mut self, step: StepRecord) {
        self.steps.push(step);
    }

    /// The number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// `true` if the episode has no step.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Sum of rewards.
    pub fn total_reward(&self) -> f32 {
        self.steps.iter().map(|s| s.reward).sum()
    }

    /// Checks shapes against `spec` and the boundary flags.
    ///
    /// `spec` is the schema of an episode, i.e. a record with a [`STEPS`] sequence.
    pub fn validate(&self, spec: &FeatureSpec) -> Result<()> {
        let step_spec = match spec.get(STEPS) {
            Some(FeatureSpec::Sequence(inner)) => inner.as_ref(),
            other => {
                return Err(DatasetError::SchemaMismatch {
                    path: STEPS.to_string(),
                    expected: "sequence of steps".to_string(),
                    actual: format!("{:?}", other),
                })
            }
        };

        for (ix, step) in self.steps.iter().enumerate() {
            validate_step(ix, step, step_spec)?;
        }
        self.validate_boundaries()
    }

    fn validate_boundaries(&self) -> Result<()> {
        let last = match self.steps.len() {
            0 => {
                return Err(DatasetError::BoundaryViolation {
                    index: 0,
                    reason: "episode has no steps".to_string(),
                })
            }
            n => n - 1,
        };
        let violation = |index, reason: &str| DatasetError::BoundaryViolation {
            index,
            reason: reason.to_string(),
        };

        for (ix, step) in self.steps.iter().enumerate() {
            if (ix == 0) != step.is_first {
                return Err(violation(ix, "is_first must be set on the first step only"));
            }
            if (ix == last) != step.is_last {
                return Err(violation(ix, "is_last must be set on the last step only"));
            }
            if step.is_terminal && ix != last {
                return Err(violation(ix, "is_terminal set before the last step"));
            }
        }
        Ok(())
    }

    /// Flattens into transitions in time order.
    ///
    /// The observation of the last step only appears as a next observation, and that of
    /// the first step only as an observation. An episode of `n` steps yields `n - 1`
    /// transitions. The last transition is marked terminated if the last step is
    /// terminal, truncated otherwise.
    pub fn to_transitions(&self) -> Result<TransitionBatch> {
        let n = self.steps.len().saturating_sub(1);
        let dim_obs = self.steps.first().map_or(0, |s| s.observation.len());
        let dim_act = self.steps.first().map_or(0, |s| s.action.len());

        let mut obs = Array2::zeros((n, dim_obs));
        let mut act = Array2::zeros((n, dim_act));
        let mut next_obs = Array2::zeros((n, dim_obs));
        let mut reward = Vec::with_capacity(n);
        let mut is_terminated = vec![0; n];
        let mut is_truncated = vec![0; n];

        for (ix, pair) in self.steps.windows(2).enumerate() {
            let (cur, next) = (&pair[0], &pair[1]);
            check_len(ix, "observation", dim_obs, cur.observation.len())?;
            check_len(ix + 1, "observation", dim_obs, next.observation.len())?;
            check_len(ix, "action", dim_act, cur.action.len())?;
            obs.row_mut(ix).assign(&cur.observation);
            act.row_mut(ix).assign(&cur.action);
            next_obs.row_mut(ix).assign(&next.observation);
            reward.push(cur.reward);
        }

        if let Some(last) = self.steps.last().filter(|_| n > 0) {
            if last.is_terminal {
                is_terminated[n - 1] = 1;
            } else {
                is_truncated[n - 1] = 1;
            }
        }

        log::debug!(
            "{} transitions, reward sum {}",
            n,
            reward.iter().sum::<f32>()
        );

        Ok(TransitionBatch {
            obs,
            act,
            next_obs,
            reward,
            is_terminated,
            is_truncated,
        })
    }
}

fn check_len(ix: usize, field: &str, expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(DatasetError::SchemaMismatch {
            path: format!("{}/{}/{}", STEPS, ix, field),
            expected: format!("length {}", expected),
            actual: format!("length {}", actual),
        })
    }
}

fn expect_leaf<'a>(ix: usize, spec: &'a FeatureSpec, field: &str) -> Result<&'a [usize]> {
    spec.get(field)
        .and_then(|f| f.shape())
        .ok_or_else(|| DatasetError::SchemaMismatch {
            path: format!("{}/{}/{}", STEPS, ix, field),
            expected: "tensor declared in schema".to_string(),
            actual: "not declared".to_string(),
        })
}

fn check_vector(ix: usize, spec: &FeatureSpec, field: &str, value: &Array1<f32>) -> Result<()> {
    let shape = expect_leaf(ix, spec, field)?;
    if shape == value.shape() {
        Ok(())
    } else {
        Err(DatasetError::SchemaMismatch {
            path: format!("{}/{}/{}", STEPS, ix, field),
            expected: format!("shape {:?}", shape),
            actual: format!("shape {:?}", value.shape()),
        })
    }
}

fn check_scalar(ix: usize, spec: &FeatureSpec, field: &str) -> Result<()> {
    let shape = expect_leaf(ix, spec, field)?;
    if shape.is_empty() {
        Ok(())
    } else {
        Err(DatasetError::SchemaMismatch {
            path: format!("{}/{}/{}", STEPS, ix, field),
            expected: format!("shape {:?}", shape),
            actual: "scalar".to_string(),
        })
    }
}

fn validate_step(ix: usize, step: &StepRecord, spec: &FeatureSpec) -> Result<()> {
    check_vector(ix, spec, "action", &step.action)?;
    check_vector(ix, spec, "observation", &step.observation)?;
    for field in ["discount", "reward", "is_first", "is_last", "is_terminal"] {
        check_scalar(ix, spec, field)?;
    }

    let declared = match spec.get("infos") {
        Some(FeatureSpec::Dict(items)) => items,
        _ if step.infos.is_empty() => return Ok(()),
        _ => {
            return Err(DatasetError::SchemaMismatch {
                path: format!("{}/{}/infos", STEPS, ix),
                expected: "no infos".to_string(),
                actual: format!("{:?}", step.infos.keys().collect::<Vec<_>>()),
            })
        }
    };
    let declared_keys: Vec<_> = declared.keys().collect();
    let actual_keys: Vec<_> = step.infos.keys().collect();
    if declared_keys != actual_keys {
        return Err(DatasetError::SchemaMismatch {
            path: format!("{}/{}/infos", STEPS, ix),
            expected: format!("keys {:?}", declared_keys),
            actual: format!("keys {:?}", actual_keys),
        });
    }
    let infos = FeatureSpec::Dict(declared.clone());
    for (key, value) in step.infos.iter() {
        check_vector(ix, &infos, key, value).map_err(|e| match e {
            DatasetError::SchemaMismatch {
                expected, actual, ..
            } => DatasetError::SchemaMismatch {
                path: format!("{}/{}/infos/{}", STEPS, ix, key),
                expected,
                actual,
            },
            e => e,
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DType;
    use ndarray::arr1;

    fn spec() -> FeatureSpec {
        FeatureSpec::dict([(
            STEPS,
            FeatureSpec::sequence(FeatureSpec::dict([
                ("action", FeatureSpec::tensor([2], DType::Float32)),
                ("discount", FeatureSpec::scalar(DType::Float32)),
                (
                    "infos",
                    FeatureSpec::dict([("goal", FeatureSpec::tensor([2], DType::Float32))]),
                ),
                ("is_first", FeatureSpec::scalar(DType::Bool)),
                ("is_last", FeatureSpec::scalar(DType::Bool)),
                ("is_terminal", FeatureSpec::scalar(DType::Bool)),
                ("observation", FeatureSpec::tensor([3], DType::Float32)),
                ("reward", FeatureSpec::scalar(DType::Float32)),
            ])),
        )])
    }

    fn step(t: f32, is_first: bool, is_last: bool, is_terminal: bool) -> StepRecord {
        StepRecord {
            action: arr1(&[t, -t]),
            discount: 1.0,
            infos: std::iter::once(("goal".to_string(), arr1(&[0.5, 0.5]))).collect(),
            is_first,
            is_last,
            is_terminal,
            observation: arr1(&[t, t + 0.5, t + 0.25]),
            reward: t,
        }
    }

    fn episode(n: usize, terminal: bool) -> Episode {
        (0..n)
            .map(|i| step(i as f32, i == 0, i == n - 1, terminal && i == n - 1))
            .collect::<Vec<_>>()
            .into()
    }

    #[test]
    fn test_validate_ok() {
        episode(4, true).validate(&spec()).unwrap();
        episode(4, false).validate(&spec()).unwrap();
        episode(1, true).validate(&spec()).unwrap();
    }

    #[test]
    fn test_validate_shape() {
        let mut ep = episode(3, false);
        ep.steps[1].observation = arr1(&[0.0; 4]);
        let err = ep.validate(&spec()).unwrap_err();
        assert!(matches!(err, DatasetError::SchemaMismatch { ref path, .. } if path == "steps/1/observation"));

        let mut ep = episode(3, false);
        ep.steps[2].infos.insert("goal".to_string(), arr1(&[0.0]));
        let err = ep.validate(&spec()).unwrap_err();
        assert!(matches!(err, DatasetError::SchemaMismatch { ref path, .. } if path == "steps/2/infos/goal"));

        let mut ep = episode(3, false);
        ep.steps[0].infos.insert("qpos".to_string(), arr1(&[0.0]));
        let err = ep.validate(&spec()).unwrap_err();
        assert!(matches!(err, DatasetError::SchemaMismatch { ref path, .. } if path == "steps/0/infos"));
    }

    #[test]
    fn test_validate_boundaries() {
        let err = Episode::default().validate(&spec()).unwrap_err();
        assert!(matches!(err, DatasetError::BoundaryViolation { index: 0, .. }));

        let mut ep = episode(3, false);
        ep.steps[0].is_first = false;
        assert!(matches!(
            ep.validate(&spec()).unwrap_err(),
            DatasetError::BoundaryViolation { index: 0, .. }
        ));

        let mut ep = episode(3, false);
        ep.steps[1].is_first = true;
        assert!(matches!(
            ep.validate(&spec()).unwrap_err(),
            DatasetError::BoundaryViolation { index: 1, .. }
        ));

        let mut ep = episode(3, false);
        ep.steps[2].is_last = false;
        assert!(matches!(
            ep.validate(&spec()).unwrap_err(),
            DatasetError::BoundaryViolation { index: 2, .. }
        ));

        let mut ep = episode(3, false);
        ep.steps[1].is_terminal = true;
        assert!(matches!(
            ep.validate(&spec()).unwrap_err(),
            DatasetError::BoundaryViolation { index: 1, .. }
        ));
    }

    #[test]
    fn test_to_transitions() {
        let batch = episode(4, true).to_transitions().unwrap();
        assert_eq!(batch.len(), 3);
        assert_eq!(batch.obs.shape(), &[3, 3]);
        assert_eq!(batch.act.shape(), &[3, 2]);
        assert_eq!(batch.reward, vec![0.0, 1.0, 2.0]);
        assert_eq!(batch.obs.row(1), arr1(&[1.0, 1.5, 1.25]));
        assert_eq!(batch.next_obs.row(1), arr1(&[2.0, 2.5, 2.25]));
        assert_eq!(batch.is_terminated, vec![0, 0, 1]);
        assert_eq!(batch.is_truncated, vec![0, 0, 0]);

        let batch = episode(3, false).to_transitions().unwrap();
        assert_eq!(batch.is_terminated, vec![0, 0]);
        assert_eq!(batch.is_truncated, vec![0, 1]);
    }

    #[test]
    fn test_to_transitions_length_mismatch() {
        let mut ep = episode(4, true);
        ep.steps[2].observation = arr1(&[0.0, 1.0]);
        let err = ep.to_transitions().unwrap_err();
        assert!(matches!(err, DatasetError::SchemaMismatch { ref path, .. } if path == "steps/2/observation"));

        let mut ep = episode(4, true);
        ep.steps[1].action = arr1(&[0.0]);
        let err = ep.to_transitions().unwrap_err();
        assert!(matches!(err, DatasetError::SchemaMismatch { ref path, .. } if path == "steps/1/action"));
    }

    #[test]
    fn test_to_transitions_short() {
        assert!(episode(1, true).to_transitions().unwrap().is_empty());
        assert!(Episode::default().to_transitions().unwrap().is_empty());
    }

    #[test]
    fn test_total_reward() {
        assert_eq!(episode(4, true).total_reward(), 6.0);
    }
}
