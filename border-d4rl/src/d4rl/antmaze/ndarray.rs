//! Observation, action and step types of the AntMaze datasets implemented with ndarray.
//!
//! These types check dimensions on construction and keep their arrays private, so the
//! vectors of an [`Episode`] assembled with [`episode`] have the lengths declared in the
//! schema of [`D4rlAntMaze`](super::D4rlAntMaze).
use super::{DIM_ACT, DIM_GOAL, DIM_OBS, DIM_QPOS, DIM_QVEL};
use border_dataset::{DatasetError, Episode, Result, StepRecord};
use ndarray::{Array1, ArrayViewMut1};
use std::collections::BTreeMap;

fn check_dim(field: &str, expected: usize, value: &Array1<f32>) -> Result<()> {
    if value.len() == expected {
        Ok(())
    } else {
        Err(DatasetError::SchemaMismatch {
            path: format!("steps/{}", field),
            expected: format!("length {}", expected),
            actual: format!("length {}", value.len()),
        })
    }
}

/// Observation of the AntMaze environment stored as ndarray.
///
/// It contains a 29-dimensional vector: the position and orientation of the ant body,
/// joint angles and velocities, and the goal.
#[derive(Clone, Debug, PartialEq)]
pub struct AntMazeObs {
    obs: Array1<f32>,
}

impl AntMazeObs {
    /// Constructs an observation. Fails if `obs` is not 29-dimensional.
    pub fn new(obs: Array1<f32>) -> Result<Self> {
        check_dim("observation", DIM_OBS, &obs)?;
        Ok(Self { obs })
    }

    /// Returns the observation vector.
    pub fn obs(&self) -> &Array1<f32> {
        &self.obs
    }

    /// Mutable view of the observation vector. The length cannot be changed through it.
    pub fn obs_mut(&mut self) -> ArrayViewMut1<'_, f32> {
        self.obs.view_mut()
    }
}

/// Action of the AntMaze environment stored as ndarray.
///
/// Torques applied to the 8 hinge joints.
#[derive(Clone, Debug, PartialEq)]
pub struct AntMazeAct {
    action: Array1<f32>,
}

impl AntMazeAct {
    /// Constructs an action. Fails if `action` is not 8-dimensional.
    pub fn new(action: Array1<f32>) -> Result<Self> {
        check_dim("action", DIM_ACT, &action)?;
        Ok(Self { action })
    }

    /// Returns the action vector.
    pub fn action(&self) -> &Array1<f32> {
        &self.action
    }
}

/// Simulator state recorded with each step.
#[derive(Clone, Debug, PartialEq)]
pub struct AntMazeInfos {
    goal: Array1<f32>,
    qpos: Array1<f32>,
    qvel: Array1<f32>,
}

impl AntMazeInfos {
    /// Constructs infos. Fails on wrong dimensions.
    pub fn new(goal: Array1<f32>, qpos: Array1<f32>, qvel: Array1<f32>) -> Result<Self> {
        check_dim("infos/goal", DIM_GOAL, &goal)?;
        check_dim("infos/qpos", DIM_QPOS, &qpos)?;
        check_dim("infos/qvel", DIM_QVEL, &qvel)?;
        Ok(Self { goal, qpos, qvel })
    }

    /// Goal position.
    pub fn goal(&self) -> &Array1<f32> {
        &self.goal
    }

    /// Joint positions.
    pub fn qpos(&self) -> &Array1<f32> {
        &self.qpos
    }

    /// Joint velocities.
    pub fn qvel(&self) -> &Array1<f32> {
        &self.qvel
    }

    fn into_map(self) -> BTreeMap<String, Array1<f32>> {
        let mut map = BTreeMap::new();
        map.insert("goal".to_string(), self.goal);
        map.insert("qpos".to_string(), self.qpos);
        map.insert("qvel".to_string(), self.qvel);
        map
    }
}

/// A step of the AntMaze datasets without boundary flags.
#[derive(Clone, Debug, PartialEq)]
pub struct AntMazeStep {
    pub obs: AntMazeObs,
    pub act: AntMazeAct,
    pub infos: AntMazeInfos,
    pub reward: f32,
    pub discount: f32,
}

impl AntMazeStep {
    /// A step with all values zero and discount 1.
    pub fn zeros() -> Self {
        Self {
            obs: AntMazeObs {
                obs: Array1::zeros(DIM_OBS),
            },
            act: AntMazeAct {
                action: Array1::zeros(DIM_ACT),
            },
            infos: AntMazeInfos {
                goal: Array1::zeros(DIM_GOAL),
                qpos: Array1::zeros(DIM_QPOS),
                qvel: Array1::zeros(DIM_QVEL),
            },
            reward: 0.0,
            discount: 1.0,
        }
    }
}

/// Assembles an episode, setting the boundary flags.
///
/// The first step is marked `is_first` and the last `is_last`. If `terminal` is `true`,
/// the last step is also marked `is_terminal`; otherwise the episode was truncated.
pub fn episode(steps: Vec<AntMazeStep>, terminal: bool) -> Episode {
    let n = steps.len();
    steps
        .into_iter()
        .enumerate()
        .map(|(ix, step)| StepRecord {
            action: step.act.action,
            discount: step.discount,
            infos: step.infos.into_map(),
            is_first: ix == 0,
            is_last: ix + 1 == n,
            is_terminal: terminal && ix + 1 == n,
            observation: step.obs.obs,
            reward: step.reward,
        })
        .collect::<Vec<_>>()
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::d4rl::antmaze::D4rlAntMaze;
    use border_dataset::DatasetBuilder;

    #[test]
    fn test_dims() {
        assert!(AntMazeObs::new(Array1::zeros(DIM_OBS)).is_ok());
        assert!(AntMazeObs::new(Array1::zeros(27)).is_err());
        assert!(AntMazeAct::new(Array1::zeros(DIM_ACT)).is_ok());
        let err = AntMazeInfos::new(
            Array1::zeros(DIM_GOAL),
            Array1::zeros(DIM_QVEL),
            Array1::zeros(DIM_QVEL),
        )
        .unwrap_err();
        assert!(matches!(err, DatasetError::SchemaMismatch { ref path, .. } if path == "steps/infos/qpos"));
    }

    #[test]
    fn test_accessors() {
        let mut obs = AntMazeObs::new(Array1::zeros(DIM_OBS)).unwrap();
        obs.obs_mut()[3] = 1.5;
        assert_eq!(obs.obs()[3], 1.5);
        assert_eq!(obs.obs().len(), DIM_OBS);

        let infos = AntMazeInfos::new(
            Array1::ones(DIM_GOAL),
            Array1::zeros(DIM_QPOS),
            Array1::zeros(DIM_QVEL),
        )
        .unwrap();
        assert_eq!(infos.goal().sum(), 2.0);
        assert_eq!(infos.qpos().len(), DIM_QPOS);
        assert_eq!(infos.qvel().len(), DIM_QVEL);
        assert_eq!(AntMazeAct::new(Array1::zeros(DIM_ACT)).unwrap().action().len(), DIM_ACT);
    }

    #[test]
    fn test_episode_conforms() {
        let spec = D4rlAntMaze::default().features();
        for &terminal in &[true, false] {
            let ep = episode(vec![AntMazeStep::zeros(); 5], terminal);
            ep.validate(&spec).unwrap();
            assert_eq!(ep.steps[4].is_terminal, terminal);
        }
    }
}
