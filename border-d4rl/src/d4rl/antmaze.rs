//! Descriptor of the [Ant Maze datasets](https://github.com/rail-berkeley/d4rl/wiki/Tasks#antmaze).
//!
//! An 8-DoF ant navigates a maze to reach a goal. The six configs differ in maze size
//! (`umaze`, `medium`, `large`) and in how the trajectories were collected (`play`,
//! `diverse`) but share one feature schema.
mod descriptor;
pub mod ndarray;
pub use descriptor::{D4rlAntMaze, CONFIGS, DEFAULT_CONFIG, NAME};

/// Dimension of observations.
pub const DIM_OBS: usize = 29;

/// Dimension of actions.
pub const DIM_ACT: usize = 8;

/// Dimension of the goal in `infos`.
pub const DIM_GOAL: usize = 2;

/// Dimension of joint positions in `infos`.
pub const DIM_QPOS: usize = 15;

/// Dimension of joint velocities in `infos`.
pub const DIM_QVEL: usize = 14;
