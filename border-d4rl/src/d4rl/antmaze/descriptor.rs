use super::{DIM_ACT, DIM_GOAL, DIM_OBS, DIM_QPOS, DIM_QVEL};
use crate::d4rl::{BASE_URL, CITATION, DESCRIPTION, HOMEPAGE};
use border_dataset::{
    episode::STEPS, BuilderConfig, DType, DatasetBuilder, FeatureSpec, Version, VersionInfo,
};

/// Name of the dataset.
pub const NAME: &str = "d4rl_antmaze";

/// Config used when none is requested.
pub const DEFAULT_CONFIG: &str = "umaze-v0";

/// `(name, description, source file)` of each config.
pub const CONFIGS: [(&str, &str, &str); 6] = [
    (
        "umaze-v0",
        "U-shaped maze, the ant is commanded to reach a fixed goal from a fixed start.",
        "Ant_maze_u-maze_noisy_multistart_False_multigoal_False_sparse.hdf5",
    ),
    (
        "umaze-diverse-v0",
        "U-shaped maze, trajectories navigate to random goals from random starts.",
        "Ant_maze_u-maze_noisy_multistart_True_multigoal_True_sparse.hdf5",
    ),
    (
        "medium-play-v0",
        "Medium maze, trajectories navigate to hand-picked goals from hand-picked starts.",
        "Ant_maze_big-maze_noisy_multistart_True_multigoal_False_sparse.hdf5",
    ),
    (
        "medium-diverse-v0",
        "Medium maze, trajectories navigate to random goals from random starts.",
        "Ant_maze_big-maze_noisy_multistart_True_multigoal_True_sparse.hdf5",
    ),
    (
        "large-diverse-v0",
        "Large maze, trajectories navigate to random goals from random starts.",
        "Ant_maze_hardest-maze_noisy_multistart_True_multigoal_True_sparse.hdf5",
    ),
    (
        "large-play-v0",
        "Large maze, trajectories navigate to hand-picked goals from hand-picked starts.",
        "Ant_maze_hardest-maze_noisy_multistart_True_multigoal_False_sparse.hdf5",
    ),
];

/// Descriptor of `d4rl_antmaze`.
#[derive(Clone, Debug, Default)]
pub struct D4rlAntMaze {}

impl DatasetBuilder for D4rlAntMaze {
    fn name(&self) -> &str {
        NAME
    }

    fn description(&self) -> &str {
        DESCRIPTION
    }

    fn homepage(&self) -> &str {
        HOMEPAGE
    }

    fn citation(&self) -> &str {
        CITATION
    }

    fn configs(&self) -> Vec<BuilderConfig> {
        CONFIGS
            .iter()
            .map(|(name, description, file)| {
                BuilderConfig::new(*name, *description)
                    .download_url(format!("{}/ant_maze_v2/{}", BASE_URL, file))
            })
            .collect()
    }

    fn default_config_name(&self) -> Option<String> {
        Some(DEFAULT_CONFIG.to_string())
    }

    fn versions(&self) -> Vec<VersionInfo> {
        vec![
            VersionInfo::new(Version::new(1, 0, 0), "Initial release."),
            VersionInfo::new(Version::new(1, 1, 0), "Added is_last."),
        ]
    }

    fn default_version(&self) -> Version {
        Version::new(1, 1, 0)
    }

    fn features(&self) -> FeatureSpec {
        let f32_vec = |n: usize| FeatureSpec::tensor([n], DType::Float32);
        let step = FeatureSpec::dict([
            ("action", f32_vec(DIM_ACT)),
            ("discount", FeatureSpec::scalar(DType::Float32)),
            (
                "infos",
                FeatureSpec::dict([
                    ("goal", f32_vec(DIM_GOAL)),
                    ("qpos", f32_vec(DIM_QPOS)),
                    ("qvel", f32_vec(DIM_QVEL)),
                ]),
            ),
            ("is_first", FeatureSpec::scalar(DType::Bool)),
            ("is_last", FeatureSpec::scalar(DType::Bool)),
            ("is_terminal", FeatureSpec::scalar(DType::Bool)),
            ("observation", f32_vec(DIM_OBS)),
            ("reward", FeatureSpec::scalar(DType::Float32)),
        ]);
        FeatureSpec::dict([(STEPS, FeatureSpec::sequence(step))])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use border_dataset::DatasetError;

    #[test]
    fn test_configs() {
        let configs = D4rlAntMaze::default().configs();
        assert_eq!(configs.len(), 6);
        assert_eq!(configs[0].name, DEFAULT_CONFIG);
        assert_eq!(
            configs[0].download_url.as_deref(),
            Some("http://rail.eecs.berkeley.edu/datasets/offline_rl/ant_maze_v2/Ant_maze_u-maze_noisy_multistart_False_multigoal_False_sparse.hdf5")
        );
    }

    #[test]
    fn test_leaves() {
        let leaves = D4rlAntMaze::default().features().leaves();
        let leaves: Vec<_> = leaves
            .iter()
            .map(|l| (l.path.as_str(), l.shape.clone(), l.dtype))
            .collect();
        assert_eq!(
            leaves,
            vec![
                ("steps/action", vec![8], DType::Float32),
                ("steps/discount", vec![], DType::Float32),
                ("steps/infos/goal", vec![2], DType::Float32),
                ("steps/infos/qpos", vec![15], DType::Float32),
                ("steps/infos/qvel", vec![14], DType::Float32),
                ("steps/is_first", vec![], DType::Bool),
                ("steps/is_last", vec![], DType::Bool),
                ("steps/is_terminal", vec![], DType::Bool),
                ("steps/observation", vec![29], DType::Float32),
                ("steps/reward", vec![], DType::Float32),
            ]
        );
    }

    #[test]
    fn test_release_notes() {
        let b = D4rlAntMaze::default();
        let info = b.describe("large-play-v0", Some(&Version::new(1, 0, 0))).unwrap();
        assert_eq!(info.release_notes, "Initial release.");
        assert!(!info.is_default_version);
        assert!(!info.is_default_config);
    }

    #[test]
    fn test_unknown_version() {
        let err = D4rlAntMaze::default()
            .describe("umaze-v0", Some(&Version::new(1, 2, 0)))
            .unwrap_err();
        assert!(matches!(err, DatasetError::VersionNotFound { ref known, .. } if known == "1.0.0, 1.1.0"));
    }
}
