//! Metadata shared by the D4RL datasets.
pub mod antmaze;

/// Homepage of D4RL.
pub const HOMEPAGE: &str = "https://sites.google.com/view/d4rl-anonymous";

/// Base URL of the D4RL source files.
pub const BASE_URL: &str = "http://rail.eecs.berkeley.edu/datasets/offline_rl";

/// Description of D4RL.
pub const DESCRIPTION: &str = "D4RL is an open-source benchmark for offline reinforcement \
learning. It provides standardized environments and datasets for training and \
benchmarking algorithms.

The datasets follow the RLDS format to represent steps and episodes.";

/// BibTeX citation of D4RL.
pub const CITATION: &str = r#"@misc{fu2020d4rl,
    title={D4RL: Datasets for Deep Data-Driven Reinforcement Learning},
    author={Justin Fu and Aviral Kumar and Ofir Nachum and George Tucker and Sergey Levine},
    year={2020},
    eprint={2004.07219},
    archivePrefix={arXiv},
    primaryClass={cs.LG}
}"#;
