//! Testnet layout configuration.
use std::{num::NonZeroUsize, path::PathBuf};

/// Directory used when no testnet directory is given.
pub const DEFAULT_TESTNET_DIR: &str = "testnet-proper";
/// Number of nodes provisioned when no count is given.
pub const DEFAULT_NUM_NODES: NonZeroUsize = match NonZeroUsize::new(3) {
    Some(n) => n,
    None => unreachable!(),
};

/// Home directory of a node, relative to the node directory.
pub const NODE_HOME_DIR: &str = ".volnix";
/// Config directory, relative to the node home.
pub const CONFIG_DIR: &str = "config";
/// File name of the node identity key.
pub const NODE_KEY_FILE: &str = "node_key.json";
/// File name of the validator signing key.
pub const VALIDATOR_KEY_FILE: &str = "priv_validator_key.json";

/// Which testnet to provision and how many nodes it has.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Root directory holding one `node<i>` directory per node.
    pub testnet_dir: PathBuf,
    /// Number of nodes, indexed `0..num_nodes`.
    pub num_nodes: NonZeroUsize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            testnet_dir: DEFAULT_TESTNET_DIR.into(),
            num_nodes: DEFAULT_NUM_NODES,
        }
    }
}

impl Config {
    /// Name of the node with the given index, e.g. `node0`.
    pub fn node_name(index: usize) -> String {
        format!("node{index}")
    }

    /// Config directory of the node with the given index:
    /// `<testnet_dir>/node<i>/.volnix/config`.
    pub fn node_config_dir(&self, index: usize) -> PathBuf {
        self.testnet_dir
            .join(Self::node_name(index))
            .join(NODE_HOME_DIR)
            .join(CONFIG_DIR)
    }

    /// Indices of all the nodes of the testnet.
    pub fn node_indices(&self) -> std::ops::Range<usize> {
        0..self.num_nodes.get()
    }
}

