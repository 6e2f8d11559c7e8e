//! Provisioning and verification of a whole testnet.
use crate::{
    config::{Config, NODE_KEY_FILE, VALIDATOR_KEY_FILE},
    ids::{NodeId, ValidatorAddress},
    keys::KeyGenerator,
    persist::Persister,
    records::{NodeKeyRecord, ValidatorKeyRecord},
};
use anyhow::Context as _;
use rand::{CryptoRng, RngCore};
use std::{io::Write, path::PathBuf};
use tracing::instrument;

/// Identifiers of one provisioned node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSummary {
    /// Config directory holding the node's key files.
    pub dir: PathBuf,
    /// ID derived from the node key.
    pub node_id: NodeId,
    /// Address derived from the validator key.
    pub validator: ValidatorAddress,
}

/// Generates and persists a node key and a validator key for every node of
/// the testnet, reporting each node to `out`.
///
/// Nodes are provisioned in index order. The first error aborts the run;
/// nodes written before it stay on disk.
#[instrument(level = "debug", skip_all, fields(testnet_dir = ?cfg.testnet_dir, num_nodes = %cfg.num_nodes))]
pub fn generate<R: RngCore + CryptoRng>(
    cfg: &Config,
    keys: &mut KeyGenerator<R>,
    persister: &mut impl Persister,
    out: &mut impl Write,
) -> anyhow::Result<Vec<NodeSummary>> {
    writeln!(out, "Generating keys for {} nodes", cfg.num_nodes)?;
    writeln!(out, "Directory: {}", cfg.testnet_dir.display())?;
    writeln!(out)?;

    let mut summaries = Vec::with_capacity(cfg.num_nodes.get());
    for i in cfg.node_indices() {
        let name = Config::node_name(i);
        writeln!(out, "Generating keys for {name}...")?;

        let node_key = keys.generate().with_context(|| format!("{name}: node key"))?;
        let validator_key = keys
            .generate()
            .with_context(|| format!("{name}: validator key"))?;
        let node_record = NodeKeyRecord::new(&node_key);
        let validator_record = ValidatorKeyRecord::new(&validator_key);

        let dir = cfg.node_config_dir(i);
        persister
            .persist(&dir, &node_record, &validator_record)
            .with_context(|| name.clone())?;

        let summary = NodeSummary {
            dir,
            node_id: NodeId::from_public_key(&node_key.public()),
            validator: ValidatorAddress::from_public_key(&validator_key.public()),
        };
        writeln!(out, "  Node ID: {}", summary.node_id)?;
        writeln!(out, "  Validator: {}", validator_record.address)?;
        writeln!(out)?;
        tracing::info!(node = %name, node_id = %summary.node_id, validator = %summary.validator, "provisioned node");
        summaries.push(summary);
    }

    writeln!(out, "All keys generated!")?;
    Ok(summaries)
}

/// Reads back the key files of every node of the testnet and checks that
/// they are self-consistent. Nothing is written.
#[instrument(level = "debug", skip_all, fields(testnet_dir = ?cfg.testnet_dir, num_nodes = %cfg.num_nodes))]
pub fn verify(
    cfg: &Config,
    persister: &impl Persister,
    out: &mut impl Write,
) -> anyhow::Result<Vec<NodeSummary>> {
    writeln!(out, "Verifying keys of {} nodes", cfg.num_nodes)?;
    writeln!(out, "Directory: {}", cfg.testnet_dir.display())?;
    writeln!(out)?;

    let mut summaries = Vec::with_capacity(cfg.num_nodes.get());
    for i in cfg.node_indices() {
        let name = Config::node_name(i);
        writeln!(out, "Verifying keys of {name}...")?;

        let dir = cfg.node_config_dir(i);
        let (node_record, validator_record) =
            persister.load(&dir).with_context(|| name.clone())?;
        let node_id = node_record
            .check()
            .with_context(|| dir.join(NODE_KEY_FILE).display().to_string())?;
        let validator = validator_record
            .check()
            .with_context(|| dir.join(VALIDATOR_KEY_FILE).display().to_string())?;

        writeln!(out, "  Node ID: {node_id}")?;
        writeln!(out, "  Validator: {validator}")?;
        writeln!(out)?;
        tracing::info!(node = %name, %node_id, %validator, "verified node");
        summaries.push(NodeSummary {
            dir,
            node_id,
            validator,
        });
    }

    writeln!(out, "All keys verified!")?;
    Ok(summaries)
}
