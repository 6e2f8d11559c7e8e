//! Test doubles, intended for use in testing.
use crate::{
    persist::Persister,
    records::{NodeKeyRecord, ValidatorKeyRecord},
};
use anyhow::Context as _;
use rand::{CryptoRng, RngCore};
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

/// Persister keeping the key files in memory, keyed by directory.
#[derive(Debug, Default)]
pub struct MemPersister {
    /// Stored records.
    pub nodes: BTreeMap<PathBuf, (NodeKeyRecord, ValidatorKeyRecord)>,
    /// Number of successful `persist` calls after which `persist` fails.
    pub fail_after: Option<usize>,
}

impl Persister for MemPersister {
    fn persist(
        &mut self,
        dir: &Path,
        node_key: &NodeKeyRecord,
        validator_key: &ValidatorKeyRecord,
    ) -> anyhow::Result<()> {
        if self.fail_after == Some(self.nodes.len()) {
            anyhow::bail!("injected failure at {dir:?}");
        }
        self.nodes
            .insert(dir.into(), (node_key.clone(), validator_key.clone()));
        Ok(())
    }

    fn load(&self, dir: &Path) -> anyhow::Result<(NodeKeyRecord, ValidatorKeyRecord)> {
        self.nodes
            .get(dir)
            .cloned()
            .with_context(|| format!("no key files in {dir:?}"))
    }
}

/// Entropy source that is never available.
#[derive(Debug, Default)]
pub struct FailingRng;

impl RngCore for FailingRng {
    fn next_u32(&mut self) -> u32 {
        let mut buf = [0; 4];
        self.fill_bytes(&mut buf);
        u32::from_le_bytes(buf)
    }

    fn next_u64(&mut self) -> u64 {
        let mut buf = [0; 8];
        self.fill_bytes(&mut buf);
        u64::from_le_bytes(buf)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        if let Err(err) = self.try_fill_bytes(dest) {
            panic!("FailingRng: {err}");
        }
    }

    fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand::Error> {
        Err(rand::Error::new("entropy source unavailable"))
    }
}

impl CryptoRng for FailingRng {}
