//! Writing key files to disk.
use crate::{
    config::{NODE_KEY_FILE, VALIDATOR_KEY_FILE},
    records::{NodeKeyRecord, ValidatorKeyRecord},
};
use anyhow::Context as _;
use serde_json::{ser::PrettyFormatter, Serializer};
use std::{fs, io::Write as _, path::Path};

/// Decodes a JSON document, rejecting trailing data.
pub fn decode_json<T: serde::de::DeserializeOwned>(json: &str) -> anyhow::Result<T> {
    let mut d = serde_json::Deserializer::from_str(json);
    let p = T::deserialize(&mut d)?;
    d.end()?;
    Ok(p)
}

/// Encodes a value as JSON indented with 2 spaces, fields in declaration order.
pub fn encode_json<T: serde::ser::Serialize>(x: &T) -> anyhow::Result<String> {
    let mut s = Serializer::with_formatter(vec![], PrettyFormatter::with_indent(b"  "));
    x.serialize(&mut s).context("serialize")?;
    Ok(String::from_utf8(s.into_inner())?)
}

/// Destination of the key files of a node.
pub trait Persister {
    /// Stores the key files of one node in `dir`, creating it if needed and
    /// overwriting files that already exist.
    fn persist(
        &mut self,
        dir: &Path,
        node_key: &NodeKeyRecord,
        validator_key: &ValidatorKeyRecord,
    ) -> anyhow::Result<()>;

    /// Loads the key files of one node from `dir`.
    fn load(&self, dir: &Path) -> anyhow::Result<(NodeKeyRecord, ValidatorKeyRecord)>;
}

/// Persister writing to the local file system.
#[derive(Debug, Default)]
pub struct FsPersister;

impl FsPersister {
    /// Writes a key file readable by the owner only.
    fn write(path: &Path, contents: &str) -> anyhow::Result<()> {
        let mut opts = fs::OpenOptions::new();
        opts.write(true).create(true).truncate(true);
        #[cfg(unix)]
        std::os::unix::fs::OpenOptionsExt::mode(&mut opts, 0o600);
        let mut file = opts
            .open(path)
            .with_context(|| format!("fs::OpenOptions::open({path:?})"))?;
        // The mode above only applies to new files.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt as _;
            file.set_permissions(fs::Permissions::from_mode(0o600))
                .with_context(|| format!("set_permissions({path:?})"))?;
        }
        file.write_all(contents.as_bytes())
            .with_context(|| format!("write({path:?})"))?;
        tracing::debug!(?path, "wrote key file");
        Ok(())
    }

    fn read<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
        (|| {
            let json = fs::read_to_string(path).context("failed reading file")?;
            decode_json(&json).context("failed decoding JSON")
        })()
        .with_context(|| path.display().to_string())
    }
}

impl Persister for FsPersister {
    fn persist(
        &mut self,
        dir: &Path,
        node_key: &NodeKeyRecord,
        validator_key: &ValidatorKeyRecord,
    ) -> anyhow::Result<()> {
        fs::create_dir_all(dir).with_context(|| format!("fs::create_dir_all({dir:?})"))?;
        Self::write(&dir.join(NODE_KEY_FILE), &encode_json(node_key)?)?;
        Self::write(&dir.join(VALIDATOR_KEY_FILE), &encode_json(validator_key)?)?;
        Ok(())
    }

    fn load(&self, dir: &Path) -> anyhow::Result<(NodeKeyRecord, ValidatorKeyRecord)> {
        Ok((
            Self::read(&dir.join(NODE_KEY_FILE))?,
            Self::read(&dir.join(VALIDATOR_KEY_FILE))?,
        ))
    }
}
