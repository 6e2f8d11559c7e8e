//! JSON key files consumed by the node runtime.
//!
//! The layout follows the tendermint key file convention: field order, the
//! `type` tags and the base64 flavor are part of the format and must not be
//! changed.
use crate::ids::{NodeId, ValidatorAddress};
use serde::{Deserialize, Serialize};
use volnix_crypto::{ed25519, Base64Fmt as _};

/// Type tag of an ed25519 private key (`seed || public key`, base64).
pub const PRIV_KEY_TYPE: &str = "tendermint/PrivKeyEd25519";
/// Type tag of an ed25519 public key (raw 32 bytes, base64).
pub const PUB_KEY_TYPE: &str = "tendermint/PubKeyEd25519";

/// Message signed when checking that a private key matches its public key.
const PROBE_MSG: &[u8] = b"volnix key check";

/// Errors found when checking a key file for self-consistency.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    /// A `type` tag is not the expected literal.
    #[error("{field}.type: expected {want:?}, got {got:?}")]
    WrongType {
        /// Field holding the tag.
        field: &'static str,
        /// Expected tag.
        want: &'static str,
        /// Tag found in the file.
        got: String,
    },
    /// A key value does not decode.
    #[error("{field}.value: {err:#}")]
    InvalidKey {
        /// Field holding the value.
        field: &'static str,
        /// Decoding error.
        err: anyhow::Error,
    },
    /// `pub_key` is not the public half of `priv_key`.
    #[error("pub_key does not match priv_key")]
    PublicKeyMismatch,
    /// `address` is not derived from `pub_key`.
    #[error("address {got} does not match pub_key, expected {want}")]
    AddressMismatch {
        /// Address derived from `pub_key`.
        want: ValidatorAddress,
        /// Address found in the file.
        got: String,
    },
    /// A signature made with `priv_key` does not verify against `pub_key`.
    #[error("priv_key does not produce signatures valid under pub_key")]
    Signature(#[from] ed25519::InvalidSignatureError),
}

/// A typed key value: `{"type": ..., "value": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValue {
    /// Type tag, one of [`PRIV_KEY_TYPE`] or [`PUB_KEY_TYPE`].
    #[serde(rename = "type")]
    pub kind: String,
    /// Base64 encoded key bytes.
    pub value: String,
}

impl KeyValue {
    fn private(key: &ed25519::SecretKey) -> Self {
        Self {
            kind: PRIV_KEY_TYPE.to_owned(),
            value: key.encode_base64(),
        }
    }

    fn public(key: &ed25519::PublicKey) -> Self {
        Self {
            kind: PUB_KEY_TYPE.to_owned(),
            value: key.encode_base64(),
        }
    }

    fn check_type(&self, field: &'static str, want: &'static str) -> Result<(), RecordError> {
        if self.kind != want {
            return Err(RecordError::WrongType {
                field,
                want,
                got: self.kind.clone(),
            });
        }
        Ok(())
    }

    /// Decodes a private key value. The decoded key pair is checked to be
    /// consistent: the trailing 32 bytes have to be derived from the seed.
    fn decode_private(&self, field: &'static str) -> Result<ed25519::SecretKey, RecordError> {
        self.check_type(field, PRIV_KEY_TYPE)?;
        ed25519::SecretKey::decode_base64(&self.value)
            .map_err(|err| RecordError::InvalidKey { field, err })
    }

    fn decode_public(&self, field: &'static str) -> Result<ed25519::PublicKey, RecordError> {
        self.check_type(field, PUB_KEY_TYPE)?;
        ed25519::PublicKey::decode_base64(&self.value)
            .map_err(|err| RecordError::InvalidKey { field, err })
    }
}

/// Contents of `node_key.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeKeyRecord {
    /// The node identity key.
    pub priv_key: KeyValue,
}

impl NodeKeyRecord {
    /// Builds the record of a node identity key.
    pub fn new(key: &ed25519::SecretKey) -> Self {
        Self {
            priv_key: KeyValue::private(key),
        }
    }

    /// Checks the record and returns the ID of the node it identifies.
    pub fn check(&self) -> Result<NodeId, RecordError> {
        let key = self.priv_key.decode_private("priv_key")?;
        probe_signature(&key, &key.public())?;
        Ok(NodeId::from_public_key(&key.public()))
    }
}

/// Contents of `priv_validator_key.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorKeyRecord {
    /// Upper-case hex address derived from `pub_key`.
    pub address: String,
    /// The validator public key.
    pub pub_key: KeyValue,
    /// The validator signing key.
    pub priv_key: KeyValue,
}

impl ValidatorKeyRecord {
    /// Builds the record of a validator signing key.
    pub fn new(key: &ed25519::SecretKey) -> Self {
        let public = key.public();
        Self {
            address: ValidatorAddress::from_public_key(&public).to_string(),
            pub_key: KeyValue::public(&public),
            priv_key: KeyValue::private(key),
        }
    }

    /// Checks that the record is self-consistent and returns its address.
    pub fn check(&self) -> Result<ValidatorAddress, RecordError> {
        let public = self.pub_key.decode_public("pub_key")?;
        let want = ValidatorAddress::from_public_key(&public);
        if self.address != want.to_string() {
            return Err(RecordError::AddressMismatch {
                want,
                got: self.address.clone(),
            });
        }
        let key = self.priv_key.decode_private("priv_key")?;
        if key.public() != public {
            return Err(RecordError::PublicKeyMismatch);
        }
        probe_signature(&key, &public)?;
        Ok(want)
    }
}

fn probe_signature(
    key: &ed25519::SecretKey,
    public: &ed25519::PublicKey,
) -> Result<(), RecordError> {
    Ok(public.verify(PROBE_MSG, &key.sign(PROBE_MSG))?)
}
