//! Public identifiers derived from ed25519 public keys.
//!
//! Both identifiers hash the raw 32-byte public key with SHA256. They differ
//! in how the digest is rendered: the node ID is lower-case hex and is only
//! shown to the operator, while the validator address is upper-case hex and
//! is persisted in `priv_validator_key.json`, where the node software
//! re-derives and compares it byte for byte.
use std::fmt;
use volnix_crypto::{ed25519, sha256::Sha256};

/// Length of both identifiers in bytes (40 hex characters).
const ID_LENGTH: usize = 20;

/// Identifier of a node in the p2p network, derived from its node key.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId([u8; ID_LENGTH]);

impl NodeId {
    /// Derives the node ID: the first 40 hex characters of `sha256(public_key)`.
    pub fn from_public_key(key: &ed25519::PublicKey) -> Self {
        Self(Sha256::new(key.as_bytes()).prefix())
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({self})")
    }
}

/// Address of a validator, derived from its validator key.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValidatorAddress([u8; ID_LENGTH]);

impl ValidatorAddress {
    /// Derives the address: the first 20 bytes of `sha256(public_key)`.
    pub fn from_public_key(key: &ed25519::PublicKey) -> Self {
        Self(Sha256::new(key.as_bytes()).prefix())
    }
}

impl fmt::Display for ValidatorAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode_upper(self.0))
    }
}

impl fmt::Debug for ValidatorAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ValidatorAddress({self})")
    }
}
