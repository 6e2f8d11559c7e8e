//! ed25519 signature scheme.
//! This is just an adapter of ed25519_dalek, exposing the API needed by the
//! key provisioning tools.

use crate::ByteFmt;
use anyhow::Context as _;
use ed::{Signer as _, Verifier as _};
use ed25519_dalek as ed;
use std::fmt;
use zeroize::Zeroizing;

pub mod testonly;


/// Length of the secret seed in bytes.
pub const SEED_LENGTH: usize = ed::SECRET_KEY_LENGTH;
/// Length of the public key in bytes.
pub const PUBLIC_KEY_LENGTH: usize = ed::PUBLIC_KEY_LENGTH;
/// Length of the key pair encoding (`seed || public key`) in bytes.
pub const KEYPAIR_LENGTH: usize = ed::KEYPAIR_LENGTH;

/// ed25519 secret key.
///
/// The byte encoding is the 64-byte key pair form: the 32-byte secret seed
/// followed by the 32-byte public key derived from it.
pub struct SecretKey(ed::SigningKey);

impl SecretKey {
    /// Reconstructs a secret key from its 32-byte seed.
    pub fn from_seed(seed: &[u8; SEED_LENGTH]) -> Self {
        Self(ed::SigningKey::from_bytes(seed))
    }

    /// Returns the 32-byte secret seed. The copy is wiped on drop.
    pub fn seed(&self) -> Zeroizing<[u8; SEED_LENGTH]> {
        Zeroizing::new(self.0.to_bytes())
    }

    /// Signs a message.
    pub fn sign(&self, msg: &[u8]) -> Signature {
        Signature(self.0.sign(msg))
    }

    /// Computes a public key for this secret key.
    pub fn public(&self) -> PublicKey {
        PublicKey(self.0.verifying_key())
    }
}

impl ByteFmt for SecretKey {
    fn decode(bytes: &[u8]) -> anyhow::Result<Self> {
        let bytes: &[u8; KEYPAIR_LENGTH] = bytes
            .try_into()
            .with_context(|| format!("expected {KEYPAIR_LENGTH} bytes, got {}", bytes.len()))?;
        ed::SigningKey::from_keypair_bytes(bytes)
            .context("public key does not match the secret seed")
            .map(Self)
    }

    fn encode(&self) -> Vec<u8> {
        Zeroizing::new(self.0.to_keypair_bytes()).to_vec()
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "<secret for {:?}>", self.public())
    }
}

/// ed25519 public key.
#[derive(Clone, PartialEq, Eq)]
pub struct PublicKey(ed::VerifyingKey);

impl PublicKey {
    /// Verifies a signature of a message against this public key.
    pub fn verify(&self, msg: &[u8], sig: &Signature) -> Result<(), InvalidSignatureError> {
        self.0
            .verify(msg, &sig.0)
            .map_err(|_| InvalidSignatureError)
    }

    /// Returns the raw 32 bytes of this public key.
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        self.0.as_bytes()
    }
}

impl ByteFmt for PublicKey {
    fn decode(bytes: &[u8]) -> anyhow::Result<Self> {
        let bytes: &[u8; PUBLIC_KEY_LENGTH] = bytes
            .try_into()
            .with_context(|| format!("expected {PUBLIC_KEY_LENGTH} bytes, got {}", bytes.len()))?;
        ed::VerifyingKey::from_bytes(bytes)
            .context("invalid key material")
            .map(Self)
    }

    fn encode(&self) -> Vec<u8> {
        self.0.as_bytes().to_vec()
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "ed25519:{}", hex::encode(self.0.as_bytes()))
    }
}

/// ed25519 signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature(ed::Signature);

impl ByteFmt for Signature {
    fn decode(bytes: &[u8]) -> anyhow::Result<Self> {
        let bytes: &[u8; ed::SIGNATURE_LENGTH] = bytes.try_into()?;
        Ok(Self(ed::Signature::from_bytes(bytes)))
    }

    fn encode(&self) -> Vec<u8> {
        self.0.to_bytes().to_vec()
    }
}

/// Error returned when an invalid signature is detected.
#[derive(Debug, thiserror::Error)]
#[error("invalid signature")]
pub struct InvalidSignatureError;
