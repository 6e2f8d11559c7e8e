//! Wrappers for the SHA256 cryptographic hash algorithm.
use sha2::{digest::Update as _, Digest as _};


/// SHA256 hash.
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Sha256(pub(crate) [u8; 32]);

impl Sha256 {
    /// Computes a SHA256 hash of a message.
    pub fn new(msg: &[u8]) -> Self {
        Self(sha2::Sha256::new().chain(msg).finalize().into())
    }

    /// Returns a reference to the bytes of this hash.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Returns the first `N` bytes of this hash.
    ///
    /// # Panics
    /// Panics if `N` exceeds the digest length of 32 bytes.
    pub fn prefix<const N: usize>(&self) -> [u8; N] {
        let mut out = [0; N];
        out.copy_from_slice(&self.0[..N]);
        out
    }
}

impl std::fmt::Debug for Sha256 {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(fmt, "sha256:{}", hex::encode(self.0))
    }
}
