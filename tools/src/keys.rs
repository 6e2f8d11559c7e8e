//! Key pair generation.
use anyhow::Context as _;
use rand::{rngs::OsRng, CryptoRng, RngCore};
use volnix_crypto::ed25519;
use zeroize::Zeroizing;

/// Generates fresh ed25519 key pairs from an entropy source.
///
/// The entropy source is a constructor argument: production code uses the OS
/// CSPRNG via [`KeyGenerator::os`], tests pass a seeded RNG to get
/// reproducible keys.
#[derive(Debug)]
pub struct KeyGenerator<R> {
    rng: R,
}

impl KeyGenerator<OsRng> {
    /// Key generator backed by the OS entropy source.
    pub fn os() -> Self {
        Self::new(OsRng)
    }
}

impl<R: RngCore + CryptoRng> KeyGenerator<R> {
    /// Key generator backed by `rng`.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Generates a key pair from a fresh 32-byte seed.
    /// Fails only if the entropy source does.
    pub fn generate(&mut self) -> anyhow::Result<ed25519::SecretKey> {
        let mut seed = Zeroizing::new([0; ed25519::SEED_LENGTH]);
        self.rng
            .try_fill_bytes(&mut seed[..])
            .context("failed to draw a key seed from the entropy source")?;
        Ok(ed25519::SecretKey::from_seed(&seed))
    }
}

/// Checks that the OS entropy source can be read.
/// Called once at startup, so that a missing source aborts the run before any
/// file is written instead of falling back to a weaker source.
pub fn check_os_entropy() -> anyhow::Result<()> {
    check_entropy(&mut OsRng)
}

/// Checks that `rng` can produce a key seed.
pub fn check_entropy<R: RngCore + CryptoRng>(rng: &mut R) -> anyhow::Result<()> {
    let mut probe = Zeroizing::new([0; ed25519::SEED_LENGTH]);
    rng.try_fill_bytes(&mut probe[..]).context(
        "a cryptographically secure random source is required to generate keys; \
         make sure the OS entropy source (e.g. /dev/urandom or getrandom) is available",
    )
}
