//! Random key generation, intended for use in testing

use super::{SecretKey, SEED_LENGTH};
use rand::{
    distributions::{Distribution, Standard},
    Rng,
};

/// Generates a random SecretKey. This is meant for testing purposes.
impl Distribution<SecretKey> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> SecretKey {
        let seed: [u8; SEED_LENGTH] = rng.gen();
        SecretKey::from_seed(&seed)
    }
}
