//! Collection of cryptographic primitives used by the volnix tooling.

pub use fmt::*;

pub mod ed25519;
mod fmt;
pub mod sha256;
