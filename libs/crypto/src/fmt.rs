//! Traits for byte and text (human readable) encodings for crypto primitives.
use anyhow::Context as _;
use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Trait converting a type from/to a sparse byte format.
/// It is roughly equivalent to serde::Serialize + serde::Deserialize,
/// but has additional requirements:
/// - binary encoding should be well defined, rather than rely on the internals
///   of the serde::Serializer implementation.
/// - `decode` has to validate the bytes, so that a decoded value is always
///   internally consistent (e.g. a key pair whose public half matches its secret).
pub trait ByteFmt: Sized {
    /// Decodes the object from the byte representation.
    fn decode(bytes: &[u8]) -> anyhow::Result<Self>;
    /// Encodes the object to the byte representation.
    fn encode(&self) -> Vec<u8>;
}

/// Standard base64 (RFC 4648 alphabet, with padding) on top of [`ByteFmt`].
/// This is the encoding of key material in tendermint-style JSON key files,
/// so the alphabet and padding are fixed.
pub trait Base64Fmt: ByteFmt {
    /// Encodes the object as padded standard base64.
    fn encode_base64(&self) -> String {
        STANDARD.encode(self.encode())
    }

    /// Decodes the object from padded standard base64.
    fn decode_base64(text: &str) -> anyhow::Result<Self> {
        let raw = STANDARD.decode(text).context("invalid base64")?;
        ByteFmt::decode(&raw)
    }
}

impl<T: ByteFmt> Base64Fmt for T {}

/// Decodes padded standard base64 into raw bytes, without interpreting them.
pub fn decode_base64_raw(text: &str) -> anyhow::Result<Vec<u8>> {
    STANDARD.decode(text).context("invalid base64")
}
