//! Identities and content-derived ids.
//!
//! A voter or owner identity is an [`Address`]: an opaque 32-byte key,
//! conventionally the BLAKE3 digest of an ed25519 verifying key. The engine
//! never inspects provenance; any unique 32 bytes work as an identity,
//! which keeps the roster decoupled from the key-management layer.

use ed25519_dalek::VerifyingKey;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque voter/owner identity (address-equivalent).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Address(pub [u8; 32]);

impl Address {
    /// Derive an address from an ed25519 verifying key.
    pub fn of_key(key: &VerifyingKey) -> Self {
        Self::of_key_bytes(&key.to_bytes())
    }

    /// Derive an address from raw verifying-key bytes. Same derivation as
    /// [`Address::of_key`] without requiring a parseable key, so a ballot's
    /// claimed signer is addressable even when its key bytes are junk.
    pub fn of_key_bytes(key_bytes: &[u8; 32]) -> Self {
        Self(*blake3::hash(key_bytes).as_bytes())
    }

    /// Construct from raw bytes (for opaque, externally-sourced identities).
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// The raw bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to a lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex_string(&self.0)
    }

    /// Parse from a 64-char hex string.
    pub fn from_hex(s: &str) -> Option<Self> {
        if s.len() != 64 {
            return None;
        }
        let mut bytes = [0u8; 32];
        for (i, chunk) in s.as_bytes().chunks(2).enumerate() {
            let hex = std::str::from_utf8(chunk).ok()?;
            bytes[i] = u8::from_str_radix(hex, 16).ok()?;
        }
        Some(Self(bytes))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// A content address binding ballots to one election: the BLAKE3 digest of
/// the canonical CBOR encoding of the election's construction config.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ElectionId(pub [u8; 32]);

impl ElectionId {
    /// Hash a serializable value using canonical CBOR.
    pub fn of_value<T: Serialize>(value: &T) -> Self {
        let mut buf = Vec::new();
        ciborium::into_writer(value, &mut buf).expect("serialization should not fail");
        Self(*blake3::hash(&buf).as_bytes())
    }

    /// The raw bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for ElectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ElectionId({})", &hex_string(&self.0)[..16])
    }
}

impl fmt::Display for ElectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex_string(&self.0))
    }
}

fn hex_string(bytes: &[u8; 32]) -> String {
    let mut s = String::with_capacity(64);
    for byte in bytes {
        s.push_str(&format!("{:02x}", byte));
    }
    s
}
