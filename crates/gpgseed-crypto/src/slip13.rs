//! SLIP-0013 authentication-key derivation from a URI.
//!
//! Turns a URI into a fixed-shape hardened derivation path:
//!
//! ```text
//! m / purpose' / a₁' / a₂' / a₃' / a₄'
//! ```
//!
//! where a₁..a₄ are the four little-endian 32-bit words of
//! `SHA-256(ser32_le(index) ∥ uri)`. The same URI therefore always
//! lands on the same key, and different URIs land on unrelated branches
//! of the tree.
//!
//! Reference: <https://github.com/satoshilabs/slips/blob/master/slip-0013.md>

use sha2::{Digest, Sha256};

use gpgseed_types::Result;

use crate::slip10::ExtendedKey;

/// SLIP-0013 standard purpose code, used for the signing primary key.
pub const PURPOSE_AUTHENTICATION: u32 = 13;

/// Project-local purpose code for the ECDH encryption subkey.
///
/// SLIP-0013 as published only defines purpose 13; 17 segregates
/// encryption-role material from authentication-role material under the
/// same URI, and is kept for compatibility with identities created by
/// the companion init tool.
pub const PURPOSE_ENCRYPTION: u32 = 17;

/// Computes the four hardened address indices for a URI.
///
/// `H = SHA-256(ser32_le(index) ∥ uri)`, with the first 16 digest
/// bytes split into four little-endian u32 values — both the index
/// prefix and the split are little-endian per SLIP-0013. Hardening
/// (the high bit) is applied during derivation, so values are returned
/// raw here.
pub fn address_indices(uri: &str, index: u32) -> [u32; 4] {
    let mut hasher = Sha256::new();
    hasher.update(index.to_le_bytes());
    hasher.update(uri.as_bytes());
    let digest = hasher.finalize();

    let mut indices = [0u32; 4];
    for (slot, chunk) in indices.iter_mut().zip(digest.chunks_exact(4)) {
        *slot = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
    indices
}

/// Derives the SLIP-0013 key for (purpose, uri, index) from a master key.
///
/// Walks `purpose' / a₁' / a₂' / a₃' / a₄'` using hardened SLIP-0010
/// child derivation at every step.
pub fn derive(
    master: &ExtendedKey,
    purpose: u32,
    uri: &str,
    index: u32,
) -> Result<ExtendedKey> {
    let [a1, a2, a3, a4] = address_indices(uri, index);

    let node = master.child(purpose)?;
    let node = node.child(a1)?;
    let node = node.child(a2)?;
    let node = node.child(a3)?;
    node.child(a4)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
