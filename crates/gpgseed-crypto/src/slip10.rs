//! SLIP-0010 hierarchical deterministic key derivation on Nist256p1.
//!
//! Derives extended private keys (scalar + chain code) from a BIP-39
//! seed. Only hardened derivation is implemented — SLIP-0013 paths use
//! hardened nodes exclusively.
//!
//! Unlike the Ed25519 flavour of SLIP-0010, the NIST P-256 flavour
//! treats HMAC output as a big-endian integer that must be a valid
//! non-zero group scalar, and child keys are computed additively:
//! `k_child = (IL + k_parent) mod n`. Out-of-range intermediates are
//! re-derived with a modified HMAC input.
//!
//! Reference: <https://github.com/satoshilabs/slips/blob/master/slip-0010.md>

use hmac::{Hmac, Mac};
use p256::elliptic_curve::{Field, PrimeField};
use p256::{FieldBytes, Scalar};
use sha2::Sha512;
use zeroize::{Zeroize, ZeroizeOnDrop};

use gpgseed_types::{RecoveryError, Result};

use crate::mnemonic::Seed;

/// HMAC-SHA512 type alias used throughout SLIP-0010.
type HmacSha512 = Hmac<Sha512>;

/// The hardened index offset (0x80000000) per BIP-32/SLIP-0010.
pub const HARDENED_OFFSET: u32 = 0x8000_0000;

/// HMAC key for master key generation on the P-256 curve (SLIP-0010 §2).
const MASTER_HMAC_KEY: &[u8] = b"Nist256p1 seed";

/// Upper bound on re-derivation rounds. Each round only fires when an
/// HMAC output falls outside the group order, probability ≈ 2⁻³².
const MAX_DERIVATION_ROUNDS: usize = 8;

// ---------------------------------------------------------------------------
// ExtendedKey
// ---------------------------------------------------------------------------

/// A SLIP-0010 extended private key: a P-256 scalar plus a chain code.
///
/// Invariant: `0 < key < n` (the P-256 group order), upheld by both
/// constructors. Both halves are zeroized on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ExtendedKey {
    key: [u8; 32],
    chain_code: [u8; 32],
}

impl ExtendedKey {
    /// Derives the master extended key from a BIP-39 seed.
    ///
    /// `I = HMAC-SHA512(key="Nist256p1 seed", data=seed)`; IL is the
    /// master scalar, IR the chain code. When IL is zero or not below
    /// the group order, the whole 64-byte `I` is fed back through the
    /// HMAC and the split is retried.
    pub fn master(seed: &Seed) -> Result<Self> {
        let mut i = hmac_sha512(MASTER_HMAC_KEY, seed.as_bytes())?;

        for _ in 0..MAX_DERIVATION_ROUNDS {
            let (il, ir) = split_hmac_output(&i);
            if parse_scalar(&il).is_some() {
                i.zeroize();
                return Ok(Self {
                    key: il,
                    chain_code: ir,
                });
            }

            let next = hmac_sha512(MASTER_HMAC_KEY, &i)?;
            i.zeroize();
            i = next;
        }

        i.zeroize();
        Err(RecoveryError::DerivationFailure {
            reason: "master key retry budget exhausted".into(),
        })
    }

    /// Derives a hardened child extended key.
    ///
    /// `data = 0x00 ∥ k_parent ∥ ser32(index | 0x80000000)`,
    /// `I = HMAC-SHA512(key=chain_code, data)`,
    /// `k_child = (IL + k_parent) mod n`, chain code = IR.
    ///
    /// When IL is not below the group order or the sum is zero, the
    /// derivation continues with `data = 0x01 ∥ IR ∥ ser32(index)` per
    /// SLIP-0010.
    pub fn child(&self, index: u32) -> Result<Self> {
        let hardened = (index | HARDENED_OFFSET).to_be_bytes();
        let parent = parse_scalar(&self.key).ok_or_else(|| RecoveryError::DerivationFailure {
            reason: "parent key is not a valid P-256 scalar".into(),
        })?;

        // data = prefix (1) ∥ scalar or IR (32) ∥ hardened index (4)
        let mut data = [0u8; 37];
        data[0] = 0x00;
        data[1..33].copy_from_slice(&self.key);
        data[33..].copy_from_slice(&hardened);

        for _ in 0..MAX_DERIVATION_ROUNDS {
            let mut i = hmac_sha512(&self.chain_code, &data)?;
            let (mut il, ir) = split_hmac_output(&i);
            i.zeroize();

            if let Some(il_scalar) = parse_scalar(&il) {
                let child = il_scalar + parent;
                il.zeroize();
                if !bool::from(child.is_zero()) {
                    data.zeroize();
                    return Ok(Self {
                        key: child.to_repr().into(),
                        chain_code: ir,
                    });
                }
            } else {
                il.zeroize();
            }

            data[0] = 0x01;
            data[1..33].copy_from_slice(&ir);
        }

        data.zeroize();
        Err(RecoveryError::DerivationFailure {
            reason: format!("child key retry budget exhausted at index {index}"),
        })
    }

    /// Returns the 32-byte big-endian scalar.
    pub fn key_bytes(&self) -> &[u8; 32] {
        &self.key
    }

    /// Returns the 32-byte chain code.
    pub fn chain_code(&self) -> &[u8; 32] {
        &self.chain_code
    }

    #[cfg(test)]
    pub(crate) fn from_parts(key: [u8; 32], chain_code: [u8; 32]) -> Self {
        Self { key, chain_code }
    }
}

// ExtendedKey does not implement Clone/Debug to prevent leakage.

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Computes HMAC-SHA512 and returns the 64-byte output.
fn hmac_sha512(key: &[u8], data: &[u8]) -> Result<[u8; 64]> {
    let mut mac =
        HmacSha512::new_from_slice(key).map_err(|e| RecoveryError::DerivationFailure {
            reason: format!("HMAC-SHA512 key init failed: {e}"),
        })?;
    mac.update(data);
    let result = mac.finalize().into_bytes();

    let mut output = [0u8; 64];
    output.copy_from_slice(&result);
    Ok(output)
}

/// Splits a 64-byte HMAC output into (IL, IR).
fn split_hmac_output(i: &[u8; 64]) -> ([u8; 32], [u8; 32]) {
    let mut il = [0u8; 32];
    let mut ir = [0u8; 32];
    il.copy_from_slice(&i[..32]);
    ir.copy_from_slice(&i[32..]);
    (il, ir)
}

/// Decodes 32 big-endian bytes as a non-zero canonical P-256 scalar.
///
/// Returns `None` when the integer is zero or not below the group
/// order — exactly the two conditions SLIP-0010 re-derives on.
fn parse_scalar(bytes: &[u8; 32]) -> Option<Scalar> {
    let scalar: Option<Scalar> = Scalar::from_repr(FieldBytes::from(*bytes)).into();
    scalar.filter(|s| !bool::from(s.is_zero()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
