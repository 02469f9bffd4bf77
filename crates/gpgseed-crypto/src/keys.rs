//! P-256 key materialization.
//!
//! Turns a derived 32-byte scalar into usable key material: the private
//! scalar D and the public point Q = D·G. The same materialization
//! serves both the ECDSA primary key and the ECDH subkey — OpenPGP
//! distinguishes the roles at the packet layer, not in the curve math.

use p256::ecdsa::SigningKey;
use p256::elliptic_curve::sec1::ToEncodedPoint;
use p256::{FieldBytes, SecretKey};

use gpgseed_types::{RecoveryError, Result};

// ---------------------------------------------------------------------------
// EcKeyPair
// ---------------------------------------------------------------------------

/// A P-256 private key and its public point.
///
/// Wraps a [`p256::SecretKey`], which zeroizes its scalar on drop.
pub struct EcKeyPair {
    secret: SecretKey,
}

impl EcKeyPair {
    /// Materializes a key pair from a 32-byte big-endian scalar.
    ///
    /// Rejects D ∉ [1, n-1]. SLIP-0010 output is always in range, but
    /// the check is still performed rather than assumed.
    pub fn from_scalar(scalar: &[u8; 32]) -> Result<Self> {
        let secret = SecretKey::from_bytes(FieldBytes::from_slice(scalar)).map_err(|_| {
            RecoveryError::DerivationFailure {
                reason: "derived scalar is out of range for P-256".into(),
            }
        })?;
        Ok(Self { secret })
    }

    /// Returns the private scalar D as 32 big-endian bytes.
    ///
    /// The caller owns the copy and must not let it outlive its use.
    pub fn secret_scalar(&self) -> [u8; 32] {
        self.secret.to_bytes().into()
    }

    /// Returns the public point in SEC1 uncompressed form:
    /// `0x04 ∥ X (32 bytes) ∥ Y (32 bytes)`.
    pub fn public_point(&self) -> [u8; 65] {
        let encoded = self.secret.public_key().to_encoded_point(false);
        let mut out = [0u8; 65];
        out.copy_from_slice(encoded.as_bytes());
        out
    }

    /// Returns an ECDSA signing key over the same scalar.
    pub fn signing_key(&self) -> SigningKey {
        SigningKey::from(&self.secret)
    }
}

// EcKeyPair does not implement Clone/Debug to prevent leakage.

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
