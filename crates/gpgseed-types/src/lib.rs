//! Core shared types for the gpgseed recovery tool.
//!
//! This crate defines the types used across the workspace: the key
//! identifiers ([`Fingerprint`], [`KeyId`]) and the central
//! [`RecoveryError`] enum. No other crate should define shared types —
//! everything lives here.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Fingerprint
// ---------------------------------------------------------------------------

/// OpenPGP v4 key fingerprint: SHA-1 over the canonicalized public-key
/// packet body (20 bytes).
///
/// Displays as 40 uppercase hexadecimal characters with no separators,
/// the form GnuPG prints and the form users compare against their
/// records.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Fingerprint([u8; 20]);

impl Fingerprint {
    /// The fixed byte length of a v4 fingerprint.
    pub const LEN: usize = 20;

    /// Creates a `Fingerprint` from raw bytes.
    pub fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying bytes.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Returns the 64-bit Key ID: the low-order 8 bytes of the
    /// fingerprint.
    pub fn key_id(&self) -> KeyId {
        let mut id = [0u8; 8];
        id.copy_from_slice(&self.0[12..]);
        KeyId(id)
    }
}

impl From<[u8; 20]> for Fingerprint {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Fingerprint {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode_upper(self.0))
    }
}

impl FromStr for Fingerprint {
    type Err = RecoveryError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let bytes = hex::decode(s).map_err(|_| RecoveryError::SerializationFailure {
            reason: "invalid hex encoding for fingerprint".into(),
        })?;
        if bytes.len() != 20 {
            return Err(RecoveryError::SerializationFailure {
                reason: format!("expected 20 bytes for fingerprint, got {}", bytes.len()),
            });
        }
        let mut arr = [0u8; 20];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

// ---------------------------------------------------------------------------
// KeyId
// ---------------------------------------------------------------------------

/// 64-bit OpenPGP Key ID (the low 8 bytes of a [`Fingerprint`]).
///
/// Signatures reference the issuing key by this value, so the entity
/// graph never needs back-pointers.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct KeyId([u8; 8]);

impl KeyId {
    /// The fixed byte length of a Key ID.
    pub const LEN: usize = 8;

    /// Creates a `KeyId` from raw bytes.
    pub fn new(bytes: [u8; 8]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying bytes.
    pub fn as_bytes(&self) -> &[u8; 8] {
        &self.0
    }
}

impl From<[u8; 8]> for KeyId {
    fn from(bytes: [u8; 8]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for KeyId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode_upper(self.0))
    }
}

// ---------------------------------------------------------------------------
// RecoveryError
// ---------------------------------------------------------------------------

/// Central error type for the gpgseed workspace.
///
/// Every failure is fatal: the first error unwinds the whole recovery
/// and is presented to the user on the diagnostic stream. No variant is
/// ever caught and retried internally.
#[derive(Debug, Error)]
pub enum RecoveryError {
    /// The user declined the confirmation prompt (anything other than
    /// exactly "yes").
    #[error("aborting at user's request")]
    InvalidConfirmation,

    /// The supplied GPG User ID is empty.
    #[error("invalid user id: must not be empty")]
    InvalidUserId,

    /// The creation timestamp could not be parsed or cannot be stored
    /// in an OpenPGP v4 key packet.
    #[error("invalid timestamp: {reason}")]
    InvalidTimestamp {
        /// Human-readable description of the timestamp problem.
        reason: String,
    },

    /// The recovery seed length is not one of 12, 18 or 24 words.
    #[error("invalid seed length {length}: must be 12, 18 or 24")]
    InvalidSeedLength {
        /// The offending word count.
        length: usize,
    },

    /// A word is not in the BIP-39 wordlist, or the embedded checksum
    /// does not verify.
    #[error("invalid mnemonic: {reason}")]
    MnemonicInvalid {
        /// Human-readable description of the mnemonic failure.
        reason: String,
    },

    /// SLIP-0010 / SLIP-0013 derivation failed (retry budget exhausted
    /// or a derived scalar out of range).
    #[error("key derivation failed: {reason}")]
    DerivationFailure {
        /// Human-readable description of the derivation failure.
        reason: String,
    },

    /// An internal packet or armor encoding error. Indicates a
    /// programming bug, never bad user input.
    #[error("serialization failed: {reason}")]
    SerializationFailure {
        /// Human-readable description of the encoding failure.
        reason: String,
    },

    /// Reading from the input stream or writing to the output or
    /// diagnostic stream failed (including EOF mid-prompt).
    #[error("i/o failure: {reason}")]
    IoFailure {
        /// Human-readable description of the I/O failure.
        reason: String,
    },
}

// ---------------------------------------------------------------------------
// Result alias
// ---------------------------------------------------------------------------

/// Convenience result type using [`RecoveryError`].
pub type Result<T> = std::result::Result<T, RecoveryError>;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_displays_uppercase_hex() {
        let mut bytes = [0u8; 20];
        bytes[0] = 0xAB;
        bytes[19] = 0xC3;
        let fpr = Fingerprint::new(bytes);
        let s = fpr.to_string();
        assert_eq!(s.len(), 40);
        assert!(s.starts_with("AB"));
        assert!(s.ends_with("C3"));
        assert!(!s.contains(' '));
    }

    #[test]
    fn fingerprint_roundtrip_hex() -> std::result::Result<(), RecoveryError> {
        let fpr = Fingerprint::new([0x5A; 20]);
        let parsed: Fingerprint = fpr.to_string().parse()?;
        assert_eq!(fpr, parsed);
        Ok(())
    }

    #[test]
    fn fingerprint_rejects_wrong_length() {
        let result: std::result::Result<Fingerprint, _> = "abcd".parse();
        assert!(result.is_err());
    }

    #[test]
    fn key_id_is_low_eight_bytes() {
        let mut bytes = [0u8; 20];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = i as u8;
        }
        let fpr = Fingerprint::new(bytes);
        assert_eq!(fpr.key_id().as_bytes(), &[12, 13, 14, 15, 16, 17, 18, 19]);
    }

    #[test]
    fn error_display_includes_reason() {
        let err = RecoveryError::MnemonicInvalid {
            reason: "checksum mismatch".into(),
        };
        assert!(err.to_string().contains("checksum mismatch"));
    }

    #[test]
    fn seed_length_error_names_the_count() {
        let err = RecoveryError::InvalidSeedLength { length: 13 };
        let msg = err.to_string();
        assert!(msg.contains("13"));
        assert!(msg.contains("12, 18 or 24"));
    }

    #[test]
    fn confirmation_error_message() {
        let err = RecoveryError::InvalidConfirmation;
        assert_eq!(err.to_string(), "aborting at user's request");
    }
}
