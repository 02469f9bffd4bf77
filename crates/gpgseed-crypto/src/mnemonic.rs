//! BIP-39 mnemonic validation and seed derivation.
//!
//! A recovery seed is 12, 18 or 24 lowercase English words. The word
//! count is checked first (hardware recovery seeds only come in those
//! three lengths), then the wordlist membership and the embedded
//! SHA-256 checksum. Seed derivation is PBKDF2-HMAC-SHA512 with 2048
//! rounds and salt `"mnemonic" + passphrase`, producing a 64-byte seed.
//!
//! Reference: <https://github.com/bitcoin/bips/blob/master/bip-0039.mediawiki>

use bip39::Language;
use gpgseed_types::{RecoveryError, Result};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Word counts accepted for a recovery seed.
pub const VALID_WORD_COUNTS: [usize; 3] = [12, 18, 24];

// ---------------------------------------------------------------------------
// Mnemonic
// ---------------------------------------------------------------------------

/// A validated BIP-39 mnemonic phrase.
///
/// Construction via [`Mnemonic::from_words`] guarantees the word count,
/// wordlist membership and checksum have all been verified. The inner
/// phrase is zeroized on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Mnemonic(String);

impl Mnemonic {
    /// Validates a recovery seed and wraps it as a `Mnemonic`.
    ///
    /// # Checks performed
    ///
    /// 1. Word count ∈ {12, 18, 24}, else
    ///    [`RecoveryError::InvalidSeedLength`]. BIP-39 also defines 15-
    ///    and 21-word phrases, but hardware recovery seeds never use
    ///    them, so they are rejected up front.
    /// 2. Every word in the BIP-39 English wordlist and the embedded
    ///    checksum valid, else [`RecoveryError::MnemonicInvalid`].
    pub fn from_words(words: &[String]) -> Result<Self> {
        if !VALID_WORD_COUNTS.contains(&words.len()) {
            return Err(RecoveryError::InvalidSeedLength {
                length: words.len(),
            });
        }

        let phrase = words.join(" ");
        match bip39::Mnemonic::parse_in_normalized(Language::English, &phrase) {
            Ok(mut parsed) => parsed.zeroize(),
            Err(e) => {
                return Err(RecoveryError::MnemonicInvalid {
                    reason: e.to_string(),
                })
            }
        }

        Ok(Self(phrase))
    }

    /// Returns the number of words in the phrase.
    pub fn word_count(&self) -> usize {
        self.0.split_whitespace().count()
    }

    /// Derives the 64-byte BIP-39 seed for this mnemonic.
    ///
    /// PBKDF2-HMAC-SHA512, 2048 rounds, password = the space-joined
    /// phrase, salt = `"mnemonic" + passphrase`. Pass `""` when no
    /// passphrase is in use.
    pub fn to_seed(&self, passphrase: &str) -> Result<Seed> {
        let mut parsed = bip39::Mnemonic::parse_in_normalized(Language::English, &self.0)
            .map_err(|e| RecoveryError::MnemonicInvalid {
                reason: e.to_string(),
            })?;
        let seed = Seed(parsed.to_seed_normalized(passphrase));
        parsed.zeroize();
        Ok(seed)
    }
}

// Mnemonic does not implement Clone/Debug to prevent leakage.

// ---------------------------------------------------------------------------
// Seed
// ---------------------------------------------------------------------------

/// A 64-byte seed derived from a BIP-39 mnemonic via PBKDF2-HMAC-SHA512.
///
/// This seed is the input to SLIP-0010 master-key derivation.
/// Automatically zeroized on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Seed([u8; 64]);

impl Seed {
    /// Fixed byte length of a BIP-39 seed.
    pub const LEN: usize = 64;

    /// Creates a [`Seed`] from a raw 64-byte array.
    ///
    /// Use this for reconstructing a seed from test vectors. For normal
    /// operation, use [`Mnemonic::to_seed`].
    pub fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    /// Returns the raw 64-byte seed.
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }
}

// Seed does not implement Clone/Debug to prevent leakage.

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
