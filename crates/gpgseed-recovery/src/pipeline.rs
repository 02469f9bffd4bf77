//! The deterministic recovery pipeline.
//!
//! One synchronous pass: mnemonic → BIP-39 seed → SLIP-0010 master key
//! on P-256 → two SLIP-0013 children (signing and encryption) → OpenPGP
//! entity → armored private-key block. The output is a pure function of
//! the request; every intermediate secret lives only for the duration
//! of the call and is zeroized on drop.

use gpgseed_crypto::keys::EcKeyPair;
use gpgseed_crypto::mnemonic::Mnemonic;
use gpgseed_crypto::slip10::ExtendedKey;
use gpgseed_crypto::slip13::{self, PURPOSE_AUTHENTICATION, PURPOSE_ENCRYPTION};
use gpgseed_openpgp::entity::SecretEntity;
use gpgseed_openpgp::key::KeyPacket;
use gpgseed_types::{Fingerprint, RecoveryError, Result};

// ---------------------------------------------------------------------------
// Request / response records
// ---------------------------------------------------------------------------

/// The inputs to a recovery, as one structured record.
///
/// Three of the four fields are secrets; the timestamp is not, but it
/// is required for reproducible fingerprints.
pub struct RecoveryRequest {
    /// GPG User ID, e.g. `Alice <alice@example.com>`. Free-form; only
    /// emptiness is rejected.
    pub user_id: String,
    /// Key creation time as seconds since the Unix epoch. Must match
    /// the timestamp of the original identity exactly.
    pub timestamp: i64,
    /// The recovery seed, one word per element, in order.
    pub mnemonic_words: Vec<String>,
    /// BIP-39 passphrase; empty string when not in use.
    pub passphrase: String,
}

/// The outputs of a successful recovery.
pub struct RecoveredIdentity {
    /// The User ID the identity was recovered for.
    pub user_id: String,
    /// Fingerprint of the ECDSA primary key.
    pub primary_fingerprint: Fingerprint,
    /// Fingerprint of the ECDH encryption subkey.
    pub subkey_fingerprint: Fingerprint,
    /// ASCII-armored PGP PRIVATE KEY BLOCK, ending with the END
    /// marker's newline.
    pub armored: String,
}

// ---------------------------------------------------------------------------
// recover
// ---------------------------------------------------------------------------

/// Recovers an OpenPGP identity from a recovery seed.
///
/// Deterministic: identical requests produce byte-identical armored
/// output (signatures use RFC 6979 nonces). Fails fast on the first
/// invalid input; nothing is retried.
pub fn recover(request: &RecoveryRequest) -> Result<RecoveredIdentity> {
    if request.user_id.is_empty() {
        return Err(RecoveryError::InvalidUserId);
    }

    // OpenPGP v4 key packets store the creation time as a u32.
    let created_at =
        u32::try_from(request.timestamp).map_err(|_| RecoveryError::InvalidTimestamp {
            reason: format!(
                "{} is outside the range an OpenPGP v4 key can store",
                request.timestamp
            ),
        })?;

    let mnemonic = Mnemonic::from_words(&request.mnemonic_words)?;
    let seed = mnemonic.to_seed(&request.passphrase)?;
    tracing::debug!(words = mnemonic.word_count(), "recovery seed validated");

    let master = ExtendedKey::master(&seed)?;
    tracing::debug!("SLIP-0010 master key derived");

    // The two key roles live on separate SLIP-0013 branches of the
    // same URI: purpose 13 for signing, purpose 17 for encryption.
    let uri = format!("gpg://{}", request.user_id);
    let signing_node = slip13::derive(&master, PURPOSE_AUTHENTICATION, &uri, 0)?;
    let encryption_node = slip13::derive(&master, PURPOSE_ENCRYPTION, &uri, 0)?;

    let primary_pair = EcKeyPair::from_scalar(signing_node.key_bytes())?;
    let subkey_pair = EcKeyPair::from_scalar(encryption_node.key_bytes())?;

    let entity = SecretEntity::new(
        created_at,
        &request.user_id,
        KeyPacket::ecdsa_primary(
            created_at,
            primary_pair.public_point(),
            primary_pair.secret_scalar(),
        ),
        KeyPacket::ecdh_subkey(
            created_at,
            subkey_pair.public_point(),
            subkey_pair.secret_scalar(),
        ),
    );

    let identity = RecoveredIdentity {
        user_id: request.user_id.clone(),
        primary_fingerprint: entity.primary_fingerprint(),
        subkey_fingerprint: entity.subkey_fingerprint(),
        armored: entity.armored()?,
    };
    tracing::debug!(
        primary = %identity.primary_fingerprint,
        subkey = %identity.subkey_fingerprint,
        "identity recovered"
    );

    Ok(identity)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
