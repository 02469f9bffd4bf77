//! OpenPGP v4 self-signatures (RFC 4880 §5.2).
//!
//! Two signature shapes are emitted, both issued by the primary key:
//! a positive certification (0x13) binding the User ID, and a subkey
//! binding (0x18). Both are ECDSA over SHA-256 with RFC 6979
//! deterministic nonces, so re-running a recovery reproduces the
//! signature bytes exactly.
//!
//! The hash input follows §5.2.4: the prefixed key (and User ID or
//! subkey) material supplied by the caller, then the signature data
//! from the version octet through the hashed subpackets, then the
//! `0x04 0xFF` trailer carrying the length of that signature data.

use p256::ecdsa::signature::hazmat::PrehashSigner;
use p256::ecdsa::{Signature, SigningKey};
use sha2::{Digest, Sha256};

use gpgseed_types::{KeyId, RecoveryError, Result};

use crate::key::{ALGO_ECDSA, HASH_SHA256};
use crate::packet::{write_mpi, write_subpacket};

// ---------------------------------------------------------------------------
// Signature types and subpackets
// ---------------------------------------------------------------------------

/// Positive certification of a User ID (RFC 4880 §5.2.1).
pub const SIG_POSITIVE_CERT: u8 = 0x13;
/// Subkey binding signature.
pub const SIG_SUBKEY_BINDING: u8 = 0x18;

/// Signature creation time subpacket.
const SUBPACKET_CREATION_TIME: u8 = 2;
/// Issuer Key ID subpacket.
const SUBPACKET_ISSUER: u8 = 16;
/// Primary User ID subpacket.
const SUBPACKET_PRIMARY_USER_ID: u8 = 25;
/// Key flags subpacket.
const SUBPACKET_KEY_FLAGS: u8 = 27;

/// Key flag: this key may certify other keys.
pub const FLAG_CERTIFY: u8 = 0x01;
/// Key flag: this key may sign data.
pub const FLAG_SIGN: u8 = 0x02;
/// Key flag: this key may encrypt communications.
pub const FLAG_ENCRYPT_COMMUNICATIONS: u8 = 0x04;
/// Key flag: this key may encrypt storage.
pub const FLAG_ENCRYPT_STORAGE: u8 = 0x08;

// ---------------------------------------------------------------------------
// Hash-input helpers
// ---------------------------------------------------------------------------

/// Returns the User ID material as hashed into a certification:
/// `0xB4 ∥ four-octet big-endian length ∥ UTF-8 bytes` (§5.2.4).
pub fn user_id_hash_material(user_id: &str) -> Vec<u8> {
    let bytes = user_id.as_bytes();
    let mut out = Vec::with_capacity(5 + bytes.len());
    out.push(0xB4);
    out.extend_from_slice(&(bytes.len() as u32).to_be_bytes());
    out.extend_from_slice(bytes);
    out
}

// ---------------------------------------------------------------------------
// SignatureBuilder
// ---------------------------------------------------------------------------

/// Assembles and signs one v4 signature packet.
pub struct SignatureBuilder {
    sig_type: u8,
    created_at: u32,
    key_flags: u8,
    primary_user_id: bool,
    issuer: KeyId,
}

impl SignatureBuilder {
    /// A positive certification (0x13): flags certify | sign, with the
    /// primary-User-ID marker set.
    pub fn positive_certification(created_at: u32, issuer: KeyId) -> Self {
        Self {
            sig_type: SIG_POSITIVE_CERT,
            created_at,
            key_flags: FLAG_CERTIFY | FLAG_SIGN,
            primary_user_id: true,
            issuer,
        }
    }

    /// A subkey binding (0x18): flags encrypt-communications |
    /// encrypt-storage.
    pub fn subkey_binding(created_at: u32, issuer: KeyId) -> Self {
        Self {
            sig_type: SIG_SUBKEY_BINDING,
            created_at,
            key_flags: FLAG_ENCRYPT_COMMUNICATIONS | FLAG_ENCRYPT_STORAGE,
            primary_user_id: false,
            issuer,
        }
    }

    /// Signs `subject` (the prefixed key/User-ID material) and returns
    /// the complete signature packet body.
    pub fn sign(&self, signing_key: &SigningKey, subject: &[u8]) -> Result<Vec<u8>> {
        let data = self.signature_data();

        let mut hasher = Sha256::new();
        hasher.update(subject);
        hasher.update(&data);
        hasher.update([0x04, 0xFF]);
        hasher.update((data.len() as u32).to_be_bytes());
        let digest: [u8; 32] = hasher.finalize().into();

        let signature: Signature = signing_key.sign_prehash(&digest).map_err(|e| {
            RecoveryError::SerializationFailure {
                reason: format!("ecdsa signing failed: {e}"),
            }
        })?;
        let (r, s) = signature.split_bytes();

        let mut body = data;

        let unhashed = self.unhashed_subpackets();
        body.extend_from_slice(&(unhashed.len() as u16).to_be_bytes());
        body.extend_from_slice(&unhashed);

        // Left 16 bits of the digest, then the MPI-encoded signature.
        body.extend_from_slice(&digest[..2]);
        write_mpi(&mut body, r.as_slice());
        write_mpi(&mut body, s.as_slice());

        Ok(body)
    }

    /// The hashed signature data: version, type, key algorithm, hash
    /// algorithm, then the length-prefixed hashed subpackets. This
    /// exact byte run is both hashed (§5.2.4) and emitted at the start
    /// of the packet body.
    fn signature_data(&self) -> Vec<u8> {
        let hashed = self.hashed_subpackets();

        let mut data = Vec::with_capacity(6 + hashed.len());
        data.push(4);
        data.push(self.sig_type);
        data.push(ALGO_ECDSA);
        data.push(HASH_SHA256);
        data.extend_from_slice(&(hashed.len() as u16).to_be_bytes());
        data.extend_from_slice(&hashed);
        data
    }

    fn hashed_subpackets(&self) -> Vec<u8> {
        let mut out = Vec::new();
        write_subpacket(&mut out, SUBPACKET_CREATION_TIME, &self.created_at.to_be_bytes());
        write_subpacket(&mut out, SUBPACKET_KEY_FLAGS, &[self.key_flags]);
        if self.primary_user_id {
            write_subpacket(&mut out, SUBPACKET_PRIMARY_USER_ID, &[0x01]);
        }
        out
    }

    fn unhashed_subpackets(&self) -> Vec<u8> {
        let mut out = Vec::new();
        write_subpacket(&mut out, SUBPACKET_ISSUER, self.issuer.as_bytes());
        out
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
