//! OpenPGP v4 key packets for P-256 keys (RFC 4880 §5.5, RFC 6637).
//!
//! Builds the public and secret packet bodies for the ECDSA primary
//! key and the ECDH encryption subkey, and computes the v4 fingerprint
//! (SHA-1 over the canonicalized public body) that everything else —
//! Key IDs, issuer subpackets, the user-facing echo — hangs off.

use sha1::{Digest, Sha1};
use zeroize::{Zeroize, ZeroizeOnDrop};

use gpgseed_types::{Fingerprint, KeyId};

use crate::packet::{mpi_bytes, write_mpi, TAG_SECRET_KEY, TAG_SECRET_SUBKEY};

// ---------------------------------------------------------------------------
// Algorithm constants
// ---------------------------------------------------------------------------

/// Public-key algorithm id: ECDSA (RFC 6637).
pub const ALGO_ECDSA: u8 = 19;
/// Public-key algorithm id: ECDH (RFC 6637).
pub const ALGO_ECDH: u8 = 18;
/// OpenPGP hash id for SHA-256.
pub const HASH_SHA256: u8 = 8;
/// OpenPGP symmetric-algorithm id for AES-128.
pub const SYMMETRIC_AES128: u8 = 7;

/// DER encoding of the NIST P-256 curve OID, 1.2.840.10045.3.1.7,
/// written into key packets behind a one-octet length prefix.
pub const OID_NIST_P256: [u8; 8] = [0x2A, 0x86, 0x48, 0xCE, 0x3D, 0x03, 0x01, 0x07];

// ---------------------------------------------------------------------------
// KdfParams
// ---------------------------------------------------------------------------

/// ECDH KDF parameters (RFC 6637 §9): the hash that feeds the KDF and
/// the symmetric cipher that wraps session keys.
#[derive(Clone, Copy, Zeroize)]
pub struct KdfParams {
    /// OpenPGP hash id.
    pub hash: u8,
    /// OpenPGP symmetric-algorithm id.
    pub cipher: u8,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            hash: HASH_SHA256,
            cipher: SYMMETRIC_AES128,
        }
    }
}

// ---------------------------------------------------------------------------
// KeyPacket
// ---------------------------------------------------------------------------

/// One v4 key packet: algorithm, creation time and P-256 key material.
///
/// The secret scalar is zeroized when the packet is dropped.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct KeyPacket {
    tag: u8,
    algorithm: u8,
    created_at: u32,
    public_point: [u8; 65],
    secret_scalar: [u8; 32],
    kdf: Option<KdfParams>,
}

impl KeyPacket {
    /// Builds the ECDSA primary-key packet (tag 5).
    pub fn ecdsa_primary(created_at: u32, public_point: [u8; 65], secret_scalar: [u8; 32]) -> Self {
        Self {
            tag: TAG_SECRET_KEY,
            algorithm: ALGO_ECDSA,
            created_at,
            public_point,
            secret_scalar,
            kdf: None,
        }
    }

    /// Builds the ECDH subkey packet (tag 7) with the default
    /// SHA-256/AES-128 KDF parameters.
    pub fn ecdh_subkey(created_at: u32, public_point: [u8; 65], secret_scalar: [u8; 32]) -> Self {
        Self {
            tag: TAG_SECRET_SUBKEY,
            algorithm: ALGO_ECDH,
            created_at,
            public_point,
            secret_scalar,
            kdf: Some(KdfParams::default()),
        }
    }

    /// Returns the packet tag (5 for the primary, 7 for the subkey).
    pub fn tag(&self) -> u8 {
        self.tag
    }

    /// Serializes the public portion of the packet body: version,
    /// creation time, algorithm, curve OID, MPI-encoded point, and for
    /// ECDH the KDF parameter block.
    pub fn public_body(&self) -> Vec<u8> {
        let mut body = Vec::with_capacity(90);
        body.push(4);
        body.extend_from_slice(&self.created_at.to_be_bytes());
        body.push(self.algorithm);

        body.push(OID_NIST_P256.len() as u8);
        body.extend_from_slice(&OID_NIST_P256);

        write_mpi(&mut body, &self.public_point);

        if let Some(kdf) = self.kdf {
            // length, reserved format octet, hash id, cipher id
            body.push(3);
            body.push(0x01);
            body.push(kdf.hash);
            body.push(kdf.cipher);
        }

        body
    }

    /// Serializes the full secret packet body: the public portion, the
    /// S2K usage octet 0x00 (unencrypted), the MPI of the private
    /// scalar, and the two-octet checksum — the sum of the MPI bytes
    /// modulo 65536 (RFC 4880 §5.5.3).
    pub fn secret_body(&self) -> Vec<u8> {
        let mut body = self.public_body();
        body.push(0x00);

        let secret_mpi = mpi_bytes(&self.secret_scalar);
        let checksum = secret_mpi
            .iter()
            .fold(0u16, |acc, &b| acc.wrapping_add(u16::from(b)));
        body.extend_from_slice(&secret_mpi);
        body.extend_from_slice(&checksum.to_be_bytes());

        body
    }

    /// Returns the hash-prefixed public body used by fingerprints and
    /// signature inputs: `0x99 ∥ two-octet length ∥ public body`
    /// (RFC 4880 §12.2).
    pub fn hash_material(&self) -> Vec<u8> {
        let body = self.public_body();
        let mut out = Vec::with_capacity(3 + body.len());
        out.push(0x99);
        out.extend_from_slice(&(body.len() as u16).to_be_bytes());
        out.extend_from_slice(&body);
        out
    }

    /// Computes the v4 fingerprint: SHA-1 over [`hash_material`](Self::hash_material).
    pub fn fingerprint(&self) -> Fingerprint {
        let digest: [u8; 20] = Sha1::digest(self.hash_material()).into();
        Fingerprint::new(digest)
    }

    /// Computes the 64-bit Key ID (the fingerprint's low 8 bytes).
    pub fn key_id(&self) -> KeyId {
        self.fingerprint().key_id()
    }

    /// Returns the private scalar, big-endian.
    pub fn secret_scalar(&self) -> &[u8; 32] {
        &self.secret_scalar
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
