//! OpenPGP packet framing and primitive encodings (RFC 4880 §4–§5).
//!
//! All packets are written with new-format headers: the cipher type
//! byte is `0xC0 | tag`, followed by a one-, two- or five-octet body
//! length. Multi-precision integers (MPIs) are encoded minimally — a
//! two-octet big-endian bit count, then the integer with no leading
//! zero octets.

use gpgseed_types::{RecoveryError, Result};

// ---------------------------------------------------------------------------
// Packet tags
// ---------------------------------------------------------------------------

/// Signature packet.
pub const TAG_SIGNATURE: u8 = 2;
/// Secret-Key packet (primary).
pub const TAG_SECRET_KEY: u8 = 5;
/// Secret-Subkey packet.
pub const TAG_SECRET_SUBKEY: u8 = 7;
/// User ID packet.
pub const TAG_USER_ID: u8 = 13;

/// New-format length values 192–223 introduce a two-octet length.
const TWO_OCTET_THRESHOLD: usize = 192;
/// Largest body length expressible in the two-octet form.
const TWO_OCTET_MAX: usize = 8383;

// ---------------------------------------------------------------------------
// Packet framing
// ---------------------------------------------------------------------------

/// Appends one packet (new-format header + body) to `out`.
pub fn write_packet(out: &mut Vec<u8>, tag: u8, body: &[u8]) -> Result<()> {
    out.push(0xC0 | tag);
    write_body_length(out, body.len())?;
    out.extend_from_slice(body);
    Ok(())
}

/// Encodes a new-format body length (RFC 4880 §4.2.2).
fn write_body_length(out: &mut Vec<u8>, len: usize) -> Result<()> {
    if len < TWO_OCTET_THRESHOLD {
        out.push(len as u8);
    } else if len <= TWO_OCTET_MAX {
        let reduced = len - TWO_OCTET_THRESHOLD;
        out.push((reduced >> 8) as u8 + 192);
        out.push(reduced as u8);
    } else {
        let len = u32::try_from(len).map_err(|_| RecoveryError::SerializationFailure {
            reason: format!("packet body of {len} bytes exceeds the five-octet length form"),
        })?;
        out.push(0xFF);
        out.extend_from_slice(&len.to_be_bytes());
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// MPI encoding
// ---------------------------------------------------------------------------

/// Appends a minimally-encoded MPI: two-octet big-endian bit count,
/// then the integer with leading zero octets stripped.
pub fn write_mpi(out: &mut Vec<u8>, bytes: &[u8]) {
    let first = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    let trimmed = &bytes[first..];

    let bit_count = match trimmed.first() {
        Some(&lead) => (trimmed.len() - 1) * 8 + (8 - lead.leading_zeros() as usize),
        None => 0,
    };

    out.extend_from_slice(&(bit_count as u16).to_be_bytes());
    out.extend_from_slice(trimmed);
}

/// Encodes an MPI into a fresh buffer. Used where the caller needs the
/// exact byte run (e.g. the secret-key checksum).
pub fn mpi_bytes(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(2 + bytes.len());
    write_mpi(&mut out, bytes);
    out
}

// ---------------------------------------------------------------------------
// Signature subpackets
// ---------------------------------------------------------------------------

/// Appends one signature subpacket (RFC 4880 §5.2.3.1).
///
/// The one-octet length form covers every subpacket this tool emits;
/// the length counts the type octet plus the body.
pub fn write_subpacket(out: &mut Vec<u8>, subpacket_type: u8, body: &[u8]) {
    out.push(body.len() as u8 + 1);
    out.push(subpacket_type);
    out.extend_from_slice(body);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
