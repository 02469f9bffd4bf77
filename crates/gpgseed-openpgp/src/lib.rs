//! Minimal OpenPGP (RFC 4880) serialization for recovered identities.
//!
//! Implements exactly the subset needed to emit an importable secret
//! key block for a P-256 identity:
//!
//! - **packet**: new-format packet framing, MPI and subpacket encoding
//! - **key**: v4 ECDSA/ECDH key packets, fingerprints and Key IDs
//! - **sig**: v4 self-signatures (positive certification, subkey
//!   binding) with RFC 6979 deterministic ECDSA
//! - **armor**: Radix-64 ASCII armor with the CRC-24 trailer
//! - **entity**: assembly of the five-packet private-key stream
//!
//! Parsing is limited to what the tests need to check their own output;
//! this is a writer, not a general OpenPGP implementation.

pub mod armor;
pub mod entity;
pub mod key;
pub mod packet;
pub mod sig;
