//! Deterministic key derivation for the gpgseed recovery tool.
//!
//! This crate is the **sole** location for the derivation pipeline that
//! turns user-supplied secrets into P-256 key material:
//!
//! - **BIP-39** mnemonic validation and PBKDF2-HMAC-SHA512 seed derivation
//! - **SLIP-0010** hierarchical derivation on the Nist256p1 curve
//! - **SLIP-0013** URI-based authentication-key paths
//! - **P-256** private-key materialization (scalar → key pair)
//!
//! No other crate in the workspace should perform raw derivation steps.

pub mod keys;
pub mod mnemonic;
pub mod slip10;
pub mod slip13;
