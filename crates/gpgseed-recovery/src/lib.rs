//! Recovery of a seed-backed OpenPGP identity.
//!
//! The [`pipeline`] module is the deterministic core: a
//! [`RecoveryRequest`] (User ID, timestamp, mnemonic words, passphrase)
//! in, a [`RecoveredIdentity`] (fingerprints + armored private key
//! block) out, as a pure function. The [`prompt`] module is the
//! interactive collaborator that collects the request from a terminal
//! and writes the results to its output streams.
//!
//! Streams are injected so the whole prompt flow is testable against
//! in-memory buffers.

pub mod pipeline;
pub mod prompt;

pub use pipeline::{recover, RecoveredIdentity, RecoveryRequest};
pub use prompt::{Recovery, RecoveryOptions};
