//! End-to-end recovery scenarios with known-answer fingerprints.
//!
//! The golden vectors pin the complete pipeline — BIP-39, SLIP-0010,
//! SLIP-0013 (purposes 13 and 17), key materialization and OpenPGP
//! canonicalization — to the fingerprints produced for identities
//! created by the companion init tool.

use std::io::Cursor;

use gpgseed_openpgp::armor::read_armored_private_key;
use gpgseed_recovery::{recover, Recovery, RecoveryOptions, RecoveryRequest};
use gpgseed_types::RecoveryError;
use p256::ecdsa::signature::hazmat::PrehashVerifier;
use p256::ecdsa::{Signature, VerifyingKey};
use p256::FieldBytes;
use sha2::{Digest, Sha256};

const USER_ID: &str = "Alice <alice@example.com>";
const TIMESTAMP: i64 = 1523060353;
const PRIMARY_FPR: &str = "AB86C8C7B5136D19B0A6AEC0406D7920DCAD67C3";
const SUBKEY_FPR: &str = "CBE715CAA0E83224AC8F98E5CDF28C7D36F3F4F5";

fn golden_request() -> RecoveryRequest {
    RecoveryRequest {
        user_id: USER_ID.into(),
        timestamp: TIMESTAMP,
        mnemonic_words: vec!["all".to_string(); 12],
        passphrase: "s3cr3t".into(),
    }
}

// ===================================================================
// Scenario 1: golden fingerprints
// ===================================================================

#[test]
fn golden_vector_fingerprints() -> Result<(), RecoveryError> {
    let identity = recover(&golden_request())?;
    assert_eq!(identity.primary_fingerprint.to_string(), PRIMARY_FPR);
    assert_eq!(identity.subkey_fingerprint.to_string(), SUBKEY_FPR);
    Ok(())
}

#[test]
fn golden_vector_parses_as_one_identity_one_subkey() -> Result<(), RecoveryError> {
    let identity = recover(&golden_request())?;
    let binary = read_armored_private_key(&identity.armored)?;

    let packets = parse_packets(&binary);
    let tags: Vec<u8> = packets.iter().map(|p| p.tag).collect();
    assert_eq!(tags, [5, 13, 2, 7, 2], "one identity, one subkey");
    assert_eq!(packets[1].body, USER_ID.as_bytes());
    Ok(())
}

// ===================================================================
// Scenario 2: the self-certification verifies under the primary key
// ===================================================================

#[test]
fn self_certification_verifies() -> Result<(), RecoveryError> {
    let identity = recover(&golden_request())?;
    let binary = read_armored_private_key(&identity.armored)?;
    let packets = parse_packets(&binary);

    verify_signature(
        &packets[2].body,
        0x13,
        &[
            prefixed_key(&packets[0].body),
            prefixed_user_id(USER_ID),
        ]
        .concat(),
        &point_of(&packets[0].body),
    );
    Ok(())
}

#[test]
fn subkey_binding_verifies() -> Result<(), RecoveryError> {
    let identity = recover(&golden_request())?;
    let binary = read_armored_private_key(&identity.armored)?;
    let packets = parse_packets(&binary);

    verify_signature(
        &packets[4].body,
        0x18,
        &[prefixed_key(&packets[0].body), prefixed_key(&packets[3].body)].concat(),
        &point_of(&packets[0].body),
    );
    Ok(())
}

// ===================================================================
// Scenario 3: declined confirmation
// ===================================================================

#[test]
fn declined_confirmation_leaves_output_empty() {
    let mut output = Vec::new();
    let mut diagnostic = Vec::new();
    let result = Recovery::with_streams(
        RecoveryOptions {
            seed_length: 12,
            use_passphrase: true,
        },
        Cursor::new(b"no\n".to_vec()),
        &mut output,
        &mut diagnostic,
    )
    .run();

    assert!(matches!(result, Err(RecoveryError::InvalidConfirmation)));
    assert!(output.is_empty());
}

// ===================================================================
// Scenario 4: the trivial 24-word phrase is rejected
// ===================================================================

#[test]
fn all_all_24_words_rejected() {
    let mut request = golden_request();
    request.mnemonic_words = vec!["all".to_string(); 24];
    assert!(matches!(
        recover(&request),
        Err(RecoveryError::MnemonicInvalid { .. })
    ));
}

#[test]
fn boundary_word_counts() {
    for count in [11, 13, 17, 19, 23, 25] {
        let mut request = golden_request();
        request.mnemonic_words = vec!["all".to_string(); count];
        assert!(
            matches!(
                recover(&request),
                Err(RecoveryError::InvalidSeedLength { length }) if length == count
            ),
            "word count {count} must be rejected"
        );
    }
}

// ===================================================================
// Scenario 5: determinism
// ===================================================================

#[test]
fn identical_inputs_identical_armor() -> Result<(), RecoveryError> {
    let a = recover(&golden_request())?;
    let b = recover(&golden_request())?;
    assert_eq!(a.armored, b.armored);
    Ok(())
}

// ===================================================================
// Scenario 6: passphrase sensitivity
// ===================================================================

#[test]
fn passphrase_changes_fingerprints() -> Result<(), RecoveryError> {
    let with = recover(&golden_request())?;
    let mut request = golden_request();
    request.passphrase = String::new();
    let without = recover(&request)?;

    assert_ne!(with.primary_fingerprint, without.primary_fingerprint);
    assert_ne!(with.subkey_fingerprint, without.subkey_fingerprint);
    Ok(())
}

// ===================================================================
// Full interactive session against the golden vector
// ===================================================================

#[test]
fn interactive_session_reports_golden_fingerprints() {
    let mut input = String::from("yes\n");
    input.push_str(USER_ID);
    input.push('\n');
    input.push_str("1523060353\n");
    input.push_str(&"all\n".repeat(12));
    input.push_str("s3cr3t\n");

    let mut output = Vec::new();
    let mut diagnostic = Vec::new();
    Recovery::with_streams(
        RecoveryOptions {
            seed_length: 12,
            use_passphrase: true,
        },
        Cursor::new(input.into_bytes()),
        &mut output,
        &mut diagnostic,
    )
    .run()
    .expect("interactive recovery succeeds");

    let diagnostic = String::from_utf8(diagnostic).expect("diagnostics are UTF-8");
    assert!(diagnostic.contains(&format!("GPG User ID:             {USER_ID}")));
    assert!(diagnostic.contains(&format!("Primary Key Fingerprint: {PRIMARY_FPR}")));
    assert!(diagnostic.contains(&format!("Subkey Fingerprint:      {SUBKEY_FPR}")));

    let output = String::from_utf8(output).expect("output is UTF-8");
    let armored = output.strip_suffix('\n').expect("trailing newline");
    let binary = read_armored_private_key(armored).expect("armor decodes");
    assert_eq!(parse_packets(&binary).len(), 5);
}

// ===================================================================
// Helpers: independent packet parsing and signature verification
// ===================================================================

struct ParsedPacket {
    tag: u8,
    body: Vec<u8>,
}

fn parse_packets(mut stream: &[u8]) -> Vec<ParsedPacket> {
    let mut packets = Vec::new();
    while !stream.is_empty() {
        let ctb = stream[0];
        assert_eq!(ctb & 0xC0, 0xC0, "new-format CTB expected");
        let tag = ctb & 0x3F;

        let (len, header) = match stream[1] {
            n if n < 192 => (n as usize, 2),
            n if n < 224 => (((n as usize - 192) << 8) + stream[2] as usize + 192, 3),
            0xFF => (
                u32::from_be_bytes([stream[2], stream[3], stream[4], stream[5]]) as usize,
                6,
            ),
            n => panic!("unsupported length octet {n}"),
        };

        packets.push(ParsedPacket {
            tag,
            body: stream[header..header + len].to_vec(),
        });
        stream = &stream[header + len..];
    }
    packets
}

/// The public portion of a secret key packet body (ECDSA or ECDH).
fn public_portion(body: &[u8]) -> &[u8] {
    match body[5] {
        19 => &body[..82],
        18 => &body[..86],
        other => panic!("unexpected algorithm {other}"),
    }
}

fn point_of(body: &[u8]) -> Vec<u8> {
    body[17..17 + 65].to_vec()
}

fn prefixed_key(body: &[u8]) -> Vec<u8> {
    let public = public_portion(body);
    let mut out = vec![0x99];
    out.extend_from_slice(&(public.len() as u16).to_be_bytes());
    out.extend_from_slice(public);
    out
}

fn prefixed_user_id(user_id: &str) -> Vec<u8> {
    let mut out = vec![0xB4];
    out.extend_from_slice(&(user_id.len() as u32).to_be_bytes());
    out.extend_from_slice(user_id.as_bytes());
    out
}

fn read_mpi(bytes: &[u8]) -> (Vec<u8>, &[u8]) {
    let bits = u16::from_be_bytes([bytes[0], bytes[1]]) as usize;
    let len = bits.div_ceil(8);
    (bytes[2..2 + len].to_vec(), &bytes[2 + len..])
}

fn pad_scalar(bytes: &[u8]) -> FieldBytes {
    let mut padded = [0u8; 32];
    padded[32 - bytes.len()..].copy_from_slice(bytes);
    FieldBytes::from(padded)
}

/// Parses a signature packet body, recomputes its digest over `subject`
/// and checks it verifies under the SEC1 `signer_point`.
fn verify_signature(body: &[u8], expected_type: u8, subject: &[u8], signer_point: &[u8]) {
    assert_eq!(body[0], 4);
    assert_eq!(body[1], expected_type);
    assert_eq!(body[2], 19, "ECDSA expected");
    assert_eq!(body[3], 8, "SHA-256 expected");

    let hashed_len = u16::from_be_bytes([body[4], body[5]]) as usize;
    let hashed_data = &body[..6 + hashed_len];

    let mut hasher = Sha256::new();
    hasher.update(subject);
    hasher.update(hashed_data);
    hasher.update([0x04, 0xFF]);
    hasher.update((hashed_data.len() as u32).to_be_bytes());
    let digest: [u8; 32] = hasher.finalize().into();

    let unhashed_at = 6 + hashed_len;
    let unhashed_len = u16::from_be_bytes([body[unhashed_at], body[unhashed_at + 1]]) as usize;
    let left16_at = unhashed_at + 2 + unhashed_len;
    assert_eq!(&body[left16_at..left16_at + 2], &digest[..2]);

    let (r, rest) = read_mpi(&body[left16_at + 2..]);
    let (s, rest) = read_mpi(rest);
    assert!(rest.is_empty());

    let signature =
        Signature::from_scalars(pad_scalar(&r), pad_scalar(&s)).expect("valid scalars");
    VerifyingKey::from_sec1_bytes(signer_point)
        .expect("valid signer point")
        .verify_prehash(&digest, &signature)
        .expect("signature verifies");
}
