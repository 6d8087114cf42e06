//! End-to-end association flows across crate boundaries.
//!
//! These tests walk the path the protocol layer takes in production:
//! receive a fresh association, persist it, reconstitute it, and use it to
//! sign outgoing message fields.

use std::collections::HashMap;

use accord_core::{kvform, ParseMode};
use accord_crypto::hmac_sha1;
use accord_identity::{Association, SecretBytes, DEFAULT_FIELD_PREFIX};

#[test]
fn test_fresh_association_survives_persistence_and_signs() {
    let _ = tracing_subscriber::fmt::try_init();

    // A server just granted this association.
    let secret = hex::decode("0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b").unwrap();
    let assoc = Association::from_expires_in(
        1209600,
        "assoc-fresh-1".to_string(),
        SecretBytes::new(secret),
        "HMAC-SHA1",
    )
    .unwrap();

    // The store writes the serialized form and reads it back later.
    let persisted = assoc.serialize().unwrap();
    tracing::debug!(handle = assoc.handle(), "association persisted");
    let restored = Association::deserialize(&persisted).unwrap();
    assert_eq!(restored, assoc);

    // Both copies produce the same signature for the same message.
    let mut message = HashMap::new();
    message.insert("openid.mode".to_string(), "id_res".to_string());
    message.insert("openid.identity".to_string(), "https://alice.example".to_string());

    let fields = ["mode", "identity"];
    let sig_original = assoc
        .sign_fields(&fields, &message, DEFAULT_FIELD_PREFIX)
        .unwrap();
    let sig_restored = restored
        .sign_fields(&fields, &message, DEFAULT_FIELD_PREFIX)
        .unwrap();
    assert_eq!(sig_original, sig_restored);
}

#[test]
fn test_sign_agrees_with_codec_and_mac_primitives() {
    // The signature must be exactly HMAC-SHA1 over the KV encoding of the
    // pairs, so a verifier can recompute it from the primitives alone.
    let assoc = Association::new(
        "h1".to_string(),
        SecretBytes::from_slice(b"shared secret"),
        1_000_000_000,
        3600,
        "HMAC-SHA1",
    )
    .unwrap();

    let pairs = [("mode", "id_res"), ("return_to", "https://example.com/done")];
    let tag = assoc.sign(&pairs).unwrap();

    let canonical = kvform::to_kv(&pairs).unwrap();
    let recomputed = hmac_sha1(assoc.secret().as_bytes(), canonical.as_bytes());
    assert_eq!(tag, recomputed.to_vec());

    // And the canonical bytes themselves decode back to the signed pairs.
    let decoded = kvform::from_kv(&canonical, ParseMode::Strict).unwrap();
    let expected: Vec<(String, String)> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    assert_eq!(decoded, expected);
}

#[test]
fn test_expiry_worked_example() {
    let assoc = Association::new(
        "h1".to_string(),
        SecretBytes::from_slice(&[0u8; 16]),
        1_000_000_000,
        3600,
        "HMAC-SHA1",
    )
    .unwrap();

    assert_eq!(assoc.expires_in_at(1_000_000_100), 3500);
    assert_eq!(assoc.expires_in_at(1_000_003_600), 0);
}
