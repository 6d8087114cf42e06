//! Persisted-state layout tests.
//!
//! A store implementation must read and write the serialized association
//! verbatim, so the exact byte layout is pinned here.

use accord_core::{kvform, ParseMode};
use accord_identity::{Association, AssociationError, AssociationType, SecretBytes};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

const PINNED_BLOB: &str = "version:2\n\
                         handle:h1\n\
                         secret:AAAAAAAAAAAAAAAAAAAAAA==\n\
                         issued:1000000000\n\
                         lifetime:3600\n\
                         assoc_type:HMAC-SHA1\n";

#[test]
fn test_serialize_emits_the_pinned_layout() {
    let assoc = Association::new(
        "h1".to_string(),
        SecretBytes::from_slice(&[0u8; 16]),
        1_000_000_000,
        3600,
        "HMAC-SHA1",
    )
    .unwrap();
    assert_eq!(assoc.serialize().unwrap(), PINNED_BLOB);
}

#[test]
fn test_deserialize_accepts_the_pinned_layout() {
    let assoc = Association::deserialize(PINNED_BLOB).unwrap();
    assert_eq!(assoc.handle(), "h1");
    assert_eq!(assoc.secret().as_bytes(), &[0u8; 16]);
    assert_eq!(assoc.issued(), 1_000_000_000);
    assert_eq!(assoc.lifetime(), 3600);
    assert_eq!(assoc.assoc_type(), AssociationType::HmacSha1);
}

#[test]
fn test_secret_travels_base64_encoded_only() {
    let secret_bytes = hex::decode("00112233445566778899aabbccddeeff").unwrap();
    let assoc = Association::new(
        "h1".to_string(),
        SecretBytes::new(secret_bytes.clone()),
        1_000_000_000,
        3600,
        "HMAC-SHA1",
    )
    .unwrap();

    let serialized = assoc.serialize().unwrap();
    let secret_line = serialized
        .lines()
        .find(|line| line.starts_with("secret:"))
        .unwrap();
    let encoded = secret_line.trim_start_matches("secret:");
    assert_eq!(BASE64.decode(encoded).unwrap(), secret_bytes);
}

#[test]
fn test_association_format_always_decodes_strictly() {
    // Corrupt the stored blob with a colonless line. Tolerant KV decoding
    // would skip it, but the association format never uses tolerant mode:
    // the same input must fail deserialization outright.
    let corrupted = format!("{}trailing garbage\n", PINNED_BLOB);

    let tolerant = kvform::from_kv(&corrupted, ParseMode::Tolerant).unwrap();
    assert_eq!(tolerant.len(), 6);

    assert!(matches!(
        Association::deserialize(&corrupted),
        Err(AssociationError::KvForm(_))
    ));
}
