//! Keyed message authentication.
//!
//! The association protocol authenticates field sets with HMAC-SHA1. The
//! primitive is stateless and deterministic: the same key and message
//! always produce the same tag.

use hmac::{Hmac, Mac};
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

/// Digest length of SHA-1 in bytes.
pub const SHA1_DIGEST_LEN: usize = 20;

/// Compute the HMAC-SHA1 tag of `message` under `key`.
///
/// Keys of any length are accepted; HMAC hashes or pads them per RFC 2104.
pub fn hmac_sha1(key: &[u8], message: &[u8]) -> [u8; SHA1_DIGEST_LEN] {
    let mut mac = HmacSha1::new_from_slice(key).expect("HMAC accepts keys of any length");
    mac.update(message);

    let result = mac.finalize();
    let bytes = result.into_bytes();
    let mut tag = [0u8; SHA1_DIGEST_LEN];
    tag.copy_from_slice(&bytes);
    tag
}
