//! Consumer-side shared-secret associations.
//!
//! An association is the credential a consumer holds after negotiating
//! with an identity server: an opaque handle naming the association on the
//! server, a shared secret, and a bounded validity window. Store
//! implementations persist associations through [`Association::serialize`]
//! and reconstitute them through [`Association::deserialize`]; the protocol
//! layer signs outgoing message fields through [`Association::sign`] and
//! [`Association::sign_fields`].
//!
//! Instances are immutable after construction. Every operation is a pure
//! function of the fields and, for expiry, the current wall-clock time, so
//! associations can be shared freely across threads.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use accord_core::kvform::{self, ParseMode};
use accord_crypto::{hmac_sha1, SecretBytes};

use crate::error::{AssociationError, AssociationResult};

/// Serialization format version emitted and accepted by this crate.
const FORMAT_VERSION: &str = "2";

/// The ordering and names of keys as stored by [`Association::serialize`].
pub const ASSOC_KEYS: [&str; 6] = [
    "version",
    "handle",
    "secret",
    "issued",
    "lifetime",
    "assoc_type",
];

/// Namespace prefix under which protocol fields are keyed in messages.
///
/// [`Association::sign_fields`] looks field values up under this prefix
/// unless the caller overrides it.
pub const DEFAULT_FIELD_PREFIX: &str = "openid.";

/// Association type negotiated with the server.
///
/// The data model generalizes to other digests, but validation is
/// currently a hard allow-list of one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssociationType {
    /// HMAC keyed with SHA-1.
    HmacSha1,
}

impl AssociationType {
    /// Wire name of this association type.
    pub fn as_str(&self) -> &'static str {
        match self {
            AssociationType::HmacSha1 => "HMAC-SHA1",
        }
    }
}

impl FromStr for AssociationType {
    type Err = AssociationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HMAC-SHA1" => Ok(AssociationType::HmacSha1),
            other => Err(AssociationError::UnsupportedAssociationType {
                assoc_type: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for AssociationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A consumer's view of one association with a server.
///
/// Two instances are equal when all five fields are equal. The secret is
/// held in a [`SecretBytes`] buffer, so `Debug` output never exposes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Association {
    handle: String,
    secret: SecretBytes,
    issued: u64,
    lifetime: u64,
    assoc_type: AssociationType,
}

impl Association {
    /// Create an association from known fields.
    ///
    /// This is the constructor store implementations use when
    /// reconstituting a persisted association, since it preserves the
    /// original `issued` timestamp. Fails with
    /// [`AssociationError::UnsupportedAssociationType`] for any
    /// `assoc_type` other than `"HMAC-SHA1"`.
    pub fn new(
        handle: String,
        secret: SecretBytes,
        issued: u64,
        lifetime: u64,
        assoc_type: &str,
    ) -> AssociationResult<Self> {
        let assoc_type = assoc_type.parse()?;
        Ok(Self {
            handle,
            secret,
            issued,
            lifetime,
            assoc_type,
        })
    }

    /// Create an association from a server-advertised `expires_in`.
    ///
    /// Stamps `issued` with the current time, so this is only for
    /// associations the server just granted. Store implementations must
    /// not use this constructor.
    pub fn from_expires_in(
        expires_in: u64,
        handle: String,
        secret: SecretBytes,
        assoc_type: &str,
    ) -> AssociationResult<Self> {
        let issued = unix_now();
        Self::new(handle, secret, issued, expires_in, assoc_type)
    }

    /// The handle the server assigned to this association.
    pub fn handle(&self) -> &str {
        &self.handle
    }

    /// The shared secret.
    pub fn secret(&self) -> &SecretBytes {
        &self.secret
    }

    /// Unix timestamp (seconds) at which the association became valid.
    pub fn issued(&self) -> u64 {
        self.issued
    }

    /// Number of seconds the association stays valid after `issued`.
    pub fn lifetime(&self) -> u64 {
        self.lifetime
    }

    /// The negotiated association type.
    pub fn assoc_type(&self) -> AssociationType {
        self.assoc_type
    }

    /// Seconds this association is still valid for, or `0` once expired.
    ///
    /// Monotonically non-increasing in real time; never negative. A return
    /// of `0` means the caller must treat the association as expired. This
    /// entity itself keeps signing regardless; enforcement is the protocol
    /// layer's responsibility.
    pub fn expires_in(&self) -> u64 {
        self.expires_in_at(unix_now())
    }

    /// Remaining validity as observed at `now` (Unix seconds).
    pub fn expires_in_at(&self, now: u64) -> u64 {
        self.issued
            .saturating_add(self.lifetime)
            .saturating_sub(now)
    }

    /// Convert this association to KV form.
    ///
    /// Produces the six-line, fixed-order layout a store must read and
    /// write verbatim; the secret appears base64-encoded, never raw.
    /// Inverse of [`Association::deserialize`].
    pub fn serialize(&self) -> AssociationResult<String> {
        let pairs = [
            ("version", FORMAT_VERSION.to_string()),
            ("handle", self.handle.clone()),
            ("secret", BASE64.encode(self.secret.as_bytes())),
            ("issued", self.issued.to_string()),
            ("lifetime", self.lifetime.to_string()),
            ("assoc_type", self.assoc_type.as_str().to_string()),
        ];
        debug_assert!(pairs.iter().map(|(key, _)| *key).eq(ASSOC_KEYS));

        Ok(kvform::to_kv(&pairs)?)
    }

    /// Parse an association as stored by [`Association::serialize`].
    ///
    /// Decoding is strict: the key sequence must equal [`ASSOC_KEYS`]
    /// exactly and in order, rejecting reordered or renamed-field input
    /// rather than tolerating silent format drift.
    pub fn deserialize(input: &str) -> AssociationResult<Self> {
        let pairs = kvform::from_kv(input, ParseMode::Strict)?;

        let pairs: [(String, String); 6] = match pairs.try_into() {
            Ok(pairs) => pairs,
            Err(pairs) => {
                return Err(AssociationError::UnexpectedKeys {
                    keys: pairs.into_iter().map(|(key, _)| key).collect(),
                });
            }
        };
        if !pairs.iter().map(|(key, _)| key.as_str()).eq(ASSOC_KEYS) {
            return Err(AssociationError::UnexpectedKeys {
                keys: pairs.into_iter().map(|(key, _)| key).collect(),
            });
        }

        let [(_, version), (_, handle), (_, secret), (_, issued), (_, lifetime), (_, assoc_type)] =
            pairs;

        if version != FORMAT_VERSION {
            return Err(AssociationError::UnknownVersion { version });
        }

        let issued = issued
            .parse()
            .map_err(|source| AssociationError::MalformedField {
                field: "issued",
                source,
            })?;
        let lifetime = lifetime
            .parse()
            .map_err(|source| AssociationError::MalformedField {
                field: "lifetime",
                source,
            })?;
        let secret = SecretBytes::new(BASE64.decode(secret)?);

        Self::new(handle, secret, issued, lifetime, &assoc_type)
    }

    /// Sign an ordered sequence of `(key, value)` pairs.
    ///
    /// Computes the HMAC-SHA1 tag of the canonical KV encoding of `pairs`
    /// under the shared secret and returns the raw tag bytes. The same
    /// pairs in the same order always produce the same tag; reordering the
    /// pairs changes it, so both parties must agree on field order.
    pub fn sign<K, V>(&self, pairs: &[(K, V)]) -> AssociationResult<Vec<u8>>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let kv = kvform::to_kv(pairs)?;
        Ok(hmac_sha1(self.secret.as_bytes(), kv.as_bytes()).to_vec())
    }

    /// Sign named fields drawn from a message map.
    ///
    /// For each name in `fields`, in order, the value is looked up under
    /// `prefix + name` in `data` (see [`DEFAULT_FIELD_PREFIX`]); a missing
    /// entry fails with [`AssociationError::MissingField`] rather than
    /// signing a partial field set. Returns the tag base64-encoded, ready
    /// for embedding in a text-based message; use [`Association::sign`]
    /// for the raw bytes.
    pub fn sign_fields(
        &self,
        fields: &[&str],
        data: &HashMap<String, String>,
        prefix: &str,
    ) -> AssociationResult<String> {
        let mut pairs = Vec::with_capacity(fields.len());
        for &field in fields {
            let value = data.get(&format!("{}{}", prefix, field)).ok_or_else(|| {
                AssociationError::MissingField {
                    field: field.to_string(),
                }
            })?;
            pairs.push((field, value.as_str()));
        }

        let tag = self.sign(&pairs)?;
        Ok(BASE64.encode(tag))
    }
}

/// Current wall-clock time in whole Unix seconds.
fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_secs()
}
