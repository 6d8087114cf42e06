//! Association management for the Accord federated identity stack.
//!
//! A consumer negotiates an association with an identity server and then
//! uses it to authenticate protocol exchanges: the server hands out an
//! opaque handle and a shared secret, the consumer signs message fields
//! with the secret, and both sides discard the association once its
//! lifetime runs out.
//!
//! This crate owns the consumer-side view of that credential: the
//! [`Association`] entity, its expiry computation, its wire/storage
//! serialization, and the signing operations. Deciding *when* to create,
//! renew, or discard an association is the protocol layer's job, as is
//! refusing to use an expired one.
//!
//! # Security Model
//!
//! - The secret is held in a zeroizing buffer and is never serialized raw;
//!   it is base64-encoded on the wire.
//! - Signatures are order-sensitive by design: both parties must agree on
//!   field order out-of-band.
//! - Expiry here is advisory; signing still works on an expired secret.

pub mod association;
pub mod error;

pub use association::{
    Association, AssociationType, ASSOC_KEYS, DEFAULT_FIELD_PREFIX,
};
pub use error::{AssociationError, AssociationResult};

// Re-export the secret buffer so callers can construct associations
// without depending on accord-crypto directly.
pub use accord_crypto::SecretBytes;
