//! Cryptographic primitives for the Accord association stack.
//!
//! This crate provides the keyed message-authentication primitive used to
//! sign protocol fields, and the opaque buffer type that holds shared
//! secrets in memory.
//!
//! # Security Principles
//!
//! - Never roll custom cryptographic primitives
//! - Secrets must never be logged or hardcoded
//! - Key material is zeroized when it goes out of scope

pub mod mac;
pub mod secret;

pub use mac::{hmac_sha1, SHA1_DIGEST_LEN};
pub use secret::SecretBytes;
