//! Core functionality for the Accord association stack.
//!
//! This crate provides the fundamental utilities used across the Accord
//! ecosystem: the ordered key-value text codec that carries serialized
//! associations and signed field sets, and logging initialization.

pub mod kvform;
pub mod logging;

pub use kvform::{from_kv, to_kv, KvError, ParseMode};
