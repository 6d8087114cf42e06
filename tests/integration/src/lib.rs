//! Integration tests for the Accord association stack
//!
//! This test suite validates:
//! - The persisted-state layout a store implementation must read/write
//! - Serialize/deserialize/sign flows across crate boundaries
//! - KV form behavior observed through the association surface

#[cfg(test)]
mod association_flow_tests;

#[cfg(test)]
mod wire_format_tests;
