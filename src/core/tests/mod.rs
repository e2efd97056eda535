//! Core module tests
//!
//! Contains test suites for core functionality:
//! - Collision indexing tests
//! - Layout parsing tests
//! - Preview resolution tests
//! - Layout validation tests
//! - Type tests (KeyId, ChordKeySet, etc.)

#[cfg(test)]
mod parser_tests;
#[cfg(test)]
mod resolver_tests;
