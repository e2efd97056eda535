// Copyright 2025 Eric Jingryd (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! src/core/mod.rs
//!
//! Core chord engine
//!
//! This module contains the fundamental data structures and algorithms
//! for chord layouts, including:
//! - Type definitions for keys, hands and chords
//! - Layout text parsing
//! - Collision indexing using HashMap-based O(1) lookup
//! - Layout validation with ordered diagnostics
//! - Next-key preview resolution
//!
//! Everything here is pure and synchronous. A parsed `Config` is never
//! mutated, so it can be shared between readers without locking.

pub mod conflict;
pub mod layout;
pub mod parser;
pub mod resolver;
pub mod types;
pub mod validator;

pub use conflict::{ChordCollision, ChordIndex};
pub use layout::Config;
pub use parser::{parse_config, ParseError};
pub use resolver::{current_output, resolve, Preview, ResolverInputError};
pub use types::*;
pub use validator::{check, check_strict, Diagnostic, DiagnosticKind, Severity, ValidationReport};

#[cfg(test)]
mod tests;
