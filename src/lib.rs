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

//! Chord Layout Engine
//!
//! Parses, checks, exports and previews layouts for a 14-key split chorded
//! keyboard: seven keys per hand (Pinkie, Ring, Middle, Index and three
//! thumb keys), where one output is produced by pressing a set of keys on
//! the same hand together.
//!
//! # Features
//!
//! - **Parsing:** Line-oriented layout text into ordered chord records
//! - **Validation:** Duplicate chords, aliased outputs, unused keys, hand balance
//! - **Export:** JSON interchange document plus firmware source renderings
//! - **Preview:** For a partly pressed chord, what each next key completes to
//!
//! # Architecture
//!
//! - **`core`:** Pure engine (types, parser, collision index, validator, resolver)
//! - **`export`:** Interchange document and firmware text renderings
//! - **`config`:** Layout files, atomic writes and the swappable session
//!
//! # Layout format
//!
//! ```text
//! # <Hand><Role>+ <Output>
//! LP  a
//! LPR e
//! RIU space
//! ```
//!
//! Hands are `L`/`R`; roles are `P R M I` for fingers and `L U D` for the
//! ThumbLeft, ThumbUp and ThumbDown keys.
//!
//! # Examples
//!
//! ## Parsing and checking a layout
//!
//! ```
//! use chord_layout::core::{check, parse_config};
//!
//! let config = parse_config("LP a\nLPR e\n")?;
//! let report = check(&config);
//!
//! for diagnostic in &report.diagnostics {
//!     println!("{}", diagnostic);
//! }
//! # Ok::<(), chord_layout::core::ParseError>(())
//! ```
//!
//! ## Previewing the next key
//!
//! ```
//! use chord_layout::core::{parse_config, resolve, KeyId};
//!
//! let config = parse_config("LPR e")?;
//! let preview = resolve(&config, ["LP".parse::<KeyId>()?])?;
//!
//! assert_eq!(preview["LR".parse::<KeyId>()?.index()], Some("e"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod core;
pub mod export;

// Re-export commonly used types for convenience
pub use core::{ChordDefinition, ChordKeySet, Config, FingerRole, Hand, KeyId};
