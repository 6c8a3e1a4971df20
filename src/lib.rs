// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Proto Oracle
//!
//! Protobuf round-trip oracle for differential testing of protobuf
//! implementations.
//!
//! Given a schema module name and a message type name, the oracle decodes a
//! binary message with a reference protobuf runtime (`prost` +
//! `prost-reflect`) and encodes it back out. Another implementation's output
//! can then be compared against the oracle's.
//!
//! ## Architecture
//!
//! - `core/` - Error types and the [`SchemaRef`] pair
//! - `schema/` - [`SchemaRegistry`] of compiled `.proto` modules
//! - `encoding/` - [`ProtoMessage`] interface and its prost-reflect implementation
//! - `oracle` - The decode / render / encode pipeline
//! - `generated` - prost bindings for the built-in schemas
//!
//! ## Example
//!
//! ```rust,no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use proto_oracle::{Oracle, SchemaRef};
//!
//! let oracle = Oracle::builtin()?;
//! let output = oracle.round_trip(&SchemaRef::new("basic", "Person"), &[0x10, 0x07])?;
//! assert_eq!(output, vec![0x10, 0x07]);
//! # Ok(())
//! # }
//! ```

// Core types
pub mod core;

pub use core::{OracleError, Result, SchemaRef};

// Message encoding/decoding
pub mod encoding;

pub use encoding::{ProtoMessage, ReflectMessage};

// Schema modules
pub mod schema;

pub use schema::{MessageFactory, SchemaModule, SchemaRegistry};

// Round trip pipeline
pub mod oracle;

pub use oracle::{Oracle, OracleOptions};

pub mod generated;
