// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core types used throughout the oracle.
//!
//! - [`OracleError`] - Error handling and exit code mapping
//! - [`SchemaRef`] - A (module, message type) pair naming a schema

pub mod error;

pub use error::{
    OracleError, Result, EXIT_CODEC, EXIT_IO, EXIT_RESOLUTION, EXIT_SUCCESS, EXIT_USAGE,
};

/// Reference to a message type inside a schema module.
///
/// The module is named after its `.proto` file (`basic` for `basic.proto`,
/// `nested.tree` for `nested/tree.proto`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SchemaRef {
    module: String,
    message: String,
}

impl SchemaRef {
    /// Create a schema reference.
    pub fn new(module: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            message: message.into(),
        }
    }

    /// Schema module name.
    pub fn module(&self) -> &str {
        &self.module
    }

    /// Message type name within the module.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for SchemaRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.module, self.message)
    }
}
