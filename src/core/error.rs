// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Error types for the round-trip oracle.
//!
//! Every failure is fatal for the invocation. Errors group into classes that
//! map onto distinct process exit codes:
//! - Usage (argument count)
//! - Schema resolution (unknown module, unknown message type, bad descriptor set)
//! - Codec (malformed input, missing required fields, encode failure)
//! - I/O (stdin, stdout, descriptor set files)

use thiserror::Error;

/// Exit code for a successful round trip.
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code for a wrong argument count or unparsable flags.
pub const EXIT_USAGE: i32 = 1;
/// Exit code when the schema module or message type cannot be resolved.
pub const EXIT_RESOLUTION: i32 = 2;
/// Exit code when the input cannot be decoded or the message cannot be encoded.
pub const EXIT_CODEC: i32 = 3;
/// Exit code when reading stdin or writing stdout fails.
pub const EXIT_IO: i32 = 4;

/// Errors that can occur while resolving, decoding or re-encoding a message.
#[derive(Debug, Error)]
pub enum OracleError {
    /// Wrong arguments
    #[error("Usage error: {message}")]
    Usage {
        /// What was wrong with the invocation
        message: String,
    },

    /// No schema module with this name is loaded
    #[error("Schema module not found: '{module}'")]
    ModuleNotFound {
        /// Requested module name
        module: String,
    },

    /// The module exists but does not declare the message type
    #[error("Message type '{message}' not found in schema module '{module}'")]
    MessageNotFound {
        /// Module that was searched
        module: String,
        /// Requested message type name
        message: String,
    },

    /// A FileDescriptorSet could not be decoded or linked
    #[error("Invalid descriptor set: {reason}")]
    InvalidDescriptorSet {
        /// Decoder or linker message
        reason: String,
    },

    /// Input bytes are not a valid encoding of the message type
    #[error("Failed to decode '{message_type}': {reason}")]
    Decode {
        /// Full name of the message type
        message_type: String,
        /// Wire-format error
        reason: String,
    },

    /// Decoded message lacks proto2 required fields
    #[error(
        "Message '{message_type}' is missing required fields: {}",
        .fields.join(", ")
    )]
    MissingRequired {
        /// Full name of the message type
        message_type: String,
        /// Dotted paths of the missing fields
        fields: Vec<String>,
    },

    /// The decoded message could not be serialized
    #[error("Failed to encode '{message_type}': {reason}")]
    Encode {
        /// Full name of the message type
        message_type: String,
        /// Encoder message
        reason: String,
    },

    /// Reading or writing a stream failed
    #[error("I/O error while {context}: {source}")]
    Io {
        /// What was being read or written
        context: String,
        /// Underlying error
        source: std::io::Error,
    },
}

impl OracleError {
    /// Create a usage error.
    pub fn usage(message: impl Into<String>) -> Self {
        OracleError::Usage {
            message: message.into(),
        }
    }

    /// Create a "module not found" error.
    pub fn module_not_found(module: impl Into<String>) -> Self {
        OracleError::ModuleNotFound {
            module: module.into(),
        }
    }

    /// Create a "message type not found" error.
    pub fn message_not_found(module: impl Into<String>, message: impl Into<String>) -> Self {
        OracleError::MessageNotFound {
            module: module.into(),
            message: message.into(),
        }
    }

    /// Create an invalid descriptor set error.
    pub fn invalid_descriptor_set(reason: impl Into<String>) -> Self {
        OracleError::InvalidDescriptorSet {
            reason: reason.into(),
        }
    }

    /// Create a decode error.
    pub fn decode(message_type: impl Into<String>, reason: impl Into<String>) -> Self {
        OracleError::Decode {
            message_type: message_type.into(),
            reason: reason.into(),
        }
    }

    /// Create a missing required fields error.
    pub fn missing_required(message_type: impl Into<String>, fields: Vec<String>) -> Self {
        OracleError::MissingRequired {
            message_type: message_type.into(),
            fields,
        }
    }

    /// Create an encode error.
    pub fn encode(message_type: impl Into<String>, reason: impl Into<String>) -> Self {
        OracleError::Encode {
            message_type: message_type.into(),
            reason: reason.into(),
        }
    }

    /// Create an I/O error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        OracleError::Io {
            context: context.into(),
            source,
        }
    }

    /// Process exit code for this error class.
    pub fn exit_code(&self) -> i32 {
        match self {
            OracleError::Usage { .. } => EXIT_USAGE,
            OracleError::ModuleNotFound { .. }
            | OracleError::MessageNotFound { .. }
            | OracleError::InvalidDescriptorSet { .. } => EXIT_RESOLUTION,
            OracleError::Decode { .. }
            | OracleError::MissingRequired { .. }
            | OracleError::Encode { .. } => EXIT_CODEC,
            OracleError::Io { .. } => EXIT_IO,
        }
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            OracleError::Usage { message } => vec![("message", message.clone())],
            OracleError::ModuleNotFound { module } => vec![("module", module.clone())],
            OracleError::MessageNotFound { module, message } => {
                vec![("module", module.clone()), ("message", message.clone())]
            }
            OracleError::InvalidDescriptorSet { reason } => vec![("reason", reason.clone())],
            OracleError::Decode {
                message_type,
                reason,
            }
            | OracleError::Encode {
                message_type,
                reason,
            } => vec![("type", message_type.clone()), ("reason", reason.clone())],
            OracleError::MissingRequired {
                message_type,
                fields,
            } => vec![("type", message_type.clone()), ("fields", fields.join(","))],
            OracleError::Io { context, source } => {
                vec![("context", context.clone()), ("cause", source.to_string())]
            }
        }
    }
}

/// Result type for oracle operations.
pub type Result<T> = std::result::Result<T, OracleError>;
