// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Message encoding/decoding.
//!
//! - [`ProtoMessage`] - Interface every message instance implements
//! - [`protobuf`] - Binary wire format implementation over prost-reflect

pub mod protobuf;

pub use protobuf::ReflectMessage;

use crate::core::Result;

/// A single protobuf message instance.
///
/// Instances are created empty by a [`MessageFactory`](crate::schema::MessageFactory),
/// filled by [`decode`](ProtoMessage::decode) and serialized again by
/// [`encode`](ProtoMessage::encode).
pub trait ProtoMessage: std::fmt::Debug {
    /// Fully qualified message type name (e.g. `oracle.basic.Person`).
    fn type_name(&self) -> &str;

    /// Merge an entire binary wire-format buffer into this message.
    fn decode(&mut self, data: &[u8]) -> Result<()>;

    /// Serialize this message to binary wire format.
    fn encode(&self) -> Result<Vec<u8>>;

    /// Render this message in protobuf text format.
    fn to_text(&self) -> String;

    /// Dotted paths of unset proto2 `required` fields, sorted.
    fn missing_required_fields(&self) -> Vec<String>;
}
