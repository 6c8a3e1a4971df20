// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Protobuf message implementation using prost-reflect for dynamic message handling.
//!
//! Encoding is deterministic: fields are written in field-number order and
//! map entries in ascending key order, at every nesting level.

use prost::encoding::{encode_key, encode_varint, WireType};
use prost::Message;
use prost_reflect::text_format::FormatOptions;
use prost_reflect::ReflectMessage as _;
use prost_reflect::{Cardinality, DynamicMessage, FieldDescriptor, MapKey, MessageDescriptor, Value};

use crate::core::{OracleError, Result};
use crate::encoding::ProtoMessage;

/// Protobuf message instance backed by a [`DynamicMessage`].
///
/// Handles any message type described by a descriptor, without generated
/// code. Unknown fields encountered while decoding are retained and written
/// back out by [`ProtoMessage::encode`].
#[derive(Debug, Clone)]
pub struct ReflectMessage {
    /// Fully qualified message type name
    type_name: String,
    /// Decoded field values
    message: DynamicMessage,
}

impl ReflectMessage {
    /// Create an empty message of the given type.
    pub fn new(descriptor: MessageDescriptor) -> Self {
        Self {
            type_name: descriptor.full_name().to_string(),
            message: DynamicMessage::new(descriptor),
        }
    }

    /// Borrow the underlying dynamic message.
    pub fn as_dynamic(&self) -> &DynamicMessage {
        &self.message
    }

    /// Consume the wrapper and return the dynamic message.
    pub fn into_dynamic(self) -> DynamicMessage {
        self.message
    }
}

impl ProtoMessage for ReflectMessage {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn decode(&mut self, data: &[u8]) -> Result<()> {
        Message::merge(&mut self.message, data)
            .map_err(|e| OracleError::decode(&self.type_name, e.to_string()))
    }

    fn encode(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(self.message.encoded_len());
        encode_sorted(&self.message, &mut buf)
            .map_err(|reason| OracleError::encode(&self.type_name, reason))?;
        Ok(buf)
    }

    fn to_text(&self) -> String {
        self.message
            .to_text_format_with_options(&FormatOptions::new().pretty(true))
    }

    fn missing_required_fields(&self) -> Vec<String> {
        let mut missing = Vec::new();
        collect_missing_required(&self.message, "", &mut missing);
        // Map iteration order is unspecified
        missing.sort();
        missing
    }
}

/// Encode `message` with map entries sorted by key.
///
/// Messages without maps anywhere below them are encoded by prost-reflect
/// directly. Otherwise, runs of map-free fields are batched into a scratch
/// message and encoded by prost-reflect, while map-bearing fields are
/// written here. Extensions and unknown fields follow the known fields.
fn encode_sorted(message: &DynamicMessage, buf: &mut Vec<u8>) -> std::result::Result<(), String> {
    if !message_has_map(message) {
        return message.encode(buf).map_err(|e| e.to_string());
    }

    let descriptor = message.descriptor();
    let mut plain = DynamicMessage::new(descriptor.clone());
    for field in descriptor.fields() {
        if !message.has_field(&field) {
            continue;
        }
        let value = message.get_field(&field);
        if has_map(&value) {
            plain.encode(buf).map_err(|e| e.to_string())?;
            plain.clear();
            encode_map_bearing_field(&field, &value, buf)?;
        } else {
            plain
                .try_set_field(&field, value.into_owned())
                .map_err(|e| e.to_string())?;
        }
    }

    for (extension, value) in message.extensions() {
        plain.set_extension(&extension, value.clone());
    }
    plain.encode(buf).map_err(|e| e.to_string())?;

    for unknown in message.unknown_fields() {
        unknown.encode(buf);
    }
    Ok(())
}

fn encode_map_bearing_field(
    field: &FieldDescriptor,
    value: &Value,
    buf: &mut Vec<u8>,
) -> std::result::Result<(), String> {
    let number = field.number();
    match value {
        Value::Message(nested) => encode_nested(number, field.is_group(), nested, buf),
        Value::List(items) => {
            for item in items {
                if let Value::Message(nested) = item {
                    encode_nested(number, field.is_group(), nested, buf)?;
                }
            }
            Ok(())
        }
        Value::Map(entries) => {
            let entry_descriptor = field
                .kind()
                .as_message()
                .cloned()
                .ok_or_else(|| format!("map field '{}' has no entry type", field.name()))?;
            let key_field = entry_descriptor.map_entry_key_field();
            let value_field = entry_descriptor.map_entry_value_field();

            let mut sorted: Vec<(&MapKey, &Value)> = entries.iter().collect();
            sorted.sort_by(|a, b| a.0.cmp(b.0));
            for (key, item) in sorted {
                let mut entry = DynamicMessage::new(entry_descriptor.clone());
                entry
                    .try_set_field(&key_field, Value::from(key.clone()))
                    .map_err(|e| e.to_string())?;
                entry
                    .try_set_field(&value_field, item.clone())
                    .map_err(|e| e.to_string())?;
                encode_nested(number, false, &entry, buf)?;
            }
            Ok(())
        }
        _ => Err(format!("field '{}' holds no map", field.name())),
    }
}

fn encode_nested(
    number: u32,
    group: bool,
    message: &DynamicMessage,
    buf: &mut Vec<u8>,
) -> std::result::Result<(), String> {
    if group {
        encode_key(number, WireType::StartGroup, buf);
        encode_sorted(message, buf)?;
        encode_key(number, WireType::EndGroup, buf);
    } else {
        let mut body = Vec::new();
        encode_sorted(message, &mut body)?;
        encode_key(number, WireType::LengthDelimited, buf);
        encode_varint(body.len() as u64, buf);
        buf.extend_from_slice(&body);
    }
    Ok(())
}

fn has_map(value: &Value) -> bool {
    match value {
        Value::Map(_) => true,
        Value::Message(nested) => message_has_map(nested),
        Value::List(items) => items.iter().any(has_map),
        _ => false,
    }
}

fn message_has_map(message: &DynamicMessage) -> bool {
    message.fields().any(|(_, value)| has_map(value))
}

/// Walk a message and record the paths of unset proto2 `required` fields.
///
/// Recurses into every set sub-message, including repeated elements
/// (`items[2].value`) and map values (`by_name["bob"].name`).
fn collect_missing_required(message: &DynamicMessage, prefix: &str, missing: &mut Vec<String>) {
    let descriptor = message.descriptor();
    for field in descriptor.fields() {
        if field.cardinality() == Cardinality::Required && !message.has_field(&field) {
            missing.push(join_path(prefix, field.name()));
        }
    }

    for (field, value) in message.fields() {
        let path = join_path(prefix, field.name());
        match value {
            Value::Message(nested) => collect_missing_required(nested, &path, missing),
            Value::List(items) => {
                for (index, item) in items.iter().enumerate() {
                    if let Value::Message(nested) = item {
                        collect_missing_required(nested, &format!("{path}[{index}]"), missing);
                    }
                }
            }
            Value::Map(entries) => {
                for (key, item) in entries {
                    if let Value::Message(nested) = item {
                        let entry_path = format!("{path}[{}]", map_key_text(key));
                        collect_missing_required(nested, &entry_path, missing);
                    }
                }
            }
            _ => {}
        }
    }
}

fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}

fn map_key_text(key: &MapKey) -> String {
    match key {
        MapKey::Bool(v) => v.to_string(),
        MapKey::I32(v) => v.to_string(),
        MapKey::I64(v) => v.to_string(),
        MapKey::U32(v) => v.to_string(),
        MapKey::U64(v) => v.to_string(),
        MapKey::String(v) => format!("{v:?}"),
    }
}
