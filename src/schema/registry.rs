// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema registry mapping module and message names to message factories.
//!
//! A schema module is one compiled `.proto` file. Its name is the file path
//! with the `.proto` suffix removed and `/` replaced by `.`:
//!
//! | file                       | module                 |
//! |----------------------------|------------------------|
//! | `basic.proto`              | `basic`                |
//! | `nested/tree.proto`        | `nested.tree`          |
//! | `google/protobuf/any.proto`| `google.protobuf.any`  |

use prost_reflect::{DescriptorPool, FileDescriptor, MessageDescriptor};
use tracing::debug;

use crate::core::{OracleError, Result, SchemaRef};
use crate::encoding::{ProtoMessage, ReflectMessage};

use super::BUILTIN_DESCRIPTOR_SET;

const PROTO_SUFFIX: &str = ".proto";

/// Module name for a `.proto` file path.
pub fn module_name_for_file(file_name: &str) -> String {
    file_name
        .strip_suffix(PROTO_SUFFIX)
        .unwrap_or(file_name)
        .replace('/', ".")
}

/// `.proto` file path for a module name.
pub fn file_name_for_module(module: &str) -> String {
    format!("{}{PROTO_SUFFIX}", module.replace('.', "/"))
}

/// Registry of loaded schema modules.
///
/// Backed by a single [`DescriptorPool`] so that cross-file references
/// (imports, well-known types) resolve regardless of which descriptor set
/// supplied them.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    pool: DescriptorPool,
}

impl SchemaRegistry {
    /// Create a registry with no schemas.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the schemas compiled into this binary.
    pub fn builtin() -> Result<Self> {
        Self::from_file_descriptor_set(BUILTIN_DESCRIPTOR_SET)
    }

    /// Create a registry from an encoded `FileDescriptorSet`.
    pub fn from_file_descriptor_set(fds_bytes: &[u8]) -> Result<Self> {
        let mut registry = Self::new();
        registry.add_file_descriptor_set(fds_bytes)?;
        Ok(registry)
    }

    /// Merge an encoded `FileDescriptorSet` into the registry.
    ///
    /// Files already present with identical contents are skipped. Returns
    /// the number of newly added files.
    pub fn add_file_descriptor_set(&mut self, fds_bytes: &[u8]) -> Result<usize> {
        let before = self.pool.files().len();
        self.pool
            .decode_file_descriptor_set(fds_bytes)
            .map_err(|e| OracleError::invalid_descriptor_set(e.to_string()))?;
        let added = self.pool.files().len() - before;
        debug!(added, total = self.pool.files().len(), "loaded descriptor set");
        Ok(added)
    }

    /// Names of all loaded modules, sorted.
    pub fn modules(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .pool
            .files()
            .map(|file| module_name_for_file(file.name()))
            .collect();
        names.sort();
        names
    }

    /// Look up a module by name.
    pub fn module(&self, name: &str) -> Result<SchemaModule> {
        let file = self
            .pool
            .get_file_by_name(&file_name_for_module(name))
            .or_else(|| {
                self.pool
                    .files()
                    .find(|file| module_name_for_file(file.name()) == name)
            })
            .ok_or_else(|| OracleError::module_not_found(name))?;

        Ok(SchemaModule {
            name: name.to_string(),
            file,
        })
    }

    /// Resolve a schema reference to a factory for its message type.
    pub fn resolve(&self, schema: &SchemaRef) -> Result<MessageFactory> {
        let factory = self.module(schema.module())?.message(schema.message())?;
        debug!(schema = %schema, resolved = factory.full_name(), "resolved message type");
        Ok(factory)
    }
}

/// One compiled `.proto` file.
#[derive(Debug, Clone)]
pub struct SchemaModule {
    name: String,
    file: FileDescriptor,
}

impl SchemaModule {
    /// Module name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Source `.proto` file path.
    pub fn file_name(&self) -> &str {
        self.file.name()
    }

    /// Protobuf package declared by the file (may be empty).
    pub fn package(&self) -> &str {
        self.file.package_name()
    }

    /// Names of the top-level messages declared by this module.
    pub fn message_names(&self) -> Vec<String> {
        self.file
            .messages()
            .map(|message| message.name().to_string())
            .collect()
    }

    /// Look up a message type declared in this module.
    ///
    /// Accepts a top-level name (`Person`), a dotted path to a nested
    /// message (`Envelope.Header`) or the package-qualified form of either
    /// (`oracle.basic.Person`).
    pub fn message(&self, name: &str) -> Result<MessageFactory> {
        self.find_message(name)
            .map(|descriptor| MessageFactory { descriptor })
            .ok_or_else(|| OracleError::message_not_found(&self.name, name))
    }

    fn find_message(&self, name: &str) -> Option<MessageDescriptor> {
        let package = self.package();
        let relative = if package.is_empty() {
            name
        } else {
            name.strip_prefix(package)
                .and_then(|rest| rest.strip_prefix('.'))
                .unwrap_or(name)
        };

        let mut segments = relative.split('.');
        let first = segments.next()?;
        let mut current = self.file.messages().find(|m| m.name() == first)?;
        for segment in segments {
            let child = current.child_messages().find(|m| m.name() == segment)?;
            current = child;
        }
        Some(current)
    }
}

/// Factory producing empty instances of one message type.
#[derive(Debug, Clone)]
pub struct MessageFactory {
    descriptor: MessageDescriptor,
}

impl MessageFactory {
    /// Create an empty message instance.
    pub fn create(&self) -> Box<dyn ProtoMessage> {
        Box::new(ReflectMessage::new(self.descriptor.clone()))
    }

    /// Fully qualified message type name.
    pub fn full_name(&self) -> &str {
        self.descriptor.full_name()
    }
}
