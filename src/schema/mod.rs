// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema modules and message type resolution.
//!
//! The built-in schemas are compiled from `proto/` by the build script and
//! embedded as an encoded `FileDescriptorSet`. Further descriptor sets can be
//! merged at runtime with [`SchemaRegistry::add_file_descriptor_set`].

pub mod registry;

pub use registry::{
    file_name_for_module, module_name_for_file, MessageFactory, SchemaModule, SchemaRegistry,
};

/// Encoded `FileDescriptorSet` for every file under `proto/`, imports included.
pub const BUILTIN_DESCRIPTOR_SET: &[u8] =
    include_bytes!(concat!(env!("OUT_DIR"), "/oracle_descriptor_set.bin"));
