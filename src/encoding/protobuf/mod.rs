// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Protobuf codec module.
//!
//! Provides descriptor-driven decoding and encoding using prost-reflect.

pub mod codec;

pub use codec::ReflectMessage;
