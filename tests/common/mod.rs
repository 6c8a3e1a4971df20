// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common fixtures for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use prost::Message;
use proto_oracle::generated::{basic, composite, legacy, scalars};

// ============================================================================
// Message Fixtures
// ============================================================================

/// `{name: "Ada", id: 7}`
pub fn ada() -> basic::Person {
    basic::Person {
        name: "Ada".to_string(),
        id: 7,
        ..Default::default()
    }
}

pub fn address_book() -> basic::AddressBook {
    basic::AddressBook {
        people: vec![
            basic::Person {
                name: "Grace".to_string(),
                id: 1906,
                email: "grace@example.com".to_string(),
                phones: vec![
                    basic::PhoneNumber {
                        number: "555-0100".to_string(),
                        r#type: basic::PhoneType::Work as i32,
                    },
                    basic::PhoneNumber {
                        number: "555-0199".to_string(),
                        r#type: basic::PhoneType::Mobile as i32,
                    },
                ],
            },
            ada(),
        ],
    }
}

/// Every scalar field set to a non-default value.
pub fn scalars() -> scalars::Scalars {
    scalars::Scalars {
        f_double: -1.5e300,
        f_float: 3.25,
        f_int32: -42,
        f_int64: i64::MIN,
        f_uint32: u32::MAX,
        f_uint64: u64::MAX,
        f_sint32: -1,
        f_sint64: -9_000_000_000,
        f_fixed32: 0xDEAD_BEEF,
        f_fixed64: 0x0123_4567_89AB_CDEF,
        f_sfixed32: -2,
        f_sfixed64: -3,
        f_bool: true,
        f_string: "héllo wörld".to_string(),
        f_bytes: vec![0x00, 0xFF, 0x7F],
        f_color: scalars::Color::Blue as i32,
    }
}

pub fn repeated_scalars() -> scalars::RepeatedScalars {
    scalars::RepeatedScalars {
        r_double: vec![0.0, -0.5, 1e-10],
        r_float: vec![1.0, 2.0],
        r_int32: vec![0, -1, i32::MAX],
        r_int64: vec![i64::MAX, 0],
        r_uint32: vec![1, 2, 3],
        r_uint64: vec![u64::MAX],
        r_sint32: vec![-5, 5],
        r_sint64: vec![i64::MIN],
        r_fixed32: vec![7],
        r_fixed64: vec![8, 9],
        r_sfixed32: vec![-10],
        r_sfixed64: vec![-11, 11],
        r_bool: vec![true, false, true],
        r_string: vec!["a".to_string(), String::new(), "c".to_string()],
        r_bytes: vec![vec![1], vec![]],
        r_color: vec![
            scalars::Color::Red as i32,
            scalars::Color::Green as i32,
            scalars::Color::Unspecified as i32,
        ],
    }
}

/// Explicit-presence fields holding their zero values.
pub fn optional_zeros() -> scalars::OptionalScalars {
    scalars::OptionalScalars {
        o_int32: Some(0),
        o_uint64: Some(0),
        o_bool: Some(false),
        o_string: Some(String::new()),
        o_bytes: Some(Vec::new()),
        o_color: Some(scalars::Color::Unspecified as i32),
        o_double: None,
    }
}

pub fn envelope() -> composite::Envelope {
    let header = composite::envelope::Header {
        source: "sensor-1".to_string(),
        sequence: 99,
        sent_at: Some(prost_types::Timestamp {
            seconds: 1_700_000_000,
            nanos: 500,
        }),
    };
    composite::Envelope {
        header: Some(header.clone()),
        payload: Some(composite::envelope::Payload::Tree(composite::Tree {
            label: "root".to_string(),
            children: vec![
                composite::Tree {
                    label: "left".to_string(),
                    children: vec![],
                },
                composite::Tree {
                    label: "right".to_string(),
                    children: vec![composite::Tree {
                        label: "leaf".to_string(),
                        children: vec![],
                    }],
                },
            ],
        })),
        counters: HashMap::from([("hits".to_string(), 12), ("misses".to_string(), -3)]),
        points: HashMap::from([(1, composite::Point { x: -4, y: 4 })]),
        trail: vec![header],
    }
}

pub fn account() -> legacy::Account {
    legacy::Account {
        owner: "ledger-owner".to_string(),
        number: 123_456_789,
        balance: Some(-250),
        currency: None,
        history: vec![1, -2, 3],
        packed_history: vec![4, 5, 6],
        address: Some(legacy::account::Address {
            street: "1 Main St".to_string(),
            city: None,
        }),
        signatories: vec![legacy::Signatory {
            name: "sig".to_string(),
            primary: Some(true),
        }],
        status: Some(legacy::Status::Frozen as i32),
    }
}

/// Encode a varint to bytes.
pub fn encode_varint(mut value: u64, bytes: &mut Vec<u8>) {
    while value >= 0x80 {
        bytes.push((value & 0x7F) as u8 | 0x80);
        value >>= 7;
    }
    bytes.push(value as u8);
}

/// Append a length-delimited field with an arbitrary field number.
pub fn push_length_delimited(field_number: u32, payload: &[u8], bytes: &mut Vec<u8>) {
    encode_varint(u64::from(field_number << 3 | 2), bytes);
    encode_varint(payload.len() as u64, bytes);
    bytes.extend_from_slice(payload);
}

/// Encoded `Ada` followed by field 15 (not declared by Person).
pub fn ada_with_unknown_field() -> (Vec<u8>, Vec<u8>) {
    let mut unknown = Vec::new();
    push_length_delimited(15, b"extra", &mut unknown);
    let mut input = ada().encode_to_vec();
    input.extend_from_slice(&unknown);
    (input, unknown)
}

// ============================================================================
// Temporary Files
// ============================================================================

/// Get a temporary directory for test files
pub fn temp_dir() -> PathBuf {
    let random = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .subsec_nanos();
    std::env::temp_dir().join(format!(
        "proto_oracle_test_{}_{}",
        std::process::id(),
        random
    ))
}

/// Create a temporary file path with cleanup guard
pub fn temp_path(name: &str) -> (PathBuf, CleanupGuard) {
    let dir = temp_dir();
    fs::create_dir_all(&dir).ok();
    let path = dir.join(name);
    let guard = CleanupGuard(dir);
    (path, guard)
}

/// Cleanup guard for test temporary files
pub struct CleanupGuard(PathBuf);

impl Drop for CleanupGuard {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.0);
    }
}
