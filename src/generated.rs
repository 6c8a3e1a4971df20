// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! prost bindings for the built-in schemas under `proto/`.
//!
//! These are an independent encoder for the same schemas, used to produce
//! canonical input for the oracle and to check its output.

#![allow(clippy::all, missing_docs)]

/// `basic.proto`
pub mod basic {
    include!(concat!(env!("OUT_DIR"), "/oracle.basic.rs"));
}

/// `scalars.proto`
pub mod scalars {
    include!(concat!(env!("OUT_DIR"), "/oracle.scalars.rs"));
}

/// `composite.proto`
pub mod composite {
    include!(concat!(env!("OUT_DIR"), "/oracle.composite.rs"));
}

/// `legacy.proto`
pub mod legacy {
    include!(concat!(env!("OUT_DIR"), "/oracle.legacy.rs"));
}
