// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Decode / re-encode round trip.
//!
//! One invocation is one linear pipeline: resolve the message type, decode
//! the whole input buffer, optionally render the decoded message as text to a
//! diagnostic sink, then encode it back to bytes. Any failure ends the
//! pipeline; nothing is returned for a failed run.

use std::io::Write;

use tracing::{debug, trace, warn};

use crate::core::{OracleError, Result, SchemaRef};
use crate::encoding::ProtoMessage;
use crate::schema::{MessageFactory, SchemaRegistry};

/// Options controlling a round trip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OracleOptions {
    /// Write the decoded message in text format to the diagnostic sink.
    pub emit_text: bool,
    /// Accept messages with unset proto2 `required` fields.
    pub allow_partial: bool,
}

impl OracleOptions {
    /// Default options: no text rendering, required fields enforced.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the text rendering.
    pub fn with_text(mut self, emit_text: bool) -> Self {
        self.emit_text = emit_text;
        self
    }

    /// Enable or disable partial (required-field unchecked) decoding.
    pub fn with_allow_partial(mut self, allow_partial: bool) -> Self {
        self.allow_partial = allow_partial;
        self
    }
}

/// Round-trip oracle over a schema registry.
///
/// # Example
///
/// ```no_run
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use proto_oracle::{Oracle, OracleOptions, SchemaRef, SchemaRegistry};
///
/// let oracle = Oracle::new(SchemaRegistry::builtin()?, OracleOptions::new());
/// let input = vec![0x0A, 0x03, b'A', b'd', b'a', 0x10, 0x07];
/// let output = oracle.round_trip(&SchemaRef::new("basic", "Person"), &input)?;
/// assert_eq!(output, input);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Oracle {
    registry: SchemaRegistry,
    options: OracleOptions,
}

impl Oracle {
    /// Create an oracle.
    pub fn new(registry: SchemaRegistry, options: OracleOptions) -> Self {
        Self { registry, options }
    }

    /// Create an oracle over the built-in schemas with default options.
    pub fn builtin() -> Result<Self> {
        Ok(Self::new(SchemaRegistry::builtin()?, OracleOptions::new()))
    }

    /// The schema registry.
    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// The active options.
    pub fn options(&self) -> OracleOptions {
        self.options
    }

    /// Resolve a schema reference to a message factory.
    pub fn resolve(&self, schema: &SchemaRef) -> Result<MessageFactory> {
        self.registry.resolve(schema)
    }

    /// Decode `input` into a fresh instance of the factory's message type.
    ///
    /// Unless partial messages are allowed, unset proto2 `required` fields
    /// are a decode failure.
    pub fn decode(&self, factory: &MessageFactory, input: &[u8]) -> Result<Box<dyn ProtoMessage>> {
        trace!(input = %hex::encode(input), "decoding");
        let mut message = factory.create();
        message.decode(input)?;

        if !self.options.allow_partial {
            let missing = message.missing_required_fields();
            if !missing.is_empty() {
                return Err(OracleError::missing_required(message.type_name(), missing));
            }
        }

        Ok(message)
    }

    /// Decode, optionally render, and re-encode one message of a resolved type.
    pub fn process<W: Write + ?Sized>(
        &self,
        factory: &MessageFactory,
        input: &[u8],
        diagnostics: &mut W,
    ) -> Result<Vec<u8>> {
        let message = self.decode(factory, input)?;

        if self.options.emit_text {
            if let Err(e) = write_text(message.as_ref(), diagnostics) {
                warn!(error = %e, "failed to write text rendering");
            }
        }

        let output = message.encode()?;
        debug!(
            message_type = message.type_name(),
            input_len = input.len(),
            output_len = output.len(),
            "round trip complete"
        );
        Ok(output)
    }

    /// Resolve `schema`, then run [`process`](Self::process).
    pub fn run<W: Write + ?Sized>(
        &self,
        schema: &SchemaRef,
        input: &[u8],
        diagnostics: &mut W,
    ) -> Result<Vec<u8>> {
        let factory = self.resolve(schema)?;
        self.process(&factory, input, diagnostics)
    }

    /// Round trip without a diagnostic sink; any text rendering is discarded.
    pub fn round_trip(&self, schema: &SchemaRef, input: &[u8]) -> Result<Vec<u8>> {
        self.run(schema, input, &mut std::io::sink())
    }
}

fn write_text<W: Write + ?Sized>(message: &dyn ProtoMessage, out: &mut W) -> std::io::Result<()> {
    let text = message.to_text();
    out.write_all(text.as_bytes())?;
    if !text.ends_with('\n') {
        out.write_all(b"\n")?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADA: &[u8] = &[0x0A, 0x03, b'A', b'd', b'a', 0x10, 0x07];

    fn oracle(options: OracleOptions) -> Oracle {
        Oracle::new(SchemaRegistry::builtin().unwrap(), options)
    }

    /// Sink that rejects every write.
    struct BrokenSink;

    impl Write for BrokenSink {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_options_builders() {
        let options = OracleOptions::new().with_text(true).with_allow_partial(true);
        assert!(options.emit_text);
        assert!(options.allow_partial);
        assert_eq!(OracleOptions::new(), OracleOptions::default());
    }

    #[test]
    fn test_round_trip_person() {
        let oracle = oracle(OracleOptions::new());
        let output = oracle
            .round_trip(&SchemaRef::new("basic", "Person"), ADA)
            .unwrap();
        assert_eq!(output, ADA);
    }

    #[test]
    fn test_run_without_text_writes_nothing() {
        let oracle = oracle(OracleOptions::new());
        let mut diagnostics = Vec::new();
        oracle
            .run(&SchemaRef::new("basic", "Person"), ADA, &mut diagnostics)
            .unwrap();
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_run_with_text_renders_to_diagnostics() {
        let oracle = oracle(OracleOptions::new().with_text(true));
        let mut diagnostics = Vec::new();
        let output = oracle
            .run(&SchemaRef::new("basic", "Person"), ADA, &mut diagnostics)
            .unwrap();

        assert_eq!(output, ADA);
        let text = String::from_utf8(diagnostics).unwrap();
        assert!(text.contains("name"), "{text}");
        assert!(text.contains("\"Ada\""), "{text}");
        assert!(text.contains('7'), "{text}");
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_text_sink_failure_does_not_fail_round_trip() {
        let oracle = oracle(OracleOptions::new().with_text(true));
        let output = oracle
            .run(&SchemaRef::new("basic", "Person"), ADA, &mut BrokenSink)
            .unwrap();
        assert_eq!(output, ADA);
    }

    #[test]
    fn test_unknown_module_fails_before_decode() {
        let oracle = oracle(OracleOptions::new());
        let err = oracle
            .round_trip(&SchemaRef::new("nosuch", "Person"), &[0xFF])
            .unwrap_err();
        assert!(matches!(err, OracleError::ModuleNotFound { .. }));
    }

    #[test]
    fn test_unknown_message_type() {
        let oracle = oracle(OracleOptions::new());
        let err = oracle
            .round_trip(&SchemaRef::new("basic", "Robot"), ADA)
            .unwrap_err();
        assert!(matches!(err, OracleError::MessageNotFound { .. }));
    }

    #[test]
    fn test_truncated_input() {
        let oracle = oracle(OracleOptions::new());
        let err = oracle
            .round_trip(&SchemaRef::new("basic", "Person"), &ADA[..4])
            .unwrap_err();
        assert!(matches!(err, OracleError::Decode { .. }));
    }

    #[test]
    fn test_missing_required_fields_rejected() {
        let oracle = oracle(OracleOptions::new());
        // Account with only `owner` set
        let input = [0x0A, 0x01, b'x'];
        let err = oracle
            .round_trip(&SchemaRef::new("legacy", "Account"), &input)
            .unwrap_err();
        match err {
            OracleError::MissingRequired {
                message_type,
                fields,
            } => {
                assert_eq!(message_type, "oracle.legacy.Account");
                assert_eq!(fields, vec!["number".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_required_fields_allowed_when_partial() {
        let oracle = oracle(OracleOptions::new().with_allow_partial(true));
        let input = [0x0A, 0x01, b'x'];
        let output = oracle
            .round_trip(&SchemaRef::new("legacy", "Account"), &input)
            .unwrap();
        assert_eq!(output, input);
    }

    #[test]
    fn test_accessors() {
        let oracle = Oracle::builtin().unwrap();
        assert_eq!(oracle.options(), OracleOptions::new());
        assert!(oracle.registry().module("basic").is_ok());
    }
}
