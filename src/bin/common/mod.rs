// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for the CLI.

use std::io::{Read, Write};
use std::path::Path;

use proto_oracle::{OracleError, SchemaRegistry};
use tracing::Level;

pub use anyhow::Result as CliResult;
pub type Result<T = ()> = CliResult<T>;

/// Exit code for failures that carry no [`OracleError`].
pub const EXIT_FAILURE: i32 = 1;

/// Install the stderr log subscriber.
///
/// Verbosity: 0 = warn, 1 = info, 2 = debug, 3+ = trace.
pub fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .without_time()
        .try_init();
}

/// Exit code for an error returned from the command.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<OracleError>()
        .map_or(EXIT_FAILURE, OracleError::exit_code)
}

/// Read all of standard input.
pub fn read_stdin() -> std::result::Result<Vec<u8>, OracleError> {
    let mut input = Vec::new();
    std::io::stdin()
        .lock()
        .read_to_end(&mut input)
        .map_err(|e| OracleError::io("reading stdin", e))?;
    Ok(input)
}

/// Write the whole buffer to standard output and flush.
pub fn write_stdout(bytes: &[u8]) -> std::result::Result<(), OracleError> {
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(bytes)
        .and_then(|()| stdout.flush())
        .map_err(|e| OracleError::io("writing stdout", e))
}

/// Merge a descriptor set file into the registry.
pub fn load_descriptor_set(registry: &mut SchemaRegistry, path: &Path) -> Result<usize> {
    let bytes = std::fs::read(path)
        .map_err(|e| OracleError::io(format!("reading {}", path.display()), e))?;
    let added = registry
        .add_file_descriptor_set(&bytes)
        .map_err(|e| anyhow::Error::new(e).context(format!("loading {}", path.display())))?;
    Ok(added)
}

/// Render the module listing printed by `--list`.
pub fn format_modules(registry: &SchemaRegistry) -> String {
    let mut out = String::new();
    for name in registry.modules() {
        out.push_str(&name);
        out.push('\n');
        if let Ok(module) = registry.module(&name) {
            for message in module.message_names() {
                out.push_str("  ");
                out.push_str(&message);
                out.push('\n');
            }
        }
    }
    out
}
