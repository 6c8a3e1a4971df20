// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Proto Oracle CLI
//!
//! Decode one protobuf message from stdin and re-encode it to stdout.
//!
//! ## Usage
//!
//! ```sh
//! # Round trip a basic.Person
//! proto-oracle basic Person < person.bin > out.bin
//!
//! # Also print the decoded message to stderr
//! proto-oracle --text basic Person < person.bin > out.bin
//!
//! # Use schemas from a protoc descriptor set
//! proto-oracle --descriptor-set extra.pb my.pkg Message < in.bin
//!
//! # Show available modules
//! proto-oracle --list
//! ```

mod common;

use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser};
use common::Result;
use proto_oracle::core::{EXIT_SUCCESS, EXIT_USAGE};
use proto_oracle::{Oracle, OracleError, OracleOptions, SchemaRef, SchemaRegistry};
use tracing::info;

/// Proto Oracle - protobuf round-trip reference
///
/// Reads a binary protobuf message from stdin, decodes it as MESSAGE from
/// schema MODULE, and writes the re-encoded bytes to stdout.
#[derive(Parser, Clone, Debug)]
#[command(name = "proto-oracle")]
#[command(about = "Protobuf round-trip oracle: decode stdin by schema, re-encode to stdout", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "ArcheBase")]
struct Cli {
    /// Schema module, named after its .proto file (e.g. `basic`)
    #[arg(value_name = "MODULE", required_unless_present = "list")]
    module: Option<String>,

    /// Message type declared in the module (e.g. `Person`)
    #[arg(value_name = "MESSAGE", required_unless_present = "list")]
    message: Option<String>,

    /// Print the decoded message in text format to stderr
    #[arg(long)]
    text: bool,

    /// Accept messages with unset proto2 required fields
    #[arg(long)]
    allow_partial: bool,

    /// Load additional schemas from a FileDescriptorSet file
    #[arg(long = "descriptor-set", value_name = "FILE")]
    descriptor_sets: Vec<PathBuf>,

    /// List known schema modules and their message types
    #[arg(long)]
    list: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn options(&self) -> OracleOptions {
        OracleOptions::new()
            .with_text(self.text)
            .with_allow_partial(self.allow_partial)
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut registry = SchemaRegistry::builtin()?;
    for path in &cli.descriptor_sets {
        let added = common::load_descriptor_set(&mut registry, path)?;
        info!(path = %path.display(), added, "loaded descriptor set");
    }

    if cli.list {
        common::write_stdout(common::format_modules(&registry).as_bytes())?;
        return Ok(());
    }

    let options = cli.options();
    let (Some(module), Some(message)) = (cli.module, cli.message) else {
        return Err(OracleError::usage("expected <MODULE> <MESSAGE>").into());
    };
    let schema = SchemaRef::new(module, message);

    let oracle = Oracle::new(registry, options);
    let factory = oracle.resolve(&schema)?;

    let input = common::read_stdin()?;
    let output = oracle.process(&factory, &input, &mut std::io::stderr().lock())?;
    common::write_stdout(&output)?;

    Ok(())
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version go to stdout; real usage errors to stderr
            let code = if e.use_stderr() {
                EXIT_USAGE
            } else {
                EXIT_SUCCESS
            };
            // The exit code still reports the outcome if printing fails
            let _ = e.print();
            process::exit(code);
        }
    };

    common::init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(common::exit_code(&e));
    }
}
