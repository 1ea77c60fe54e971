//! Command implementations.
//!
//! Commands share one I/O convention: input sessions come from positional
//! file arguments (standard input when none are given) and binary output
//! goes to `-o` (standard output when absent). All diagnostics go to
//! standard error.

pub mod convert;
pub mod create;
pub mod diff;
pub mod info;
pub mod tag;

use std::io;
use std::path::{Path, PathBuf};

use anyhow::Result;
use bta_stream::{ArrayReader, ArrayWriter, ByteSink, ByteSource};

/// Open the positional inputs, falling back to standard input.
pub(crate) fn open_inputs(files: &[PathBuf]) -> Result<Vec<ArrayReader>> {
    if files.is_empty() {
        return Ok(vec![ArrayReader::new(ByteSource::stdin(io::stdin()))]);
    }
    let mut inputs = Vec::with_capacity(files.len());
    for path in files {
        inputs.push(ArrayReader::new(ByteSource::open(path)?));
    }
    Ok(inputs)
}

/// Open the binary output sink, falling back to standard output.
///
/// Fails before any byte is written when the sink is an interactive
/// terminal.
pub(crate) fn open_output(output: Option<&Path>) -> Result<ArrayWriter> {
    let sink = match output {
        Some(path) => ByteSink::create(path)?,
        None => ByteSink::stdout(io::stdout()),
    };
    Ok(ArrayWriter::new(sink)?)
}

/// The "file array N" prefix used in array-level diagnostics.
pub(crate) fn array_context(input: &ArrayReader) -> String {
    format!("{} array {}", input.name(), input.arrays_read().saturating_sub(1))
}
