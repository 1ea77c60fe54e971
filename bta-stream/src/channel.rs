//! Byte channel capabilities.
//!
//! The streaming core never inspects what kind of channel it is reading or
//! writing; commands construct a [`ByteSource`] or [`ByteSink`] up front —
//! from a path, an explicitly passed standard handle, or any reader/writer —
//! and the sessions take it from there. The capability carries the
//! channel's display name for diagnostics and, for sinks, whether the
//! channel is an interactive terminal.

use std::fmt;
use std::fs::File;
use std::io::{self, IsTerminal, Read, Write};
use std::path::Path;

use crate::error::{Error, Result};

/// A named, readable byte channel.
pub struct ByteSource {
    reader: Box<dyn Read>,
    name: String,
}

impl ByteSource {
    /// Open a file for reading.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] with the path as context if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let name = path.display().to_string();
        let file = File::open(path).map_err(|e| Error::io(name.clone(), e))?;
        Ok(Self {
            reader: Box::new(file),
            name,
        })
    }

    /// Read from the process's standard input.
    ///
    /// The handle is passed in explicitly so an invocation binds it to at
    /// most one source.
    pub fn stdin(handle: io::Stdin) -> Self {
        Self {
            reader: Box::new(handle),
            name: "standard input".to_string(),
        }
    }

    /// Read from an arbitrary reader under the given display name.
    pub fn from_reader(reader: impl Read + 'static, name: impl Into<String>) -> Self {
        Self {
            reader: Box::new(reader),
            name: name.into(),
        }
    }

    /// Display name of the channel.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn into_parts(self) -> (Box<dyn Read>, String) {
        (self.reader, self.name)
    }
}

// The boxed reader has no Debug; show the display name.
impl fmt::Debug for ByteSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteSource").field("name", &self.name).finish()
    }
}

/// A named, writable byte channel that knows whether it is a terminal.
pub struct ByteSink {
    writer: Box<dyn Write>,
    name: String,
    terminal: bool,
}

impl ByteSink {
    /// Create (or truncate) a file for writing.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] with the path as context if the file cannot be created.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let name = path.display().to_string();
        let file = File::create(path).map_err(|e| Error::io(name.clone(), e))?;
        Ok(Self {
            writer: Box::new(file),
            name,
            terminal: false,
        })
    }

    /// Write to the process's standard output.
    ///
    /// Terminal detection happens here, while the concrete handle type is
    /// still known; writers bound to a terminal are refused at session
    /// construction.
    pub fn stdout(handle: io::Stdout) -> Self {
        let terminal = handle.is_terminal();
        Self {
            writer: Box::new(handle),
            name: "standard output".to_string(),
            terminal,
        }
    }

    /// Write to an arbitrary writer under the given display name.
    pub fn from_writer(writer: impl Write + 'static, name: impl Into<String>) -> Self {
        Self {
            writer: Box::new(writer),
            name: name.into(),
            terminal: false,
        }
    }

    /// Override the terminal flag, for wrappers that know their channel
    /// better than the constructor can.
    pub fn with_terminal(mut self, terminal: bool) -> Self {
        self.terminal = terminal;
        self
    }

    /// Display name of the channel.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the channel is an interactive terminal.
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    pub(crate) fn into_parts(self) -> (Box<dyn Write>, String, bool) {
        (self.writer, self.name, self.terminal)
    }
}

impl fmt::Debug for ByteSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteSink")
            .field("name", &self.name)
            .field("terminal", &self.terminal)
            .finish()
    }
}
