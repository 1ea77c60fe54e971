//! # bta-stream
//!
//! Streaming engine for BTA (binary tagged arrays) sessions: sequential
//! readers and writers over a single byte channel, element-wise cursors,
//! overflow-checked arithmetic, and linear/multidimensional index mapping.
//!
//! A session is a concatenation of arrays, each a [`bta_core::Header`]
//! followed by its packed element data. Sessions stream: arrays are visited
//! strictly in order and nothing is buffered beyond one element.
//!
//! ## Quick Start
//!
//! ### Writing a session
//!
//! ```no_run
//! use bta_core::{Header, Type};
//! use bta_stream::{ArrayWriter, ByteSink};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut header = Header::new();
//!     header.set_dimensions(vec![256, 128])?;
//!     header.set_components(vec![Type::Uint8, Type::Uint8, Type::Uint8])?;
//!
//!     let mut writer = ArrayWriter::new(ByteSink::create("image.bta")?)?;
//!     writer.write_header(&header)?;
//!     let row = vec![0u8; 256 * 3];
//!     for _ in 0..128 {
//!         writer.write_data(&row)?;
//!     }
//!     writer.finish()?;
//!     Ok(())
//! }
//! ```
//!
//! ### Reading a session
//!
//! ```no_run
//! use bta_stream::{ArrayReader, ByteSource, Result};
//!
//! fn main() -> Result<()> {
//!     let mut reader = ArrayReader::new(ByteSource::open("image.bta")?);
//!     while let Some(header) = reader.read_next()? {
//!         println!(
//!             "{} elements of {} bytes each",
//!             header.elements(),
//!             header.element_size()
//!         );
//!         // Unread data is skipped automatically on the next read_next().
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Standard streams
//!
//! Sessions pipe: [`ByteSource::stdin`] and [`ByteSink::stdout`] wrap the
//! process handles, and [`ArrayWriter::new`] refuses a sink that is an
//! interactive terminal before any byte is written.

#![deny(missing_docs)]

// Modules
mod channel;
pub mod checked;
mod element;
mod error;
pub mod index;
mod reader;
pub mod scalar;
mod writer;

// Public exports
pub use channel::{ByteSink, ByteSource};
pub use element::{ElementLayout, ElementStream, Slot};
pub use error::{Error, Result};
pub use reader::ArrayReader;
pub use writer::ArrayWriter;
