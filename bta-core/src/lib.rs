//! # bta-core
//!
//! Container format layer for BTA (binary tagged arrays): a self-describing
//! binary format for multi-dimensional, multi-typed arrays.
//!
//! A BTA stream is a concatenation of arrays. Each array is a [`Header`]
//! followed by `elements * element_size` raw data bytes, with dimension 0
//! varying fastest and numeric components stored little-endian. Headers
//! describe the dimensions, the [`Type`] of every element component, and
//! carry ordered [`TagList`] metadata at global and per-component scope.
//!
//! This crate only encodes and decodes headers and knows how big payloads
//! are; moving payload bytes between channels is the job of the streaming
//! layer built on top of it.
//!
//! ## Quick Start
//!
//! ```
//! use bta_core::{Header, Type};
//!
//! let mut hdr = Header::new();
//! hdr.set_dimensions(vec![640, 480])?;
//! hdr.set_components(vec![Type::Uint8, Type::Uint8, Type::Uint8])?;
//! hdr.global_tags_mut().set("DESCRIPTION", "RGB image")?;
//!
//! let mut buf = Vec::new();
//! hdr.write_to(&mut buf)?;
//! let decoded = bta_core::Header::read_from(&mut buf.as_slice())?;
//! assert_eq!(decoded, hdr);
//! # Ok::<(), bta_core::Error>(())
//! ```

#![deny(missing_docs)]

// Modules
mod component;
mod error;
mod header;
mod taglist;
mod wire;

// Public exports
pub use component::{Class, Type};
pub use error::{Error, Result};
pub use header::Header;
pub use taglist::TagList;
pub use wire::{MAGIC, MAX_COMPONENTS, MAX_DIMENSIONS, MAX_STRING_BYTES, MAX_TAGS, VERSION};
