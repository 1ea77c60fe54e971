//! Byte-level encoding primitives.
//!
//! Everything on the wire is little-endian. Strings are a u64 byte length
//! followed by UTF-8 bytes. The caps below bound what a decoder will accept,
//! so a corrupt length field cannot trigger an enormous allocation; the same
//! caps are enforced when headers are built programmatically, which keeps the
//! set of encodable headers equal to the set of decodable ones.

use std::io::{self, Read, Write};

use crate::error::{Error, Result};

/// Magic bytes opening every array header.
pub const MAGIC: [u8; 4] = *b"BTA\0";

/// Wire format version.
pub const VERSION: u8 = 1;

/// Maximum number of dimensions per header.
pub const MAX_DIMENSIONS: u64 = 65_536;

/// Maximum number of components per element.
pub const MAX_COMPONENTS: u64 = 65_536;

/// Maximum number of tags per tag list.
pub const MAX_TAGS: u64 = 1 << 20;

/// Maximum byte length of a tag name or value.
pub const MAX_STRING_BYTES: u64 = 1 << 24;

/// Read exactly `buf.len()` bytes, mapping a short read to `UnexpectedEof`.
pub(crate) fn read_exact(r: &mut impl Read, buf: &mut [u8]) -> Result<()> {
    r.read_exact(buf).map_err(|e| {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            Error::UnexpectedEof
        } else {
            Error::Io(e)
        }
    })
}

pub(crate) fn read_u8(r: &mut impl Read) -> Result<u8> {
    let mut buf = [0u8; 1];
    read_exact(r, &mut buf)?;
    Ok(buf[0])
}

pub(crate) fn read_u64(r: &mut impl Read) -> Result<u64> {
    let mut buf = [0u8; 8];
    read_exact(r, &mut buf)?;
    Ok(u64::from_le_bytes(buf))
}

pub(crate) fn write_u8(w: &mut impl Write, value: u8) -> Result<()> {
    w.write_all(&[value])?;
    Ok(())
}

pub(crate) fn write_u64(w: &mut impl Write, value: u64) -> Result<()> {
    w.write_all(&value.to_le_bytes())?;
    Ok(())
}

/// Read a length-prefixed UTF-8 string.
pub(crate) fn read_string(r: &mut impl Read) -> Result<String> {
    let len = read_u64(r)?;
    if len > MAX_STRING_BYTES {
        return Err(Error::invalid_format(format!(
            "string length {len} exceeds maximum {MAX_STRING_BYTES}"
        )));
    }
    let len = usize::try_from(len)
        .map_err(|_| Error::invalid_format("string length exceeds address space"))?;
    let mut buf = vec![0u8; len];
    read_exact(r, &mut buf)?;
    String::from_utf8(buf).map_err(|_| Error::invalid_format("string is not valid UTF-8"))
}

/// Write a length-prefixed UTF-8 string.
pub(crate) fn write_string(w: &mut impl Write, s: &str) -> Result<()> {
    if s.len() as u64 > MAX_STRING_BYTES {
        return Err(Error::invalid_format(format!(
            "string length {} exceeds maximum {MAX_STRING_BYTES}",
            s.len()
        )));
    }
    write_u64(w, s.len() as u64)?;
    w.write_all(s.as_bytes())?;
    Ok(())
}
