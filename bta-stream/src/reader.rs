//! Sequential array reading.

use std::fmt;
use std::io::{self, BufRead, BufReader, Read};

use bta_core::Header;

use crate::channel::ByteSource;
use crate::error::{Error, Result};

/// A reading session over one byte channel carrying zero or more arrays.
///
/// Arrays are consumed strictly in stream order: `read_next` yields the next
/// header and positions an implicit cursor at the start of that array's
/// payload, which is then drained through [`read_data`](Self::read_data) (or
/// implicitly skipped by the next `read_next`/`has_next`).
///
/// # Example
///
/// ```no_run
/// use bta_stream::{ArrayReader, ByteSource};
///
/// let mut input = ArrayReader::new(ByteSource::open("input.bta")?);
/// while let Some(header) = input.read_next()? {
///     println!("{} elements", header.elements());
/// }
/// # Ok::<(), bta_stream::Error>(())
/// ```
pub struct ArrayReader {
    src: BufReader<Box<dyn Read>>,
    name: String,
    current: String,
    index: u64,
    data_remaining: u64,
}

impl ArrayReader {
    /// Start a reading session on the given source.
    pub fn new(source: ByteSource) -> Self {
        let (reader, name) = source.into_parts();
        Self {
            src: BufReader::new(reader),
            current: name.clone(),
            name,
            index: 0,
            data_remaining: 0,
        }
    }

    /// Display name of the underlying channel.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of arrays read so far.
    pub fn arrays_read(&self) -> u64 {
        self.index
    }

    /// Unread payload bytes of the current array.
    pub fn data_remaining(&self) -> u64 {
        self.data_remaining
    }

    /// Diagnostic context for the array currently being processed, e.g.
    /// `input.bta array 2`.
    pub(crate) fn context(&self) -> &str {
        &self.current
    }

    /// Non-destructively probe whether another array follows.
    ///
    /// Any unread payload of the current array is skipped first.
    pub fn has_next(&mut self) -> Result<bool> {
        self.skip_data()?;
        let buf = self
            .src
            .fill_buf()
            .map_err(|e| Error::io(self.name.clone(), e))?;
        Ok(!buf.is_empty())
    }

    /// Read the next array's header, or `None` once the session is
    /// exhausted.
    ///
    /// # Errors
    ///
    /// [`Error::Format`] with file/array context on truncated or malformed
    /// input; [`Error::Io`] on channel failure.
    pub fn read_next(&mut self) -> Result<Option<Header>> {
        if !self.has_next()? {
            return Ok(None);
        }
        self.current = format!("{} array {}", self.name, self.index);
        let header =
            Header::read_from(&mut self.src).map_err(|e| Error::from_core(&self.current, e))?;
        self.data_remaining = header.data_size();
        self.index += 1;
        Ok(Some(header))
    }

    /// Read exactly `buf.len()` payload bytes of the current array.
    ///
    /// # Errors
    ///
    /// [`Error::Format`] if more bytes are requested than the header
    /// declared or the channel ends early.
    pub fn read_data(&mut self, buf: &mut [u8]) -> Result<()> {
        if buf.len() as u64 > self.data_remaining {
            return Err(Error::format(
                &self.current,
                format!(
                    "attempt to read {} bytes with {} left in the array",
                    buf.len(),
                    self.data_remaining
                ),
            ));
        }
        self.src.read_exact(buf).map_err(|e| {
            if e.kind() == io::ErrorKind::UnexpectedEof {
                Error::format(&self.current, "unexpected end of data")
            } else {
                Error::io(self.name.clone(), e)
            }
        })?;
        self.data_remaining -= buf.len() as u64;
        Ok(())
    }

    /// Skip whatever remains of the current array's payload.
    pub fn skip_data(&mut self) -> Result<()> {
        if self.data_remaining == 0 {
            return Ok(());
        }
        let skipped = io::copy(
            &mut (&mut self.src).take(self.data_remaining),
            &mut io::sink(),
        )
        .map_err(|e| Error::io(self.name.clone(), e))?;
        if skipped != self.data_remaining {
            return Err(Error::format(&self.current, "unexpected end of data"));
        }
        self.data_remaining = 0;
        Ok(())
    }

    /// End the session.
    ///
    /// Returns true if unread arrays remained — a non-fatal condition the
    /// caller may want to warn about.
    pub fn finish(mut self) -> Result<bool> {
        self.has_next()
    }
}

impl fmt::Debug for ArrayReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayReader")
            .field("name", &self.name)
            .field("index", &self.index)
            .field("data_remaining", &self.data_remaining)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bta_core::Type;

    fn encode_session(arrays: &[(Header, Vec<u8>)]) -> Vec<u8> {
        let mut buf = Vec::new();
        for (header, data) in arrays {
            header.write_to(&mut buf).unwrap();
            buf.extend_from_slice(data);
        }
        buf
    }

    fn reader_over(bytes: Vec<u8>) -> ArrayReader {
        ArrayReader::new(ByteSource::from_reader(io::Cursor::new(bytes), "mem.bta"))
    }

    fn small_header() -> Header {
        let mut hdr = Header::new();
        hdr.set_dimensions(vec![3]).unwrap();
        hdr.set_components(vec![Type::Uint8]).unwrap();
        hdr
    }

    #[test]
    fn test_empty_session() {
        let mut r = reader_over(Vec::new());
        assert!(!r.has_next().unwrap());
        assert!(r.read_next().unwrap().is_none());
        assert!(!r.finish().unwrap());
    }

    #[test]
    fn test_read_and_skip() {
        let hdr = small_header();
        let bytes = encode_session(&[
            (hdr.clone(), vec![1, 2, 3]),
            (hdr.clone(), vec![4, 5, 6]),
        ]);
        let mut r = reader_over(bytes);

        let first = r.read_next().unwrap().unwrap();
        assert_eq!(first, hdr);
        assert_eq!(r.data_remaining(), 3);

        // Not reading the payload; the next read_next skips it.
        let second = r.read_next().unwrap().unwrap();
        assert_eq!(second, hdr);
        let mut data = [0u8; 3];
        r.read_data(&mut data).unwrap();
        assert_eq!(data, [4, 5, 6]);
        assert!(r.read_next().unwrap().is_none());
    }

    #[test]
    fn test_finish_reports_leftover() {
        let hdr = small_header();
        let bytes = encode_session(&[
            (hdr.clone(), vec![1, 2, 3]),
            (hdr.clone(), vec![4, 5, 6]),
        ]);
        let mut r = reader_over(bytes);
        r.read_next().unwrap().unwrap();
        assert!(r.finish().unwrap());

        let mut r = reader_over(encode_session(&[(hdr, vec![7, 8, 9])]));
        r.read_next().unwrap().unwrap();
        assert!(!r.finish().unwrap());
    }

    #[test]
    fn test_over_read_rejected() {
        let bytes = encode_session(&[(small_header(), vec![1, 2, 3])]);
        let mut r = reader_over(bytes);
        r.read_next().unwrap().unwrap();
        let mut buf = [0u8; 4];
        let err = r.read_data(&mut buf).unwrap_err();
        assert!(matches!(err, Error::Format { .. }));
    }

    #[test]
    fn test_truncated_payload() {
        let mut bytes = encode_session(&[(small_header(), vec![1, 2, 3])]);
        bytes.truncate(bytes.len() - 2);
        let mut r = reader_over(bytes);
        r.read_next().unwrap().unwrap();
        let mut buf = [0u8; 3];
        let err = r.read_data(&mut buf).unwrap_err();
        assert!(matches!(err, Error::Format { .. }));
        assert!(err.to_string().contains("mem.bta array 0"));
    }

    #[test]
    fn test_truncated_header_context() {
        let mut bytes = encode_session(&[(small_header(), vec![1, 2, 3])]);
        bytes.truncate(6);
        let mut r = reader_over(bytes);
        let err = r.read_next().unwrap_err();
        assert!(matches!(err, Error::Format { .. }));
        assert!(err.to_string().contains("mem.bta array 0"));
    }

    #[test]
    fn test_garbage_header() {
        let mut r = reader_over(b"not a container".to_vec());
        let err = r.read_next().unwrap_err();
        assert!(err.to_string().contains("magic"));
    }
}
