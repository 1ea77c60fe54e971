//! Sequential array writing.

use std::fmt;
use std::io::{BufWriter, Write};

use bta_core::Header;

use crate::channel::ByteSink;
use crate::error::{Error, Result};
use crate::reader::ArrayReader;

/// Payload bytes moved per chunk by [`ArrayWriter::copy_data`].
const COPY_CHUNK: usize = 64 * 1024;

/// A writing session over one byte channel.
///
/// Construction refuses interactive terminals before emitting a single
/// byte. Each `write_header` commits the writer to exactly
/// `elements * element_size` payload bytes before the next header; the
/// session tracks the outstanding byte count and rejects both overruns and premature
/// headers.
///
/// Call [`finish`](Self::finish) to flush and close; dropping an unfinished
/// writer flushes on a best-effort basis but cannot report errors.
///
/// # Example
///
/// ```no_run
/// use bta_core::{Header, Type};
/// use bta_stream::{ArrayWriter, ByteSink};
///
/// let mut hdr = Header::new();
/// hdr.set_dimensions(vec![2])?;
/// hdr.set_components(vec![Type::Uint8])?;
///
/// let mut out = ArrayWriter::new(ByteSink::create("out.bta")?)?;
/// out.write_header(&hdr)?;
/// out.write_data(&[1, 2])?;
/// out.finish()?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct ArrayWriter {
    sink: BufWriter<Box<dyn Write>>,
    name: String,
    current: String,
    index: u64,
    data_remaining: u64,
    finished: bool,
}

impl ArrayWriter {
    /// Start a writing session on the given sink.
    ///
    /// # Errors
    ///
    /// [`Error::Usage`] if the sink is an interactive terminal.
    pub fn new(sink: ByteSink) -> Result<Self> {
        if sink.is_terminal() {
            return Err(Error::usage(format!(
                "refusing to write binary array data to a terminal ({})",
                sink.name()
            )));
        }
        let (writer, name, _) = sink.into_parts();
        Ok(Self {
            sink: BufWriter::new(writer),
            current: name.clone(),
            name,
            index: 0,
            data_remaining: 0,
            finished: false,
        })
    }

    /// Display name of the underlying channel.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of headers written so far.
    pub fn arrays_written(&self) -> u64 {
        self.index
    }

    /// Diagnostic context for the array currently being written.
    pub(crate) fn context(&self) -> &str {
        &self.current
    }

    /// Write the next array's header.
    ///
    /// # Errors
    ///
    /// [`Error::Format`] if the previous array's payload is incomplete;
    /// [`Error::Usage`] if the session is already finished.
    pub fn write_header(&mut self, header: &Header) -> Result<()> {
        self.ensure_open()?;
        if self.data_remaining != 0 {
            return Err(Error::format(
                &self.current,
                format!(
                    "array data incomplete: {} bytes still expected",
                    self.data_remaining
                ),
            ));
        }
        self.current = format!("{} array {}", self.name, self.index);
        header
            .write_to(&mut self.sink)
            .map_err(|e| Error::from_core(&self.current, e))?;
        self.data_remaining = header.data_size();
        self.index += 1;
        Ok(())
    }

    /// Append payload bytes for the current array.
    ///
    /// # Errors
    ///
    /// [`Error::Format`] if more bytes are written than the header declared.
    pub fn write_data(&mut self, bytes: &[u8]) -> Result<()> {
        self.ensure_open()?;
        if bytes.len() as u64 > self.data_remaining {
            return Err(Error::format(
                &self.current,
                format!(
                    "attempt to write {} bytes with {} expected",
                    bytes.len(),
                    self.data_remaining
                ),
            ));
        }
        self.sink
            .write_all(bytes)
            .map_err(|e| Error::io(self.name.clone(), e))?;
        self.data_remaining -= bytes.len() as u64;
        Ok(())
    }

    /// Move the remaining payload of `input`'s current array into this
    /// session, in bounded chunks.
    ///
    /// Used for pass-through commands that rewrite headers but leave data
    /// untouched.
    pub fn copy_data(&mut self, input: &mut ArrayReader) -> Result<()> {
        let mut remaining = input.data_remaining();
        let mut buf = vec![0u8; remaining.min(COPY_CHUNK as u64) as usize];
        while remaining > 0 {
            let n = remaining.min(COPY_CHUNK as u64) as usize;
            input.read_data(&mut buf[..n])?;
            self.write_data(&buf[..n])?;
            remaining -= n as u64;
        }
        Ok(())
    }

    /// Flush and end the session.
    ///
    /// # Errors
    ///
    /// [`Error::Format`] if the current array's payload is incomplete;
    /// [`Error::Io`] if the flush fails.
    pub fn finish(mut self) -> Result<()> {
        self.do_finish()
    }

    fn do_finish(&mut self) -> Result<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        if self.data_remaining != 0 {
            return Err(Error::format(
                &self.current,
                format!(
                    "array data incomplete: {} bytes still expected",
                    self.data_remaining
                ),
            ));
        }
        self.sink
            .flush()
            .map_err(|e| Error::io(self.name.clone(), e))
    }

    fn ensure_open(&self) -> Result<()> {
        if self.finished {
            return Err(Error::usage("write into a finished session"));
        }
        Ok(())
    }
}

impl fmt::Debug for ArrayWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayWriter")
            .field("name", &self.name)
            .field("index", &self.index)
            .field("data_remaining", &self.data_remaining)
            .field("finished", &self.finished)
            .finish()
    }
}

impl Drop for ArrayWriter {
    fn drop(&mut self) {
        // Errors here have nowhere to go; finish() reports them properly.
        let _ = self.do_finish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::ByteSource;
    use bta_core::Type;
    use std::io;
    use std::sync::{Arc, Mutex};

    /// Shared in-memory sink so tests can inspect bytes after the writer
    /// is dropped.
    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuf {
        fn take(&self) -> Vec<u8> {
            std::mem::take(&mut self.0.lock().unwrap())
        }
    }

    fn small_header() -> Header {
        let mut hdr = Header::new();
        hdr.set_dimensions(vec![2]).unwrap();
        hdr.set_components(vec![Type::Uint8]).unwrap();
        hdr
    }

    #[test]
    fn test_terminal_sink_refused() {
        let sink = ByteSink::from_writer(io::sink(), "fake tty").with_terminal(true);
        let err = ArrayWriter::new(sink).unwrap_err();
        assert!(matches!(err, Error::Usage { .. }));
        assert!(err.to_string().contains("terminal"));
    }

    #[test]
    fn test_write_and_read_back() {
        let buf = SharedBuf::default();
        let mut w = ArrayWriter::new(ByteSink::from_writer(buf.clone(), "mem")).unwrap();
        let hdr = small_header();
        w.write_header(&hdr).unwrap();
        w.write_data(&[10, 20]).unwrap();
        assert_eq!(w.arrays_written(), 1);
        w.finish().unwrap();

        let mut r = ArrayReader::new(ByteSource::from_reader(
            io::Cursor::new(buf.take()),
            "mem",
        ));
        let got = r.read_next().unwrap().unwrap();
        assert_eq!(got, hdr);
        let mut data = [0u8; 2];
        r.read_data(&mut data).unwrap();
        assert_eq!(data, [10, 20]);
        assert!(!r.finish().unwrap());
    }

    #[test]
    fn test_overrun_rejected() {
        let mut w =
            ArrayWriter::new(ByteSink::from_writer(io::sink(), "mem")).unwrap();
        w.write_header(&small_header()).unwrap();
        let err = w.write_data(&[1, 2, 3]).unwrap_err();
        assert!(matches!(err, Error::Format { .. }));
    }

    #[test]
    fn test_premature_header_rejected() {
        let mut w =
            ArrayWriter::new(ByteSink::from_writer(io::sink(), "mem")).unwrap();
        w.write_header(&small_header()).unwrap();
        w.write_data(&[1]).unwrap();
        let err = w.write_header(&small_header()).unwrap_err();
        assert!(err.to_string().contains("incomplete"));
    }

    #[test]
    fn test_finish_incomplete_rejected() {
        let mut w =
            ArrayWriter::new(ByteSink::from_writer(io::sink(), "mem")).unwrap();
        w.write_header(&small_header()).unwrap();
        let err = w.finish().unwrap_err();
        assert!(err.to_string().contains("incomplete"));
    }

    #[test]
    fn test_copy_data() {
        let hdr = small_header();
        let mut session = Vec::new();
        hdr.write_to(&mut session).unwrap();
        session.extend_from_slice(&[7, 9]);

        let mut r = ArrayReader::new(ByteSource::from_reader(
            io::Cursor::new(session),
            "in",
        ));
        let read_hdr = r.read_next().unwrap().unwrap();

        let buf = SharedBuf::default();
        let mut w = ArrayWriter::new(ByteSink::from_writer(buf.clone(), "out")).unwrap();
        w.write_header(&read_hdr).unwrap();
        w.copy_data(&mut r).unwrap();
        w.finish().unwrap();

        let mut check = ArrayReader::new(ByteSource::from_reader(
            io::Cursor::new(buf.take()),
            "check",
        ));
        check.read_next().unwrap().unwrap();
        let mut data = [0u8; 2];
        check.read_data(&mut data).unwrap();
        assert_eq!(data, [7, 9]);
    }
}
