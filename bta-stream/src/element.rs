//! Element-wise streaming.
//!
//! Elementwise commands read one element at a time from an input session,
//! compute into an output buffer, and append it to an output session. The
//! [`ElementLayout`] table is built once per header so per-component access
//! inside the hot loop is plain slicing, with no repeated width arithmetic.

use bta_core::{Header, Type};

use crate::checked::checked_cast;
use crate::error::{Error, Result};
use crate::reader::ArrayReader;
use crate::writer::ArrayWriter;

/// One component's place within a flat element buffer.
#[derive(Debug, Clone, Copy)]
pub struct Slot {
    /// Byte offset of the component within the element.
    pub offset: usize,
    /// Byte width of the component.
    pub width: usize,
    /// Component type.
    pub ty: Type,
}

/// Precomputed per-header table of component offsets, widths, and types.
#[derive(Debug, Clone)]
pub struct ElementLayout {
    slots: Vec<Slot>,
    element_size: usize,
}

impl ElementLayout {
    /// Build the offset table for one header.
    ///
    /// # Errors
    ///
    /// [`Error::Overflow`] if the element size does not fit the platform's
    /// address space.
    pub fn new(header: &Header) -> Result<Self> {
        let element_size = checked_cast::<usize, u64>(header.element_size())?;
        let mut slots = Vec::with_capacity(header.components().len());
        let mut offset = 0usize;
        for &ty in header.components() {
            let width = checked_cast::<usize, u64>(ty.width())?;
            slots.push(Slot { offset, width, ty });
            offset += width;
        }
        Ok(Self { slots, element_size })
    }

    /// Byte size of one element.
    pub fn element_size(&self) -> usize {
        self.element_size
    }

    /// Number of components per element.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check whether elements have no components.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The slot of component `c`.
    ///
    /// # Panics
    ///
    /// Panics if `c` is not a valid component index.
    pub fn slot(&self, c: usize) -> Slot {
        self.slots[c]
    }

    /// Borrow component `c` out of an element buffer.
    ///
    /// # Panics
    ///
    /// Panics if `c` is out of range or `element` is shorter than the
    /// element size.
    pub fn component<'a>(&self, element: &'a [u8], c: usize) -> &'a [u8] {
        let slot = self.slots[c];
        &element[slot.offset..slot.offset + slot.width]
    }

    /// Mutably borrow component `c` out of an element buffer.
    ///
    /// # Panics
    ///
    /// Panics if `c` is out of range or `element` is shorter than the
    /// element size.
    pub fn component_mut<'a>(&self, element: &'a mut [u8], c: usize) -> &'a mut [u8] {
        let slot = self.slots[c];
        &mut element[slot.offset..slot.offset + slot.width]
    }
}

/// Paired element cursor over one (source header, sink header) pair.
///
/// The caller verifies layout compatibility up front (the stream itself only
/// enforces sizes and counts) and then alternates
/// [`read_one`](Self::read_one) and [`write_one`](Self::write_one) until the
/// declared element totals are consumed. The read buffer is reused across
/// calls; the borrow on `&mut self` keeps an element view from being
/// retained past the next read.
pub struct ElementStream {
    write_size: usize,
    to_read: u64,
    to_write: u64,
    // One source element; its length is the read size.
    buf: Vec<u8>,
}

impl ElementStream {
    /// Bind a stream to a source header and a sink header.
    ///
    /// A command that only writes (or only reads) passes a default
    /// [`Header`] for the unused side.
    ///
    /// # Errors
    ///
    /// [`Error::Overflow`] if an element size does not fit the platform's
    /// address space.
    pub fn new(source: &Header, sink: &Header) -> Result<Self> {
        let read_size = checked_cast::<usize, u64>(source.element_size())?;
        let write_size = checked_cast::<usize, u64>(sink.element_size())?;
        Ok(Self {
            write_size,
            to_read: source.elements(),
            to_write: sink.elements(),
            buf: vec![0u8; read_size],
        })
    }

    /// Elements not yet read from the source side.
    pub fn elements_to_read(&self) -> u64 {
        self.to_read
    }

    /// Elements not yet written to the sink side.
    pub fn elements_to_write(&self) -> u64 {
        self.to_write
    }

    /// Read the next element from `input`.
    ///
    /// The returned view is valid until the next call on this stream.
    ///
    /// # Errors
    ///
    /// [`Error::Format`] if the source header's element total is already
    /// consumed or the payload ends early.
    pub fn read_one(&mut self, input: &mut ArrayReader) -> Result<&[u8]> {
        if self.to_read == 0 {
            return Err(Error::format(
                input.context(),
                "attempt to read past the last element",
            ));
        }
        input.read_data(&mut self.buf)?;
        self.to_read -= 1;
        Ok(&self.buf)
    }

    /// Append one element to `output`.
    ///
    /// # Errors
    ///
    /// [`Error::Format`] if `element` is not exactly the sink element size
    /// or the sink header's element total is already satisfied.
    pub fn write_one(&mut self, output: &mut ArrayWriter, element: &[u8]) -> Result<()> {
        if element.len() != self.write_size {
            return Err(Error::format(
                output.context(),
                format!(
                    "element buffer is {} bytes, expected {}",
                    element.len(),
                    self.write_size
                ),
            ));
        }
        if self.to_write == 0 {
            return Err(Error::format(
                output.context(),
                "attempt to write past the last element",
            ));
        }
        output.write_data(element)?;
        self.to_write -= 1;
        Ok(())
    }
}
