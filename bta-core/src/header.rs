//! Array headers and their wire codec.
//!
//! A header fully describes one array: its dimensions, the component types
//! of one element, and tag metadata at global and per-component scope. The
//! data payload that follows a header on the wire is exactly
//! `elements() * element_size()` raw bytes and is never interpreted here.

use std::io::{Read, Write};

use crate::component::{self, Type};
use crate::error::{Error, Result};
use crate::taglist::TagList;
use crate::wire;

/// Description of one array: shape, element layout, and metadata.
///
/// Size arithmetic (`elements`, `element_size`, `data_size`) is validated
/// with overflow checks whenever dimensions or components change, so the
/// accessors are plain field reads and an encodable header is always
/// decodable.
///
/// A header with zero dimensions describes a single scalar element; a header
/// with any dimension of size zero describes an empty array.
///
/// # Example
///
/// ```
/// use bta_core::{Header, Type};
///
/// let mut hdr = Header::new();
/// hdr.set_dimensions(vec![256, 128])?;
/// hdr.set_components(vec![Type::Uint8, Type::Uint8, Type::Uint8])?;
/// hdr.global_tags_mut().set("PRODUCER", "btatool")?;
///
/// assert_eq!(hdr.elements(), 256 * 128);
/// assert_eq!(hdr.element_size(), 3);
/// assert_eq!(hdr.data_size(), 256 * 128 * 3);
/// # Ok::<(), bta_core::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    dimensions: Vec<u64>,
    components: Vec<Type>,
    global_tags: TagList,
    component_tags: Vec<TagList>,
    elements: u64,
    element_size: u64,
    data_size: u64,
}

impl Header {
    /// Create an empty header: zero dimensions (one scalar element) and no
    /// components.
    pub fn new() -> Self {
        Self {
            dimensions: Vec::new(),
            components: Vec::new(),
            global_tags: TagList::new(),
            component_tags: Vec::new(),
            elements: 1,
            element_size: 0,
            data_size: 0,
        }
    }

    /// Dimension sizes, slowest-growing last (dimension 0 varies fastest in
    /// the data payload).
    pub fn dimensions(&self) -> &[u64] {
        &self.dimensions
    }

    /// Component types of one element, in payload order.
    pub fn components(&self) -> &[Type] {
        &self.components
    }

    /// Number of elements: the product of all dimension sizes, 1 for zero
    /// dimensions.
    pub fn elements(&self) -> u64 {
        self.elements
    }

    /// Byte size of one element: the sum of all component widths.
    pub fn element_size(&self) -> u64 {
        self.element_size
    }

    /// Byte size of the whole data payload.
    pub fn data_size(&self) -> u64 {
        self.data_size
    }

    /// Byte offset of component `c` within one element.
    ///
    /// # Panics
    ///
    /// Panics if `c` is not a valid component index.
    pub fn component_offset(&self, c: usize) -> u64 {
        assert!(c < self.components.len(), "component index {c} out of range");
        self.components[..c].iter().map(|t| t.width()).sum()
    }

    /// Replace the dimension list.
    ///
    /// # Errors
    ///
    /// Fails if there are too many dimensions or if the element count or
    /// total data size would overflow a u64.
    pub fn set_dimensions(&mut self, dimensions: Vec<u64>) -> Result<()> {
        if dimensions.len() as u64 > wire::MAX_DIMENSIONS {
            return Err(Error::invalid_format(format!(
                "{} dimensions exceed maximum {}",
                dimensions.len(),
                wire::MAX_DIMENSIONS
            )));
        }
        let elements = checked_product(&dimensions)?;
        let data_size = checked_data_size(elements, self.element_size)?;
        self.dimensions = dimensions;
        self.elements = elements;
        self.data_size = data_size;
        Ok(())
    }

    /// Replace the component list.
    ///
    /// All per-component tag lists are reset to empty, since tags from an
    /// unrelated layout would be meaningless.
    ///
    /// # Errors
    ///
    /// Fails if there are too many components, if a blob component has zero
    /// width, or if the element size or total data size would overflow a u64.
    pub fn set_components(&mut self, components: Vec<Type>) -> Result<()> {
        if components.len() as u64 > wire::MAX_COMPONENTS {
            return Err(Error::invalid_format(format!(
                "{} components exceed maximum {}",
                components.len(),
                wire::MAX_COMPONENTS
            )));
        }
        let mut element_size: u64 = 0;
        for ty in &components {
            if let Type::Blob { size: 0 } = ty {
                return Err(Error::invalid_format("blob component with zero size"));
            }
            element_size = element_size
                .checked_add(ty.width())
                .ok_or_else(|| Error::invalid_format("element size overflows u64"))?;
        }
        let data_size = checked_data_size(self.elements, element_size)?;
        self.component_tags = vec![TagList::new(); components.len()];
        self.components = components;
        self.element_size = element_size;
        self.data_size = data_size;
        Ok(())
    }

    /// Global tag list.
    pub fn global_tags(&self) -> &TagList {
        &self.global_tags
    }

    /// Mutable global tag list.
    pub fn global_tags_mut(&mut self) -> &mut TagList {
        &mut self.global_tags
    }

    /// Tag list of component `c`.
    ///
    /// # Panics
    ///
    /// Panics if `c` is not a valid component index.
    pub fn component_tags(&self, c: usize) -> &TagList {
        &self.component_tags[c]
    }

    /// Mutable tag list of component `c`.
    ///
    /// # Panics
    ///
    /// Panics if `c` is not a valid component index.
    pub fn component_tags_mut(&mut self, c: usize) -> &mut TagList {
        &mut self.component_tags[c]
    }

    /// Encode this header to a byte channel.
    pub fn write_to(&self, w: &mut impl Write) -> Result<()> {
        w.write_all(&wire::MAGIC)?;
        wire::write_u8(w, wire::VERSION)?;
        wire::write_u64(w, self.dimensions.len() as u64)?;
        wire::write_u64(w, self.components.len() as u64)?;
        for &dim in &self.dimensions {
            wire::write_u64(w, dim)?;
        }
        for ty in &self.components {
            wire::write_u8(w, ty.tag())?;
            if let Type::Blob { size } = ty {
                wire::write_u64(w, *size)?;
            }
        }
        write_taglist(w, &self.global_tags)?;
        for tags in &self.component_tags {
            write_taglist(w, tags)?;
        }
        Ok(())
    }

    /// Decode one header from a byte channel.
    ///
    /// The channel is left positioned at the first byte of the array's data
    /// payload.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidFormat`] on bad magic, unsupported version, unknown
    /// component tags, structural cap violations, or size overflow;
    /// [`Error::UnexpectedEof`] if the channel ends mid-header.
    pub fn read_from(r: &mut impl Read) -> Result<Self> {
        let mut magic = [0u8; 4];
        wire::read_exact(r, &mut magic)?;
        if magic != wire::MAGIC {
            return Err(Error::invalid_format("bad magic bytes, not a BTA array"));
        }
        let version = wire::read_u8(r)?;
        if version != wire::VERSION {
            return Err(Error::invalid_format(format!(
                "unsupported format version {version}"
            )));
        }
        let ndim = wire::read_u64(r)?;
        if ndim > wire::MAX_DIMENSIONS {
            return Err(Error::invalid_format(format!(
                "{ndim} dimensions exceed maximum {}",
                wire::MAX_DIMENSIONS
            )));
        }
        let ncomp = wire::read_u64(r)?;
        if ncomp > wire::MAX_COMPONENTS {
            return Err(Error::invalid_format(format!(
                "{ncomp} components exceed maximum {}",
                wire::MAX_COMPONENTS
            )));
        }
        let mut dimensions = Vec::with_capacity(ndim as usize);
        for _ in 0..ndim {
            dimensions.push(wire::read_u64(r)?);
        }
        let mut components = Vec::with_capacity(ncomp as usize);
        for _ in 0..ncomp {
            let tag = wire::read_u8(r)?;
            let blob_size = if tag == component::BLOB_TAG {
                wire::read_u64(r)?
            } else {
                0
            };
            components.push(Type::from_tag(tag, blob_size)?);
        }
        let mut header = Header::new();
        header.set_dimensions(dimensions)?;
        header.set_components(components)?;
        header.global_tags = read_taglist(r)?;
        for c in 0..ncomp as usize {
            header.component_tags[c] = read_taglist(r)?;
        }
        Ok(header)
    }
}

fn checked_product(dimensions: &[u64]) -> Result<u64> {
    let mut product: u64 = 1;
    for &dim in dimensions {
        product = product
            .checked_mul(dim)
            .ok_or_else(|| Error::invalid_format("element count overflows u64"))?;
    }
    Ok(product)
}

fn checked_data_size(elements: u64, element_size: u64) -> Result<u64> {
    elements
        .checked_mul(element_size)
        .ok_or_else(|| Error::invalid_format("data size overflows u64"))
}

fn write_taglist(w: &mut impl Write, tags: &TagList) -> Result<()> {
    if tags.len() as u64 > wire::MAX_TAGS {
        return Err(Error::invalid_format(format!(
            "{} tags exceed maximum {}",
            tags.len(),
            wire::MAX_TAGS
        )));
    }
    wire::write_u64(w, tags.len() as u64)?;
    for (name, value) in tags.iter() {
        wire::write_string(w, name)?;
        wire::write_string(w, value)?;
    }
    Ok(())
}

fn read_taglist(r: &mut impl Read) -> Result<TagList> {
    let count = wire::read_u64(r)?;
    if count > wire::MAX_TAGS {
        return Err(Error::invalid_format(format!(
            "{count} tags exceed maximum {}",
            wire::MAX_TAGS
        )));
    }
    let mut tags = TagList::new();
    for _ in 0..count {
        let name = wire::read_string(r)?;
        let value = wire::read_string(r)?;
        if tags.get(&name).is_some() {
            return Err(Error::invalid_format(format!("duplicate tag name '{name}'")));
        }
        tags.set(name, value)?;
    }
    Ok(tags)
}
