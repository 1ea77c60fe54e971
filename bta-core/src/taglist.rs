//! Ordered string-keyed metadata.
//!
//! Arrays carry one global tag list plus one per component. Tags have no
//! processing semantics; the container only guarantees that names are unique
//! within a list and that order survives a read/write round trip.

use std::fmt;

use crate::error::{Error, Result};

/// An ordered, key-unique string-to-string mapping.
///
/// Insertion order is preserved. Setting an existing name updates its value
/// in place without moving it, so rewriting a header does not shuffle
/// metadata.
///
/// # Example
///
/// ```
/// use bta_core::TagList;
///
/// let mut tags = TagList::new();
/// tags.set("PRODUCER", "btatool")?;
/// tags.set("UNIT", "m/s")?;
/// assert_eq!(tags.get("UNIT"), Some("m/s"));
/// assert_eq!(tags.len(), 2);
/// # Ok::<(), bta_core::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagList {
    entries: Vec<(String, String)>,
}

impl TagList {
    /// Create an empty tag list.
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Number of tags in the list.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the list has no tags.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up the value stored under `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set `name` to `value`, updating in place if the name already exists.
    ///
    /// # Errors
    ///
    /// Fails if the name is empty or if the name or value contains a
    /// character the wire format cannot carry (`=` or NUL in names, NUL in
    /// values).
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) -> Result<()> {
        let name = name.into();
        let value = value.into();
        validate_name(&name)?;
        validate_value(&value)?;
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
        Ok(())
    }

    /// Remove the tag stored under `name`.
    ///
    /// Returns true if a tag was removed.
    pub fn unset(&mut self, name: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(n, _)| n != name);
        before != self.entries.len()
    }

    /// Remove all tags.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterate over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

impl fmt::Display for TagList {
    /// Formats as `NAME=VALUE` pairs separated by `, `.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}={value}")?;
        }
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::invalid_format("tag name must not be empty"));
    }
    if name.contains('=') {
        return Err(Error::invalid_format(format!(
            "tag name '{name}' must not contain '='"
        )));
    }
    if name.contains('\0') {
        return Err(Error::invalid_format("tag name must not contain NUL"));
    }
    Ok(())
}

fn validate_value(value: &str) -> Result<()> {
    if value.contains('\0') {
        return Err(Error::invalid_format("tag value must not contain NUL"));
    }
    Ok(())
}
