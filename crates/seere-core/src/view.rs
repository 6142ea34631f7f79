//! Bounds-checked element views over byte buffers.
//!
//! Dense buffers, packed pair encodings, and headers all travel as raw
//! bytes. These views validate a buffer's length against the element width
//! once, at construction, and then expose indexed element access that can
//! never read or write outside the buffer.

use core::marker::PhantomData;

use crate::element::Element;
use crate::error::{FilterError, Result};

/// Read-only view of a byte buffer as a sequence of `V` elements.
#[derive(Debug, Clone, Copy)]
pub struct ElementView<'a, V: Element> {
    bytes: &'a [u8],
    _marker: PhantomData<V>,
}

impl<'a, V: Element> ElementView<'a, V> {
    /// Wrap `bytes`, validating that its length is a whole number of
    /// elements.
    pub fn new(bytes: &'a [u8]) -> Result<Self> {
        if bytes.len() % V::WIDTH != 0 {
            return Err(FilterError::unaligned(bytes.len(), V::WIDTH));
        }
        Ok(Self {
            bytes,
            _marker: PhantomData,
        })
    }

    /// Number of elements in the view.
    pub fn len(&self) -> usize {
        self.bytes.len() / V::WIDTH
    }

    /// Check if the view holds no elements.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Read the element at `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<V> {
        let offset = index.checked_mul(V::WIDTH)?;
        if offset + V::WIDTH > self.bytes.len() {
            return None;
        }
        Some(V::read_le(&self.bytes[offset..]))
    }

    /// Iterate over all elements in order.
    pub fn iter(&self) -> impl Iterator<Item = V> + 'a {
        self.bytes.chunks_exact(V::WIDTH).map(V::read_le)
    }
}

/// Mutable view of a byte buffer as a sequence of `V` elements.
#[derive(Debug)]
pub struct ElementViewMut<'a, V: Element> {
    bytes: &'a mut [u8],
    _marker: PhantomData<V>,
}

impl<'a, V: Element> ElementViewMut<'a, V> {
    /// Wrap `bytes`, validating that its length is a whole number of
    /// elements.
    pub fn new(bytes: &'a mut [u8]) -> Result<Self> {
        if bytes.len() % V::WIDTH != 0 {
            return Err(FilterError::unaligned(bytes.len(), V::WIDTH));
        }
        Ok(Self {
            bytes,
            _marker: PhantomData,
        })
    }

    /// Number of elements in the view.
    pub fn len(&self) -> usize {
        self.bytes.len() / V::WIDTH
    }

    /// Check if the view holds no elements.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Read the element at `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<V> {
        let offset = index.checked_mul(V::WIDTH)?;
        if offset + V::WIDTH > self.bytes.len() {
            return None;
        }
        Some(V::read_le(&self.bytes[offset..]))
    }

    /// Write `value` at `index`, failing if the index is out of range.
    pub fn set(&mut self, index: usize, value: V) -> Result<()> {
        let count = self.len();
        if index >= count {
            return Err(FilterError::IndexOutOfRange {
                index: index as u64,
                count,
            });
        }
        value.write_le(&mut self.bytes[index * V::WIDTH..]);
        Ok(())
    }
}
