//! Element and index type abstractions for packed sparse encodings.
//!
//! A sparse encoding interleaves index and value elements of identical byte
//! width in one buffer, so both sides of the pairing are described by small
//! sealed traits: [`Element`] for the numeric payload and [`SparseIndex`]
//! for the positions and header slots. All wire accesses are little-endian
//! and go through `read_le`/`write_le` on validated slices rather than
//! pointer reinterpretation.

use crate::error::{FilterError, Result};

mod sealed {
    pub trait Sealed {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
    impl Sealed for u32 {}
    impl Sealed for i32 {}
    impl Sealed for u64 {}
    impl Sealed for i64 {}
}

/// Numeric value type carried by a dense buffer.
///
/// Implemented for `f32` and `f64`. The clip comparison is performed in
/// `f64` (`magnitude() > clip`), matching the double-precision threshold
/// the filter is constructed with. `read_le`/`write_le` preserve bit
/// patterns exactly, NaN payloads included.
pub trait Element: sealed::Sealed + Copy + PartialEq + Send + Sync + 'static {
    /// Byte width of one element.
    const WIDTH: usize;

    /// Read one element from the first `WIDTH` bytes of `bytes`.
    ///
    /// # Panics
    /// Panics if `bytes` is shorter than `WIDTH`. Callers go through a
    /// validated view or a pre-checked offset.
    fn read_le(bytes: &[u8]) -> Self;

    /// Write this element into the first `WIDTH` bytes of `bytes`.
    ///
    /// # Panics
    /// Panics if `bytes` is shorter than `WIDTH`.
    fn write_le(self, bytes: &mut [u8]);

    /// Absolute value widened to `f64` for threshold comparison.
    ///
    /// NaN compares greater-than nothing, so NaN elements are always
    /// eligible for pruning.
    fn magnitude(self) -> f64;
}

impl Element for f32 {
    const WIDTH: usize = 4;

    #[inline]
    fn read_le(bytes: &[u8]) -> Self {
        f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
    }

    #[inline]
    fn write_le(self, bytes: &mut [u8]) {
        bytes[..4].copy_from_slice(&self.to_le_bytes());
    }

    #[inline]
    fn magnitude(self) -> f64 {
        self.abs() as f64
    }
}

impl Element for f64 {
    const WIDTH: usize = 8;

    #[inline]
    fn read_le(bytes: &[u8]) -> Self {
        f64::from_le_bytes([
            bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
        ])
    }

    #[inline]
    fn write_le(self, bytes: &mut [u8]) {
        bytes[..8].copy_from_slice(&self.to_le_bytes());
    }

    #[inline]
    fn magnitude(self) -> f64 {
        self.abs()
    }
}

/// Interpretation of one header slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotValue {
    /// The item was framed unmodified.
    Passthrough,
    /// The item was compressed; the slot carries its original byte length.
    OriginalLen(u64),
}

/// Integer type used for pair indices and header slots.
///
/// Implemented for `u32`, `i32`, `u64`, and `i64`. The sentinel is the
/// index type's reading of -1: `MAX` for unsigned types, `-1` for signed
/// ones. Signed slots interpret any negative value as pass-through, which
/// is how the original sentinel convention behaves on the wire.
pub trait SparseIndex: sealed::Sealed + Copy + PartialEq + Send + Sync + 'static {
    /// Byte width of one index element.
    const WIDTH: usize;

    /// Largest original byte length a non-sentinel header slot can carry.
    const MAX_SLOT_LEN: u64;

    /// Largest pair index the type can represent.
    const MAX_INDEX: u64;

    /// Read one index from the first `WIDTH` bytes of `bytes`.
    ///
    /// # Panics
    /// Panics if `bytes` is shorter than `WIDTH`.
    fn read_le(bytes: &[u8]) -> Self;

    /// Write this index into the first `WIDTH` bytes of `bytes`.
    ///
    /// # Panics
    /// Panics if `bytes` is shorter than `WIDTH`.
    fn write_le(self, bytes: &mut [u8]);

    /// The pass-through marker (-1 in this type).
    fn sentinel() -> Self;

    /// Convert a pair index, or `None` if it does not fit.
    fn from_index(index: usize) -> Option<Self>;

    /// Convert an original byte length into a header slot, or `None` if it
    /// does not fit below the sentinel.
    fn from_len(len: usize) -> Option<Self>;

    /// This index as an unsigned element offset.
    ///
    /// Signed values are reinterpreted bit-for-bit, so negatives map far
    /// beyond any valid element count and fail the decode range check.
    fn as_offset(self) -> u64;

    /// Interpret this value as a header slot.
    fn slot(self) -> SlotValue;
}

impl SparseIndex for u32 {
    const WIDTH: usize = 4;
    const MAX_SLOT_LEN: u64 = u32::MAX as u64 - 1;
    const MAX_INDEX: u64 = u32::MAX as u64;

    #[inline]
    fn read_le(bytes: &[u8]) -> Self {
        u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
    }

    #[inline]
    fn write_le(self, bytes: &mut [u8]) {
        bytes[..4].copy_from_slice(&self.to_le_bytes());
    }

    #[inline]
    fn sentinel() -> Self {
        u32::MAX
    }

    #[inline]
    fn from_index(index: usize) -> Option<Self> {
        u32::try_from(index).ok()
    }

    #[inline]
    fn from_len(len: usize) -> Option<Self> {
        match u32::try_from(len) {
            Ok(v) if v != u32::MAX => Some(v),
            _ => None,
        }
    }

    #[inline]
    fn as_offset(self) -> u64 {
        self as u64
    }

    #[inline]
    fn slot(self) -> SlotValue {
        if self == u32::MAX {
            SlotValue::Passthrough
        } else {
            SlotValue::OriginalLen(self as u64)
        }
    }
}

impl SparseIndex for i32 {
    const WIDTH: usize = 4;
    const MAX_SLOT_LEN: u64 = i32::MAX as u64;
    const MAX_INDEX: u64 = i32::MAX as u64;

    #[inline]
    fn read_le(bytes: &[u8]) -> Self {
        i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
    }

    #[inline]
    fn write_le(self, bytes: &mut [u8]) {
        bytes[..4].copy_from_slice(&self.to_le_bytes());
    }

    #[inline]
    fn sentinel() -> Self {
        -1
    }

    #[inline]
    fn from_index(index: usize) -> Option<Self> {
        i32::try_from(index).ok()
    }

    #[inline]
    fn from_len(len: usize) -> Option<Self> {
        i32::try_from(len).ok()
    }

    #[inline]
    fn as_offset(self) -> u64 {
        self as u32 as u64
    }

    #[inline]
    fn slot(self) -> SlotValue {
        if self < 0 {
            SlotValue::Passthrough
        } else {
            SlotValue::OriginalLen(self as u64)
        }
    }
}

impl SparseIndex for u64 {
    const WIDTH: usize = 8;
    const MAX_SLOT_LEN: u64 = u64::MAX - 1;
    const MAX_INDEX: u64 = u64::MAX;

    #[inline]
    fn read_le(bytes: &[u8]) -> Self {
        u64::from_le_bytes([
            bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
        ])
    }

    #[inline]
    fn write_le(self, bytes: &mut [u8]) {
        bytes[..8].copy_from_slice(&self.to_le_bytes());
    }

    #[inline]
    fn sentinel() -> Self {
        u64::MAX
    }

    #[inline]
    fn from_index(index: usize) -> Option<Self> {
        Some(index as u64)
    }

    #[inline]
    fn from_len(len: usize) -> Option<Self> {
        let v = len as u64;
        if v == u64::MAX {
            None
        } else {
            Some(v)
        }
    }

    #[inline]
    fn as_offset(self) -> u64 {
        self
    }

    #[inline]
    fn slot(self) -> SlotValue {
        if self == u64::MAX {
            SlotValue::Passthrough
        } else {
            SlotValue::OriginalLen(self)
        }
    }
}

impl SparseIndex for i64 {
    const WIDTH: usize = 8;
    const MAX_SLOT_LEN: u64 = i64::MAX as u64;
    const MAX_INDEX: u64 = i64::MAX as u64;

    #[inline]
    fn read_le(bytes: &[u8]) -> Self {
        i64::from_le_bytes([
            bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
        ])
    }

    #[inline]
    fn write_le(self, bytes: &mut [u8]) {
        bytes[..8].copy_from_slice(&self.to_le_bytes());
    }

    #[inline]
    fn sentinel() -> Self {
        -1
    }

    #[inline]
    fn from_index(index: usize) -> Option<Self> {
        i64::try_from(index).ok()
    }

    #[inline]
    fn from_len(len: usize) -> Option<Self> {
        i64::try_from(len).ok()
    }

    #[inline]
    fn as_offset(self) -> u64 {
        self as u64
    }

    #[inline]
    fn slot(self) -> SlotValue {
        if self < 0 {
            SlotValue::Passthrough
        } else {
            SlotValue::OriginalLen(self as u64)
        }
    }
}

/// Check the equal-width pairing constraint for a `(V, I)` combination.
///
/// The packed encoding interleaves indices and values in one buffer, so
/// the two types must agree on byte width. Called once at filter
/// construction; violations never reach the per-call paths.
pub fn check_widths<V: Element, I: SparseIndex>() -> Result<()> {
    if V::WIDTH != I::WIDTH {
        return Err(FilterError::width_mismatch(V::WIDTH, I::WIDTH));
    }
    Ok(())
}
