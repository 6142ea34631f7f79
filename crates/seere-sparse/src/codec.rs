//! Threshold-based sparse pair codec.
//!
//! One dense buffer in, one packed `(index, value)` pair buffer out, and
//! back. The codec prunes elements whose magnitude does not exceed the
//! clip threshold and keeps the survivors as index/value pairs in ascending
//! index order. Compression is offered, not forced: a buffer that would not
//! shrink is rejected so the caller can frame it unmodified.

use core::marker::PhantomData;

use bytes::Bytes;
use seere_core::{
    check_widths, Element, ElementView, ElementViewMut, FilterError, Result, SparseIndex,
};

/// Sparse pair codec over value type `V` and index type `I`.
///
/// The two type parameters must have equal byte width, which is enforced
/// at construction. The clip threshold is compared strictly: an element
/// survives pruning only when `|v| > clip`, so `clip = 0.0` still prunes
/// exact zeros (and NaN, which is greater than nothing).
#[derive(Debug, Clone)]
pub struct SparseCodec<V: Element, I: SparseIndex> {
    clip: f64,
    _marker: PhantomData<(V, I)>,
}

impl<V: Element, I: SparseIndex> SparseCodec<V, I> {
    /// Create a codec with the given clip threshold.
    ///
    /// Fails with [`FilterError::WidthMismatch`] when `V` and `I` differ
    /// in byte width.
    pub fn new(clip: f64) -> Result<Self> {
        check_widths::<V, I>()?;
        Ok(Self {
            clip,
            _marker: PhantomData,
        })
    }

    /// The clip threshold this codec prunes against.
    pub fn clip(&self) -> f64 {
        self.clip
    }

    /// Byte stride of one encoded pair.
    pub const fn pair_stride() -> usize {
        I::WIDTH + V::WIDTH
    }

    /// Try to compress one dense buffer into a packed pair encoding.
    ///
    /// Returns `Ok(None)` when compression would not pay off: half or more
    /// of the elements exceed the clip threshold, so the pair encoding
    /// would be as large as the input or larger. The empty buffer lands in
    /// the same bucket (zero kept of zero total).
    ///
    /// When every element is pruned the encoding still carries one pair,
    /// `(0, input[0])`, because the pair format has no empty encoding.
    /// That first element rides along verbatim even though it sits at or
    /// below the threshold.
    pub fn try_compress(&self, input: &[u8]) -> Result<Option<Bytes>> {
        let view = ElementView::<V>::new(input)?;
        let total = view.len();
        let kept = view.iter().filter(|v| v.magnitude() > self.clip).count();

        if kept * 2 >= total {
            return Ok(None);
        }

        let stride = Self::pair_stride();
        if kept == 0 {
            // The cutoff above rejected the empty buffer, so element 0
            // exists. A zeroed buffer already encodes pair index 0; only
            // the value half needs writing.
            let mut out = vec![0u8; stride];
            V::read_le(input).write_le(&mut out[I::WIDTH..]);
            return Ok(Some(Bytes::from(out)));
        }

        let mut out = vec![0u8; kept * stride];
        let mut at = 0;
        for (position, value) in view.iter().enumerate() {
            if value.magnitude() > self.clip {
                let index = I::from_index(position).ok_or_else(|| {
                    FilterError::overflow("pair index", position as u64, I::MAX_INDEX)
                })?;
                index.write_le(&mut out[at..]);
                value.write_le(&mut out[at + I::WIDTH..]);
                at += stride;
            }
        }
        debug_assert_eq!(at, out.len());

        Ok(Some(Bytes::from(out)))
    }

    /// Reconstruct a dense buffer of `original_len` bytes from a packed
    /// pair encoding.
    ///
    /// The output starts zeroed; each stored pair writes its value at its
    /// index. Pruned positions therefore come back as zero, which is the
    /// lossy half of the scheme. Every stored index is range-checked
    /// against the reconstructed element count before any write.
    pub fn decompress(&self, pairs: &[u8], original_len: usize) -> Result<Bytes> {
        if original_len % V::WIDTH != 0 {
            return Err(FilterError::unaligned(original_len, V::WIDTH));
        }
        let stride = Self::pair_stride();
        if pairs.is_empty() || pairs.len() % stride != 0 {
            return Err(FilterError::MalformedPairs {
                len: pairs.len(),
                stride,
            });
        }

        let count = original_len / V::WIDTH;
        let mut out = vec![0u8; original_len];
        let mut view = ElementViewMut::<V>::new(&mut out)?;
        for pair in pairs.chunks_exact(stride) {
            // Widen before any cast: a signed negative index reinterprets
            // to a value far beyond `count` and fails here instead of
            // wrapping into range.
            let offset = I::read_le(pair).as_offset();
            if offset >= count as u64 {
                return Err(FilterError::IndexOutOfRange {
                    index: offset,
                    count,
                });
            }
            view.set(offset as usize, V::read_le(&pair[I::WIDTH..]))?;
        }

        Ok(Bytes::from(out))
    }
}
