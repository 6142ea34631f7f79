//! Batch frame header: per-item outcomes and their wire form.

use bytes::Bytes;
use seere_core::{FilterError, Result, SlotValue, SparseIndex};

/// What happened to one item of a batch during `filter_in`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemOutcome {
    /// Compression was rejected; the item travels unmodified.
    Passthrough,
    /// Compression was accepted; the original byte length is needed to
    /// size the reconstruction on the way back.
    Compressed {
        /// Byte length of the dense buffer before compression.
        original_len: usize,
    },
}

impl ItemOutcome {
    /// Check whether this outcome carries a compressed encoding.
    pub fn is_compressed(&self) -> bool {
        matches!(self, ItemOutcome::Compressed { .. })
    }
}

/// Decoded frame header: one [`ItemOutcome`] per framed item.
///
/// On the wire the header is a bare array of index-typed slots, one per
/// item in batch order. The sentinel (-1 read in the index type) marks a
/// pass-through item; any other value is a compressed item's original
/// byte length. [`encode`](Self::encode) and [`parse`](Self::parse) move
/// between that packed form and this tagged one, so nothing outside this
/// module touches the sentinel convention.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FrameHeader {
    outcomes: Vec<ItemOutcome>,
}

impl FrameHeader {
    /// Build a header from per-item outcomes in batch order.
    pub fn new(outcomes: Vec<ItemOutcome>) -> Self {
        Self { outcomes }
    }

    /// The per-item outcomes in batch order.
    pub fn outcomes(&self) -> &[ItemOutcome] {
        &self.outcomes
    }

    /// Number of items the header describes.
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Check whether the header describes no items.
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Number of items whose compression was accepted.
    pub fn compressed_items(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_compressed()).count()
    }

    /// Pack the header into its wire form with `I`-typed slots.
    ///
    /// Fails with [`FilterError::IndexOverflow`] when a compressed item's
    /// original length does not fit below the sentinel in `I`.
    pub fn encode<I: SparseIndex>(&self) -> Result<Bytes> {
        let mut out = vec![0u8; self.outcomes.len() * I::WIDTH];
        for (slot, outcome) in out.chunks_exact_mut(I::WIDTH).zip(&self.outcomes) {
            let value = match outcome {
                ItemOutcome::Passthrough => I::sentinel(),
                ItemOutcome::Compressed { original_len } => I::from_len(*original_len)
                    .ok_or_else(|| {
                        FilterError::overflow(
                            "header slot length",
                            *original_len as u64,
                            I::MAX_SLOT_LEN,
                        )
                    })?,
            };
            value.write_le(slot);
        }
        Ok(Bytes::from(out))
    }

    /// Unpack a wire header, validating it against the trailing item count.
    ///
    /// The header must be exactly `items` slots long: a ragged byte length
    /// fails as [`FilterError::UnalignedLength`], a whole-slot disagreement
    /// as [`FilterError::SlotCountMismatch`].
    pub fn parse<I: SparseIndex>(bytes: &[u8], items: usize) -> Result<Self> {
        if bytes.len() % I::WIDTH != 0 {
            return Err(FilterError::unaligned(bytes.len(), I::WIDTH));
        }
        let slots = bytes.len() / I::WIDTH;
        if slots != items {
            return Err(FilterError::SlotCountMismatch { slots, items });
        }

        let mut outcomes = Vec::with_capacity(slots);
        for slot in bytes.chunks_exact(I::WIDTH) {
            match I::read_le(slot).slot() {
                SlotValue::Passthrough => outcomes.push(ItemOutcome::Passthrough),
                SlotValue::OriginalLen(len) => {
                    let original_len = usize::try_from(len).map_err(|_| {
                        FilterError::overflow("header slot length", len, usize::MAX as u64)
                    })?;
                    outcomes.push(ItemOutcome::Compressed { original_len });
                }
            }
        }
        Ok(Self { outcomes })
    }
}
