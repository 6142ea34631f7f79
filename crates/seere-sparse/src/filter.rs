//! Batch-level sparse quantization filter.

use bytes::Bytes;
use seere_core::{BatchStats, Element, FilterError, QuantizationFilter, Result, SparseIndex};
use tracing::{debug, trace};

use crate::codec::SparseCodec;
use crate::header::{FrameHeader, ItemOutcome};

/// Threshold-pruning quantization filter over batches of dense buffers.
///
/// `filter_in` offers every item to the [`SparseCodec`] and frames the
/// batch with a header recording each item's outcome; `filter_out` reads
/// the header back and reconstructs the batch. The defaults (`f32` values,
/// `u32` indices) fit the common gradient-exchange case; any equal-width
/// pairing of [`Element`] and [`SparseIndex`] works.
///
/// The filter is immutable after construction and safe to share across
/// threads.
#[derive(Debug, Clone)]
pub struct SparseFilter<V: Element = f32, I: SparseIndex = u32> {
    codec: SparseCodec<V, I>,
}

impl<V: Element, I: SparseIndex> SparseFilter<V, I> {
    /// Create a filter that prunes elements with `|v| <= clip`.
    ///
    /// Fails with [`FilterError::WidthMismatch`] when `V` and `I` differ
    /// in byte width.
    pub fn new(clip: f64) -> Result<Self> {
        Ok(Self {
            codec: SparseCodec::new(clip)?,
        })
    }

    /// The clip threshold items are pruned against.
    pub fn clip(&self) -> f64 {
        self.codec.clip()
    }

    /// The underlying single-buffer codec.
    pub fn codec(&self) -> &SparseCodec<V, I> {
        &self.codec
    }

    /// Compress a batch and report what happened to it.
    ///
    /// Same frame as [`QuantizationFilter::filter_in`], plus a
    /// [`BatchStats`] describing acceptance and byte movement.
    pub fn filter_in_with_stats(&self, batch: &[Bytes]) -> Result<(Vec<Bytes>, BatchStats)> {
        let mut outcomes = Vec::with_capacity(batch.len());
        let mut items = Vec::with_capacity(batch.len());
        let mut stats = BatchStats {
            items: batch.len(),
            ..BatchStats::default()
        };

        for (position, item) in batch.iter().enumerate() {
            stats.bytes_in += item.len();
            match self.codec.try_compress(item)? {
                Some(encoded) => {
                    trace!(
                        "item {}: compressed {} -> {} bytes",
                        position,
                        item.len(),
                        encoded.len()
                    );
                    outcomes.push(ItemOutcome::Compressed {
                        original_len: item.len(),
                    });
                    stats.compressed_items += 1;
                    stats.bytes_out += encoded.len();
                    items.push(encoded);
                }
                None => {
                    trace!("item {}: pass-through ({} bytes)", position, item.len());
                    outcomes.push(ItemOutcome::Passthrough);
                    stats.bytes_out += item.len();
                    // Rejected items ride along unmodified; the clone
                    // shares the allocation rather than copying it.
                    items.push(item.clone());
                }
            }
        }

        let header = FrameHeader::new(outcomes).encode::<I>()?;
        stats.header_bytes = header.len();
        stats.bytes_out += header.len();

        let mut framed = Vec::with_capacity(items.len() + 1);
        framed.push(header);
        framed.extend(items);

        debug!(
            "filter_in: {} items ({} compressed), {} -> {} bytes",
            stats.items, stats.compressed_items, stats.bytes_in, stats.bytes_out
        );
        Ok((framed, stats))
    }
}

impl<V: Element, I: SparseIndex> QuantizationFilter for SparseFilter<V, I> {
    fn filter_in(&self, batch: &[Bytes]) -> Result<Vec<Bytes>> {
        self.filter_in_with_stats(batch).map(|(framed, _)| framed)
    }

    fn filter_out(&self, framed: &[Bytes]) -> Result<Vec<Bytes>> {
        let (header_bytes, items) = framed.split_first().ok_or(FilterError::EmptyFrame)?;
        let header = FrameHeader::parse::<I>(header_bytes, items.len())?;

        let mut batch = Vec::with_capacity(items.len());
        for (position, (outcome, item)) in header.outcomes().iter().zip(items).enumerate() {
            match outcome {
                ItemOutcome::Passthrough => {
                    trace!("item {}: passed through ({} bytes)", position, item.len());
                    batch.push(item.clone());
                }
                ItemOutcome::Compressed { original_len } => {
                    trace!("item {}: reconstructing {} bytes", position, original_len);
                    batch.push(self.codec.decompress(item, *original_len)?);
                }
            }
        }

        debug!("filter_out: restored {} items", batch.len());
        Ok(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pack_f32(values: &[f32]) -> Bytes {
        let mut out = Vec::with_capacity(values.len() * 4);
        for v in values {
            out.extend_from_slice(&v.to_le_bytes());
        }
        Bytes::from(out)
    }

    fn unpack_f32(bytes: &Bytes) -> Vec<f32> {
        bytes
            .chunks_exact(4)
            .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect()
    }

    #[test]
    fn test_frame_shape() {
        let filter = SparseFilter::<f32, u32>::new(1.0).unwrap();
        let batch = vec![
            pack_f32(&[5.0, 0.0, 0.0]),
            pack_f32(&[1.0, 2.0]),
            pack_f32(&[0.0, 0.0, 9.0, 0.0]),
        ];

        let framed = filter.filter_in(&batch).unwrap();
        assert_eq!(framed.len(), batch.len() + 1);
        // One u32 slot per item.
        assert_eq!(framed[0].len(), batch.len() * 4);
    }

    #[test]
    fn test_mixed_batch_header_slots() {
        let filter = SparseFilter::<f32, u32>::new(1.0).unwrap();
        let sparse = pack_f32(&[5.0, 0.01, 0.02, 7.0, 0.01]);
        let dense = pack_f32(&[2.0, 3.0, 4.0, 5.0]);
        let batch = vec![sparse.clone(), dense.clone()];

        let framed = filter.filter_in(&batch).unwrap();

        // Slot 0 carries the sparse item's original length, slot 1 the
        // pass-through sentinel.
        let mut expected = Vec::new();
        expected.extend_from_slice(&(sparse.len() as u32).to_le_bytes());
        expected.extend_from_slice(&u32::MAX.to_le_bytes());
        assert_eq!(framed[0].as_ref(), expected.as_slice());

        // Item 0 shrank to two pairs, item 1 is the same buffer.
        assert_eq!(framed[1].len(), 16);
        assert_eq!(framed[2], dense);
    }

    #[test]
    fn test_roundtrip_mixed_batch() {
        let filter = SparseFilter::<f32, u32>::new(1.0).unwrap();
        let batch = vec![
            pack_f32(&[5.0, 0.01, 0.02, 7.0, 0.01]),
            pack_f32(&[2.0, 3.0, 4.0, 5.0]),
            pack_f32(&[0.1, 0.1, 0.1]),
        ];

        let framed = filter.filter_in(&batch).unwrap();
        let restored = filter.filter_out(&framed).unwrap();

        assert_eq!(restored.len(), batch.len());
        // Compressed item: survivors exact, pruned positions zeroed.
        assert_eq!(unpack_f32(&restored[0]), vec![5.0, 0.0, 0.0, 7.0, 0.0]);
        // Pass-through item: byte-identical.
        assert_eq!(restored[1], batch[1]);
        // All-pruned item: first element carried, the rest zeroed.
        assert_eq!(unpack_f32(&restored[2]), vec![0.1, 0.0, 0.0]);
    }

    #[test]
    fn test_empty_batch_frames_header_only() {
        let filter = SparseFilter::<f32, u32>::new(1.0).unwrap();

        let framed = filter.filter_in(&[]).unwrap();
        assert_eq!(framed.len(), 1);
        assert!(framed[0].is_empty());

        let restored = filter.filter_out(&framed).unwrap();
        assert!(restored.is_empty());
    }

    #[test]
    fn test_empty_frame_errors() {
        let filter = SparseFilter::<f32, u32>::new(1.0).unwrap();
        let err = filter.filter_out(&[]).unwrap_err();
        assert_eq!(err, FilterError::EmptyFrame);
    }

    #[test]
    fn test_truncated_frame_errors() {
        let filter = SparseFilter::<f32, u32>::new(1.0).unwrap();
        let batch = vec![pack_f32(&[5.0, 0.0, 0.0]), pack_f32(&[1.0, 2.0])];

        let mut framed = filter.filter_in(&batch).unwrap();
        framed.pop();

        let err = filter.filter_out(&framed).unwrap_err();
        assert_eq!(err, FilterError::SlotCountMismatch { slots: 2, items: 1 });
    }

    #[test]
    fn test_stats_account_header_and_items() {
        let filter = SparseFilter::<f32, u32>::new(1.0).unwrap();
        let batch = vec![
            pack_f32(&[5.0, 0.01, 0.02, 7.0, 0.01]), // 20 bytes -> 16
            pack_f32(&[2.0, 3.0, 4.0, 5.0]),         // 16 bytes, rejected
        ];

        let (framed, stats) = filter.filter_in_with_stats(&batch).unwrap();

        assert_eq!(stats.items, 2);
        assert_eq!(stats.compressed_items, 1);
        assert_eq!(stats.passthrough_items(), 1);
        assert_eq!(stats.bytes_in, 36);
        assert_eq!(stats.header_bytes, 8);
        assert_eq!(stats.bytes_out, 16 + 16 + 8);
        assert_eq!(
            stats.bytes_out,
            framed.iter().map(|b| b.len()).sum::<usize>()
        );
    }

    #[test]
    fn test_signed_index_batch_roundtrip() {
        let filter = SparseFilter::<f32, i32>::new(0.5).unwrap();
        let batch = vec![pack_f32(&[0.0, 0.9, 0.0, 0.0, 0.0, -2.5])];

        let framed = filter.filter_in(&batch).unwrap();
        let restored = filter.filter_out(&framed).unwrap();
        assert_eq!(unpack_f32(&restored[0]), vec![0.0, 0.9, 0.0, 0.0, 0.0, -2.5]);
    }

    #[test]
    fn test_usable_as_trait_object() {
        let filter: Box<dyn QuantizationFilter> =
            Box::new(SparseFilter::<f32, u32>::new(1.0).unwrap());
        let batch = vec![pack_f32(&[9.0, 0.0, 0.0])];

        let framed = filter.filter_in(&batch).unwrap();
        let restored = filter.filter_out(&framed).unwrap();
        assert_eq!(unpack_f32(&restored[0]), vec![9.0, 0.0, 0.0]);
    }
}
