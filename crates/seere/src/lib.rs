//! # Seere
//!
//! Lossy sparse quantization for gradient exchange in distributed training.
//!
//! Seere sits between a training worker and its transport. Outbound
//! batches of dense update buffers are pruned to `(index, value)` pairs
//! when that pays off and framed with a self-describing header; inbound
//! frames are reconstructed with pruned positions zeroed. Items the
//! filter cannot shrink travel unmodified.
//!
//! ## Quick Start
//!
//! ```ignore
//! use bytes::Bytes;
//! use seere::{QuantizationFilter, SparseFilter};
//!
//! // Prune everything with |v| <= 0.01; f32 values, u32 indices.
//! let filter = SparseFilter::<f32, u32>::new(0.01)?;
//!
//! let framed = filter.filter_in(&batch)?;   // batch.len() + 1 buffers
//! let restored = filter.filter_out(&framed)?;
//! ```
//!
//! Or, for a single batch without holding a filter:
//!
//! ```ignore
//! let framed = seere::compress_batch(&batch, 0.01)?;
//! let restored = seere::decompress_batch(&framed)?;
//! ```
//!
//! ## Choosing types
//!
//! Value and index types must have equal byte width: `f32` pairs with
//! `u32` or `i32`, `f64` with `u64` or `i64`. The unsigned index types
//! use their maximum value as the pass-through sentinel, the signed ones
//! use -1; both conventions interoperate with peers that read slots as
//! signed integers.

pub use seere_core::{
    check_widths, BatchStats, Element, ElementView, ElementViewMut, FilterError, FilterErrorKind,
    QuantizationFilter, Result, SlotValue, SparseIndex,
};
pub use seere_sparse::{FrameHeader, ItemOutcome, SparseCodec, SparseFilter};

use bytes::Bytes;

/// Compress one batch of `f32` buffers with `u32` indices in a single
/// call.
///
/// Builds a throwaway [`SparseFilter`] with the given clip threshold.
/// Hold a filter instead when filtering a stream of batches.
pub fn compress_batch(batch: &[Bytes], clip: f64) -> Result<Vec<Bytes>> {
    SparseFilter::<f32, u32>::new(clip)?.filter_in(batch)
}

/// Reconstruct a batch framed by [`compress_batch`].
///
/// The clip threshold only matters on the way in; reconstruction is
/// driven entirely by the frame itself.
pub fn decompress_batch(framed: &[Bytes]) -> Result<Vec<Bytes>> {
    SparseFilter::<f32, u32>::new(0.0)?.filter_out(framed)
}
