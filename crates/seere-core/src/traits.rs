//! The quantization filter contract.
//!
//! A filter sits between a training worker and its transport: outbound
//! batches of dense update buffers pass through [`filter_in`] before they
//! are sent, and inbound framed batches pass through [`filter_out`] after
//! they arrive. Implementations are selected at construction time; callers
//! hold a `dyn QuantizationFilter` (or a concrete filter) and never switch
//! strategies mid-stream.
//!
//! [`filter_in`]: QuantizationFilter::filter_in
//! [`filter_out`]: QuantizationFilter::filter_out

use bytes::Bytes;

use crate::error::Result;

/// Lossy batch compression strategy with a self-describing frame.
///
/// Both operations are pure, bounded-time transforms: no I/O, no locking,
/// no state beyond what the filter was constructed with. A single instance
/// may be shared across threads (`Send + Sync`) and called concurrently as
/// long as each call owns its own input and output buffers.
pub trait QuantizationFilter: Send + Sync {
    /// Compress a batch of dense buffers into a framed representation.
    ///
    /// Returns `batch.len() + 1` buffers: a header recording the per-item
    /// outcome (compressed with its original byte length, or passed
    /// through), followed by one buffer per item in batch order: the
    /// packed encoding where compression was accepted, the original
    /// buffer (shared, not copied) where it was rejected.
    fn filter_in(&self, batch: &[Bytes]) -> Result<Vec<Bytes>>;

    /// Reconstruct a batch from a framed representation.
    ///
    /// The first input buffer must be the header produced by
    /// [`filter_in`](Self::filter_in); the remaining buffers are consumed
    /// one per header slot, in order. Returns `framed.len() - 1` buffers.
    /// Reconstruction restores the stored representation exactly; values
    /// pruned during compression stay zero.
    fn filter_out(&self, framed: &[Bytes]) -> Result<Vec<Bytes>>;
}
