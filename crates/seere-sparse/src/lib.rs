//! # Seere Sparse
//!
//! Threshold-based sparse quantization for gradient exchange.
//!
//! Dense update buffers are mostly noise around zero; this crate prunes
//! every element whose magnitude does not exceed a clip threshold and
//! ships the survivors as packed `(index, value)` pairs. Compression is
//! lossy (pruned positions come back as zero) and opportunistic: an item
//! that would not shrink is framed unmodified and marked as such in the
//! batch header.
//!
//! ## Pieces
//!
//! - [`SparseCodec`]: single-buffer prune/reconstruct with the 50%
//!   density cutoff
//! - [`FrameHeader`] / [`ItemOutcome`]: per-item outcomes and their
//!   sentinel-slot wire form
//! - [`SparseFilter`]: the batch-level [`QuantizationFilter`] tying the
//!   two together
//!
//! ## Example
//!
//! ```ignore
//! use seere_sparse::SparseFilter;
//! use seere_core::QuantizationFilter;
//!
//! let filter = SparseFilter::<f32, u32>::new(0.01)?;
//! let framed = filter.filter_in(&batch)?;
//! let restored = filter.filter_out(&framed)?;
//! ```

pub mod codec;
pub mod filter;
pub mod header;

pub use codec::SparseCodec;
pub use filter::SparseFilter;
pub use header::{FrameHeader, ItemOutcome};

// The contract this crate implements.
pub use seere_core::QuantizationFilter;
