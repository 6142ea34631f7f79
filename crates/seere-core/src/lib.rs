//! # Seere Core
//!
//! Core traits, types, and buffer views for the Seere gradient-compression
//! library.
//!
//! Seere is named after the 70th demon of the Ars Goetia, who travels
//! anywhere on earth in an instant - just as this library shrinks update
//! vectors so they cross the wire between training workers faster.
//!
//! ## Design Philosophy
//!
//! - **Lossy on purpose**: pruning below a threshold is an intentional,
//!   irreversible approximation, never silent corruption
//! - **Self-describing frames**: a receiver needs nothing beyond the frame
//!   itself to reconstruct the batch
//! - **Zero-copy pass-through**: items that don't benefit from compression
//!   are shared, not copied
//! - **No hidden state**: filters are immutable after construction and
//!   safe to call from any thread
//!
//! ## Core Pieces
//!
//! - [`QuantizationFilter`] - the batch compress/reconstruct contract
//! - [`Element`] / [`SparseIndex`] - the value/index pairing a packed
//!   encoding interleaves
//! - [`ElementView`] / [`ElementViewMut`] - bounds-checked typed access to
//!   byte buffers
//! - [`FilterError`] - typed, recoverable failures
//! - [`BatchStats`] - per-batch wire accounting
//!
//! ## Example
//!
//! ```ignore
//! use seere_core::QuantizationFilter;
//! use seere_sparse::SparseFilter;
//!
//! let filter = SparseFilter::<f32, u32>::new(1.0)?;
//! let framed = filter.filter_in(&batch)?;
//! let restored = filter.filter_out(&framed)?;
//! ```

pub mod element;
pub mod error;
pub mod stats;
pub mod traits;
pub mod view;

pub use element::{check_widths, Element, SlotValue, SparseIndex};
pub use error::{FilterError, FilterErrorKind, Result};
pub use stats::BatchStats;
pub use traits::QuantizationFilter;
pub use view::{ElementView, ElementViewMut};
