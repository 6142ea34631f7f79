//! Statistics for batch filter operations.

use serde::{Deserialize, Serialize};

/// Observed outcome of filtering one batch.
///
/// Collected per `filter_in` call; aggregate across calls with
/// [`merge`](BatchStats::merge). Header bytes are accounted separately so
/// the ratio reflects true wire cost, overhead included.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchStats {
    /// Items in the batch.
    pub items: usize,

    /// Items whose compression was accepted.
    pub compressed_items: usize,

    /// Total bytes across the input batch.
    pub bytes_in: usize,

    /// Total bytes across the framed output, header included.
    pub bytes_out: usize,

    /// Bytes spent on the header alone.
    pub header_bytes: usize,
}

impl BatchStats {
    /// Create empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Items rejected by the density cutoff and framed unmodified.
    pub fn passthrough_items(&self) -> usize {
        self.items - self.compressed_items
    }

    /// Compression ratio (input / output). Higher is better.
    pub fn ratio(&self) -> f64 {
        if self.bytes_out == 0 {
            return 0.0;
        }
        self.bytes_in as f64 / self.bytes_out as f64
    }

    /// Space savings as a percentage of input size.
    ///
    /// Negative when framing overhead outweighs what pruning removed.
    pub fn savings_percent(&self) -> f64 {
        if self.bytes_in == 0 {
            return 0.0;
        }
        (1.0 - (self.bytes_out as f64 / self.bytes_in as f64)) * 100.0
    }

    /// Fold another batch's stats into this one.
    pub fn merge(&mut self, other: &BatchStats) {
        self.items += other.items;
        self.compressed_items += other.compressed_items;
        self.bytes_in += other.bytes_in;
        self.bytes_out += other.bytes_out;
        self.header_bytes += other.header_bytes;
    }

    /// One-line summary for logs.
    pub fn summary(&self) -> String {
        format!(
            "{} items ({} compressed), {} -> {} bytes (ratio: {:.2}x)",
            self.items,
            self.compressed_items,
            self.bytes_in,
            self.bytes_out,
            self.ratio(),
        )
    }
}
