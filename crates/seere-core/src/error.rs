//! Error types for quantization filter operations.

use thiserror::Error;

/// Result type alias for filter operations.
pub type Result<T> = core::result::Result<T, FilterError>;

/// Errors raised by quantization filters and their codecs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// Value type and index type have different byte widths.
    ///
    /// The packed pair encoding interleaves index and value elements in one
    /// buffer, so both must occupy the same number of bytes. Detected at
    /// filter construction; a filter instance is never produced.
    #[error("element width mismatch: value type is {value_width} bytes, index type is {index_width} bytes")]
    WidthMismatch {
        value_width: usize,
        index_width: usize,
    },

    /// A framed input had no buffers at all, so there is no header to read.
    #[error("framed input is empty: missing the batch header")]
    EmptyFrame,

    /// The header's slot count disagrees with the number of trailing buffers.
    #[error("header declares {slots} slots but frame carries {items} items")]
    SlotCountMismatch { slots: usize, items: usize },

    /// A buffer's byte length is not a multiple of the element width.
    #[error("buffer length {len} is not a multiple of element width {width}")]
    UnalignedLength { len: usize, width: usize },

    /// A pair buffer's byte length is not a positive multiple of the pair stride.
    #[error("pair buffer length {len} is not a positive multiple of pair stride {stride}")]
    MalformedPairs { len: usize, stride: usize },

    /// A stored pair index falls outside the reconstructed buffer.
    ///
    /// Signed index types are reinterpreted as unsigned for reporting, so a
    /// negative index surfaces as a large value here.
    #[error("pair index {index} out of range for {count} reconstructed elements")]
    IndexOutOfRange { index: u64, count: usize },

    /// A value does not fit in the index type (element index or header slot).
    ///
    /// The original formulation silently truncated here; we refuse to emit
    /// an encoding that cannot round-trip.
    #[error("{what} {value} exceeds index type capacity {max}")]
    IndexOverflow {
        what: &'static str,
        value: u64,
        max: u64,
    },
}

/// Coarse error classes, used for metrics and retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterErrorKind {
    /// The filter could not be constructed; not recoverable.
    Configuration,
    /// A call was made with an argument that cannot be processed.
    InvalidArgument,
    /// A framed buffer or encoding failed validation during decode or encode.
    Decode,
}

impl FilterErrorKind {
    /// Stable lowercase name for metrics labels.
    pub fn name(self) -> &'static str {
        match self {
            FilterErrorKind::Configuration => "configuration",
            FilterErrorKind::InvalidArgument => "invalid_argument",
            FilterErrorKind::Decode => "decode",
        }
    }
}

impl FilterError {
    /// Create a width mismatch error.
    pub fn width_mismatch(value_width: usize, index_width: usize) -> Self {
        FilterError::WidthMismatch {
            value_width,
            index_width,
        }
    }

    /// Create an unaligned length error.
    pub fn unaligned(len: usize, width: usize) -> Self {
        FilterError::UnalignedLength { len, width }
    }

    /// Create an index overflow error for a quantity named by `what`.
    pub fn overflow(what: &'static str, value: u64, max: u64) -> Self {
        FilterError::IndexOverflow { what, value, max }
    }

    /// Classify this error into its coarse kind.
    pub fn kind(&self) -> FilterErrorKind {
        match self {
            FilterError::WidthMismatch { .. } => FilterErrorKind::Configuration,
            FilterError::EmptyFrame => FilterErrorKind::InvalidArgument,
            FilterError::SlotCountMismatch { .. }
            | FilterError::UnalignedLength { .. }
            | FilterError::MalformedPairs { .. }
            | FilterError::IndexOutOfRange { .. }
            | FilterError::IndexOverflow { .. } => FilterErrorKind::Decode,
        }
    }

    /// Check if the caller can recover by fixing the input and retrying.
    ///
    /// Configuration errors are construction-time and fatal; everything
    /// else is per-call and leaves prior output intact.
    pub fn is_recoverable(&self) -> bool {
        self.kind() != FilterErrorKind::Configuration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        assert_eq!(
            FilterError::width_mismatch(4, 8).kind(),
            FilterErrorKind::Configuration
        );
        assert_eq!(FilterError::EmptyFrame.kind(), FilterErrorKind::InvalidArgument);
        assert_eq!(
            FilterError::SlotCountMismatch { slots: 3, items: 2 }.kind(),
            FilterErrorKind::Decode
        );
        assert_eq!(
            FilterError::IndexOutOfRange { index: 9, count: 4 }.kind(),
            FilterErrorKind::Decode
        );
        assert_eq!(
            FilterError::overflow("header slot", u32::MAX as u64, u32::MAX as u64 - 1).kind(),
            FilterErrorKind::Decode
        );
    }

    #[test]
    fn test_recoverability() {
        assert!(!FilterError::width_mismatch(4, 8).is_recoverable());
        assert!(FilterError::EmptyFrame.is_recoverable());
        assert!(FilterError::unaligned(7, 4).is_recoverable());
    }

    #[test]
    fn test_display_messages() {
        let err = FilterError::width_mismatch(4, 8);
        assert_eq!(
            err.to_string(),
            "element width mismatch: value type is 4 bytes, index type is 8 bytes"
        );

        let err = FilterError::overflow("element count", 5_000_000_000, u32::MAX as u64);
        assert!(err.to_string().contains("element count"));
        assert!(err.to_string().contains("5000000000"));
    }

    #[test]
    fn test_kind_names_stable() {
        assert_eq!(FilterErrorKind::Configuration.name(), "configuration");
        assert_eq!(FilterErrorKind::InvalidArgument.name(), "invalid_argument");
        assert_eq!(FilterErrorKind::Decode.name(), "decode");
    }
}
