use crate::event::EdgeKind;

/// Failures produced by the pure decode pipeline.
///
/// Any of these invalidates the whole capture; the decoder never returns a
/// partial or best-effort measurement.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecodeError {
    /// Fewer edge events than a full transmission requires were available.
    ShortCapture,
    /// The edge kinds stopped alternating at the given position.
    FramingViolation {
        /// Zero-based index of the first offending event.
        index: usize,
        expected: EdgeKind,
        actual: EdgeKind,
    },
    /// The sum of the four data bytes did not equal the checksum byte.
    ChecksumMismatch {
        /// Untruncated sum of the four data bytes.
        sum: u16,
        /// The checksum byte as transmitted.
        checksum: u8,
    },
}

/// Possible errors from a capture-and-decode cycle.
#[derive(Debug, PartialEq, Eq)]
pub enum Dht11Error<E> {
    /// The captured events did not decode to a valid measurement.
    Decode(DecodeError),
    /// The edge-event source reported a failure; passed through untouched.
    Source(E),
}

impl<E> From<E> for Dht11Error<E> {
    fn from(value: E) -> Self {
        Self::Source(value)
    }
}
