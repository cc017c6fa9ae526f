//! Pure decode pipeline: frame validation, bit extraction, checksum.
//!
//! Everything here operates on an already-captured slice of edge events and
//! performs no I/O. The three stages are independently callable; each one
//! re-checks the frame length so none of them can index out of range.

use crate::error::DecodeError;
use crate::event::{EdgeEvent, EdgeKind};

/// Number of edge events in one complete DHT11 transmission: the start and
/// response pulses, then 40 data bits of two edges each.
pub const TOTAL_EVENTS: usize = 84;

/// Number of bytes carried by one transmission (four data bytes plus the
/// checksum byte).
pub const FRAME_BYTES: usize = 5;

/// Pulse-width cutoff separating a `0` bit from a `1` bit, in microseconds.
///
/// The sensor emits roughly a 24 us high pulse for a logical 0 and roughly
/// 70 us for a logical 1; the midpoint is the maximum-separation cutoff.
/// Strictly greater than the cutoff classifies as 1.
pub const BIT_THRESHOLD_US: u32 = (24 + 70) / 2;

/// The line idles high, so the sensor's first transition is a falling edge.
const FIRST_EDGE: EdgeKind = EdgeKind::Falling;

/// Index of the falling edge that ends the first data-bit pulse. The four
/// events before it are the start-request and sensor-response pulses.
const BASE_IDX: usize = 4;

const BITS_PER_BYTE: usize = 8;

/// Checks that `events` is a well-formed transmission frame.
///
/// The frame must contain exactly [`TOTAL_EVENTS`] events whose kinds
/// alternate strictly, starting from a falling edge. The expected kind
/// toggles after every position, so a single flipped event is reported at
/// its own index.
///
/// This is the only framing check: passing it means the capture has the
/// shape of a DHT11 transmission, though the bit contents are still
/// unverified until [`verify_checksum`].
pub fn validate_frame(events: &[EdgeEvent]) -> Result<(), DecodeError> {
    if events.len() != TOTAL_EVENTS {
        return Err(DecodeError::ShortCapture);
    }

    let mut expected = FIRST_EDGE;
    for (index, event) in events.iter().enumerate() {
        if event.kind != expected {
            return Err(DecodeError::FramingViolation {
                index,
                expected,
                actual: event.kind,
            });
        }
        expected = expected.opposite();
    }

    Ok(())
}

/// Extracts the five transmitted bytes from a full frame.
///
/// For byte `b` and bit `k` (MSB first), the high pulse of interest ends at
/// event `4 + 16*b + 2*k` and starts at the event before it. The pulse
/// width decides the bit: strictly longer than [`BIT_THRESHOLD_US`] is a 1.
///
/// Callers are expected to run [`validate_frame`] first; the length is
/// still re-checked here so a caller skipping validation gets a framing
/// error instead of a panic.
pub fn decode_bytes(events: &[EdgeEvent]) -> Result<[u8; FRAME_BYTES], DecodeError> {
    if events.len() != TOTAL_EVENTS {
        return Err(DecodeError::ShortCapture);
    }

    let mut bytes = [0u8; FRAME_BYTES];
    for (byte_idx, byte) in bytes.iter_mut().enumerate() {
        for bit_idx in 0..BITS_PER_BYTE {
            let target = BASE_IDX + 2 * BITS_PER_BYTE * byte_idx + 2 * bit_idx;
            let width = events[target].at.delta_since(events[target - 1].at);

            *byte <<= 1;
            if width.subsec_micros() > BIT_THRESHOLD_US {
                *byte |= 1;
            }
        }
    }

    Ok(bytes)
}

/// Checks the integrity relationship among the five decoded bytes.
///
/// Accepts iff the sum of the four data bytes equals the checksum byte.
/// The sum is deliberately not truncated to 8 bits before the comparison;
/// a frame whose data bytes sum past 255 is rejected even when the low
/// eight bits happen to match.
pub fn verify_checksum(bytes: &[u8; FRAME_BYTES]) -> Result<(), DecodeError> {
    let sum: u16 = bytes[..4].iter().map(|b| u16::from(*b)).sum();

    if sum != u16::from(bytes[4]) {
        return Err(DecodeError::ChecksumMismatch {
            sum,
            checksum: bytes[4],
        });
    }

    Ok(())
}

/// Builds a synthetic frame encoding the given five bytes, with 70 us high
/// pulses for 1 bits, 26 us for 0 bits, and 50 us gaps everywhere else.
#[cfg(test)]
pub(crate) fn synth_frame(bytes: [u8; FRAME_BYTES]) -> [EdgeEvent; TOTAL_EVENTS] {
    let mut events = [EdgeEvent {
        kind: EdgeKind::Falling,
        at: crate::event::Timestamp::new(0, 0),
    }; TOTAL_EVENTS];

    let mut nanos: u32 = 0;
    for (index, event) in events.iter_mut().enumerate() {
        let gap_us = data_pulse_index(index)
            .map(|(byte_idx, bit_idx)| {
                let bit = (bytes[byte_idx] >> (7 - bit_idx)) & 1;
                if bit == 1 { 70 } else { 26 }
            })
            .unwrap_or(50);
        nanos += gap_us * 1_000;

        event.kind = if index % 2 == 0 {
            EdgeKind::Falling
        } else {
            EdgeKind::Rising
        };
        event.at = crate::event::Timestamp::new(0, nanos);
    }

    events
}

/// Maps an event index back to `(byte, bit)` if the gap ending at that
/// index is a data-bit high pulse.
#[cfg(test)]
fn data_pulse_index(index: usize) -> Option<(usize, usize)> {
    if index < BASE_IDX || index % 2 != 0 {
        return None;
    }
    let bit_offset = (index - BASE_IDX) / 2;
    Some((bit_offset / BITS_PER_BYTE, bit_offset % BITS_PER_BYTE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Timestamp;

    // humidity 45.0, temperature 27.5, checksum 45 + 0 + 27 + 5
    const GOOD_BYTES: [u8; FRAME_BYTES] = [45, 0, 27, 5, 77];

    #[test]
    fn test_validate_accepts_well_formed_frame() {
        let events = synth_frame(GOOD_BYTES);
        assert_eq!(validate_frame(&events), Ok(()));
    }

    #[test]
    fn test_validate_rejects_short_frame() {
        let events = synth_frame(GOOD_BYTES);
        assert_eq!(
            validate_frame(&events[..TOTAL_EVENTS - 1]),
            Err(DecodeError::ShortCapture)
        );
    }

    #[test]
    fn test_validate_reports_flipped_edge_at_every_position() {
        for flip in 0..TOTAL_EVENTS {
            let mut events = synth_frame(GOOD_BYTES);
            let good_kind = events[flip].kind;
            events[flip].kind = good_kind.opposite();

            assert_eq!(
                validate_frame(&events),
                Err(DecodeError::FramingViolation {
                    index: flip,
                    expected: good_kind,
                    actual: good_kind.opposite(),
                })
            );
        }
    }

    #[test]
    fn test_decode_round_trip() {
        let events = synth_frame(GOOD_BYTES);
        assert_eq!(decode_bytes(&events), Ok(GOOD_BYTES));
    }

    #[test]
    fn test_decode_is_idempotent() {
        let events = synth_frame(GOOD_BYTES);
        assert_eq!(decode_bytes(&events), decode_bytes(&events));
    }

    #[test]
    fn test_decode_rejects_short_frame_before_indexing() {
        let events = synth_frame(GOOD_BYTES);
        assert_eq!(
            decode_bytes(&events[..TOTAL_EVENTS - 1]),
            Err(DecodeError::ShortCapture)
        );
    }

    #[test]
    fn test_threshold_is_strictly_greater() {
        // Stretch the first data-bit pulse (between events 3 and 4) to an
        // exact width; the surrounding pulses are untouched because bits
        // are measured from absolute timestamps of adjacent event pairs.
        let set_first_pulse = |width_us: u32| {
            let mut events = synth_frame([0; FRAME_BYTES]);
            events[BASE_IDX].at = Timestamp::new(0, events[BASE_IDX - 1].at.nanos + width_us * 1_000);
            events
        };

        let exactly_at_cutoff = set_first_pulse(BIT_THRESHOLD_US);
        assert_eq!(decode_bytes(&exactly_at_cutoff).unwrap()[0], 0b0000_0000);

        let just_past_cutoff = set_first_pulse(BIT_THRESHOLD_US + 1);
        assert_eq!(decode_bytes(&just_past_cutoff).unwrap()[0], 0b1000_0000);
    }

    #[test]
    fn test_checksum_accepts_exact_sum() {
        assert_eq!(verify_checksum(&GOOD_BYTES), Ok(()));
    }

    #[test]
    fn test_checksum_rejects_any_bumped_data_byte() {
        for corrupt in 0..4 {
            let mut bytes = GOOD_BYTES;
            bytes[corrupt] += 1;

            assert_eq!(
                verify_checksum(&bytes),
                Err(DecodeError::ChecksumMismatch {
                    sum: 78,
                    checksum: 77,
                })
            );
        }
    }

    #[test]
    fn test_checksum_sum_is_not_truncated() {
        // 200 * 4 = 800; the low eight bits are 32, so the truncated rule
        // would accept this frame. The untruncated comparison must not.
        let bytes = [200, 200, 200, 200, 32];
        assert_eq!(
            verify_checksum(&bytes),
            Err(DecodeError::ChecksumMismatch {
                sum: 800,
                checksum: 32,
            })
        );
    }
}
