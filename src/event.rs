/// Direction of a voltage transition on the data line.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeKind {
    /// The line went from low to high.
    Rising,
    /// The line went from high to low.
    Falling,
}

impl EdgeKind {
    /// Returns the other edge kind.
    pub const fn opposite(self) -> Self {
        match self {
            EdgeKind::Rising => EdgeKind::Falling,
            EdgeKind::Falling => EdgeKind::Rising,
        }
    }
}

/// A monotonic point in time with nanosecond resolution.
///
/// Captured by the edge-event source when an edge occurs; immutable
/// afterwards. `nanos` is the sub-second part and must be below
/// 1_000_000_000.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timestamp {
    /// Whole seconds.
    pub secs: i64,
    /// Sub-second part, in nanoseconds.
    pub nanos: u32,
}

impl Timestamp {
    pub const fn new(secs: i64, nanos: u32) -> Self {
        Timestamp { secs, nanos }
    }

    /// Returns the time elapsed from `start` to `self`.
    ///
    /// When the sub-second parts would subtract below zero, one second is
    /// borrowed so that the result's `nanos` stays in `0..1_000_000_000`.
    ///
    /// `self` must not be earlier than `start`; the result is meaningless
    /// otherwise (the seconds field can go negative).
    pub const fn delta_since(self, start: Timestamp) -> TimeDelta {
        if self.nanos < start.nanos {
            TimeDelta {
                secs: self.secs - start.secs - 1,
                nanos: self.nanos + 1_000_000_000 - start.nanos,
            }
        } else {
            TimeDelta {
                secs: self.secs - start.secs,
                nanos: self.nanos - start.nanos,
            }
        }
    }
}

/// Duration between two [`Timestamp`]s.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeDelta {
    pub secs: i64,
    pub nanos: u32,
}

impl TimeDelta {
    /// The sub-second part of the delta, in whole microseconds.
    ///
    /// Pulse widths in the DHT11 protocol are well under a second, so bit
    /// classification looks only at this value.
    pub const fn subsec_micros(self) -> u32 {
        self.nanos / 1_000
    }
}

/// One recorded transition of the data line.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EdgeEvent {
    pub kind: EdgeKind,
    pub at: Timestamp,
}
