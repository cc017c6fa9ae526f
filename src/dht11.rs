use crate::decode::{self, FRAME_BYTES, TOTAL_EVENTS};
use crate::error::{DecodeError, Dht11Error};
use crate::event::{EdgeEvent, EdgeKind, Timestamp};

/// Blocking source of timestamped edge events.
///
/// Implemented by the hardware-facing layer, typically over a GPIO
/// character-device line requested for both-edge events after the start
/// signal has been sent.
pub trait EdgeSource {
    type Error;

    /// Reads pending edge events into `buf`, blocking until at least one is
    /// available, and returns how many were written.
    ///
    /// Events must be delivered in arrival order and a single call may
    /// return fewer events than `buf` has room for; the driver keeps
    /// calling until a full frame has accumulated. Returning `Ok(0)` means
    /// the source is exhausted and no further events will arrive.
    fn read_events(&mut self, buf: &mut [EdgeEvent]) -> Result<usize, Self::Error>;
}

/// Wall-clock provider used to stamp successful measurements.
pub trait WallClock {
    /// Current time as seconds since the Unix epoch.
    fn now(&mut self) -> i64;
}

/// Driver for the DHT11 temperature and humidity sensor, reading from a
/// captured stream of edge events.
pub struct Dht11<SRC, CLK> {
    source: SRC,
    clock: CLK,
}

/// A successfully decoded sensor reading.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Measurement {
    /// Relative humidity in percent.
    pub humidity: f32,
    /// Temperature in degrees Celsius.
    pub temperature_celsius: f32,
    /// Wall-clock time of the read, in seconds since the Unix epoch.
    pub captured_at: i64,
}

impl Measurement {
    /// Temperature in degrees Fahrenheit, derived from the Celsius value.
    pub fn temperature_fahrenheit(&self) -> f32 {
        1.8 * self.temperature_celsius + 32.0
    }

    fn from_bytes(bytes: &[u8; FRAME_BYTES], captured_at: i64) -> Self {
        let humidity = f32::from(bytes[0]) + 0.1 * f32::from(bytes[1]);
        let temperature_celsius = f32::from(bytes[2]) + 0.1 * f32::from(bytes[3]);

        Measurement {
            humidity,
            temperature_celsius,
            captured_at,
        }
    }
}

impl<SRC, CLK> Dht11<SRC, CLK>
where
    SRC: EdgeSource,
    CLK: WallClock,
{
    /// Creates a new instance of the DHT11 driver.
    ///
    /// # Arguments
    ///
    /// * `source` - The edge-event source for the sensor's data line.
    /// * `clock` - A wall-clock provider for stamping measurements.
    pub fn new(source: SRC, clock: CLK) -> Self {
        Dht11 { source, clock }
    }

    /// Performs one capture-and-decode cycle.
    ///
    /// Collects edge events from the source until a full frame of
    /// [`TOTAL_EVENTS`] is held, then validates the framing, extracts the
    /// five bytes, checks the checksum, and composes the measurement. Each
    /// stage runs exactly once; the first failure ends the attempt, and
    /// retrying is left to the caller.
    ///
    /// # Returns
    ///
    /// * `Ok(Measurement)` if a full frame was captured and decoded.
    /// * `Err(Dht11Error)` on a source failure or an invalid frame.
    pub fn read(&mut self) -> Result<Measurement, Dht11Error<SRC::Error>> {
        let events = self.capture()?;

        decode::validate_frame(&events).map_err(Dht11Error::Decode)?;
        let bytes = decode::decode_bytes(&events).map_err(Dht11Error::Decode)?;
        decode::verify_checksum(&bytes).map_err(Dht11Error::Decode)?;

        Ok(Measurement::from_bytes(&bytes, self.clock.now()))
    }

    /// Accumulates exactly one frame's worth of events, concatenating
    /// partial reads in arrival order.
    fn capture(&mut self) -> Result<[EdgeEvent; TOTAL_EVENTS], Dht11Error<SRC::Error>> {
        const UNFILLED: EdgeEvent = EdgeEvent {
            kind: EdgeKind::Falling,
            at: Timestamp::new(0, 0),
        };
        let mut events = [UNFILLED; TOTAL_EVENTS];

        let mut filled = 0;
        while filled < events.len() {
            let read = self.source.read_events(&mut events[filled..])?;
            if read == 0 {
                return Err(Dht11Error::Decode(DecodeError::ShortCapture));
            }
            filled += read;
        }

        Ok(events)
    }
}
