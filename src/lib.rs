//! DHT11 Edge-Event Reader
//!
//! This crate decodes transmissions from the DHT11 temperature and humidity
//! sensor out of a captured sequence of timestamped GPIO edge events,
//! rather than by bit-banging the line. The caller owns the hardware: it
//! sends the start signal, switches the line to both-edge input, and feeds
//! the recorded events to the driver, which validates the framing, decodes
//! the 40 data bits from pulse widths, checks the checksum, and produces a
//! timestamped measurement.
//!
//! # Structure
//! - [`Dht11`] orchestrates one capture-and-decode cycle over two caller
//!   capabilities: an [`EdgeSource`] delivering edge events (possibly in
//!   partial batches) and a [`WallClock`] for stamping results.
//! - [`decode`] holds the pure pipeline (frame validation, bit extraction,
//!   checksum) and is usable on its own against recorded event slices.
//! - [`trigger`] sends the start signal through the `embedded-hal`
//!   [`OutputPin`] and [`DelayNs`] traits.
//!
//! # Optional Features
//! - `defmt`: Implements `defmt::Format` on the data and error types for
//!   logging support
//!
//! [`OutputPin`]: embedded_hal::digital::OutputPin
//! [`DelayNs`]: embedded_hal::delay::DelayNs

#![cfg_attr(not(test), no_std)]

pub mod decode;
pub mod dht11;
pub mod error;
pub mod event;
pub mod trigger;

pub use decode::{BIT_THRESHOLD_US, TOTAL_EVENTS};
pub use dht11::{Dht11, EdgeSource, Measurement, WallClock};
pub use error::{DecodeError, Dht11Error};
pub use event::{EdgeEvent, EdgeKind, TimeDelta, Timestamp};
