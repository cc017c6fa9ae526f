use embedded_hal::{delay::DelayNs, digital::OutputPin};

/// Default time to hold the data line low when initiating a read, in
/// microseconds.
///
/// The datasheet asks for an 18 ms hold, but the sensor starts answering
/// well before that and an 18 ms hold misses the leading response edges.
/// A 180 us hold reliably triggers a complete response.
pub const DEFAULT_HOLD_PERIOD_US: u32 = 180;

/// Sends the start signal that makes the sensor begin a transmission.
///
/// Drives the line high (its idle state), holds it low for
/// `hold_period_us`, then releases it high again. The caller must switch
/// the line to edge-triggered input immediately afterwards so the
/// response edges are captured.
pub fn send_start_signal<PIN, DELAY>(
    pin: &mut PIN,
    delay: &mut DELAY,
    hold_period_us: u32,
) -> Result<(), PIN::Error>
where
    PIN: OutputPin,
    DELAY: DelayNs,
{
    pin.set_high()?;
    pin.set_low()?;
    delay.delay_us(hold_period_us);
    pin.set_high()?;

    Ok(())
}
