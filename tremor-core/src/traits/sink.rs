//! Reading observer trait

use crate::detector::TremorReading;

/// Receives every reading the detector publishes
///
/// The presenter side of the watch implements this. Readings are whole
/// snapshots, a sink that falls behind may drop all but the latest.
pub trait ReadingSink {
    /// Publish a new `(level, detected)` snapshot
    fn publish(&mut self, reading: TremorReading);
}

/// Discards readings
impl ReadingSink for () {
    fn publish(&mut self, _reading: TremorReading) {}
}

impl<T: ReadingSink + ?Sized> ReadingSink for &mut T {
    fn publish(&mut self, reading: TremorReading) {
        (**self).publish(reading)
    }
}
