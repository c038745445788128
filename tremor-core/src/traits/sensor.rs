//! Accelerometer source trait

use crate::detector::Sample;

/// Errors that can occur with acceleration sensing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Sensor did not answer or reported the wrong identity
    NotPresent,
    /// No new sample since the last read
    NotReady,
    /// Bus transaction failed
    Bus,
    /// Requested interval or range is not supported
    InvalidConfig,
}

/// Trait for 3-axis acceleration sources
///
/// Implementations deliver samples in units of standard gravity. Delivery
/// is pull-based: the owner of the source calls [`read_sample`] at the
/// interval it asked for in [`subscribe`]. The requested interval is a
/// hint, actual spacing may jitter.
///
/// [`read_sample`]: SensorSource::read_sample
/// [`subscribe`]: SensorSource::subscribe
pub trait SensorSource {
    /// Check whether the sensor is fitted and answering
    ///
    /// Takes `&mut self` because probing typically requires a bus read.
    fn is_available(&mut self) -> bool;

    /// Start producing samples at roughly `interval_ms`
    fn subscribe(&mut self, interval_ms: u32) -> Result<(), SensorError>;

    /// Stop producing samples
    fn unsubscribe(&mut self);

    /// Read the most recent sample
    fn read_sample(&mut self) -> Result<Sample, SensorError>;
}

impl<T: SensorSource + ?Sized> SensorSource for &mut T {
    fn is_available(&mut self) -> bool {
        (**self).is_available()
    }

    fn subscribe(&mut self, interval_ms: u32) -> Result<(), SensorError> {
        (**self).subscribe(interval_ms)
    }

    fn unsubscribe(&mut self) {
        (**self).unsubscribe()
    }

    fn read_sample(&mut self) -> Result<Sample, SensorError> {
        (**self).read_sample()
    }
}
