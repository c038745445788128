//! Detection session
//!
//! Binds a [`TremorDetector`] to a [`SensorSource`] and publishes every new
//! reading to a [`ReadingSink`].
//!
//! The session carries an explicit active flag that is checked on entry to
//! every delivery. A sample that arrives after `stop()` (for example one
//! already queued by the sampler) is dropped instead of touching the
//! detector.
//!
//! Precondition: all calls for one session come from a single task.

use crate::config::DetectorConfig;
use crate::detector::{Sample, TremorDetector, TremorReading};
use crate::traits::{ReadingSink, SensorError, SensorSource};

/// Errors surfaced by [`DetectionSession::start`]
///
/// Both are diagnostics: the caller logs them and carries on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionError {
    /// The source reported no sensor
    CapabilityUnavailable,
    /// The source refused the subscription
    Sensor(SensorError),
}

impl From<SensorError> for SessionError {
    fn from(e: SensorError) -> Self {
        SessionError::Sensor(e)
    }
}

/// Outcome of a single delivery
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Delivery {
    /// Session not running, nothing processed
    Ignored,
    /// Source reported an error, detector untouched
    Skipped(SensorError),
    /// Sample processed and reading published
    Published(TremorReading),
}

/// A detector fed by a sensor source
pub struct DetectionSession<S> {
    source: S,
    detector: TremorDetector,
    active: bool,
}

impl<S: SensorSource> DetectionSession<S> {
    /// Create an idle session
    pub fn new(source: S, config: DetectorConfig) -> Self {
        Self {
            source,
            detector: TremorDetector::new(config),
            active: false,
        }
    }

    /// Start detection
    ///
    /// Does nothing if already running. If the sensor is missing the
    /// session stays idle and [`SessionError::CapabilityUnavailable`] is
    /// returned for the caller to report.
    pub fn start(&mut self) -> Result<(), SessionError> {
        if self.active {
            return Ok(());
        }

        if !self.source.is_available() {
            return Err(SessionError::CapabilityUnavailable);
        }

        self.detector.begin_stream();
        self.source.subscribe(self.detector.config().interval_ms)?;
        self.active = true;

        Ok(())
    }

    /// Stop detection
    ///
    /// Unsubscribes from the source and clears the streak and detection
    /// flag. Safe to call repeatedly.
    pub fn stop(&mut self) {
        if self.active {
            self.source.unsubscribe();
            self.active = false;
        }
        self.detector.end_stream();
    }

    /// Feed one delivery from the source
    ///
    /// # Arguments
    /// - `delivery`: the sample, or the error the source reported instead
    /// - `now_ms`: monotonic processing time in milliseconds
    /// - `sink`: receives the new reading when a sample is processed
    pub fn deliver<K: ReadingSink>(
        &mut self,
        delivery: Result<Sample, SensorError>,
        now_ms: u64,
        mut sink: K,
    ) -> Delivery {
        if !self.active {
            return Delivery::Ignored;
        }

        match delivery {
            Ok(sample) => {
                let reading = self.detector.update(sample, now_ms);
                sink.publish(reading);
                Delivery::Published(reading)
            }
            // No retry, the next delivery resumes normally
            Err(e) => Delivery::Skipped(e),
        }
    }

    /// Read one sample from the source and deliver it
    pub fn poll<K: ReadingSink>(&mut self, now_ms: u64, sink: K) -> Delivery {
        if !self.active {
            return Delivery::Ignored;
        }

        let delivery = self.source.read_sample();
        self.deliver(delivery, now_ms, sink)
    }

    /// Whether samples are currently being processed
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Current `(level, detected)` snapshot
    pub fn reading(&self) -> TremorReading {
        self.detector.reading()
    }

    /// Access the detector
    pub fn detector(&self) -> &TremorDetector {
        &self.detector
    }

    /// Access the underlying source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Mutable access to the underlying source
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}
