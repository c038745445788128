//! Tremor detector
//!
//! The tremor signal is the Euclidean norm of the difference between two
//! consecutive samples, a cheap derivative-of-acceleration proxy. Detection
//! is debounced: the signal must stay above the threshold on every sample
//! for longer than the duration gate before the flag is raised, and a single
//! sample at or below the threshold clears it again.
//!
//! Time is a monotonic millisecond count supplied by the caller, so the
//! detector runs identically on the watch and in host tests.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::sample::Sample;
use crate::config::DetectorConfig;

/// Published detector output
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TremorReading {
    /// Last computed delta magnitude (g)
    pub level: f32,
    /// Debounced detection flag
    pub detected: bool,
}

impl TremorReading {
    /// Create a reading
    pub const fn new(level: f32, detected: bool) -> Self {
        Self { level, detected }
    }
}

/// Stateful tremor detector
///
/// Not reentrant: a single delivery context must own it and feed samples
/// one at a time.
#[derive(Debug, Clone)]
pub struct TremorDetector {
    config: DetectorConfig,
    /// Last sample seen, `None` before the first sample of a stream
    previous: Option<Sample>,
    /// Time the current above-threshold streak began
    tremor_start_ms: Option<u64>,
    /// Last computed magnitude
    level: f32,
    /// Last computed detection flag
    detected: bool,
}

impl Default for TremorDetector {
    fn default() -> Self {
        Self::new(DetectorConfig::default())
    }
}

impl TremorDetector {
    /// Create a detector with the given tuning
    pub fn new(config: DetectorConfig) -> Self {
        Self {
            config,
            previous: None,
            tremor_start_ms: None,
            level: 0.0,
            detected: false,
        }
    }

    /// Process one sample
    ///
    /// # Arguments
    /// - `sample`: acceleration in g
    /// - `now_ms`: monotonic processing time in milliseconds
    ///
    /// The first sample of a stream only primes the detector and returns the
    /// current reading unchanged; `level` keeps whatever value it had.
    pub fn update(&mut self, sample: Sample, now_ms: u64) -> TremorReading {
        let Some(previous) = self.previous.replace(sample) else {
            return self.reading();
        };

        let magnitude = sample.delta(&previous).norm();

        if magnitude > self.config.threshold_g {
            match self.tremor_start_ms {
                None => {
                    // First sample of a streak never raises the flag itself
                    self.tremor_start_ms = Some(now_ms);
                }
                Some(start_ms) => {
                    if now_ms.saturating_sub(start_ms) > u64::from(self.config.gate_ms) {
                        self.detected = true;
                    }
                }
            }
        } else {
            // No hysteresis: one quiet sample ends the streak
            self.tremor_start_ms = None;
            self.detected = false;
        }

        self.level = magnitude;
        self.reading()
    }

    /// Prepare for a fresh sample stream
    ///
    /// Forgets the previous sample so the first delta is never computed
    /// across a stop/start gap. `level` and the streak are left alone.
    pub fn begin_stream(&mut self) {
        self.previous = None;
    }

    /// End the current sample stream
    ///
    /// Clears the streak and the detection flag. `previous` and `level` are
    /// kept; calling this twice is the same as calling it once.
    pub fn end_stream(&mut self) {
        self.tremor_start_ms = None;
        self.detected = false;
    }

    /// Current `(level, detected)` snapshot
    pub fn reading(&self) -> TremorReading {
        TremorReading::new(self.level, self.detected)
    }

    /// Last computed magnitude
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Debounced detection flag
    pub fn is_detected(&self) -> bool {
        self.detected
    }

    /// Start time of the current above-threshold streak
    pub fn tremor_start_ms(&self) -> Option<u64> {
        self.tremor_start_ms
    }

    /// Whether a previous sample is held for the next delta
    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    /// Active tuning
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Alternating samples give a delta norm of exactly `step` every time
    fn alternating(step: f32, i: usize) -> Sample {
        if i % 2 == 0 {
            Sample::ZERO
        } else {
            Sample::new(step, 0.0, 0.0)
        }
    }

    #[test]
    fn test_first_sample_primes_only() {
        let mut detector = TremorDetector::default();
        let reading = detector.update(Sample::new(0.3, -0.2, 1.0), 0);

        assert_eq!(reading, TremorReading::new(0.0, false));
        assert!(detector.has_previous());
        assert_eq!(detector.tremor_start_ms(), None);
    }

    #[test]
    fn test_streak_shorter_than_gate() {
        // Deltas [0.2, 0.2, 0.2] spaced 0.4s apart, streak lasts 0.8s
        let mut detector = TremorDetector::default();
        detector.update(alternating(0.2, 0), 0);

        for i in 1..=3 {
            let reading = detector.update(alternating(0.2, i), i as u64 * 400);
            assert!(!reading.detected);
        }
        assert_eq!(detector.tremor_start_ms(), Some(400));
    }

    #[test]
    fn test_streak_longer_than_gate() {
        // Four 0.2 deltas spaced 0.4s apart, streak reaches 1.2s
        let mut detector = TremorDetector::default();
        detector.update(alternating(0.2, 0), 0);

        let mut flags = [false; 4];
        for i in 1..=4 {
            flags[i - 1] = detector.update(alternating(0.2, i), i as u64 * 400).detected;
        }

        assert_eq!(flags, [false, false, false, true]);
        assert!(libm::fabsf(detector.level() - 0.2) < 1e-6);
    }

    #[test]
    fn test_quiet_sample_clears_streak() {
        let mut detector = TremorDetector::default();
        detector.update(Sample::new(0.0, 0.0, 0.0), 0);
        detector.update(Sample::new(0.2, 0.0, 0.0), 50);
        assert_eq!(detector.tremor_start_ms(), Some(50));

        let reading = detector.update(Sample::new(0.25, 0.0, 0.0), 100);

        assert!(!reading.detected);
        assert_eq!(detector.tremor_start_ms(), None);
        assert!(libm::fabsf(reading.level - 0.05) < 1e-6);
    }

    #[test]
    fn test_quiet_sample_clears_detection() {
        let mut detector = TremorDetector::default();
        detector.update(alternating(0.3, 0), 0);
        for i in 1..=5 {
            detector.update(alternating(0.3, i), i as u64 * 500);
        }
        assert!(detector.is_detected());

        // Repeat the last sample: zero delta
        let reading = detector.update(alternating(0.3, 5), 3000);
        assert!(!reading.detected);
        assert_eq!(reading.level, 0.0);
        assert_eq!(detector.tremor_start_ms(), None);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        // Magnitude exactly at threshold counts as quiet
        let config = DetectorConfig::new(0.5, 1000, 50);
        let mut detector = TremorDetector::new(config);
        detector.update(Sample::ZERO, 0);
        detector.update(Sample::new(0.5, 0.0, 0.0), 50);
        assert_eq!(detector.tremor_start_ms(), None);
    }

    #[test]
    fn test_gate_is_exclusive() {
        let mut detector = TremorDetector::default();
        detector.update(alternating(0.2, 0), 0);
        detector.update(alternating(0.2, 1), 100);

        // Exactly 1000ms after the streak began
        assert!(!detector.update(alternating(0.2, 2), 1100).detected);
        assert!(detector.update(alternating(0.2, 3), 1101).detected);
    }

    #[test]
    fn test_detection_holds_while_streak_continues() {
        let mut detector = TremorDetector::default();
        detector.update(alternating(0.2, 0), 0);
        for i in 1..=10 {
            detector.update(alternating(0.2, i), i as u64 * 300);
        }
        assert!(detector.is_detected());
        assert_eq!(detector.tremor_start_ms(), Some(300));
    }

    #[test]
    fn test_end_stream_is_idempotent() {
        let mut detector = TremorDetector::default();
        detector.update(alternating(0.2, 0), 0);
        for i in 1..=4 {
            detector.update(alternating(0.2, i), i as u64 * 400);
        }
        assert!(detector.is_detected());

        detector.end_stream();
        let once = (detector.tremor_start_ms(), detector.is_detected(), detector.level());
        detector.end_stream();
        let twice = (detector.tremor_start_ms(), detector.is_detected(), detector.level());

        assert_eq!(once, (None, false, detector.level()));
        assert_eq!(once, twice);
        // previous survives stop
        assert!(detector.has_previous());
    }

    #[test]
    fn test_begin_stream_keeps_stale_level() {
        let mut detector = TremorDetector::default();
        detector.update(Sample::ZERO, 0);
        detector.update(Sample::new(0.0, 0.3, 0.0), 50);
        let level = detector.level();

        detector.end_stream();
        detector.begin_stream();
        assert!(!detector.has_previous());

        // First sample after restart leaves the old level in place
        let reading = detector.update(Sample::new(1.0, 1.0, 1.0), 5000);
        assert_eq!(reading.level, level);
        assert!(!reading.detected);
    }

    #[test]
    fn test_non_monotonic_clock_never_detects() {
        let mut detector = TremorDetector::default();
        detector.update(alternating(0.2, 0), 10_000);
        detector.update(alternating(0.2, 1), 10_000);
        detector.update(alternating(0.2, 2), 5_000);
        assert!(!detector.is_detected());
    }
}
