//! Keypress intensity profile over the seconds of a minute.
//!
//! Each key event increments the slot for its second-of-minute
//! (`floor(timestamp) mod 60`). Slots are never reset, so the profile is a
//! smeared picture of when in the minute typing tends to happen rather than a
//! sliding window over the last sixty seconds.

use serde::Serialize;

/// Number of slots in the histogram, one per second of a minute.
pub const HISTOGRAM_SIZE: usize = 60;

/// Relative intensity of a histogram slot, used for color banding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IntensityBand {
    Low,
    Medium,
    High,
}

impl IntensityBand {
    /// Classifies a normalized intensity in `[0, 1]`.
    pub fn from_intensity(intensity: f64) -> Self {
        if intensity < 0.3 {
            IntensityBand::Low
        } else if intensity < 0.7 {
            IntensityBand::Medium
        } else {
            IntensityBand::High
        }
    }
}

#[derive(Debug, Clone)]
pub struct ActivityHistogram {
    buckets: [u64; HISTOGRAM_SIZE],
}

impl ActivityHistogram {
    pub fn new() -> Self {
        Self {
            buckets: [0; HISTOGRAM_SIZE],
        }
    }

    /// Increments the slot for the second-of-minute of `timestamp`.
    pub fn increment(&mut self, timestamp: f64) {
        self.buckets[slot_for(timestamp)] += 1;
    }

    pub fn snapshot(&self) -> HistogramSnapshot {
        HistogramSnapshot {
            buckets: self.buckets,
            max: self.buckets.iter().copied().max().unwrap_or(0),
        }
    }
}

impl Default for ActivityHistogram {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable copy of the histogram with its maximum for normalization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramSnapshot {
    #[serde(with = "buckets_serde")]
    pub buckets: [u64; HISTOGRAM_SIZE],
    pub max: u64,
}

impl HistogramSnapshot {
    /// Slot value divided by the maximum, `0.0` when nothing was recorded.
    pub fn intensity(&self, slot: usize) -> f64 {
        if self.max == 0 {
            return 0.0;
        }
        self.buckets[slot % HISTOGRAM_SIZE] as f64 / self.max as f64
    }

    pub fn band(&self, slot: usize) -> IntensityBand {
        IntensityBand::from_intensity(self.intensity(slot))
    }

    pub fn total(&self) -> u64 {
        self.buckets.iter().sum()
    }
}

fn slot_for(timestamp: f64) -> usize {
    // rem_euclid keeps pre-epoch timestamps in range
    (timestamp.floor().rem_euclid(HISTOGRAM_SIZE as f64)) as usize % HISTOGRAM_SIZE
}

mod buckets_serde {
    use super::HISTOGRAM_SIZE;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(buckets: &[u64; HISTOGRAM_SIZE], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(buckets.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increment_uses_second_of_minute() {
        let mut histogram = ActivityHistogram::new();
        histogram.increment(0.0);
        histogram.increment(61.9);
        histogram.increment(125.0);

        let snapshot = histogram.snapshot();
        assert_eq!(snapshot.buckets[0], 1);
        assert_eq!(snapshot.buckets[1], 1);
        assert_eq!(snapshot.buckets[5], 1);
        assert_eq!(snapshot.total(), 3);
    }

    #[test]
    fn test_wraparound_accumulates_without_reset() {
        let mut histogram = ActivityHistogram::new();
        histogram.increment(10.2);
        histogram.increment(70.7);
        histogram.increment(130.0);

        let snapshot = histogram.snapshot();
        assert_eq!(snapshot.buckets[10], 3);
        assert_eq!(snapshot.max, 3);
    }

    #[test]
    fn test_intensity_and_bands() {
        let mut histogram = ActivityHistogram::new();
        for _ in 0..10 {
            histogram.increment(3.0);
        }
        for _ in 0..5 {
            histogram.increment(4.0);
        }
        histogram.increment(5.0);

        let snapshot = histogram.snapshot();
        assert_eq!(snapshot.intensity(3), 1.0);
        assert_eq!(snapshot.band(3), IntensityBand::High);
        assert_eq!(snapshot.band(4), IntensityBand::Medium);
        assert_eq!(snapshot.band(5), IntensityBand::Low);
        assert_eq!(snapshot.intensity(6), 0.0);
    }

    #[test]
    fn test_empty_snapshot_has_zero_intensity() {
        let snapshot = ActivityHistogram::new().snapshot();
        assert_eq!(snapshot.max, 0);
        assert_eq!(snapshot.intensity(0), 0.0);
    }
}
