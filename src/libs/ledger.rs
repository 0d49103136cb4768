//! Bounded per-application time ledger.
//!
//! Maps a window label to the seconds of continuous activity attributed to it.
//! The number of distinct labels is capped; once the cap is reached, time for
//! labels that have never been seen is dropped while known labels keep
//! accruing. Dropping is a policy, not an error, so nothing is reported.

/// Default maximum number of distinct window labels.
pub const DEFAULT_LEDGER_CAPACITY: usize = 100;

/// Accumulated seconds per window label, in insertion order.
#[derive(Debug, Clone)]
pub struct WindowTimeLedger {
    capacity: usize,
    entries: Vec<(String, f64)>,
}

impl WindowTimeLedger {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Vec::new(),
        }
    }

    /// Adds `seconds` to `label`.
    ///
    /// Returns `false` when the label is new and the ledger is already full,
    /// in which case nothing is recorded.
    pub fn add(&mut self, label: &str, seconds: f64) -> bool {
        if let Some((_, total)) = self.entries.iter_mut().find(|(l, _)| l == label) {
            *total += seconds;
            return true;
        }
        if self.entries.len() < self.capacity {
            self.entries.push((label.to_string(), seconds));
            return true;
        }
        false
    }

    /// Returns up to `n` entries ordered by accumulated seconds, largest first.
    ///
    /// Ties keep insertion order since the sort is stable.
    pub fn top_n(&self, n: usize) -> Vec<(String, f64)> {
        let mut sorted = self.entries.clone();
        sorted.sort_by(|a, b| b.1.total_cmp(&a.1));
        sorted.truncate(n);
        sorted
    }

    pub fn get(&self, label: &str) -> Option<f64> {
        self.entries.iter().find(|(l, _)| l == label).map(|(_, s)| *s)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for WindowTimeLedger {
    fn default() -> Self {
        Self::new(DEFAULT_LEDGER_CAPACITY)
    }
}
