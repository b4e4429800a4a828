//! Summary statistics over per-node counts.

use serde::{Deserialize, Serialize};

/// Min / max / mean of a set of counts.
///
/// All three are zero for an empty input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CountSummary {
    pub min: usize,
    pub max: usize,
    pub avg: f64,
}

impl CountSummary {
    pub fn from_counts<I>(counts: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        let mut min = usize::MAX;
        let mut max = 0;
        let mut total: u128 = 0;
        let mut n: usize = 0;
        for count in counts {
            min = min.min(count);
            max = max.max(count);
            total += count as u128;
            n += 1;
        }
        if n == 0 {
            return Self::default();
        }
        Self {
            min,
            max,
            avg: total as f64 / n as f64,
        }
    }

    /// Whether every count was the same.
    pub fn is_uniform(&self) -> bool {
        self.min == self.max
    }
}
