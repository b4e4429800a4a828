//! Final classification of an audited run.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Overall consensus verdict, best first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    /// Full set agreement, identical order, no duplicates, clean sequences.
    Perfect,
    /// Consensus rate at or above the strong threshold. Order, duplicate and
    /// sequence findings are not considered at this level.
    Strong,
    /// Consensus rate below the strong threshold.
    Partial,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Perfect => "PERFECT",
            Self::Strong => "STRONG",
            Self::Partial => "PARTIAL",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
