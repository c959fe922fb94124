use serde::{Deserialize, Serialize};

/// Tuning knobs for a [`DocumentStore`](crate::DocumentStore).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreOptions {
    /// Maximum number of item fetches in flight during a container scan.
    pub scan_concurrency: usize,
    /// How many times sequential posting rescans and retries after losing a
    /// name to a concurrent writer.
    pub post_attempts: u32,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            scan_concurrency: 8,
            post_attempts: 3,
        }
    }
}

impl StoreOptions {
    /// Strictly sequential scans and a single posting attempt.
    pub fn sequential() -> Self {
        Self {
            scan_concurrency: 1,
            post_attempts: 1,
        }
    }

    /// Clamp zero values up to one.
    pub fn normalized(self) -> Self {
        Self {
            scan_concurrency: self.scan_concurrency.max(1),
            post_attempts: self.post_attempts.max(1),
        }
    }
}
