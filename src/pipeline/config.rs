#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};

/// Knobs controlling a batch run.
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Number of worker threads. Zero is treated as one.
    pub concurrency: usize,
    /// Verification starts admitted per second across all workers; 0 means
    /// unlimited.
    pub rate_per_second: u32,
    pub smtp_check: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            concurrency: 8,
            rate_per_second: 0,
            smtp_check: false,
        }
    }
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn with_rate(mut self, rate_per_second: u32) -> Self {
        self.rate_per_second = rate_per_second;
        self
    }

    pub fn with_smtp_check(mut self, enabled: bool) -> Self {
        self.smtp_check = enabled;
        self
    }

    pub fn workers(&self) -> usize {
        self.concurrency.max(1)
    }
}
