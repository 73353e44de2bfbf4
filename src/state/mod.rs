// State module - nodes, results and run counters

pub mod node;
pub mod result;

pub use node::{Node, TestNode};
pub use result::{TestResult, TestStatus};

use serde::Serialize;

/// Outcome counters for one initialize → terminate cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunCounters {
    aborted: usize,
    failed: usize,
    skipped: usize,
    successful: usize,
}

impl RunCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a finished node by its status
    pub fn record(&mut self, status: TestStatus) {
        match status {
            TestStatus::Aborted => self.aborted += 1,
            TestStatus::Failed => self.failed += 1,
            TestStatus::Successful => self.successful += 1,
        }
    }

    pub fn record_skipped(&mut self) {
        self.skipped += 1;
    }

    pub fn total(&self) -> usize {
        self.aborted + self.failed + self.skipped + self.successful
    }

    pub fn aborted(&self) -> usize {
        self.aborted
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn successful(&self) -> usize {
        self.successful
    }

    /// Run summary written to the root log at termination
    pub fn summary(&self) -> String {
        format!(
            "{} tests executed, {} aborted, {} skipped, {} failed",
            self.total(),
            self.aborted,
            self.skipped,
            self.failed
        )
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_each_status() {
        let mut counters = RunCounters::new();
        counters.record(TestStatus::Aborted);
        counters.record(TestStatus::Failed);
        counters.record(TestStatus::Failed);
        counters.record(TestStatus::Successful);
        counters.record_skipped();

        assert_eq!(counters.aborted(), 1);
        assert_eq!(counters.failed(), 2);
        assert_eq!(counters.successful(), 1);
        assert_eq!(counters.skipped(), 1);
        assert_eq!(counters.total(), 5);
    }

    #[test]
    fn test_summary() {
        let mut counters = RunCounters::new();
        counters.record(TestStatus::Successful);
        counters.record(TestStatus::Failed);
        counters.record_skipped();

        assert_eq!(
            counters.summary(),
            "3 tests executed, 0 aborted, 1 skipped, 1 failed"
        );
    }

    #[test]
    fn test_reset() {
        let mut counters = RunCounters::new();
        counters.record(TestStatus::Aborted);
        counters.record_skipped();
        counters.reset();

        assert_eq!(counters, RunCounters::default());
        assert_eq!(counters.total(), 0);
    }
}
