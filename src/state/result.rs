// Test result structures

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome status of a finished node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TestStatus {
    Successful,
    Failed,
    Aborted,
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Successful => "SUCCESSFUL",
            Self::Failed => "FAILED",
            Self::Aborted => "ABORTED",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for TestStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "successful" | "success" | "pass" | "passed" => Ok(Self::Successful),
            "failed" | "fail" => Ok(Self::Failed),
            "aborted" | "abort" => Ok(Self::Aborted),
            other => Err(format!("unknown test status '{}'", other)),
        }
    }
}

/// Test result handed to the reporter when a node finishes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestResult {
    pub status: TestStatus,
    pub cause: Option<String>,
}

impl TestResult {
    pub fn new(status: TestStatus, cause: Option<String>) -> Self {
        Self { status, cause }
    }

    /// Create a successful result
    pub fn successful() -> Self {
        Self::new(TestStatus::Successful, None)
    }

    /// Create a failed result
    pub fn failed(cause: impl Into<String>) -> Self {
        Self::new(TestStatus::Failed, Some(cause.into()))
    }

    /// Create an aborted result
    pub fn aborted(cause: impl Into<String>) -> Self {
        Self::new(TestStatus::Aborted, Some(cause.into()))
    }

    pub fn status(&self) -> TestStatus {
        self.status
    }

    pub fn cause(&self) -> Option<&str> {
        self.cause.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_test_result_successful() {
        let result = TestResult::successful();
        assert_eq!(result.status(), TestStatus::Successful);
        assert!(result.cause().is_none());
    }

    #[test]
    fn test_test_result_failed() {
        let result = TestResult::failed("assertion failed");
        assert_eq!(result.status(), TestStatus::Failed);
        assert_eq!(result.cause(), Some("assertion failed"));
    }

    #[test]
    fn test_test_result_aborted() {
        let result = TestResult::aborted("timeout");
        assert_eq!(result.status(), TestStatus::Aborted);
        assert_eq!(result.cause(), Some("timeout"));
    }

    #[test]
    fn test_status_display() {
        assert_eq!(TestStatus::Successful.to_string(), "SUCCESSFUL");
        assert_eq!(TestStatus::Failed.to_string(), "FAILED");
        assert_eq!(TestStatus::Aborted.to_string(), "ABORTED");
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("FAILED".parse::<TestStatus>(), Ok(TestStatus::Failed));
        assert_eq!("pass".parse::<TestStatus>(), Ok(TestStatus::Successful));
        assert_eq!("Aborted".parse::<TestStatus>(), Ok(TestStatus::Aborted));
        assert!("flaky".parse::<TestStatus>().is_err());
    }
}
