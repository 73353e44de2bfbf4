pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod replay;
pub mod report;
pub mod state;
pub mod time;

pub use error::ReportError;
pub use report::{FileReporter, LogRecord, Reporter, SharedReporter};
pub use state::{Node, TestNode, TestResult, TestStatus};
