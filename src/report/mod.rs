// Report module - lifecycle contract and the file reporter

pub mod file;
pub mod paths;
pub mod record;
pub mod shared;

use crate::state::{Node, TestResult};
pub use file::FileReporter;
pub use paths::{LOG_FILE, PathTable};
pub use record::LogRecord;
pub use shared::SharedReporter;

/// Lifecycle callbacks issued by the test engine.
///
/// Implementations must never panic or surface errors to the caller; reporting
/// is not allowed to fail a test run.
pub trait Reporter<N: Node> {
    /// Called once before any node is known
    fn initialize(&mut self);

    /// Called with the top-level nodes of the discovered test tree
    fn initialized(&mut self, nodes: &[N]);

    /// Called when a node starts executing
    fn started(&mut self, node: &N);

    /// Called for every record a node logs while executing
    fn log(&mut self, record: &LogRecord, node: &N);

    /// Called when a node will not be executed
    fn skipped(&mut self, node: &N, reason: &str);

    /// Called when a node has finished executing
    fn finished(&mut self, node: &N, result: &TestResult);

    /// Called once after the whole run
    fn terminated(&mut self);
}
