// File reporter - one directory and log file per test node

use super::Reporter;
use super::paths::{self, PathTable};
use super::record::{self, LogRecord};
use crate::error::{ReportError, ReportResult};
use crate::state::{Node, RunCounters, TestResult};
use std::path::{Path, PathBuf};
use tracing::{debug, error, warn};

const STARTED: &str = "Started";

/// Reporter that saves the logs into a file hierarchy.
///
/// Every node gets its own directory together with a `.log` file, nested the
/// same way as the test tree. The run directory holds a root `.log` that
/// receives the run summary and every record whose node has no log of its own.
///
/// Filesystem failures never reach the caller. They are logged through
/// `tracing` and the affected node simply produces no output.
#[derive(Debug)]
pub struct FileReporter<N: Node> {
    run_dir: PathBuf,
    table: PathTable<N>,
    root_path: Option<PathBuf>,
    root_log: Option<PathBuf>,
    counters: RunCounters,
}

impl<N: Node> FileReporter<N> {
    /// Reporter writing below `<home>/.teacup/logs/<timestamp>`
    pub fn new() -> Self {
        Self::with_root(crate::config::default_run_dir())
    }

    /// Reporter writing below an explicit run directory
    pub fn with_root(run_dir: impl Into<PathBuf>) -> Self {
        Self {
            run_dir: run_dir.into(),
            table: PathTable::new(),
            root_path: None,
            root_log: None,
            counters: RunCounters::new(),
        }
    }

    /// Directory this reporter creates on `initialize`
    pub fn run_dir(&self) -> &Path {
        &self.run_dir
    }

    /// Run directory, once created by `initialize`
    pub fn root_path(&self) -> Option<&Path> {
        self.root_path.as_deref()
    }

    pub fn root_log(&self) -> Option<&Path> {
        self.root_log.as_deref()
    }

    pub fn counters(&self) -> RunCounters {
        self.counters
    }

    pub fn paths(&self) -> &PathTable<N> {
        &self.table
    }

    /// Log file of a tracked node
    pub fn log_path(&self, node: &N) -> Option<&Path> {
        self.table.get(node)
    }

    /// Node log if tracked, otherwise the root log
    fn resolve(&self, node_log: Option<PathBuf>) -> Option<PathBuf> {
        node_log.or_else(|| self.root_log.clone())
    }

    fn create_directories(&mut self, nodes: &[N], root: &Path) {
        // Reverse pushes keep pre-order, so the first duplicate is the one kept.
        let mut pending: Vec<(N, PathBuf)> = nodes
            .iter()
            .rev()
            .map(|node| (node.clone(), root.to_path_buf()))
            .collect();

        while let Some((node, parent)) = pending.pop() {
            if self.table.contains(&node) {
                debug!("Node {} is already tracked", node.name());
                continue;
            }

            match create_node_log(&parent, node.name()) {
                Ok((dir, log)) => {
                    pending.extend(
                        node.children()
                            .iter()
                            .rev()
                            .map(|child| (child.clone(), dir.clone())),
                    );
                    self.table.insert(node, log);
                }
                Err(e) => report_failure(&e),
            }
        }
    }
}

impl<N: Node> Default for FileReporter<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Node> Reporter<N> for FileReporter<N> {
    fn initialize(&mut self) {
        debug!("Initialize");

        let root = match paths::create_root_dir(&self.run_dir) {
            Ok(root) => root,
            Err(e) => {
                report_failure(&e);
                return;
            }
        };

        self.root_log = match paths::create_log_file(&root) {
            Ok(log) => Some(log),
            Err(e) => {
                report_failure(&e);
                None
            }
        };
        self.root_path = Some(root);
    }

    fn initialized(&mut self, nodes: &[N]) {
        debug!("Initialized");

        if let Some(root) = self.root_path.clone() {
            self.create_directories(nodes, &root);
        }
    }

    fn started(&mut self, node: &N) {
        debug!("Started");

        let node_log = self.table.get(node).map(Path::to_path_buf);
        if let Some(path) = self.resolve(node_log) {
            write(&path, &LogRecord::info(STARTED));
        }
    }

    fn log(&mut self, record: &LogRecord, node: &N) {
        debug!("Log");

        let node_log = self.table.get(node).map(Path::to_path_buf);
        if let Some(path) = self.resolve(node_log) {
            write(&path, record);
        }
    }

    fn skipped(&mut self, node: &N, reason: &str) {
        debug!("Skipped");

        let node_log = self.table.remove(node);
        if let Some(path) = self.resolve(node_log) {
            self.counters.record_skipped();
            write(
                &path,
                &LogRecord::info(format!("Skipped with reason: {}", reason)),
            );
        }
    }

    fn finished(&mut self, node: &N, result: &TestResult) {
        debug!("Finished");

        let status = result.status();
        self.counters.record(status);

        let node_log = self.table.remove(node);
        if let Some(path) = self.resolve(node_log) {
            // Engine timestamps are untrusted; clamp instead of overflowing.
            let elapsed = node.time_finished().saturating_sub(node.time_started());
            let mut message = format!("Finished with status: {} after {} ms.", status, elapsed);
            if let Some(cause) = result.cause() {
                message.push(' ');
                message.push_str(cause);
            }
            write(&path, &LogRecord::info(message));
        }
    }

    fn terminated(&mut self) {
        debug!("Terminated");

        self.table.clear();

        if let Some(root_log) = &self.root_log {
            write(root_log, &LogRecord::info(self.counters.summary()));
        }

        self.counters.reset();
        self.root_log = None;
        self.root_path = None;
    }
}

/// Create `<parent>/<name>/` and its log file
fn create_node_log(parent: &Path, name: &str) -> ReportResult<(PathBuf, PathBuf)> {
    let dir = paths::create_node_dir(parent, name)?;
    let log = paths::create_log_file(&dir)?;
    Ok((dir, log))
}

fn write(path: &Path, record: &LogRecord) {
    if let Err(e) = record::append_record(path, record) {
        report_failure(&e);
    }
}

fn report_failure(e: &ReportError) {
    if e.is_conflict() {
        warn!(path = %e.path().display(), "{}", e);
    } else {
        match std::error::Error::source(e) {
            Some(source) => error!(path = %e.path().display(), "{}: {}", e, source),
            None => error!(path = %e.path().display(), "{}", e),
        }
    }
}
