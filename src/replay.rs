// Replay a recorded JSON-lines lifecycle stream into a reporter

use crate::report::{LogRecord, Reporter};
use crate::state::{Node, TestNode, TestResult, TestStatus};
use crate::time;
use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{Level, debug};

/// Node tree as it appears in an `initialized` event
#[derive(Debug, Clone, Deserialize)]
pub struct NodeSpec {
    pub name: String,
    #[serde(default)]
    pub children: Vec<NodeSpec>,
}

impl NodeSpec {
    fn build(&self) -> TestNode {
        TestNode::new(
            self.name.clone(),
            self.children.iter().map(NodeSpec::build).collect(),
        )
    }
}

/// One line of a recorded stream. Nodes are addressed by their `/`-joined
/// name path, e.g. `suite/case`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ReplayEvent {
    Initialize,
    Initialized {
        nodes: Vec<NodeSpec>,
    },
    TestStart {
        test_id: String,
        timestamp: Option<i64>,
    },
    Log {
        test_id: String,
        level: Option<String>,
        message: String,
        timestamp: Option<i64>,
    },
    TestSkip {
        test_id: String,
        reason: String,
    },
    TestEnd {
        test_id: String,
        status: TestStatus,
        message: Option<String>,
        timestamp: Option<i64>,
    },
    Terminated,
}

/// Parse a JSON-lines stream; blank lines are ignored
pub fn parse_events(reader: impl BufRead) -> Result<Vec<ReplayEvent>> {
    let mut events = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line.with_context(|| format!("Failed to read line {}", line_no))?;
        if line.trim().is_empty() {
            continue;
        }

        let event = serde_json::from_str(&line)
            .with_context(|| format!("Invalid event on line {}", line_no))?;
        events.push(event);
    }

    Ok(events)
}

/// Map a level name to a tracing level, accepting SEVERE/WARNING/FINE style names too
pub fn parse_level(name: &str) -> Result<Level> {
    if let Ok(level) = name.parse::<Level>() {
        return Ok(level);
    }

    match name.to_ascii_uppercase().as_str() {
        "SEVERE" => Ok(Level::ERROR),
        "WARNING" => Ok(Level::WARN),
        "CONFIG" | "FINE" => Ok(Level::DEBUG),
        "FINER" | "FINEST" => Ok(Level::TRACE),
        _ => Err(anyhow!("Unknown log level '{}'", name)),
    }
}

/// Tracks the node tree of a replayed run
#[derive(Debug, Default)]
pub struct Replay {
    roots: Vec<TestNode>,
    detached: HashMap<String, TestNode>,
}

impl Replay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Node for a test id. Unknown ids map to a stable detached node, which the
    /// reporter does not track.
    pub fn node(&mut self, test_id: &str) -> TestNode {
        let (head, rest) = test_id.split_once('/').unwrap_or((test_id, ""));

        let found = self
            .roots
            .iter()
            .filter(|root| root.name() == head)
            .find_map(|root| root.find(rest));
        if let Some(node) = found {
            return node.clone();
        }

        debug!("Unknown test id {}", test_id);
        self.detached
            .entry(test_id.to_string())
            .or_insert_with(|| {
                let name = test_id.rsplit('/').next().unwrap_or(test_id);
                TestNode::leaf(name)
            })
            .clone()
    }

    pub fn apply<R: Reporter<TestNode>>(&mut self, reporter: &mut R, event: ReplayEvent) -> Result<()> {
        match event {
            ReplayEvent::Initialize => reporter.initialize(),
            ReplayEvent::Initialized { nodes } => {
                let built: Vec<TestNode> = nodes.iter().map(NodeSpec::build).collect();
                self.roots.extend(built.iter().cloned());
                reporter.initialized(&built);
            }
            ReplayEvent::TestStart { test_id, timestamp } => {
                let node = self.node(&test_id);
                node.mark_started(timestamp.unwrap_or_else(time::now_unix_millis));
                reporter.started(&node);
            }
            ReplayEvent::Log {
                test_id,
                level,
                message,
                timestamp,
            } => {
                let level = match level {
                    Some(name) => parse_level(&name)?,
                    None => Level::INFO,
                };
                let record = match timestamp.and_then(time::local_from_millis) {
                    Some(at) => LogRecord::at(level, message, at),
                    None => LogRecord::new(level, message),
                };
                reporter.log(&record, &self.node(&test_id));
            }
            ReplayEvent::TestSkip { test_id, reason } => {
                reporter.skipped(&self.node(&test_id), &reason);
            }
            ReplayEvent::TestEnd {
                test_id,
                status,
                message,
                timestamp,
            } => {
                let node = self.node(&test_id);
                node.mark_finished(timestamp.unwrap_or_else(time::now_unix_millis));
                reporter.finished(&node, &TestResult::new(status, message));
            }
            ReplayEvent::Terminated => {
                reporter.terminated();
                self.roots.clear();
                self.detached.clear();
            }
        }

        Ok(())
    }
}

/// Replay every event of `path` into `reporter`, returning the event count
pub fn replay_file<R: Reporter<TestNode>>(path: &Path, reporter: &mut R) -> Result<usize> {
    let file =
        File::open(path).with_context(|| format!("Failed to open event file: {}", path.display()))?;
    let events = parse_events(BufReader::new(file))
        .with_context(|| format!("Failed to parse event file: {}", path.display()))?;

    let count = events.len();
    let mut replay = Replay::new();
    for event in events {
        replay.apply(reporter, event)?;
    }

    Ok(count)
}
