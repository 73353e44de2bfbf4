// Shared reporter - serializes lifecycle calls from several engine threads

use super::{LogRecord, Reporter};
use crate::state::{Node, TestResult};
use std::marker::PhantomData;
use std::sync::{Arc, Mutex, MutexGuard};

/// Cloneable handle running every lifecycle call under one lock
pub struct SharedReporter<N, R> {
    inner: Arc<Mutex<R>>,
    _node: PhantomData<fn(&N)>,
}

impl<N: Node, R: Reporter<N>> SharedReporter<N, R> {
    pub fn new(reporter: R) -> Self {
        Self {
            inner: Arc::new(Mutex::new(reporter)),
            _node: PhantomData,
        }
    }

    /// Run `f` with exclusive access to the wrapped reporter
    pub fn with<T>(&self, f: impl FnOnce(&mut R) -> T) -> T {
        let mut guard = self.lock();
        f(&mut *guard)
    }

    fn lock(&self) -> MutexGuard<'_, R> {
        // A panicking caller must not disable reporting for everyone else.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<N, R> Clone for SharedReporter<N, R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            _node: PhantomData,
        }
    }
}

impl<N: Node, R: Reporter<N>> Reporter<N> for SharedReporter<N, R> {
    fn initialize(&mut self) {
        self.lock().initialize();
    }

    fn initialized(&mut self, nodes: &[N]) {
        self.lock().initialized(nodes);
    }

    fn started(&mut self, node: &N) {
        self.lock().started(node);
    }

    fn log(&mut self, record: &LogRecord, node: &N) {
        self.lock().log(record, node);
    }

    fn skipped(&mut self, node: &N, reason: &str) {
        self.lock().skipped(node, reason);
    }

    fn finished(&mut self, node: &N, result: &TestResult) {
        self.lock().finished(node, result);
    }

    fn terminated(&mut self) {
        self.lock().terminated();
    }
}
