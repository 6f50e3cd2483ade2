//! Rolling Logger
//!
//! A `tracing-subscriber` writer that keeps the most recent log lines in a
//! circular buffer and forwards every committed line to an optional sink.
//! Works on wasm32: the formatter is installed without a timer and lines are
//! stamped with `chrono` when they enter the buffer.

use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;

/// Default number of lines kept in the buffer
pub const DEFAULT_CAPACITY: usize = 500;

/// A single committed log line
#[derive(Debug, Clone, PartialEq)]
pub struct LogLine {
    pub at: DateTime<Utc>,
    pub level: Level,
    pub message: String,
}

/// Receives every committed line together with its level
pub type Sink = Arc<dyn Fn(Level, &str) + Send + Sync>;

struct Inner {
    capacity: usize,
    lines: Mutex<VecDeque<LogLine>>,
    sink: Option<Sink>,
}

/// Circular log buffer usable as a `fmt` writer
#[derive(Clone)]
pub struct RollingLogger {
    inner: Arc<Inner>,
}

impl RollingLogger {
    /// Buffer-only logger. A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        Self::build(capacity, None)
    }

    /// Logger that also forwards each line to `sink`
    pub fn with_sink<F>(capacity: usize, sink: F) -> Self
    where
        F: Fn(Level, &str) + Send + Sync + 'static,
    {
        Self::build(capacity, Some(Arc::new(sink)))
    }

    fn build(capacity: usize, sink: Option<Sink>) -> Self {
        let capacity = capacity.max(1);
        Self {
            inner: Arc::new(Inner {
                capacity,
                lines: Mutex::new(VecDeque::with_capacity(capacity)),
                sink,
            }),
        }
    }

    pub fn capacity(&self) -> usize {
        self.inner.capacity
    }

    pub fn len(&self) -> usize {
        self.lines().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines().is_empty()
    }

    /// Oldest-first copy of the buffered lines
    pub fn snapshot(&self) -> Vec<LogLine> {
        self.lines().iter().cloned().collect()
    }

    /// The `n` most recent lines, oldest first
    pub fn tail(&self, n: usize) -> Vec<LogLine> {
        let lines = self.lines();
        let skip = lines.len().saturating_sub(n);
        lines.iter().skip(skip).cloned().collect()
    }

    pub fn clear(&self) {
        self.lines().clear();
    }

    /// Commit a line: evict the oldest entries beyond capacity, then notify the sink
    pub fn push(&self, level: Level, message: impl Into<String>) {
        let message = message.into();
        {
            let mut lines = self.lines();
            lines.push_back(LogLine {
                at: Utc::now(),
                level,
                message: message.clone(),
            });
            while lines.len() > self.inner.capacity {
                lines.pop_front();
            }
        }
        if let Some(sink) = &self.inner.sink {
            sink(level, &message);
        }
    }

    /// Install this logger as the global `tracing` subscriber
    pub fn init(&self, max_level: Level) -> Result<(), String> {
        tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_max_level(max_level)
            .with_ansi(false)
            .with_target(true)
            .without_time()
            .try_init()
            .map_err(|e| format!("failed to install log subscriber: {e}"))
    }

    fn lines(&self) -> MutexGuard<'_, VecDeque<LogLine>> {
        // A panicking sink must not take logging down with it
        self.inner
            .lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Per-event writer; the formatted event is committed when it is dropped
pub struct LineWriter {
    logger: RollingLogger,
    level: Level,
    buf: Vec<u8>,
}

impl io::Write for LineWriter {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for LineWriter {
    fn drop(&mut self) {
        if self.buf.is_empty() {
            return;
        }
        let text = String::from_utf8_lossy(&self.buf);
        let line = text.trim_end_matches(['\r', '\n']);
        if !line.is_empty() {
            self.logger.push(self.level, line);
        }
    }
}

impl<'a> MakeWriter<'a> for RollingLogger {
    type Writer = LineWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LineWriter {
            logger: self.clone(),
            level: Level::INFO,
            buf: Vec::new(),
        }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        LineWriter {
            logger: self.clone(),
            level: *meta.level(),
            buf: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_evicts_oldest_beyond_capacity() {
        let logger = RollingLogger::new(3);
        for i in 0..5 {
            logger.push(Level::INFO, format!("line {}", i));
        }

        let lines = logger.snapshot();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].message, "line 2");
        assert_eq!(lines[2].message, "line 4");
    }

    #[test]
    fn test_zero_capacity_keeps_one_line() {
        let logger = RollingLogger::new(0);
        logger.push(Level::WARN, "a");
        logger.push(Level::WARN, "b");
        assert_eq!(logger.capacity(), 1);
        assert_eq!(logger.snapshot()[0].message, "b");
    }

    #[test]
    fn test_sink_receives_level_and_message() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_in_sink = seen.clone();
        let logger = RollingLogger::with_sink(10, move |level, msg| {
            seen_in_sink.lock().unwrap().push((level, msg.to_string()));
        });

        logger.push(Level::ERROR, "boom");

        let seen = seen.lock().unwrap();
        assert_eq!(seen.as_slice(), &[(Level::ERROR, "boom".to_string())]);
    }

    #[test]
    fn test_writer_commits_on_drop() {
        let logger = RollingLogger::new(10);
        {
            let mut writer = logger.make_writer();
            write!(writer, "hello ").unwrap();
            writeln!(writer, "world").unwrap();
            assert!(logger.is_empty());
        }
        let lines = logger.snapshot();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].message, "hello world");
        assert_eq!(lines[0].level, Level::INFO);
    }

    #[test]
    fn test_empty_writer_commits_nothing() {
        let logger = RollingLogger::new(10);
        drop(logger.make_writer());
        assert!(logger.is_empty());
    }

    #[test]
    fn test_tail_returns_most_recent() {
        let logger = RollingLogger::new(10);
        for i in 0..4 {
            logger.push(Level::DEBUG, format!("{}", i));
        }
        let tail: Vec<String> = logger.tail(2).into_iter().map(|l| l.message).collect();
        assert_eq!(tail, vec!["2", "3"]);
        assert_eq!(logger.tail(10).len(), 4);
    }
}
