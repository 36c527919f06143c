//! Logger contract and the in-memory command log.
//!
//! The interpreter never renders anything itself. Every line of output is
//! appended to a [`Logger`], and the host decides how history is displayed.

/// Severity of a log entry.
///
/// The interpreter itself only produces `Error` and `Message`. The other
/// kinds are for hosts that feed their own diagnostics into the same history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    Error,
    Assert,
    Warning,
    Message,
    Exception,
    /// A line typed by the user, echoed by the host.
    Input,
    /// Output produced by the shell itself rather than a command.
    ShellMessage,
}

/// One entry in the log history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub kind: LogKind,
    pub message: String,
    /// Diagnostic trace text, if any was captured.
    pub trace: Option<String>,
}

impl LogEntry {
    pub fn new(kind: LogKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            trace: None,
        }
    }

    pub fn with_trace(mut self, trace: impl Into<String>) -> Self {
        self.trace = Some(trace.into());
        self
    }
}

/// Append-only message history consumed by the interpreter.
pub trait Logger {
    /// Append an entry.
    fn push(&mut self, entry: LogEntry);

    /// Remove every entry.
    fn clear(&mut self);

    /// Ordered history, oldest first.
    fn logs(&self) -> &[LogEntry];

    /// Append a normal message.
    fn log(&mut self, message: &str) {
        self.push(LogEntry::new(LogKind::Message, message));
    }

    /// Append an error message.
    fn log_error(&mut self, message: &str) {
        self.push(LogEntry::new(LogKind::Error, message));
    }

    /// The most recent entry.
    fn last(&self) -> Option<&LogEntry> {
        self.logs().last()
    }
}

/// Bounded in-memory log. The oldest entry is dropped once `max_items` is
/// exceeded.
#[derive(Debug, Clone)]
pub struct CommandLog {
    entries: Vec<LogEntry>,
    max_items: usize,
}

impl CommandLog {
    /// Create an empty log holding at most `max_items` entries (minimum 1).
    pub fn new(max_items: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_items: max_items.max(1),
        }
    }

    pub fn max_items(&self) -> usize {
        self.max_items
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CommandLog {
    fn default() -> Self {
        Self::new(512)
    }
}

impl Logger for CommandLog {
    fn push(&mut self, entry: LogEntry) {
        self.entries.push(entry);
        if self.entries.len() > self.max_items {
            self.entries.remove(0);
        }
    }

    fn clear(&mut self) {
        self.entries.clear();
    }

    fn logs(&self) -> &[LogEntry] {
        &self.entries
    }
}
