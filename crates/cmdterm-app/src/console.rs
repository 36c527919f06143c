//! Text console: owns the interpreter and prints log entries as they arrive.

use std::io::Write;
use std::panic::{self, PanicHookInfo};

use cmdterm_terminal::{
    Autocomplete, CommandLog, Completion, Interpreter, LogEntry, LogKind, Logger,
};
use cmdterm_types::config::TerminalConfig;

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Replace the default panic hook, which prints to stderr, with one that
/// only logs at debug level. Handler panics are already reported in the
/// console as `Error executing ...` entries.
pub fn install_panic_hook() {
    panic::set_hook(Box::new(log_panic));
}

fn log_panic(info: &PanicHookInfo<'_>) {
    log::debug!("Handler panicked: {info}");
}

/// A [`CommandLog`] that also writes each entry to an output stream.
pub struct PrintingLog<W: Write> {
    inner: CommandLog,
    out: W,
    /// Emit ANSI clear-screen on `clear`.
    ansi: bool,
}

impl<W: Write> PrintingLog<W> {
    pub fn new(max_items: usize, out: W, ansi: bool) -> Self {
        Self {
            inner: CommandLog::new(max_items),
            out,
            ansi,
        }
    }

    fn write_entry(&mut self, entry: &LogEntry) -> std::io::Result<()> {
        match entry.kind {
            // Already visible on the user's terminal.
            LogKind::Input => Ok(()),
            LogKind::Error | LogKind::Exception | LogKind::Assert => {
                writeln!(self.out, "Error: {}", entry.message)
            },
            LogKind::Warning => writeln!(self.out, "Warning: {}", entry.message),
            LogKind::Message | LogKind::ShellMessage => writeln!(self.out, "{}", entry.message),
        }
    }
}

impl<W: Write> Logger for PrintingLog<W> {
    fn push(&mut self, entry: LogEntry) {
        if let Err(e) = self.write_entry(&entry) {
            log::error!("Failed to write log entry: {e}");
        }
        self.inner.push(entry);
    }

    fn clear(&mut self) {
        if self.ansi
            && let Err(e) = write!(self.out, "{CLEAR_SCREEN}")
        {
            log::error!("Failed to clear screen: {e}");
        }
        self.inner.clear();
    }

    fn logs(&self) -> &[LogEntry] {
        self.inner.logs()
    }
}

/// Interpreter, history, and the prompt loop state.
pub struct Console<W: Write> {
    interp: Interpreter,
    log: PrintingLog<W>,
    autocomplete: Autocomplete,
    prompt: String,
    echo_input: bool,
    running: bool,
}

impl<W: Write> Console<W> {
    pub fn new(interp: Interpreter, config: &TerminalConfig, out: W, ansi: bool) -> Self {
        let autocomplete = Autocomplete::from_registry(interp.registry());
        Self {
            interp,
            log: PrintingLog::new(config.buffer_size, out, ansi),
            autocomplete,
            prompt: config.prompt.clone(),
            echo_input: config.echo_input,
            running: true,
        }
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn write_prompt(&mut self) -> std::io::Result<()> {
        write!(self.log.out, "{} ", self.prompt)?;
        self.log.out.flush()
    }

    pub fn banner(&mut self) {
        let version = env!("CARGO_PKG_VERSION");
        let count = self.interp.registry().len();
        self.log.push(LogEntry::new(
            LogKind::ShellMessage,
            format!("cmdterm v{version} -- {count} commands, type 'help' to list them"),
        ));
    }

    /// Handle one input line. A trailing tab requests completion instead of
    /// running the line.
    pub fn submit(&mut self, line: &str) {
        if let Some(partial) = line.strip_suffix('\t') {
            self.complete(partial);
            return;
        }

        if self.echo_input && !line.trim().is_empty() {
            self.log
                .push(LogEntry::new(LogKind::Input, format!("{} {line}", self.prompt)));
        }
        let running = &mut self.running;
        self.interp
            .run_command(line, &mut self.log, &mut || *running = false);
        if !self.running {
            log::info!("Quit requested");
        }
    }

    fn complete(&mut self, partial: &str) {
        let message = match self.autocomplete.complete_line(partial) {
            Completion::Single(line) => line,
            Completion::Multiple(_, words) => words.join("  "),
            Completion::None => return,
        };
        self.log.push(LogEntry::new(LogKind::ShellMessage, message));
    }

    #[cfg(test)]
    fn history(&self) -> &[LogEntry] {
        self.log.logs()
    }
}
