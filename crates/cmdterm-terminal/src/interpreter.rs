//! Tokenizing, validation, and dispatch.
//!
//! [`Interpreter`] owns the command table and shell variables. Each call to
//! [`Interpreter::run_command`] builds an [`Environment`] that borrows the
//! interpreter state together with the host's [`Logger`] and [`Host`], and
//! every handler receives that environment. Handlers that run other commands
//! (`TIME`) call [`Environment::run_command`], which is the same code path
//! used for top-level input.

use std::any::Any;
use std::backtrace::Backtrace;
use std::collections::BTreeMap;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use cmdterm_types::config::TerminalConfig;
use cmdterm_types::error::{Result, TerminalError};

use crate::arg::CommandArg;
use crate::logger::{LogEntry, LogKind, Logger};
use crate::registry::{CommandInfo, CommandRegistry};

/// Capabilities the host environment lends to the interpreter.
pub trait Host {
    /// Ask the host to shut down or leave its main loop.
    fn terminate(&mut self);
}

impl<F: FnMut()> Host for F {
    fn terminate(&mut self) {
        self();
    }
}

/// Split a line into whitespace-delimited tokens. No quoting.
pub fn tokenize(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}

/// Command table plus persistent shell state.
pub struct Interpreter {
    registry: CommandRegistry,
    variables: BTreeMap<String, String>,
    debug: bool,
    column_width: usize,
    input_echoed: bool,
}

impl Interpreter {
    /// Create an interpreter with the builtin commands registered.
    ///
    /// `TRACE` is only registered when `config.debug` is set.
    pub fn new(config: &TerminalConfig) -> Result<Self> {
        let mut interp = Self::empty(config);
        crate::commands::register_builtins(&mut interp.registry, config.debug)?;
        log::info!(
            "Interpreter ready with {} commands (debug: {})",
            interp.registry.len(),
            config.debug
        );
        Ok(interp)
    }

    /// Create an interpreter with an empty command table.
    pub fn empty(config: &TerminalConfig) -> Self {
        Self {
            registry: CommandRegistry::new(),
            variables: BTreeMap::new(),
            debug: config.debug,
            column_width: config.column_width,
            input_echoed: config.echo_input,
        }
    }

    /// Register an additional command.
    pub fn register(&mut self, info: CommandInfo) -> Result<()> {
        self.registry.register(info)
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Read-only view of every command, in registration order.
    pub fn commands(&self) -> impl ExactSizeIterator<Item = (&str, &CommandInfo)> + '_ {
        self.registry.all()
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    // -- Shell variable API --

    /// Set a shell variable. Names are case-insensitive.
    pub fn set_variable(&mut self, name: &str, value: &str) {
        self.variables.insert(name.to_uppercase(), value.to_string());
    }

    /// Get a shell variable value.
    pub fn variable(&self, name: &str) -> Option<&str> {
        self.variables.get(&name.to_uppercase()).map(String::as_str)
    }

    /// All shell variables, sorted by name.
    pub fn variables(&self) -> &BTreeMap<String, String> {
        &self.variables
    }

    /// Parse and execute a command line.
    ///
    /// Every outcome, including failures, is reported through `logger`.
    pub fn run_command(&mut self, line: &str, logger: &mut dyn Logger, host: &mut dyn Host) {
        self.environment(logger, host).run_command(line);
    }

    /// Build the dispatch context around this interpreter.
    pub fn environment<'a>(
        &'a mut self,
        logger: &'a mut dyn Logger,
        host: &'a mut dyn Host,
    ) -> Environment<'a> {
        Environment {
            registry: &self.registry,
            variables: &mut self.variables,
            logger,
            host,
            debug: self.debug,
            column_width: self.column_width,
            input_echoed: self.input_echoed,
        }
    }
}

impl fmt::Debug for Interpreter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interpreter")
            .field("registry", &self.registry)
            .field("variables", &self.variables)
            .field("debug", &self.debug)
            .finish()
    }
}

/// Dispatch context passed to every handler.
pub struct Environment<'a> {
    /// The command table.
    pub registry: &'a CommandRegistry,
    /// Shell variables, substituted for `$NAME` tokens.
    pub variables: &'a mut BTreeMap<String, String>,
    /// Output history.
    pub logger: &'a mut dyn Logger,
    /// Host capabilities (termination).
    pub host: &'a mut dyn Host,
    /// Debug mode: errors carry a captured backtrace.
    pub debug: bool,
    /// Column width for command listings.
    pub column_width: usize,
    /// The host logs each input line as an `Input` entry before dispatch.
    pub input_echoed: bool,
}

impl Environment<'_> {
    /// Parse and execute a command line.
    ///
    /// Unknown commands, bad argument counts, and handler failures are logged
    /// as errors and never escape this call.
    pub fn run_command(&mut self, line: &str) {
        let tokens = tokenize(line);
        let Some((first, rest)) = tokens.split_first() else {
            return;
        };

        let name = first.to_uppercase();
        let args: Vec<CommandArg> = rest.iter().map(|t| self.substitute(t)).collect();

        let registry = self.registry;
        let Some(info) = registry.lookup(&name) else {
            self.issue_error_message(TerminalError::CommandNotFound(name));
            return;
        };

        if let Err(e) = info.check_arg_count(args.len()) {
            let mut message = e.to_string();
            if let Some(hint) = info.hint_text() {
                message.push_str(&format!("\n    -> Usage: {hint}"));
            }
            self.issue_error_message(message);
            return;
        }

        log::debug!("Dispatching {name} with {} args", args.len());
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| info.invoke(self, &args)));
        let failure = match outcome {
            Ok(Ok(())) => return,
            Ok(Err(e)) => e.to_string(),
            Err(payload) => panic_message(&*payload),
        };
        log::warn!("Command {name} failed: {failure}");
        self.issue_error_message(TerminalError::handler(name, failure));
    }

    /// Append an error entry through [`Logger::log_error`]. In debug mode the
    /// entry carries a backtrace instead.
    pub fn issue_error_message(&mut self, message: impl fmt::Display) {
        let message = message.to_string();
        if self.debug {
            let trace = Backtrace::force_capture().to_string();
            self.logger
                .push(LogEntry::new(LogKind::Error, message).with_trace(trace));
        } else {
            self.logger.log_error(&message);
        }
    }

    /// Append a normal message entry.
    pub fn log(&mut self, message: impl fmt::Display) {
        self.logger.log(&message.to_string());
    }

    /// Read-only view of every command, in registration order.
    pub fn commands(&self) -> impl ExactSizeIterator<Item = (&str, &CommandInfo)> + '_ {
        self.registry.all()
    }

    fn substitute(&self, token: &str) -> CommandArg {
        if let Some(name) = token.strip_prefix('$')
            && let Some(value) = self.variables.get(&name.to_uppercase())
        {
            return CommandArg::substituted(token, value);
        }
        CommandArg::new(token)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "handler panicked".to_string()
    }
}
