//! Command interpreter subsystem.
//!
//! Commands are registered by name with argument bounds and help text. The
//! interpreter tokenizes input lines, resolves the command name, validates
//! the argument count, and dispatches the handler. All output and every
//! failure is appended to a host-supplied [`Logger`].

mod arg;
mod autocomplete;
mod commands;
mod interpreter;
mod logger;
mod registry;

/// A single whitespace-delimited argument with typed accessors.
pub use arg::CommandArg;
/// Join arguments back into a line with single spaces, by value or as typed.
pub use arg::{join_arguments, join_raw_arguments};
/// Tab completion over command names.
pub use autocomplete::{Autocomplete, Completion};
/// Register the built-in commands into a registry.
pub use commands::register_builtins;
/// Dispatch context passed to every handler.
pub use interpreter::Environment;
/// Capabilities supplied by the host (process termination).
pub use interpreter::Host;
/// Registry owner and command line entry point.
pub use interpreter::Interpreter;
/// Whitespace tokenizer used by the interpreter.
pub use interpreter::tokenize;
/// In-memory bounded log.
pub use logger::CommandLog;
/// One log history entry.
pub use logger::LogEntry;
/// Severity of a log entry.
pub use logger::LogKind;
/// Output history contract consumed by the interpreter.
pub use logger::Logger;
/// Registration metadata for one command.
pub use registry::CommandInfo;
/// Table of registered commands.
pub use registry::CommandRegistry;
/// Boxed handler routine.
pub use registry::Handler;
