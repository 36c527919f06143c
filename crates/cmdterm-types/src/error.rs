//! Error types for cmdterm.

use std::fmt;
use std::io;

/// The kind of value an argument token was expected to convert into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    Int,
    Float,
    Bool,
}

impl fmt::Display for ArgKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Int => "integer",
            Self::Float => "float",
            Self::Bool => "boolean",
        };
        f.write_str(name)
    }
}

/// Which side of a command's argument bounds was violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgBound {
    /// `min == max` and the count differs.
    Exactly,
    /// Fewer than `min` arguments.
    AtLeast,
    /// More than `max` arguments.
    AtMost,
}

impl fmt::Display for ArgBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let word = match self {
            Self::Exactly => "exactly",
            Self::AtLeast => "at least",
            Self::AtMost => "at most",
        };
        f.write_str(word)
    }
}

fn plural(count: &usize) -> &'static str {
    if *count == 1 { "" } else { "s" }
}

/// Errors produced by the cmdterm framework.
#[derive(Debug, thiserror::Error)]
pub enum TerminalError {
    #[error("cannot convert '{token}' to {expected}")]
    Parse { token: String, expected: ArgKind },

    #[error("Command {0} could not be found.")]
    CommandNotFound(String),

    #[error("{command} requires {bound} {count} argument{}", plural(.count))]
    ArgumentCount {
        command: String,
        bound: ArgBound,
        count: usize,
    },

    #[error("Command {0} is already defined.")]
    DuplicateCommand(String),

    #[error("invalid command name: '{0}'")]
    InvalidName(String),

    #[error("command {command} declares min_args {min} greater than max_args {max}")]
    InvalidArgBounds {
        command: String,
        min: usize,
        max: usize,
    },

    #[error("Error executing {command}: {message}")]
    Handler { command: String, message: String },

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl TerminalError {
    /// Shorthand for a handler-raised failure.
    pub fn handler(command: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Handler {
            command: command.into(),
            message: message.to_string(),
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, TerminalError>;
