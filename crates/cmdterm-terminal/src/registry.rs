//! Command metadata and the name -> command table.

use std::collections::HashMap;
use std::fmt;

use cmdterm_types::error::{ArgBound, Result, TerminalError};

use crate::arg::CommandArg;
use crate::interpreter::Environment;

/// Handler routine invoked with the dispatch context and the parsed arguments.
pub type Handler = Box<dyn Fn(&mut Environment<'_>, &[CommandArg]) -> Result<()>>;

/// Registration metadata for one command.
pub struct CommandInfo {
    name: String,
    handler: Handler,
    help: Option<String>,
    hint: Option<String>,
    min_args: usize,
    /// `None` means unbounded.
    max_args: Option<usize>,
}

impl CommandInfo {
    /// A command with no help text that accepts any number of arguments.
    pub fn new<F>(name: &str, handler: F) -> Self
    where
        F: Fn(&mut Environment<'_>, &[CommandArg]) -> Result<()> + 'static,
    {
        Self {
            name: name.to_uppercase(),
            handler: Box::new(handler),
            help: None,
            hint: None,
            min_args: 0,
            max_args: None,
        }
    }

    pub fn help(mut self, help: &str) -> Self {
        self.help = Some(help.to_string());
        self
    }

    /// Usage hint appended to argument-count errors.
    pub fn hint(mut self, hint: &str) -> Self {
        self.hint = Some(hint.to_string());
        self
    }

    pub fn min_args(mut self, min: usize) -> Self {
        self.min_args = min;
        self
    }

    pub fn max_args(mut self, max: usize) -> Self {
        self.max_args = Some(max);
        self
    }

    /// Set both bounds. `max = None` leaves the upper bound open.
    pub fn args(mut self, min: usize, max: Option<usize>) -> Self {
        self.min_args = min;
        self.max_args = max;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn help_text(&self) -> Option<&str> {
        self.help.as_deref()
    }

    pub fn hint_text(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    pub fn min_arg_count(&self) -> usize {
        self.min_args
    }

    pub fn max_arg_count(&self) -> Option<usize> {
        self.max_args
    }

    /// Validate an argument count against the declared bounds.
    pub fn check_arg_count(&self, count: usize) -> Result<()> {
        let violated = if count < self.min_args {
            let bound = if self.max_args == Some(self.min_args) {
                ArgBound::Exactly
            } else {
                ArgBound::AtLeast
            };
            Some((bound, self.min_args))
        } else {
            match self.max_args {
                Some(max) if count > max => {
                    let bound = if self.min_args == max {
                        ArgBound::Exactly
                    } else {
                        ArgBound::AtMost
                    };
                    Some((bound, max))
                },
                _ => None,
            }
        };

        match violated {
            Some((bound, expected)) => Err(TerminalError::ArgumentCount {
                command: self.name.clone(),
                bound,
                count: expected,
            }),
            None => Ok(()),
        }
    }

    pub(crate) fn invoke(&self, env: &mut Environment<'_>, args: &[CommandArg]) -> Result<()> {
        (self.handler)(env, args)
    }

    fn validate(&self) -> Result<()> {
        if self.name.is_empty() || self.name.chars().any(char::is_whitespace) {
            return Err(TerminalError::InvalidName(self.name.clone()));
        }
        if let Some(max) = self.max_args
            && self.min_args > max
        {
            return Err(TerminalError::InvalidArgBounds {
                command: self.name.clone(),
                min: self.min_args,
                max,
            });
        }
        Ok(())
    }
}

impl fmt::Debug for CommandInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandInfo")
            .field("name", &self.name)
            .field("help", &self.help)
            .field("hint", &self.hint)
            .field("min_args", &self.min_args)
            .field("max_args", &self.max_args)
            .finish_non_exhaustive()
    }
}

/// Table of registered commands.
///
/// Lookup is case-insensitive. Iteration follows registration order.
#[derive(Default)]
pub struct CommandRegistry {
    commands: Vec<CommandInfo>,
    index: HashMap<String, usize>,
}

impl CommandRegistry {
    /// Create an empty command registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command. Fails if the name is already taken.
    pub fn register(&mut self, info: CommandInfo) -> Result<()> {
        info.validate()?;
        if self.index.contains_key(&info.name) {
            return Err(TerminalError::DuplicateCommand(info.name));
        }
        log::debug!("Registered command {}", info.name);
        self.index.insert(info.name.clone(), self.commands.len());
        self.commands.push(info);
        Ok(())
    }

    /// Find a command by name, ignoring case.
    pub fn lookup(&self, name: &str) -> Option<&CommandInfo> {
        self.index
            .get(&name.to_uppercase())
            .map(|&i| &self.commands[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Every command as `(name, info)`, in registration order.
    pub fn all(&self) -> impl ExactSizeIterator<Item = (&str, &CommandInfo)> + '_ {
        self.commands.iter().map(|c| (c.name.as_str(), c))
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.iter().map(|c| c.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_env: &mut Environment<'_>, _args: &[CommandArg]) -> Result<()> {
        Ok(())
    }

    #[test]
    fn name_is_uppercased() {
        let info = CommandInfo::new("print", noop);
        assert_eq!(info.name(), "PRINT");
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let mut reg = CommandRegistry::new();
        reg.register(CommandInfo::new("Print", noop).help("Outputs message"))
            .unwrap();
        for name in ["print", "PRINT", "pRiNt"] {
            let info = reg.lookup(name).unwrap();
            assert_eq!(info.help_text(), Some("Outputs message"));
        }
        assert!(reg.lookup("prin").is_none());
    }

    #[test]
    fn duplicate_rejected_regardless_of_case() {
        let mut reg = CommandRegistry::new();
        reg.register(CommandInfo::new("clear", noop)).unwrap();
        let err = reg.register(CommandInfo::new("CLEAR", noop)).unwrap_err();
        assert!(matches!(err, TerminalError::DuplicateCommand(ref n) if n == "CLEAR"));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn every_registered_name_rejects_reregistration() {
        let mut reg = CommandRegistry::new();
        for name in ["a", "b", "c", "d"] {
            reg.register(CommandInfo::new(name, noop)).unwrap();
        }
        let names: Vec<String> = reg.names().map(str::to_string).collect();
        for name in names {
            assert!(reg.lookup(&name).is_some());
            assert!(matches!(
                reg.register(CommandInfo::new(&name, noop)),
                Err(TerminalError::DuplicateCommand(_))
            ));
        }
    }

    #[test]
    fn all_preserves_registration_order_and_restarts() {
        let mut reg = CommandRegistry::new();
        for name in ["zeta", "alpha", "mid"] {
            reg.register(CommandInfo::new(name, noop)).unwrap();
        }
        let first: Vec<&str> = reg.all().map(|(n, _)| n).collect();
        let second: Vec<&str> = reg.all().map(|(n, _)| n).collect();
        assert_eq!(first, vec!["ZETA", "ALPHA", "MID"]);
        assert_eq!(first, second);
        assert_eq!(reg.all().len(), 3);
    }

    #[test]
    fn inverted_bounds_rejected() {
        let mut reg = CommandRegistry::new();
        let err = reg
            .register(CommandInfo::new("bad", noop).args(2, Some(1)))
            .unwrap_err();
        assert!(matches!(
            err,
            TerminalError::InvalidArgBounds { min: 2, max: 1, .. }
        ));
        assert!(reg.is_empty());
    }

    #[test]
    fn empty_or_spaced_names_rejected() {
        let mut reg = CommandRegistry::new();
        assert!(matches!(
            reg.register(CommandInfo::new("", noop)),
            Err(TerminalError::InvalidName(_))
        ));
        assert!(matches!(
            reg.register(CommandInfo::new("two words", noop)),
            Err(TerminalError::InvalidName(_))
        ));
    }

    #[test]
    fn arg_count_exactly() {
        let info = CommandInfo::new("clear", noop).max_args(0);
        assert!(info.check_arg_count(0).is_ok());
        let err = info.check_arg_count(1).unwrap_err();
        assert_eq!(err.to_string(), "CLEAR requires exactly 0 arguments");
    }

    #[test]
    fn arg_count_at_least() {
        let info = CommandInfo::new("time", noop).min_args(1);
        let err = info.check_arg_count(0).unwrap_err();
        assert_eq!(err.to_string(), "TIME requires at least 1 argument");
        assert!(info.check_arg_count(50).is_ok());
    }

    #[test]
    fn arg_count_at_most() {
        let info = CommandInfo::new("help", noop).max_args(1);
        assert!(info.check_arg_count(0).is_ok());
        assert!(info.check_arg_count(1).is_ok());
        let err = info.check_arg_count(2).unwrap_err();
        assert_eq!(err.to_string(), "HELP requires at most 1 argument");
    }

    #[test]
    fn arg_count_exact_nonzero_below() {
        let info = CommandInfo::new("pair", noop).args(2, Some(2));
        let err = info.check_arg_count(1).unwrap_err();
        assert_eq!(err.to_string(), "PAIR requires exactly 2 arguments");
    }

    #[test]
    fn builder_records_metadata() {
        let info = CommandInfo::new("set", noop)
            .help("Sets a variable")
            .hint("set NAME VALUE")
            .args(1, None);
        assert_eq!(info.help_text(), Some("Sets a variable"));
        assert_eq!(info.hint_text(), Some("set NAME VALUE"));
        assert_eq!(info.min_arg_count(), 1);
        assert_eq!(info.max_arg_count(), None);
    }
}
