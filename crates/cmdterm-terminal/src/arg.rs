//! Argument values: one whitespace-delimited token with typed accessors.

use std::fmt;

use cmdterm_types::error::{ArgKind, Result, TerminalError};

/// A single command argument.
///
/// Conversions are lazy: the token is kept and parsed only when a handler
/// asks for a typed value. When the token was a `$NAME` reference, the value
/// is the variable's contents and [`CommandArg::raw`] still returns the token
/// as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandArg {
    value: String,
    raw: Option<String>,
}

impl CommandArg {
    /// Wrap a raw token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            value: token.into(),
            raw: None,
        }
    }

    /// An argument whose typed token `raw` expanded to `value`.
    pub(crate) fn substituted(raw: &str, value: &str) -> Self {
        Self {
            value: value.to_string(),
            raw: Some(raw.to_string()),
        }
    }

    /// The argument value.
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// The token as it was typed, before variable substitution.
    pub fn raw(&self) -> &str {
        self.raw.as_deref().unwrap_or(&self.value)
    }

    pub fn as_int(&self) -> Result<i64> {
        self.value.parse().map_err(|_| self.parse_error(ArgKind::Int))
    }

    /// Finite decimal values only; `inf` and `NaN` are rejected.
    pub fn as_float(&self) -> Result<f64> {
        match self.value.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(self.parse_error(ArgKind::Float)),
        }
    }

    /// Accepts `true`/`false` in any case, or `1`/`0`.
    pub fn as_bool(&self) -> Result<bool> {
        if self.value.eq_ignore_ascii_case("true") || self.value == "1" {
            Ok(true)
        } else if self.value.eq_ignore_ascii_case("false") || self.value == "0" {
            Ok(false)
        } else {
            Err(self.parse_error(ArgKind::Bool))
        }
    }

    fn parse_error(&self, expected: ArgKind) -> TerminalError {
        TerminalError::Parse {
            token: self.value.clone(),
            expected,
        }
    }
}

impl fmt::Display for CommandArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl From<&str> for CommandArg {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for CommandArg {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// Join argument string forms with single spaces.
pub fn join_arguments(args: &[CommandArg]) -> String {
    join_with(args, CommandArg::as_str)
}

/// Join the arguments as typed, so the line can be dispatched again and
/// substitute variables exactly once.
pub fn join_raw_arguments(args: &[CommandArg]) -> String {
    join_with(args, CommandArg::raw)
}

fn join_with(args: &[CommandArg], part: fn(&CommandArg) -> &str) -> String {
    let mut out = String::new();
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(part(arg));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn as_str_never_fails() {
        assert_eq!(CommandArg::new("anything-goes").as_str(), "anything-goes");
        assert_eq!(CommandArg::new("").as_str(), "");
    }

    #[test]
    fn int_parses_signed_decimal() {
        assert_eq!(CommandArg::new("42").as_int().unwrap(), 42);
        assert_eq!(CommandArg::new("-7").as_int().unwrap(), -7);
    }

    #[test]
    fn int_rejects_garbage() {
        match CommandArg::new("4x2").as_int() {
            Err(TerminalError::Parse { token, expected }) => {
                assert_eq!(token, "4x2");
                assert_eq!(expected, ArgKind::Int);
            },
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn int_rejects_float_literal() {
        assert!(CommandArg::new("1.5").as_int().is_err());
    }

    #[test]
    fn float_parses() {
        assert!((CommandArg::new("2.5").as_float().unwrap() - 2.5).abs() < f64::EPSILON);
        assert!((CommandArg::new("3").as_float().unwrap() - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn float_rejects_word() {
        let err = CommandArg::new("pi").as_float().unwrap_err();
        assert!(matches!(
            err,
            TerminalError::Parse {
                expected: ArgKind::Float,
                ..
            }
        ));
    }

    #[test]
    fn float_rejects_non_finite() {
        for token in ["inf", "-inf", "infinity", "NaN", "nan"] {
            assert!(CommandArg::new(token).as_float().is_err(), "{token}");
        }
    }

    #[test]
    fn substituted_keeps_typed_token() {
        let arg = CommandArg::substituted("$who", "the world");
        assert_eq!(arg.as_str(), "the world");
        assert_eq!(arg.raw(), "$who");
        assert_eq!(CommandArg::new("plain").raw(), "plain");
    }

    #[test]
    fn raw_join_uses_typed_tokens() {
        let args = vec![
            CommandArg::new("help"),
            CommandArg::substituted("$c", "print time"),
        ];
        assert_eq!(join_arguments(&args), "help print time");
        assert_eq!(join_raw_arguments(&args), "help $c");
    }

    #[test]
    fn bool_vocabulary() {
        for t in ["true", "TRUE", "True", "1"] {
            assert!(CommandArg::new(t).as_bool().unwrap(), "{t}");
        }
        for f in ["false", "FALSE", "fAlSe", "0"] {
            assert!(!CommandArg::new(f).as_bool().unwrap(), "{f}");
        }
    }

    #[test]
    fn bool_rejects_other_words() {
        for bad in ["yes", "no", "2", "", "on"] {
            assert!(CommandArg::new(bad).as_bool().is_err(), "{bad}");
        }
    }

    #[test]
    fn join_uses_single_spaces_without_trailing() {
        let args = vec![CommandArg::from("a"), CommandArg::from("b"), CommandArg::from("c")];
        assert_eq!(join_arguments(&args), "a b c");
    }

    #[test]
    fn join_empty_is_empty() {
        assert_eq!(join_arguments(&[]), "");
    }

    #[test]
    fn display_is_raw_token() {
        assert_eq!(CommandArg::new("$X").to_string(), "$X");
    }
}
