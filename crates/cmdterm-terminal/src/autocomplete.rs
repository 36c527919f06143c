//! Tab completion over known command names.
//!
//! Only the last whitespace-delimited word of the input is completed. Matching
//! is case-insensitive and suggestions are returned lowercase, in the order
//! the words were registered.

use crate::registry::CommandRegistry;

/// Result of a completion attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Completion {
    /// Exactly one match; the full completed line.
    Single(String),
    /// Several matches: the line extended to their common prefix, and the
    /// matching words.
    Multiple(String, Vec<String>),
    /// Nothing matched.
    None,
}

/// Known-word list used for completion.
#[derive(Clone, Debug, Default)]
pub struct Autocomplete {
    known_words: Vec<String>,
}

impl Autocomplete {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the word list with every registered command name.
    pub fn from_registry(registry: &CommandRegistry) -> Self {
        let mut ac = Self::new();
        for name in registry.names() {
            ac.register(name);
        }
        ac
    }

    /// Add a word. Duplicates (ignoring case) are skipped.
    pub fn register(&mut self, word: &str) {
        let word = word.to_lowercase();
        if !word.is_empty() && !self.known_words.contains(&word) {
            self.known_words.push(word);
        }
    }

    /// Every known word starting with the partial last word of `text`.
    pub fn complete(&self, text: &str) -> Vec<String> {
        let partial = last_word(text).to_lowercase();
        self.known_words
            .iter()
            .filter(|w| w.starts_with(&partial))
            .cloned()
            .collect()
    }

    /// Complete the last word of `text` in place.
    pub fn complete_line(&self, text: &str) -> Completion {
        let matches = self.complete(text);
        let head = &text[..text.len() - last_word(text).len()];
        match matches.len() {
            0 => Completion::None,
            1 => Completion::Single(format!("{head}{}", matches[0])),
            _ => {
                let prefix = common_prefix(&matches);
                Completion::Multiple(format!("{head}{prefix}"), matches)
            },
        }
    }
}

/// The trailing word being typed; empty if `text` ends in whitespace.
fn last_word(text: &str) -> &str {
    match text.rfind(char::is_whitespace) {
        Some(i) => {
            let ws_len = text[i..].chars().next().map_or(1, char::len_utf8);
            &text[i + ws_len..]
        },
        None => text,
    }
}

fn common_prefix(words: &[String]) -> &str {
    let Some(first) = words.first() else {
        return "";
    };
    let mut end = first.len();
    for word in &words[1..] {
        end = first
            .char_indices()
            .zip(word.chars())
            .take_while(|((_, a), b)| a == b)
            .last()
            .map_or(0, |((i, a), _)| i + a.len_utf8())
            .min(end);
    }
    &first[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmdterm_types::config::TerminalConfig;

    use crate::interpreter::Interpreter;

    fn words(list: &[&str]) -> Autocomplete {
        let mut ac = Autocomplete::new();
        for w in list {
            ac.register(w);
        }
        ac
    }

    #[test]
    fn seeded_from_registry() {
        let interp = Interpreter::new(&TerminalConfig::default()).unwrap();
        let ac = Autocomplete::from_registry(interp.registry());
        assert_eq!(ac.complete("pr"), vec!["print"]);
        assert_eq!(ac.complete("QU"), vec!["quit"]);
    }

    #[test]
    fn multiple_matches_in_registration_order() {
        let ac = words(&["help", "hello", "hex", "time"]);
        assert_eq!(ac.complete("he"), vec!["help", "hello", "hex"]);
        assert_eq!(ac.complete(""), vec!["help", "hello", "hex", "time"]);
    }

    #[test]
    fn duplicates_ignored() {
        let ac = words(&["print", "PRINT", ""]);
        assert_eq!(ac.complete(""), vec!["print"]);
    }

    #[test]
    fn completes_last_word_only() {
        let ac = words(&["print", "time"]);
        assert_eq!(
            ac.complete_line("time pri"),
            Completion::Single("time print".to_string())
        );
        assert_eq!(ac.complete_line("time "), Completion::Multiple(
            "time ".to_string(),
            vec!["print".to_string(), "time".to_string()]
        ));
    }

    #[test]
    fn multiple_extends_to_common_prefix() {
        let ac = words(&["help", "hello"]);
        assert_eq!(
            ac.complete_line("h"),
            Completion::Multiple(
                "hel".to_string(),
                vec!["help".to_string(), "hello".to_string()]
            )
        );
    }

    #[test]
    fn no_match() {
        let ac = words(&["print"]);
        assert_eq!(ac.complete_line("zz"), Completion::None);
    }

    #[test]
    fn common_prefix_cases() {
        let list = |v: &[&str]| v.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        assert_eq!(common_prefix(&list(&["abc", "abd"])), "ab");
        assert_eq!(common_prefix(&list(&["abc", "xyz"])), "");
        assert_eq!(common_prefix(&list(&["same", "same"])), "same");
        assert_eq!(common_prefix(&list(&["long", "lo"])), "lo");
        assert_eq!(common_prefix(&[]), "");
    }

    #[test]
    fn last_word_split() {
        assert_eq!(last_word("time pr"), "pr");
        assert_eq!(last_word("time "), "");
        assert_eq!(last_word("solo"), "solo");
    }
}
