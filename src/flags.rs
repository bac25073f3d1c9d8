//! Flag parsing for command arguments.
//!
//! The dispatcher only depends on the [`FlagParser`] contract. The default
//! [`MinimistParser`] is minimist-style, following the conventions chat users
//! already know from node CLIs:
//!
//! - `--key value` and `--key=value`
//! - `--no-key` sets `key` to `"false"`, or `""` for declared string options
//! - bare `--key` is `""` for declared string options, `"true"` otherwise
//! - `-abc` sets `a` and `b`, and `c` may take the following token
//! - `-k=value` and `-n5`
//! - `--` ends flag parsing; everything after it is positional
//!
//! Values are never coerced: `--x 1` yields the string `"1"`.
//!
//! Differences from minimist:
//!
//! - a repeated key keeps its last value instead of collecting an array
//! - in a cluster, a letter takes the rest as its value only when the rest is
//!   entirely a number, so `-ab5` gives `a="true"`, `b="5"` rather than `a="b5"`

use std::iter::Peekable;
use std::slice::Iter;

use crate::commands::OptionValues;

/// Output of a flag parser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedFlags {
    pub named: OptionValues,
    pub positional: Vec<String>,
}

/// Turns raw argument tokens into named values and positionals.
pub trait FlagParser: Send + Sync {
    /// Parse `tokens`, treating every name in `string_options` as a string flag.
    fn parse(&self, tokens: &[String], string_options: &[&str]) -> ParsedFlags;
}

/// Default minimist-style parser.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinimistParser;

impl FlagParser for MinimistParser {
    fn parse(&self, tokens: &[String], string_options: &[&str]) -> ParsedFlags {
        let mut state = ParseState {
            parsed: ParsedFlags::default(),
            string_options,
        };
        let mut tokens = tokens.iter().peekable();

        while let Some(token) = tokens.next() {
            if token == "--" {
                state.parsed.positional.extend(tokens.by_ref().cloned());
                break;
            }

            if let Some(body) = token.strip_prefix("--") {
                if let Some((key, value)) = body.split_once('=') {
                    state.set(key, value);
                } else if let Some(key) = body.strip_prefix("no-") {
                    state.negate(key);
                } else {
                    state.set_or_take(body, &mut tokens);
                }
            } else if let Some(cluster) = token.strip_prefix('-').filter(|c| !c.is_empty()) {
                state.short_cluster(cluster, &mut tokens);
            } else {
                state.parsed.positional.push(token.clone());
            }
        }

        state.parsed
    }
}

struct ParseState<'a> {
    parsed: ParsedFlags,
    string_options: &'a [&'a str],
}

impl ParseState<'_> {
    fn set(&mut self, key: &str, value: &str) {
        self.parsed.named.insert(key, value);
    }

    /// `--no-key`: string options never become booleans, so they are left empty.
    fn negate(&mut self, key: &str) {
        if self.string_options.contains(&key) {
            self.set(key, "");
        } else {
            self.set(key, "false");
        }
    }

    /// Value for a flag given without one.
    fn bare_value(&self, key: &str) -> &'static str {
        if self.string_options.contains(&key) {
            ""
        } else {
            "true"
        }
    }

    /// Assign `key` the next token when it is a value, else the bare value.
    fn set_or_take(&mut self, key: &str, tokens: &mut Peekable<Iter<'_, String>>) {
        match tokens.next_if(|next| is_value(next)) {
            Some(value) => self.set(key, value),
            None => self.set(key, self.bare_value(key)),
        }
    }

    fn short_cluster(&mut self, cluster: &str, tokens: &mut Peekable<Iter<'_, String>>) {
        let letters: Vec<(usize, char)> = cluster.char_indices().collect();
        let Some(&(_, last)) = letters.last() else {
            return;
        };

        for (pos, &(offset, letter)) in letters[..letters.len() - 1].iter().enumerate() {
            let key = letter.to_string();
            let rest = &cluster[offset + letter.len_utf8()..];

            if rest == "-" {
                self.set(&key, rest);
                continue;
            }
            if letter.is_ascii_alphabetic() {
                if let Some(value) = rest.strip_prefix('=') {
                    self.set(&key, value);
                    return;
                }
                if is_numeric(rest) {
                    self.set(&key, rest);
                    return;
                }
            }
            let following = letters[pos + 1].1;
            if !(following.is_ascii_alphanumeric() || following == '_') {
                self.set(&key, rest);
                return;
            }
            self.set(&key, self.bare_value(&key));
        }

        if last != '-' {
            self.set_or_take(&last.to_string(), tokens);
        }
    }
}

/// A following token is consumed as a value unless it looks like a flag.
fn is_value(token: &str) -> bool {
    if token == "--" {
        return false;
    }
    let body = token
        .strip_prefix("--")
        .or_else(|| token.strip_prefix('-'));
    match body {
        Some(rest) => rest.starts_with('-') || rest.is_empty(),
        None => true,
    }
}

fn is_numeric(s: &str) -> bool {
    let s = s.strip_prefix('-').unwrap_or(s);
    let (int, frac) = match s.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (s, None),
    };
    !int.is_empty()
        && int.chars().all(|c| c.is_ascii_digit())
        && frac.is_none_or(|f| f.chars().all(|c| c.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str, strings: &[&str]) -> ParsedFlags {
        let tokens: Vec<String> = input.split_whitespace().map(String::from).collect();
        MinimistParser.parse(&tokens, strings)
    }

    #[test]
    fn long_flag_with_separate_value() {
        let parsed = parse("--foo_required bar", &["foo_required"]);
        assert_eq!(parsed.named.get("foo_required"), Some("bar"));
        assert!(parsed.positional.is_empty());
    }

    #[test]
    fn long_flag_with_equals() {
        let parsed = parse("--env=prod --tag=v1=rc", &[]);
        assert_eq!(parsed.named.get("env"), Some("prod"));
        assert_eq!(parsed.named.get("tag"), Some("v1=rc"));
    }

    #[test]
    fn numbers_stay_strings() {
        let parsed = parse("--count 007 --ratio 1.50 --flag true", &["count", "ratio", "flag"]);
        assert_eq!(parsed.named.get("count"), Some("007"));
        assert_eq!(parsed.named.get("ratio"), Some("1.50"));
        assert_eq!(parsed.named.get("flag"), Some("true"));
    }

    #[test]
    fn bare_flag_depends_on_declaration() {
        let parsed = parse("--declared --other", &["declared"]);
        assert_eq!(parsed.named.get("declared"), Some(""));
        assert_eq!(parsed.named.get("other"), Some("true"));
    }

    #[test]
    fn flag_does_not_swallow_next_flag() {
        let parsed = parse("--a --b value", &["a", "b"]);
        assert_eq!(parsed.named.get("a"), Some(""));
        assert_eq!(parsed.named.get("b"), Some("value"));
    }

    #[test]
    fn negated_flag() {
        let parsed = parse("--no-color", &[]);
        assert_eq!(parsed.named.get("color"), Some("false"));
    }

    #[test]
    fn negated_string_option_is_empty() {
        let parsed = parse("--no-env --no-color", &["env"]);
        assert_eq!(parsed.named.get("env"), Some(""));
        assert_eq!(parsed.named.get("color"), Some("false"));
    }

    #[test]
    fn cluster_with_trailing_number() {
        let parsed = parse("-ab5", &[]);
        assert_eq!(parsed.named.get("a"), Some("true"));
        assert_eq!(parsed.named.get("b"), Some("5"));
    }

    #[test]
    fn positionals_kept_in_order() {
        let parsed = parse("one --key v two three", &["key"]);
        assert_eq!(parsed.positional, vec!["one", "two", "three"]);
        assert_eq!(parsed.named.get("key"), Some("v"));
    }

    #[test]
    fn double_dash_ends_flags() {
        let parsed = parse("--key -- --not-a-flag -x", &["key"]);
        assert_eq!(parsed.named.get("key"), Some(""));
        assert_eq!(parsed.positional, vec!["--not-a-flag", "-x"]);
        assert_eq!(parsed.named.len(), 1);
    }

    #[test]
    fn short_cluster() {
        let parsed = parse("-abc value", &[]);
        assert_eq!(parsed.named.get("a"), Some("true"));
        assert_eq!(parsed.named.get("b"), Some("true"));
        assert_eq!(parsed.named.get("c"), Some("value"));
        assert!(parsed.positional.is_empty());
    }

    #[test]
    fn short_with_attached_value() {
        let parsed = parse("-n5 -k=v", &[]);
        assert_eq!(parsed.named.get("n"), Some("5"));
        assert_eq!(parsed.named.get("k"), Some("v"));
    }

    #[test]
    fn lone_dash_is_positional() {
        let parsed = parse("- file", &[]);
        assert_eq!(parsed.positional, vec!["-", "file"]);
        assert!(parsed.named.is_empty());
    }

    #[test]
    fn repeated_key_last_wins() {
        let parsed = parse("--env dev --env prod", &["env"]);
        assert_eq!(parsed.named.get("env"), Some("prod"));
    }

    #[test]
    fn numeric_helper() {
        assert!(is_numeric("5"));
        assert!(is_numeric("-12.5"));
        assert!(!is_numeric(""));
        assert!(!is_numeric("5a"));
        assert!(!is_numeric("inf"));
    }
}
