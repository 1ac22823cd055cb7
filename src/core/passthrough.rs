//! Purpose: Parse flags for commands that have no built-in option schema.
//! Exports: `PassthroughArgs`, `parse_passthrough`.
//! Role: Give custom/plugin commands their flags verbatim for the kernel to interpret.
//! Invariants: Values are never coerced; `--port 8080` stays the text "8080".
//! Invariants: `h`, `help`, `v`, `version` are booleans and never consume a value.

use super::envelope::{OptionValue, Options};

const BOOLEAN_KEYS: &[&str] = &["h", "help", "v", "version"];

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PassthroughArgs {
    pub positionals: Vec<String>,
    pub options: Options,
}

impl PassthroughArgs {
    pub fn is_help(&self) -> bool {
        self.has_true("h") || self.has_true("help")
    }

    fn has_true(&self, key: &str) -> bool {
        matches!(self.options.get(key), Some(Some(OptionValue::Bool(true))))
    }

    /// Drops the help/version keys; help is reported through `isHelp` instead.
    pub fn strip_meta_flags(&mut self) {
        for key in BOOLEAN_KEYS {
            self.options.remove(*key);
        }
    }
}

pub fn parse_passthrough<S: AsRef<str>>(tokens: &[S]) -> PassthroughArgs {
    let mut parsed = PassthroughArgs::default();
    let mut idx = 0;
    while idx < tokens.len() {
        let token = tokens[idx].as_ref();
        idx += 1;

        if token == "--" {
            parsed
                .positionals
                .extend(tokens[idx..].iter().map(|t| t.as_ref().to_string()));
            break;
        }

        if let Some(body) = token.strip_prefix("--") {
            if let Some((key, value)) = body.split_once('=') {
                set(&mut parsed, key, OptionValue::from(value));
            } else if let Some(key) = body.strip_prefix("no-") {
                set(&mut parsed, key, OptionValue::Bool(false));
            } else if let Some(value) = take_value(body, tokens, &mut idx) {
                set(&mut parsed, body, OptionValue::Text(value));
            } else {
                set(&mut parsed, body, OptionValue::Bool(true));
            }
            continue;
        }

        if let Some(body) = token.strip_prefix('-').filter(|body| is_short_group(body)) {
            parse_short_group(&mut parsed, body, tokens, &mut idx);
            continue;
        }

        parsed.positionals.push(token.to_string());
    }
    parsed
}

/// `-abc` sets `a` and `b`; `c` may take the next token. An attached
/// remainder such as `-p8080`, `-p=8080` or `-o/tmp` is the letter's value.
fn parse_short_group<S: AsRef<str>>(
    parsed: &mut PassthroughArgs,
    body: &str,
    tokens: &[S],
    idx: &mut usize,
) {
    for (offset, letter) in body.char_indices() {
        let key = letter.to_string();
        let remainder = &body[offset + letter.len_utf8()..];
        if remainder.is_empty() {
            match take_value(&key, tokens, idx) {
                Some(value) => set(parsed, &key, OptionValue::Text(value)),
                None => set(parsed, &key, OptionValue::Bool(true)),
            }
            return;
        }
        if BOOLEAN_KEYS.contains(&key.as_str()) {
            set(parsed, &key, OptionValue::Bool(true));
            continue;
        }
        if let Some(value) = remainder.strip_prefix('=') {
            set(parsed, &key, OptionValue::from(value));
            return;
        }
        let attached = (letter.is_ascii_alphabetic()
            && remainder.starts_with(|c: char| c.is_ascii_digit())
            && is_number(remainder))
            || remainder
                .chars()
                .next()
                .is_some_and(|next| !(next.is_alphanumeric() || next == '_'));
        if attached {
            set(parsed, &key, OptionValue::from(remainder));
            return;
        }
        set(parsed, &key, OptionValue::Bool(true));
    }
}

fn set(parsed: &mut PassthroughArgs, key: &str, value: OptionValue) {
    parsed.options.insert(key.to_string(), Some(value));
}

fn take_value<S: AsRef<str>>(key: &str, tokens: &[S], idx: &mut usize) -> Option<String> {
    if BOOLEAN_KEYS.contains(&key) {
        return None;
    }
    let next = tokens.get(*idx)?.as_ref();
    if looks_like_flag(next) {
        return None;
    }
    *idx += 1;
    Some(next.to_string())
}

fn is_short_group(body: &str) -> bool {
    !body.is_empty() && !body.starts_with('-') && !is_number(body)
}

fn looks_like_flag(token: &str) -> bool {
    token.len() > 1 && token.starts_with('-') && !is_number(&token[1..])
}

fn is_number(text: &str) -> bool {
    !text.is_empty() && text.parse::<f64>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::parse_passthrough;
    use crate::core::envelope::OptionValue;

    fn text(value: &str) -> Option<OptionValue> {
        Some(OptionValue::Text(value.to_string()))
    }

    #[test]
    fn help_and_version_do_not_swallow_values() {
        let parsed = parse_passthrough(&["entry", "--type", "weapp", "-h", "--version"]);
        assert_eq!(parsed.positionals, vec!["entry"]);
        assert_eq!(parsed.options.get("type"), Some(&text("weapp")));
        assert_eq!(parsed.options.get("h"), Some(&Some(OptionValue::Bool(true))));
        assert_eq!(
            parsed.options.get("version"),
            Some(&Some(OptionValue::Bool(true)))
        );
        assert!(parsed.is_help());
    }

    #[test]
    fn values_are_not_coerced() {
        let parsed = parse_passthrough(&["--port", "8080", "--offset", "-1"]);
        assert_eq!(parsed.options.get("port"), Some(&text("8080")));
        assert_eq!(parsed.options.get("offset"), Some(&text("-1")));
        assert!(parsed.positionals.is_empty());
    }

    #[test]
    fn equals_negation_and_trailing_flags() {
        let parsed = parse_passthrough(&["--mode=dev", "--no-cache", "--verbose"]);
        assert_eq!(parsed.options.get("mode"), Some(&text("dev")));
        assert_eq!(parsed.options.get("cache"), Some(&Some(OptionValue::Bool(false))));
        assert_eq!(parsed.options.get("verbose"), Some(&Some(OptionValue::Bool(true))));
    }

    #[test]
    fn short_groups_set_leading_letters_and_last_takes_value() {
        let parsed = parse_passthrough(&["-ab", "out", "-c=1", "-x"]);
        assert_eq!(parsed.options.get("a"), Some(&Some(OptionValue::Bool(true))));
        assert_eq!(parsed.options.get("b"), Some(&text("out")));
        assert_eq!(parsed.options.get("c"), Some(&text("1")));
        assert_eq!(parsed.options.get("x"), Some(&Some(OptionValue::Bool(true))));
    }

    #[test]
    fn short_flag_keeps_attached_value_as_text() {
        let parsed = parse_passthrough(&["-p8080", "-o/tmp/out", "-xk=v"]);
        assert_eq!(parsed.options.get("p"), Some(&text("8080")));
        assert_eq!(parsed.options.get("o"), Some(&text("/tmp/out")));
        assert_eq!(parsed.options.get("x"), Some(&Some(OptionValue::Bool(true))));
        assert_eq!(parsed.options.get("k"), Some(&text("v")));
        assert_eq!(parsed.options.len(), 4);
        assert!(parsed.positionals.is_empty());
    }

    #[test]
    fn double_dash_ends_flag_parsing() {
        let parsed = parse_passthrough(&["run", "--", "--not-a-flag", "tail"]);
        assert_eq!(parsed.positionals, vec!["run", "--not-a-flag", "tail"]);
        assert!(parsed.options.is_empty());
    }

    #[test]
    fn repeated_key_keeps_last_value() {
        let parsed = parse_passthrough(&["--tag", "a", "--tag", "b"]);
        assert_eq!(parsed.options.get("tag"), Some(&text("b")));
    }

    #[test]
    fn strip_meta_flags_removes_help_and_version_keys() {
        let mut parsed = parse_passthrough(&["--help", "-v", "--type", "h5"]);
        assert!(parsed.is_help());
        parsed.strip_meta_flags();
        assert_eq!(parsed.options.len(), 1);
        assert_eq!(parsed.options.get("type"), Some(&text("h5")));
    }
}
