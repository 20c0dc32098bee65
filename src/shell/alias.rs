//! Alias Formatter
//!
//! Turns alias-file lines into `alias` statements. Accepted line forms:
//! - `alias ll='ls -la'` (passed through)
//! - `ll=ls -la`, `ll='ls -la'`, `ll="ls -la"`
//! - `ll` (name only)
//!
//! Unquoted values are wrapped in single quotes as-is; a value that itself
//! contains `'` produces a statement the shell cannot parse.

const ALIAS_KEYWORD: &str = "alias ";

/// Formats every non-empty line of an alias file.
pub fn format_aliases<'a, I>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    lines
        .into_iter()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(format_alias_line)
        .collect()
}

/// Formats one trimmed, non-empty alias line.
pub fn format_alias_line(line: &str) -> String {
    if line.starts_with(ALIAS_KEYWORD) {
        return line.to_string();
    }

    match line.split_once('=') {
        Some((name, value)) => {
            let name = name.trim();
            let value = value.trim();
            if is_quoted(value) {
                format!("alias {}={}", name, value)
            } else {
                format!("alias {}='{}'", name, value)
            }
        }
        None => format!("alias {}", line.trim()),
    }
}

fn is_quoted(value: &str) -> bool {
    value.len() >= 2
        && ((value.starts_with('\'') && value.ends_with('\''))
            || (value.starts_with('"') && value.ends_with('"')))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unquoted_value_gets_single_quotes() {
        assert_eq!(format_alias_line("FOO=bar"), "alias FOO='bar'");
        assert_eq!(format_alias_line("ll=ls -la"), "alias ll='ls -la'");
    }

    #[test]
    fn test_existing_quotes_preserved() {
        assert_eq!(format_alias_line("FOO=\"bar\""), "alias FOO=\"bar\"");
        assert_eq!(format_alias_line("FOO='bar baz'"), "alias FOO='bar baz'");
    }

    #[test]
    fn test_name_only() {
        assert_eq!(format_alias_line("justname"), "alias justname");
    }

    #[test]
    fn test_already_formatted_passes_through() {
        assert_eq!(format_alias_line("alias X='y'"), "alias X='y'");
        assert_eq!(format_alias_line("alias gs=git status"), "alias gs=git status");
    }

    #[test]
    fn test_splits_on_first_equals_only() {
        assert_eq!(
            format_alias_line("envy=env FOO=1 cmd"),
            "alias envy='env FOO=1 cmd'"
        );
    }

    #[test]
    fn test_whitespace_around_equals_trimmed() {
        assert_eq!(format_alias_line("gs = git status"), "alias gs='git status'");
    }

    #[test]
    fn test_mismatched_or_lone_quote_gets_wrapped() {
        assert_eq!(format_alias_line("a='b\""), "alias a=''b\"'");
        assert_eq!(format_alias_line("a='"), "alias a='''");
    }

    #[test]
    fn test_empty_value() {
        assert_eq!(format_alias_line("nothing="), "alias nothing=''");
    }

    #[test]
    fn test_embedded_single_quote_is_not_escaped() {
        assert_eq!(format_alias_line("say=echo it's"), "alias say='echo it's'");
    }

    #[test]
    fn test_format_aliases_skips_blank_lines() {
        let text = "ll=ls -la\n\n   \nalias gs='git status'\nhome\n";
        assert_eq!(
            format_aliases(text.lines()),
            vec!["alias ll='ls -la'", "alias gs='git status'", "alias home"]
        );
    }

    #[test]
    fn test_format_is_idempotent() {
        for line in ["FOO=bar", "FOO=\"bar\"", "justname", "alias X='y'", "a=b=c"] {
            let once = format_alias_line(line);
            assert_eq!(format_alias_line(&once), once);
        }
    }
}
