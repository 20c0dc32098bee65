//! Response Serializer
//!
//! Renders resolved variables and aliases as a script for `eval`.

use std::collections::BTreeMap;

/// Body returned for a request with the wrong token.
pub const INVALID_TOKEN_WARNING: &str =
    r#"echo "Warning: Invalid sharenv key. Please check your SHARENV_ENDPOINT configuration.""#;

/// Escapes a value for use inside a double-quoted shell string.
///
/// Only `\`, `"` and `$` are escaped. Backticks are left alone and will be
/// command-substituted by the caller's shell.
pub fn escape_export_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '$' => escaped.push_str("\\$"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Formats one `export NAME="VALUE"` statement.
pub fn export_line(name: &str, value: &str) -> String {
    format!("export {}=\"{}\"", name, escape_export_value(value))
}

/// Renders exports (sorted by name) followed by aliases, one per line.
pub fn render_script(vars: &BTreeMap<String, String>, aliases: &[String]) -> String {
    vars.iter()
        .map(|(name, value)| export_line(name, value))
        .chain(aliases.iter().cloned())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Returns true if `name` can be exported as a POSIX shell variable.
pub fn is_shell_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first == '_' || first.is_ascii_alphabetic() => {
            chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
        }
        _ => false,
    }
}
