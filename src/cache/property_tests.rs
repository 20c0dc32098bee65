//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the store and the shell formatters against
//! arbitrary file contents.

use proptest::prelude::*;
use std::fs;
use std::time::Duration;

use tempfile::tempdir;

use crate::cache::{Invalidation, VarStore};
use crate::shell::{escape_export_value, format_alias_line};

// == Strategies ==
/// A single value line: printable, no newlines, not blank after trimming
fn value_line_strategy() -> impl Strategy<Value = String> {
    "[ \t]{0,3}[!-~][ -~]{0,40}[ \t]{0,3}".prop_map(|s| s)
}

/// Alias file lines in any of the accepted syntaxes
fn alias_line_strategy() -> impl Strategy<Value = String> {
    let name = "[a-z][a-z0-9_]{0,8}";
    prop_oneof![
        (name, "[a-z -]{1,20}").prop_map(|(n, v)| format!("{}={}", n, v)),
        (name, "[a-z -]{1,20}").prop_map(|(n, v)| format!("{}='{}'", n, v)),
        (name, "[a-z -]{1,20}").prop_map(|(n, v)| format!("{}=\"{}\"", n, v)),
        name.prop_map(|n| n.to_string()),
        (name, "[a-z -]{1,20}").prop_map(|(n, v)| format!("alias {}='{}'", n, v)),
    ]
}

#[derive(Debug, Clone)]
enum FileOp {
    Write(Vec<String>),
    Delete,
    Invalidate,
    Read,
}

fn file_op_strategy() -> impl Strategy<Value = FileOp> {
    prop_oneof![
        prop::collection::vec("[a-z0-9]{1,8}", 0..4).prop_map(FileOp::Write),
        Just(FileOp::Delete),
        Just(FileOp::Invalidate),
        Just(FileOp::Read),
    ]
}

/// Reverses `escape_export_value`.
fn unescape(escaped: &str) -> String {
    let mut out = String::new();
    let mut chars = escaped.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(ch);
        }
    }
    out
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // A file with exactly one non-empty line always resolves to that line, trimmed.
    #[test]
    fn prop_single_line_resolves_verbatim(line in value_line_strategy(), blanks in 0usize..3) {
        let dir = tempdir().unwrap();
        let vars = dir.path().join("vars");
        fs::create_dir(&vars).unwrap();
        let contents = format!("{}{}\n{}", "\n".repeat(blanks), line, "  \n".repeat(blanks));
        fs::write(vars.join("VALUE"), contents).unwrap();

        let mut store = VarStore::new(&vars, dir.path().join("aliases"), Duration::from_secs(1));
        let values = store.candidates("VALUE");
        prop_assert_eq!(values, Some(vec![line.trim().to_string()]));
    }

    // Whatever sequence of edits happens, a read never returns stale contents.
    #[test]
    fn prop_reads_track_file_contents(ops in prop::collection::vec(file_op_strategy(), 1..20)) {
        let dir = tempdir().unwrap();
        let vars = dir.path().join("vars");
        fs::create_dir(&vars).unwrap();
        let path = vars.join("FOO");
        let mut store = VarStore::new(&vars, dir.path().join("aliases"), Duration::from_secs(60));
        let mut expected: Option<Vec<String>> = None;

        for op in ops {
            match op {
                FileOp::Write(lines) => {
                    fs::write(&path, lines.join("\n")).unwrap();
                    expected = if lines.is_empty() { None } else { Some(lines) };
                }
                FileOp::Delete => {
                    let _ = fs::remove_file(&path);
                    expected = None;
                }
                FileOp::Invalidate => store.apply(Invalidation::Variable("FOO".to_string())),
                FileOp::Read => {
                    prop_assert_eq!(store.candidates("FOO"), expected.clone());
                }
            }
        }
    }

    // Formatting an alias statement again leaves it unchanged.
    #[test]
    fn prop_alias_format_idempotent(line in alias_line_strategy()) {
        let once = format_alias_line(&line);
        prop_assert!(once.starts_with("alias "));
        prop_assert_eq!(format_alias_line(&once), once.clone());
    }

    // Escaped values contain no bare quote or dollar and unescape to the input.
    #[test]
    fn prop_export_escaping_reversible(value in "[ -~]{0,40}") {
        let escaped = escape_export_value(&value);
        let mut chars = escaped.chars();
        while let Some(ch) = chars.next() {
            prop_assert!(ch != '"' && ch != '$', "bare {:?} in {:?}", ch, escaped);
            if ch == '\\' {
                let next = chars.next();
                prop_assert!(matches!(next, Some('\\') | Some('"') | Some('$')));
            }
        }
        prop_assert_eq!(unescape(&escaped), value);
    }
}
