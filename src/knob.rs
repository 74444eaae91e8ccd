//! Rewrite annotated source lines: `foo(1.0); // knob: 2.5` becomes
//! `foo(2.5); // knob: 2.5`.

use regex::Regex;
use std::sync::LazyLock;

static KNOB: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"knob: (.*)").unwrap());
static PARENS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\([^)]*\)").unwrap());

/// Substitute the annotated value into every parenthesised group of `line`.
/// Lines without a `knob:` annotation are returned unchanged.
pub fn adjust_line(line: &str) -> String {
    let Some(caps) = KNOB.captures(line) else {
        return line.to_string();
    };
    let value = caps[1].trim_end();
    PARENS
        .replace_all(line, regex::NoExpand(&format!("({value})")))
        .into_owned()
}
