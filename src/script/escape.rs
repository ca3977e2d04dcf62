// src/script/escape.rs

//! Quoting of paths for the places they appear in a script.
//!
//! GNU make unescapes `\%` only in targets, where a bare `%` would turn the
//! rule into a pattern rule; in prerequisites `%` must stay bare. A literal
//! `=` cannot be backslash-escaped anywhere on a rule line, so it is spelled
//! through [`EQUALS_VAR`], which the script defines before its first rule.
//! Characters make cannot carry at all are rejected up front by
//! [`check_representable`].

use std::path::Path;

use crate::errors::{Result, RfError};

/// Variable holding a literal `=`, for paths that contain one.
pub const EQUALS_VAR: &str = "RF_EQUALS";

/// Which side of a rule's colon a word is written on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Target,
    Prerequisite,
}

/// Escape a path for the given position in a make rule.
pub fn make_word(path: &Path, position: Position) -> String {
    let raw = path.to_string_lossy();
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match (ch, position) {
            (' ' | '#' | ':' | '\\', _) | ('%', Position::Target) => {
                out.push('\\');
                out.push(ch);
            }
            ('=', _) => {
                out.push_str("$(");
                out.push_str(EQUALS_VAR);
                out.push(')');
            }
            ('$', _) => out.push_str("$$"),
            _ => out.push(ch),
        }
    }
    out
}

/// True if writing `path` needs the [`EQUALS_VAR`] definition.
pub fn needs_equals_var(path: &Path) -> bool {
    path.to_string_lossy().contains('=')
}

/// Reject paths make has no way to spell.
///
/// Tabs and newlines end a rule line or start a recipe, and `;` on a rule
/// line starts an inline recipe even when backslash-escaped.
pub fn check_representable(path: &Path) -> Result<()> {
    let raw = path.to_string_lossy();
    match raw.chars().find(|c| matches!(c, '\t' | '\n' | '\r' | ';')) {
        Some(ch) => Err(RfError::UnrepresentablePath {
            path: path.to_path_buf(),
            ch,
        }),
        None => Ok(()),
    }
}

/// Quote a path as a single shell word inside a make recipe.
///
/// Plain paths are left alone; anything else is single-quoted. `$` is
/// doubled in both cases since make expands recipes before the shell sees them.
pub fn shell_word(path: &Path) -> String {
    let raw = path.to_string_lossy();
    let plain = !raw.is_empty()
        && raw
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "/._-+,=@".contains(c));

    let quoted = if plain {
        raw.into_owned()
    } else {
        format!("'{}'", raw.replace('\'', r"'\''"))
    };
    quoted.replace('$', "$$")
}
