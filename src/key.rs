//! Key normalization and dotted-path formation.

#[cfg(test)]
#[path = "./key_tests.rs"]
mod tests;

use crate::emit::quote_basic;
use crate::scanner::is_bare_key_char;

/// Renders a key the way it appears in a document: bare when every character
/// matches the bare-key grammar, quoted as a basic string otherwise.
pub(crate) fn normalize_key(key: &str) -> String {
    if !key.is_empty() && key.chars().all(|c| c.is_ascii() && is_bare_key_char(c as u8)) {
        return key.to_string();
    }
    let mut quoted = String::with_capacity(key.len() + 2);
    quoted.push('"');
    quoted.push_str(&quote_basic(key, false, false));
    quoted.push('"');
    quoted
}

/// Appends a key segment to a dotted path.
pub(crate) fn combine_key_path(path: &str, key: &str) -> String {
    let key = normalize_key(key);
    if path.is_empty() {
        return key;
    }
    let mut combined = String::with_capacity(path.len() + key.len() + 1);
    combined.push_str(path);
    combined.push('.');
    combined.push_str(&key);
    combined
}

/// Appends an array position to a dotted path, rendered `path[i]`.
pub(crate) fn combine_index_path(path: &str, index: usize) -> String {
    format!("{path}[{index}]")
}
