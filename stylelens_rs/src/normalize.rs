//! Canonical comparison keys for class attributes and inline styles.
//!
//! Sorting is what makes textual order irrelevant: two attributes with the
//! same multiset of tokens always produce the same key, and feeding a key
//! back through its function returns it unchanged.

/// Trim, split on whitespace runs, sort tokens, rejoin with single spaces.
///
/// Whitespace-only input yields the empty string, which callers must treat
/// as "no usage".
pub fn normalize_class_string(raw: &str) -> String {
    let mut tokens: Vec<&str> = raw.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Split on `;`, trim declarations, drop empty ones, sort, rejoin with `"; "`.
pub fn normalize_style_string(raw: &str) -> String {
    let mut declarations: Vec<&str> = raw
        .split(';')
        .map(str::trim)
        .filter(|decl| !decl.is_empty())
        .collect();
    declarations.sort_unstable();
    declarations.join("; ")
}

/// Rewrite one `prop:value` declaration as `prop: value`.
///
/// Static `style="..."` strings go through this before normalization so they
/// compare equal to object-literal styles, which are always emitted in this shape.
pub(crate) fn canonical_declaration(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.split_once(':') {
        Some((prop, value)) => {
            let prop = prop.trim();
            let value = value.trim();
            if prop.is_empty() {
                return None;
            }
            Some(format!("{prop}: {value}"))
        }
        None => Some(raw.to_string()),
    }
}

/// Canonicalize a static declaration list (`color:red;padding: 4px`).
pub(crate) fn canonical_declaration_list(raw: &str) -> String {
    let declarations: Vec<String> = raw.split(';').filter_map(canonical_declaration).collect();
    normalize_style_string(&declarations.join(";"))
}
