//! Class selectors defined by stylesheets.
//!
//! The scan is a deliberate over-approximation: any `.name` anywhere in the
//! text counts, including comments and numbers like `.5em`. A spurious
//! definition only hides an "undefined class" report, while a missed one
//! would create a false report.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::types::StylesheetDocument;

pub(crate) fn regex_class_selector() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\.([A-Za-z0-9_-]+)").expect("valid regex literal"))
}

/// Set of class names (without the leading `.`) defined across stylesheets.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DefinedClassSet {
    classes: HashSet<String>,
}

impl DefinedClassSet {
    pub fn contains(&self, class_name: &str) -> bool {
        self.classes.contains(class_name)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    fn extend_from_text(&mut self, text: &str) {
        for caps in regex_class_selector().captures_iter(text) {
            if let Some(name) = caps.get(1) {
                self.classes.insert(name.as_str().to_string());
            }
        }
    }
}

impl FromIterator<String> for DefinedClassSet {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Self {
            classes: iter.into_iter().collect(),
        }
    }
}

/// Scan every stylesheet for class selectors.
///
/// Unreadable stylesheets are logged and contribute nothing.
pub fn build_defined_class_set(stylesheets: &[StylesheetDocument]) -> DefinedClassSet {
    let mut defined = DefinedClassSet::default();
    for sheet in stylesheets {
        match &sheet.text {
            Ok(text) => defined.extend_from_text(text),
            Err(err) => warn!(file = %sheet.file, error = %err, "skipping unreadable stylesheet"),
        }
    }
    debug!(
        stylesheets = stylesheets.len(),
        classes = defined.len(),
        "built defined class set"
    );
    defined
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReadError;

    #[test]
    fn test_collects_simple_and_compound_selectors() {
        let sheet = StylesheetDocument::new(
            "app.css",
            ".card { padding: 1rem }\n.btn.primary:hover, ul > .item-2::after { color: red }",
        );
        let defined = build_defined_class_set(&[sheet]);
        for name in ["card", "btn", "primary", "item-2"] {
            assert!(defined.contains(name), "missing {name}");
        }
        assert!(!defined.contains("hover"));
    }

    #[test]
    fn test_over_matches_comments_and_numbers() {
        let sheet = StylesheetDocument::new("a.css", "/* .legacy */ p { margin: .5em }");
        let defined = build_defined_class_set(&[sheet]);
        assert!(defined.contains("legacy"));
        assert!(defined.contains("5em"));
    }

    #[test]
    fn test_unreadable_sheet_is_skipped() {
        let sheets = vec![
            StylesheetDocument::unreadable("broken.css", ReadError::new("permission denied")),
            StylesheetDocument::new("ok.css", ".ok {}"),
        ];
        let defined = build_defined_class_set(&sheets);
        assert_eq!(defined.len(), 1);
        assert!(defined.contains("ok"));
    }

    #[test]
    fn test_no_stylesheets_is_empty() {
        assert!(build_defined_class_set(&[]).is_empty());
    }
}
