//! Utility-class vocabulary and classifier.
//!
//! Atomic-CSS frameworks generate classes on demand, so they never show up in
//! the stylesheets the index can see. Anything the classifier accepts is
//! exempt from undefined-class checks and from heat counting.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::error::VocabularyError;

/// On-disk format: `{ "classes": ["flex", "items-center", ...] }`.
#[derive(Debug, Deserialize)]
struct VocabularyFile {
    #[serde(default)]
    classes: Vec<String>,
}

/// Known utility base names (after variant prefixes are stripped).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UtilityVocabulary {
    classes: HashSet<String>,
}

impl UtilityVocabulary {
    pub fn new<I, S>(classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            classes: classes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, VocabularyError> {
        let file: VocabularyFile = serde_json::from_str(json)?;
        Ok(Self::new(file.classes))
    }

    pub fn load(path: &Path) -> Result<Self, VocabularyError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Whether `class_name` is a framework utility.
    ///
    /// Variant prefixes (`hover:`, `md:`, `dark:hover:`) are stripped up to
    /// the last `:`. Arbitrary-value syntax (`w-[37px]`) always counts, and
    /// so does the empty name.
    pub fn is_utility_class(&self, class_name: &str) -> bool {
        if class_name.is_empty() {
            return true;
        }
        let base = match class_name.rfind(':') {
            Some(idx) => &class_name[idx + 1..],
            None => class_name,
        };
        self.classes.contains(base) || (base.contains('[') && base.contains(']'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocabulary() -> UtilityVocabulary {
        UtilityVocabulary::new(["flex", "items-center", "p-4", "bg-red-500"])
    }

    #[test]
    fn test_plain_utility() {
        assert!(vocabulary().is_utility_class("flex"));
        assert!(!vocabulary().is_utility_class("card"));
    }

    #[test]
    fn test_variant_prefixes_stripped() {
        let vocab = vocabulary();
        assert!(vocab.is_utility_class("hover:bg-red-500"));
        assert!(vocab.is_utility_class("dark:md:flex"));
        assert!(!vocab.is_utility_class("hover:card"));
    }

    #[test]
    fn test_arbitrary_values() {
        let vocab = UtilityVocabulary::default();
        assert!(vocab.is_utility_class("w-[37px]"));
        assert!(vocab.is_utility_class("md:grid-cols-[1fr_2fr]"));
        assert!(!vocab.is_utility_class("w-[37px"));
    }

    #[test]
    fn test_empty_name_is_utility() {
        assert!(UtilityVocabulary::default().is_utility_class(""));
    }

    #[test]
    fn test_trailing_colon_leaves_empty_base() {
        assert!(!vocabulary().is_utility_class("hover:"));
    }

    #[test]
    fn test_from_json() {
        let vocab =
            UtilityVocabulary::from_json(r#"{ "classes": ["flex", "grid"] }"#).expect("valid");
        assert_eq!(vocab.len(), 2);
        assert!(vocab.is_utility_class("md:grid"));
    }

    #[test]
    fn test_from_json_missing_key_is_empty() {
        let vocab = UtilityVocabulary::from_json("{}").expect("valid");
        assert!(vocab.is_empty());
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(matches!(
            UtilityVocabulary::from_json("[1, 2"),
            Err(VocabularyError::Json(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = UtilityVocabulary::load(Path::new("/definitely/not/here.json"));
        assert!(matches!(err, Err(VocabularyError::Io(_))));
    }
}
