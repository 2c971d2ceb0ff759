use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ReadError;

/// Stable identity of a document, usually its workspace-relative path.
///
/// Ordering is lexicographic, which gives the canonical enumeration used to
/// break ties between duplicate groups.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(String);

impl FileId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FileId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for FileId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Component-template syntax family of a document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    Jsx,
    Tsx,
    Vue,
    Svelte,
}

impl Dialect {
    /// Infer the dialect from a file extension (`.jsx`, `.tsx`, `.vue`, `.svelte`).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension().and_then(|e| e.to_str())?;
        match ext.to_ascii_lowercase().as_str() {
            "jsx" => Some(Dialect::Jsx),
            "tsx" => Some(Dialect::Tsx),
            "vue" => Some(Dialect::Vue),
            "svelte" => Some(Dialect::Svelte),
            _ => None,
        }
    }

    /// Attribute that carries class names in this dialect.
    pub fn class_attribute(&self) -> &'static str {
        match self {
            Dialect::Jsx | Dialect::Tsx => "className",
            Dialect::Vue | Dialect::Svelte => "class",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Dialect::Jsx => "jsx",
            Dialect::Tsx => "tsx",
            Dialect::Vue => "vue",
            Dialect::Svelte => "svelte",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 0-based, end-exclusive span inside one document.
///
/// Columns are counted in UTF-16 code units, the unit editor hosts use.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceRange {
    pub file: FileId,
    pub start_line: usize,
    pub start_col: usize,
    pub end_line: usize,
    pub end_col: usize,
}

/// Span of a recognised attribute inside its document, before file tagging.
///
/// `value` covers the text between the quotes or braces; `attribute` covers
/// the whole attribute including its name, which is what refactor edits replace.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttributeSpan {
    pub value: (usize, usize),
    pub attribute: (usize, usize),
}

/// One literal class attribute found by an adapter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyleUsage {
    /// Normalized token string, never the raw attribute text.
    pub class_string: String,
    /// Attribute value exactly as written.
    pub raw: String,
    pub location: SourceRange,
    pub attribute_location: SourceRange,
    pub source_file: FileId,
}

/// One literal inline-style object (or static declaration list) found by an adapter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InlineStyleUsage {
    /// Normalized declaration string (`prop: value; prop: value`).
    pub style_string: String,
    pub location: SourceRange,
    pub attribute_location: SourceRange,
    pub source_file: FileId,
}

/// Everything an adapter pulled out of one document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Extraction {
    pub class_usages: Vec<StyleUsage>,
    pub inline_style_usages: Vec<InlineStyleUsage>,
}

impl Extraction {
    pub fn is_empty(&self) -> bool {
        self.class_usages.is_empty() && self.inline_style_usages.is_empty()
    }
}

/// A component source handed over by the host.
///
/// `text` carries the host's read outcome so that read failures flow through
/// the same per-document path as parse failures.
#[derive(Clone, Debug)]
pub struct ComponentDocument {
    pub file: FileId,
    pub dialect: Dialect,
    pub text: Result<String, ReadError>,
}

impl ComponentDocument {
    pub fn new(file: impl Into<FileId>, dialect: Dialect, text: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            dialect,
            text: Ok(text.into()),
        }
    }

    pub fn unreadable(file: impl Into<FileId>, dialect: Dialect, error: ReadError) -> Self {
        Self {
            file: file.into(),
            dialect,
            text: Err(error),
        }
    }
}

/// A stylesheet handed over by the host.
#[derive(Clone, Debug)]
pub struct StylesheetDocument {
    pub file: FileId,
    pub text: Result<String, ReadError>,
}

impl StylesheetDocument {
    pub fn new(file: impl Into<FileId>, text: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            text: Ok(text.into()),
        }
    }

    pub fn unreadable(file: impl Into<FileId>, error: ReadError) -> Self {
        Self {
            file: file.into(),
            text: Err(error),
        }
    }
}

/// Which index a duplicate group was derived from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UsageKind {
    Class,
    InlineStyle,
}

/// One place a normalized key occurs, as kept in a duplicate group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Occurrence {
    pub source_file: FileId,
    pub dialect: Dialect,
    pub location: SourceRange,
    pub attribute_location: SourceRange,
    /// Original value text; present for class usages only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}
