//! Report shapes produced by an analysis run.

use serde::{Deserialize, Serialize};

use crate::config::{HeatBuckets, Thresholds};
use crate::types::{FileId, Occurrence, SourceRange, UsageKind};

/// Severity of a duplicate group by occurrence count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Normal,
    Warning,
    Critical,
}

impl Severity {
    pub fn classify(count: usize, thresholds: &Thresholds) -> Self {
        if count >= thresholds.critical {
            Severity::Critical
        } else if count >= thresholds.warning {
            Severity::Warning
        } else {
            Severity::Normal
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Severity::Normal => "normal",
            Severity::Warning => "warning",
            Severity::Critical => "critical",
        }
    }
}

/// A normalized key used at least twice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateGroup {
    pub key: String,
    pub kind: UsageKind,
    pub count: usize,
    pub severity: Severity,
    /// In canonical document order, then source order.
    pub occurrences: Vec<Occurrence>,
}

impl DuplicateGroup {
    pub fn new(
        key: impl Into<String>,
        kind: UsageKind,
        occurrences: Vec<Occurrence>,
        thresholds: &Thresholds,
    ) -> Self {
        let count = occurrences.len();
        Self {
            key: key.into(),
            kind,
            count,
            severity: Severity::classify(count, thresholds),
            occurrences,
        }
    }

    /// Distinct files the group spans, in first-seen order.
    pub fn files(&self) -> Vec<&FileId> {
        let mut files: Vec<&FileId> = Vec::new();
        for occurrence in &self.occurrences {
            if !files.contains(&&occurrence.source_file) {
                files.push(&occurrence.source_file);
            }
        }
        files
    }
}

/// A class token that is neither a utility nor defined by any stylesheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UndefinedClassRecord {
    pub source_file: FileId,
    pub class_name: String,
    /// Span of the class attribute value the token came from.
    pub location: SourceRange,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateSummary {
    pub critical: usize,
    pub warning: usize,
    pub normal: usize,
}

impl DuplicateSummary {
    pub(crate) fn record(&mut self, severity: Severity) {
        match severity {
            Severity::Critical => self.critical += 1,
            Severity::Warning => self.warning += 1,
            Severity::Normal => self.normal += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.critical + self.warning + self.normal
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassHeatEntry {
    pub class_name: String,
    pub occurrence_count: usize,
}

/// Per-token usage frequency, split into fixed-size buckets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassHeat {
    pub hot: Vec<ClassHeatEntry>,
    pub warm: Vec<ClassHeatEntry>,
    pub normal: Vec<ClassHeatEntry>,
}

impl ClassHeat {
    /// Slice an already-ranked list into buckets; short lists leave later
    /// buckets partially filled or empty.
    pub(crate) fn from_ranked(ranked: Vec<ClassHeatEntry>, buckets: &HeatBuckets) -> Self {
        let mut rest = ranked.into_iter();
        let hot = rest.by_ref().take(buckets.hot).collect();
        let warm = rest.by_ref().take(buckets.warm).collect();
        let normal = rest.take(buckets.normal).collect();
        Self { hot, warm, normal }
    }
}

/// A document that contributed nothing because it failed to read or parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedDocument {
    pub file: FileId,
    pub reason: String,
}

/// Result of one workspace analysis.
///
/// Empty lists are a successful "nothing found" outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub duplicates: Vec<DuplicateGroup>,
    pub inline_style_duplicates: Vec<DuplicateGroup>,
    pub undefined_classes: Vec<UndefinedClassRecord>,
    pub duplicate_summary: DuplicateSummary,
    pub class_heat: ClassHeat,
    pub recommendations: Vec<DuplicateGroup>,
    pub skipped_documents: Vec<SkippedDocument>,
}

impl Report {
    pub fn is_clean(&self) -> bool {
        self.duplicates.is_empty()
            && self.inline_style_duplicates.is_empty()
            && self.undefined_classes.is_empty()
    }

    /// Look up a duplicate group by kind and normalized key.
    pub fn group(&self, kind: UsageKind, key: &str) -> Option<&DuplicateGroup> {
        let groups = match kind {
            UsageKind::Class => &self.duplicates,
            UsageKind::InlineStyle => &self.inline_style_duplicates,
        };
        groups.iter().find(|group| group.key == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, count: usize) -> ClassHeatEntry {
        ClassHeatEntry {
            class_name: name.to_string(),
            occurrence_count: count,
        }
    }

    #[test]
    fn test_severity_thresholds() {
        let thresholds = Thresholds::default();
        assert_eq!(Severity::classify(2, &thresholds), Severity::Normal);
        assert_eq!(Severity::classify(3, &thresholds), Severity::Warning);
        assert_eq!(Severity::classify(4, &thresholds), Severity::Warning);
        assert_eq!(Severity::classify(5, &thresholds), Severity::Critical);
        assert_eq!(Severity::classify(50, &thresholds), Severity::Critical);
    }

    #[test]
    fn test_heat_buckets_fill_in_order() {
        let ranked: Vec<_> = (0..32).map(|i| entry(&format!("c{i}"), 100 - i)).collect();
        let heat = ClassHeat::from_ranked(ranked, &HeatBuckets::default());
        assert_eq!(heat.hot.len(), 5);
        assert_eq!(heat.warm.len(), 10);
        assert_eq!(heat.normal.len(), 15);
        assert_eq!(heat.hot[0].class_name, "c0");
        assert_eq!(heat.warm[0].class_name, "c5");
        assert_eq!(heat.normal[0].class_name, "c15");
    }

    #[test]
    fn test_heat_buckets_short_input() {
        let ranked = vec![entry("a", 10), entry("b", 7), entry("c", 3)];
        let heat = ClassHeat::from_ranked(ranked, &HeatBuckets::default());
        assert_eq!(heat.hot.len(), 3);
        assert!(heat.warm.is_empty());
        assert!(heat.normal.is_empty());
    }

    #[test]
    fn test_report_serializes_camel_case() {
        let json = serde_json::to_value(Report::default()).expect("serialize");
        for key in [
            "duplicates",
            "inlineStyleDuplicates",
            "undefinedClasses",
            "duplicateSummary",
            "classHeat",
            "recommendations",
            "skippedDocuments",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
    }
}
