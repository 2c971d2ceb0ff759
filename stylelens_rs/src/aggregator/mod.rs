//! Workspace aggregation: documents in, [`Report`] out.
//!
//! Extraction runs on a bounded pool of scoped threads; each worker handles a
//! contiguous slice of the canonically ordered documents and hands back its
//! outcomes, which are folded serially in document order. Counts and
//! tie-breaks are therefore identical however many workers run.

pub mod report;

use std::collections::{HashMap, HashSet};
use std::thread;

use tracing::{debug, warn};

use crate::adapters::extract_usages;
use crate::config::{AnalysisConfig, Thresholds};
use crate::css::{DefinedClassSet, build_defined_class_set};
use crate::error::{DocumentError, ParseError};
use crate::types::{
    ComponentDocument, Dialect, Extraction, FileId, Occurrence, StyleUsage, StylesheetDocument,
    UsageKind,
};
use crate::utility::UtilityVocabulary;

pub use report::{
    ClassHeat, ClassHeatEntry, DuplicateGroup, DuplicateSummary, Report, Severity,
    SkippedDocument, UndefinedClassRecord,
};

type Outcome = Result<Extraction, DocumentError>;

/// Analyze a workspace.
///
/// Documents are processed in lexicographic [`FileId`] order regardless of
/// the order given, so repeated runs on unchanged input produce identical
/// reports. Documents that fail to read or parse are logged, listed in
/// `skipped_documents`, and otherwise ignored.
pub fn analyze(
    components: &[ComponentDocument],
    stylesheets: &[StylesheetDocument],
    config: &AnalysisConfig,
) -> Report {
    let defined = build_defined_class_set(stylesheets);

    let mut ordered: Vec<&ComponentDocument> = components.iter().collect();
    ordered.sort_by(|a, b| a.file.cmp(&b.file));

    let outcomes = extract_all(&ordered, config.workers);

    let mut acc = Accumulator::new(&defined, &config.vocabulary);
    for (document, outcome) in ordered.iter().zip(outcomes) {
        match outcome {
            Ok(extraction) => acc.fold(document.dialect, extraction),
            Err(err) => {
                warn!(file = %document.file, error = %err, "skipping component document");
                acc.skipped.push(SkippedDocument {
                    file: document.file.clone(),
                    reason: err.to_string(),
                });
            }
        }
    }

    let report = acc.into_report(config);
    debug!(
        documents = components.len(),
        duplicates = report.duplicates.len(),
        inline_duplicates = report.inline_style_duplicates.len(),
        undefined = report.undefined_classes.len(),
        skipped = report.skipped_documents.len(),
        "analysis complete"
    );
    report
}

/// Class combinations repeated within a single document.
///
/// Documents that are unreadable, unparsable, or longer than
/// `config.lens.max_lines` yield no groups.
pub fn find_document_duplicates(
    document: &ComponentDocument,
    config: &AnalysisConfig,
) -> Vec<DuplicateGroup> {
    let Ok(text) = &document.text else {
        return Vec::new();
    };
    if text.lines().count() > config.lens.max_lines {
        return Vec::new();
    }
    let extraction = match extract_usages(document) {
        Ok(extraction) => extraction,
        Err(err) => {
            debug!(file = %document.file, error = %err, "no lens for document");
            return Vec::new();
        }
    };

    let mut classes = KeyedOccurrences::default();
    for usage in extraction.class_usages {
        let key = usage.class_string.clone();
        classes.push(key, class_occurrence(document.dialect, usage));
    }
    classes.into_groups(UsageKind::Class, &config.thresholds)
}

/// Run adapters over `documents`, preserving their order in the output.
fn extract_all(documents: &[&ComponentDocument], workers: usize) -> Vec<Outcome> {
    let workers = workers.max(1);
    if workers == 1 || documents.len() <= 1 {
        return documents.iter().map(|doc| extract_usages(doc)).collect();
    }

    let chunk_size = documents.len().div_ceil(workers);
    thread::scope(|s| {
        let handles: Vec<_> = documents
            .chunks(chunk_size)
            .map(|chunk| {
                let handle = s.spawn(move || {
                    chunk
                        .iter()
                        .map(|doc| extract_usages(doc))
                        .collect::<Vec<_>>()
                });
                (handle, chunk)
            })
            .collect();

        let mut outcomes = Vec::with_capacity(documents.len());
        for (handle, chunk) in handles {
            match handle.join() {
                Ok(chunk_outcomes) => outcomes.extend(chunk_outcomes),
                Err(_) => outcomes.extend(chunk.iter().map(|doc| {
                    Err(DocumentError::Parse(ParseError::new(
                        doc.dialect,
                        0,
                        "adapter thread panicked",
                    )))
                })),
            }
        }
        outcomes
    })
}

fn class_occurrence(dialect: Dialect, usage: StyleUsage) -> Occurrence {
    Occurrence {
        source_file: usage.source_file,
        dialect,
        location: usage.location,
        attribute_location: usage.attribute_location,
        raw: Some(usage.raw),
    }
}

/// Insertion-ordered multimap from normalized key to occurrences.
#[derive(Default)]
struct KeyedOccurrences {
    entries: Vec<(String, Vec<Occurrence>)>,
    positions: HashMap<String, usize>,
}

impl KeyedOccurrences {
    fn push(&mut self, key: String, occurrence: Occurrence) {
        match self.positions.get(&key) {
            Some(&idx) => self.entries[idx].1.push(occurrence),
            None => {
                self.positions.insert(key.clone(), self.entries.len());
                self.entries.push((key, vec![occurrence]));
            }
        }
    }

    /// Keys seen at least twice, most frequent first; ties keep first-seen order.
    fn into_groups(self, kind: UsageKind, thresholds: &Thresholds) -> Vec<DuplicateGroup> {
        let mut groups: Vec<DuplicateGroup> = self
            .entries
            .into_iter()
            .filter(|(_, occurrences)| occurrences.len() >= 2)
            .map(|(key, occurrences)| DuplicateGroup::new(key, kind, occurrences, thresholds))
            .collect();
        groups.sort_by(|a, b| b.count.cmp(&a.count));
        groups
    }
}

/// Insertion-ordered per-token counter.
#[derive(Default)]
struct TokenCounter {
    entries: Vec<(String, usize)>,
    positions: HashMap<String, usize>,
}

impl TokenCounter {
    fn increment(&mut self, token: &str) {
        match self.positions.get(token) {
            Some(&idx) => self.entries[idx].1 += 1,
            None => {
                self.positions.insert(token.to_string(), self.entries.len());
                self.entries.push((token.to_string(), 1));
            }
        }
    }

    fn ranked(self) -> Vec<ClassHeatEntry> {
        let mut entries = self.entries;
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries
            .into_iter()
            .map(|(class_name, occurrence_count)| ClassHeatEntry {
                class_name,
                occurrence_count,
            })
            .collect()
    }
}

/// Running indices for one analysis run.
struct Accumulator<'c> {
    defined: &'c DefinedClassSet,
    vocabulary: &'c UtilityVocabulary,
    classes: KeyedOccurrences,
    styles: KeyedOccurrences,
    tokens: TokenCounter,
    undefined: Vec<UndefinedClassRecord>,
    flagged: HashSet<(String, FileId, usize)>,
    skipped: Vec<SkippedDocument>,
}

impl<'c> Accumulator<'c> {
    fn new(defined: &'c DefinedClassSet, vocabulary: &'c UtilityVocabulary) -> Self {
        Self {
            defined,
            vocabulary,
            classes: KeyedOccurrences::default(),
            styles: KeyedOccurrences::default(),
            tokens: TokenCounter::default(),
            undefined: Vec::new(),
            flagged: HashSet::new(),
            skipped: Vec::new(),
        }
    }

    /// Fold one successfully extracted document.
    fn fold(&mut self, dialect: Dialect, extraction: Extraction) {
        for usage in extraction.class_usages {
            self.check_tokens(&usage);
            let key = usage.class_string.clone();
            self.classes.push(key, class_occurrence(dialect, usage));
        }

        for usage in extraction.inline_style_usages {
            self.styles.push(
                usage.style_string,
                Occurrence {
                    source_file: usage.source_file,
                    dialect,
                    location: usage.location,
                    attribute_location: usage.attribute_location,
                    raw: None,
                },
            );
        }
    }

    fn check_tokens(&mut self, usage: &StyleUsage) {
        for token in usage.class_string.split_whitespace() {
            if self.vocabulary.is_utility_class(token) {
                continue;
            }
            self.tokens.increment(token);

            if self.defined.contains(token) {
                continue;
            }
            let dedup = (
                token.to_string(),
                usage.source_file.clone(),
                usage.location.start_line,
            );
            if self.flagged.insert(dedup) {
                self.undefined.push(UndefinedClassRecord {
                    source_file: usage.source_file.clone(),
                    class_name: token.to_string(),
                    location: usage.location.clone(),
                });
            }
        }
    }

    fn into_report(self, config: &AnalysisConfig) -> Report {
        let duplicates = self
            .classes
            .into_groups(UsageKind::Class, &config.thresholds);
        let inline_style_duplicates = self
            .styles
            .into_groups(UsageKind::InlineStyle, &config.thresholds);

        let mut duplicate_summary = DuplicateSummary::default();
        for group in duplicates.iter().chain(&inline_style_duplicates) {
            duplicate_summary.record(group.severity);
        }

        let recommendations = duplicates
            .iter()
            .filter(|group| group.count >= config.thresholds.recommendation)
            .cloned()
            .collect();

        Report {
            duplicates,
            inline_style_duplicates,
            undefined_classes: self.undefined,
            duplicate_summary,
            class_heat: ClassHeat::from_ranked(self.tokens.ranked(), &config.heat),
            recommendations,
            skipped_documents: self.skipped,
        }
    }
}
