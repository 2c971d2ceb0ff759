//! # stylelens
//!
//! Style-usage analysis for component codebases. Given JSX/TSX, Vue and
//! Svelte sources plus the project's stylesheets, stylelens finds:
//!
//! - **Duplicate class combinations** grouped by an order- and
//!   whitespace-insensitive key
//! - **Duplicate inline styles** from object literals and static `style`
//!   attributes
//! - **Undefined classes** that no stylesheet defines and no utility
//!   vocabulary covers
//! - **Class heat**: the most used individual class tokens
//!
//! and plans refactors that extract a repeated combination into one named
//! class.
//!
//! ## Quick Start
//!
//! ```rust
//! use stylelens::{AnalysisConfig, ComponentDocument, Dialect, StylesheetDocument, analyze};
//!
//! let components = vec![
//!     ComponentDocument::new("a.vue", Dialect::Vue, r#"<template><b class="btn primary"></b></template>"#),
//!     ComponentDocument::new("b.jsx", Dialect::Jsx, r#"const B = () => <b className="primary btn" />;"#),
//! ];
//! let sheets = vec![StylesheetDocument::new("app.css", ".btn {} .primary {}")];
//!
//! let report = analyze(&components, &sheets, &AnalysisConfig::default());
//! assert_eq!(report.duplicates[0].key, "btn primary");
//! assert!(report.undefined_classes.is_empty());
//! ```
//!
//! The library performs no I/O of its own except in [`fs_utils`], which the
//! `stylelens` binary uses to discover documents on disk.

/// Dialect adapters turning one document into literal usages.
pub mod adapters;

/// Workspace aggregation and report shapes.
pub mod aggregator;

pub mod config;
pub mod css;
pub mod error;
pub mod fs_utils;
pub mod normalize;

/// Refactor plans and target stylesheet selection.
pub mod refactor_plan;

pub mod types;
pub mod utility;

pub(crate) mod position;

pub use adapters::{DialectAdapter, adapter_for, extract_usages};
pub use aggregator::{
    ClassHeat, ClassHeatEntry, DuplicateGroup, DuplicateSummary, Report, Severity,
    SkippedDocument, UndefinedClassRecord, analyze, find_document_duplicates,
};
pub use config::{AnalysisConfig, StylelensConfig};
pub use css::{DefinedClassSet, build_defined_class_set};
pub use error::{DocumentError, ParseError, PlanError, ReadError, VocabularyError};
pub use normalize::{normalize_class_string, normalize_style_string};
pub use refactor_plan::{
    PlanEdit, RefactorPlan, plan_inline_style_extraction, plan_refactor,
    select_target_stylesheet,
};
pub use types::{
    ComponentDocument, Dialect, Extraction, FileId, InlineStyleUsage, Occurrence, SourceRange,
    StyleUsage, StylesheetDocument, UsageKind,
};
pub use utility::UtilityVocabulary;
