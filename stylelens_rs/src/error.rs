//! Error types for style analysis and refactor planning.
//!
//! Per-document failures (`ReadError`, `ParseError`) are values the aggregator
//! matches on and logs; only planner and vocabulary errors reach callers.

use thiserror::Error;

use crate::types::{Dialect, UsageKind};

/// The host could not read a document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("read failed: {message}")]
pub struct ReadError {
    pub message: String,
}

impl ReadError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for ReadError {
    fn from(err: std::io::Error) -> Self {
        Self::new(err.to_string())
    }
}

/// A document's text is not valid under its dialect's grammar.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{dialect} parse error at byte {offset}: {message}")]
pub struct ParseError {
    pub dialect: Dialect,
    pub offset: usize,
    pub message: String,
}

impl ParseError {
    pub fn new(dialect: Dialect, offset: usize, message: impl Into<String>) -> Self {
        Self {
            dialect,
            offset,
            message: message.into(),
        }
    }
}

/// Why a single document contributed nothing to an analysis run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    #[error(transparent)]
    Read(#[from] ReadError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Malformed calls to the refactor planner.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    /// The requested class name does not match `^[a-z0-9_-]+$`.
    #[error("invalid class name '{0}': use lowercase letters, digits, '-' or '_'")]
    InvalidName(String),

    #[error("expected a {expected:?} group, got a {actual:?} group")]
    GroupKindMismatch {
        expected: UsageKind,
        actual: UsageKind,
    },

    #[error("duplicate group '{0}' has no occurrences")]
    EmptyGroup(String),
}

/// Failure to load a utility-class vocabulary file.
#[derive(Error, Debug)]
pub enum VocabularyError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid vocabulary JSON: {0}")]
    Json(#[from] serde_json::Error),
}
