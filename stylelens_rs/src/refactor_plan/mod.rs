//! Refactor plans for duplicate groups.
//!
//! A plan names a new class, the rule text to append to a stylesheet and one
//! edit per occurrence that swaps the original attribute for the new class.
//! Nothing here touches the filesystem: applying a plan is the host's job.

mod target;

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::aggregator::DuplicateGroup;
use crate::error::PlanError;
use crate::types::{FileId, SourceRange, UsageKind};

pub use target::select_target_stylesheet;

fn regex_class_name() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-z0-9_-]+$").expect("valid regex literal"))
}

/// One attribute replacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanEdit {
    pub source_file: FileId,
    /// Full attribute span: name, `=`, and the delimited value.
    pub location: SourceRange,
    pub replacement_attribute_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefactorPlan {
    pub new_class_name: String,
    pub target_stylesheet: FileId,
    pub css_rule: String,
    pub edits: Vec<PlanEdit>,
}

/// Plan extraction of a repeated class combination into `new_class_name`.
///
/// The rule composes the first occurrence's tokens as written (not the sorted
/// key) through `@apply`.
pub fn plan_refactor(
    group: &DuplicateGroup,
    new_class_name: &str,
    target_stylesheet: &FileId,
) -> Result<RefactorPlan, PlanError> {
    validate(group, UsageKind::Class, new_class_name)?;

    let first = &group.occurrences[0];
    let tokens = first
        .raw
        .as_deref()
        .unwrap_or(&group.key)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let css_rule = format!("\n.{new_class_name} {{\n  @apply {tokens};\n}}\n");

    Ok(build_plan(group, new_class_name, target_stylesheet, css_rule))
}

/// Plan extraction of a repeated inline style into `new_class_name`.
pub fn plan_inline_style_extraction(
    group: &DuplicateGroup,
    new_class_name: &str,
    target_stylesheet: &FileId,
) -> Result<RefactorPlan, PlanError> {
    validate(group, UsageKind::InlineStyle, new_class_name)?;

    let mut css_rule = format!("\n.{new_class_name} {{\n");
    for declaration in group.key.split("; ").filter(|d| !d.is_empty()) {
        css_rule.push_str("  ");
        css_rule.push_str(declaration);
        css_rule.push_str(";\n");
    }
    css_rule.push_str("}\n");

    Ok(build_plan(group, new_class_name, target_stylesheet, css_rule))
}

fn validate(group: &DuplicateGroup, expected: UsageKind, name: &str) -> Result<(), PlanError> {
    if !regex_class_name().is_match(name) {
        return Err(PlanError::InvalidName(name.to_string()));
    }
    if group.kind != expected {
        return Err(PlanError::GroupKindMismatch {
            expected,
            actual: group.kind,
        });
    }
    if group.occurrences.is_empty() {
        return Err(PlanError::EmptyGroup(group.key.clone()));
    }
    Ok(())
}

fn build_plan(
    group: &DuplicateGroup,
    new_class_name: &str,
    target_stylesheet: &FileId,
    css_rule: String,
) -> RefactorPlan {
    let edits = group
        .occurrences
        .iter()
        .map(|occurrence| PlanEdit {
            source_file: occurrence.source_file.clone(),
            location: occurrence.attribute_location.clone(),
            replacement_attribute_text: format!(
                "{}=\"{}\"",
                occurrence.dialect.class_attribute(),
                new_class_name
            ),
        })
        .collect();

    RefactorPlan {
        new_class_name: new_class_name.to_string(),
        target_stylesheet: target_stylesheet.clone(),
        css_rule,
        edits,
    }
}
