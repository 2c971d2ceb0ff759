//! Library-level contract tests for the analysis and planning API.

use stylelens::{
    AnalysisConfig, ComponentDocument, Dialect, PlanError, ReadError, Severity,
    StylesheetDocument, UsageKind, UtilityVocabulary, analyze, normalize_class_string,
    plan_refactor,
};

fn vue(file: &str, template: &str) -> ComponentDocument {
    ComponentDocument::new(file, Dialect::Vue, format!("<template>{template}</template>"))
}

fn jsx(file: &str, body: &str) -> ComponentDocument {
    ComponentDocument::new(file, Dialect::Jsx, format!("export const C = () => <>{body}</>;"))
}

fn svelte(file: &str, markup: &str) -> ComponentDocument {
    ComponentDocument::new(file, Dialect::Svelte, markup)
}

#[test]
fn normalization_is_idempotent_and_order_free() {
    for raw in ["", "  ", "b a", "a\tb\n c", "x  x y", "hover:bg-red-500 p-4"] {
        let once = normalize_class_string(raw);
        assert_eq!(normalize_class_string(&once), once, "input {raw:?}");
    }
    assert_eq!(normalize_class_string("b a"), normalize_class_string("a b"));
}

#[test]
fn equivalent_class_strings_form_one_group() {
    let docs = vec![
        vue("a.vue", r#"<div class="btn primary"></div>"#),
        jsx("b.jsx", r#"<div className="btn primary" />"#),
        svelte("c.svelte", r#"<div class="primary btn"></div>"#),
    ];
    let report = analyze(&docs, &[], &AnalysisConfig::default());

    assert_eq!(report.duplicates.len(), 1);
    let group = &report.duplicates[0];
    assert_eq!(group.key, "btn primary");
    assert_eq!(group.count, 3);
    assert_eq!(group.kind, UsageKind::Class);
}

#[test]
fn undefined_detection_skips_defined_classes() {
    let docs = vec![vue("a.vue", r#"<div class="card ghost-class"></div>"#)];
    let sheets = vec![StylesheetDocument::new("app.css", ".card { }")];
    let report = analyze(&docs, &sheets, &AnalysisConfig::default());

    assert_eq!(report.undefined_classes.len(), 1);
    assert_eq!(report.undefined_classes[0].class_name, "ghost-class");
}

#[test]
fn utility_classes_are_never_undefined() {
    let docs = vec![jsx("a.jsx", r#"<div className="flex items-center" />"#)];
    let config = AnalysisConfig::with_vocabulary(UtilityVocabulary::new(["flex", "items-center"]));
    let report = analyze(&docs, &[], &config);

    assert!(report.undefined_classes.is_empty());
    assert!(report.class_heat.hot.is_empty());
}

#[test]
fn heat_ranks_by_count_then_encounter_order() {
    let mut body = String::new();
    body.push_str(&r#"<i className="c" />"#.repeat(3));
    body.push_str(&r#"<i className="b" />"#.repeat(7));
    body.push_str(&r#"<i className="a" />"#.repeat(10));
    body.push_str(r#"<i className="d" /><i className="e" />"#);
    let report = analyze(&[jsx("a.jsx", &body)], &[], &AnalysisConfig::default());

    let hot: Vec<_> = report
        .class_heat
        .hot
        .iter()
        .map(|e| (e.class_name.as_str(), e.occurrence_count))
        .collect();
    assert_eq!(hot, vec![("a", 10), ("b", 7), ("c", 3), ("d", 1), ("e", 1)]);
}

#[test]
fn severity_follows_occurrence_count() {
    let mut docs = Vec::new();
    for i in 0..5 {
        docs.push(jsx(&format!("five{i}.jsx"), r#"<i className="five" />"#));
    }
    for i in 0..3 {
        docs.push(jsx(&format!("three{i}.jsx"), r#"<i className="three" />"#));
    }
    for i in 0..2 {
        docs.push(jsx(&format!("two{i}.jsx"), r#"<i className="two" />"#));
    }
    let report = analyze(&docs, &[], &AnalysisConfig::default());

    let severities: Vec<_> = report
        .duplicates
        .iter()
        .map(|g| (g.key.as_str(), g.severity))
        .collect();
    assert_eq!(
        severities,
        vec![
            ("five", Severity::Critical),
            ("three", Severity::Warning),
            ("two", Severity::Normal),
        ]
    );
    assert_eq!(report.duplicate_summary.total(), 3);
    assert_eq!(report.recommendations.len(), 1);
}

#[test]
fn plan_uses_dialect_specific_attribute_names() {
    let docs = vec![
        jsx("a.jsx", r#"<div className="py-2  px-4 rounded" /><b className="rounded px-4 py-2" />"#),
        vue("b.vue", r#"<div class="px-4 py-2 rounded"></div>"#),
    ];
    let report = analyze(&docs, &[], &AnalysisConfig::default());
    let group = report
        .group(UsageKind::Class, "px-4 py-2 rounded")
        .expect("group");

    let plan = plan_refactor(group, "card-style", &"src/index.css".into()).expect("plan");
    assert_eq!(plan.edits.len(), 3);
    let attrs: Vec<_> = plan
        .edits
        .iter()
        .map(|e| e.replacement_attribute_text.as_str())
        .collect();
    assert_eq!(
        attrs,
        vec![
            "className=\"card-style\"",
            "className=\"card-style\"",
            "class=\"card-style\"",
        ]
    );
    assert!(plan.css_rule.contains(".card-style"));
    assert!(plan.css_rule.contains("@apply py-2 px-4 rounded;"));
}

#[test]
fn plan_rejects_bad_names_without_partial_output() {
    let docs = vec![
        jsx("a.jsx", r#"<i className="x" />"#),
        jsx("b.jsx", r#"<i className="x" />"#),
    ];
    let report = analyze(&docs, &[], &AnalysisConfig::default());
    let result = plan_refactor(&report.duplicates[0], "Not Valid", &"app.css".into());
    assert_eq!(result, Err(PlanError::InvalidName("Not Valid".to_string())));
}

#[test]
fn malformed_documents_do_not_block_others() {
    let docs = vec![
        jsx("good1.jsx", r#"<i className="btn" />"#),
        ComponentDocument::new("bad.jsx", Dialect::Jsx, "const x = <div className=\"btn\">;"),
        vue("bad.vue", r#"<div class="btn"><span></div>"#),
        svelte("bad.svelte", r#"{#if open}<p class="btn"></p>"#),
        ComponentDocument::unreadable("gone.tsx", Dialect::Tsx, ReadError::new("denied")),
        svelte("good2.svelte", r#"<i class="btn"></i>"#),
    ];
    let report = analyze(&docs, &[], &AnalysisConfig::default());

    assert_eq!(report.duplicates.len(), 1);
    assert_eq!(report.duplicates[0].count, 2);
    assert_eq!(report.skipped_documents.len(), 4);
}

#[test]
fn no_documents_is_a_clean_report() {
    let report = analyze(&[], &[], &AnalysisConfig::default());
    assert!(report.is_clean());
    assert!(report.recommendations.is_empty());
    assert!(report.skipped_documents.is_empty());
}
