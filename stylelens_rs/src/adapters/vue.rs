//! Vue single-file component adapter.
//!
//! Only the top-level `<template>` block is inspected. Recognised forms:
//! - `class="..."` (static)
//! - `style="prop: value; ..."` (static declaration list)
//! - `:style="{ ... }"` / `v-bind:style="{ ... }"` with literal values
//!
//! `:class` bindings and anything else dynamic are skipped.

use crate::error::ParseError;
use crate::normalize::canonical_declaration_list;
use crate::types::{AttributeSpan, Dialect, Extraction, FileId};

use super::markup::{Flavor, MarkupAttribute, ValueDelimiter, scan_attributes};
use super::style_object::expression_declarations;
use super::{DialectAdapter, UsageSink};

/// Adapter for `.vue` documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct VueAdapter;

impl DialectAdapter for VueAdapter {
    fn dialect(&self) -> Dialect {
        Dialect::Vue
    }

    fn extract(&self, file: &FileId, text: &str) -> Result<Extraction, ParseError> {
        let attributes = scan_attributes(text, Flavor::VueSfc)
            .map_err(|err| ParseError::new(Dialect::Vue, err.offset, err.message))?;

        let mut sink = UsageSink::new(file, text);
        for attr in &attributes {
            record_attribute(&mut sink, attr);
        }
        Ok(sink.finish())
    }
}

fn record_attribute(sink: &mut UsageSink<'_>, attr: &MarkupAttribute<'_>) {
    let Some(value) = &attr.value else {
        return;
    };
    let span = AttributeSpan {
        value: (value.start, value.end),
        attribute: (attr.start, attr.end),
    };

    match attr.name {
        "class" => sink.push_class(value.text, span),
        "style" => sink.push_style(canonical_declaration_list(value.text), span),
        ":style" | "v-bind:style" if value.delimiter == ValueDelimiter::Quoted => {
            if let Some(style_string) = expression_declarations(value.text) {
                sink.push_style(style_string, span);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> Result<Extraction, ParseError> {
        VueAdapter.extract(&FileId::new("src/components/Card.vue"), text)
    }

    #[test]
    fn test_static_class_in_template() {
        let text = r#"<template>
  <div class="card  shadow">
    <h2 class="title">{{ title }}</h2>
  </div>
</template>

<script setup>
defineProps(['title'])
</script>
"#;
        let extraction = extract(text).expect("parses");
        let keys: Vec<_> = extraction
            .class_usages
            .iter()
            .map(|u| u.class_string.as_str())
            .collect();
        assert_eq!(keys, vec!["card shadow", "title"]);

        let first = &extraction.class_usages[0];
        assert_eq!(first.raw, "card  shadow");
        assert_eq!(first.location.start_line, 1);
        assert_eq!(first.location.start_col, 14);
        assert_eq!(first.location.end_col, 26);
        assert_eq!(first.attribute_location.start_col, 7);
        assert_eq!(first.attribute_location.end_col, 27);
    }

    #[test]
    fn test_bound_class_is_skipped() {
        let text = r#"<template><div :class="{ active: on }" v-bind:class="cls"></div></template>"#;
        let extraction = extract(text).expect("parses");
        assert!(extraction.class_usages.is_empty());
    }

    #[test]
    fn test_script_and_style_blocks_ignored() {
        let text = r#"<script>
const html = '<div class="from-script"></div>'
</script>
<template><p class="real"></p></template>
<style>
.real { color: red; }
</style>"#;
        let extraction = extract(text).expect("parses");
        assert_eq!(extraction.class_usages.len(), 1);
        assert_eq!(extraction.class_usages[0].class_string, "real");
    }

    #[test]
    fn test_bound_style_object_and_static_style_group_together() {
        let text = r#"<template>
  <div :style="{ fontSize: 12, color: 'red' }"></div>
  <div style="color:red; font-size: 12px"></div>
  <div v-bind:style="{ 'font-size': '12px', color: 'red' }"></div>
  <div :style="dynamicStyle"></div>
</template>"#;
        let extraction = extract(text).expect("parses");
        let keys: Vec<_> = extraction
            .inline_style_usages
            .iter()
            .map(|u| u.style_string.as_str())
            .collect();
        assert_eq!(keys, vec!["color: red; font-size: 12px"; 3]);
    }

    #[test]
    fn test_malformed_template_is_parse_error() {
        let text = "<template>\n  <div class=\"a\">\n    <span>\n  </div>\n</template>";
        let err = extract(text).expect_err("mismatched tags");
        assert_eq!(err.dialect, Dialect::Vue);
    }

    #[test]
    fn test_file_without_template_has_no_usages() {
        let text = "<script>export default {}</script>";
        let extraction = extract(text).expect("parses");
        assert!(extraction.is_empty());
    }

    #[test]
    fn test_textarea_and_title_classes_in_template() {
        let text = r#"<template>
  <form>
    <textarea class="form-input">{{ draft }}</textarea>
    <title class="t">Draft</title>
  </form>
</template>"#;
        let extraction = extract(text).expect("parses");
        let keys: Vec<_> = extraction
            .class_usages
            .iter()
            .map(|u| u.class_string.as_str())
            .collect();
        assert_eq!(keys, vec!["form-input", "t"]);
    }
}
