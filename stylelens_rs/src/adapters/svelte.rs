//! Svelte component adapter.
//!
//! Markup outside `<script>` and `<style>` is inspected. A `class` or
//! `style` value counts only when it is plain text; any `{...}` inside the
//! value makes it dynamic and it is skipped. `class:name={...}` directives
//! are not class attributes.

use crate::error::ParseError;
use crate::normalize::canonical_declaration_list;
use crate::types::{AttributeSpan, Dialect, Extraction, FileId};

use super::markup::{Flavor, MarkupAttribute, ValueDelimiter, scan_attributes};
use super::{DialectAdapter, UsageSink};

/// Adapter for `.svelte` documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct SvelteAdapter;

impl DialectAdapter for SvelteAdapter {
    fn dialect(&self) -> Dialect {
        Dialect::Svelte
    }

    fn extract(&self, file: &FileId, text: &str) -> Result<Extraction, ParseError> {
        let attributes = scan_attributes(text, Flavor::Svelte)
            .map_err(|err| ParseError::new(Dialect::Svelte, err.offset, err.message))?;

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
    if value.delimiter == ValueDelimiter::Braced || value.text.contains('{') {
        return;
    }
    let span = AttributeSpan {
        value: (value.start, value.end),
        attribute: (attr.start, attr.end),
    };

    match attr.name {
        "class" => sink.push_class(value.text, span),
        "style" => sink.push_style(canonical_declaration_list(value.text), span),
        _ => {}
    }
}
