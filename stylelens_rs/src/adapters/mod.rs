//! Dialect adapters: one source document in, literal style usages out.
//!
//! Every dialect implements [`DialectAdapter`]; the aggregator only ever sees
//! the trait and the [`Dialect`] tag carried with each document.
//!
//! # Module Structure
//!
//! - `jsx`: JSX/TSX via the OXC parser (`className`, `style={{...}}`)
//! - `vue`: Vue single-file components (`class`, `style`, `:style`)
//! - `svelte`: Svelte components (`class`, `style`)
//! - `markup`: template attribute scanner shared by Vue and Svelte
//! - `style_object`: object-literal style extraction shared by JSX and Vue

mod jsx;
pub(crate) mod markup;
mod style_object;
mod svelte;
mod vue;

use crate::error::{DocumentError, ParseError};
use crate::normalize::normalize_class_string;
use crate::position::LineIndex;
use crate::types::{
    AttributeSpan, ComponentDocument, Dialect, Extraction, FileId, InlineStyleUsage, StyleUsage,
};

pub use jsx::JsxAdapter;
pub use svelte::SvelteAdapter;
pub use vue::VueAdapter;

/// Extracts literal class and inline-style usages from one dialect.
///
/// Implementations are pure: the same text always yields the same usages,
/// and no state survives between calls.
pub trait DialectAdapter: Sync {
    fn dialect(&self) -> Dialect;

    /// Parse `text` and collect its usages, tagged with `file`.
    ///
    /// A document that does not parse yields `Err`; dynamic attribute values
    /// are skipped silently.
    fn extract(&self, file: &FileId, text: &str) -> Result<Extraction, ParseError>;
}

static JSX: JsxAdapter = JsxAdapter::new(Dialect::Jsx);
static TSX: JsxAdapter = JsxAdapter::new(Dialect::Tsx);
static VUE: VueAdapter = VueAdapter;
static SVELTE: SvelteAdapter = SvelteAdapter;

/// The adapter responsible for `dialect`.
pub fn adapter_for(dialect: Dialect) -> &'static dyn DialectAdapter {
    match dialect {
        Dialect::Jsx => &JSX,
        Dialect::Tsx => &TSX,
        Dialect::Vue => &VUE,
        Dialect::Svelte => &SVELTE,
    }
}

/// Run the matching adapter over a host document.
pub fn extract_usages(document: &ComponentDocument) -> Result<Extraction, DocumentError> {
    let text = document.text.as_ref().map_err(|err| err.clone())?;
    let extraction = adapter_for(document.dialect).extract(&document.file, text)?;
    Ok(extraction)
}

/// Accumulates usages for one document, converting byte spans to ranges and
/// dropping empty values.
pub(crate) struct UsageSink<'a> {
    file: &'a FileId,
    text: &'a str,
    index: LineIndex<'a>,
    extraction: Extraction,
}

impl<'a> UsageSink<'a> {
    pub(crate) fn new(file: &'a FileId, text: &'a str) -> Self {
        Self {
            file,
            text,
            index: LineIndex::new(text),
            extraction: Extraction::default(),
        }
    }

    /// Record a literal class value; `value` is the unescaped attribute value.
    pub(crate) fn push_class(&mut self, value: &str, span: AttributeSpan) {
        let class_string = normalize_class_string(value);
        if class_string.is_empty() {
            return;
        }
        let (start, end) = span.value;
        self.extraction.class_usages.push(StyleUsage {
            class_string,
            raw: self.text[start..end].to_string(),
            location: self.index.range(self.file, start, end),
            attribute_location: self.index.range(self.file, span.attribute.0, span.attribute.1),
            source_file: self.file.clone(),
        });
    }

    /// Record an already-normalized declaration string.
    pub(crate) fn push_style(&mut self, style_string: String, span: AttributeSpan) {
        if style_string.is_empty() {
            return;
        }
        let (start, end) = span.value;
        self.extraction.inline_style_usages.push(InlineStyleUsage {
            style_string,
            location: self.index.range(self.file, start, end),
            attribute_location: self.index.range(self.file, span.attribute.0, span.attribute.1),
            source_file: self.file.clone(),
        });
    }

    pub(crate) fn finish(self) -> Extraction {
        self.extraction
    }
}
