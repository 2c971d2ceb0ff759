//! Attribute scanner for HTML-like component templates (Vue SFC, Svelte).
//!
//! This is a structural scanner rather than a full HTML parser: it walks tags,
//! keeps an element stack (and a `{#block}` stack for Svelte) so malformed
//! documents are rejected, and reports every attribute with byte spans for
//! its name and value. Expression syntax inside `{...}` / `{{ ... }}` is only
//! skipped, never interpreted.

/// Which template grammar to scan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Flavor {
    /// Whole `.vue` file: only the top-level `<template>` block is markup,
    /// every other top-level block is raw text.
    VueSfc,
    /// Whole `.svelte` file: markup everywhere except `<script>` / `<style>`.
    Svelte,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ValueDelimiter {
    Quoted,
    Unquoted,
    Braced,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct AttributeValue<'s> {
    pub text: &'s str,
    /// Byte span of `text`, excluding quotes or braces.
    pub start: usize,
    pub end: usize,
    pub delimiter: ValueDelimiter,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct MarkupAttribute<'s> {
    pub name: &'s str,
    pub value: Option<AttributeValue<'s>>,
    /// Byte span of the whole attribute, name through closing delimiter.
    pub start: usize,
    pub end: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ScanError {
    pub offset: usize,
    pub message: String,
}

impl ScanError {
    fn new(offset: usize, message: impl Into<String>) -> Self {
        Self {
            offset,
            message: message.into(),
        }
    }
}

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "textarea", "title"];

/// Svelte component-level blocks whose attributes are not template markup.
const SVELTE_INSTANCE_BLOCKS: &[&str] = &["script", "style"];

/// Elements an opening tag implicitly closes when one of them is the
/// innermost open element (HTML optional end tags, as Svelte applies them).
fn closes_open_element(open: &str, next: &str) -> bool {
    let closed_by: &[&str] = match open {
        "li" => &["li"],
        "dt" | "dd" => &["dt", "dd"],
        "p" => &[
            "address", "article", "aside", "blockquote", "div", "dl", "fieldset", "footer",
            "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hgroup", "hr", "main", "menu",
            "nav", "ol", "p", "pre", "section", "table", "ul",
        ],
        "rt" | "rp" => &["rt", "rp"],
        "optgroup" => &["optgroup"],
        "option" => &["option", "optgroup"],
        "thead" => &["tbody", "tfoot"],
        "tbody" => &["tbody", "tfoot"],
        "tfoot" => &["tbody"],
        "tr" => &["tr", "tbody"],
        "td" | "th" => &["td", "th", "tr"],
        _ => return false,
    };
    closed_by.contains(&next)
}

struct OpenElement<'s> {
    name: &'s str,
    start: usize,
    /// Number of open `{#block}`s when the element was opened.
    block_depth: usize,
}

struct Tag<'s> {
    name: &'s str,
    attributes: Vec<MarkupAttribute<'s>>,
    self_closing: bool,
}

/// Scan a component document and return the attributes of every element
/// that belongs to its template, in source order.
pub(crate) fn scan_attributes(
    src: &str,
    flavor: Flavor,
) -> Result<Vec<MarkupAttribute<'_>>, ScanError> {
    let mut scanner = Scanner {
        src,
        bytes: src.as_bytes(),
        pos: 0,
        flavor,
        open: Vec::new(),
        blocks: Vec::new(),
        collected: Vec::new(),
    };
    scanner.run()?;
    Ok(scanner.collected)
}

struct Scanner<'s> {
    src: &'s str,
    bytes: &'s [u8],
    pos: usize,
    flavor: Flavor,
    open: Vec<OpenElement<'s>>,
    blocks: Vec<(&'s str, usize)>,
    collected: Vec<MarkupAttribute<'s>>,
}

impl<'s> Scanner<'s> {
    fn run(&mut self) -> Result<(), ScanError> {
        while self.pos < self.bytes.len() {
            match self.bytes[self.pos] {
                b'<' => self.scan_angle()?,
                b'{' if self.flavor == Flavor::Svelte => self.scan_svelte_mustache()?,
                b'{' if self.in_vue_template() && self.peek(1) == Some(b'{') => {
                    self.scan_vue_interpolation()?
                }
                _ => self.pos += 1,
            }
        }

        if let Some(element) = self.open.last() {
            return Err(ScanError::new(
                element.start,
                format!("element <{}> is missing its end tag", element.name),
            ));
        }
        if let Some((block, start)) = self.blocks.last() {
            return Err(ScanError::new(
                *start,
                format!("block {{#{block}}} was never closed"),
            ));
        }
        Ok(())
    }

    fn peek(&self, ahead: usize) -> Option<u8> {
        self.bytes.get(self.pos + ahead).copied()
    }

    fn starts_with(&self, needle: &str) -> bool {
        self.src[self.pos..].starts_with(needle)
    }

    fn in_vue_template(&self) -> bool {
        self.flavor == Flavor::VueSfc
            && self
                .open
                .first()
                .is_some_and(|root| root.name == "template")
    }

    /// Whether attributes of a tag opened now belong to the template.
    fn collecting(&self) -> bool {
        match self.flavor {
            Flavor::Svelte => true,
            Flavor::VueSfc => self.in_vue_template(),
        }
    }

    fn scan_angle(&mut self) -> Result<(), ScanError> {
        if self.starts_with("<!--") {
            let start = self.pos;
            return match self.src[self.pos + 4..].find("-->") {
                Some(rel) => {
                    self.pos += 4 + rel + 3;
                    Ok(())
                }
                None => Err(ScanError::new(start, "unterminated comment")),
            };
        }

        match self.peek(1) {
            Some(b'!') | Some(b'?') => {
                let start = self.pos;
                match self.src[self.pos..].find('>') {
                    Some(rel) => {
                        self.pos += rel + 1;
                        Ok(())
                    }
                    None => Err(ScanError::new(start, "unterminated declaration")),
                }
            }
            Some(b'/') => self.scan_closing_tag(),
            Some(c) if c.is_ascii_alphabetic() => self.scan_element(),
            _ => {
                // A bare '<' in text
                self.pos += 1;
                Ok(())
            }
        }
    }

    fn scan_element(&mut self) -> Result<(), ScanError> {
        let start = self.pos;
        let collecting = self.collecting();
        let top_level = self.open.is_empty();
        let tag = self.scan_open_tag()?;

        let raw_text = match self.flavor {
            Flavor::VueSfc if top_level => !is_html_template(&tag),
            _ => RAW_TEXT_ELEMENTS
                .iter()
                .any(|raw| raw.eq_ignore_ascii_case(tag.name)),
        };
        let instance_block = self.flavor == Flavor::Svelte
            && top_level
            && SVELTE_INSTANCE_BLOCKS
                .iter()
                .any(|block| block.eq_ignore_ascii_case(tag.name));

        if collecting && !instance_block {
            self.collected.extend(tag.attributes);
        }
        if self.flavor == Flavor::Svelte {
            self.close_omitted(tag.name);
        }

        if tag.self_closing
            || VOID_ELEMENTS
                .iter()
                .any(|void| void.eq_ignore_ascii_case(tag.name))
        {
            return Ok(());
        }

        if raw_text {
            return self.skip_raw_text(tag.name, start);
        }

        self.open.push(OpenElement {
            name: tag.name,
            start,
            block_depth: self.blocks.len(),
        });
        Ok(())
    }

    /// Pop open elements whose end tag is implied by opening `next`.
    fn close_omitted(&mut self, next: &str) {
        let next = next.to_ascii_lowercase();
        while let Some(element) = self.open.last() {
            if element.block_depth != self.blocks.len()
                || !closes_open_element(&element.name.to_ascii_lowercase(), &next)
            {
                break;
            }
            self.open.pop();
        }
    }

    fn scan_open_tag(&mut self) -> Result<Tag<'s>, ScanError> {
        let tag_start = self.pos;
        self.pos += 1;
        let name = self.read_while(is_tag_name_byte);
        let mut attributes = Vec::new();

        loop {
            self.skip_whitespace();
            match self.peek(0) {
                None => {
                    return Err(ScanError::new(
                        tag_start,
                        format!("unterminated start tag <{name}>"),
                    ));
                }
                Some(b'>') => {
                    self.pos += 1;
                    return Ok(Tag {
                        name,
                        attributes,
                        self_closing: false,
                    });
                }
                Some(b'/') if self.peek(1) == Some(b'>') => {
                    self.pos += 2;
                    return Ok(Tag {
                        name,
                        attributes,
                        self_closing: true,
                    });
                }
                Some(b'/') => self.pos += 1,
                Some(b'{') if self.flavor == Flavor::Svelte => {
                    // `{...spread}` or `{shorthand}` attribute
                    self.skip_braced()?;
                }
                Some(_) => attributes.push(self.scan_attribute()?),
            }
        }
    }

    fn scan_attribute(&mut self) -> Result<MarkupAttribute<'s>, ScanError> {
        let start = self.pos;
        let name = self.read_while(is_attribute_name_byte);
        if name.is_empty() {
            return Err(ScanError::new(start, "unexpected character in tag"));
        }

        let after_name = self.pos;
        self.skip_whitespace();
        if self.peek(0) != Some(b'=') {
            self.pos = after_name;
            return Ok(MarkupAttribute {
                name,
                value: None,
                start,
                end: after_name,
            });
        }
        self.pos += 1;
        self.skip_whitespace();

        let value = match self.peek(0) {
            Some(quote @ (b'"' | b'\'')) => self.scan_quoted_value(quote)?,
            Some(b'{') if self.flavor == Flavor::Svelte => {
                let src = self.src;
                let open = self.pos;
                self.skip_braced()?;
                AttributeValue {
                    text: &src[open + 1..self.pos - 1],
                    start: open + 1,
                    end: self.pos - 1,
                    delimiter: ValueDelimiter::Braced,
                }
            }
            Some(_) => {
                let value_start = self.pos;
                let text = self.read_while(|b| !b.is_ascii_whitespace() && b != b'>');
                AttributeValue {
                    text,
                    start: value_start,
                    end: self.pos,
                    delimiter: ValueDelimiter::Unquoted,
                }
            }
            None => {
                return Err(ScanError::new(
                    start,
                    format!("attribute '{name}' has no value"),
                ));
            }
        };

        Ok(MarkupAttribute {
            name,
            value: Some(value),
            start,
            end: self.pos,
        })
    }

    fn scan_quoted_value(&mut self, quote: u8) -> Result<AttributeValue<'s>, ScanError> {
        let open = self.pos;
        self.pos += 1;
        loop {
            match self.peek(0) {
                None => return Err(ScanError::new(open, "unterminated attribute value")),
                Some(b) if b == quote => break,
                Some(b'{') if self.flavor == Flavor::Svelte => self.skip_braced()?,
                Some(_) => self.pos += 1,
            }
        }
        let src = self.src;
        let value = AttributeValue {
            text: &src[open + 1..self.pos],
            start: open + 1,
            end: self.pos,
            delimiter: ValueDelimiter::Quoted,
        };
        self.pos += 1;
        Ok(value)
    }

    fn scan_closing_tag(&mut self) -> Result<(), ScanError> {
        let start = self.pos;
        self.pos += 2;
        let name = self.read_while(is_tag_name_byte);
        self.skip_whitespace();
        if self.peek(0) != Some(b'>') {
            return Err(ScanError::new(start, format!("malformed end tag </{name}")));
        }
        self.pos += 1;

        if self.flavor == Flavor::Svelte {
            return self.close_svelte_element(name, start);
        }

        match self.open.pop() {
            Some(element) if element.name.eq_ignore_ascii_case(name) => Ok(()),
            Some(element) => Err(ScanError::new(
                start,
                format!(
                    "end tag </{name}> does not match open element <{}>",
                    element.name
                ),
            )),
            None => Err(ScanError::new(
                start,
                format!("end tag </{name}> has no open element"),
            )),
        }
    }

    /// Close the nearest open `name`, implicitly ending any elements opened
    /// after it. Elements may not be closed across a `{#block}` boundary.
    fn close_svelte_element(&mut self, name: &str, start: usize) -> Result<(), ScanError> {
        let depth = self.blocks.len();
        let matching = self
            .open
            .iter()
            .rposition(|element| element.name.eq_ignore_ascii_case(name));
        let Some(index) = matching else {
            return Err(ScanError::new(
                start,
                format!("end tag </{name}> has no open element"),
            ));
        };
        if let Some(crossed) = self.open[index..]
            .iter()
            .find(|element| element.block_depth != depth)
        {
            return Err(ScanError::new(
                start,
                format!(
                    "end tag </{name}> crosses a block boundary at <{}>",
                    crossed.name
                ),
            ));
        }
        self.open.truncate(index);
        Ok(())
    }

    /// Skip to the end of `</name>` for elements whose content is not markup.
    fn skip_raw_text(&mut self, name: &str, start: usize) -> Result<(), ScanError> {
        let mut cursor = self.pos;
        while let Some(rel) = self.src[cursor..].find("</") {
            let tag_name_start = cursor + rel + 2;
            let tag_name_end = tag_name_start + name.len();
            if tag_name_end <= self.src.len()
                && self.src.is_char_boundary(tag_name_end)
                && self.src[tag_name_start..tag_name_end].eq_ignore_ascii_case(name)
            {
                let rest = &self.src[tag_name_end..];
                let trimmed = rest.trim_start();
                if trimmed.starts_with('>') {
                    self.pos = tag_name_end + (rest.len() - trimmed.len()) + 1;
                    return Ok(());
                }
            }
            cursor = tag_name_start;
        }
        Err(ScanError::new(
            start,
            format!("element <{name}> is missing its end tag"),
        ))
    }

    fn scan_vue_interpolation(&mut self) -> Result<(), ScanError> {
        let start = self.pos;
        match self.src[self.pos + 2..].find("}}") {
            Some(rel) => {
                self.pos += 2 + rel + 2;
                Ok(())
            }
            None => Err(ScanError::new(start, "unterminated interpolation")),
        }
    }

    fn scan_svelte_mustache(&mut self) -> Result<(), ScanError> {
        let src = self.src;
        let start = self.pos;
        self.skip_braced()?;
        let inner = src[start + 1..self.pos - 1].trim_start();

        if let Some(rest) = inner.strip_prefix('#') {
            let block = block_keyword(rest);
            self.blocks.push((block, start));
        } else if let Some(rest) = inner
            .strip_prefix('/')
            .filter(|rest| rest.starts_with(|c: char| c.is_ascii_alphabetic()))
        {
            let block = block_keyword(rest);
            match self.blocks.pop() {
                Some((open, _)) if open == block => {}
                Some((open, _)) => {
                    return Err(ScanError::new(
                        start,
                        format!("{{/{block}}} does not close {{#{open}}}"),
                    ));
                }
                None => {
                    return Err(ScanError::new(
                        start,
                        format!("{{/{block}}} has no open block"),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Skip a balanced `{...}` expression starting at the current `{`,
    /// stepping over string and template literals, comments and regex
    /// literals.
    fn skip_braced(&mut self) -> Result<(), ScanError> {
        let start = self.pos;
        let mut depth = 0usize;
        let mut prev = b'{';
        while let Some(b) = self.peek(0) {
            match b {
                b'{' => depth += 1,
                b'}' => {
                    depth -= 1;
                    if depth == 0 {
                        self.pos += 1;
                        return Ok(());
                    }
                }
                b'"' | b'\'' | b'`' => {
                    self.skip_string(b, start)?;
                    prev = b;
                    continue;
                }
                b'/' if self.peek(1) == Some(b'/') => {
                    self.skip_line_comment();
                    continue;
                }
                b'/' if self.peek(1) == Some(b'*') => {
                    self.skip_block_comment(start)?;
                    continue;
                }
                b'/' if may_start_regex(prev) && self.skip_regex() => {
                    prev = b'/';
                    continue;
                }
                _ => {}
            }
            if !b.is_ascii_whitespace() {
                prev = b;
            }
            self.pos += 1;
        }
        Err(ScanError::new(start, "unterminated expression"))
    }

    fn skip_line_comment(&mut self) {
        match self.src[self.pos..].find('\n') {
            Some(rel) => self.pos += rel,
            None => self.pos = self.bytes.len(),
        }
    }

    fn skip_block_comment(&mut self, expr_start: usize) -> Result<(), ScanError> {
        match self.src[self.pos + 2..].find("*/") {
            Some(rel) => {
                self.pos += 2 + rel + 2;
                Ok(())
            }
            None => Err(ScanError::new(
                expr_start,
                "unterminated comment inside expression",
            )),
        }
    }

    /// Step over `/pattern/flags` if one starts here. Returns `false`, leaving
    /// the position untouched, when the line ends before the closing `/`.
    fn skip_regex(&mut self) -> bool {
        let mut cursor = self.pos + 1;
        let mut in_class = false;
        while let Some(&b) = self.bytes.get(cursor) {
            match b {
                b'\\' => cursor += 1,
                b'\n' => return false,
                b'[' => in_class = true,
                b']' => in_class = false,
                b'/' if !in_class => {
                    cursor += 1;
                    while self.bytes.get(cursor).is_some_and(u8::is_ascii_alphabetic) {
                        cursor += 1;
                    }
                    self.pos = cursor;
                    return true;
                }
                _ => {}
            }
            cursor += 1;
        }
        false
    }

    fn skip_string(&mut self, quote: u8, expr_start: usize) -> Result<(), ScanError> {
        self.pos += 1;
        while let Some(b) = self.peek(0) {
            self.pos += 1;
            if b == b'\\' {
                self.pos += 1;
            } else if b == quote {
                return Ok(());
            }
        }
        Err(ScanError::new(
            expr_start,
            "unterminated string inside expression",
        ))
    }

    fn skip_whitespace(&mut self) {
        while self.peek(0).is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn read_while(&mut self, accept: impl Fn(u8) -> bool) -> &'s str {
        let src = self.src;
        let start = self.pos;
        while self.peek(0).is_some_and(&accept) {
            self.pos += 1;
        }
        &src[start..self.pos]
    }
}

fn is_tag_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b':' | b'.')
}

fn is_attribute_name_byte(b: u8) -> bool {
    !b.is_ascii_whitespace() && !matches!(b, b'=' | b'>' | b'/' | b'"' | b'\'' | b'<')
}

/// Whether a `/` after `prev` begins a regex literal rather than a division.
fn may_start_regex(prev: u8) -> bool {
    matches!(
        prev,
        b'(' | b',' | b'=' | b':' | b'[' | b'!' | b'&' | b'|' | b'?' | b'{' | b';' | b'+'
            | b'-' | b'*' | b'%' | b'<' | b'>' | b'~' | b'^'
    )
}

fn block_keyword(rest: &str) -> &str {
    let end = rest
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(rest.len());
    &rest[..end]
}

/// A top-level `<template>` whose content is HTML (not `lang="pug"` etc.).
fn is_html_template(tag: &Tag<'_>) -> bool {
    tag.name == "template"
        && tag.attributes.iter().all(|attr| {
            attr.name != "lang"
                || attr
                    .value
                    .as_ref()
                    .is_some_and(|value| value.text.eq_ignore_ascii_case("html"))
        })
}
