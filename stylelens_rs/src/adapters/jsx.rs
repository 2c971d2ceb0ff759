//! JSX/TSX adapter built on the OXC parser.
//!
//! Recognises `className="..."` (or `className={"..."}`) and
//! `style={{ ... }}` on any JSX element.

use oxc_allocator::Allocator;
use oxc_ast::ast::*;
use oxc_ast_visit::{Visit, walk};
use oxc_parser::Parser;
use oxc_span::{SourceType, Span};

use crate::error::ParseError;
use crate::types::{AttributeSpan, Dialect, Extraction, FileId};

use super::style_object::object_declarations;
use super::{DialectAdapter, UsageSink};

/// Adapter for `.jsx` and `.tsx` documents.
#[derive(Debug, Clone, Copy)]
pub struct JsxAdapter {
    dialect: Dialect,
}

impl JsxAdapter {
    pub const fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    fn source_type(&self) -> SourceType {
        match self.dialect {
            Dialect::Tsx => SourceType::tsx(),
            _ => SourceType::jsx(),
        }
    }
}

impl DialectAdapter for JsxAdapter {
    fn dialect(&self) -> Dialect {
        self.dialect
    }

    fn extract(&self, file: &FileId, text: &str) -> Result<Extraction, ParseError> {
        let allocator = Allocator::default();
        let ret = Parser::new(&allocator, text, self.source_type()).parse();

        if let Some(err) = ret.errors.first() {
            let offset = err
                .labels
                .as_ref()
                .and_then(|labels| labels.first())
                .map(|label| label.offset())
                .unwrap_or(0);
            return Err(ParseError::new(self.dialect, offset, err.to_string()));
        }
        if ret.panicked {
            return Err(ParseError::new(self.dialect, 0, "parser aborted"));
        }

        let mut visitor = ClassAttributeVisitor {
            sink: UsageSink::new(file, text),
        };
        visitor.visit_program(&ret.program);
        Ok(visitor.sink.finish())
    }
}

struct ClassAttributeVisitor<'s> {
    sink: UsageSink<'s>,
}

impl<'a> Visit<'a> for ClassAttributeVisitor<'_> {
    fn visit_jsx_attribute(&mut self, attr: &JSXAttribute<'a>) {
        self.record_attribute(attr);
        walk::walk_jsx_attribute(self, attr);
    }
}

impl ClassAttributeVisitor<'_> {
    fn record_attribute(&mut self, attr: &JSXAttribute<'_>) {
        let JSXAttributeName::Identifier(ident) = &attr.name else {
            return;
        };
        let Some(value) = &attr.value else {
            return;
        };
        let attribute = (attr.span.start as usize, attr.span.end as usize);

        match ident.name.as_str() {
            "className" => {
                let literal = match value {
                    JSXAttributeValue::StringLiteral(lit) => Some(lit),
                    JSXAttributeValue::ExpressionContainer(container) => match container
                        .expression
                        .as_expression()
                        .map(|e| e.without_parentheses())
                    {
                        Some(Expression::StringLiteral(lit)) => Some(lit),
                        _ => None,
                    },
                    _ => None,
                };
                if let Some(lit) = literal {
                    let span = AttributeSpan {
                        value: inner_span(lit.span),
                        attribute,
                    };
                    self.sink.push_class(lit.value.as_str(), span);
                }
            }
            "style" => {
                let JSXAttributeValue::ExpressionContainer(container) = value else {
                    return;
                };
                let Some(Expression::ObjectExpression(object)) = container
                    .expression
                    .as_expression()
                    .map(|e| e.without_parentheses())
                else {
                    return;
                };
                if let Some(style_string) = object_declarations(object) {
                    let span = AttributeSpan {
                        value: inner_span(container.span),
                        attribute,
                    };
                    self.sink.push_style(style_string, span);
                }
            }
            _ => {}
        }
    }
}

/// Span between the delimiters of a quoted string or `{...}` container.
fn inner_span(span: Span) -> (usize, usize) {
    let start = span.start as usize + 1;
    let end = (span.end as usize).saturating_sub(1).max(start);
    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(dialect: Dialect, text: &str) -> Result<Extraction, ParseError> {
        JsxAdapter::new(dialect).extract(&FileId::new("src/App.tsx"), text)
    }

    #[test]
    fn test_class_name_literal_normalized_with_value_span() {
        let text = "const A = () => <div className=\"p-4  flex\">hi</div>;";
        let extraction = extract(Dialect::Jsx, text).expect("parses");
        assert_eq!(extraction.class_usages.len(), 1);

        let usage = &extraction.class_usages[0];
        assert_eq!(usage.class_string, "flex p-4");
        assert_eq!(usage.raw, "p-4  flex");
        assert_eq!(usage.location.start_line, 0);
        assert_eq!(usage.location.start_col, text.find("p-4").expect("value"));
        assert_eq!(usage.location.end_col, usage.location.start_col + "p-4  flex".len());
        assert_eq!(
            usage.attribute_location.start_col,
            text.find("className").expect("attr")
        );
    }

    #[test]
    fn test_class_name_in_expression_container() {
        let text = "const A = () => <div className={\"btn primary\"} />;";
        let extraction = extract(Dialect::Jsx, text).expect("parses");
        assert_eq!(extraction.class_usages[0].class_string, "btn primary");
        assert_eq!(extraction.class_usages[0].raw, "btn primary");
    }

    #[test]
    fn test_dynamic_class_names_skipped() {
        let text = r#"
const A = ({ on }) => (
  <>
    <div className={on ? "a" : "b"} />
    <div className={`x ${on}`} />
    <div className={cx("a", "b")} />
    <div className={"a " + "b"} />
    <div className="" />
  </>
);
"#;
        let extraction = extract(Dialect::Jsx, text).expect("parses");
        assert!(extraction.class_usages.is_empty());
    }

    #[test]
    fn test_class_attribute_is_not_jsx_convention() {
        let text = "const A = () => <div class=\"solid-style\" />;";
        let extraction = extract(Dialect::Jsx, text).expect("parses");
        assert!(extraction.class_usages.is_empty());
    }

    #[test]
    fn test_inline_style_object() {
        let text = "const A = () => <p style={{ backgroundColor: 'red', padding: 4 }}>x</p>;";
        let extraction = extract(Dialect::Jsx, text).expect("parses");
        assert_eq!(extraction.inline_style_usages.len(), 1);

        let usage = &extraction.inline_style_usages[0];
        assert_eq!(usage.style_string, "background-color: red; padding: 4px");
        let value_start = text.find("{ backgroundColor").expect("object");
        assert_eq!(usage.location.start_col, value_start);
        assert_eq!(
            usage.attribute_location.start_col,
            text.find("style=").expect("attr")
        );
    }

    #[test]
    fn test_inline_style_dynamic_skipped() {
        let text = r#"
const A = ({ c }) => (
  <>
    <p style={styles.card} />
    <p style={{ color: c }} />
    <p style={{ ...base }} />
    <p style={{}} />
  </>
);
"#;
        let extraction = extract(Dialect::Jsx, text).expect("parses");
        assert!(extraction.inline_style_usages.is_empty());
    }

    #[test]
    fn test_nested_elements_all_visited() {
        let text = r#"
export function List() {
  return (
    <ul className="list">
      {items.map((item) => <li key={item} className="item">{item}</li>)}
    </ul>
  );
}
"#;
        let extraction = extract(Dialect::Jsx, text).expect("parses");
        let keys: Vec<_> = extraction
            .class_usages
            .iter()
            .map(|u| u.class_string.as_str())
            .collect();
        assert_eq!(keys, vec!["list", "item"]);
        assert_eq!(extraction.class_usages[1].location.start_line, 4);
    }

    #[test]
    fn test_tsx_generics_and_types() {
        let text = r#"
type Props = { title: string };
export const Card = <T,>({ title }: Props) => <h1 className="title">{title as string}</h1>;
"#;
        let extraction = extract(Dialect::Tsx, text).expect("parses");
        assert_eq!(extraction.class_usages.len(), 1);
    }

    #[test]
    fn test_syntax_error_is_parse_error() {
        let text = "const A = () => <div className=\"a\">;";
        let err = extract(Dialect::Jsx, text).expect_err("unclosed element");
        assert_eq!(err.dialect, Dialect::Jsx);
    }
}
