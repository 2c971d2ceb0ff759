//! Object-literal inline styles (`{ backgroundColor: "red", padding: 4 }`).
//!
//! Shared by the JSX adapter (`style={{...}}`) and the Vue adapter
//! (`:style="{...}"`).

use heck::ToKebabCase;
use oxc_allocator::Allocator;
use oxc_ast::ast::*;
use oxc_parser::Parser;
use oxc_span::SourceType;

use crate::normalize::normalize_style_string;

/// Declarations of an object literal whose values are all string or numeric
/// literals, normalized. `None` when any property is not of that form.
pub(crate) fn object_declarations(object: &ObjectExpression<'_>) -> Option<String> {
    let mut declarations = Vec::with_capacity(object.properties.len());
    for property in &object.properties {
        let ObjectPropertyKind::ObjectProperty(property) = property else {
            return None;
        };
        if property.computed || property.method || !matches!(property.kind, PropertyKind::Init) {
            return None;
        }
        let key = property.key.static_name()?;
        let value = literal_value(property.value.without_parentheses())?;
        declarations.push(format!("{}: {}", css_property_name(&key), value));
    }
    Some(normalize_style_string(&declarations.join(";")))
}

/// Parse a standalone JS expression (a Vue binding value) and extract its
/// declarations if it is an object literal.
pub(crate) fn expression_declarations(source: &str) -> Option<String> {
    let allocator = Allocator::default();
    let expression = Parser::new(&allocator, source, SourceType::ts())
        .parse_expression()
        .ok()?;
    match expression.without_parentheses() {
        Expression::ObjectExpression(object) => object_declarations(object),
        _ => None,
    }
}

fn literal_value(expression: &Expression<'_>) -> Option<String> {
    match expression {
        Expression::StringLiteral(lit) => Some(lit.value.to_string()),
        Expression::NumericLiteral(num) => Some(format!("{}px", num.value)),
        _ => None,
    }
}

/// `backgroundColor` → `background-color`, `WebkitTransition` →
/// `-webkit-transition`; custom properties and kebab names pass through.
pub(crate) fn css_property_name(key: &str) -> String {
    if key.starts_with("--") || !key.chars().any(|c| c.is_ascii_uppercase()) {
        return key.to_string();
    }
    let kebab = key.to_kebab_case();
    let vendor = key.starts_with(|c: char| c.is_ascii_uppercase())
        || (key.starts_with("ms") && key[2..].starts_with(|c: char| c.is_ascii_uppercase()));
    if vendor { format!("-{kebab}") } else { kebab }
}
