//! Query utilities over the host TypeScript AST.
//!
//! Total, side-effect-free extraction functions chained with `Option`
//! combinators. Every shape mismatch (a decorator that is not invoked, an
//! argument that is not an object literal, an initializer that is not a
//! compile-time string) yields `None`, never an error: malformed metadata
//! must not abort a walk, it just contributes nothing.

use oxc_ast::ast;
use oxc_span::{GetSpan, Span};

/// The decorator's call expression, if it is invoked at all.
pub fn call_expression<'a>(decorator: &'a ast::Decorator<'a>) -> Option<&'a ast::CallExpression<'a>> {
    match &decorator.expression {
        ast::Expression::CallExpression(call) => Some(&**call),
        _ => None,
    }
}

/// Keep a call expression only when its callee is a plain identifier with
/// exactly this name. `Foo.Component` does not match `Component`.
pub fn with_identifier<'a>(
    call: &'a ast::CallExpression<'a>,
    name: &str,
) -> Option<&'a ast::CallExpression<'a>> {
    match &call.callee {
        ast::Expression::Identifier(ident) if ident.name == name => Some(call),
        _ => None,
    }
}

/// The name a decorator was invoked (or referenced) by, for plain
/// identifier callees only.
pub fn decorator_name<'a>(decorator: &'a ast::Decorator<'a>) -> Option<&'a str> {
    match &decorator.expression {
        ast::Expression::Identifier(ident) => Some(ident.name.as_str()),
        ast::Expression::CallExpression(call) => match &call.callee {
            ast::Expression::Identifier(ident) => Some(ident.name.as_str()),
            _ => None,
        },
        _ => None,
    }
}

/// The decorator's first argument, only when it is an object literal with
/// at least one property. `@Component` and `@Component()` both carry no
/// metadata and yield `None`.
pub fn decorator_argument<'a>(decorator: &'a ast::Decorator<'a>) -> Option<&'a ast::ObjectExpression<'a>> {
    let call = call_expression(decorator)?;
    let arg = call.arguments.first()?.as_expression()?;
    match arg {
        ast::Expression::ObjectExpression(obj) if !obj.properties.is_empty() => Some(&**obj),
        _ => None,
    }
}

/// Find an object-literal property by exact (non-computed) name.
pub fn object_property<'a>(
    obj: &'a ast::ObjectExpression<'a>,
    name: &str,
) -> Option<&'a ast::ObjectProperty<'a>> {
    obj.properties.iter().find_map(|prop| match prop {
        ast::ObjectPropertyKind::ObjectProperty(prop) if property_key_name(&prop.key) == Some(name) => {
            Some(&**prop)
        }
        _ => None,
    })
}

/// A property's initializer, only when the property exists.
pub fn property_initializer<'a>(
    obj: &'a ast::ObjectExpression<'a>,
    name: &str,
) -> Option<&'a ast::Expression<'a>> {
    object_property(obj, name).map(|prop| &prop.value)
}

pub fn property_key_name<'a>(key: &'a ast::PropertyKey<'a>) -> Option<&'a str> {
    match key {
        ast::PropertyKey::StaticIdentifier(ident) => Some(ident.name.as_str()),
        ast::PropertyKey::Identifier(ident) => Some(ident.name.as_str()),
        ast::PropertyKey::PrivateIdentifier(ident) => Some(ident.name.as_str()),
        ast::PropertyKey::StringLiteral(lit) => Some(lit.value.as_str()),
        _ => None,
    }
}

/// The compile-time string value of an expression: a plain string literal,
/// or a template literal with no `${...}` interpolation. Identifiers,
/// computed values and interpolated templates are not statically known.
pub fn string_literal_value(expr: &ast::Expression<'_>) -> Option<String> {
    match expr {
        ast::Expression::StringLiteral(lit) => Some(lit.value.to_string()),
        ast::Expression::TemplateLiteral(template) if template.expressions.is_empty() => {
            template.quasis.first().map(|quasi| {
                quasi
                    .value
                    .cooked
                    .as_ref()
                    .map(|cooked| cooked.to_string())
                    .unwrap_or_else(|| quasi.value.raw.to_string())
            })
        }
        _ => None,
    }
}

/// Literal string elements of an array initializer, with their spans.
/// Non-literal elements are filtered out, not errors; order is preserved.
pub fn string_array_values(expr: &ast::Expression<'_>) -> Vec<(String, Span)> {
    match expr {
        ast::Expression::ArrayExpression(array) => array
            .elements
            .iter()
            .filter_map(|element| {
                let expr = element.as_expression()?;
                let value = string_literal_value(expr)?;
                Some((value, expr.span()))
            })
            .collect(),
        _ => Vec::new(),
    }
}

pub fn class_name(class: &ast::Class<'_>) -> Option<String> {
    class.id.as_ref().map(|id| id.name.to_string())
}

/// String-literal arguments of a decorator invocation (used for member
/// decorators like `@Input('alias')`).
pub fn decorator_string_args(decorator: &ast::Decorator<'_>) -> Vec<String> {
    match call_expression(decorator) {
        Some(call) => call
            .arguments
            .iter()
            .filter_map(|arg| arg.as_expression())
            .filter_map(string_literal_value)
            .collect(),
        None => Vec::new(),
    }
}

/// The boolean value of a property initializer, for literal booleans only.
pub fn boolean_literal_value(expr: &ast::Expression<'_>) -> Option<bool> {
    match expr {
        ast::Expression::BooleanLiteral(lit) => Some(lit.value),
        _ => None,
    }
}
