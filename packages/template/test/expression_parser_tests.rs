//! Expression parser integration tests.

use angular_template::expression_parser::ast::Ast;
use angular_template::expression_parser::Parser;

#[test]
fn should_report_absolute_spans_relative_to_base_offset() {
    let parser = Parser::new();
    let result = parser.parse_binding("user.name", "tpl.html", 100);
    let Ast::PropertyRead(name) = result.ast else { panic!() };
    assert_eq!(name.name, "name");
    assert_eq!(name.name_span.start, 105);
    assert_eq!(name.name_span.end, 109);
    let Ast::PropertyRead(user) = *name.receiver else { panic!() };
    assert_eq!(user.name_span.start, 100);
    assert_eq!(user.name_span.end, 104);
}

#[test]
fn should_parse_pipe_chains_left_associative() {
    let parser = Parser::new();
    let result = parser.parse_binding("value | lowercase | trim", "tpl.html", 0);
    let Ast::BindingPipe(outer) = result.ast else { panic!() };
    assert_eq!(outer.name, "trim");
    let Ast::BindingPipe(inner) = *outer.exp else { panic!() };
    assert_eq!(inner.name, "lowercase");
}

#[test]
fn should_parse_literal_collections() {
    let parser = Parser::new();
    let result = parser.parse_binding("{ items: [1, 2], active: true }", "tpl.html", 0);
    let Ast::LiteralMap(map) = result.ast else { panic!() };
    assert_eq!(map.keys.len(), 2);
    assert_eq!(map.keys[0].key, "items");
    assert!(matches!(map.values[0], Ast::LiteralArray(_)));
}

#[test]
fn should_parse_safe_calls() {
    let parser = Parser::new();
    let result = parser.parse_binding("load?.()", "tpl.html", 0);
    assert!(result.errors.is_empty());
    assert!(matches!(result.ast, Ast::SafeCall(_)));
}

#[test]
fn should_keep_source_and_location_on_result() {
    let parser = Parser::new();
    let result = parser.parse_binding("total + 1", "cmp.html", 7);
    assert_eq!(result.source, "total + 1");
    assert_eq!(result.location, "cmp.html");
    assert_eq!(result.absolute_offset, 7);
}

#[test]
fn should_not_panic_on_garbage() {
    let parser = Parser::new();
    for input in ["", "   ", "((", "a ? b", "foo[", "{ x:", "@", "a..b"] {
        let result = parser.parse_binding(input, "tpl.html", 0);
        // Some inputs are legal (empty), the rest must only record errors.
        let _ = result;
    }
}
