//! Binding transform integration tests.

use angular_template::expression_parser::ast::Ast;
use angular_template::template_ast::TemplateNode;
use angular_template::template_transform::{
    parse_template, DirectiveDeclaration, TemplateParseOptions,
};
use angular_template::ParseErrorLevel;

fn parse(source: &str) -> angular_template::ParsedTemplate {
    parse_template(source, "cmp.html", &TemplateParseOptions::default())
}

#[test]
fn should_classify_bindings_events_and_plain_attributes() {
    let parsed = parse("<input type=\"text\" [value]=\"name\" (input)=\"onInput($event)\">");
    assert!(parsed.errors.is_empty());
    let TemplateNode::Element(input) = &parsed.nodes[0] else { panic!() };
    assert_eq!(input.attributes.len(), 1);
    assert_eq!(input.attributes[0].name, "type");
    assert_eq!(input.inputs.len(), 1);
    assert_eq!(input.inputs[0].name, "value");
    assert_eq!(input.outputs.len(), 1);
    assert_eq!(input.outputs[0].name, "input");
}

#[test]
fn should_desugar_two_way_bindings() {
    let parsed = parse("<input [(ngModel)]=\"name\">");
    let TemplateNode::Element(input) = &parsed.nodes[0] else { panic!() };
    assert_eq!(input.inputs[0].name, "ngModel");
    assert_eq!(input.outputs[0].name, "ngModelChange");
}

#[test]
fn should_expand_structural_directives_into_templates() {
    let parsed = parse("<li *ngFor=\"let item of items; let i = index\">{{ item }}</li>");
    assert!(parsed.errors.is_empty(), "{:?}", parsed.errors);
    let TemplateNode::Template(template) = &parsed.nodes[0] else { panic!() };
    assert_eq!(template.tag_name.as_deref(), Some("li"));
    let names: Vec<&str> = template.variables.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, vec!["item", "i"]);
    assert_eq!(template.inputs[0].name, "ngForOf");
    let TemplateNode::Element(li) = &template.children[0] else { panic!() };
    assert_eq!(li.name, "li");
    assert!(matches!(li.children[0], TemplateNode::BoundText(_)));
}

#[test]
fn should_parse_ng_template_variables() {
    let parsed = parse("<ng-template let-row=\"$implicit\" #tpl><span></span></ng-template>");
    let TemplateNode::Template(template) = &parsed.nodes[0] else { panic!() };
    assert!(template.tag_name.is_none());
    assert_eq!(template.variables[0].name, "row");
    assert_eq!(template.references[0].name, "tpl");
}

#[test]
fn should_resolve_references_against_predefined_directives() {
    let options = TemplateParseOptions {
        predefined_directives: vec![DirectiveDeclaration::new("form:not([ngNoForm])", Some("ngForm"))],
        ..Default::default()
    };
    let parsed = parse_template("<form #f=\"ngForm\"></form>", "cmp.html", &options);
    assert!(parsed.errors.is_empty(), "{:?}", parsed.errors);

    let unknown = parse("<form #f=\"ngForm\"></form>");
    assert_eq!(unknown.errors.len(), 1);
    assert_eq!(unknown.errors[0].level, ParseErrorLevel::Warning);
}

#[test]
fn should_split_interpolations_with_fragment_offsets() {
    let source = "<p>Hi {{ user.name }}!</p>";
    let parsed = parse(source);
    let TemplateNode::Element(p) = &parsed.nodes[0] else { panic!() };
    let TemplateNode::BoundText(text) = &p.children[0] else { panic!() };
    let Ast::Interpolation(interpolation) = &text.value.ast else { panic!() };
    assert_eq!(interpolation.strings, vec!["Hi ", "!"]);
    let Ast::PropertyRead(name) = &interpolation.expressions[0] else { panic!() };
    // Offsets address the fragment itself.
    assert_eq!(name.name_span.start, source.find("name").unwrap());
}

#[test]
fn should_bind_attributes_containing_interpolation() {
    let parsed = parse("<img alt=\"photo of {{ user.name }}\">");
    let TemplateNode::Element(img) = &parsed.nodes[0] else { panic!() };
    assert!(img.attributes.is_empty());
    assert_eq!(img.inputs.len(), 1);
    assert_eq!(img.inputs[0].name, "alt");
}

#[test]
fn should_report_multiple_structural_directives() {
    let parsed = parse("<div *ngIf=\"ok\" *ngFor=\"let x of xs\"></div>");
    assert!(parsed.has_fatal_errors());
}
