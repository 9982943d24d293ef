//! Binding transform: markup tree to bound template AST.
//!
//! Classifies every attribute (property binding, event binding, two-way
//! binding, structural microsyntax, reference, variable, plain text),
//! parses the embedded expressions, and splits interpolations out of text
//! nodes. All spans stay in the fragment's own coordinate space; callers
//! that embedded the fragment in a larger file add their base offset when
//! reporting.

use crate::expression_parser::ast::{Ast, AstWithSource, Interpolation, ParseSpan};
use crate::expression_parser::parser::{Parser, TemplateBinding};
use crate::interpolation::InterpolationConfig;
use crate::ml_parser::{self, parse_markup};
use crate::parse_util::{ParseError, ParseSourceSpan};
use crate::template_ast::*;

/// A directive known ahead of time, so template references bound to its
/// `exportAs` name resolve without the directive's real declaration.
#[derive(Debug, Clone)]
pub struct DirectiveDeclaration {
    pub selector: String,
    pub export_as: Option<String>,
}

impl DirectiveDeclaration {
    pub fn new(selector: impl Into<String>, export_as: Option<&str>) -> Self {
        DirectiveDeclaration {
            selector: selector.into(),
            export_as: export_as.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TemplateParseOptions {
    pub interpolation: InterpolationConfig,
    pub predefined_directives: Vec<DirectiveDeclaration>,
}

#[derive(Debug)]
pub struct ParsedTemplate {
    pub nodes: Vec<TemplateNode>,
    pub errors: Vec<ParseError>,
}

impl ParsedTemplate {
    pub fn has_fatal_errors(&self) -> bool {
        self.errors
            .iter()
            .any(|e| e.level == crate::parse_util::ParseErrorLevel::Error)
    }
}

pub fn parse_template(source: &str, url: &str, options: &TemplateParseOptions) -> ParsedTemplate {
    let tree = parse_markup(source, url);
    let mut transform = BindingTransform {
        url: url.to_string(),
        file: crate::parse_util::ParseSourceFile::new(source, url),
        options,
        parser: Parser::new(),
        errors: tree.errors,
    };
    let nodes = transform.transform_nodes(&tree.root_nodes);
    ParsedTemplate {
        nodes,
        errors: transform.errors,
    }
}

struct BindingTransform<'o> {
    url: String,
    file: std::sync::Arc<crate::parse_util::ParseSourceFile>,
    options: &'o TemplateParseOptions,
    parser: Parser,
    errors: Vec<ParseError>,
}

impl BindingTransform<'_> {
    fn transform_nodes(&mut self, nodes: &[ml_parser::Node]) -> Vec<TemplateNode> {
        let mut result = Vec::new();
        for node in nodes {
            match node {
                ml_parser::Node::Element(element) => result.push(self.transform_element(element)),
                ml_parser::Node::Text(text) => result.push(self.transform_text(text)),
                ml_parser::Node::Comment(_) => {}
            }
        }
        result
    }

    fn transform_element(&mut self, element: &ml_parser::Element) -> TemplateNode {
        let mut attributes = Vec::new();
        let mut inputs = Vec::new();
        let mut outputs = Vec::new();
        let mut references = Vec::new();
        let mut variables = Vec::new();
        let mut structural: Option<&ml_parser::Attribute> = None;

        for attr in &element.attrs {
            let name = attr.name.as_str();
            if name.starts_with('*') {
                if structural.is_some() {
                    self.errors.push(ParseError::new(
                        attr.source_span.clone(),
                        format!("Can't have multiple template bindings on one element (\"{}\")", name),
                    ));
                } else {
                    structural = Some(attr);
                }
            } else if let Some(prop) = strip_enclosed(name, "[(", ")]").or_else(|| name.strip_prefix("bindon-")) {
                let (input, output) = self.two_way_binding(prop, attr);
                inputs.push(input);
                outputs.push(output);
            } else if let Some(prop) = strip_enclosed(name, "[", "]").or_else(|| name.strip_prefix("bind-")) {
                inputs.push(self.bound_attribute(prop, attr));
            } else if let Some(event) = strip_enclosed(name, "(", ")").or_else(|| name.strip_prefix("on-")) {
                outputs.push(self.bound_event(event, attr));
            } else if let Some(reference) = name.strip_prefix('#').or_else(|| name.strip_prefix("ref-")) {
                references.push(self.reference(reference, attr));
            } else if let Some(variable) = name.strip_prefix("let-") {
                variables.push(Variable {
                    name: variable.to_string(),
                    value: attr.value.clone(),
                    source_span: attr.source_span.clone(),
                    key_span: attr.key_span.clone(),
                });
            } else if let Some(interpolation) = self.interpolation_in_attr(attr) {
                inputs.push(BoundAttribute {
                    name: name.to_string(),
                    value: interpolation,
                    source_span: attr.source_span.clone(),
                    key_span: attr.key_span.clone(),
                    value_span: attr.value_span.clone(),
                });
            } else {
                attributes.push(TextAttribute {
                    name: name.to_string(),
                    value: attr.value.clone(),
                    source_span: attr.source_span.clone(),
                    key_span: attr.key_span.clone(),
                    value_span: attr.value_span.clone(),
                });
            }
        }

        let children = self.transform_nodes(&element.children);

        if element.name == "ng-template" {
            return TemplateNode::Template(Template {
                tag_name: None,
                attributes,
                inputs,
                variables,
                references,
                children,
                source_span: element.source_span.clone(),
            });
        }

        let inner = Element {
            name: element.name.clone(),
            attributes,
            inputs,
            outputs,
            references,
            children,
            source_span: element.source_span.clone(),
            start_source_span: element.start_source_span.clone(),
            end_source_span: element.end_source_span.clone(),
        };

        match structural {
            Some(attr) => self.expand_structural(attr, inner, element),
            None => TemplateNode::Element(inner),
        }
    }

    /// `*dir="micro"` wraps its host element in an embedded template.
    fn expand_structural(
        &mut self,
        attr: &ml_parser::Attribute,
        inner: Element,
        element: &ml_parser::Element,
    ) -> TemplateNode {
        let directive_name = attr.name[1..].to_string();
        let value_offset = attr
            .value_span
            .as_ref()
            .map(|s| s.start.offset)
            .unwrap_or(attr.key_span.end.offset);
        let (bindings, errors) = self.parser.parse_template_bindings(
            &directive_name,
            &attr.value,
            &self.url,
            value_offset,
        );
        for error in errors {
            self.errors.push(ParseError::new(
                attr.source_span.clone(),
                error.message.clone(),
            ));
        }

        let mut attributes = vec![TextAttribute {
            name: attr.name.clone(),
            value: attr.value.clone(),
            source_span: attr.source_span.clone(),
            key_span: attr.key_span.clone(),
            value_span: attr.value_span.clone(),
        }];
        let mut inputs = Vec::new();
        let mut variables = Vec::new();

        for binding in bindings {
            match binding {
                TemplateBinding::Variable(variable) => {
                    let key_span = self.fragment_span(variable.key_span.start, variable.key_span.end);
                    variables.push(Variable {
                        name: variable.key,
                        value: variable.value.unwrap_or_else(|| "$implicit".to_string()),
                        source_span: key_span.clone(),
                        key_span,
                    });
                }
                TemplateBinding::Expression(binding) => {
                    let key_span = self.fragment_span(binding.key_span.start, binding.key_span.end);
                    match binding.expression {
                        Some(expression) => inputs.push(BoundAttribute {
                            name: binding.key,
                            value: expression,
                            source_span: attr.source_span.clone(),
                            key_span,
                            value_span: attr.value_span.clone(),
                        }),
                        None => attributes.push(TextAttribute {
                            name: binding.key,
                            value: String::new(),
                            source_span: key_span.clone(),
                            key_span,
                            value_span: None,
                        }),
                    }
                }
            }
        }

        let source_span = element.source_span.clone();
        TemplateNode::Template(Template {
            tag_name: Some(inner.name.clone()),
            attributes,
            inputs,
            variables,
            references: Vec::new(),
            children: vec![TemplateNode::Element(inner)],
            source_span,
        })
    }

    fn bound_attribute(&mut self, name: &str, attr: &ml_parser::Attribute) -> BoundAttribute {
        let value = self.parse_binding(attr);
        BoundAttribute {
            name: name.to_string(),
            value,
            source_span: attr.source_span.clone(),
            key_span: attr.key_span.clone(),
            value_span: attr.value_span.clone(),
        }
    }

    fn bound_event(&mut self, name: &str, attr: &ml_parser::Attribute) -> BoundEvent {
        let offset = attr
            .value_span
            .as_ref()
            .map(|s| s.start.offset)
            .unwrap_or(attr.key_span.end.offset);
        let handler = self.parser.parse_action(&attr.value, &self.url, offset);
        self.collect_expression_errors(&handler, attr);
        BoundEvent {
            name: name.to_string(),
            handler,
            source_span: attr.source_span.clone(),
            key_span: attr.key_span.clone(),
            handler_span: attr.value_span.clone(),
        }
    }

    fn two_way_binding(&mut self, name: &str, attr: &ml_parser::Attribute) -> (BoundAttribute, BoundEvent) {
        let input = self.bound_attribute(name, attr);
        let offset = attr
            .value_span
            .as_ref()
            .map(|s| s.start.offset)
            .unwrap_or(attr.key_span.end.offset);
        let handler = self.parser.parse_binding(&attr.value, &self.url, offset);
        let output = BoundEvent {
            name: format!("{}Change", name),
            handler,
            source_span: attr.source_span.clone(),
            key_span: attr.key_span.clone(),
            handler_span: attr.value_span.clone(),
        };
        (input, output)
    }

    fn reference(&mut self, name: &str, attr: &ml_parser::Attribute) -> Reference {
        if !attr.value.is_empty() {
            let known = self
                .options
                .predefined_directives
                .iter()
                .any(|d| d.export_as.as_deref() == Some(attr.value.as_str()));
            if !known {
                self.errors.push(ParseError::warning(
                    attr.source_span.clone(),
                    format!("There is no directive with \"exportAs\" set to \"{}\"", attr.value),
                ));
            }
        }
        Reference {
            name: name.to_string(),
            value: attr.value.clone(),
            source_span: attr.source_span.clone(),
            key_span: attr.key_span.clone(),
        }
    }

    fn parse_binding(&mut self, attr: &ml_parser::Attribute) -> AstWithSource {
        let offset = attr
            .value_span
            .as_ref()
            .map(|s| s.start.offset)
            .unwrap_or(attr.key_span.end.offset);
        let parsed = self.parser.parse_binding(&attr.value, &self.url, offset);
        self.collect_expression_errors(&parsed, attr);
        parsed
    }

    fn collect_expression_errors(&mut self, parsed: &AstWithSource, attr: &ml_parser::Attribute) {
        for error in &parsed.errors {
            self.errors.push(ParseError::new(
                attr.source_span.clone(),
                error.message.clone(),
            ));
        }
    }

    fn interpolation_in_attr(&mut self, attr: &ml_parser::Attribute) -> Option<AstWithSource> {
        let offset = attr.value_span.as_ref()?.start.offset;
        self.split_interpolation(&attr.value, offset)
    }

    fn transform_text(&mut self, text: &ml_parser::Text) -> TemplateNode {
        let offset = text.source_span.start.offset;
        match self.split_interpolation(&text.value, offset) {
            Some(value) => TemplateNode::BoundText(BoundText {
                value,
                source_span: text.source_span.clone(),
            }),
            None => TemplateNode::Text(Text {
                value: text.value.clone(),
                source_span: text.source_span.clone(),
            }),
        }
    }

    /// Split `prefix {{ exp }} suffix` into strings and parsed expressions.
    /// Returns `None` when the text holds no interpolation at all.
    fn split_interpolation(&mut self, text: &str, base_offset: usize) -> Option<AstWithSource> {
        let start_marker = &self.options.interpolation.start;
        let end_marker = &self.options.interpolation.end;
        if !text.contains(start_marker.as_str()) {
            return None;
        }

        let mut strings = Vec::new();
        let mut expressions = Vec::new();
        let mut errors = Vec::new();
        let mut rest = 0usize;
        while let Some(rel_start) = text[rest..].find(start_marker.as_str()) {
            let expr_start = rest + rel_start + start_marker.len();
            let Some(rel_end) = text[expr_start..].find(end_marker.as_str()) else {
                break;
            };
            let expr_end = expr_start + rel_end;
            strings.push(text[rest..rest + rel_start].to_string());
            let expr_text = &text[expr_start..expr_end];
            let parsed = self
                .parser
                .parse_binding(expr_text, &self.url, base_offset + expr_start);
            errors.extend(parsed.errors.clone());
            expressions.push(parsed.ast);
            rest = expr_end + end_marker.len();
        }
        if expressions.is_empty() {
            return None;
        }
        strings.push(text[rest..].to_string());

        for error in &errors {
            self.errors.push(ParseError::new(
                self.fragment_span(base_offset, base_offset + text.len()),
                error.message.clone(),
            ));
        }

        let span = ParseSpan::new(0, text.len());
        let ast = Ast::Interpolation(Interpolation {
            span,
            source_span: span.to_absolute(base_offset),
            strings,
            expressions,
        });
        Some(AstWithSource {
            ast,
            source: text.to_string(),
            location: self.url.clone(),
            absolute_offset: base_offset,
            errors,
        })
    }

    fn fragment_span(&self, start: usize, end: usize) -> ParseSourceSpan {
        ParseSourceSpan::from_offsets(&self.file, start.min(end), end.max(start))
    }
}

fn strip_enclosed<'a>(name: &'a str, prefix: &str, suffix: &str) -> Option<&'a str> {
    name.strip_prefix(prefix)?.strip_suffix(suffix)
}
