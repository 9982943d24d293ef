//! Bound template AST.
//!
//! This is the shape the framework's own template compiler works with:
//! elements with classified attributes (text attributes, property bindings,
//! event bindings), embedded templates produced by structural-directive
//! microsyntax, template-local variables and references, and text with
//! parsed interpolations.

use crate::expression_parser::ast::AstWithSource;
use crate::parse_util::ParseSourceSpan;

#[derive(Debug, Clone)]
pub enum TemplateNode {
    Element(Element),
    Template(Template),
    Text(Text),
    BoundText(BoundText),
}

impl TemplateNode {
    pub fn source_span(&self) -> &ParseSourceSpan {
        match self {
            TemplateNode::Element(e) => &e.source_span,
            TemplateNode::Template(t) => &t.source_span,
            TemplateNode::Text(t) => &t.source_span,
            TemplateNode::BoundText(t) => &t.source_span,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<TextAttribute>,
    pub inputs: Vec<BoundAttribute>,
    pub outputs: Vec<BoundEvent>,
    pub references: Vec<Reference>,
    pub children: Vec<TemplateNode>,
    pub source_span: ParseSourceSpan,
    pub start_source_span: ParseSourceSpan,
    pub end_source_span: Option<ParseSourceSpan>,
}

/// An embedded view: either a `<ng-template>` element or the expansion of
/// a structural (`*`) directive, in which case `tag_name` holds the host
/// element's name and the single child is that element.
#[derive(Debug, Clone)]
pub struct Template {
    pub tag_name: Option<String>,
    pub attributes: Vec<TextAttribute>,
    pub inputs: Vec<BoundAttribute>,
    pub variables: Vec<Variable>,
    pub references: Vec<Reference>,
    pub children: Vec<TemplateNode>,
    pub source_span: ParseSourceSpan,
}

#[derive(Debug, Clone)]
pub struct TextAttribute {
    pub name: String,
    pub value: String,
    pub source_span: ParseSourceSpan,
    pub key_span: ParseSourceSpan,
    pub value_span: Option<ParseSourceSpan>,
}

/// `[prop]="expr"` or `bind-prop="expr"`; two-way bindings desugar into a
/// bound attribute plus a bound event.
#[derive(Debug, Clone)]
pub struct BoundAttribute {
    pub name: String,
    pub value: AstWithSource,
    pub source_span: ParseSourceSpan,
    pub key_span: ParseSourceSpan,
    pub value_span: Option<ParseSourceSpan>,
}

/// `(event)="handler"` or `on-event="handler"`.
#[derive(Debug, Clone)]
pub struct BoundEvent {
    pub name: String,
    pub handler: AstWithSource,
    pub source_span: ParseSourceSpan,
    pub key_span: ParseSourceSpan,
    pub handler_span: Option<ParseSourceSpan>,
}

/// `#name` or `ref-name`, optionally bound to a directive's `exportAs`.
#[derive(Debug, Clone)]
pub struct Reference {
    pub name: String,
    pub value: String,
    pub source_span: ParseSourceSpan,
    pub key_span: ParseSourceSpan,
}

/// A template-local variable (`let-name` or microsyntax `let`).
#[derive(Debug, Clone)]
pub struct Variable {
    pub name: String,
    pub value: String,
    pub source_span: ParseSourceSpan,
    pub key_span: ParseSourceSpan,
}

#[derive(Debug, Clone)]
pub struct Text {
    pub value: String,
    pub source_span: ParseSourceSpan,
}

/// Text containing interpolations; `value.ast` is an `Interpolation`.
#[derive(Debug, Clone)]
pub struct BoundText {
    pub value: AstWithSource,
    pub source_span: ParseSourceSpan,
}

/// Visitor over the bound template AST. Default bodies recurse into
/// children, variables and references, so implementations override only
/// what they need and may call `visit_all` to continue descending.
pub trait TemplateVisitor {
    fn visit_element(&mut self, element: &Element) {
        for reference in &element.references {
            self.visit_reference(reference);
        }
        visit_all(self, &element.children);
    }

    fn visit_template(&mut self, template: &Template) {
        for variable in &template.variables {
            self.visit_variable(variable);
        }
        for reference in &template.references {
            self.visit_reference(reference);
        }
        visit_all(self, &template.children);
    }

    fn visit_text(&mut self, _text: &Text) {}
    fn visit_bound_text(&mut self, _text: &BoundText) {}
    fn visit_variable(&mut self, _variable: &Variable) {}
    fn visit_reference(&mut self, _reference: &Reference) {}
}

pub fn visit_all<V: TemplateVisitor + ?Sized>(visitor: &mut V, nodes: &[TemplateNode]) {
    for node in nodes {
        match node {
            TemplateNode::Element(e) => visitor.visit_element(e),
            TemplateNode::Template(t) => visitor.visit_template(t),
            TemplateNode::Text(t) => visitor.visit_text(t),
            TemplateNode::BoundText(t) => visitor.visit_bound_text(t),
        }
    }
}
