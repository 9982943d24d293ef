//! Stylesheet AST.

use crate::parse_util::ParseSourceSpan;

#[derive(Debug, Clone)]
pub struct Stylesheet {
    pub rules: Vec<CssNode>,
    pub source_span: ParseSourceSpan,
}

#[derive(Debug, Clone)]
pub enum CssNode {
    Rule(CssStyleRule),
    AtRule(CssAtRule),
    Declaration(CssDeclaration),
}

#[derive(Debug, Clone)]
pub struct CssStyleRule {
    pub selectors: Vec<CssSelector>,
    /// Declarations and (for SCSS-flavored input) nested rules.
    pub body: Vec<CssNode>,
    pub source_span: ParseSourceSpan,
}

#[derive(Debug, Clone)]
pub struct CssSelector {
    pub text: String,
    pub source_span: ParseSourceSpan,
}

#[derive(Debug, Clone)]
pub struct CssAtRule {
    pub name: String,
    pub prelude: String,
    pub body: Option<Vec<CssNode>>,
    pub source_span: ParseSourceSpan,
}

#[derive(Debug, Clone)]
pub struct CssDeclaration {
    pub property: String,
    pub value: String,
    pub source_span: ParseSourceSpan,
    pub property_span: ParseSourceSpan,
    pub value_span: ParseSourceSpan,
}

/// Visitor over stylesheet ASTs; defaults recurse.
pub trait CssVisitor {
    fn visit_stylesheet(&mut self, stylesheet: &Stylesheet) {
        visit_all(self, &stylesheet.rules);
    }

    fn visit_rule(&mut self, rule: &CssStyleRule) {
        for selector in &rule.selectors {
            self.visit_selector(selector);
        }
        visit_all(self, &rule.body);
    }

    fn visit_selector(&mut self, _selector: &CssSelector) {}

    fn visit_at_rule(&mut self, at_rule: &CssAtRule) {
        if let Some(body) = &at_rule.body {
            visit_all(self, body);
        }
    }

    fn visit_declaration(&mut self, _declaration: &CssDeclaration) {}
}

pub fn visit_all<V: CssVisitor + ?Sized>(visitor: &mut V, nodes: &[CssNode]) {
    for node in nodes {
        match node {
            CssNode::Rule(rule) => visitor.visit_rule(rule),
            CssNode::AtRule(at_rule) => visitor.visit_at_rule(at_rule),
            CssNode::Declaration(declaration) => visitor.visit_declaration(declaration),
        }
    }
}
