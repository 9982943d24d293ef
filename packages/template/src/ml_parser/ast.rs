//! Markup AST node definitions.

use crate::parse_util::ParseSourceSpan;

#[derive(Debug, Clone)]
pub enum Node {
    Element(Element),
    Text(Text),
    Comment(Comment),
}

impl Node {
    pub fn source_span(&self) -> &ParseSourceSpan {
        match self {
            Node::Element(e) => &e.source_span,
            Node::Text(t) => &t.source_span,
            Node::Comment(c) => &c.source_span,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Element {
    pub name: String,
    pub attrs: Vec<Attribute>,
    pub children: Vec<Node>,
    pub is_self_closing: bool,
    pub is_void: bool,
    pub source_span: ParseSourceSpan,
    pub start_source_span: ParseSourceSpan,
    pub end_source_span: Option<ParseSourceSpan>,
}

#[derive(Debug, Clone)]
pub struct Attribute {
    pub name: String,
    pub value: String,
    pub source_span: ParseSourceSpan,
    pub key_span: ParseSourceSpan,
    pub value_span: Option<ParseSourceSpan>,
}

#[derive(Debug, Clone)]
pub struct Text {
    pub value: String,
    pub source_span: ParseSourceSpan,
}

#[derive(Debug, Clone)]
pub struct Comment {
    pub value: String,
    pub source_span: ParseSourceSpan,
}

/// Visitor over the markup tree. Defaults recurse into children.
pub trait Visitor {
    fn visit_element(&mut self, element: &Element) {
        visit_all(self, &element.children);
    }
    fn visit_text(&mut self, _text: &Text) {}
    fn visit_comment(&mut self, _comment: &Comment) {}
}

pub fn visit_all<V: Visitor + ?Sized>(visitor: &mut V, nodes: &[Node]) {
    for node in nodes {
        match node {
            Node::Element(e) => visitor.visit_element(e),
            Node::Text(t) => visitor.visit_text(t),
            Node::Comment(c) => visitor.visit_comment(c),
        }
    }
}
