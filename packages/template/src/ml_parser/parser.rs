//! Markup tree builder.

use super::ast::{Attribute, Comment, Element, Node, Text};
use super::lexer::{tokenize, TokenizeResult};
use super::tokens::{Token, TokenType};
use crate::parse_util::{ParseError, ParseSourceSpan};
use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Elements that never have children and need no closing tag.
static VOID_ELEMENTS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
        "source", "track", "wbr",
    ]
    .into_iter()
    .collect()
});

#[derive(Debug)]
pub struct ParseTreeResult {
    pub root_nodes: Vec<Node>,
    pub errors: Vec<ParseError>,
}

pub fn parse_markup(source: &str, url: &str) -> ParseTreeResult {
    let TokenizeResult { tokens, errors } = tokenize(source, url);
    let mut builder = TreeBuilder::new(tokens, errors);
    builder.build();
    ParseTreeResult {
        root_nodes: builder.root_nodes,
        errors: builder.errors,
    }
}

struct TreeBuilder {
    tokens: Vec<Token>,
    index: usize,
    errors: Vec<ParseError>,
    root_nodes: Vec<Node>,
    /// Open elements waiting for their closing tag.
    stack: Vec<Element>,
}

impl TreeBuilder {
    fn new(tokens: Vec<Token>, errors: Vec<ParseError>) -> Self {
        TreeBuilder {
            tokens,
            index: 0,
            errors,
            root_nodes: Vec::new(),
            stack: Vec::new(),
        }
    }

    fn build(&mut self) {
        while self.index < self.tokens.len() {
            let token = self.tokens[self.index].clone();
            match token.token_type {
                TokenType::TagOpenStart => self.consume_element(&token),
                TokenType::TagClose => {
                    self.index += 1;
                    self.consume_tag_close(&token);
                }
                TokenType::Text => {
                    self.index += 1;
                    self.add_node(Node::Text(Text {
                        value: token.part(0).to_string(),
                        source_span: token.source_span.clone(),
                    }));
                }
                TokenType::Comment => {
                    self.index += 1;
                    self.add_node(Node::Comment(Comment {
                        value: token.part(0).to_string(),
                        source_span: token.source_span.clone(),
                    }));
                }
                _ => {
                    // Attribute or tag-end tokens outside an open tag are
                    // lexer artifacts of malformed input.
                    self.index += 1;
                }
            }
        }
        while let Some(mut element) = self.stack.pop() {
            self.errors.push(ParseError::new(
                element.start_source_span.clone(),
                format!("Unclosed tag \"{}\"", element.name),
            ));
            element.source_span = element.start_source_span.clone();
            self.add_node(Node::Element(element));
        }
    }

    fn consume_element(&mut self, open: &Token) {
        self.index += 1;
        let name = open.part(0).to_string();
        let mut attrs = Vec::new();
        let mut self_closing = false;
        let mut start_span = open.source_span.clone();

        while self.index < self.tokens.len() {
            let token = self.tokens[self.index].clone();
            match token.token_type {
                TokenType::AttrName => {
                    self.index += 1;
                    attrs.push(self.consume_attribute(token));
                }
                TokenType::TagOpenEnd | TokenType::TagOpenEndVoid => {
                    self.index += 1;
                    self_closing = token.token_type == TokenType::TagOpenEndVoid;
                    start_span = ParseSourceSpan::new(
                        open.source_span.start.clone(),
                        token.source_span.end.clone(),
                    );
                    break;
                }
                _ => break,
            }
        }

        let is_void = VOID_ELEMENTS.contains(name.to_ascii_lowercase().as_str());
        let element = Element {
            name,
            attrs,
            children: Vec::new(),
            is_self_closing: self_closing,
            is_void,
            source_span: start_span.clone(),
            start_source_span: start_span,
            end_source_span: None,
        };

        if self_closing || is_void {
            self.add_node(Node::Element(element));
        } else {
            self.stack.push(element);
        }
    }

    fn consume_attribute(&mut self, name_token: Token) -> Attribute {
        let name = name_token.part(0).to_string();
        let key_span = name_token.source_span.clone();
        let mut value = String::new();
        let mut value_span = None;
        let mut source_span = key_span.clone();

        if self.index < self.tokens.len()
            && self.tokens[self.index].token_type == TokenType::AttrValue
        {
            let value_token = self.tokens[self.index].clone();
            self.index += 1;
            value = value_token.part(0).to_string();
            source_span = ParseSourceSpan::new(
                key_span.start.clone(),
                value_token.source_span.end.clone(),
            );
            value_span = Some(value_token.source_span);
        }

        Attribute {
            name,
            value,
            source_span,
            key_span,
            value_span,
        }
    }

    fn consume_tag_close(&mut self, token: &Token) {
        let name = token.part(0);
        let matches_open = self.stack.iter().rposition(|el| el.name == name);
        match matches_open {
            Some(position) => {
                // Implicitly close anything the author left open in between.
                while self.stack.len() > position + 1 {
                    let mut unclosed = self.stack.pop().unwrap();
                    self.errors.push(ParseError::new(
                        unclosed.start_source_span.clone(),
                        format!("Unclosed tag \"{}\"", unclosed.name),
                    ));
                    unclosed.source_span = unclosed.start_source_span.clone();
                    self.add_node(Node::Element(unclosed));
                }
                let mut element = self.stack.pop().unwrap();
                element.end_source_span = Some(token.source_span.clone());
                element.source_span = ParseSourceSpan::new(
                    element.start_source_span.start.clone(),
                    token.source_span.end.clone(),
                );
                self.add_node(Node::Element(element));
            }
            None => {
                self.errors.push(ParseError::new(
                    token.source_span.clone(),
                    format!("Unexpected closing tag \"{}\"", name),
                ));
            }
        }
    }

    fn add_node(&mut self, node: Node) {
        match self.stack.last_mut() {
            Some(parent) => parent.children.push(node),
            None => self.root_nodes.push(node),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builds_nested_tree() {
        let result = parse_markup("<div><span>a</span>b</div>", "test.html");
        assert!(result.errors.is_empty());
        assert_eq!(result.root_nodes.len(), 1);
        let Node::Element(div) = &result.root_nodes[0] else { panic!() };
        assert_eq!(div.name, "div");
        assert_eq!(div.children.len(), 2);
    }

    #[test]
    fn test_void_elements_need_no_close() {
        let result = parse_markup("<div><br><input></div>", "test.html");
        assert!(result.errors.is_empty());
        let Node::Element(div) = &result.root_nodes[0] else { panic!() };
        assert_eq!(div.children.len(), 2);
    }

    #[test]
    fn test_unexpected_close_is_recoverable() {
        let result = parse_markup("<div></p></div>", "test.html");
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.root_nodes.len(), 1);
    }

    #[test]
    fn test_element_spans_cover_tags() {
        let source = "<div>x</div>";
        let result = parse_markup(source, "test.html");
        let Node::Element(div) = &result.root_nodes[0] else { panic!() };
        assert_eq!(div.source_span.start.offset, 0);
        assert_eq!(div.source_span.end.offset, source.len());
        assert_eq!(div.start_source_span.text(), "<div>");
    }
}
