//! Tolerant CSS/SCSS parser.
//!
//! Reads rules, declarations and at-rules with spans; nested blocks and
//! `//` comments are tolerated so SCSS-flavored fragments parse without
//! erroring. Unparseable stretches produce a `ParseError` and are skipped.

use super::ast::*;
use crate::parse_util::{ParseError, ParseSourceFile, ParseSourceSpan};
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

/// CSS/SCSS property names, including custom properties and `$variables`.
static PROPERTY_NAME_REGEXP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(--|\$)?-?[_a-zA-Z][\w-]*$").unwrap());

#[derive(Debug)]
pub struct ParsedStylesheet {
    pub stylesheet: Stylesheet,
    pub errors: Vec<ParseError>,
}

pub fn parse_stylesheet(source: &str, url: &str) -> ParsedStylesheet {
    let file = ParseSourceFile::new(source, url);
    let mut parser = CssParser {
        file: file.clone(),
        pos: 0,
        errors: Vec::new(),
    };
    let rules = parser.parse_block_contents(true);
    let source_span = ParseSourceSpan::from_offsets(&file, 0, source.len());
    ParsedStylesheet {
        stylesheet: Stylesheet { rules, source_span },
        errors: parser.errors,
    }
}

struct CssParser {
    file: Arc<ParseSourceFile>,
    pos: usize,
    errors: Vec<ParseError>,
}

impl CssParser {
    fn content(&self) -> &str {
        &self.file.content
    }

    fn at_end(&self) -> bool {
        self.pos >= self.file.content.len()
    }

    fn peek(&self) -> char {
        self.file.content[self.pos..].chars().next().unwrap_or('\0')
    }

    fn advance(&mut self) {
        if let Some(ch) = self.file.content[self.pos..].chars().next() {
            self.pos += ch.len_utf8();
        }
    }

    fn span(&self, start: usize, end: usize) -> ParseSourceSpan {
        ParseSourceSpan::from_offsets(&self.file, start, end)
    }

    fn skip_trivia(&mut self) {
        loop {
            while !self.at_end() && self.peek().is_whitespace() {
                self.advance();
            }
            if self.content()[self.pos..].starts_with("/*") {
                match self.content()[self.pos + 2..].find("*/") {
                    Some(rel) => self.pos += 2 + rel + 2,
                    None => {
                        let start = self.pos;
                        self.pos = self.content().len();
                        let span = self.span(start, self.pos);
                        self.errors.push(ParseError::new(span, "Unterminated comment"));
                    }
                }
            } else if self.content()[self.pos..].starts_with("//") {
                match self.content()[self.pos..].find('\n') {
                    Some(rel) => self.pos += rel + 1,
                    None => self.pos = self.content().len(),
                }
            } else {
                break;
            }
        }
    }

    /// Scan forward to the next `{`, `;` or block-level `}`, skipping
    /// strings and balanced parentheses (selector pseudo-args, `url(...)`).
    fn scan_chunk(&mut self) -> (usize, usize, char) {
        self.skip_trivia();
        let start = self.pos;
        let mut paren_depth = 0usize;
        while !self.at_end() {
            let ch = self.peek();
            match ch {
                '"' | '\'' => self.skip_string(ch),
                '(' => {
                    paren_depth += 1;
                    self.advance();
                }
                ')' => {
                    paren_depth = paren_depth.saturating_sub(1);
                    self.advance();
                }
                '{' | ';' | '}' if paren_depth == 0 => {
                    return (start, self.pos, ch);
                }
                _ => self.advance(),
            }
        }
        (start, self.pos, '\0')
    }

    fn skip_string(&mut self, quote: char) {
        self.advance();
        while !self.at_end() {
            let ch = self.peek();
            if ch == '\\' {
                self.advance();
                self.advance();
            } else if ch == quote {
                self.advance();
                return;
            } else {
                self.advance();
            }
        }
    }

    fn parse_block_contents(&mut self, top_level: bool) -> Vec<CssNode> {
        let mut nodes = Vec::new();
        loop {
            self.skip_trivia();
            if self.at_end() {
                break;
            }
            if self.peek() == '}' {
                if top_level {
                    let start = self.pos;
                    self.advance();
                    let span = self.span(start, self.pos);
                    self.errors.push(ParseError::new(span, "Unmatched \"}\""));
                    continue;
                }
                break;
            }
            let (start, end, terminator) = self.scan_chunk();
            let text = self.content()[start..end].to_string();
            match terminator {
                '{' => {
                    self.advance(); // {
                    let body = self.parse_block_contents(false);
                    if self.peek() == '}' {
                        self.advance();
                    } else {
                        let span = self.span(start, self.pos);
                        self.errors.push(ParseError::new(span, "Unterminated block"));
                    }
                    nodes.push(self.make_block_node(text, start, end));
                    if let Some(node) = nodes.last_mut() {
                        attach_body(node, body, self.span(start, self.pos));
                    }
                }
                ';' | '}' | '\0' => {
                    if terminator == ';' {
                        self.advance();
                    }
                    if text.trim().is_empty() {
                        if terminator == '}' {
                            break;
                        }
                        continue;
                    }
                    match self.make_statement_node(&text, start, end) {
                        Some(node) => nodes.push(node),
                        None => {
                            let span = self.span(start, end);
                            self.errors
                                .push(ParseError::new(span, format!("Invalid declaration \"{}\"", text.trim())));
                        }
                    }
                    if terminator == '}' {
                        break;
                    }
                }
                _ => break,
            }
        }
        nodes
    }

    fn make_block_node(&mut self, prelude: String, start: usize, end: usize) -> CssNode {
        let trimmed = prelude.trim();
        if let Some(rest) = trimmed.strip_prefix('@') {
            let mut parts = rest.splitn(2, char::is_whitespace);
            let name = parts.next().unwrap_or("").to_string();
            let prelude = parts.next().unwrap_or("").trim().to_string();
            return CssNode::AtRule(CssAtRule {
                name,
                prelude,
                body: Some(Vec::new()),
                source_span: self.span(start, end),
            });
        }
        let mut selectors = Vec::new();
        let mut sel_start = start;
        for piece in prelude.split(',') {
            let text = piece.trim().to_string();
            let leading = piece.len() - piece.trim_start().len();
            let piece_start = sel_start + leading;
            if !text.is_empty() {
                selectors.push(CssSelector {
                    source_span: self.span(piece_start, piece_start + text.len()),
                    text,
                });
            }
            sel_start += piece.len() + 1;
        }
        CssNode::Rule(CssStyleRule {
            selectors,
            body: Vec::new(),
            source_span: self.span(start, end),
        })
    }

    fn make_statement_node(&mut self, text: &str, start: usize, end: usize) -> Option<CssNode> {
        let trimmed = text.trim();
        if let Some(rest) = trimmed.strip_prefix('@') {
            let mut parts = rest.splitn(2, char::is_whitespace);
            let name = parts.next().unwrap_or("").to_string();
            let prelude = parts.next().unwrap_or("").trim().to_string();
            return Some(CssNode::AtRule(CssAtRule {
                name,
                prelude,
                body: None,
                source_span: self.span(start, end),
            }));
        }
        let colon = text.find(':')?;
        let property_text = text[..colon].trim();
        if !PROPERTY_NAME_REGEXP.is_match(property_text) {
            return None;
        }
        let prop_leading = text[..colon].len() - text[..colon].trim_start().len();
        let property_start = start + prop_leading;
        let value_text = text[colon + 1..].trim();
        let value_leading = text[colon + 1..].len() - text[colon + 1..].trim_start().len();
        let value_start = start + colon + 1 + value_leading;
        Some(CssNode::Declaration(CssDeclaration {
            property: property_text.to_string(),
            value: value_text.to_string(),
            source_span: self.span(start, end),
            property_span: self.span(property_start, property_start + property_text.len()),
            value_span: self.span(value_start, value_start + value_text.len()),
        }))
    }
}

fn attach_body(node: &mut CssNode, body: Vec<CssNode>, full_span: ParseSourceSpan) {
    match node {
        CssNode::Rule(rule) => {
            rule.body = body;
            rule.source_span = full_span;
        }
        CssNode::AtRule(at_rule) => {
            at_rule.body = Some(body);
            at_rule.source_span = full_span;
        }
        CssNode::Declaration(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_rule_with_declarations() {
        let result = parse_stylesheet(".btn, .link { color: red; margin: 0 }", "styles.css");
        assert!(result.errors.is_empty());
        let CssNode::Rule(rule) = &result.stylesheet.rules[0] else { panic!() };
        assert_eq!(rule.selectors.len(), 2);
        assert_eq!(rule.selectors[0].text, ".btn");
        assert_eq!(rule.body.len(), 2);
    }

    #[test]
    fn test_declaration_spans_point_at_property() {
        let source = ".a { color: red; }";
        let result = parse_stylesheet(source, "styles.css");
        let CssNode::Rule(rule) = &result.stylesheet.rules[0] else { panic!() };
        let CssNode::Declaration(decl) = &rule.body[0] else { panic!() };
        assert_eq!(decl.property, "color");
        assert_eq!(decl.property_span.start.offset, source.find("color").unwrap());
        assert_eq!(decl.value_span.text(), "red");
    }

    #[test]
    fn test_parses_at_rules() {
        let result = parse_stylesheet("@import 'theme';\n@media (min-width: 600px) { .a { top: 0; } }", "styles.css");
        assert!(result.errors.is_empty());
        let CssNode::AtRule(import) = &result.stylesheet.rules[0] else { panic!() };
        assert_eq!(import.name, "import");
        assert!(import.body.is_none());
        let CssNode::AtRule(media) = &result.stylesheet.rules[1] else { panic!() };
        assert_eq!(media.name, "media");
        assert_eq!(media.body.as_ref().unwrap().len(), 1);
    }

    #[test]
    fn test_tolerates_scss_nesting_and_line_comments() {
        let source = "// banner\n.card {\n  .title { font-weight: bold; }\n  color: blue;\n}";
        let result = parse_stylesheet(source, "styles.scss");
        assert!(result.errors.is_empty());
        let CssNode::Rule(card) = &result.stylesheet.rules[0] else { panic!() };
        assert_eq!(card.body.len(), 2);
        assert!(matches!(card.body[0], CssNode::Rule(_)));
    }

    #[test]
    fn test_invalid_declaration_is_recoverable() {
        let result = parse_stylesheet(".a { oops; color: red; }", "styles.css");
        assert_eq!(result.errors.len(), 1);
        let CssNode::Rule(rule) = &result.stylesheet.rules[0] else { panic!() };
        assert_eq!(rule.body.len(), 1);
    }
}
