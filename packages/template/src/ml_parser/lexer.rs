//! Markup tokenizer.
//!
//! Byte-offset based cursor over the fragment text. Recoverable problems
//! (unterminated comments, missing closing quotes) produce `ParseError`s
//! and a best-effort token stream instead of aborting.

use super::tokens::{Token, TokenType};
use crate::chars;
use crate::parse_util::{ParseError, ParseSourceFile, ParseSourceSpan};
use std::sync::Arc;

#[derive(Debug)]
pub struct TokenizeResult {
    pub tokens: Vec<Token>,
    pub errors: Vec<ParseError>,
}

pub fn tokenize(source: &str, url: &str) -> TokenizeResult {
    let file = ParseSourceFile::new(source, url);
    let mut tokenizer = Tokenizer::new(file);
    tokenizer.tokenize();
    TokenizeResult {
        tokens: tokenizer.tokens,
        errors: tokenizer.errors,
    }
}

struct Tokenizer {
    file: Arc<ParseSourceFile>,
    pos: usize,
    tokens: Vec<Token>,
    errors: Vec<ParseError>,
}

impl Tokenizer {
    fn new(file: Arc<ParseSourceFile>) -> Self {
        Tokenizer {
            file,
            pos: 0,
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    fn content(&self) -> &str {
        &self.file.content
    }

    fn peek(&self) -> char {
        self.file.content[self.pos..].chars().next().unwrap_or(chars::EOF)
    }

    fn peek_at(&self, lookahead: usize) -> char {
        let mut iter = self.file.content[self.pos..].chars();
        for _ in 0..lookahead {
            if iter.next().is_none() {
                return chars::EOF;
            }
        }
        iter.next().unwrap_or(chars::EOF)
    }

    fn at_end(&self) -> bool {
        self.pos >= self.file.content.len()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.file.content[self.pos..].chars().next() {
            self.pos += ch.len_utf8();
        }
    }

    fn starts_with(&self, needle: &str) -> bool {
        self.file.content[self.pos..].starts_with(needle)
    }

    fn span(&self, start: usize, end: usize) -> ParseSourceSpan {
        ParseSourceSpan::from_offsets(&self.file, start, end)
    }

    fn emit(&mut self, token_type: TokenType, parts: Vec<String>, start: usize, end: usize) {
        let span = self.span(start, end);
        self.tokens.push(Token::new(token_type, parts, span));
    }

    fn error(&mut self, start: usize, msg: impl Into<String>) {
        let span = self.span(start, self.pos);
        self.errors.push(ParseError::new(span, msg));
    }

    fn tokenize(&mut self) {
        while !self.at_end() {
            if self.starts_with("<!--") {
                self.consume_comment();
            } else if self.starts_with("<!") {
                self.consume_doctype();
            } else if self.starts_with("</") {
                self.consume_tag_close();
            } else if self.peek() == chars::LT {
                self.consume_tag_open();
            } else {
                self.consume_text();
            }
        }
    }

    fn consume_comment(&mut self) {
        let start = self.pos;
        self.pos += 4;
        let content_start = self.pos;
        match self.content()[self.pos..].find("-->") {
            Some(rel) => {
                let content_end = self.pos + rel;
                self.pos = content_end + 3;
                let value = self.content()[content_start..content_end].to_string();
                self.emit(TokenType::Comment, vec![value], start, self.pos);
            }
            None => {
                self.pos = self.content().len();
                self.error(start, "Unterminated comment");
            }
        }
    }

    // Doctypes and processing instructions contribute nothing to the tree.
    fn consume_doctype(&mut self) {
        let start = self.pos;
        match self.content()[self.pos..].find('>') {
            Some(rel) => self.pos += rel + 1,
            None => {
                self.pos = self.content().len();
                self.error(start, "Unterminated markup declaration");
            }
        }
    }

    fn consume_tag_close(&mut self) {
        let start = self.pos;
        self.pos += 2;
        let name = self.consume_name();
        self.skip_whitespace();
        if self.peek() == chars::GT {
            self.advance();
            self.emit(TokenType::TagClose, vec![name], start, self.pos);
        } else {
            self.error(start, format!("Unterminated closing tag \"{}\"", name));
        }
    }

    fn consume_tag_open(&mut self) {
        let start = self.pos;
        self.advance(); // <
        if !is_name_start(self.peek()) {
            // A stray "<" is literal text.
            self.consume_text_from(start);
            return;
        }
        let name = self.consume_name();
        self.emit(TokenType::TagOpenStart, vec![name], start, self.pos);

        loop {
            self.skip_whitespace();
            let ch = self.peek();
            if ch == chars::EOF {
                self.error(start, "Unterminated tag");
                return;
            }
            if ch == chars::GT {
                let end_start = self.pos;
                self.advance();
                self.emit(TokenType::TagOpenEnd, Vec::new(), end_start, self.pos);
                return;
            }
            if ch == chars::SLASH && self.peek_at(1) == chars::GT {
                let end_start = self.pos;
                self.advance();
                self.advance();
                self.emit(TokenType::TagOpenEndVoid, Vec::new(), end_start, self.pos);
                return;
            }
            self.consume_attribute();
        }
    }

    fn consume_attribute(&mut self) {
        let name_start = self.pos;
        let name = self.consume_attr_name();
        if name.is_empty() {
            // Skip an unexpected character to guarantee progress.
            self.advance();
            self.error(name_start, "Unexpected character in tag");
            return;
        }
        self.emit(TokenType::AttrName, vec![name], name_start, self.pos);
        self.skip_whitespace();
        if self.peek() != chars::EQ {
            return;
        }
        self.advance(); // =
        self.skip_whitespace();
        let quote = self.peek();
        if chars::is_quote(quote) {
            self.advance();
            let value_start = self.pos;
            while !self.at_end() && self.peek() != quote {
                self.advance();
            }
            let value_end = self.pos;
            if self.at_end() {
                self.error(value_start, "Unterminated attribute value");
            } else {
                self.advance(); // closing quote
            }
            let value = self.content()[value_start..value_end].to_string();
            self.emit(TokenType::AttrValue, vec![value], value_start, value_end);
        } else {
            let value_start = self.pos;
            while !self.at_end() {
                let ch = self.peek();
                if chars::is_whitespace(ch) || ch == chars::GT || ch == chars::SLASH {
                    break;
                }
                self.advance();
            }
            let value = self.content()[value_start..self.pos].to_string();
            self.emit(TokenType::AttrValue, vec![value], value_start, self.pos);
        }
    }

    fn consume_text(&mut self) {
        let start = self.pos;
        self.advance();
        self.consume_text_from(start);
    }

    fn consume_text_from(&mut self, start: usize) {
        while !self.at_end() {
            if self.peek() == chars::LT
                && (self.starts_with("</") || self.starts_with("<!") || is_name_start(self.peek_at(1)))
            {
                break;
            }
            self.advance();
        }
        let value = self.content()[start..self.pos].to_string();
        self.emit(TokenType::Text, vec![value], start, self.pos);
    }

    fn consume_name(&mut self) -> String {
        let start = self.pos;
        while !self.at_end() && is_name_part(self.peek()) {
            self.advance();
        }
        self.content()[start..self.pos].to_string()
    }

    fn consume_attr_name(&mut self) -> String {
        let start = self.pos;
        while !self.at_end() && is_attr_name_part(self.peek()) {
            self.advance();
        }
        self.content()[start..self.pos].to_string()
    }

    fn skip_whitespace(&mut self) {
        while !self.at_end() && chars::is_whitespace(self.peek()) {
            self.advance();
        }
    }
}

fn is_name_start(ch: char) -> bool {
    ch.is_ascii_alphabetic()
}

fn is_name_part(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == chars::MINUS || ch == chars::UNDERSCORE || ch == chars::COLON
}

fn is_attr_name_part(ch: char) -> bool {
    !chars::is_whitespace(ch)
        && ch != chars::EQ
        && ch != chars::GT
        && ch != chars::SLASH
        && !chars::is_quote(ch)
        && ch != chars::EOF
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_types(source: &str) -> Vec<TokenType> {
        tokenize(source, "test.html").tokens.iter().map(|t| t.token_type).collect()
    }

    #[test]
    fn test_tokenizes_simple_element() {
        assert_eq!(
            token_types("<div>hi</div>"),
            vec![
                TokenType::TagOpenStart,
                TokenType::TagOpenEnd,
                TokenType::Text,
                TokenType::TagClose,
            ]
        );
    }

    #[test]
    fn test_tokenizes_attributes_with_binding_syntax() {
        let result = tokenize("<input [value]=\"name\" (input)=\"update($event)\" #ref>", "test.html");
        let names: Vec<&str> = result
            .tokens
            .iter()
            .filter(|t| t.token_type == TokenType::AttrName)
            .map(|t| t.part(0))
            .collect();
        assert_eq!(names, vec!["[value]", "(input)", "#ref"]);
    }

    #[test]
    fn test_attr_value_span_excludes_quotes() {
        let source = "<a href=\"x\">";
        let result = tokenize(source, "test.html");
        let value = result
            .tokens
            .iter()
            .find(|t| t.token_type == TokenType::AttrValue)
            .unwrap();
        assert_eq!(value.part(0), "x");
        assert_eq!(value.source_span.start.offset, source.find('x').unwrap());
    }

    #[test]
    fn test_stray_angle_bracket_is_text() {
        let result = tokenize("a < b", "test.html");
        assert_eq!(result.tokens.len(), 1);
        assert_eq!(result.tokens[0].part(0), "a < b");
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_unterminated_comment_reports_error() {
        let result = tokenize("<!-- oops", "test.html");
        assert_eq!(result.errors.len(), 1);
    }
}
