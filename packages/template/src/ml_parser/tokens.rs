//! Markup tokens.

use crate::parse_util::ParseSourceSpan;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    /// `<name`, parts: [name]
    TagOpenStart,
    /// attribute name, parts: [name]
    AttrName,
    /// attribute value text with quotes excluded, parts: [value]
    AttrValue,
    /// `>`
    TagOpenEnd,
    /// `/>`
    TagOpenEndVoid,
    /// `</name>`, parts: [name]
    TagClose,
    /// raw text, parts: [text]
    Text,
    /// `<!-- ... -->`, parts: [content]
    Comment,
}

#[derive(Debug, Clone)]
pub struct Token {
    pub token_type: TokenType,
    pub parts: Vec<String>,
    pub source_span: ParseSourceSpan,
}

impl Token {
    pub fn new(token_type: TokenType, parts: Vec<String>, source_span: ParseSourceSpan) -> Self {
        Token { token_type, parts, source_span }
    }

    pub fn part(&self, index: usize) -> &str {
        self.parts.get(index).map(String::as_str).unwrap_or("")
    }
}
