//! Tokenizer for template expressions.

use crate::chars;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenType {
    Character,
    Identifier,
    Keyword,
    String,
    Operator,
    Number,
    Error,
}

pub const KEYWORDS: &[&str] = &["this", "true", "false", "null", "undefined", "let", "as"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub index: usize,
    pub end: usize,
    pub token_type: TokenType,
    pub num_value: f64,
    pub str_value: String,
}

impl Token {
    pub fn new(index: usize, end: usize, token_type: TokenType, num_value: f64, str_value: String) -> Self {
        Token { index, end, token_type, num_value, str_value }
    }

    pub fn character(index: usize, end: usize, code: char) -> Self {
        Token::new(index, end, TokenType::Character, 0.0, code.to_string())
    }

    pub fn identifier(index: usize, end: usize, text: String) -> Self {
        Token::new(index, end, TokenType::Identifier, 0.0, text)
    }

    pub fn keyword(index: usize, end: usize, text: String) -> Self {
        Token::new(index, end, TokenType::Keyword, 0.0, text)
    }

    pub fn operator(index: usize, end: usize, text: &str) -> Self {
        Token::new(index, end, TokenType::Operator, 0.0, text.to_string())
    }

    pub fn string(index: usize, end: usize, text: String) -> Self {
        Token::new(index, end, TokenType::String, 0.0, text)
    }

    pub fn number(index: usize, end: usize, value: f64) -> Self {
        Token::new(index, end, TokenType::Number, value, String::new())
    }

    pub fn error(index: usize, end: usize, message: String) -> Self {
        Token::new(index, end, TokenType::Error, 0.0, message)
    }

    pub fn is_character(&self, code: char) -> bool {
        self.token_type == TokenType::Character && self.str_value.chars().next() == Some(code)
    }

    pub fn is_identifier(&self) -> bool {
        self.token_type == TokenType::Identifier
    }

    pub fn is_number(&self) -> bool {
        self.token_type == TokenType::Number
    }

    pub fn is_string(&self) -> bool {
        self.token_type == TokenType::String
    }

    pub fn is_operator(&self, operator: &str) -> bool {
        self.token_type == TokenType::Operator && self.str_value == operator
    }

    pub fn is_any_operator(&self) -> bool {
        self.token_type == TokenType::Operator
    }

    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.token_type == TokenType::Keyword && self.str_value == keyword
    }

    pub fn is_error(&self) -> bool {
        self.token_type == TokenType::Error
    }
}

pub struct Lexer<'s> {
    input: &'s str,
    chars: Vec<char>,
    index: usize,
}

impl<'s> Lexer<'s> {
    pub fn new(input: &'s str) -> Self {
        Lexer {
            input,
            chars: input.chars().collect(),
            index: 0,
        }
    }

    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        while let Some(token) = self.scan_token() {
            let is_error = token.is_error();
            tokens.push(token);
            if is_error {
                break;
            }
        }
        tokens
    }

    fn peek(&self, offset: usize) -> char {
        *self.chars.get(self.index + offset).unwrap_or(&chars::EOF)
    }

    fn scan_token(&mut self) -> Option<Token> {
        while self.index < self.chars.len() && chars::is_whitespace(self.chars[self.index]) {
            self.index += 1;
        }
        if self.index >= self.chars.len() {
            return None;
        }

        let start = self.index;
        let ch = self.chars[start];

        if chars::is_identifier_start(ch) {
            return Some(self.scan_identifier(start));
        }
        if chars::is_digit(ch) {
            return Some(self.scan_number(start));
        }
        if ch == chars::PERIOD && chars::is_digit(self.peek(1)) {
            return Some(self.scan_number(start));
        }
        if ch == chars::SQ || ch == chars::DQ {
            return Some(self.scan_string(start, ch));
        }

        match ch {
            '(' | ')' | '[' | ']' | '{' | '}' | ',' | ':' | ';' | '.' => {
                self.index += 1;
                Some(Token::character(start, self.index, ch))
            }
            '?' => {
                // "?." and "??" are operators, a lone "?" is the conditional.
                if self.peek(1) == chars::PERIOD {
                    self.index += 2;
                    Some(Token::operator(start, self.index, "?."))
                } else if self.peek(1) == chars::QUESTION {
                    self.index += 2;
                    Some(Token::operator(start, self.index, "??"))
                } else {
                    self.index += 1;
                    Some(Token::character(start, self.index, ch))
                }
            }
            '+' | '-' | '*' | '/' | '%' | '^' => {
                self.index += 1;
                Some(Token::operator(start, self.index, &ch.to_string()))
            }
            '=' | '!' => self.scan_complex_operator(start, ch),
            '<' | '>' => {
                self.index += 1;
                if self.peek(0) == chars::EQ {
                    self.index += 1;
                    Some(Token::operator(start, self.index, &format!("{}=", ch)))
                } else {
                    Some(Token::operator(start, self.index, &ch.to_string()))
                }
            }
            '&' => {
                if self.peek(1) == chars::AMPERSAND {
                    self.index += 2;
                    Some(Token::operator(start, self.index, "&&"))
                } else {
                    self.index += 1;
                    Some(Token::error(start, self.index, "Unexpected character [&]".to_string()))
                }
            }
            '|' => {
                if self.peek(1) == chars::BAR {
                    self.index += 2;
                    Some(Token::operator(start, self.index, "||"))
                } else {
                    self.index += 1;
                    Some(Token::operator(start, self.index, "|"))
                }
            }
            '#' => {
                self.index += 1;
                Some(Token::operator(start, self.index, "#"))
            }
            _ => {
                self.index += 1;
                Some(Token::error(
                    start,
                    self.index,
                    format!("Unexpected character [{}]", ch),
                ))
            }
        }
    }

    /// `=`, `==`, `===`, `!`, `!=`, `!==`
    fn scan_complex_operator(&mut self, start: usize, first: char) -> Option<Token> {
        self.index += 1;
        let mut op = first.to_string();
        if self.peek(0) == chars::EQ {
            self.index += 1;
            op.push('=');
            if self.peek(0) == chars::EQ {
                self.index += 1;
                op.push('=');
            }
        }
        Some(Token::operator(start, self.index, &op))
    }

    fn scan_identifier(&mut self, start: usize) -> Token {
        self.index += 1;
        while self.index < self.chars.len() && chars::is_identifier_part(self.chars[self.index]) {
            self.index += 1;
        }
        let text: String = self.chars[start..self.index].iter().collect();
        if KEYWORDS.contains(&text.as_str()) {
            Token::keyword(start, self.index, text)
        } else {
            Token::identifier(start, self.index, text)
        }
    }

    fn scan_number(&mut self, start: usize) -> Token {
        let mut seen_dot = false;
        while self.index < self.chars.len() {
            let ch = self.chars[self.index];
            if chars::is_digit(ch) {
                self.index += 1;
            } else if ch == chars::PERIOD && !seen_dot && chars::is_digit(self.peek(1)) {
                seen_dot = true;
                self.index += 1;
            } else if (ch == 'e' || ch == 'E')
                && (chars::is_digit(self.peek(1))
                    || ((self.peek(1) == chars::PLUS || self.peek(1) == chars::MINUS)
                        && chars::is_digit(self.peek(2))))
            {
                self.index += 2;
            } else {
                break;
            }
        }
        let text: String = self.chars[start..self.index].iter().collect();
        match text.parse::<f64>() {
            Ok(value) => Token::number(start, self.index, value),
            Err(_) => Token::error(start, self.index, format!("Invalid number [{}]", text)),
        }
    }

    fn scan_string(&mut self, start: usize, quote: char) -> Token {
        self.index += 1;
        let mut buffer = String::new();
        while self.index < self.chars.len() {
            let ch = self.chars[self.index];
            if ch == quote {
                self.index += 1;
                return Token::string(start, self.index, buffer);
            }
            if ch == chars::BACKSLASH {
                self.index += 1;
                let escaped = self.peek(0);
                if escaped == chars::EOF {
                    break;
                }
                buffer.push(match escaped {
                    'n' => '\n',
                    't' => '\t',
                    'r' => '\r',
                    other => other,
                });
                self.index += 1;
            } else {
                buffer.push(ch);
                self.index += 1;
            }
        }
        Token::error(
            start,
            self.index,
            format!("Unterminated string in [{}]", self.input),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(input: &str) -> Vec<Token> {
        Lexer::new(input).tokenize()
    }

    #[test]
    fn test_scans_identifiers_and_keywords() {
        let tokens = lex("foo this");
        assert_eq!(tokens.len(), 2);
        assert!(tokens[0].is_identifier());
        assert_eq!(tokens[0].str_value, "foo");
        assert!(tokens[1].is_keyword("this"));
    }

    #[test]
    fn test_scans_member_access() {
        let tokens = lex("a.b?.c");
        assert!(tokens[1].is_character('.'));
        assert!(tokens[3].is_operator("?."));
    }

    #[test]
    fn test_scans_numbers() {
        let tokens = lex("12.5 1e3");
        assert_eq!(tokens[0].num_value, 12.5);
        assert_eq!(tokens[1].num_value, 1000.0);
    }

    #[test]
    fn test_scans_strings_with_escapes() {
        let tokens = lex(r#"'it\'s'"#);
        assert!(tokens[0].is_string());
        assert_eq!(tokens[0].str_value, "it's");
    }

    #[test]
    fn test_scans_operators() {
        let tokens = lex("a === b && c ?? d | pipe");
        assert!(tokens[1].is_operator("==="));
        assert!(tokens[3].is_operator("&&"));
        assert!(tokens[5].is_operator("??"));
        assert!(tokens[7].is_operator("|"));
    }

    #[test]
    fn test_reports_unexpected_characters() {
        let tokens = lex("a ~ b");
        assert!(tokens[1].is_error());
    }

    #[test]
    fn test_token_indices_cover_input() {
        let tokens = lex("foo.bar");
        assert_eq!(tokens[0].index, 0);
        assert_eq!(tokens[0].end, 3);
        assert_eq!(tokens[2].index, 4);
        assert_eq!(tokens[2].end, 7);
    }
}
