//! Recursive-descent parser for template expressions.
//!
//! Malformed input never panics: errors are recorded on the returned
//! `AstWithSource` and the parse yields a best-effort AST (an `EmptyExpr`
//! at worst), matching the tolerant behavior the walker relies on.

use super::ast::*;
use super::lexer::{Lexer, Token};

/// One binding parsed out of a structural (`*`) microsyntax attribute.
#[derive(Debug, Clone)]
pub enum TemplateBinding {
    /// `let item`, `let i = index`, or `expr as name`.
    Variable(VariableBinding),
    /// `ngForOf: items` style directive input.
    Expression(ExpressionBinding),
}

#[derive(Debug, Clone)]
pub struct VariableBinding {
    pub key: String,
    pub value: Option<String>,
    pub key_span: AbsoluteSourceSpan,
}

#[derive(Debug, Clone)]
pub struct ExpressionBinding {
    pub key: String,
    pub expression: Option<AstWithSource>,
    pub key_span: AbsoluteSourceSpan,
}

#[derive(Debug, Default)]
pub struct Parser;

impl Parser {
    pub fn new() -> Self {
        Parser
    }

    /// Parse a data-binding expression: pipes allowed, chains and
    /// assignments are errors.
    pub fn parse_binding(&self, input: &str, location: &str, absolute_offset: usize) -> AstWithSource {
        self.parse(input, location, absolute_offset, false)
    }

    /// Parse an event-handler expression: chains and assignments allowed,
    /// pipes are errors.
    pub fn parse_action(&self, input: &str, location: &str, absolute_offset: usize) -> AstWithSource {
        self.parse(input, location, absolute_offset, true)
    }

    fn parse(&self, input: &str, location: &str, absolute_offset: usize, is_action: bool) -> AstWithSource {
        let tokens = Lexer::new(input).tokenize();
        let mut ctx = ParseAst::new(input, location, tokens, absolute_offset, is_action);
        let ast = ctx.parse_chain();
        AstWithSource {
            ast,
            source: input.to_string(),
            location: location.to_string(),
            absolute_offset,
            errors: ctx.errors,
        }
    }

    /// Parse the microsyntax of a structural directive attribute, e.g.
    /// `let item of items; trackBy: trackFn` on `*ngFor`. Keys after the
    /// first are prefixed with the directive name (`of` -> `ngForOf`).
    pub fn parse_template_bindings(
        &self,
        directive_name: &str,
        input: &str,
        location: &str,
        absolute_offset: usize,
    ) -> (Vec<TemplateBinding>, Vec<ParserError>) {
        let tokens = Lexer::new(input).tokenize();
        let mut ctx = ParseAst::new(input, location, tokens, absolute_offset, false);
        let bindings = ctx.parse_template_bindings(directive_name);
        (bindings, ctx.errors)
    }
}

struct ParseAst<'s> {
    input: &'s str,
    location: String,
    tokens: Vec<Token>,
    absolute_offset: usize,
    index: usize,
    is_action: bool,
    errors: Vec<ParserError>,
}

impl<'s> ParseAst<'s> {
    fn new(input: &'s str, location: &str, tokens: Vec<Token>, absolute_offset: usize, is_action: bool) -> Self {
        ParseAst {
            input,
            location: location.to_string(),
            tokens,
            absolute_offset,
            index: 0,
            is_action,
            errors: Vec::new(),
        }
    }

    fn peek(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.index + offset)
    }

    fn next_is_character(&self, code: char) -> bool {
        self.peek(0).is_some_and(|t| t.is_character(code))
    }

    fn next_is_operator(&self, op: &str) -> bool {
        self.peek(0).is_some_and(|t| t.is_operator(op))
    }

    fn next_is_keyword(&self, keyword: &str) -> bool {
        self.peek(0).is_some_and(|t| t.is_keyword(keyword))
    }

    fn advance(&mut self) {
        self.index += 1;
    }

    fn current_start(&self) -> usize {
        self.peek(0).map_or_else(|| self.input.len(), |t| t.index)
    }

    fn last_end(&self) -> usize {
        if self.index == 0 {
            0
        } else {
            self.tokens[self.index - 1].end
        }
    }

    fn span_from(&self, start: usize) -> ParseSpan {
        ParseSpan::new(start, self.last_end().max(start))
    }

    fn abs(&self, span: ParseSpan) -> AbsoluteSourceSpan {
        span.to_absolute(self.absolute_offset)
    }

    fn error(&mut self, message: impl Into<String>) {
        self.errors.push(ParserError::new(message, self.input, self.location.clone()));
        // Skip the rest of the input rather than looping on the bad token.
        self.index = self.tokens.len();
    }

    fn consume_optional_character(&mut self, code: char) -> bool {
        if self.next_is_character(code) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect_character(&mut self, code: char) {
        if !self.consume_optional_character(code) {
            self.error(format!("Missing expected {}", code));
        }
    }

    fn consume_optional_operator(&mut self, op: &str) -> bool {
        if self.next_is_operator(op) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect_identifier_or_keyword(&mut self) -> Option<(String, AbsoluteSourceSpan)> {
        match self.peek(0) {
            Some(token) if token.is_identifier() || token.token_type == super::lexer::TokenType::Keyword => {
                let name = token.str_value.clone();
                let span = AbsoluteSourceSpan::new(
                    self.absolute_offset + token.index,
                    self.absolute_offset + token.end,
                );
                self.advance();
                Some((name, span))
            }
            _ => {
                self.error("Expected identifier or keyword");
                None
            }
        }
    }

    fn empty_expr(&self, start: usize) -> Ast {
        let span = ParseSpan::new(start, start);
        Ast::EmptyExpr(EmptyExpr {
            span,
            source_span: self.abs(span),
        })
    }

    fn parse_chain(&mut self) -> Ast {
        let start = self.current_start();
        let mut expressions = Vec::new();
        while self.index < self.tokens.len() {
            expressions.push(self.parse_pipe());
            if self.next_is_character(';') {
                if !self.is_action {
                    self.error("Binding expression cannot contain chained expression");
                    break;
                }
                while self.consume_optional_character(';') {}
            } else if self.index < self.tokens.len() && self.errors.is_empty() {
                let unexpected = self.peek(0).map(|t| t.str_value.clone()).unwrap_or_default();
                self.error(format!("Unexpected token '{}'", unexpected));
            }
        }
        match expressions.len() {
            0 => self.empty_expr(start),
            1 => expressions.into_iter().next().unwrap(),
            _ => {
                let span = self.span_from(start);
                Ast::Chain(Chain {
                    span,
                    source_span: self.abs(span),
                    expressions,
                })
            }
        }
    }

    fn parse_pipe(&mut self) -> Ast {
        let start = self.current_start();
        let mut result = self.parse_expression();
        while self.consume_optional_operator("|") {
            if self.is_action {
                self.error("Cannot have a pipe in an action expression");
                break;
            }
            let Some((name, name_span)) = self.expect_identifier_or_keyword() else {
                break;
            };
            let mut args = Vec::new();
            while self.consume_optional_character(':') {
                args.push(self.parse_expression());
            }
            let span = self.span_from(start);
            result = Ast::BindingPipe(BindingPipe {
                span,
                source_span: self.abs(span),
                name_span,
                exp: Box::new(result),
                name,
                args,
            });
        }
        result
    }

    fn parse_expression(&mut self) -> Ast {
        self.parse_conditional()
    }

    fn parse_conditional(&mut self) -> Ast {
        let start = self.current_start();
        let condition = self.parse_logical_or();
        if self.consume_optional_character('?') {
            let true_exp = self.parse_pipe();
            self.expect_character(':');
            let false_exp = self.parse_pipe();
            let span = self.span_from(start);
            Ast::Conditional(Conditional {
                span,
                source_span: self.abs(span),
                condition: Box::new(condition),
                true_exp: Box::new(true_exp),
                false_exp: Box::new(false_exp),
            })
        } else {
            condition
        }
    }

    fn binary(&mut self, start: usize, operation: &str, left: Ast, right: Ast) -> Ast {
        let span = self.span_from(start);
        Ast::Binary(Binary {
            span,
            source_span: self.abs(span),
            operation: operation.to_string(),
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    fn parse_logical_or(&mut self) -> Ast {
        let start = self.current_start();
        let mut result = self.parse_logical_and();
        while self.consume_optional_operator("||") {
            let right = self.parse_logical_and();
            result = self.binary(start, "||", result, right);
        }
        result
    }

    fn parse_logical_and(&mut self) -> Ast {
        let start = self.current_start();
        let mut result = self.parse_nullish_coalescing();
        while self.consume_optional_operator("&&") {
            let right = self.parse_nullish_coalescing();
            result = self.binary(start, "&&", result, right);
        }
        result
    }

    fn parse_nullish_coalescing(&mut self) -> Ast {
        let start = self.current_start();
        let mut result = self.parse_equality();
        while self.consume_optional_operator("??") {
            let right = self.parse_equality();
            result = self.binary(start, "??", result, right);
        }
        result
    }

    fn parse_equality(&mut self) -> Ast {
        let start = self.current_start();
        let mut result = self.parse_relational();
        loop {
            let op = match self.peek(0) {
                Some(t) if t.is_operator("==") => "==",
                Some(t) if t.is_operator("===") => "===",
                Some(t) if t.is_operator("!=") => "!=",
                Some(t) if t.is_operator("!==") => "!==",
                _ => break,
            };
            self.advance();
            let right = self.parse_relational();
            result = self.binary(start, op, result, right);
        }
        result
    }

    fn parse_relational(&mut self) -> Ast {
        let start = self.current_start();
        let mut result = self.parse_additive();
        loop {
            let op = match self.peek(0) {
                Some(t) if t.is_operator("<") => "<",
                Some(t) if t.is_operator("<=") => "<=",
                Some(t) if t.is_operator(">") => ">",
                Some(t) if t.is_operator(">=") => ">=",
                _ => break,
            };
            self.advance();
            let right = self.parse_additive();
            result = self.binary(start, op, result, right);
        }
        result
    }

    fn parse_additive(&mut self) -> Ast {
        let start = self.current_start();
        let mut result = self.parse_multiplicative();
        loop {
            let op = match self.peek(0) {
                Some(t) if t.is_operator("+") => "+",
                Some(t) if t.is_operator("-") => "-",
                _ => break,
            };
            self.advance();
            let right = self.parse_multiplicative();
            result = self.binary(start, op, result, right);
        }
        result
    }

    fn parse_multiplicative(&mut self) -> Ast {
        let start = self.current_start();
        let mut result = self.parse_prefix();
        loop {
            let op = match self.peek(0) {
                Some(t) if t.is_operator("*") => "*",
                Some(t) if t.is_operator("/") => "/",
                Some(t) if t.is_operator("%") => "%",
                _ => break,
            };
            self.advance();
            let right = self.parse_prefix();
            result = self.binary(start, op, result, right);
        }
        result
    }

    fn parse_prefix(&mut self) -> Ast {
        let start = self.current_start();
        if self.consume_optional_operator("!") {
            let expression = self.parse_prefix();
            let span = self.span_from(start);
            return Ast::PrefixNot(PrefixNot {
                span,
                source_span: self.abs(span),
                expression: Box::new(expression),
            });
        }
        for op in ["-", "+"] {
            if self.consume_optional_operator(op) {
                let expr = self.parse_prefix();
                let span = self.span_from(start);
                return Ast::Unary(Unary {
                    span,
                    source_span: self.abs(span),
                    operator: op.to_string(),
                    expr: Box::new(expr),
                });
            }
        }
        self.parse_call_chain()
    }

    fn parse_call_chain(&mut self) -> Ast {
        let start = self.current_start();
        let mut result = self.parse_primary();
        loop {
            if self.consume_optional_character('.') {
                result = self.parse_access_member(result, start, false);
            } else if self.consume_optional_operator("?.") {
                if self.consume_optional_character('(') {
                    result = self.parse_call(result, start, true);
                } else if self.next_is_character('[') {
                    self.advance();
                    result = self.parse_keyed_access(result, start, true);
                } else {
                    result = self.parse_access_member(result, start, true);
                }
            } else if self.consume_optional_character('[') {
                result = self.parse_keyed_access(result, start, false);
            } else if self.consume_optional_character('(') {
                result = self.parse_call(result, start, false);
            } else if self.consume_optional_operator("!") {
                let span = self.span_from(start);
                result = Ast::NonNullAssert(NonNullAssert {
                    span,
                    source_span: self.abs(span),
                    expression: Box::new(result),
                });
            } else {
                return result;
            }
        }
    }

    fn parse_access_member(&mut self, receiver: Ast, start: usize, is_safe: bool) -> Ast {
        let Some((name, name_span)) = self.expect_identifier_or_keyword() else {
            return self.empty_expr(start);
        };
        if !is_safe && self.next_is_operator("=") {
            self.advance();
            if !self.is_action {
                self.error("Bindings cannot contain assignments");
            }
            let value = self.parse_conditional();
            let span = self.span_from(start);
            return Ast::PropertyWrite(PropertyWrite {
                span,
                source_span: self.abs(span),
                name_span,
                receiver: Box::new(receiver),
                name,
                value: Box::new(value),
            });
        }
        let span = self.span_from(start);
        if is_safe {
            Ast::SafePropertyRead(SafePropertyRead {
                span,
                source_span: self.abs(span),
                name_span,
                receiver: Box::new(receiver),
                name,
            })
        } else {
            Ast::PropertyRead(PropertyRead {
                span,
                source_span: self.abs(span),
                name_span,
                receiver: Box::new(receiver),
                name,
            })
        }
    }

    fn parse_keyed_access(&mut self, receiver: Ast, start: usize, is_safe: bool) -> Ast {
        let key = self.parse_pipe();
        self.expect_character(']');
        if !is_safe && self.next_is_operator("=") {
            self.advance();
            if !self.is_action {
                self.error("Bindings cannot contain assignments");
            }
            let value = self.parse_conditional();
            let span = self.span_from(start);
            return Ast::KeyedWrite(KeyedWrite {
                span,
                source_span: self.abs(span),
                receiver: Box::new(receiver),
                key: Box::new(key),
                value: Box::new(value),
            });
        }
        let span = self.span_from(start);
        if is_safe {
            Ast::SafeKeyedRead(SafeKeyedRead {
                span,
                source_span: self.abs(span),
                receiver: Box::new(receiver),
                key: Box::new(key),
            })
        } else {
            Ast::KeyedRead(KeyedRead {
                span,
                source_span: self.abs(span),
                receiver: Box::new(receiver),
                key: Box::new(key),
            })
        }
    }

    fn parse_call(&mut self, receiver: Ast, start: usize, is_safe: bool) -> Ast {
        let mut args = Vec::new();
        if !self.next_is_character(')') {
            loop {
                args.push(self.parse_pipe());
                if !self.consume_optional_character(',') {
                    break;
                }
            }
        }
        self.expect_character(')');
        let span = self.span_from(start);
        if is_safe {
            Ast::SafeCall(SafeCall {
                span,
                source_span: self.abs(span),
                receiver: Box::new(receiver),
                args,
            })
        } else {
            Ast::Call(Call {
                span,
                source_span: self.abs(span),
                receiver: Box::new(receiver),
                args,
            })
        }
    }

    fn parse_primary(&mut self) -> Ast {
        let start = self.current_start();
        let Some(token) = self.peek(0).cloned() else {
            return self.empty_expr(start);
        };

        if token.is_error() {
            let message = token.str_value.clone();
            self.error(message);
            return self.empty_expr(start);
        }

        if self.consume_optional_character('(') {
            let result = self.parse_pipe();
            self.expect_character(')');
            return result;
        }

        if token.is_number() {
            self.advance();
            let span = self.span_from(start);
            return Ast::LiteralPrimitive(LiteralPrimitive {
                span,
                source_span: self.abs(span),
                value: PrimitiveValue::Number(token.num_value),
            });
        }

        if token.is_string() {
            self.advance();
            let span = self.span_from(start);
            return Ast::LiteralPrimitive(LiteralPrimitive {
                span,
                source_span: self.abs(span),
                value: PrimitiveValue::String(token.str_value.clone()),
            });
        }

        for (keyword, value) in [
            ("true", PrimitiveValue::Boolean(true)),
            ("false", PrimitiveValue::Boolean(false)),
            ("null", PrimitiveValue::Null),
            ("undefined", PrimitiveValue::Undefined),
        ] {
            if token.is_keyword(keyword) {
                self.advance();
                let span = self.span_from(start);
                return Ast::LiteralPrimitive(LiteralPrimitive {
                    span,
                    source_span: self.abs(span),
                    value,
                });
            }
        }

        if token.is_keyword("this") {
            self.advance();
            let span = self.span_from(start);
            return Ast::ThisReceiver(ThisReceiver {
                span,
                source_span: self.abs(span),
            });
        }

        if self.consume_optional_character('[') {
            let mut expressions = Vec::new();
            if !self.next_is_character(']') {
                loop {
                    expressions.push(self.parse_pipe());
                    if !self.consume_optional_character(',') {
                        break;
                    }
                }
            }
            self.expect_character(']');
            let span = self.span_from(start);
            return Ast::LiteralArray(LiteralArray {
                span,
                source_span: self.abs(span),
                expressions,
            });
        }

        if self.next_is_character('{') {
            return self.parse_literal_map(start);
        }

        if token.is_identifier() {
            let receiver_span = ParseSpan::new(start, start);
            let receiver = Ast::ImplicitReceiver(ImplicitReceiver {
                span: receiver_span,
                source_span: self.abs(receiver_span),
            });
            return self.parse_access_member(receiver, start, false);
        }

        self.error(format!("Unexpected token '{}'", token.str_value));
        self.empty_expr(start)
    }

    fn parse_literal_map(&mut self, start: usize) -> Ast {
        self.expect_character('{');
        let mut keys = Vec::new();
        let mut values = Vec::new();
        if !self.next_is_character('}') {
            loop {
                let (key, quoted) = match self.peek(0) {
                    Some(t) if t.is_string() => (t.str_value.clone(), true),
                    Some(t) if t.is_identifier() || t.token_type == super::lexer::TokenType::Keyword => {
                        (t.str_value.clone(), false)
                    }
                    _ => {
                        self.error("Expected map key");
                        break;
                    }
                };
                self.advance();
                self.expect_character(':');
                keys.push(LiteralMapKey { key, quoted });
                values.push(self.parse_pipe());
                if !self.consume_optional_character(',') {
                    break;
                }
            }
        }
        self.expect_character('}');
        let span = self.span_from(start);
        Ast::LiteralMap(LiteralMap {
            span,
            source_span: self.abs(span),
            keys,
            values,
        })
    }

    fn parse_template_bindings(&mut self, directive_name: &str) -> Vec<TemplateBinding> {
        let mut bindings = Vec::new();

        // The directive key itself, with an optional leading expression
        // (`*ngIf="cond"`).
        let dir_key_span = AbsoluteSourceSpan::new(self.absolute_offset, self.absolute_offset);
        if self.index >= self.tokens.len() || self.next_is_keyword("let") {
            bindings.push(TemplateBinding::Expression(ExpressionBinding {
                key: directive_name.to_string(),
                expression: None,
                key_span: dir_key_span,
            }));
        } else {
            let expression = self.capture_expression();
            bindings.push(TemplateBinding::Expression(ExpressionBinding {
                key: directive_name.to_string(),
                expression: Some(expression),
                key_span: dir_key_span,
            }));
            if self.next_is_keyword("as") {
                self.advance();
                if let Some((name, name_span)) = self.expect_identifier_or_keyword() {
                    bindings.push(TemplateBinding::Variable(VariableBinding {
                        key: name,
                        value: Some(directive_name.to_string()),
                        key_span: name_span,
                    }));
                }
            }
        }

        while self.index < self.tokens.len() && self.errors.is_empty() {
            while self.consume_optional_character(';') || self.consume_optional_character(',') {}
            if self.index >= self.tokens.len() {
                break;
            }
            if self.next_is_keyword("let") {
                self.advance();
                let Some((name, key_span)) = self.expect_identifier_or_keyword() else {
                    break;
                };
                let value = if self.consume_optional_operator("=") {
                    self.expect_identifier_or_keyword().map(|(v, _)| v)
                } else {
                    None
                };
                bindings.push(TemplateBinding::Variable(VariableBinding {
                    key: name,
                    value,
                    key_span,
                }));
            } else {
                let Some((key, key_span)) = self.expect_identifier_or_keyword() else {
                    break;
                };
                self.consume_optional_character(':');
                let mapped_key = format!("{}{}", directive_name, capitalize(&key));
                let expression = if self.index < self.tokens.len()
                    && !self.next_is_character(';')
                    && !self.next_is_keyword("let")
                    && !self.next_is_keyword("as")
                {
                    Some(self.capture_expression())
                } else {
                    None
                };
                bindings.push(TemplateBinding::Expression(ExpressionBinding {
                    key: mapped_key.clone(),
                    expression,
                    key_span,
                }));
                // `expr as name` exports the binding under a local name.
                if self.next_is_keyword("as") {
                    self.advance();
                    if let Some((name, name_span)) = self.expect_identifier_or_keyword() {
                        bindings.push(TemplateBinding::Variable(VariableBinding {
                            key: name,
                            value: Some(mapped_key),
                            key_span: name_span,
                        }));
                    }
                }
            }
        }
        bindings
    }

    fn capture_expression(&mut self) -> AstWithSource {
        let ast = self.parse_pipe();
        let span = ast.span();
        let source = self.input.get(span.start..span.end).unwrap_or("").to_string();
        AstWithSource {
            ast,
            source,
            location: self.location.clone(),
            absolute_offset: self.absolute_offset,
            errors: Vec::new(),
        }
    }
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> AstWithSource {
        Parser::new().parse_binding(input, "test.html", 0)
    }

    #[test]
    fn test_parses_implicit_property_read() {
        let result = parse("foo");
        assert!(result.errors.is_empty());
        match result.ast {
            Ast::PropertyRead(read) => {
                assert_eq!(read.name, "foo");
                assert!(read.receiver.is_implicit_receiver());
            }
            other => panic!("expected property read, got {:?}", other),
        }
    }

    #[test]
    fn test_member_chain_bottoms_at_implicit_receiver() {
        let result = parse("foo.bar.baz");
        let Ast::PropertyRead(baz) = result.ast else { panic!() };
        assert_eq!(baz.name, "baz");
        let Ast::PropertyRead(bar) = *baz.receiver else { panic!() };
        assert_eq!(bar.name, "bar");
        let Ast::PropertyRead(foo) = *bar.receiver else { panic!() };
        assert_eq!(foo.name, "foo");
        assert!(foo.receiver.is_implicit_receiver());
    }

    #[test]
    fn test_name_spans_are_absolute() {
        let result = Parser::new().parse_binding("foo.bar", "test.html", 10);
        let Ast::PropertyRead(bar) = result.ast else { panic!() };
        assert_eq!(bar.name_span.start, 14);
        assert_eq!(bar.name_span.end, 17);
    }

    #[test]
    fn test_parses_pipes_with_args() {
        let result = parse("value | slice:0:5");
        let Ast::BindingPipe(pipe) = result.ast else { panic!() };
        assert_eq!(pipe.name, "slice");
        assert_eq!(pipe.args.len(), 2);
    }

    #[test]
    fn test_rejects_pipe_in_action() {
        let result = Parser::new().parse_action("value | async", "test.html", 0);
        assert!(!result.errors.is_empty());
    }

    #[test]
    fn test_parses_conditional() {
        let result = parse("a ? b : c");
        assert!(matches!(result.ast, Ast::Conditional(_)));
    }

    #[test]
    fn test_parses_method_call() {
        let result = parse("save(item, 1)");
        let Ast::Call(call) = result.ast else { panic!() };
        assert_eq!(call.args.len(), 2);
        let Ast::PropertyRead(read) = *call.receiver else { panic!() };
        assert_eq!(read.name, "save");
    }

    #[test]
    fn test_parses_safe_navigation() {
        let result = parse("user?.name");
        assert!(matches!(result.ast, Ast::SafePropertyRead(_)));
    }

    #[test]
    fn test_parses_keyed_access() {
        let result = parse("items[0]");
        assert!(matches!(result.ast, Ast::KeyedRead(_)));
    }

    #[test]
    fn test_action_allows_assignment_chain() {
        let result = Parser::new().parse_action("open = true; submit()", "test.html", 0);
        assert!(result.errors.is_empty(), "{:?}", result.errors);
        let Ast::Chain(chain) = result.ast else { panic!() };
        assert_eq!(chain.expressions.len(), 2);
        assert!(matches!(chain.expressions[0], Ast::PropertyWrite(_)));
    }

    #[test]
    fn test_binding_rejects_assignment() {
        let result = parse("open = true");
        assert!(!result.errors.is_empty());
    }

    #[test]
    fn test_malformed_input_yields_errors_not_panic() {
        let result = parse("foo..");
        assert!(!result.errors.is_empty());
    }

    #[test]
    fn test_template_bindings_for_ng_for() {
        let (bindings, errors) = Parser::new().parse_template_bindings(
            "ngFor",
            "let item of items; trackBy: trackFn; let i = index",
            "test.html",
            0,
        );
        assert!(errors.is_empty(), "{:?}", errors);
        let keys: Vec<String> = bindings
            .iter()
            .map(|b| match b {
                TemplateBinding::Variable(v) => format!("var:{}", v.key),
                TemplateBinding::Expression(e) => format!("expr:{}", e.key),
            })
            .collect();
        assert_eq!(
            keys,
            vec!["expr:ngFor", "var:item", "expr:ngForOf", "expr:ngForTrackBy", "var:i"]
        );
    }

    #[test]
    fn test_template_bindings_with_leading_expression() {
        let (bindings, errors) =
            Parser::new().parse_template_bindings("ngIf", "visible as shown", "test.html", 0);
        assert!(errors.is_empty());
        let TemplateBinding::Expression(first) = &bindings[0] else { panic!() };
        assert_eq!(first.key, "ngIf");
        assert!(first.expression.is_some());
        let TemplateBinding::Variable(var) = &bindings[1] else { panic!() };
        assert_eq!(var.key, "shown");
    }
}
