//! Template expression AST.
//!
//! Node spans come in two flavors: `ParseSpan` is relative to the parsed
//! expression text, `AbsoluteSourceSpan` has the expression's base offset
//! already added, so it addresses the template fragment the expression was
//! embedded in.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseSpan {
    pub start: usize,
    pub end: usize,
}

impl ParseSpan {
    pub fn new(start: usize, end: usize) -> Self {
        ParseSpan { start, end }
    }

    pub fn to_absolute(&self, absolute_offset: usize) -> AbsoluteSourceSpan {
        AbsoluteSourceSpan::new(absolute_offset + self.start, absolute_offset + self.end)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbsoluteSourceSpan {
    pub start: usize,
    pub end: usize,
}

impl AbsoluteSourceSpan {
    pub fn new(start: usize, end: usize) -> Self {
        AbsoluteSourceSpan { start, end }
    }

    pub fn width(&self) -> usize {
        self.end - self.start
    }
}

/// Literal values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PrimitiveValue {
    String(String),
    Number(f64),
    Boolean(bool),
    Null,
    Undefined,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Ast {
    EmptyExpr(EmptyExpr),
    ImplicitReceiver(ImplicitReceiver),
    ThisReceiver(ThisReceiver),
    Chain(Chain),
    Conditional(Conditional),
    PropertyRead(PropertyRead),
    PropertyWrite(PropertyWrite),
    SafePropertyRead(SafePropertyRead),
    KeyedRead(KeyedRead),
    SafeKeyedRead(SafeKeyedRead),
    KeyedWrite(KeyedWrite),
    BindingPipe(BindingPipe),
    LiteralPrimitive(LiteralPrimitive),
    LiteralArray(LiteralArray),
    LiteralMap(LiteralMap),
    Interpolation(Interpolation),
    Binary(Binary),
    Unary(Unary),
    PrefixNot(PrefixNot),
    NonNullAssert(NonNullAssert),
    Call(Call),
    SafeCall(SafeCall),
}

impl Ast {
    pub fn span(&self) -> ParseSpan {
        match self {
            Ast::EmptyExpr(a) => a.span,
            Ast::ImplicitReceiver(a) => a.span,
            Ast::ThisReceiver(a) => a.span,
            Ast::Chain(a) => a.span,
            Ast::Conditional(a) => a.span,
            Ast::PropertyRead(a) => a.span,
            Ast::PropertyWrite(a) => a.span,
            Ast::SafePropertyRead(a) => a.span,
            Ast::KeyedRead(a) => a.span,
            Ast::SafeKeyedRead(a) => a.span,
            Ast::KeyedWrite(a) => a.span,
            Ast::BindingPipe(a) => a.span,
            Ast::LiteralPrimitive(a) => a.span,
            Ast::LiteralArray(a) => a.span,
            Ast::LiteralMap(a) => a.span,
            Ast::Interpolation(a) => a.span,
            Ast::Binary(a) => a.span,
            Ast::Unary(a) => a.span,
            Ast::PrefixNot(a) => a.span,
            Ast::NonNullAssert(a) => a.span,
            Ast::Call(a) => a.span,
            Ast::SafeCall(a) => a.span,
        }
    }

    pub fn source_span(&self) -> AbsoluteSourceSpan {
        match self {
            Ast::EmptyExpr(a) => a.source_span,
            Ast::ImplicitReceiver(a) => a.source_span,
            Ast::ThisReceiver(a) => a.source_span,
            Ast::Chain(a) => a.source_span,
            Ast::Conditional(a) => a.source_span,
            Ast::PropertyRead(a) => a.source_span,
            Ast::PropertyWrite(a) => a.source_span,
            Ast::SafePropertyRead(a) => a.source_span,
            Ast::KeyedRead(a) => a.source_span,
            Ast::SafeKeyedRead(a) => a.source_span,
            Ast::KeyedWrite(a) => a.source_span,
            Ast::BindingPipe(a) => a.source_span,
            Ast::LiteralPrimitive(a) => a.source_span,
            Ast::LiteralArray(a) => a.source_span,
            Ast::LiteralMap(a) => a.source_span,
            Ast::Interpolation(a) => a.source_span,
            Ast::Binary(a) => a.source_span,
            Ast::Unary(a) => a.source_span,
            Ast::PrefixNot(a) => a.source_span,
            Ast::NonNullAssert(a) => a.source_span,
            Ast::Call(a) => a.source_span,
            Ast::SafeCall(a) => a.source_span,
        }
    }

    pub fn is_implicit_receiver(&self) -> bool {
        matches!(self, Ast::ImplicitReceiver(_) | Ast::ThisReceiver(_))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmptyExpr {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImplicitReceiver {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
}

/// Explicit `this`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThisReceiver {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
}

/// Semicolon-separated statements, as allowed in event handlers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chain {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub expressions: Vec<Ast>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conditional {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub condition: Box<Ast>,
    pub true_exp: Box<Ast>,
    pub false_exp: Box<Ast>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyRead {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub name_span: AbsoluteSourceSpan,
    pub receiver: Box<Ast>,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyWrite {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub name_span: AbsoluteSourceSpan,
    pub receiver: Box<Ast>,
    pub name: String,
    pub value: Box<Ast>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafePropertyRead {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub name_span: AbsoluteSourceSpan,
    pub receiver: Box<Ast>,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyedRead {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub receiver: Box<Ast>,
    pub key: Box<Ast>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafeKeyedRead {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub receiver: Box<Ast>,
    pub key: Box<Ast>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyedWrite {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub receiver: Box<Ast>,
    pub key: Box<Ast>,
    pub value: Box<Ast>,
}

/// `exp | pipeName:arg0:arg1`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BindingPipe {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub name_span: AbsoluteSourceSpan,
    pub exp: Box<Ast>,
    pub name: String,
    pub args: Vec<Ast>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiteralPrimitive {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub value: PrimitiveValue,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiteralArray {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub expressions: Vec<Ast>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiteralMapKey {
    pub key: String,
    pub quoted: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiteralMap {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub keys: Vec<LiteralMapKey>,
    pub values: Vec<Ast>,
}

/// The parsed form of `prefix {{ exp }} suffix` text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interpolation {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub strings: Vec<String>,
    pub expressions: Vec<Ast>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Binary {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub operation: String,
    pub left: Box<Ast>,
    pub right: Box<Ast>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unary {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub operator: String,
    pub expr: Box<Ast>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrefixNot {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub expression: Box<Ast>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NonNullAssert {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub expression: Box<Ast>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Call {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub receiver: Box<Ast>,
    pub args: Vec<Ast>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafeCall {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub receiver: Box<Ast>,
    pub args: Vec<Ast>,
}

/// An expression AST bundled with the text it was parsed from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AstWithSource {
    pub ast: Ast,
    pub source: String,
    pub location: String,
    pub absolute_offset: usize,
    pub errors: Vec<ParserError>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParserError {
    pub message: String,
    pub input: String,
    pub location: String,
}

impl ParserError {
    pub fn new(message: impl Into<String>, input: impl Into<String>, location: impl Into<String>) -> Self {
        ParserError {
            message: message.into(),
            input: input.into(),
            location: location.into(),
        }
    }
}

/// Visitor over expression ASTs. Default method bodies recurse, so an
/// implementation only overrides the nodes it cares about and calls the
/// matching `walk_*` helper (or the default) to continue below itself.
pub trait AstVisitor {
    fn visit(&mut self, ast: &Ast) {
        match ast {
            Ast::EmptyExpr(a) => self.visit_empty_expr(a),
            Ast::ImplicitReceiver(a) => self.visit_implicit_receiver(a),
            Ast::ThisReceiver(a) => self.visit_this_receiver(a),
            Ast::Chain(a) => self.visit_chain(a),
            Ast::Conditional(a) => self.visit_conditional(a),
            Ast::PropertyRead(a) => self.visit_property_read(a),
            Ast::PropertyWrite(a) => self.visit_property_write(a),
            Ast::SafePropertyRead(a) => self.visit_safe_property_read(a),
            Ast::KeyedRead(a) => self.visit_keyed_read(a),
            Ast::SafeKeyedRead(a) => self.visit_safe_keyed_read(a),
            Ast::KeyedWrite(a) => self.visit_keyed_write(a),
            Ast::BindingPipe(a) => self.visit_pipe(a),
            Ast::LiteralPrimitive(a) => self.visit_literal_primitive(a),
            Ast::LiteralArray(a) => self.visit_literal_array(a),
            Ast::LiteralMap(a) => self.visit_literal_map(a),
            Ast::Interpolation(a) => self.visit_interpolation(a),
            Ast::Binary(a) => self.visit_binary(a),
            Ast::Unary(a) => self.visit_unary(a),
            Ast::PrefixNot(a) => self.visit_prefix_not(a),
            Ast::NonNullAssert(a) => self.visit_non_null_assert(a),
            Ast::Call(a) => self.visit_call(a),
            Ast::SafeCall(a) => self.visit_safe_call(a),
        }
    }

    fn visit_empty_expr(&mut self, _ast: &EmptyExpr) {}
    fn visit_implicit_receiver(&mut self, _ast: &ImplicitReceiver) {}
    fn visit_this_receiver(&mut self, _ast: &ThisReceiver) {}

    fn visit_chain(&mut self, ast: &Chain) {
        for expr in &ast.expressions {
            self.visit(expr);
        }
    }

    fn visit_conditional(&mut self, ast: &Conditional) {
        self.visit(&ast.condition);
        self.visit(&ast.true_exp);
        self.visit(&ast.false_exp);
    }

    fn visit_property_read(&mut self, ast: &PropertyRead) {
        self.visit(&ast.receiver);
    }

    fn visit_property_write(&mut self, ast: &PropertyWrite) {
        self.visit(&ast.receiver);
        self.visit(&ast.value);
    }

    fn visit_safe_property_read(&mut self, ast: &SafePropertyRead) {
        self.visit(&ast.receiver);
    }

    fn visit_keyed_read(&mut self, ast: &KeyedRead) {
        self.visit(&ast.receiver);
        self.visit(&ast.key);
    }

    fn visit_safe_keyed_read(&mut self, ast: &SafeKeyedRead) {
        self.visit(&ast.receiver);
        self.visit(&ast.key);
    }

    fn visit_keyed_write(&mut self, ast: &KeyedWrite) {
        self.visit(&ast.receiver);
        self.visit(&ast.key);
        self.visit(&ast.value);
    }

    fn visit_pipe(&mut self, ast: &BindingPipe) {
        self.visit(&ast.exp);
        for arg in &ast.args {
            self.visit(arg);
        }
    }

    fn visit_literal_primitive(&mut self, _ast: &LiteralPrimitive) {}

    fn visit_literal_array(&mut self, ast: &LiteralArray) {
        for expr in &ast.expressions {
            self.visit(expr);
        }
    }

    fn visit_literal_map(&mut self, ast: &LiteralMap) {
        for value in &ast.values {
            self.visit(value);
        }
    }

    fn visit_interpolation(&mut self, ast: &Interpolation) {
        for expr in &ast.expressions {
            self.visit(expr);
        }
    }

    fn visit_binary(&mut self, ast: &Binary) {
        self.visit(&ast.left);
        self.visit(&ast.right);
    }

    fn visit_unary(&mut self, ast: &Unary) {
        self.visit(&ast.expr);
    }

    fn visit_prefix_not(&mut self, ast: &PrefixNot) {
        self.visit(&ast.expression);
    }

    fn visit_non_null_assert(&mut self, ast: &NonNullAssert) {
        self.visit(&ast.expression);
    }

    fn visit_call(&mut self, ast: &Call) {
        self.visit(&ast.receiver);
        for arg in &ast.args {
            self.visit(arg);
        }
    }

    fn visit_safe_call(&mut self, ast: &SafeCall) {
        self.visit(&ast.receiver);
        for arg in &ast.args {
            self.visit(arg);
        }
    }
}
