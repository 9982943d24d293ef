//! Template expression grammar: lexer, parser and AST.

pub mod ast;
pub mod lexer;
pub mod parser;

pub use ast::{Ast, AstVisitor, AstWithSource, ParserError};
pub use lexer::{Lexer, Token};
pub use parser::{ExpressionBinding, Parser, TemplateBinding, VariableBinding};
