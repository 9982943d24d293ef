//! Symbol resolution for template expressions.
//!
//! Validates the root of every receiver chain against the host class's
//! declared members merged with template-local names. Only the outermost
//! identifier of a chain is validated: `foo.bar.baz` checks `foo` alone,
//! because without a type system nothing is knowable about `bar` or `baz`.

use crate::failures::Failure;
use crate::source_mapping::{FragmentSource, SourceMappingVisitor};
use crate::string_distance::{closest_matches, format_suggestion_list};
use crate::visitors::{ComponentContext, ExpressionVisitorStrategy};
use angular_template::expression_parser::ast::{
    AbsoluteSourceSpan, Ast, AstVisitor, AstWithSource, Call, PropertyRead, PropertyWrite,
    SafeCall, SafePropertyRead,
};

const SUGGESTION_DISTANCE: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AccessKind {
    Property,
    Method,
}

impl AccessKind {
    fn label(self) -> &'static str {
        match self {
            AccessKind::Property => "property",
            AccessKind::Method => "method",
        }
    }
}

/// Expression strategy reporting reads/writes of names that exist neither
/// on the class nor among template locals, with "probably you mean"
/// suggestions for close misses.
pub struct SymbolAccessValidator;

impl ExpressionVisitorStrategy for SymbolAccessValidator {
    fn visit_expression(
        &self,
        expression: &AstWithSource,
        ctx: &ComponentContext,
        source: &FragmentSource,
    ) -> Vec<Failure> {
        let mut visitor = SymbolAccessVisitor {
            ctx,
            reporter: SourceMappingVisitor::new(source),
            check: Check::Existence,
        };
        visitor.visit(&expression.ast);
        visitor.reporter.into_failures()
    }
}

/// Stricter variant: the member exists, but is it public? Reports access
/// to private/protected members; existence misses are left to
/// `SymbolAccessValidator` and never double-reported here. No suggestions:
/// existence is not in question, accessibility is.
pub struct PublicMembersValidator;

impl ExpressionVisitorStrategy for PublicMembersValidator {
    fn visit_expression(
        &self,
        expression: &AstWithSource,
        ctx: &ComponentContext,
        source: &FragmentSource,
    ) -> Vec<Failure> {
        let mut visitor = SymbolAccessVisitor {
            ctx,
            reporter: SourceMappingVisitor::new(source),
            check: Check::Accessibility,
        };
        visitor.visit(&expression.ast);
        visitor.reporter.into_failures()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Check {
    Existence,
    Accessibility,
}

struct SymbolAccessVisitor<'c> {
    ctx: &'c ComponentContext,
    reporter: SourceMappingVisitor,
    check: Check,
}

impl SymbolAccessVisitor<'_> {
    fn validate(&mut self, name: &str, name_span: AbsoluteSourceSpan, kind: AccessKind) {
        match self.check {
            Check::Existence => {
                if !self.ctx.has_symbol(name) {
                    let message = self.missing_symbol_message(name, kind);
                    self.reporter
                        .add_failure(name_span.start, name_span.width(), message);
                }
            }
            Check::Accessibility => {
                if let Some(flags) = self.ctx.members.flags_of(name) {
                    if !flags.is_public() {
                        let message = format!(
                            "The {} \"{}\" is not a public member and cannot be used in a template.",
                            kind.label(),
                            name
                        );
                        self.reporter
                            .add_failure(name_span.start, name_span.width(), message);
                    }
                }
            }
        }
    }

    fn missing_symbol_message(&self, name: &str, kind: AccessKind) -> String {
        let mut message = format!(
            "The {} \"{}\" that you're trying to access does not exist in the class declaration.",
            kind.label(),
            name
        );
        let suggestions = closest_matches(name, self.ctx.available_names(), SUGGESTION_DISTANCE);
        if !suggestions.is_empty() {
            message.push_str(&format!(
                " Probably you mean: {}.",
                format_suggestion_list(&suggestions)
            ));
        }
        message
    }
}

impl AstVisitor for SymbolAccessVisitor<'_> {
    fn visit_property_read(&mut self, ast: &PropertyRead) {
        if ast.receiver.is_implicit_receiver() {
            self.validate(&ast.name, ast.name_span, AccessKind::Property);
        } else {
            self.visit(&ast.receiver);
        }
    }

    fn visit_safe_property_read(&mut self, ast: &SafePropertyRead) {
        if ast.receiver.is_implicit_receiver() {
            self.validate(&ast.name, ast.name_span, AccessKind::Property);
        } else {
            self.visit(&ast.receiver);
        }
    }

    fn visit_property_write(&mut self, ast: &PropertyWrite) {
        if ast.receiver.is_implicit_receiver() {
            self.validate(&ast.name, ast.name_span, AccessKind::Property);
        } else {
            self.visit(&ast.receiver);
        }
        self.visit(&ast.value);
    }

    fn visit_call(&mut self, ast: &Call) {
        self.visit_callee(&ast.receiver);
        for arg in &ast.args {
            self.visit(arg);
        }
    }

    fn visit_safe_call(&mut self, ast: &SafeCall) {
        self.visit_callee(&ast.receiver);
        for arg in &ast.args {
            self.visit(arg);
        }
    }
}

impl SymbolAccessVisitor<'_> {
    /// The callee of a call rooted directly on the component is a method
    /// access; anything deeper falls back to ordinary receiver traversal.
    fn visit_callee(&mut self, callee: &Ast) {
        match callee {
            Ast::PropertyRead(read) if read.receiver.is_implicit_receiver() => {
                self.validate(&read.name, read.name_span, AccessKind::Method);
            }
            Ast::SafePropertyRead(read) if read.receiver.is_implicit_receiver() => {
                self.validate(&read.name, read.name_span, AccessKind::Method);
            }
            other => self.visit(other),
        }
    }
}
