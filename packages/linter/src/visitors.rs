//! Pluggable fragment visitors.
//!
//! Every concrete lint rule customizes the walk by supplying strategy
//! values here instead of subclassing the walker: one strategy for the
//! template AST, one for stylesheet ASTs, one for the expressions embedded
//! in templates. The defaults drive the expression strategy over every
//! embedded expression and report nothing for styles.

use crate::failures::Failure;
use crate::reflection::DeclaredMembers;
use crate::source_mapping::FragmentSource;
use angular_template::css_parser::Stylesheet;
use angular_template::expression_parser::ast::AstWithSource;
use angular_template::template_ast::{
    visit_all, BoundText, Element, Template, TemplateNode, TemplateVisitor,
};
use std::collections::HashSet;

/// Everything a fragment visitor may need to know about the component
/// being analyzed. Owned data only, so strategies stay independent of the
/// host AST arena.
#[derive(Debug, Clone, Default)]
pub struct ComponentContext {
    pub class_name: String,
    pub members: DeclaredMembers,
    /// Template-local names (loop variables, references) plus anything the
    /// current expression scope predefines (`$event` in handlers).
    pub locals: HashSet<String>,
}

impl ComponentContext {
    pub fn has_symbol(&self, name: &str) -> bool {
        self.members.contains(name) || self.locals.contains(name)
    }

    /// The merged availability set used for suggestion candidates.
    pub fn available_names(&self) -> Vec<&str> {
        self.members
            .properties
            .keys()
            .chain(self.members.methods.keys())
            .map(String::as_str)
            .chain(self.locals.iter().map(String::as_str))
            .collect()
    }

    pub fn with_local(&self, name: &str) -> ComponentContext {
        let mut extended = self.clone();
        extended.locals.insert(name.to_string());
        extended
    }
}

pub trait ExpressionVisitorStrategy {
    fn visit_expression(
        &self,
        expression: &AstWithSource,
        ctx: &ComponentContext,
        source: &FragmentSource,
    ) -> Vec<Failure>;
}

pub trait TemplateVisitorStrategy {
    fn visit_template(
        &self,
        nodes: &[TemplateNode],
        ctx: &ComponentContext,
        source: &FragmentSource,
        expression: &dyn ExpressionVisitorStrategy,
    ) -> Vec<Failure>;
}

pub trait StyleVisitorStrategy {
    fn visit_stylesheet(
        &self,
        stylesheet: &Stylesheet,
        ctx: &ComponentContext,
        source: &FragmentSource,
    ) -> Vec<Failure>;
}

/// The three strategies a walk runs with.
pub struct WalkerVisitors {
    pub template: Box<dyn TemplateVisitorStrategy>,
    pub style: Box<dyn StyleVisitorStrategy>,
    pub expression: Box<dyn ExpressionVisitorStrategy>,
}

impl Default for WalkerVisitors {
    fn default() -> Self {
        WalkerVisitors {
            template: Box::new(BasicTemplateVisitor),
            style: Box::new(BasicCssVisitor),
            expression: Box::new(NoopExpressionVisitor),
        }
    }
}

/// Default template strategy: walks the bound AST and hands every embedded
/// expression (bindings, event handlers, interpolations) to the expression
/// strategy. Event handlers additionally see `$event` in scope.
pub struct BasicTemplateVisitor;

impl TemplateVisitorStrategy for BasicTemplateVisitor {
    fn visit_template(
        &self,
        nodes: &[TemplateNode],
        ctx: &ComponentContext,
        source: &FragmentSource,
        expression: &dyn ExpressionVisitorStrategy,
    ) -> Vec<Failure> {
        let event_ctx = ctx.with_local("$event");
        let mut driver = ExpressionDriver {
            ctx,
            event_ctx: &event_ctx,
            source,
            expression,
            failures: Vec::new(),
        };
        visit_all(&mut driver, nodes);
        driver.failures
    }
}

struct ExpressionDriver<'d> {
    ctx: &'d ComponentContext,
    event_ctx: &'d ComponentContext,
    source: &'d FragmentSource,
    expression: &'d dyn ExpressionVisitorStrategy,
    failures: Vec<Failure>,
}

impl TemplateVisitor for ExpressionDriver<'_> {
    fn visit_element(&mut self, element: &Element) {
        for input in &element.inputs {
            self.failures
                .extend(self.expression.visit_expression(&input.value, self.ctx, self.source));
        }
        for output in &element.outputs {
            self.failures.extend(self.expression.visit_expression(
                &output.handler,
                self.event_ctx,
                self.source,
            ));
        }
        visit_all(self, &element.children);
    }

    fn visit_template(&mut self, template: &Template) {
        for input in &template.inputs {
            self.failures
                .extend(self.expression.visit_expression(&input.value, self.ctx, self.source));
        }
        visit_all(self, &template.children);
    }

    fn visit_bound_text(&mut self, text: &BoundText) {
        self.failures
            .extend(self.expression.visit_expression(&text.value, self.ctx, self.source));
    }
}

/// Default style strategy: parses but reports nothing; style rules plug in
/// their own strategy.
pub struct BasicCssVisitor;

impl StyleVisitorStrategy for BasicCssVisitor {
    fn visit_stylesheet(
        &self,
        _stylesheet: &Stylesheet,
        _ctx: &ComponentContext,
        _source: &FragmentSource,
    ) -> Vec<Failure> {
        Vec::new()
    }
}

/// Default expression strategy: accepts everything.
pub struct NoopExpressionVisitor;

impl ExpressionVisitorStrategy for NoopExpressionVisitor {
    fn visit_expression(
        &self,
        _expression: &AstWithSource,
        _ctx: &ComponentContext,
        _source: &FragmentSource,
    ) -> Vec<Failure> {
        Vec::new()
    }
}
