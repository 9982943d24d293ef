//! Reports template expressions accessing names that exist neither on the
//! component class nor among template-local variables.

use super::Rule;
use crate::config::LinterConfig;
use crate::expression_symbols::SymbolAccessValidator;
use crate::failures::Failure;
use crate::resolvers::FileSystemResolver;
use crate::visitors::{BasicCssVisitor, BasicTemplateVisitor, WalkerVisitors};
use crate::walker::{lint_source, DefaultNgHooks};
use std::path::Path;

#[derive(Debug, Default)]
pub struct NoMissingTemplateMemberRule;

impl Rule for NoMissingTemplateMemberRule {
    fn rule_name(&self) -> &'static str {
        "no-missing-template-member"
    }

    fn apply(&self, path: &Path, source: &str, config: &LinterConfig) -> Vec<Failure> {
        let visitors = WalkerVisitors {
            template: Box::new(BasicTemplateVisitor),
            style: Box::new(BasicCssVisitor),
            expression: Box::new(SymbolAccessValidator),
        };
        lint_source(
            source,
            path,
            config,
            &FileSystemResolver::new(),
            &visitors,
            DefaultNgHooks,
        )
    }
}
