//! Reports template expressions reaching into private or protected class
//! members.

use super::Rule;
use crate::config::LinterConfig;
use crate::expression_symbols::PublicMembersValidator;
use crate::failures::Failure;
use crate::resolvers::FileSystemResolver;
use crate::visitors::{BasicCssVisitor, BasicTemplateVisitor, WalkerVisitors};
use crate::walker::{lint_source, DefaultNgHooks};
use std::path::Path;

#[derive(Debug, Default)]
pub struct TemplateUsePublicMembersRule;

impl Rule for TemplateUsePublicMembersRule {
    fn rule_name(&self) -> &'static str {
        "template-use-public-members"
    }

    fn apply(&self, path: &Path, source: &str, config: &LinterConfig) -> Vec<Failure> {
        let visitors = WalkerVisitors {
            template: Box::new(BasicTemplateVisitor),
            style: Box::new(BasicCssVisitor),
            expression: Box::new(PublicMembersValidator),
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
