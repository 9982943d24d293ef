//! Flags `@Pipe({ pure: false })` declarations.

use super::Rule;
use crate::ast_utils;
use crate::config::LinterConfig;
use crate::failures::Failure;
use crate::resolvers::FileSystemResolver;
use crate::visitors::WalkerVisitors;
use crate::walker::{lint_source, NgHooks};
use oxc_ast::ast;
use std::path::Path;

#[derive(Debug, Default)]
struct PipeImpureHooks;

impl NgHooks for PipeImpureHooks {
    fn visit_ng_pipe(
        &mut self,
        class: &ast::Class<'_>,
        decorator: &ast::Decorator<'_>,
        failures: &mut Vec<Failure>,
    ) {
        let Some(argument) = ast_utils::decorator_argument(decorator) else {
            return;
        };
        let Some(property) = ast_utils::object_property(argument, "pure") else {
            return;
        };
        if ast_utils::boolean_literal_value(&property.value) != Some(false) {
            return;
        }
        let class_name = ast_utils::class_name(class).unwrap_or_else(|| "<anonymous>".to_string());
        failures.push(Failure::new(
            property.span.start as usize,
            property.span.end as usize,
            format!("Impure pipe declared in class {}.", class_name),
        ));
    }
}

#[derive(Debug, Default)]
pub struct PipeImpureRule;

impl Rule for PipeImpureRule {
    fn rule_name(&self) -> &'static str {
        "pipe-impure"
    }

    fn apply(&self, path: &Path, source: &str, config: &LinterConfig) -> Vec<Failure> {
        lint_source(
            source,
            path,
            config,
            &FileSystemResolver::new(),
            &WalkerVisitors::default(),
            PipeImpureHooks,
        )
    }
}
