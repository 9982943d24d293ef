//! Rule consumers of the walker core.
//!
//! A rule customizes the walk through the visitor strategies and/or the
//! `NgHooks` callbacks and reports pass/fail as a failure list; the rule
//! bodies themselves stay thin.

mod no_missing_template_member;
mod pipe_impure;
mod template_use_public_members;

pub use no_missing_template_member::NoMissingTemplateMemberRule;
pub use pipe_impure::PipeImpureRule;
pub use template_use_public_members::TemplateUsePublicMembersRule;

use crate::config::LinterConfig;
use crate::failures::Failure;
use std::path::Path;

pub trait Rule {
    fn rule_name(&self) -> &'static str;
    fn apply(&self, path: &Path, source: &str, config: &LinterConfig) -> Vec<Failure>;
}
