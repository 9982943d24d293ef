//! Template-local variable collection.
//!
//! One pass over the bound template AST, run before the main template
//! visitor, gathering every name the template itself introduces (loop
//! variables, `let` bindings, `#ref` references) so symbol resolution
//! never flags them as missing class members.

use angular_template::template_ast::{visit_all, Reference, TemplateNode, TemplateVisitor, Variable};
use std::collections::HashSet;

#[derive(Debug, Default)]
pub struct ReferenceCollector {
    names: HashSet<String>,
}

impl TemplateVisitor for ReferenceCollector {
    fn visit_variable(&mut self, variable: &Variable) {
        self.names.insert(variable.name.clone());
    }

    fn visit_reference(&mut self, reference: &Reference) {
        self.names.insert(reference.name.clone());
    }
}

pub fn collect_template_locals(nodes: &[TemplateNode]) -> HashSet<String> {
    let mut collector = ReferenceCollector::default();
    visit_all(&mut collector, nodes);
    collector.names
}
