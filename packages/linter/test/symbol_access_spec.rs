//! Symbol access validator tests against hand-built contexts.

use angular_linter::expression_symbols::{PublicMembersValidator, SymbolAccessValidator};
use angular_linter::metadata::CodeWithSourceMap;
use angular_linter::reflection::{DeclaredMembers, MemberFlags};
use angular_linter::source_mapping::FragmentSource;
use angular_linter::visitors::{
    BasicTemplateVisitor, ComponentContext, ExpressionVisitorStrategy, TemplateVisitorStrategy,
};
use angular_template::{parse_template, TemplateParseOptions};

fn context(properties: &[&str], methods: &[&str]) -> ComponentContext {
    let mut members = DeclaredMembers::default();
    for property in properties {
        members.properties.insert((*property).to_string(), MemberFlags::empty());
    }
    for method in methods {
        members.methods.insert((*method).to_string(), MemberFlags::empty());
    }
    ComponentContext {
        class_name: "Test".to_string(),
        members,
        locals: Default::default(),
    }
}

fn run(template: &str, ctx: &ComponentContext, expression: &dyn ExpressionVisitorStrategy) -> Vec<angular_linter::Failure> {
    let parsed = parse_template(template, "cmp.html", &TemplateParseOptions::default());
    assert!(!parsed.has_fatal_errors(), "{:?}", parsed.errors);
    let mut ctx = ctx.clone();
    ctx.locals
        .extend(angular_linter::reference_collector::collect_template_locals(&parsed.nodes));
    let fragment = FragmentSource::inline(CodeWithSourceMap::plain(template), Some(99), "test.ts");
    BasicTemplateVisitor.visit_template(&parsed.nodes, &ctx, &fragment, expression)
}

#[test]
fn should_list_all_candidates_tied_at_minimum_distance() {
    let ctx = context(&["bar", "bat", "qux"], &[]);
    let failures = run("{{ baz }}", &ctx, &SymbolAccessValidator);
    assert_eq!(failures.len(), 1);
    assert!(
        failures[0].message.ends_with("Probably you mean: \"bar\" or \"bat\"."),
        "{}",
        failures[0].message
    );
}

#[test]
fn should_validate_roots_of_keyed_and_safe_access() {
    let ctx = context(&["rows"], &[]);
    let keyed = run("{{ items[0] }}", &ctx, &SymbolAccessValidator);
    assert_eq!(keyed.len(), 1);
    assert!(keyed[0].message.contains("property \"items\""));

    let safe = run("{{ user?.name }}", &ctx, &SymbolAccessValidator);
    assert_eq!(safe.len(), 1);
    assert!(safe[0].message.contains("property \"user\""));

    assert!(run("{{ rows[0]?.id }}", &ctx, &SymbolAccessValidator).is_empty());
}

#[test]
fn should_report_each_missing_root_once_per_expression() {
    let ctx = context(&[], &[]);
    let failures = run("{{ a + b }}", &ctx, &SymbolAccessValidator);
    assert_eq!(failures.len(), 2);
}

#[test]
fn should_apply_base_offset_to_failure_positions() {
    let ctx = context(&[], &[]);
    let template = "{{ gone }}";
    let failures = run(template, &ctx, &SymbolAccessValidator);
    assert_eq!(failures.len(), 1);
    // Base offset 99 points at the initializer node; text starts at 100.
    assert_eq!(failures[0].start_offset, 100 + template.find("gone").unwrap());
}

#[test]
fn should_treat_pipe_inputs_but_not_pipe_names_as_symbols() {
    let ctx = context(&["value"], &[]);
    assert!(run("{{ value | uppercase }}", &ctx, &SymbolAccessValidator).is_empty());
}

#[test]
fn should_check_accessibility_only_for_existing_members() {
    let mut ctx = context(&["open"], &["toggle"]);
    ctx.members.properties.insert("secret".to_string(), MemberFlags::PRIVATE);
    ctx.members.methods.insert("refresh".to_string(), MemberFlags::PROTECTED);

    let private_read = run("{{ secret }}", &ctx, &PublicMembersValidator);
    assert_eq!(private_read.len(), 1);
    assert!(private_read[0].message.contains("property \"secret\""));
    assert!(!private_read[0].message.contains("Probably"));

    let protected_call = run("<button (click)=\"refresh()\"></button>", &ctx, &PublicMembersValidator);
    assert_eq!(protected_call.len(), 1);
    assert!(protected_call[0].message.contains("method \"refresh\""));

    // Unknown names are this validator's sibling's concern.
    assert!(run("{{ unknown }}", &ctx, &PublicMembersValidator).is_empty());
    assert!(run("{{ open }}", &ctx, &PublicMembersValidator).is_empty());
}
