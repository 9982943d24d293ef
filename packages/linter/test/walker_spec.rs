//! End-to-end walker tests: host-file source in, failures in host-file
//! coordinates out.

use angular_linter::config::LinterConfig;
use angular_linter::expression_symbols::SymbolAccessValidator;
use angular_linter::resolvers::UrlResolver;
use angular_linter::rules::{
    NoMissingTemplateMemberRule, PipeImpureRule, Rule, TemplateUsePublicMembersRule,
};
use angular_linter::visitors::{BasicCssVisitor, BasicTemplateVisitor, WalkerVisitors};
use angular_linter::walker::{lint_source, DefaultNgHooks};
use anyhow::anyhow;
use std::collections::HashMap;
use std::path::Path;

#[derive(Default)]
struct FakeResolver {
    files: HashMap<String, String>,
}

impl UrlResolver for FakeResolver {
    fn resolve(&self, url: &str, _containing_file: &Path) -> anyhow::Result<String> {
        self.files
            .get(url)
            .cloned()
            .ok_or_else(|| anyhow!("no such file: {}", url))
    }
}

fn missing_member_failures(source: &str) -> Vec<angular_linter::Failure> {
    NoMissingTemplateMemberRule::default().apply(Path::new("test.ts"), source, &LinterConfig::default())
}

#[test]
fn should_report_missing_property_without_suggestion_when_too_far() {
    let source = "@Component({selector: 'foo', template: '{{ foo }}'}) class Test { bar: number; }";
    let failures = missing_member_failures(source);
    assert_eq!(failures.len(), 1);
    let failure = &failures[0];
    assert!(failure.message.contains("property \"foo\""), "{}", failure.message);
    // levenshtein(foo, bar) == 3, past the suggestion threshold.
    assert!(!failure.message.contains("Probably you mean"), "{}", failure.message);
    // Linear round trip: fragment offset k maps to base + k.
    let expected = source.find("{{ foo").unwrap() + 3;
    assert_eq!(failure.start_offset, expected);
    assert_eq!(failure.end_offset, expected + 3);
}

#[test]
fn should_suggest_close_member_names() {
    let source = "@Component({selector: 'a', template: '{{ baz }}'}) class Test { bar: number; }";
    let failures = missing_member_failures(source);
    assert_eq!(failures.len(), 1);
    assert!(
        failures[0].message.contains("Probably you mean: \"bar\"."),
        "{}",
        failures[0].message
    );
}

#[test]
fn should_validate_only_the_root_of_member_chains() {
    let source = "@Component({selector: 'a', template: '{{ foo.bar }}'}) class Test { foo: any; }";
    assert!(missing_member_failures(source).is_empty());
}

#[test]
fn should_accept_declared_members_locals_and_event_variables() {
    let source = concat!(
        "@Component({selector: 'a', template: ",
        "'<li *ngFor=\"let item of items\" (click)=\"save($event, item)\">{{ item }}</li>'",
        "}) class Test { items: string[]; save(event: any, item: string) {} }"
    );
    let failures = missing_member_failures(source);
    assert!(failures.is_empty(), "{:?}", failures);
}

#[test]
fn should_count_constructor_parameter_properties_and_accessors() {
    let source = concat!(
        "@Component({selector: 'a', template: '{{ total }} {{ label }}'}) ",
        "class Test { constructor(private total: number) {} get label(): string { return ''; } }"
    );
    let failures = missing_member_failures(source);
    assert!(failures.is_empty(), "{:?}", failures);
}

#[test]
fn should_report_methods_distinctly() {
    let source = "@Component({selector: 'a', template: '{{ fetch() }}'}) class Test { bar: number; }";
    let failures = missing_member_failures(source);
    assert_eq!(failures.len(), 1);
    assert!(failures[0].message.contains("method \"fetch\""), "{}", failures[0].message);
}

#[test]
fn should_flag_impure_pipes_with_class_name() {
    let source = "@Pipe({ name: 'shuffle', pure: false }) class Test {}";
    let failures = PipeImpureRule::default().apply(Path::new("test.ts"), source, &LinterConfig::default());
    assert_eq!(failures.len(), 1);
    assert!(failures[0].message.contains("Impure pipe"), "{}", failures[0].message);
    assert!(failures[0].message.contains("Test"), "{}", failures[0].message);
    assert_eq!(failures[0].start_offset, source.find("pure: false").unwrap());

    let pure = PipeImpureRule::default().apply(
        Path::new("test.ts"),
        "@Pipe({ name: 'shuffle' }) class Test {}",
        &LinterConfig::default(),
    );
    assert!(pure.is_empty());
}

#[test]
fn should_restrict_templates_to_public_members() {
    let source =
        "@Component({selector: 'a', template: '{{ secret }}'}) class Test { private secret: string; }";
    let failures =
        TemplateUsePublicMembersRule::default().apply(Path::new("test.ts"), source, &LinterConfig::default());
    assert_eq!(failures.len(), 1);
    assert!(failures[0].message.contains("not a public member"), "{}", failures[0].message);
    // The member exists, so the existence rule stays quiet.
    assert!(missing_member_failures(source).is_empty());
}

#[test]
fn should_use_external_file_coordinates_for_external_templates() {
    let template = "{{ missing }}";
    let mut resolver = FakeResolver::default();
    resolver.files.insert("x.html".to_string(), template.to_string());
    let visitors = WalkerVisitors {
        template: Box::new(BasicTemplateVisitor),
        style: Box::new(BasicCssVisitor),
        expression: Box::new(SymbolAccessValidator),
    };
    let source = "@Component({selector: 'a', templateUrl: 'x.html'}) class Test {}";
    let failures = lint_source(
        source,
        Path::new("test.ts"),
        &LinterConfig::default(),
        &resolver,
        &visitors,
        DefaultNgHooks,
    );
    assert_eq!(failures.len(), 1);
    // Offsets address x.html itself, not the host file.
    assert_eq!(failures[0].start_offset, template.find("missing").unwrap());
}

#[test]
fn should_never_throw_on_malformed_metadata() {
    for source in [
        "@Component({template: dynamicVar}) class Test {}",
        "@Component({templateUrl: 'gone.html'}) class Test {}",
        "@Component({template: '<div'}) class Test {}",
        "@Component(42) class Test {}",
        "@Pipe() class Test {}",
        "class Plain {}",
    ] {
        let failures = missing_member_failures(source);
        assert!(failures.is_empty(), "{}: {:?}", source, failures);
    }
}

#[test]
fn should_isolate_broken_style_fragments() {
    // The first style fragment fails to parse, the template still runs.
    let source = concat!(
        "@Component({selector: 'a', template: '{{ nope }}', ",
        "styles: ['.a { b }', '.c { color: red; }']}) class Test {}"
    );
    let failures = missing_member_failures(source);
    assert_eq!(failures.len(), 1);
    assert!(failures[0].message.contains("nope"));
}
