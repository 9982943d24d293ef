//! Metadata reader integration tests.

use angular_linter::config::LinterConfig;
use angular_linter::metadata::{Metadata, MetadataReader};
use angular_linter::resolvers::UrlResolver;
use anyhow::anyhow;
use oxc_allocator::Allocator;
use oxc_ast::ast;
use oxc_parser::Parser;
use oxc_span::SourceType;
use std::collections::HashMap;
use std::path::Path;

#[derive(Default)]
struct FakeResolver {
    files: HashMap<String, String>,
}

impl FakeResolver {
    fn with(mut self, url: &str, content: &str) -> Self {
        self.files.insert(url.to_string(), content.to_string());
        self
    }
}

impl UrlResolver for FakeResolver {
    fn resolve(&self, url: &str, _containing_file: &Path) -> anyhow::Result<String> {
        self.files
            .get(url)
            .cloned()
            .ok_or_else(|| anyhow!("no such file: {}", url))
    }
}

/// Owned projection of the borrowed metadata, so assertions can outlive
/// the parse arena.
#[derive(Debug)]
struct Snapshot {
    is_component: bool,
    selector: Option<String>,
    template: Option<(String, Option<String>, bool)>,
    styles: Vec<(String, Option<String>, bool)>,
}

fn read_snapshot(source: &str, config: &LinterConfig, resolver: &dyn UrlResolver) -> Option<Snapshot> {
    let allocator = Allocator::default();
    let source_type = SourceType::from_path(Path::new("test.ts")).unwrap_or_default();
    let parsed = Parser::new(&allocator, source, source_type).parse();
    let reader = MetadataReader::new(config, resolver);

    for stmt in &parsed.program.body {
        let class = match stmt {
            ast::Statement::ClassDeclaration(class) => Some(&**class),
            ast::Statement::ExportNamedDeclaration(export) => match &export.declaration {
                Some(ast::Declaration::ClassDeclaration(class)) => Some(&**class),
                _ => None,
            },
            _ => None,
        };
        let Some(class) = class else { continue };
        let metadata = reader.read(class, Path::new("test.ts"))?;
        return Some(match metadata {
            Metadata::Directive(directive) => Snapshot {
                is_component: false,
                selector: directive.selector,
                template: None,
                styles: Vec::new(),
            },
            Metadata::Component(component) => Snapshot {
                is_component: true,
                selector: component.directive.selector,
                template: component.template.as_ref().map(|payload| {
                    (
                        payload.template.code.clone(),
                        payload.url.clone(),
                        payload.node.is_some(),
                    )
                }),
                styles: component
                    .styles
                    .iter()
                    .map(|payload| {
                        (
                            payload.template.code.clone(),
                            payload.url.clone(),
                            payload.node.is_some(),
                        )
                    })
                    .collect(),
            },
        });
    }
    None
}

#[test]
fn should_degrade_to_absent_fields_for_argumentless_decorator_shapes() {
    let config = LinterConfig::default();
    let resolver = FakeResolver::default();
    for source in [
        "@Component class Test {}",
        "@Component() class Test {}",
        "@Component(someVar) class Test {}",
        "@Component({}) class Test {}",
    ] {
        let snapshot = read_snapshot(source, &config, &resolver)
            .unwrap_or_else(|| panic!("no metadata for: {}", source));
        assert!(snapshot.is_component, "{}", source);
        assert!(snapshot.selector.is_none(), "{}", source);
        assert!(snapshot.template.is_none(), "{}", source);
        assert!(snapshot.styles.is_empty(), "{}", source);
    }
}

#[test]
fn should_extract_inline_template_with_node_and_no_url() {
    let config = LinterConfig::default();
    let resolver = FakeResolver::default();
    let snapshot = read_snapshot(
        "@Component({selector: 'app-a', template: 'literalText'}) class Test {}",
        &config,
        &resolver,
    )
    .unwrap();
    assert_eq!(snapshot.selector.as_deref(), Some("app-a"));
    let (code, url, has_node) = snapshot.template.unwrap();
    assert_eq!(code, "literalText");
    assert!(url.is_none());
    assert!(has_node);
}

#[test]
fn should_resolve_external_template_with_url_and_no_node() {
    let config = LinterConfig::default();
    let resolver = FakeResolver::default().with("x.html", "");
    let snapshot = read_snapshot(
        "@Component({templateUrl: 'x.html'}) class Test {}",
        &config,
        &resolver,
    )
    .unwrap();
    let (code, url, has_node) = snapshot.template.unwrap();
    assert_eq!(code, "");
    assert!(url.unwrap().ends_with("x.html"));
    assert!(!has_node);
}

#[test]
fn should_prefer_inline_template_over_template_url() {
    let config = LinterConfig::default();
    let resolver = FakeResolver::default().with("x.html", "<external></external>");
    let snapshot = read_snapshot(
        "@Component({template: '<inline></inline>', templateUrl: 'x.html'}) class Test {}",
        &config,
        &resolver,
    )
    .unwrap();
    let (code, url, _) = snapshot.template.unwrap();
    assert_eq!(code, "<inline></inline>");
    assert!(url.is_none());
}

#[test]
fn should_skip_template_entirely_for_dynamic_initializer() {
    let config = LinterConfig::default();
    let resolver = FakeResolver::default().with("x.html", "<external></external>");
    let snapshot = read_snapshot(
        "@Component({template: someVar, templateUrl: 'x.html'}) class Test {}",
        &config,
        &resolver,
    )
    .unwrap();
    // A dynamic template is never guessed at, and blocks the URL fallback.
    assert!(snapshot.template.is_none());
}

#[test]
fn should_degrade_unresolvable_template_url_to_absent() {
    let config = LinterConfig::default();
    let resolver = FakeResolver::default();
    let snapshot = read_snapshot(
        "@Component({templateUrl: 'missing.html'}) class Test {}",
        &config,
        &resolver,
    )
    .unwrap();
    assert!(snapshot.template.is_none());
}

#[test]
fn should_filter_non_literal_style_urls_preserving_order() {
    let config = LinterConfig::default();
    let resolver = FakeResolver::default()
        .with("a.css", ".a {}")
        .with("b.css", ".b {}");
    let snapshot = read_snapshot(
        "@Component({styleUrls: ['a.css', someVar, `x-${id}.css`, 'b.css']}) class Test {}",
        &config,
        &resolver,
    )
    .unwrap();
    let urls: Vec<Option<String>> = snapshot.styles.iter().map(|(_, url, _)| url.clone()).collect();
    assert_eq!(urls, vec![Some("a.css".to_string()), Some("b.css".to_string())]);
}

#[test]
fn should_not_block_sibling_style_urls_on_one_failure() {
    let config = LinterConfig::default();
    let resolver = FakeResolver::default().with("b.css", ".b {}");
    let snapshot = read_snapshot(
        "@Component({styleUrls: ['missing.css', 'b.css']}) class Test {}",
        &config,
        &resolver,
    )
    .unwrap();
    assert_eq!(snapshot.styles.len(), 1);
    assert_eq!(snapshot.styles[0].0, ".b {}");
}

#[test]
fn should_prefer_inline_styles_over_style_urls() {
    let config = LinterConfig::default();
    let resolver = FakeResolver::default().with("a.css", ".external {}");
    let snapshot = read_snapshot(
        "@Component({styles: ['.inline {}'], styleUrls: ['a.css']}) class Test {}",
        &config,
        &resolver,
    )
    .unwrap();
    assert_eq!(snapshot.styles.len(), 1);
    assert_eq!(snapshot.styles[0].0, ".inline {}");
    assert!(snapshot.styles[0].2, "inline styles carry their node");
}

#[test]
fn should_recognize_directives_with_literal_selector_only() {
    let config = LinterConfig::default();
    let resolver = FakeResolver::default();

    let literal = read_snapshot("@Directive({selector: '[appDrag]'}) class Test {}", &config, &resolver).unwrap();
    assert!(!literal.is_component);
    assert_eq!(literal.selector.as_deref(), Some("[appDrag]"));

    let dynamic = read_snapshot("@Directive({selector: SELECTOR}) class Test {}", &config, &resolver).unwrap();
    assert!(dynamic.selector.is_none());

    assert!(read_snapshot("class Test {}", &config, &resolver).is_none());
}

#[test]
fn should_accept_interpolation_free_template_literals() {
    let config = LinterConfig::default();
    let resolver = FakeResolver::default();
    let snapshot = read_snapshot(
        "@Component({template: `<div></div>`}) class Test {}",
        &config,
        &resolver,
    )
    .unwrap();
    assert_eq!(snapshot.template.unwrap().0, "<div></div>");

    let interpolated = read_snapshot(
        "@Component({template: `<div>${x}</div>`}) class Test {}",
        &config,
        &resolver,
    )
    .unwrap();
    assert!(interpolated.template.is_none());
}
