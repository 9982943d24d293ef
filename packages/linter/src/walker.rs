//! The walker: drives a host-file AST, recognizes framework declarations,
//! parses their template/style fragments and dispatches the pluggable
//! visitors, aggregating every failure in host-file coordinates.
//!
//! Malformed framework metadata never aborts a walk. Unresolvable external
//! fragments were already degraded by the metadata reader; fragments that
//! fail to parse are logged and skipped, siblings and the rest of the file
//! still run.

use crate::ast_utils;
use crate::config::LinterConfig;
use crate::failures::Failure;
use crate::metadata::{ComponentMetadata, DirectiveMetadata, FragmentPayload, Metadata, MetadataReader};
use crate::reference_collector::collect_template_locals;
use crate::reflection::TypeScriptReflectionHost;
use crate::resolvers::UrlResolver;
use crate::source_mapping::FragmentSource;
use crate::visitors::{ComponentContext, WalkerVisitors};
use angular_template::css_parser::parse_stylesheet;
use angular_template::template_transform::{parse_template, TemplateParseOptions};
use oxc_allocator::Allocator;
use oxc_ast::ast;
use oxc_parser::Parser as OxcParser;
use oxc_span::{GetSpan, SourceType};
use std::path::{Path, PathBuf};
use tracing::error;

/// Closed classification of the decorators the walker dispatches on,
/// produced by [`classify_decorator`] and matched exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecognizedDecorator {
    Component,
    Directive,
    Pipe,
    Injectable,
    Input,
    Output,
    HostBinding,
    HostListener,
    ViewChild,
    ContentChild,
    Unrecognized,
}

pub fn classify_decorator(decorator: &ast::Decorator<'_>) -> RecognizedDecorator {
    match ast_utils::decorator_name(decorator) {
        Some("Component") => RecognizedDecorator::Component,
        Some("Directive") => RecognizedDecorator::Directive,
        Some("Pipe") => RecognizedDecorator::Pipe,
        Some("Injectable") => RecognizedDecorator::Injectable,
        Some("Input") => RecognizedDecorator::Input,
        Some("Output") => RecognizedDecorator::Output,
        Some("HostBinding") => RecognizedDecorator::HostBinding,
        Some("HostListener") => RecognizedDecorator::HostListener,
        Some("ViewChild") | Some("ViewChildren") => RecognizedDecorator::ViewChild,
        Some("ContentChild") | Some("ContentChildren") => RecognizedDecorator::ContentChild,
        _ => RecognizedDecorator::Unrecognized,
    }
}

/// Per-walk callbacks for rule logic. Every method defaults to a no-op;
/// rules implement the ones they care about and push onto `failures`.
#[allow(unused_variables)]
pub trait NgHooks {
    fn visit_ng_component(&mut self, metadata: &ComponentMetadata<'_>, failures: &mut Vec<Failure>) {}
    fn visit_ng_directive(&mut self, metadata: &DirectiveMetadata<'_>, failures: &mut Vec<Failure>) {}
    fn visit_ng_pipe(
        &mut self,
        class: &ast::Class<'_>,
        decorator: &ast::Decorator<'_>,
        failures: &mut Vec<Failure>,
    ) {
    }
    fn visit_ng_injectable(
        &mut self,
        class: &ast::Class<'_>,
        decorator: &ast::Decorator<'_>,
        failures: &mut Vec<Failure>,
    ) {
    }
    /// Called for every class-level decorator, recognized or not.
    fn visit_class_decorator(
        &mut self,
        class: &ast::Class<'_>,
        decorator: &ast::Decorator<'_>,
        failures: &mut Vec<Failure>,
    ) {
    }
    fn visit_ng_input(&mut self, property: &str, args: &[String], failures: &mut Vec<Failure>) {}
    fn visit_ng_output(&mut self, property: &str, args: &[String], failures: &mut Vec<Failure>) {}
    fn visit_ng_host_binding(&mut self, property: &str, args: &[String], failures: &mut Vec<Failure>) {}
    fn visit_ng_host_listener(&mut self, method: &str, args: &[String], failures: &mut Vec<Failure>) {}
    fn visit_ng_view_child(&mut self, property: &str, args: &[String], failures: &mut Vec<Failure>) {}
    fn visit_ng_content_child(&mut self, property: &str, args: &[String], failures: &mut Vec<Failure>) {}
}

#[derive(Debug, Default)]
pub struct DefaultNgHooks;

impl NgHooks for DefaultNgHooks {}

pub struct NgWalker<'c, H: NgHooks = DefaultNgHooks> {
    config: &'c LinterConfig,
    resolver: &'c dyn UrlResolver,
    visitors: &'c WalkerVisitors,
    hooks: H,
    source_path: PathBuf,
    failures: Vec<Failure>,
}

impl<'c, H: NgHooks> NgWalker<'c, H> {
    pub fn new(
        config: &'c LinterConfig,
        resolver: &'c dyn UrlResolver,
        visitors: &'c WalkerVisitors,
        hooks: H,
        source_path: &Path,
    ) -> Self {
        NgWalker {
            config,
            resolver,
            visitors,
            hooks,
            source_path: source_path.to_path_buf(),
            failures: Vec::new(),
        }
    }

    pub fn walk(&mut self, program: &ast::Program<'_>) {
        for stmt in &program.body {
            match stmt {
                ast::Statement::ClassDeclaration(class) => self.visit_class(class),
                ast::Statement::ExportNamedDeclaration(export) => {
                    if let Some(ast::Declaration::ClassDeclaration(class)) = &export.declaration {
                        self.visit_class(class);
                    }
                }
                ast::Statement::ExportDefaultDeclaration(export) => {
                    if let ast::ExportDefaultDeclarationKind::ClassDeclaration(class) = &export.declaration {
                        self.visit_class(class);
                    }
                }
                _ => {}
            }
        }
    }

    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    pub fn into_failures(self) -> Vec<Failure> {
        self.failures
    }

    fn visit_class(&mut self, class: &ast::Class<'_>) {
        let reader = MetadataReader::new(self.config, self.resolver);
        match reader.read(class, &self.source_path) {
            Some(Metadata::Component(metadata)) => {
                self.hooks.visit_ng_component(&metadata, &mut self.failures);
                self.visit_ng_component(&metadata);
            }
            Some(Metadata::Directive(metadata)) => {
                self.hooks.visit_ng_directive(&metadata, &mut self.failures);
            }
            None => {}
        }

        for decorator in &class.decorators {
            match classify_decorator(decorator) {
                RecognizedDecorator::Pipe => {
                    self.hooks.visit_ng_pipe(class, decorator, &mut self.failures);
                }
                RecognizedDecorator::Injectable => {
                    self.hooks.visit_ng_injectable(class, decorator, &mut self.failures);
                }
                _ => {}
            }
            self.hooks.visit_class_decorator(class, decorator, &mut self.failures);
        }

        self.visit_members(class);
    }

    fn visit_members(&mut self, class: &ast::Class<'_>) {
        for element in &class.body.body {
            let (name, decorators) = match element {
                ast::ClassElement::MethodDefinition(method) => {
                    (ast_utils::property_key_name(&method.key), &method.decorators)
                }
                ast::ClassElement::PropertyDefinition(property) => {
                    (ast_utils::property_key_name(&property.key), &property.decorators)
                }
                _ => continue,
            };
            let Some(name) = name else { continue };
            for decorator in decorators {
                let args = ast_utils::decorator_string_args(decorator);
                match classify_decorator(decorator) {
                    RecognizedDecorator::Input => {
                        self.hooks.visit_ng_input(name, &args, &mut self.failures);
                    }
                    RecognizedDecorator::Output => {
                        self.hooks.visit_ng_output(name, &args, &mut self.failures);
                    }
                    RecognizedDecorator::HostBinding => {
                        self.hooks.visit_ng_host_binding(name, &args, &mut self.failures);
                    }
                    RecognizedDecorator::HostListener => {
                        self.hooks.visit_ng_host_listener(name, &args, &mut self.failures);
                    }
                    RecognizedDecorator::ViewChild => {
                        self.hooks.visit_ng_view_child(name, &args, &mut self.failures);
                    }
                    RecognizedDecorator::ContentChild => {
                        self.hooks.visit_ng_content_child(name, &args, &mut self.failures);
                    }
                    _ => {}
                }
            }
        }
    }

    fn visit_ng_component(&mut self, metadata: &ComponentMetadata<'_>) {
        let class = metadata.directive.controller;
        // The name node itself may be malformed; report something usable.
        let class_name = ast_utils::class_name(class).unwrap_or_else(|| "<anonymous>".to_string());
        let host = TypeScriptReflectionHost::new();
        let members = host.declared_members(class);

        if let Some(payload) = &metadata.template {
            self.visit_component_template(payload, &class_name, &members);
        }

        for payload in &metadata.styles {
            self.visit_component_style(payload, &class_name, &members);
        }
    }

    fn fragment_source(&self, payload: &FragmentPayload<'_>) -> FragmentSource {
        match (&payload.node, &payload.url) {
            (Some(node), _) => FragmentSource::inline(
                payload.template.clone(),
                Some(node.span().start as usize),
                &self.source_path.to_string_lossy(),
            ),
            (None, Some(url)) => FragmentSource::external(payload.template.clone(), url),
            // No node and no URL: nothing better than position 0.
            (None, None) => FragmentSource::inline(
                payload.template.clone(),
                None,
                &self.source_path.to_string_lossy(),
            ),
        }
    }

    fn visit_component_template(
        &mut self,
        payload: &FragmentPayload<'_>,
        class_name: &str,
        members: &crate::reflection::DeclaredMembers,
    ) {
        let fragment = self.fragment_source(payload);
        let options = TemplateParseOptions {
            interpolation: self.config.interpolation.clone(),
            predefined_directives: self.config.predefined_directives.clone(),
        };
        let parsed = parse_template(&payload.template.code, &fragment.file.url, &options);
        if parsed.has_fatal_errors() {
            let detail = parsed
                .errors
                .iter()
                .map(|e| e.msg.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            error!(class = class_name, "failed to parse component template: {}", detail);
            return;
        }

        let ctx = ComponentContext {
            class_name: class_name.to_string(),
            members: members.clone(),
            locals: collect_template_locals(&parsed.nodes),
        };
        let failures = self.visitors.template.visit_template(
            &parsed.nodes,
            &ctx,
            &fragment,
            self.visitors.expression.as_ref(),
        );
        self.failures.extend(failures);
    }

    fn visit_component_style(
        &mut self,
        payload: &FragmentPayload<'_>,
        class_name: &str,
        members: &crate::reflection::DeclaredMembers,
    ) {
        let fragment = self.fragment_source(payload);
        let parsed = parse_stylesheet(&payload.template.code, &fragment.file.url);
        if !parsed.errors.is_empty() {
            let detail = parsed
                .errors
                .iter()
                .map(|e| e.msg.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            error!(class = class_name, "failed to parse component style: {}", detail);
            return;
        }

        let ctx = ComponentContext {
            class_name: class_name.to_string(),
            members: members.clone(),
            locals: Default::default(),
        };
        let failures = self
            .visitors
            .style
            .visit_stylesheet(&parsed.stylesheet, &ctx, &fragment);
        self.failures.extend(failures);
    }
}

/// Parse a host file and run one full walk over it.
pub fn lint_source<H: NgHooks>(
    source: &str,
    path: &Path,
    config: &LinterConfig,
    resolver: &dyn UrlResolver,
    visitors: &WalkerVisitors,
    hooks: H,
) -> Vec<Failure> {
    let allocator = Allocator::default();
    let source_type = SourceType::from_path(path).unwrap_or_default();
    let parsed = OxcParser::new(&allocator, source, source_type).parse();
    let mut walker = NgWalker::new(config, resolver, visitors, hooks, path);
    walker.walk(&parsed.program);
    walker.into_failures()
}
