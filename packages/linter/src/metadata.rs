//! Decorator metadata reader.
//!
//! Recognizes `@Component` / `@Directive` classes and extracts their
//! normalized configuration: the selector, and for components the template
//! and style payloads (inline text or externally resolved content, each
//! run through the configured transform hook).
//!
//! Failure semantics: nothing at this layer throws past `read`. Wrong
//! shapes degrade to absent fields; a failed URL resolution logs at info
//! level and degrades that one fragment, leaving the component and its
//! sibling fragments intact.

use crate::ast_utils;
use crate::config::{HookContext, LinterConfig};
use crate::resolvers::{self, UrlResolver};
use crate::source_map::SourceMap;
use oxc_ast::ast;
use std::path::Path;
use tracing::info;

/// A fragment's code in its parse-ready form, together with the original
/// text and the transform map when a preprocessor ran. When no transform
/// ran, `source == code` and `map` is absent, so downstream position
/// mapping always has the same two-field view.
#[derive(Debug, Clone)]
pub struct CodeWithSourceMap {
    pub code: String,
    pub source: String,
    pub map: Option<SourceMap>,
}

impl CodeWithSourceMap {
    pub fn plain(code: impl Into<String>) -> Self {
        let code = code.into();
        CodeWithSourceMap {
            source: code.clone(),
            code,
            map: None,
        }
    }

    pub fn transformed(code: impl Into<String>, source: impl Into<String>, map: Option<SourceMap>) -> Self {
        let code = code.into();
        let source = source.into();
        match map {
            Some(map) => CodeWithSourceMap {
                code,
                source,
                map: Some(map),
            },
            // Normalization step: no map means no transform worth tracking.
            None => CodeWithSourceMap {
                source: code.clone(),
                code,
                map: None,
            },
        }
    }
}

/// A template or style fragment attached to a component. Exactly one of
/// `url` / `node` is present: inline fragments carry their initializer
/// node for position mapping, external fragments carry the resolved URL.
#[derive(Debug, Clone)]
pub struct FragmentPayload<'a> {
    pub template: CodeWithSourceMap,
    pub url: Option<String>,
    pub node: Option<&'a ast::Expression<'a>>,
}

#[derive(Debug, Clone)]
pub struct DirectiveMetadata<'a> {
    pub controller: &'a ast::Class<'a>,
    pub decorator: &'a ast::Decorator<'a>,
    pub selector: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ComponentMetadata<'a> {
    pub directive: DirectiveMetadata<'a>,
    pub template: Option<FragmentPayload<'a>>,
    pub styles: Vec<FragmentPayload<'a>>,
}

#[derive(Debug, Clone)]
pub enum Metadata<'a> {
    Directive(DirectiveMetadata<'a>),
    Component(ComponentMetadata<'a>),
}

impl<'a> Metadata<'a> {
    pub fn directive(&self) -> &DirectiveMetadata<'a> {
        match self {
            Metadata::Directive(directive) => directive,
            Metadata::Component(component) => &component.directive,
        }
    }
}

/// A decorator counts whether invoked (`@Component({...})`, matched by
/// callee identifier) or bare (`@Component`); the argument shape only
/// decides how much metadata survives.
fn matches_decorator(decorator: &ast::Decorator<'_>, name: &str) -> bool {
    if ast_utils::call_expression(decorator)
        .and_then(|call| ast_utils::with_identifier(call, name))
        .is_some()
    {
        return true;
    }
    matches!(&decorator.expression, ast::Expression::Identifier(ident) if ident.name == name)
}

pub struct MetadataReader<'c> {
    config: &'c LinterConfig,
    resolver: &'c dyn UrlResolver,
}

impl<'c> MetadataReader<'c> {
    pub fn new(config: &'c LinterConfig, resolver: &'c dyn UrlResolver) -> Self {
        MetadataReader { config, resolver }
    }

    /// Recognize a class declaration. `@Component` wins over `@Directive`
    /// when both are present; a class with neither yields `None`.
    pub fn read<'a>(&self, class: &'a ast::Class<'a>, source_path: &Path) -> Option<Metadata<'a>> {
        for decorator in &class.decorators {
            if matches_decorator(decorator, "Component") {
                return Some(Metadata::Component(self.read_component(class, decorator, source_path)));
            }
            if matches_decorator(decorator, "Directive") {
                return Some(Metadata::Directive(self.read_directive(class, decorator)));
            }
        }
        None
    }

    fn read_directive<'a>(
        &self,
        class: &'a ast::Class<'a>,
        decorator: &'a ast::Decorator<'a>,
    ) -> DirectiveMetadata<'a> {
        let selector = ast_utils::decorator_argument(decorator)
            .and_then(|obj| ast_utils::property_initializer(obj, "selector"))
            .and_then(ast_utils::string_literal_value);
        DirectiveMetadata {
            controller: class,
            decorator,
            selector,
        }
    }

    fn read_component<'a>(
        &self,
        class: &'a ast::Class<'a>,
        decorator: &'a ast::Decorator<'a>,
        source_path: &Path,
    ) -> ComponentMetadata<'a> {
        let directive = self.read_directive(class, decorator);
        let class_name = ast_utils::class_name(class).unwrap_or_default();
        let template = self.read_template(decorator, source_path, &class_name);
        let styles = self.read_styles(decorator, source_path, &class_name);
        ComponentMetadata {
            directive,
            template,
            styles,
        }
    }

    /// Inline `template` always wins over `templateUrl`; the external path
    /// is tried only when no usable inline literal exists.
    fn read_template<'a>(
        &self,
        decorator: &'a ast::Decorator<'a>,
        source_path: &Path,
        class_name: &str,
    ) -> Option<FragmentPayload<'a>> {
        let argument = ast_utils::decorator_argument(decorator);

        if let Some(node) = argument.and_then(|obj| ast_utils::property_initializer(obj, "template")) {
            // A dynamic `template:` initializer is never guessed at, and
            // deliberately blocks the `templateUrl` fallback too.
            let code = ast_utils::string_literal_value(node)?;
            let ctx = HookContext {
                url: None,
                class_name,
            };
            let transformed = self.config.run_template_transform(&code, &ctx);
            return Some(FragmentPayload {
                template: CodeWithSourceMap::transformed(transformed.code, code, transformed.map),
                url: None,
                node: Some(node),
            });
        }

        let url = resolvers::get_template_url(decorator)?;
        let ctx = HookContext {
            url: Some(&url),
            class_name,
        };
        let resolved_url = self.config.rewrite_url(&url, &ctx);
        match self.resolver.resolve(&resolved_url, source_path) {
            Ok(code) => {
                let ctx = HookContext {
                    url: Some(&resolved_url),
                    class_name,
                };
                let transformed = self.config.run_template_transform(&code, &ctx);
                Some(FragmentPayload {
                    template: CodeWithSourceMap::transformed(transformed.code, code, transformed.map),
                    url: Some(resolved_url),
                    node: None,
                })
            }
            Err(error) => {
                info!(
                    class = class_name,
                    url = resolved_url.as_str(),
                    "skipping unresolvable template: {}",
                    error
                );
                None
            }
        }
    }

    /// Inline `styles` wins over `styleUrls`. Each external URL resolves
    /// independently; a failure drops that entry only, preserving the
    /// declaration order of the survivors.
    fn read_styles<'a>(
        &self,
        decorator: &'a ast::Decorator<'a>,
        source_path: &Path,
        class_name: &str,
    ) -> Vec<FragmentPayload<'a>> {
        let argument = ast_utils::decorator_argument(decorator);

        if let Some(ast::Expression::ArrayExpression(array)) =
            argument.and_then(|obj| ast_utils::property_initializer(obj, "styles"))
        {
            let mut styles = Vec::new();
            for element in &array.elements {
                let Some(node) = element.as_expression() else {
                    continue;
                };
                let Some(code) = ast_utils::string_literal_value(node) else {
                    continue;
                };
                let ctx = HookContext {
                    url: None,
                    class_name,
                };
                let transformed = self.config.run_style_transform(&code, &ctx);
                styles.push(FragmentPayload {
                    template: CodeWithSourceMap::transformed(transformed.code, code, transformed.map),
                    url: None,
                    node: Some(node),
                });
            }
            if !styles.is_empty() {
                return styles;
            }
        }

        let mut styles = Vec::new();
        for (url, _span) in resolvers::get_style_urls(decorator) {
            let ctx = HookContext {
                url: Some(&url),
                class_name,
            };
            let resolved_url = self.config.rewrite_url(&url, &ctx);
            match self.resolver.resolve(&resolved_url, source_path) {
                Ok(code) => {
                    let ctx = HookContext {
                        url: Some(&resolved_url),
                        class_name,
                    };
                    let transformed = self.config.run_style_transform(&code, &ctx);
                    styles.push(FragmentPayload {
                        template: CodeWithSourceMap::transformed(transformed.code, code, transformed.map),
                        url: Some(resolved_url),
                        node: None,
                    });
                }
                Err(error) => {
                    info!(
                        class = class_name,
                        url = resolved_url.as_str(),
                        "skipping unresolvable style: {}",
                        error
                    );
                }
            }
        }
        styles
    }
}
