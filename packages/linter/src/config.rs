//! Linter configuration.
//!
//! A plain value threaded through reader and walker construction. Tests
//! and hosts build a fresh config per call instead of mutating shared
//! state; nothing here is global.

use crate::source_map::SourceMap;
use angular_template::{DirectiveDeclaration, InterpolationConfig};
use std::fmt;

/// Result of a fragment transform hook (template preprocessor, style
/// preprocessor): the transformed code and an optional map back to the
/// pre-transform text.
#[derive(Debug, Clone)]
pub struct TransformResult {
    pub code: String,
    pub map: Option<SourceMap>,
}

impl TransformResult {
    pub fn plain(code: impl Into<String>) -> Self {
        TransformResult {
            code: code.into(),
            map: None,
        }
    }
}

/// Context handed to the URL-resolution and transform hooks.
#[derive(Debug, Clone, Copy)]
pub struct HookContext<'a> {
    /// Resolved URL of the fragment, `None` for inline fragments.
    pub url: Option<&'a str>,
    /// Name of the class carrying the decorator, when known.
    pub class_name: &'a str,
}

pub type UrlHook = Box<dyn Fn(&str, &HookContext<'_>) -> String>;
pub type TransformHook = Box<dyn Fn(&str, &HookContext<'_>) -> TransformResult>;

pub struct LinterConfig {
    /// Interpolation delimiters used by the template parser.
    pub interpolation: InterpolationConfig,
    /// Rewrites template/style URLs before resolution (build-system mapping).
    pub resolve_url: Option<UrlHook>,
    /// Transforms template code between extraction and parsing.
    pub transform_template: Option<TransformHook>,
    /// Transforms style code between extraction and parsing.
    pub transform_style: Option<TransformHook>,
    /// Directives whose `exportAs` names resolve without declarations.
    pub predefined_directives: Vec<DirectiveDeclaration>,
}

impl Default for LinterConfig {
    fn default() -> Self {
        LinterConfig {
            interpolation: InterpolationConfig::default(),
            resolve_url: None,
            transform_template: None,
            transform_style: None,
            predefined_directives: default_predefined_directives(),
        }
    }
}

impl fmt::Debug for LinterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinterConfig")
            .field("interpolation", &self.interpolation)
            .field("resolve_url", &self.resolve_url.is_some())
            .field("transform_template", &self.transform_template.is_some())
            .field("transform_style", &self.transform_style.is_some())
            .field("predefined_directives", &self.predefined_directives)
            .finish()
    }
}

impl LinterConfig {
    pub fn rewrite_url(&self, url: &str, ctx: &HookContext<'_>) -> String {
        match &self.resolve_url {
            Some(hook) => hook(url, ctx),
            None => url.to_string(),
        }
    }

    pub fn run_template_transform(&self, code: &str, ctx: &HookContext<'_>) -> TransformResult {
        match &self.transform_template {
            Some(hook) => hook(code, ctx),
            None => TransformResult::plain(code),
        }
    }

    pub fn run_style_transform(&self, code: &str, ctx: &HookContext<'_>) -> TransformResult {
        match &self.transform_style {
            Some(hook) => hook(code, ctx),
            None => TransformResult::plain(code),
        }
    }
}

/// Framework and common third-party directives whose `exportAs` names are
/// known statically.
pub fn default_predefined_directives() -> Vec<DirectiveDeclaration> {
    vec![
        DirectiveDeclaration::new("form:not([ngNoForm]):not([formGroup]),ng-form,[ngForm]", Some("ngForm")),
        DirectiveDeclaration::new("[ngModel]:not([formControlName]):not([formControl])", Some("ngModel")),
        DirectiveDeclaration::new("[ngModelGroup]", Some("ngModelGroup")),
        DirectiveDeclaration::new("[routerLinkActive]", Some("routerLinkActive")),
        DirectiveDeclaration::new("mat-menu", Some("matMenu")),
        DirectiveDeclaration::new("mat-autocomplete", Some("matAutocomplete")),
        DirectiveDeclaration::new("[matTooltip]", Some("matTooltip")),
        DirectiveDeclaration::new("md-menu", Some("mdMenu")),
        DirectiveDeclaration::new("md-autocomplete", Some("mdAutocomplete")),
        DirectiveDeclaration::new("[mdTooltip]", Some("mdTooltip")),
        DirectiveDeclaration::new("cdk-virtual-scroll-viewport", Some("cdkVirtualScrollViewport")),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_has_predefined_directives() {
        let config = LinterConfig::default();
        assert!(config
            .predefined_directives
            .iter()
            .any(|d| d.export_as.as_deref() == Some("ngForm")));
        assert_eq!(config.interpolation.start, "{{");
    }

    #[test]
    fn test_hooks_default_to_identity() {
        let config = LinterConfig::default();
        let ctx = HookContext { url: None, class_name: "Test" };
        assert_eq!(config.rewrite_url("a.html", &ctx), "a.html");
        let transformed = config.run_template_transform("{{ x }}", &ctx);
        assert_eq!(transformed.code, "{{ x }}");
        assert!(transformed.map.is_none());
    }
}
