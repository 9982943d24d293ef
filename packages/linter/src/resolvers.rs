//! Template and style URL extraction and resolution.
//!
//! Extraction pulls `templateUrl` / `styleUrls` literals out of a decorator;
//! resolution turns a URL into file content. Resolution is pluggable so a
//! host can map module-id style URLs onto its own build layout; the default
//! reads from the filesystem relative to the host file.

use crate::ast_utils;
use anyhow::Result;
use once_cell::sync::Lazy;
use oxc_ast::ast;
use oxc_span::Span;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

static URL_WITH_SCHEMA_REGEXP: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([^:/?#]+):").unwrap());

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("url \"{0}\" cannot be resolved locally")]
    UnresolvableUrl(String),
    #[error("url \"{url}\" does not exist relative to \"{containing_file}\"")]
    NotFound { url: String, containing_file: String },
    #[error("failed reading \"{path}\": {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Relative URLs and `package:`/`asset:` URLs can be resolved locally;
/// absolute paths and foreign schemas cannot.
pub fn is_url_resolvable(url: &str) -> bool {
    if url.is_empty() || url.starts_with('/') {
        return false;
    }
    match URL_WITH_SCHEMA_REGEXP.captures(url) {
        Some(caps) => {
            let schema = caps.get(1).map(|m| m.as_str()).unwrap_or("");
            schema == "package" || schema == "asset"
        }
        None => true,
    }
}

/// The literal `templateUrl` of a decorator, when statically a string.
pub fn get_template_url(decorator: &ast::Decorator<'_>) -> Option<String> {
    ast_utils::decorator_argument(decorator)
        .and_then(|obj| ast_utils::property_initializer(obj, "templateUrl"))
        .and_then(ast_utils::string_literal_value)
}

/// The literal entries of a decorator's `styleUrls` array, in declaration
/// order. Non-literal elements are filtered out, not errors.
pub fn get_style_urls(decorator: &ast::Decorator<'_>) -> Vec<(String, Span)> {
    ast_utils::decorator_argument(decorator)
        .and_then(|obj| ast_utils::property_initializer(obj, "styleUrls"))
        .map(ast_utils::string_array_values)
        .unwrap_or_default()
}

pub trait UrlResolver {
    /// Resolve a template/style URL to its content. Failure is a soft
    /// failure for the caller: it logs and degrades the fragment to
    /// absent rather than aborting the component.
    fn resolve(&self, url: &str, containing_file: &Path) -> Result<String>;
}

/// Default resolver: reads relative to the host file's directory, with an
/// optional base path for `package:`-less module-id layouts.
#[derive(Debug, Clone, Default)]
pub struct FileSystemResolver {
    pub base_path: Option<PathBuf>,
}

impl FileSystemResolver {
    pub fn new() -> Self {
        FileSystemResolver { base_path: None }
    }

    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        FileSystemResolver {
            base_path: Some(base_path.into()),
        }
    }

    fn candidate_paths(&self, url: &str, containing_file: &Path) -> Vec<PathBuf> {
        let trimmed = url
            .strip_prefix("package:")
            .or_else(|| url.strip_prefix("asset:"))
            .unwrap_or(url);
        let mut candidates = Vec::new();
        if let Some(dir) = containing_file.parent() {
            candidates.push(dir.join(trimmed));
        }
        if let Some(base) = &self.base_path {
            candidates.push(base.join(trimmed));
        }
        candidates
    }
}

impl UrlResolver for FileSystemResolver {
    fn resolve(&self, url: &str, containing_file: &Path) -> Result<String> {
        if !is_url_resolvable(url) {
            return Err(ResolveError::UnresolvableUrl(url.to_string()).into());
        }
        let candidates = self.candidate_paths(url, containing_file);
        for candidate in &candidates {
            if candidate.is_file() {
                return fs::read_to_string(candidate).map_err(|source| {
                    ResolveError::Io {
                        path: candidate.display().to_string(),
                        source,
                    }
                    .into()
                });
            }
        }
        Err(ResolveError::NotFound {
            url: url.to_string(),
            containing_file: containing_file.display().to_string(),
        }
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolvable_urls() {
        assert!(is_url_resolvable("some.css"));
        assert!(is_url_resolvable("./some.css"));
        assert!(is_url_resolvable("package:lib/some.css"));
        assert!(is_url_resolvable("asset:lib/some.css"));
    }

    #[test]
    fn test_unresolvable_urls() {
        assert!(!is_url_resolvable(""));
        assert!(!is_url_resolvable("/abs.css"));
        assert!(!is_url_resolvable("http://cdn/some.css"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let resolver = FileSystemResolver::new();
        let result = resolver.resolve("missing.html", Path::new("/nonexistent/cmp.ts"));
        assert!(result.is_err());
    }
}
