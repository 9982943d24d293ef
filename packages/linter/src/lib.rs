#![deny(clippy::all)]

//! Static-analysis core for Angular component metadata: decorator
//! recognition and extraction over an oxc TypeScript AST, template/style
//! fragment parsing with position remapping back into the host file, and
//! symbol resolution of template expressions against the host class.

pub use angular_template as template;

pub mod ast_utils;
pub mod config;
pub mod expression_symbols;
pub mod failures;
pub mod metadata;
pub mod reference_collector;
pub mod reflection;
pub mod resolvers;
pub mod rules;
pub mod source_map;
pub mod source_mapping;
pub mod string_distance;
pub mod visitors;
pub mod walker;

pub use config::LinterConfig;
pub use failures::{Failure, Replacement};
pub use metadata::{ComponentMetadata, DirectiveMetadata, Metadata, MetadataReader};
pub use source_mapping::{FragmentSource, PositionTranslator, SourceMappingVisitor};
pub use visitors::WalkerVisitors;
pub use walker::{lint_source, NgHooks, NgWalker, RecognizedDecorator};
