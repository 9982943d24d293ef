#![deny(clippy::all)]

//! Fragment grammars for Angular component analysis: the template markup
//! parser with its binding transform, the template expression parser, and
//! a tolerant CSS/SCSS parser, plus the shared source-location types.

pub mod chars;
pub mod css_parser;
pub mod expression_parser;
pub mod interpolation;
pub mod ml_parser;
pub mod parse_util;
pub mod template_ast;
pub mod template_transform;

pub use interpolation::InterpolationConfig;
pub use parse_util::{ParseError, ParseErrorLevel, ParseLocation, ParseSourceFile, ParseSourceSpan};
pub use template_transform::{parse_template, DirectiveDeclaration, ParsedTemplate, TemplateParseOptions};
