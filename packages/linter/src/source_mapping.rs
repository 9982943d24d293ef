//! Fragment-to-host position translation.
//!
//! Template and style diagnostics are produced against the fragment's own
//! coordinates; this module carries them back into the host file. Without
//! a transform the mapping is pure addition of the base offset. With a
//! transform it goes transformed-offset -> (line, col) -> source map ->
//! pre-transform (line, col) -> pre-transform offset -> plus base. Steps
//! compose, so nested transforms are resolved by repeated lookup rather
//! than by consulting only the outermost map.

use crate::failures::{Failure, Replacement};
use crate::metadata::CodeWithSourceMap;
use crate::source_map::SourceMap;
use angular_template::parse_util::{line_col_at, offset_at, ParseSourceFile};
use std::sync::Arc;

#[derive(Debug)]
enum TranslationStep {
    /// The fragment text begins at this offset inside the enclosing text.
    Linear(usize),
    /// The fragment went through a transforming preprocessor.
    Mapped {
        transformed: String,
        source: String,
        map: SourceMap,
    },
}

impl TranslationStep {
    fn translate(&self, offset: usize) -> usize {
        match self {
            TranslationStep::Linear(base) => base + offset,
            TranslationStep::Mapped {
                transformed,
                source,
                map,
            } => {
                let (line, col) = line_col_at(transformed, offset);
                match map.original_location_for(line, col) {
                    Some((src_line, src_col)) => offset_at(source, src_line, src_col),
                    // An unmapped position passes through untouched.
                    None => offset,
                }
            }
        }
    }
}

/// `translate(offset) -> offset`, composed left to right with `then`.
/// Composition is associative: grouping of `then` calls never changes the
/// resulting translation.
#[derive(Debug, Default)]
pub struct PositionTranslator {
    steps: Vec<TranslationStep>,
}

impl PositionTranslator {
    pub fn identity() -> Self {
        PositionTranslator { steps: Vec::new() }
    }

    pub fn linear(base_offset: usize) -> Self {
        PositionTranslator {
            steps: vec![TranslationStep::Linear(base_offset)],
        }
    }

    pub fn mapped(transformed: impl Into<String>, source: impl Into<String>, map: SourceMap) -> Self {
        PositionTranslator {
            steps: vec![TranslationStep::Mapped {
                transformed: transformed.into(),
                source: source.into(),
                map,
            }],
        }
    }

    /// Map-then-add for one fragment payload.
    pub fn for_fragment(code: &CodeWithSourceMap, base_offset: usize) -> Self {
        let inner = match &code.map {
            Some(map) => PositionTranslator::mapped(code.code.clone(), code.source.clone(), map.clone()),
            None => PositionTranslator::identity(),
        };
        inner.then(PositionTranslator::linear(base_offset))
    }

    pub fn then(mut self, mut next: PositionTranslator) -> Self {
        self.steps.append(&mut next.steps);
        self
    }

    pub fn translate(&self, offset: usize) -> usize {
        self.steps.iter().fold(offset, |acc, step| step.translate(acc))
    }
}

/// Where a fragment's text lives, for both parsing and failure reporting.
#[derive(Debug)]
pub struct FragmentSource {
    /// A throwaway document holding just the fragment code, giving the
    /// nested parsers a standalone coordinate system.
    pub file: Arc<ParseSourceFile>,
    /// Offset of the fragment text inside the host file; 0 for external
    /// fragments, which live in their own file.
    pub base_offset: usize,
    pub code: CodeWithSourceMap,
}

impl FragmentSource {
    /// An inline fragment embedded in the host file. `node_start` is the
    /// initializer's offset; the fragment text begins one past it, inside
    /// the quotes.
    pub fn inline(code: CodeWithSourceMap, node_start: Option<usize>, host_url: &str) -> Self {
        let base_offset = node_start.map(|start| start + 1).unwrap_or(0);
        FragmentSource {
            file: ParseSourceFile::new(code.code.clone(), host_url),
            base_offset,
            code,
        }
    }

    /// An external fragment: diagnostics use the resolved URL's own
    /// coordinate space.
    pub fn external(code: CodeWithSourceMap, url: &str) -> Self {
        FragmentSource {
            file: ParseSourceFile::new(code.code.clone(), url),
            base_offset: 0,
            code,
        }
    }

    pub fn translator(&self) -> PositionTranslator {
        PositionTranslator::for_fragment(&self.code, self.base_offset)
    }
}

/// Base for diagnostic-reporting visitors over fragment ASTs: concrete
/// visitors supply fragment-relative spans, this layer converts them to
/// host-file offsets before recording the failure.
#[derive(Debug)]
pub struct SourceMappingVisitor {
    translator: PositionTranslator,
    failures: Vec<Failure>,
}

impl SourceMappingVisitor {
    pub fn new(source: &FragmentSource) -> Self {
        SourceMappingVisitor {
            translator: source.translator(),
            failures: Vec::new(),
        }
    }

    pub fn absolute_span(&self, start: usize, width: usize) -> (usize, usize) {
        let mapped_start = self.translator.translate(start);
        let mapped_end = self.translator.translate(start + width);
        if mapped_end > mapped_start {
            (mapped_start, mapped_end)
        } else {
            (mapped_start, mapped_start + width)
        }
    }

    pub fn add_failure(&mut self, start: usize, width: usize, message: impl Into<String>) {
        let (start, end) = self.absolute_span(start, width);
        self.failures.push(Failure::new(start, end, message));
    }

    pub fn add_failure_with_fix(
        &mut self,
        start: usize,
        width: usize,
        message: impl Into<String>,
        replacement_text: impl Into<String>,
    ) {
        let (start, end) = self.absolute_span(start, width);
        let fix = Replacement {
            start,
            end,
            text: replacement_text.into(),
        };
        self.failures.push(Failure::new(start, end, message).with_fix(fix));
    }

    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    pub fn into_failures(self) -> Vec<Failure> {
        self.failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_translation_is_pure_addition() {
        let translator = PositionTranslator::linear(42);
        assert_eq!(translator.translate(0), 42);
        assert_eq!(translator.translate(7), 49);
    }

    #[test]
    fn test_composition_is_associative() {
        let a = || PositionTranslator::linear(3);
        let b = || PositionTranslator::linear(5);
        let c = || PositionTranslator::linear(11);
        let left = a().then(b()).then(c());
        let right = a().then(b().then(c()));
        for offset in [0, 1, 100] {
            assert_eq!(left.translate(offset), right.translate(offset));
            assert_eq!(left.translate(offset), offset + 19);
        }
    }

    #[test]
    fn test_mapped_translation_consults_the_map() {
        // Transformed text lost the first line of the source; every
        // transformed line 0 position maps to source line 1.
        let source = "// banner\n.a { color: red; }";
        let transformed = ".a { color: red; }";
        let map = SourceMap::new("AACA", vec!["style.scss".to_string()]);
        let translator = PositionTranslator::mapped(transformed, source, map);
        let x = transformed.find("color").unwrap();
        let y = source.find("color").unwrap();
        assert_eq!(translator.translate(x), y);
    }

    #[test]
    fn test_fragment_translator_adds_base_after_mapping() {
        let source = "// banner\n.a { color: red; }";
        let transformed = ".a { color: red; }";
        let map = SourceMap::new("AACA", vec!["style.scss".to_string()]);
        let code = CodeWithSourceMap::transformed(transformed, source, Some(map));
        let translator = PositionTranslator::for_fragment(&code, 100);
        let x = transformed.find("color").unwrap();
        let y = source.find("color").unwrap();
        assert_eq!(translator.translate(x), 100 + y);
    }

    #[test]
    fn test_nested_maps_resolve_transitively() {
        // Two stacked transforms, each dropping one leading line.
        let original = "l0\nl1\nx";
        let once = "l1\nx";
        let twice = "x";
        let inner = PositionTranslator::mapped(once, original, SourceMap::new("AACA;AACA", vec![]));
        let outer = PositionTranslator::mapped(twice, once, SourceMap::new("AACA", vec![]));
        let composed = outer.then(inner);
        assert_eq!(composed.translate(0), original.find('x').unwrap());
    }
}
