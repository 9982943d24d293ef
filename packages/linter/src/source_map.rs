//! Source map (v3) consumption.
//!
//! Fragment transform hooks (style preprocessors, template preprocessors)
//! hand back standard JSON source maps; this module decodes the base64-VLQ
//! `mappings` field lazily and answers "which pre-transform position does
//! this transformed position come from".

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

const BASE64_CHARS: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub generated_col: usize,
    /// `(source index, line, col)` in the pre-transform text, when mapped.
    pub source: Option<(usize, usize, usize)>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceMap {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(rename = "sourcesContent", default, skip_serializing_if = "Option::is_none")]
    pub sources_content: Option<Vec<Option<String>>>,
    #[serde(default)]
    pub names: Vec<String>,
    #[serde(default)]
    pub mappings: String,
    #[serde(skip)]
    decoded: OnceCell<Vec<Vec<Segment>>>,
}

fn default_version() -> u32 {
    3
}

impl SourceMap {
    pub fn new(mappings: impl Into<String>, sources: Vec<String>) -> Self {
        SourceMap {
            version: 3,
            file: None,
            sources,
            sources_content: None,
            names: Vec::new(),
            mappings: mappings.into(),
            decoded: OnceCell::new(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    fn decoded_lines(&self) -> &Vec<Vec<Segment>> {
        self.decoded.get_or_init(|| decode_mappings(&self.mappings))
    }

    /// Map a zero-based `(line, col)` in the transformed text back to the
    /// pre-transform text. Columns between mapping points resolve to the
    /// closest preceding segment, carrying the in-segment delta along.
    pub fn original_location_for(&self, line: usize, col: usize) -> Option<(usize, usize)> {
        let segments = self.decoded_lines().get(line)?;
        let mut best: Option<&Segment> = None;
        for segment in segments {
            if segment.generated_col <= col && segment.source.is_some() {
                best = Some(segment);
            }
            if segment.generated_col > col {
                break;
            }
        }
        let segment = best?;
        let (_, src_line, src_col) = segment.source?;
        Some((src_line, src_col + (col - segment.generated_col)))
    }
}

fn base64_value(ch: u8) -> Option<i64> {
    BASE64_CHARS.iter().position(|c| *c == ch).map(|v| v as i64)
}

/// Decode one comma-separated VLQ segment into its numeric fields.
fn decode_vlq_fields(segment: &str) -> Option<Vec<i64>> {
    let mut fields = Vec::new();
    let mut value: i64 = 0;
    let mut shift = 0u32;
    for byte in segment.bytes() {
        let digit = base64_value(byte)?;
        let continuation = digit & 0x20 != 0;
        value += (digit & 0x1f) << shift;
        if continuation {
            shift += 5;
        } else {
            let negative = value & 1 == 1;
            let mut decoded = value >> 1;
            if negative {
                decoded = -decoded;
            }
            fields.push(decoded);
            value = 0;
            shift = 0;
        }
    }
    Some(fields)
}

fn decode_mappings(mappings: &str) -> Vec<Vec<Segment>> {
    let mut lines = Vec::new();
    let mut src_index: i64 = 0;
    let mut src_line: i64 = 0;
    let mut src_col: i64 = 0;

    for group in mappings.split(';') {
        let mut segments = Vec::new();
        let mut generated_col: i64 = 0;
        for raw in group.split(',') {
            if raw.is_empty() {
                continue;
            }
            let Some(fields) = decode_vlq_fields(raw) else {
                continue;
            };
            if fields.is_empty() {
                continue;
            }
            generated_col += fields[0];
            let source = if fields.len() >= 4 {
                src_index += fields[1];
                src_line += fields[2];
                src_col += fields[3];
                Some((
                    src_index.max(0) as usize,
                    src_line.max(0) as usize,
                    src_col.max(0) as usize,
                ))
            } else {
                None
            };
            segments.push(Segment {
                generated_col: generated_col.max(0) as usize,
                source,
            });
        }
        lines.push(segments);
    }
    lines
}
