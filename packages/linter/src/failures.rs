//! Lint failures.
//!
//! Positions are always expressed in original-host-file byte offsets by the
//! time a failure leaves the source-mapping layer, no matter how many
//! nested fragment transforms sat in between.

use serde::{Deserialize, Serialize};

/// A suggested text edit accompanying a failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replacement {
    pub start: usize,
    pub end: usize,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Failure {
    pub start_offset: usize,
    pub end_offset: usize,
    pub message: String,
    pub fix: Option<Replacement>,
}

impl Failure {
    pub fn new(start_offset: usize, end_offset: usize, message: impl Into<String>) -> Self {
        Failure {
            start_offset,
            end_offset,
            message: message.into(),
            fix: None,
        }
    }

    pub fn with_fix(mut self, fix: Replacement) -> Self {
        self.fix = Some(fix);
        self
    }

    pub fn width(&self) -> usize {
        self.end_offset - self.start_offset
    }
}
