//! The anchor scanner.
//!
//! Walks a document once. A line containing the anchor is replaced by the
//! replacement block and starts a skip; lines are then dropped until one
//! containing the closing delimiter has been dropped too:
//!
//! ```text
//! Scanning --anchor--> SkippingBlock --delimiter--> Scanning
//! ```
//!
//! The anchor check runs first in every state, so an anchor inside a block
//! being skipped emits another replacement.

use crate::document::SourceDocument;
use crate::error::Result;
use crate::spec::PatchSpec;
use serde::Serialize;

/// Scanner state between lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Scanning,
    /// Dropping lines after the anchor found on `opened_at` (1-based).
    SkippingBlock { opened_at: usize },
}

/// What happens to a single input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineAction {
    Keep,
    Replace,
    Drop,
}

/// Whether a run found anything to patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PatchOutcome {
    Patched { occurrences: usize },
    AnchorNotFound,
}

/// Summary of one pass over a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PatchReport {
    /// 1-based line numbers of every anchor match.
    pub anchor_lines: Vec<usize>,
    /// Lines dropped while skipping, delimiter lines included.
    pub dropped_lines: usize,
    /// Anchor line whose block was still open at end of input.
    pub unterminated_at: Option<usize>,
}

impl PatchReport {
    pub fn occurrences(&self) -> usize {
        self.anchor_lines.len()
    }

    pub fn outcome(&self) -> PatchOutcome {
        match self.occurrences() {
            0 => PatchOutcome::AnchorNotFound,
            occurrences => PatchOutcome::Patched { occurrences },
        }
    }

    pub fn is_unterminated(&self) -> bool {
        self.unterminated_at.is_some()
    }
}

/// Replaces anchored blocks according to a [`PatchSpec`].
#[derive(Debug, Clone)]
pub struct LinePatcher {
    spec: PatchSpec,
    replacement: Vec<String>,
}

impl LinePatcher {
    /// Build a patcher, rejecting specs that could never match.
    pub fn new(spec: PatchSpec) -> Result<Self> {
        spec.validate()?;

        let mut replacement = spec.replacement.clone();
        if !replacement.is_empty() && !replacement.ends_with('\n') {
            replacement.push('\n');
        }
        let replacement = SourceDocument::from_text(&replacement)
            .lines()
            .to_vec();

        Ok(Self { spec, replacement })
    }

    pub fn spec(&self) -> &PatchSpec {
        &self.spec
    }

    fn transition(&self, state: ScanState, line_no: usize, line: &str) -> (ScanState, LineAction) {
        if line.contains(&self.spec.anchor) {
            return (
                ScanState::SkippingBlock { opened_at: line_no },
                LineAction::Replace,
            );
        }

        match state {
            ScanState::Scanning => (state, LineAction::Keep),
            ScanState::SkippingBlock { .. } if line.contains(&self.spec.closing_delimiter) => {
                (ScanState::Scanning, LineAction::Drop)
            }
            ScanState::SkippingBlock { .. } => (state, LineAction::Drop),
        }
    }

    /// Run the scanner, handing each line's fate to `emit`.
    fn run<'a>(
        &self,
        document: &'a SourceDocument,
        mut emit: impl FnMut(LineAction, &'a str),
    ) -> PatchReport {
        let mut report = PatchReport::default();
        let mut state = ScanState::Scanning;

        for (idx, line) in document.lines().iter().enumerate() {
            let line_no = idx + 1;
            let (next, action) = self.transition(state, line_no, line);

            match action {
                LineAction::Replace => {
                    tracing::debug!(line = line_no, "anchor matched");
                    report.anchor_lines.push(line_no);
                }
                LineAction::Drop => report.dropped_lines += 1,
                LineAction::Keep => {}
            }
            if let (ScanState::SkippingBlock { .. }, ScanState::Scanning) = (state, next) {
                tracing::trace!(line = line_no, "block closed");
            }

            emit(action, line.as_str());
            state = next;
        }

        if let ScanState::SkippingBlock { opened_at } = state {
            tracing::warn!(
                line = opened_at,
                delimiter = %self.spec.closing_delimiter,
                "block after anchor never closed, dropped the rest of the document"
            );
            report.unterminated_at = Some(opened_at);
        }

        report
    }

    /// Report what [`patch`](Self::patch) would do without building output.
    pub fn scan(&self, document: &SourceDocument) -> PatchReport {
        self.run(document, |_, _| {})
    }

    /// Produce the patched document.
    pub fn patch(&self, document: &SourceDocument) -> (SourceDocument, PatchReport) {
        let mut output = SourceDocument::default();
        let report = self.run(document, |action, line| match action {
            LineAction::Keep => output.push(line.to_string()),
            LineAction::Replace => output.extend_from(&self.replacement),
            LineAction::Drop => {}
        });
        (output, report)
    }

    /// Patch raw text.
    pub fn patch_str(&self, text: &str) -> (String, PatchReport) {
        let (output, report) = self.patch(&SourceDocument::from_text(text));
        (output.to_text(), report)
    }
}
