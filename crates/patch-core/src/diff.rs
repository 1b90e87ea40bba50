//! Unified diffs of patch results

use serde::Serialize;
use similar::{ChangeTag, TextDiff};
use std::path::Path;

/// Line counts of a text diff.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiffSummary {
    pub inserted: usize,
    pub deleted: usize,
}

impl DiffSummary {
    /// Count inserted and deleted lines between `old` and `new`.
    pub fn compute(old: &str, new: &str) -> Self {
        if old == new {
            return Self::default();
        }

        let mut summary = Self::default();
        for change in TextDiff::from_lines(old, new).iter_all_changes() {
            match change.tag() {
                ChangeTag::Insert => summary.inserted += 1,
                ChangeTag::Delete => summary.deleted += 1,
                ChangeTag::Equal => {}
            }
        }
        summary
    }

    pub fn is_empty(&self) -> bool {
        self.inserted == 0 && self.deleted == 0
    }
}

/// Render a unified diff with three lines of context.
///
/// Returns an empty string when the texts are identical.
pub fn unified_diff(old: &str, new: &str, path: &Path) -> String {
    if old == new {
        return String::new();
    }

    let name = path.display().to_string();
    TextDiff::from_lines(old, new)
        .unified_diff()
        .context_radius(3)
        .header(&format!("a/{name}"), &format!("b/{name}"))
        .to_string()
}
