//! Patching files on disk.

use crate::diff::{DiffSummary, unified_diff};
use crate::error::{Error, Result};
use crate::patcher::{LinePatcher, PatchOutcome, PatchReport};
use crate::spec::PatchSpec;
use patch_fs::{compute_content_checksum, io};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// How [`patch_file`] treats the result.
#[derive(Debug, Clone, Default)]
pub struct ApplyOptions {
    /// Compute the result and diff, never write.
    pub dry_run: bool,
    /// Copy the original to `<file>.orig` before overwriting it.
    pub backup: bool,
    /// Fail instead of writing when a block is never closed.
    pub strict: bool,
    /// Write here instead of overwriting the input.
    pub output: Option<PathBuf>,
}

/// What a [`patch_file`] call did.
#[derive(Debug, Clone, Serialize)]
pub struct ApplyResult {
    pub path: PathBuf,
    pub outcome: PatchOutcome,
    pub report: PatchReport,
    pub summary: DiffSummary,
    /// Destination actually written, if any.
    pub written: Option<PathBuf>,
    pub backup: Option<PathBuf>,
    pub checksum_before: String,
    pub checksum_after: String,
    /// Unified diff of the change; empty when nothing changed.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub diff: String,
}

impl ApplyResult {
    pub fn changed(&self) -> bool {
        self.checksum_before != self.checksum_after
    }
}

/// Read `path`, patch it with `spec`, and write the result back.
///
/// The write is skipped on dry runs and when patching in place would not
/// change a byte, which is always the case when the anchor is absent.
pub fn patch_file(path: &Path, spec: &PatchSpec, options: &ApplyOptions) -> Result<ApplyResult> {
    let patcher = LinePatcher::new(spec.clone())?;

    let original = io::read_text(path)?;
    let (patched, report) = patcher.patch_str(&original);

    if let Some(line) = report.unterminated_at {
        if options.strict {
            return Err(Error::UnterminatedBlock {
                path: path.to_path_buf(),
                line,
            });
        }
    }

    let outcome = report.outcome();
    if outcome == PatchOutcome::AnchorNotFound {
        tracing::warn!(path = %path.display(), anchor = %spec.anchor, "anchor not found");
    }

    let destination = options.output.as_deref().unwrap_or(path);
    let in_place = destination == path;
    let should_write = !options.dry_run && (!in_place || patched != original);

    let mut backup = None;
    let mut written = None;
    if should_write {
        if options.backup && in_place {
            backup = Some(io::backup_file(path)?);
        }
        io::write_text(destination, &patched)?;
        tracing::info!(
            path = %destination.display(),
            occurrences = report.occurrences(),
            "wrote patched file"
        );
        written = Some(destination.to_path_buf());
    } else {
        tracing::debug!(path = %path.display(), dry_run = options.dry_run, "nothing written");
    }

    Ok(ApplyResult {
        path: path.to_path_buf(),
        outcome,
        summary: DiffSummary::compute(&original, &patched),
        diff: unified_diff(&original, &patched, path),
        checksum_before: compute_content_checksum(&original),
        checksum_after: compute_content_checksum(&patched),
        report,
        written,
        backup,
    })
}
