//! Command implementations

mod apply;
mod check;

pub use apply::run_apply;
pub use check::run_check;

use crate::cli::SpecArgs;
use crate::error::{CliError, Result};
use patch_core::{PartialSpec, PatchSpec};
use patch_fs::io;
use std::path::PathBuf;

/// Exit code when no anchor was found.
pub const EXIT_ANCHOR_NOT_FOUND: i32 = 2;

/// Build the effective spec and target file from the spec file and flags.
///
/// `check` never emits a replacement, so it passes `require_replacement =
/// false` and may run on an anchor alone.
pub fn resolve_spec(args: &SpecArgs, require_replacement: bool) -> Result<(PathBuf, PatchSpec)> {
    let mut partial = match &args.spec {
        Some(path) => PatchSpec::load_partial(path)?,
        None => PartialSpec::default(),
    };

    if let Some(anchor) = &args.anchor {
        partial.anchor = Some(anchor.clone());
    }
    if let Some(delimiter) = &args.delimiter {
        partial.closing_delimiter = Some(delimiter.clone());
    }
    match (&args.replacement, &args.replacement_file) {
        (Some(text), _) => partial.replacement = Some(text.clone()),
        (None, Some(file)) => partial.replacement = Some(io::read_text(file)?),
        (None, None) => {}
    }

    if partial.anchor.is_none() {
        return Err(CliError::user("an anchor is required: pass --anchor or --spec"));
    }
    if partial.replacement.is_none() {
        if require_replacement {
            return Err(CliError::user(
                "a replacement is required: \
                 pass --replacement, --replacement-file or --spec",
            ));
        }
        partial.replacement = Some(String::new());
    }

    let spec = partial.into_spec()?;
    let file = args
        .file
        .clone()
        .or_else(|| spec.target.clone())
        .ok_or_else(|| CliError::user("no file to patch: pass FILE or set `target` in the spec"))?;

    Ok((file, spec))
}
