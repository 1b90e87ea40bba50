//! Anchor-driven line patching of text files.
//!
//! Finds lines containing an anchor substring and replaces each one,
//! together with the commented-out block that follows it up to a closing
//! delimiter, with a fixed replacement block:
//!
//! ```text
//! // Contenedor futuro para QR      <- anchor line
//! /* Container(                      <- dropped
//!   ...                              <- dropped
//! ), */                              <- dropped (closing delimiter)
//! ```
//!
//! [`LinePatcher`] works on in-memory [`SourceDocument`]s; [`apply::patch_file`]
//! wraps it with reading, atomic writing, backups and dry runs.

pub mod apply;
pub mod diff;
pub mod document;
pub mod error;
pub mod patcher;
pub mod spec;

pub use apply::{ApplyOptions, ApplyResult, patch_file};
pub use diff::{DiffSummary, unified_diff};
pub use document::SourceDocument;
pub use error::{Error, Result};
pub use patcher::{LinePatcher, PatchOutcome, PatchReport, ScanState};
pub use spec::{PartialSpec, PatchSpec};
