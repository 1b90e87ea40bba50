//! Patch configuration: what to find and what to put in its place.
//!
//! A spec file names the anchor, the closing delimiter of the commented-out
//! block that follows it, and the replacement text (inline or from a file):
//!
//! ```toml
//! target = "lib/pages/role_selection_page.dart"
//! anchor = "// Contenedor futuro para QR"
//! closing_delimiter = "*/"
//! replacement_file = "qr_block.dart.txt"
//! ```

use crate::error::{Error, Result};
use patch_fs::{ConfigStore, io};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Delimiter closing a C-style block comment.
const DEFAULT_CLOSING_DELIMITER: &str = "*/";

fn default_closing_delimiter() -> String {
    DEFAULT_CLOSING_DELIMITER.to_string()
}

/// A fully resolved patch configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchSpec {
    /// Substring identifying an anchor line.
    pub anchor: String,
    /// Substring ending the dropped block after an anchor.
    #[serde(default = "default_closing_delimiter")]
    pub closing_delimiter: String,
    /// Text emitted in place of each anchor line.
    pub replacement: String,
    /// File to patch when none is given explicitly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<PathBuf>,
}

/// On-disk shape of a spec file, before the replacement is resolved.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SpecFile {
    anchor: String,
    #[serde(default)]
    closing_delimiter: Option<String>,
    #[serde(default)]
    replacement: Option<String>,
    #[serde(default)]
    replacement_file: Option<PathBuf>,
    #[serde(default)]
    target: Option<PathBuf>,
}

/// A spec whose fields may still be filled in or overridden.
///
/// Spec files load into this first so that callers which never emit a
/// replacement, or supply it separately, can do without one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialSpec {
    pub anchor: Option<String>,
    pub closing_delimiter: Option<String>,
    pub replacement: Option<String>,
    pub target: Option<PathBuf>,
}

impl PartialSpec {
    /// Resolve into a [`PatchSpec`], requiring an anchor and a replacement.
    pub fn into_spec(self) -> Result<PatchSpec> {
        let anchor = self
            .anchor
            .ok_or_else(|| Error::invalid_spec("an anchor is required"))?;
        let replacement = self.replacement.ok_or_else(|| {
            Error::invalid_spec("one of `replacement` or `replacement_file` is required")
        })?;

        let spec = PatchSpec {
            anchor,
            closing_delimiter: self
                .closing_delimiter
                .unwrap_or_else(default_closing_delimiter),
            replacement,
            target: self.target,
        };
        spec.validate()?;
        Ok(spec)
    }
}

impl PatchSpec {
    /// Create a spec with the default `*/` closing delimiter.
    pub fn new(anchor: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            anchor: anchor.into(),
            closing_delimiter: default_closing_delimiter(),
            replacement: replacement.into(),
            target: None,
        }
    }

    pub fn with_closing_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.closing_delimiter = delimiter.into();
        self
    }

    /// Load a spec from a TOML, JSON or YAML file.
    ///
    /// `replacement_file` and `target` are resolved relative to the
    /// directory containing the spec file. Exactly one of `replacement` and
    /// `replacement_file` must be present.
    pub fn load(path: &Path) -> Result<Self> {
        Self::load_partial(path)?.into_spec()
    }

    /// Load a spec file without requiring a replacement.
    ///
    /// Paths are resolved as in [`load`](Self::load); giving both
    /// `replacement` and `replacement_file` is still an error.
    pub fn load_partial(path: &Path) -> Result<PartialSpec> {
        let raw: SpecFile = ConfigStore::new().load(path)?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));

        let replacement = match (raw.replacement, raw.replacement_file) {
            (Some(_), Some(_)) => {
                return Err(Error::invalid_spec(
                    "`replacement` and `replacement_file` are mutually exclusive",
                ));
            }
            (Some(text), None) => Some(text),
            (None, Some(file)) => Some(io::read_text(&base.join(file))?),
            (None, None) => None,
        };

        tracing::debug!(spec = %path.display(), anchor = %raw.anchor, "loaded patch spec");
        Ok(PartialSpec {
            anchor: Some(raw.anchor),
            closing_delimiter: raw.closing_delimiter,
            replacement,
            target: raw.target.map(|t| base.join(t)),
        })
    }

    /// Check that anchor and delimiter can match anything line-wise.
    pub fn validate(&self) -> Result<()> {
        if self.anchor.is_empty() {
            return Err(Error::invalid_spec("anchor must not be empty"));
        }
        if self.closing_delimiter.is_empty() {
            return Err(Error::invalid_spec("closing delimiter must not be empty"));
        }
        if self.anchor.contains('\n') || self.closing_delimiter.contains('\n') {
            return Err(Error::invalid_spec(
                "anchor and closing delimiter must fit on a single line",
            ));
        }
        Ok(())
    }

    /// Whether the replacement text itself would match the anchor again.
    ///
    /// When it does, a second run re-patches its own output.
    pub fn replacement_contains_anchor(&self) -> bool {
        self.replacement.contains(&self.anchor)
    }
}
