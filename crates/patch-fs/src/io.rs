//! Whole-file reads and atomic locked writes

use crate::{Error, Result};
use fs2::FileExt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Suffix appended to the file name of a backup copy.
pub const BACKUP_SUFFIX: &str = "orig";

/// Read the entire file as UTF-8 text.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

/// Write content atomically to a file with locking.
///
/// Writes to a temp file in the same directory, then renames it over the
/// target so readers never observe a partially written file. A symlinked
/// target is written through to the file it points at, and an existing
/// file keeps its permissions.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let path = &resolve_symlink(path)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let existing_permissions = match fs::metadata(path) {
        Ok(meta) => Some(meta.permissions()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => return Err(Error::io(path, e)),
    };

    let temp_path = temp_sibling(path);

    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .map_err(|e| Error::io(&temp_path, e))?;

    if let Some(permissions) = existing_permissions {
        if let Err(e) = fs::set_permissions(&temp_path, permissions) {
            let _ = fs::remove_file(&temp_path);
            return Err(Error::io(&temp_path, e));
        }
    }

    temp_file
        .lock_exclusive()
        .map_err(|_| Error::LockFailed {
            path: path.to_path_buf(),
        })?;

    let written = temp_file
        .write_all(content)
        .and_then(|()| temp_file.sync_all());
    if let Err(e) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(Error::io(&temp_path, e));
    }

    temp_file.unlock().map_err(|_| Error::LockFailed {
        path: path.to_path_buf(),
    })?;
    drop(temp_file);

    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(Error::io(path, e));
    }

    tracing::debug!(path = %path.display(), bytes = content.len(), "wrote file atomically");
    Ok(())
}

/// Write text content to a file atomically.
pub fn write_text(path: &Path, content: &str) -> Result<()> {
    write_atomic(path, content.as_bytes())
}

/// Path of the backup copy for `path`: `<name>.orig` next to it.
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".");
    name.push(BACKUP_SUFFIX);
    path.with_file_name(name)
}

/// Copy `path` to its backup location, overwriting an older backup.
///
/// Returns the backup path.
pub fn backup_file(path: &Path) -> Result<PathBuf> {
    let backup = backup_path(path);
    fs::copy(path, &backup).map_err(|e| Error::io(&backup, e))?;
    tracing::info!(backup = %backup.display(), "backed up original");
    Ok(backup)
}

/// Follow `path` to the file it names when it is a symlink.
fn resolve_symlink(path: &Path) -> Result<PathBuf> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => {
            let resolved = fs::canonicalize(path).map_err(|e| Error::io(path, e))?;
            tracing::debug!(
                link = %path.display(),
                target = %resolved.display(),
                "writing through symlink"
            );
            Ok(resolved)
        }
        _ => Ok(path.to_path_buf()),
    }
}

fn temp_sibling(path: &Path) -> PathBuf {
    let temp_name = format!(
        ".{}.{}.tmp",
        path.file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    path.with_file_name(temp_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backup_path_appends_suffix() {
        let path = Path::new("lib/pages/page.dart");
        assert_eq!(backup_path(path), PathBuf::from("lib/pages/page.dart.orig"));
    }

    #[test]
    fn temp_sibling_stays_in_directory() {
        let temp = temp_sibling(Path::new("dir/file.txt"));
        assert_eq!(temp.parent(), Some(Path::new("dir")));
        assert!(temp.file_name().unwrap().to_string_lossy().starts_with(".file.txt."));
    }
}
