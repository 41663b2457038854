//! Filesystem utilities.

use std::fs;
use std::io;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{Error, Result};

fn output_error(path: &Path, source: io::Error) -> Error {
    Error::OutputWrite {
        path: path.to_path_buf(),
        source,
    }
}

/// Create a temporary file next to `dest`, creating parent directories if
/// needed. The file is deleted when dropped unless [`persist`]ed.
///
/// The file takes the permissions of an existing `dest`, or `0o644` (subject
/// to the umask) for a new one.
pub fn staging_file(dest: &Path) -> Result<NamedTempFile> {
    let dir = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    fs::create_dir_all(dir).map_err(|e| output_error(dest, e))?;

    let mut builder = tempfile::Builder::new();
    if let Some(permissions) = output_permissions(dest) {
        builder.permissions(permissions);
    }
    builder.tempfile_in(dir).map_err(|e| output_error(dest, e))
}

#[cfg(unix)]
fn output_permissions(dest: &Path) -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;

    match fs::metadata(dest) {
        Ok(meta) => Some(meta.permissions()),
        Err(_) => Some(fs::Permissions::from_mode(0o644)),
    }
}

#[cfg(not(unix))]
fn output_permissions(_dest: &Path) -> Option<fs::Permissions> {
    None
}

/// Move a finished staging file over `dest`, replacing any existing file.
pub fn persist(staged: NamedTempFile, dest: &Path) -> Result<()> {
    staged
        .persist(dest)
        .map(|_| ())
        .map_err(|e| output_error(dest, e.error))
}

/// Read a file, returning `None` if it does not exist.
pub fn read_if_exists(path: &Path) -> io::Result<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}
