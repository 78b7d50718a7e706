//! Writing rendered pages to disk.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::config::OverwritePolicy;
use crate::error::{PublishError, PublishResult};

/// Write `html` to `dir/file_name` and return the final path.
///
/// The page goes to a temporary file in `dir` first and is renamed into
/// place, so a failed write never leaves a truncated page behind.
pub fn write_page(
    dir: &Path,
    file_name: &str,
    html: &str,
    policy: OverwritePolicy,
) -> PublishResult<PathBuf> {
    let path = dir.join(file_name);

    if path.exists() {
        match policy {
            OverwritePolicy::Refuse => return Err(PublishError::AlreadyExists(path)),
            OverwritePolicy::Overwrite => {
                log::warn!("Overwriting existing page {}", path.display());
            }
        }
    }

    std::fs::create_dir_all(dir).map_err(|e| PublishError::io(dir, e))?;

    let mut file = NamedTempFile::new_in(dir).map_err(|e| PublishError::io(&path, e))?;
    file.write_all(html.as_bytes())
        .and_then(|()| file.flush())
        .map_err(|e| PublishError::io(&path, e))?;
    persist(file, &path, policy)?;

    log::debug!("Wrote {} bytes to {}", html.len(), path.display());
    Ok(path)
}

/// Move the finished temporary file to `path`.
///
/// Under [`OverwritePolicy::Refuse`] the rename fails if `path` appeared
/// after the existence check, instead of replacing it.
fn persist(file: NamedTempFile, path: &Path, policy: OverwritePolicy) -> PublishResult<()> {
    let result = match policy {
        OverwritePolicy::Overwrite => file.persist(path),
        OverwritePolicy::Refuse => file.persist_noclobber(path),
    };
    match result {
        Ok(_) => Ok(()),
        Err(e) if e.error.kind() == ErrorKind::AlreadyExists => {
            Err(PublishError::AlreadyExists(path.to_path_buf()))
        }
        Err(e) => Err(PublishError::io(path, e.error)),
    }
}
