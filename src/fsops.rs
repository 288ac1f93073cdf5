//! Filesystem primitives shared by every scanner: recursive allocated-size
//! accounting and the idempotent trash/delete operations.
//!
//! Sizing uses physical disk usage (allocated blocks), not logical length.
//! The difference matters for sparse files — Docker.raw reports terabytes
//! logically while occupying a fraction of that on disk.

use std::fs::Metadata;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::common::errors::{CleanerError, Result};
use crate::common::safety;

/// Physical size of a single file from its metadata.
/// Preference order: allocated blocks (sparse-aware) → logical length.
#[cfg(unix)]
fn file_allocated_size(meta: &Metadata) -> u64 {
    use std::os::unix::fs::MetadataExt;
    // st_blocks is always in 512-byte units regardless of fs block size
    meta.blocks() * 512
}

#[cfg(not(unix))]
fn file_allocated_size(meta: &Metadata) -> u64 {
    meta.len()
}

/// Recursively compute the allocated size of a file or directory tree.
///
/// Hidden entries are skipped (the root itself is exempt, so sizing a
/// dot-directory like `~/.npm` works). Symlinks are not followed and not
/// counted; only regular files contribute. Unreadable or nonexistent
/// paths yield 0 — size accounting never errors.
pub fn allocated_size(path: &Path) -> u64 {
    WalkDir::new(path)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| {
            e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.')
        })
        .filter_map(|e| match e {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::debug!("size walk skipped entry: {}", err);
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .map(|e| e.metadata().map(|m| file_allocated_size(&m)).unwrap_or(0))
        .sum()
}

/// Check if a path exists
pub fn exists(path: &Path) -> bool {
    path.exists()
}

/// The platform's recoverable-trash directory.
/// `~/.Trash` on macOS; the XDG trash files directory elsewhere.
fn trash_dir() -> PathBuf {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("/tmp"));
    if cfg!(target_os = "macos") {
        home.join(".Trash")
    } else {
        dirs::data_dir()
            .unwrap_or_else(|| home.join(".local/share"))
            .join("Trash/files")
    }
}

/// Pick a destination inside the trash that does not collide with an
/// earlier deletion of the same name.
fn trash_destination(trash: &Path, name: &std::ffi::OsStr) -> PathBuf {
    let candidate = trash.join(name);
    if !candidate.exists() {
        return candidate;
    }
    for n in 2.. {
        let candidate = trash.join(format!("{} {}", name.to_string_lossy(), n));
        if !candidate.exists() {
            return candidate;
        }
    }
    unreachable!()
}

/// Move a file or directory to the trash (recoverable deletion).
///
/// Idempotent: a path that no longer exists is treated as success, so a
/// stale selection or two overlapping scan results deleting the same item
/// never surfaces a spurious error.
pub fn move_to_trash(path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }

    if safety::is_protected(path) {
        return Err(CleanerError::OperationNotAllowed {
            path: path.to_path_buf(),
            hint: "this is a protected system location".into(),
        });
    }

    let trash = trash_dir();
    std::fs::create_dir_all(&trash).map_err(|e| CleanerError::from_io(&trash, e))?;

    let name = path
        .file_name()
        .ok_or_else(|| CleanerError::OperationNotAllowed {
            path: path.to_path_buf(),
            hint: "path has no file name".into(),
        })?;
    let dest = trash_destination(&trash, name);

    // Fast path: rename within the same filesystem
    if std::fs::rename(path, &dest).is_ok() {
        return Ok(());
    }

    // Cross-device fallback: copy then delete
    if path.is_dir() {
        copy_dir_recursive(path, &dest).map_err(|e| CleanerError::from_io(path, e))?;
        std::fs::remove_dir_all(path).map_err(|e| CleanerError::from_io(path, e))?;
    } else {
        std::fs::copy(path, &dest).map_err(|e| CleanerError::from_io(path, e))?;
        std::fs::remove_file(path).map_err(|e| CleanerError::from_io(path, e))?;
    }

    Ok(())
}

/// Permanently delete a file or directory. Same idempotence as
/// [`move_to_trash`]: an absent path is success, not an error.
pub fn permanently_delete(path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }

    if safety::is_protected(path) {
        return Err(CleanerError::OperationNotAllowed {
            path: path.to_path_buf(),
            hint: "this is a protected system location".into(),
        });
    }

    if path.is_dir() {
        std::fs::remove_dir_all(path).map_err(|e| CleanerError::from_io(path, e))?;
    } else {
        std::fs::remove_file(path).map_err(|e| CleanerError::from_io(path, e))?;
    }

    Ok(())
}

/// Reveal a path in the platform file browser. Fire-and-forget: spawn
/// failures are logged, never surfaced.
pub fn reveal(path: &Path) {
    let result = if cfg!(target_os = "macos") {
        std::process::Command::new("open").arg("-R").arg(path).spawn()
    } else {
        let target = path.parent().unwrap_or(path);
        std::process::Command::new("xdg-open").arg(target).spawn()
    };

    if let Err(e) = result {
        tracing::debug!("reveal failed for '{}': {}", path.display(), e);
    }
}

/// Recursively copy a directory (cross-device trash fallback)
fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(dst)?;

    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }

    Ok(())
}
