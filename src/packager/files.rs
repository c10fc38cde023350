//! File-system helpers for the packager: listing staged files, guarded deletion
//! and copying. Every deletion goes through [`is_safe_to_delete`].

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;
use tracing::info;
use walkdir::WalkDir;

/// Lists every non-directory entry below `root`, as sorted `/`-separated relative paths.
pub fn list_files(root: &Path) -> Result<Vec<String>, walkdir::Error> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_dir() {
            continue;
        }
        if let Ok(relative) = entry.path().strip_prefix(root) {
            let name = relative
                .components()
                .map(|component| component.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            files.push(name);
        }
    }
    files.sort();
    Ok(files)
}

/// Distinct first path segments of the given relative paths, sorted.
pub fn top_level_entries(files: &[String]) -> Vec<String> {
    files
        .iter()
        .filter_map(|file| file.split('/').next())
        .filter(|entry| !entry.is_empty())
        .map(str::to_owned)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// A path may be deleted only if it exists, lies inside `wd` and is not `wd` itself.
pub fn is_safe_to_delete(wd: &Path, path: &Path) -> bool {
    let (Ok(wd), Ok(target)) = (wd.canonicalize(), path.canonicalize()) else {
        debug!("ok=false - ({}) does not exist", path.display());
        return false;
    };
    if target == wd {
        debug!("ok=false - cannot delete root dir ({})", wd.display());
        return false;
    }
    if !target.starts_with(&wd) {
        debug!("ok=false - ({}) not subfolder of ({})", target.display(), wd.display());
        return false;
    }
    true
}

/// Removes a file or a directory tree if the deletion guard allows it.
/// Returns whether anything was removed.
pub fn remove_path(wd: &Path, path: &Path) -> io::Result<bool> {
    let ok = is_safe_to_delete(wd, path);
    info!("ok={} to delete ({})", ok, path.display());
    if !ok {
        return Ok(false);
    }
    if fs::symlink_metadata(path)?.is_dir() {
        fs::remove_dir_all(path)?;
    } else {
        fs::remove_file(path)?;
    }
    Ok(true)
}

/// Copies a file, creating parent directories. A missing source is skipped.
pub fn copy_file(source: &Path, target: &Path) -> io::Result<bool> {
    if !source.exists() {
        return Ok(false);
    }
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(source, target)?;
    Ok(true)
}
