//! Static asset sync and the file copy shared with page generation.

use jwalk::WalkDir;
use std::fs::{self, File, FileTimes};
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{BuildError, IoContext};

/// Copy `src` to `dst`, keeping permissions and access/modification times.
///
/// Read-only sources stay read-only at `dst`, and a read-only `dst` left
/// by an earlier build is replaced.
pub fn copy_file(src: &Path, dst: &Path) -> Result<(), BuildError> {
    if fs::symlink_metadata(dst).is_ok_and(|m| m.is_file() && m.permissions().readonly()) {
        fs::remove_file(dst).at(dst)?;
    }
    fs::copy(src, dst).at(src)?;

    let meta = fs::metadata(src).at(src)?;
    let mut times = FileTimes::new().set_modified(meta.modified().at(src)?);
    if let Ok(accessed) = meta.accessed() {
        times = times.set_accessed(accessed);
    }
    // Owner may set times through a read-only handle
    File::open(dst)
        .and_then(|file| file.set_times(times))
        .at(dst)
}

/// Merge `static_root` into `output`, returning every file written.
///
/// Top-level files are copied next to `index.html`; directories are merged
/// recursively into existing ones. A missing `static_root` copies nothing.
pub fn sync_static(static_root: &Path, output: &Path) -> Result<Vec<PathBuf>, BuildError> {
    if !static_root.is_dir() {
        return Ok(Vec::new());
    }
    fs::create_dir_all(output).at(output)?;

    let mut entries: Vec<PathBuf> = fs::read_dir(static_root)
        .at(static_root)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<io::Result<_>>()
        .at(static_root)?;
    entries.sort();

    let mut copied = Vec::new();
    for path in entries {
        if path.is_dir() {
            copy_tree(static_root, &path, output, &mut copied)?;
        } else if path.is_file() {
            let dst = output.join(path.strip_prefix(static_root).unwrap_or(&path));
            copy_file(&path, &dst)?;
            copied.push(dst);
        }
    }
    Ok(copied)
}

fn copy_tree(
    root: &Path,
    dir: &Path,
    output: &Path,
    copied: &mut Vec<PathBuf>,
) -> Result<(), BuildError> {
    for entry in WalkDir::new(dir).sort(true) {
        let entry = entry.map_err(|e| {
            let path = e.path().map_or_else(|| dir.to_path_buf(), Path::to_path_buf);
            BuildError::io(path, io::Error::from(e))
        })?;
        let path = entry.path();
        let Ok(rel) = path.strip_prefix(root) else {
            continue;
        };
        let dst = output.join(rel);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&dst).at(&dst)?;
        } else if path.is_file() {
            copy_file(&path, &dst)?;
            copied.push(dst);
        }
    }
    Ok(())
}
