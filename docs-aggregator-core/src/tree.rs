//! Recursive copy helpers shared by the projector and the link materializer.

use std::cmp::Ordering;
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::error::{Error, Result};
use crate::layout::INDEX_FILE;

/// Directory never carried over from a checkout.
pub(crate) const VCS_DIR: &str = ".git";

/// `README.md` in any letter case.
pub fn is_readme(name: &OsStr) -> bool {
    name.to_str()
        .is_some_and(|n| n.eq_ignore_ascii_case("readme.md"))
}

/// Relative path with a README file name swapped for the index page name.
pub fn canonical_rel(rel: &Path) -> PathBuf {
    match rel.file_name() {
        Some(name) if is_readme(name) => rel.with_file_name(INDEX_FILE),
        _ => rel.to_path_buf(),
    }
}

/// Copies one file, creating parent directories as needed.
pub(crate) fn copy_file(src: &Path, dst: &Path) -> Result<()> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    fs::copy(src, dst).map_err(|e| Error::io(src, e))?;
    Ok(())
}

/// Merges `src` into `dst`, overwriting overlapping files and renaming READMEs to the
/// index page. VCS metadata is skipped. Returns the number of files written.
///
/// Within a directory a README is copied after its siblings, so it wins over an
/// `index.md` already sitting next to it.
pub(crate) fn merge_tree(src: &Path, dst: &Path) -> Result<usize> {
    let walker = WalkDir::new(src)
        .follow_links(true)
        .sort_by(readme_last)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || e.file_name() != VCS_DIR);
    copy_entries(src, dst, walker, true)
}

/// Makes `dst` an exact copy of `src`, byte for byte and name for name.
pub(crate) fn mirror_tree(src: &Path, dst: &Path) -> Result<usize> {
    let walker = WalkDir::new(src)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter();
    copy_entries(src, dst, walker, false)
}

fn copy_entries<I>(src: &Path, dst: &Path, walker: I, canonicalize: bool) -> Result<usize>
where
    I: Iterator<Item = walkdir::Result<DirEntry>>,
{
    fs::create_dir_all(dst).map_err(|e| Error::io(dst, e))?;
    let mut files = 0;
    for entry in walker {
        let entry = entry.map_err(|e| walk_error(src, e))?;
        let Ok(rel) = entry.path().strip_prefix(src) else {
            continue;
        };
        if entry.file_type().is_dir() {
            let target = dst.join(rel);
            fs::create_dir_all(&target).map_err(|e| Error::io(&target, e))?;
            continue;
        }
        let target = if canonicalize {
            dst.join(canonical_rel(rel))
        } else {
            dst.join(rel)
        };
        copy_file(entry.path(), &target)?;
        files += 1;
    }
    Ok(files)
}

fn readme_last(a: &DirEntry, b: &DirEntry) -> Ordering {
    (is_readme(a.file_name()), a.file_name()).cmp(&(is_readme(b.file_name()), b.file_name()))
}

pub(crate) fn walk_error(root: &Path, e: walkdir::Error) -> Error {
    let path = e
        .path()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| root.to_path_buf());
    let message = e.to_string();
    let source = e
        .into_io_error()
        .unwrap_or_else(|| io::Error::other(message));
    Error::io(path, source)
}
