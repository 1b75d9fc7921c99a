//! Generates a directory-listing landing page where none exists.
//!
//! The page is a pure function of the directory contents and the [`ListingConfig`], so
//! repeated builds over the same tree produce byte-identical pages. An existing
//! `index.md` is never touched.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::config::{ListingConfig, SortMode};
use crate::error::{Error, Result};
use crate::layout::INDEX_FILE;
use crate::tree::walk_error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingOutcome {
    Generated { path: PathBuf, entries: usize },
    /// The directory already had a landing page.
    AlreadyPresent { path: PathBuf },
}

/// One line of a listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ListingEntry {
    label: String,
    /// Relative to the listed directory, `/`-separated.
    rel: String,
    is_dir: bool,
}

impl ListingEntry {
    fn render(&self) -> String {
        if self.is_dir {
            format!("- [{}]({}/)", self.label, self.rel)
        } else {
            format!("- [{}]({})", self.label, self.rel)
        }
    }
}

/// Writes `folder/index.md` listing the folder's contents, unless it already exists.
pub fn synthesize_listing(
    folder: &Path,
    title: Option<&str>,
    config: &ListingConfig,
) -> Result<ListingOutcome> {
    let index = folder.join(INDEX_FILE);
    if index.exists() {
        debug!(path = %index.display(), "Index page already present, leaving it alone");
        return Ok(ListingOutcome::AlreadyPresent { path: index });
    }

    let mut entries = if config.recursive {
        collect_recursive(folder, &config.extensions)?
    } else {
        collect_children(folder, &config.extensions)?
    };
    match config.sort {
        SortMode::Alpha => entries.sort_by(|a, b| {
            a.label
                .to_lowercase()
                .cmp(&b.label.to_lowercase())
                .then_with(|| a.rel.cmp(&b.rel))
        }),
    }

    let fallback = folder
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let heading = listing_heading(title.unwrap_or(&fallback));

    let mut page = format!("# {heading}\n\n");
    for entry in &entries {
        page.push_str(&entry.render());
        page.push('\n');
    }
    fs::write(&index, page).map_err(|e| Error::io(&index, e))?;
    info!(path = %index.display(), entries = entries.len(), "Generated listing page");

    Ok(ListingOutcome::Generated {
        path: index,
        entries: entries.len(),
    })
}

/// Immediate children: matching files plus every subdirectory.
fn collect_children(folder: &Path, extensions: &[String]) -> Result<Vec<ListingEntry>> {
    let mut entries = Vec::new();
    for dirent in fs::read_dir(folder).map_err(|e| Error::io(folder, e))? {
        let dirent = dirent.map_err(|e| Error::io(folder, e))?;
        let path = dirent.path();
        let name = dirent.file_name().to_string_lossy().into_owned();
        if path.is_dir() {
            entries.push(ListingEntry {
                label: name.clone(),
                rel: name,
                is_dir: true,
            });
        } else if path.is_file() && has_extension(&path, extensions) {
            entries.push(ListingEntry {
                label: name.clone(),
                rel: name,
                is_dir: false,
            });
        }
    }
    Ok(entries)
}

/// Every matching file of the subtree; directories are not listed themselves.
fn collect_recursive(folder: &Path, extensions: &[String]) -> Result<Vec<ListingEntry>> {
    let mut entries = Vec::new();
    for entry in WalkDir::new(folder).min_depth(1).follow_links(true) {
        let entry = entry.map_err(|e| walk_error(folder, e))?;
        if !entry.file_type().is_file() || !has_extension(entry.path(), extensions) {
            continue;
        }
        let Ok(rel) = entry.path().strip_prefix(folder) else {
            continue;
        };
        let rel = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        entries.push(ListingEntry {
            label: entry.file_name().to_string_lossy().into_owned(),
            rel,
            is_dir: false,
        });
    }
    Ok(entries)
}

/// Suffix check against extensions that carry a leading dot, case-sensitive.
fn has_extension(path: &Path, extensions: &[String]) -> bool {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    extensions
        .iter()
        .any(|wanted| wanted.strip_prefix('.') == Some(ext))
}

/// Heading for a listing page: dashes become spaces, then title case.
pub fn listing_heading(raw: &str) -> String {
    title_case(&raw.replace('-', " "))
}

/// Upper-cases the first letter of every alphabetic run and lower-cases the rest.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for ch in s.chars() {
        if ch.is_alphabetic() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(ch);
            in_word = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_case_follows_alphabetic_runs() {
        assert_eq!(title_case("getting started"), "Getting Started");
        assert_eq!(title_case("API reference"), "Api Reference");
        assert_eq!(title_case("v2x notes"), "V2X Notes");
    }

    #[test]
    fn heading_replaces_dashes_only() {
        assert_eq!(listing_heading("energy-community"), "Energy Community");
        assert_eq!(listing_heading("data_sets"), "Data_Sets");
    }

    #[test]
    fn extension_match_needs_exact_suffix() {
        let exts = vec![".md".to_string()];
        assert!(has_extension(Path::new("a/b.md"), &exts));
        assert!(!has_extension(Path::new("a/b.MD"), &exts));
        assert!(!has_extension(Path::new("a/b.markdown"), &exts));
        assert!(!has_extension(Path::new("Makefile"), &exts));
    }
}
