//! Projects glob-selected paths of a repo checkout into its site subtree.
//!
//! Every match keeps its path relative to the checkout. Directories are merged into
//! whatever already exists at the destination; overlapping files are overwritten, so
//! later patterns win. `README.md` (any case) always lands as `index.md`, which gives
//! every copied directory a landing page without an explicit nav entry.
//!
//! A pattern that matches nothing is an ordinary outcome, not an error, so repo configs
//! can list optional paths.

use std::path::{Component, Path};

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::tree::{self, canonical_rel, VCS_DIR};

/// What a single copy pattern did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternOutcome {
    Copied { pattern: String, files: usize },
    NoMatch { pattern: String },
}

impl PatternOutcome {
    pub fn pattern(&self) -> &str {
        match self {
            PatternOutcome::Copied { pattern, .. } | PatternOutcome::NoMatch { pattern } => pattern,
        }
    }
}

/// Applies every pattern in order. Returns one outcome per pattern.
pub fn project_paths<S: AsRef<str>>(
    repo_root: &Path,
    dest_root: &Path,
    patterns: &[S],
) -> Result<Vec<PatternOutcome>> {
    patterns
        .iter()
        .map(|p| project_pattern(repo_root, dest_root, p.as_ref()))
        .collect()
}

/// Copies every match of `pattern` under `repo_root` into `dest_root`.
pub fn project_pattern(repo_root: &Path, dest_root: &Path, pattern: &str) -> Result<PatternOutcome> {
    let escaped_root = glob::Pattern::escape(&repo_root.to_string_lossy());
    let full = format!("{escaped_root}/{pattern}");
    let paths = glob::glob(&full).map_err(|source| Error::Pattern {
        pattern: pattern.to_string(),
        source,
    })?;

    let mut matched = false;
    let mut files = 0;
    for entry in paths {
        let src = entry.map_err(|e| {
            let path = e.path().to_path_buf();
            Error::io(path, e.into())
        })?;
        let Ok(rel) = src.strip_prefix(repo_root) else {
            continue;
        };
        if rel.components().any(|c| c == Component::Normal(VCS_DIR.as_ref())) {
            continue;
        }
        matched = true;

        if src.is_dir() {
            files += tree::merge_tree(&src, &dest_root.join(rel))?;
        } else if src.is_file() {
            let dst = dest_root.join(canonical_rel(rel));
            tree::copy_file(&src, &dst)?;
            debug!(src = %src.display(), dst = %dst.display(), "Copied file");
            files += 1;
        }
    }

    if !matched {
        debug!(pattern, repo = %repo_root.display(), "Pattern matched nothing, skipping");
        return Ok(PatternOutcome::NoMatch {
            pattern: pattern.to_string(),
        });
    }
    info!(pattern, files, dest = %dest_root.display(), "Projected pattern");
    Ok(PatternOutcome::Copied {
        pattern: pattern.to_string(),
        files,
    })
}
