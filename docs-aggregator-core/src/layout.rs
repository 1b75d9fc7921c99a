//! On-disk layout of a docs project.
//!
//! Every stage receives a [`SiteLayout`] instead of reaching for global directories,
//! so tests can point the whole pipeline at a scratch tree.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};

/// URL/directory segment under which every repo subtree lives.
pub const PROJECTS_SEGMENT: &str = "projects";

/// Name of the landing page of a directory.
pub const INDEX_FILE: &str = "index.md";

/// Root-path handle passed explicitly to every pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteLayout {
    pub root: PathBuf,
    /// Local repo clones, one directory per slug.
    pub work_dir: PathBuf,
    /// Source tree consumed by the site builder.
    pub site_dir: PathBuf,
    pub projects_dir: PathBuf,
    pub config_file: PathBuf,
    pub template_file: PathBuf,
    /// Where the merged navigation document is written.
    pub nav_output: PathBuf,
}

impl SiteLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let site_dir = root.join("site");
        Self {
            work_dir: root.join(".work"),
            projects_dir: site_dir.join(PROJECTS_SEGMENT),
            site_dir,
            config_file: root.join("repos.yaml"),
            template_file: root.join("mkdocs.tpl.yml"),
            nav_output: root.join("mkdocs.yml"),
            root,
        }
    }

    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = path.into();
        self
    }

    pub fn with_template_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.template_file = path.into();
        self
    }

    pub fn with_nav_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.nav_output = path.into();
        self
    }

    /// Local clone of the repo with the given slug.
    pub fn checkout_dir(&self, slug: &str) -> PathBuf {
        self.work_dir.join(slug)
    }

    /// Site subtree owned by the repo with the given slug.
    pub fn repo_site_dir(&self, slug: &str) -> PathBuf {
        self.projects_dir.join(slug)
    }

    pub fn ensure_dirs(&self) -> Result<()> {
        for dir in [&self.work_dir, &self.projects_dir] {
            fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
            debug!(path = %dir.display(), "Ensured directory exists");
        }
        Ok(())
    }
}

/// Removes `path` whatever it currently is. Absent paths are fine.
pub(crate) fn remove_path(path: &Path) -> Result<()> {
    let meta = match fs::symlink_metadata(path) {
        Ok(meta) => meta,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(Error::io(path, e)),
    };
    if meta.is_dir() {
        fs::remove_dir_all(path).map_err(|e| Error::io(path, e))
    } else {
        fs::remove_file(path).map_err(|e| Error::io(path, e))
    }
}

/// Deletes `dir` and recreates it empty.
pub(crate) fn reset_dir(dir: &Path) -> Result<()> {
    remove_path(dir)?;
    fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))
}
