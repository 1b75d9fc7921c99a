//! Git-backed [`RepoFetcher`].

use std::path::Path;

use tracing::{debug, info};

use crate::command::run_tool;
use crate::config::RepoSpec;
use crate::contract::RepoFetcher;
use crate::error::{Error, Result};

/// Keeps one clone per repo under the work directory: clone on first use, fast-forward
/// pull afterwards.
#[derive(Debug, Clone)]
pub struct GitFetcher {
    program: String,
}

impl GitFetcher {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for GitFetcher {
    fn default() -> Self {
        Self::new("git")
    }
}

impl RepoFetcher for GitFetcher {
    fn fetch(&self, repo: &RepoSpec, checkout_dir: &Path) -> Result<()> {
        let dir = checkout_dir.to_string_lossy();

        if checkout_dir.exists() {
            debug!(slug = %repo.slug, path = %checkout_dir.display(), "Updating existing clone");
            run_tool(&self.program, &["-C", &*dir, "pull", "--ff-only"], None)?;
            info!(slug = %repo.slug, path = %checkout_dir.display(), "Updated git repository");
            return Ok(());
        }

        if let Some(parent) = checkout_dir.parent() {
            std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }

        let mut args = vec!["clone"];
        if let Some(branch) = repo.branch.as_deref() {
            args.extend(["--branch", branch]);
        }
        args.extend([repo.git.as_str(), &*dir]);
        run_tool(&self.program, &args, None)?;
        info!(
            slug = %repo.slug,
            git = %repo.git,
            branch = repo.branch.as_deref().unwrap_or("<default>"),
            path = %checkout_dir.display(),
            "Cloned git repository"
        );
        Ok(())
    }
}
