//! # contract: seams to the external collaborators
//!
//! The pipeline talks to two external programs: a version-control client that keeps a
//! local clone of every repo fresh, and a static-site builder that renders the
//! assembled tree. Both sit behind a trait so tests can drive the pipeline with
//! deterministic mocks.
//!
//! ## Mocking & Testing
//! - Both traits are annotated for `mockall`; the generated `MockRepoFetcher` and
//!   `MockSiteBuilder` are exported behind the default `test-export-mocks` feature so
//!   integration tests in `tests/` can use them.
//!
//! ## Failure contract
//! - Implementors run the collaborator to completion. A non-zero exit is reported as
//!   [`Error::ExternalTool`](crate::error::Error::ExternalTool) and aborts the run.

use std::path::Path;

#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;

use crate::config::RepoSpec;
use crate::error::Result;

/// Refreshes the local copy of a repo.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
pub trait RepoFetcher {
    /// Clone `repo` into `checkout_dir`, or update the clone already there.
    fn fetch(&self, repo: &RepoSpec, checkout_dir: &Path) -> Result<()>;
}

/// Renders the assembled site source tree.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
pub trait SiteBuilder {
    /// Build the site whose navigation document lives under `root`.
    fn build(&self, root: &Path) -> Result<()>;
}
