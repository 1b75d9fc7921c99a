//! High-level pipeline: refresh → project → index → link → merge nav → build.
//!
//! This module sequences every stage of a documentation build for the repos declared in
//! the loaded config:
//!   - Refreshes each repo's local clone through a [`RepoFetcher`]
//!   - Resets the repo's site subtree and repopulates it from its copy patterns
//!   - Writes the Tools landing page
//!   - Materializes link aliases (any repo's output may be a link source)
//!   - Merges the generated nav into the template (inspects the finished tree)
//!   - Hands the assembled tree to a [`SiteBuilder`]
//!
//! # Responsibilities
//! - Strictly sequential, fail-fast orchestration: a failed refresh or build aborts the
//!   run with that error
//! - Idempotence by construction: every repo subtree and link target is deleted and
//!   rebuilt, so repeated runs over unchanged inputs converge
//! - Best-effort branches (empty glob matches, missing link sources) are carried in the
//!   returned [`AssembleReport`] instead of failing the build
//!
//! # Navigation
//! - Main entrypoint: [`assemble`]
//! - Per-repo step: [`sync_repo`]

use std::path::PathBuf;

use tracing::{error, info};

use crate::config::{AggregateConfig, RepoSpec};
use crate::contract::{RepoFetcher, SiteBuilder};
use crate::error::Result;
use crate::layout::{reset_dir, SiteLayout};
use crate::links::{materialize_links, LinkOutcome};
use crate::project::{project_paths, PatternOutcome};
use crate::template::{merge_template, MergeReport};
use crate::tools_index::write_tools_index;

/// What a full run did.
#[derive(Debug)]
pub struct AssembleReport {
    pub repos: Vec<RepoReport>,
    pub tools_index: PathBuf,
    pub links: Vec<LinkOutcome>,
    pub nav: MergeReport,
    /// Whether the site builder ran.
    pub built: bool,
}

#[derive(Debug)]
pub struct RepoReport {
    pub name: String,
    pub slug: String,
    pub patterns: Vec<PatternOutcome>,
}

/// Runs the whole pipeline. `builder` may be `None` to stop after the navigation
/// document is written.
pub fn assemble(
    layout: &SiteLayout,
    config: &AggregateConfig,
    fetcher: &dyn RepoFetcher,
    builder: Option<&dyn SiteBuilder>,
) -> Result<AssembleReport> {
    info!(root = %layout.root.display(), repos = config.repos.len(), "[ASSEMBLE] Starting documentation build");
    layout.ensure_dirs()?;

    let mut repos = Vec::with_capacity(config.repos.len());
    for repo in &config.repos {
        repos.push(sync_repo(layout, repo, fetcher)?);
    }

    let tools_index = write_tools_index(layout, config)?;

    let links = materialize_links(layout, &config.repos)?;
    info!(links = links.len(), "[ASSEMBLE][LINKS] Link aliases processed");

    let nav = merge_template(layout, &config.repos)?;

    let built = match builder {
        Some(builder) => {
            info!("[ASSEMBLE][BUILD] Invoking site builder");
            if let Err(e) = builder.build(&layout.root) {
                error!(error = %e, "[ASSEMBLE][ERROR] Site build failed");
                return Err(e);
            }
            true
        }
        None => {
            info!("[ASSEMBLE][BUILD] Site build skipped");
            false
        }
    };

    Ok(AssembleReport {
        repos,
        tools_index,
        links,
        nav,
        built,
    })
}

/// Refreshes one repo and rebuilds its site subtree from scratch.
pub fn sync_repo(layout: &SiteLayout, repo: &RepoSpec, fetcher: &dyn RepoFetcher) -> Result<RepoReport> {
    let checkout = layout.checkout_dir(&repo.slug);
    info!(slug = %repo.slug, path = %checkout.display(), "[ASSEMBLE][FETCH] Refreshing repo");
    if let Err(e) = fetcher.fetch(repo, &checkout) {
        error!(slug = %repo.slug, error = %e, "[ASSEMBLE][ERROR] Repo refresh failed");
        return Err(e);
    }

    let site_dir = layout.repo_site_dir(&repo.slug);
    reset_dir(&site_dir)?;
    let patterns = project_paths(&checkout, &site_dir, &repo.paths)?;
    let empty = patterns
        .iter()
        .filter(|o| matches!(o, PatternOutcome::NoMatch { .. }))
        .count();
    info!(
        slug = %repo.slug,
        patterns = patterns.len(),
        empty,
        "[ASSEMBLE][COPY] Repo subtree rebuilt"
    );

    Ok(RepoReport {
        name: repo.name.clone(),
        slug: repo.slug.clone(),
        patterns,
    })
}
