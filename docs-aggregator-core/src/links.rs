//! Realizes directory aliases by physically duplicating a subtree of the site.
//!
//! The site builder has no notion of one page living under two paths, so a link is a
//! full copy. Targets are reset before every copy, which keeps repeated runs
//! convergent. Must run after every repo has been projected: a link source may be any
//! repo's output.

use std::path::PathBuf;

use tracing::{info, warn};

use crate::config::{LinkSpec, RepoSpec};
use crate::error::Result;
use crate::layout::{remove_path, SiteLayout};
use crate::listing::{synthesize_listing, ListingOutcome};
use crate::tree;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOutcome {
    Materialized {
        source: PathBuf,
        target: PathBuf,
        files: usize,
        listing: Option<ListingOutcome>,
    },
    /// The source did not exist in the site tree; nothing was touched.
    SkippedMissingSource { source: PathBuf },
}

/// Materializes every link of every repo, in config order.
pub fn materialize_links(layout: &SiteLayout, repos: &[RepoSpec]) -> Result<Vec<LinkOutcome>> {
    let mut outcomes = Vec::new();
    for repo in repos {
        for link in &repo.links {
            outcomes.push(materialize_link(layout, link)?);
        }
    }
    Ok(outcomes)
}

pub fn materialize_link(layout: &SiteLayout, link: &LinkSpec) -> Result<LinkOutcome> {
    let source = layout.site_dir.join(&link.source);
    let target = layout.site_dir.join(&link.target);

    if !source.exists() {
        warn!(source = %source.display(), target = %target.display(), "Link source missing, skipping");
        return Ok(LinkOutcome::SkippedMissingSource { source });
    }

    remove_path(&target)?;
    let files = if source.is_dir() {
        tree::mirror_tree(&source, &target)?
    } else {
        tree::copy_file(&source, &target)?;
        1
    };
    info!(source = %source.display(), target = %target.display(), files, "Materialized link");

    let listing = match &link.list {
        Some(cfg) if target.is_dir() => Some(synthesize_listing(&target, link.name.as_deref(), cfg)?),
        _ => None,
    };

    Ok(LinkOutcome::Materialized {
        source,
        target,
        files,
        listing,
    })
}
