//! Navigation model and the per-repo nav builder.
//!
//! A [`NavNode`] is an ordered rose tree: a title pointing either at a page or at an
//! ordered list of children. It serializes to the single-key mapping shape static
//! site builders expect (`{Title: path}` or `{Title: [...]}`).

use std::path::{Component, Path};

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use tracing::debug;

use crate::config::{NavSpecItem, RepoSpec};
use crate::layout::{INDEX_FILE, PROJECTS_SEGMENT};
use crate::listing::title_case;

/// Extension marking a nav token as a page rather than a directory.
pub const DOC_EXTENSION: &str = ".md";

/// Title of the entry produced by the `README` token.
pub const OVERVIEW_TITLE: &str = "Overview";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavNode {
    pub title: String,
    pub target: NavTarget,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum NavTarget {
    Leaf(String),
    Children(Vec<NavNode>),
}

impl NavNode {
    pub fn leaf(title: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            target: NavTarget::Leaf(path.into()),
        }
    }

    pub fn section(title: impl Into<String>, children: Vec<NavNode>) -> Self {
        Self {
            title: title.into(),
            target: NavTarget::Children(children),
        }
    }
}

impl Serialize for NavNode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.title, &self.target)?;
        map.end()
    }
}

/// Site-relative base path of a repo's subtree.
pub fn repo_base(slug: &str) -> String {
    format!("{PROJECTS_SEGMENT}/{slug}")
}

/// Turns one repo's nav spec into nav nodes, in input order, without deduplication.
///
/// Targets are not checked for existence; broken references only surface when the site
/// builder resolves them.
pub fn repo_nav(repo: &RepoSpec) -> Vec<NavNode> {
    let base = repo_base(&repo.slug);
    repo.nav
        .iter()
        .map(|item| match item {
            NavSpecItem::Readme => NavNode::leaf(OVERVIEW_TITLE, format!("{base}/{INDEX_FILE}")),
            NavSpecItem::Titled { title, path } => NavNode::leaf(title, format!("{base}/{path}")),
            NavSpecItem::PathRef(path) if path.ends_with(DOC_EXTENSION) => {
                NavNode::leaf(title_from_path(path), format!("{base}/{path}"))
            }
            NavSpecItem::PathRef(path) => {
                let dir = path.trim_end_matches('/');
                NavNode::leaf(title_from_path(dir), format!("{base}/{dir}/{INDEX_FILE}"))
            }
        })
        .collect()
}

/// The Tools subtree: one section per repo, keyed by repo name, in config order.
pub fn tools_nav(repos: &[RepoSpec]) -> Vec<NavNode> {
    repos
        .iter()
        .map(|repo| {
            let children = repo_nav(repo);
            debug!(repo = %repo.name, entries = children.len(), "Built repo nav");
            NavNode::section(&repo.name, children)
        })
        .collect()
}

struct TitleOverride {
    stem: &'static str,
    /// Directory component that must appear in the path for the override to apply.
    under: &'static str,
    title: &'static str,
}

const TITLE_OVERRIDES: &[TitleOverride] = &[TitleOverride {
    stem: "schemas",
    under: "docs",
    title: "Governance Schemas",
}];

/// Derives a nav title from a file or directory path: the stem with `-`/`_` turned into
/// spaces and title-cased, unless an override names the stem.
pub fn title_from_path(path: &str) -> String {
    let p = Path::new(path);
    let stem = p
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let overridden = TITLE_OVERRIDES.iter().find(|o| {
        stem.eq_ignore_ascii_case(o.stem)
            && p.components()
                .any(|c| c == Component::Normal(o.under.as_ref()))
    });
    if let Some(o) = overridden {
        return o.title.to_string();
    }

    title_case(&stem.replace(['-', '_'], " "))
}
