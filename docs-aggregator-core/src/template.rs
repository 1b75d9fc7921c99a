//! Merges the generated Tools subtree into the hand-authored navigation template.
//!
//! The template is hand-written, so everything except a non-list `nav` degrades
//! gracefully: unknown entry shapes pass through verbatim, nested lists are left as the
//! author wrote them, and directory targets are only rewritten when a concrete index
//! page exists in the assembled site tree.

use std::fs;
use std::path::Path;

use serde_yaml::{Mapping, Value};
use tracing::{debug, info, warn};

use crate::config::RepoSpec;
use crate::error::{Error, Result};
use crate::layout::{SiteLayout, INDEX_FILE};
use crate::nav::{tools_nav, NavNode};

/// Title of the template entry whose target is replaced by the generated subtree.
pub const TOOLS_TITLE: &str = "tools";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    pub tools_injected: bool,
    /// Directory targets rewritten to their index page.
    pub normalized: usize,
}

/// Reads the template, merges the Tools subtree for `repos` and writes the navigation
/// document. Must run after every copy and link step, since it inspects the site tree.
pub fn merge_template(layout: &SiteLayout, repos: &[RepoSpec]) -> Result<MergeReport> {
    let path = &layout.template_file;
    let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let doc: Value = serde_yaml::from_str(&content).map_err(|source| Error::TemplateParse {
        path: path.clone(),
        source,
    })?;

    let (merged, report) = merge_nav_document(doc, tools_nav(repos), &layout.site_dir, path)?;

    let rendered = serde_yaml::to_string(&merged).map_err(Error::NavSerialize)?;
    fs::write(&layout.nav_output, rendered).map_err(|e| Error::io(&layout.nav_output, e))?;
    info!(
        output = %layout.nav_output.display(),
        tools_injected = report.tools_injected,
        normalized = report.normalized,
        "Wrote navigation document"
    );
    Ok(report)
}

/// Merges into an already parsed template document. `template_path` is only used for
/// error reporting.
pub fn merge_nav_document(
    doc: Value,
    tools: Vec<NavNode>,
    site_dir: &Path,
    template_path: &Path,
) -> Result<(Value, MergeReport)> {
    let shape_error = || Error::TemplateShape {
        path: template_path.to_path_buf(),
    };
    let mut config = match doc {
        Value::Mapping(map) => map,
        Value::Null => Mapping::new(),
        _ => return Err(shape_error()),
    };
    let entries = match config.get("nav") {
        Some(Value::Sequence(entries)) => entries.clone(),
        _ => return Err(shape_error()),
    };

    let tools_value = serde_yaml::to_value(tools).map_err(Error::NavSerialize)?;
    let mut report = MergeReport::default();
    let mut merged = Vec::with_capacity(entries.len());

    for entry in &entries {
        // Only `{title: target}` entries are interpreted; anything else is kept as is.
        let Some((title, target)) = single_pair(entry) else {
            merged.push(entry.clone());
            continue;
        };

        if title.trim().eq_ignore_ascii_case(TOOLS_TITLE) {
            debug!(title = %title, "Injecting generated Tools subtree");
            merged.push(single_entry(title, tools_value.clone()));
            report.tools_injected = true;
            continue;
        }

        let target = match target {
            Value::String(raw) => match normalize_target(raw, site_dir) {
                Some(resolved) => {
                    debug!(title = %title, from = %raw, to = %resolved, "Normalized directory target");
                    report.normalized += 1;
                    Value::String(resolved)
                }
                None => target.clone(),
            },
            other => other.clone(),
        };
        merged.push(single_entry(title, target));
    }

    if !report.tools_injected {
        warn!(template = %template_path.display(), "Template has no Tools entry; generated nav not injected");
    }

    config.insert(Value::String("nav".into()), Value::Sequence(merged));
    Ok((Value::Mapping(config), report))
}

/// Rewrites a directory target to its index page when that page exists under
/// `site_dir`. Returns `None` when the target should pass through unchanged.
pub fn normalize_target(raw: &str, site_dir: &Path) -> Option<String> {
    if raw.is_empty() || raw.starts_with('/') || raw.contains("://") {
        return None;
    }
    let candidate = site_dir.join(raw).join(INDEX_FILE);
    if !candidate.is_file() {
        return None;
    }
    if raw.ends_with('/') {
        Some(format!("{raw}{INDEX_FILE}"))
    } else {
        Some(format!("{raw}/{INDEX_FILE}"))
    }
}

fn single_pair(entry: &Value) -> Option<(&str, &Value)> {
    let Value::Mapping(map) = entry else {
        return None;
    };
    if map.len() != 1 {
        return None;
    }
    match map.iter().next() {
        Some((Value::String(title), target)) => Some((title.as_str(), target)),
        _ => None,
    }
}

fn single_entry(title: &str, target: Value) -> Value {
    let mut map = Mapping::new();
    map.insert(Value::String(title.to_string()), target);
    Value::Mapping(map)
}
