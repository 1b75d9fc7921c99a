//! Landing page enumerating every aggregated repo.

use std::fs;
use std::path::PathBuf;

use tracing::info;

use crate::config::AggregateConfig;
use crate::error::{Error, Result};
use crate::layout::{SiteLayout, INDEX_FILE};

/// Renders the Tools landing page: one section per repo, in config order.
pub fn render_tools_index(config: &AggregateConfig) -> String {
    let mut lines: Vec<String> = vec!["# Tools".into(), String::new()];
    if let Some(intro) = config.tools_intro.as_deref() {
        lines.push(intro.trim().to_string());
        lines.push(String::new());
    }
    for repo in &config.repos {
        lines.push(format!("## {}", repo.name));
        lines.push(String::new());
        lines.push(format!("- [{slug}](./{slug}/)", slug = repo.slug));
        lines.push(String::new());
    }
    lines.join("\n")
}

/// Writes the landing page to `<projects_dir>/index.md`.
pub fn write_tools_index(layout: &SiteLayout, config: &AggregateConfig) -> Result<PathBuf> {
    fs::create_dir_all(&layout.projects_dir).map_err(|e| Error::io(&layout.projects_dir, e))?;
    let path = layout.projects_dir.join(INDEX_FILE);
    fs::write(&path, render_tools_index(config)).map_err(|e| Error::io(&path, e))?;
    info!(path = %path.display(), repos = config.repos.len(), "Wrote Tools landing page");
    Ok(path)
}
