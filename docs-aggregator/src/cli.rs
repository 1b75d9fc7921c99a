//! Command-line interface for docs-aggregator: argument parsing and wiring of the real
//! collaborators into the core pipeline.
//!
//! All aggregation logic lives in [`docs_aggregator_core`]. This module resolves paths,
//! loads the configuration file, picks the external programs and prints a short summary.
//!
//! For programmatic or integration use, call [`run`] with a constructed [`Cli`].
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use docs_aggregator_core::contract::SiteBuilder;
use docs_aggregator_core::fetch::GitFetcher;
use docs_aggregator_core::layout::SiteLayout;
use docs_aggregator_core::links::LinkOutcome;
use docs_aggregator_core::pipeline::{assemble, AssembleReport};
use docs_aggregator_core::project::PatternOutcome;
use docs_aggregator_core::site_builder::MkDocsBuilder;

use crate::load_config::load_config;

/// Aggregate documentation from many repositories into one static site.
#[derive(Debug, Parser)]
#[clap(
    name = "docs-aggregator",
    version,
    about = "Aggregate documentation from many git repositories into one MkDocs site"
)]
pub struct Cli {
    /// Project root holding the config, the template and the generated site tree
    #[clap(long, env = "DOCS_AGGREGATOR_ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Repos config file [default: <root>/repos.yaml]
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// Navigation template [default: <root>/mkdocs.tpl.yml]
    #[clap(long)]
    pub template: Option<PathBuf>,

    /// Where the merged site config is written [default: <root>/mkdocs.yml]
    #[clap(long)]
    pub output: Option<PathBuf>,

    /// Version-control program used to clone and update repos
    #[clap(long, env = "DOCS_AGGREGATOR_GIT", default_value = "git")]
    pub git: String,

    /// Site builder program
    #[clap(long, env = "DOCS_AGGREGATOR_MKDOCS", default_value = "mkdocs")]
    pub mkdocs: String,

    /// Stop after writing the site config; do not run the site builder
    #[clap(long)]
    pub no_build: bool,
}

impl Cli {
    /// Resolves the site layout, applying any path overrides.
    pub fn layout(&self) -> SiteLayout {
        let mut layout = SiteLayout::new(&self.root);
        if let Some(config) = &self.config {
            layout = layout.with_config_file(config);
        }
        if let Some(template) = &self.template {
            layout = layout.with_template_file(template);
        }
        if let Some(output) = &self.output {
            layout = layout.with_nav_output(output);
        }
        layout
    }
}

/// CLI logic entrypoint for integration tests and `main()`.
pub fn run(cli: Cli) -> Result<()> {
    tracing::info!("trace_initialised");

    let layout = cli.layout();
    tracing::info!(
        root = %layout.root.display(),
        config = %layout.config_file.display(),
        template = %layout.template_file.display(),
        output = %layout.nav_output.display(),
        "Resolved site layout"
    );
    let config = load_config(&layout.config_file)?;

    let fetcher = GitFetcher::new(cli.git.as_str());
    let mkdocs = MkDocsBuilder::new(cli.mkdocs.as_str());
    let builder: Option<&dyn SiteBuilder> = if cli.no_build { None } else { Some(&mkdocs) };

    match assemble(&layout, &config, &fetcher, builder) {
        Ok(report) => {
            tracing::info!(?report, "Documentation build complete");
            print_summary(&report);
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %e, "Documentation build failed");
            Err(e).context("Documentation build failed")
        }
    }
}

fn print_summary(report: &AssembleReport) {
    for repo in &report.repos {
        let copied: usize = repo
            .patterns
            .iter()
            .map(|p| match p {
                PatternOutcome::Copied { files, .. } => *files,
                PatternOutcome::NoMatch { .. } => 0,
            })
            .sum();
        println!("repo {} ({}): {copied} files", repo.name, repo.slug);
    }
    let skipped = report
        .links
        .iter()
        .filter(|l| matches!(l, LinkOutcome::SkippedMissingSource { .. }))
        .count();
    println!(
        "links: {} materialized, {skipped} skipped",
        report.links.len() - skipped
    );
    println!(
        "nav: tools {}, {} targets normalized",
        if report.nav.tools_injected { "injected" } else { "not found" },
        report.nav.normalized
    );
    println!("site build: {}", if report.built { "done" } else { "skipped" });
}
