//! MkDocs-backed [`SiteBuilder`].

use std::path::Path;

use crate::command::run_tool;
use crate::contract::SiteBuilder;
use crate::error::Result;

/// Runs `mkdocs build --clean` in the project root.
#[derive(Debug, Clone)]
pub struct MkDocsBuilder {
    program: String,
}

impl MkDocsBuilder {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for MkDocsBuilder {
    fn default() -> Self {
        Self::new("mkdocs")
    }
}

impl SiteBuilder for MkDocsBuilder {
    fn build(&self, root: &Path) -> Result<()> {
        run_tool(&self.program, &["build", "--clean"], Some(root))
    }
}
