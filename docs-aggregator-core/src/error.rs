//! Error taxonomy shared by every pipeline stage.
//!
//! Only conditions that must abort a run are represented here. The "best effort"
//! branches (a copy pattern matching nothing, a link whose source is absent, a listing
//! page that already exists) are reported as outcome values by the stage that met them.

use std::path::PathBuf;

/// Errors raised by the aggregation pipeline.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[source] serde_yaml::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("unsupported nav entry in repo config: {0}")]
    UnsupportedNavShape(String),

    #[error("navigation template {} must define `nav` as a list", .path.display())]
    TemplateShape { path: PathBuf },

    #[error("failed to read navigation template {}: {source}", .path.display())]
    TemplateParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to serialize navigation document: {0}")]
    NavSerialize(#[source] serde_yaml::Error),

    #[error("{tool} exited with {status}")]
    ExternalTool { tool: String, status: String },

    #[error("failed to launch {tool}: {source}")]
    ToolLaunch {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid glob pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
