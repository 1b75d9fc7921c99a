//! Configuration model: which repos to aggregate and how.
//!
//! Parsed once per build from a single YAML document. Loosely shaped YAML (nav tokens
//! that may be strings or mappings) is decoded here into tagged variants so nothing
//! downstream inspects raw shapes again.

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::Value;
use tracing::{debug, info};

use crate::error::{Error, Result};

/// The whole configuration document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AggregateConfig {
    /// Paragraph rendered under the heading of the Tools landing page.
    #[serde(default)]
    pub tools_intro: Option<String>,
    #[serde(default)]
    pub repos: Vec<RepoSpec>,
}

impl AggregateConfig {
    /// Parses and validates a configuration document.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: AggregateConfig = serde_yaml::from_str(content).map_err(Error::ConfigParse)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects configurations that would break the one-slug-one-directory invariant or
    /// let a destructive reset escape the site tree.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for repo in &self.repos {
            validate_slug(&repo.slug)?;
            if !seen.insert(repo.slug.as_str()) {
                return Err(Error::InvalidConfig(format!(
                    "duplicate slug {:?}",
                    repo.slug
                )));
            }
            for pattern in &repo.paths {
                validate_relative(pattern, &format!("copy pattern of repo {:?}", repo.slug))?;
            }
            for link in &repo.links {
                validate_relative(&link.source, "link source")?;
                validate_relative(&link.target, "link target")?;
                let (source, target) = (normal_parts(&link.source), normal_parts(&link.target));
                if source.starts_with(&target) || target.starts_with(&source) {
                    return Err(Error::InvalidConfig(format!(
                        "link {:?} -> {:?} must not nest source and target",
                        link.source, link.target
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn trace_loaded(&self) {
        info!(repos_count = self.repos.len(), "Loaded aggregation config");
        for repo in &self.repos {
            repo.trace_loaded();
        }
        debug!(?self, "Config loaded (full debug)");
    }
}

/// One external documentation source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoSpec {
    pub name: String,
    /// Directory and URL segment; unique across the config.
    pub slug: String,
    /// Clone URL handed to the version-control collaborator.
    #[serde(alias = "source")]
    pub git: String,
    /// Branch cloned and tracked; the remote default branch when absent.
    #[serde(default)]
    pub branch: Option<String>,
    /// Glob patterns evaluated against the repo checkout, in order.
    #[serde(default)]
    pub paths: Vec<String>,
    #[serde(default)]
    pub nav: Vec<NavSpecItem>,
    #[serde(default)]
    pub links: Vec<LinkSpec>,
}

impl RepoSpec {
    pub fn trace_loaded(&self) {
        info!(
            name = %self.name,
            slug = %self.slug,
            git = %self.git,
            branch = self.branch.as_deref().unwrap_or("<default>"),
            paths = self.paths.len(),
            nav = self.nav.len(),
            links = self.links.len(),
            "Loaded repo"
        );
    }
}

/// One entry of a repo's navigation spec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum NavSpecItem {
    /// The literal `README` token: the repo's landing page.
    Readme,
    /// A bare file or directory path.
    PathRef(String),
    /// An explicit `{title: path}` mapping.
    Titled { title: String, path: String },
}

impl NavSpecItem {
    /// Decodes a raw YAML nav entry.
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::String(token) if token.eq_ignore_ascii_case("README") => Ok(NavSpecItem::Readme),
            Value::String(token) => Ok(NavSpecItem::PathRef(token.clone())),
            Value::Mapping(map) if map.len() == 1 => match map.iter().next() {
                Some((Value::String(title), Value::String(path))) => Ok(NavSpecItem::Titled {
                    title: title.clone(),
                    path: path.clone(),
                }),
                _ => Err(Error::UnsupportedNavShape(describe(value))),
            },
            _ => Err(Error::UnsupportedNavShape(describe(value))),
        }
    }
}

impl<'de> Deserialize<'de> for NavSpecItem {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        NavSpecItem::from_value(&value).map_err(serde::de::Error::custom)
    }
}

fn describe(value: &Value) -> String {
    serde_yaml::to_string(value)
        .map(|s| s.trim_end().to_string())
        .unwrap_or_else(|_| format!("{value:?}"))
}

/// A directory duplicated to a second path of the site tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkSpec {
    /// Relative to the site root.
    pub source: String,
    /// Relative to the site root; reset on every run.
    pub target: String,
    /// Heading of the generated listing page.
    #[serde(default)]
    pub name: Option<String>,
    /// Generate a listing page on the target when present.
    #[serde(default)]
    pub list: Option<ListingConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingConfig {
    #[serde(default)]
    pub recursive: bool,
    /// File suffixes (with leading dot) included in the listing.
    #[serde(
        default = "default_extensions",
        deserialize_with = "deserialize_extensions"
    )]
    pub extensions: Vec<String>,
    #[serde(default)]
    pub sort: SortMode,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            recursive: false,
            extensions: default_extensions(),
            sort: SortMode::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Case-insensitive by file name.
    #[default]
    Alpha,
}

fn default_extensions() -> Vec<String> {
    vec![".md".to_string()]
}

fn deserialize_extensions<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<String>::deserialize(deserializer)?;
    Ok(raw.into_iter().map(normalize_extension).collect())
}

pub(crate) fn normalize_extension(ext: String) -> String {
    if ext.starts_with('.') {
        ext
    } else {
        format!(".{ext}")
    }
}

fn validate_slug(slug: &str) -> Result<()> {
    let bad = slug.is_empty()
        || slug == "."
        || slug == ".."
        || slug.contains('/')
        || slug.contains('\\');
    if bad {
        return Err(Error::InvalidConfig(format!(
            "slug {slug:?} must be a single path segment"
        )));
    }
    Ok(())
}

/// The named segments of a relative path; `./docs` and `docs` compare equal.
fn normal_parts(path: &str) -> PathBuf {
    Path::new(path)
        .components()
        .filter(|c| matches!(c, Component::Normal(_)))
        .collect()
}

fn validate_relative(path: &str, what: &str) -> Result<()> {
    let p = Path::new(path);
    let mut normal = 0;
    for component in p.components() {
        match component {
            Component::Normal(_) => normal += 1,
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(Error::InvalidConfig(format!(
                    "{what} {path:?} must stay inside its root"
                )));
            }
        }
    }
    if normal == 0 {
        return Err(Error::InvalidConfig(format!(
            "{what} {path:?} must name something below its root"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nav_tokens_decode_to_variants() {
        let yaml = "- README\n- readme\n- guides/\n- {API: reference/api.md}\n";
        let items: Vec<NavSpecItem> = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            items,
            vec![
                NavSpecItem::Readme,
                NavSpecItem::Readme,
                NavSpecItem::PathRef("guides/".into()),
                NavSpecItem::Titled {
                    title: "API".into(),
                    path: "reference/api.md".into()
                },
            ]
        );
    }

    #[test]
    fn nested_list_nav_entry_is_rejected() {
        let err = serde_yaml::from_str::<Vec<NavSpecItem>>("- [a, b]\n").unwrap_err();
        assert!(err.to_string().contains("unsupported nav entry"), "{err}");
    }

    #[test]
    fn multi_key_mapping_is_rejected() {
        let value: Value = serde_yaml::from_str("{A: a.md, B: b.md}").unwrap();
        assert!(matches!(
            NavSpecItem::from_value(&value),
            Err(Error::UnsupportedNavShape(_))
        ));
    }

    #[test]
    fn extensions_gain_leading_dot() {
        let cfg: ListingConfig = serde_yaml::from_str("extensions: [md, .txt]").unwrap();
        assert_eq!(cfg.extensions, vec![".md", ".txt"]);
        assert_eq!(cfg.sort, SortMode::Alpha);
        assert!(!cfg.recursive);
    }

    #[test]
    fn unknown_sort_mode_is_rejected() {
        assert!(serde_yaml::from_str::<ListingConfig>("sort: mtime").is_err());
    }

    #[test]
    fn relative_path_rules() {
        assert!(validate_relative("docs/**/*.md", "p").is_ok());
        assert!(validate_relative("./docs", "p").is_ok());
        assert!(validate_relative("", "p").is_err());
        assert!(validate_relative(".", "p").is_err());
        assert!(validate_relative("../etc", "p").is_err());
        assert!(validate_relative("/etc", "p").is_err());
    }

    #[test]
    fn normal_parts_drop_current_dir_segments() {
        assert_eq!(normal_parts("./docs/./copy"), PathBuf::from("docs/copy"));
        assert_eq!(normal_parts("docs/"), normal_parts("./docs"));
    }
}
