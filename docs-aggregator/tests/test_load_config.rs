use std::fs::write;

use docs_aggregator::load_config::load_config;
use docs_aggregator_core::config::NavSpecItem;
use tempfile::NamedTempFile;

#[test]
fn loads_a_valid_config_file() {
    let config_yaml = r#"
tools_intro: Maintained by the platform team.
repos:
  - name: Energy Tools
    slug: energy
    git: https://github.com/example/energy.git
    branch: main
    paths: [README.md, "docs/**/*.md"]
    nav:
      - README
      - Usage: docs/usage.md
"#;
    let config_file = NamedTempFile::new().expect("Creating temp config file failed");
    write(config_file.path(), config_yaml).expect("Writing temp config failed");

    let config = load_config(config_file.path()).expect("Config should load");

    assert_eq!(config.repos.len(), 1);
    let repo = &config.repos[0];
    assert_eq!(repo.slug, "energy");
    assert_eq!(repo.branch.as_deref(), Some("main"));
    assert_eq!(
        repo.nav,
        vec![
            NavSpecItem::Readme,
            NavSpecItem::Titled {
                title: "Usage".into(),
                path: "docs/usage.md".into()
            }
        ]
    );
}

#[test]
fn missing_file_names_the_path() {
    let err = load_config("/definitely/not/here/repos.yaml").unwrap_err();
    let msg = format!("{err:#}");
    assert!(msg.contains("/definitely/not/here/repos.yaml"), "{msg}");
}

#[test]
fn invalid_config_is_reported_with_context() {
    let config_file = NamedTempFile::new().unwrap();
    write(config_file.path(), "repos:\n  - {name: A, slug: ../a, git: x}\n").unwrap();

    let err = load_config(config_file.path()).unwrap_err();

    let msg = format!("{err:#}");
    assert!(msg.contains("Invalid config file"), "{msg}");
    assert!(msg.contains("single path segment"), "{msg}");
}
