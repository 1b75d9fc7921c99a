use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use docs_aggregator_core::project::{project_paths, project_pattern, PatternOutcome};
use pretty_assertions::assert_eq;
use tempfile::tempdir;
use walkdir::WalkDir;

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Relative path -> file content for every file below `root`.
fn snapshot(root: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    WalkDir::new(root)
        .into_iter()
        .map(|e| e.unwrap())
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            let rel = e.path().strip_prefix(root).unwrap().to_path_buf();
            (rel, fs::read(e.path()).unwrap())
        })
        .collect()
}

fn sample_repo(root: &Path) {
    write(&root.join("README.md"), "# Repo\n");
    write(&root.join("docs/README.md"), "# Docs\n");
    write(&root.join("docs/guide.md"), "guide\n");
    write(&root.join("docs/api/Readme.MD"), "# API\n");
    write(&root.join("docs/api/endpoints.md"), "endpoints\n");
    write(&root.join("src/main.rs"), "fn main() {}\n");
    write(&root.join(".git/HEAD"), "ref: refs/heads/main\n");
}

#[test]
fn readmes_become_index_pages_everywhere() {
    let repo = tempdir().unwrap();
    let site = tempdir().unwrap();
    sample_repo(repo.path());

    project_paths(repo.path(), site.path(), &["README.md", "docs"]).unwrap();

    for dir in ["", "docs", "docs/api"] {
        let dir = site.path().join(dir);
        assert!(dir.join("index.md").is_file(), "{} should have index.md", dir.display());
        let leftovers: Vec<_> = fs::read_dir(&dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_lowercase())
            .filter(|n| n == "readme.md")
            .collect();
        assert!(leftovers.is_empty(), "{} still holds {:?}", dir.display(), leftovers);
    }
    assert_eq!(fs::read_to_string(site.path().join("docs/api/index.md")).unwrap(), "# API\n");
    assert!(!site.path().join("src").exists(), "unmatched paths must not be copied");
}

#[test]
fn relative_structure_is_preserved_for_file_globs() {
    let repo = tempdir().unwrap();
    let site = tempdir().unwrap();
    sample_repo(repo.path());

    let outcome = project_pattern(repo.path(), site.path(), "docs/*.md").unwrap();

    assert_eq!(
        outcome,
        PatternOutcome::Copied {
            pattern: "docs/*.md".into(),
            files: 2
        }
    );
    assert!(site.path().join("docs/index.md").is_file());
    assert!(site.path().join("docs/guide.md").is_file());
    assert!(!site.path().join("docs/api").exists());
}

#[test]
fn empty_match_is_a_silent_no_op() {
    let repo = tempdir().unwrap();
    let site = tempdir().unwrap();
    sample_repo(repo.path());

    let outcomes = project_paths(repo.path(), site.path(), &["missing/**", "docs/guide.md"]).unwrap();

    assert_eq!(
        outcomes[0],
        PatternOutcome::NoMatch {
            pattern: "missing/**".into()
        }
    );
    assert!(matches!(outcomes[1], PatternOutcome::Copied { files: 1, .. }));
}

#[test]
fn directories_merge_and_later_patterns_win() {
    let repo = tempdir().unwrap();
    let site = tempdir().unwrap();
    write(&repo.path().join("a/shared/page.md"), "from a\n");
    write(&repo.path().join("a/shared/only-a.md"), "a\n");
    write(&repo.path().join("b/shared/page.md"), "from b\n");
    write(&site.path().join("shared/preexisting.md"), "kept\n");

    // Both directories land under the same relative name once the parent is stripped.
    project_pattern(&repo.path().join("a"), site.path(), "shared").unwrap();
    project_pattern(&repo.path().join("b"), site.path(), "shared").unwrap();

    assert_eq!(fs::read_to_string(site.path().join("shared/page.md")).unwrap(), "from b\n");
    assert!(site.path().join("shared/only-a.md").is_file());
    assert!(site.path().join("shared/preexisting.md").is_file());
}

#[test]
fn readme_wins_over_sibling_index() {
    let repo = tempdir().unwrap();
    let site = tempdir().unwrap();
    write(&repo.path().join("docs/index.md"), "old index\n");
    write(&repo.path().join("docs/README.md"), "readme\n");

    project_pattern(repo.path(), site.path(), "docs").unwrap();

    assert_eq!(fs::read_to_string(site.path().join("docs/index.md")).unwrap(), "readme\n");
}

#[test]
fn vcs_metadata_is_never_copied() {
    let repo = tempdir().unwrap();
    let site = tempdir().unwrap();
    sample_repo(repo.path());

    project_pattern(repo.path(), site.path(), "*").unwrap();

    assert!(!site.path().join(".git").exists());
    assert!(site.path().join("src/main.rs").is_file());
}

#[test]
fn projection_is_idempotent() {
    let repo = tempdir().unwrap();
    let site = tempdir().unwrap();
    sample_repo(repo.path());
    let patterns = ["README.md", "docs/**/*.md", "docs"];

    project_paths(repo.path(), site.path(), &patterns).unwrap();
    let first = snapshot(site.path());
    project_paths(repo.path(), site.path(), &patterns).unwrap();
    let second = snapshot(site.path());

    assert_eq!(first, second);
}

#[test]
fn invalid_pattern_is_an_error() {
    let repo = tempdir().unwrap();
    let site = tempdir().unwrap();

    let err = project_pattern(repo.path(), site.path(), "docs/[").unwrap_err();

    assert!(err.to_string().contains("invalid glob pattern"), "{err}");
}
