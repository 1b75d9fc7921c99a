use docs_aggregator_core::config::{NavSpecItem, RepoSpec};
use docs_aggregator_core::nav::{repo_nav, tools_nav, NavNode, NavTarget};
use pretty_assertions::assert_eq;

fn repo(name: &str, slug: &str, nav: Vec<NavSpecItem>) -> RepoSpec {
    RepoSpec {
        name: name.into(),
        slug: slug.into(),
        git: format!("https://example.org/{slug}.git"),
        branch: None,
        paths: vec![],
        nav,
        links: vec![],
    }
}

#[test]
fn readme_pathref_and_titled_in_order() {
    let spec = repo(
        "Energy Tools",
        "energy",
        vec![
            NavSpecItem::Readme,
            NavSpecItem::PathRef("guides".into()),
            NavSpecItem::Titled {
                title: "API".into(),
                path: "reference/api.md".into(),
            },
        ],
    );

    assert_eq!(
        repo_nav(&spec),
        vec![
            NavNode::leaf("Overview", "projects/energy/index.md"),
            NavNode::leaf("Guides", "projects/energy/guides/index.md"),
            NavNode::leaf("API", "projects/energy/reference/api.md"),
        ]
    );
}

#[test]
fn path_tokens_resolve_by_shape() {
    struct TestCase {
        token: &'static str,
        title: &'static str,
        target: &'static str,
    }

    let cases = vec![
        TestCase {
            token: "docs/getting-started.md",
            title: "Getting Started",
            target: "projects/r/docs/getting-started.md",
        },
        TestCase {
            token: "docs/user_guide/",
            title: "User Guide",
            target: "projects/r/docs/user_guide/index.md",
        },
        TestCase {
            token: "docs/schemas",
            title: "Governance Schemas",
            target: "projects/r/docs/schemas/index.md",
        },
        TestCase {
            token: "schemas",
            title: "Schemas",
            target: "projects/r/schemas/index.md",
        },
    ];

    for tc in cases {
        let nav = repo_nav(&repo("R", "r", vec![NavSpecItem::PathRef(tc.token.into())]));
        assert_eq!(nav, vec![NavNode::leaf(tc.title, tc.target)], "token {}", tc.token);
    }
}

#[test]
fn duplicates_are_kept() {
    let nav = repo_nav(&repo(
        "R",
        "r",
        vec![NavSpecItem::Readme, NavSpecItem::Readme],
    ));
    assert_eq!(nav.len(), 2);
    assert_eq!(nav[0], nav[1]);
}

#[test]
fn tools_nav_keeps_config_order_not_alphabetical() {
    let repos = vec![
        repo("Zeta Service", "a", vec![NavSpecItem::Readme]),
        repo("Alpha Service", "b", vec![NavSpecItem::Readme]),
    ];

    let tools = tools_nav(&repos);

    let titles: Vec<_> = tools.iter().map(|n| n.title.as_str()).collect();
    assert_eq!(titles, vec!["Zeta Service", "Alpha Service"]);
    assert_eq!(
        tools[1].target,
        NavTarget::Children(vec![NavNode::leaf("Overview", "projects/b/index.md")])
    );
}
