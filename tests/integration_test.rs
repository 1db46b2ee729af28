use assert_cmd::Command;
use assert_cmd::cargo;
use mockito::Server;
use predicates::prelude::*;
use tempfile::tempdir;

fn curator_cmd() -> Command {
    Command::new(cargo::cargo_bin!("curator"))
}

#[test]
fn test_end_to_end_refresh() {
    let mut server = Server::new();
    let url = server.url();

    let _mock_doc = server
        .mock("GET", "/interpolate-components")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r##"{
                "name": "interpolate-components",
                "description": "A module to turn strings into React components",
                "keywords": ["react", null, "i18n"],
                "readme": "# interpolate-components\nSupport us: https://opencollective.com/automattic",
                "repository": {
                    "type": "git",
                    "url": "git+https://github.com/Automattic/interpolate-components.git"
                },
                "dist-tags": { "latest": "1.1.0" },
                "versions": { "1.1.0": { "name": "interpolate-components", "version": "1.1.0" } }
            }"##,
        )
        .create();

    let _mock_downloads = server
        .mock("GET", "/downloads/range/last-month/interpolate-components")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "downloads": [
                    { "day": "2016-01-01", "downloads": 40 },
                    { "day": "2016-01-02", "downloads": 2 }
                ]
            }"#,
        )
        .create();

    let _mock_repo = server
        .mock("GET", "/repos/Automattic/interpolate-components")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "description": "Interpolation for translatable strings",
                "homepage": "https://example.com",
                "license": { "key": "gpl-2.0", "name": "GNU General Public License v2.0" },
                "stargazers_count": 77
            }"#,
        )
        .create();

    let root_dir = tempdir().unwrap();

    curator_cmd()
        .arg("refresh")
        .arg("interpolate-components")
        .arg("--root")
        .arg(root_dir.path())
        .arg("--registry-url")
        .arg(&url)
        .arg("--downloads-url")
        .arg(&url)
        .arg("--api-url")
        .arg(&url)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Description: A module to turn strings into React components.",
        ))
        .stdout(predicate::str::contains("Stars:       77"));

    // The package document landed under its slug
    let path = root_dir
        .path()
        .join("packages/interpolate-components.json");
    assert!(path.exists());

    let stored: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(stored["name"], "interpolate-components");
    assert_eq!(
        stored["repo"]["original"],
        "Automattic/interpolate-components"
    );
    assert_eq!(stored["total_downloads"], 42);
    assert_eq!(
        stored["donation_url"],
        "https://opencollective.com/automattic"
    );
    assert_eq!(stored["stars"], 77);
    assert_eq!(stored["license"], "GNU General Public License v2.0");
    assert_eq!(stored["status"], "pending");

    // Stored packages are served without touching the network
    curator_cmd()
        .arg("show")
        .arg("interpolate-components")
        .arg("--root")
        .arg(root_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Status:      pending"));

    curator_cmd()
        .arg("tweet")
        .arg("interpolate-components")
        .arg("--root")
        .arg(root_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "interpolate-components: A module to turn strings into React components \
             https://js.coach/interpolate-components",
        ));

    curator_cmd()
        .arg("list")
        .arg("--root")
        .arg(root_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("interpolate-components"));
}

#[test]
fn test_refresh_unknown_package_fails() {
    let mut server = Server::new();
    let url = server.url();

    let _mock_doc = server.mock("GET", "/ghost").with_status(404).create();

    let root_dir = tempdir().unwrap();

    curator_cmd()
        .arg("refresh")
        .arg("ghost")
        .arg("--root")
        .arg(root_dir.path())
        .arg("--registry-url")
        .arg(&url)
        .arg("--downloads-url")
        .arg(&url)
        .arg("--api-url")
        .arg(&url)
        .assert()
        .failure();

    assert!(!root_dir.path().join("packages/ghost.json").exists());
}

#[test]
fn test_show_before_refresh_fails() {
    let root_dir = tempdir().unwrap();

    curator_cmd()
        .arg("show")
        .arg("never-fetched")
        .arg("--root")
        .arg(root_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("not in the catalog"));
}
