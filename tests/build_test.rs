//! File round trips through the build collaborators.

use std::fs;

use gazette::{Error, RenderMode, SectionPolicy, build, load_document, load_template};
use tempfile::TempDir;

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn fixture_path(name: &str) -> String {
    format!("{FIXTURES_DIR}/{name}")
}

#[test]
fn test_load_fixture_document() {
    let doc = load_document(fixture_path("content.json")).unwrap();

    assert_eq!(doc.meta.title, "Research Computing Newsletter");
    assert_eq!(doc.meta.edition, "42");
    assert_eq!(doc.english.as_ref().map(|t| t.len()), Some(4));
    assert_eq!(doc.french.as_ref().map(|t| t.len()), Some(2));
}

#[test]
fn test_load_template_is_verbatim() {
    let template = load_template(fixture_path("web.html")).unwrap();
    assert_eq!(template, fs::read_to_string(fixture_path("web.html")).unwrap());
}

#[test]
fn test_build_web_edition() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("index.html");

    let report = build(
        fixture_path("content.json"),
        fixture_path("web.html"),
        &output,
        &RenderMode::Full,
        SectionPolicy::Abort,
    )
    .unwrap();

    let html = fs::read_to_string(&output).unwrap();
    assert_eq!(report.bytes_written, html.len());
    assert!(report.unresolved.is_empty());
    assert!(html.contains("Office hours"));
}

#[test]
fn test_build_email_edition_overwrites_output() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("email.html");
    fs::write(&output, "stale").unwrap();

    build(
        fixture_path("content.json"),
        fixture_path("email.html"),
        &output,
        &RenderMode::abbreviated(),
        SectionPolicy::Abort,
    )
    .unwrap();

    let html = fs::read_to_string(&output).unwrap();
    assert!(!html.contains("stale"));
    assert!(html.contains("Read the full newsletter"));
    assert!(html.contains("style=\""));
}

#[test]
fn test_build_reports_missing_content() {
    let dir = TempDir::new().unwrap();
    let err = build(
        dir.path().join("missing.json"),
        fixture_path("web.html"),
        dir.path().join("out.html"),
        &RenderMode::Full,
        SectionPolicy::Abort,
    )
    .unwrap_err();

    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn test_build_skip_policy_writes_remaining_sections() {
    let dir = TempDir::new().unwrap();
    let template = dir.path().join("template.html");
    let output = dir.path().join("out.html");
    fs::write(&template, "{{ENGLISH_CONTENT}}\n{{FRENCH_CONTENT}}").unwrap();

    let report = build(
        fixture_path("broken.json"),
        &template,
        &output,
        &RenderMode::Full,
        SectionPolicy::Skip,
    )
    .unwrap();

    let html = fs::read_to_string(&output).unwrap();
    assert!(html.contains("Still here"));
    assert!(html.contains("French content coming soon"));
    assert!(report.unresolved.is_empty());
}
