//! Section dispatch tests.
//!
//! Every declared type, plus unknown ones, renders through the public
//! dispatcher with its title and content intact.

use gazette::{Error, LanguageTrack, RenderMode, Section, SectionKind, render_section, render_sections};
use serde_json::{Value, json};

// ============================================================================
// Helpers
// ============================================================================

const TITLE: &str = "Section <em>title</em>";
const CONTENT: &str = "Body with <strong>markup</strong> &amp; entities";

/// A minimal valid payload for each declared type.
fn payload(section_type: &str) -> Value {
    let base = json!({"title": TITLE, "content": CONTENT});
    let extra = match section_type {
        "technology_stack" => json!({"subsections": []}),
        "container_images" => json!({"code_block": ["docker pull x"]}),
        "implementation" => json!({"phases": []}),
        "support" => json!({"list_items": ["a"]}),
        "cta" => json!({"buttons": []}),
        "aurora" => json!({
            "involvement": {"title": "Involve", "items": []},
            "community": "Community",
            "feedback": {"text": "Feedback", "buttons": []}
        }),
        _ => json!({}),
    };

    let mut merged = base;
    if let (Value::Object(target), Value::Object(extra)) = (&mut merged, extra) {
        target.extend(extra);
    }
    merged
}

const DECLARED: [&str; 8] = [
    "main_announcement",
    "technology_stack",
    "container_images",
    "implementation",
    "support",
    "cta",
    "ml_capabilities",
    "aurora",
];

// ============================================================================
// Dispatch
// ============================================================================

#[test]
fn test_every_type_keeps_title_and_content() {
    for section_type in DECLARED.iter().chain(&["newsletter_trivia", ""]) {
        let section = Section::new(*section_type, payload(section_type));
        let html = render_section(&section)
            .unwrap_or_else(|e| panic!("{section_type} failed: {e}"));

        assert!(html.contains(TITLE), "{section_type}: title missing");
        assert!(html.contains(CONTENT), "{section_type}: content missing");
        assert!(html.starts_with("<div class=\"section"));
        assert!(html.ends_with("</div>"));
    }
}

#[test]
fn test_unknown_type_uses_generic_container() {
    let section = Section::new("poll", payload("poll"));
    assert_eq!(section.kind(), SectionKind::Generic);

    let html = render_section(&section).unwrap();
    assert!(html.starts_with("<div class=\"section\">"));
}

#[test]
fn test_missing_required_field_names_type() {
    let section = Section::new("cta", json!({"title": "Join", "content": "Now"}));
    let err = render_section(&section).unwrap_err();

    match &err {
        Error::MissingRequiredField { section_type, .. } => assert_eq!(section_type, "cta"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().contains("buttons"));
}

// ============================================================================
// Type-specific rendering
// ============================================================================

#[test]
fn test_main_announcement_optional_blocks() {
    let bare = Section::new("main_announcement", payload("main_announcement"));
    let html = render_section(&bare).unwrap();
    assert!(!html.contains("highlight-box"));
    assert!(!html.contains("stats-section"));

    let full = Section::new(
        "main_announcement",
        json!({
            "title": TITLE,
            "content": CONTENT,
            "stats": {"title": "Numbers", "items": [{"number": 3, "label": "Sites"}]},
            "highlight_box": {"title": "Highlights", "items": ["One", "Two"]}
        }),
    );
    let html = render_section(&full).unwrap();
    let highlight = html.find("highlight-box").unwrap();
    let stats = html.find("stats-section").unwrap();
    assert!(highlight < stats);
    assert!(html.contains("<span class=\"stat-number\">3</span>"));
}

#[test]
fn test_container_images_lines_in_order() {
    let section = Section::new(
        "container_images",
        json!({
            "title": "Images",
            "content": "Pull them",
            "code_block": ["first line", "second line", "third line"]
        }),
    );
    let html = render_section(&section).unwrap();

    assert_eq!(html.matches("<code class=\"code-line\">").count(), 3);
    let positions: Vec<_> = ["first line", "second line", "third line"]
        .iter()
        .map(|line| html.find(line).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_support_contact_is_mailto() {
    let section = Section::new(
        "support",
        json!({
            "title": "Help",
            "content": "Ask us",
            "list_items": ["Docs"],
            "contact": {"text": "Email:", "email": "help@example.org"}
        }),
    );
    let html = render_section(&section).unwrap();
    assert!(html.contains("href=\"mailto:help@example.org\""));
}

#[test]
fn test_ml_capabilities_blocks_are_independent() {
    let section = Section::new(
        "ml_capabilities",
        json!({
            "title": "ML",
            "content": "Models",
            "resources": {
                "title": "Resources",
                "intro": "Start here",
                "links": [{"text": "Guide", "url": "https://guide.example"}]
            }
        }),
    );
    let html = render_section(&section).unwrap();

    assert!(html.contains("class=\"resources\""));
    assert!(html.contains("target=\"_blank\""));
    assert!(!html.contains("recording-links"));
    assert!(!html.contains("feature-list"));
}

#[test]
fn test_aurora_formats_links_and_opens_feedback_in_new_tab() {
    let section = Section::new(
        "aurora",
        json!({
            "title": "Aurora",
            "content": "See [news](https://news.example)",
            "involvement": {"title": "Involve", "items": ["Join"]},
            "community": "Visit [forum](https://forum.example)",
            "feedback": {"text": "Tell us", "buttons": [{"text": "Form", "url": "https://form.example"}]}
        }),
    );
    let html = render_section(&section).unwrap();

    assert!(html.contains(">news</a>"));
    assert!(html.contains(">forum</a>"));
    assert!(!html.contains("[news]"));
    assert!(html.contains(
        "<a href=\"https://form.example\" class=\"cta-button\" target=\"_blank\""
    ));
}

// ============================================================================
// Track rendering
// ============================================================================

fn track_abc() -> LanguageTrack {
    LanguageTrack::new(
        ["Alpha", "Bravo", "Charlie"]
            .iter()
            .map(|t| Section::new("generic", json!({"title": t, "content": format!("{t} text")})))
            .collect(),
    )
}

#[test]
fn test_full_mode_renders_in_order_separated_by_blank_line() {
    let html = render_sections(&track_abc(), &RenderMode::Full).unwrap();
    let fragments: Vec<_> = html.split("\n\n").collect();

    assert_eq!(fragments.len(), 3);
    assert!(fragments[0].contains("Alpha"));
    assert!(fragments[1].contains("Bravo"));
    assert!(fragments[2].contains("Charlie"));
    assert!(!html.contains("read-more"));
}

#[test]
fn test_abbreviated_mode_keeps_first_section_and_link() {
    let html = render_sections(&track_abc(), &RenderMode::abbreviated()).unwrap();

    assert!(html.contains("Alpha"));
    assert!(!html.contains("Bravo"));
    assert!(!html.contains("Charlie"));
    assert!(html.ends_with("</a>\n</div>"));
    assert!(html.contains("read-more"));
}

#[test]
fn test_abbreviated_empty_track_is_empty() {
    let html = render_sections(&LanguageTrack::default(), &RenderMode::abbreviated()).unwrap();
    assert!(html.is_empty());
}
