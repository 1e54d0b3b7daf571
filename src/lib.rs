//! # gazette
//!
//! Builds bilingual HTML newsletters from a JSON content document and an HTML
//! template.
//!
//! ## Features
//!
//! - Typed content sections with a generic fallback for unknown types
//! - Markdown-style `[label](url)` links rendered as new-tab anchors
//! - Full web edition, or an abbreviated email edition with a read-more link
//! - CSS inlining for the email edition, so it survives mail clients that
//!   strip `<style>` blocks
//!
//! ## Quick Start
//!
//! ```no_run
//! use gazette::{RenderMode, SectionPolicy, build};
//!
//! // Hosted web edition
//! build("content.json", "web.html", "index.html", &RenderMode::Full, SectionPolicy::Abort).unwrap();
//!
//! // Email edition: first section per language, styles inlined
//! build("content.json", "email.html", "email.out.html", &RenderMode::abbreviated(), SectionPolicy::Abort).unwrap();
//! ```
//!
//! ## Working with Documents
//!
//! ```
//! use gazette::{Assembler, ContentDocument, RenderMode, SectionPolicy};
//!
//! let doc = ContentDocument::from_json(r#"{
//!     "meta": {"title": "Issue 7"},
//!     "english": [
//!         {
//!             "type": "aurora",
//!             "title": "Welcome",
//!             "content": "See [the docs](https://docs.example).",
//!             "involvement": {"title": "Get involved", "items": []},
//!             "community": "Say hello.",
//!             "feedback": {"text": "Tell us more.", "buttons": []}
//!         },
//!         {"type": "mystery", "title": "Ignored payload"}
//!     ]
//! }"#).unwrap();
//!
//! let html = Assembler::new(RenderMode::Full)
//!     .with_policy(SectionPolicy::Skip)
//!     .assemble("<title>{{TITLE}}</title>{{ENGLISH_CONTENT}}", &doc)
//!     .unwrap();
//!
//! assert!(html.contains("<title>Issue 7</title>"));
//! assert!(html.contains(r#"<a href="https://docs.example" target="_blank""#));
//! ```

pub mod assemble;
pub mod build;
pub mod content;
pub mod error;
pub mod inline;
pub mod render;

pub use assemble::{Assembler, FRENCH_FALLBACK, assemble, unresolved_placeholders};
pub use build::{BuildReport, build, load_document, load_template, write_newsletter};
pub use content::{ContentDocument, Language, LanguageTrack, Section, SectionKind};
pub use error::{Error, Result};
pub use inline::inline_css;
pub use render::{
    ReadMoreLink, RenderMode, SectionPolicy, format_links, render_section, render_sections,
    render_track,
};
