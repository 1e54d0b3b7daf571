//! Template assembly.
//!
//! A template is plain HTML carrying `{{TOKEN}}` placeholders. Assembly
//! substitutes edition metadata, header and hero copy, then each language
//! track's rendered sections. Tokens without a value are left verbatim;
//! [`unresolved_placeholders`] reports them.
//!
//! Abbreviated output additionally goes through [`inline_css`] so it
//! survives mail clients that strip `<style>` blocks.
//!
//! # Example
//!
//! ```
//! use gazette::{assemble, ContentDocument, RenderMode};
//!
//! let doc = ContentDocument::from_json(r#"{"meta": {"title": "Issue 12"}, "english": []}"#).unwrap();
//! let html = assemble("<h1>{{TITLE}}</h1>{{FRENCH_CONTENT}}", &doc, &RenderMode::Full).unwrap();
//!
//! assert!(html.starts_with("<h1>Issue 12</h1>"));
//! assert!(html.contains("French content coming soon"));
//! ```

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::content::{ContentDocument, Language};
use crate::error::Result;
use crate::inline::inline_css;
use crate::render::{RenderMode, SectionPolicy, render_track};

pub const TITLE: &str = "{{TITLE}}";
pub const SUBTITLE: &str = "{{SUBTITLE}}";
pub const TAGLINE: &str = "{{TAGLINE}}";
pub const HERO_TITLE: &str = "{{HERO_TITLE}}";
pub const HERO_DESCRIPTION: &str = "{{HERO_DESCRIPTION}}";
pub const DATE: &str = "{{DATE}}";
pub const EDITION: &str = "{{EDITION}}";
pub const FOOTER: &str = "{{FOOTER}}";

/// Substituted for `{{FRENCH_CONTENT}}` when the document has no French track.
pub const FRENCH_FALLBACK: &str = "<p class=\"fallback-notice\">French content coming soon</p>";

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{[A-Z0-9_]+\}\}").expect("placeholder pattern is valid"));

/// Assembles documents into a template under one mode and section policy.
#[derive(Debug, Clone, Default)]
pub struct Assembler {
    mode: RenderMode,
    policy: SectionPolicy,
}

impl Assembler {
    pub fn new(mode: RenderMode) -> Self {
        Self {
            mode,
            policy: SectionPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: SectionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn mode(&self) -> &RenderMode {
        &self.mode
    }

    /// Fill `template` from `document`.
    pub fn assemble(&self, template: &str, document: &ContentDocument) -> Result<String> {
        let mut values = scalar_values(document);

        for language in Language::ALL {
            let fragment = match document.track(language) {
                Some(track) => {
                    log::debug!("rendering {} track", language.name());
                    render_track(track, &self.mode, self.policy)?
                }
                None if language == Language::French => {
                    log::debug!("no french track, using fallback");
                    FRENCH_FALLBACK.to_string()
                }
                None => continue,
            };
            values.push((language.placeholder(), Cow::Owned(fragment)));
        }

        let mut html = substitute(template, &values);

        if self.mode.is_abbreviated() {
            html = inline_css(&html)?;
        }

        Ok(html)
    }
}

/// Fill `template` from `document`, aborting on the first broken section.
pub fn assemble(template: &str, document: &ContentDocument, mode: &RenderMode) -> Result<String> {
    Assembler::new(mode.clone()).assemble(template, document)
}

/// Token values taken straight from the document.
fn scalar_values(document: &ContentDocument) -> Vec<(&'static str, Cow<'_, str>)> {
    let mut values = vec![
        (TITLE, Cow::Borrowed(document.meta.title.as_str())),
        (SUBTITLE, Cow::Borrowed(document.header.subtitle.as_str())),
        (TAGLINE, Cow::Borrowed(document.header.tagline.as_str())),
        (HERO_TITLE, Cow::Borrowed(document.hero.title.as_str())),
        (HERO_DESCRIPTION, Cow::Borrowed(document.hero.description.as_str())),
        (DATE, Cow::Borrowed(document.meta.date.as_str())),
        (EDITION, Cow::Borrowed(document.meta.edition.as_str())),
    ];
    if let Some(footer) = &document.footer {
        values.push((FOOTER, Cow::Borrowed(footer.text.as_str())));
    }
    values
}

/// Replace every known token in one pass over `template`.
///
/// Substituted text is never scanned again, so a value that happens to
/// contain a token is inserted as written.
fn substitute(template: &str, values: &[(&str, Cow<'_, str>)]) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| {
            let token = &caps[0];
            values
                .iter()
                .find(|(known, _)| *known == token)
                .map_or_else(|| token.to_string(), |(_, value)| value.to_string())
        })
        .into_owned()
}

/// Placeholder tokens still present in `html`, in first-occurrence order.
pub fn unresolved_placeholders(html: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for m in PLACEHOLDER.find_iter(html) {
        if !found.iter().any(|t| t == m.as_str()) {
            found.push(m.as_str().to_string());
        }
    }
    found
}
