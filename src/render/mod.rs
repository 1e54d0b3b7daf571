//! Section rendering.
//!
//! [`render_section`] dispatches a [`Section`] to the renderer for its type,
//! falling back to a plain heading and paragraph for unknown types.
//! [`render_sections`] renders a whole [`LanguageTrack`] under a
//! [`RenderMode`]:
//!
//! - [`RenderMode::Full`] renders every section in order.
//! - [`RenderMode::Abbreviated`] renders the first section only and appends
//!   a link to the full edition.
//!
//! # Example
//!
//! ```
//! use gazette::content::{LanguageTrack, Section};
//! use gazette::render::{render_sections, RenderMode};
//! use serde_json::json;
//!
//! let track = LanguageTrack::new(vec![
//!     Section::new("generic", json!({"title": "Hello", "content": "First"})),
//!     Section::new("generic", json!({"title": "Again", "content": "Second"})),
//! ]);
//!
//! let html = render_sections(&track, &RenderMode::Full).unwrap();
//! assert!(html.find("First").unwrap() < html.find("Second").unwrap());
//! ```

mod links;
mod sections;

pub use links::format_links;

use crate::content::{LanguageTrack, Section, SectionBody};
use crate::error::Result;

/// Hosted web edition linked from abbreviated output unless configured.
pub const DEFAULT_FULL_EDITION_URL: &str = "https://newsletter.example.org/";

pub const DEFAULT_READ_MORE_LABEL: &str = "Read the full newsletter";

/// Separator between rendered fragments.
pub const FRAGMENT_SEPARATOR: &str = "\n\n";

/// Call-to-action appended to abbreviated tracks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadMoreLink {
    pub url: String,
    pub label: String,
}

impl ReadMoreLink {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            label: DEFAULT_READ_MORE_LABEL.to_string(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// The HTML fragment appended after the first section.
    pub fn fragment(&self) -> String {
        format!(
            "<div class=\"section read-more\">\n    <a href=\"{}\" class=\"cta-button\">{}</a>\n</div>",
            self.url, self.label
        )
    }
}

impl Default for ReadMoreLink {
    fn default() -> Self {
        Self::new(DEFAULT_FULL_EDITION_URL)
    }
}

/// Output variant: the complete web edition or the abbreviated email edition.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RenderMode {
    #[default]
    Full,
    Abbreviated(ReadMoreLink),
}

impl RenderMode {
    /// Abbreviated mode linking to the default full-edition address.
    pub fn abbreviated() -> Self {
        Self::Abbreviated(ReadMoreLink::default())
    }

    pub fn is_abbreviated(&self) -> bool {
        matches!(self, Self::Abbreviated(_))
    }
}

/// What to do when a section fails to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SectionPolicy {
    /// Propagate the error to the caller.
    #[default]
    Abort,
    /// Log a warning and leave the section out.
    Skip,
}

/// Render one section with the renderer for its type.
pub fn render_section(section: &Section) -> Result<String> {
    match section.body()? {
        SectionBody::MainAnnouncement(s) => sections::main_announcement(&s),
        SectionBody::TechnologyStack(s) => sections::technology_stack(&s),
        SectionBody::ContainerImages(s) => sections::container_images(&s),
        SectionBody::Implementation(s) => sections::implementation(&s),
        SectionBody::Support(s) => sections::support(&s),
        SectionBody::Cta(s) => sections::cta(&s),
        SectionBody::MlCapabilities(s) => sections::ml_capabilities(&s),
        SectionBody::Aurora(s) => sections::aurora(&s),
        SectionBody::Generic(s) => sections::generic(&s),
    }
}

/// Render a track, failing on the first broken section.
pub fn render_sections(track: &LanguageTrack, mode: &RenderMode) -> Result<String> {
    render_track(track, mode, SectionPolicy::Abort)
}

/// Render a track with an explicit section failure policy.
pub fn render_track(
    track: &LanguageTrack,
    mode: &RenderMode,
    policy: SectionPolicy,
) -> Result<String> {
    let selected = match mode {
        RenderMode::Full => &track.sections[..],
        RenderMode::Abbreviated(_) => &track.sections[..track.sections.len().min(1)],
    };

    let mut fragments = Vec::with_capacity(selected.len() + 1);
    for (index, section) in selected.iter().enumerate() {
        match render_section(section) {
            Ok(fragment) => fragments.push(fragment),
            Err(err) if policy == SectionPolicy::Skip => {
                log::warn!(
                    "skipping section {index} ({}): {err}",
                    section.title().unwrap_or(section.section_type.as_str())
                );
            }
            Err(err) => return Err(err),
        }
    }

    if let RenderMode::Abbreviated(link) = mode
        && !track.is_empty()
    {
        fragments.push(link.fragment());
    }

    log::debug!(
        "rendered {} of {} sections",
        fragments.len(),
        track.sections.len()
    );

    Ok(fragments.join(FRAGMENT_SEPARATOR))
}
