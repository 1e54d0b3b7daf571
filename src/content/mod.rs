//! Newsletter content model.
//!
//! A [`ContentDocument`] is what editors author as JSON: edition metadata,
//! header and hero copy, and one [`LanguageTrack`] per language. Sections
//! stay loosely typed until they are rendered, so a malformed section only
//! fails its own render instead of the whole document load.

mod document;
mod section;

pub use document::{ContentDocument, Footer, Header, Hero, Language, LanguageTrack, Meta};
pub use section::{
    Aurora, Button, Contact, ContainerImages, Cta, FeatureCard, Feedback, Features,
    GenericSection, HighlightBox, Implementation, Involvement, Link, MainAnnouncement,
    MlCapabilities, Phase, RecordingLink, Resources, Section, SectionBody, SectionKind, Stat,
    Stats, Subsection, Support, TechnologyStack,
};
