//! Top-level newsletter document.

use serde::Deserialize;

use super::section::Section;

/// A parsed newsletter content file.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentDocument {
    pub meta: Meta,
    #[serde(default)]
    pub header: Header,
    #[serde(default)]
    pub hero: Hero,
    #[serde(default)]
    pub footer: Option<Footer>,
    #[serde(default)]
    pub english: Option<LanguageTrack>,
    #[serde(default)]
    pub french: Option<LanguageTrack>,
}

impl ContentDocument {
    /// Parse a document from its JSON source.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Get the track for a language, if the document has one.
    pub fn track(&self, language: Language) -> Option<&LanguageTrack> {
        match language {
            Language::English => self.english.as_ref(),
            Language::French => self.french.as_ref(),
        }
    }
}

/// Edition metadata.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Meta {
    pub title: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub edition: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Header {
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub tagline: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Hero {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Footer {
    #[serde(default)]
    pub text: String,
}

/// The ordered sections of one language edition.
///
/// Accepts either a bare array of sections or an object with a `sections`
/// array. Section order is display order.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "TrackRepr")]
pub struct LanguageTrack {
    pub sections: Vec<Section>,
}

impl LanguageTrack {
    pub fn new(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TrackRepr {
    List(Vec<Section>),
    Wrapped { sections: Vec<Section> },
}

impl From<TrackRepr> for LanguageTrack {
    fn from(repr: TrackRepr) -> Self {
        match repr {
            TrackRepr::List(sections) | TrackRepr::Wrapped { sections } => Self { sections },
        }
    }
}

/// Newsletter languages, each with its own template placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    English,
    French,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::English, Language::French];

    /// Template token that receives this language's rendered sections.
    pub fn placeholder(self) -> &'static str {
        match self {
            Language::English => "{{ENGLISH_CONTENT}}",
            Language::French => "{{FRENCH_CONTENT}}",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Language::English => "english",
            Language::French => "french",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_accepts_bare_array() {
        let doc = ContentDocument::from_json(
            r#"{
                "meta": {"title": "Issue 1"},
                "english": [{"type": "generic", "title": "A", "content": "B"}]
            }"#,
        )
        .unwrap();

        assert_eq!(doc.english.as_ref().map(LanguageTrack::len), Some(1));
        assert!(doc.french.is_none());
    }

    #[test]
    fn test_track_accepts_sections_object() {
        let doc = ContentDocument::from_json(
            r#"{
                "meta": {"title": "Issue 1"},
                "french": {"sections": [{"type": "cta", "title": "T", "content": "C"}]}
            }"#,
        )
        .unwrap();

        let french = doc.track(Language::French).unwrap();
        assert_eq!(french.sections[0].section_type, "cta");
    }

    #[test]
    fn test_missing_meta_is_an_error() {
        let err = ContentDocument::from_json(r#"{"english": []}"#).unwrap_err();
        assert!(matches!(err, crate::Error::Json(_)));
    }

    #[test]
    fn test_scalar_defaults() {
        let doc = ContentDocument::from_json(r#"{"meta": {"title": "T"}}"#).unwrap();
        assert_eq!(doc.meta.title, "T");
        assert!(doc.meta.date.is_empty());
        assert!(doc.header.subtitle.is_empty());
        assert!(doc.footer.is_none());
    }
}
