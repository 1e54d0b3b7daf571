//! Typed content sections.
//!
//! A [`Section`] keeps its payload as raw JSON until [`Section::body`] is
//! called, which resolves the `type` tag to a [`SectionBody`] variant and
//! checks the payload shape for that variant.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// One content block of a language track, tagged by its `type` field.
#[derive(Debug, Clone, Deserialize)]
pub struct Section {
    #[serde(rename = "type", default)]
    pub section_type: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Section {
    /// Create a section from a type tag and a JSON object payload.
    ///
    /// Non-object payloads yield a section with no fields.
    pub fn new(section_type: impl Into<String>, payload: Value) -> Self {
        let fields = match payload {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self {
            section_type: section_type.into(),
            fields,
        }
    }

    pub fn kind(&self) -> SectionKind {
        SectionKind::from_type(&self.section_type)
    }

    /// The section's `title` field, if it is a string.
    pub fn title(&self) -> Option<&str> {
        self.fields.get("title").and_then(Value::as_str)
    }

    /// Resolve the payload into its typed variant.
    pub fn body(&self) -> Result<SectionBody> {
        Ok(match self.kind() {
            SectionKind::MainAnnouncement => SectionBody::MainAnnouncement(self.payload()?),
            SectionKind::TechnologyStack => SectionBody::TechnologyStack(self.payload()?),
            SectionKind::ContainerImages => SectionBody::ContainerImages(self.payload()?),
            SectionKind::Implementation => SectionBody::Implementation(self.payload()?),
            SectionKind::Support => SectionBody::Support(self.payload()?),
            SectionKind::Cta => SectionBody::Cta(self.payload()?),
            SectionKind::MlCapabilities => SectionBody::MlCapabilities(self.payload()?),
            SectionKind::Aurora => SectionBody::Aurora(self.payload()?),
            SectionKind::Generic => SectionBody::Generic(self.payload()?),
        })
    }

    fn payload<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_value(Value::Object(self.fields.clone())).map_err(|source| {
            Error::MissingRequiredField {
                section_type: self.section_type.clone(),
                source,
            }
        })
    }
}

/// Known section types. Anything else renders as [`SectionKind::Generic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    MainAnnouncement,
    TechnologyStack,
    ContainerImages,
    Implementation,
    Support,
    Cta,
    MlCapabilities,
    Aurora,
    Generic,
}

impl SectionKind {
    pub fn from_type(tag: &str) -> Self {
        match tag {
            "main_announcement" => Self::MainAnnouncement,
            "technology_stack" => Self::TechnologyStack,
            "container_images" => Self::ContainerImages,
            "implementation" => Self::Implementation,
            "support" => Self::Support,
            "cta" => Self::Cta,
            "ml_capabilities" => Self::MlCapabilities,
            "aurora" => Self::Aurora,
            _ => Self::Generic,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::MainAnnouncement => "main_announcement",
            Self::TechnologyStack => "technology_stack",
            Self::ContainerImages => "container_images",
            Self::Implementation => "implementation",
            Self::Support => "support",
            Self::Cta => "cta",
            Self::MlCapabilities => "ml_capabilities",
            Self::Aurora => "aurora",
            Self::Generic => "generic",
        }
    }
}

/// A section payload resolved to its type.
#[derive(Debug, Clone)]
pub enum SectionBody {
    MainAnnouncement(MainAnnouncement),
    TechnologyStack(TechnologyStack),
    ContainerImages(ContainerImages),
    Implementation(Implementation),
    Support(Support),
    Cta(Cta),
    MlCapabilities(MlCapabilities),
    Aurora(Aurora),
    Generic(GenericSection),
}

#[derive(Debug, Clone, Deserialize)]
pub struct MainAnnouncement {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub highlight_box: Option<HighlightBox>,
    #[serde(default)]
    pub stats: Option<Stats>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HighlightBox {
    pub title: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Stats {
    pub title: String,
    pub items: Vec<Stat>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Stat {
    /// Editors write both `"40+"` and `40`.
    #[serde(deserialize_with = "string_or_number")]
    pub number: String,
    pub label: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TechnologyStack {
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub subsections: Vec<Subsection>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Subsection {
    pub title: String,
    pub content: String,
    pub feature_cards: Vec<FeatureCard>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeatureCard {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContainerImages {
    pub title: String,
    pub content: String,
    pub code_block: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Implementation {
    pub title: String,
    pub content: String,
    pub phases: Vec<Phase>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Phase {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Support {
    pub title: String,
    pub content: String,
    pub list_items: Vec<String>,
    #[serde(default)]
    pub contact: Option<Contact>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Contact {
    pub text: String,
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Cta {
    pub title: String,
    pub content: String,
    pub buttons: Vec<Button>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Button {
    pub text: String,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MlCapabilities {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub recording_links: Option<Vec<RecordingLink>>,
    #[serde(default)]
    pub features: Option<Features>,
    #[serde(default)]
    pub additional_content: Option<Vec<String>>,
    #[serde(default)]
    pub resources: Option<Resources>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecordingLink {
    pub text: String,
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Features {
    pub intro: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Resources {
    pub title: String,
    pub intro: String,
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Link {
    pub text: String,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Aurora {
    pub title: String,
    pub content: String,
    pub involvement: Involvement,
    pub community: String,
    pub feedback: Feedback,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Involvement {
    pub title: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Feedback {
    pub text: String,
    pub buttons: Vec<Button>,
}

/// Fallback payload for unrecognized section types.
#[derive(Debug, Clone, Deserialize)]
pub struct GenericSection {
    pub title: String,
    pub content: String,
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Scalar::deserialize(deserializer)? {
        Scalar::Text(s) => s,
        Scalar::Number(n) => n.to_string(),
    })
}
