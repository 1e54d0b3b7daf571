//! Error types for gazette operations.

use thiserror::Error;

/// Errors that can occur while loading content or building a newsletter.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid content JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A section payload lacks a field its renderer needs, or the field has
    /// the wrong shape.
    #[error("Invalid `{section_type}` section: {source}")]
    MissingRequiredField {
        section_type: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("UTF-8 decoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
