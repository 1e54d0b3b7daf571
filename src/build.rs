//! File collaborators: load content and template, write the newsletter.

use std::fs;
use std::path::Path;

use crate::assemble::{Assembler, unresolved_placeholders};
use crate::content::ContentDocument;
use crate::error::Result;
use crate::render::{RenderMode, SectionPolicy};

/// Outcome of a [`build`] run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    /// Size of the written newsletter in bytes.
    pub bytes_written: usize,
    /// Placeholder tokens the document had no value for.
    pub unresolved: Vec<String>,
}

/// Read and parse a content document.
pub fn load_document<P: AsRef<Path>>(path: P) -> Result<ContentDocument> {
    let json = fs::read_to_string(path.as_ref())?;
    ContentDocument::from_json(&json)
}

/// Read a template as text.
pub fn load_template<P: AsRef<Path>>(path: P) -> Result<String> {
    Ok(fs::read_to_string(path.as_ref())?)
}

/// Write the finished newsletter, replacing any existing file.
pub fn write_newsletter<P: AsRef<Path>>(path: P, html: &str) -> Result<()> {
    fs::write(path.as_ref(), html)?;
    Ok(())
}

/// Load `content` and `template`, assemble them and write `output`.
pub fn build<C, T, O>(
    content: C,
    template: T,
    output: O,
    mode: &RenderMode,
    policy: SectionPolicy,
) -> Result<BuildReport>
where
    C: AsRef<Path>,
    T: AsRef<Path>,
    O: AsRef<Path>,
{
    let document = load_document(content.as_ref())?;
    let template = load_template(template.as_ref())?;

    let html = Assembler::new(mode.clone())
        .with_policy(policy)
        .assemble(&template, &document)?;

    let unresolved = unresolved_placeholders(&html);
    for token in &unresolved {
        log::warn!("unresolved placeholder {token}");
    }

    write_newsletter(output.as_ref(), &html)?;
    log::info!(
        "wrote {} ({} bytes)",
        output.as_ref().display(),
        html.len()
    );

    Ok(BuildReport {
        bytes_written: html.len(),
        unresolved,
    })
}
