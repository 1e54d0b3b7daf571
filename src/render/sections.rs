//! Per-type section renderers.
//!
//! Every renderer wraps its output in a `<div class="section ...">`
//! container and emits `title`/`content` verbatim; they are trusted editor
//! markup. Optional blocks are left out entirely when absent.

use std::fmt::Write;

use super::links::format_links;
use crate::content::{
    Aurora, Button, ContainerImages, Cta, GenericSection, Implementation, MainAnnouncement,
    MlCapabilities, Support, TechnologyStack,
};
use crate::error::Result;

const NEW_TAB: &str = r#"target="_blank" rel="noopener noreferrer""#;

pub fn main_announcement(section: &MainAnnouncement) -> Result<String> {
    let mut out = open("main-announcement", &section.title, &section.content)?;

    if let Some(highlight) = &section.highlight_box {
        out.push_str("    <div class=\"highlight-box\">\n");
        writeln!(out, "        <h3>{}</h3>", highlight.title)?;
        list(&mut out, None, &highlight.items, 8)?;
        out.push_str("    </div>\n");
    }

    if let Some(stats) = &section.stats {
        out.push_str("    <div class=\"stats-section\">\n");
        writeln!(out, "        <h3>{}</h3>", stats.title)?;
        out.push_str("        <div class=\"stats-grid\">\n");
        for stat in &stats.items {
            writeln!(
                out,
                "            <div class=\"stat-item\"><span class=\"stat-number\">{}</span><span class=\"stat-label\">{}</span></div>",
                stat.number, stat.label
            )?;
        }
        out.push_str("        </div>\n    </div>\n");
    }

    Ok(close(out))
}

pub fn technology_stack(section: &TechnologyStack) -> Result<String> {
    let mut out = open("technology-stack", &section.title, &section.content)?;

    for subsection in &section.subsections {
        out.push_str("    <div class=\"subsection\">\n");
        writeln!(out, "        <h3>{}</h3>", subsection.title)?;
        writeln!(out, "        <p>{}</p>", subsection.content)?;
        out.push_str("        <div class=\"feature-grid\">\n");
        for card in &subsection.feature_cards {
            writeln!(
                out,
                "            <div class=\"feature-card\"><h4>{}</h4><p>{}</p></div>",
                card.title, card.content
            )?;
        }
        out.push_str("        </div>\n    </div>\n");
    }

    Ok(close(out))
}

pub fn container_images(section: &ContainerImages) -> Result<String> {
    let mut out = open("container-images", &section.title, &section.content)?;

    out.push_str("    <div class=\"code-block\">\n");
    for line in &section.code_block {
        writeln!(out, "        <code class=\"code-line\">{line}</code>")?;
    }
    out.push_str("    </div>\n");

    Ok(close(out))
}

pub fn implementation(section: &Implementation) -> Result<String> {
    let mut out = open("implementation", &section.title, &section.content)?;

    for phase in &section.phases {
        out.push_str("    <div class=\"phase\">\n");
        writeln!(out, "        <h3>{}</h3>", phase.title)?;
        writeln!(out, "        <p>{}</p>", phase.content)?;
        out.push_str("    </div>\n");
    }

    Ok(close(out))
}

pub fn support(section: &Support) -> Result<String> {
    let mut out = open("support", &section.title, &section.content)?;

    list(&mut out, Some("support-list"), &section.list_items, 4)?;

    if let Some(contact) = &section.contact {
        writeln!(
            out,
            "    <p class=\"contact-info\"><strong>{}</strong> <a href=\"mailto:{email}\">{email}</a></p>",
            contact.text,
            email = contact.email
        )?;
    }

    Ok(close(out))
}

pub fn cta(section: &Cta) -> Result<String> {
    let mut out = open("cta", &section.title, &section.content)?;
    buttons(&mut out, &section.buttons, false)?;
    Ok(close(out))
}

pub fn ml_capabilities(section: &MlCapabilities) -> Result<String> {
    let mut out = open("ml-capabilities", &section.title, &section.content)?;

    if let Some(recordings) = &section.recording_links {
        out.push_str("    <ul class=\"recording-links\">\n");
        for link in recordings {
            writeln!(
                out,
                "        <li><strong>{}</strong>: <a href=\"{}\" {NEW_TAB}>{}</a></li>",
                link.title, link.url, link.text
            )?;
        }
        out.push_str("    </ul>\n");
    }

    if let Some(features) = &section.features {
        writeln!(out, "    <p>{}</p>", features.intro)?;
        list(&mut out, Some("feature-list"), &features.items, 4)?;
    }

    if let Some(paragraphs) = &section.additional_content {
        for paragraph in paragraphs {
            writeln!(out, "    <p>{paragraph}</p>")?;
        }
    }

    if let Some(resources) = &section.resources {
        out.push_str("    <div class=\"resources\">\n");
        writeln!(out, "        <h3>{}</h3>", resources.title)?;
        writeln!(out, "        <p>{}</p>", resources.intro)?;
        out.push_str("        <ul>\n");
        for link in &resources.links {
            writeln!(
                out,
                "            <li><a href=\"{}\" {NEW_TAB}>{}</a></li>",
                link.url, link.text
            )?;
        }
        out.push_str("        </ul>\n    </div>\n");
    }

    Ok(close(out))
}

pub fn aurora(section: &Aurora) -> Result<String> {
    let mut out = open("aurora", &section.title, &format_links(&section.content))?;

    out.push_str("    <div class=\"involvement\">\n");
    writeln!(out, "        <h3>{}</h3>", section.involvement.title)?;
    list(&mut out, None, &section.involvement.items, 8)?;
    out.push_str("    </div>\n");

    writeln!(
        out,
        "    <p class=\"community\">{}</p>",
        format_links(&section.community)
    )?;

    out.push_str("    <div class=\"feedback\">\n");
    writeln!(out, "        <p>{}</p>", section.feedback.text)?;
    out.push_str("    </div>\n");
    buttons(&mut out, &section.feedback.buttons, true)?;

    Ok(close(out))
}

pub fn generic(section: &GenericSection) -> Result<String> {
    let out = open_container(None, &section.title, &section.content)?;
    Ok(close(out))
}

fn open(modifier: &str, title: &str, content: &str) -> Result<String> {
    open_container(Some(modifier), title, content)
}

fn open_container(modifier: Option<&str>, title: &str, content: &str) -> Result<String> {
    let mut out = String::new();
    match modifier {
        Some(modifier) => writeln!(out, "<div class=\"section {modifier}\">")?,
        None => out.push_str("<div class=\"section\">\n"),
    }
    writeln!(out, "    <h2>{title}</h2>")?;
    writeln!(out, "    <p>{content}</p>")?;
    Ok(out)
}

fn close(mut out: String) -> String {
    out.push_str("</div>");
    out
}

fn list(out: &mut String, class: Option<&str>, items: &[String], indent: usize) -> Result<()> {
    let pad = " ".repeat(indent);
    match class {
        Some(class) => writeln!(out, "{pad}<ul class=\"{class}\">")?,
        None => writeln!(out, "{pad}<ul>")?,
    }
    for item in items {
        writeln!(out, "{pad}    <li>{item}</li>")?;
    }
    writeln!(out, "{pad}</ul>")?;
    Ok(())
}

fn buttons(out: &mut String, buttons: &[Button], new_tab: bool) -> Result<()> {
    out.push_str("    <div class=\"cta-buttons\">\n");
    for button in buttons {
        if new_tab {
            writeln!(
                out,
                "        <a href=\"{}\" class=\"cta-button\" {NEW_TAB}>{}</a>",
                button.url, button.text
            )?;
        } else {
            writeln!(
                out,
                "        <a href=\"{}\" class=\"cta-button\">{}</a>",
                button.url, button.text
            )?;
        }
    }
    out.push_str("    </div>\n");
    Ok(())
}
