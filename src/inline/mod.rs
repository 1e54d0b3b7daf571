//! CSS inlining for email-safe HTML.
//!
//! Mail clients drop or ignore `<style>` blocks, so the email edition copies
//! every applicable stylesheet declaration onto the `style` attribute of the
//! elements it matches. Rules that cannot be applied statically (media
//! queries, `:hover`, pseudo-elements) stay behind in a single `<style>`
//! element, with their declarations made `!important` so they still beat
//! the inlined attributes they were written to override.
//!
//! A `<style data-embed>` block is left alone and never inlined.

mod arena;
mod cascade;
mod element_ref;
mod serialize;
mod stylesheet;
mod tree_sink;

use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::serialize::{SerializeOpts, TraversalScope};
use html5ever::tendril::TendrilSink;
use selectors::context::SelectorCaches;

use crate::error::Result;

use arena::{ArenaDom, ArenaNodeId};
use cascade::{cascade, to_style_attribute};
use element_ref::ElementRef;
use serialize::SerializableNode;
use stylesheet::{Stylesheet, parse_style_attribute};
use tree_sink::ArenaSink;

/// Elements whose `style` attribute has no visual effect.
const NON_VISUAL: &[&str] = &["script", "style", "template", "noscript"];

/// Inline the document's `<style>` rules into `style` attributes.
///
/// Existing `style` attributes are merged with the stylesheet and win over
/// it unless a stylesheet declaration is `!important`. The returned document
/// keeps at most one `<style>` element, holding the rules that could not be
/// inlined.
///
/// # Example
///
/// ```
/// let html = gazette::inline_css(
///     "<html><head><style>.cta-button { color: red }</style></head>\
///      <body><a class=\"cta-button\" href=\"#\">Go</a></body></html>",
/// )
/// .unwrap();
/// assert!(html.contains("style=\"color: red;\""));
/// assert!(!html.contains("<style>"));
/// ```
pub fn inline_css(html: &str) -> Result<String> {
    let mut dom = parse_html(html);

    let style_elements = collect_style_elements(&dom);
    let mut sheet = Stylesheet::default();
    for &id in &style_elements {
        sheet.extend(Stylesheet::parse(&dom.child_text(id)));
    }
    log::debug!(
        "inlining {} rules from {} style elements ({} retained)",
        sheet.rules.len(),
        style_elements.len(),
        sheet.retained.len()
    );

    if !sheet.rules.is_empty() {
        apply_styles(&mut dom, &sheet);
    }

    let retained = sheet.retained_css();
    if let Some((&first, rest)) = style_elements.split_first() {
        if retained.is_empty() {
            dom.detach(first);
        } else {
            dom.set_text(first, &format!("\n{retained}\n"));
        }
        for &id in rest {
            dom.detach(id);
        }
    }

    to_html(&dom)
}

/// Parse an HTML document into an arena.
pub(crate) fn parse_html(html: &str) -> ArenaDom {
    parse_document(ArenaSink::new(), ParseOpts::default())
        .from_utf8()
        .one(html.as_bytes())
        .into_dom()
}

/// Serialize the whole document back to HTML.
pub(crate) fn to_html(dom: &ArenaDom) -> Result<String> {
    let mut bytes = Vec::new();
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::ChildrenOnly(None),
        ..Default::default()
    };
    html5ever::serialize::serialize(
        &mut bytes,
        &SerializableNode::new(dom, dom.document()),
        opts,
    )?;
    Ok(String::from_utf8(bytes)?)
}

/// `<style>` elements in document order, minus the `data-embed` ones.
fn collect_style_elements(dom: &ArenaDom) -> Vec<ArenaNodeId> {
    dom.descendants(dom.document())
        .into_iter()
        .filter(|&id| {
            dom.element_name(id).is_some_and(|n| n.as_ref() == "style")
                && dom.get_attr(id, "data-embed").is_none()
        })
        .collect()
}

/// Elements that can carry inlined styles: the root, `<body>` and the
/// visual elements inside it.
fn style_targets(dom: &ArenaDom) -> Vec<ArenaNodeId> {
    let mut targets: Vec<_> = dom.find_by_tag("html").into_iter().collect();
    if let Some(body) = dom.find_by_tag("body") {
        targets.push(body);
        targets.extend(dom.descendants(body).into_iter().filter(|&id| {
            dom.element_name(id)
                .is_some_and(|n| !NON_VISUAL.contains(&n.as_ref()))
        }));
    }
    targets
}

fn apply_styles(dom: &mut ArenaDom, sheet: &Stylesheet) {
    let targets = style_targets(dom);

    let mut caches = SelectorCaches::default();
    let mut updates = Vec::new();
    for id in targets {
        let inline = dom
            .get_attr(id, "style")
            .map(parse_style_attribute)
            .unwrap_or_default();
        let resolved = cascade(ElementRef::new(dom, id), sheet, &inline, &mut caches);
        if !resolved.is_empty() {
            updates.push((id, to_style_attribute(&resolved)));
        }
    }

    log::trace!("writing style attributes on {} elements", updates.len());
    for (id, style) in updates {
        dom.set_attr(id, "style", style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(style: &str, body: &str) -> String {
        format!(
            "<!DOCTYPE html><html><head><style>{style}</style></head><body>{body}</body></html>"
        )
    }

    #[test]
    fn test_class_rule_is_inlined() {
        let html = inline_css(&page(
            ".cta-button { color: red }",
            r##"<a class="cta-button" href="#">Go</a>"##,
        ))
        .unwrap();

        assert!(html.contains(r##"<a class="cta-button" href="#" style="color: red;">Go</a>"##));
    }

    #[test]
    fn test_fully_inlined_stylesheet_is_removed() {
        let html = inline_css(&page("p { margin: 0 }", "<p>x</p>")).unwrap();

        assert!(!html.contains("<style"));
        assert!(html.contains(r#"<p style="margin: 0;">x</p>"#));
    }

    #[test]
    fn test_existing_style_attribute_is_merged() {
        let html = inline_css(&page(
            "p { color: red; margin: 0 }",
            r#"<p style="color: green">x</p>"#,
        ))
        .unwrap();

        assert!(html.contains(r#"style="margin: 0; color: green;""#));
    }

    #[test]
    fn test_media_query_is_retained_in_one_style_element() {
        let html = inline_css(
            "<html><head><style>p { color: red }</style>\
             <style>@media (max-width: 600px) { p { color: blue } }</style></head>\
             <body><p>x</p></body></html>",
        )
        .unwrap();

        assert_eq!(html.matches("<style>").count(), 1);
        assert!(html.contains("@media (max-width: 600px)"));
        assert!(html.contains(r#"<p style="color: red;">x</p>"#));
    }

    #[test]
    fn test_hover_rule_is_retained_not_inlined() {
        let html = inline_css(&page(
            "a { color: red } a:hover { color: blue }",
            r#"<a href="/">x</a>"#,
        ))
        .unwrap();

        assert!(html.contains(r#"style="color: red;""#));
        assert!(html.contains("a:hover { color: blue !important; }"));
    }

    #[test]
    fn test_root_rules_are_inlined_on_html() {
        let html = inline_css(&page(
            ":root { --brand: #c00 } html { color: navy } .cta-button { color: var(--brand) }",
            r##"<p>x</p><a class="cta-button" href="#">Go</a>"##,
        ))
        .unwrap();

        assert!(html.contains(r#"<html style="color: navy; --brand: #c00;">"#));
        assert!(html.contains(r##"<a class="cta-button" href="#" style="color: var(--brand);">Go</a>"##));
        assert!(!html.contains("<style"));
    }

    #[test]
    fn test_retained_media_rule_still_overrides_inlined_base() {
        let html = inline_css(&page(
            ".section { padding: 16px } @media (max-width: 600px) { .section { padding: 8px } }",
            r#"<div class="section">x</div>"#,
        ))
        .unwrap();

        assert!(html.contains(r#"<div class="section" style="padding: 16px;">"#));
        assert!(html.contains(
            "@media (max-width: 600px) { .section { padding: 8px !important; } }"
        ));
    }

    #[test]
    fn test_embedded_style_is_left_untouched() {
        let html = inline_css(
            "<html><head><style data-embed>p { color: red }</style></head>\
             <body><p>x</p></body></html>",
        )
        .unwrap();

        assert!(html.contains("<style data-embed=\"\">p { color: red }</style>"));
        assert!(html.contains("<p>x</p>"));
    }

    #[test]
    fn test_head_elements_are_not_styled() {
        let html = inline_css(
            "<html><head><title>T</title><style>* { color: red }</style></head><body><p>x</p></body></html>",
        )
        .unwrap();

        assert!(html.contains(r#"<html style="color: red;">"#));
        assert!(!html.contains("<head style"));
        assert!(!html.contains("<title style"));
        assert!(html.contains(r#"<body style="color: red;">"#));
        assert!(html.contains(r#"<p style="color: red;">x</p>"#));
    }

    #[test]
    fn test_document_without_styles_is_unchanged_in_content() {
        let html = inline_css("<html><body><p class=\"a\">x</p></body></html>").unwrap();

        assert!(html.contains(r#"<p class="a">x</p>"#));
        assert!(!html.contains("style"));
    }
}
