//! Cascade resolution for inlined declarations.
//!
//! Declarations that reach an element are ordered by importance, origin,
//! specificity and source order; the last one for each property wins.

use std::cmp::Ordering;

use selectors::context::{MatchingContext, SelectorCaches};

use super::element_ref::ElementRef;
use super::stylesheet::{Declaration, Specificity, StyleRule, Stylesheet};

/// Where a declaration came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Origin {
    /// A `<style>` block in the document.
    Author = 0,
    /// The element's own `style` attribute.
    Inline = 1,
}

/// A declaration that applies to an element, with its cascade keys.
#[derive(Debug)]
struct MatchedDeclaration<'a> {
    declaration: &'a Declaration,
    origin: Origin,
    specificity: Specificity,
    order: usize,
}

impl MatchedDeclaration<'_> {
    fn cascade_cmp(&self, other: &Self) -> Ordering {
        self.declaration
            .important
            .cmp(&other.declaration.important)
            .then(self.origin.cmp(&other.origin))
            .then(self.specificity.cmp(&other.specificity))
            .then(self.order.cmp(&other.order))
    }
}

/// Resolve the declarations for one element, in application order.
///
/// `inline` holds the element's existing `style` attribute declarations.
/// Each property appears once, carrying the winning value.
pub fn cascade(
    elem: ElementRef<'_>,
    sheet: &Stylesheet,
    inline: &[Declaration],
    caches: &mut SelectorCaches,
) -> Vec<(String, String)> {
    let mut matched: Vec<MatchedDeclaration> = Vec::new();
    let mut order = 0;

    for rule in &sheet.rules {
        let Some(specificity) = matching_specificity(elem, rule, caches) else {
            order += rule.declarations.len();
            continue;
        };
        for declaration in &rule.declarations {
            matched.push(MatchedDeclaration {
                declaration,
                origin: Origin::Author,
                specificity,
                order,
            });
            order += 1;
        }
    }

    for declaration in inline {
        matched.push(MatchedDeclaration {
            declaration,
            origin: Origin::Inline,
            specificity: Specificity::default(),
            order,
        });
        order += 1;
    }

    // Stable sort: equal keys keep source order.
    matched.sort_by(|a, b| a.cascade_cmp(b));

    let mut resolved: Vec<(String, String)> = Vec::with_capacity(matched.len());
    for m in matched {
        resolved.retain(|(property, _)| property != &m.declaration.property);
        resolved.push((m.declaration.property.clone(), m.declaration.value.clone()));
    }
    resolved
}

/// Highest specificity among the rule's selectors that match, if any do.
fn matching_specificity(
    elem: ElementRef<'_>,
    rule: &StyleRule,
    caches: &mut SelectorCaches,
) -> Option<Specificity> {
    let mut context = MatchingContext::new(
        selectors::matching::MatchingMode::Normal,
        None,
        caches,
        selectors::context::QuirksMode::NoQuirks,
        selectors::matching::NeedsSelectorFlags::No,
        selectors::matching::MatchingForInvalidation::No,
    );

    rule.selectors
        .iter()
        .filter(|selector| {
            selectors::matching::matches_selector(selector, 0, None, &elem, &mut context)
        })
        .map(Specificity::from_selector)
        .max()
}

/// Render resolved declarations as a `style` attribute value.
pub fn to_style_attribute(declarations: &[(String, String)]) -> String {
    declarations
        .iter()
        .map(|(property, value)| format!("{property}: {value};"))
        .collect::<Vec<_>>()
        .join(" ")
}
