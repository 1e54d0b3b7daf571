//! Stylesheet parsing for the inlining pass.
//!
//! Declarations keep their source text: inlining copies values onto `style`
//! attributes, so nothing is gained by interpreting them. Rules that cannot
//! be applied to a static element (at-rules, dynamic pseudo-classes,
//! pseudo-elements) are kept verbatim as `retained` CSS.

use std::cmp::Ordering;

use cssparser::{
    AtRuleParser, CowRcStr, DeclarationParser, ParseError, Parser, ParserInput, ParserState,
    QualifiedRuleParser, RuleBodyItemParser, RuleBodyParser, StyleSheetParser,
};
use selectors::parser::{ParseRelative, Selector, SelectorList};

use super::element_ref::InlineSelectors;

/// A parsed stylesheet.
#[derive(Debug, Default, Clone)]
pub struct Stylesheet {
    /// Rules that can be inlined, in source order.
    pub rules: Vec<StyleRule>,
    /// Source text of rules that must stay in a `<style>` block.
    pub retained: Vec<String>,
}

/// A rule whose selectors can be matched against a static document.
#[derive(Debug, Clone)]
pub struct StyleRule {
    pub selectors: Vec<Selector<InlineSelectors>>,
    pub declarations: Vec<Declaration>,
}

/// A CSS declaration with its value as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub property: String,
    pub value: String,
    pub important: bool,
}

/// CSS specificity for cascade ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Specificity {
    pub ids: u16,
    pub classes: u16,
    pub elements: u16,
}

impl Specificity {
    pub fn from_selector(selector: &Selector<InlineSelectors>) -> Self {
        let spec = selector.specificity();
        // selectors packs specificity as (id << 20) | (class << 10) | elements
        Self {
            ids: ((spec >> 20) & 0x3FF) as u16,
            classes: ((spec >> 10) & 0x3FF) as u16,
            elements: (spec & 0x3FF) as u16,
        }
    }
}

impl Ord for Specificity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ids
            .cmp(&other.ids)
            .then(self.classes.cmp(&other.classes))
            .then(self.elements.cmp(&other.elements))
    }
}

impl PartialOrd for Specificity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Stylesheet {
    /// Parse a stylesheet. Invalid rules and declarations are skipped.
    pub fn parse(css: &str) -> Self {
        let mut input = ParserInput::new(css);
        let mut parser = Parser::new(&mut input);
        let mut sheet = Stylesheet::default();

        let mut rule_parser = TopLevelRuleParser { sheet: &mut sheet };
        for result in StyleSheetParser::new(&mut parser, &mut rule_parser) {
            if let Err((err, source)) = result {
                log::debug!("skipping invalid css {source:?}: {:?}", err.kind);
            }
        }

        sheet
    }

    /// Append another sheet's rules after this one's.
    pub fn extend(&mut self, other: Stylesheet) {
        self.rules.extend(other.rules);
        self.retained.extend(other.retained);
    }

    /// The retained rules as one stylesheet body.
    pub fn retained_css(&self) -> String {
        self.retained.join("\n")
    }
}

/// Parse the declarations of a `style` attribute.
pub fn parse_style_attribute(style: &str) -> Vec<Declaration> {
    let mut input = ParserInput::new(style);
    let mut parser = Parser::new(&mut input);
    let mut declarations = Vec::new();
    let mut decl_parser = DeclarationListParser {
        declarations: &mut declarations,
    };
    for result in RuleBodyParser::new(&mut parser, &mut decl_parser) {
        let _ = result;
    }
    declarations
}

enum RulePrelude {
    Selectors(Vec<Selector<InlineSelectors>>),
    Retained(String),
}

struct TopLevelRuleParser<'a> {
    sheet: &'a mut Stylesheet,
}

impl<'i> AtRuleParser<'i> for TopLevelRuleParser<'_> {
    type Prelude = AtRulePrelude;
    type AtRule = ();
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        Ok(AtRulePrelude::parse(name, input))
    }

    fn rule_without_block(
        &mut self,
        prelude: Self::Prelude,
        _start: &ParserState,
    ) -> Result<Self::AtRule, ()> {
        self.sheet.retained.push(format!("{};", prelude.text));
        Ok(())
    }

    fn parse_block<'t>(
        &mut self,
        prelude: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::AtRule, ParseError<'i, Self::Error>> {
        self.sheet.retained.push(prelude.retain_block(input));
        Ok(())
    }
}

impl<'i> QualifiedRuleParser<'i> for TopLevelRuleParser<'_> {
    type Prelude = RulePrelude;
    type QualifiedRule = ();
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        let start = input.state();
        if let Ok(selectors) = input.try_parse(parse_selector_list) {
            return Ok(RulePrelude::Selectors(selectors));
        }
        input.reset(&start);
        Ok(RulePrelude::Retained(consume_source(input)))
    }

    fn parse_block<'t>(
        &mut self,
        prelude: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::QualifiedRule, ParseError<'i, Self::Error>> {
        match prelude {
            RulePrelude::Selectors(selectors) => {
                let mut declarations = Vec::new();
                let mut decl_parser = DeclarationListParser {
                    declarations: &mut declarations,
                };
                for result in RuleBodyParser::new(input, &mut decl_parser) {
                    let _ = result;
                }
                self.sheet.rules.push(StyleRule {
                    selectors,
                    declarations,
                });
            }
            RulePrelude::Retained(selector_text) => {
                let body = important_declarations(input);
                self.sheet
                    .retained
                    .push(format!("{selector_text} {{ {body} }}"));
            }
        }
        Ok(())
    }
}

/// Conditional group rules whose nested rules compete with inlined styles.
const CONDITIONAL_AT_RULES: &[&str] = &["media", "supports", "container"];

/// Name and source text of an at-rule prelude, e.g. `@media (max-width: 600px)`.
struct AtRulePrelude {
    name: String,
    text: String,
}

impl AtRulePrelude {
    fn parse<'i>(name: CowRcStr<'i>, input: &mut Parser<'i, '_>) -> Self {
        let start = input.position();
        while input.next().is_ok() {}
        let text = format!("@{} {}", name, input.slice_from(start).trim());
        Self {
            name: name.to_ascii_lowercase(),
            text: text.trim_end().to_string(),
        }
    }

    /// Source text for a retained at-rule with a block.
    ///
    /// Inlined `style` attributes outrank any stylesheet rule of normal
    /// importance, so declarations nested in conditional rules are marked
    /// `!important` to keep overriding them.
    fn retain_block(&self, input: &mut Parser<'_, '_>) -> String {
        let body = if CONDITIONAL_AT_RULES.contains(&self.name.as_str()) {
            important_rule_list(input)
        } else {
            consume_source(input)
        };
        format!("{} {{ {} }}", self.text, body)
    }
}

/// Nested rules of a conditional at-rule, re-emitted with important
/// declarations.
fn important_rule_list(input: &mut Parser<'_, '_>) -> String {
    let mut rules = Vec::new();
    let mut rule_parser = NestedRuleParser;
    for result in StyleSheetParser::new(input, &mut rule_parser) {
        match result {
            Ok(rule) => rules.push(rule),
            Err((err, source)) => {
                log::debug!("dropping invalid nested css {source:?}: {:?}", err.kind)
            }
        }
    }
    rules.join(" ")
}

/// A declaration block re-emitted with every declaration `!important`.
fn important_declarations(input: &mut Parser<'_, '_>) -> String {
    let mut declarations = Vec::new();
    let mut decl_parser = DeclarationListParser {
        declarations: &mut declarations,
    };
    for result in RuleBodyParser::new(input, &mut decl_parser) {
        let _ = result;
    }
    declarations
        .iter()
        .map(|d| format!("{}: {} !important;", d.property, d.value))
        .collect::<Vec<_>>()
        .join(" ")
}

struct NestedRuleParser;

impl<'i> AtRuleParser<'i> for NestedRuleParser {
    type Prelude = AtRulePrelude;
    type AtRule = String;
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        Ok(AtRulePrelude::parse(name, input))
    }

    fn rule_without_block(
        &mut self,
        prelude: Self::Prelude,
        _start: &ParserState,
    ) -> Result<Self::AtRule, ()> {
        Ok(format!("{};", prelude.text))
    }

    fn parse_block<'t>(
        &mut self,
        prelude: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::AtRule, ParseError<'i, Self::Error>> {
        Ok(prelude.retain_block(input))
    }
}

impl<'i> QualifiedRuleParser<'i> for NestedRuleParser {
    type Prelude = String;
    type QualifiedRule = String;
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        Ok(consume_source(input))
    }

    fn parse_block<'t>(
        &mut self,
        prelude: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::QualifiedRule, ParseError<'i, Self::Error>> {
        Ok(format!("{prelude} {{ {} }}", important_declarations(input)))
    }
}

/// Parse a comma-separated list of selectors.
fn parse_selector_list<'i>(
    parser: &mut Parser<'i, '_>,
) -> Result<Vec<Selector<InlineSelectors>>, ParseError<'i, ()>> {
    let location = parser.current_source_location();
    let selectors = SelectorList::parse(&InlineSelectors, parser, ParseRelative::No)
        .map_err(|_| location.new_custom_error(()))?;

    Ok(selectors.slice().to_vec())
}

/// Consume the rest of `input` and return its trimmed source text.
fn consume_source(input: &mut Parser<'_, '_>) -> String {
    let start = input.position();
    while input.next_including_whitespace_and_comments().is_ok() {}
    input.slice_from(start).trim().to_string()
}

struct DeclarationListParser<'a> {
    declarations: &'a mut Vec<Declaration>,
}

impl<'i> AtRuleParser<'i> for DeclarationListParser<'_> {
    type Prelude = ();
    type AtRule = ();
    type Error = ();
}

impl<'i> QualifiedRuleParser<'i> for DeclarationListParser<'_> {
    type Prelude = ();
    type QualifiedRule = ();
    type Error = ();
}

impl<'i> DeclarationParser<'i> for DeclarationListParser<'_> {
    type Declaration = ();
    type Error = ();

    fn parse_value<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
        _start: &ParserState,
    ) -> Result<Self::Declaration, ParseError<'i, Self::Error>> {
        let raw = consume_source(input);
        let (value, important) = split_important(&raw);
        if value.is_empty() {
            return Err(input.new_custom_error(()));
        }

        self.declarations.push(Declaration {
            property: property_name(&name),
            value: value.to_string(),
            important,
        });
        Ok(())
    }
}

impl<'i> RuleBodyItemParser<'i, (), ()> for DeclarationListParser<'_> {
    fn parse_declarations(&self) -> bool {
        true
    }
    fn parse_qualified(&self) -> bool {
        false
    }
}

/// Lowercased property name; custom properties keep their case.
fn property_name(name: &str) -> String {
    if name.starts_with("--") {
        name.to_string()
    } else {
        name.to_ascii_lowercase()
    }
}

/// Split a trailing `!important` off a declaration value.
fn split_important(raw: &str) -> (&str, bool) {
    if let Some(bang) = raw.rfind('!')
        && raw[bang + 1..].trim().eq_ignore_ascii_case("important")
    {
        return (raw[..bang].trim_end(), true);
    }
    (raw, false)
}
