//! CSS selectors, parsed and matched with the `selectors` crate.
//!
//! The source text is kept so the browser host can hand it to
//! `querySelectorAll` unchanged, while [`crate::memory::MemoryPage`] matches
//! through its own [`selectors::Element`] view with [`Selector::matches`].
//! Combinators and structural pseudo-classes (`:first-child`, `:not`,
//! `:empty`) work. State pseudo-classes such as `:hover` and all
//! pseudo-elements are rejected at parse time, since a page without a
//! renderer cannot answer them.

#[cfg(test)]
#[path = "selector_test.rs"]
mod selector_test;

use std::fmt;
use std::str::FromStr;

use cssparser::{Parser as CssParser, ParserInput, ToCss};
use precomputed_hash::PrecomputedHash;
use selectors::matching::{
    IgnoreNthChildForInvalidation, MatchingContext, MatchingMode, NeedsSelectorFlags, QuirksMode, matches_selector,
};
use selectors::parser::{ParseRelative, SelectorList, SelectorParseErrorKind};

use crate::error::SelectorError;

/// Names, classes, ids and attribute values inside a parsed selector.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Ident(pub String);

impl From<&str> for Ident {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl AsRef<str> for Ident {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl ToCss for Ident {
    fn to_css<W>(&self, dest: &mut W) -> fmt::Result
    where
        W: fmt::Write,
    {
        cssparser::serialize_identifier(&self.0, dest)
    }
}

impl PrecomputedHash for Ident {
    /// FNV-1a over the bytes.
    fn precomputed_hash(&self) -> u32 {
        self.0
            .bytes()
            .fold(0x811c_9dc5, |hash, b| (hash ^ u32::from(b)).wrapping_mul(0x0100_0193))
    }
}

/// Selector types for a plain HTML document without namespaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSelectors;

impl selectors::SelectorImpl for PageSelectors {
    type ExtraMatchingData<'a> = ();
    type AttrValue = Ident;
    type Identifier = Ident;
    type LocalName = Ident;
    type NamespacePrefix = Ident;
    type NamespaceUrl = Ident;
    type BorrowedLocalName = Ident;
    type BorrowedNamespaceUrl = Ident;
    type NonTSPseudoClass = NoPseudoClass;
    type PseudoElement = NoPseudoElement;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoPseudoClass {}

impl selectors::parser::NonTSPseudoClass for NoPseudoClass {
    type Impl = PageSelectors;

    fn is_active_or_hover(&self) -> bool {
        match *self {}
    }

    fn is_user_action_state(&self) -> bool {
        match *self {}
    }
}

impl ToCss for NoPseudoClass {
    fn to_css<W>(&self, _dest: &mut W) -> fmt::Result
    where
        W: fmt::Write,
    {
        match *self {}
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoPseudoElement {}

impl selectors::parser::PseudoElement for NoPseudoElement {
    type Impl = PageSelectors;
}

impl ToCss for NoPseudoElement {
    fn to_css<W>(&self, _dest: &mut W) -> fmt::Result
    where
        W: fmt::Write,
    {
        match *self {}
    }
}

struct PageParser;

impl<'i> selectors::parser::Parser<'i> for PageParser {
    type Impl = PageSelectors;
    type Error = SelectorParseErrorKind<'i>;
}

/// A parsed selector list.
#[derive(Debug, Clone)]
pub struct Selector {
    source: String,
    list: SelectorList<PageSelectors>,
}

impl Selector {
    /// Parse a selector list.
    ///
    /// # Errors
    ///
    /// Returns a [`SelectorError`] for empty input, bad syntax, a state
    /// pseudo-class or a pseudo-element.
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let source = input.trim();
        let mut parser_input = ParserInput::new(source);
        let mut parser = CssParser::new(&mut parser_input);
        match SelectorList::parse(&PageParser, &mut parser, ParseRelative::No) {
            Ok(list) => Ok(Self { source: source.to_owned(), list }),
            Err(err) => Err(SelectorError {
                input: source.to_owned(),
                reason: format!("{:?} at column {}", err.kind, err.location.column),
            }),
        }
    }

    /// The selector text as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether any selector in the list matches `element`.
    #[must_use]
    pub fn matches<E>(&self, element: &E) -> bool
    where
        E: selectors::Element<Impl = PageSelectors>,
    {
        let mut nth_index_cache = Default::default();
        let mut context = MatchingContext::new(
            MatchingMode::Normal,
            None,
            &mut nth_index_cache,
            QuirksMode::NoQuirks,
            NeedsSelectorFlags::No,
            IgnoreNthChildForInvalidation::No,
        );
        self.list
            .0
            .iter()
            .any(|selector| matches_selector(selector, 0, None, element, &mut context))
    }
}

impl FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
