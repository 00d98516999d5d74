//! Selectors Level 4 element matching for DOM queries.
//! Reference: <https://www.w3.org/TR/selectors-4/>
//!
//! This module implements the subset needed by `querySelectorAll`-style lookups:
//! - Type, universal, class and id selectors
//! - Attribute presence and the `=`, `~=`, `|=`, `^=`, `$=`, `*=` operators
//! - Combinators: descendant, child, adjacent sibling, general sibling
//!
//! Each function includes a reference to its corresponding section of Selectors Level 4.

mod matcher;
mod parser;

// Re-export public API
pub use matcher::{matches_complex, matches_compound, matches_selector_list};
pub use parser::{parse_complex_selector, parse_selector_list};

/// An adapter that abstracts DOM access for selector matching.
/// Implement this for your DOM layer.
///
/// Section references:
/// - Section 3: Selectors overview and element matching
pub trait ElementAdapter {
    type Handle: Copy + Eq;

    /// Parent element if any. Non-element parents (e.g. the document) yield `None`.
    /// Selectors §16: Combinators (for tree relationships)
    fn parent(&self, element: Self::Handle) -> Option<Self::Handle>;

    /// Previous sibling element (skip non-elements if your DOM has mixed nodes).
    /// Selectors §16: Sibling combinators
    fn previous_sibling_element(&self, element: Self::Handle) -> Option<Self::Handle>;

    /// Tag name in ASCII lowercase (per HTML parsing conventions).
    /// Selectors §5.1: Type selectors
    fn tag_name(&self, element: Self::Handle) -> &str;

    /// Returns Some(id) if the element has an id attribute, else None.
    /// Selectors §6.7: ID selectors
    fn element_id(&self, element: Self::Handle) -> Option<&str>;

    /// True if the element has the given class token.
    /// Selectors §6.6: Class selectors
    fn has_class(&self, element: Self::Handle, class: &str) -> bool;

    /// Returns the attribute value if present.
    /// Selectors §6: Attribute selectors
    fn attr(&self, element: Self::Handle, name: &str) -> Option<&str>;
}

/// Attribute value operators.
/// Selectors §6.1, 6.2
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AttrOperator {
    /// `[name=value]`
    Equals,
    /// `[name~=value]`, whitespace-separated word match
    Includes,
    /// `[name|=value]`, exact or followed by `-`
    DashMatch,
    /// `[name^=value]`
    Prefix,
    /// `[name$=value]`
    Suffix,
    /// `[name*=value]`
    Substring,
}

impl AttrOperator {
    /// Test an attribute value against the selector value.
    /// Selectors §6.1, 6.2: empty values never match for `~=`, `^=`, `$=`, `*=`
    pub fn matches(self, attr_value: &str, value: &str) -> bool {
        match self {
            Self::Equals => attr_value == value,
            Self::Includes => {
                !value.is_empty()
                    && !value.contains(|ch: char| ch.is_ascii_whitespace())
                    && attr_value
                        .split(|ch: char| ch.is_ascii_whitespace())
                        .any(|word| word == value)
            }
            Self::DashMatch => {
                attr_value == value
                    || attr_value
                        .strip_prefix(value)
                        .is_some_and(|rest| rest.starts_with('-'))
            }
            Self::Prefix => !value.is_empty() && attr_value.starts_with(value),
            Self::Suffix => !value.is_empty() && attr_value.ends_with(value),
            Self::Substring => !value.is_empty() && attr_value.contains(value),
        }
    }
}

/// Simple selectors (subset).
/// Selectors §5, 6
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SimpleSelector {
    /// Selectors §5.1: Type selectors
    Type(String),
    /// Selectors §6.6: Class selectors
    Class(String),
    /// Selectors §6.7: ID selectors
    IdSelector(String),
    /// Selectors §6.1: `[attr]`
    AttrExists { name: String },
    /// Selectors §6.1, 6.2: `[attr op value]`
    Attr {
        name: String,
        operator: AttrOperator,
        value: String,
    },
    /// Universal selector '*'.
    /// Selectors §5.2: Universal selector
    Universal,
}

/// A compound selector is a sequence of simple selectors (no combinators).
/// Selectors §3.1: Compound selectors
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct CompoundSelector {
    pub simples: Vec<SimpleSelector>,
}

/// Combinators between compounds.
/// Selectors §16: Combinators
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Combinator {
    Descendant,
    Child,
    AdjacentSibling,
    GeneralSibling,
}

/// A complex selector is one or more compounds separated by combinators.
/// Selectors §3.1
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ComplexSelector {
    pub first: CompoundSelector,
    pub rest: Vec<(Combinator, CompoundSelector)>,
}

/// A selector list separated by commas.
/// Selectors §4.1: Selector lists
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct SelectorList {
    pub selectors: Vec<ComplexSelector>,
}

impl SelectorList {
    /// True when no selector in the list survived parsing.
    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }
}
