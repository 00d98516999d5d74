//! CSS selector matching engine.
//! Reference: <https://www.w3.org/TR/selectors-4/>

use crate::{
    Combinator, ComplexSelector, CompoundSelector, ElementAdapter, SelectorList, SimpleSelector,
};
use core::iter::successors;

/// Match a selector list against an element.
/// Selectors §4.1
pub fn matches_selector_list<A: ElementAdapter>(
    adapter: &A,
    element: A::Handle,
    list: &SelectorList,
) -> bool {
    list.selectors
        .iter()
        .any(|selector_item| matches_complex(adapter, element, selector_item))
}

/// Match a complex selector against an element.
/// Selectors §3, 16: Right-to-left matching strategy
pub fn matches_complex<A: ElementAdapter>(
    adapter: &A,
    element: A::Handle,
    sel: &ComplexSelector,
) -> bool {
    match sel.rest.split_last() {
        None => matches_compound(adapter, element, &sel.first),
        Some(((combinator, rightmost), init)) => {
            matches_compound(adapter, element, rightmost)
                && matches_leftward(adapter, element, *combinator, &sel.first, init)
        }
    }
}

/// Match a compound selector against a single element.
/// Selectors §5–6
pub fn matches_compound<A: ElementAdapter>(
    adapter: &A,
    element: A::Handle,
    compound: &CompoundSelector,
) -> bool {
    compound
        .simples
        .iter()
        .all(|simple| matches_simple(adapter, element, simple))
}

/// Selectors §5–6
fn matches_simple<A: ElementAdapter>(
    adapter: &A,
    element: A::Handle,
    simple: &SimpleSelector,
) -> bool {
    match simple {
        SimpleSelector::Universal => true,
        SimpleSelector::Type(type_name) => {
            type_name.is_empty() || adapter.tag_name(element) == type_name.as_str()
        }
        SimpleSelector::Class(class_name) => adapter.has_class(element, class_name),
        SimpleSelector::IdSelector(id_value) => adapter
            .element_id(element)
            .is_some_and(|value| value == id_value.as_str()),
        SimpleSelector::AttrExists { name } => adapter.attr(element, name).is_some(),
        SimpleSelector::Attr {
            name,
            operator,
            value,
        } => adapter
            .attr(element, name)
            .is_some_and(|attr_value| operator.matches(attr_value, value)),
    }
}

/// Relate `right_element` to the compounds on the left of `combinator`.
///
/// `first` plus `init` are the compounds still to be matched, left to right; the
/// last of them sits immediately left of `combinator`. Descendant and general
/// sibling combinators backtrack over every candidate.
/// Selectors §16: Combinators
fn matches_leftward<A: ElementAdapter>(
    adapter: &A,
    right_element: A::Handle,
    combinator: Combinator,
    first: &CompoundSelector,
    init: &[(Combinator, CompoundSelector)],
) -> bool {
    let (compound, remaining) = match init.split_last() {
        Some(((next_combinator, compound), rest)) => (compound, Some((*next_combinator, rest))),
        None => (first, None),
    };
    let candidate_matches = |candidate: A::Handle| {
        matches_compound(adapter, candidate, compound)
            && remaining.is_none_or(|(next_combinator, rest)| {
                matches_leftward(adapter, candidate, next_combinator, first, rest)
            })
    };
    match combinator {
        Combinator::Descendant => successors(adapter.parent(right_element), |&ancestor| {
            adapter.parent(ancestor)
        })
        .any(candidate_matches),
        Combinator::Child => adapter.parent(right_element).is_some_and(candidate_matches),
        Combinator::AdjacentSibling => adapter
            .previous_sibling_element(right_element)
            .is_some_and(candidate_matches),
        Combinator::GeneralSibling => successors(
            adapter.previous_sibling_element(right_element),
            |&sibling| adapter.previous_sibling_element(sibling),
        )
        .any(candidate_matches),
    }
}
