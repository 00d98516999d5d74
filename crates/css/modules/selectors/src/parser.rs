//! CSS selector parsing.
//! Reference: <https://www.w3.org/TR/selectors-4/>

use crate::{
    AttrOperator, Combinator, ComplexSelector, CompoundSelector, SelectorList, SimpleSelector,
};
use core::mem::take;

#[derive(Clone, Debug, PartialEq, Eq)]
/// Internal tokenizer token kinds.
pub enum Tok {
    /// A combinator token like child/adjacent/general sibling.
    Combinator(Combinator),
    /// Whitespace that implies a descendant combinator.
    DescendantWS,
    /// A simple selector token (type, class, id, attribute, universal).
    Simple(SimpleSelector),
    /// Syntax this engine does not support (pseudo-classes, namespaces, ...).
    Unsupported,
}

/// Tokenizer over a selector string.
pub struct SelectorTokenizer {
    /// Underlying owned bytes for the selector.
    input_bytes: Vec<u8>,
    /// Current cursor index into `input_bytes`.
    index: usize,
    /// Set when the last whitespace run may become a descendant combinator.
    pending_whitespace: bool,
}

impl SelectorTokenizer {
    /// Construct a tokenizer from input.
    #[inline]
    pub(crate) fn new(input: &str) -> Self {
        Self {
            input_bytes: input.as_bytes().to_vec(),
            index: 0,
            pending_whitespace: false,
        }
    }

    /// Return the next selector token, if any.
    #[inline]
    pub(crate) fn next(&mut self) -> Option<Tok> {
        self.skip_whitespace_descendant();
        if self.pending_whitespace {
            self.pending_whitespace = false;
            // Trailing whitespace does not imply a combinator.
            if self.index >= self.input_bytes.len() {
                return None;
            }
            return Some(Tok::DescendantWS);
        }
        let &current = self.input_bytes.get(self.index)?;
        let token = match current {
            b'*' => {
                self.index = self.index.saturating_add(1);
                Tok::Simple(SimpleSelector::Universal)
            }
            b'.' => self.consume_class(),
            b'#' => self.consume_id(),
            b'[' => self.consume_attr(),
            b'>' => {
                self.index = self.index.saturating_add(1);
                Tok::Combinator(Combinator::Child)
            }
            b'+' => {
                self.index = self.index.saturating_add(1);
                Tok::Combinator(Combinator::AdjacentSibling)
            }
            b'~' => {
                self.index = self.index.saturating_add(1);
                Tok::Combinator(Combinator::GeneralSibling)
            }
            _ => self.consume_type(),
        };
        Some(token)
    }

    /// Skip whitespace and mark that a descendant combinator may be emitted next.
    #[inline]
    fn skip_whitespace_descendant(&mut self) {
        let mut saw = false;
        while let Some(&byte) = self.input_bytes.get(self.index) {
            if byte.is_ascii_whitespace() {
                saw = true;
                self.index = self.index.saturating_add(1);
            } else {
                break;
            }
        }
        if saw {
            self.pending_whitespace = true;
        }
    }

    /// Consume an identifier consisting of alphanumerics, '-', '_' and non-ASCII code points.
    /// Case is preserved; callers lowercase where the grammar is case-insensitive.
    #[inline]
    fn consume_ident(&mut self) -> String {
        let start = self.index;
        while let Some(&byte) = self.input_bytes.get(self.index) {
            if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' || byte >= 0x80 {
                self.index = self.index.saturating_add(1);
            } else {
                break;
            }
        }
        let slice = self.input_bytes.get(start..self.index).unwrap_or(&[]);
        String::from_utf8_lossy(slice).to_string()
    }

    /// Parse a type selector identifier into a `SimpleSelector::Type`.
    #[inline]
    fn consume_type(&mut self) -> Tok {
        let ident = self.consume_ident();
        if ident.is_empty() {
            // Skip the offending byte so the tokenizer always makes progress.
            self.index = self.index.saturating_add(1);
            return Tok::Unsupported;
        }
        Tok::Simple(SimpleSelector::Type(ident.to_ascii_lowercase()))
    }

    /// Parse a class selector following '.' into `SimpleSelector::Class`.
    #[inline]
    fn consume_class(&mut self) -> Tok {
        // skip '.'
        self.index = self.index.saturating_add(1);
        let ident = self.consume_ident();
        if ident.is_empty() {
            return Tok::Unsupported;
        }
        Tok::Simple(SimpleSelector::Class(ident))
    }

    /// Parse an id selector following '#' into `SimpleSelector::IdSelector`.
    #[inline]
    fn consume_id(&mut self) -> Tok {
        // skip '#'
        self.index = self.index.saturating_add(1);
        let ident = self.consume_ident();
        if ident.is_empty() {
            return Tok::Unsupported;
        }
        Tok::Simple(SimpleSelector::IdSelector(ident))
    }

    /// Parse an attribute selector: `[name]` or `[name op value]` with a quoted or unquoted value.
    #[inline]
    fn consume_attr(&mut self) -> Tok {
        // skip '['
        self.index = self.index.saturating_add(1);
        self.skip_spaces();
        let name = self.consume_ident().to_ascii_lowercase();
        self.skip_spaces();
        if name.is_empty() {
            self.skip_past_close_bracket();
            return Tok::Unsupported;
        }
        let Some(operator) = self.consume_attr_operator() else {
            return if self.eat(b']') {
                Tok::Simple(SimpleSelector::AttrExists { name })
            } else {
                self.skip_past_close_bracket();
                Tok::Unsupported
            };
        };
        self.skip_spaces();
        let value = match self.input_bytes.get(self.index) {
            Some(&quote) if quote == b'"' || quote == b'\'' => {
                self.index = self.index.saturating_add(1);
                self.consume_quoted_attr_value(quote)
            }
            _ => self.consume_unquoted_attr_value(),
        };
        self.skip_spaces();
        if !self.eat(b']') {
            self.skip_past_close_bracket();
            return Tok::Unsupported;
        }
        Tok::Simple(SimpleSelector::Attr {
            name,
            operator,
            value,
        })
    }

    /// Consume `=`, `~=`, `|=`, `^=`, `$=` or `*=` if present.
    #[inline]
    fn consume_attr_operator(&mut self) -> Option<AttrOperator> {
        let &first = self.input_bytes.get(self.index)?;
        if first == b'=' {
            self.index = self.index.saturating_add(1);
            return Some(AttrOperator::Equals);
        }
        let operator = match first {
            b'~' => AttrOperator::Includes,
            b'|' => AttrOperator::DashMatch,
            b'^' => AttrOperator::Prefix,
            b'$' => AttrOperator::Suffix,
            b'*' => AttrOperator::Substring,
            _ => return None,
        };
        if self.input_bytes.get(self.index.saturating_add(1)) != Some(&b'=') {
            return None;
        }
        self.index = self.index.saturating_add(2);
        Some(operator)
    }

    /// Consume an unquoted attribute value until whitespace or a closing bracket.
    #[inline]
    fn consume_unquoted_attr_value(&mut self) -> String {
        let start = self.index;
        while let Some(&byte) = self.input_bytes.get(self.index) {
            if byte.is_ascii_whitespace() || byte == b']' {
                break;
            }
            self.index = self.index.saturating_add(1);
        }
        let slice = self.input_bytes.get(start..self.index).unwrap_or(&[]);
        String::from_utf8_lossy(slice).to_string()
    }

    /// Consume a quoted attribute value until the matching quote byte.
    #[inline]
    fn consume_quoted_attr_value(&mut self, quote: u8) -> String {
        let start = self.index;
        while matches!(self.input_bytes.get(self.index), Some(&byte) if byte != quote) {
            self.index = self.index.saturating_add(1);
        }
        let slice = self.input_bytes.get(start..self.index).unwrap_or(&[]);
        let out = String::from_utf8_lossy(slice).to_string();
        if self.input_bytes.get(self.index).is_some() {
            self.index = self.index.saturating_add(1);
        }
        out
    }

    /// Advance past `byte` if it is next.
    #[inline]
    fn eat(&mut self, byte: u8) -> bool {
        if self.input_bytes.get(self.index) == Some(&byte) {
            self.index = self.index.saturating_add(1);
            true
        } else {
            false
        }
    }

    /// Recover from a malformed attribute selector.
    #[inline]
    fn skip_past_close_bracket(&mut self) {
        while let Some(&byte) = self.input_bytes.get(self.index) {
            self.index = self.index.saturating_add(1);
            if byte == b']' {
                break;
            }
        }
    }

    /// Skip ASCII whitespace.
    #[inline]
    fn skip_spaces(&mut self) {
        while matches!(self.input_bytes.get(self.index), Some(byte) if byte.is_ascii_whitespace()) {
            self.index = self.index.saturating_add(1);
        }
    }
}

/// Parse a selector list from CSS text.
/// Returns `None` when any entry is empty or cannot be represented, as
/// `querySelectorAll` rejects the whole list in that case.
/// Selectors §4.1
pub fn parse_selector_list(input: &str) -> Option<SelectorList> {
    let selectors = split_list_entries(input)
        .into_iter()
        .map(|part| {
            parse_complex_selector(part.trim())
                .filter(|sel| !sel.first.simples.is_empty() || !sel.rest.is_empty())
        })
        .collect::<Option<Vec<_>>>()?;
    Some(SelectorList { selectors })
}

/// Split on commas outside quoted strings and attribute brackets.
fn split_list_entries(input: &str) -> Vec<&str> {
    let mut entries = Vec::new();
    let mut start = 0;
    let mut quote: Option<u8> = None;
    let mut bracket_depth = 0_usize;
    for (index, byte) in input.bytes().enumerate() {
        match (quote, byte) {
            (Some(open), _) if byte == open => quote = None,
            (Some(_), _) => {}
            (None, b'"' | b'\'') => quote = Some(byte),
            (None, b'[') => bracket_depth = bracket_depth.saturating_add(1),
            (None, b']') => bracket_depth = bracket_depth.saturating_sub(1),
            (None, b',') if bracket_depth == 0 => {
                entries.push(input.get(start..index).unwrap_or_default());
                start = index.saturating_add(1);
            }
            _ => {}
        }
    }
    entries.push(input.get(start..).unwrap_or_default());
    entries
}

/// Parse one complex selector. Returns `None` for unsupported or malformed input.
/// Selectors §16: Combinators; §5–6: simple selectors
pub fn parse_complex_selector(input: &str) -> Option<ComplexSelector> {
    let mut tokens = SelectorTokenizer::new(input);
    let mut current = CompoundSelector::default();
    let mut first = None;
    let mut rest: Vec<(Combinator, CompoundSelector)> = Vec::new();
    let mut pending_combinator: Option<Combinator> = None;

    while let Some(token) = tokens.next() {
        match token {
            Tok::Unsupported => return None,
            Tok::Combinator(comb) => {
                if current.simples.is_empty() {
                    // Leading combinator or two explicit combinators in a row.
                    if first.is_none()
                        || pending_combinator.is_some_and(|prev| prev != Combinator::Descendant)
                    {
                        return None;
                    }
                } else if first.is_none() {
                    first = Some(take(&mut current));
                } else {
                    rest.push((
                        pending_combinator.unwrap_or(Combinator::Descendant),
                        take(&mut current),
                    ));
                }
                pending_combinator = Some(comb);
            }
            Tok::DescendantWS => {
                if !current.simples.is_empty() {
                    if first.is_none() {
                        first = Some(take(&mut current));
                    } else {
                        rest.push((
                            pending_combinator.take().unwrap_or(Combinator::Descendant),
                            take(&mut current),
                        ));
                    }
                    pending_combinator = Some(Combinator::Descendant);
                } else if pending_combinator.is_none() && first.is_some() {
                    pending_combinator = Some(Combinator::Descendant);
                }
            }
            Tok::Simple(simple) => {
                current.simples.push(simple);
            }
        }
    }

    match first {
        None => Some(ComplexSelector {
            first: current,
            rest,
        }),
        Some(first_compound) => {
            if current.simples.is_empty() {
                // A trailing explicit combinator has nothing to its right.
                if pending_combinator.is_some_and(|comb| comb != Combinator::Descendant) {
                    return None;
                }
            } else {
                rest.push((
                    pending_combinator.unwrap_or(Combinator::Descendant),
                    current,
                ));
            }
            Some(ComplexSelector {
                first: first_compound,
                rest,
            })
        }
    }
}
