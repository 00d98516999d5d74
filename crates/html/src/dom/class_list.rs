//! Ordered class token set backing `Element.classList`.
//! See <https://dom.spec.whatwg.org/#interface-domtokenlist>.

use super::DOMError;

/// Class tokens in first-seen order without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList {
    tokens: Vec<String>,
}

impl ClassList {
    /// Ordered set parser: split on ASCII whitespace, keep the first occurrence.
    pub fn parse(attr: &str) -> Self {
        let mut list = Self::default();
        for token in attr.split_ascii_whitespace() {
            list.add(token);
        }
        list
    }

    /// Tokens must be non-empty and contain no ASCII whitespace.
    ///
    /// # Errors
    /// `Syntax` for an empty token, `InvalidCharacter` for embedded whitespace.
    pub fn validate_token(token: &str) -> Result<(), DOMError> {
        if token.is_empty() {
            return Err(DOMError::Syntax(String::from("the token must not be empty")));
        }
        if token.chars().any(|ch| ch.is_ascii_whitespace()) {
            return Err(DOMError::InvalidCharacter(format!(
                "the token '{token}' contains whitespace"
            )));
        }
        Ok(())
    }

    /// Returns true when the token was not already present.
    pub fn add(&mut self, token: &str) -> bool {
        if self.contains(token) {
            return false;
        }
        self.tokens.push(token.to_owned());
        true
    }

    /// Returns true when the token was present.
    pub fn remove(&mut self, token: &str) -> bool {
        let before = self.tokens.len();
        self.tokens.retain(|existing| existing != token);
        self.tokens.len() != before
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|existing| existing == token)
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.tokens
    }

    /// Ordered set serializer: tokens joined by a single space.
    pub fn serialize(&self) -> String {
        self.tokens.join(" ")
    }
}

impl From<ClassList> for Vec<String> {
    fn from(list: ClassList) -> Self {
        list.tokens
    }
}
