use core::fmt::{Display, Formatter, Result as FmtResult};
use indextree::NodeId;
use std::error::Error;

/// Failures raised by DOM mutation primitives, named after their DOM exceptions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DOMError {
    /// `InvalidCharacterError`: a name or token contains forbidden characters.
    InvalidCharacter(String),
    /// `SyntaxError`: e.g. an empty class token.
    Syntax(String),
    /// The node does not exist or is not an element.
    NotAnElement(NodeId),
}

impl Display for DOMError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::InvalidCharacter(message) => write!(f, "InvalidCharacterError: {message}"),
            Self::Syntax(message) => write!(f, "SyntaxError: {message}"),
            Self::NotAnElement(node) => write!(f, "node {node:?} is not an element"),
        }
    }
}

impl Error for DOMError {}
