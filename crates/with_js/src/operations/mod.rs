//! Named DOM operations and the table the executor looks them up in.

use core::fmt;
use html::{DOM, DOMError, NodeId};
use std::error::Error;

mod builtin;
mod table;

pub use builtin::{BuiltinOperation, MISSING_ARGUMENT, UnknownOperation};
pub use table::{DEFAULT_OPERATIONS, OperationTable};

/// A host action invoked with the target element and the parsed string arguments.
///
/// Closures with the matching signature implement this directly, so custom
/// tables can be assembled without a dedicated type per operation.
pub trait Operation: Send + Sync {
    /// # Errors
    /// Whatever the underlying DOM primitive rejects.
    fn apply(&self, dom: &mut DOM, target: NodeId, arguments: &[String])
    -> Result<(), OperationError>;
}

impl<F> Operation for F
where
    F: Fn(&mut DOM, NodeId, &[String]) -> Result<(), OperationError> + Send + Sync,
{
    fn apply(
        &self,
        dom: &mut DOM,
        target: NodeId,
        arguments: &[String],
    ) -> Result<(), OperationError> {
        self(dom, target, arguments)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationError {
    /// `remove` on a node whose parent is missing or is not an element.
    NoParent(NodeId),
    Dom(DOMError),
}

impl fmt::Display for OperationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoParent(node) => {
                write!(f, "node {node:?} has no parent element to be removed from")
            }
            Self::Dom(err) => write!(f, "{err}"),
        }
    }
}

impl Error for OperationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Dom(err) => Some(err),
            Self::NoParent(_) => None,
        }
    }
}

impl From<DOMError> for OperationError {
    fn from(err: DOMError) -> Self {
        Self::Dom(err)
    }
}
