use core::fmt;
use core::str::FromStr;

use super::{Operation, OperationError};
use html::{DOM, NodeId};
use std::error::Error;

/// Value passed for a positional argument the class name did not provide.
pub const MISSING_ARGUMENT: &str = "undefined";

/// The five operations every default table carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BuiltinOperation {
    /// Detach the element from its parent element.
    Remove,
    /// `setAttribute(args[0], args[1])`.
    AddAttribute,
    /// `removeAttribute(args[0])`.
    RemoveAttribute,
    /// `classList.add(...args)`.
    AddClass,
    /// `classList.remove(...args)`.
    RemoveClass,
}

impl BuiltinOperation {
    pub const ALL: [Self; 5] = [
        Self::Remove,
        Self::AddAttribute,
        Self::RemoveAttribute,
        Self::AddClass,
        Self::RemoveClass,
    ];

    /// The name used in class names, case-sensitive.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Remove => "remove",
            Self::AddAttribute => "addAttribute",
            Self::RemoveAttribute => "removeAttribute",
            Self::AddClass => "addClass",
            Self::RemoveClass => "removeClass",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|operation| operation.name() == name)
    }
}

/// A name that is not one of the [`BuiltinOperation`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOperation(pub String);

impl fmt::Display for UnknownOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a builtin operation", self.0)
    }
}

impl Error for UnknownOperation {}

impl FromStr for BuiltinOperation {
    type Err = UnknownOperation;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::from_name(name).ok_or_else(|| UnknownOperation(name.to_owned()))
    }
}

impl Operation for BuiltinOperation {
    fn apply(
        &self,
        dom: &mut DOM,
        target: NodeId,
        arguments: &[String],
    ) -> Result<(), OperationError> {
        match *self {
            Self::Remove => {
                // Only an element parent can give the node up; the root element cannot be removed.
                if !dom.parent(target).is_some_and(|parent| dom.is_element(parent)) {
                    return Err(OperationError::NoParent(target));
                }
                dom.detach(target);
                Ok(())
            }
            Self::AddAttribute => {
                dom.set_attribute(target, argument(arguments, 0), argument(arguments, 1))?;
                Ok(())
            }
            Self::RemoveAttribute => {
                dom.remove_attribute(target, argument(arguments, 0))?;
                Ok(())
            }
            Self::AddClass => Ok(dom.add_classes(target, arguments)?),
            Self::RemoveClass => Ok(dom.remove_classes(target, arguments)?),
        }
    }
}

/// Positional argument `index`, or [`MISSING_ARGUMENT`] when the class name
/// stops short: `addAttribute__hidden` sets `hidden="undefined"`.
fn argument(arguments: &[String], index: usize) -> &str {
    arguments.get(index).map_or(MISSING_ARGUMENT, String::as_str)
}
