//! Declarative DOM mutations driven by class names.
//!
//! Markup opts into a mutation by carrying a class of the form
//!
//! ```text
//! js-with-js--<operationName>(__<arg1>(--<arg2>...)?)?
//! ```
//!
//! e.g. `js-with-js--removeClass__active` runs `removeClass("active")` on the
//! element when the document is scanned. Scanning happens in three steps per
//! element: the class list is parsed into [`Update`]s ([`updates`]), each update
//! is looked up in an [`OperationTable`] ([`operations`]) and [`run()`] applies
//! the matches in class order. [`apply()`] resolves a selector (by default
//! [`DEFAULT_SELECTOR`]) and drives all of this for every matching element.
//!
//! Unknown operation names are skipped, and missing positional arguments are
//! passed as [`MISSING_ARGUMENT`]. Failures of the DOM primitives themselves
//! (invalid attribute names or class tokens, `remove` without a parent element)
//! stop processing and are returned to the caller.

#![allow(
    clippy::missing_docs_in_private_items,
    reason = "Internal implementation details don't need public documentation"
)]
#![allow(
    clippy::missing_inline_in_public_items,
    reason = "Inlining decisions left to compiler for this crate"
)]

mod apply;
pub mod config;
pub mod operations;
mod run;
pub mod updates;

pub use apply::{DEFAULT_SELECTOR, Target, apply, apply_default, apply_with_config};
pub use config::WithJsConfig;
pub use operations::{
    BuiltinOperation, DEFAULT_OPERATIONS, MISSING_ARGUMENT, Operation, OperationError,
    OperationTable, UnknownOperation,
};
pub use run::{RunOptions, run};
pub use updates::{
    ARGUMENT_SEPARATOR, OPERATION_SEPARATOR, PREFIX, Update, updates_from_class_attr,
    updates_from_classes, updates_from_element,
};

pub use html::{DOM, NodeId};
