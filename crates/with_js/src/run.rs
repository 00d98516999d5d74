use anyhow::{Context as _, Error};
use html::{DOM, NodeId};

use crate::operations::{DEFAULT_OPERATIONS, OperationTable};
use crate::updates::Update;

/// Knobs for [`run`] and [`crate::apply()`].
#[derive(Clone, Copy, Debug)]
pub struct RunOptions<'table> {
    /// Where operation names are resolved. Defaults to [`DEFAULT_OPERATIONS`].
    pub operations: &'table OperationTable,
}

impl Default for RunOptions<'static> {
    fn default() -> Self {
        Self {
            operations: &DEFAULT_OPERATIONS,
        }
    }
}

impl<'table> RunOptions<'table> {
    pub const fn with_operations(operations: &'table OperationTable) -> Self {
        Self { operations }
    }
}

/// Apply `updates` to `element` in order.
///
/// Names the table does not know are skipped. The first failing operation
/// stops processing; updates already applied stay applied.
///
/// # Errors
/// The failing operation's [`crate::OperationError`], with the update and node attached as context.
pub fn run(
    dom: &mut DOM,
    updates: &[Update],
    element: NodeId,
    options: &RunOptions<'_>,
) -> Result<(), Error> {
    for update in updates {
        let Some(operation) = options.operations.get(update.operation()) else {
            log::debug!(
                target: "with_js",
                "skipping unknown operation {:?} on {element:?}",
                update.operation()
            );
            continue;
        };
        log::trace!(target: "with_js", "{element:?}: {update}");
        operation
            .apply(dom, element, update.arguments())
            .with_context(|| format!("`{update}` failed on {element:?}"))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::{BuiltinOperation, OperationError};
    use html::DOMError;

    fn attached_div(dom: &mut DOM) -> NodeId {
        let div = dom.create_element("div");
        let root = dom.root();
        dom.append_child(root, div).unwrap();
        div
    }

    #[test]
    fn applies_in_order() {
        let mut dom = DOM::new();
        let div = attached_div(&mut dom);
        let updates = [
            Update::new("addClass", &["x"]),
            Update::new("removeClass", &["x"]),
            Update::new("addClass", &["y"]),
        ];
        run(&mut dom, &updates, div, &RunOptions::default()).unwrap();
        assert_eq!(dom.get_attribute(div, "class"), Some("y"));
    }

    #[test]
    fn unknown_names_are_skipped() {
        let mut dom = DOM::new();
        let div = attached_div(&mut dom);
        let updates = [
            Update::new("doesNotExist", &["1"]),
            Update::new("addClass", &["ok"]),
        ];
        run(&mut dom, &updates, div, &RunOptions::default()).unwrap();
        assert_eq!(dom.get_attribute(div, "class"), Some("ok"));
    }

    #[test]
    fn empty_table_changes_nothing() {
        let mut dom = DOM::new();
        let div = attached_div(&mut dom);
        let table = OperationTable::empty();
        run(
            &mut dom,
            &[Update::new("remove", &[])],
            div,
            &RunOptions::with_operations(&table),
        )
        .unwrap();
        assert_eq!(dom.parent(div), Some(dom.root()));
    }

    #[test]
    fn missing_arguments_do_not_stop_processing() {
        let mut dom = DOM::new();
        let div = attached_div(&mut dom);
        let updates = [
            Update::new("addAttribute", &["hidden"]),
            Update::new("removeAttribute", &[]),
            Update::new("addClass", &["after"]),
        ];
        run(&mut dom, &updates, div, &RunOptions::default()).unwrap();
        assert_eq!(dom.get_attribute(div, "hidden"), Some("undefined"));
        assert_eq!(dom.get_attribute(div, "class"), Some("after"));
    }

    #[test]
    fn failure_stops_processing_and_keeps_earlier_effects() {
        let mut dom = DOM::new();
        let div = attached_div(&mut dom);
        let updates = [
            Update::new("addClass", &["before"]),
            Update::new("addAttribute", &["a=b", "1"]),
            Update::new("addClass", &["after"]),
        ];
        let err = run(&mut dom, &updates, div, &RunOptions::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<OperationError>(),
            Some(OperationError::Dom(DOMError::InvalidCharacter(_)))
        ));
        assert!(err.to_string().contains("js-with-js--addAttribute__a=b--1"));
        assert_eq!(dom.get_attribute(div, "class"), Some("before"));
    }

    #[test]
    fn custom_table_entries_receive_arguments() {
        let mut dom = DOM::new();
        let div = attached_div(&mut dom);
        let table = OperationTable::empty()
            .with_operation("remove", BuiltinOperation::Remove)
            .with_fn("setText", |dom, target, arguments| {
                let text = dom.create_text(&arguments.join(" "));
                dom.append_child(target, text)
                    .map_err(|_| OperationError::NoParent(text))
            });
        run(
            &mut dom,
            &[
                Update::new("setText", &["hello", "world"]),
                Update::new("addClass", &["ignored"]),
            ],
            div,
            &RunOptions::with_operations(&table),
        )
        .unwrap();
        assert_eq!(dom.text_content(div), "hello world");
        assert!(!dom.has_attribute(div, "class"));
    }
}
