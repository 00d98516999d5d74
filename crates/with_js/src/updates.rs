//! Class-name parsing into operation descriptors.
//!
//! Three entry points cover the three kinds of class source: a DOM element, a
//! raw `class` attribute string, and an already split list of class names.

use core::fmt;
use html::{DOM, NodeId};

/// Every operation class starts with this literal.
pub const PREFIX: &str = "js-with-js--";
/// Separates the operation name from its argument block (first occurrence only).
pub const OPERATION_SEPARATOR: &str = "__";
/// Separates positional arguments inside the argument block.
pub const ARGUMENT_SEPARATOR: &str = "--";

/// One parsed operation: a name and its positional string arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Update {
    operation: String,
    arguments: Vec<String>,
}

impl Update {
    pub fn new(operation: &str, arguments: &[&str]) -> Self {
        Self {
            operation: operation.to_owned(),
            arguments: arguments.iter().map(|&argument| argument.to_owned()).collect(),
        }
    }

    pub fn from_parts(operation: String, arguments: Vec<String>) -> Self {
        Self {
            operation,
            arguments,
        }
    }

    pub fn operation(&self) -> &str {
        &self.operation
    }

    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    /// Parse a single class name. Returns `None` for classes that are not
    /// operation classes.
    ///
    /// An empty argument block (`name__`) means no arguments; consecutive
    /// separators inside the block produce empty-string arguments.
    pub fn parse(class_name: &str) -> Option<Self> {
        let description = class_name.strip_prefix(PREFIX)?;
        // At least one character must follow the prefix, and it may not be a line terminator.
        if description
            .chars()
            .next()
            .is_none_or(|first| matches!(first, '\n' | '\r' | '\u{2028}' | '\u{2029}'))
        {
            return None;
        }
        // Split on the first `__` only. Later `__` runs stay in the argument text instead of
        // truncating it, so `addAttribute__data-a__b--c` keeps `data-a__b` and `c`.
        let (operation, arguments) = match description.split_once(OPERATION_SEPARATOR) {
            Some((operation, block)) if !block.is_empty() => (
                operation,
                block.split(ARGUMENT_SEPARATOR).map(String::from).collect(),
            ),
            Some((operation, _)) => (operation, Vec::new()),
            None => (description, Vec::new()),
        };
        Some(Self::from_parts(operation.to_owned(), arguments))
    }

    /// The class name that parses back into this update.
    pub fn to_class_name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Update {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{PREFIX}{}", self.operation)?;
        if !self.arguments.is_empty() {
            write!(
                f,
                "{OPERATION_SEPARATOR}{}",
                self.arguments.join(ARGUMENT_SEPARATOR)
            )?;
        }
        Ok(())
    }
}

/// Updates from a list of class names, in list order. Non-operation classes are dropped.
pub fn updates_from_classes<S: AsRef<str>>(classes: &[S]) -> Vec<Update> {
    classes
        .iter()
        .filter_map(|class_name| Update::parse(class_name.as_ref()))
        .collect()
}

/// Updates from a space-separated class string. Only U+0020 separates entries.
pub fn updates_from_class_attr(classes: &str) -> Vec<Update> {
    classes.split(' ').filter_map(Update::parse).collect()
}

/// Updates from an element's class list. Non-elements yield nothing.
pub fn updates_from_element(dom: &DOM, element: NodeId) -> Vec<Update> {
    updates_from_classes(dom.class_list(element).as_slice())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_operation_classes_in_order() {
        let updates = updates_from_classes(&[
            "js-with-js--addClass__foo",
            "js-with-js--removeAttribute__data-x",
            "unrelated-class",
        ]);
        assert_eq!(
            updates,
            vec![
                Update::new("addClass", &["foo"]),
                Update::new("removeAttribute", &["data-x"]),
            ]
        );
    }

    #[test]
    fn no_argument_form() {
        assert_eq!(
            updates_from_classes(&["js-with-js--remove"]),
            vec![Update::new("remove", &[])]
        );
    }

    #[test]
    fn multi_argument_form() {
        assert_eq!(
            updates_from_classes(&["js-with-js--addClass__a--b--c"]),
            vec![Update::new("addClass", &["a", "b", "c"])]
        );
    }

    #[test]
    fn consecutive_separators_give_empty_arguments() {
        assert_eq!(
            Update::parse("js-with-js--op__a----b"),
            Some(Update::new("op", &["a", "", "b"]))
        );
        assert_eq!(
            Update::parse("js-with-js--op__--"),
            Some(Update::new("op", &["", ""]))
        );
    }

    #[test]
    fn only_the_first_operation_separator_splits() {
        // A second `__` belongs to the argument text and does not truncate it.
        assert_eq!(
            Update::parse("js-with-js--addAttribute__data-a__b--c"),
            Some(Update::new("addAttribute", &["data-a__b", "c"]))
        );
    }

    #[test]
    fn empty_argument_block_means_no_arguments() {
        assert_eq!(
            Update::parse("js-with-js--remove__"),
            Some(Update::new("remove", &[]))
        );
    }

    #[test]
    fn prefix_must_be_followed_by_something() {
        assert_eq!(Update::parse("js-with-js--"), None);
        assert_eq!(Update::parse("js-with-js--\nremove"), None);
        assert_eq!(Update::parse("js-with-js-remove"), None);
        assert_eq!(Update::parse("x-js-with-js--remove"), None);
        assert_eq!(Update::parse("JS-WITH-JS--remove"), None);
    }

    #[test]
    fn names_are_not_validated_while_parsing() {
        assert_eq!(
            Update::parse("js-with-js--doesNotExist__1"),
            Some(Update::new("doesNotExist", &["1"]))
        );
        assert_eq!(
            Update::parse("js-with-js--__x"),
            Some(Update::new("", &["x"]))
        );
    }

    #[test]
    fn class_attr_splits_on_single_spaces_only() {
        assert_eq!(
            updates_from_class_attr("a  js-with-js--remove js-with-js--addClass__x"),
            vec![Update::new("remove", &[]), Update::new("addClass", &["x"])]
        );
        // A tab does not separate entries here, so the whole token fails the prefix test.
        assert!(updates_from_class_attr("a\tjs-with-js--remove").is_empty());
        assert!(updates_from_class_attr("").is_empty());
    }

    #[test]
    fn element_classes_come_from_the_class_list() {
        let mut dom = DOM::new();
        let div = dom.create_element("div");
        let root = dom.root();
        dom.append_child(root, div).unwrap();
        dom.set_attribute(
            div,
            "class",
            "js-with-js--addClass__b\tother js-with-js--remove js-with-js--addClass__b",
        )
        .unwrap();
        assert_eq!(
            updates_from_element(&dom, div),
            vec![Update::new("addClass", &["b"]), Update::new("remove", &[])]
        );

        let text = dom.create_text("js-with-js--remove");
        assert!(updates_from_element(&dom, text).is_empty());
    }

    #[test]
    fn display_renders_the_class_name() {
        let update = Update::new("addClass", &["a", "b"]);
        assert_eq!(update.to_class_name(), "js-with-js--addClass__a--b");
        assert_eq!(Update::parse(&update.to_class_name()), Some(update));
        assert_eq!(Update::new("remove", &[]).to_string(), "js-with-js--remove");
    }
}
