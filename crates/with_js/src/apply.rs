use anyhow::{Context as _, Error};
use html::{DOM, NodeId};

use crate::config::WithJsConfig;
use crate::run::{RunOptions, run};
use crate::updates::updates_from_element;

/// Every element whose class attribute mentions the prefix anywhere.
///
/// This is coarser than the class parser: it also matches `prefix-js-with-js--x`
/// and classes with nothing after the prefix. Such elements are visited and
/// yield no updates.
pub const DEFAULT_SELECTOR: &str = r#"[class*="js-with-js--"]"#;

/// What [`apply`] processes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target<'selector> {
    /// Every element under `root` (the document when `None`) matching `selector`.
    Selector {
        selector: &'selector str,
        root: Option<NodeId>,
    },
    /// Exactly this element, whether or not it matches any selector.
    Element(NodeId),
}

impl Default for Target<'static> {
    fn default() -> Self {
        Self::selector(DEFAULT_SELECTOR)
    }
}

impl<'selector> Target<'selector> {
    pub const fn selector(selector: &'selector str) -> Self {
        Self::Selector {
            selector,
            root: None,
        }
    }

    /// Narrow a selector target to the subtree under `root`. Element targets are unchanged.
    #[must_use]
    pub const fn within(self, root: NodeId) -> Self {
        match self {
            Self::Selector { selector, .. } => Self::Selector {
                selector,
                root: Some(root),
            },
            Self::Element(_) => self,
        }
    }
}

/// Run every element of `target` through the class parser and [`run`].
///
/// Selector matches are collected before anything is mutated and processed in
/// document order, so mutations never change which elements get visited.
/// Removing an element does not skip its matched descendants.
///
/// # Errors
/// An unparsable selector, or the first failing operation.
pub fn apply(dom: &mut DOM, target: Target<'_>, options: &RunOptions<'_>) -> Result<(), Error> {
    match target {
        Target::Element(element) => apply_to_element(dom, element, options),
        Target::Selector { selector, root } => {
            let root = root.unwrap_or_else(|| dom.root());
            let elements = dom
                .query_selector_all(root, selector)
                .with_context(|| format!("cannot resolve target selector {selector:?}"))?;
            log::debug!(
                target: "with_js",
                "processing {} element(s) matching {selector:?}",
                elements.len()
            );
            for element in elements {
                apply_to_element(dom, element, options)?;
            }
            Ok(())
        }
    }
}

/// [`apply`] with the default selector over the whole document and the builtin operations.
///
/// # Errors
/// See [`apply`].
pub fn apply_default(dom: &mut DOM) -> Result<(), Error> {
    apply(dom, Target::default(), &RunOptions::default())
}

/// [`apply`] with the selector and operation allowlist from `config`.
///
/// # Errors
/// See [`apply`].
pub fn apply_with_config(dom: &mut DOM, config: &WithJsConfig) -> Result<(), Error> {
    let operations = config.operation_table();
    apply(
        dom,
        config.target(),
        &RunOptions::with_operations(&operations),
    )
}

fn apply_to_element(dom: &mut DOM, element: NodeId, options: &RunOptions<'_>) -> Result<(), Error> {
    let updates = updates_from_element(dom, element);
    run(dom, &updates, element, options)
}
