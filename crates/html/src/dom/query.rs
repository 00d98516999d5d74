//! Selector queries (`querySelectorAll`, `matches`) over the DOM.

use super::{DOM, DOMError, NodeKind};
use css_selectors::{ElementAdapter, SelectorList, matches_selector_list, parse_selector_list};
use indextree::NodeId;

impl ElementAdapter for DOM {
    type Handle = NodeId;

    fn parent(&self, element: NodeId) -> Option<NodeId> {
        DOM::parent(self, element).filter(|&parent| self.is_element(parent))
    }

    fn previous_sibling_element(&self, element: NodeId) -> Option<NodeId> {
        element
            .preceding_siblings(&self.dom)
            .skip(1)
            .find(|&sibling| self.is_element(sibling))
    }

    fn tag_name(&self, element: NodeId) -> &str {
        DOM::tag_name(self, element).unwrap_or_default()
    }

    fn element_id(&self, element: NodeId) -> Option<&str> {
        self.node(element)?.attr("id")
    }

    fn has_class(&self, element: NodeId, class: &str) -> bool {
        self.node(element)
            .and_then(|node| node.attr("class"))
            .is_some_and(|classes| classes.split_ascii_whitespace().any(|token| token == class))
    }

    fn attr(&self, element: NodeId, name: &str) -> Option<&str> {
        self.node(element)?.attr(name)
    }
}

impl DOM {
    /// Elements under `root` (exclusive) matching `selector`, in document order.
    ///
    /// # Errors
    /// `Syntax` when any selector in the list cannot be parsed.
    pub fn query_selector_all(&self, root: NodeId, selector: &str) -> Result<Vec<NodeId>, DOMError> {
        let list = parse(selector)?;
        let found: Vec<NodeId> = self
            .descendants(root)
            .filter(|&node| self.is_element(node) && matches_selector_list(self, node, &list))
            .collect();
        log::debug!(
            target: "html_dom",
            "query_selector_all({selector:?}) under {root:?}: {} match(es)",
            found.len()
        );
        Ok(found)
    }

    /// First element under `root` matching `selector`.
    ///
    /// # Errors
    /// `Syntax` when any selector in the list cannot be parsed.
    pub fn query_selector(&self, root: NodeId, selector: &str) -> Result<Option<NodeId>, DOMError> {
        let list = parse(selector)?;
        Ok(self
            .descendants(root)
            .find(|&node| self.is_element(node) && matches_selector_list(self, node, &list)))
    }

    /// `Element.matches(selector)`.
    ///
    /// # Errors
    /// `Syntax` when any selector in the list cannot be parsed.
    pub fn matches(&self, element: NodeId, selector: &str) -> Result<bool, DOMError> {
        let list = parse(selector)?;
        Ok(self.is_element(element) && matches_selector_list(self, element, &list))
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self, id: NodeId) -> String {
        self.descendants(id)
            .filter_map(|node| match &self.node(node)?.kind {
                NodeKind::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

fn parse(selector: &str) -> Result<SelectorList, DOMError> {
    parse_selector_list(selector)
        .ok_or_else(|| DOMError::Syntax(format!("'{selector}' is not a valid selector")))
}
