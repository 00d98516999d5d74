mod class_list;
mod error;
mod printing;
mod query;

pub use class_list::ClassList;
pub use error::DOMError;

use anyhow::{Error, anyhow};
use indextree::{Arena, Node, NodeId};
use smallvec::SmallVec;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum NodeKind {
    #[default]
    Document,
    Element { tag: String },
    Text { text: String },
    Comment { text: String },
}

#[derive(Debug, Clone, Default)]
pub struct DOMNode {
    pub kind: NodeKind,
    pub attrs: SmallVec<(String, String), 4>,
}

impl DOMNode {
    fn element(tag: &str) -> Self {
        Self {
            kind: NodeKind::Element {
                tag: tag.to_owned(),
            },
            attrs: SmallVec::new(),
        }
    }

    pub fn is_element(&self) -> bool {
        matches!(self.kind, NodeKind::Element { .. })
    }

    /// Attribute lookup by exact (already lowercased) name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(attr_name, _)| attr_name == name)
            .map(|(_, value)| value.as_str())
    }
}

/// A document tree. Nodes are never freed: detached subtrees stay addressable
/// through their `NodeId` so callers holding a handle can keep mutating them.
pub struct DOM {
    dom: Arena<DOMNode>,
    root: NodeId,
}

impl Default for DOM {
    fn default() -> Self {
        Self::new()
    }
}

impl DOM {
    /// Create a DOM holding only the document node.
    pub fn new() -> Self {
        let mut dom = Arena::new();
        Self {
            root: dom.new_node(DOMNode::default()),
            dom,
        }
    }

    /// The document node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<&DOMNode> {
        self.dom.get(id).map(Node::get)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut DOMNode> {
        self.dom.get_mut(id).map(Node::get_mut)
    }

    fn element_mut(&mut self, id: NodeId) -> Result<&mut DOMNode, DOMError> {
        self.node_mut(id)
            .filter(|node| node.is_element())
            .ok_or(DOMError::NotAnElement(id))
    }

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.dom.new_node(DOMNode::element(tag))
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.dom.new_node(DOMNode {
            kind: NodeKind::Text {
                text: text.to_owned(),
            },
            attrs: SmallVec::new(),
        })
    }

    pub fn create_comment(&mut self, text: &str) -> NodeId {
        self.dom.new_node(DOMNode {
            kind: NodeKind::Comment {
                text: text.to_owned(),
            },
            attrs: SmallVec::new(),
        })
    }

    /// Append `child` as the last child of `parent`, detaching it first if needed.
    ///
    /// # Errors
    /// Returns an error if the append would create a cycle or either node is gone.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), Error> {
        parent
            .checked_append(child, &mut self.dom)
            .map_err(|err| anyhow!("cannot append {child:?} to {parent:?}: {err:?}"))
    }

    /// Detach `id` from its parent. Returns the former parent, or `None` when the
    /// node was already detached (or is the document itself).
    pub fn detach(&mut self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        id.detach(&mut self.dom);
        log::trace!(target: "html_dom", "detached {id:?} from {parent:?}");
        Some(parent)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.dom.get(id).and_then(Node::parent)
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        id.children(&self.dom)
    }

    /// Descendants of `id` in document (pre-)order, excluding `id` itself.
    pub fn descendants(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        id.descendants(&self.dom).skip(1)
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(DOMNode::is_element)
    }

    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        match &self.node(id)?.kind {
            NodeKind::Element { tag } => Some(tag.as_str()),
            _ => None,
        }
    }

    /// Attribute value, with the name ASCII-lowercased as HTML documents do.
    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.node(id)?.attr(&name.to_ascii_lowercase())
    }

    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.get_attribute(id, name).is_some()
    }

    /// Set an attribute, replacing any existing value in place.
    ///
    /// # Errors
    /// `InvalidCharacter` for names that are empty or contain characters the
    /// HTML attribute grammar forbids; `NotAnElement` for non-element nodes.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> Result<(), DOMError> {
        validate_attribute_name(name)?;
        let name = name.to_ascii_lowercase();
        let node = self.element_mut(id)?;
        if let Some(slot) = node
            .attrs
            .iter_mut()
            .find(|(attr_name, _)| *attr_name == name)
        {
            value.clone_into(&mut slot.1);
        } else {
            node.attrs.push((name, value.to_owned()));
        }
        Ok(())
    }

    /// Remove an attribute. Returns whether it was present.
    ///
    /// # Errors
    /// `NotAnElement` for non-element nodes.
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Result<bool, DOMError> {
        let name = name.to_ascii_lowercase();
        let node = self.element_mut(id)?;
        let before = node.attrs.len();
        node.attrs.retain(|(attr_name, _)| *attr_name != name);
        Ok(node.attrs.len() != before)
    }

    /// The element's class tokens in attribute order, duplicates removed.
    /// Non-elements have an empty class list.
    pub fn class_list(&self, id: NodeId) -> ClassList {
        self.node(id)
            .and_then(|node| node.attr("class"))
            .map(ClassList::parse)
            .unwrap_or_default()
    }

    /// `classList.add(...tokens)`.
    ///
    /// # Errors
    /// All tokens are validated before any change; see [`ClassList::validate_token`].
    pub fn add_classes<S: AsRef<str>>(&mut self, id: NodeId, tokens: &[S]) -> Result<(), DOMError> {
        self.update_class_list(id, tokens, |list, token| {
            list.add(token);
        })
    }

    /// `classList.remove(...tokens)`.
    ///
    /// # Errors
    /// All tokens are validated before any change; see [`ClassList::validate_token`].
    pub fn remove_classes<S: AsRef<str>>(
        &mut self,
        id: NodeId,
        tokens: &[S],
    ) -> Result<(), DOMError> {
        self.update_class_list(id, tokens, |list, token| {
            list.remove(token);
        })
    }

    fn update_class_list<S: AsRef<str>>(
        &mut self,
        id: NodeId,
        tokens: &[S],
        mut edit: impl FnMut(&mut ClassList, &str),
    ) -> Result<(), DOMError> {
        for token in tokens {
            ClassList::validate_token(token.as_ref())?;
        }
        let node = self.element_mut(id)?;
        let had_attribute = node.attr("class").is_some();
        let mut list = node.attr("class").map(ClassList::parse).unwrap_or_default();
        for token in tokens {
            edit(&mut list, token.as_ref());
        }
        // DOMTokenList update steps: never create an empty class attribute.
        if !had_attribute && list.is_empty() {
            return Ok(());
        }
        let serialized = list.serialize();
        if let Some(slot) = node
            .attrs
            .iter_mut()
            .find(|(attr_name, _)| attr_name == "class")
        {
            slot.1 = serialized;
        } else {
            node.attrs.push((String::from("class"), serialized));
        }
        Ok(())
    }
}

/// Names must be non-empty and free of whitespace, controls, quotes, `/`, `>` and `=`.
fn validate_attribute_name(name: &str) -> Result<(), DOMError> {
    let invalid = name.is_empty()
        || name.chars().any(|ch| {
            ch.is_ascii_whitespace() || ch.is_control() || matches!(ch, '"' | '\'' | '/' | '>' | '=')
        });
    if invalid {
        return Err(DOMError::InvalidCharacter(format!(
            "'{name}' is not a valid attribute name"
        )));
    }
    Ok(())
}
