//! HTML5 parsing using html5ever.

use crate::dom::DOM;
use anyhow::Error;
use html5ever::tendril::TendrilSink as _;
use html5ever::{ParseOpts, parse_document};
use indextree::NodeId;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};

/// Parse a complete HTML document. Fragments are wrapped in the implied
/// `html`/`head`/`body` elements, as a browser would.
///
/// # Errors
/// Returns an error if the parsed tree cannot be linked into the arena.
pub fn parse_html(html: &str) -> Result<DOM, Error> {
    let rc_dom: RcDom = parse_document(RcDom::default(), ParseOpts::default()).one(html);
    let mut dom = DOM::new();
    let root = dom.root();
    convert_children(&mut dom, &rc_dom.document, root)?;
    Ok(dom)
}

impl DOM {
    /// Shorthand for [`parse_html`].
    ///
    /// # Errors
    /// See [`parse_html`].
    pub fn from_html(html: &str) -> Result<Self, Error> {
        parse_html(html)
    }
}

fn convert_children(dom: &mut DOM, rc_node: &Handle, parent: NodeId) -> Result<(), Error> {
    for child in rc_node.children.borrow().iter() {
        convert_node(dom, child, parent)?;
    }
    Ok(())
}

/// Convert an html5ever node into our arena representation.
fn convert_node(dom: &mut DOM, rc_node: &Handle, parent: NodeId) -> Result<(), Error> {
    match &rc_node.data {
        RcNodeData::Document => convert_children(dom, rc_node, parent),

        // Doctypes and processing instructions have no counterpart here.
        RcNodeData::Doctype { .. } | RcNodeData::ProcessingInstruction { .. } => Ok(()),

        RcNodeData::Text { contents } => {
            let node = dom.create_text(&contents.borrow());
            dom.append_child(parent, node)
        }

        RcNodeData::Comment { contents } => {
            let node = dom.create_comment(contents);
            dom.append_child(parent, node)
        }

        RcNodeData::Element { name, attrs, .. } => {
            let node = dom.create_element(&name.local);
            for attr in attrs.borrow().iter() {
                // The tokenizer accepts names the setter rejects, e.g. `<p "a>`.
                if let Err(err) = dom.set_attribute(node, &attr.name.local, &attr.value) {
                    log::debug!(target: "html_parser", "dropping attribute: {err}");
                }
            }
            dom.append_child(parent, node)?;
            convert_children(dom, rc_node, node)
        }
    }
}
