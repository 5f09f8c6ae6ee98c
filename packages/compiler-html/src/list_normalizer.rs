//! # List Renormalization
//!
//! Rich-text editors emit ordered lists as one `<ol>` holding every `<li>`.
//! Several email clients apply inconsistent spacing and numbering to such
//! shared containers, so each item is moved into its own single-item `<ol>`:
//!
//! ```text
//! <ol start="3" class="x"><li>A</li><li>B</li></ol>
//!   ▼
//! <ol class="x" start="3"><li value="3">A</li></ol><ol class="x" start="4"><li value="4">B</li></ol>
//! ```
//!
//! `start` keeps numbering for clients that honour it, `value` for the ones
//! that only look at the item. Unordered lists are left alone.

use crate::compiler::CompileError;
use html5ever::{LocalName, Namespace, QualName};
use kuchikiki::traits::*;
use kuchikiki::NodeRef;
use tracing::{debug, instrument};

const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// Split every ordered list in `html` into single-item lists
#[instrument(skip(html), fields(bytes = html.len()))]
pub fn normalize_lists(html: &str) -> Result<String, CompileError> {
    if !html.to_ascii_lowercase().contains("<ol") {
        return Ok(html.to_string());
    }

    // Parsed as body content so head-only elements stay where they are.
    let context = QualName::new(
        None,
        Namespace::from(HTML_NAMESPACE),
        LocalName::from("body"),
    );
    let document = kuchikiki::parse_fragment(context, Vec::new()).one(html.to_string());

    // Document order puts outer lists first; walking backwards splits nested
    // lists before the items that contain them are moved.
    let lists: Vec<NodeRef> = document
        .select("ol")
        .map_err(|_| CompileError::Selector("ol".to_string()))?
        .map(|list| list.as_node().clone())
        .collect();

    debug!(lists = lists.len(), "Renormalizing ordered lists");

    for list in lists.iter().rev() {
        split_list(list);
    }

    // Fragment parsing hangs every top-level node off a synthetic <html> root.
    let root = document
        .first_child()
        .ok_or_else(|| CompileError::Generic("fragment parse produced no root".to_string()))?;

    Ok(root.children().map(|child| child.to_string()).collect())
}

struct SharedAttributes {
    start: i64,
    id: Option<String>,
    class: Option<String>,
    style: Option<String>,
}

fn split_list(list: &NodeRef) {
    let Some(element) = list.as_element() else {
        return;
    };

    let shared = {
        let attributes = element.attributes.borrow();
        SharedAttributes {
            start: attributes
                .get("start")
                .and_then(|start| start.trim().parse().ok())
                .unwrap_or(1),
            id: attributes.get("id").map(str::to_string),
            class: attributes.get("class").map(str::to_string),
            style: attributes.get("style").map(str::to_string),
        }
    };

    let items: Vec<NodeRef> = list.children().filter(is_list_item).collect();
    if items.is_empty() {
        return;
    }

    for (index, item) in items.into_iter().enumerate() {
        let number = shared.start.saturating_add(index as i64);
        let container = NodeRef::new_element(element.name.clone(), None);

        if let Some(container_element) = container.as_element() {
            let mut attributes = container_element.attributes.borrow_mut();
            if let Some(id) = &shared.id {
                attributes.insert("id", format!("{}-{}", id, index));
            }
            if let Some(class) = &shared.class {
                attributes.insert("class", class.clone());
            }
            if let Some(style) = &shared.style {
                attributes.insert("style", style.clone());
            }
            attributes.insert("start", number.to_string());
        }

        if let Some(item_element) = item.as_element() {
            item_element
                .attributes
                .borrow_mut()
                .insert("value", number.to_string());
        }

        container.append(item);
        list.insert_before(container);
    }

    list.detach();
}

fn is_list_item(node: &NodeRef) -> bool {
    node.as_element()
        .map(|element| element.name.local.as_ref() == "li")
        .unwrap_or(false)
}
