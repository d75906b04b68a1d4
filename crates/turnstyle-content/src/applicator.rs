//! Style application: turning CSS text into live `<style>` nodes and back.
//!
//! [§ 4.2.1 The style element](https://html.spec.whatwg.org/multipage/semantics.html#the-style-element)
//!
//! Every node created here carries the marker class so that all of them can be
//! found and removed in bulk. A node may also carry an id (for targeted
//! removal) and one extra class (used for the preview style).
//!
//! The rules are inserted as text without any CSS validation; the page's own
//! error handling applies to whatever the user wrote.

use turnstyle_dom::{DomTree, NodeId};

/// The DOM id for the style called `name`: spaces become hyphens.
#[must_use]
pub fn style_id(name: &str) -> String {
    name.replace(' ', "-")
}

/// Inserts and removes turnStyle's `<style>` nodes.
#[derive(Debug, Clone)]
pub struct StyleApplicator {
    marker_class: String,
}

impl StyleApplicator {
    /// Create an applicator tagging nodes with `marker_class`.
    #[must_use]
    pub fn new(marker_class: &str) -> Self {
        Self {
            marker_class: marker_class.to_string(),
        }
    }

    /// The marker class carried by every inserted node.
    #[must_use]
    pub fn marker_class(&self) -> &str {
        &self.marker_class
    }

    /// Insert `rules` as a new `<style>` node.
    ///
    /// STEP 1: Empty rules insert nothing.
    /// STEP 2: Create the node with the marker class, `extra_class` and `id`.
    /// STEP 3: Append it to `<head>`, else the document element, else the
    ///         document itself.
    ///
    /// Returns the new node, or `None` when nothing was inserted.
    pub fn insert(
        &self,
        dom: &mut DomTree,
        rules: &str,
        id: Option<&str>,
        extra_class: Option<&str>,
    ) -> Option<NodeId> {
        // STEP 1
        if rules.is_empty() {
            return None;
        }

        // STEP 2
        let style = dom.create_element("style");
        if let Some(element) = dom.as_element_mut(style) {
            element.add_class(&self.marker_class);
            if let Some(class) = extra_class {
                element.add_class(class);
            }
        }
        if let Some(id) = id.filter(|id| !id.is_empty()) {
            dom.set_attribute(style, "id", id);
        }
        let text = dom.create_text(rules);
        dom.append_child(style, text);

        // STEP 3
        let parent = dom
            .head()
            .or_else(|| dom.document_element())
            .unwrap_or_else(|| dom.root());
        dom.append_child(parent, style);

        log::debug!("inserted style node {id:?} under {parent:?}");
        Some(style)
    }

    /// Remove style nodes.
    ///
    /// With `id`, removes the single element with that id if there is one.
    /// Otherwise removes every element carrying `class_name`, or the marker
    /// class when none is given. Returns how many nodes were removed.
    pub fn remove(&self, dom: &mut DomTree, id: Option<&str>, class_name: Option<&str>) -> usize {
        if let Some(id) = id {
            return dom.get_element_by_id(id).map_or(0, |node| {
                dom.detach(node);
                1
            });
        }

        let class_name = class_name.unwrap_or(&self.marker_class);
        let mut removed = 0;
        loop {
            let nodes = dom.get_elements_by_class_name(class_name);
            if nodes.is_empty() {
                break;
            }
            for node in nodes {
                dom.detach(node);
                removed += 1;
            }
        }
        removed
    }

    /// Every connected node this applicator owns, in document order.
    #[must_use]
    pub fn applied_nodes(&self, dom: &DomTree) -> Vec<NodeId> {
        dom.get_elements_by_class_name(&self.marker_class)
    }
}
