//! Flattens the text of one container element out of a results page.
//!
//! The registry renders each search hit inside a `<ul class="actions">` list
//! with no labelled fields, so everything downstream works on the raw text of
//! that list.

use scraper::{node::Element, ElementRef, Html, Node};

/// Identifies the container element whose text gets collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerTarget {
    pub tag: &'static str,
    pub attr_key: &'static str,
    pub attr_value: &'static str,
}

/// The results list on the DCA search page.
pub const ACTIONS_LIST: ContainerTarget = ContainerTarget {
    tag: "ul",
    attr_key: "class",
    attr_value: "actions",
};

impl ContainerTarget {
    /// Attribute values are compared whole, so `class="actions wide"` does not match.
    fn matches(&self, element: &Element) -> bool {
        element.name() == self.tag
            && element
                .attrs()
                .any(|(key, value)| key == self.attr_key && value == self.attr_value)
    }
}

/// Parses a response body into a document tree.
///
/// html5ever recovers from every syntax error, so parsing never fails; the
/// recovered errors are only logged.
pub fn parse_page(body: &str) -> Html {
    let document = Html::parse_document(body);
    if !document.errors.is_empty() {
        tracing::debug!(
            "HTML parser recovered from {} error(s), first: {}",
            document.errors.len(),
            document.errors[0]
        );
    }
    document
}

/// Collects the text of the element matching `target`.
///
/// Every node is visited in pre-order, so when several elements match the
/// last one wins. Text nodes inside the match are concatenated verbatim with
/// no separators.
///
/// Returns `None` when no element matches and `Some("")` when the matching
/// element holds no text.
pub fn collect_container_text(document: &Html, target: &ContainerTarget) -> Option<String> {
    let mut collected = None;
    for node in document.tree.root().descendants() {
        if let Node::Element(element) = node.value() {
            if target.matches(element) {
                collected = ElementRef::wrap(node).map(|el| el.text().collect::<String>());
            }
        }
    }
    collected
}
