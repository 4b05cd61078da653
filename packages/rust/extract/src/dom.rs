//! Owned, immutable node tree built from a parsed HTML document.
//!
//! `scraper` does the HTML5 parsing; the result is copied into [`DomNode`]
//! so the rest of the crate works with explicit node kinds and named
//! navigation helpers instead of raw child/sibling pointers.

use scraper::{ElementRef, Html, Node};
use tracing::debug;

use playlistextractor_shared::{PlaylistExtractorError, Result};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// What a node is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// The document root.
    Document,
    /// An element with its tag name and attributes in source order.
    Element {
        name: String,
        attrs: Vec<(String, String)>,
    },
    /// A text node.
    Text(String),
    /// A comment node.
    Comment(String),
}

/// One node of the tree, owning its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomNode {
    kind: NodeKind,
    children: Vec<DomNode>,
}

impl DomNode {
    /// Build an element node.
    pub fn element(name: &str, attrs: &[(&str, &str)], children: Vec<DomNode>) -> Self {
        Self {
            kind: NodeKind::Element {
                name: name.to_string(),
                attrs: attrs
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            },
            children,
        }
    }

    /// Build a text node.
    pub fn text(text: &str) -> Self {
        Self {
            kind: NodeKind::Text(text.to_string()),
            children: Vec::new(),
        }
    }

    /// Build a comment node.
    pub fn comment(text: &str) -> Self {
        Self {
            kind: NodeKind::Comment(text.to_string()),
            children: Vec::new(),
        }
    }

    /// Build a document root.
    pub fn document(children: Vec<DomNode>) -> Self {
        Self {
            kind: NodeKind::Document,
            children,
        }
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Children in document order.
    pub fn children(&self) -> &[DomNode] {
        &self.children
    }

    /// Tag name if this is an element.
    pub fn tag_name(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Element { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Attributes if this is an element, otherwise empty.
    pub fn attrs(&self) -> &[(String, String)] {
        match &self.kind {
            NodeKind::Element { attrs, .. } => attrs,
            _ => &[],
        }
    }

    /// The node's data: tag name for elements, content for text and
    /// comments, empty for the document root.
    pub fn data(&self) -> &str {
        match &self.kind {
            NodeKind::Document => "",
            NodeKind::Element { name, .. } => name,
            NodeKind::Text(text) | NodeKind::Comment(text) => text,
        }
    }

    /// First child, or a structural error if the node has none.
    pub fn first_child(&self) -> Result<&DomNode> {
        self.children.first().ok_or_else(|| {
            PlaylistExtractorError::structural(format!("{} has no children", self.describe()))
        })
    }

    /// First child of the first child.
    pub fn first_grandchild(&self) -> Result<&DomNode> {
        self.first_child()?.first_child()
    }

    /// Short human-readable description for error messages.
    pub fn describe(&self) -> String {
        match &self.kind {
            NodeKind::Document => "document".to_string(),
            NodeKind::Element { name, attrs } => {
                let attrs: String = attrs
                    .iter()
                    .map(|(k, v)| format!(" {k}={v:?}"))
                    .collect();
                format!("<{name}{attrs}>")
            }
            NodeKind::Text(text) => format!("text {text:?}"),
            NodeKind::Comment(_) => "comment".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse an HTML document into a [`DomNode`] tree rooted at a `Document` node.
///
/// HTML5 parsing never rejects input; recoverable errors are logged.
pub fn parse_document(html: &str) -> DomNode {
    let doc = Html::parse_document(html);
    for err in &doc.errors {
        debug!(%err, "recovered html parse error");
    }

    DomNode::document(vec![convert_element(doc.root_element())])
}

fn convert_element(el: ElementRef<'_>) -> DomNode {
    let value = el.value();
    let attrs = value
        .attrs()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    let mut children = Vec::new();
    for child in el.children() {
        match child.value() {
            Node::Text(text) => children.push(DomNode::text(text)),
            Node::Comment(comment) => children.push(DomNode::comment(comment)),
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    children.push(convert_element(child_el));
                }
            }
            _ => {}
        }
    }

    DomNode {
        kind: NodeKind::Element {
            name: value.name().to_string(),
            attrs,
        },
        children,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find<'a>(node: &'a DomNode, tag: &str) -> Option<&'a DomNode> {
        if node.tag_name() == Some(tag) {
            return Some(node);
        }
        node.children().iter().find_map(|c| find(c, tag))
    }

    #[test]
    fn parse_builds_document_root() {
        let root = parse_document("<html><body><p>Hi</p></body></html>");
        assert_eq!(root.kind(), &NodeKind::Document);
        assert_eq!(root.first_child().unwrap().tag_name(), Some("html"));
    }

    #[test]
    fn parse_keeps_attributes_and_text() {
        let root = parse_document(r#"<body><a href="/videos/1-x" class="c">Link</a></body>"#);
        let a = find(&root, "a").expect("anchor");
        assert!(a.attrs().iter().any(|(k, v)| k == "href" && v == "/videos/1-x"));
        assert_eq!(a.first_child().unwrap().data(), "Link");
    }

    #[test]
    fn data_of_element_is_tag_name() {
        let root = parse_document("<body><h1><span>Title</span></h1></body>");
        let h1 = find(&root, "h1").expect("h1");
        assert_eq!(h1.first_child().unwrap().data(), "span");
        assert_eq!(h1.first_grandchild().unwrap().data(), "Title");
    }

    #[test]
    fn first_child_of_leaf_is_structural_error() {
        let node = DomNode::element("p", &[("class", "x")], Vec::new());
        let err = node.first_child().unwrap_err();
        assert!(matches!(err, PlaylistExtractorError::Structural { .. }));
        assert!(err.to_string().contains("<p class=\"x\">"));
    }

    #[test]
    fn first_grandchild_requires_two_levels() {
        let node = DomNode::element("span", &[], vec![DomNode::text("only")]);
        assert!(node.first_grandchild().is_err());
    }

    #[test]
    fn comments_are_kept() {
        let root = parse_document("<body><div><!-- note -->text</div></body>");
        let div = find(&root, "div").expect("div");
        assert!(matches!(div.first_child().unwrap().kind(), NodeKind::Comment(_)));
        assert_eq!(div.children()[1].data(), "text");
    }
}
