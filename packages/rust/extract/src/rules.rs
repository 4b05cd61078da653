//! Declarative extraction rules for saved playlist pages.
//!
//! Each rule pairs an HTML tag with an attribute pattern and an extractor.
//! Rules are grouped by tag name; within a tag they keep declaration order,
//! which is also the order they fire in when one attribute matches several.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use playlistextractor_shared::{PlaylistExtractorError, Result};

use crate::dom::DomNode;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// What a matched node contributes to the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    Title,
    Author,
    Description,
    LastModified,
    ItemCount,
    ItemAuthor,
    ItemLink,
}

/// Pulls the raw text payload out of a matched node.
pub type Extractor = fn(&DomNode) -> Result<String>;

/// Pulls a sub-match out of the matched attribute value itself.
pub type IdExtractor = fn(&Regex, &str) -> Result<String>;

/// One (tag, attribute, pattern) → extractor rule.
pub struct ExtractionRule {
    pub label: Label,
    pub tag: &'static str,
    pub attribute: &'static str,
    pub pattern: Regex,
    pub extract: Extractor,
    pub extract_id: Option<IdExtractor>,
}

impl std::fmt::Debug for ExtractionRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractionRule")
            .field("label", &self.label)
            .field("tag", &self.tag)
            .field("attribute", &self.attribute)
            .field("pattern", &self.pattern.as_str())
            .field("has_id_extractor", &self.extract_id.is_some())
            .finish()
    }
}

impl ExtractionRule {
    fn new(
        label: Label,
        tag: &'static str,
        attribute: &'static str,
        pattern: &str,
        extract: Extractor,
    ) -> Self {
        Self {
            label,
            tag,
            attribute,
            pattern: Regex::new(pattern).expect("rule pattern"),
            extract,
            extract_id: None,
        }
    }

    fn with_id(mut self, extract_id: IdExtractor) -> Self {
        self.extract_id = Some(extract_id);
        self
    }

    /// Whether an attribute `(key, value)` on a node triggers this rule.
    pub fn matches(&self, key: &str, value: &str) -> bool {
        key == self.attribute && self.pattern.is_match(value)
    }

    /// Run the secondary extractor against the matched attribute value.
    pub fn extract_id(&self, value: &str) -> Result<String> {
        match self.extract_id {
            Some(f) => f(&self.pattern, value),
            None => Err(PlaylistExtractorError::structural(format!(
                "rule {:?} has no id extractor",
                self.label
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

/// Read-only mapping from tag name to the rules for that tag.
#[derive(Debug)]
pub struct RuleTable {
    by_tag: HashMap<&'static str, Vec<ExtractionRule>>,
}

static PLAYLIST_RULES: LazyLock<RuleTable> = LazyLock::new(RuleTable::build_playlist);

impl RuleTable {
    /// The shared rule table for playlist pages.
    pub fn playlist() -> &'static RuleTable {
        &PLAYLIST_RULES
    }

    /// Build a table from rules, preserving declaration order per tag.
    pub fn from_rules(rules: impl IntoIterator<Item = ExtractionRule>) -> Self {
        let mut by_tag: HashMap<&'static str, Vec<ExtractionRule>> = HashMap::new();
        for rule in rules {
            by_tag.entry(rule.tag).or_default().push(rule);
        }
        Self { by_tag }
    }

    fn build_playlist() -> Self {
        Self::from_rules([
            ExtractionRule::new(
                Label::Title,
                "h1",
                "class",
                r".*playlistTitle.*",
                first_child_data,
            ),
            ExtractionRule::new(
                Label::Author,
                "p",
                "class",
                r".*orm-ByLine-root byline-.*",
                sibling_text,
            ),
            ExtractionRule::new(
                Label::Description,
                "p",
                "class",
                r".*description-.*",
                first_child_data,
            ),
            ExtractionRule::new(
                Label::ItemAuthor,
                "p",
                "class",
                r".*orm-ByLine-root orm-Card-byline.*",
                sibling_text,
            ),
            ExtractionRule::new(
                Label::LastModified,
                "span",
                "class",
                r".*lastUpdatedDetails-.*",
                first_grandchild_data,
            ),
            ExtractionRule::new(
                Label::ItemCount,
                "div",
                "class",
                r".*itemCount-.*",
                first_child_data,
            ),
            ExtractionRule::new(
                Label::ItemLink,
                "a",
                "href",
                r".*/([0-9]+).*",
                first_child_data,
            )
            .with_id(capture_id),
        ])
    }

    /// Rules registered for `tag`, in declaration order.
    pub fn rules_for(&self, tag: &str) -> Option<&[ExtractionRule]> {
        self.by_tag.get(tag).map(Vec::as_slice)
    }

    /// Total number of rules.
    pub fn len(&self) -> usize {
        self.by_tag.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ---------------------------------------------------------------------------
// Extractors
// ---------------------------------------------------------------------------

/// Data of the node's first child.
pub fn first_child_data(node: &DomNode) -> Result<String> {
    Ok(node.first_child()?.data().to_string())
}

/// Data of the node's first child's first child.
pub fn first_grandchild_data(node: &DomNode) -> Result<String> {
    Ok(node.first_grandchild()?.data().to_string())
}

/// Reassemble byline text split across markup fragments.
///
/// Takes the first child's data, then the data of each following child's
/// first child (children without one are skipped), joined with spaces.
/// A node with a single child yields that child's data alone; a childless
/// node is a structural error.
pub fn sibling_text(node: &DomNode) -> Result<String> {
    let first = node.first_child()?;
    let mut parts = vec![first.data()];
    parts.extend(
        node.children()[1..]
            .iter()
            .filter_map(|sibling| sibling.children().first())
            .map(DomNode::data),
    );
    Ok(parts.join(" "))
}

/// First capture group of `pattern` in `value`.
pub fn capture_id(pattern: &Regex, value: &str) -> Result<String> {
    pattern
        .captures(value)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| {
            PlaylistExtractorError::structural(format!(
                "{value:?} has no id capture for {}",
                pattern.as_str()
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(tag: &str, label: Label) -> &'static ExtractionRule {
        RuleTable::playlist()
            .rules_for(tag)
            .and_then(|rules| rules.iter().find(|r| r.label == label))
            .expect("rule exists")
    }

    #[test]
    fn table_has_seven_rules() {
        let table = RuleTable::playlist();
        assert_eq!(table.len(), 7);
        assert_eq!(table.rules_for("p").map(<[_]>::len), Some(3));
        assert!(table.rules_for("li").is_none());
    }

    #[test]
    fn p_rules_keep_declaration_order() {
        let labels: Vec<Label> = RuleTable::playlist()
            .rules_for("p")
            .unwrap()
            .iter()
            .map(|r| r.label)
            .collect();
        assert_eq!(labels, vec![Label::Author, Label::Description, Label::ItemAuthor]);
    }

    #[test]
    fn byline_patterns_do_not_overlap() {
        let author = rule("p", Label::Author);
        let item_author = rule("p", Label::ItemAuthor);

        let playlist_class = "orm-ByLine-root byline-3xk2";
        let card_class = "orm-ByLine-root orm-Card-byline";

        assert!(author.matches("class", playlist_class));
        assert!(!author.matches("class", card_class));
        assert!(item_author.matches("class", card_class));
        assert!(!item_author.matches("class", playlist_class));
    }

    #[test]
    fn matches_requires_attribute_key() {
        let link = rule("a", Label::ItemLink);
        assert!(link.matches("href", "/videos/123-bar"));
        assert!(!link.matches("class", "/videos/123-bar"));
        assert!(!link.matches("href", "/videos/bar"));
    }

    #[test]
    fn item_id_is_ascii_digits_only() {
        let link = rule("a", Label::ItemLink);
        assert!(!link.matches("href", "/videos/\u{661}\u{662}\u{663}-x"));
        assert!(!link.matches("href", "/videos/\u{FF11}\u{FF12}-x"));
    }

    #[test]
    fn item_link_extracts_id() {
        let link = rule("a", Label::ItemLink);
        assert_eq!(link.extract_id("/videos/123-bar").unwrap(), "123");
        assert_eq!(
            link.extract_id("/library/view/some-title/9781492052586/").unwrap(),
            "9781492052586"
        );
    }

    #[test]
    fn rules_without_id_extractor_refuse() {
        assert!(rule("h1", Label::Title).extract_id("/videos/1").is_err());
    }

    #[test]
    fn sibling_text_joins_fragments() {
        let node = DomNode::element(
            "p",
            &[],
            vec![
                DomNode::text("By"),
                DomNode::element("a", &[], vec![DomNode::text("Jane Doe")]),
                DomNode::text(", "),
                DomNode::element("a", &[], vec![DomNode::text("John Roe")]),
            ],
        );
        assert_eq!(sibling_text(&node).unwrap(), "By Jane Doe John Roe");
    }

    #[test]
    fn sibling_text_single_child() {
        let node = DomNode::element("p", &[], vec![DomNode::text("By Jane")]);
        assert_eq!(sibling_text(&node).unwrap(), "By Jane");
    }

    #[test]
    fn sibling_text_on_childless_node_is_structural() {
        let node = DomNode::element("p", &[("class", "orm-ByLine-root byline-x")], Vec::new());
        assert!(matches!(
            sibling_text(&node),
            Err(PlaylistExtractorError::Structural { .. })
        ));
    }

    #[test]
    fn grandchild_extractor_reaches_two_levels() {
        let node = DomNode::element(
            "span",
            &[],
            vec![DomNode::element("span", &[], vec![DomNode::text("Last updated Jan 1")])],
        );
        assert_eq!(first_grandchild_data(&node).unwrap(), "Last updated Jan 1");
    }
}
