//! Depth-first record builder.
//!
//! Visits every node in document order, matches elements against the
//! [`RuleTable`], and applies each match to the in-progress
//! [`PlaylistRecord`]. Item bylines attach to the most recently appended
//! item, so document order is what pairs an author with its item.

use tracing::{debug, trace};

use playlistextractor_shared::{ItemRecord, PlaylistExtractorError, PlaylistRecord, Result};

use crate::classify::classify;
use crate::dom::DomNode;
use crate::normalize::normalize;
use crate::rules::{ExtractionRule, Label, RuleTable};

// ---------------------------------------------------------------------------
// Walk context
// ---------------------------------------------------------------------------

/// Mutable state threaded through one document's traversal.
///
/// `last_item` indexes the item that the next byline belongs to. It is set
/// every time an item is appended and never cleared.
#[derive(Debug)]
pub struct WalkContext<'r> {
    record: &'r mut PlaylistRecord,
    last_item: Option<usize>,
}

impl<'r> WalkContext<'r> {
    pub fn new(record: &'r mut PlaylistRecord) -> Self {
        Self {
            record,
            last_item: None,
        }
    }

    /// Index of the most recently appended item, if any.
    pub fn last_item(&self) -> Option<usize> {
        self.last_item
    }

    pub fn record(&self) -> &PlaylistRecord {
        &*self.record
    }

    /// Append an item and make it the target for the next byline.
    pub fn push_item(&mut self, item: ItemRecord) {
        self.record.items.push(item);
        self.last_item = Some(self.record.items.len() - 1);
    }

    /// Set the author of the most recently appended item.
    ///
    /// A byline before any item means the page is not shaped as expected.
    pub fn annotate_last_item(&mut self, author: String) -> Result<()> {
        let item = self
            .last_item
            .and_then(|idx| self.record.items.get_mut(idx))
            .ok_or_else(|| {
                PlaylistExtractorError::structural(format!(
                    "item byline {author:?} appears before any item"
                ))
            })?;
        item.author = author;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Walker
// ---------------------------------------------------------------------------

/// Applies a [`RuleTable`] to a node tree.
#[derive(Debug, Clone, Copy)]
pub struct Walker<'a> {
    rules: &'a RuleTable,
    origin: &'a str,
}

impl<'a> Walker<'a> {
    /// `origin` is prefixed to item link paths to build absolute hrefs.
    pub fn new(rules: &'a RuleTable, origin: &'a str) -> Self {
        Self { rules, origin }
    }

    /// Walk `root` and fill `record`. Any error aborts the walk.
    pub fn walk(&self, root: &DomNode, record: &mut PlaylistRecord) -> Result<()> {
        let mut ctx = WalkContext::new(record);
        self.visit(root, &mut ctx)
    }

    fn visit(&self, node: &DomNode, ctx: &mut WalkContext<'_>) -> Result<()> {
        if let Some(rules) = node.tag_name().and_then(|tag| self.rules.rules_for(tag)) {
            for (key, value) in node.attrs() {
                for rule in rules {
                    if rule.matches(key, value) {
                        self.apply(rule, node, value, ctx)?;
                    }
                }
            }
        }

        for child in node.children() {
            self.visit(child, ctx)?;
        }
        Ok(())
    }

    fn apply(
        &self,
        rule: &ExtractionRule,
        node: &DomNode,
        attr_value: &str,
        ctx: &mut WalkContext<'_>,
    ) -> Result<()> {
        let value = (rule.extract)(node)?;
        trace!(label = ?rule.label, node = %node.describe(), %value, "rule matched");

        match rule.label {
            Label::Title => ctx.record.name = value,
            Label::Author => ctx.record.author = normalize(&value),
            Label::Description => ctx.record.description = value,
            Label::LastModified => ctx.record.last_modified = value,
            Label::ItemCount => ctx.record.item_count = value,
            Label::ItemAuthor => ctx.annotate_last_item(normalize(&value))?,
            Label::ItemLink => {
                let id = rule.extract_id(attr_value)?;
                let item = ItemRecord {
                    name: normalize(&value),
                    author: String::new(),
                    id,
                    item_type: classify(attr_value)?,
                    href: format!("{}{attr_value}", self.origin),
                };
                debug!(id = %item.id, item_type = %item.item_type, "item found");
                ctx.push_item(item);
            }
        }
        Ok(())
    }
}
