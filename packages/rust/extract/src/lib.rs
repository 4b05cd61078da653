//! Rule-driven extraction of playlist records from saved HTML pages.
//!
//! This crate provides:
//! - [`dom`]: owned node tree built from `scraper`'s parse output
//! - [`normalize`]: whitespace and marker cleanup for extracted text
//! - [`classify`]: content-type classification of item links
//! - [`rules`]: the tag → attribute pattern → extractor table
//! - [`walker`]: depth-first record builder

pub mod classify;
pub mod dom;
pub mod normalize;
pub mod rules;
pub mod walker;

use tracing::instrument;

use playlistextractor_shared::{PlaylistRecord, Result};

pub use classify::classify;
pub use dom::{DomNode, NodeKind, parse_document};
pub use normalize::normalize;
pub use rules::{ExtractionRule, Label, RuleTable};
pub use walker::{WalkContext, Walker};

/// Parse `html` and build its playlist record with the standard rule table.
///
/// `origin` is prefixed to every item link path.
#[instrument(skip(html), fields(len = html.len()))]
pub fn extract_document(html: &str, origin: &str) -> Result<PlaylistRecord> {
    let root = parse_document(html);
    let mut record = PlaylistRecord::default();
    Walker::new(RuleTable::playlist(), origin).walk(&root, &mut record)?;
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use playlistextractor_shared::{ItemRecord, ItemType, PlaylistExtractorError};
    use pretty_assertions::assert_eq;

    const ORIGIN: &str = "https://learning.oreilly.com";

    fn load_fixture(name: &str) -> String {
        let path = format!("../../../fixtures/html/{name}");
        std::fs::read_to_string(&path).unwrap_or_else(|_| panic!("missing fixture: {path}"))
    }

    // -----------------------------------------------------------------------
    // Fixture-based tests
    // -----------------------------------------------------------------------

    #[test]
    fn extracts_full_playlist_page() {
        let record = extract_document(&load_fixture("playlist.html"), ORIGIN).unwrap();

        assert_eq!(record.name, "Rust Essentials");
        assert_eq!(record.author, "By Jane Doe");
        assert_eq!(record.description, "Everything you need to get started with Rust.");
        assert_eq!(record.last_modified, "Last updated Mar 3, 2021");
        assert_eq!(record.item_count, "3 items");

        assert_eq!(
            record.items,
            vec![
                ItemRecord {
                    name: "Rust Fundamentals".into(),
                    author: "By Ferris Crab".into(),
                    id: "9780135793787".into(),
                    item_type: ItemType::Video,
                    href: "https://learning.oreilly.com/videos/rust-fundamentals/9780135793787/"
                        .into(),
                },
                ItemRecord {
                    name: "Programming Rust, 2nd Edition".into(),
                    author: "By Jim Blandy".into(),
                    id: "9781492052586".into(),
                    item_type: ItemType::Book,
                    href: "https://learning.oreilly.com/library/view/programming-rust-2nd/9781492052586/"
                        .into(),
                },
                ItemRecord {
                    name: "Learning Path: Rust".into(),
                    author: String::new(),
                    id: "9781098104153".into(),
                    item_type: ItemType::LearningPath,
                    href: "https://learning.oreilly.com/learning-paths/learning-path-rust/9781098104153/"
                        .into(),
                },
            ]
        );
    }

    #[test]
    fn unknown_section_fixture_aborts() {
        let err = extract_document(&load_fixture("unknown_section.html"), ORIGIN).unwrap_err();
        assert!(err.to_string().contains("/unknown-section/123-x"));
    }

    // -----------------------------------------------------------------------
    // Inline documents
    // -----------------------------------------------------------------------

    #[test]
    fn single_item_without_author() {
        let html = r#"<html><body>
            <h1 class="playlistTitle">Foo</h1>
            <a href="/videos/123-bar">Bar</a>
        </body></html>"#;
        let record = extract_document(html, ORIGIN).unwrap();

        assert_eq!(record.name, "Foo");
        assert_eq!(
            record.items,
            vec![ItemRecord {
                name: "Bar".into(),
                author: String::new(),
                id: "123".into(),
                item_type: ItemType::Video,
                href: "https://learning.oreilly.com/videos/123-bar".into(),
            }]
        );

        let json = serde_json::to_value(&record.items[0]).unwrap();
        assert_eq!(json["itemAuthor"], "");
        assert_eq!(json["itemHref"], "https://learning.oreilly.com/videos/123-bar");
    }

    #[test]
    fn empty_document_yields_empty_record() {
        let record = extract_document("<html><body></body></html>", ORIGIN).unwrap();
        assert_eq!(record, PlaylistRecord::default());
    }

    #[test]
    fn card_byline_before_items_fails() {
        let html = r#"<body>
            <p class="orm-ByLine-root orm-Card-byline">By <span>Nobody</span></p>
            <a href="/videos/1-a">A</a>
        </body>"#;
        let err = extract_document(html, ORIGIN).unwrap_err();
        assert!(matches!(err, PlaylistExtractorError::Structural { .. }));
    }

    #[test]
    fn empty_byline_paragraph_fails() {
        let html = r#"<body><p class="orm-ByLine-root byline-x"></p></body>"#;
        let err = extract_document(html, ORIGIN).unwrap_err();
        assert!(matches!(err, PlaylistExtractorError::Structural { .. }));
    }

    #[test]
    fn item_id_is_last_numeric_segment() {
        let html = r#"<body><a href="/library/view/title-2/12/345-x">T</a></body>"#;
        let record = extract_document(html, ORIGIN).unwrap();
        assert_eq!(record.items[0].id, "345");
    }

    #[test]
    fn custom_origin_is_prefixed() {
        let html = r#"<body><a href="/videos/7-x">X</a></body>"#;
        let record = extract_document(html, "http://localhost:8080").unwrap();
        assert_eq!(record.items[0].href, "http://localhost:8080/videos/7-x");
    }
}
