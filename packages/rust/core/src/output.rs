//! JSON rendering and writing of the playlist collection.

use std::path::Path;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use tracing::info;

use playlistextractor_shared::{PlaylistExtractorError, Result};

/// Render `value` as JSON with `indent` spaces per level (`0` = compact).
pub fn render_json<T>(value: &T, indent: usize) -> serde_json::Result<String>
where
    T: Serialize + ?Sized,
{
    if indent == 0 {
        return serde_json::to_string(value);
    }

    let indent = " ".repeat(indent);
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut ser = Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;

    // serde_json only emits valid UTF-8.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Serialize `value` and write it to `path`, replacing any existing file.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T, indent: usize) -> Result<()> {
    let json = render_json(value, indent)
        .map_err(|e| PlaylistExtractorError::output(path, format!("serialization failed: {e}")))?;

    std::fs::write(path, json).map_err(|e| PlaylistExtractorError::output(path, e.to_string()))?;
    info!(path = %path.display(), "output written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use playlistextractor_shared::{ItemRecord, ItemType, PlaylistRecord};
    use pretty_assertions::assert_eq;

    fn sample() -> Vec<PlaylistRecord> {
        vec![
            PlaylistRecord {
                name: "One".into(),
                author: "By A".into(),
                description: "d".into(),
                last_modified: "Last updated today".into(),
                item_count: "1 item".into(),
                items: vec![ItemRecord {
                    name: "Bar".into(),
                    author: "By B".into(),
                    id: "123".into(),
                    item_type: ItemType::Video,
                    href: "https://learning.oreilly.com/videos/123-bar".into(),
                }],
            },
            PlaylistRecord {
                name: "Two".into(),
                ..PlaylistRecord::default()
            },
        ]
    }

    #[test]
    fn empty_collection_renders_as_empty_array() {
        let empty: Vec<PlaylistRecord> = Vec::new();
        assert_eq!(render_json(&empty, 1).unwrap(), "[]");
        assert_eq!(render_json(&empty, 0).unwrap(), "[]");
    }

    #[test]
    fn single_space_indent() {
        let json = render_json(&sample()[1..], 1).unwrap();
        assert!(json.starts_with("[\n {\n  \"name\": \"Two\","), "got {json}");
        assert!(json.contains("\"items\": []"));
    }

    #[test]
    fn compact_output_has_no_newlines() {
        let json = render_json(&sample(), 0).unwrap();
        assert!(!json.contains('\n'));
    }

    #[test]
    fn json_round_trips() {
        let playlists = sample();
        let json = render_json(&playlists, 2).unwrap();
        let parsed: Vec<PlaylistRecord> = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, playlists);
        assert_eq!(parsed[0].items.len(), 1);
        assert_eq!(parsed[1].items.len(), 0);
    }

    #[test]
    fn write_to_missing_directory_is_output_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.json");

        let err = write_json(&path, &sample(), 1).unwrap_err();
        assert!(matches!(err, PlaylistExtractorError::Output { .. }));
        assert_eq!(err.exit_code(), 2);
    }
}
