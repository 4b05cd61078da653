//! Whitespace and marker cleanup for extracted text.

/// Literal span markers that leak into byline text on saved pages.
const MARKERS: [&str; 2] = ["<span>", "</span>"];

/// Remove span markers, trim, and collapse whitespace runs to one space.
///
/// Markers are removed until none remain, so the result never contains one
/// and `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(raw: &str) -> String {
    let mut text = raw.trim().to_string();
    while MARKERS.iter().any(|m| text.contains(m)) {
        for marker in MARKERS {
            text = text.replace(marker, "");
        }
    }

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
