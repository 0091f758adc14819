//! Heuristic syllabus text extraction.
//!
//! Best-effort plain-text rendering of an uploaded file before the
//! remote AI-parsing call. PDFs are handled without a PDF library: the
//! content between `stream`/`endstream` delimiters frequently carries
//! the text layer in a recoverable form, and regions that clean up to a
//! useful length are kept. Image-scanned PDFs have no text layer; they
//! clean up to nothing and the caller must direct the user to manual
//! entry rather than retry.

use once_cell::sync::Lazy;
use regex::Regex;

use forward_core::defaults::{
    FALLBACK_TEXT_LIMIT_CHARS, PARSE_TEXT_LIMIT_CHARS, STREAM_REGION_MIN_CHARS,
};

/// PDF file-signature marker.
const PDF_MARKER: &str = "%PDF";

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("static regex"));

/// Keep only printable ASCII (space through tilde).
fn strip_non_printable(text: &str) -> String {
    text.chars().filter(|c| (' '..='~').contains(c)).collect()
}

/// Extract a best-effort plain-text rendering from an uploaded file.
///
/// Non-PDF input is returned unmodified. For binary PDF content, every
/// `stream`…`endstream` region is cleaned to printable ASCII and kept
/// when longer than [`STREAM_REGION_MIN_CHARS`]; kept regions are joined
/// with blank lines. When no region qualifies, the whole document is
/// cleaned, whitespace runs collapsed, and the result truncated to
/// [`FALLBACK_TEXT_LIMIT_CHARS`].
pub fn extract_syllabus_text(data: &[u8]) -> String {
    let text = String::from_utf8_lossy(data);

    if !text.contains(PDF_MARKER) {
        return text.into_owned();
    }

    let mut regions = Vec::new();
    let mut rest: &str = &text;
    while let Some(start) = rest.find("stream") {
        let after = &rest[start + "stream".len()..];
        let Some(end) = after.find("endstream") else {
            break;
        };
        let cleaned = strip_non_printable(&after[..end]);
        if cleaned.len() > STREAM_REGION_MIN_CHARS {
            regions.push(cleaned);
        }
        rest = &after[end + "endstream".len()..];
    }

    if !regions.is_empty() {
        return regions.join("\n\n");
    }

    tracing::warn!(
        payload_len = data.len(),
        "no qualifying stream regions, falling back to whole-document cleanup"
    );
    let cleaned = strip_non_printable(&text);
    let collapsed = WHITESPACE_RUN.replace_all(&cleaned, " ");
    collapsed.trim().chars().take(FALLBACK_TEXT_LIMIT_CHARS).collect()
}

/// Clip extracted text to the budget the remote parse function accepts.
pub fn clip_for_parse(text: &str) -> &str {
    match text.char_indices().nth(PARSE_TEXT_LIMIT_CHARS) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_pdf_text_unmodified() {
        let input = "Course: PHYS 211\nInstructor: Dr. Vance\n";
        assert_eq!(extract_syllabus_text(input.as_bytes()), input);
    }

    #[test]
    fn test_single_stream_region_extracted() {
        let inner: String = std::iter::repeat('a').take(60).collect();
        let data = format!("%PDF-1.4 junk stream\n{}\nendstream trailer", inner);
        assert_eq!(extract_syllabus_text(data.as_bytes()), inner);
    }

    #[test]
    fn test_multiple_regions_joined_with_blank_lines() {
        let first: String = std::iter::repeat('x').take(55).collect();
        let second: String = std::iter::repeat('y').take(70).collect();
        let data = format!(
            "%PDF-1.4 stream {first} endstream stream {second} endstream"
        );
        let out = extract_syllabus_text(data.as_bytes());
        let parts: Vec<&str> = out.split("\n\n").collect();
        assert_eq!(parts.len(), 2);
        assert!(parts[0].contains(&first));
        assert!(parts[1].contains(&second));
    }

    #[test]
    fn test_short_regions_discarded() {
        // Region cleans to well under the 50-char floor
        let data = b"%PDF-1.4 stream short endstream rest of document";
        let out = extract_syllabus_text(data);
        // Falls back to whole-document cleanup
        assert!(out.contains("%PDF-1.4"));
        assert!(out.contains("rest of document"));
    }

    #[test]
    fn test_region_cleaning_strips_control_bytes() {
        let printable: String = std::iter::repeat('z').take(60).collect();
        let mut data = Vec::new();
        data.extend_from_slice(b"%PDF-1.4 stream");
        data.extend_from_slice(&[0x00, 0x01, 0x02]);
        data.extend_from_slice(printable.as_bytes());
        data.extend_from_slice(&[0x03, 0x7f]);
        data.extend_from_slice(b"endstream");
        assert_eq!(extract_syllabus_text(&data), printable);
    }

    #[test]
    fn test_fallback_truncates_to_limit() {
        let mut data = b"%PDF-1.4 ".to_vec();
        data.extend(std::iter::repeat(b'q').take(100_000));
        let out = extract_syllabus_text(&data);
        assert!(out.len() <= FALLBACK_TEXT_LIMIT_CHARS);
        assert!(out.len() > STREAM_REGION_MIN_CHARS);
    }

    #[test]
    fn test_fallback_collapses_whitespace_runs() {
        let data = b"%PDF-1.4   a    b\t\tc   d";
        let out = extract_syllabus_text(data);
        assert!(!out.contains("  "));
        assert!(out.contains("a b"));
    }

    #[test]
    fn test_unterminated_stream_falls_back() {
        let data = b"%PDF-1.4 stream never terminated content here";
        let out = extract_syllabus_text(data);
        assert!(out.contains("never terminated"));
    }

    #[test]
    fn test_clip_for_parse_short_text_untouched() {
        let text = "short syllabus";
        assert_eq!(clip_for_parse(text), text);
    }

    #[test]
    fn test_clip_for_parse_limits_chars() {
        let text: String = std::iter::repeat('s').take(40_000).collect();
        assert_eq!(clip_for_parse(&text).chars().count(), 30_000);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(extract_syllabus_text(b""), "");
    }
}
