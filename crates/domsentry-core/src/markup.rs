//! Script extraction from HTML documents.

use std::sync::LazyLock;

use regex::Regex;

const MARKUP_MARKER: &str = "<script";

// Comments are matched only so that scripts inside them are skipped; script
// bodies are raw text and keep any `<!--` they contain. An unterminated
// trailing script runs to the end of the document.
static COMMENT_OR_SCRIPT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<!--.*?-->|<script\b[^>]*>(.*?)(?:</script\s*>|\z)")
        .expect("Invalid regex pattern")
});

/// Whether fetched or read content should be treated as an HTML document.
pub fn looks_like_markup(content: &str) -> bool {
    content.contains(MARKUP_MARKER)
}

/// Returns the body of every `<script>` element in document order. Empty
/// bodies (external scripts) are kept so numbering follows the document.
pub fn extract_scripts(html: &str) -> Vec<String> {
    COMMENT_OR_SCRIPT
        .captures_iter(html)
        .filter_map(|caps| caps.get(1).map(|body| body.as_str().to_string()))
        .collect()
}
