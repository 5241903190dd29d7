//! Document Loader: turn raw page bytes into searchable representations.
//!
//! A page may carry its leaderboard either in static markup or in an
//! embedded hydration blob (serialized JSON shipped in a script tag for
//! client-side state). The loader produces both views when available;
//! neither failing is fatal — the engine just falls through to whatever
//! representation did load.

use crate::config::STATE_BLOB_SELECTORS;
use scraper::{ElementRef, Html, Selector};
use serde_json::Value;
use tracing::debug;

/// A loaded page: optional parsed state blob plus the markup tree.
///
/// `Html::parse_document` is lenient — a garbage body yields a sparse
/// tree rather than an error, which is exactly the degradation the
/// engine wants. Read-only once built.
pub struct LoadedPage {
    /// Embedded hydration state, when a script blob parsed as JSON.
    pub state: Option<Value>,
    /// The markup tree.
    pub html: Html,
}

impl LoadedPage {
    pub fn parse(body: &str) -> Self {
        let html = Html::parse_document(body);
        let state = extract_state_blob(&html);
        Self { state, html }
    }
}

/// Probe known script selectors for a JSON state blob. The first block
/// that parses wins; malformed candidates are skipped with a log line,
/// never surfaced.
fn extract_state_blob(html: &Html) -> Option<Value> {
    for selector in STATE_BLOB_SELECTORS {
        let sel = Selector::parse(selector).unwrap();
        for element in html.select(&sel) {
            let text = element.inner_html();
            let text = text.trim();
            if text.is_empty() {
                continue;
            }
            match serde_json::from_str::<Value>(text) {
                Ok(value) => {
                    debug!(selector = %selector, "parsed embedded state blob");
                    return Some(value);
                }
                Err(e) => {
                    debug!(selector = %selector, "state blob candidate is not valid JSON: {e}");
                }
            }
        }
    }
    None
}

/// Full descendant text of an element, whitespace-collapsed.
pub fn full_text(element: &ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// The element's *own* text — direct text children only. Excluding
/// descendant text keeps wrapper containers from matching when only a
/// leaf inside them holds the handle.
pub fn own_text(element: &ElementRef<'_>) -> String {
    element
        .children()
        .filter_map(|node| node.value().as_text())
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_data_blob_detected() {
        let body = r#"
        <html><body>
        <script id="__NEXT_DATA__" type="application/json">
        {"props": {"leaderboard": [{"handle": "alice", "rank": 1}]}}
        </script>
        </body></html>
        "#;
        let page = LoadedPage::parse(body);
        let state = page.state.expect("blob should parse");
        assert!(state["props"]["leaderboard"].is_array());
    }

    #[test]
    fn test_malformed_blob_is_nonfatal() {
        let body = r#"
        <html><body>
        <script type="application/json">{not json}</script>
        <script type="application/json">{"ok": true}</script>
        <table><tr><td>alice</td></tr></table>
        </body></html>
        "#;
        let page = LoadedPage::parse(body);
        // First candidate is skipped, second parses.
        assert_eq!(page.state.unwrap()["ok"], true);
    }

    #[test]
    fn test_page_without_blob() {
        let page = LoadedPage::parse("<html><body><p>hi</p></body></html>");
        assert!(page.state.is_none());
    }

    #[test]
    fn test_garbage_body_still_loads() {
        let page = LoadedPage::parse("<<<<not really markup>>>>");
        assert!(page.state.is_none());
    }

    #[test]
    fn test_own_text_excludes_descendants() {
        let html = Html::parse_fragment("<div>outer <span>inner</span></div>");
        let sel = Selector::parse("div").unwrap();
        let div = html.select(&sel).next().unwrap();
        assert_eq!(own_text(&div), "outer");
        assert_eq!(full_text(&div), "outer inner");
    }
}
