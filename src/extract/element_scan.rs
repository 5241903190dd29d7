//! Strategy B: generic element scan. Markup fallback for leaderboards
//! rendered outside `<table>` markup.
//!
//! Matches on an element's *own* text so wrapper containers (whose
//! descendant text also contains the handle) don't shadow the leaf
//! that actually holds it. The companion numbers are usually siblings
//! of the handle element, so the candidate scope is the matched
//! element's parent, not the element itself.

use crate::page::{full_text, own_text, LoadedPage};
use crate::report::{CandidateRecord, Identifier};
use scraper::{ElementRef, Selector};

pub fn find(page: &LoadedPage, id: &Identifier) -> Option<CandidateRecord> {
    let any_sel = Selector::parse("*").unwrap();

    for element in page.html.select(&any_sel) {
        let text = own_text(&element);
        if text.is_empty() || !id.matches(&text) {
            continue;
        }

        let texts = match element.parent().and_then(ElementRef::wrap) {
            Some(parent) => scope_texts(&parent),
            None => vec![text],
        };
        return Some(CandidateRecord::LooseText(texts));
    }
    None
}

/// Descendant element texts of the parent scope, in document order.
fn scope_texts(parent: &ElementRef<'_>) -> Vec<String> {
    let any_sel = Selector::parse("*").unwrap();
    parent
        .select(&any_sel)
        .map(|el| full_text(&el))
        .filter(|t| !t.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(body: &str, handle: &str) -> Option<CandidateRecord> {
        find(&LoadedPage::parse(body), &Identifier::new(handle))
    }

    #[test]
    fn test_div_leaderboard_matches() {
        let body = r#"
        <div class="board">
          <div class="entry">
            <span>#12</span><span>@carol</span><span>456.75</span>
          </div>
        </div>
        "#;
        match scan(body, "carol") {
            Some(CandidateRecord::LooseText(texts)) => {
                assert!(texts.contains(&"#12".to_string()));
                assert!(texts.contains(&"456.75".to_string()));
            }
            other => panic!("expected loose text, got {other:?}"),
        }
    }

    #[test]
    fn test_wrapper_containers_do_not_match() {
        // The outer div's descendant text contains the handle, but its
        // own text is empty — only the span should match, scoping the
        // candidate to the entry, not the whole board.
        let body = r#"
        <div class="board">
          <div class="entry"><span>@dave</span><span>3.50</span></div>
          <div class="entry"><span>@erin</span><span>9.75</span></div>
        </div>
        "#;
        match scan(body, "erin") {
            Some(CandidateRecord::LooseText(texts)) => {
                assert!(texts.contains(&"9.75".to_string()));
                assert!(!texts.contains(&"3.50".to_string()));
            }
            other => panic!("expected loose text, got {other:?}"),
        }
    }

    #[test]
    fn test_absent_handle_no_match() {
        assert!(scan("<div><span>@frank</span></div>", "grace").is_none());
    }
}
