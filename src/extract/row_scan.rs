//! Strategy A: table row scan. Primary markup strategy.
//!
//! Every `<tr>` is checked by its full descendant text; the first row
//! containing the handle yields its ordered cells. No attempt is made
//! to disambiguate when several rows match.

use crate::page::{full_text, LoadedPage};
use crate::report::{CandidateRecord, Identifier};
use scraper::Selector;

pub fn find(page: &LoadedPage, id: &Identifier) -> Option<CandidateRecord> {
    let row_sel = Selector::parse("tr").unwrap();
    let cell_sel = Selector::parse("td, th").unwrap();

    for row in page.html.select(&row_sel) {
        let row_text = full_text(&row);
        if !id.matches(&row_text) {
            continue;
        }
        let cells: Vec<String> = row.select(&cell_sel).map(|cell| full_text(&cell)).collect();
        return Some(CandidateRecord::TableCells(cells));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(body: &str, handle: &str) -> Option<CandidateRecord> {
        find(&LoadedPage::parse(body), &Identifier::new(handle))
    }

    #[test]
    fn test_matching_row_yields_cells() {
        let body = r#"
        <table>
          <tr><th>Rank</th><th>Creator</th><th>Score</th></tr>
          <tr><td>#4</td><td>@bob</td><td>900.10</td></tr>
          <tr><td>#5</td><td>@Alice</td><td>1,234.50</td></tr>
        </table>
        "#;
        match scan(body, "@alice") {
            Some(CandidateRecord::TableCells(cells)) => {
                assert_eq!(cells, vec!["#5", "@Alice", "1,234.50"]);
            }
            other => panic!("expected table cells, got {other:?}"),
        }
    }

    #[test]
    fn test_first_matching_row_wins() {
        let body = r#"
        <table>
          <tr><td>#1</td><td>@ann2</td><td>10.00</td></tr>
          <tr><td>#2</td><td>@ann</td><td>20.00</td></tr>
        </table>
        "#;
        // Substring matching: "ann" hits the earlier "ann2" row first.
        match scan(body, "ann") {
            Some(CandidateRecord::TableCells(cells)) => assert_eq!(cells[0], "#1"),
            other => panic!("expected table cells, got {other:?}"),
        }
    }

    #[test]
    fn test_no_tables_no_match() {
        assert!(scan("<div>@alice 1.00</div>", "alice").is_none());
    }
}
