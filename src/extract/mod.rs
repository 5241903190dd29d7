//! Extraction Engine: locate the record for a handle inside a loaded page.
//!
//! An ordered list of pure strategy functions, folded first-match-wins.
//! The state-blob strategy runs first whenever a hydration blob parsed —
//! structured state is immune to markup-rendering heuristics. Among the
//! markup strategies the table row scan is primary and the generic
//! element scan is the fallback. First match wins everywhere: no
//! best-match scoring, no disambiguation between multiple matching rows.

mod element_scan;
mod row_scan;
mod state_blob;

use crate::config::CSR_BODY_LENGTH_HINT;
use crate::normalize;
use crate::page::LoadedPage;
use crate::report::{CandidateRecord, Identifier, RankReport};
use tracing::{debug, warn};

type Strategy = fn(&LoadedPage, &Identifier) -> Option<CandidateRecord>;

const STRATEGIES: &[(&str, Strategy)] = &[
    ("state_blob", state_blob::find),
    ("row_scan", row_scan::find),
    ("element_scan", element_scan::find),
];

/// Run the strategies in order, stopping at the first match.
pub fn run(page: &LoadedPage, id: &Identifier) -> Option<CandidateRecord> {
    STRATEGIES.iter().find_map(|(name, strategy)| {
        let hit = strategy(page, id);
        match &hit {
            Some(_) => debug!(strategy = %name, "record matched"),
            None => debug!(strategy = %name, "no match"),
        }
        hit
    })
}

/// Full synchronous pipeline: load → extract → normalize.
///
/// Exhausting every strategy is a normal outcome and yields a
/// `found=false` report — distinct from an upstream failure, which
/// never reaches this function.
pub fn lookup_in_page(body: &str, id: &Identifier) -> RankReport {
    let page = LoadedPage::parse(body);
    match run(&page, id) {
        Some(candidate) => normalize::normalize(candidate, id),
        None => {
            log_miss_hints(body, id);
            RankReport::not_found(id)
        }
    }
}

/// Diagnostics for a miss. Logged only — a page the engine cannot see
/// into still answers `found=false`, never an error.
fn log_miss_hints(body: &str, id: &Identifier) {
    let lower = body.to_lowercase();
    if body.len() < CSR_BODY_LENGTH_HINT || lower.contains("loading") {
        warn!(
            handle = id.normalized(),
            body_len = body.len(),
            "page looks client-side rendered; static HTML may not carry the data"
        );
    }
    if !lower.contains("rank") && !lower.contains("leaderboard") {
        warn!(
            handle = id.normalized(),
            "no rank/leaderboard keywords in page; source URL may be wrong"
        );
    }
}
