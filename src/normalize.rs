//! Field Normalizer: raw candidate values → canonical rank and score.
//!
//! Each candidate shape gets its own fill logic: table cells use
//! column-position heuristics, loose text uses first-plausible-token
//! heuristics, state objects use an ordered multi-key fallback. Parse
//! failures never error — the field is just left unset and serializes
//! as the sentinel.

use crate::config::{
    MEDAL_RANKS, PREFERRED_SCORE_COLUMN, RANK_KEYS, RANK_MIN, RANK_SANITY_MAX, SCORE_KEYS,
    WINDOW_KEYS,
};
use crate::report::{CandidateRecord, Identifier, RankReport, WindowStats};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

/// Turn a successful strategy match into the canonical report.
pub fn normalize(candidate: CandidateRecord, id: &Identifier) -> RankReport {
    let (rank, score, windows) = match candidate {
        CandidateRecord::TableCells(cells) => {
            let (rank, score) = from_cells(&cells);
            (rank, score, None)
        }
        CandidateRecord::LooseText(texts) => {
            let (rank, score) = from_loose_text(&texts);
            (rank, score, None)
        }
        CandidateRecord::StateObject(value) => from_state_object(&value),
    };

    if rank.is_none() && score.is_none() && windows.is_none() {
        debug!(handle = id.normalized(), "matched a record but no field parsed");
    }

    RankReport {
        found: true,
        handle: id.normalized().to_string(),
        rank,
        score,
        windows,
    }
}

// ── Scalar parsers ──────────────────────────────────────────────────

/// Parse a rank from decorated text. Medal symbols always win over any
/// digits in the same cell; otherwise every non-digit is stripped and
/// the remainder parsed. Out-of-range values are page noise.
pub fn parse_rank(raw: &str) -> Option<u32> {
    for (medal, rank) in MEDAL_RANKS {
        if raw.contains(*medal) {
            return Some(*rank);
        }
    }
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    let value = digits.parse::<u32>().ok()?;
    if (RANK_MIN..RANK_SANITY_MAX).contains(&value) {
        Some(value)
    } else {
        None
    }
}

/// Parse a score, tolerating thousands-separator commas.
pub fn parse_score(raw: &str) -> Option<f64> {
    let cleaned = raw.trim().replace(',', "");
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// A cell/token looks like a rank: `#`-prefixed, purely numeric, or a
/// medal symbol.
fn is_rank_candidate(text: &str) -> bool {
    let t = text.trim();
    if t.is_empty() {
        return false;
    }
    if MEDAL_RANKS.iter().any(|(medal, _)| t.contains(*medal)) {
        return true;
    }
    t.starts_with('#') || t.chars().all(|c| c.is_ascii_digit())
}

/// A cell/token looks like a score: numeric with a decimal point.
fn is_score_candidate(text: &str) -> bool {
    let t = text.trim().replace(',', "");
    !t.is_empty() && t.contains('.') && t.chars().all(|c| c.is_ascii_digit() || c == '.')
}

// ── Shape-specific fills ────────────────────────────────────────────

/// Ordered table cells: first rank-looking cell wins; score comes from
/// the preferred column, falling back to the last cell.
fn from_cells(cells: &[String]) -> (Option<u32>, Option<f64>) {
    let rank = cells.iter().find_map(|cell| {
        if is_rank_candidate(cell) {
            parse_rank(cell)
        } else {
            None
        }
    });

    let score = cells
        .get(PREFERRED_SCORE_COLUMN)
        .and_then(|cell| plausible_score(cell))
        .or_else(|| cells.last().and_then(|cell| plausible_score(cell)));

    (rank, score)
}

fn plausible_score(cell: &str) -> Option<f64> {
    if is_score_candidate(cell) {
        parse_score(cell)
    } else {
        None
    }
}

/// Loose sibling texts from the generic element scan. Each slot fills
/// at most once, first plausible token wins.
fn from_loose_text(texts: &[String]) -> (Option<u32>, Option<f64>) {
    let mut rank = None;
    let mut score = None;

    for text in texts {
        if rank.is_none() && is_rank_candidate(text) {
            rank = parse_rank(text);
        }
        if score.is_none() && is_score_candidate(text) {
            score = parse_score(text);
        }
        if rank.is_some() && score.is_some() {
            break;
        }
    }

    (rank, score)
}

/// Matched state object: ordered multi-key fallback per field, plus a
/// per-window breakdown when the object nests 24h/7d/30d stats.
fn from_state_object(
    value: &Value,
) -> (Option<u32>, Option<f64>, Option<BTreeMap<String, WindowStats>>) {
    let rank = first_rank_key(value);
    let score = first_score_key(value);

    let mut windows = BTreeMap::new();
    for window in WINDOW_KEYS {
        if let Some(stats) = value.get(*window).filter(|v| v.is_object()) {
            windows.insert(
                window.to_string(),
                WindowStats {
                    rank: first_rank_key(stats),
                    score: first_score_key(stats),
                },
            );
        }
    }

    let windows = if windows.is_empty() {
        None
    } else {
        Some(windows)
    };
    (rank, score, windows)
}

/// First present rank-like key wins; later keys are never consulted
/// once one is present, even if it fails to parse.
fn first_rank_key(value: &Value) -> Option<u32> {
    RANK_KEYS
        .iter()
        .find_map(|key| value.get(*key))
        .and_then(json_rank)
}

fn first_score_key(value: &Value) -> Option<f64> {
    SCORE_KEYS
        .iter()
        .find_map(|key| value.get(*key))
        .and_then(json_score)
}

/// Rank from a JSON value that may be a number or a decorated string.
fn json_rank(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => {
            let v = u32::try_from(n.as_u64()?).ok()?;
            if (RANK_MIN..RANK_SANITY_MAX).contains(&v) {
                Some(v)
            } else {
                None
            }
        }
        Value::String(s) => parse_rank(s),
        _ => None,
    }
}

/// Score from a JSON value that may be a number or a numeric string.
fn json_score(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => parse_score(s),
        _ => None,
    }
}
