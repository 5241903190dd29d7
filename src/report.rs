//! Data model: the identifier being looked up, the raw shapes a
//! strategy can match, and the canonical report returned to callers.

use crate::config::{SCORE_DISPLAY_DECIMALS, SENTINEL};
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;

/// A normalized leaderboard handle.
///
/// Built once per request by stripping an optional leading `@` and
/// lower-casing. All document comparisons are substring tests on the
/// normalized form — a handle that is a strict substring of another
/// (`ann` vs `anna`) will match the longer one. That looseness is
/// deliberate tolerance for decorated handles in page markup.
#[derive(Debug, Clone)]
pub struct Identifier {
    raw: String,
    normalized: String,
}

impl Identifier {
    pub fn new(raw: &str) -> Self {
        let trimmed = raw.trim();
        let normalized = trimmed
            .strip_prefix('@')
            .unwrap_or(trimmed)
            .to_lowercase();
        Self {
            raw: trimmed.to_string(),
            normalized,
        }
    }

    /// The handle as the caller supplied it, minus surrounding whitespace.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Lower-cased handle without the `@` prefix.
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// Case-insensitive substring test against document content.
    pub fn matches(&self, text: &str) -> bool {
        !self.normalized.is_empty() && text.to_lowercase().contains(&self.normalized)
    }
}

/// Raw match produced by a successful strategy, before normalization.
///
/// A closed set of shapes: the engine produces exactly one of these per
/// successful lookup and the normalizer pattern-matches on it.
#[derive(Debug, Clone)]
pub enum CandidateRecord {
    /// Ordered cell texts of the matched table row.
    TableCells(Vec<String>),
    /// Descendant texts of the matched element's parent scope. Less
    /// trustworthy than table cells — companion numbers are found by
    /// heuristics, not position.
    LooseText(Vec<String>),
    /// The matched object from an embedded state blob.
    StateObject(Value),
}

/// Rank/score pair for one time window.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WindowStats {
    #[serde(serialize_with = "ser_rank")]
    pub rank: Option<u32>,
    #[serde(serialize_with = "ser_score")]
    pub score: Option<f64>,
}

/// The canonical lookup result.
///
/// Unresolved rank/score serialize as the `"---"` sentinel rather than
/// null, and a resolved score always renders with two decimals, so the
/// payload can be displayed as-is.
#[derive(Debug, Clone, Serialize)]
pub struct RankReport {
    pub found: bool,
    pub handle: String,
    #[serde(serialize_with = "ser_rank")]
    pub rank: Option<u32>,
    #[serde(serialize_with = "ser_score")]
    pub score: Option<f64>,
    /// Per-window breakdown, present only when the source exposes one.
    /// Serialized as `stats` keyed by window name.
    #[serde(rename = "stats", skip_serializing_if = "Option::is_none")]
    pub windows: Option<BTreeMap<String, WindowStats>>,
}

impl RankReport {
    /// Report for an identifier that matched nowhere. A normal
    /// outcome, not an error.
    pub fn not_found(id: &Identifier) -> Self {
        Self {
            found: false,
            handle: id.normalized().to_string(),
            rank: None,
            score: None,
            windows: None,
        }
    }

    /// Rank as the caller should display it.
    pub fn display_rank(&self) -> String {
        match self.rank {
            Some(r) => format!("#{r}"),
            None => SENTINEL.to_string(),
        }
    }

    /// Score as the caller should display it.
    pub fn display_score(&self) -> String {
        match self.score {
            Some(s) => format_score(s),
            None => SENTINEL.to_string(),
        }
    }
}

/// Fixed-precision score rendering. The contract is representation
/// independent: a source string `"100"` and a source number `100`
/// both come out as `"100.00"`.
pub fn format_score(value: f64) -> String {
    format!("{value:.prec$}", prec = SCORE_DISPLAY_DECIMALS)
}

fn ser_rank<S: Serializer>(rank: &Option<u32>, s: S) -> Result<S::Ok, S::Error> {
    match rank {
        Some(r) => s.serialize_u32(*r),
        None => s.serialize_str(SENTINEL),
    }
}

fn ser_score<S: Serializer>(score: &Option<f64>, s: S) -> Result<S::Ok, S::Error> {
    match score {
        Some(v) => s.serialize_str(&format_score(*v)),
        None => s.serialize_str(SENTINEL),
    }
}
