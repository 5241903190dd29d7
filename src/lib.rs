//! Podium — leaderboard rank lookup.
//!
//! Answers one question: what rank and score does entrant X currently
//! hold on a third-party leaderboard page? The page may render its data
//! as a table, as generic markup, or as an embedded hydration blob; the
//! extraction engine tries each representation in order and normalizes
//! the first match into a canonical rank/score record.

pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod normalize;
pub mod page;
pub mod report;
pub mod rest;
