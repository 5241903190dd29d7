//! Error taxonomy for the lookup pipeline.
//!
//! Only two outcomes are user-facing errors: a missing handle and an
//! unreachable upstream. A record that simply is not on the page is a
//! normal `found=false` report, and strategy-local parse failures are
//! recovered silently (logged, then fall through to the next strategy).

/// All errors that can escape the lookup pipeline.
#[derive(thiserror::Error, Debug)]
pub enum LookupError {
    /// The required `handle` query parameter was missing or empty.
    /// No extraction is attempted.
    #[error("handle is required")]
    MissingHandle,

    /// The outbound fetch failed or the source returned a non-success
    /// status. `status` is preserved when the upstream sent one.
    #[error("failed to fetch source page: {message}")]
    Upstream {
        status: Option<u16>,
        message: String,
    },

    /// Anything else that blew up during processing. Reported as a
    /// generic server error; internals never leak to the caller.
    #[error("internal error: {0}")]
    Internal(String),
}

impl LookupError {
    /// HTTP status for the outbound response. Upstream statuses are
    /// propagated as-is so a 503 from the source surfaces as a 503,
    /// never as `found=false`.
    pub fn status_code(&self) -> u16 {
        match self {
            LookupError::MissingHandle => 400,
            LookupError::Upstream {
                status: Some(s), ..
            } => *s,
            LookupError::Upstream { status: None, .. } => 502,
            LookupError::Internal(_) => 500,
        }
    }
}

pub type LookupResult<T> = Result<T, LookupError>;
