//! Validation of submitted request bodies.
//!
//! Transports hand raw bytes here once; the analysis functions only ever see
//! a `&str`.

use crate::error::{RequestError, RequestResult};

/// Reject a declared size over `limit`. `None` disables the check.
pub const fn check_size(size: usize, limit: Option<usize>) -> RequestResult<()> {
    match limit {
        Some(limit) if size > limit => Err(RequestError::TooLarge { size, limit }),
        _ => Ok(()),
    }
}

/// Validate a complete body against the limit and decode it as UTF-8.
#[tracing::instrument(skip(body), fields(body_len = body.len()))]
pub fn decode_text(body: &[u8], limit: Option<usize>) -> RequestResult<&str> {
    check_size(body.len(), limit)?;
    std::str::from_utf8(body).map_err(|e| {
        tracing::debug!(valid_up_to = e.valid_up_to(), "rejecting non-UTF-8 body");
        RequestError::InvalidUtf8
    })
}
