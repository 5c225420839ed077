use serde::Serialize;

use crate::PREFIX_LEN;
use crate::error::Error;

/// Outcome of a single range lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BreachQueryResult {
    pub breached: bool,
    pub count: u64,
}

impl BreachQueryResult {
    /// The password's suffix was not present in the range.
    pub const fn clean() -> Self {
        Self { breached: false, count: 0 }
    }

    /// The password's suffix was present with `count` occurrences.
    pub const fn found(count: u64) -> Self {
        Self { breached: true, count }
    }
}

/// Returns true if `prefix` is exactly 5 uppercase hex characters.
#[inline]
pub fn is_valid_prefix(prefix: &str) -> bool {
    prefix.len() == PREFIX_LEN && prefix.bytes().all(|b| matches!(b, b'0'..=b'9' | b'A'..=b'F'))
}

/// Scans a range response body for `suffix`.
///
/// The body is a newline separated list of `SUFFIX:COUNT` records. Records are checked
/// in order and the scan stops at the first suffix match (compared case-insensitively),
/// so a malformed record after a match does not affect the result. A malformed record
/// before any match fails the whole lookup.
pub fn parse_range_body(body: &str, suffix: &str) -> Result<BreachQueryResult, Error> {
    for line in body.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let Some((record_suffix, count)) = line.split_once(':') else {
            return Err(Error::MalformedRecord { line: line.to_string() });
        };

        let count: u64 = count
            .trim()
            .parse()
            .map_err(|source| Error::InvalidCount { line: line.to_string(), source })?;

        if record_suffix.eq_ignore_ascii_case(suffix) {
            return Ok(BreachQueryResult::found(count));
        }
    }

    Ok(BreachQueryResult::clean())
}
