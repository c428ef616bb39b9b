// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.

use chrono::{DateTime, Utc};

/// Human-readable format used when reporting the provider's accepted
/// timestamp window, e.g. `Sun, 09 Sep 2001 1:46:40`.
const ACCEPTABLE_TIMESTAMP_FORMAT: &str = "%a, %d %b %Y %-H:%M:%S";

/// Current Unix timestamp in seconds.
pub fn unix_now() -> i64 {
    Utc::now().timestamp()
}

/// Format the `oauth_acceptable_timestamps` value reported by the provider.
///
/// The provider may send a single timestamp or a `start-end` range; only the
/// leading number is used. Returns `None` if no number can be read.
pub fn format_acceptable_timestamp(raw: &str) -> Option<String> {
    let digits: String = raw
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    let secs: i64 = digits.parse().ok()?;
    let date = DateTime::<Utc>::from_timestamp(secs, 0)?;
    Some(date.format(ACCEPTABLE_TIMESTAMP_FORMAT).to_string())
}
