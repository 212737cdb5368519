//! Store-side clock for the local document stores.

use chrono::{DateTime, Duration, SubsecRound, Utc};

/// Returns the timestamp to stamp on the next document of a collection.
///
/// Timestamps are kept at microsecond precision (what is persisted) and are
/// strictly greater than `last`, even if the wall clock stepped backwards.
pub(crate) fn next_timestamp(last: Option<DateTime<Utc>>) -> DateTime<Utc> {
    let now = Utc::now().trunc_subsecs(6);
    match last {
        Some(last) if now <= last => last + Duration::microseconds(1),
        _ => now,
    }
}

/// RFC 3339 rendering used inside stored documents.
pub(crate) fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(chrono::SecondsFormat::Micros, true)
}
