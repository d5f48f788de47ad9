//! Feed cache expiry rule.
//!
//! A snapshot is valid strictly before the same wall-clock time
//! [`MAX_CACHE_AGE_IN_DAYS`] calendar days after it was taken, read in the
//! snapshot's time zone.

use chrono::{DateTime, Days, LocalResult, Offset, TimeZone, Utc};

pub const MAX_CACHE_AGE_IN_DAYS: u64 = 7;

/// Whether a snapshot taken at `timestamp` may still be served at `against`.
///
/// The day arithmetic happens in `timestamp`'s time zone, so a week across a
/// DST change is a calendar week, not `7 * 86400` seconds. A timestamp too
/// close to the end of the representable range is never valid.
pub fn validate<Tz: TimeZone>(timestamp: &DateTime<Tz>, against: &DateTime<Tz>) -> bool {
    match expiry(timestamp) {
        Some(max_cache_age) => against.with_timezone(&Utc) < max_cache_age,
        None => false,
    }
}

/// First instant at which a snapshot taken at `timestamp` is no longer valid.
///
/// A wall-clock time repeated by a backward transition resolves to its
/// earlier occurrence; one skipped by a forward transition keeps the offset
/// in force before the gap, which lands just past it.
pub fn expiry<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> Option<DateTime<Utc>> {
    let target = timestamp.naive_local().checked_add_days(Days::new(MAX_CACHE_AGE_IN_DAYS))?;

    let expiry = match timestamp.timezone().from_local_datetime(&target) {
        LocalResult::Single(at) => at.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        LocalResult::None => target.and_local_timezone(timestamp.offset().fix()).single()?.with_timezone(&Utc),
    };
    Some(expiry)
}
