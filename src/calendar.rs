//! Calendar helpers

use jiff::{Timestamp, civil::Date, tz::TimeZone};

/// The calendar date `at` falls on in the store's time zone.
///
/// Coupon expiry and return windows are decided at day granularity, so every
/// instant is reduced to a local date before comparison.
pub fn local_date(at: Timestamp, tz: &TimeZone) -> Date {
    at.to_zoned(tz.clone()).date()
}
