//! HTTP-date parsing and formatting.
//!
//! HTTP-date ([RFC 7231 §7.1.1.1](https://datatracker.ietf.org/doc/html/rfc7231#section-7.1.1.1))
//! has one preferred format and two obsolete ones that recipients must still
//! accept:
//!
//! | Format | Example |
//! |--------|---------|
//! | IMF-fixdate | `Sun, 06 Nov 1994 08:49:37 GMT` |
//! | RFC 850 | `Sunday, 06-Nov-94 08:49:37 GMT` |
//! | ANSI C `asctime()` | `Sun Nov  6 08:49:37 1994` |
//!
//! [`format`] only ever produces IMF-fixdate. [`parse`] tries the formats in
//! the order above and returns `None` when nothing matches; a malformed date
//! is never an error.

use chrono::{DateTime, NaiveDateTime, SubsecRound, Utc};

/// Format used for every emitted date.
const IMF_FIXDATE: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Accepted input formats, tried in order.
const PARSE_FORMATS: [&str; 3] = [
    IMF_FIXDATE,
    // RFC 850, two digit year
    "%A, %d-%b-%y %H:%M:%S GMT",
    // asctime, no zone, day of month is space padded
    "%a %b %e %H:%M:%S %Y",
];

/// Formats an instant as IMF-fixdate. Sub-second precision is dropped.
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use revalidate_core::date;
///
/// let instant = Utc.with_ymd_and_hms(1994, 11, 6, 8, 49, 37).unwrap();
/// assert_eq!(date::format(instant), "Sun, 06 Nov 1994 08:49:37 GMT");
/// ```
pub fn format(instant: DateTime<Utc>) -> String {
    instant.format(IMF_FIXDATE).to_string()
}

/// Parses an HTTP-date in any of the three accepted formats.
///
/// All formats are interpreted as GMT. Returns `None` for anything else.
pub fn parse(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    PARSE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| naive.and_utc())
}

/// Truncates an instant to whole seconds, the resolution of HTTP-date.
pub fn truncate(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant.trunc_subsecs(0)
}
