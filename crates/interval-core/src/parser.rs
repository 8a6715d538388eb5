//! ISO 8601 time interval parsing.
//!
//! The input is split on `/` and each half is tried independently as a
//! date-time. Which side is the anchor decides how the other side is read:
//!
//! | left      | right     | result                              |
//! |-----------|-----------|-------------------------------------|
//! | date-time | date-time | `from_date_times(left, right)`      |
//! | date-time | duration  | `after(left, duration)`             |
//! | duration  | date-time | `before(right, duration)`           |
//! | otherwise |           | invalid, `"unparsable"`             |
//!
//! Duration arithmetic runs in the zone the anchoring date-time was read in
//! (see [`datetime::parse_iso_zoned`]). Delegate errors are logged at trace
//! level and treated as "not this kind".

use tracing::{debug, trace};

use crate::datetime::{self, ParseOptions, ZonedPoint};
use crate::duration::{self, IsoDuration};
use crate::interval::{Interval, InvalidReason};

/// Parse an ISO 8601 interval. Never fails: malformed input yields an invalid
/// interval with reason `"unparsable"`.
///
/// Only the first two `/`-separated segments are read; anything after a second
/// `/` is ignored. The resulting interval carries `options.locale`.
pub fn from_iso(text: Option<&str>, options: &ParseOptions) -> Interval {
    let raw = text.unwrap_or_default();
    let mut segments = raw.split('/');

    let parsed = match (segments.next(), segments.next()) {
        (Some(left), Some(right)) if !left.is_empty() && !right.is_empty() => {
            parse_segments(left, right, options)
        }
        _ => None,
    };

    match parsed {
        Some(interval) => interval.with_locale(options.locale),
        None => {
            debug!(input = raw, "unparsable interval");
            Interval::invalid(
                InvalidReason::Unparsable,
                Some(format!("the input \"{raw}\" can't be parsed as ISO 8601")),
            )
        }
    }
}

/// Apply the disambiguation rules; `None` means no reading fits.
fn parse_segments(left: &str, right: &str, options: &ParseOptions) -> Option<Interval> {
    let start = read_date_time(left, options);
    let end = read_date_time(right, options);

    match (start, end) {
        (Some(start), Some(end)) => {
            debug!(left, right, "interval from two date-times");
            Some(Interval::from_date_times(start.point, end.point))
        }
        (Some(start), None) => {
            let duration = read_duration(right)?;
            debug!(left, %duration, "interval after start");
            Some(Interval::after_in(start.point, &duration, start.zone.as_ref()))
        }
        (None, Some(end)) => {
            let duration = read_duration(left)?;
            debug!(right, %duration, "interval before end");
            Some(Interval::before_in(end.point, &duration, end.zone.as_ref()))
        }
        (None, None) => None,
    }
}

fn read_date_time(segment: &str, options: &ParseOptions) -> Option<ZonedPoint> {
    datetime::parse_iso_zoned(segment, options)
        .inspect_err(|error| trace!(segment, %error, "segment is not a date-time"))
        .ok()
}

fn read_duration(segment: &str) -> Option<IsoDuration> {
    duration::parse_iso(segment)
        .inspect_err(|error| trace!(segment, %error, "segment is not a duration"))
        .ok()
}
