//! ISO 8601 durations (`P1Y2M3W4DT5H6M7.5S`) and their application to date-times.
//!
//! Parsing is `jiff`'s ISO 8601 span grammar, so a fraction is allowed on the
//! smallest time unit (`PT1.5H`, `PT0.25S`). Calendar parts (years, months,
//! weeks, days) move the wall clock of the zone the date-time lives in and are
//! re-resolved against its DST transitions; clock parts then move the instant.

use std::fmt;
use std::str::FromStr;

use chrono::{Months, NaiveDateTime, TimeDelta, TimeZone};
use chrono_tz::Tz;
use jiff::fmt::temporal::SpanParser;
use jiff::Span;

use crate::datetime::DateTimePoint;
use crate::dst::{self, DstPolicy};
use crate::error::{ParseError, Result};

static PARSER: SpanParser = SpanParser::new();

/// A parsed ISO 8601 duration. All components share one sign.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsoDuration(Span);

impl IsoDuration {
    pub fn span(&self) -> Span {
        self.0
    }

    /// True when every component is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    /// `dt + self`, or `None` if the result is out of range.
    ///
    /// With a `zone`, calendar parts are applied to the wall clock in that
    /// zone and the result is expressed in it; a result inside a DST gap is
    /// shifted forward. Without one, the arithmetic keeps `dt`'s offset.
    pub fn add_to(&self, dt: &DateTimePoint, zone: Option<&Tz>) -> Option<DateTimePoint> {
        shift(dt, self.0, zone)
    }

    /// `dt - self`, or `None` if the result is out of range. See [`Self::add_to`].
    pub fn subtract_from(&self, dt: &DateTimePoint, zone: Option<&Tz>) -> Option<DateTimePoint> {
        shift(dt, self.0.negate(), zone)
    }
}

fn shift(dt: &DateTimePoint, span: Span, zone: Option<&Tz>) -> Option<DateTimePoint> {
    let months = i64::from(span.get_years()) * 12 + i64::from(span.get_months());
    let days = i64::from(span.get_weeks()) * 7 + i64::from(span.get_days());

    let anchored = match zone {
        _ if months == 0 && days == 0 => *dt,
        Some(tz) => {
            let local = shift_wall_clock(dt.with_timezone(tz).naive_local(), months, days)?;
            dst::resolve_local(tz, local, DstPolicy::ShiftForward)?
        }
        None => {
            let local = shift_wall_clock(dt.naive_local(), months, days)?;
            dt.offset().from_local_datetime(&local).single()?
        }
    };

    let moved = anchored.checked_add_signed(clock_delta(&span)?)?;
    Some(match zone {
        Some(tz) => moved.with_timezone(tz).fixed_offset(),
        None => moved,
    })
}

/// Months first (clamping to the end of the month), then days.
fn shift_wall_clock(local: NaiveDateTime, months: i64, days: i64) -> Option<NaiveDateTime> {
    let count = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    let local = if months < 0 {
        local.checked_sub_months(count)?
    } else {
        local.checked_add_months(count)?
    };
    local.checked_add_signed(TimeDelta::try_days(days)?)
}

fn clock_delta(span: &Span) -> Option<TimeDelta> {
    TimeDelta::try_hours(i64::from(span.get_hours()))?
        .checked_add(&TimeDelta::try_minutes(span.get_minutes())?)?
        .checked_add(&TimeDelta::try_seconds(span.get_seconds())?)?
        .checked_add(&TimeDelta::try_milliseconds(span.get_milliseconds())?)?
        .checked_add(&TimeDelta::microseconds(span.get_microseconds()))?
        .checked_add(&TimeDelta::nanoseconds(span.get_nanoseconds()))
}

/// Parse an ISO 8601 duration such as `P1D`, `PT36H`, `P1Y2M` or `-PT1.5H`.
///
/// # Errors
/// Returns `ParseError::Duration` if `text` is not an ISO 8601 duration or a
/// component is out of range.
pub fn parse_iso(text: &str) -> Result<IsoDuration> {
    PARSER
        .parse_span(text)
        .map(IsoDuration)
        .map_err(|_| ParseError::Duration(text.to_string()))
}

impl FromStr for IsoDuration {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self> {
        parse_iso(s)
    }
}

impl From<Span> for IsoDuration {
    fn from(span: Span) -> Self {
        Self(span)
    }
}

/// Component-wise: `PT60M` and `PT1H` are different durations.
impl PartialEq for IsoDuration {
    fn eq(&self, other: &Self) -> bool {
        self.0.fieldwise() == other.0.fieldwise()
    }
}

impl Eq for IsoDuration {}

impl fmt::Display for IsoDuration {
    /// ISO form; a zero duration is `PT0S`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
