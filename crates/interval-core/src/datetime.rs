//! ISO 8601 date-time parsing and serialization.
//!
//! Parsing goes through `jiff`'s ISO 8601 grammar, which covers calendar dates
//! in extended and basic notation, expanded years (`+002022`), times with an
//! optional fraction (`.` or `,`) and offsets (`Z`, `+HH`, `+HH:MM`, `+HHMM`).
//! Week dates (`2022-W05-1`), ordinal dates (`2022-032`) and reduced dates
//! (`2022-03`, `2022`) are rewritten to calendar dates first. Points are held
//! as `chrono` values so zones come from `chrono-tz`.
//!
//! Strings without an offset are read as wall-clock time in [`ParseOptions::zone`].

use std::borrow::Cow;

use chrono::{
    DateTime, Datelike, FixedOffset, Locale, NaiveDate, NaiveDateTime, NaiveTime, TimeZone,
    Timelike,
};
use chrono_tz::Tz;
use jiff::civil::{self, ISOWeekDate, Weekday};
use jiff::fmt::temporal::{Pieces, PiecesOffset};
use serde::{Deserialize, Serialize};

use crate::dst::{self, DstPolicy};
use crate::error::{ParseError, Result};

/// A date-time endpoint: an instant together with the offset it is displayed in.
pub type DateTimePoint = DateTime<FixedOffset>;

/// A parsed date-time and the zone its calendar arithmetic runs in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZonedPoint {
    pub point: DateTimePoint,
    /// `None` when the point keeps the fixed offset written in the input.
    pub zone: Option<Tz>,
}

/// Options shared by the date-time parser and the interval parser.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParseOptions {
    /// Zone used for strings without an offset, and the zone results are converted into.
    pub zone: Tz,
    /// Keep the offset written in the string instead of converting into `zone`.
    pub set_zone: bool,
    /// How to treat wall-clock times that fall into a DST gap of `zone`.
    pub dst_policy: DstPolicy,
    /// Locale attached to parsed intervals for locale-aware formatting.
    pub locale: Locale,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            zone: Tz::UTC,
            set_zone: false,
            dst_policy: DstPolicy::default(),
            locale: Locale::en_US,
        }
    }
}

/// Extended (`2022-01-01T10:00:00`) or basic (`20220101T100000`) notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IsoFormat {
    #[default]
    Extended,
    Basic,
}

/// Options for the ISO serializers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IsoFormatOptions {
    /// Omit the milliseconds when they are zero.
    pub suppress_milliseconds: bool,
    /// Omit seconds and milliseconds when both are zero.
    pub suppress_seconds: bool,
    /// Append the UTC offset (`Z` for a zero offset).
    pub include_offset: bool,
    /// Prefix times with `T` (only used by [`to_iso_time`]).
    pub include_prefix: bool,
    pub format: IsoFormat,
}

impl Default for IsoFormatOptions {
    fn default() -> Self {
        Self {
            suppress_milliseconds: false,
            suppress_seconds: false,
            include_offset: true,
            include_prefix: false,
            format: IsoFormat::Extended,
        }
    }
}

/// Resolve an IANA timezone name.
///
/// # Errors
/// Returns `ParseError::Timezone` if `name` is not a known IANA identifier.
pub fn parse_zone(name: &str) -> Result<Tz> {
    name.parse()
        .map_err(|_| ParseError::Timezone(name.to_string()))
}

/// Parse an ISO 8601 date-time.
///
/// # Errors
/// Returns `ParseError::DateTime` if `text` is not a recognised date-time, and
/// `ParseError::NonexistentLocalTime` if it names a wall-clock time inside a DST
/// gap while `options.dst_policy` is [`DstPolicy::Reject`].
pub fn parse_iso(text: &str, options: &ParseOptions) -> Result<DateTimePoint> {
    parse_iso_zoned(text, options).map(|zoned| zoned.point)
}

/// [`parse_iso`], also reporting the zone later calendar arithmetic should use.
///
/// That zone is `options.zone`, except under `set_zone` with an offset in the
/// input, where the point keeps that fixed offset.
///
/// # Errors
/// Same as [`parse_iso`].
pub fn parse_iso_zoned(text: &str, options: &ParseOptions) -> Result<ZonedPoint> {
    let invalid = || ParseError::DateTime(text.to_string());
    // jiff also takes RFC 3339's space separator, which ISO 8601 does not.
    if text.contains(char::is_whitespace) {
        return Err(invalid());
    }

    let normalized = expand_reduced_date(text).ok_or_else(invalid)?;
    let pieces = Pieces::parse(&*normalized).map_err(|_| invalid())?;
    if pieces.time_zone_annotation().is_some() {
        return Err(invalid());
    }
    let time = pieces.time().unwrap_or(civil::Time::midnight());
    let local = naive_local(pieces.date(), time).ok_or_else(invalid)?;

    let Some(offset) = pieces.offset() else {
        let point = dst::resolve_local(&options.zone, local, options.dst_policy)
            .ok_or_else(|| ParseError::NonexistentLocalTime(text.to_string()))?;
        return Ok(ZonedPoint {
            point,
            zone: Some(options.zone),
        });
    };

    let point = fixed_offset(offset)
        .and_then(|offset| offset.from_local_datetime(&local).single())
        .ok_or_else(invalid)?;
    if options.set_zone {
        Ok(ZonedPoint { point, zone: None })
    } else {
        Ok(ZonedPoint {
            point: point.with_timezone(&options.zone).fixed_offset(),
            zone: Some(options.zone),
        })
    }
}

/// Full ISO 8601 representation, e.g. `2022-01-01T10:00:00.000+05:00`.
pub fn to_iso(dt: &DateTimePoint, options: &IsoFormatOptions) -> String {
    let mut out = String::with_capacity(29);
    write_date(&mut out, dt.date_naive(), options.format);
    out.push('T');
    write_time(&mut out, dt, options);
    out
}

/// Date-only ISO 8601 representation, e.g. `2022-01-01`.
pub fn to_iso_date(dt: &DateTimePoint) -> String {
    let mut out = String::with_capacity(10);
    write_date(&mut out, dt.date_naive(), IsoFormat::Extended);
    out
}

/// Time-only ISO 8601 representation, e.g. `10:00:00.000Z`.
pub fn to_iso_time(dt: &DateTimePoint, options: &IsoFormatOptions) -> String {
    let mut out = String::with_capacity(19);
    if options.include_prefix {
        out.push('T');
    }
    write_time(&mut out, dt, options);
    out
}

fn write_date(out: &mut String, date: NaiveDate, format: IsoFormat) {
    let year = date.year();
    if (0..=9999).contains(&year) {
        out.push_str(&format!("{year:04}"));
    } else {
        let sign = if year < 0 { '-' } else { '+' };
        out.push_str(&format!("{sign}{:06}", year.unsigned_abs()));
    }
    let sep = separator(format, "-");
    out.push_str(&format!("{sep}{:02}{sep}{:02}", date.month(), date.day()));
}

fn write_time(out: &mut String, dt: &DateTimePoint, options: &IsoFormatOptions) {
    let sep = separator(options.format, ":");
    // Leap seconds are carried as nanoseconds >= 1e9.
    let millis = (dt.nanosecond() % 1_000_000_000) / 1_000_000;
    out.push_str(&format!("{:02}{sep}{:02}", dt.hour(), dt.minute()));

    let drop_seconds = options.suppress_seconds && dt.second() == 0 && millis == 0;
    if !drop_seconds {
        out.push_str(&format!("{sep}{:02}", dt.second()));
        if !(options.suppress_milliseconds && millis == 0) {
            out.push_str(&format!(".{millis:03}"));
        }
    }

    if options.include_offset {
        write_offset(out, dt.offset(), options.format);
    }
}

fn write_offset(out: &mut String, offset: &FixedOffset, format: IsoFormat) {
    let seconds = offset.local_minus_utc();
    if seconds == 0 {
        out.push('Z');
        return;
    }
    let sign = if seconds < 0 { '-' } else { '+' };
    let abs = seconds.unsigned_abs();
    let sep = separator(format, ":");
    out.push_str(&format!("{sign}{:02}{sep}{:02}", abs / 3600, (abs % 3600) / 60));
}

fn separator(format: IsoFormat, extended: &'static str) -> &'static str {
    match format {
        IsoFormat::Extended => extended,
        IsoFormat::Basic => "",
    }
}

// ---------------------------------------------------------------------------
// jiff adapters
// ---------------------------------------------------------------------------

/// Rewrite week, ordinal and reduced dates as `YYYY-MM-DD`, leaving any time
/// part untouched. Other input passes through as is; `None` means a recognised
/// form named a date that does not exist.
fn expand_reduced_date(text: &str) -> Option<Cow<'_, str>> {
    let split = text.find(['T', 't']).unwrap_or(text.len());
    let (date, rest) = text.split_at(split);

    let parts: Vec<&str> = date.split('-').collect();
    let expanded = match parts.as_slice() {
        [year] if is_digits(year, 4) => format!("{year}-01-01"),
        [year, month] if is_digits(year, 4) && is_digits(month, 2) => {
            format!("{year}-{month}-01")
        }
        [year, day] if is_digits(year, 4) && is_digits(day, 3) => ordinal_date(year, day)?,
        [year, week] if is_digits(year, 4) && week.starts_with('W') => {
            week_date(year, week, "1")?
        }
        [year, week, day] if is_digits(year, 4) && week.starts_with('W') => {
            week_date(year, week, day)?
        }
        _ => return Some(Cow::Borrowed(text)),
    };
    Some(Cow::Owned(format!("{expanded}{rest}")))
}

fn ordinal_date(year: &str, day: &str) -> Option<String> {
    let date = civil::Date::new(year.parse().ok()?, 1, 1)
        .ok()?
        .with()
        .day_of_year(day.parse().ok()?)
        .build()
        .ok()?;
    Some(date.to_string())
}

fn week_date(year: &str, week: &str, day: &str) -> Option<String> {
    let week = week.strip_prefix('W').filter(|w| is_digits(w, 2))?;
    if !is_digits(day, 1) {
        return None;
    }
    let weekday = Weekday::from_monday_one_offset(day.parse().ok()?).ok()?;
    let date = ISOWeekDate::new(year.parse().ok()?, week.parse().ok()?, weekday).ok()?;
    Some(date.date().to_string())
}

fn is_digits(text: &str, len: usize) -> bool {
    text.len() == len && text.bytes().all(|b| b.is_ascii_digit())
}

fn naive_local(date: civil::Date, time: civil::Time) -> Option<NaiveDateTime> {
    let date = NaiveDate::from_ymd_opt(
        i32::from(date.year()),
        u32::try_from(date.month()).ok()?,
        u32::try_from(date.day()).ok()?,
    )?;
    let time = NaiveTime::from_hms_nano_opt(
        u32::try_from(time.hour()).ok()?,
        u32::try_from(time.minute()).ok()?,
        u32::try_from(time.second()).ok()?,
        u32::try_from(time.subsec_nanosecond()).ok()?,
    )?;
    Some(date.and_time(time))
}

/// `Z` and the unknown-offset form `-00:00` both mean UTC.
fn fixed_offset(offset: PiecesOffset) -> Option<FixedOffset> {
    match offset {
        PiecesOffset::Numeric(numeric) => FixedOffset::east_opt(numeric.offset().seconds()),
        _ => FixedOffset::east_opt(0),
    }
}
