//! The `Interval` value type and its factories.
//!
//! An interval is either fully valid (two ordered endpoints) or fully invalid
//! (a reason and an optional explanation). Nothing in between is observable:
//! endpoint accessors return `None` on an invalid interval.

use std::fmt;

use chrono::{Locale, TimeDelta};
use chrono_tz::Tz;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::datetime::{DateTimePoint, IsoFormatOptions, ParseOptions};
use crate::duration::IsoDuration;
use crate::{formatter, parser, validator};

/// Machine-readable classification of an invalid interval.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InvalidReason {
    MissingOrInvalidStart,
    MissingOrInvalidEnd,
    EndBeforeStart,
    Unparsable,
    /// Caller-supplied code passed to [`Interval::invalid`].
    Custom(String),
}

impl InvalidReason {
    pub fn as_str(&self) -> &str {
        match self {
            Self::MissingOrInvalidStart => "missing or invalid start",
            Self::MissingOrInvalidEnd => "missing or invalid end",
            Self::EndBeforeStart => "end before start",
            Self::Unparsable => "unparsable",
            Self::Custom(code) => code,
        }
    }
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why an interval is invalid.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{reason}{}", explanation_suffix(.explanation))]
pub struct Invalid {
    pub reason: InvalidReason,
    pub explanation: Option<String>,
}

impl Invalid {
    pub fn new(reason: InvalidReason, explanation: Option<String>) -> Self {
        Self {
            reason,
            explanation,
        }
    }
}

fn explanation_suffix(explanation: &Option<String>) -> String {
    explanation
        .as_deref()
        .map(|text| format!(": {text}"))
        .unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq)]
enum State {
    Valid {
        start: DateTimePoint,
        end: DateTimePoint,
    },
    Invalid(Invalid),
}

/// A half-open span `[start, end)` between two date-time points.
#[derive(Debug, Clone, PartialEq)]
pub struct Interval {
    state: State,
    locale: Locale,
}

impl Interval {
    /// Combine two endpoints, either of which may be absent.
    ///
    /// Runs [`validator::validate_start_end`]; the result is invalid when an
    /// endpoint is missing or `end < start`.
    pub fn from_date_times(
        start: impl Into<Option<DateTimePoint>>,
        end: impl Into<Option<DateTimePoint>>,
    ) -> Self {
        match validator::ordered(start.into(), end.into()) {
            Ok((start, end)) => Self {
                state: State::Valid { start, end },
                locale: Locale::en_US,
            },
            Err(invalid) => Self::from_invalid(invalid),
        }
    }

    /// An interval starting at `start` and lasting `duration`, with calendar
    /// arithmetic at `start`'s fixed offset.
    ///
    /// An end that overflows the date-time range is treated as missing.
    pub fn after(start: impl Into<Option<DateTimePoint>>, duration: &IsoDuration) -> Self {
        Self::after_in(start, duration, None)
    }

    /// [`Interval::after`] with calendar arithmetic on the wall clock of `zone`,
    /// so `P1D` across a DST change keeps the local time of day.
    pub fn after_in(
        start: impl Into<Option<DateTimePoint>>,
        duration: &IsoDuration,
        zone: Option<&Tz>,
    ) -> Self {
        let start = start.into();
        let end = start.as_ref().and_then(|s| duration.add_to(s, zone));
        Self::from_date_times(start, end)
    }

    /// An interval ending at `end` and lasting `duration`, with calendar
    /// arithmetic at `end`'s fixed offset.
    ///
    /// A start that overflows the date-time range is treated as missing.
    pub fn before(end: impl Into<Option<DateTimePoint>>, duration: &IsoDuration) -> Self {
        Self::before_in(end, duration, None)
    }

    /// [`Interval::before`] with calendar arithmetic on the wall clock of `zone`.
    pub fn before_in(
        end: impl Into<Option<DateTimePoint>>,
        duration: &IsoDuration,
        zone: Option<&Tz>,
    ) -> Self {
        let end = end.into();
        let start = end.as_ref().and_then(|e| duration.subtract_from(e, zone));
        Self::from_date_times(start, end)
    }

    /// An explicitly invalid interval.
    pub fn invalid(reason: InvalidReason, explanation: Option<String>) -> Self {
        Self::from_invalid(Invalid::new(reason, explanation))
    }

    pub(crate) fn from_invalid(invalid: Invalid) -> Self {
        Self {
            state: State::Invalid(invalid),
            locale: Locale::en_US,
        }
    }

    /// Parse `<date-time>/<date-time>`, `<date-time>/<duration>` or
    /// `<duration>/<date-time>`. See [`parser::from_iso`].
    pub fn from_iso(text: &str, options: &ParseOptions) -> Self {
        parser::from_iso(Some(text), options)
    }

    /// The same interval, formatted with `locale` by locale-aware formatting.
    #[must_use]
    pub fn with_locale(self, locale: Locale) -> Self {
        Self { locale, ..self }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self.state, State::Valid { .. })
    }

    pub fn start(&self) -> Option<DateTimePoint> {
        self.endpoints().map(|(start, _)| start)
    }

    pub fn end(&self) -> Option<DateTimePoint> {
        self.endpoints().map(|(_, end)| end)
    }

    /// Both endpoints, or `None` if the interval is invalid.
    pub fn endpoints(&self) -> Option<(DateTimePoint, DateTimePoint)> {
        match &self.state {
            State::Valid { start, end } => Some((*start, *end)),
            State::Invalid(_) => None,
        }
    }

    pub fn invalidity(&self) -> Option<&Invalid> {
        match &self.state {
            State::Valid { .. } => None,
            State::Invalid(invalid) => Some(invalid),
        }
    }

    pub fn invalid_reason(&self) -> Option<&InvalidReason> {
        self.invalidity().map(|invalid| &invalid.reason)
    }

    pub fn invalid_explanation(&self) -> Option<&str> {
        self.invalidity()
            .and_then(|invalid| invalid.explanation.as_deref())
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// `end - start`, or `None` if the interval is invalid.
    pub fn length(&self) -> Option<TimeDelta> {
        self.endpoints().map(|(start, end)| end - start)
    }

    /// True for a valid zero-length interval.
    pub fn is_empty(&self) -> bool {
        self.endpoints().is_some_and(|(start, end)| start == end)
    }

    /// Half-open containment: `start <= point < end`. Always false when invalid.
    pub fn contains(&self, point: &DateTimePoint) -> bool {
        self.endpoints()
            .is_some_and(|(start, end)| start <= *point && *point < end)
    }

    /// The endpoints as a `Result`, for callers that want to propagate invalidity with `?`.
    ///
    /// # Errors
    /// Returns the [`Invalid`] record of an invalid interval.
    pub fn into_result(self) -> Result<(DateTimePoint, DateTimePoint), Invalid> {
        match self.state {
            State::Valid { start, end } => Ok((start, end)),
            State::Invalid(invalid) => Err(invalid),
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&formatter::format_to_string(self))
    }
}

/// Serializes as the ISO form; invalid intervals serialize as
/// [`formatter::INVALID_INTERVAL`].
impl Serialize for Interval {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&formatter::format_to_iso(self, &IsoFormatOptions::default()))
    }
}

/// Deserializes from the ISO form, keeping the offsets written in the string.
impl<'de> Deserialize<'de> for Interval {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        let options = ParseOptions {
            set_zone: true,
            ..ParseOptions::default()
        };
        let interval = parser::from_iso(Some(&text), &options);
        match interval.invalidity() {
            Some(invalid) => Err(de::Error::custom(invalid)),
            None => Ok(interval),
        }
    }
}
