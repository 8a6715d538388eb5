//! String representations of an [`Interval`].
//!
//! Every function is total: an invalid interval always renders as
//! [`INVALID_INTERVAL`], whatever its reason or explanation.

use std::fmt::Write;

use chrono::Locale;
use tracing::warn;

use crate::datetime::{self, DateTimePoint, IsoFormatOptions};
use crate::interval::Interval;

/// Rendering of any invalid interval.
pub const INVALID_INTERVAL: &str = "Invalid Interval";

/// Locale-aware presets for [`format_locale_string`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LocaleFormat {
    /// Locale's numeric date, e.g. `01/31/2022` in `en_US`.
    #[default]
    DateShort,
    /// e.g. `Jan 31, 2022`
    DateMed,
    /// e.g. `January 31, 2022`
    DateFull,
    /// e.g. `14:30`
    TimeSimple,
    /// Locale's time representation with seconds.
    TimeWithSeconds,
    DateTimeShort,
    DateTimeMed,
    /// Locale's full date and time representation.
    DateTimeFull,
    /// A `chrono` strftime pattern, e.g. `"%A %-d %B"`.
    Pattern(String),
}

impl LocaleFormat {
    fn pattern(&self) -> &str {
        match self {
            Self::DateShort => "%x",
            Self::DateMed => "%b %-d, %Y",
            Self::DateFull => "%B %-d, %Y",
            Self::TimeSimple => "%H:%M",
            Self::TimeWithSeconds => "%X",
            Self::DateTimeShort => "%x, %H:%M",
            Self::DateTimeMed => "%b %-d, %Y, %H:%M",
            Self::DateTimeFull => "%c",
            Self::Pattern(pattern) => pattern,
        }
    }
}

/// Options for [`format_locale_string`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LocaleOptions {
    /// Overrides the interval's own locale.
    pub locale: Option<Locale>,
}

/// Render both endpoints with a locale-aware preset, joined by `" – "`.
///
/// When both endpoints render identically (e.g. a same-day interval with a
/// date-only preset) the text appears once. A pattern `chrono` cannot render
/// falls back to [`LocaleFormat::DateShort`].
pub fn format_locale_string(
    interval: &Interval,
    format: &LocaleFormat,
    options: &LocaleOptions,
) -> String {
    let Some((start, end)) = interval.endpoints() else {
        return INVALID_INTERVAL.to_string();
    };
    let locale = options.locale.unwrap_or(interval.locale());

    let rendered = render_localized(&start, format.pattern(), locale)
        .zip(render_localized(&end, format.pattern(), locale));
    let (from, to) = match rendered {
        Some(pair) => pair,
        None => {
            warn!(pattern = format.pattern(), "unusable format pattern, using DateShort");
            let fallback = LocaleFormat::DateShort.pattern();
            (
                render_localized(&start, fallback, locale).unwrap_or_default(),
                render_localized(&end, fallback, locale).unwrap_or_default(),
            )
        }
    };

    if from == to {
        from
    } else {
        format!("{from} – {to}")
    }
}

/// `chrono` reports bad patterns as a `fmt::Error` at render time.
fn render_localized(dt: &DateTimePoint, pattern: &str, locale: Locale) -> Option<String> {
    let mut out = String::new();
    write!(out, "{}", dt.format_localized(pattern, locale)).ok()?;
    Some(out)
}

/// `<start>/<end>` in full ISO 8601, e.g.
/// `2022-01-01T00:00:00.000Z/2022-01-02T00:00:00.000Z`.
pub fn format_to_iso(interval: &Interval, options: &IsoFormatOptions) -> String {
    match interval.endpoints() {
        Some((start, end)) => format!(
            "{}/{}",
            datetime::to_iso(&start, options),
            datetime::to_iso(&end, options)
        ),
        None => INVALID_INTERVAL.to_string(),
    }
}

/// `<start date>/<end date>`, e.g. `2022-01-01/2022-01-02`.
pub fn format_to_iso_date(interval: &Interval) -> String {
    match interval.endpoints() {
        Some((start, end)) => format!(
            "{}/{}",
            datetime::to_iso_date(&start),
            datetime::to_iso_date(&end)
        ),
        None => INVALID_INTERVAL.to_string(),
    }
}

/// `<start time>/<end time>`, e.g. `09:00:00.000Z/17:00:00.000Z`.
pub fn format_to_iso_time(interval: &Interval, options: &IsoFormatOptions) -> String {
    match interval.endpoints() {
        Some((start, end)) => format!(
            "{}/{}",
            datetime::to_iso_time(&start, options),
            datetime::to_iso_time(&end, options)
        ),
        None => INVALID_INTERVAL.to_string(),
    }
}

/// Half-open bracket notation, `[<start> – <end>)`.
pub fn format_to_string(interval: &Interval) -> String {
    match interval.endpoints() {
        Some((start, end)) => {
            let iso = IsoFormatOptions::default();
            format!(
                "[{} – {})",
                datetime::to_iso(&start, &iso),
                datetime::to_iso(&end, &iso)
            )
        }
        None => INVALID_INTERVAL.to_string(),
    }
}
