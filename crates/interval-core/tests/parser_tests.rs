//! Tests for ISO 8601 interval parsing and date-time/duration disambiguation.

use chrono::{DateTime, FixedOffset, Locale, TimeDelta, TimeZone, Utc};
use interval_core::{
    format_to_iso, from_iso, DstPolicy, Interval, InvalidReason, IsoFormatOptions, ParseOptions,
};

fn utc(year: i32, month: u32, day: u32, hour: u32, min: u32) -> DateTime<FixedOffset> {
    Utc.with_ymd_and_hms(year, month, day, hour, min, 0)
        .unwrap()
        .fixed_offset()
}

fn new_york() -> ParseOptions {
    ParseOptions {
        zone: "America/New_York".parse().unwrap(),
        ..ParseOptions::default()
    }
}

fn parse(text: &str) -> Interval {
    Interval::from_iso(text, &ParseOptions::default())
}

fn assert_unparsable(interval: &Interval, text: &str) {
    assert!(!interval.is_valid(), "{text:?} should be invalid");
    assert_eq!(interval.invalid_reason(), Some(&InvalidReason::Unparsable));
    assert_eq!(
        interval.invalid_explanation(),
        Some(format!("the input \"{text}\" can't be parsed as ISO 8601").as_str())
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Date-time / date-time
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn two_date_times() {
    let interval = parse("2022-01-01T00:00:00/2022-01-02T00:00:00");
    assert!(interval.is_valid());
    assert_eq!(interval.start(), Some(utc(2022, 1, 1, 0, 0)));
    assert_eq!(interval.end(), Some(utc(2022, 1, 2, 0, 0)));
}

#[test]
fn two_dates_without_time() {
    let interval = parse("2022-01-01/2022-01-31");
    assert_eq!(interval.start(), Some(utc(2022, 1, 1, 0, 0)));
    assert_eq!(interval.end(), Some(utc(2022, 1, 31, 0, 0)));
}

#[test]
fn reversed_date_times_are_end_before_start() {
    let interval = parse("2022-01-02T00:00:00/2022-01-01T00:00:00");
    assert!(!interval.is_valid());
    assert_eq!(interval.invalid_reason(), Some(&InvalidReason::EndBeforeStart));
}

#[test]
fn equal_date_times_form_an_empty_interval() {
    let interval = parse("2022-01-01T00:00:00Z/2022-01-01T00:00:00Z");
    assert!(interval.is_valid());
    assert!(interval.is_empty());
}

// ─────────────────────────────────────────────────────────────────────────────
// Date-time / duration and duration / date-time
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn start_and_duration() {
    let interval = parse("2022-01-01T00:00:00/P1D");
    assert_eq!(interval.start(), Some(utc(2022, 1, 1, 0, 0)));
    assert_eq!(interval.end(), Some(utc(2022, 1, 2, 0, 0)));
}

#[test]
fn duration_and_end() {
    let interval = parse("P1D/2022-01-02T00:00:00");
    assert_eq!(interval.start(), Some(utc(2022, 1, 1, 0, 0)));
    assert_eq!(interval.end(), Some(utc(2022, 1, 2, 0, 0)));
}

#[test]
fn clock_duration() {
    let interval = parse("2022-01-01T09:00:00Z/PT8H30M");
    assert_eq!(interval.end(), Some(utc(2022, 1, 1, 17, 30)));
    assert_eq!(interval.length(), Some(TimeDelta::minutes(510)));
}

#[test]
fn month_duration_clamps_to_end_of_month() {
    let interval = parse("2022-01-31T00:00:00/P1M");
    assert_eq!(interval.end(), Some(utc(2022, 2, 28, 0, 0)));
}

#[test]
fn negative_duration_after_start_is_end_before_start() {
    let interval = parse("2022-01-02T00:00:00/-P1D");
    assert_eq!(interval.invalid_reason(), Some(&InvalidReason::EndBeforeStart));
}

#[test]
fn fractional_hours() {
    let interval = parse("2022-01-01T00:00:00Z/PT1.5H");
    assert!(interval.is_valid());
    assert_eq!(interval.end(), Some(utc(2022, 1, 1, 1, 30)));
}

#[test]
fn duration_component_out_of_range_is_unparsable() {
    let text = "2022-01-01T00:00:00/P999999999Y";
    assert_unparsable(&parse(text), text);
}

// ─────────────────────────────────────────────────────────────────────────────
// Unparsable input
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn garbage_is_unparsable() {
    assert_unparsable(&parse("not-a-date/also-not"), "not-a-date/also-not");
}

#[test]
fn empty_and_missing_input_are_unparsable() {
    assert_unparsable(&parse(""), "");
    assert_unparsable(&from_iso(None, &ParseOptions::default()), "");
}

#[test]
fn missing_separator_is_unparsable() {
    assert_unparsable(&parse("2022-01-01T00:00:00"), "2022-01-01T00:00:00");
}

#[test]
fn empty_segment_is_unparsable() {
    assert_unparsable(&parse("2022-01-01T00:00:00/"), "2022-01-01T00:00:00/");
    assert_unparsable(&parse("/P1D"), "/P1D");
    assert_unparsable(&parse("2022-01-01//2022-01-02"), "2022-01-01//2022-01-02");
}

#[test]
fn two_durations_are_unparsable() {
    assert_unparsable(&parse("P1D/P2D"), "P1D/P2D");
}

#[test]
fn malformed_date_time_with_date_time_is_unparsable() {
    // The right side is neither a valid date-time nor a duration.
    assert_unparsable(&parse("2022-01-01/2022-13-01"), "2022-01-01/2022-13-01");
}

#[test]
fn malformed_duration_is_unparsable() {
    assert_unparsable(&parse("2022-01-01/P1X"), "2022-01-01/P1X");
    assert_unparsable(&parse("P/2022-01-01"), "P/2022-01-01");
}

#[test]
fn text_after_a_second_separator_is_ignored() {
    let interval = parse("2022-01-01T00:00:00/P1D/garbage");
    assert!(interval.is_valid());
    assert_eq!(interval.end(), Some(utc(2022, 1, 2, 0, 0)));
}

// ─────────────────────────────────────────────────────────────────────────────
// Options
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn offsets_are_converted_into_the_zone_by_default() {
    let interval = parse("2022-01-01T10:00:00+05:00/PT1H");
    assert_eq!(interval.start(), Some(utc(2022, 1, 1, 5, 0)));
    assert_eq!(
        format_to_iso(&interval, &IsoFormatOptions::default()),
        "2022-01-01T05:00:00.000Z/2022-01-01T06:00:00.000Z"
    );
}

#[test]
fn set_zone_keeps_written_offsets() {
    let options = ParseOptions {
        set_zone: true,
        ..ParseOptions::default()
    };
    let interval = Interval::from_iso("2022-01-01T10:00:00+05:00/PT1H", &options);
    let start = interval.start().unwrap();
    assert_eq!(start.offset(), &FixedOffset::east_opt(5 * 3600).unwrap());
    assert_eq!(
        format_to_iso(&interval, &IsoFormatOptions::default()),
        "2022-01-01T10:00:00.000+05:00/2022-01-01T11:00:00.000+05:00"
    );
}

#[test]
fn wall_clock_input_is_read_in_the_zone() {
    let options = ParseOptions {
        zone: "America/New_York".parse().unwrap(),
        ..ParseOptions::default()
    };
    let interval = Interval::from_iso("2022-01-03T09:00/PT8H", &options);
    assert_eq!(interval.start(), Some(utc(2022, 1, 3, 14, 0)));
    assert_eq!(
        format_to_iso(&interval, &IsoFormatOptions::default()),
        "2022-01-03T09:00:00.000-05:00/2022-01-03T17:00:00.000-05:00"
    );
}

#[test]
fn rejected_dst_gap_is_swallowed_into_unparsable() {
    let options = ParseOptions {
        zone: "America/New_York".parse().unwrap(),
        dst_policy: DstPolicy::Reject,
        ..ParseOptions::default()
    };
    let text = "2026-03-08T02:30/PT1H";
    assert_unparsable(&Interval::from_iso(text, &options), text);
}

#[test]
fn day_after_start_across_spring_forward() {
    let interval = Interval::from_iso("2022-03-12T12:00/P1D", &new_york());
    assert_eq!(
        format_to_iso(&interval, &IsoFormatOptions::default()),
        "2022-03-12T12:00:00.000-05:00/2022-03-13T12:00:00.000-04:00"
    );
    assert_eq!(interval.length(), Some(TimeDelta::hours(23)));
}

#[test]
fn day_before_end_across_spring_forward() {
    let interval = Interval::from_iso("P1D/2022-03-13T12:00", &new_york());
    assert_eq!(
        format_to_iso(&interval, &IsoFormatOptions::default()),
        "2022-03-12T12:00:00.000-05:00/2022-03-13T12:00:00.000-04:00"
    );
}

#[test]
fn day_after_start_across_fall_back() {
    let interval = Interval::from_iso("2022-11-05T12:00/P1D", &new_york());
    assert_eq!(
        format_to_iso(&interval, &IsoFormatOptions::default()),
        "2022-11-05T12:00:00.000-04:00/2022-11-06T12:00:00.000-05:00"
    );
    assert_eq!(interval.length(), Some(TimeDelta::hours(25)));
}

#[test]
fn explicit_offset_is_converted_before_the_arithmetic() {
    // 17:00Z is noon in New York on both days.
    let interval = Interval::from_iso("2022-03-12T17:00:00Z/P1D", &new_york());
    assert_eq!(
        format_to_iso(&interval, &IsoFormatOptions::default()),
        "2022-03-12T12:00:00.000-05:00/2022-03-13T12:00:00.000-04:00"
    );
}

#[test]
fn kept_offset_does_calendar_arithmetic_at_that_offset() {
    let options = ParseOptions {
        set_zone: true,
        ..new_york()
    };
    let interval = Interval::from_iso("2022-03-12T12:00-05:00/P1D", &options);
    assert_eq!(
        format_to_iso(&interval, &IsoFormatOptions::default()),
        "2022-03-12T12:00:00.000-05:00/2022-03-13T12:00:00.000-05:00"
    );
}

#[test]
fn parsed_interval_carries_the_locale() {
    let options = ParseOptions {
        locale: Locale::fr_FR,
        ..ParseOptions::default()
    };
    let interval = Interval::from_iso("2022-01-01/P1D", &options);
    assert_eq!(interval.locale(), Locale::fr_FR);
    assert_eq!(parse("2022-01-01/P1D").locale(), Locale::en_US);
}
