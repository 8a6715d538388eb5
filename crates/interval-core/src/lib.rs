//! # interval-core
//!
//! Parsing, validation and formatting of ISO 8601 time intervals.
//!
//! An interval is written as two date-times, a date-time and a duration, or a
//! duration and a date-time, separated by a solidus:
//!
//! ```rust
//! use interval_core::{format_to_iso, Interval, IsoFormatOptions, ParseOptions};
//!
//! let interval = Interval::from_iso("2022-01-01T00:00:00/P1D", &ParseOptions::default());
//! assert!(interval.is_valid());
//! assert_eq!(
//!     format_to_iso(&interval, &IsoFormatOptions::default()),
//!     "2022-01-01T00:00:00.000Z/2022-01-02T00:00:00.000Z"
//! );
//!
//! let bad = Interval::from_iso("not-a-date/also-not", &ParseOptions::default());
//! assert_eq!(bad.invalid_reason().map(|r| r.as_str()), Some("unparsable"));
//! ```
//!
//! Parsing and formatting never fail: malformed input produces an invalid
//! [`Interval`], and invalid intervals format as [`INVALID_INTERVAL`].
//!
//! ## Modules
//!
//! - [`parser`]: text → `Interval`, with date-time/duration disambiguation
//! - [`validator`]: start/end ordering checks behind every factory
//! - [`formatter`]: `Interval` → ISO, bracket and locale-aware strings
//! - [`interval`]: the `Interval` value type and its factories
//! - [`datetime`]: ISO 8601 date-time parsing and serialization
//! - [`duration`]: ISO 8601 durations
//! - [`dst`]: DST gap policies for wall-clock input
//! - [`error`]: Error types for the date-time and duration parsers

pub mod datetime;
pub mod dst;
pub mod duration;
pub mod error;
pub mod formatter;
pub mod interval;
pub mod parser;
pub mod validator;

pub use datetime::{DateTimePoint, IsoFormat, IsoFormatOptions, ParseOptions, ZonedPoint};
pub use dst::DstPolicy;
pub use duration::IsoDuration;
pub use error::ParseError;
pub use formatter::{
    format_locale_string, format_to_iso, format_to_iso_date, format_to_iso_time,
    format_to_string, LocaleFormat, LocaleOptions, INVALID_INTERVAL,
};
pub use interval::{Interval, Invalid, InvalidReason};
pub use parser::from_iso;
pub use validator::validate_start_end;
