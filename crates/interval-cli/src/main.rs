//! `interval` CLI: parse and format ISO 8601 time intervals from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Parse an interval and print its normalized ISO form
//! interval parse 2022-01-01T00:00:00/P1D
//!
//! # Interpret wall-clock input in a timezone, keeping its offsets
//! interval parse --zone America/New_York --set-zone 2022-03-13T02:30/PT1H
//!
//! # Machine-readable validity report
//! interval parse --json PT8H/2022-01-31T17:00
//!
//! # Locale-aware rendering
//! interval format --style locale --preset date-full --locale fr_FR 2022-01-31/P1D
//!
//! # One interval per line from stdin
//! cat intervals.txt | interval format --style date
//! ```

use std::io::{self, Read};
use std::process;

use anyhow::{anyhow, Context, Result};
use chrono::Locale;
use chrono_tz::Tz;
use clap::{Parser, Subcommand, ValueEnum};
use interval_core::{
    datetime, format_locale_string, format_to_iso, format_to_iso_date, format_to_iso_time,
    format_to_string, DstPolicy, Interval, IsoFormat, IsoFormatOptions, LocaleFormat,
    LocaleOptions, ParseOptions,
};
use serde::Serialize;
use tracing::{debug, Level};

#[derive(Parser)]
#[command(
    name = "interval",
    version,
    about = "Parse, validate and format ISO 8601 time intervals"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

/// Flags shared by every subcommand that reads intervals.
#[derive(clap::Args)]
struct ParseArgs {
    /// Interval text (reads one interval per line from stdin if omitted)
    text: Option<String>,
    /// IANA zone for input without an offset, and for output
    #[arg(long, default_value = "UTC")]
    zone: String,
    /// Keep the offsets written in the input instead of converting to --zone
    #[arg(long)]
    set_zone: bool,
    /// Treat wall-clock times inside a DST gap as invalid instead of shifting them
    #[arg(long)]
    reject_dst_gaps: bool,
    /// Locale attached to parsed intervals, e.g. en_US or fr_FR
    #[arg(long, default_value = "en_US")]
    locale: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse intervals and print their ISO form (exit status 1 if any is invalid)
    Parse {
        #[command(flatten)]
        args: ParseArgs,
        /// Print a JSON validity report instead of the ISO form
        #[arg(long)]
        json: bool,
    },
    /// Format intervals in one of the supported styles
    Format {
        #[command(flatten)]
        args: ParseArgs,
        /// Output style
        #[arg(long, value_enum, default_value_t = Style::Iso)]
        style: Style,
        /// Locale preset for --style locale
        #[arg(long, value_enum, default_value_t = Preset::DateShort)]
        preset: Preset,
        /// strftime pattern for --style locale (overrides --preset)
        #[arg(long)]
        pattern: Option<String>,
        /// Omit milliseconds when they are zero
        #[arg(long)]
        suppress_milliseconds: bool,
        /// Omit seconds and milliseconds when both are zero
        #[arg(long)]
        suppress_seconds: bool,
        /// Leave out the UTC offset
        #[arg(long)]
        no_offset: bool,
        /// Basic notation (20220101T000000) instead of extended
        #[arg(long)]
        basic: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Style {
    Iso,
    Date,
    Time,
    String,
    Locale,
}

#[derive(Clone, Copy, ValueEnum)]
enum Preset {
    DateShort,
    DateMed,
    DateFull,
    TimeSimple,
    TimeWithSeconds,
    DatetimeShort,
    DatetimeMed,
    DatetimeFull,
}

impl From<Preset> for LocaleFormat {
    fn from(preset: Preset) -> Self {
        match preset {
            Preset::DateShort => Self::DateShort,
            Preset::DateMed => Self::DateMed,
            Preset::DateFull => Self::DateFull,
            Preset::TimeSimple => Self::TimeSimple,
            Preset::TimeWithSeconds => Self::TimeWithSeconds,
            Preset::DatetimeShort => Self::DateTimeShort,
            Preset::DatetimeMed => Self::DateTimeMed,
            Preset::DatetimeFull => Self::DateTimeFull,
        }
    }
}

/// JSON shape printed by `parse --json`.
#[derive(Serialize)]
struct Report {
    valid: bool,
    start: Option<String>,
    end: Option<String>,
    reason: Option<String>,
    explanation: Option<String>,
}

impl Report {
    fn new(interval: &Interval) -> Self {
        let iso = IsoFormatOptions::default();
        Self {
            valid: interval.is_valid(),
            start: interval.start().map(|s| datetime::to_iso(&s, &iso)),
            end: interval.end().map(|e| datetime::to_iso(&e, &iso)),
            reason: interval.invalid_reason().map(|r| r.as_str().to_string()),
            explanation: interval.invalid_explanation().map(str::to_string),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Parse { args, json } => {
            let options = parse_options(&args)?;
            let mut all_valid = true;
            for line in read_intervals(args.text.as_deref())? {
                let interval = Interval::from_iso(&line, &options);
                debug!(input = %line, valid = interval.is_valid(), "parsed");
                all_valid &= interval.is_valid();
                if json {
                    let report = serde_json::to_string(&Report::new(&interval))
                        .context("Failed to serialize report")?;
                    println!("{report}");
                } else {
                    println!("{}", format_to_iso(&interval, &IsoFormatOptions::default()));
                }
            }
            if !all_valid {
                process::exit(1);
            }
        }
        Commands::Format {
            args,
            style,
            preset,
            pattern,
            suppress_milliseconds,
            suppress_seconds,
            no_offset,
            basic,
        } => {
            let options = parse_options(&args)?;
            let iso = IsoFormatOptions {
                suppress_milliseconds,
                suppress_seconds,
                include_offset: !no_offset,
                include_prefix: false,
                format: if basic {
                    IsoFormat::Basic
                } else {
                    IsoFormat::Extended
                },
            };
            let locale_format = match pattern {
                Some(pattern) => LocaleFormat::Pattern(pattern),
                None => preset.into(),
            };
            for line in read_intervals(args.text.as_deref())? {
                let interval = Interval::from_iso(&line, &options);
                let text = match style {
                    Style::Iso => format_to_iso(&interval, &iso),
                    Style::Date => format_to_iso_date(&interval),
                    Style::Time => format_to_iso_time(&interval, &iso),
                    Style::String => format_to_string(&interval),
                    Style::Locale => {
                        format_locale_string(&interval, &locale_format, &LocaleOptions::default())
                    }
                };
                println!("{text}");
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .without_time()
        .compact()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

/// Map the shared flags onto [`ParseOptions`].
fn parse_options(args: &ParseArgs) -> Result<ParseOptions> {
    let zone: Tz = datetime::parse_zone(&args.zone)
        .with_context(|| format!("Unknown timezone: '{}'", args.zone))?;
    let locale = Locale::try_from(args.locale.as_str())
        .map_err(|_| anyhow!("Unknown locale: '{}'", args.locale))?;
    Ok(ParseOptions {
        zone,
        set_zone: args.set_zone,
        dst_policy: if args.reject_dst_gaps {
            DstPolicy::Reject
        } else {
            DstPolicy::ShiftForward
        },
        locale,
    })
}

/// The positional argument, or each non-blank stdin line.
fn read_intervals(text: Option<&str>) -> Result<Vec<String>> {
    match text {
        Some(text) => Ok(vec![text.to_string()]),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect())
        }
    }
}
