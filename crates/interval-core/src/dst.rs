//! DST transition policies for local date-times placed into a timezone.

use chrono::{DateTime, FixedOffset, LocalResult, NaiveDateTime, Offset, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Policy for local times that fall into a DST gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DstPolicy {
    /// Refuse local times inside the gap (e.g., 2:30 AM during spring forward)
    Reject,
    /// Move the time forward by the length of the gap
    #[default]
    ShiftForward,
}

/// Place a wall-clock time into `tz`.
///
/// Ambiguous times (fall back) resolve to the earlier instant. Gap times
/// follow `policy`; `None` means the time was rejected or the shift overflowed.
pub fn resolve_local(
    tz: &Tz,
    local: NaiveDateTime,
    policy: DstPolicy,
) -> Option<DateTime<FixedOffset>> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => Some(dt.fixed_offset()),
        LocalResult::Ambiguous(earliest, _) => Some(earliest.fixed_offset()),
        LocalResult::None => match policy {
            DstPolicy::Reject => None,
            DstPolicy::ShiftForward => {
                // Transitions are at least a day apart: a day earlier the
                // pre-transition offset is in effect.
                let day_before = local.checked_sub_signed(TimeDelta::days(1))?;
                let before = tz.offset_from_utc_datetime(&day_before).fix();
                let instant = local
                    .checked_sub_signed(TimeDelta::seconds(i64::from(before.local_minus_utc())))?;
                Some(Utc.from_utc_datetime(&instant).with_timezone(tz).fixed_offset())
            }
        },
    }
}
