//! Start/end validation shared by every interval factory.

use crate::datetime::{self, DateTimePoint, IsoFormatOptions};
use crate::interval::{Invalid, InvalidReason};

/// Check that two endpoints form an ordered pair.
///
/// `None` stands for an absent or unparsable endpoint. Checks run in order and
/// the first failure wins:
///
/// 1. missing start → `"missing or invalid start"`
/// 2. missing end → `"missing or invalid end"`
/// 3. `end < start` → `"end before start"`, with both endpoints in the explanation
///
/// Returns `None` when the pair is acceptable. Equal endpoints are accepted.
pub fn validate_start_end(
    start: Option<&DateTimePoint>,
    end: Option<&DateTimePoint>,
) -> Option<Invalid> {
    ordered(start.copied(), end.copied()).err()
}

/// [`validate_start_end`] handing back the accepted pair.
pub(crate) fn ordered(
    start: Option<DateTimePoint>,
    end: Option<DateTimePoint>,
) -> Result<(DateTimePoint, DateTimePoint), Invalid> {
    let Some(start) = start else {
        return Err(Invalid::new(InvalidReason::MissingOrInvalidStart, None));
    };
    let Some(end) = end else {
        return Err(Invalid::new(InvalidReason::MissingOrInvalidEnd, None));
    };

    if end < start {
        let iso = IsoFormatOptions::default();
        return Err(Invalid::new(
            InvalidReason::EndBeforeStart,
            Some(format!(
                "The end of an interval must be after its start, but you had start={} and end={}",
                datetime::to_iso(&start, &iso),
                datetime::to_iso(&end, &iso)
            )),
        ));
    }

    Ok((start, end))
}
