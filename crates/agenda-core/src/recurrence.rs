//! Recurrence rule expansion.
//!
//! A repeating event is expanded into the ordered list of concrete dates it
//! occurs on. Expansion is a pure function: the repository materializes the
//! result into stored rows, views never call this directly.
//!
//! Monthly and yearly steps are computed from the anchor date, and a step
//! landing in a month too short for the anchor day is clamped to the last
//! valid day of that month (Jan 31 + 1 month = Feb 28, + 2 months = Mar 31).

use chrono::{Days, Months, NaiveDate};

use crate::error::CoreError;
use crate::models::{Repeat, RepeatKind};

/// Default expansion cap when a rule has no end date, in months.
pub const DEFAULT_HORIZON_MONTHS: u32 = 24;

/// Upper bound used when no explicit end date limits a rule.
pub fn horizon_for(start: NaiveDate, months: u32) -> NaiveDate {
    start
        .checked_add_months(Months::new(months))
        .unwrap_or(NaiveDate::MAX)
}

/// Expands a recurrence rule into the ordered occurrence dates, starting at
/// `start` and bounded inclusively by the rule's end date. The horizon is a
/// hard cap that applies even when an end date is present, so expansion is
/// always finite.
///
/// A non-repeating rule yields exactly `[start]`. A repeating rule with
/// `interval == 0` is an input error, never a silent empty result.
pub fn expand(
    start: NaiveDate,
    repeat: &Repeat,
    horizon: NaiveDate,
) -> Result<Vec<NaiveDate>, CoreError> {
    if repeat.kind == RepeatKind::None {
        return Ok(vec![start]);
    }
    if repeat.interval == 0 {
        return Err(CoreError::InvalidInput(
            "Repeat interval must be at least 1.".to_string(),
        ));
    }

    let bound = repeat.until.map_or(horizon, |until| until.min(horizon));

    let mut dates = Vec::new();
    match repeat.kind {
        RepeatKind::None => unreachable!(),
        RepeatKind::Daily | RepeatKind::Weekly => {
            let step = if repeat.kind == RepeatKind::Daily {
                u64::from(repeat.interval)
            } else {
                7 * u64::from(repeat.interval)
            };
            let mut date = start;
            while date <= bound {
                dates.push(date);
                date = match date.checked_add_days(Days::new(step)) {
                    Some(next) => next,
                    None => break,
                };
            }
        }
        RepeatKind::Monthly | RepeatKind::Yearly => {
            let unit_months = if repeat.kind == RepeatKind::Monthly {
                repeat.interval
            } else {
                12 * repeat.interval
            };
            // Always step from the anchor so the day-of-month does not decay
            // after a clamped short month.
            for n in 0u32.. {
                let date = match n
                    .checked_mul(unit_months)
                    .and_then(|m| start.checked_add_months(Months::new(m)))
                {
                    Some(d) => d,
                    None => break,
                };
                if date > bound {
                    break;
                }
                dates.push(date);
            }
        }
    }

    Ok(dates)
}
