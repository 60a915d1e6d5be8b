//! Fiscal alignment scoring.
//!
//! Prior-year annual periods are ranked by how closely their end date lines up with
//! the current fiscal-year end.

use chrono::{Datelike, NaiveDate};

/// Same month and day as the reference, in an earlier year.
pub const EXACT: u8 = 100;
/// Same month, within [`SAME_MONTH_DAYS`] days of the reference day.
pub const SAME_MONTH: u8 = 75;
/// Month before or after the reference month.
pub const ADJACENT_MONTH: u8 = 50;

/// Day window for [`SAME_MONTH`].
pub const SAME_MONTH_DAYS: u32 = 15;

/// Scores `candidate` against the reference fiscal-year end. Zero means not aligned.
///
/// Month-end dates match each other, so a February 28 year end lines up with
/// February 29 of a leap year.
#[must_use]
pub fn alignment_score(reference: NaiveDate, candidate: NaiveDate) -> u8 {
    if candidate.month() == reference.month() {
        if candidate.day() == reference.day() || (is_month_end(candidate) && is_month_end(reference)) {
            return EXACT;
        }
        if candidate.day().abs_diff(reference.day()) <= SAME_MONTH_DAYS {
            return SAME_MONTH;
        }
        return 0;
    }

    let months_apart = candidate.month().abs_diff(reference.month());
    if months_apart == 1 || months_apart == 11 {
        ADJACENT_MONTH
    } else {
        0
    }
}

/// The same calendar date one year earlier; February 29 maps to February 28.
#[must_use]
pub fn one_year_before(date: NaiveDate) -> NaiveDate {
    date.with_year(date.year() - 1)
        .or_else(|| date.pred_opt().and_then(|d| d.with_year(d.year() - 1)))
        .unwrap_or(date)
}

fn is_month_end(date: NaiveDate) -> bool {
    date.succ_opt().is_none_or(|next| next.month() != date.month())
}
