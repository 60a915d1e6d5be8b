//! Fiscal calendar and period classification types.
//!
//! This module defines [`PeriodType`] (instant vs. duration), [`DurationBucket`]
//! for classifying duration lengths, [`FiscalPeriod`] labels, and the filing-level
//! [`FiscalMetadata`] a filer discloses about its own calendar.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, StatementError};

/// Whether a period is a point in time or a range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PeriodType {
    /// Point in time.
    Instant,
    /// Date range.
    Duration,
}

/// Duration class of a duration period.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DurationBucket {
    /// A single fiscal quarter.
    Quarterly,
    /// Half-year to date (through Q2).
    HalfYear,
    /// Nine months to date (through Q3).
    NineMonths,
    /// A full fiscal year.
    Annual,
}

impl DurationBucket {
    /// All buckets, shortest first.
    pub const ALL: [Self; 4] = [Self::Quarterly, Self::HalfYear, Self::NineMonths, Self::Annual];
}

impl fmt::Display for DurationBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Quarterly => "quarterly",
            Self::HalfYear => "half-year",
            Self::NineMonths => "nine-months",
            Self::Annual => "annual",
        };
        f.write_str(name)
    }
}

/// Fiscal period label.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FiscalPeriod {
    /// Full fiscal year.
    FY,
    /// First quarter.
    Q1,
    /// Second quarter.
    Q2,
    /// Third quarter.
    Q3,
    /// Fourth quarter.
    Q4,
    /// Not disclosed or not derivable.
    #[default]
    Unknown,
}

impl FiscalPeriod {
    /// Returns the quarter label for a quarter number 1-4.
    #[must_use]
    pub const fn from_quarter(quarter: u32) -> Self {
        match quarter {
            1 => Self::Q1,
            2 => Self::Q2,
            3 => Self::Q3,
            4 => Self::Q4,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for FiscalPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::FY => "FY",
            Self::Q1 => "Q1",
            Self::Q2 => "Q2",
            Self::Q3 => "Q3",
            Self::Q4 => "Q4",
            Self::Unknown => "Unknown",
        };
        f.write_str(label)
    }
}

impl FromStr for FiscalPeriod {
    type Err = StatementError;

    /// Parses `dei:DocumentFiscalPeriodFocus` values. Half-year and nine-month
    /// focus codes used by semi-annual filers map onto their quarter-end label.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "FY" | "H2" => Ok(Self::FY),
            "Q1" => Ok(Self::Q1),
            "Q2" | "H1" => Ok(Self::Q2),
            "Q3" | "M9" => Ok(Self::Q3),
            "Q4" => Ok(Self::Q4),
            other => Err(StatementError::InvalidFiscalPeriod(other.to_string())),
        }
    }
}

/// Disclosed fiscal-year-end month and day.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FiscalYearEnd {
    month: u32,
    day: u32,
}

impl FiscalYearEnd {
    /// Creates a fiscal-year-end, rejecting impossible month/day pairs.
    pub fn new(month: u32, day: u32) -> Result<Self> {
        // 2000 is a leap year, so --02-29 is accepted here and clamped per year below.
        NaiveDate::from_ymd_opt(2000, month, day).ok_or_else(|| StatementError::InvalidDate {
            value: format!("--{month:02}-{day:02}"),
            reason: "not a valid fiscal year end".to_string(),
        })?;
        Ok(Self { month, day })
    }

    /// Fiscal-year-end month.
    #[must_use]
    pub const fn month(&self) -> u32 {
        self.month
    }

    /// Fiscal-year-end day.
    #[must_use]
    pub const fn day(&self) -> u32 {
        self.day
    }

    /// The fiscal-year-end date falling in `year`, clamped to the month's last day.
    #[must_use]
    pub fn date_in(&self, year: i32) -> Option<NaiveDate> {
        (0..4).find_map(|back| NaiveDate::from_ymd_opt(year, self.month, self.day.saturating_sub(back)))
    }

    /// Returns the fiscal year a date belongs to.
    ///
    /// The fiscal year is named after the calendar year in which it ends. `slack_days`
    /// absorbs 52/53-week calendars whose year end drifts around the nominal date.
    #[must_use]
    pub fn fiscal_year_of(&self, date: NaiveDate, slack_days: i64) -> Option<i32> {
        let year = date.year();
        for candidate in [year - 1, year] {
            let end = self.date_in(candidate)?;
            if date <= end + chrono::Duration::days(slack_days) {
                return Some(candidate);
            }
        }
        Some(year + 1)
    }

    /// Returns true when `date` is this fiscal year's end, within `slack_days`.
    #[must_use]
    pub fn is_year_end(&self, date: NaiveDate, slack_days: i64) -> bool {
        [date.year() - 1, date.year(), date.year() + 1]
            .into_iter()
            .filter_map(|y| self.date_in(y))
            .any(|end| (date - end).num_days().abs() <= slack_days)
    }

    /// Returns the fiscal quarter (1-4) that closes on or around `date`.
    #[must_use]
    pub fn quarter_of(&self, date: NaiveDate, slack_days: i64) -> Option<u32> {
        let fiscal_year = self.fiscal_year_of(date, slack_days)?;
        let end = self.date_in(fiscal_year)?;
        let days_before = (end - date).num_days().max(0);
        let quarters_remaining = (days_before as f64 / 91.31).round() as i64;
        Some((4 - quarters_remaining).clamp(1, 4) as u32)
    }
}

impl fmt::Display for FiscalYearEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "--{:02}-{:02}", self.month, self.day)
    }
}

/// Filing-level fiscal metadata as disclosed by the filer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiscalMetadata {
    /// `dei:DocumentPeriodEndDate`.
    pub document_period_end_date: Option<NaiveDate>,
    /// `dei:CurrentFiscalYearEndDate`.
    pub fiscal_year_end: Option<FiscalYearEnd>,
    /// `dei:DocumentFiscalPeriodFocus`.
    pub fiscal_period_focus: FiscalPeriod,
    /// `dei:DocumentFiscalYearFocus`.
    pub fiscal_year_focus: Option<i32>,
}

impl FiscalMetadata {
    /// Returns true for annual reports.
    #[must_use]
    pub fn is_annual(&self) -> bool {
        self.fiscal_period_focus == FiscalPeriod::FY
    }
}

/// Identity and fiscal context of one filing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilingInfo {
    /// Accession number.
    pub accession: String,
    /// Date the filing was submitted.
    pub filed: Option<NaiveDate>,
    /// Registrant name.
    pub entity_name: Option<String>,
    /// Disclosed fiscal metadata.
    pub fiscal: FiscalMetadata,
}

impl FilingInfo {
    /// Creates filing info with only an accession number.
    #[must_use]
    pub fn new(accession: impl Into<String>) -> Self {
        Self {
            accession: accession.into(),
            ..Default::default()
        }
    }

    /// Sets the filing date.
    #[must_use]
    pub const fn with_filed(mut self, filed: NaiveDate) -> Self {
        self.filed = Some(filed);
        self
    }

    /// Sets the fiscal metadata.
    #[must_use]
    pub const fn with_fiscal(mut self, fiscal: FiscalMetadata) -> Self {
        self.fiscal = fiscal;
        self
    }
}
