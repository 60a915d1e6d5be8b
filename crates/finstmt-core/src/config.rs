//! Engine configuration.
//!
//! All knobs are plain serde structs with defaults that reproduce the reference
//! behavior. [`EngineConfig`] aggregates them and can be loaded from JSON.

use serde::{Deserialize, Serialize};

use crate::error::{Result, StatementError};
use crate::fiscal::DurationBucket;

/// Inclusive day range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRange {
    /// Lower bound, inclusive.
    pub min: i64,
    /// Upper bound, inclusive.
    pub max: i64,
}

impl DayRange {
    /// Creates a range.
    #[must_use]
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    /// Returns true when `days` lies in the range.
    #[must_use]
    pub const fn contains(&self, days: i64) -> bool {
        days >= self.min && days <= self.max
    }
}

/// Duration classification policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeriodPolicy {
    /// Single quarter.
    pub quarterly: DayRange,
    /// Half-year to date.
    pub half_year: DayRange,
    /// Nine months to date.
    pub nine_months: DayRange,
    /// Full year.
    pub annual: DayRange,
    /// Allowed drift of a 52/53-week year end from the disclosed month/day when
    /// labelling fiscal years. Never used to match the current period.
    pub fiscal_year_end_slack_days: i64,
}

impl Default for PeriodPolicy {
    fn default() -> Self {
        Self {
            quarterly: DayRange::new(80, 100),
            half_year: DayRange::new(170, 190),
            nine_months: DayRange::new(260, 285),
            annual: DayRange::new(350, 380),
            fiscal_year_end_slack_days: 7,
        }
    }
}

impl PeriodPolicy {
    /// Returns the range configured for a bucket.
    #[must_use]
    pub const fn range(&self, bucket: DurationBucket) -> DayRange {
        match bucket {
            DurationBucket::Quarterly => self.quarterly,
            DurationBucket::HalfYear => self.half_year,
            DurationBucket::NineMonths => self.nine_months,
            DurationBucket::Annual => self.annual,
        }
    }

    /// Classifies a duration length; `None` means unclassified.
    #[must_use]
    pub fn classify(&self, days: i64) -> Option<DurationBucket> {
        DurationBucket::ALL
            .into_iter()
            .find(|bucket| self.range(*bucket).contains(days))
    }

    /// Checks that every range is well formed and the ranges are ascending and disjoint.
    pub fn validate(&self) -> Result<()> {
        let ranges = DurationBucket::ALL.map(|b| (b, self.range(b)));
        for (bucket, range) in &ranges {
            if range.min < 1 || range.min > range.max {
                return Err(StatementError::InvalidConfig(format!(
                    "{bucket} range {}..={} is empty or non-positive",
                    range.min, range.max
                )));
            }
        }
        for pair in ranges.windows(2) {
            if pair[0].1.max >= pair[1].1.min {
                return Err(StatementError::InvalidConfig(format!(
                    "{} and {} ranges overlap",
                    pair[0].0, pair[1].0
                )));
            }
        }
        if self.fiscal_year_end_slack_days < 0 {
            return Err(StatementError::InvalidConfig(
                "fiscal_year_end_slack_days must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// Per-filing period selection settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Maximum number of period columns for one filing.
    pub max_periods: usize,
    /// Maximum number of prior fiscal years shown next to the current year.
    pub max_prior_years: usize,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            max_periods: 3,
            max_prior_years: 2,
        }
    }
}

impl SelectionConfig {
    /// Sets the maximum number of periods.
    #[must_use]
    pub const fn with_max_periods(mut self, max_periods: usize) -> Self {
        self.max_periods = max_periods;
        self
    }
}

/// Statement type resolution settings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Minimum confidence for a role to be used as a statement.
    pub min_confidence: f64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            min_confidence: 0.5,
        }
    }
}

/// Single-filing statement builder settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Remove period columns for which no row has a value.
    pub drop_empty_periods: bool,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            drop_empty_periods: true,
        }
    }
}

/// Multi-filing stitching settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StitchConfig {
    /// Maximum number of period columns in the stitched statement.
    pub max_periods: usize,
    /// Apply canonical sibling ordering when merging two or more filings.
    pub semantic_ordering: bool,
}

impl Default for StitchConfig {
    fn default() -> Self {
        Self {
            max_periods: 8,
            semantic_ordering: true,
        }
    }
}

impl StitchConfig {
    /// Sets the maximum number of periods.
    #[must_use]
    pub const fn with_max_periods(mut self, max_periods: usize) -> Self {
        self.max_periods = max_periods;
        self
    }

    /// Enables or disables semantic ordering.
    #[must_use]
    pub const fn with_semantic_ordering(mut self, enabled: bool) -> Self {
        self.semantic_ordering = enabled;
        self
    }
}

/// Complete engine configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Duration classification.
    pub policy: PeriodPolicy,
    /// Period selection.
    pub selection: SelectionConfig,
    /// Role resolution.
    pub resolver: ResolverConfig,
    /// Statement building.
    pub builder: BuilderConfig,
    /// Stitching.
    pub stitch: StitchConfig,
}

impl EngineConfig {
    /// Parses and validates a configuration from JSON; missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the stitching configuration.
    #[must_use]
    pub const fn with_stitch(mut self, stitch: StitchConfig) -> Self {
        self.stitch = stitch;
        self
    }

    /// Sets the selection configuration.
    #[must_use]
    pub const fn with_selection(mut self, selection: SelectionConfig) -> Self {
        self.selection = selection;
        self
    }

    /// Checks every section for out-of-range values.
    pub fn validate(&self) -> Result<()> {
        self.policy.validate()?;
        if self.selection.max_periods == 0 || self.stitch.max_periods == 0 {
            return Err(StatementError::InvalidConfig(
                "max_periods must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.resolver.min_confidence) {
            return Err(StatementError::InvalidConfig(format!(
                "min_confidence {} is outside 0..=1",
                self.resolver.min_confidence
            )));
        }
        Ok(())
    }
}
