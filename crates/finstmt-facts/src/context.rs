//! Context and period model.
//!
//! Turns raw context records into typed [`Context`]s and derives, once per distinct
//! period, its duration bucket and fiscal labels ([`PeriodInfo`]). Fiscal labels come
//! from the filer's disclosed fiscal-year end; nothing is inferred when it is absent.

use std::collections::HashMap;

use finstmt_core::{
    Context, Diagnostics, Dimension, DurationBucket, FiscalMetadata, FiscalPeriod, Issue, Period,
    PeriodDescriptor, PeriodPolicy, PeriodType, RawContext, RawPeriod, Result,
};
use tracing::debug;

/// A period with its derived classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PeriodInfo {
    /// The period.
    pub period: Period,
    /// `end - start` for durations.
    pub duration_days: Option<i64>,
    /// Duration bucket; `None` for instants and unclassified durations.
    pub bucket: Option<DurationBucket>,
    /// Fiscal year, when the fiscal-year end is disclosed.
    pub fiscal_year: Option<i32>,
    /// Fiscal period label.
    pub fiscal_period: FiscalPeriod,
}

impl PeriodInfo {
    /// Classifies a period under a policy and the filing's fiscal metadata.
    #[must_use]
    pub fn classify(period: Period, fiscal: &FiscalMetadata, policy: &PeriodPolicy) -> Self {
        let duration_days = period.duration_days();
        let bucket = duration_days.and_then(|days| policy.classify(days));
        let slack = policy.fiscal_year_end_slack_days;
        let end = period.end();

        let (fiscal_year, fiscal_period) = match fiscal.fiscal_year_end {
            None => (None, FiscalPeriod::Unknown),
            Some(fye) => {
                let quarter = || {
                    fye.quarter_of(end, slack)
                        .map_or(FiscalPeriod::Unknown, FiscalPeriod::from_quarter)
                };
                let label = match (period.period_type(), bucket) {
                    (PeriodType::Instant, _) if fye.is_year_end(end, slack) => FiscalPeriod::FY,
                    (PeriodType::Instant, _) => quarter(),
                    (PeriodType::Duration, Some(DurationBucket::Annual)) => FiscalPeriod::FY,
                    (PeriodType::Duration, Some(DurationBucket::Quarterly)) => quarter(),
                    (PeriodType::Duration, Some(DurationBucket::HalfYear)) => FiscalPeriod::Q2,
                    (PeriodType::Duration, Some(DurationBucket::NineMonths)) => FiscalPeriod::Q3,
                    (PeriodType::Duration, None) => FiscalPeriod::Unknown,
                };
                (fye.fiscal_year_of(end, slack), label)
            }
        };

        Self {
            period,
            duration_days,
            bucket,
            fiscal_year,
            fiscal_period,
        }
    }

    /// Returns true for durations that fall outside every bucket.
    #[must_use]
    pub const fn is_unclassified(&self) -> bool {
        self.duration_days.is_some() && self.bucket.is_none()
    }

    /// Returns the display label for this period.
    #[must_use]
    pub fn label(&self) -> String {
        let Some(year) = self.fiscal_year else {
            return self.period.to_string();
        };
        match (self.period, self.bucket) {
            (Period::Instant(date), _) => date.to_string(),
            (_, Some(DurationBucket::Annual)) => format!("FY {year}"),
            (_, Some(DurationBucket::Quarterly)) => format!("{} {year}", self.fiscal_period),
            (_, Some(DurationBucket::HalfYear)) => format!("Q2 YTD {year}"),
            (_, Some(DurationBucket::NineMonths)) => format!("Q3 YTD {year}"),
            (period, None) => period.to_string(),
        }
    }

    /// Converts to the statement column descriptor.
    #[must_use]
    pub fn descriptor(&self) -> PeriodDescriptor {
        PeriodDescriptor {
            period: self.period,
            label: self.label(),
            fiscal_year: self.fiscal_year,
            fiscal_period: self.fiscal_period,
            bucket: self.bucket,
        }
    }
}

/// One typed context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContextEntry {
    /// Context identifier within the filing.
    pub id: String,
    /// Typed context.
    pub context: Context,
}

/// All contexts of one filing, plus the classification of each distinct period.
#[derive(Clone, Debug, Default)]
pub struct ContextModel {
    entries: HashMap<String, ContextEntry>,
    periods: HashMap<Period, PeriodInfo>,
    period_order: Vec<Period>,
}

impl ContextModel {
    /// Creates an empty model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the model from raw contexts, skipping malformed ones.
    pub fn from_raw(
        raw: &[RawContext],
        fiscal: &FiscalMetadata,
        policy: &PeriodPolicy,
        filing: &str,
        diagnostics: &mut Diagnostics,
    ) -> Self {
        let mut model = Self::new();
        for record in raw {
            let period = match parse_period(&record.period) {
                Ok(period) => period,
                Err(e) => {
                    diagnostics.push(Issue::malformed(
                        filing,
                        None,
                        Some(record.context_id.as_str()),
                        e.to_string(),
                    ));
                    continue;
                }
            };

            let dimensions = record
                .dimensions
                .iter()
                .map(|(axis, member)| Dimension::new(axis.as_str(), member.as_str()))
                .collect();
            let context = Context::new(record.entity_id.as_str(), period, dimensions);
            let info = PeriodInfo::classify(period, fiscal, policy);

            if !model.insert(record.context_id.as_str(), context, info) {
                diagnostics.push(Issue::malformed(
                    filing,
                    None,
                    Some(record.context_id.as_str()),
                    "duplicate context id",
                ));
            }
        }
        debug!(
            filing = %filing,
            contexts = model.len(),
            periods = model.period_order.len(),
            "Built context model"
        );
        model
    }

    /// Adds a context. Returns false, leaving the model unchanged, when the id is taken.
    pub fn insert(&mut self, id: impl Into<String>, context: Context, info: PeriodInfo) -> bool {
        let id = id.into();
        if self.entries.contains_key(&id) {
            return false;
        }
        if !self.periods.contains_key(&context.period) {
            self.period_order.push(context.period);
            self.periods.insert(context.period, info);
        }
        self.entries.insert(id.clone(), ContextEntry { id, context });
        true
    }

    /// Looks up a context by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ContextEntry> {
        self.entries.get(id)
    }

    /// Returns the classification of a period.
    #[must_use]
    pub fn period_info(&self, period: &Period) -> Option<&PeriodInfo> {
        self.periods.get(period)
    }

    /// Returns every distinct period, in first-seen order.
    #[must_use]
    pub fn periods(&self) -> Vec<PeriodInfo> {
        self.period_order
            .iter()
            .filter_map(|p| self.periods.get(p).copied())
            .collect()
    }

    /// Returns the number of contexts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when there are no contexts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn parse_period(raw: &RawPeriod) -> Result<Period> {
    match raw {
        RawPeriod::Instant(date) => Period::parse_instant(date),
        RawPeriod::Duration { start, end } => Period::parse_duration(start, end),
    }
}
