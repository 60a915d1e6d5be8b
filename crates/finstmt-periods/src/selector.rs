//! Period selection.
//!
//! Given one filing's classified periods and its fiscal metadata, [`PeriodSelector`]
//! picks the ordered set of columns a statement shows:
//!
//! 1. Keep periods of the statement's period type; drop unclassified durations.
//! 2. The current period must end exactly on the document period end date.
//! 3. Balance sheet: the current instant plus one comparison instant (the prior
//!    fiscal-year end for annual reports, otherwise the most recent earlier instant).
//! 4. Durations, routed by fiscal period focus: `FY` takes the current annual period
//!    and up to `max_prior_years` earlier annual periods ranked by fiscal alignment;
//!    `Q1`..`Q4` take the current quarter plus the year-to-date period of that quarter.
//! 5. Without a document date, the most recent period of each bucket stands in for
//!    the current one.
//! 6. Deduplicate on (end date, bucket), sort by end date descending, truncate.
//!
//! An empty selection is a valid result; nothing is guessed.

use std::cmp::{Ordering, Reverse};
use std::collections::HashSet;

use chrono::NaiveDate;
use finstmt_core::{
    DurationBucket, FiscalMetadata, FiscalPeriod, Period, PeriodDescriptor, PeriodPolicy, PeriodType,
    SelectionConfig, StatementKind,
};
use finstmt_facts::PeriodInfo;
use tracing::debug;

use crate::alignment::{alignment_score, one_year_before};

/// A selectable column: anything with a period and a bucket.
pub trait Column: Clone {
    /// The period.
    fn period(&self) -> &Period;
    /// The duration bucket, `None` for instants.
    fn bucket(&self) -> Option<DurationBucket>;
}

impl Column for PeriodInfo {
    fn period(&self) -> &Period {
        &self.period
    }

    fn bucket(&self) -> Option<DurationBucket> {
        self.bucket
    }
}

impl Column for PeriodDescriptor {
    fn period(&self) -> &Period {
        &self.period
    }

    fn bucket(&self) -> Option<DurationBucket> {
        self.bucket
    }
}

/// Fiscal-aware period selector.
#[derive(Clone, Copy, Debug)]
pub struct PeriodSelector {
    config: SelectionConfig,
    slack_days: i64,
}

impl Default for PeriodSelector {
    fn default() -> Self {
        Self::new(SelectionConfig::default(), &PeriodPolicy::default())
    }
}

impl PeriodSelector {
    /// Creates a selector.
    ///
    /// A 52/53-week prior year end may sit up to the policy's
    /// `fiscal_year_end_slack_days` from the exact anniversary.
    #[must_use]
    pub const fn new(config: SelectionConfig, policy: &PeriodPolicy) -> Self {
        Self {
            config,
            slack_days: policy.fiscal_year_end_slack_days,
        }
    }

    /// Returns the selection settings.
    #[must_use]
    pub const fn config(&self) -> &SelectionConfig {
        &self.config
    }

    /// Selects at most `max_periods` columns from one filing's periods.
    #[must_use]
    pub fn select(
        &self,
        periods: &[PeriodInfo],
        fiscal: &FiscalMetadata,
        kind: StatementKind,
        max_periods: usize,
    ) -> Vec<PeriodInfo> {
        let wanted = kind.period_type();
        let candidates: Vec<&PeriodInfo> = periods
            .iter()
            .filter(|p| p.period.period_type() == wanted && !p.is_unclassified())
            .collect();

        let selected = match wanted {
            PeriodType::Instant => self.select_instants(&candidates, fiscal),
            PeriodType::Duration => match fiscal.fiscal_period_focus {
                FiscalPeriod::FY => self.select_annual(&candidates, fiscal),
                focus => select_interim(&candidates, fiscal, focus),
            },
        };

        let selected = finalize(selected, max_periods);
        debug!(
            kind = %kind,
            focus = %fiscal.fiscal_period_focus,
            candidates = candidates.len(),
            selected = selected.len(),
            "Selected periods"
        );
        selected
    }

    /// Merges per-filing selections for a stitched statement.
    ///
    /// `selections` must be ordered newest filing first. Only buckets present in the
    /// newest non-empty selection are kept, so an annual report is never stitched with
    /// quarterly columns from older interim filings. On duplicate (end, bucket) the
    /// newest filing's descriptor is kept.
    #[must_use]
    pub fn select_across<'a, I>(
        &self,
        selections: I,
        kind: StatementKind,
        max_periods: usize,
    ) -> Vec<PeriodDescriptor>
    where
        I: IntoIterator<Item = &'a [PeriodDescriptor]>,
    {
        let wanted = kind.period_type();
        let mut allowed: Option<HashSet<Option<DurationBucket>>> = None;
        let mut pool = Vec::new();

        for selection in selections {
            let typed: Vec<&PeriodDescriptor> = selection
                .iter()
                .filter(|d| d.period.period_type() == wanted)
                .collect();
            if allowed.is_none() && !typed.is_empty() {
                allowed = Some(typed.iter().map(|d| d.bucket).collect());
            }
            pool.extend(typed.into_iter().cloned());
        }

        let Some(allowed) = allowed else {
            return Vec::new();
        };
        pool.retain(|d| allowed.contains(&d.bucket));
        finalize(pool, max_periods)
    }

    fn select_instants(&self, candidates: &[&PeriodInfo], fiscal: &FiscalMetadata) -> Vec<PeriodInfo> {
        let current_end = match fiscal.document_period_end_date {
            Some(date) => date,
            None => match candidates.iter().map(|p| p.period.end()).max() {
                Some(date) => date,
                None => return Vec::new(),
            },
        };
        let Some(current) = candidates.iter().copied().find(|p| p.period.end() == current_end) else {
            debug!(document_date = %current_end, "No instant matches the document date");
            return Vec::new();
        };

        let comparison = if fiscal.is_annual() {
            self.prior_year_end(candidates, current_end, fiscal)
        } else {
            candidates
                .iter()
                .copied()
                .filter(|p| p.period.end() < current_end)
                .max_by_key(|p| p.period.end())
        };

        std::iter::once(current).chain(comparison).copied().collect()
    }

    /// The prior fiscal-year-end instant: the exact anniversary if reported, else the
    /// nearest fiscal-year end within the slack window.
    fn prior_year_end<'a>(
        &self,
        candidates: &[&'a PeriodInfo],
        current_end: NaiveDate,
        fiscal: &FiscalMetadata,
    ) -> Option<&'a PeriodInfo> {
        let anniversary = one_year_before(current_end);
        candidates
            .iter()
            .copied()
            .filter(|p| p.period.end() < current_end)
            .filter(|p| (p.period.end() - anniversary).num_days().abs() <= self.slack_days)
            .filter(|p| {
                fiscal
                    .fiscal_year_end
                    .is_none_or(|fye| fye.is_year_end(p.period.end(), self.slack_days))
            })
            .min_by_key(|p| {
                let distance = (p.period.end() - anniversary).num_days().abs();
                (distance, Reverse(p.period.end()))
            })
    }

    fn select_annual(&self, candidates: &[&PeriodInfo], fiscal: &FiscalMetadata) -> Vec<PeriodInfo> {
        let annual: Vec<&PeriodInfo> = candidates
            .iter()
            .copied()
            .filter(|p| p.bucket == Some(DurationBucket::Annual))
            .collect();

        let current = match fiscal.document_period_end_date {
            Some(date) => best(annual.iter().copied().filter(|p| p.period.end() == date)),
            None => best(annual.iter().copied()),
        };
        let Some(current) = current else {
            debug!("No annual period matches the document date");
            return Vec::new();
        };

        let reference = current.period.end();
        let current_start = current.period.start().unwrap_or(reference);
        let mut priors: Vec<(u8, &PeriodInfo)> = annual
            .iter()
            .copied()
            .filter(|p| p.period.end() < current_start)
            .map(|p| (alignment_score(reference, p.period.end()), p))
            .filter(|(score, _)| *score > 0)
            .collect();
        priors.sort_by(|(sa, a), (sb, b)| sb.cmp(sa).then_with(|| column_order(*a, *b)));

        let mut seen = HashSet::new();
        let mut selected = vec![*current];
        selected.extend(
            priors
                .into_iter()
                .filter(|(_, p)| seen.insert(p.period.end()))
                .take(self.config.max_prior_years)
                .map(|(_, p)| *p),
        );
        selected
    }
}

fn select_interim(candidates: &[&PeriodInfo], fiscal: &FiscalMetadata, focus: FiscalPeriod) -> Vec<PeriodInfo> {
    let buckets: &[DurationBucket] = match focus {
        FiscalPeriod::Q1 => &[DurationBucket::Quarterly],
        FiscalPeriod::Q2 => &[DurationBucket::Quarterly, DurationBucket::HalfYear],
        FiscalPeriod::Q3 => &[DurationBucket::Quarterly, DurationBucket::NineMonths],
        FiscalPeriod::Q4 => &[DurationBucket::Quarterly, DurationBucket::Annual],
        FiscalPeriod::FY | FiscalPeriod::Unknown => &DurationBucket::ALL,
    };

    let anchor = match (fiscal.document_period_end_date, focus) {
        (Some(date), _) => Some(date),
        // Unknown focus without a date: every bucket at the latest end date.
        (None, FiscalPeriod::Unknown) => candidates.iter().map(|p| p.period.end()).max(),
        (None, _) => None,
    };

    buckets
        .iter()
        .filter_map(|bucket| {
            let in_bucket = candidates.iter().copied().filter(|p| p.bucket == Some(*bucket));
            match anchor {
                Some(date) => best(in_bucket.filter(|p| p.period.end() == date)),
                None => best(in_bucket),
            }
        })
        .copied()
        .collect()
}

/// The most recent period; among equal end dates, the shortest.
fn best<'a>(periods: impl Iterator<Item = &'a PeriodInfo>) -> Option<&'a PeriodInfo> {
    periods.min_by(|a, b| column_order(*a, *b))
}

/// Column order: end date descending, then shorter duration first.
fn column_order<C: Column>(a: &C, b: &C) -> Ordering {
    b.period()
        .end()
        .cmp(&a.period().end())
        .then_with(|| a.period().duration_days().cmp(&b.period().duration_days()))
}

fn finalize<C: Column>(mut columns: Vec<C>, max_periods: usize) -> Vec<C> {
    columns.sort_by(column_order);
    let mut seen = HashSet::new();
    columns.retain(|c| seen.insert((c.period().end(), c.bucket())));
    columns.truncate(max_periods);
    columns
}
