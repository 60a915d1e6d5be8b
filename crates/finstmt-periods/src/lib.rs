#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/finstmt/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Period selection for financial statements.
//!
//! # Example
//!
//! ```
//! use finstmt_core::{FiscalMetadata, FiscalPeriod, FiscalYearEnd, Period, PeriodPolicy, StatementKind};
//! use finstmt_facts::PeriodInfo;
//! use finstmt_periods::PeriodSelector;
//!
//! let fiscal = FiscalMetadata {
//!     document_period_end_date: chrono::NaiveDate::from_ymd_opt(2024, 12, 31),
//!     fiscal_year_end: Some(FiscalYearEnd::new(12, 31).unwrap()),
//!     fiscal_period_focus: FiscalPeriod::FY,
//!     fiscal_year_focus: Some(2024),
//! };
//! let periods: Vec<PeriodInfo> = ["2024-12-31", "2025-01-01", "2023-12-31"]
//!     .into_iter()
//!     .map(|d| PeriodInfo::classify(Period::parse_instant(d).unwrap(), &fiscal, &PeriodPolicy::default()))
//!     .collect();
//!
//! let selected = PeriodSelector::default().select(&periods, &fiscal, StatementKind::BalanceSheet, 3);
//! assert_eq!(selected.len(), 2);
//! assert_eq!(selected[0].period, Period::parse_instant("2024-12-31").unwrap());
//! ```

/// Fiscal alignment scoring.
pub mod alignment;
/// Period selection.
pub mod selector;

pub use alignment::alignment_score;
pub use selector::{Column, PeriodSelector};
