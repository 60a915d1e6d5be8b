#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/finstmt/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core types for XBRL fact models and financial statements.
//!
//! This crate provides the foundational abstractions used across the workspace:
//!
//! - [`Concept`](types::Concept), [`Context`](types::Context), [`Fact`](types::Fact) - the fact model
//! - [`Period`](types::Period) and [`FiscalMetadata`](fiscal::FiscalMetadata) - time and fiscal calendar
//! - [`Statement`](statement::Statement) - the statement output model
//! - [`FilingBundle`](raw::FilingBundle) - raw records accepted from an upstream parser
//! - [`EngineConfig`](config::EngineConfig) - selection, resolution and stitching policy
//! - [`Diagnostics`](diagnostics::Diagnostics) - non-fatal issues raised while processing

/// Engine configuration.
pub mod config;
/// Non-fatal processing issues.
pub mod diagnostics;
/// Error types.
pub mod error;
/// Fiscal calendar and period classification types.
pub mod fiscal;
/// Raw input records.
pub mod raw;
/// Statement output model.
pub mod statement;
/// Fact model types (Concept, Unit, Period, Context, Fact).
pub mod types;

// Re-export commonly used items at crate root
pub use config::{
    BuilderConfig, DayRange, EngineConfig, PeriodPolicy, ResolverConfig, SelectionConfig,
    StitchConfig,
};
pub use diagnostics::{Diagnostics, Issue, IssueKind};
pub use error::{Result, StatementError};
pub use fiscal::{DurationBucket, FilingInfo, FiscalMetadata, FiscalPeriod, FiscalYearEnd, PeriodType};
pub use raw::{
    FilingBundle, RawContext, RawDecimals, RawFact, RawFilingMetadata, RawPeriod, RawPresentation, RawRow,
    RawUnit, Record, Rejected,
};
pub use statement::{FilingStatement, PeriodDescriptor, Statement, StatementKind, StatementRow};
pub use types::{Concept, Context, Dimension, Fact, Period, Precision, Unit, UnitKind};
