#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/finstmt/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Standardized financial statements from XBRL filing data.
//!
//! This crate re-exports the domain types and the building blocks of each stage,
//! and provides a [`StatementPipeline`] that ingests filings and produces
//! single-filing and stitched statements.
//!
//! # Features
//!
//! - `frame` - polars DataFrame export of statements
//!
//! # Example
//!
//! ```
//! use finstmt::{EngineConfig, StatementKind, StatementPipeline};
//!
//! let mut pipeline = StatementPipeline::new(EngineConfig::default()).unwrap();
//! pipeline
//!     .add_json(r#"{"accession": "0001", "metadata": {"document_period_end_date": "2024-12-31"}}"#)
//!     .unwrap();
//!
//! assert_eq!(pipeline.len(), 1);
//! assert!(pipeline.filing_statement("0001", StatementKind::BalanceSheet).is_none());
//! ```

// Core types
pub use finstmt_core::*;

// Stages
pub use finstmt_facts::{ContextModel, FactStore, Filing, PeriodInfo, Presentation, PresentationRow};
pub use finstmt_periods::PeriodSelector;
pub use finstmt_statements::{Resolution, StatementBuilder, StatementTypeResolver};
pub use finstmt_stitch::{StatementStitcher, StitchedStatement};

#[cfg(feature = "frame")]
pub use finstmt_frame::{periods_to_frame, statement_to_frame};

mod pipeline;
pub use pipeline::{BuiltStatement, StatementPipeline};
