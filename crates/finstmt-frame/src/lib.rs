#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/finstmt/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! DataFrame export.
//!
//! # Example
//!
//! ```
//! use finstmt_core::{Statement, StatementKind};
//! use finstmt_frame::statement_to_frame;
//!
//! let df = statement_to_frame(&Statement::new(StatementKind::IncomeStatement)).unwrap();
//! assert_eq!(df.width(), 6);
//! ```

/// Statement to DataFrame conversion.
pub mod export;

pub use export::{ROW_COLUMNS, periods_to_frame, statement_to_frame};
