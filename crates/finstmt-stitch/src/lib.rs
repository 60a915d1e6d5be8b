#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/finstmt/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Multi-filing statement stitching.
//!
//! # Example
//!
//! ```
//! use finstmt_core::{FilingInfo, FilingStatement, Statement, StatementKind, StitchConfig};
//! use finstmt_stitch::StatementStitcher;
//!
//! let older = FilingStatement::new(FilingInfo::new("A"), Statement::new(StatementKind::IncomeStatement));
//! let newer = FilingStatement::new(FilingInfo::new("B"), Statement::new(StatementKind::IncomeStatement));
//!
//! let stitched = StatementStitcher::new(StitchConfig::default())
//!     .stitch(&[older, newer])
//!     .unwrap();
//! assert_eq!(stitched.filings, ["B", "A"]);
//! assert!(stitched.statement.is_empty());
//! ```

/// Canonical line-item ordering.
pub mod ordering;
/// Statement stitching.
pub mod stitcher;
/// Presentation trees rebuilt from indentation levels.
pub mod tree;

pub use ordering::{UNRANKED, priority};
pub use stitcher::{StatementStitcher, StitchedStatement};
pub use tree::PresentationTree;
