#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/finstmt/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Statement type resolution and single-filing statement building.
//!
//! - [`StatementTypeResolver`] - scored mapping from role labels to [`StatementKind`](finstmt_core::StatementKind)
//! - [`StatementBuilder`] - rows x selected periods x resolved values for one filing
//!
//! # Example
//!
//! ```
//! use finstmt_core::StatementKind;
//! use finstmt_statements::StatementTypeResolver;
//!
//! let resolver = StatementTypeResolver::new().unwrap();
//! let resolution = resolver.resolve("http://www.apple.com/role/CONSOLIDATEDSTATEMENTSOFOPERATIONS");
//! assert_eq!(resolution.kind, StatementKind::IncomeStatement);
//! assert_eq!(resolution.confidence, 1.0);
//! ```

/// Single-filing statement building.
pub mod builder;
/// Role label patterns.
pub mod patterns;
/// Statement type resolution.
pub mod resolver;

pub use builder::StatementBuilder;
pub use patterns::{DEFAULT_PATTERNS, PatternTable, normalize_label};
pub use resolver::{Resolution, StatementTypeResolver};
