#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/finstmt/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Fact store and context model for XBRL filings.
//!
//! - [`ContextModel`] - typed contexts with duration buckets and fiscal labels
//! - [`FactStore`] - all reported facts, resolved by precision on read
//! - [`Filing`] - one ingested filing: metadata, contexts, facts, presentation roles
//!
//! # Example
//!
//! ```
//! use finstmt_core::{FilingBundle, PeriodPolicy};
//! use finstmt_facts::Filing;
//!
//! let bundle = FilingBundle::from_json(r#"{"accession": "0000000000-24-000001"}"#).unwrap();
//! let filing = Filing::from_bundle(bundle, &PeriodPolicy::default());
//! assert!(filing.facts().is_empty());
//! ```

/// Context and period model.
pub mod context;
/// Filing ingestion.
pub mod filing;
/// Fact store.
pub mod store;

pub use context::{ContextEntry, ContextModel, PeriodInfo};
pub use filing::{Filing, Presentation, PresentationRow};
pub use store::{FactStore, ResolvedFact, resolve};
