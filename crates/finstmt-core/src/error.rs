//! Error types for statement operations.
//!
//! This module defines [`StatementError`]. Business-level gaps such as a missing
//! comparison period or an unresolved role label are never errors; they surface as
//! `None`, empty selections or [`Issue`](crate::diagnostics::Issue)s. Errors are
//! reserved for unparseable input at the boundary and for API contract violations.

use thiserror::Error;

use crate::statement::StatementKind;

/// Errors that can occur while ingesting filings or building statements.
#[derive(Error, Debug)]
pub enum StatementError {
    /// Error parsing serialized input.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A date string could not be parsed.
    #[error("Invalid date {value:?}: {reason}")]
    InvalidDate {
        /// The offending input.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A `decimals` attribute was neither an integer nor `INF`.
    #[error("Invalid decimals attribute: {0:?}")]
    InvalidDecimals(String),

    /// A concept identifier had no namespace prefix or an empty local name.
    #[error("Invalid concept identifier: {0:?}")]
    InvalidConcept(String),

    /// A fiscal period label was not one of FY, Q1-Q4.
    #[error("Invalid fiscal period: {0:?}")]
    InvalidFiscalPeriod(String),

    /// A statement label pattern failed to compile.
    #[error("Invalid label pattern {pattern:?}: {reason}")]
    InvalidPattern {
        /// The pattern source.
        pattern: String,
        /// Compiler message.
        reason: String,
    },

    /// A configuration value is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Statements of different kinds were passed to an operation that requires one kind.
    #[error("Statement kind mismatch: expected {expected}, found {found}")]
    KindMismatch {
        /// Kind of the first statement.
        expected: StatementKind,
        /// Kind of the offending statement.
        found: StatementKind,
    },

    /// An operation that merges statements was called with none.
    #[error("No statements to merge")]
    NoStatements,

    /// Error converting a statement to another representation.
    #[error("Export error: {0}")]
    Export(String),
}

impl From<serde_json::Error> for StatementError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// Result type alias using [`StatementError`].
pub type Result<T> = std::result::Result<T, StatementError>;
