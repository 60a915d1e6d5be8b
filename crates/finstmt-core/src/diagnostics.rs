//! Non-fatal processing issues.
//!
//! Malformed records, conflicting duplicate facts and presentation drift between
//! filings never abort processing. They are resolved by fixed precedence rules,
//! logged, and collected in [`Diagnostics`] so callers can inspect what happened.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

use crate::types::Concept;

/// Category of an [`Issue`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssueKind {
    /// Several candidates existed and one was chosen by precedence.
    Ambiguity,
    /// A concept's presentation position differs between stitched filings.
    StructuralDrift,
    /// A record could not be interpreted and was skipped.
    Malformed,
}

/// A single non-fatal issue.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Issue {
    /// Duplicate facts for one key disagree on value; the most precise was used.
    Ambiguity {
        /// Filing the facts belong to.
        filing: String,
        /// Concept reported.
        concept: Concept,
        /// Context of the duplicates.
        context: String,
        /// Number of candidate facts.
        candidates: usize,
        /// Instance id of the fact that was used.
        chosen: String,
    },
    /// A concept moved in the presentation hierarchy between filings.
    StructuralDrift {
        /// Concept that moved.
        concept: Concept,
        /// Filing whose position was kept.
        kept_filing: String,
        /// Level in the kept filing.
        kept_level: u32,
        /// Filing whose position was overridden.
        other_filing: String,
        /// Level in the overridden filing.
        other_level: u32,
    },
    /// A record was skipped.
    Malformed {
        /// Filing the record belongs to.
        filing: String,
        /// Concept id, when the record names one.
        concept: Option<String>,
        /// Context id, when the record names one.
        context: Option<String>,
        /// What was wrong.
        reason: String,
    },
}

impl Issue {
    /// Returns the issue category.
    #[must_use]
    pub const fn kind(&self) -> IssueKind {
        match self {
            Self::Ambiguity { .. } => IssueKind::Ambiguity,
            Self::StructuralDrift { .. } => IssueKind::StructuralDrift,
            Self::Malformed { .. } => IssueKind::Malformed,
        }
    }

    /// Creates a malformed-record issue.
    #[must_use]
    pub fn malformed(
        filing: impl Into<String>,
        concept: Option<&str>,
        context: Option<&str>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Malformed {
            filing: filing.into(),
            concept: concept.map(str::to_string),
            context: context.map(str::to_string),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ambiguity {
                filing,
                concept,
                context,
                candidates,
                chosen,
            } => write!(
                f,
                "{filing}: {candidates} conflicting facts for {concept} in {context}, used {chosen}"
            ),
            Self::StructuralDrift {
                concept,
                kept_filing,
                kept_level,
                other_filing,
                other_level,
            } => write!(
                f,
                "{concept} at level {kept_level} in {kept_filing} but level {other_level} in {other_filing}"
            ),
            Self::Malformed {
                filing,
                concept,
                context,
                reason,
            } => write!(
                f,
                "{filing}: skipped record (concept {}, context {}): {reason}",
                concept.as_deref().unwrap_or("-"),
                context.as_deref().unwrap_or("-")
            ),
        }
    }
}

/// Ordered collection of issues.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostics {
    issues: Vec<Issue>,
}

impl Diagnostics {
    /// Creates an empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self { issues: Vec::new() }
    }

    /// Records and logs an issue.
    pub fn push(&mut self, issue: Issue) {
        match issue.kind() {
            IssueKind::Ambiguity => debug!(issue = %issue, "Resolved ambiguous facts by precision"),
            IssueKind::StructuralDrift => warn!(issue = %issue, "Structural drift between filings"),
            IssueKind::Malformed => warn!(issue = %issue, "Skipped malformed record"),
        }
        self.issues.push(issue);
    }

    /// Moves all issues from `other` into this collection without logging them again.
    pub fn extend(&mut self, other: Self) {
        self.issues.extend(other.issues);
    }

    /// Returns the number of issues.
    #[must_use]
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Returns true when there are no issues.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Returns an iterator over the issues.
    pub fn iter(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter()
    }

    /// Returns the issues of one category.
    pub fn of_kind(&self, kind: IssueKind) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(move |i| i.kind() == kind)
    }
}

impl IntoIterator for Diagnostics {
    type Item = Issue;
    type IntoIter = std::vec::IntoIter<Issue>;

    fn into_iter(self) -> Self::IntoIter {
        self.issues.into_iter()
    }
}
