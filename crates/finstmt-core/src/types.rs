//! Fact model types.
//!
//! This module defines the data structures an XBRL instance is reduced to:
//!
//! - [`Concept`] - Namespaced taxonomy element (`us-gaap:Revenues`)
//! - [`Unit`] - Measurement unit attached to numeric facts
//! - [`Period`] - Instant or duration
//! - [`Context`] - Entity, period and dimensional qualifiers a fact is reported against
//! - [`Precision`] - The `decimals` precision indicator
//! - [`Fact`] - A single reported value

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, StatementError};
use crate::fiscal::PeriodType;

/// A namespaced taxonomy element identifier.
///
/// Concepts are the cross-filing identity of a line item: labels vary between
/// filings, concepts do not. Parsed from `prefix:Name` or the linkbase locator
/// form `prefix_Name`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Concept {
    prefix: String,
    name: String,
}

impl Concept {
    /// Creates a concept from its namespace prefix and local name.
    #[must_use]
    pub fn new(prefix: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            name: name.into(),
        }
    }

    /// Returns the namespace prefix (e.g. `us-gaap`).
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns the local element name (e.g. `Revenues`).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Concept {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.prefix, self.name)
    }
}

impl FromStr for Concept {
    type Err = StatementError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (prefix, name) = s
            .split_once(':')
            .or_else(|| s.split_once('_'))
            .ok_or_else(|| StatementError::InvalidConcept(s.to_string()))?;

        if prefix.is_empty() || name.is_empty() {
            return Err(StatementError::InvalidConcept(s.to_string()));
        }

        Ok(Self::new(prefix, name))
    }
}

impl TryFrom<String> for Concept {
    type Error = StatementError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Concept> for String {
    fn from(concept: Concept) -> Self {
        concept.to_string()
    }
}

/// Classification of a measurement unit.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitKind {
    /// Monetary amount in an ISO 4217 currency.
    Currency(String),
    /// Share count.
    Shares,
    /// Pure number (ratios, percentages).
    Pure,
    /// Currency per share (EPS, dividends per share).
    PerShare(String),
    /// Anything else, kept verbatim.
    Other(String),
}

impl UnitKind {
    /// Classifies a unit from its numerator measure and optional denominator measure.
    #[must_use]
    pub fn from_measures(numerator: &str, denominator: Option<&str>) -> Self {
        let local = |m: &str| m.rsplit(':').next().unwrap_or(m).to_string();
        let is_currency = |m: &str| m.starts_with("iso4217:");

        match denominator {
            Some(den) if is_currency(numerator) && local(den).eq_ignore_ascii_case("shares") => {
                Self::PerShare(local(numerator))
            }
            Some(den) => Self::Other(format!("{}/{}", local(numerator), local(den))),
            None if is_currency(numerator) => Self::Currency(local(numerator)),
            None => match local(numerator).to_ascii_lowercase().as_str() {
                "shares" => Self::Shares,
                "pure" => Self::Pure,
                _ => Self::Other(local(numerator)),
            },
        }
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Currency(code) | Self::Other(code) => write!(f, "{code}"),
            Self::Shares => write!(f, "shares"),
            Self::Pure => write!(f, "pure"),
            Self::PerShare(code) => write!(f, "{code}/shares"),
        }
    }
}

/// A measurement unit declared by a filing.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Unit {
    /// Unit identifier as referenced by facts (e.g. `usd`, `U_USD`).
    pub id: String,
    /// What the unit measures.
    pub kind: UnitKind,
}

impl Unit {
    /// Creates a new unit.
    #[must_use]
    pub fn new(id: impl Into<String>, kind: UnitKind) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }
}

/// A reporting period: a point in time or a date range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    /// Point in time (balance sheet items).
    Instant(NaiveDate),
    /// Date range (flow items).
    Duration {
        /// First day of the period.
        start: NaiveDate,
        /// Last day of the period.
        end: NaiveDate,
    },
}

impl Period {
    /// Parses an instant period from a date string.
    pub fn parse_instant(date: &str) -> Result<Self> {
        Ok(Self::Instant(parse_date(date)?))
    }

    /// Parses a duration period, rejecting ranges that end before they start.
    pub fn parse_duration(start: &str, end: &str) -> Result<Self> {
        let start_date = parse_date(start)?;
        let end_date = parse_date(end)?;
        if end_date < start_date {
            return Err(StatementError::InvalidDate {
                value: format!("{start}..{end}"),
                reason: "period ends before it starts".to_string(),
            });
        }
        Ok(Self::Duration {
            start: start_date,
            end: end_date,
        })
    }

    /// Returns the end date (the date itself for instants).
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        match self {
            Self::Instant(date) => *date,
            Self::Duration { end, .. } => *end,
        }
    }

    /// Returns the start date for durations.
    #[must_use]
    pub const fn start(&self) -> Option<NaiveDate> {
        match self {
            Self::Instant(_) => None,
            Self::Duration { start, .. } => Some(*start),
        }
    }

    /// Returns true for instant periods.
    #[must_use]
    pub const fn is_instant(&self) -> bool {
        matches!(self, Self::Instant(_))
    }

    /// Returns the period type.
    #[must_use]
    pub const fn period_type(&self) -> PeriodType {
        match self {
            Self::Instant(_) => PeriodType::Instant,
            Self::Duration { .. } => PeriodType::Duration,
        }
    }

    /// Returns `end - start` in days for durations.
    #[must_use]
    pub fn duration_days(&self) -> Option<i64> {
        match self {
            Self::Instant(_) => None,
            Self::Duration { start, end } => Some(end.signed_duration_since(*start).num_days()),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Instant(date) => write!(f, "{date}"),
            Self::Duration { start, end } => write!(f, "{start}..{end}"),
        }
    }
}

/// Parses an XBRL date, tolerating a trailing time component.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    let trimmed = value.trim();
    let date_part = trimmed.split('T').next().unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").map_err(|e| StatementError::InvalidDate {
        value: value.to_string(),
        reason: e.to_string(),
    })
}

/// A single (axis, member) dimensional qualifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Dimension {
    /// Dimension axis (e.g. `us-gaap:StatementBusinessSegmentsAxis`).
    pub axis: String,
    /// Member on that axis.
    pub member: String,
}

impl Dimension {
    /// Creates a new dimension qualifier.
    #[must_use]
    pub fn new(axis: impl Into<String>, member: impl Into<String>) -> Self {
        Self {
            axis: axis.into(),
            member: member.into(),
        }
    }
}

/// The (entity, period, dimensions) tuple a fact is reported against.
///
/// Dimensions are kept sorted so that two contexts declaring the same
/// qualifiers in a different order compare equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Context {
    /// Entity identifier (usually a CIK).
    pub entity: String,
    /// Reporting period.
    pub period: Period,
    /// Dimensional qualifiers; empty for the base context.
    pub dimensions: Vec<Dimension>,
}

impl Context {
    /// Creates a context, normalizing dimension order.
    #[must_use]
    pub fn new(entity: impl Into<String>, period: Period, mut dimensions: Vec<Dimension>) -> Self {
        dimensions.sort();
        dimensions.dedup();
        Self {
            entity: entity.into(),
            period,
            dimensions,
        }
    }

    /// Creates an undimensioned context.
    #[must_use]
    pub fn base(entity: impl Into<String>, period: Period) -> Self {
        Self::new(entity, period, Vec::new())
    }

    /// Returns true when the context carries no dimensional qualifiers.
    #[must_use]
    pub fn is_base(&self) -> bool {
        self.dimensions.is_empty()
    }
}

/// Precision of a numeric fact, as declared by its `decimals` attribute.
///
/// Ordering is by precision: `Missing < Decimals(lower) < Decimals(higher) < Infinite`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Precision {
    /// No `decimals` attribute.
    #[default]
    Missing,
    /// Rounded to the given number of decimal places (negative = thousands, millions...).
    Decimals(i32),
    /// Exact value (`decimals="INF"`).
    Infinite,
}

impl FromStr for Precision {
    type Err = StatementError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("INF") {
            return Ok(Self::Infinite);
        }
        s.parse::<i32>()
            .map(Self::Decimals)
            .map_err(|_| StatementError::InvalidDecimals(s.to_string()))
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "-"),
            Self::Decimals(d) => write!(f, "{d}"),
            Self::Infinite => write!(f, "INF"),
        }
    }
}

/// A single reported fact.
///
/// Several facts may share one (concept, context) key; that is expected and
/// all of them are kept by the fact store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Fact {
    /// Concept reported.
    pub concept: Concept,
    /// Identifier of the context within its filing.
    pub context_id: String,
    /// Unit identifier for numeric facts.
    pub unit: Option<String>,
    /// Value exactly as it appeared in the source.
    pub raw_value: String,
    /// Numeric value, when the fact is numeric.
    pub value: Option<Decimal>,
    /// Declared precision.
    pub precision: Precision,
    /// Per-instance identifier (the fact's `id` attribute).
    pub instance_id: String,
    /// Accession number of the source filing.
    pub filing: String,
    /// Ingestion order within the store; assigned on insert.
    pub sequence: u64,
}

impl Fact {
    /// Creates a non-numeric fact with the required fields.
    #[must_use]
    pub fn new(concept: Concept, context_id: impl Into<String>, raw_value: impl Into<String>) -> Self {
        Self {
            concept,
            context_id: context_id.into(),
            unit: None,
            raw_value: raw_value.into(),
            value: None,
            precision: Precision::Missing,
            instance_id: String::new(),
            filing: String::new(),
            sequence: 0,
        }
    }

    /// Sets the numeric value.
    #[must_use]
    pub const fn with_value(mut self, value: Decimal) -> Self {
        self.value = Some(value);
        self
    }

    /// Sets the unit identifier.
    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Sets the precision.
    #[must_use]
    pub const fn with_precision(mut self, precision: Precision) -> Self {
        self.precision = precision;
        self
    }

    /// Sets the instance identifier.
    #[must_use]
    pub fn with_instance_id(mut self, instance_id: impl Into<String>) -> Self {
        self.instance_id = instance_id.into();
        self
    }

    /// Sets the source filing accession number.
    #[must_use]
    pub fn with_filing(mut self, filing: impl Into<String>) -> Self {
        self.filing = filing.into();
        self
    }
}
