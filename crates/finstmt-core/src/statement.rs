//! Statement output model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::fiscal::{DurationBucket, FilingInfo, FiscalPeriod, PeriodType};
use crate::types::{Concept, Period, UnitKind};

/// Canonical statement kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StatementKind {
    /// Statement of financial position.
    BalanceSheet,
    /// Statement of operations / income.
    IncomeStatement,
    /// Statement of cash flows.
    CashFlowStatement,
    /// Statement of changes in stockholders' equity.
    EquityStatement,
    /// Statement of comprehensive income.
    ComprehensiveIncome,
}

impl StatementKind {
    /// All kinds, in canonical order.
    pub const ALL: [Self; 5] = [
        Self::BalanceSheet,
        Self::IncomeStatement,
        Self::CashFlowStatement,
        Self::EquityStatement,
        Self::ComprehensiveIncome,
    ];

    /// The period type this statement is reported over.
    #[must_use]
    pub const fn period_type(&self) -> PeriodType {
        match self {
            Self::BalanceSheet => PeriodType::Instant,
            _ => PeriodType::Duration,
        }
    }

    /// Human-readable canonical name.
    #[must_use]
    pub const fn canonical_name(&self) -> &'static str {
        match self {
            Self::BalanceSheet => "Balance Sheet",
            Self::IncomeStatement => "Income Statement",
            Self::CashFlowStatement => "Cash Flow Statement",
            Self::EquityStatement => "Equity Statement",
            Self::ComprehensiveIncome => "Comprehensive Income",
        }
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_name())
    }
}

/// A selected period column.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PeriodDescriptor {
    /// The period.
    pub period: Period,
    /// Display label (`FY 2024`, `Q2 2024`, `Q3 YTD 2024`, or the instant date).
    pub label: String,
    /// Fiscal year the period belongs to, when the calendar is disclosed.
    pub fiscal_year: Option<i32>,
    /// Fiscal period label.
    pub fiscal_period: FiscalPeriod,
    /// Duration bucket for duration periods.
    pub bucket: Option<DurationBucket>,
}

impl PeriodDescriptor {
    /// Creates a descriptor whose label is the bare period.
    #[must_use]
    pub fn new(period: Period) -> Self {
        Self {
            period,
            label: period.to_string(),
            fiscal_year: None,
            fiscal_period: FiscalPeriod::Unknown,
            bucket: None,
        }
    }
}

/// One line item of a statement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementRow {
    /// Concept the row reports.
    pub concept: Concept,
    /// Label as disclosed by the filer.
    pub display_label: String,
    /// Presentation depth; 0 is top level.
    pub level: u32,
    /// Structural header without a value of its own.
    pub is_abstract: bool,
    /// Subtotal or total line.
    pub is_total: bool,
    /// Unit of the row's values, from the first value whose unit the filing declares.
    #[serde(default)]
    pub unit: Option<UnitKind>,
    /// Resolved values aligned with the statement's periods; `None` is a blank cell.
    pub values: Vec<Option<Decimal>>,
}

impl StatementRow {
    /// Returns true when at least one period has a value.
    #[must_use]
    pub fn has_values(&self) -> bool {
        self.values.iter().any(Option::is_some)
    }
}

/// A financial statement: rows by periods.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    /// Canonical kind.
    pub kind: StatementKind,
    /// Period columns, most recent first.
    pub periods: Vec<PeriodDescriptor>,
    /// Rows in presentation order.
    pub rows: Vec<StatementRow>,
}

impl Statement {
    /// Creates an empty statement.
    #[must_use]
    pub const fn new(kind: StatementKind) -> Self {
        Self {
            kind,
            periods: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Returns the row for a concept.
    #[must_use]
    pub fn row(&self, concept: &Concept) -> Option<&StatementRow> {
        self.rows.iter().find(|r| &r.concept == concept)
    }

    /// Returns the column index of a period.
    #[must_use]
    pub fn period_index(&self, period: &Period) -> Option<usize> {
        self.periods.iter().position(|p| &p.period == period)
    }

    /// Returns the value of a concept in a period, if reported.
    #[must_use]
    pub fn value(&self, concept: &Concept, period: &Period) -> Option<Decimal> {
        let index = self.period_index(period)?;
        self.row(concept)?.values.get(index).copied().flatten()
    }

    /// Returns true when the statement has neither rows nor periods.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() && self.periods.is_empty()
    }
}

/// A single-filing statement tagged with the filing it was built from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilingStatement {
    /// Source filing.
    pub filing: FilingInfo,
    /// Statement built from that filing.
    pub statement: Statement,
}

impl FilingStatement {
    /// Creates a new filing statement.
    #[must_use]
    pub const fn new(filing: FilingInfo, statement: Statement) -> Self {
        Self { filing, statement }
    }
}
